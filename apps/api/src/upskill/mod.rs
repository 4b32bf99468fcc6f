//! Upskill Mapper — looks up learning resources for each missing skill.
//!
//! The provider is a pluggable capability (`Arc<dyn ResourceProvider>`).
//! A failed lookup degrades to an empty list for that skill only.

pub mod http;

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use futures::future::join_all;
use tracing::{info, warn};

use crate::errors::{EngineError, ResourceError};
use crate::gap::GapEntry;
use crate::models::{normalize_skill, ResourceRef};

pub use http::HttpResourceProvider;

#[async_trait]
pub trait ResourceProvider: Send + Sync {
    async fn lookup(&self, skill: &str) -> Result<Vec<ResourceRef>, ResourceError>;
}

/// Queries the provider for every entry with severity > 0, concurrently.
/// Held skills are never queried.
pub async fn map_to_resources(
    gap_entries: &[GapEntry],
    provider: &dyn ResourceProvider,
) -> BTreeMap<String, Vec<ResourceRef>> {
    let missing: Vec<&str> = gap_entries
        .iter()
        .filter(|e| e.severity > 0.0)
        .map(|e| e.skill.as_str())
        .collect();

    let lookups = missing.iter().map(|skill| async move {
        let resources = match provider.lookup(skill).await {
            Ok(resources) => resources,
            Err(e) => {
                warn!("Resource lookup for '{skill}' failed: {e}");
                Vec::new()
            }
        };
        (skill.to_string(), resources)
    });

    join_all(lookups).await.into_iter().collect()
}

/// In-memory provider keyed by normalized skill name. Unknown skills return
/// an empty list rather than an error.
#[derive(Debug, Clone, Default)]
pub struct StaticResourceProvider {
    resources: BTreeMap<String, Vec<ResourceRef>>,
}

impl StaticResourceProvider {
    /// Two keys that normalize to the same skill (e.g. "excel" and
    /// "MS Excel") are rejected, as in the career catalog.
    pub fn new(resources: HashMap<String, Vec<ResourceRef>>) -> Result<Self, EngineError> {
        let mut raw: Vec<(String, Vec<ResourceRef>)> = resources.into_iter().collect();
        raw.sort_by(|a, b| a.0.cmp(&b.0));

        let mut normalized: BTreeMap<String, (String, Vec<ResourceRef>)> = BTreeMap::new();
        for (key, refs) in raw {
            let Some(skill) = normalize_skill(&key) else {
                continue;
            };
            match normalized.entry(skill) {
                Entry::Vacant(slot) => {
                    slot.insert((key, refs));
                }
                Entry::Occupied(slot) => {
                    return Err(EngineError::InvalidInput(format!(
                        "resource keys '{}' and '{key}' both normalize to '{}'",
                        slot.get().0,
                        slot.key()
                    )));
                }
            }
        }

        Ok(Self {
            resources: normalized
                .into_iter()
                .map(|(skill, (_, refs))| (skill, refs))
                .collect(),
        })
    }

    /// Reads a JSON object of `{ "skill": [{title, platform, url}, ...] }`.
    pub fn load_path(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path)?;
        let resources: HashMap<String, Vec<ResourceRef>> = serde_json::from_str(&raw)?;
        info!(
            "Loaded resources for {} skills from {}",
            resources.len(),
            path.display()
        );
        Ok(Self::new(resources)?)
    }
}

#[async_trait]
impl ResourceProvider for StaticResourceProvider {
    async fn lookup(&self, skill: &str) -> Result<Vec<ResourceRef>, ResourceError> {
        Ok(self.resources.get(skill).cloned().unwrap_or_default())
    }
}
