//! Career Catalog — static reference data loaded once at startup.
//!
//! Source format is CSV with the header
//! `id,name,required_skills,target_riasec,salary_min,salary_max,min_education`.
//! `required_skills` holds `skill:weight` pairs separated by `;` and
//! `target_riasec` holds six `;`-separated numbers.

use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::Deserialize;
use tracing::info;

use crate::errors::EngineError;
use crate::models::{
    normalize_skill, CareerDefinition, EducationLevel, RequiredSkill, RiasecVector, SalaryRange,
};

pub const CATALOG_COLUMNS: [&str; 7] = [
    "id",
    "name",
    "required_skills",
    "target_riasec",
    "salary_min",
    "salary_max",
    "min_education",
];

#[derive(Debug, Deserialize)]
struct CatalogRow {
    id: String,
    name: String,
    required_skills: String,
    target_riasec: String,
    salary_min: String,
    salary_max: String,
    min_education: String,
}

/// Read-only career catalog keyed by identifier. `all()` yields careers in
/// ascending id order.
#[derive(Debug, Clone, Default)]
pub struct CareerCatalog {
    careers: BTreeMap<String, CareerDefinition>,
}

impl CareerCatalog {
    /// Parses a CSV catalog. Any malformed row rejects the whole catalog.
    pub fn load<R: Read>(source: R) -> Result<Self, EngineError> {
        let mut reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_reader(source);

        let headers = reader
            .headers()
            .map_err(|e| EngineError::catalog(1, format!("unreadable header: {e}")))?
            .clone();
        let found: Vec<&str> = headers.iter().collect();
        if found != CATALOG_COLUMNS {
            return Err(EngineError::catalog(
                1,
                format!(
                    "expected columns [{}], found [{}]",
                    CATALOG_COLUMNS.join(","),
                    found.join(",")
                ),
            ));
        }

        let mut careers = BTreeMap::new();
        for record in reader.records() {
            let record = record.map_err(|e| {
                let line = e.position().map(|p| p.line() as usize).unwrap_or(0);
                EngineError::catalog(line, e.to_string())
            })?;
            let line = record.position().map(|p| p.line() as usize).unwrap_or(0);
            let row: CatalogRow = record
                .deserialize(Some(&headers))
                .map_err(|e| EngineError::catalog(line, e.to_string()))?;
            let career = parse_row(row, line)?;

            match careers.entry(career.id.clone()) {
                Entry::Occupied(_) => {
                    return Err(EngineError::catalog(
                        line,
                        format!("duplicate career id '{}'", career.id),
                    ))
                }
                Entry::Vacant(slot) => {
                    slot.insert(career);
                }
            }
        }

        Ok(Self { careers })
    }

    pub fn load_path(path: impl AsRef<Path>) -> Result<Self, EngineError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| {
            EngineError::catalog(0, format!("cannot open {}: {e}", path.display()))
        })?;
        let catalog = Self::load(file)?;
        info!("Loaded {} careers from {}", catalog.len(), path.display());
        Ok(catalog)
    }

    pub fn get(&self, id: &str) -> Result<&CareerDefinition, EngineError> {
        self.careers
            .get(id)
            .ok_or_else(|| EngineError::UnknownCareer(id.to_string()))
    }

    pub fn all(&self) -> impl Iterator<Item = &CareerDefinition> {
        self.careers.values()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.careers.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.careers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.careers.is_empty()
    }
}

fn parse_row(row: CatalogRow, line: usize) -> Result<CareerDefinition, EngineError> {
    if row.id.is_empty() {
        return Err(EngineError::catalog(line, "empty career id"));
    }
    if row.name.is_empty() {
        return Err(EngineError::catalog(line, format!("career '{}' has no name", row.id)));
    }

    let required_skills = parse_required_skills(&row.required_skills, line)?;
    let target_riasec = parse_riasec(&row.target_riasec, line)?;

    let salary_min = parse_number(&row.salary_min, "salary_min", line)?;
    let salary_max = parse_number(&row.salary_max, "salary_max", line)?;
    if salary_min < 0.0 || salary_min > salary_max {
        return Err(EngineError::catalog(
            line,
            format!("invalid salary range {salary_min}..{salary_max}"),
        ));
    }

    let min_education = row
        .min_education
        .parse::<EducationLevel>()
        .map_err(|e| EngineError::catalog(line, e.to_string()))?;

    Ok(CareerDefinition {
        id: row.id,
        name: row.name,
        required_skills,
        target_riasec,
        salary: SalaryRange {
            min: salary_min,
            max: salary_max,
        },
        min_education,
    })
}

/// `python:0.5;sql:0.3` → sorted, normalized requirements. Empty is allowed.
fn parse_required_skills(raw: &str, line: usize) -> Result<Vec<RequiredSkill>, EngineError> {
    let mut seen = BTreeSet::new();
    let mut skills = Vec::new();

    for pair in raw.split(';').map(str::trim).filter(|p| !p.is_empty()) {
        let (name, weight) = pair.rsplit_once(':').ok_or_else(|| {
            EngineError::catalog(line, format!("required skill '{pair}' has no weight"))
        })?;
        let skill = normalize_skill(name)
            .ok_or_else(|| EngineError::catalog(line, format!("blank skill name in '{pair}'")))?;
        let weight: f64 = weight.trim().parse().map_err(|_| {
            EngineError::catalog(line, format!("weight for '{skill}' is not a number"))
        })?;
        if !(weight > 0.0 && weight <= 1.0) {
            return Err(EngineError::catalog(
                line,
                format!("weight {weight} for '{skill}' is outside (0, 1]"),
            ));
        }
        if !seen.insert(skill.clone()) {
            return Err(EngineError::catalog(
                line,
                format!("skill '{skill}' listed twice"),
            ));
        }
        skills.push(RequiredSkill { skill, weight });
    }

    skills.sort_by(|a, b| a.skill.cmp(&b.skill));
    Ok(skills)
}

fn parse_riasec(raw: &str, line: usize) -> Result<RiasecVector, EngineError> {
    let values = raw
        .split(';')
        .map(|v| parse_number(v, "target_riasec", line))
        .collect::<Result<Vec<f64>, _>>()?;
    let scores: [f64; 6] = values.try_into().map_err(|v: Vec<f64>| {
        EngineError::catalog(line, format!("target_riasec needs 6 values, got {}", v.len()))
    })?;
    let vector = RiasecVector::new(scores).map_err(|e| EngineError::catalog(line, e.to_string()))?;
    if vector.is_zero() {
        return Err(EngineError::catalog(line, "target_riasec is all zero"));
    }
    Ok(vector)
}

fn parse_number(raw: &str, field: &str, line: usize) -> Result<f64, EngineError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| EngineError::catalog(line, format!("{field} value '{raw}' is not a number")))
}
