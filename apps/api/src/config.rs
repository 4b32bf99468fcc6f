use std::str::FromStr;

use anyhow::{Context, Result};

use crate::ranking::RankingWeights;

/// Application configuration loaded from environment variables.
/// Fails at startup if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub catalog_path: String,
    pub model_path: String,
    pub resource_provider_url: Option<String>,
    pub resource_catalog_path: Option<String>,
    pub port: u16,
    pub rust_log: String,
    pub weights: RankingWeights,
    pub riasec_scaling: bool,
    pub default_top_n: i64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = RankingWeights::default();
        let weights = RankingWeights {
            classifier: parse_env_or("WEIGHT_CLASSIFIER", defaults.classifier)?,
            riasec: parse_env_or("WEIGHT_RIASEC", defaults.riasec)?,
            skill: parse_env_or("WEIGHT_SKILL", defaults.skill)?,
        };
        weights
            .validate()
            .context("WEIGHT_* variables do not form a valid weighting")?;

        let default_top_n = parse_env_or("DEFAULT_TOP_N", 5i64)?;
        ensure_top_n(default_top_n)?;

        Ok(Config {
            catalog_path: require_env("CATALOG_PATH")?,
            model_path: require_env("MODEL_PATH")?,
            resource_provider_url: optional_env("RESOURCE_PROVIDER_URL"),
            resource_catalog_path: optional_env("RESOURCE_CATALOG_PATH"),
            port: parse_env_or("PORT", 8080u16)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            weights,
            riasec_scaling: parse_env_or("RIASEC_SCALING", true)?,
            default_top_n,
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn ensure_top_n(value: i64) -> Result<()> {
    anyhow::ensure!(value >= 1, "DEFAULT_TOP_N must be at least 1, got {value}");
    Ok(())
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env_or<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_or_uses_default_when_unset() {
        let v: f64 = parse_env_or("CAREERLENS_TEST_UNSET_WEIGHT", 0.25).unwrap();
        assert_eq!(v, 0.25);
    }

    #[test]
    fn test_parse_env_or_rejects_garbage() {
        std::env::set_var("CAREERLENS_TEST_BAD_PORT", "eighty");
        let r: Result<u16> = parse_env_or("CAREERLENS_TEST_BAD_PORT", 8080);
        assert!(r.is_err());
        std::env::remove_var("CAREERLENS_TEST_BAD_PORT");
    }

    #[test]
    fn test_default_top_n_must_be_positive() {
        assert!(ensure_top_n(1).is_ok());
        for bad in [0, -3] {
            let err = ensure_top_n(bad).unwrap_err();
            assert!(err.to_string().contains("DEFAULT_TOP_N"));
        }
    }

    #[test]
    fn test_optional_env_ignores_blank() {
        std::env::set_var("CAREERLENS_TEST_BLANK", "  ");
        assert!(optional_env("CAREERLENS_TEST_BLANK").is_none());
        std::env::remove_var("CAREERLENS_TEST_BLANK");
    }
}
