use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::sync::Arc;

use crate::classifier::{ConfidenceSource, Midpoint, Policy, Seeded, ThreadRandom};
use crate::corpus::DEFAULT_THRESHOLD;

pub const CONFIG_FILE: &str = "explaincheck.toml";
pub const ENV_PREFIX: &str = "EXPLAINCHECK_";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConfidenceMode {
    #[default]
    Random,
    Seeded,
    Midpoint,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub bind: String,
    pub default_domain: String,
    pub policy: Policy,
    pub confidence: ConfidenceMode,
    pub seed: u64,
    pub similarity_threshold: f64,
    pub batch_concurrency: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            bind: "0.0.0.0:5000".into(),
            default_domain: crate::DEFAULT_DOMAIN.into(),
            policy: Policy::Enhanced,
            confidence: ConfidenceMode::Random,
            seed: 42,
            similarity_threshold: DEFAULT_THRESHOLD,
            batch_concurrency: 8,
        }
    }
}

impl Config {
    /// Defaults, then `explaincheck.toml` (or `path`), then `EXPLAINCHECK_*` env vars.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let file = path.unwrap_or_else(|| Path::new(CONFIG_FILE));
        let cfg = Figment::from(Serialized::defaults(Config::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed(ENV_PREFIX))
            .extract()?;
        Ok(cfg)
    }

    pub fn confidence_source(&self) -> Arc<dyn ConfidenceSource> {
        match self.confidence {
            ConfidenceMode::Random => Arc::new(ThreadRandom),
            ConfidenceMode::Seeded => Arc::new(Seeded::new(self.seed)),
            ConfidenceMode::Midpoint => Arc::new(Midpoint),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn defaults_without_sources() {
        Jail::expect_with(|_jail| {
            let cfg = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg.bind, "0.0.0.0:5000");
            assert_eq!(cfg.policy, Policy::Enhanced);
            assert_eq!(cfg.confidence, ConfidenceMode::Random);
            Ok(())
        });
    }

    #[test]
    fn file_then_env_layering() {
        Jail::expect_with(|jail| {
            jail.create_file(CONFIG_FILE, r#"
                bind = "127.0.0.1:8080"
                policy = "legacy"
                confidence = "seeded"
                seed = 7
            "#)?;
            jail.set_env("EXPLAINCHECK_BIND", "127.0.0.1:9090");
            jail.set_env("EXPLAINCHECK_SIMILARITY_THRESHOLD", "0.4");
            let cfg = Config::load(None).map_err(|e| e.to_string())?;
            assert_eq!(cfg.bind, "127.0.0.1:9090");
            assert_eq!(cfg.policy, Policy::Legacy);
            assert_eq!(cfg.confidence, ConfidenceMode::Seeded);
            assert_eq!(cfg.seed, 7);
            assert_eq!(cfg.similarity_threshold, 0.4);
            assert_eq!(cfg.default_domain, "agriculture");
            Ok(())
        });
    }

    #[test]
    fn midpoint_source() {
        let cfg = Config { confidence: ConfidenceMode::Midpoint, ..Config::default() };
        assert_eq!(cfg.confidence_source().draw(80, 95), 87);
    }
}
