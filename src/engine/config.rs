//! Engine defaults loaded from JSON.
//!
//! Every field is optional in the file; missing fields take the defaults
//! below. `load` and `from_json` validate before returning.

use std::path::Path;

use log::warn;
use serde::{Deserialize, Serialize};

use crate::engine::ai::SkillLevel;
use crate::engine::equity::DEFAULT_ITERATIONS;
use crate::engine::error::ConfigError;
use crate::engine::simulator::{Blinds, SimulationConfig};

/// Upper bound on parallel equity batches; larger values are clamped.
pub const MAX_EQUITY_BATCHES: u32 = 256;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Monte Carlo samples when the caller does not choose.
    pub default_iterations: u32,
    pub starting_stack: u32,
    pub small_blind: u32,
    pub big_blind: u32,
    pub opponent_skill: SkillLevel,
    pub hero_skill: SkillLevel,
    pub equity_batches: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            default_iterations: DEFAULT_ITERATIONS,
            starting_stack: 1000,
            small_blind: 10,
            big_blind: 20,
            opponent_skill: SkillLevel::Medium,
            hero_skill: SkillLevel::Medium,
            equity_batches: 4,
        }
    }
}

impl EngineConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content =
            std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_json(&content)
    }

    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_json::from_str(json)?;
        if config.equity_batches > MAX_EQUITY_BATCHES {
            warn!(
                "equity_batches {} clamped to {MAX_EQUITY_BATCHES}",
                config.equity_batches
            );
            config.equity_batches = MAX_EQUITY_BATCHES;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.default_iterations == 0 {
            return Err(ConfigError::Invalid("default_iterations must be positive".into()));
        }
        if self.big_blind == 0 {
            return Err(ConfigError::Invalid("big_blind must be positive".into()));
        }
        if self.small_blind == 0 || self.small_blind > self.big_blind {
            return Err(ConfigError::Invalid(format!(
                "small_blind {} must be between 1 and big_blind {}",
                self.small_blind, self.big_blind
            )));
        }
        if self.starting_stack < self.big_blind {
            return Err(ConfigError::Invalid(format!(
                "starting_stack {} is below the big blind",
                self.starting_stack
            )));
        }
        if self.equity_batches == 0 {
            return Err(ConfigError::Invalid("equity_batches must be positive".into()));
        }
        Ok(())
    }

    pub fn blinds(&self) -> Blinds {
        Blinds { small: self.small_blind, big: self.big_blind }
    }

    /// Heads-up hand setup with both players at `starting_stack`.
    pub fn simulation(&self, seed: u64) -> SimulationConfig {
        let mut config = SimulationConfig::new(
            self.opponent_skill,
            &[self.starting_stack, self.starting_stack],
            self.blinds(),
            seed,
        );
        config.hero_skill = self.hero_skill;
        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn empty_object_gives_defaults() {
        let config = EngineConfig::from_json("{}").unwrap();
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.default_iterations, 25_000);
    }

    #[test]
    fn partial_override() {
        let config = EngineConfig::from_json(r#"{"opponent_skill": "hard", "big_blind": 50, "small_blind": 25}"#).unwrap();
        assert_eq!(config.opponent_skill, SkillLevel::Hard);
        assert_eq!(config.blinds(), Blinds { small: 25, big: 50 });
        assert_eq!(config.starting_stack, 1000);
        assert_eq!(config.simulation(3).starting_stacks, vec![1000, 1000]);
    }

    #[test]
    fn invalid_values_rejected() {
        for json in [
            r#"{"default_iterations": 0}"#,
            r#"{"big_blind": 0}"#,
            r#"{"small_blind": 40}"#,
            r#"{"starting_stack": 5}"#,
            r#"{"equity_batches": 0}"#,
        ] {
            assert!(matches!(EngineConfig::from_json(json), Err(ConfigError::Invalid(_))), "{json}");
        }
        assert!(matches!(EngineConfig::from_json("{not json"), Err(ConfigError::Parse(_))));
        assert!(matches!(EngineConfig::from_json(r#"{"hero_skill": "expert"}"#), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn oversized_batches_clamped() {
        let config = EngineConfig::from_json(r#"{"equity_batches": 100000}"#).unwrap();
        assert_eq!(config.equity_batches, MAX_EQUITY_BATCHES);
    }

    #[test]
    fn load_from_file() {
        let path = std::env::temp_dir().join(format!("holdem_core_config_{}.json", std::process::id()));
        let mut file = std::fs::File::create(&path).unwrap();
        write!(file, r#"{{"starting_stack": 2000}}"#).unwrap();
        drop(file);
        let config = EngineConfig::load(&path).unwrap();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(config.starting_stack, 2000);

        assert!(matches!(EngineConfig::load(&path), Err(ConfigError::Io(_, _))));
    }
}
