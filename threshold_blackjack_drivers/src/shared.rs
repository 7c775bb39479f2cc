use serde::{Deserialize, Serialize};
use std::{fs, path::Path};
use thiserror::Error;
use threshold_blackjack::{simulation::hand::BUST, Rule, ThresholdConfig};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("cannot read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("cannot parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("threshold config `{name}` is missing `{field}`")]
    MissingThreshold { name: String, field: &'static str },
    #[error("invalid rule: {0}")]
    InvalidRule(String),
    #[error("cannot find home directory")]
    NoHomeDirectory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub rule: ConfigRule,
    pub simulator: ConfigSimulator,
    pub thresholds: Vec<ConfigThreshold>,
}

impl Config {
    /// Converts every threshold entry, failing on the first incomplete one.
    pub fn threshold_configs(&self) -> Result<Vec<ThresholdConfig>, ConfigError> {
        self.thresholds
            .iter()
            .enumerate()
            .map(|(index, threshold)| threshold.clone().into_threshold_config(index))
            .collect()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigRule {
    pub number_of_decks: u8,
    pub house_stands_on: u16,
    pub good_upcard_bound: u16,
    pub poor_upcard_bound: u16,
    pub bet: f64,
    pub payout_blackjack: f64,
    pub surrender_policy: String,
}

impl Default for ConfigRule {
    fn default() -> Self {
        let rule = Rule::default();
        ConfigRule {
            number_of_decks: rule.number_of_decks,
            house_stands_on: rule.house_stands_on,
            good_upcard_bound: rule.good_upcard_bound,
            poor_upcard_bound: rule.poor_upcard_bound,
            bet: rule.bet,
            payout_blackjack: rule.payout_blackjack,
            surrender_policy: String::from("NoSurrender"),
        }
    }
}

impl TryInto<Rule> for ConfigRule {
    type Error = ConfigError;

    fn try_into(self) -> Result<Rule, Self::Error> {
        if self.number_of_decks == 0 {
            return Err(ConfigError::InvalidRule(String::from(
                "number_of_decks must be at least 1",
            )));
        }
        if self.poor_upcard_bound > self.good_upcard_bound {
            return Err(ConfigError::InvalidRule(String::from(
                "poor_upcard_bound cannot exceed good_upcard_bound",
            )));
        }
        if self.house_stands_on > BUST {
            return Err(ConfigError::InvalidRule(format!(
                "house_stands_on cannot exceed {}",
                BUST
            )));
        }
        if self.bet <= 0.0 {
            return Err(ConfigError::InvalidRule(String::from("bet must be positive")));
        }
        let surrender_policy = self
            .surrender_policy
            .parse()
            .map_err(|e: serde::de::value::Error| ConfigError::InvalidRule(e.to_string()))?;

        let rule = Rule {
            number_of_decks: self.number_of_decks,
            house_stands_on: self.house_stands_on,
            good_upcard_bound: self.good_upcard_bound,
            poor_upcard_bound: self.poor_upcard_bound,
            bet: self.bet,
            payout_blackjack: self.payout_blackjack,
            surrender_policy,
        };

        Ok(rule)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigSimulator {
    pub iterations: u64,
    pub seed: u64,
    /// 1 plays every game on one stream; 0 uses every available core.
    #[serde(default = "default_number_of_threads")]
    pub number_of_threads: usize,
}

fn default_number_of_threads() -> usize {
    1
}

/// A threshold entry as written in the file. Every threshold must be present.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConfigThreshold {
    pub name: Option<String>,
    pub good: Option<u16>,
    pub fair: Option<u16>,
    pub poor: Option<u16>,
}

impl ConfigThreshold {
    /// Unnamed entries are called after their position in the list.
    pub fn into_threshold_config(self, index: usize) -> Result<ThresholdConfig, ConfigError> {
        let name = self
            .name
            .unwrap_or_else(|| format!("thresholds #{}", index + 1));
        let missing = |field: &'static str| ConfigError::MissingThreshold {
            name: name.clone(),
            field,
        };
        let good = self.good.ok_or_else(|| missing("good"))?;
        let fair = self.fair.ok_or_else(|| missing("fair"))?;
        let poor = self.poor.ok_or_else(|| missing("poor"))?;
        Ok(ThresholdConfig::new(&name, good, fair, poor))
    }
}

pub fn parse_config_from_str(content: &str) -> Result<Config, ConfigError> {
    Ok(serde_yaml::from_str(content)?)
}

/// Reads the content of a given config file and parses it to a Config.
pub fn parse_config_from_file<P: AsRef<Path>>(filename: P) -> Result<Config, ConfigError> {
    let file_content = fs::read_to_string(filename)?;
    parse_config_from_str(&file_content)
}
