use daifugo_bot::AiParams;
use serde::Deserialize;
use std::collections::{BTreeMap, HashSet};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const SEAT_COUNT: usize = 4;
const ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root roster configuration loaded from YAML. Exactly four players, one
/// per seat, in listing order.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct RosterConfig {
    pub players: Vec<PlayerConfig>,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl RosterConfig {
    /// Load a roster from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: RosterConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate without performing I/O. A bad roster is fatal before any
    /// round is dealt.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        if self.players.len() != SEAT_COUNT {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: format!(
                    "exactly {SEAT_COUNT} players are required, found {}",
                    self.players.len()
                ),
            });
        }

        let mut seen = HashSet::new();
        for (index, player) in self.players.iter().enumerate() {
            player.validate(index)?;
            if !seen.insert(player.id.clone()) {
                return Err(ValidationError::InvalidField {
                    field: "players".to_string(),
                    message: format!("player id '{}' defined more than once", player.id),
                });
            }
        }

        self.output.validate()?;
        self.logging.normalize();
        Ok(())
    }
}

/// One roster entry. `dialogues` are opaque flavor-text pools carried for
/// an external presentation layer; nothing here reads them.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct PlayerConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub human: bool,
    #[serde(default)]
    pub params: ParamsConfig,
    #[serde(default)]
    pub dialogues: BTreeMap<String, Vec<String>>,
}

impl PlayerConfig {
    fn validate(&self, index: usize) -> Result<(), ValidationError> {
        if self.id.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: format!("players[{index}].id"),
                message: "id must not be empty".to_string(),
            });
        }
        if !self.id.chars().all(|c| ID_ALLOWED.contains(c)) {
            return Err(ValidationError::InvalidField {
                field: format!("players[{index}].id"),
                message: "id may only contain alphanumeric characters, '.', '_' or '-'"
                    .to_string(),
            });
        }
        if self.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: format!("players[{index}].name"),
                message: "name must not be empty".to_string(),
            });
        }
        self.params.validate(index)?;
        Ok(())
    }
}

/// Scoring weights as written in the roster. Missing fields fall back to
/// the engine defaults rather than failing the load.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq)]
pub struct ParamsConfig {
    #[serde(default = "default_weight")]
    pub attack: f64,
    #[serde(default = "default_weight")]
    pub defense: f64,
    #[serde(default = "default_weight")]
    pub revolution: f64,
    #[serde(default = "default_weight")]
    pub trump: f64,
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
}

impl Default for ParamsConfig {
    fn default() -> Self {
        Self {
            attack: default_weight(),
            defense: default_weight(),
            revolution: default_weight(),
            trump: default_weight(),
            epsilon: default_epsilon(),
        }
    }
}

impl ParamsConfig {
    fn validate(&self, index: usize) -> Result<(), ValidationError> {
        for (label, value) in [
            ("attack", self.attack),
            ("defense", self.defense),
            ("revolution", self.revolution),
            ("trump", self.trump),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ValidationError::InvalidField {
                    field: format!("players[{index}].params.{label}"),
                    message: format!("weight must be within 0.0..=1.0, got {value}"),
                });
            }
        }
        if !(0.0..=1.0).contains(&self.epsilon) {
            return Err(ValidationError::InvalidField {
                field: format!("players[{index}].params.epsilon"),
                message: format!("epsilon must be within 0.0..=1.0, got {}", self.epsilon),
            });
        }
        Ok(())
    }

    pub fn to_ai_params(self) -> AiParams {
        AiParams {
            w_attack: self.attack,
            w_defense: self.defense,
            w_revolution: self.revolution,
            w_trump: self.trump,
            epsilon: self.epsilon,
        }
    }
}

fn default_weight() -> f64 {
    0.5
}

fn default_epsilon() -> f64 {
    0.1
}

/// Output artifact configuration.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct OutputConfig {
    #[serde(default = "default_jsonl")]
    pub jsonl: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            jsonl: default_jsonl(),
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.jsonl.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "output.jsonl".to_string(),
                message: "path must not be empty".to_string(),
            });
        }
        Ok(())
    }

    pub fn jsonl_path(&self) -> PathBuf {
        PathBuf::from(&self.jsonl)
    }
}

fn default_jsonl() -> String {
    "sim/out/rounds.jsonl".to_string()
}

/// Logging defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "info".to_string()
}

/// Errors surfaced when loading roster files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read roster {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse roster {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid roster in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
