use thiserror::Error;

#[derive(Error, Debug)]
pub enum MusterError {
    #[error("Unit {unit} is missing required field `{field}`")]
    MissingField { unit: String, field: &'static str },

    #[error("Unit {unit} has invalid size {size}")]
    InvalidSize { unit: String, size: u32 },

    #[error("Unit {unit} has negative cost {cost}")]
    NegativeCost { unit: String, cost: i32 },

    #[error("Unit at position {index} could not be read: {reason}")]
    MalformedUnit { index: usize, reason: String },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Roster parse error: {0}")]
    SerdeError(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    TomlError(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, MusterError>;
