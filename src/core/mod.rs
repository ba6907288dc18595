pub mod config;
pub mod error;
pub mod types;

pub use config::{load_config, ConversionConfig};
pub use error::{MusterError, Result};
pub use types::Rating;
