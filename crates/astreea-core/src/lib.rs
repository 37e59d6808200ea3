pub mod config;
pub mod error;

pub use config::{AstreeaConfig, ChatConfig, GeneralConfig};
pub use error::{AstreeaError, Result};
