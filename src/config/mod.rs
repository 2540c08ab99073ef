//! Configuration loading and validation
//!
//! Configuration is a TOML file describing the target site, credentials,
//! HTTP retry behavior, and where the CSV datasets live. Credentials may be
//! overridden through the `MAXI_USER` / `MAXI_PASS` environment variables.

mod parser;
mod types;
mod validation;

pub use parser::load_config;
pub use types::{
    Config, CredentialsConfig, DataConfig, HttpConfig, SiteConfig, TransfersConfig,
};
pub use validation::validate;
