pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapters::{client::CalculatorClient, http::build_router, storage::LocalStorage};
pub use config::{ServerConfig, toml_config::TomlConfig};
pub use core::{aggregator::Aggregator, catalog::Catalog, handler::RequestHandler};
pub use utils::error::{CalcError, Result};
