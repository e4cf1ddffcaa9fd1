use crate::app::report::OutputFormat;
use crate::config::Overrides;
use crate::domain::wire::PlaceableRequest;
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::validate_placeable_name;
use clap::{Args, Parser, Subcommand};

#[derive(Debug, Parser)]
#[command(name = "placeable-calc")]
#[command(about = "Resource calculator for base-building placeables")]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the HTTP calculator service
    Serve(ServeArgs),
    /// List available placeables
    List(ListArgs),
    /// Calculate total resources for a selection
    Calculate(CalculateArgs),
}

#[derive(Debug, Args)]
pub struct ServeArgs {
    /// Path to TOML configuration file (defaults to ./calculator.toml when present)
    #[arg(short, long)]
    pub config: Option<String>,

    /// Override the listen address, e.g. 0.0.0.0:8000
    #[arg(long)]
    pub bind: Option<String>,

    /// Override the catalog JSON path
    #[arg(long)]
    pub catalog: Option<String>,
}

impl ServeArgs {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            bind_addr: self.bind.clone(),
            catalog_path: self.catalog.clone(),
        }
    }
}

/// Where calculations run: a remote service or a local catalog file.
#[derive(Debug, Args)]
#[group(required = true, multiple = false)]
pub struct SourceArgs {
    /// Base URL of a running calculator service
    #[arg(long)]
    pub api_url: Option<String>,

    /// Calculate in-process from a catalog JSON file
    #[arg(long)]
    pub catalog: Option<String>,
}

#[derive(Debug, Args)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

#[derive(Debug, Args)]
pub struct CalculateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Selected placeable, repeatable: --item "Wall=3"
    #[arg(long = "item", value_name = "NAME=QTY", required = true)]
    pub items: Vec<String>,

    /// Apply the Deep Desert cost (50% reduction)
    #[arg(long)]
    pub deep_desert: bool,

    #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,
}

impl CalculateArgs {
    pub fn placeables(&self) -> Result<Vec<PlaceableRequest>> {
        self.items.iter().map(String::as_str).map(parse_item).collect()
    }
}

/// 解析 `NAME=QTY`；名稱可包含 '='，以最後一個為分隔
pub fn parse_item(raw: &str) -> Result<PlaceableRequest> {
    let (name, quantity) = raw
        .rsplit_once('=')
        .ok_or_else(|| CalcError::InvalidQuantity {
            name: raw.to_string(),
            value: "missing '=QTY'".to_string(),
        })?;

    let name = name.trim();
    validate_placeable_name(name)?;

    let quantity = quantity
        .trim()
        .parse::<i64>()
        .map_err(|_| CalcError::InvalidQuantity {
            name: name.to_string(),
            value: quantity.to_string(),
        })?;

    Ok(PlaceableRequest::new(name, quantity))
}
