use crate::core::Placeable;
use crate::domain::wire::CalculationResponse;
use crate::utils::error::{CalcError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Csv,
}

pub fn render_placeables(placeables: &[Placeable], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(placeables)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["placeable", "resource", "amount"])?;
            for placeable in placeables {
                for (resource, amount) in &placeable.resources {
                    let amount = amount.to_string();
                    writer.write_record([placeable.name.as_str(), resource.as_str(), amount.as_str()])?;
                }
            }
            finish_csv(writer)
        }
        OutputFormat::Table => {
            let mut lines = Vec::with_capacity(placeables.len());
            for placeable in placeables {
                let resources: Vec<String> = placeable
                    .resources
                    .iter()
                    .map(|(resource, amount)| format!("{} ({})", resource, amount))
                    .collect();
                lines.push(format!("{}: {}", placeable.name, resources.join(", ")));
            }
            Ok(lines.join("\n"))
        }
    }
}

pub fn render_calculation(response: &CalculationResponse, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(response)?),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            writer.write_record(["resource", "amount"])?;
            for (resource, amount) in &response.total_resources {
                let amount = amount.to_string();
                writer.write_record([resource.as_str(), amount.as_str()])?;
            }
            finish_csv(writer)
        }
        OutputFormat::Table => {
            let mut lines = vec!["Items:".to_string()];
            for item in &response.items_calculated {
                lines.push(format!("  {} x{}", item.name, item.quantity));
            }

            let heading = if response.use_deep_desert_cost {
                "Total resources (Deep Desert cost):"
            } else {
                "Total resources:"
            };
            lines.push(heading.to_string());

            let width = response
                .total_resources
                .keys()
                .map(|k| k.len())
                .max()
                .unwrap_or(0);
            for (resource, amount) in &response.total_resources {
                lines.push(format!("  {:<width$}  {}", resource, amount, width = width));
            }
            Ok(lines.join("\n"))
        }
    }
}

fn finish_csv(writer: csv::Writer<Vec<u8>>) -> Result<String> {
    let data = writer.into_inner().map_err(|e| CalcError::IoError(e.into_error()))?;
    String::from_utf8(data).map_err(|e| {
        CalcError::IoError(std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    })
}
