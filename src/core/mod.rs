pub mod aggregator;
pub mod catalog;
pub mod handler;

pub use crate::domain::model::{
    CalculationResult, ItemCalculated, Placeable, ResourceTotals, Selection, SelectionEntry,
};
pub use crate::domain::ports::{CalculatorApi, CatalogStore, ConfigProvider, Storage};
pub use crate::utils::error::Result;
