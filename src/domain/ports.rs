use crate::domain::model::Placeable;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::net::SocketAddr;

use super::wire::{CalculationResponse, PlaceableRequest};

pub trait Storage: Send + Sync {
    fn read_file(&self, path: &str) -> impl std::future::Future<Output = Result<Vec<u8>>> + Send;
}

/// Read-only lookup of placeables by name.
pub trait CatalogStore: Send + Sync {
    /// All placeables in catalog-definition order.
    fn get_all(&self) -> &[Placeable];
    fn get(&self, name: &str) -> Option<&Placeable>;
}

pub trait ConfigProvider: Send + Sync {
    fn bind_addr(&self) -> SocketAddr;
    fn catalog_path(&self) -> &str;
}

/// A calculator that can be reached in-process or over HTTP.
#[async_trait]
pub trait CalculatorApi: Send + Sync {
    async fn list_placeables(&self) -> Result<Vec<Placeable>>;
    async fn calculate(
        &self,
        placeables: Vec<PlaceableRequest>,
        use_deep_desert_cost: bool,
    ) -> Result<CalculationResponse>;
}
