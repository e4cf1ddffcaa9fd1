use crate::core::aggregator::Aggregator;
use crate::core::{CalculatorApi, CatalogStore, Placeable, Selection};
use crate::domain::wire::{CalculationRequest, CalculationResponse, PlaceableRequest};
use crate::utils::error::{CalcError, Result};
use crate::utils::validation::validate_placeable_name;
use async_trait::async_trait;
use std::sync::Arc;

/// Validates raw calculation requests and shapes aggregator output for transport.
pub struct RequestHandler<C: CatalogStore> {
    aggregator: Aggregator<C>,
}

impl<C: CatalogStore> Clone for RequestHandler<C> {
    fn clone(&self) -> Self {
        Self {
            aggregator: self.aggregator.clone(),
        }
    }
}

impl<C: CatalogStore> RequestHandler<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self {
            aggregator: Aggregator::new(catalog),
        }
    }

    pub fn catalog(&self) -> &C {
        self.aggregator.catalog()
    }

    pub fn placeables(&self) -> &[Placeable] {
        self.catalog().get_all()
    }

    pub fn handle(&self, request: &CalculationRequest) -> Result<CalculationResponse> {
        let selection = parse_selection(&request.placeables)?;

        if selection.active_len() == 0 {
            return Err(CalcError::EmptySelection);
        }

        let result = self
            .aggregator
            .aggregate(&selection, request.use_deep_desert_cost)?;

        tracing::debug!(
            "Calculated {} items into {} resources (deep desert: {})",
            result.items_calculated.len(),
            result.total_resources.len(),
            result.use_deep_desert_cost
        );

        Ok(result.into())
    }
}

/// 結構驗證：名稱、數量、重複項目
pub fn parse_selection(placeables: &[PlaceableRequest]) -> Result<Selection> {
    let mut selection = Selection::new();

    for item in placeables {
        validate_placeable_name(&item.name)?;
        let quantity = parse_quantity(&item.name, &item.quantity)?;

        if !selection.insert(item.name.clone(), quantity) {
            return Err(CalcError::DuplicatePlaceable(item.name.clone()));
        }
    }

    Ok(selection)
}

fn parse_quantity(name: &str, value: &serde_json::Value) -> Result<i64> {
    value.as_i64().ok_or_else(|| CalcError::InvalidQuantity {
        name: name.to_string(),
        value: value.to_string(),
    })
}

#[async_trait]
impl<C: CatalogStore> CalculatorApi for RequestHandler<C> {
    async fn list_placeables(&self) -> Result<Vec<Placeable>> {
        Ok(self.placeables().to_vec())
    }

    async fn calculate(
        &self,
        placeables: Vec<PlaceableRequest>,
        use_deep_desert_cost: bool,
    ) -> Result<CalculationResponse> {
        self.handle(&CalculationRequest {
            placeables,
            use_deep_desert_cost,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalog::Catalog;
    use serde_json::json;

    fn handler() -> RequestHandler<Catalog> {
        let catalog = Catalog::from_json_slice(
            br#"[
                {"name": "Wall", "resources": {"Concrete": 10, "Steel": 2}},
                {"name": "Door", "resources": {"Steel": 5, "Glass": 1}}
            ]"#,
        )
        .unwrap();
        RequestHandler::new(Arc::new(catalog))
    }

    fn request(body: serde_json::Value) -> CalculationRequest {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_handle_valid_request() {
        let response = handler()
            .handle(&request(json!({
                "placeables": [{"name": "Wall", "quantity": 3}, {"name": "Door", "quantity": 2}],
                "use_deep_desert_cost": true
            })))
            .unwrap();

        assert_eq!(response.total_resources["Concrete"], 15);
        assert_eq!(response.total_resources["Steel"], 8);
        assert_eq!(response.total_resources["Glass"], 1);
        assert!(response.use_deep_desert_cost);
        assert_eq!(response.items_calculated.len(), 2);
    }

    #[test]
    fn test_non_integer_quantity_rejected() {
        for bad in [json!("3"), json!(1.5), json!(null), json!(true), json!(u64::MAX)] {
            let err = handler()
                .handle(&request(json!({"placeables": [{"name": "Wall", "quantity": bad.clone()}]})))
                .unwrap_err();
            assert!(
                matches!(err, CalcError::InvalidQuantity { ref name, .. } if name == "Wall"),
                "unexpected error for {}: {:?}",
                bad,
                err
            );
        }
    }

    #[test]
    fn test_blank_name_rejected() {
        let err = handler()
            .handle(&request(json!({"placeables": [{"name": "  ", "quantity": 1}]})))
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidPlaceableName { .. }));
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let err = handler()
            .handle(&request(json!({
                "placeables": [{"name": "Wall", "quantity": 1}, {"name": "Wall", "quantity": 2}]
            })))
            .unwrap_err();
        assert!(matches!(err, CalcError::DuplicatePlaceable(ref name) if name == "Wall"));
    }

    #[test]
    fn test_empty_selection_rejected() {
        let h = handler();

        let empty = h.handle(&request(json!({"placeables": []}))).unwrap_err();
        assert!(matches!(empty, CalcError::EmptySelection));

        let all_zero = h
            .handle(&request(json!({"placeables": [{"name": "Wall", "quantity": 0}]})))
            .unwrap_err();
        assert!(matches!(all_zero, CalcError::EmptySelection));
    }

    #[test]
    fn test_validation_runs_before_catalog_lookup() {
        let err = handler()
            .handle(&request(json!({
                "placeables": [{"name": "Nonexistent", "quantity": 1}, {"name": "Wall", "quantity": "x"}]
            })))
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidQuantity { .. }));
    }

    #[test]
    fn test_unknown_placeable_surfaces() {
        let err = handler()
            .handle(&request(json!({
                "placeables": [{"name": "Wall", "quantity": 1}, {"name": "Nonexistent", "quantity": 1}]
            })))
            .unwrap_err();
        assert!(matches!(err, CalcError::UnknownPlaceable(ref name) if name == "Nonexistent"));
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_in_process_calculator_api() {
        let h = handler();

        let placeables = h.list_placeables().await.unwrap();
        assert_eq!(placeables.len(), 2);

        let response = h
            .calculate(vec![PlaceableRequest::new("Door", 1)], false)
            .await
            .unwrap();
        assert_eq!(response.total_resources["Steel"], 5);
    }

    #[test]
    fn test_missing_quantity_is_invalid_quantity() {
        let err = handler()
            .handle(&request(json!({"placeables": [{"name": "Wall"}]})))
            .unwrap_err();
        assert!(matches!(err, CalcError::InvalidQuantity { ref name, .. } if name == "Wall"));
    }

    #[test]
    fn test_parse_large_selection_is_linear() {
        let placeables: Vec<PlaceableRequest> = (0..100_000)
            .map(|i| PlaceableRequest::new(format!("p{}", i), 1))
            .collect();

        let start = std::time::Instant::now();
        let selection = parse_selection(&placeables).unwrap();
        let elapsed = start.elapsed();

        assert_eq!(selection.len(), 100_000);
        assert!(
            elapsed < std::time::Duration::from_secs(2),
            "parsing 100k items took {:?}",
            elapsed
        );

        let mut with_duplicate = placeables;
        with_duplicate.push(PlaceableRequest::new("p99999", 2));
        assert!(matches!(
            parse_selection(&with_duplicate),
            Err(CalcError::DuplicatePlaceable(ref name)) if name == "p99999"
        ));
    }
}
