use crate::core::{CalculationResult, CatalogStore, ItemCalculated, Placeable, ResourceTotals, Selection};
use crate::utils::error::{CalcError, Result};
use std::sync::Arc;

/// Deep Desert cost: half the total, rounded half away from zero.
pub fn deep_desert_cost(amount: u64) -> u64 {
    amount / 2 + amount % 2
}

pub struct Aggregator<C: CatalogStore> {
    catalog: Arc<C>,
}

impl<C: CatalogStore> Clone for Aggregator<C> {
    fn clone(&self) -> Self {
        Self {
            catalog: Arc::clone(&self.catalog),
        }
    }
}

impl<C: CatalogStore> Aggregator<C> {
    pub fn new(catalog: Arc<C>) -> Self {
        Self { catalog }
    }

    pub fn catalog(&self) -> &C {
        &self.catalog
    }

    pub fn aggregate(&self, selection: &Selection, apply_discount: bool) -> Result<CalculationResult> {
        // 先解析全部名稱，任何一個不存在就整筆拒絕
        let mut resolved: Vec<(&Placeable, u64)> = Vec::with_capacity(selection.len());
        for entry in selection.entries() {
            let placeable = self
                .catalog
                .get(&entry.name)
                .ok_or_else(|| CalcError::UnknownPlaceable(entry.name.clone()))?;

            if entry.quantity <= 0 {
                tracing::debug!("Skipping '{}' with quantity {}", entry.name, entry.quantity);
                continue;
            }
            resolved.push((placeable, entry.quantity as u64));
        }

        let mut total_resources = ResourceTotals::new();
        let mut items_calculated = Vec::with_capacity(resolved.len());

        for (placeable, quantity) in resolved {
            for (resource, &per_unit) in &placeable.resources {
                let overflow = || CalcError::AmountOverflow {
                    resource: resource.clone(),
                };
                let amount = per_unit.checked_mul(quantity).ok_or_else(overflow)?;
                let total = total_resources.entry(resource.clone()).or_insert(0);
                *total = total.checked_add(amount).ok_or_else(overflow)?;
            }

            items_calculated.push(ItemCalculated {
                name: placeable.name.clone(),
                quantity,
                resources_per_unit: placeable.resources.clone(),
            });
        }

        if apply_discount {
            for amount in total_resources.values_mut() {
                *amount = deep_desert_cost(*amount);
            }
        }

        Ok(CalculationResult {
            total_resources,
            items_calculated,
            use_deep_desert_cost: apply_discount,
        })
    }
}
