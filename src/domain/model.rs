use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// 每種資源的數量 (key 排序，輸出穩定)
pub type ResourceTotals = BTreeMap<String, u64>;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Placeable {
    pub name: String,
    #[serde(default)]
    pub resources: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionEntry {
    pub name: String,
    pub quantity: i64,
}

/// A request-scoped list of (placeable, quantity) pairs with unique names.
/// Entries keep the order they were added in; non-positive quantities are
/// allowed here and skipped by the aggregator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
    entries: Vec<SelectionEntry>,
    names: HashSet<String>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an entry, returning `false` (and leaving the selection untouched)
    /// if the name is already present.
    pub fn insert(&mut self, name: impl Into<String>, quantity: i64) -> bool {
        let name = name.into();
        if !self.names.insert(name.clone()) {
            return false;
        }
        self.entries.push(SelectionEntry { name, quantity });
        true
    }

    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    pub fn entries(&self) -> &[SelectionEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 數量大於 0 的項目數
    pub fn active_len(&self) -> usize {
        self.entries.iter().filter(|e| e.quantity > 0).count()
    }
}

impl<S: Into<String>> FromIterator<(S, i64)> for Selection {
    /// Later duplicates are dropped; use [`Selection::insert`] to detect them.
    fn from_iter<I: IntoIterator<Item = (S, i64)>>(iter: I) -> Self {
        let mut selection = Selection::new();
        for (name, quantity) in iter {
            selection.insert(name, quantity);
        }
        selection
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemCalculated {
    pub name: String,
    pub quantity: u64,
    #[serde(default)]
    pub resources_per_unit: BTreeMap<String, u64>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalculationResult {
    pub total_resources: ResourceTotals,
    pub items_calculated: Vec<ItemCalculated>,
    pub use_deep_desert_cost: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selection_rejects_duplicate_names() {
        let mut selection = Selection::new();
        assert!(selection.insert("Wall", 3));
        assert!(!selection.insert("Wall", 5));
        assert_eq!(selection.len(), 1);
        assert_eq!(selection.entries()[0].quantity, 3);
    }

    #[test]
    fn test_selection_contains() {
        let selection: Selection = vec![("Wall", 3), ("Door", 0)].into_iter().collect();
        assert!(selection.contains("Wall"));
        assert!(selection.contains("Door"));
        assert!(!selection.contains("wall"));
    }

    #[test]
    fn test_selection_keeps_insertion_order() {
        let selection: Selection = vec![("Wall", 3), ("Door", 2), ("Fence", 0)]
            .into_iter()
            .collect();

        let names: Vec<&str> = selection.entries().iter().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["Wall", "Door", "Fence"]);
        assert_eq!(selection.active_len(), 2);
    }

    #[test]
    fn test_placeable_deserializes_without_resources() {
        let placeable: Placeable = serde_json::from_str(r#"{"name": "Marker"}"#).unwrap();
        assert_eq!(placeable.name, "Marker");
        assert!(placeable.resources.is_empty());
    }
}
