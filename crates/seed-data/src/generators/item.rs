//! Deterministic item generation.

use catalog::models::NewItem;

use crate::db::BatchPlan;

const NAME_PREFIX: &str = "Item";

/// Generates items named `"Item {n}"` from their sequence number.
#[derive(Debug, Clone, Copy, Default)]
pub struct ItemGenerator;

impl ItemGenerator {
    pub fn new() -> Self {
        Self
    }

    /// Name of the item at 1-based sequence position `sequence`.
    pub fn name(&self, sequence: i64) -> String {
        format!("{NAME_PREFIX} {sequence}")
    }

    /// Generates every item covered by `plan`, in sequence order.
    pub fn generate(&self, plan: &BatchPlan) -> Vec<NewItem> {
        plan.sequences()
            .map(|sequence| NewItem::new(self.name(sequence)))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_batch() {
        let item_gen = ItemGenerator::new();
        let plan = BatchPlan {
            first_sequence: 101,
            len: 3,
        };
        let items = item_gen.generate(&plan);

        let names: Vec<&str> = items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["Item 101", "Item 102", "Item 103"]);
        assert!(items.iter().all(|i| i.created_at.is_none()));
    }

    #[test]
    fn test_name_is_sequence_based() {
        let item_gen = ItemGenerator::new();
        assert_eq!(item_gen.name(1), "Item 1");
        assert_eq!(item_gen.name(50_000), "Item 50000");
    }
}
