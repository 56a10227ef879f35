//! Static dish catalog consumed by order submission.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::core::SchedulerError;

/// A dish the kitchen knows how to prepare.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishTemplate {
    /// Catalog identifier referenced by order selections.
    pub id: String,
    /// Display name copied onto every prepared dish.
    pub name: String,
    /// Preparation time in seconds.
    pub preparation_secs: u32,
    /// Relative difficulty, informational only.
    pub complexity: u32,
}

impl DishTemplate {
    /// Convenience constructor.
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        preparation_secs: u32,
        complexity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            preparation_secs,
            complexity,
        }
    }
}

/// Validated, read-only list of dish templates.
#[derive(Debug, Clone, Serialize)]
pub struct Catalog {
    templates: Vec<DishTemplate>,
}

impl Catalog {
    /// Build a catalog, rejecting duplicate ids and non-positive durations.
    pub fn new(templates: Vec<DishTemplate>) -> Result<Self, SchedulerError> {
        let mut seen = HashSet::new();
        for template in &templates {
            if !seen.insert(template.id.as_str()) {
                return Err(SchedulerError::InvalidCatalog(format!(
                    "duplicate dish id `{}`",
                    template.id
                )));
            }
            if template.preparation_secs == 0 {
                return Err(SchedulerError::InvalidCatalog(format!(
                    "dish `{}` must take at least one second",
                    template.id
                )));
            }
            if template.complexity == 0 {
                return Err(SchedulerError::InvalidCatalog(format!(
                    "dish `{}` must have positive complexity",
                    template.id
                )));
            }
        }
        Ok(Self { templates })
    }

    /// The stock eight-dish menu.
    pub fn standard() -> Self {
        Self {
            templates: vec![
                DishTemplate::new("dish1", "Margherita Pizza", 8, 2),
                DishTemplate::new("dish2", "Caesar Salad", 3, 1),
                DishTemplate::new("dish3", "Beef Burger", 6, 2),
                DishTemplate::new("dish4", "Pasta Carbonara", 5, 2),
                DishTemplate::new("dish5", "Grilled Salmon", 7, 2),
                DishTemplate::new("dish6", "Chocolate Soufflé", 12, 3),
                DishTemplate::new("dish7", "Chicken Curry", 10, 3),
                DishTemplate::new("dish8", "French Fries", 4, 1),
            ],
        }
    }

    /// Parse a JSON array of templates and validate it.
    pub fn from_json_str(input: &str) -> Result<Self, SchedulerError> {
        let templates: Vec<DishTemplate> = serde_json::from_str(input)
            .map_err(|e| SchedulerError::InvalidCatalog(format!("parse error: {e}")))?;
        Self::new(templates)
    }

    /// Look up a template by id.
    pub fn get(&self, id: &str) -> Option<&DishTemplate> {
        self.templates.iter().find(|t| t.id == id)
    }

    /// All templates in catalog order.
    pub fn templates(&self) -> &[DishTemplate] {
        &self.templates
    }

    /// Number of templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// True when the catalog has no dishes.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::standard()
    }
}
