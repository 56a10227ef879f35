//! Tests for the dish catalog

use kitchen_dispatch::core::SchedulerError;
use kitchen_dispatch::infra::{Catalog, DishTemplate};

#[test]
fn test_standard_catalog() {
    let catalog = Catalog::standard();
    let names: Vec<_> = catalog.templates().iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names.len(), 8);
    assert_eq!(names[0], "Margherita Pizza");
    assert_eq!(names[7], "French Fries");
    assert!(catalog
        .templates()
        .iter()
        .all(|t| t.preparation_secs > 0 && t.complexity > 0));
}

#[test]
fn test_custom_catalog_validation() {
    let err = Catalog::new(vec![
        DishTemplate::new("soup", "Soup", 5, 1),
        DishTemplate::new("soup", "Stew", 9, 2),
    ])
    .unwrap_err();
    assert!(matches!(err, SchedulerError::InvalidCatalog(msg) if msg.contains("soup")));
}
