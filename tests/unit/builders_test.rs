//! Tests for builder modules

use kitchen_dispatch::builders::KitchenBuilder;
use kitchen_dispatch::config::KitchenConfig;
use kitchen_dispatch::core::{ChefStatus, SchedulerError};
use kitchen_dispatch::infra::{Catalog, DishTemplate};
use kitchen_dispatch::runtime::TokioSpawner;
use kitchen_dispatch::util::{ChefId, ManualClock, Priority};

fn quiet() -> KitchenConfig {
    KitchenConfig {
        backstop_interval_ms: None,
        ..KitchenConfig::default()
    }
}

#[tokio::test]
async fn test_builder_seeds_roster() {
    let kitchen = KitchenBuilder::new(quiet())
        .build(TokioSpawner::current())
        .unwrap();

    let chefs = kitchen.chefs();
    assert_eq!(chefs.len(), 2);
    assert_eq!(chefs[0].id, ChefId(1));
    assert_eq!(chefs[0].name, "Chef Alex");
    assert_eq!(chefs[1].name, "Chef Bailey");
    assert!(chefs.iter().all(|c| c.status() == ChefStatus::Available));
}

#[tokio::test]
async fn test_builder_rejects_invalid_config() {
    let config = KitchenConfig {
        tick_interval_ms: 0,
        ..quiet()
    };
    let result = KitchenBuilder::new(config).build(TokioSpawner::current());
    assert!(matches!(result, Err(SchedulerError::InvalidConfig(_))));
}

#[tokio::test]
async fn test_builder_custom_catalog_and_clock() {
    let catalog = Catalog::new(vec![DishTemplate::new("toast", "Toast", 2, 1)]).unwrap();
    let clock = ManualClock::new(42_000);
    let builder = KitchenBuilder::new(quiet())
        .with_catalog(catalog)
        .with_clock(clock);
    assert_eq!(builder.config().tick_interval_ms, 100);

    let kitchen = builder.build(TokioSpawner::current()).unwrap();
    let order = kitchen.submit_order(&["toast"], Priority::NORMAL).unwrap();
    assert_eq!(order.submitted_at_ms, 42_000);
    assert_eq!(
        kitchen.submit_order(&["dish1"], Priority::NORMAL).unwrap_err(),
        SchedulerError::UnknownDish("dish1".into())
    );
}
