//! Tests for tokio spawner and API helpers

use kitchen_dispatch::builders::KitchenBuilder;
use kitchen_dispatch::config::KitchenConfig;
use kitchen_dispatch::core::Spawn;
use kitchen_dispatch::runtime::api::{self, ChefRequest, OrderSubmission};
use kitchen_dispatch::runtime::tokio_spawner::TokioSpawner;
use kitchen_dispatch::util::{ManualClock, Priority};

#[tokio::test(flavor = "multi_thread", worker_threads = 2)]
async fn test_tokio_spawner_spawn() {
    let spawner = TokioSpawner::new(tokio::runtime::Handle::current());

    let (tx, rx) = tokio::sync::oneshot::channel();
    spawner.spawn(async move {
        tx.send(123).unwrap();
    });

    let result = rx.await.expect("oneshot result");
    assert_eq!(result, 123);
}

#[test]
fn test_try_current_outside_runtime() {
    assert!(TokioSpawner::try_current().is_none());
}

#[tokio::test]
async fn test_api_round_trip() {
    let kitchen = KitchenBuilder::new(KitchenConfig {
        backstop_interval_ms: None,
        initial_chefs: Vec::new(),
        ..KitchenConfig::default()
    })
    .with_clock(ManualClock::new(0))
    .build(TokioSpawner::current())
    .unwrap();

    let req: OrderSubmission =
        serde_json::from_str(r#"{"dishes": ["dish1", "dish2"], "priority": 3}"#).unwrap();
    assert_eq!(req.priority, Priority::VIP);
    let order = api::submit_order(&kitchen, &req).unwrap();
    assert_eq!(order.dishes().len(), 2);

    let defaulted: OrderSubmission = serde_json::from_str(r#"{"dishes": []}"#).unwrap();
    assert_eq!(defaulted.priority, Priority::NORMAL);
    let err = api::submit_order(&kitchen, &defaulted).unwrap_err();
    assert!(err.starts_with("invalid submission"));

    let chef = api::add_chef(&kitchen, &ChefRequest { name: "Chef Eve".into() }).unwrap();
    assert_eq!(api::remove_chef(&kitchen, chef.id.0).unwrap_err(), "chef 1 is busy");

    let health = api::health(&kitchen);
    assert!(health.ok);
    assert_eq!(health.chefs, 1);
    assert_eq!(health.cooking, 1);

    let json = api::snapshot_json(&kitchen).unwrap();
    let value: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(value["orders"][0]["dishes"][0]["state"]["status"], "preparing");
    assert_eq!(value["chefs"][0]["state"]["status"], "busy");
}
