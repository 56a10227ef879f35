//! Tests for utility types

use std::time::Duration;

use kitchen_dispatch::util::{Clock, ManualClock, OrderId, Priority};

#[test]
fn test_priority_ordering() {
    assert!(Priority::VIP > Priority::HIGH);
    assert!(Priority::HIGH > Priority::NORMAL);
    assert_eq!(Priority::from(7).value(), 7);
}

#[test]
fn test_priority_serializes_as_integer() {
    assert_eq!(serde_json::to_string(&Priority::VIP).unwrap(), "3");
    let parsed: Priority = serde_json::from_str("2").unwrap();
    assert_eq!(parsed, Priority::HIGH);
}

#[test]
fn test_order_ids_are_fresh() {
    let a = OrderId::random();
    let b = OrderId::random();
    assert_eq!(a.as_str().len(), 6);
    assert_eq!(a.to_string(), a.as_str());
    // 36^6 codes; a clash here would be a broken generator.
    assert_ne!(a, b);
}

#[test]
fn test_manual_clock() {
    let clock = ManualClock::new(100);
    clock.advance(Duration::from_secs(2));
    assert_eq!(clock.now_ms(), 2_100);
}
