//! Tests for configuration validation

use kitchen_dispatch::config::KitchenConfig;

#[test]
fn test_default_config_is_valid() {
    let config = KitchenConfig::default();
    assert!(config.validate().is_ok());
    assert_eq!(config.tick_interval_ms, 100);
    assert_eq!(config.redispatch_delay_ms, 100);
    assert_eq!(config.initial_chefs, vec!["Chef Alex", "Chef Bailey"]);
}

#[test]
fn test_config_invalid_tick_interval() {
    let invalid = KitchenConfig {
        tick_interval_ms: 0,
        ..KitchenConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_invalid_redispatch_delay() {
    let invalid = KitchenConfig {
        redispatch_delay_ms: 0,
        ..KitchenConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_invalid_backstop() {
    let invalid = KitchenConfig {
        backstop_interval_ms: Some(0),
        ..KitchenConfig::default()
    };
    assert!(invalid.validate().is_err());

    let disabled = KitchenConfig {
        backstop_interval_ms: None,
        ..KitchenConfig::default()
    };
    assert!(disabled.validate().is_ok());
}

#[test]
fn test_config_blank_chef_name() {
    let invalid = KitchenConfig {
        initial_chefs: vec!["Chef Alex".into(), "  ".into()],
        ..KitchenConfig::default()
    };
    assert!(invalid.validate().is_err());
}

#[test]
fn test_config_from_json() {
    let json = r#"{
        "tick_interval_ms": 50,
        "backstop_interval_ms": null,
        "initial_chefs": ["Chef Dana"]
    }"#;

    let config = KitchenConfig::from_json_str(json).unwrap();
    assert_eq!(config.tick_interval_ms, 50);
    assert_eq!(config.redispatch_delay_ms, 100);
    assert_eq!(config.backstop_interval_ms, None);
    assert_eq!(config.initial_chefs, vec!["Chef Dana"]);
}

#[test]
fn test_config_from_json_rejects_invalid() {
    assert!(KitchenConfig::from_json_str(r#"{"tick_interval_ms": 0}"#).is_err());
    assert!(KitchenConfig::from_json_str("{").is_err());
}
