//! Tests for error types

use kitchen_dispatch::core::SchedulerError;
use kitchen_dispatch::util::ChefId;

#[test]
fn test_invalid_submission_error() {
    let err = SchedulerError::InvalidSubmission("no dishes".to_string());
    assert_eq!(format!("{}", err), "invalid submission: no dishes");
}

#[test]
fn test_chef_busy_error() {
    let err = SchedulerError::ChefBusy(ChefId(3));
    assert_eq!(format!("{}", err), "chef 3 is busy");
}

#[test]
fn test_chef_not_found_error() {
    let err = SchedulerError::ChefNotFound(ChefId(9));
    assert_eq!(format!("{}", err), "chef 9 not found");
}

#[test]
fn test_unknown_dish_error() {
    let err = SchedulerError::UnknownDish("dish42".to_string());
    assert_eq!(format!("{}", err), "unknown dish: dish42");
}

#[test]
fn test_config_error() {
    let err = SchedulerError::InvalidConfig("tick_interval_ms must be greater than 0".to_string());
    assert_eq!(
        format!("{}", err),
        "invalid configuration: tick_interval_ms must be greater than 0"
    );
}
