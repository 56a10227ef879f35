//! Tests for audit sink

use kitchen_dispatch::core::{
    build_audit_event, AuditAction, AuditSink, InMemoryAuditSink, SharedAuditSink,
};

#[test]
fn test_in_memory_audit_sink() {
    let mut sink = InMemoryAuditSink::new(10);

    let event = build_audit_event(
        AuditAction::Submit,
        Some("ABC123"),
        None,
        Some("priority=3 dishes=2".to_string()),
    );

    sink.record(event.clone());
    assert_eq!(sink.events().len(), 1);

    let events = sink.events();
    assert_eq!(events[0].event_id, event.event_id);
    assert_eq!(events[0].order_id.as_deref(), Some("ABC123"));
    assert_eq!(events[0].action, AuditAction::Submit);
}

#[test]
fn test_audit_sink_overflow() {
    let mut sink = InMemoryAuditSink::new(2);

    sink.record(build_audit_event(AuditAction::ChefAdded, None, Some(1), None));
    sink.record(build_audit_event(AuditAction::ChefAdded, None, Some(2), None));
    sink.record(build_audit_event(AuditAction::ChefRemoved, None, Some(1), None));

    let events = sink.events();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0].chef_id, Some(2)); // First one popped
    assert_eq!(events[1].action, AuditAction::ChefRemoved);
}

#[test]
fn test_shared_sink_sees_records_from_clone() {
    let shared = SharedAuditSink::new(8);
    let mut writer = shared.clone();
    writer.record(build_audit_event(AuditAction::Reject, None, Some(4), Some("chef 4 is busy".into())));

    let events = shared.events();
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].detail.as_deref(), Some("chef 4 is busy"));
}

#[test]
fn test_build_audit_event() {
    let a = build_audit_event(AuditAction::Complete, Some("XYZ789"), Some(2), None);
    let b = build_audit_event(AuditAction::Complete, Some("XYZ789"), Some(2), None);

    assert_ne!(a.event_id, b.event_id);
    assert_eq!(a.chef_id, Some(2));
    assert_eq!(a.action.to_string(), "complete");
    assert!(a.created_at_ms > 0);
}
