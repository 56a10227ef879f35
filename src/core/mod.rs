//! Core scheduling: domain model, dispatch ordering, assignment and timers.

pub mod audit;
pub mod engine;
pub mod error;
pub mod model;
pub mod scheduler;
pub mod selector;
pub mod timer;

pub use audit::{
    build_audit_event, AuditAction, AuditEvent, AuditSink, InMemoryAuditSink, SharedAuditSink,
};
pub use engine::{Assignment, KitchenState};
pub use error::{AppResult, SchedulerError};
pub use model::{
    Chef, ChefState, ChefStatus, CompletionRecord, CurrentAssignment, Dish, DishAssignment,
    DishState, DishStatus, Order, OrderStatus,
};
pub use scheduler::{Kitchen, KitchenSnapshot, Spawn, Trigger};
pub use selector::{candidates, compare_orders, dispatch_order, next_pending_dish};
pub use timer::{progress_at, remaining_secs_at, TickOutcome, TimerRegistry};
