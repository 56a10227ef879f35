//! Shared kitchen handle, dispatch triggers and timer driving.
//!
//! [`Kitchen`] wraps [`KitchenState`] in a `parking_lot::Mutex`. Every entry
//! point takes the lock once, applies one discrete operation and releases it
//! before any follow-up work is spawned, so triggers always see the latest
//! committed state and the lock is never held across an `.await`.

use std::fmt;
use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use super::audit::{build_audit_event, AuditAction, AuditSink};
use super::engine::{Assignment, KitchenState};
use super::model::{Chef, CompletionRecord, Order};
use super::timer::TickOutcome;
use super::SchedulerError;
use crate::config::KitchenConfig;
use crate::infra::catalog::Catalog;
use crate::util::clock::Clock;
use crate::util::types::{ChefId, DishId, Priority};

/// Abstraction for spawning task execution on a runtime.
pub trait Spawn {
    /// Spawn an async task that returns a future.
    fn spawn<F>(&self, fut: F)
    where
        F: Future<Output = ()> + Send + 'static;
}

/// Why a dispatch pass ran.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Trigger {
    /// A new order joined the backlog.
    OrderSubmitted,
    /// A new chef joined the roster.
    ChefAdded,
    /// A chef finished a dish.
    ChefFreed,
    /// Periodic safety net.
    Backstop,
    /// Explicit caller request.
    Manual,
}

impl fmt::Display for Trigger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::OrderSubmitted => "order_submitted",
            Self::ChefAdded => "chef_added",
            Self::ChefFreed => "chef_freed",
            Self::Backstop => "backstop",
            Self::Manual => "manual",
        };
        f.write_str(name)
    }
}

/// Consistent copy of the whole kitchen taken under one lock.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KitchenSnapshot {
    /// Orders in submission order.
    pub orders: Vec<Order>,
    /// Chef roster.
    pub chefs: Vec<Chef>,
    /// Completion log, oldest first.
    pub completions: Vec<CompletionRecord>,
    /// Snapshot time (ms).
    pub taken_at_ms: u128,
}

struct KitchenInner<S> {
    config: KitchenConfig,
    catalog: Catalog,
    clock: Arc<dyn Clock>,
    spawner: S,
    state: Mutex<KitchenState>,
    audit: Option<Mutex<Box<dyn AuditSink>>>,
    shutdown: AtomicBool,
}

/// Handle to a running kitchen. Cheap to clone; clones share state.
pub struct Kitchen<S> {
    inner: Arc<KitchenInner<S>>,
}

impl<S> Clone for Kitchen<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S> Kitchen<S>
where
    S: Spawn + Send + Sync + 'static,
{
    /// Create a kitchen with an empty roster and backlog.
    ///
    /// Prefer [`crate::builders::KitchenBuilder`], which validates the
    /// configuration and seeds the initial roster.
    pub fn new(
        config: KitchenConfig,
        catalog: Catalog,
        clock: Arc<dyn Clock>,
        spawner: S,
        audit: Option<Box<dyn AuditSink>>,
    ) -> Self {
        Self {
            inner: Arc::new(KitchenInner {
                config,
                catalog,
                clock,
                spawner,
                state: Mutex::new(KitchenState::new()),
                audit: audit.map(Mutex::new),
                shutdown: AtomicBool::new(false),
            }),
        }
    }

    /// Active configuration.
    pub fn config(&self) -> &KitchenConfig {
        &self.inner.config
    }

    /// Dish catalog orders are built from.
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    /// Build an order from catalog ids, add it to the backlog and dispatch.
    pub fn submit_order<T: AsRef<str>>(
        &self,
        selections: &[T],
        priority: Priority,
    ) -> Result<Order, SchedulerError> {
        let now = self.inner.clock.now_ms();
        let result = self
            .inner
            .state
            .lock()
            .submit_order(&self.inner.catalog, selections, priority, now);

        match &result {
            Ok(order) => {
                tracing::info!(
                    order_id = %order.id,
                    priority = %order.priority,
                    dishes = order.dishes().len(),
                    "order submitted"
                );
                self.record_audit(
                    AuditAction::Submit,
                    Some(order.id.as_str()),
                    None,
                    Some(format!("priority={} dishes={}", order.priority, order.dishes().len())),
                );
                self.dispatch(Trigger::OrderSubmitted);
            }
            Err(e) => {
                tracing::warn!("order rejected: {}", e);
                self.record_audit(AuditAction::Reject, None, None, Some(e.to_string()));
            }
        }
        result
    }

    /// Add an available chef and dispatch so it can absorb the backlog.
    pub fn add_chef(&self, name: &str) -> Result<Chef, SchedulerError> {
        let result = self.inner.state.lock().add_chef(name);
        match &result {
            Ok(chef) => {
                tracing::info!(chef_id = %chef.id, "chef {} joined", chef.name);
                self.record_audit(AuditAction::ChefAdded, None, Some(chef.id.0), None);
                self.dispatch(Trigger::ChefAdded);
            }
            Err(e) => {
                tracing::warn!("chef rejected: {}", e);
                self.record_audit(AuditAction::Reject, None, None, Some(e.to_string()));
            }
        }
        result
    }

    /// Remove an idle chef; busy chefs are rejected with no state change.
    pub fn remove_chef(&self, id: ChefId) -> Result<Chef, SchedulerError> {
        let result = self.inner.state.lock().remove_chef(id);
        match &result {
            Ok(chef) => {
                tracing::info!(chef_id = %chef.id, "chef {} left", chef.name);
                self.record_audit(AuditAction::ChefRemoved, None, Some(id.0), None);
            }
            Err(e) => {
                tracing::warn!(chef_id = %id, "chef removal rejected: {}", e);
                self.record_audit(AuditAction::Reject, None, Some(id.0), Some(e.to_string()));
            }
        }
        result
    }

    /// Run the assignment engine against the current state and start a timer
    /// for every new assignment. Safe to call at any time; with no free chef
    /// or no pending dish it does nothing.
    pub fn dispatch(&self, trigger: Trigger) -> Vec<Assignment> {
        let now = self.inner.clock.now_ms();
        let assignments = self.inner.state.lock().assign(now);
        if assignments.is_empty() {
            tracing::trace!(%trigger, "dispatch assigned nothing");
            return assignments;
        }

        tracing::debug!(%trigger, count = assignments.len(), "dispatch pass");
        for assignment in &assignments {
            self.record_audit(
                AuditAction::Assign,
                Some(assignment.order_id.as_str()),
                Some(assignment.chef_id.0),
                Some(format!("{} via {trigger}", assignment.dish_name)),
            );
            self.start_timer(assignment);
        }
        assignments
    }

    /// Advance a chef's timer to the current clock reading.
    ///
    /// Forces an update of whatever the chef is cooking now. Timer tasks use a
    /// variant bound to their own dish and stop once the chef has moved on. A
    /// completion schedules a deferred re-dispatch.
    pub fn tick(&self, chef_id: ChefId) -> TickOutcome {
        let now = self.inner.clock.now_ms();
        let outcome = self.inner.state.lock().advance(chef_id, now);
        self.after_tick(outcome)
    }

    fn tick_dish(&self, chef_id: ChefId, dish_id: &DishId) -> TickOutcome {
        let now = self.inner.clock.now_ms();
        let outcome = self.inner.state.lock().advance_dish(chef_id, dish_id, now);
        self.after_tick(outcome)
    }

    fn after_tick(&self, outcome: TickOutcome) -> TickOutcome {
        if let TickOutcome::Completed(record) = &outcome {
            self.record_audit(
                AuditAction::Complete,
                Some(record.order_id.as_str()),
                Some(record.chef_id.0),
                Some(record.dish_name.clone()),
            );
            self.schedule_redispatch();
        }
        outcome
    }

    fn start_timer(&self, assignment: &Assignment) {
        let chef_id = assignment.chef_id;
        let dish_id = assignment.dish_id.clone();
        let kitchen = self.clone();
        let period = Duration::from_millis(self.inner.config.tick_interval_ms);
        self.inner.spawner.spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                match kitchen.tick_dish(chef_id, &dish_id) {
                    TickOutcome::Progress { .. } => {}
                    TickOutcome::Completed(_) | TickOutcome::Idle => break,
                }
            }
            tracing::debug!(chef_id = %chef_id, dish_id = %dish_id, "timer stopped");
        });
    }

    fn schedule_redispatch(&self) {
        let kitchen = self.clone();
        let delay = Duration::from_millis(self.inner.config.redispatch_delay_ms);
        self.inner.spawner.spawn(async move {
            tokio::time::sleep(delay).await;
            kitchen.dispatch(Trigger::ChefFreed);
        });
    }

    /// Start the periodic backstop if `backstop_interval_ms` is configured.
    ///
    /// Each round dispatches only when a chef is free and a dish is pending.
    /// The loop ends after [`Kitchen::shutdown`].
    pub fn spawn_backstop(&self) {
        let Some(interval_ms) = self.inner.config.backstop_interval_ms else {
            return;
        };
        let kitchen = self.clone();
        self.inner.spawner.spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_millis(interval_ms));
            ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            loop {
                ticker.tick().await;
                if kitchen.is_shut_down() {
                    tracing::info!("backstop shutting down");
                    break;
                }
                let needed = {
                    let state = kitchen.inner.state.lock();
                    state.has_pending() && state.available_chefs() > 0
                };
                if needed {
                    kitchen.dispatch(Trigger::Backstop);
                }
            }
        });
    }

    /// Stop background loops. In-flight preparations still run to completion.
    pub fn shutdown(&self) {
        self.inner.shutdown.store(true, Ordering::Release);
    }

    /// True once [`Kitchen::shutdown`] was called.
    pub fn is_shut_down(&self) -> bool {
        self.inner.shutdown.load(Ordering::Acquire)
    }

    /// Copy of the order backlog.
    pub fn orders(&self) -> Vec<Order> {
        self.inner.state.lock().orders().to_vec()
    }

    /// Copy of the chef roster.
    pub fn chefs(&self) -> Vec<Chef> {
        self.inner.state.lock().chefs().to_vec()
    }

    /// Copy of the completion log, oldest first.
    pub fn completions(&self) -> Vec<CompletionRecord> {
        self.inner.state.lock().completions().to_vec()
    }

    /// Completion log, newest first, as dashboards show it.
    pub fn completions_newest_first(&self) -> Vec<CompletionRecord> {
        let mut log = self.completions();
        log.reverse();
        log
    }

    /// Number of preparations in flight.
    pub fn active_timers(&self) -> usize {
        self.inner.state.lock().timers().len()
    }

    /// Orders, chefs and completions from one lock acquisition.
    pub fn snapshot(&self) -> KitchenSnapshot {
        let taken_at_ms = self.inner.clock.now_ms();
        let state = self.inner.state.lock();
        KitchenSnapshot {
            orders: state.orders().to_vec(),
            chefs: state.chefs().to_vec(),
            completions: state.completions().to_vec(),
            taken_at_ms,
        }
    }

    /// Run the invariant checks against the live state.
    pub fn check_invariants(&self) -> Result<(), String> {
        self.inner.state.lock().check_invariants()
    }

    pub(crate) fn seed_chef(&self, name: &str) -> Result<Chef, SchedulerError> {
        self.inner.state.lock().add_chef(name)
    }

    fn record_audit(
        &self,
        action: AuditAction,
        order_id: Option<&str>,
        chef_id: Option<u64>,
        detail: Option<String>,
    ) {
        if let Some(audit) = &self.inner.audit {
            audit
                .lock()
                .record(build_audit_event(action, order_id, chef_id, detail));
        }
    }
}
