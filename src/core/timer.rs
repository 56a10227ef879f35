//! Execution timer: progress, remaining time and completion.
//!
//! Timers are explicit entries in a [`TimerRegistry`] keyed by chef, so a chef
//! can have at most one preparation in flight. [`KitchenState::advance`] is the
//! single writer for progress and completion; the scheduler calls it on every
//! tick with the current clock reading.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::engine::{Assignment, KitchenState};
use super::model::CompletionRecord;
use crate::util::types::{ChefId, DishId};

/// Active preparation timers, at most one per chef.
#[derive(Debug, Clone, Default)]
pub struct TimerRegistry {
    active: HashMap<ChefId, Assignment>,
}

impl TimerRegistry {
    /// Register a timer. Returns the displaced assignment if the chef already
    /// had one, which the engine never allows.
    pub(crate) fn register(&mut self, assignment: Assignment) -> Option<Assignment> {
        let displaced = self.active.insert(assignment.chef_id, assignment);
        if let Some(previous) = &displaced {
            tracing::error!(chef_id = %previous.chef_id, "timer registered twice for chef");
        }
        displaced
    }

    pub(crate) fn release(&mut self, chef_id: ChefId) -> Option<Assignment> {
        self.active.remove(&chef_id)
    }

    /// True if the chef has a preparation in flight.
    pub fn is_active(&self, chef_id: ChefId) -> bool {
        self.active.contains_key(&chef_id)
    }

    /// The in-flight assignment for a chef.
    pub fn get(&self, chef_id: ChefId) -> Option<&Assignment> {
        self.active.get(&chef_id)
    }

    /// Number of active timers.
    pub fn len(&self) -> usize {
        self.active.len()
    }

    /// True when nothing is cooking.
    pub fn is_empty(&self) -> bool {
        self.active.is_empty()
    }

    /// Active assignments, in no particular order.
    pub fn iter(&self) -> impl Iterator<Item = &Assignment> {
        self.active.values()
    }
}

/// Result of advancing a chef's timer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TickOutcome {
    /// Still cooking; both read models were updated.
    Progress {
        /// Percentage done.
        progress: u8,
        /// Whole seconds left.
        remaining_secs: u64,
    },
    /// Finished at this tick; the chef is free again.
    Completed(CompletionRecord),
    /// The chef has no active timer.
    Idle,
}

/// Percentage of `[start_ms, end_ms)` elapsed at `now_ms`, rounded and
/// clamped to `0..=100`.
pub fn progress_at(start_ms: u128, end_ms: u128, now_ms: u128) -> u8 {
    let total = end_ms.saturating_sub(start_ms);
    if total == 0 {
        return 100;
    }
    let elapsed = now_ms.saturating_sub(start_ms).min(total);
    let percent = (elapsed * 100 + total / 2) / total;
    u8::try_from(percent.min(100)).unwrap_or(100)
}

/// Whole seconds from `now_ms` until `end_ms`, rounded up; zero once past.
pub fn remaining_secs_at(end_ms: u128, now_ms: u128) -> u64 {
    u64::try_from(end_ms.saturating_sub(now_ms).div_ceil(1000)).unwrap_or(u64::MAX)
}

impl KitchenState {
    /// Advance the timer of `chef_id` to `now_ms`.
    ///
    /// Before the end time this writes progress onto the dish and the chef's
    /// current assignment. At or past the end time it completes the dish,
    /// appends the completion record, frees the chef and drops the timer, all
    /// in one step.
    pub fn advance(&mut self, chef_id: ChefId, now_ms: u128) -> TickOutcome {
        let Some(assignment) = self.timers.get(chef_id).cloned() else {
            return TickOutcome::Idle;
        };
        self.advance_assignment(&assignment, now_ms)
    }

    /// Like [`KitchenState::advance`], but only while the chef's timer is
    /// still the one for `dish_id`. Returns `Idle` once the chef has moved on,
    /// so a stale timer task never drives the chef's next dish.
    pub fn advance_dish(&mut self, chef_id: ChefId, dish_id: &DishId, now_ms: u128) -> TickOutcome {
        let Some(assignment) = self
            .timers
            .get(chef_id)
            .filter(|a| &a.dish_id == dish_id)
            .cloned()
        else {
            return TickOutcome::Idle;
        };
        self.advance_assignment(&assignment, now_ms)
    }

    fn advance_assignment(&mut self, assignment: &Assignment, now_ms: u128) -> TickOutcome {
        let chef_id = assignment.chef_id;
        if now_ms < assignment.end_ms {
            let progress = progress_at(assignment.start_ms, assignment.end_ms, now_ms);
            let remaining_secs = remaining_secs_at(assignment.end_ms, now_ms);
            if let Some(dish) = self
                .orders
                .iter_mut()
                .find(|o| o.id == assignment.order_id)
                .and_then(|o| o.dish_mut(&assignment.dish_id))
            {
                dish.record_progress(progress, remaining_secs);
            }
            if let Some(chef) = self.chefs.iter_mut().find(|c| c.id == chef_id) {
                chef.record_progress(&assignment.dish_id, progress, remaining_secs);
            }
            return TickOutcome::Progress {
                progress,
                remaining_secs,
            };
        }

        self.complete(assignment, now_ms)
    }

    fn complete(&mut self, assignment: &Assignment, now_ms: u128) -> TickOutcome {
        let completed = self
            .orders
            .iter_mut()
            .find(|o| o.id == assignment.order_id)
            .and_then(|o| o.dish_mut(&assignment.dish_id))
            .is_some_and(super::model::Dish::complete);

        if let Some(chef) = self.chefs.iter_mut().find(|c| c.id == assignment.chef_id) {
            chef.release();
        }
        self.timers.release(assignment.chef_id);

        if !completed {
            tracing::error!(
                order_id = %assignment.order_id,
                dish_id = %assignment.dish_id,
                "timer fired for a dish that is not preparing"
            );
            return TickOutcome::Idle;
        }

        let record = CompletionRecord {
            dish_id: assignment.dish_id.clone(),
            dish_name: assignment.dish_name.clone(),
            order_id: assignment.order_id.clone(),
            chef_id: assignment.chef_id,
            chef_name: assignment.chef_name.clone(),
            completed_at_ms: now_ms,
        };
        self.completions.push(record.clone());
        tracing::info!(
            order_id = %record.order_id,
            chef_id = %record.chef_id,
            "{} completed by {}",
            record.dish_name,
            record.chef_name
        );
        TickOutcome::Completed(record)
    }
}
