//! Domain model: dishes, orders, chefs and completion records.
//!
//! Status values are closed enums that carry their payload, so a pending dish
//! cannot reference a chef and an available chef cannot hold an assignment.
//! Only the assignment engine and the execution timer mutate these types; the
//! mutators are crate-private.

use serde::{Deserialize, Serialize};

use crate::infra::catalog::DishTemplate;
use crate::util::types::{ChefId, DishId, OrderId, Priority};

/// Coarse dish status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DishStatus {
    /// Waiting for a chef.
    Pending,
    /// A chef is working on it.
    Preparing,
    /// Done.
    Completed,
}

/// Who is preparing a dish and when it will be ready.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DishAssignment {
    /// Assigned chef.
    pub chef_id: ChefId,
    /// Chef name at assignment time.
    pub chef_name: String,
    /// Preparation start (ms).
    pub start_ms: u128,
    /// Planned end (ms); `start_ms` plus the preparation duration.
    pub end_ms: u128,
}

/// Lifecycle of a dish. Transitions only move forward.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DishState {
    /// Not yet assigned.
    Pending,
    /// Assigned and cooking.
    Preparing(DishAssignment),
    /// Finished by the recorded chef.
    Completed(DishAssignment),
}

/// A unit of schedulable work.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dish {
    /// Identifier unique within the owning order.
    pub id: DishId,
    /// Display name.
    pub name: String,
    /// Preparation time in seconds.
    pub preparation_secs: u32,
    /// Informational difficulty.
    pub complexity: u32,
    state: DishState,
    progress: u8,
    remaining_secs: u64,
}

impl Dish {
    /// Fresh pending dish built from a catalog template.
    pub fn from_template(template: &DishTemplate, id: DishId) -> Self {
        Self {
            id,
            name: template.name.clone(),
            preparation_secs: template.preparation_secs,
            complexity: template.complexity,
            state: DishState::Pending,
            progress: 0,
            remaining_secs: u64::from(template.preparation_secs),
        }
    }

    /// Current lifecycle state.
    pub const fn state(&self) -> &DishState {
        &self.state
    }

    /// Coarse status.
    pub const fn status(&self) -> DishStatus {
        match self.state {
            DishState::Pending => DishStatus::Pending,
            DishState::Preparing(_) => DishStatus::Preparing,
            DishState::Completed(_) => DishStatus::Completed,
        }
    }

    /// True while waiting for a chef.
    pub const fn is_pending(&self) -> bool {
        matches!(self.state, DishState::Pending)
    }

    /// Assignment details, present once preparing or completed.
    pub const fn assignment(&self) -> Option<&DishAssignment> {
        match &self.state {
            DishState::Pending => None,
            DishState::Preparing(a) | DishState::Completed(a) => Some(a),
        }
    }

    /// Assigned chef id, if any.
    pub fn chef_id(&self) -> Option<ChefId> {
        self.assignment().map(|a| a.chef_id)
    }

    /// Assigned chef name, if any.
    pub fn chef_name(&self) -> Option<&str> {
        self.assignment().map(|a| a.chef_name.as_str())
    }

    /// Preparation start, if started.
    pub fn start_ms(&self) -> Option<u128> {
        self.assignment().map(|a| a.start_ms)
    }

    /// Planned completion time, if started.
    pub fn end_ms(&self) -> Option<u128> {
        self.assignment().map(|a| a.end_ms)
    }

    /// Percentage done, 0..=100.
    pub const fn progress(&self) -> u8 {
        self.progress
    }

    /// Whole seconds left until done.
    pub const fn remaining_secs(&self) -> u64 {
        self.remaining_secs
    }

    pub(crate) fn begin(&mut self, assignment: DishAssignment) -> bool {
        if !self.is_pending() {
            return false;
        }
        self.state = DishState::Preparing(assignment);
        self.progress = 0;
        true
    }

    pub(crate) fn record_progress(&mut self, progress: u8, remaining_secs: u64) {
        if matches!(self.state, DishState::Preparing(_)) {
            self.progress = self.progress.max(progress.min(100));
            self.remaining_secs = remaining_secs;
        }
    }

    pub(crate) fn complete(&mut self) -> bool {
        let state = std::mem::replace(&mut self.state, DishState::Pending);
        match state {
            DishState::Preparing(a) => {
                self.state = DishState::Completed(a);
                self.progress = 100;
                self.remaining_secs = 0;
                true
            }
            other => {
                self.state = other;
                false
            }
        }
    }
}

/// Aggregate order status, always derived from the dishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum OrderStatus {
    /// At least one dish is still waiting for a chef.
    Pending,
    /// Nothing waiting, something still cooking.
    InProgress,
    /// Every dish is done.
    Completed,
}

/// A prioritized bundle of dishes submitted together.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Short unique code.
    pub id: OrderId,
    /// Dispatch priority; higher first.
    pub priority: Priority,
    /// Submission timestamp (ms).
    pub submitted_at_ms: u128,
    pub(crate) sequence: u64,
    pub(crate) dishes: Vec<Dish>,
}

impl Order {
    pub(crate) fn new(
        id: OrderId,
        dishes: Vec<Dish>,
        priority: Priority,
        submitted_at_ms: u128,
        sequence: u64,
    ) -> Self {
        Self {
            id,
            priority,
            submitted_at_ms,
            sequence,
            dishes,
        }
    }

    /// Dishes in submission order.
    pub fn dishes(&self) -> &[Dish] {
        &self.dishes
    }

    /// Submission sequence number; breaks exact timestamp ties.
    pub const fn sequence(&self) -> u64 {
        self.sequence
    }

    /// Derived aggregate status.
    pub fn status(&self) -> OrderStatus {
        if self.dishes.iter().any(Dish::is_pending) {
            OrderStatus::Pending
        } else if self
            .dishes
            .iter()
            .all(|d| d.status() == DishStatus::Completed)
        {
            OrderStatus::Completed
        } else {
            OrderStatus::InProgress
        }
    }

    /// Sum of preparation times across all dishes.
    pub fn total_preparation_secs(&self) -> u64 {
        self.dishes
            .iter()
            .map(|d| u64::from(d.preparation_secs))
            .sum()
    }

    /// Look up a dish by id.
    pub fn dish(&self, id: &DishId) -> Option<&Dish> {
        self.dishes.iter().find(|d| &d.id == id)
    }

    pub(crate) fn dish_mut(&mut self, id: &DishId) -> Option<&mut Dish> {
        self.dishes.iter_mut().find(|d| &d.id == id)
    }
}

/// Coarse chef status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChefStatus {
    /// Free to take a dish.
    Available,
    /// Preparing a dish.
    Busy,
}

/// The chef's view of the dish it is preparing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentAssignment {
    /// Owning order.
    pub order_id: OrderId,
    /// Dish being prepared.
    pub dish_id: DishId,
    /// Dish name.
    pub dish_name: String,
    /// Preparation start (ms).
    pub start_ms: u128,
    /// Planned end (ms).
    pub end_ms: u128,
    /// Percentage done, 0..=100.
    pub progress: u8,
    /// Whole seconds left.
    pub remaining_secs: u64,
}

/// Chef lifecycle state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ChefState {
    /// Idle.
    Available,
    /// Working on the contained assignment.
    Busy(CurrentAssignment),
}

/// A worker that prepares one dish at a time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chef {
    /// Roster identifier.
    pub id: ChefId,
    /// Display name.
    pub name: String,
    state: ChefState,
}

impl Chef {
    pub(crate) fn new(id: ChefId, name: String) -> Self {
        Self {
            id,
            name,
            state: ChefState::Available,
        }
    }

    /// Lifecycle state.
    pub const fn state(&self) -> &ChefState {
        &self.state
    }

    /// Coarse status.
    pub const fn status(&self) -> ChefStatus {
        match self.state {
            ChefState::Available => ChefStatus::Available,
            ChefState::Busy(_) => ChefStatus::Busy,
        }
    }

    /// True when idle.
    pub const fn is_available(&self) -> bool {
        matches!(self.state, ChefState::Available)
    }

    /// Current assignment, if busy.
    pub const fn current_assignment(&self) -> Option<&CurrentAssignment> {
        match &self.state {
            ChefState::Available => None,
            ChefState::Busy(a) => Some(a),
        }
    }

    pub(crate) fn begin(&mut self, assignment: CurrentAssignment) {
        self.state = ChefState::Busy(assignment);
    }

    pub(crate) fn record_progress(&mut self, dish_id: &DishId, progress: u8, remaining_secs: u64) {
        if let ChefState::Busy(current) = &mut self.state {
            if &current.dish_id == dish_id {
                current.progress = current.progress.max(progress.min(100));
                current.remaining_secs = remaining_secs;
            }
        }
    }

    pub(crate) fn release(&mut self) {
        self.state = ChefState::Available;
    }
}

/// Immutable log entry for a finished dish.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRecord {
    /// Finished dish.
    pub dish_id: DishId,
    /// Finished dish name.
    pub dish_name: String,
    /// Owning order.
    pub order_id: OrderId,
    /// Chef who prepared it.
    pub chef_id: ChefId,
    /// Chef name.
    pub chef_name: String,
    /// Completion timestamp (ms).
    pub completed_at_ms: u128,
}
