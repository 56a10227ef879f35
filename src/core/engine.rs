//! Assignment engine and the shared kitchen state it mutates.
//!
//! [`KitchenState`] owns the orders, the chef roster, the completion log and
//! the timer registry. It is not synchronized itself; the scheduler keeps it
//! behind a single mutex so every method here runs as one atomic step.

use std::collections::{HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use super::model::{
    Chef, CompletionRecord, CurrentAssignment, Dish, DishAssignment, DishStatus, Order,
};
use super::selector;
use super::timer::TimerRegistry;
use super::SchedulerError;
use crate::infra::catalog::Catalog;
use crate::util::types::{ChefId, DishId, OrderId, Priority};

/// A confirmed (order, dish, chef) pairing with its time window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Assignment {
    /// Owning order.
    pub order_id: OrderId,
    /// Dish being prepared.
    pub dish_id: DishId,
    /// Dish name.
    pub dish_name: String,
    /// Chef preparing it.
    pub chef_id: ChefId,
    /// Chef name.
    pub chef_name: String,
    /// Preparation start (ms).
    pub start_ms: u128,
    /// Planned end (ms).
    pub end_ms: u128,
}

impl Assignment {
    pub(crate) fn chef_view(&self) -> CurrentAssignment {
        CurrentAssignment {
            order_id: self.order_id.clone(),
            dish_id: self.dish_id.clone(),
            dish_name: self.dish_name.clone(),
            start_ms: self.start_ms,
            end_ms: self.end_ms,
            progress: 0,
            remaining_secs: secs_between(self.start_ms, self.end_ms),
        }
    }

    pub(crate) fn dish_view(&self) -> DishAssignment {
        DishAssignment {
            chef_id: self.chef_id,
            chef_name: self.chef_name.clone(),
            start_ms: self.start_ms,
            end_ms: self.end_ms,
        }
    }
}

fn secs_between(start_ms: u128, end_ms: u128) -> u64 {
    u64::try_from(end_ms.saturating_sub(start_ms).div_ceil(1000)).unwrap_or(u64::MAX)
}

/// Orders, chefs, completion log and active timers.
#[derive(Debug, Clone, Default)]
pub struct KitchenState {
    pub(crate) orders: Vec<Order>,
    pub(crate) chefs: Vec<Chef>,
    pub(crate) completions: Vec<CompletionRecord>,
    pub(crate) timers: TimerRegistry,
    next_sequence: u64,
}

impl KitchenState {
    /// Empty kitchen.
    pub fn new() -> Self {
        Self::default()
    }

    /// Order backlog in submission order.
    pub fn orders(&self) -> &[Order] {
        &self.orders
    }

    /// Chef roster.
    pub fn chefs(&self) -> &[Chef] {
        &self.chefs
    }

    /// Completion log, oldest first.
    pub fn completions(&self) -> &[CompletionRecord] {
        &self.completions
    }

    /// Active preparation timers.
    pub const fn timers(&self) -> &TimerRegistry {
        &self.timers
    }

    /// Look up a chef.
    pub fn chef(&self, id: ChefId) -> Option<&Chef> {
        self.chefs.iter().find(|c| c.id == id)
    }

    /// Look up an order.
    pub fn order(&self, id: &OrderId) -> Option<&Order> {
        self.orders.iter().find(|o| &o.id == id)
    }

    /// Chefs that can take a dish right now.
    pub fn available_chefs(&self) -> usize {
        self.chefs
            .iter()
            .filter(|c| c.is_available() && !self.timers.is_active(c.id))
            .count()
    }

    /// True if any dish is still waiting for a chef.
    pub fn has_pending(&self) -> bool {
        self.orders
            .iter()
            .any(|o| o.dishes.iter().any(Dish::is_pending))
    }

    /// Build an order from catalog ids and append it to the backlog.
    ///
    /// Rejected as a whole, before any mutation, when the selection is empty
    /// or names a dish the catalog does not have.
    pub fn submit_order<T: AsRef<str>>(
        &mut self,
        catalog: &Catalog,
        selections: &[T],
        priority: Priority,
        now_ms: u128,
    ) -> Result<Order, SchedulerError> {
        if selections.is_empty() {
            return Err(SchedulerError::InvalidSubmission(
                "an order needs at least one dish".into(),
            ));
        }

        let templates = selections
            .iter()
            .map(|id| {
                let id = id.as_ref();
                catalog
                    .get(id)
                    .ok_or_else(|| SchedulerError::UnknownDish(id.to_owned()))
            })
            .collect::<Result<Vec<_>, _>>()?;

        let mut dish_ids = HashSet::with_capacity(templates.len());
        let dishes = templates
            .into_iter()
            .map(|template| {
                let mut id = DishId::random();
                while !dish_ids.insert(id.clone()) {
                    id = DishId::random();
                }
                Dish::from_template(template, id)
            })
            .collect();

        let mut id = OrderId::random();
        while self.order(&id).is_some() {
            id = OrderId::random();
        }

        let order = Order::new(id, dishes, priority, now_ms, self.next_sequence);
        self.next_sequence += 1;
        self.orders.push(order.clone());
        Ok(order)
    }

    /// Append an available chef. Ids continue from the highest one in use.
    pub fn add_chef(&mut self, name: &str) -> Result<Chef, SchedulerError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(SchedulerError::InvalidChefName);
        }
        let next = self.chefs.iter().map(|c| c.id.0).max().unwrap_or(0) + 1;
        let chef = Chef::new(ChefId(next), name.to_owned());
        self.chefs.push(chef.clone());
        Ok(chef)
    }

    /// Remove an idle chef. Busy chefs are rejected and left untouched.
    pub fn remove_chef(&mut self, id: ChefId) -> Result<Chef, SchedulerError> {
        let index = self
            .chefs
            .iter()
            .position(|c| c.id == id)
            .ok_or(SchedulerError::ChefNotFound(id))?;
        if !self.chefs[index].is_available() || self.timers.is_active(id) {
            return Err(SchedulerError::ChefBusy(id));
        }
        Ok(self.chefs.remove(index))
    }

    /// Match pending dishes to available chefs, greedily and one-to-one.
    ///
    /// Each pass hands out at most the first pending dish of every order, in
    /// dispatch order. Passes repeat while chefs remain free and the previous
    /// pass assigned something. Every returned assignment is already
    /// registered with the timer registry.
    pub fn assign(&mut self, now_ms: u128) -> Vec<Assignment> {
        let mut free: VecDeque<usize> = self
            .chefs
            .iter()
            .enumerate()
            .filter(|(_, c)| c.is_available() && !self.timers.is_active(c.id))
            .map(|(i, _)| i)
            .collect();

        if free.is_empty() {
            tracing::debug!("no available chefs, dispatch skipped");
            return Vec::new();
        }

        let mut assignments = Vec::new();
        loop {
            let mut assigned_this_pass = false;
            for (order_idx, dish_idx) in selector::candidates(&self.orders) {
                let Some(chef_idx) = free.pop_front() else {
                    break;
                };
                let order = &mut self.orders[order_idx];
                let dish = &mut order.dishes[dish_idx];
                let chef = &mut self.chefs[chef_idx];

                let assignment = Assignment {
                    order_id: order.id.clone(),
                    dish_id: dish.id.clone(),
                    dish_name: dish.name.clone(),
                    chef_id: chef.id,
                    chef_name: chef.name.clone(),
                    start_ms: now_ms,
                    end_ms: now_ms + u128::from(dish.preparation_secs) * 1000,
                };

                dish.begin(assignment.dish_view());
                chef.begin(assignment.chef_view());
                self.timers.register(assignment.clone());
                tracing::info!(
                    order_id = %assignment.order_id,
                    chef_id = %assignment.chef_id,
                    "assigned {} to {}",
                    assignment.dish_name,
                    assignment.chef_name
                );
                assignments.push(assignment);
                assigned_this_pass = true;
            }
            if free.is_empty() || !assigned_this_pass {
                break;
            }
        }
        assignments
    }

    /// Verify the cross-entity invariants, returning the first violation.
    ///
    /// Checks that no chef is referenced by two preparing dishes, that every
    /// busy chef points at a preparing dish assigned to it, that availability
    /// matches the timer registry, and that completed dishes are logged once.
    pub fn check_invariants(&self) -> Result<(), String> {
        let mut preparing_chefs = HashSet::new();
        for order in &self.orders {
            for dish in &order.dishes {
                if dish.status() != DishStatus::Preparing {
                    continue;
                }
                let Some(chef_id) = dish.chef_id() else {
                    return Err(format!("dish {} is preparing without a chef", dish.id));
                };
                if !preparing_chefs.insert(chef_id) {
                    return Err(format!("chef {chef_id} is preparing two dishes"));
                }
            }
        }

        for chef in &self.chefs {
            match chef.current_assignment() {
                Some(current) => {
                    let dish = self
                        .order(&current.order_id)
                        .and_then(|o| o.dish(&current.dish_id))
                        .ok_or_else(|| format!("chef {} points at a missing dish", chef.id))?;
                    if dish.status() != DishStatus::Preparing || dish.chef_id() != Some(chef.id) {
                        return Err(format!(
                            "chef {} is busy with dish {} which is not preparing under it",
                            chef.id, dish.id
                        ));
                    }
                    if !self.timers.is_active(chef.id) {
                        return Err(format!("chef {} is busy without a timer", chef.id));
                    }
                }
                None => {
                    if self.timers.is_active(chef.id) {
                        return Err(format!("chef {} is available with a live timer", chef.id));
                    }
                }
            }
        }

        let completed = self
            .orders
            .iter()
            .flat_map(|o| o.dishes.iter())
            .filter(|d| d.status() == DishStatus::Completed)
            .count();
        if completed != self.completions.len() {
            return Err(format!(
                "{completed} completed dishes but {} completion records",
                self.completions.len()
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::model::{ChefStatus, OrderStatus};

    fn kitchen(chefs: &[&str]) -> KitchenState {
        let mut state = KitchenState::new();
        for name in chefs {
            state.add_chef(name).unwrap();
        }
        state
    }

    #[test]
    fn vip_is_served_first() {
        let catalog = Catalog::standard();
        let mut state = kitchen(&["Alex"]);
        let normal = state
            .submit_order(&catalog, &["dish1"], Priority::NORMAL, 100)
            .unwrap();
        let vip = state
            .submit_order(&catalog, &["dish2"], Priority::VIP, 200)
            .unwrap();
        state
            .submit_order(&catalog, &["dish3"], Priority::HIGH, 300)
            .unwrap();

        let assignments = state.assign(400);
        assert_eq!(assignments.len(), 1);
        assert_eq!(assignments[0].order_id, vip.id);
        assert_eq!(assignments[0].dish_name, "Caesar Salad");
        assert_eq!(assignments[0].end_ms, 400 + 3_000);
        assert_eq!(state.order(&normal.id).unwrap().status(), OrderStatus::Pending);
        state.check_invariants().unwrap();
    }

    #[test]
    fn equal_priority_is_fifo() {
        let catalog = Catalog::standard();
        let mut state = kitchen(&["Alex"]);
        let first = state
            .submit_order(&catalog, &["dish1"], Priority::HIGH, 100)
            .unwrap();
        state
            .submit_order(&catalog, &["dish2"], Priority::HIGH, 200)
            .unwrap();

        let assignments = state.assign(300);
        assert_eq!(assignments[0].order_id, first.id);
    }

    #[test]
    fn no_chefs_is_a_noop() {
        let catalog = Catalog::standard();
        let mut state = kitchen(&[]);
        state
            .submit_order(&catalog, &["dish1"], Priority::NORMAL, 0)
            .unwrap();
        assert!(state.assign(10).is_empty());
        assert!(state.has_pending());
    }

    #[test]
    fn dispatch_twice_is_idempotent() {
        let catalog = Catalog::standard();
        let mut state = kitchen(&["Alex", "Bailey"]);
        state
            .submit_order(&catalog, &["dish1", "dish2", "dish3"], Priority::NORMAL, 0)
            .unwrap();

        let first = state.assign(10);
        assert_eq!(first.len(), 2);
        let second = state.assign(20);
        assert!(second.is_empty());
        assert_eq!(state.timers().len(), 2);
        state.check_invariants().unwrap();
    }

    #[test]
    fn dishes_within_an_order_go_out_in_sequence() {
        let catalog = Catalog::standard();
        let mut state = kitchen(&["Alex", "Bailey"]);
        let order = state
            .submit_order(&catalog, &["dish6", "dish8", "dish2"], Priority::NORMAL, 0)
            .unwrap();

        let assignments = state.assign(10);
        let names: Vec<_> = assignments.iter().map(|a| a.dish_name.as_str()).collect();
        assert_eq!(names, vec!["Chocolate Soufflé", "French Fries"]);

        let stored = state.order(&order.id).unwrap();
        assert!(stored.dishes()[2].is_pending());
    }

    #[test]
    fn greedy_across_orders_before_second_dishes() {
        let catalog = Catalog::standard();
        let mut state = kitchen(&["Alex", "Bailey", "Casey"]);
        let vip = state
            .submit_order(&catalog, &["dish1", "dish2"], Priority::VIP, 0)
            .unwrap();
        let normal = state
            .submit_order(&catalog, &["dish3", "dish4"], Priority::NORMAL, 1)
            .unwrap();

        let assignments = state.assign(10);
        let orders: Vec<_> = assignments.iter().map(|a| a.order_id.clone()).collect();
        assert_eq!(orders, vec![vip.id.clone(), normal.id.clone(), vip.id]);
        state.check_invariants().unwrap();
    }

    #[test]
    fn chef_and_dish_views_agree() {
        let catalog = Catalog::standard();
        let mut state = kitchen(&["Alex"]);
        let order = state
            .submit_order(&catalog, &["dish4"], Priority::NORMAL, 0)
            .unwrap();
        state.assign(1_000);

        let chef = &state.chefs()[0];
        assert_eq!(chef.status(), ChefStatus::Busy);
        let current = chef.current_assignment().unwrap();
        assert_eq!(current.order_id, order.id);
        assert_eq!(current.remaining_secs, 5);

        let dish = state.order(&order.id).unwrap().dish(&current.dish_id).unwrap();
        assert_eq!(dish.chef_id(), Some(chef.id));
        assert_eq!(dish.chef_name(), Some("Alex"));
        assert_eq!(dish.end_ms(), Some(6_000));
    }

    #[test]
    fn empty_and_unknown_submissions_leave_no_order() {
        let catalog = Catalog::standard();
        let mut state = kitchen(&["Alex"]);
        let empty: [&str; 0] = [];
        assert!(matches!(
            state.submit_order(&catalog, &empty, Priority::NORMAL, 0),
            Err(SchedulerError::InvalidSubmission(_))
        ));
        assert_eq!(
            state.submit_order(&catalog, &["dish1", "nope"], Priority::NORMAL, 0),
            Err(SchedulerError::UnknownDish("nope".into()))
        );
        assert!(state.orders().is_empty());
    }

    #[test]
    fn busy_chef_cannot_be_removed() {
        let catalog = Catalog::standard();
        let mut state = kitchen(&["Alex", "Bailey"]);
        state
            .submit_order(&catalog, &["dish1"], Priority::NORMAL, 0)
            .unwrap();
        state.assign(0);

        let before = state.chef(ChefId(1)).cloned();
        assert_eq!(state.remove_chef(ChefId(1)), Err(SchedulerError::ChefBusy(ChefId(1))));
        assert_eq!(state.chef(ChefId(1)).cloned(), before);

        assert_eq!(state.remove_chef(ChefId(2)).unwrap().name, "Bailey");
        assert_eq!(state.remove_chef(ChefId(2)), Err(SchedulerError::ChefNotFound(ChefId(2))));
    }

    #[test]
    fn chef_ids_follow_the_highest() {
        let mut state = kitchen(&["Alex", "Bailey"]);
        state.remove_chef(ChefId(1)).unwrap();
        assert_eq!(state.add_chef("  Casey ").unwrap().id, ChefId(3));
        assert_eq!(state.chef(ChefId(3)).unwrap().name, "Casey");
        assert_eq!(state.add_chef("   "), Err(SchedulerError::InvalidChefName));
    }
}
