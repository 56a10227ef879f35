//! Dispatch ordering over the order backlog.
//!
//! Higher priority first, FIFO by submission time within a priority tier, and
//! the submission sequence as a final tie-break so the ordering is total.
//! Within an order, dishes are served strictly in submission order.

use std::cmp::Ordering;

use super::model::{Dish, Order};

/// Compare two orders for dispatch: `Less` means `a` goes first.
pub fn compare_orders(a: &Order, b: &Order) -> Ordering {
    b.priority
        .cmp(&a.priority)
        .then_with(|| a.submitted_at_ms.cmp(&b.submitted_at_ms))
        .then_with(|| a.sequence.cmp(&b.sequence))
}

/// Indices into `orders`, sorted into dispatch order. Pure and stable.
pub fn dispatch_order(orders: &[Order]) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..orders.len()).collect();
    indices.sort_by(|&a, &b| compare_orders(&orders[a], &orders[b]));
    indices
}

/// Index of the first pending dish of an order.
pub fn next_pending_dish(order: &Order) -> Option<usize> {
    order.dishes.iter().position(Dish::is_pending)
}

/// `(order index, dish index)` of the next dish each order would hand out,
/// in dispatch order. Orders with nothing pending are skipped.
pub fn candidates(orders: &[Order]) -> Vec<(usize, usize)> {
    dispatch_order(orders)
        .into_iter()
        .filter_map(|i| next_pending_dish(&orders[i]).map(|d| (i, d)))
        .collect()
}
