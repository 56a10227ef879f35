//! API-facing request/response models for hosting a kitchen behind a transport.

use serde::{Deserialize, Serialize};

use crate::core::{Chef, Kitchen, KitchenSnapshot, Order, Spawn};
use crate::util::types::{ChefId, Priority};

/// Order submission payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderSubmission {
    /// Catalog dish ids, in the order they should be prepared.
    pub dishes: Vec<String>,
    /// Priority; defaults to normal.
    #[serde(default)]
    pub priority: Priority,
}

/// Chef roster request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChefRequest {
    /// Display name.
    pub name: String,
}

/// Health response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Health {
    /// Healthy flag.
    pub ok: bool,
    /// Chefs on the roster.
    pub chefs: usize,
    /// Preparations in flight.
    pub cooking: usize,
}

/// Submit an order; errors are rendered for the caller.
pub fn submit_order<S>(kitchen: &Kitchen<S>, req: &OrderSubmission) -> Result<Order, String>
where
    S: Spawn + Send + Sync + 'static,
{
    kitchen
        .submit_order(req.dishes.as_slice(), req.priority)
        .map_err(|e| e.to_string())
}

/// Add a chef.
pub fn add_chef<S>(kitchen: &Kitchen<S>, req: &ChefRequest) -> Result<Chef, String>
where
    S: Spawn + Send + Sync + 'static,
{
    kitchen.add_chef(&req.name).map_err(|e| e.to_string())
}

/// Remove a chef.
pub fn remove_chef<S>(kitchen: &Kitchen<S>, id: u64) -> Result<Chef, String>
where
    S: Spawn + Send + Sync + 'static,
{
    kitchen.remove_chef(ChefId(id)).map_err(|e| e.to_string())
}

/// Serialize a consistent snapshot for presentation layers.
pub fn snapshot_json<S>(kitchen: &Kitchen<S>) -> Result<String, serde_json::Error>
where
    S: Spawn + Send + Sync + 'static,
{
    let snapshot: KitchenSnapshot = kitchen.snapshot();
    serde_json::to_string(&snapshot)
}

/// Return a health payload.
pub fn health<S>(kitchen: &Kitchen<S>) -> Health
where
    S: Spawn + Send + Sync + 'static,
{
    Health {
        ok: !kitchen.is_shut_down(),
        chefs: kitchen.chefs().len(),
        cooking: kitchen.active_timers(),
    }
}
