//! Builder that validates configuration and opens a kitchen.

use std::sync::Arc;

use crate::config::KitchenConfig;
use crate::core::{AuditSink, Kitchen, SchedulerError, Spawn};
use crate::infra::catalog::Catalog;
use crate::util::clock::{Clock, SystemClock};

/// Assemble a [`Kitchen`] from configuration and collaborators.
///
/// ```rust,ignore
/// use kitchen_dispatch::builders::KitchenBuilder;
/// use kitchen_dispatch::config::KitchenConfig;
/// use kitchen_dispatch::runtime::TokioSpawner;
///
/// let kitchen = KitchenBuilder::new(KitchenConfig::default())
///     .build(TokioSpawner::current())?;
/// kitchen.submit_order(&["dish1", "dish8"], Priority::VIP)?;
/// ```
pub struct KitchenBuilder {
    config: KitchenConfig,
    catalog: Catalog,
    clock: Arc<dyn Clock>,
    audit: Option<Box<dyn AuditSink>>,
}

impl KitchenBuilder {
    /// Start from a configuration, the standard menu and the wall clock.
    pub fn new(config: KitchenConfig) -> Self {
        Self {
            config,
            catalog: Catalog::standard(),
            clock: Arc::new(SystemClock),
            audit: None,
        }
    }

    /// Configuration the kitchen will use.
    pub const fn config(&self) -> &KitchenConfig {
        &self.config
    }

    /// Replace the dish catalog.
    #[must_use]
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Replace the time source, e.g. with a [`crate::util::ManualClock`].
    #[must_use]
    pub fn with_clock<C: Clock>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }

    /// Attach an audit sink.
    #[must_use]
    pub fn with_audit(mut self, audit: Box<dyn AuditSink>) -> Self {
        self.audit = Some(audit);
        self
    }

    /// Validate, seed the initial roster and start the backstop loop.
    ///
    /// Must run inside the runtime the spawner targets when a backstop is
    /// configured.
    pub fn build<S>(self, spawner: S) -> Result<Kitchen<S>, SchedulerError>
    where
        S: Spawn + Send + Sync + 'static,
    {
        self.config.validate().map_err(SchedulerError::InvalidConfig)?;

        let chefs = self.config.initial_chefs.clone();
        let kitchen = Kitchen::new(self.config, self.catalog, self.clock, spawner, self.audit);
        for name in &chefs {
            kitchen.seed_chef(name)?;
        }
        kitchen.spawn_backstop();
        tracing::info!(chefs = chefs.len(), "kitchen open");
        Ok(kitchen)
    }
}
