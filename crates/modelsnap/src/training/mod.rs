//! Training-loop integration.
//!
//! The training engine owns the parameter-update algorithm and calls
//! [`IterationHook::on_iteration_end`] once per completed iteration. Hooks
//! are an explicit seam rather than framework callback registration, so a
//! writer, a metric logger, or both can be attached to any loop.

use crate::log::MetricLogger;
use crate::snapshot::{ModelState, SnapshotWriter};
use crate::Result;

/// Hook invoked at the end of each training iteration.
///
/// `sequence` starts at 1 and increases monotonically within a run;
/// `metric` is the iteration's scalar performance measure.
pub trait IterationHook {
    fn on_iteration_end(
        &mut self,
        sequence: u64,
        metric: f64,
        model: &dyn ModelState,
    ) -> Result<()>;
}

impl IterationHook for SnapshotWriter {
    /// Snapshot write with log-and-continue semantics: a failed write loses
    /// that iteration's snapshot but never aborts training. Callers who want
    /// the error should use [`SnapshotWriter::save`] directly.
    fn on_iteration_end(
        &mut self,
        sequence: u64,
        metric: f64,
        model: &dyn ModelState,
    ) -> Result<()> {
        if let Err(e) = self.maybe_save(model, sequence, metric) {
            tracing::warn!(sequence, metric, "snapshot write failed: {}", e);
        }
        Ok(())
    }
}

/// Forwards the iteration metric to a [`MetricLogger`] backend.
pub struct MetricHook {
    logger: Box<dyn MetricLogger>,
    name: String,
}

impl MetricHook {
    pub fn new(logger: Box<dyn MetricLogger>, metric_name: impl Into<String>) -> Self {
        Self {
            logger,
            name: metric_name.into(),
        }
    }
}

impl IterationHook for MetricHook {
    fn on_iteration_end(
        &mut self,
        sequence: u64,
        metric: f64,
        _model: &dyn ModelState,
    ) -> Result<()> {
        self.logger.log_scalar(&self.name, metric, sequence);
        Ok(())
    }
}

/// Runs several hooks in registration order.
#[derive(Default)]
pub struct HookList {
    hooks: Vec<Box<dyn IterationHook>>,
}

impl HookList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hook: Box<dyn IterationHook>) {
        self.hooks.push(hook);
    }
}

impl IterationHook for HookList {
    fn on_iteration_end(
        &mut self,
        sequence: u64,
        metric: f64,
        model: &dyn ModelState,
    ) -> Result<()> {
        for hook in &mut self.hooks {
            hook.on_iteration_end(sequence, metric, model)?;
        }
        Ok(())
    }
}
