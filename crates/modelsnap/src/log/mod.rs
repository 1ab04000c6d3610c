//! Metric logging backends.
//!
//! Iteration metrics flow from [`MetricHook`](crate::training::MetricHook)
//! into a [`MetricLogger`] sink. [`ConsoleLogger`] prints through `tracing`
//! and is the usual choice for interactive runs; [`CompositeLogger`] fans a
//! run's metrics out to several sinks at once.

use std::collections::HashMap;

/// Sink for scalar training metrics.
pub trait MetricLogger: Send + Sync {
    /// Record one scalar observed at the end of a training iteration.
    fn log_scalar(&self, name: &str, value: f64, iteration: u64);

    /// Record several metrics for the same iteration.
    ///
    /// The default forwards each entry to [`log_scalar`](Self::log_scalar);
    /// sinks that can batch a whole iteration override this.
    fn log_metrics(&self, metrics: &HashMap<String, f64>, iteration: u64) {
        for (name, value) in metrics {
            self.log_scalar(name, *value, iteration);
        }
    }

    /// Flush and release the sink.
    fn close(&self) {}
}

/// Prints metrics through `tracing`, one line per call.
#[derive(Default)]
pub struct ConsoleLogger;

impl ConsoleLogger {
    pub fn new() -> Self {
        Self
    }
}

impl MetricLogger for ConsoleLogger {
    fn log_scalar(&self, name: &str, value: f64, iteration: u64) {
        tracing::info!(iteration, "{} = {:.4}", name, value);
    }

    fn log_metrics(&self, metrics: &HashMap<String, f64>, iteration: u64) {
        // One sorted line per iteration rather than a line per metric.
        let mut pairs: Vec<(&str, f64)> =
            metrics.iter().map(|(name, value)| (name.as_str(), *value)).collect();
        pairs.sort_by(|a, b| a.0.cmp(b.0));

        let line = pairs
            .iter()
            .map(|(name, value)| format!("{name}={value:.4}"))
            .collect::<Vec<_>>()
            .join(" ");
        tracing::info!(iteration, "{}", line);
    }
}

/// Discards everything; for callers that need a sink but no output.
pub struct NoOpLogger;

impl MetricLogger for NoOpLogger {
    fn log_scalar(&self, _name: &str, _value: f64, _iteration: u64) {}
    fn log_metrics(&self, _metrics: &HashMap<String, f64>, _iteration: u64) {}
}

/// Fans metrics out to several sinks.
#[derive(Default)]
pub struct CompositeLogger {
    sinks: Vec<Box<dyn MetricLogger>>,
}

impl CompositeLogger {
    pub fn new(sinks: Vec<Box<dyn MetricLogger>>) -> Self {
        Self { sinks }
    }

    pub fn add(&mut self, sink: Box<dyn MetricLogger>) {
        self.sinks.push(sink);
    }
}

impl MetricLogger for CompositeLogger {
    fn log_scalar(&self, name: &str, value: f64, iteration: u64) {
        for sink in &self.sinks {
            sink.log_scalar(name, value, iteration);
        }
    }

    fn log_metrics(&self, metrics: &HashMap<String, f64>, iteration: u64) {
        for sink in &self.sinks {
            sink.log_metrics(metrics, iteration);
        }
    }

    fn close(&self) {
        for sink in &self.sinks {
            sink.close();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    struct Recorder {
        scalars: Arc<Mutex<Vec<(String, f64, u64)>>>,
    }

    impl MetricLogger for Recorder {
        fn log_scalar(&self, name: &str, value: f64, iteration: u64) {
            self.scalars.lock().unwrap().push((name.to_string(), value, iteration));
        }
    }

    #[test]
    fn test_default_log_metrics_fans_into_scalars() {
        let scalars = Arc::new(Mutex::new(Vec::new()));
        let recorder = Recorder { scalars: scalars.clone() };

        let mut metrics = HashMap::new();
        metrics.insert("accuracy".to_string(), 0.98);
        metrics.insert("loss".to_string(), 0.02);
        recorder.log_metrics(&metrics, 7);

        let mut scalars = scalars.lock().unwrap().clone();
        scalars.sort_by(|a, b| a.0.cmp(&b.0));
        assert_eq!(
            scalars,
            vec![
                ("accuracy".to_string(), 0.98, 7),
                ("loss".to_string(), 0.02, 7)
            ]
        );
    }

    #[test]
    fn test_composite_dispatches_to_all_sinks() {
        let scalars = Arc::new(Mutex::new(Vec::new()));
        let composite = CompositeLogger::new(vec![
            Box::new(Recorder { scalars: scalars.clone() }),
            Box::new(Recorder { scalars: scalars.clone() }),
            Box::new(NoOpLogger),
        ]);

        composite.log_scalar("accuracy", 0.9, 1);
        composite.close();

        assert_eq!(scalars.lock().unwrap().len(), 2);
    }

    #[test]
    fn test_console_logger_accepts_scalar_and_batch() {
        let console = ConsoleLogger::new();
        console.log_scalar("accuracy", 0.66, 1);

        let mut metrics = HashMap::new();
        metrics.insert("accuracy".to_string(), 0.99);
        metrics.insert("loss".to_string(), 0.01);
        console.log_metrics(&metrics, 46);
        console.close();
    }
}
