//! End-to-end snapshot flow: train, save per iteration, reload the latest.

use modelsnap::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tempfile::tempdir;

/// Stand-in for a model trained by an external engine. Only the learned
/// parameters cross the snapshot boundary.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
struct Perceptron {
    weights: Vec<f64>,
    bias: f64,
}

impl ModelState for Perceptron {
    fn save_state(&self) -> modelsnap::Result<Vec<u8>> {
        modelsnap::snapshot::save_json(self)
    }

    fn load_state(&mut self, data: &[u8]) -> modelsnap::Result<()> {
        *self = modelsnap::snapshot::load_json(data)?;
        Ok(())
    }
}

fn model(seed: f64) -> Perceptron {
    Perceptron {
        weights: vec![seed, seed * 2.0, -seed],
        bias: seed / 10.0,
    }
}

#[test]
fn latest_snapshot_wins_regardless_of_metric() {
    let dir = tempdir().unwrap();
    let mut writer = SnapshotWriter::new(WriterConfig::new(dir.path()));

    // Later iterations do not necessarily have better metrics.
    writer.save(&model(1.0), 1, 0.66).unwrap();
    writer.save(&model(46.0), 46, 0.99).unwrap();
    writer.save(&model(50.0), 50, 0.98).unwrap();

    let latest = select_latest(dir.path(), "model", "ckpt").unwrap();
    assert_eq!(latest.name.sequence, 50);
    assert_eq!(latest.name.metric, 0.98);
    assert_eq!(
        latest.path.file_name().unwrap().to_str().unwrap(),
        "model_epoch-0050_acc-0.98.ckpt"
    );
}

#[test]
fn reloaded_model_matches_last_saved_state() {
    let dir = tempdir().unwrap();
    let mut writer = SnapshotWriter::new(WriterConfig::new(dir.path()));

    for sequence in 1..=20 {
        let trained = model(sequence as f64);
        writer.save(&trained, sequence, 0.5 + sequence as f64 / 100.0).unwrap();
    }

    let mut restored = model(0.0);
    let snapshot = load_latest(dir.path(), "model", "ckpt", &mut restored).unwrap();

    assert_eq!(snapshot.name.sequence, 20);
    assert_eq!(restored, model(20.0));
}

#[test]
fn hooked_training_loop_produces_loadable_snapshots() {
    let dir = tempdir().unwrap();

    let mut hooks = HookList::new();
    hooks.push(Box::new(SnapshotWriter::new(WriterConfig::new(dir.path()))));
    hooks.push(Box::new(MetricHook::new(
        Box::new(ConsoleLogger::new()),
        "accuracy",
    )));

    // The engine drives the loop; per iteration it hands over the model
    // and its metric.
    for sequence in 1..=5u64 {
        let trained = model(sequence as f64);
        let accuracy = 0.6 + sequence as f64 / 20.0;
        hooks.on_iteration_end(sequence, accuracy, &trained).unwrap();
    }

    let mut restored = model(0.0);
    let snapshot = load_latest(dir.path(), "model", "ckpt", &mut restored).unwrap();
    assert_eq!(snapshot.name.sequence, 5);
    assert_eq!(restored, model(5.0));
}

#[test]
fn selecting_from_missing_directory_names_it() {
    let missing = Path::new("/nonexistent/snapshots");
    let err = select_latest(missing, "model", "ckpt").unwrap_err();

    assert!(matches!(err, SnapError::NotFound { .. }));
    assert!(err.to_string().contains("/nonexistent/snapshots"));
}
