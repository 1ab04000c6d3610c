//! Serialization boundary trait.

use crate::{Result, SnapError};
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Trait for models whose learned parameters can be persisted.
///
/// The snapshot layer treats the payload as opaque bytes; how parameters
/// are encoded is entirely the implementor's business.
///
/// # Example
///
/// ```ignore
/// impl ModelState for MyModel {
///     fn save_state(&self) -> Result<Vec<u8>> {
///         save_json(&self.weights)
///     }
///
///     fn load_state(&mut self, data: &[u8]) -> Result<()> {
///         self.weights = load_json(data)?;
///         Ok(())
///     }
/// }
/// ```
pub trait ModelState {
    /// Serialize the learned parameters to bytes.
    fn save_state(&self) -> Result<Vec<u8>>;

    /// Restore the learned parameters from bytes.
    fn load_state(&mut self, data: &[u8]) -> Result<()>;
}

/// Encode serde-serializable state as JSON bytes.
pub fn save_json<T: Serialize>(state: &T) -> Result<Vec<u8>> {
    serde_json::to_vec(state).map_err(|e| SnapError::Serialization(e.to_string()))
}

/// Decode state previously written by [`save_json`].
pub fn load_json<T: DeserializeOwned>(data: &[u8]) -> Result<T> {
    serde_json::from_slice(data).map_err(|e| SnapError::Serialization(e.to_string()))
}
