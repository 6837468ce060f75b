use serde::{Serialize, de::DeserializeOwned};

use crate::backing::Backing;
use crate::error::StorageError;

/// Load a JSON state blob. `Ok(None)` when the key has never been written.
pub fn load_state<T: DeserializeOwned>(
    backing: &dyn Backing,
    key: &str,
) -> Result<Option<T>, StorageError> {
    match backing.read(key)? {
        Some(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
        None => Ok(None),
    }
}

/// Save a JSON state blob, replacing whatever was there.
pub fn save_state<T: Serialize>(
    backing: &mut dyn Backing,
    key: &str,
    value: &T,
) -> Result<(), StorageError> {
    let body = serde_json::to_vec_pretty(value)?;
    backing.write(key, &body)
}
