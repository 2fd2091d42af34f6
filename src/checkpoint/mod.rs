//! Checkpoint and restore of a machine's stored state.
//!
//! A checkpoint captures the store entries one namespace owns, so a subject's
//! progress can be carried between stores or kept alongside other records.
//! It does NOT include the configuration.

use crate::engine::{current_state_key, destination_state_key, Notifier, StateMachine, StateStore};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub mod error;

pub use error::CheckpointError;

/// Version identifier for checkpoint format
pub const CHECKPOINT_VERSION: u32 = 1;

/// Serializable snapshot of one namespace's store entries.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Checkpoint {
    /// Checkpoint format version
    pub version: u32,

    /// Unique checkpoint identifier
    pub id: String,

    /// When checkpoint was created
    pub timestamp: DateTime<Utc>,

    /// Namespace the entries were read from
    pub namespace: String,

    /// Stored current state, if any
    pub current_state: Option<String>,

    /// Last recorded destination marker, if any
    pub destination_state: Option<String>,
}

impl Checkpoint {
    /// Serialize as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, CheckpointError> {
        serde_json::to_string_pretty(self)
            .map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Parse JSON, rejecting unsupported format versions.
    pub fn from_json(json: &str) -> Result<Self, CheckpointError> {
        let checkpoint: Self = serde_json::from_str(json)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    /// Serialize with bincode.
    pub fn to_binary(&self) -> Result<Vec<u8>, CheckpointError> {
        bincode::serialize(self).map_err(|e| CheckpointError::SerializationFailed(e.to_string()))
    }

    /// Decode bincode, rejecting unsupported format versions.
    pub fn from_binary(bytes: &[u8]) -> Result<Self, CheckpointError> {
        let checkpoint: Self = bincode::deserialize(bytes)
            .map_err(|e| CheckpointError::DeserializationFailed(e.to_string()))?;
        checkpoint.check_version()?;
        Ok(checkpoint)
    }

    fn check_version(&self) -> Result<(), CheckpointError> {
        if self.version != CHECKPOINT_VERSION {
            return Err(CheckpointError::UnsupportedVersion {
                found: self.version,
                supported: CHECKPOINT_VERSION,
            });
        }
        Ok(())
    }
}

impl<St: StateStore, N: Notifier> StateMachine<St, N> {
    /// Snapshot the entries this machine's namespace owns in the store.
    ///
    /// Only stored values are captured; an unset current state stays unset
    /// rather than being replaced by the default.
    pub fn checkpoint(&self) -> Checkpoint {
        let namespace = self.config().namespace.clone();
        Checkpoint {
            version: CHECKPOINT_VERSION,
            id: Uuid::new_v4().to_string(),
            timestamp: Utc::now(),
            current_state: self.store().read(&current_state_key(&namespace)),
            destination_state: self.store().read(&destination_state_key(&namespace)),
            namespace,
        }
    }

    /// Write a checkpoint's entries back to the store.
    ///
    /// Entries absent from the checkpoint are left untouched.
    pub fn restore(&mut self, checkpoint: &Checkpoint) -> Result<(), CheckpointError> {
        checkpoint.check_version()?;

        let namespace = self.config().namespace.clone();
        if checkpoint.namespace != namespace {
            return Err(CheckpointError::NamespaceMismatch {
                found: checkpoint.namespace.clone(),
                expected: namespace,
            });
        }

        let destination = &checkpoint.destination_state;
        let entries = [
            (destination_state_key(&namespace), destination),
            (current_state_key(&namespace), &checkpoint.current_state),
        ];
        for (key, value) in entries {
            let Some(value) = value else { continue };
            if !self.store_mut().write(&key, value) {
                return Err(CheckpointError::StoreWriteFailed { key });
            }
        }

        tracing::debug!(
            namespace = %namespace,
            checkpoint = %checkpoint.id,
            state = ?checkpoint.current_state,
            "checkpoint restored"
        );
        Ok(())
    }
}
