//! In-memory `StateStore` for tests and ephemeral sessions.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::error::StoreError;
use crate::store::traits::StateStore;
use crate::wizard::SelectionState;

/// Stores the serialized blob in memory, mirroring the opaque-blob
/// contract of the real backend.
#[derive(Default)]
pub struct MemoryStore {
    blob: Mutex<Option<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl StateStore for MemoryStore {
    async fn load(&self) -> Result<SelectionState, StoreError> {
        let blob = self.blob.lock().expect("store lock").clone();
        Ok(blob
            .map(|b| SelectionState::from_json(&b))
            .unwrap_or_default())
    }

    async fn save(&self, state: &SelectionState) -> Result<(), StoreError> {
        let blob = serde_json::to_string(state)
            .map_err(|e| StoreError::Serialization(e.to_string()))?;
        *self.blob.lock().expect("store lock") = Some(blob);
        Ok(())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        *self.blob.lock().expect("store lock") = None;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{StepSelection, WizardStep};

    #[tokio::test]
    async fn round_trip_and_clear() {
        let store = MemoryStore::new();
        assert!(store.load().await.unwrap().is_empty());

        let mut state = SelectionState::default();
        state.set(
            WizardStep::WebsiteType,
            StepSelection::with_value(WizardStep::WebsiteType, "single"),
        );
        store.save(&state).await.unwrap();
        assert_eq!(store.load().await.unwrap(), state);

        store.clear().await.unwrap();
        assert!(store.load().await.unwrap().is_empty());
    }
}
