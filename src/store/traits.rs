//! The persistence port for the selection state.

use async_trait::async_trait;

use crate::error::StoreError;
use crate::wizard::SelectionState;

/// Keys used for the persisted wizard blobs.
pub mod state_keys {
    /// Key for the SelectionState JSON blob in the settings table.
    pub const SELECTIONS: &str = "wizard_selections";
}

/// Backend-agnostic store for the wizard's selection snapshot.
///
/// The state is one opaque JSON blob under a single fixed key. A missing
/// or externally cleared blob loads as valid empty state — the wizard's
/// entry point clears it on purpose.
#[async_trait]
pub trait StateStore: Send + Sync {
    /// Load the persisted state; empty state when nothing is stored.
    async fn load(&self) -> Result<SelectionState, StoreError>;

    /// Persist the state, replacing whatever was stored.
    async fn save(&self, state: &SelectionState) -> Result<(), StoreError>;

    /// Remove the persisted state entirely.
    async fn clear(&self) -> Result<(), StoreError>;
}
