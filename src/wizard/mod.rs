//! Wizard domain — step identifiers, persisted selection state, and
//! incoming parameters.

pub mod params;
pub mod state;
pub mod step;

pub use params::{BundleParams, IncomingParams, PayMode, WebsiteType};
pub use state::{PromoState, SelectionState, StepSelection};
pub use step::{WizardStep, ALL_STEPS};
