//! Persisted selection state — one record per completed wizard step.

use std::collections::BTreeMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::warn;

use super::params::PayMode;
use super::step::WizardStep;

/// One wizard step's selection, as persisted and displayed.
///
/// `cost` carries only the chargeable (non-bundle-included) portion.
/// `included_in_bundle = true` marks a record that exists purely because
/// the active bundle granted it; such records are removed outright when
/// the bundle is deselected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepSelection {
    pub step: u8,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<String>,
    #[serde(default)]
    pub cost: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub monthly: Option<Decimal>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yearly: Option<Decimal>,
    #[serde(default)]
    pub included_in_bundle: bool,
    /// Payment mode locked in per add-on at selection time.
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub addon_modes: BTreeMap<String, PayMode>,
}

impl StepSelection {
    /// An empty record for a step, costs zeroed.
    pub fn new(step: WizardStep) -> Self {
        Self {
            step: step.number(),
            name: step.display_name().to_string(),
            value: String::new(),
            id: None,
            items: Vec::new(),
            cost: Decimal::ZERO,
            monthly: None,
            yearly: None,
            included_in_bundle: false,
            addon_modes: BTreeMap::new(),
        }
    }

    pub fn with_value(step: WizardStep, value: impl Into<String>) -> Self {
        let mut sel = Self::new(step);
        sel.value = value.into();
        sel
    }

    /// Monthly contribution, zero when unset.
    pub fn monthly_or_zero(&self) -> Decimal {
        self.monthly.unwrap_or(Decimal::ZERO)
    }
}

/// Promo entry carried alongside the step records.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PromoState {
    pub applied: bool,
    pub code: String,
    pub discount_percent: Decimal,
}

/// The whole persisted snapshot: a flat map keyed by step name, plus the
/// special promo entry. Serialized as one JSON blob.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionState {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub promo: Option<PromoState>,
    #[serde(flatten)]
    steps: BTreeMap<String, StepSelection>,
}

impl SelectionState {
    pub fn get(&self, step: WizardStep) -> Option<&StepSelection> {
        self.steps.get(step.key())
    }

    pub fn set(&mut self, step: WizardStep, selection: StepSelection) {
        self.steps.insert(step.key().to_string(), selection);
    }

    pub fn remove(&mut self, step: WizardStep) -> Option<StepSelection> {
        self.steps.remove(step.key())
    }

    /// Step records in key order (see `pricing::summary` for step-number
    /// ordering).
    pub fn records(&self) -> impl Iterator<Item = &StepSelection> {
        self.steps.values()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty() && self.promo.is_none()
    }

    /// Serialize to the persisted JSON blob.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| "{}".to_string())
    }

    /// Deserialize a persisted blob. A malformed blob is treated as empty
    /// state, never an error.
    pub fn from_json(blob: &str) -> Self {
        if blob.trim().is_empty() {
            return Self::default();
        }
        match serde_json::from_str(blob) {
            Ok(state) => state,
            Err(e) => {
                warn!(error = %e, "Malformed selection blob, starting from empty state");
                Self::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sample_state() -> SelectionState {
        let mut state = SelectionState::default();

        let mut subcategory = StepSelection::with_value(WizardStep::Subcategory, "company-profile");
        subcategory.id = Some("company-profile".into());
        subcategory.cost = dec!(600);
        state.set(WizardStep::Subcategory, subcategory);

        let mut addons = StepSelection::new(WizardStep::Addons);
        addons.items = vec!["seo-package".into()];
        addons.addon_modes.insert("seo-package".into(), PayMode::Monthly);
        addons.monthly = Some(dec!(199));
        state.set(WizardStep::Addons, addons);

        state.promo = Some(PromoState {
            applied: true,
            code: "WELCOME10".into(),
            discount_percent: dec!(10),
        });

        state
    }

    #[test]
    fn serde_round_trip() {
        let state = sample_state();
        let parsed = SelectionState::from_json(&state.to_json());
        assert_eq!(parsed, state);
    }

    #[test]
    fn blob_is_flat_and_keyed_by_step_name() {
        let state = sample_state();
        let value: serde_json::Value = serde_json::from_str(&state.to_json()).unwrap();
        assert!(value.get("subcategory").is_some());
        assert!(value.get("addons").is_some());
        assert!(value.get("promo").is_some());
        assert_eq!(value["subcategory"]["includedInBundle"], false);
        assert_eq!(value["addons"]["addonModes"]["seo-package"], "monthly");
    }

    #[test]
    fn malformed_blob_loads_as_empty() {
        assert!(SelectionState::from_json("{not json").is_empty());
        assert!(SelectionState::from_json("").is_empty());
    }

    #[test]
    fn empty_object_loads_as_empty() {
        assert!(SelectionState::from_json("{}").is_empty());
    }

    #[test]
    fn optional_fields_are_omitted() {
        let mut state = SelectionState::default();
        state.set(
            WizardStep::WebsiteType,
            StepSelection::with_value(WizardStep::WebsiteType, "single"),
        );
        let blob = state.to_json();
        assert!(!blob.contains("monthly"));
        assert!(!blob.contains("addonModes"));
        assert!(!blob.contains("promo"));
    }
}
