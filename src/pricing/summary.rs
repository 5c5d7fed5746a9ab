//! Step ordering and the capability summary.

use regex::Regex;
use rust_decimal::Decimal;

use crate::wizard::{SelectionState, StepSelection, WizardStep};

/// Step records ordered by step number, for quote display.
pub fn ordered_steps(state: &SelectionState) -> Vec<&StepSelection> {
    let mut steps: Vec<&StepSelection> = state.records().collect();
    steps.sort_by_key(|s| s.step);
    steps
}

/// Yes/no presence of the four headline capabilities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySummary {
    pub backend: bool,
    pub ai: bool,
    pub automation: bool,
    pub store: bool,
}

impl CapabilitySummary {
    /// Short acronym form, e.g. `B:Y AI:N AU:Y ST:N`.
    pub fn acronym(&self) -> String {
        let yn = |b: bool| if b { "Y" } else { "N" };
        format!(
            "B:{} AI:{} AU:{} ST:{}",
            yn(self.backend),
            yn(self.ai),
            yn(self.automation),
            yn(self.store)
        )
    }
}

/// Derives the capability summary from a selection state.
///
/// Each capability is an independent predicate over its step record,
/// tolerant of the value encodings that have appeared in persisted blobs
/// over time ("Yes", "yes", "true", a non-empty item list, a positive
/// cost, a tier id).
pub struct CapabilityMatcher {
    affirmative: Regex,
}

impl CapabilityMatcher {
    pub fn new() -> Self {
        Self {
            // "Yes"/"y"/"true"/"1" in any casing
            affirmative: Regex::new(r"(?i)^(y(es)?|true|1)$").expect("affirmative pattern"),
        }
    }

    fn present(&self, selection: Option<&StepSelection>) -> bool {
        let Some(sel) = selection else { return false };
        self.affirmative.is_match(sel.value.trim())
            || !sel.items.is_empty()
            || sel.cost > Decimal::ZERO
            || sel.id.is_some()
    }

    pub fn summarize(&self, state: &SelectionState) -> CapabilitySummary {
        CapabilitySummary {
            backend: self.present(state.get(WizardStep::Backend))
                || self.present(state.get(WizardStep::BackendOptions)),
            ai: self.present(state.get(WizardStep::AiFeatures)),
            automation: self.present(state.get(WizardStep::Automation)),
            store: self.present(state.get(WizardStep::Store)),
        }
    }
}

impl Default for CapabilityMatcher {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn steps_are_ordered_by_number() {
        let mut state = SelectionState::default();
        state.set(WizardStep::Hosting, StepSelection::new(WizardStep::Hosting));
        state.set(WizardStep::WebsiteType, StepSelection::new(WizardStep::WebsiteType));
        state.set(WizardStep::Backend, StepSelection::new(WizardStep::Backend));

        let numbers: Vec<u8> = ordered_steps(&state).iter().map(|s| s.step).collect();
        assert_eq!(numbers, vec![1, 5, 12]);
    }

    #[test]
    fn empty_state_has_no_capabilities() {
        let summary = CapabilityMatcher::new().summarize(&SelectionState::default());
        assert_eq!(summary.acronym(), "B:N AI:N AU:N ST:N");
    }

    #[test]
    fn value_encodings_all_count() {
        let matcher = CapabilityMatcher::new();

        for value in ["Yes", "yes", "y", "true", "1", " YES "] {
            let mut state = SelectionState::default();
            state.set(
                WizardStep::Backend,
                StepSelection::with_value(WizardStep::Backend, value),
            );
            assert!(matcher.summarize(&state).backend, "value {value:?} should count");
        }
    }

    #[test]
    fn items_cost_and_id_count() {
        let matcher = CapabilityMatcher::new();

        let mut state = SelectionState::default();
        let mut ai = StepSelection::new(WizardStep::AiFeatures);
        ai.items = vec!["ai-chatbot".into()];
        state.set(WizardStep::AiFeatures, ai);
        assert!(matcher.summarize(&state).ai);

        let mut state = SelectionState::default();
        let mut automation = StepSelection::new(WizardStep::Automation);
        automation.cost = dec!(200);
        state.set(WizardStep::Automation, automation);
        assert!(matcher.summarize(&state).automation);

        let mut state = SelectionState::default();
        let mut store = StepSelection::new(WizardStep::Store);
        store.id = Some("store".into());
        state.set(WizardStep::Store, store);
        assert!(matcher.summarize(&state).store);
    }

    #[test]
    fn negative_values_do_not_count() {
        let matcher = CapabilityMatcher::new();
        let mut state = SelectionState::default();
        state.set(
            WizardStep::Backend,
            StepSelection::with_value(WizardStep::Backend, "No"),
        );
        assert!(!matcher.summarize(&state).backend);
    }
}
