//! Cost aggregation — one-time / monthly / yearly totals.
//!
//! Always recomputed from the full selection state; nothing here is ever
//! persisted or incremented in place.

use rust_decimal::{Decimal, RoundingStrategy};
use rust_decimal_macros::dec;
use serde::Serialize;

use crate::catalog::{self, BundleFamily};
use crate::wizard::{SelectionState, WizardStep};

/// Derived quote totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub one_time: Decimal,
    pub monthly: Decimal,
    /// Recurring cost over a year (`monthly × 12`).
    pub yearly: Decimal,
}

/// Family of the bundle recorded in the state, if any.
fn active_bundle_family(state: &SelectionState) -> Option<BundleFamily> {
    let record = state.get(WizardStep::Bundle)?;
    let id = record.id.as_deref().unwrap_or(&record.value);
    catalog::BUNDLES.iter().find(|b| b.id == id).map(|b| b.family)
}

/// The store-backend surcharge applies once whenever a chargeable store
/// selection is active.
fn store_surcharge(state: &SelectionState) -> Decimal {
    match state.get(WizardStep::Store) {
        Some(store) if !store.included_in_bundle => catalog::STORE_BACKEND_MONTHLY,
        _ => Decimal::ZERO,
    }
}

/// Aggregate the selection state into quote totals.
pub fn aggregate(state: &SelectionState) -> Totals {
    let (mut one_time, monthly) = match active_bundle_family(state) {
        Some(BundleFamily::Budget) => budget_totals(state),
        _ => itemized_totals(state),
    };

    if let Some(promo) = state.promo.as_ref().filter(|p| p.applied) {
        let factor = Decimal::ONE - promo.discount_percent / dec!(100);
        one_time = (one_time * factor)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    }

    Totals {
        one_time,
        monthly,
        yearly: monthly * dec!(12),
    }
}

/// Budget bundles bill one lump sum plus whatever falls outside the
/// bundle: extra add-ons and an upsold store. Monthly charges are the
/// hosting and maintenance tiers, add-on subscriptions, and the store
/// surcharge.
fn budget_totals(state: &SelectionState) -> (Decimal, Decimal) {
    let cost_of = |step: WizardStep| {
        state.get(step).map(|s| s.cost).unwrap_or(Decimal::ZERO)
    };
    let monthly_of = |step: WizardStep| {
        state
            .get(step)
            .map(|s| s.monthly_or_zero())
            .unwrap_or(Decimal::ZERO)
    };

    let one_time = cost_of(WizardStep::Bundle) + cost_of(WizardStep::Addons) + cost_of(WizardStep::Store);
    let monthly = monthly_of(WizardStep::Hosting)
        + monthly_of(WizardStep::Maintenance)
        + monthly_of(WizardStep::Addons)
        + store_surcharge(state);
    (one_time, monthly)
}

/// Regular bundles and à-la-carte selections sum every step's cost.
fn itemized_totals(state: &SelectionState) -> (Decimal, Decimal) {
    let one_time = state.records().map(|s| s.cost).sum();
    // The store record carries no monthly itself; the surcharge is added
    // here, exactly once.
    let monthly = state.records().map(|s| s.monthly_or_zero()).sum::<Decimal>()
        + store_surcharge(state);
    (one_time, monthly)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::reconcile;
    use crate::wizard::{IncomingParams, PayMode, WebsiteType};

    #[test]
    fn empty_state_totals_zero() {
        let totals = aggregate(&SelectionState::default());
        assert_eq!(totals.one_time, Decimal::ZERO);
        assert_eq!(totals.monthly, Decimal::ZERO);
        assert_eq!(totals.yearly, Decimal::ZERO);
    }

    #[test]
    fn itemized_sum_includes_every_step() {
        let p = IncomingParams {
            category: Some("business".into()),
            subcategory: Some("company-profile".into()),
            backend: Some("yes".into()),
            backend_options: Some(vec!["basic-auth".into()]),
            ai_features: Some(vec!["ai-chatbot".into()]),
            sections: Some(vec!["about".into(), "services".into()]),
            addons: Some(vec!["security-package".into()]),
            pay_mode: Some(PayMode::Onetime),
            ..Default::default()
        };
        let state = reconcile(&SelectionState::default(), &p, "", WebsiteType::Single);
        let totals = aggregate(&state);
        assert_eq!(totals.one_time, dec!(600) + dec!(250) + dec!(250) + dec!(250) + dec!(179));
        assert_eq!(totals.monthly, Decimal::ZERO);
    }

    #[test]
    fn surcharge_is_counted_exactly_once() {
        let p = IncomingParams {
            store: Some("yes".into()),
            ..Default::default()
        };
        let mut state = reconcile(&SelectionState::default(), &p, "", WebsiteType::Single);
        // Repeated reconciliations must not accumulate surcharge
        for _ in 0..3 {
            state = reconcile(&state, &p, "", WebsiteType::Single);
        }
        let totals = aggregate(&state);
        assert_eq!(totals.monthly, catalog::STORE_BACKEND_MONTHLY);
    }

    #[test]
    fn bundled_store_pays_no_surcharge() {
        let state = reconcile(
            &SelectionState::default(),
            &IncomingParams::default(),
            "budget-complete",
            WebsiteType::Single,
        );
        let totals = aggregate(&state);
        // basic-hosting 25 + basic-maintenance 75, no surcharge
        assert_eq!(totals.monthly, dec!(100));
    }

    #[test]
    fn budget_branch_charges_lump_sum_plus_extras() {
        let p = IncomingParams {
            category: Some("business".into()),
            subcategory: Some("company-profile".into()),
            addons: Some(vec!["logo-design".into()]),
            ..Default::default()
        };
        let state = reconcile(&SelectionState::default(), &p, "budget-essential", WebsiteType::Single);
        let totals = aggregate(&state);
        assert_eq!(totals.one_time, dec!(999) + dec!(450));
        assert_eq!(totals.monthly, dec!(25));
        assert_eq!(totals.yearly, dec!(300));
    }

    #[test]
    fn promo_discounts_one_time_only() {
        let p = IncomingParams {
            category: Some("business".into()),
            subcategory: Some("company-profile".into()),
            hosting: Some("basic-hosting".into()),
            promo_code: Some("WELCOME10".into()),
            ..Default::default()
        };
        let state = reconcile(&SelectionState::default(), &p, "", WebsiteType::Single);
        let totals = aggregate(&state);
        assert_eq!(totals.one_time, dec!(540));
        assert_eq!(totals.monthly, dec!(25));
    }

    #[test]
    fn promo_never_compounds() {
        let p = IncomingParams {
            category: Some("business".into()),
            subcategory: Some("company-profile".into()),
            promo_code: Some("WELCOME10".into()),
            ..Default::default()
        };
        let once = reconcile(&SelectionState::default(), &p, "", WebsiteType::Single);
        let twice = reconcile(&once, &p, "", WebsiteType::Single);
        assert_eq!(aggregate(&once).one_time, aggregate(&twice).one_time);
        assert_eq!(aggregate(&once).one_time, dec!(540));
    }

    #[test]
    fn discount_rounds_to_whole_currency() {
        let p = IncomingParams {
            category: Some("portfolio".into()),
            subcategory: Some("personal".into()),
            promo_code: Some("LAUNCH15".into()),
            ..Default::default()
        };
        let state = reconcile(&SelectionState::default(), &p, "", WebsiteType::Single);
        // 450 * 0.85 = 382.5 → 383
        assert_eq!(aggregate(&state).one_time, dec!(383));
    }
}
