//! The finalized quote handed to the delivery boundary.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Serialize;
use uuid::Uuid;

use crate::pricing;
use crate::wizard::{PromoState, SelectionState, StepSelection};

/// A finalized quote: identity, totals, and the ordered selections that
/// produced them. This is what the mailer formats and delivers.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub quote_id: Uuid,
    pub created_at: DateTime<Utc>,
    pub development_cost: Decimal,
    pub monthly_cost: Decimal,
    pub first_year_total: Decimal,
    pub selections: Vec<StepSelection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub promo: Option<PromoState>,
}

impl Quote {
    /// Build a quote from the current selection state. Totals are
    /// recomputed here, never read back from anything persisted.
    pub fn from_state(state: &SelectionState) -> Self {
        let totals = pricing::aggregate(state);
        Self {
            quote_id: Uuid::new_v4(),
            created_at: Utc::now(),
            development_cost: totals.one_time,
            monthly_cost: totals.monthly,
            first_year_total: totals.one_time + totals.monthly * dec!(12),
            selections: pricing::ordered_steps(state).into_iter().cloned().collect(),
            promo: state.promo.clone(),
        }
    }

    /// Short reference shown in email subjects, e.g. `Q-1A2B3C4D`.
    pub fn reference(&self) -> String {
        let id = self.quote_id.simple().to_string();
        format!("Q-{}", id[..8].to_ascii_uppercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pricing::reconcile;
    use crate::wizard::{IncomingParams, WebsiteType};

    fn quoted_state() -> SelectionState {
        let p = IncomingParams {
            category: Some("business".into()),
            subcategory: Some("company-profile".into()),
            hosting: Some("basic-hosting".into()),
            ..Default::default()
        };
        reconcile(&SelectionState::default(), &p, "", WebsiteType::Single)
    }

    #[test]
    fn quote_matches_aggregated_totals() {
        let state = quoted_state();
        let quote = Quote::from_state(&state);
        assert_eq!(quote.development_cost, dec!(600));
        assert_eq!(quote.monthly_cost, dec!(25));
        assert_eq!(quote.first_year_total, dec!(900));
    }

    #[test]
    fn selections_are_ordered() {
        let quote = Quote::from_state(&quoted_state());
        let numbers: Vec<u8> = quote.selections.iter().map(|s| s.step).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        assert_eq!(numbers, sorted);
    }

    #[test]
    fn reference_is_short_and_stable() {
        let quote = Quote::from_state(&quoted_state());
        let reference = quote.reference();
        assert!(reference.starts_with("Q-"));
        assert_eq!(reference.len(), 10);
        assert_eq!(reference, quote.reference());
    }
}
