//! Incoming wizard parameters and the `bp_*` bundle-parameter codec.

use serde::{Deserialize, Serialize};

/// Single-page vs multi-page website.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WebsiteType {
    #[default]
    Single,
    Multi,
}

impl WebsiteType {
    /// Parse a website-type value, defaulting to `Single` for anything
    /// missing or unrecognized.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "multi" | "multi-page" | "multipage" => Self::Multi,
            _ => Self::Single,
        }
    }

    /// Bundle-id suffix for this website type.
    pub fn bundle_suffix(&self) -> &'static str {
        match self {
            Self::Single => "-sp",
            Self::Multi => "-mp",
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Single => "single",
            Self::Multi => "multi",
        }
    }
}

/// Payment mode for an add-on, chosen at selection time and sticky per
/// add-on thereafter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayMode {
    Monthly,
    Onetime,
}

impl PayMode {
    /// Parse a payment-mode toggle value. `None` for anything that is not
    /// an explicit mode (e.g. "all"/custom) — the add-on's natural default
    /// applies in that case.
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "monthly" => Some(Self::Monthly),
            "onetime" | "one-time" => Some(Self::Onetime),
            _ => None,
        }
    }
}

/// Parameters supplied by a wizard page for one reconciliation pass.
///
/// `None` means the parameter was absent (the saved selection persists);
/// `Some(vec![])` is an explicit clear.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomingParams {
    pub website_type: Option<String>,
    pub category: Option<String>,
    pub subcategory: Option<String>,
    /// "yes"/"no" gate for the backend step.
    pub backend: Option<String>,
    pub backend_options: Option<Vec<String>>,
    pub ai_features: Option<Vec<String>>,
    pub automation_features: Option<Vec<String>>,
    /// "yes"/"no" gate for the store step.
    pub store: Option<String>,
    pub store_options: Option<Vec<String>>,
    /// Store selected as an upsell on top of a bundle.
    pub store_addon: bool,
    pub sections: Option<Vec<String>>,
    pub addons: Option<Vec<String>>,
    /// Wizard-wide payment-mode toggle; applies only to newly selected
    /// add-ons.
    pub pay_mode: Option<PayMode>,
    pub hosting: Option<String>,
    pub maintenance: Option<String>,
    pub promo_code: Option<String>,
    /// Bundle inclusions propagated across steps as `bp_*` parameters.
    pub bundle_params: BundleParams,
}

/// The fixed `bp_*` key set, in serialization order.
const BP_KEYS: &[&str] = &[
    "bp_sections",
    "bp_addons",
    "bp_store",
    "bp_storeOptions",
    "bp_backend",
    "bp_backendOptions",
    "bp_aiFeatures",
    "bp_automation",
    "bp_automationFeatures",
    "bp_hosting",
    "bp_maintenance",
];

/// Bundle inclusions carried across step navigations as a query-string
/// fragment of `bp_*` key/value pairs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BundleParams {
    pub sections: Vec<String>,
    pub addons: Vec<String>,
    pub store: bool,
    pub store_options: Vec<String>,
    pub backend: bool,
    pub backend_options: Vec<String>,
    pub ai_features: Vec<String>,
    pub automation: bool,
    pub automation_features: Vec<String>,
    pub hosting: Option<String>,
    pub maintenance: Option<String>,
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn is_truthy(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "yes" | "1")
}

impl BundleParams {
    /// Parse a `bp_*` query-string fragment. Unknown keys are ignored.
    pub fn parse(query: &str) -> Self {
        let mut params = Self::default();
        for pair in query.split('&') {
            let (key, value) = match pair.split_once('=') {
                Some((k, v)) => (k.trim(), v.trim()),
                None => continue,
            };
            match key {
                "bp_sections" => params.sections = split_list(value),
                "bp_addons" => params.addons = split_list(value),
                "bp_store" => params.store = is_truthy(value),
                "bp_storeOptions" => params.store_options = split_list(value),
                "bp_backend" => params.backend = is_truthy(value),
                "bp_backendOptions" => params.backend_options = split_list(value),
                "bp_aiFeatures" => params.ai_features = split_list(value),
                "bp_automation" => params.automation = is_truthy(value),
                "bp_automationFeatures" => params.automation_features = split_list(value),
                "bp_hosting" if !value.is_empty() => params.hosting = Some(value.to_string()),
                "bp_maintenance" if !value.is_empty() => {
                    params.maintenance = Some(value.to_string());
                }
                _ => {}
            }
        }
        params
    }

    /// Serialize back to the exact `bp_*` key set, every key present, in
    /// fixed order.
    pub fn to_query(&self) -> String {
        let join = |items: &[String]| items.join(",");
        let values: [String; 11] = [
            join(&self.sections),
            join(&self.addons),
            self.store.to_string(),
            join(&self.store_options),
            self.backend.to_string(),
            join(&self.backend_options),
            join(&self.ai_features),
            self.automation.to_string(),
            join(&self.automation_features),
            self.hosting.clone().unwrap_or_default(),
            self.maintenance.clone().unwrap_or_default(),
        ];
        BP_KEYS
            .iter()
            .zip(values.iter())
            .map(|(k, v)| format!("{k}={v}"))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Whether no bundle parameter carries any signal.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn website_type_parse_defaults_to_single() {
        assert_eq!(WebsiteType::parse("multi"), WebsiteType::Multi);
        assert_eq!(WebsiteType::parse("Multi-Page"), WebsiteType::Multi);
        assert_eq!(WebsiteType::parse("single"), WebsiteType::Single);
        assert_eq!(WebsiteType::parse(""), WebsiteType::Single);
        assert_eq!(WebsiteType::parse("garbage"), WebsiteType::Single);
    }

    #[test]
    fn pay_mode_parse() {
        assert_eq!(PayMode::parse("monthly"), Some(PayMode::Monthly));
        assert_eq!(PayMode::parse("one-time"), Some(PayMode::Onetime));
        assert_eq!(PayMode::parse("ONETIME"), Some(PayMode::Onetime));
        assert_eq!(PayMode::parse("all"), None);
        assert_eq!(PayMode::parse(""), None);
    }

    #[test]
    fn bundle_params_parse() {
        let params = BundleParams::parse(
            "bp_sections=hero,about,contact&bp_backend=true&bp_backendOptions=basic-auth&\
             bp_store=false&bp_hosting=basic-hosting&bp_ignored=x",
        );
        assert_eq!(params.sections, vec!["hero", "about", "contact"]);
        assert!(params.backend);
        assert_eq!(params.backend_options, vec!["basic-auth"]);
        assert!(!params.store);
        assert_eq!(params.hosting.as_deref(), Some("basic-hosting"));
        assert!(params.maintenance.is_none());
    }

    #[test]
    fn to_query_emits_the_exact_key_set() {
        let query = BundleParams::default().to_query();
        for key in BP_KEYS {
            assert!(query.contains(&format!("{key}=")), "missing {key}");
        }
        assert_eq!(query.matches('&').count(), BP_KEYS.len() - 1);
    }

    #[test]
    fn query_round_trip() {
        let params = BundleParams {
            sections: vec!["hero".into(), "faq".into()],
            addons: vec!["seo-package".into()],
            store: true,
            store_options: vec!["wishlist".into()],
            backend: true,
            backend_options: vec!["basic-auth".into(), "cms".into()],
            ai_features: vec!["ai-chatbot".into()],
            automation: false,
            automation_features: vec![],
            hosting: Some("basic-hosting".into()),
            maintenance: None,
        };
        let parsed = BundleParams::parse(&params.to_query());
        assert_eq!(parsed, params);
    }

    #[test]
    fn empty_lists_survive_round_trip() {
        let parsed = BundleParams::parse(&BundleParams::default().to_query());
        assert!(parsed.is_empty());
    }
}
