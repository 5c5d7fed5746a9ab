//! Wizard step identifiers.

use serde::{Deserialize, Serialize};

/// One screen in the wizard, each corresponding to one category of choice.
///
/// Step numbers (1–14) order the quote summary; the string key names the
/// step's record in the persisted selection blob.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum WizardStep {
    WebsiteType,
    Category,
    Subcategory,
    Bundle,
    Backend,
    BackendOptions,
    AiFeatures,
    Automation,
    Store,
    Sections,
    Addons,
    Hosting,
    Maintenance,
    Summary,
}

/// All steps in wizard order.
pub const ALL_STEPS: &[WizardStep] = &[
    WizardStep::WebsiteType,
    WizardStep::Category,
    WizardStep::Subcategory,
    WizardStep::Bundle,
    WizardStep::Backend,
    WizardStep::BackendOptions,
    WizardStep::AiFeatures,
    WizardStep::Automation,
    WizardStep::Store,
    WizardStep::Sections,
    WizardStep::Addons,
    WizardStep::Hosting,
    WizardStep::Maintenance,
    WizardStep::Summary,
];

impl WizardStep {
    /// 1-based step number used for summary ordering.
    pub fn number(&self) -> u8 {
        match self {
            Self::WebsiteType => 1,
            Self::Category => 2,
            Self::Subcategory => 3,
            Self::Bundle => 4,
            Self::Backend => 5,
            Self::BackendOptions => 6,
            Self::AiFeatures => 7,
            Self::Automation => 8,
            Self::Store => 9,
            Self::Sections => 10,
            Self::Addons => 11,
            Self::Hosting => 12,
            Self::Maintenance => 13,
            Self::Summary => 14,
        }
    }

    /// Key of this step's record in the persisted selection blob.
    pub fn key(&self) -> &'static str {
        match self {
            Self::WebsiteType => "websiteType",
            Self::Category => "category",
            Self::Subcategory => "subcategory",
            Self::Bundle => "bundle",
            Self::Backend => "backend",
            Self::BackendOptions => "backendOptions",
            Self::AiFeatures => "aiFeatures",
            Self::Automation => "automation",
            Self::Store => "store",
            Self::Sections => "sections",
            Self::Addons => "addons",
            Self::Hosting => "hosting",
            Self::Maintenance => "maintenance",
            Self::Summary => "summary",
        }
    }

    /// Human-readable step name for quote display.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::WebsiteType => "Website Type",
            Self::Category => "Category",
            Self::Subcategory => "Subcategory",
            Self::Bundle => "Bundle",
            Self::Backend => "Backend",
            Self::BackendOptions => "Backend Options",
            Self::AiFeatures => "AI Features",
            Self::Automation => "Automation",
            Self::Store => "Online Store",
            Self::Sections => "Sections",
            Self::Addons => "Add-ons",
            Self::Hosting => "Hosting",
            Self::Maintenance => "Maintenance",
            Self::Summary => "Summary",
        }
    }

    /// Parse a persisted step key back into a step.
    pub fn from_key(key: &str) -> Option<Self> {
        ALL_STEPS.iter().copied().find(|s| s.key() == key)
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.key())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_are_sequential() {
        for (i, step) in ALL_STEPS.iter().enumerate() {
            assert_eq!(step.number() as usize, i + 1);
        }
    }

    #[test]
    fn keys_round_trip() {
        for step in ALL_STEPS {
            assert_eq!(WizardStep::from_key(step.key()), Some(*step));
        }
        assert!(WizardStep::from_key("nope").is_none());
    }

    #[test]
    fn display_matches_key() {
        assert_eq!(format!("{}", WizardStep::BackendOptions), "backendOptions");
        assert_eq!(format!("{}", WizardStep::WebsiteType), "websiteType");
    }
}
