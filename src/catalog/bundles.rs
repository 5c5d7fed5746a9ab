//! Bundle definitions and the bundle resolver.
//!
//! Two families: budget bundles (one flat price covering nearly every
//! capability) and regular bundles (priced per website type via `-sp` /
//! `-mp` variants, including mostly a fixed section list).

use std::collections::BTreeSet;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use tracing::debug;

use crate::wizard::{BundleParams, WebsiteType};

/// Pricing family of a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BundleFamily {
    /// One flat fee covering nearly everything; billed as a lump sum.
    Budget,
    /// Priced per website type; included items are mostly a section list.
    Regular,
}

/// A static bundle row.
#[derive(Debug, Clone, Copy)]
pub struct BundleDef {
    pub id: &'static str,
    pub family: BundleFamily,
    pub price: Decimal,
    pub sections: &'static [&'static str],
    pub addons: &'static [&'static str],
    pub backend_options: &'static [&'static str],
    pub ai_features: &'static [&'static str],
    pub automation_features: &'static [&'static str],
    /// Coarse flag: the whole backend-options category is covered.
    pub includes_backend: bool,
    /// The store (with its default options) is covered.
    pub includes_store: bool,
    pub store_options: &'static [&'static str],
    pub hosting: Option<&'static str>,
    pub maintenance: Option<&'static str>,
}

pub static BUNDLES: &[BundleDef] = &[
    // ── Budget family ───────────────────────────────────────────────
    BundleDef {
        id: "budget-essential",
        family: BundleFamily::Budget,
        price: dec!(999),
        sections: &["hero", "about", "services", "contact"],
        addons: &[],
        backend_options: &["basic-auth"],
        ai_features: &[],
        automation_features: &[],
        includes_backend: true,
        includes_store: false,
        store_options: &[],
        hosting: Some("basic-hosting"),
        maintenance: None,
    },
    BundleDef {
        id: "budget-complete",
        family: BundleFamily::Budget,
        price: dec!(1499),
        sections: &["hero", "about", "services", "gallery", "contact"],
        addons: &["analytics-setup"],
        backend_options: &["basic-auth", "database"],
        ai_features: &["ai-chatbot"],
        automation_features: &["email-automation"],
        includes_backend: true,
        includes_store: true,
        store_options: &["basic-products", "shopping-cart", "payment-processing"],
        hosting: Some("basic-hosting"),
        maintenance: Some("basic-maintenance"),
    },
    // ── Regular family ──────────────────────────────────────────────
    BundleDef {
        id: "starter-sp",
        family: BundleFamily::Regular,
        price: dec!(899),
        sections: &["hero", "about", "contact"],
        addons: &[],
        backend_options: &[],
        ai_features: &[],
        automation_features: &[],
        includes_backend: false,
        includes_store: false,
        store_options: &[],
        hosting: None,
        maintenance: None,
    },
    BundleDef {
        id: "starter-mp",
        family: BundleFamily::Regular,
        price: dec!(1299),
        sections: &["hero", "about", "services", "contact"],
        addons: &[],
        backend_options: &[],
        ai_features: &[],
        automation_features: &[],
        includes_backend: false,
        includes_store: false,
        store_options: &[],
        hosting: None,
        maintenance: None,
    },
    BundleDef {
        id: "business-sp",
        family: BundleFamily::Regular,
        price: dec!(1399),
        sections: &["hero", "about", "services", "testimonials", "contact"],
        addons: &[],
        backend_options: &["basic-auth"],
        ai_features: &[],
        automation_features: &[],
        includes_backend: false,
        includes_store: false,
        store_options: &[],
        hosting: None,
        maintenance: None,
    },
    BundleDef {
        id: "business-mp",
        family: BundleFamily::Regular,
        price: dec!(1899),
        sections: &["hero", "about", "services", "gallery", "team", "testimonials", "contact"],
        addons: &[],
        backend_options: &["basic-auth"],
        ai_features: &[],
        automation_features: &[],
        includes_backend: false,
        includes_store: false,
        store_options: &[],
        hosting: None,
        maintenance: None,
    },
    BundleDef {
        id: "premium-sp",
        family: BundleFamily::Regular,
        price: dec!(1999),
        sections: &["hero", "about", "services", "gallery", "testimonials", "pricing", "contact"],
        addons: &["analytics-setup"],
        backend_options: &["basic-auth", "cms"],
        ai_features: &[],
        automation_features: &[],
        includes_backend: false,
        includes_store: false,
        store_options: &[],
        hosting: Some("basic-hosting"),
        maintenance: None,
    },
    BundleDef {
        id: "premium-mp",
        family: BundleFamily::Regular,
        price: dec!(2699),
        sections: &[
            "hero", "about", "services", "gallery", "team", "testimonials", "pricing", "faq",
            "contact",
        ],
        addons: &["analytics-setup"],
        backend_options: &["basic-auth", "cms"],
        ai_features: &["ai-chatbot"],
        automation_features: &[],
        includes_backend: false,
        includes_store: false,
        store_options: &[],
        hosting: Some("basic-hosting"),
        maintenance: None,
    },
];

/// A bundle resolved for a concrete website type, with its inclusion sets
/// materialized (and possibly widened by propagated `bp_*` parameters).
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedBundle {
    /// Canonical id after suffix resolution (e.g. `starter-mp`).
    pub id: String,
    pub family: BundleFamily,
    pub price: Decimal,
    pub includes_backend: bool,
    pub includes_store: bool,
    pub sections: BTreeSet<String>,
    pub addons: BTreeSet<String>,
    pub backend_options: BTreeSet<String>,
    pub ai_features: BTreeSet<String>,
    pub automation_features: BTreeSet<String>,
    pub store_options: BTreeSet<String>,
    pub hosting: Option<String>,
    pub maintenance: Option<String>,
}

impl ResolvedBundle {
    fn from_def(def: &BundleDef) -> Self {
        let to_set = |ids: &[&str]| ids.iter().map(|s| s.to_string()).collect::<BTreeSet<_>>();
        Self {
            id: def.id.to_string(),
            family: def.family,
            price: def.price,
            includes_backend: def.includes_backend,
            includes_store: def.includes_store,
            sections: to_set(def.sections),
            addons: to_set(def.addons),
            backend_options: to_set(def.backend_options),
            ai_features: to_set(def.ai_features),
            automation_features: to_set(def.automation_features),
            store_options: to_set(def.store_options),
            hosting: def.hosting.map(String::from),
            maintenance: def.maintenance.map(String::from),
        }
    }

    /// A resolved bundle for an id the catalog does not know: price zero,
    /// empty inclusion sets. Selecting it charges and grants nothing.
    fn unknown(id: &str) -> Self {
        Self {
            id: id.to_string(),
            family: BundleFamily::Regular,
            price: Decimal::ZERO,
            includes_backend: false,
            includes_store: false,
            sections: BTreeSet::new(),
            addons: BTreeSet::new(),
            backend_options: BTreeSet::new(),
            ai_features: BTreeSet::new(),
            automation_features: BTreeSet::new(),
            store_options: BTreeSet::new(),
            hosting: None,
            maintenance: None,
        }
    }

    /// Whether this bundle grants nothing and costs nothing — the
    /// resolution of an unknown id with no propagated inclusions. Such a
    /// bundle never counts as active.
    pub fn is_vacuous(&self) -> bool {
        self.price == Decimal::ZERO
            && !self.includes_backend
            && !self.includes_store
            && self.sections.is_empty()
            && self.addons.is_empty()
            && self.backend_options.is_empty()
            && self.ai_features.is_empty()
            && self.automation_features.is_empty()
            && self.store_options.is_empty()
            && self.hosting.is_none()
            && self.maintenance.is_none()
    }

    /// Widen the inclusion sets with propagated `bp_*` parameters.
    ///
    /// An explicit non-empty `bp_sections` list is authoritative and
    /// replaces the per-bundle section table; every other list or flag
    /// unions into what the table declared.
    pub fn apply_params(&mut self, params: &BundleParams) {
        if !params.sections.is_empty() {
            self.sections = params.sections.iter().cloned().collect();
        }
        self.addons.extend(params.addons.iter().cloned());
        self.backend_options.extend(params.backend_options.iter().cloned());
        self.ai_features.extend(params.ai_features.iter().cloned());
        self.automation_features.extend(params.automation_features.iter().cloned());
        self.store_options.extend(params.store_options.iter().cloned());
        if params.backend {
            self.includes_backend = true;
        }
        if params.store {
            self.includes_store = true;
        }
        if let Some(ref hosting) = params.hosting {
            self.hosting = Some(hosting.clone());
        }
        if let Some(ref maintenance) = params.maintenance {
            self.maintenance = Some(maintenance.clone());
        }
    }
}

/// Resolve a bundle id for a website type.
///
/// Tries the exact id first, then the `-sp` / `-mp` variant matching the
/// website type. Returns `None` for an empty id (no bundle active); an
/// unknown non-empty id resolves to a zero-price empty bundle.
pub fn resolve_bundle(bundle_id: &str, website_type: WebsiteType) -> Option<ResolvedBundle> {
    if bundle_id.is_empty() {
        return None;
    }

    if let Some(def) = BUNDLES.iter().find(|b| b.id == bundle_id) {
        return Some(ResolvedBundle::from_def(def));
    }

    let suffixed = format!("{bundle_id}{}", website_type.bundle_suffix());
    if let Some(def) = BUNDLES.iter().find(|b| b.id == suffixed) {
        return Some(ResolvedBundle::from_def(def));
    }

    debug!(bundle_id, "Unknown bundle id, resolving as zero-price");
    Some(ResolvedBundle::unknown(bundle_id))
}
