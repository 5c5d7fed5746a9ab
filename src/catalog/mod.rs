//! Static catalog — priced option tables and bundle resolution.

pub mod bundles;
pub mod entries;

pub use bundles::{resolve_bundle, BundleDef, BundleFamily, ResolvedBundle, BUNDLES};
pub use entries::{
    addon, ai_feature_cost, automation_feature_cost, backend_option_cost, hosting_monthly,
    is_default_section, is_default_store_option, is_no_maintenance, maintenance_monthly, promo,
    section_cost, store_option_cost, subcategory_price, AddonEntry, CatalogEntry, PromoCode,
    ADDONS, AI_FEATURES, AUTOMATION_FEATURES, BACKEND_OPTIONS, CATEGORY_PRICES, DEFAULT_CATEGORY,
    DEFAULT_SECTIONS, DEFAULT_STORE_OPTIONS, HOSTING_TIERS, MAINTENANCE_TIERS, PROMO_CODES,
    SECTIONS, STORE_BACKEND_MONTHLY, STORE_BASE_BUDGET, STORE_BASE_REGULAR, STORE_OPTIONS,
};
