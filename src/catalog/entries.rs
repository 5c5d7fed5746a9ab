//! Static priced-option tables.
//!
//! Every lookup helper returns `Decimal::ZERO` (or `None`) for an unknown
//! id so that catalog changes never break previously persisted selections.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::wizard::WebsiteType;

/// A single priced option in the catalog.
#[derive(Debug, Clone, Copy)]
pub struct CatalogEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub cost: Decimal,
    /// Charged per month rather than once.
    pub recurring: bool,
}

/// An add-on with a one-time / monthly payment toggle.
///
/// Either price may be absent; the payment mode chosen at selection time
/// is sticky per add-on (see the reconciler).
#[derive(Debug, Clone, Copy)]
pub struct AddonEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub monthly: Option<Decimal>,
    pub one_time: Option<Decimal>,
    /// Defaults to monthly billing when no mode is supplied.
    pub recurring_by_nature: bool,
}

/// A promo code with its one-time discount percentage.
#[derive(Debug, Clone, Copy)]
pub struct PromoCode {
    pub code: &'static str,
    pub discount_percent: Decimal,
}

// ── Sections ────────────────────────────────────────────────────────

/// Section ids included in every website at no charge.
pub const DEFAULT_SECTIONS: &[&str] = &["hero", "contact"];

pub static SECTIONS: &[CatalogEntry] = &[
    CatalogEntry { id: "hero", name: "Hero", cost: dec!(0), recurring: false },
    CatalogEntry { id: "contact", name: "Contact", cost: dec!(0), recurring: false },
    CatalogEntry { id: "about", name: "About", cost: dec!(100), recurring: false },
    CatalogEntry { id: "services", name: "Services", cost: dec!(150), recurring: false },
    CatalogEntry { id: "gallery", name: "Gallery", cost: dec!(125), recurring: false },
    CatalogEntry { id: "testimonials", name: "Testimonials", cost: dec!(100), recurring: false },
    CatalogEntry { id: "team", name: "Team", cost: dec!(125), recurring: false },
    CatalogEntry { id: "pricing", name: "Pricing", cost: dec!(150), recurring: false },
    CatalogEntry { id: "faq", name: "FAQ", cost: dec!(100), recurring: false },
    CatalogEntry { id: "blog", name: "Blog", cost: dec!(200), recurring: false },
    CatalogEntry { id: "portfolio", name: "Portfolio", cost: dec!(175), recurring: false },
    CatalogEntry { id: "features", name: "Features", cost: dec!(125), recurring: false },
    CatalogEntry { id: "stats", name: "Stats", cost: dec!(100), recurring: false },
    CatalogEntry { id: "cta", name: "Call to Action", cost: dec!(75), recurring: false },
];

// ── Backend options ─────────────────────────────────────────────────

pub static BACKEND_OPTIONS: &[CatalogEntry] = &[
    CatalogEntry { id: "basic-auth", name: "Basic Authentication", cost: dec!(250), recurring: false },
    CatalogEntry { id: "user-accounts", name: "User Accounts", cost: dec!(400), recurring: false },
    CatalogEntry { id: "admin-dashboard", name: "Admin Dashboard", cost: dec!(500), recurring: false },
    CatalogEntry { id: "database", name: "Database Integration", cost: dec!(350), recurring: false },
    CatalogEntry { id: "api-integration", name: "API Integration", cost: dec!(450), recurring: false },
    CatalogEntry { id: "cms", name: "Content Management", cost: dec!(400), recurring: false },
    CatalogEntry { id: "search", name: "Site Search", cost: dec!(300), recurring: false },
    CatalogEntry { id: "file-uploads", name: "File Uploads", cost: dec!(250), recurring: false },
];

// ── AI features ─────────────────────────────────────────────────────

pub static AI_FEATURES: &[CatalogEntry] = &[
    CatalogEntry { id: "ai-chatbot", name: "AI Chatbot", cost: dec!(250), recurring: false },
    CatalogEntry { id: "ai-search", name: "AI Search", cost: dec!(300), recurring: false },
    CatalogEntry { id: "ai-recommendations", name: "AI Recommendations", cost: dec!(350), recurring: false },
    CatalogEntry { id: "ai-content", name: "AI Content Generation", cost: dec!(400), recurring: false },
    CatalogEntry { id: "ai-analytics", name: "AI Analytics", cost: dec!(300), recurring: false },
    CatalogEntry { id: "ai-translation", name: "AI Translation", cost: dec!(250), recurring: false },
];

// ── Automation features ─────────────────────────────────────────────

pub static AUTOMATION_FEATURES: &[CatalogEntry] = &[
    CatalogEntry { id: "email-automation", name: "Email Automation", cost: dec!(200), recurring: false },
    CatalogEntry { id: "form-automation", name: "Form Automation", cost: dec!(150), recurring: false },
    CatalogEntry { id: "workflow-automation", name: "Workflow Automation", cost: dec!(300), recurring: false },
    CatalogEntry { id: "crm-sync", name: "CRM Sync", cost: dec!(350), recurring: false },
    CatalogEntry { id: "social-scheduler", name: "Social Media Scheduler", cost: dec!(200), recurring: false },
    CatalogEntry { id: "report-automation", name: "Automated Reports", cost: dec!(250), recurring: false },
];

// ── Store ───────────────────────────────────────────────────────────

/// Store option ids covered by the flat base price.
pub const DEFAULT_STORE_OPTIONS: &[&str] =
    &["basic-products", "shopping-cart", "payment-processing"];

/// Flat store base price while a budget bundle is active.
pub const STORE_BASE_BUDGET: Decimal = dec!(200);

/// Flat store base price for à-la-carte selection or a bundle upsell.
pub const STORE_BASE_REGULAR: Decimal = dec!(450);

/// Flat monthly surcharge for running the store backend. Added exactly
/// once by the aggregator whenever a chargeable store selection is active.
pub const STORE_BACKEND_MONTHLY: Decimal = dec!(35);

pub static STORE_OPTIONS: &[CatalogEntry] = &[
    CatalogEntry { id: "basic-products", name: "Product Listings", cost: dec!(0), recurring: false },
    CatalogEntry { id: "shopping-cart", name: "Shopping Cart", cost: dec!(0), recurring: false },
    CatalogEntry { id: "payment-processing", name: "Payment Processing", cost: dec!(0), recurring: false },
    CatalogEntry { id: "product-reviews", name: "Product Reviews", cost: dec!(150), recurring: false },
    CatalogEntry { id: "wishlist", name: "Wishlist", cost: dec!(100), recurring: false },
    CatalogEntry { id: "discount-codes", name: "Discount Codes", cost: dec!(125), recurring: false },
    CatalogEntry { id: "inventory-management", name: "Inventory Management", cost: dec!(250), recurring: false },
    CatalogEntry { id: "subscriptions", name: "Subscription Products", cost: dec!(300), recurring: false },
    CatalogEntry { id: "multi-currency", name: "Multi-Currency", cost: dec!(200), recurring: false },
    CatalogEntry { id: "shipping-calculator", name: "Shipping Calculator", cost: dec!(150), recurring: false },
];

// ── Add-ons ─────────────────────────────────────────────────────────

pub static ADDONS: &[AddonEntry] = &[
    AddonEntry {
        id: "seo-package",
        name: "SEO Package",
        monthly: Some(dec!(199)),
        one_time: Some(dec!(599)),
        recurring_by_nature: true,
    },
    AddonEntry {
        id: "security-package",
        name: "Security Package",
        monthly: Some(dec!(59)),
        one_time: Some(dec!(179)),
        recurring_by_nature: false,
    },
    AddonEntry {
        id: "logo-design",
        name: "Logo Design",
        monthly: None,
        one_time: Some(dec!(450)),
        recurring_by_nature: false,
    },
    AddonEntry {
        id: "content-updates",
        name: "Content Updates",
        monthly: Some(dec!(99)),
        one_time: None,
        recurring_by_nature: true,
    },
    AddonEntry {
        id: "analytics-setup",
        name: "Analytics Setup",
        monthly: None,
        one_time: Some(dec!(149)),
        recurring_by_nature: false,
    },
    AddonEntry {
        id: "social-media-integration",
        name: "Social Media Integration",
        monthly: Some(dec!(49)),
        one_time: Some(dec!(199)),
        recurring_by_nature: false,
    },
    AddonEntry {
        id: "email-marketing",
        name: "Email Marketing",
        monthly: Some(dec!(89)),
        one_time: Some(dec!(299)),
        recurring_by_nature: true,
    },
    AddonEntry {
        id: "copywriting",
        name: "Copywriting",
        monthly: None,
        one_time: Some(dec!(349)),
        recurring_by_nature: false,
    },
];

// ── Hosting / maintenance tiers ─────────────────────────────────────

pub static HOSTING_TIERS: &[CatalogEntry] = &[
    CatalogEntry { id: "basic-hosting", name: "Basic Hosting", cost: dec!(25), recurring: true },
    CatalogEntry { id: "pro-hosting", name: "Pro Hosting", cost: dec!(50), recurring: true },
    CatalogEntry { id: "business-hosting", name: "Business Hosting", cost: dec!(100), recurring: true },
];

pub static MAINTENANCE_TIERS: &[CatalogEntry] = &[
    CatalogEntry { id: "basic-maintenance", name: "Basic Maintenance", cost: dec!(75), recurring: true },
    CatalogEntry { id: "standard-maintenance", name: "Standard Maintenance", cost: dec!(150), recurring: true },
    CatalogEntry { id: "premium-maintenance", name: "Premium Maintenance", cost: dec!(300), recurring: true },
];

/// Maintenance values that clear the selection instead of pricing a tier.
pub const NO_MAINTENANCE: &[&str] = &["no-maintenance", "none"];

// ── Category base prices ────────────────────────────────────────────

/// Base development price for a category/subcategory pair, per website type.
#[derive(Debug, Clone, Copy)]
pub struct CategoryPrice {
    pub category: &'static str,
    pub subcategory: &'static str,
    pub single: Decimal,
    pub multi: Decimal,
}

pub static CATEGORY_PRICES: &[CategoryPrice] = &[
    CategoryPrice { category: "business", subcategory: "company-profile", single: dec!(600), multi: dec!(900) },
    CategoryPrice { category: "business", subcategory: "startup", single: dec!(650), multi: dec!(950) },
    CategoryPrice { category: "business", subcategory: "consulting", single: dec!(600), multi: dec!(900) },
    CategoryPrice { category: "portfolio", subcategory: "personal", single: dec!(450), multi: dec!(700) },
    CategoryPrice { category: "portfolio", subcategory: "creative", single: dec!(500), multi: dec!(750) },
    CategoryPrice { category: "ecommerce", subcategory: "retail", single: dec!(800), multi: dec!(1200) },
    CategoryPrice { category: "ecommerce", subcategory: "digital-goods", single: dec!(750), multi: dec!(1100) },
    CategoryPrice { category: "blog", subcategory: "personal-blog", single: dec!(400), multi: dec!(650) },
    CategoryPrice { category: "blog", subcategory: "magazine", single: dec!(550), multi: dec!(850) },
    CategoryPrice { category: "landing", subcategory: "product-launch", single: dec!(350), multi: dec!(550) },
    CategoryPrice { category: "landing", subcategory: "event", single: dec!(350), multi: dec!(550) },
];

/// Category assumed when a subcategory is supplied without one.
pub const DEFAULT_CATEGORY: &str = "business";

// ── Promo codes ─────────────────────────────────────────────────────

pub static PROMO_CODES: &[PromoCode] = &[
    PromoCode { code: "WELCOME10", discount_percent: dec!(10) },
    PromoCode { code: "LAUNCH15", discount_percent: dec!(15) },
    PromoCode { code: "PARTNER20", discount_percent: dec!(20) },
];

// ── Lookup helpers ──────────────────────────────────────────────────

fn find(table: &'static [CatalogEntry], id: &str) -> Option<&'static CatalogEntry> {
    table.iter().find(|e| e.id == id)
}

fn cost_of(table: &'static [CatalogEntry], id: &str) -> Decimal {
    find(table, id).map(|e| e.cost).unwrap_or(Decimal::ZERO)
}

pub fn section_cost(id: &str) -> Decimal {
    cost_of(SECTIONS, id)
}

pub fn backend_option_cost(id: &str) -> Decimal {
    cost_of(BACKEND_OPTIONS, id)
}

pub fn ai_feature_cost(id: &str) -> Decimal {
    cost_of(AI_FEATURES, id)
}

pub fn automation_feature_cost(id: &str) -> Decimal {
    cost_of(AUTOMATION_FEATURES, id)
}

pub fn store_option_cost(id: &str) -> Decimal {
    cost_of(STORE_OPTIONS, id)
}

pub fn addon(id: &str) -> Option<&'static AddonEntry> {
    ADDONS.iter().find(|a| a.id == id)
}

pub fn hosting_monthly(id: &str) -> Decimal {
    cost_of(HOSTING_TIERS, id)
}

pub fn maintenance_monthly(id: &str) -> Decimal {
    cost_of(MAINTENANCE_TIERS, id)
}

/// Whether a maintenance value means "no maintenance".
pub fn is_no_maintenance(value: &str) -> bool {
    NO_MAINTENANCE.iter().any(|v| value.eq_ignore_ascii_case(v))
}

pub fn is_default_section(id: &str) -> bool {
    DEFAULT_SECTIONS.contains(&id)
}

pub fn is_default_store_option(id: &str) -> bool {
    DEFAULT_STORE_OPTIONS.contains(&id)
}

/// Base development price for a category/subcategory pair.
///
/// The category falls back to [`DEFAULT_CATEGORY`] when empty; an unknown
/// pair prices at zero.
pub fn subcategory_price(category: &str, subcategory: &str, website_type: WebsiteType) -> Decimal {
    let category = if category.is_empty() { DEFAULT_CATEGORY } else { category };
    CATEGORY_PRICES
        .iter()
        .find(|p| p.category == category && p.subcategory == subcategory)
        .map(|p| match website_type {
            WebsiteType::Single => p.single,
            WebsiteType::Multi => p.multi,
        })
        .unwrap_or(Decimal::ZERO)
}

/// Look up a promo code case-insensitively.
pub fn promo(code: &str) -> Option<&'static PromoCode> {
    PROMO_CODES.iter().find(|p| p.code.eq_ignore_ascii_case(code))
}
