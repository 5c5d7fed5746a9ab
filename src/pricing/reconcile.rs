//! Selection reconciliation.
//!
//! [`reconcile`] merges the previously saved state, the incoming page
//! parameters, and the active bundle's inclusions into a new state. It is
//! pure and idempotent: costs are always recomputed from the catalog, so
//! calling it repeatedly with the same inputs converges immediately.
//!
//! Precedence per category: a record locked by the still-active bundle,
//! then bundle-derived inclusions (forced, free, locked), then the
//! incoming parameter (defines the selection when present), then the
//! saved record (persists when no incoming signal; always supplies the
//! per-add-on payment modes). Deselecting the bundle removes every record
//! the bundle granted and leaves the rest untouched.

use std::collections::{BTreeMap, BTreeSet};

use rust_decimal::Decimal;
use tracing::debug;

use crate::catalog::{self, BundleFamily, ResolvedBundle};
use crate::wizard::{
    IncomingParams, PayMode, SelectionState, StepSelection, WebsiteType, WizardStep,
};

/// Produce a new selection state from the previous state, the incoming
/// parameters, and the active bundle id (empty = no bundle).
pub fn reconcile(
    prev: &SelectionState,
    params: &IncomingParams,
    bundle_id: &str,
    website_type: WebsiteType,
) -> SelectionState {
    let bundle = catalog::resolve_bundle(bundle_id, website_type)
        .map(|mut b| {
            b.apply_params(&params.bundle_params);
            b
        })
        .filter(|b| !b.is_vacuous());
    let bundle = bundle.as_ref();

    let mut next = SelectionState::default();

    resolve_website_type(&mut next, website_type);
    resolve_category(&mut next, prev, params);
    resolve_subcategory(&mut next, prev, params, bundle, website_type);
    resolve_bundle_step(&mut next, bundle, bundle_id);

    let backend_declined = resolve_backend_gate(&mut next, prev, params, bundle);
    for spec in item_categories() {
        if spec.step == WizardStep::BackendOptions && backend_declined {
            continue;
        }
        resolve_item_category(&mut next, prev, params, bundle, &spec);
    }

    resolve_store(&mut next, prev, params, bundle);
    resolve_addons(&mut next, prev, params, bundle);
    resolve_hosting(&mut next, prev, params, bundle);
    resolve_maintenance(&mut next, prev, params, bundle);
    resolve_promo(&mut next, prev, params);

    next
}

// ── Shared helpers ──────────────────────────────────────────────────

fn is_affirmative(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "yes" | "y" | "true" | "1"
    )
}

fn is_negative(value: &str) -> bool {
    matches!(
        value.trim().to_ascii_lowercase().as_str(),
        "no" | "n" | "false" | "0"
    )
}

/// The saved record for a step, minus records the now-inactive bundle
/// granted. Records with the lock flag survive only while a bundle is
/// active.
fn carried<'a>(
    prev: &'a SelectionState,
    step: WizardStep,
    bundle_active: bool,
) -> Option<&'a StepSelection> {
    let sel = prev.get(step)?;
    if sel.included_in_bundle && !bundle_active {
        debug!(step = %step, "Bundle deselected, removing bundle-granted record");
        return None;
    }
    Some(sel)
}

// ── Base steps ──────────────────────────────────────────────────────

fn resolve_website_type(next: &mut SelectionState, website_type: WebsiteType) {
    next.set(
        WizardStep::WebsiteType,
        StepSelection::with_value(WizardStep::WebsiteType, website_type.as_str()),
    );
}

fn resolve_category(next: &mut SelectionState, prev: &SelectionState, params: &IncomingParams) {
    let value = params
        .category
        .clone()
        .or_else(|| prev.get(WizardStep::Category).map(|s| s.value.clone()))
        .filter(|v| !v.is_empty());

    // A subcategory without a category falls back to the default.
    let subcategory_present = params.subcategory.is_some()
        || prev.get(WizardStep::Subcategory).is_some();
    let value = match value {
        Some(v) => v,
        None if subcategory_present => catalog::DEFAULT_CATEGORY.to_string(),
        None => return,
    };

    next.set(
        WizardStep::Category,
        StepSelection::with_value(WizardStep::Category, value),
    );
}

fn resolve_subcategory(
    next: &mut SelectionState,
    prev: &SelectionState,
    params: &IncomingParams,
    bundle: Option<&ResolvedBundle>,
    website_type: WebsiteType,
) {
    let id = params
        .subcategory
        .clone()
        .or_else(|| prev.get(WizardStep::Subcategory).map(|s| s.value.clone()))
        .filter(|v| !v.is_empty());
    let Some(id) = id else { return };

    let category = next
        .get(WizardStep::Category)
        .map(|s| s.value.clone())
        .unwrap_or_default();

    let mut sel = StepSelection::with_value(WizardStep::Subcategory, id.clone());
    sel.id = Some(id.clone());
    // The bundle price replaces the base development price.
    sel.cost = if bundle.is_some() {
        Decimal::ZERO
    } else {
        catalog::subcategory_price(&category, &id, website_type)
    };
    next.set(WizardStep::Subcategory, sel);
}

fn resolve_bundle_step(
    next: &mut SelectionState,
    bundle: Option<&ResolvedBundle>,
    bundle_id: &str,
) {
    let Some(bundle) = bundle else { return };
    let mut sel = StepSelection::with_value(WizardStep::Bundle, bundle_id);
    sel.id = Some(bundle.id.clone());
    sel.cost = bundle.price;
    next.set(WizardStep::Bundle, sel);
}

/// Resolve the backend yes/no gate. Returns true when the user explicitly
/// declined a backend (the options category is then skipped entirely).
fn resolve_backend_gate(
    next: &mut SelectionState,
    prev: &SelectionState,
    params: &IncomingParams,
    bundle: Option<&ResolvedBundle>,
) -> bool {
    let covered = bundle.is_some_and(|b| b.includes_backend);
    if covered {
        let mut sel = StepSelection::with_value(WizardStep::Backend, "Yes");
        sel.included_in_bundle = true;
        next.set(WizardStep::Backend, sel);
        return false;
    }

    if params.backend.as_deref().is_some_and(is_negative) {
        return true;
    }

    let affirmed = params.backend.as_deref().is_some_and(is_affirmative)
        || carried(prev, WizardStep::Backend, bundle.is_some())
            .is_some_and(|s| is_affirmative(&s.value));
    if affirmed {
        next.set(
            WizardStep::Backend,
            StepSelection::with_value(WizardStep::Backend, "Yes"),
        );
    }
    false
}

// ── Generic item categories ─────────────────────────────────────────

/// Descriptor driving the shared resolution path for an item-list
/// category. All four categories obey the same precedence law.
struct CategorySpec {
    step: WizardStep,
    unit_cost: fn(&str) -> Decimal,
    included: fn(&ResolvedBundle) -> &BTreeSet<String>,
    /// Coarse flag: the bundle covers the whole category, not just the
    /// listed ids.
    covers_category: fn(&ResolvedBundle) -> bool,
    /// Ids that are never charged and always part of the selection.
    free_defaults: &'static [&'static str],
    incoming: fn(&IncomingParams) -> Option<&Vec<String>>,
    /// Record an affirmative value for the capability summary.
    affirm_value: bool,
}

fn included_backend_options(b: &ResolvedBundle) -> &BTreeSet<String> {
    &b.backend_options
}
fn included_ai_features(b: &ResolvedBundle) -> &BTreeSet<String> {
    &b.ai_features
}
fn included_automation(b: &ResolvedBundle) -> &BTreeSet<String> {
    &b.automation_features
}
fn included_sections(b: &ResolvedBundle) -> &BTreeSet<String> {
    &b.sections
}
fn covers_backend(b: &ResolvedBundle) -> bool {
    b.includes_backend
}
fn covers_nothing(_: &ResolvedBundle) -> bool {
    false
}
fn incoming_backend_options(p: &IncomingParams) -> Option<&Vec<String>> {
    p.backend_options.as_ref()
}
fn incoming_ai_features(p: &IncomingParams) -> Option<&Vec<String>> {
    p.ai_features.as_ref()
}
fn incoming_automation(p: &IncomingParams) -> Option<&Vec<String>> {
    p.automation_features.as_ref()
}
fn incoming_sections(p: &IncomingParams) -> Option<&Vec<String>> {
    p.sections.as_ref()
}

fn item_categories() -> [CategorySpec; 4] {
    [
        CategorySpec {
            step: WizardStep::BackendOptions,
            unit_cost: catalog::backend_option_cost,
            included: included_backend_options,
            covers_category: covers_backend,
            free_defaults: &[],
            incoming: incoming_backend_options,
            affirm_value: false,
        },
        CategorySpec {
            step: WizardStep::AiFeatures,
            unit_cost: catalog::ai_feature_cost,
            included: included_ai_features,
            covers_category: covers_nothing,
            free_defaults: &[],
            incoming: incoming_ai_features,
            affirm_value: true,
        },
        CategorySpec {
            step: WizardStep::Automation,
            unit_cost: catalog::automation_feature_cost,
            included: included_automation,
            covers_category: covers_nothing,
            free_defaults: &[],
            incoming: incoming_automation,
            affirm_value: true,
        },
        CategorySpec {
            step: WizardStep::Sections,
            unit_cost: catalog::section_cost,
            included: included_sections,
            covers_category: covers_nothing,
            free_defaults: catalog::DEFAULT_SECTIONS,
            incoming: incoming_sections,
            affirm_value: false,
        },
    ]
}

fn resolve_item_category(
    next: &mut SelectionState,
    prev: &SelectionState,
    params: &IncomingParams,
    bundle: Option<&ResolvedBundle>,
    spec: &CategorySpec,
) {
    let prev_sel = carried(prev, spec.step, bundle.is_some());
    let included = bundle.map(spec.included);
    let covers = bundle.is_some_and(spec.covers_category);

    let user_items: Vec<String> = match (spec.incoming)(params) {
        Some(list) => list.clone(),
        None => prev_sel.map(|s| s.items.clone()).unwrap_or_default(),
    };

    let mut items: BTreeSet<String> = user_items.into_iter().collect();
    if let Some(set) = included {
        items.extend(set.iter().cloned());
    }
    if items.is_empty() {
        return;
    }
    // Anything selected brings the free defaults with it.
    items.extend(spec.free_defaults.iter().map(|s| s.to_string()));

    let chargeable = |id: &String| {
        !spec.free_defaults.contains(&id.as_str())
            && included.is_none_or(|set| !set.contains(id))
    };
    let cost = if covers {
        Decimal::ZERO
    } else {
        items
            .iter()
            .filter(|id| chargeable(id))
            .map(|id| (spec.unit_cost)(id))
            .sum()
    };
    let has_user_extra = items.iter().any(chargeable);

    let mut sel = StepSelection::new(spec.step);
    sel.items = items.into_iter().collect();
    sel.cost = cost;
    sel.included_in_bundle = bundle.is_some() && !has_user_extra;
    if spec.affirm_value {
        sel.value = "Yes".to_string();
    }
    next.set(spec.step, sel);
}

// ── Store ───────────────────────────────────────────────────────────

fn resolve_store(
    next: &mut SelectionState,
    prev: &SelectionState,
    params: &IncomingParams,
    bundle: Option<&ResolvedBundle>,
) {
    let prev_sel = carried(prev, WizardStep::Store, bundle.is_some());
    let store_bundled = bundle.is_some_and(|b| b.includes_store);

    if params.store.as_deref().is_some_and(is_negative) && !store_bundled {
        return;
    }

    let user_options: Vec<String> = match &params.store_options {
        Some(list) => list.clone(),
        None => prev_sel.map(|s| s.items.clone()).unwrap_or_default(),
    };

    let requested = store_bundled
        || params.store.as_deref().is_some_and(is_affirmative)
        || params.store_addon
        || !user_options.is_empty()
        || prev_sel.is_some();
    if !requested {
        return;
    }

    let mut items: BTreeSet<String> = catalog::DEFAULT_STORE_OPTIONS
        .iter()
        .map(|s| s.to_string())
        .collect();
    items.extend(user_options);
    let covered: Option<&BTreeSet<String>> =
        if store_bundled { bundle.map(|b| &b.store_options) } else { None };
    if let Some(set) = covered {
        items.extend(set.iter().cloned());
    }

    let extra = |id: &String| {
        !catalog::is_default_store_option(id)
            && covered.is_none_or(|set| !set.contains(id))
    };
    let extras_cost: Decimal = items
        .iter()
        .filter(|id| extra(id))
        .map(|id| catalog::store_option_cost(id))
        .sum();
    let has_extras = items.iter().any(extra);

    let budget_active = bundle.is_some_and(|b| b.family == BundleFamily::Budget);
    let cost = if store_bundled {
        // Base covered by the bundle; only extras are charged.
        extras_cost
    } else if params.store_addon {
        catalog::STORE_BASE_REGULAR + extras_cost
    } else if budget_active {
        catalog::STORE_BASE_BUDGET + extras_cost
    } else {
        catalog::STORE_BASE_REGULAR + extras_cost
    };

    let mut sel = StepSelection::with_value(WizardStep::Store, "Yes");
    sel.items = items.into_iter().collect();
    sel.cost = cost;
    sel.included_in_bundle = store_bundled && !has_extras;
    next.set(WizardStep::Store, sel);
}

// ── Add-ons ─────────────────────────────────────────────────────────

/// Billing bucket for one add-on under its locked-in mode. Falls back to
/// the other price when the catalog no longer offers the stored mode.
fn addon_charge(entry: &catalog::AddonEntry, mode: PayMode) -> (PayMode, Decimal) {
    match mode {
        PayMode::Monthly => match entry.monthly {
            Some(price) => (PayMode::Monthly, price),
            None => (PayMode::Onetime, entry.one_time.unwrap_or(Decimal::ZERO)),
        },
        PayMode::Onetime => match entry.one_time {
            Some(price) => (PayMode::Onetime, price),
            None => (PayMode::Monthly, entry.monthly.unwrap_or(Decimal::ZERO)),
        },
    }
}

fn natural_mode(entry: &catalog::AddonEntry) -> PayMode {
    if entry.recurring_by_nature && entry.monthly.is_some() {
        PayMode::Monthly
    } else if entry.one_time.is_some() {
        PayMode::Onetime
    } else {
        PayMode::Monthly
    }
}

fn resolve_addons(
    next: &mut SelectionState,
    prev: &SelectionState,
    params: &IncomingParams,
    bundle: Option<&ResolvedBundle>,
) {
    let prev_sel = carried(prev, WizardStep::Addons, bundle.is_some());
    let bundled: Option<&BTreeSet<String>> = bundle.map(|b| &b.addons);

    let user_items: Vec<String> = match &params.addons {
        Some(list) => list.clone(),
        None => prev_sel.map(|s| s.items.clone()).unwrap_or_default(),
    };
    let mut items: BTreeSet<String> = user_items.into_iter().collect();
    if let Some(set) = bundled {
        items.extend(set.iter().cloned());
    }
    if items.is_empty() {
        return;
    }

    let prev_modes = prev_sel.map(|s| &s.addon_modes);
    let mut modes: BTreeMap<String, PayMode> = BTreeMap::new();
    let mut one_time = Decimal::ZERO;
    let mut monthly = Decimal::ZERO;
    let mut has_user_extra = false;

    for id in &items {
        let Some(entry) = catalog::addon(id) else {
            continue; // unknown add-on: keeps its slot, charges nothing
        };
        // Mode stickiness: the mode locked at selection time wins; the
        // wizard-wide toggle applies only to newly selected add-ons.
        let mode = prev_modes
            .and_then(|m| m.get(id).copied())
            .or(match params.pay_mode {
                Some(PayMode::Monthly) if entry.monthly.is_some() => Some(PayMode::Monthly),
                Some(PayMode::Onetime) if entry.one_time.is_some() => Some(PayMode::Onetime),
                _ => None,
            })
            .unwrap_or_else(|| natural_mode(entry));
        modes.insert(id.clone(), mode);

        if bundled.is_some_and(|set| set.contains(id)) {
            continue;
        }
        has_user_extra = true;
        match addon_charge(entry, mode) {
            (PayMode::Monthly, price) => monthly += price,
            (PayMode::Onetime, price) => one_time += price,
        }
    }

    let mut sel = StepSelection::new(WizardStep::Addons);
    sel.items = items.into_iter().collect();
    sel.cost = one_time;
    sel.monthly = (monthly > Decimal::ZERO).then_some(monthly);
    sel.addon_modes = modes;
    sel.included_in_bundle = bundle.is_some() && !has_user_extra;
    next.set(WizardStep::Addons, sel);
}

// ── Hosting / maintenance ───────────────────────────────────────────

fn resolve_hosting(
    next: &mut SelectionState,
    prev: &SelectionState,
    params: &IncomingParams,
    bundle: Option<&ResolvedBundle>,
) {
    if let Some(bundle) = bundle
        && let Some(tier) = bundle.hosting.clone()
    {
        let mut sel = StepSelection::with_value(WizardStep::Hosting, tier.clone());
        sel.id = Some(tier.clone());
        // Budget bundles still report the tier's monthly price; regular
        // bundles include hosting outright.
        sel.monthly = match bundle.family {
            BundleFamily::Budget => Some(catalog::hosting_monthly(&tier)),
            BundleFamily::Regular => None,
        };
        sel.included_in_bundle = true;
        next.set(WizardStep::Hosting, sel);
        return;
    }

    let tier = params
        .hosting
        .clone()
        .or_else(|| {
            carried(prev, WizardStep::Hosting, bundle.is_some()).map(|s| s.value.clone())
        })
        .filter(|v| !v.is_empty());
    let Some(tier) = tier else { return };

    let mut sel = StepSelection::with_value(WizardStep::Hosting, tier.clone());
    sel.id = Some(tier.clone());
    sel.monthly = Some(catalog::hosting_monthly(&tier));
    next.set(WizardStep::Hosting, sel);
}

fn resolve_maintenance(
    next: &mut SelectionState,
    prev: &SelectionState,
    params: &IncomingParams,
    bundle: Option<&ResolvedBundle>,
) {
    if params
        .maintenance
        .as_deref()
        .is_some_and(catalog::is_no_maintenance)
    {
        return;
    }

    if let Some(bundle) = bundle
        && let Some(tier) = bundle.maintenance.clone()
    {
        let mut sel = StepSelection::with_value(WizardStep::Maintenance, tier.clone());
        sel.id = Some(tier.clone());
        sel.monthly = match bundle.family {
            BundleFamily::Budget => Some(catalog::maintenance_monthly(&tier)),
            BundleFamily::Regular => None,
        };
        sel.included_in_bundle = true;
        next.set(WizardStep::Maintenance, sel);
        return;
    }

    let tier = params
        .maintenance
        .clone()
        .or_else(|| {
            carried(prev, WizardStep::Maintenance, bundle.is_some()).map(|s| s.value.clone())
        })
        .filter(|v| !v.is_empty() && !catalog::is_no_maintenance(v));
    let Some(tier) = tier else { return };

    let mut sel = StepSelection::with_value(WizardStep::Maintenance, tier.clone());
    sel.id = Some(tier.clone());
    sel.monthly = Some(catalog::maintenance_monthly(&tier));
    next.set(WizardStep::Maintenance, sel);
}

// ── Promo ───────────────────────────────────────────────────────────

fn resolve_promo(next: &mut SelectionState, prev: &SelectionState, params: &IncomingParams) {
    if let Some(code) = params.promo_code.as_deref()
        && let Some(promo) = catalog::promo(code)
    {
        next.promo = Some(crate::wizard::PromoState {
            applied: true,
            code: promo.code.to_string(),
            discount_percent: promo.discount_percent,
        });
        return;
    }
    if params.promo_code.is_some() {
        debug!(code = ?params.promo_code, "Unknown promo code ignored");
    }
    // A previously applied promo stays applied without re-validation.
    if let Some(promo) = prev.promo.as_ref().filter(|p| p.applied) {
        next.promo = Some(promo.clone());
    }
}
