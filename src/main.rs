use std::sync::Arc;

use anyhow::Context;

use sitequote::config::AppConfig;
use sitequote::email::QuoteMailer;
use sitequote::pricing::{aggregate, ordered_steps, reconcile, CapabilityMatcher};
use sitequote::quote::Quote;
use sitequote::store::{LibSqlStore, StateStore};
use sitequote::wizard::{BundleParams, IncomingParams, PayMode, WebsiteType, WizardStep};

/// Parsed command line: selection inputs plus driver flags.
struct CliArgs {
    params: IncomingParams,
    bundle_arg: Option<String>,
    reset: bool,
    send_quote_to: Option<String>,
}

fn split_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
        .collect()
}

fn parse_args(args: &[String]) -> CliArgs {
    let mut params = IncomingParams::default();
    let mut bundle_arg = None;
    let mut reset = false;
    let mut send_quote_to = None;

    let mut iter = args.iter().peekable();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--reset" => reset = true,
            "--send-quote" => {
                send_quote_to = iter.next().cloned();
            }
            _ => {
                let Some((key, value)) = arg.split_once('=') else {
                    eprintln!("Ignoring argument without '=': {arg}");
                    continue;
                };
                match key {
                    "websiteType" => params.website_type = Some(value.to_string()),
                    "category" => params.category = Some(value.to_string()),
                    "subcategory" => params.subcategory = Some(value.to_string()),
                    "bundle" => bundle_arg = Some(value.to_string()),
                    "backend" => params.backend = Some(value.to_string()),
                    "backendOptions" => params.backend_options = Some(split_list(value)),
                    "aiFeatures" => params.ai_features = Some(split_list(value)),
                    "automationFeatures" => {
                        params.automation_features = Some(split_list(value));
                    }
                    "store" => params.store = Some(value.to_string()),
                    "storeOptions" => params.store_options = Some(split_list(value)),
                    "storeAddon" => params.store_addon = value.eq_ignore_ascii_case("true"),
                    "sections" => params.sections = Some(split_list(value)),
                    "addons" => params.addons = Some(split_list(value)),
                    "payMode" => params.pay_mode = PayMode::parse(value),
                    "hosting" => params.hosting = Some(value.to_string()),
                    "maintenance" => params.maintenance = Some(value.to_string()),
                    "promo" => params.promo_code = Some(value.to_string()),
                    _ if key.starts_with("bp_") => {
                        // fold every bp_* pair into one query fragment
                    }
                    _ => eprintln!("Ignoring unknown parameter: {key}"),
                }
            }
        }
    }

    // bp_* pairs parse as one fragment so the codec sees the full key set
    let bp_fragment: String = args
        .iter()
        .filter(|a| a.starts_with("bp_"))
        .cloned()
        .collect::<Vec<_>>()
        .join("&");
    if !bp_fragment.is_empty() {
        params.bundle_params = BundleParams::parse(&bp_fragment);
    }

    CliArgs {
        params,
        bundle_arg,
        reset,
        send_quote_to,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Install rustls crypto provider before any TLS usage
    rustls::crypto::ring::default_provider()
        .install_default()
        .expect("Failed to install rustls crypto provider");

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_target(false)
        .init();

    let config = AppConfig::from_env();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let cli = parse_args(&args);

    let store: Arc<dyn StateStore> = Arc::new(
        LibSqlStore::new_local(std::path::Path::new(&config.db_path))
            .await
            .with_context(|| format!("Failed to open store at {}", config.db_path))?,
    );

    if cli.reset {
        store.clear().await.context("Failed to clear store")?;
        eprintln!("Selections cleared.");
    }

    let prev = store.load().await.context("Failed to load selections")?;

    // The bundle id travels with every page; reuse the saved one unless
    // the caller supplies (or explicitly empties) it.
    let bundle_id = cli.bundle_arg.unwrap_or_else(|| {
        prev.get(WizardStep::Bundle)
            .map(|s| s.value.clone())
            .unwrap_or_default()
    });

    let website_type = cli
        .params
        .website_type
        .as_deref()
        .map(WebsiteType::parse)
        .or_else(|| {
            prev.get(WizardStep::WebsiteType)
                .map(|s| WebsiteType::parse(&s.value))
        })
        .unwrap_or(config.default_website_type);

    let state = reconcile(&prev, &cli.params, &bundle_id, website_type);
    let totals = aggregate(&state);
    store.save(&state).await.context("Failed to save selections")?;

    eprintln!("sitequote v{}", env!("CARGO_PKG_VERSION"));
    for sel in ordered_steps(&state) {
        let detail = if sel.items.is_empty() {
            sel.value.clone()
        } else {
            sel.items.join(", ")
        };
        let price = if sel.included_in_bundle {
            "included".to_string()
        } else {
            match sel.monthly {
                Some(monthly) if !sel.cost.is_zero() => {
                    format!("${} + ${monthly}/mo", sel.cost)
                }
                Some(monthly) => format!("${monthly}/mo"),
                None => format!("${}", sel.cost),
            }
        };
        eprintln!("  {:>2}. {:<16} {:<40} {}", sel.step, sel.name, detail, price);
    }
    eprintln!(
        "  Capabilities: {}",
        CapabilityMatcher::new().summarize(&state).acronym()
    );
    eprintln!(
        "  One-time: ${}   Monthly: ${}/mo   Yearly: ${}",
        totals.one_time, totals.monthly, totals.yearly
    );

    if let Some(to) = cli.send_quote_to {
        let quote = Quote::from_state(&state);
        match QuoteMailer::from_env() {
            Some(mailer) => {
                mailer.send_customer_quote(&quote, &to)?;
                mailer.send_owner_copy(&quote, &to)?;
                eprintln!("Quote {} sent to {to}.", quote.reference());
            }
            None => {
                eprintln!("Email delivery disabled (SMTP_HOST not set); quote not sent.");
            }
        }
    }

    Ok(())
}
