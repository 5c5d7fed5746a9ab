//! Quote delivery — SMTP via lettre.
//!
//! Two outbound mails per finalized quote: the customer copy and the
//! owner notification. The core only hands over a [`Quote`]; formatting
//! and transport live here.

use lettre::message::header::ContentType;
use lettre::transport::smtp::authentication::Credentials;
use lettre::{Message, SmtpTransport, Transport};
use rust_decimal::Decimal;
use secrecy::{ExposeSecret, SecretString};
use tracing::info;

use crate::error::EmailError;
use crate::quote::Quote;

// ── Configuration ───────────────────────────────────────────────────

/// SMTP configuration, built from environment variables.
#[derive(Debug, Clone)]
pub struct EmailConfig {
    pub smtp_host: String,
    pub smtp_port: u16,
    pub username: String,
    pub password: SecretString,
    pub from_address: String,
    /// Address receiving the owner copy of every quote.
    pub owner_address: String,
}

impl EmailConfig {
    /// Build config from environment variables.
    /// Returns `None` if `SMTP_HOST` is not set (delivery disabled).
    pub fn from_env() -> Option<Self> {
        let smtp_host = std::env::var("SMTP_HOST").ok()?;

        let smtp_port: u16 = std::env::var("SMTP_PORT")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or(587);

        let username = std::env::var("SMTP_USERNAME").unwrap_or_default();
        let password = SecretString::from(std::env::var("SMTP_PASSWORD").unwrap_or_default());
        let from_address =
            std::env::var("QUOTE_FROM_ADDRESS").unwrap_or_else(|_| username.clone());
        let owner_address =
            std::env::var("QUOTE_OWNER_ADDRESS").unwrap_or_else(|_| from_address.clone());

        Some(Self {
            smtp_host,
            smtp_port,
            username,
            password,
            from_address,
            owner_address,
        })
    }
}

// ── Mailer ──────────────────────────────────────────────────────────

/// Formats and delivers finalized quotes over SMTP.
pub struct QuoteMailer {
    config: EmailConfig,
}

impl QuoteMailer {
    pub fn new(config: EmailConfig) -> Self {
        Self { config }
    }

    /// Construct from the environment; `None` when delivery is disabled.
    pub fn from_env() -> Option<Self> {
        EmailConfig::from_env().map(Self::new)
    }

    /// Send the customer their quote.
    pub fn send_customer_quote(&self, quote: &Quote, to: &str) -> Result<(), EmailError> {
        let subject = format!("Your website quote {}", quote.reference());
        self.send_html(to, &subject, &format_customer_html(quote))
    }

    /// Send the owner a copy with the customer's contact address.
    pub fn send_owner_copy(&self, quote: &Quote, customer: &str) -> Result<(), EmailError> {
        let subject = format!("New quote {} from {customer}", quote.reference());
        let owner = self.config.owner_address.clone();
        self.send_html(&owner, &subject, &format_owner_html(quote, customer))
    }

    fn send_html(&self, to: &str, subject: &str, html: &str) -> Result<(), EmailError> {
        let creds = Credentials::new(
            self.config.username.clone(),
            self.config.password.expose_secret().to_string(),
        );

        let transport = SmtpTransport::relay(&self.config.smtp_host)
            .map_err(|e| EmailError::SendFailed(format!("SMTP relay error: {e}")))?
            .port(self.config.smtp_port)
            .credentials(creds)
            .build();

        let email = Message::builder()
            .from(self.config.from_address.parse().map_err(|e| {
                EmailError::InvalidAddress {
                    address: self.config.from_address.clone(),
                    reason: format!("{e}"),
                }
            })?)
            .to(to.parse().map_err(|e| EmailError::InvalidAddress {
                address: to.to_string(),
                reason: format!("{e}"),
            })?)
            .subject(subject)
            .header(ContentType::TEXT_HTML)
            .body(html.to_string())
            .map_err(|e| EmailError::BuildFailed(format!("{e}")))?;

        transport
            .send(&email)
            .map_err(|e| EmailError::SendFailed(format!("{e}")))?;

        info!(to, subject, "Quote email sent");
        Ok(())
    }
}

// ── Formatting ──────────────────────────────────────────────────────

fn money(amount: Decimal) -> String {
    format!("${amount}")
}

fn selection_rows(quote: &Quote) -> String {
    quote
        .selections
        .iter()
        .map(|sel| {
            let detail = if !sel.items.is_empty() {
                sel.items.join(", ")
            } else {
                sel.value.clone()
            };
            let price = if sel.included_in_bundle {
                "included".to_string()
            } else {
                match sel.monthly {
                    Some(monthly) if !sel.cost.is_zero() => {
                        format!("{} + {}/mo", money(sel.cost), money(monthly))
                    }
                    Some(monthly) => format!("{}/mo", money(monthly)),
                    None => money(sel.cost),
                }
            };
            format!(
                "<tr><td>{}</td><td>{}</td><td align=\"right\">{}</td></tr>",
                sel.name, detail, price
            )
        })
        .collect()
}

fn totals_block(quote: &Quote) -> String {
    format!(
        "<p><strong>Development cost:</strong> {}<br>\
         <strong>Monthly cost:</strong> {}/mo<br>\
         <strong>First year total:</strong> {}</p>",
        money(quote.development_cost),
        money(quote.monthly_cost),
        money(quote.first_year_total),
    )
}

/// HTML body of the customer quote email.
pub fn format_customer_html(quote: &Quote) -> String {
    format!(
        "<html><body>\
         <h2>Your website quote {reference}</h2>\
         <p>Thank you for building your quote with us. Here is a summary \
         of your selections:</p>\
         <table cellpadding=\"6\">{rows}</table>\
         {totals}\
         <p>This quote is valid for 30 days. Reply to this email with any \
         questions.</p>\
         </body></html>",
        reference = quote.reference(),
        rows = selection_rows(quote),
        totals = totals_block(quote),
    )
}

/// HTML body of the owner notification email.
pub fn format_owner_html(quote: &Quote, customer: &str) -> String {
    format!(
        "<html><body>\
         <h2>New quote {reference}</h2>\
         <p><strong>Customer:</strong> {customer}<br>\
         <strong>Created:</strong> {created}</p>\
         <table cellpadding=\"6\">{rows}</table>\
         {totals}\
         </body></html>",
        reference = quote.reference(),
        created = quote.created_at.to_rfc3339(),
        rows = selection_rows(quote),
        totals = totals_block(quote),
    )
}
