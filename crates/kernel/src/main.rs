//! Formello server
//!
//! Serves registered form schemas and processes submissions over HTTP.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::http::{HeaderValue, Method};
use chrono::Utc;
use serde_json::{Value, json};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use formello_kernel::config::Config;
use formello_kernel::field::{
    CheckboxField, EnumOptions, Field, OptionItem, OptionsSource, SelectField, TextField,
    TextareaField,
};
use formello_kernel::form::{FormDefinition, FormMeta, SubmissionData};
use formello_kernel::registrar::FormRegistrar;
use formello_kernel::registry::FormRegistry;
use formello_kernel::routes;
use formello_kernel::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    info!("Starting Formello kernel");

    let config = Config::from_env().context("failed to load configuration")?;
    info!(port = config.port, prefix = %config.route_prefix, "Configuration loaded");

    let registry = Arc::new(FormRegistry::new());
    let registrar = FormRegistrar::new().provide::<ContactForm>("contact");
    let registered = if config.enabled_forms.is_empty() {
        registrar.add_all_provided().apply(&registry)
    } else {
        registrar.add_named_all(&config.enabled_forms).apply(&registry)
    };
    info!(forms = registered, "Forms registered");

    let cors = build_cors_layer(&config);
    let state = AppState::new(config.clone(), registry);

    let app = Router::new()
        .merge(routes::forms::router(&config.route_prefix))
        .merge(routes::health::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    info!(%addr, "Listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind listener")?;
    axum::serve(listener, app).await.context("server error")?;

    Ok(())
}

/// Initialize tracing with an env-filter, defaulting to info.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Build the CORS layer from configured origins.
fn build_cors_layer(config: &Config) -> CorsLayer {
    let layer = CorsLayer::new().allow_methods([Method::GET, Method::POST]);

    if config.cors_allowed_origins.iter().any(|o| o == "*") {
        return layer.allow_origin(tower_http::cors::Any);
    }

    let mut origins = Vec::with_capacity(config.cors_allowed_origins.len());
    for origin in &config.cors_allowed_origins {
        match origin.parse::<HeaderValue>() {
            Ok(value) => origins.push(value),
            Err(_) => warn!(origin = %origin, "ignoring unparseable CORS origin"),
        }
    }
    layer.allow_origin(tower_http::cors::AllowOrigin::list(origins))
}

/// Contact form subjects.
enum Subject {
    General,
    Support,
    Billing,
    Partnership,
}

impl Subject {
    fn cases() -> [Subject; 4] {
        [
            Subject::General,
            Subject::Support,
            Subject::Billing,
            Subject::Partnership,
        ]
    }

    fn label(&self) -> &'static str {
        match self {
            Subject::General => "General Inquiry",
            Subject::Support => "Technical Support",
            Subject::Billing => "Billing Question",
            Subject::Partnership => "Partnership",
        }
    }

    fn value(&self) -> &'static str {
        match self {
            Subject::General => "general",
            Subject::Support => "support",
            Subject::Billing => "billing",
            Subject::Partnership => "partnership",
        }
    }
}

impl EnumOptions for Subject {
    fn options() -> Vec<OptionItem> {
        Self::cases()
            .iter()
            .map(|case| OptionItem::new(case.label(), case.value()))
            .collect()
    }
}

/// The bundled contact form.
#[derive(Default)]
struct ContactForm;

impl FormDefinition for ContactForm {
    fn configure(&self, meta: &mut FormMeta) {
        meta.set_title("Contact Us")
            .set_configuration([
                ("width", json!("max-w-2xl")),
                ("submitLabel", json!("Send Message")),
                ("layout", json!("vertical")),
            ])
            .set_success_messages([
                "Thank you for your message! We will get back to you within 24 hours.",
            ]);
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            TextField::make("name")
                .label("Full Name")
                .required(true)
                .placeholder("Enter your full name")
                .max_length(100)
                .into(),
            TextField::make("email")
                .label("Email Address")
                .required(true)
                .placeholder("Enter your email address")
                .rule("email")
                .into(),
            SelectField::make("subject")
                .label("Subject")
                .required(true)
                .placeholder("Select a subject")
                .options(OptionsSource::enumeration::<Subject>())
                .into(),
            TextareaField::make("message")
                .label("Message")
                .required(true)
                .placeholder("Please enter your message here...")
                .rows(6)
                .max_length(1000)
                .into(),
            CheckboxField::make("newsletter")
                .label("Subscribe to our newsletter")
                .help_text("Stay updated with our latest news and updates")
                .into(),
            CheckboxField::make("terms")
                .label("I agree to the Terms and Conditions")
                .required(true)
                .help_text("You must agree to continue")
                .into(),
        ]
    }

    fn handle(&self, data: &SubmissionData) -> anyhow::Result<Value> {
        let name = data.get("name").and_then(|v| v.as_str()).unwrap_or("");
        let subject = data.get("subject").and_then(|v| v.as_str()).unwrap_or("");
        info!(name, subject, "contact form submitted");

        Ok(json!({
            "message": "Thank you for your message! We will get back to you within 24 hours.",
            "reference": format!("MSG-{}", Utc::now().format("%Y%m%d-%H%M%S")),
        }))
    }
}
