#![allow(clippy::unwrap_used, clippy::expect_used)]
//! Common fixtures for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use anyhow::anyhow;
use serde_json::{Value, json};

use formello_kernel::config::Config;
use formello_kernel::field::{
    CheckboxField, Field, OptionItem, OptionsSource, SelectField, TextField, TextareaField,
};
use formello_kernel::form::{Form, FormDefinition, FormMeta, SubmissionData};
use formello_kernel::registry::FormRegistry;
use formello_kernel::state::AppState;

/// The reference contact form.
#[derive(Default)]
pub struct ContactForm;

impl FormDefinition for ContactForm {
    fn configure(&self, meta: &mut FormMeta) {
        meta.set_title("Contact Us")
            .set_configuration([
                ("width", json!("max-w-2xl")),
                ("submitLabel", json!("Send Message")),
                ("layout", json!("vertical")),
            ])
            .set_success_messages(["Thank you for your message!"]);
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
                .options(OptionsSource::Explicit(vec![
                    OptionItem::new("General Inquiry", "general"),
                    OptionItem::new("Technical Support", "support"),
                    OptionItem::new("Billing Question", "billing"),
                    OptionItem::new("Partnership", "partnership"),
                ]))
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
        Ok(json!({
            "received": data.get("name").cloned().unwrap_or(Value::Null),
        }))
    }
}

/// A minimal form with two required fields and an invocation counter.
#[derive(Default)]
pub struct TestForm {
    handled: Arc<AtomicUsize>,
}

impl TestForm {
    pub fn counter(&self) -> Arc<AtomicUsize> {
        self.handled.clone()
    }
}

impl FormDefinition for TestForm {
    fn configure(&self, meta: &mut FormMeta) {
        meta.set_title("Test Form")
            .set_success_messages(["Saved."]);
    }

    fn fields(&self) -> Vec<Field> {
        vec![
            TextField::make("name").label("Name").required(true).into(),
            TextareaField::make("description")
                .label("Description")
                .required(true)
                .into(),
        ]
    }

    fn handle(&self, _data: &SubmissionData) -> anyhow::Result<Value> {
        self.handled.fetch_add(1, Ordering::SeqCst);
        Ok(json!("Form handled successfully"))
    }
}

/// A form whose handler always fails.
#[derive(Default)]
pub struct BrokenForm;

impl FormDefinition for BrokenForm {
    fn fields(&self) -> Vec<Field> {
        Vec::new()
    }

    fn handle(&self, _data: &SubmissionData) -> anyhow::Result<Value> {
        Err(anyhow!("storage unavailable"))
    }
}

/// Build app state over a registry seeded with the given forms.
pub fn app_state(forms: impl IntoIterator<Item = Form>) -> AppState {
    let registry = Arc::new(FormRegistry::new());
    for form in forms {
        registry.register(form);
    }
    AppState::new(Config::default(), registry)
}
