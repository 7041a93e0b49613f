//! Form definitions and descriptors.
//!
//! A [`FormDefinition`] is the application-supplied part of a form: its
//! `configure` hook, its field list, and its submission handler. Binding a
//! definition with [`Form::new`] derives the default name and endpoint from
//! the definition's type, then runs `configure` exactly once. Field lists
//! and rules are rebuilt on every call rather than cached, so definitions
//! with dynamic defaults re-evaluate each time they are read.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::field::Field;

/// Submitted form data, keyed by field name.
pub type SubmissionData = Map<String, Value>;

/// An application-defined form.
pub trait FormDefinition: Send + Sync + 'static {
    /// Adjust form metadata after defaults are derived. Runs once, at
    /// construction.
    fn configure(&self, meta: &mut FormMeta) {
        let _ = meta;
    }

    /// Build the ordered field list. Called fresh on every read.
    fn fields(&self) -> Vec<Field>;

    /// Handle a validated submission. Only invoked after validation passes;
    /// an error here is reported in the submission envelope, never
    /// propagated.
    fn handle(&self, data: &SubmissionData) -> anyhow::Result<Value> {
        let _ = data;
        Ok(Value::Null)
    }
}

/// Form-level metadata, populated from type-derived defaults and the
/// definition's `configure` hook.
#[derive(Debug, Clone)]
pub struct FormMeta {
    name: String,
    title: String,
    endpoint: String,
    endpoint_overridden: bool,
    method: String,
    configuration: Map<String, Value>,
    messages: BTreeMap<String, String>,
    success_messages: Vec<String>,
}

impl FormMeta {
    /// Create metadata with defaults derived from the given name.
    pub fn named(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            endpoint: default_endpoint(&name),
            name,
            title: String::new(),
            endpoint_overridden: false,
            method: "POST".to_string(),
            configuration: Map::new(),
            messages: BTreeMap::new(),
            success_messages: Vec::new(),
        }
    }

    fn derived<D: FormDefinition>() -> Self {
        Self::named(derive_form_name(std::any::type_name::<D>()))
    }

    /// Set the form name. Re-derives the endpoint unless it was explicitly
    /// overridden.
    pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
        self.name = name.into();
        if !self.endpoint_overridden {
            self.endpoint = default_endpoint(&self.name);
        }
        self
    }

    /// Set the form title.
    pub fn set_title(&mut self, title: impl Into<String>) -> &mut Self {
        self.title = title.into();
        self
    }

    /// Override the endpoint. Later name changes no longer touch it.
    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) -> &mut Self {
        self.endpoint = endpoint.into();
        self.endpoint_overridden = true;
        self
    }

    /// Set the HTTP method.
    pub fn set_method(&mut self, method: impl Into<String>) -> &mut Self {
        self.method = method.into();
        self
    }

    /// Replace the layout/presentation configuration.
    pub fn set_configuration<K, I>(&mut self, configuration: I) -> &mut Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        self.configuration = configuration
            .into_iter()
            .map(|(key, value)| (key.into(), value))
            .collect();
        self
    }

    /// Replace the validation message overrides, keyed "field.rule" or
    /// "rule".
    pub fn set_messages<K, V, I>(&mut self, messages: I) -> &mut Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.messages = messages
            .into_iter()
            .map(|(key, value)| (key.into(), value.into()))
            .collect();
        self
    }

    /// Replace the success messages.
    pub fn set_success_messages<S, I>(&mut self, messages: I) -> &mut Self
    where
        S: Into<String>,
        I: IntoIterator<Item = S>,
    {
        self.success_messages = messages.into_iter().map(Into::into).collect();
        self
    }

    /// The form name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The form title.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The submission endpoint.
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The HTTP method.
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Layout/presentation configuration.
    pub fn configuration(&self) -> &Map<String, Value> {
        &self.configuration
    }

    /// Validation message overrides.
    pub fn messages(&self) -> &BTreeMap<String, String> {
        &self.messages
    }

    /// Success messages returned with a successful submission.
    pub fn success_messages(&self) -> &[String] {
        &self.success_messages
    }
}

/// A definition bound to its metadata, ready for registration.
pub struct Form {
    meta: FormMeta,
    definition: Arc<dyn FormDefinition>,
}

impl Form {
    /// Bind a definition. Defaults are derived from the definition's type
    /// name, then `configure` runs once.
    pub fn new<D: FormDefinition>(definition: D) -> Self {
        let mut meta = FormMeta::derived::<D>();
        definition.configure(&mut meta);
        Self {
            meta,
            definition: Arc::new(definition),
        }
    }

    /// Form metadata.
    pub fn meta(&self) -> &FormMeta {
        &self.meta
    }

    /// The form name, the registry key.
    pub fn name(&self) -> &str {
        self.meta.name()
    }

    /// Build the field list. Fresh on every call.
    pub fn fields(&self) -> Vec<Field> {
        self.definition.fields()
    }

    /// Derive validation rules from the current field list. Never stored,
    /// so field rules and form rules cannot drift apart.
    pub fn rules(&self) -> BTreeMap<String, Vec<String>> {
        self.fields()
            .into_iter()
            .filter(|field| !field.name.is_empty())
            .map(|field| (field.name, field.rules))
            .collect()
    }

    /// Build the serializable descriptor consumed by the frontend.
    pub fn descriptor(&self) -> FormDescriptor {
        FormDescriptor {
            name: self.meta.name.clone(),
            title: self.meta.title.clone(),
            endpoint: self.meta.endpoint.clone(),
            method: self.meta.method.clone(),
            configuration: self.meta.configuration.clone(),
            fields: self.fields(),
        }
    }

    /// Invoke the submission handler.
    pub fn handle(&self, data: &SubmissionData) -> anyhow::Result<Value> {
        self.definition.handle(data)
    }
}

impl std::fmt::Debug for Form {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Form").field("meta", &self.meta).finish()
    }
}

/// Serializable form snapshot: metadata plus each field's serialized form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormDescriptor {
    /// Form name.
    pub name: String,

    /// Form title.
    pub title: String,

    /// Submission endpoint.
    pub endpoint: String,

    /// HTTP method.
    pub method: String,

    /// Layout/presentation configuration.
    pub configuration: Map<String, Value>,

    /// Ordered field descriptors.
    pub fields: Vec<Field>,
}

fn default_endpoint(name: &str) -> String {
    format!("/forms/{name}")
}

/// Derive a form name from a type path: last path segment, trailing "Form"
/// stripped when present, kebab-cased. A type not named with the suffix
/// kebab-cases in full.
fn derive_form_name(type_path: &str) -> String {
    let base = type_path.rsplit("::").next().unwrap_or(type_path);
    let trimmed = match base.strip_suffix("Form") {
        Some(stripped) if !stripped.is_empty() => stripped,
        _ => base,
    };
    kebab(trimmed)
}

fn kebab(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    for (i, ch) in input.chars().enumerate() {
        if ch.is_ascii_uppercase() {
            if i > 0 {
                out.push('-');
            }
            out.push(ch.to_ascii_lowercase());
        } else if ch == '_' || ch == ' ' {
            out.push('-');
        } else {
            out.push(ch);
        }
    }
    out
}
