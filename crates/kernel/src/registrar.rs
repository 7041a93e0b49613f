//! Boot-time form registration.
//!
//! The registrar queues forms fluently and applies them to a registry in one
//! pass. It also holds a catalog of named constructors so deployments can
//! choose which provided forms to enable from configuration; an unknown name
//! is an error when added singly and skipped with a warning when added in
//! bulk.

use std::collections::BTreeMap;

use tracing::warn;

use crate::error::{FormError, FormResult};
use crate::form::{Form, FormDefinition};
use crate::registry::FormRegistry;

type FormConstructor = fn() -> Form;

/// Queues forms for registration.
#[derive(Debug, Default)]
pub struct FormRegistrar {
    catalog: BTreeMap<String, FormConstructor>,
    queued: Vec<Form>,
}

impl FormRegistrar {
    /// Create an empty registrar.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a form instance.
    pub fn add(mut self, form: Form) -> Self {
        self.queued.push(form);
        self
    }

    /// Queue a definition type.
    pub fn add_type<D: FormDefinition + Default>(mut self) -> Self {
        self.queued.push(Form::new(D::default()));
        self
    }

    /// Queue multiple form instances.
    pub fn add_many(mut self, forms: impl IntoIterator<Item = Form>) -> Self {
        self.queued.extend(forms);
        self
    }

    /// Register a named constructor without queueing it.
    pub fn provide<D: FormDefinition + Default>(mut self, alias: impl Into<String>) -> Self {
        self.catalog.insert(alias.into(), || Form::new(D::default()));
        self
    }

    /// Queue a provided form by alias.
    pub fn add_named(mut self, alias: &str) -> FormResult<Self> {
        let constructor = self
            .catalog
            .get(alias)
            .ok_or_else(|| FormError::InvalidReference(alias.to_string()))?;
        self.queued.push(constructor());
        Ok(self)
    }

    /// Queue provided forms by alias, best effort: unknown aliases are
    /// skipped with a warning.
    pub fn add_named_all<S, I>(mut self, aliases: I) -> Self
    where
        S: AsRef<str>,
        I: IntoIterator<Item = S>,
    {
        for alias in aliases {
            let alias = alias.as_ref();
            match self.catalog.get(alias) {
                Some(constructor) => self.queued.push(constructor()),
                None => warn!(alias = %alias, "skipping unknown form alias"),
            }
        }
        self
    }

    /// Queue every provided form.
    pub fn add_all_provided(mut self) -> Self {
        let forms: Vec<Form> = self.catalog.values().map(|constructor| constructor()).collect();
        self.queued.extend(forms);
        self
    }

    /// Register every queued form, returning how many were applied.
    pub fn apply(self, registry: &FormRegistry) -> usize {
        let count = self.queued.len();
        for form in self.queued {
            registry.register(form);
        }
        count
    }
}
