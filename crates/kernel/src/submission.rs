//! Submission processing.
//!
//! A submission moves through received → validating → handling →
//! succeeded, or drops to rejected at the validation or handler step. The
//! processor owns that flow: it looks up the form, runs the rule engine,
//! and invokes the form's handler inside a failure boundary so handler
//! errors surface in the envelope rather than propagating.

use std::sync::Arc;

use serde::Serialize;
use serde::ser::SerializeStruct;
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::FormResult;
use crate::form::SubmissionData;
use crate::registry::FormRegistry;
use crate::validate::{RuleEngine, ValidationErrors};

/// Outcome envelope for a processed submission.
///
/// Serializes to `{success:true, result, messages}` on success,
/// `{success:false, errors:{field:[...]}}` on validation rejection, and
/// `{success:false, error:"..."}` on handler failure — `errors` (per-field)
/// versus `error` (free text) tells the two failure shapes apart.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmissionOutcome {
    /// Validation passed and the handler succeeded.
    Success {
        /// Opaque handler return value.
        result: Value,
        /// The form's configured success messages.
        messages: Vec<String>,
    },

    /// Validation rejected the data; the handler was not invoked.
    Invalid {
        /// Per-field error messages.
        errors: ValidationErrors,
    },

    /// The handler failed.
    Failed {
        /// Handler error message.
        error: String,
    },
}

impl SubmissionOutcome {
    /// Whether the submission succeeded.
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }
}

impl Serialize for SubmissionOutcome {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Success { result, messages } => {
                let mut s = serializer.serialize_struct("SubmissionOutcome", 3)?;
                s.serialize_field("success", &true)?;
                s.serialize_field("result", result)?;
                s.serialize_field("messages", messages)?;
                s.end()
            }
            Self::Invalid { errors } => {
                let mut s = serializer.serialize_struct("SubmissionOutcome", 2)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("errors", errors)?;
                s.end()
            }
            Self::Failed { error } => {
                let mut s = serializer.serialize_struct("SubmissionOutcome", 2)?;
                s.serialize_field("success", &false)?;
                s.serialize_field("error", error)?;
                s.end()
            }
        }
    }
}

/// Validates and dispatches submissions against registered forms.
pub struct SubmissionProcessor {
    registry: Arc<FormRegistry>,
    engine: Arc<dyn RuleEngine>,
}

impl SubmissionProcessor {
    /// Create a processor over a registry and rule engine.
    pub fn new(registry: Arc<FormRegistry>, engine: Arc<dyn RuleEngine>) -> Self {
        Self { registry, engine }
    }

    /// Process a submission against the named form.
    ///
    /// Unknown form names are the caller's error and surface as `Err`;
    /// validation and handler failures are normal outcomes.
    pub fn process(&self, form_name: &str, data: &SubmissionData) -> FormResult<SubmissionOutcome> {
        let form = self.registry.get(form_name)?;

        debug!(form = %form_name, "validating submission");
        let errors = self
            .engine
            .evaluate(&form.rules(), data, form.meta().messages());

        if !errors.is_empty() {
            debug!(form = %form_name, fields = errors.len(), "submission rejected");
            return Ok(SubmissionOutcome::Invalid { errors });
        }

        debug!(form = %form_name, "handling submission");
        match form.handle(data) {
            Ok(result) => {
                debug!(form = %form_name, "submission succeeded");
                Ok(SubmissionOutcome::Success {
                    result,
                    messages: form.meta().success_messages().to_vec(),
                })
            }
            Err(error) => {
                warn!(form = %form_name, error = %error, "form handler failed");
                Ok(SubmissionOutcome::Failed {
                    error: error.to_string(),
                })
            }
        }
    }
}

impl std::fmt::Debug for SubmissionProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SubmissionProcessor").finish()
    }
}
