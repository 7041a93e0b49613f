#![allow(clippy::unwrap_used, clippy::expect_used)]
//! End-to-end submission processing tests.

mod common;

use std::sync::Arc;
use std::sync::atomic::Ordering;

use common::{BrokenForm, TestForm};
use formello_kernel::error::FormError;
use formello_kernel::form::{Form, SubmissionData};
use formello_kernel::registry::FormRegistry;
use formello_kernel::submission::{SubmissionOutcome, SubmissionProcessor};
use formello_kernel::validate::TokenRuleEngine;
use serde_json::{Map, json};

fn processor_with(forms: impl IntoIterator<Item = Form>) -> SubmissionProcessor {
    let registry = Arc::new(FormRegistry::new());
    for form in forms {
        registry.register(form);
    }
    SubmissionProcessor::new(registry, Arc::new(TokenRuleEngine))
}

fn data(pairs: &[(&str, serde_json::Value)]) -> SubmissionData {
    let mut map = Map::new();
    for (key, value) in pairs {
        map.insert((*key).to_string(), value.clone());
    }
    map
}

#[test]
fn unknown_form_is_not_found() {
    let processor = processor_with([]);
    let err = processor.process("missing", &Map::new()).unwrap_err();
    assert!(matches!(err, FormError::NotFound(name) if name == "missing"));
}

#[test]
fn empty_payload_fails_validation_without_handling() {
    let definition = TestForm::default();
    let counter = definition.counter();
    let processor = processor_with([Form::new(definition)]);

    let outcome = processor.process("test", &Map::new()).unwrap();

    let SubmissionOutcome::Invalid { errors } = outcome else {
        panic!("expected validation failure");
    };
    assert!(errors.contains_key("name"));
    assert!(errors.contains_key("description"));
    assert_eq!(counter.load(Ordering::SeqCst), 0);
}

#[test]
fn valid_payload_handles_once() {
    let definition = TestForm::default();
    let counter = definition.counter();
    let processor = processor_with([Form::new(definition)]);

    let payload = data(&[("name", json!("Widget")), ("description", json!("A widget."))]);
    let outcome = processor.process("test", &payload).unwrap();

    let SubmissionOutcome::Success { result, messages } = outcome else {
        panic!("expected success");
    };
    assert_eq!(result, json!("Form handled successfully"));
    assert_eq!(messages, vec!["Saved.".to_string()]);
    assert_eq!(counter.load(Ordering::SeqCst), 1);
}

#[test]
fn handler_failure_is_contained() {
    let processor = processor_with([Form::new(BrokenForm)]);
    let outcome = processor.process("broken", &Map::new()).unwrap();

    let SubmissionOutcome::Failed { error } = outcome else {
        panic!("expected handler failure");
    };
    assert_eq!(error, "storage unavailable");
}

#[test]
fn envelope_shapes() {
    let processor = processor_with([Form::new(TestForm::default()), Form::new(BrokenForm)]);

    let ok = processor
        .process(
            "test",
            &data(&[("name", json!("a")), ("description", json!("b"))]),
        )
        .unwrap();
    let ok = serde_json::to_value(&ok).unwrap();
    assert_eq!(ok["success"], true);
    assert_eq!(ok["messages"][0], "Saved.");

    let invalid = processor.process("test", &Map::new()).unwrap();
    let invalid = serde_json::to_value(&invalid).unwrap();
    assert_eq!(invalid["success"], false);
    assert!(invalid["errors"]["name"].is_array());

    let failed = processor.process("broken", &Map::new()).unwrap();
    let failed = serde_json::to_value(&failed).unwrap();
    assert_eq!(failed["success"], false);
    assert_eq!(failed["error"], "storage unavailable");
}
