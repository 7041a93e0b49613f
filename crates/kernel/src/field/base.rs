//! The base field builder.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::options::{OptionItem, OptionsSource};

/// A single form field's configuration.
///
/// Built fluently and serialized as-is for the frontend renderer. The
/// serialized form always carries the full key set; unset optional keys
/// serialize as null or empty so consumers never see a partial descriptor.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Field {
    /// Field name, the identity key within a form.
    pub name: String,

    /// Semantic field kind ("text", "select", "date", ...).
    #[serde(rename = "type")]
    pub kind: String,

    /// Display label. Defaults to the capitalized name.
    pub label: String,

    /// Whether the field is required.
    pub required: bool,

    /// Validation rule tokens, e.g. "max:100".
    pub rules: Vec<String>,

    /// Options for choice-like fields.
    pub options: Vec<OptionItem>,

    /// Default value.
    pub default_value: Option<Value>,

    /// Renderer component override.
    pub component: Option<String>,

    /// Renderer-specific key/value bag.
    pub props: Map<String, Value>,

    /// Placeholder text.
    pub placeholder: Option<String>,

    /// Additional HTML attributes.
    pub attributes: Map<String, Value>,

    /// Help text shown alongside the field.
    pub help_text: Option<String>,
}

impl Field {
    /// Create a field with the given name, defaulting to a text field
    /// labeled with the capitalized name.
    pub fn make(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            label: capitalize(&name),
            name,
            kind: "text".to_string(),
            required: false,
            rules: Vec::new(),
            options: Vec::new(),
            default_value: None,
            component: None,
            props: Map::new(),
            placeholder: None,
            attributes: Map::new(),
            help_text: None,
        }
    }

    /// Set the display label.
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Set the field kind.
    pub fn kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Mark the field required or optional.
    ///
    /// Keeps the `required` rule token in sync so the flag and the derived
    /// rules cannot disagree. A later `rules(...)` call replaces the whole
    /// token list, including this one.
    pub fn required(mut self, required: bool) -> Self {
        self.required = required;
        let position = self.rules.iter().position(|rule| rule == "required");
        match (required, position) {
            (true, None) => self.rules.insert(0, "required".to_string()),
            (false, Some(index)) => {
                self.rules.remove(index);
            }
            _ => {}
        }
        self
    }

    /// Replace the validation rules.
    pub fn rules<I, R>(mut self, rules: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<String>,
    {
        self.rules = rules.into_iter().map(Into::into).collect();
        self
    }

    /// Append a single validation rule.
    pub fn rule(mut self, rule: impl Into<String>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Set the options from any option source.
    pub fn options(mut self, source: impl Into<OptionsSource>) -> Self {
        self.options = source.into().resolve();
        self
    }

    /// Set the default value.
    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default_value = Some(value.into());
        self
    }

    /// Set the placeholder text.
    pub fn placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Set the help text.
    pub fn help_text(mut self, help_text: impl Into<String>) -> Self {
        self.help_text = Some(help_text.into());
        self
    }

    /// Override the renderer component.
    pub fn component(mut self, component: impl Into<String>) -> Self {
        self.component = Some(component.into());
        self
    }

    /// Shallow-merge props; repeated calls accumulate and later keys win.
    pub fn props<K, I>(mut self, props: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, Value)>,
    {
        for (key, value) in props {
            self.props.insert(key.into(), value);
        }
        self
    }

    /// Set a single prop.
    pub fn prop(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.props.insert(key.into(), value.into());
        self
    }

    /// Set a single HTML attribute.
    pub fn attr(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.attributes.insert(key.into(), value.into());
        self
    }
}

/// Uppercase the first character, leaving the rest untouched.
fn capitalize(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
