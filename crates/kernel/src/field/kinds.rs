//! Typed field kinds.
//!
//! Each kind wraps the base [`Field`] builder and adds convenience setters
//! that write into `rules` and `props`. The rule-token grammar these setters
//! emit is fixed; the rule engine and any external validator depend on it.

use serde_json::Value;

use super::base::Field;
use super::options::OptionsSource;

/// Define a field kind wrapping the base builder.
///
/// Generates the constructor plus the shared fluent setters, all returning
/// the typed wrapper so kind-specific setters chain freely.
macro_rules! field_kind {
    ($(#[$doc:meta])* $kind_struct:ident, $kind:literal) => {
        $(#[$doc])*
        #[derive(Debug, Clone)]
        pub struct $kind_struct(Field);

        impl $kind_struct {
            /// Create a new field of this kind.
            pub fn make(name: impl Into<String>) -> Self {
                Self(Field::make(name).kind($kind))
            }

            /// Finish building and return the underlying field.
            pub fn build(self) -> Field {
                self.0
            }

            /// Set the display label.
            pub fn label(self, label: impl Into<String>) -> Self {
                Self(self.0.label(label))
            }

            /// Mark the field required or optional.
            pub fn required(self, required: bool) -> Self {
                Self(self.0.required(required))
            }

            /// Replace the validation rules.
            pub fn rules<I, R>(self, rules: I) -> Self
            where
                I: IntoIterator<Item = R>,
                R: Into<String>,
            {
                Self(self.0.rules(rules))
            }

            /// Append a single validation rule.
            pub fn rule(self, rule: impl Into<String>) -> Self {
                Self(self.0.rule(rule))
            }

            /// Set the options from any option source.
            pub fn options(self, source: impl Into<OptionsSource>) -> Self {
                Self(self.0.options(source))
            }

            /// Set the default value.
            pub fn default_value(self, value: impl Into<Value>) -> Self {
                Self(self.0.default_value(value))
            }

            /// Set the placeholder text.
            pub fn placeholder(self, placeholder: impl Into<String>) -> Self {
                Self(self.0.placeholder(placeholder))
            }

            /// Set the help text.
            pub fn help_text(self, help_text: impl Into<String>) -> Self {
                Self(self.0.help_text(help_text))
            }

            /// Override the renderer component.
            pub fn component(self, component: impl Into<String>) -> Self {
                Self(self.0.component(component))
            }

            /// Shallow-merge props.
            pub fn props<K, I>(self, props: I) -> Self
            where
                K: Into<String>,
                I: IntoIterator<Item = (K, Value)>,
            {
                Self(self.0.props(props))
            }

            /// Set a single prop.
            pub fn prop(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
                Self(self.0.prop(key, value))
            }

            /// Set a single HTML attribute.
            pub fn attr(self, key: impl Into<String>, value: impl Into<Value>) -> Self {
                Self(self.0.attr(key, value))
            }
        }

        impl From<$kind_struct> for Field {
            fn from(kind: $kind_struct) -> Field {
                kind.0
            }
        }
    };
}

field_kind!(
    /// Single-line text input.
    TextField,
    "text"
);

field_kind!(
    /// Multi-line text input.
    TextareaField,
    "textarea"
);

field_kind!(
    /// Dropdown select with options.
    SelectField,
    "select"
);

field_kind!(
    /// Checkbox for boolean values.
    CheckboxField,
    "checkbox"
);

field_kind!(
    /// Numeric input with range and precision helpers.
    NumberField,
    "number"
);

field_kind!(
    /// Date input with bound helpers.
    DateField,
    "date"
);

field_kind!(
    /// File upload input.
    FileField,
    "file"
);

impl TextField {
    /// Change the input kind (email, password, ...).
    pub fn input_kind(self, kind: impl Into<String>) -> Self {
        Self(self.0.kind(kind))
    }

    /// Cap the length; records `maxlength` and a `max:` rule.
    pub fn max_length(self, max: usize) -> Self {
        Self(self.0.prop("maxlength", max).rule(format!("max:{max}")))
    }

    /// Require a minimum length; records `minlength` and a `min:` rule.
    pub fn min_length(self, min: usize) -> Self {
        Self(self.0.prop("minlength", min).rule(format!("min:{min}")))
    }

    /// Set an input pattern for the renderer.
    pub fn pattern(self, pattern: impl Into<String>) -> Self {
        Self(self.0.prop("pattern", pattern.into()))
    }
}

impl TextareaField {
    /// Set the number of rows.
    pub fn rows(self, rows: u32) -> Self {
        Self(self.0.prop("rows", rows))
    }

    /// Set the number of columns.
    pub fn cols(self, cols: u32) -> Self {
        Self(self.0.prop("cols", cols))
    }

    /// Cap the length; records `maxlength` and a `max:` rule.
    pub fn max_length(self, max: usize) -> Self {
        Self(self.0.prop("maxlength", max).rule(format!("max:{max}")))
    }
}

impl SelectField {
    /// Allow multiple selections.
    pub fn multiple(self, multiple: bool) -> Self {
        Self(self.0.prop("multiple", multiple))
    }

    /// Set the placeholder option shown before a selection is made.
    pub fn placeholder_option(self, placeholder: impl Into<String>) -> Self {
        Self(self.0.prop("placeholder", placeholder.into()))
    }
}

impl CheckboxField {
    /// Set the value submitted when checked.
    pub fn value(self, value: impl Into<Value>) -> Self {
        Self(self.0.prop("value", value))
    }
}

impl NumberField {
    /// Set the minimum value; records `min` and a `min:` rule.
    pub fn min(self, min: f64) -> Self {
        Self(self.0.prop("min", min).rule(format!("min:{min}")))
    }

    /// Set the maximum value; records `max` and a `max:` rule.
    pub fn max(self, max: f64) -> Self {
        Self(self.0.prop("max", max).rule(format!("max:{max}")))
    }

    /// Set the step value for increments.
    pub fn step(self, step: impl Into<Value>) -> Self {
        Self(self.0.prop("step", step))
    }

    /// Set an inclusive range.
    pub fn between(self, min: f64, max: f64) -> Self {
        self.min(min).max(max)
    }

    /// Accept decimals with the given precision.
    pub fn decimal(self, precision: usize) -> Self {
        let step = if precision == 0 {
            "1".to_string()
        } else {
            format!("0.{}1", "0".repeat(precision - 1))
        };
        Self(
            self.0
                .rule("numeric")
                .rule(format!("decimal:0,{precision}"))
                .prop("step", step),
        )
    }

    /// Accept integers only.
    pub fn integer(self) -> Self {
        Self(self.0.rule("integer").prop("step", "1"))
    }

    /// Accept only non-negative numbers.
    pub fn positive(self) -> Self {
        self.min(0.0)
    }
}

impl DateField {
    /// Set the earliest allowed date; records `min` and an
    /// `after_or_equal:` rule.
    pub fn min(self, min: impl Into<String>) -> Self {
        let min = min.into();
        Self(self.0.rule(format!("after_or_equal:{min}")).prop("min", min))
    }

    /// Set the latest allowed date; records `max` and a
    /// `before_or_equal:` rule.
    pub fn max(self, max: impl Into<String>) -> Self {
        let max = max.into();
        Self(self.0.rule(format!("before_or_equal:{max}")).prop("max", max))
    }

    /// Require a date strictly after the given date.
    pub fn after(self, date: impl Into<String>) -> Self {
        Self(self.0.rule(format!("after:{}", date.into())))
    }

    /// Require a date strictly before the given date.
    pub fn before(self, date: impl Into<String>) -> Self {
        Self(self.0.rule(format!("before:{}", date.into())))
    }

    /// Record the expected date format for the validator.
    pub fn format(self, format: impl Into<String>) -> Self {
        Self(self.0.rule(format!("date_format:{}", format.into())))
    }
}

impl FileField {
    /// Set accepted file types.
    pub fn accept(self, accept: impl Into<String>) -> Self {
        Self(self.0.prop("accept", accept.into()))
    }

    /// Allow multiple file selection.
    pub fn multiple(self, multiple: bool) -> Self {
        Self(self.0.prop("multiple", multiple))
    }

    /// Cap the file size in bytes.
    pub fn max_size(self, max_size: u64) -> Self {
        Self(self.0.prop("maxSize", max_size))
    }
}
