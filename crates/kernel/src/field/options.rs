//! Option sources for choice-like fields.
//!
//! Options can be supplied three ways: as explicit label/value pairs, as an
//! ordered value→label mapping, or from an enumeration type implementing
//! [`EnumOptions`]. Resolution is always explicit at the call site; there is
//! no runtime string-to-type reflection. Named lookups go through an
//! [`EnumCatalog`] populated at boot.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{FormError, FormResult};

/// A single selectable option.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionItem {
    /// Display label.
    pub label: String,

    /// Submitted value.
    pub value: Value,
}

impl OptionItem {
    /// Create a new option.
    pub fn new(label: impl Into<String>, value: impl Into<Value>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

/// An enumeration type usable as an option source.
pub trait EnumOptions {
    /// One option per case, in declaration order.
    fn options() -> Vec<OptionItem>;
}

/// Where a field's options come from.
#[derive(Debug, Clone)]
pub enum OptionsSource {
    /// Ordered label/value pairs, passed through unchanged.
    Explicit(Vec<OptionItem>),

    /// Ordered (value, label) pairs, converted to options.
    Mapping(Vec<(Value, String)>),

    /// A handle to an enumeration type's cases.
    Enumeration(EnumHandle),
}

impl OptionsSource {
    /// Build a mapping source from (value, label) pairs.
    pub fn mapping<V, L, I>(pairs: I) -> Self
    where
        V: Into<Value>,
        L: Into<String>,
        I: IntoIterator<Item = (V, L)>,
    {
        Self::Mapping(
            pairs
                .into_iter()
                .map(|(value, label)| (value.into(), label.into()))
                .collect(),
        )
    }

    /// Build a source from an enumeration type.
    pub fn enumeration<E: EnumOptions>() -> Self {
        Self::Enumeration(EnumHandle {
            name: std::any::type_name::<E>(),
            cases: E::options,
        })
    }

    /// Resolve the source to ordered options.
    pub fn resolve(self) -> Vec<OptionItem> {
        match self {
            Self::Explicit(options) => options,
            Self::Mapping(pairs) => pairs
                .into_iter()
                .map(|(value, label)| OptionItem { label, value })
                .collect(),
            Self::Enumeration(handle) => (handle.cases)(),
        }
    }
}

impl From<Vec<OptionItem>> for OptionsSource {
    fn from(options: Vec<OptionItem>) -> Self {
        Self::Explicit(options)
    }
}

impl<const N: usize> From<[OptionItem; N]> for OptionsSource {
    fn from(options: [OptionItem; N]) -> Self {
        Self::Explicit(options.into())
    }
}

/// A resolved reference to an enumeration type's cases.
#[derive(Clone, Copy)]
pub struct EnumHandle {
    name: &'static str,
    cases: fn() -> Vec<OptionItem>,
}

impl std::fmt::Debug for EnumHandle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EnumHandle").field("name", &self.name).finish()
    }
}

/// Boot-time catalog of named enumerations.
///
/// Applications that configure forms from data (rather than code) register
/// their enumerations here and resolve them by name.
#[derive(Debug, Default)]
pub struct EnumCatalog {
    entries: BTreeMap<String, fn() -> Vec<OptionItem>>,
}

impl EnumCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an enumeration under a name.
    pub fn register<E: EnumOptions>(&mut self, name: impl Into<String>) -> &mut Self {
        self.entries.insert(name.into(), E::options);
        self
    }

    /// Resolve a named enumeration to its options.
    pub fn resolve(&self, name: &str) -> FormResult<Vec<OptionItem>> {
        let cases = self.entries.get(name).ok_or_else(|| {
            FormError::Configuration(format!("unknown enumeration {name}"))
        })?;
        Ok(cases())
    }

    /// Whether a name is registered.
    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }
}

#[cfg(test)]
// Tests are allowed to use unwrap/expect freely.
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use serde_json::json;

    #[allow(dead_code)]
    enum Color {
        Red,
        Green,
    }

    impl EnumOptions for Color {
        fn options() -> Vec<OptionItem> {
            vec![
                OptionItem::new("Red", "red"),
                OptionItem::new("Green", "green"),
            ]
        }
    }

    #[test]
    fn test_mapping_preserves_order() {
        let source = OptionsSource::mapping([("general", "General Inquiry"), ("support", "Support")]);
        let options = source.resolve();

        assert_eq!(options.len(), 2);
        assert_eq!(options[0].label, "General Inquiry");
        assert_eq!(options[0].value, json!("general"));
        assert_eq!(options[1].value, json!("support"));
    }

    #[test]
    fn test_enumeration_source() {
        let options = OptionsSource::enumeration::<Color>().resolve();
        assert_eq!(options[0], OptionItem::new("Red", "red"));
        assert_eq!(options[1], OptionItem::new("Green", "green"));
    }

    #[test]
    fn test_catalog_resolves_registered_enum() {
        let mut catalog = EnumCatalog::new();
        catalog.register::<Color>("color");

        assert!(catalog.contains("color"));
        let options = catalog.resolve("color").unwrap();
        assert_eq!(options.len(), 2);
    }

    #[test]
    fn test_catalog_unknown_name_is_configuration_error() {
        let catalog = EnumCatalog::new();
        let err = catalog.resolve("missing").unwrap_err();
        assert!(matches!(err, FormError::Configuration(_)));
        assert!(err.to_string().contains("missing"));
    }
}
