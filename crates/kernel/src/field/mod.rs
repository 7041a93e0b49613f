//! Field builders and option sources.
//!
//! A [`Field`] describes one form input: its kind, label, validation rule
//! tokens, options, and renderer hints. Typed kinds in [`kinds`] layer
//! convenience setters over the base builder without changing the
//! serialized shape.

mod base;
mod kinds;
mod options;

pub use base::Field;
pub use kinds::{
    CheckboxField, DateField, FileField, NumberField, SelectField, TextField, TextareaField,
};
pub use options::{EnumCatalog, EnumHandle, EnumOptions, OptionItem, OptionsSource};
