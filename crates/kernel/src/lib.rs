//! Formello Kernel Library
//!
//! Declarative form definitions, a boot-time registry, and submission
//! validation and dispatch. The `formello` binary serves the HTTP surface;
//! this library exposes the internals for embedding and integration
//! testing.

pub mod config;
pub mod error;
pub mod field;
pub mod form;
pub mod registrar;
pub mod registry;
pub mod routes;
pub mod state;
pub mod submission;
pub mod validate;
