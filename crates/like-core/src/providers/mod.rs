//! Built-in providers
//!
//! Only the local provider lives in the core: it is the fallback target of
//! every remote provider and has no dependencies beyond local storage.

pub mod local;

pub use local::{LocalFactory, LocalProvider};
