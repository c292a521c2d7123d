// # Element Traits
//
// The host page owns the real elements. The core only needs a handful of
// mutations on them, so each element kind is a narrow trait.
//
// ## Implementations
//
// - Headless, recording: `like_core::dom`
// - Browser bindings live outside this workspace

use std::sync::Arc;

/// The clickable like button
///
/// Rendering touches only its class list and one attribute. The dataset
/// accessors carry the one-shot binding marker.
pub trait LikeButton: Send + Sync {
    /// Add (`enabled == true`) or remove a class
    fn set_class(&self, class: &str, enabled: bool);

    /// Set a plain attribute such as `aria-pressed`
    fn set_attribute(&self, name: &str, value: &str);

    /// Read a `data-*` entry (key without the `data-` prefix)
    fn data(&self, key: &str) -> Option<String>;

    /// Write a `data-*` entry (key without the `data-` prefix)
    fn set_data(&self, key: &str, value: &str);
}

/// Optional element showing the aggregate count
pub trait CountDisplay: Send + Sync {
    /// Replace the text content
    fn set_text(&self, text: &str);
}

/// The widget container carrying the markup contract
///
/// Attribute names are the full markup names, e.g. `data-like-id`.
pub trait LikeContainer: Send + Sync {
    /// Read an attribute; `None` when absent
    fn attribute(&self, name: &str) -> Option<String>;

    /// The clickable child, if the markup has one
    fn button(&self) -> Option<Arc<dyn LikeButton>>;

    /// The count child, if the markup has one
    fn count_display(&self) -> Option<Arc<dyn CountDisplay>>;
}
