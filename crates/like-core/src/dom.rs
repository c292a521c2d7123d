//! Headless elements
//!
//! In-memory implementations of the element traits. They record every
//! mutation, which makes them the observation point for tests and the
//! element layer of non-browser hosts such as `likectl`.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::traits::{CountDisplay, LikeButton, LikeContainer};

/// One recorded element mutation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Mutation {
    /// `classList.toggle(class, enabled)`
    Class { class: String, enabled: bool },
    /// `setAttribute(name, value)`
    Attribute { name: String, value: String },
    /// `dataset[key] = value`
    Data { key: String, value: String },
}

/// Current visible state of a headless button
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ButtonSnapshot {
    pub classes: BTreeSet<String>,
    pub attributes: BTreeMap<String, String>,
    pub data: BTreeMap<String, String>,
}

#[derive(Debug, Default)]
struct ButtonInner {
    snapshot: ButtonSnapshot,
    mutations: Vec<Mutation>,
}

/// Recording button
#[derive(Debug, Default)]
pub struct HeadlessButton {
    inner: Mutex<ButtonInner>,
}

impl HeadlessButton {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ButtonInner> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.lock().snapshot.classes.contains(class)
    }

    pub fn attribute(&self, name: &str) -> Option<String> {
        self.lock().snapshot.attributes.get(name).cloned()
    }

    pub fn snapshot(&self) -> ButtonSnapshot {
        self.lock().snapshot.clone()
    }

    /// Every mutation applied so far, oldest first
    pub fn mutations(&self) -> Vec<Mutation> {
        self.lock().mutations.clone()
    }
}

impl LikeButton for HeadlessButton {
    fn set_class(&self, class: &str, enabled: bool) {
        let mut inner = self.lock();
        if enabled {
            inner.snapshot.classes.insert(class.to_string());
        } else {
            inner.snapshot.classes.remove(class);
        }
        inner.mutations.push(Mutation::Class {
            class: class.to_string(),
            enabled,
        });
    }

    fn set_attribute(&self, name: &str, value: &str) {
        let mut inner = self.lock();
        inner
            .snapshot
            .attributes
            .insert(name.to_string(), value.to_string());
        inner.mutations.push(Mutation::Attribute {
            name: name.to_string(),
            value: value.to_string(),
        });
    }

    fn data(&self, key: &str) -> Option<String> {
        self.lock().snapshot.data.get(key).cloned()
    }

    fn set_data(&self, key: &str, value: &str) {
        let mut inner = self.lock();
        inner
            .snapshot
            .data
            .insert(key.to_string(), value.to_string());
        inner.mutations.push(Mutation::Data {
            key: key.to_string(),
            value: value.to_string(),
        });
    }
}

/// Recording count display
#[derive(Debug, Default)]
pub struct HeadlessCount {
    history: Mutex<Vec<String>>,
}

impl HeadlessCount {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current text, `None` before the first render
    pub fn text(&self) -> Option<String> {
        self.history().last().cloned()
    }

    /// Every text written so far, oldest first
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl CountDisplay for HeadlessCount {
    fn set_text(&self, text: &str) {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(text.to_string());
    }
}

/// Container with attributes and optional children
///
/// `new()` builds the full markup: a button and a count display.
#[derive(Debug)]
pub struct HeadlessContainer {
    attributes: BTreeMap<String, String>,
    button: Option<Arc<HeadlessButton>>,
    count: Option<Arc<HeadlessCount>>,
}

impl Default for HeadlessContainer {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessContainer {
    pub fn new() -> Self {
        Self {
            attributes: BTreeMap::new(),
            button: Some(Arc::new(HeadlessButton::new())),
            count: Some(Arc::new(HeadlessCount::new())),
        }
    }

    pub fn with_attribute(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.attributes.insert(name.into(), value.into());
        self
    }

    /// Drop the count child
    pub fn without_count(mut self) -> Self {
        self.count = None;
        self
    }

    /// Drop the button child
    pub fn without_button(mut self) -> Self {
        self.button = None;
        self
    }

    pub fn headless_button(&self) -> Option<Arc<HeadlessButton>> {
        self.button.clone()
    }

    pub fn headless_count(&self) -> Option<Arc<HeadlessCount>> {
        self.count.clone()
    }
}

impl LikeContainer for HeadlessContainer {
    fn attribute(&self, name: &str) -> Option<String> {
        self.attributes.get(name).cloned()
    }

    fn button(&self) -> Option<Arc<dyn LikeButton>> {
        self.button
            .clone()
            .map(|button| button as Arc<dyn LikeButton>)
    }

    fn count_display(&self) -> Option<Arc<dyn CountDisplay>> {
        self.count
            .clone()
            .map(|count| count as Arc<dyn CountDisplay>)
    }
}
