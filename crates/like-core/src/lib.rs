// # like-core
//
// Core library for an optimistic "like" button backed by interchangeable
// stores.
//
// ## Architecture Overview
//
// - **LikeProvider**: Trait for one backing store's bind and click behavior
// - **LikeWidget**: Per-container state plus the shared seed/render helpers
// - **LocalPersistence**: Never-failing adapter over a StorageBackend
// - **ProviderRegistry**: Name-to-factory selector with local fallback
// - **LikeBinder**: One-shot bind entry point guarded by a DOM marker
//
// ## Design Principles
//
// 1. **Two-phase updates**: local state is rendered before any remote call
// 2. **Count-only reconciliation**: remote answers never reverse `liked`
// 3. **No fatal errors**: worst case a widget behaves as local-only
// 4. **Plugin-Based**: remote providers live in their own crates

pub mod binding;
pub mod config;
pub mod dom;
pub mod error;
pub mod model;
pub mod providers;
pub mod registry;
pub mod render;
pub mod storage;
pub mod traits;
pub mod widget;

// Re-export core types for convenience
pub use binding::{BoundWidget, LikeBinder};
pub use config::{LikeSettings, PageContext, ProviderConfig, WidgetAttributes};
pub use error::{Error, Result};
pub use model::{LikeIdentity, LikeState};
pub use providers::LocalProvider;
pub use registry::ProviderRegistry;
pub use storage::LocalPersistence;
pub use traits::{
    CountDisplay, LikeButton, LikeContainer, LikeProvider, LikeProviderFactory, LikeTarget,
    StorageBackend,
};
pub use widget::LikeWidget;
