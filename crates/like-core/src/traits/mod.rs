//! Core traits for the like system
//!
//! This module defines the seams every backend and host must implement.
//!
//! - [`LikeProvider`]: Bind and click behavior of one backing store
//! - [`StorageBackend`]: Raw, fallible key/value storage
//! - [`LikeButton`], [`CountDisplay`], [`LikeContainer`]: Host elements

pub mod element;
pub mod like_provider;
pub mod storage_backend;

pub use element::{CountDisplay, LikeButton, LikeContainer};
pub use like_provider::{LikeProvider, LikeProviderFactory, LikeTarget};
pub use storage_backend::StorageBackend;
