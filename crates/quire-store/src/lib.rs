//! # quire-store
//!
//! In-memory storage for the Quire CMS.
//!
//! A [`Store`] owns one [`Collection`] per entity kind and is the only place
//! entity state lives. Every read hands back a clone, so callers can never
//! reach into the collections. Nothing is persisted; a restart starts from
//! an empty (or freshly seeded) store.

pub mod collection;
pub mod entity;
pub mod seed;
pub mod store;

mod error;

pub use collection::Collection;
pub use entity::Entity;
pub use error::{Result, StoreError};
pub use store::{Store, Stored};
