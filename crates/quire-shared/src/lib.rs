//! # quire-shared
//!
//! Entity schemas shared by the Quire store and HTTP server: the stored
//! records, the payloads accepted on create and patch, and the field-level
//! validator that turns an untyped JSON body into one of those payloads.

pub mod models;
pub mod payloads;
pub mod validation;

pub use models::{Category, Content, ContentStatus, ContentType, Media};
pub use payloads::{CategoryPatch, ContentPatch, MediaPatch, NewCategory, NewContent, NewMedia};
pub use validation::{FromJsonBody, ValidationErrors, ValidationIssue};
