//! Entity records served by the CMS API.
//!
//! Every struct derives `Serialize` and `Deserialize` with camelCase field
//! names so it can be handed directly to the browser editor as JSON.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Publication state of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentStatus {
    Draft,
    Published,
    Archived,
}

impl ContentStatus {
    pub const ALL: [ContentStatus; 3] = [Self::Draft, Self::Published, Self::Archived];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Published => "published",
            Self::Archived => "archived",
        }
    }
}

/// How the body of a content item was authored.
///
/// `RichText` bodies come from the rich-text editor, `Page` bodies from the
/// visual page builder (and usually carry `page_css` alongside).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    #[default]
    RichText,
    Page,
}

impl ContentType {
    pub const ALL: [ContentType; 2] = [Self::RichText, Self::Page];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RichText => "richtext",
            Self::Page => "page",
        }
    }
}

/// Closed set of string values accepted by a schema field.
pub trait SchemaEnum: Sized + Copy + 'static {
    const VARIANTS: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(value: &str) -> Option<Self> {
        Self::VARIANTS.iter().copied().find(|v| v.as_str() == value)
    }
}

impl SchemaEnum for ContentStatus {
    const VARIANTS: &'static [Self] = &Self::ALL;

    fn as_str(&self) -> &'static str {
        ContentStatus::as_str(self)
    }
}

impl SchemaEnum for ContentType {
    const VARIANTS: &'static [Self] = &Self::ALL;

    fn as_str(&self) -> &'static str {
        ContentType::as_str(self)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown value '{0}'")]
pub struct UnknownVariant(pub String);

impl FromStr for ContentStatus {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as SchemaEnum>::parse(s).ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl FromStr for ContentType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as SchemaEnum>::parse(s).ok_or_else(|| UnknownVariant(s.to_string()))
    }
}

impl fmt::Display for ContentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

/// A post or page managed by the CMS.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Content {
    /// Unique identifier, assigned by the store.
    pub id: Uuid,
    pub title: String,
    /// Body payload. Opaque to the server; usually HTML.
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub excerpt: Option<String>,
    /// URL-safe identifier. Not guaranteed unique.
    pub slug: String,
    /// Slug of a [`Category`]. Soft reference, never checked.
    pub category: String,
    pub tags: Vec<String>,
    pub status: ContentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub featured_image: Option<String>,
    #[serde(default)]
    pub content_type: ContentType,
    /// Stylesheet produced by the page builder.
    #[serde(rename = "pageCSS", default, skip_serializing_if = "Option::is_none")]
    pub page_css: Option<String>,
    pub created_at: DateTime<Utc>,
    /// Refreshed on every mutation; never earlier than `created_at`.
    pub updated_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

/// A grouping for content items, referenced by slug.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: Uuid,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Display colour, typically a `#RRGGBB` string.
    pub color: String,
    pub slug: String,
    pub created_at: DateTime<Utc>,
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

/// Metadata for an externally hosted file. The bytes themselves are never
/// stored by the server.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: Uuid,
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    /// File size in bytes.
    pub size: u64,
    /// Where the file actually lives.
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    pub created_at: DateTime<Utc>,
}
