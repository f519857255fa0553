//! Insert and patch payloads accepted by the API.
//!
//! An insert payload carries every field of an entity except the ones the
//! store assigns (`id` and timestamps). A patch payload carries the same
//! fields, each optional; `None` means "leave unchanged".

use serde_json::Value;

use crate::models::{ContentStatus, ContentType};
use crate::validation::{FieldReader, FromJsonBody, ValidationErrors};

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewContent {
    pub title: String,
    pub content: String,
    pub excerpt: Option<String>,
    pub slug: String,
    pub category: String,
    pub tags: Vec<String>,
    pub status: ContentStatus,
    pub featured_image: Option<String>,
    pub content_type: ContentType,
    pub page_css: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContentPatch {
    pub title: Option<String>,
    pub content: Option<String>,
    pub excerpt: Option<String>,
    pub slug: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub status: Option<ContentStatus>,
    pub featured_image: Option<String>,
    pub content_type: Option<ContentType>,
    pub page_css: Option<String>,
}

impl FromJsonBody for NewContent {
    fn from_json_body(body: &Value) -> Result<Self, ValidationErrors> {
        let mut r = FieldReader::new(body)?;
        let title = r.required_string("title");
        let content = r.required_string("content");
        let excerpt = r.optional_string("excerpt");
        let slug = r.required_string("slug");
        let category = r.required_string("category");
        let tags = r.required_string_list("tags");
        let status = r.required_enum::<ContentStatus>("status");
        let featured_image = r.optional_string("featuredImage");
        let content_type = r.optional_enum::<ContentType>("contentType");
        let page_css = r.optional_string("pageCSS");

        match (title, content, slug, category, tags, status) {
            (Some(title), Some(content), Some(slug), Some(category), Some(tags), Some(status))
                if r.is_clean() =>
            {
                Ok(Self {
                    title,
                    content,
                    excerpt,
                    slug,
                    category,
                    tags,
                    status,
                    featured_image,
                    content_type: content_type.unwrap_or_default(),
                    page_css,
                })
            }
            _ => Err(r.into_errors()),
        }
    }
}

impl FromJsonBody for ContentPatch {
    fn from_json_body(body: &Value) -> Result<Self, ValidationErrors> {
        let mut r = FieldReader::new(body)?;
        let patch = Self {
            title: r.optional_string("title"),
            content: r.optional_string("content"),
            excerpt: r.optional_string("excerpt"),
            slug: r.optional_string("slug"),
            category: r.optional_string("category"),
            tags: r.optional_string_list("tags"),
            status: r.optional_enum("status"),
            featured_image: r.optional_string("featuredImage"),
            content_type: r.optional_enum("contentType"),
            page_css: r.optional_string("pageCSS"),
        };
        if r.is_clean() {
            Ok(patch)
        } else {
            Err(r.into_errors())
        }
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewCategory {
    pub name: String,
    pub description: Option<String>,
    pub color: String,
    pub slug: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub color: Option<String>,
    pub slug: Option<String>,
}

impl FromJsonBody for NewCategory {
    fn from_json_body(body: &Value) -> Result<Self, ValidationErrors> {
        let mut r = FieldReader::new(body)?;
        let name = r.required_string("name");
        let description = r.optional_string("description");
        let color = r.required_string("color");
        let slug = r.required_string("slug");

        match (name, color, slug) {
            (Some(name), Some(color), Some(slug)) if r.is_clean() => Ok(Self {
                name,
                description,
                color,
                slug,
            }),
            _ => Err(r.into_errors()),
        }
    }
}

impl FromJsonBody for CategoryPatch {
    fn from_json_body(body: &Value) -> Result<Self, ValidationErrors> {
        let mut r = FieldReader::new(body)?;
        let patch = Self {
            name: r.optional_string("name"),
            description: r.optional_string("description"),
            color: r.optional_string("color"),
            slug: r.optional_string("slug"),
        };
        if r.is_clean() {
            Ok(patch)
        } else {
            Err(r.into_errors())
        }
    }
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMedia {
    pub filename: String,
    pub original_name: String,
    pub mime_type: String,
    pub size: u64,
    pub url: String,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MediaPatch {
    pub filename: Option<String>,
    pub original_name: Option<String>,
    pub mime_type: Option<String>,
    pub size: Option<u64>,
    pub url: Option<String>,
    pub alt: Option<String>,
}

impl FromJsonBody for NewMedia {
    fn from_json_body(body: &Value) -> Result<Self, ValidationErrors> {
        let mut r = FieldReader::new(body)?;
        let filename = r.required_string("filename");
        let original_name = r.required_string("originalName");
        let mime_type = r.required_string("mimeType");
        let size = r.required_size("size");
        let url = r.required_string("url");
        let alt = r.optional_string("alt");

        match (filename, original_name, mime_type, size, url) {
            (Some(filename), Some(original_name), Some(mime_type), Some(size), Some(url))
                if r.is_clean() =>
            {
                Ok(Self {
                    filename,
                    original_name,
                    mime_type,
                    size,
                    url,
                    alt,
                })
            }
            _ => Err(r.into_errors()),
        }
    }
}

impl FromJsonBody for MediaPatch {
    fn from_json_body(body: &Value) -> Result<Self, ValidationErrors> {
        let mut r = FieldReader::new(body)?;
        let patch = Self {
            filename: r.optional_string("filename"),
            original_name: r.optional_string("originalName"),
            mime_type: r.optional_string("mimeType"),
            size: r.optional_size("size"),
            url: r.optional_string("url"),
            alt: r.optional_string("alt"),
        };
        if r.is_clean() {
            Ok(patch)
        } else {
            Err(r.into_errors())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_new_content_minimal() {
        let body = json!({
            "title": "Hi",
            "content": "<p>x</p>",
            "slug": "hi",
            "category": "blog",
            "tags": [],
            "status": "draft"
        });
        let new = NewContent::from_json_body(&body).unwrap();
        assert_eq!(new.title, "Hi");
        assert_eq!(new.content_type, ContentType::RichText);
        assert_eq!(new.excerpt, None);
    }

    #[test]
    fn test_new_content_missing_title() {
        let body = json!({
            "content": "<p>x</p>",
            "slug": "hi",
            "category": "blog",
            "tags": [],
            "status": "draft"
        });
        let errors = NewContent::from_json_body(&body).unwrap_err();
        assert_eq!(errors.len(), 1);
        assert!(errors.mentions("title"));
    }

    #[test]
    fn test_new_content_ignores_server_fields() {
        let body = json!({
            "id": "caller-chosen",
            "createdAt": "yesterday",
            "title": "Hi",
            "content": "",
            "slug": "hi",
            "category": "blog",
            "tags": ["a"],
            "status": "published",
            "contentType": "page",
            "pageCSS": ".x{}"
        });
        let new = NewContent::from_json_body(&body).unwrap();
        assert_eq!(new.content_type, ContentType::Page);
        assert_eq!(new.page_css.as_deref(), Some(".x{}"));
    }

    #[test]
    fn test_new_content_optional_field_wrong_type_rejected() {
        let body = json!({
            "title": "Hi",
            "content": "",
            "slug": "hi",
            "category": "blog",
            "tags": [],
            "status": "draft",
            "excerpt": 5
        });
        let errors = NewContent::from_json_body(&body).unwrap_err();
        assert!(errors.mentions("excerpt"));
    }

    #[test]
    fn test_content_patch_empty_is_valid() {
        let patch = ContentPatch::from_json_body(&json!({})).unwrap();
        assert_eq!(patch, ContentPatch::default());
    }

    #[test]
    fn test_content_patch_rejects_bad_status() {
        let errors = ContentPatch::from_json_body(&json!({ "status": "deleted" })).unwrap_err();
        assert!(errors.mentions("status"));
    }

    #[test]
    fn test_category_reports_every_missing_field() {
        let errors = NewCategory::from_json_body(&json!({ "description": "d" })).unwrap_err();
        assert_eq!(errors.len(), 3);
        assert!(errors.mentions("name"));
        assert!(errors.mentions("color"));
        assert!(errors.mentions("slug"));
    }

    #[test]
    fn test_media_insert_and_patch() {
        let body = json!({
            "filename": "cat.png",
            "originalName": "My Cat.png",
            "mimeType": "image/png",
            "size": 2048,
            "url": "https://cdn.example.com/cat.png"
        });
        let new = NewMedia::from_json_body(&body).unwrap();
        assert_eq!(new.size, 2048);
        assert_eq!(new.alt, None);

        let patch = MediaPatch::from_json_body(&json!({ "alt": "a cat" })).unwrap();
        assert_eq!(patch.alt.as_deref(), Some("a cat"));
        assert_eq!(patch.size, None);

        assert!(MediaPatch::from_json_body(&json!({ "size": "big" })).is_err());
    }
}
