//! The [`Entity`] trait and its implementations for every stored kind.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use quire_shared::{
    Category, CategoryPatch, Content, ContentPatch, FromJsonBody, Media, MediaPatch, NewCategory,
    NewContent, NewMedia,
};

/// A record kind that can live in a [`Collection`](crate::Collection).
pub trait Entity: Clone + Send + 'static {
    /// Human-readable kind name, used in not-found messages.
    const KIND: &'static str;

    /// Everything a caller supplies on create.
    type Insert: FromJsonBody + Send;

    /// Partial update; absent fields are left untouched.
    type Patch: FromJsonBody + Send;

    fn id(&self) -> Uuid;

    /// Build a new record from caller input plus store-assigned fields.
    fn from_insert(id: Uuid, now: DateTime<Utc>, insert: Self::Insert) -> Self;

    /// Merge `patch` into `self`. `now` is the time of the mutation.
    fn apply_patch(&mut self, patch: Self::Patch, now: DateTime<Utc>);

    /// Put a full listing into presentation order. Must be a stable sort.
    /// The default keeps insertion order.
    fn sort_for_listing(_items: &mut [Self]) {}
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(value) = value {
        *slot = value;
    }
}

fn merge_opt<T>(slot: &mut Option<T>, value: Option<T>) {
    if value.is_some() {
        *slot = value;
    }
}

// ---------------------------------------------------------------------------
// Content
// ---------------------------------------------------------------------------

impl Entity for Content {
    const KIND: &'static str = "Content";
    type Insert = NewContent;
    type Patch = ContentPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_insert(id: Uuid, now: DateTime<Utc>, new: NewContent) -> Self {
        Self {
            id,
            title: new.title,
            content: new.content,
            excerpt: new.excerpt,
            slug: new.slug,
            category: new.category,
            tags: new.tags,
            status: new.status,
            featured_image: new.featured_image,
            content_type: new.content_type,
            page_css: new.page_css,
            created_at: now,
            updated_at: now,
        }
    }

    fn apply_patch(&mut self, patch: ContentPatch, now: DateTime<Utc>) {
        merge(&mut self.title, patch.title);
        merge(&mut self.content, patch.content);
        merge_opt(&mut self.excerpt, patch.excerpt);
        merge(&mut self.slug, patch.slug);
        merge(&mut self.category, patch.category);
        merge(&mut self.tags, patch.tags);
        merge(&mut self.status, patch.status);
        merge_opt(&mut self.featured_image, patch.featured_image);
        merge(&mut self.content_type, patch.content_type);
        merge_opt(&mut self.page_css, patch.page_css);
        // Clamp so a wall clock stepping backwards never breaks ordering.
        self.updated_at = now.max(self.updated_at);
    }

    /// Most recently edited first.
    fn sort_for_listing(items: &mut [Self]) {
        items.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
    }
}

// ---------------------------------------------------------------------------
// Category
// ---------------------------------------------------------------------------

impl Entity for Category {
    const KIND: &'static str = "Category";
    type Insert = NewCategory;
    type Patch = CategoryPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_insert(id: Uuid, now: DateTime<Utc>, new: NewCategory) -> Self {
        Self {
            id,
            name: new.name,
            description: new.description,
            color: new.color,
            slug: new.slug,
            created_at: now,
        }
    }

    fn apply_patch(&mut self, patch: CategoryPatch, _now: DateTime<Utc>) {
        merge(&mut self.name, patch.name);
        merge_opt(&mut self.description, patch.description);
        merge(&mut self.color, patch.color);
        merge(&mut self.slug, patch.slug);
    }
}

// ---------------------------------------------------------------------------
// Media
// ---------------------------------------------------------------------------

impl Entity for Media {
    const KIND: &'static str = "Media";
    type Insert = NewMedia;
    type Patch = MediaPatch;

    fn id(&self) -> Uuid {
        self.id
    }

    fn from_insert(id: Uuid, now: DateTime<Utc>, new: NewMedia) -> Self {
        Self {
            id,
            filename: new.filename,
            original_name: new.original_name,
            mime_type: new.mime_type,
            size: new.size,
            url: new.url,
            alt: new.alt,
            created_at: now,
        }
    }

    fn apply_patch(&mut self, patch: MediaPatch, _now: DateTime<Utc>) {
        merge(&mut self.filename, patch.filename);
        merge(&mut self.original_name, patch.original_name);
        merge(&mut self.mime_type, patch.mime_type);
        merge(&mut self.size, patch.size);
        merge(&mut self.url, patch.url);
        merge_opt(&mut self.alt, patch.alt);
    }

    /// Newest upload first. Media has no `updated_at`.
    fn sort_for_listing(items: &mut [Self]) {
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use quire_shared::ContentStatus;

    fn sample_content(now: DateTime<Utc>) -> Content {
        Content::from_insert(
            Uuid::new_v4(),
            now,
            NewContent {
                title: "Hello".into(),
                content: "<p>body</p>".into(),
                excerpt: Some("short".into()),
                slug: "hello".into(),
                category: "blog".into(),
                tags: vec!["a".into()],
                status: ContentStatus::Draft,
                featured_image: None,
                content_type: Default::default(),
                page_css: None,
            },
        )
    }

    #[test]
    fn test_patch_touches_only_supplied_fields() {
        let now = Utc::now();
        let before = sample_content(now);
        let mut after = before.clone();

        let later = now + Duration::seconds(5);
        after.apply_patch(
            ContentPatch {
                title: Some("Changed".into()),
                ..Default::default()
            },
            later,
        );

        assert_eq!(after.title, "Changed");
        assert_eq!(after.updated_at, later);
        assert_eq!(
            Content {
                title: before.title.clone(),
                updated_at: before.updated_at,
                ..after
            },
            before
        );
    }

    #[test]
    fn test_updated_at_never_goes_backwards() {
        let now = Utc::now();
        let mut content = sample_content(now);
        content.apply_patch(ContentPatch::default(), now - Duration::hours(1));
        assert_eq!(content.updated_at, now);
        assert!(content.updated_at >= content.created_at);
    }

    #[test]
    fn test_content_listing_order() {
        let now = Utc::now();
        let old = sample_content(now);
        let new = sample_content(now + Duration::seconds(1));
        let mut items = vec![old.clone(), new.clone()];
        Content::sort_for_listing(&mut items);
        assert_eq!(items[0].id, new.id);
        assert_eq!(items[1].id, old.id);
    }
}
