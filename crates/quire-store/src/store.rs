//! The [`Store`]: one collection per entity kind plus the kind-specific
//! queries layered on top.

use quire_shared::{Category, Content, ContentStatus, Media};

use crate::collection::Collection;
use crate::entity::Entity;
use crate::seed;

/// An entity kind the [`Store`] keeps a collection of.
///
/// Lets callers work against any kind generically, e.g. one HTTP handler
/// serving every `GET /<kind>/:id` route.
pub trait Stored: Entity {
    fn collection(store: &Store) -> &Collection<Self>;
    fn collection_mut(store: &mut Store) -> &mut Collection<Self>;
}

impl Stored for Content {
    fn collection(store: &Store) -> &Collection<Self> {
        &store.content
    }

    fn collection_mut(store: &mut Store) -> &mut Collection<Self> {
        &mut store.content
    }
}

impl Stored for Category {
    fn collection(store: &Store) -> &Collection<Self> {
        &store.categories
    }

    fn collection_mut(store: &mut Store) -> &mut Collection<Self> {
        &mut store.categories
    }
}

impl Stored for Media {
    fn collection(store: &Store) -> &Collection<Self> {
        &store.media
    }

    fn collection_mut(store: &mut Store) -> &mut Collection<Self> {
        &mut store.media
    }
}

/// Sole owner of all CMS state.
///
/// `Store` does no locking of its own; wrap it in a mutex to share it
/// between request handlers.
#[derive(Debug, Clone, Default)]
pub struct Store {
    content: Collection<Content>,
    categories: Collection<Category>,
    media: Collection<Media>,
}

impl Store {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// A store pre-populated with the sample categories and posts shown on
    /// first launch.
    pub fn seeded() -> Self {
        let mut store = Self::new();
        seed::populate(&mut store);
        store
    }

    /// The collection holding every `E`, e.g. `store.collection::<Media>()`.
    pub fn collection<E: Stored>(&self) -> &Collection<E> {
        E::collection(self)
    }

    pub fn collection_mut<E: Stored>(&mut self) -> &mut Collection<E> {
        E::collection_mut(self)
    }

    // ------------------------------------------------------------------
    // Content queries
    // ------------------------------------------------------------------

    /// First content item with this slug, if any.
    pub fn content_by_slug(&self, slug: &str) -> Option<Content> {
        self.content.find(|c| c.slug == slug)
    }

    pub fn content_by_category(&self, category_slug: &str) -> Vec<Content> {
        self.content.filter(|c| c.category == category_slug)
    }

    pub fn content_by_status(&self, status: ContentStatus) -> Vec<Content> {
        self.content.filter(|c| c.status == status)
    }

    /// Case-insensitive substring search over title, body and tags.
    pub fn search_content(&self, query: &str) -> Vec<Content> {
        let needle = query.to_lowercase();
        self.content.filter(|c| {
            c.title.to_lowercase().contains(&needle)
                || c.content.to_lowercase().contains(&needle)
                || c.tags.iter().any(|t| t.to_lowercase().contains(&needle))
        })
    }

    // ------------------------------------------------------------------
    // Category queries
    // ------------------------------------------------------------------

    pub fn category_by_slug(&self, slug: &str) -> Option<Category> {
        self.categories.find(|c| c.slug == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::StoreError;
    use quire_shared::{CategoryPatch, ContentPatch, ContentType, MediaPatch, NewContent, NewMedia};
    use uuid::Uuid;

    fn new_content(title: &str, slug: &str, category: &str, status: ContentStatus) -> NewContent {
        NewContent {
            title: title.into(),
            content: "<p>body</p>".into(),
            excerpt: None,
            slug: slug.into(),
            category: category.into(),
            tags: vec![],
            status,
            featured_image: None,
            content_type: ContentType::RichText,
            page_css: None,
        }
    }

    fn new_media(filename: &str) -> NewMedia {
        NewMedia {
            filename: filename.into(),
            original_name: filename.into(),
            mime_type: "image/png".into(),
            size: 10,
            url: format!("https://cdn.example.com/{filename}"),
            alt: None,
        }
    }

    #[test]
    fn test_create_echoes_fields() {
        let mut store = Store::new();
        let input = new_content("Hi", "hi", "blog", ContentStatus::Draft);
        let created = store.collection_mut::<Content>().insert(input.clone());

        assert_eq!(created.title, input.title);
        assert_eq!(created.slug, input.slug);
        assert_eq!(created.category, input.category);
        assert_eq!(created.status, input.status);
        assert_eq!(created.created_at, created.updated_at);
        assert_eq!(store.collection::<Content>().get(created.id), Some(created));
    }

    #[test]
    fn test_update_content_changes_only_patched_field() {
        let mut store = Store::new();
        let created = store
            .collection_mut::<Content>()
            .insert(new_content("Hi", "hi", "blog", ContentStatus::Draft));

        let updated = store
            .collection_mut::<Content>()
            .update(
                created.id,
                ContentPatch {
                    status: Some(ContentStatus::Published),
                    ..Default::default()
                },
            )
            .unwrap();

        assert_eq!(updated.status, ContentStatus::Published);
        assert!(updated.updated_at >= created.updated_at);
        assert_eq!(
            Content {
                status: created.status,
                updated_at: created.updated_at,
                ..updated.clone()
            },
            created
        );
        assert_eq!(store.collection::<Content>().get(created.id), Some(updated));
    }

    #[test]
    fn test_update_missing_content() {
        let mut store = Store::new();
        store
            .collection_mut::<Content>()
            .insert(new_content("Hi", "hi", "blog", ContentStatus::Draft));
        let before = store.collection::<Content>().all();

        let err = store
            .collection_mut::<Content>()
            .update(Uuid::new_v4(), ContentPatch::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::NotFound { kind: "Content", .. }));
        assert_eq!(store.collection::<Content>().all(), before);
    }

    #[test]
    fn test_delete_then_get_is_absent() {
        let mut store = Store::new();
        let created = store
            .collection_mut::<Content>()
            .insert(new_content("Hi", "hi", "blog", ContentStatus::Draft));

        assert!(store.collection_mut::<Content>().remove(created.id));
        assert!(store.collection::<Content>().get(created.id).is_none());

        // Unknown ids are a silent no-op.
        let unknown = Uuid::new_v4();
        assert!(!store.collection_mut::<Content>().remove(unknown));
        assert!(store.collection::<Content>().get(unknown).is_none());
    }

    #[test]
    fn test_filters() {
        let mut store = Store::new();
        let a = store
            .collection_mut::<Content>()
            .insert(new_content("A", "a", "blog", ContentStatus::Draft));
        let b = store
            .collection_mut::<Content>()
            .insert(new_content("B", "b", "notes", ContentStatus::Published));
        let c = store
            .collection_mut::<Content>()
            .insert(new_content("C", "a", "blog", ContentStatus::Published));

        assert_eq!(store.content_by_category("blog"), vec![a.clone(), c.clone()]);
        assert_eq!(
            store.content_by_status(ContentStatus::Published),
            vec![b.clone(), c]
        );
        assert_eq!(store.content_by_slug("a"), Some(a));
        assert_eq!(store.content_by_slug("b"), Some(b));
        assert!(store.content_by_slug("zzz").is_none());
        assert!(store.content_by_category("missing").is_empty());
    }

    #[test]
    fn test_search_matches_title_body_and_tags() {
        let mut store = Store::seeded();
        let welcome = store
            .content_by_slug("welcome-to-your-cms")
            .expect("seeded welcome post");

        let hits = store.search_content("cms");
        assert!(hits.contains(&welcome));
        assert!(store.search_content("zzz-no-match").is_empty());

        let mut tagged = new_content("Plain", "plain", "notes", ContentStatus::Draft);
        tagged.tags = vec!["Rust-Lang".into()];
        let tagged = store.collection_mut::<Content>().insert(tagged);
        assert_eq!(store.search_content("rust"), vec![tagged]);

        assert_eq!(store.search_content("PERSONAL CONTENT"), vec![welcome]);
    }

    #[test]
    fn test_list_content_most_recently_updated_first() {
        let mut store = Store::new();
        let first = store
            .collection_mut::<Content>()
            .insert(new_content("1", "1", "blog", ContentStatus::Draft));
        let second = store
            .collection_mut::<Content>()
            .insert(new_content("2", "2", "blog", ContentStatus::Draft));

        std::thread::sleep(std::time::Duration::from_millis(5));
        store
            .collection_mut::<Content>()
            .update(first.id, ContentPatch::default())
            .unwrap();

        let ids: Vec<Uuid> = store.collection::<Content>().all().iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![first.id, second.id]);
    }

    #[test]
    fn test_categories_keep_creation_order() {
        let store = Store::seeded();
        let slugs: Vec<String> = store
            .collection::<Category>()
            .all().into_iter().map(|c| c.slug).collect();
        assert_eq!(slugs, vec!["blog", "pages", "notes"]);
        assert_eq!(store.category_by_slug("notes").unwrap().name, "Notes");
        assert!(store.category_by_slug("nope").is_none());
    }

    #[test]
    fn test_category_update_and_delete() {
        let mut store = Store::seeded();
        let blog = store.category_by_slug("blog").unwrap();

        let updated = store
            .collection_mut::<Category>()
            .update(
                blog.id,
                CategoryPatch {
                    color: Some("#000000".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.color, "#000000");
        assert_eq!(updated.name, blog.name);
        assert_eq!(updated.created_at, blog.created_at);

        assert!(store.collection_mut::<Category>().remove(blog.id));
        assert!(store.collection::<Category>().get(blog.id).is_none());
        assert_eq!(store.collection::<Category>().all().len(), 2);
    }

    #[test]
    fn test_media_lifecycle() {
        let mut store = Store::new();
        let older = store.collection_mut::<Media>().insert(new_media("a.png"));
        std::thread::sleep(std::time::Duration::from_millis(5));
        let newer = store.collection_mut::<Media>().insert(new_media("b.png"));

        let ids: Vec<Uuid> = store.collection::<Media>().all().iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![newer.id, older.id]);

        let patched = store
            .collection_mut::<Media>()
            .update(
                older.id,
                MediaPatch {
                    alt: Some("alt text".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(patched.alt.as_deref(), Some("alt text"));
        assert_eq!(patched.url, older.url);

        assert!(store
            .collection_mut::<Media>()
            .update(Uuid::new_v4(), MediaPatch::default()).is_err());
        assert!(store.collection_mut::<Media>().remove(older.id));
        assert_eq!(store.collection::<Media>().get(older.id), None);
    }
}
