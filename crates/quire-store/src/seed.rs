//! Sample data loaded into a fresh store so the editor is not empty on first
//! launch.

use quire_shared::{Category, Content, ContentStatus, ContentType, NewCategory, NewContent};

use crate::store::Store;

const LANDING_PAGE_HTML: &str = concat!(
    r#"<section class="hero-section bg-gradient-to-r from-blue-500 to-purple-600 text-white py-20">"#,
    r#"<div class="container mx-auto text-center">"#,
    r#"<h1 class="text-4xl font-bold mb-4">Welcome to Our Service</h1>"#,
    r#"<p class="text-xl mb-8">Experience the power of visual page building</p>"#,
    r#"<button class="bg-white text-blue-600 px-8 py-3 rounded-lg font-semibold hover:bg-gray-100">Get Started</button>"#,
    r#"</div></section>"#,
    r#"<section class="py-16 bg-gray-50"><div class="container mx-auto px-4">"#,
    r#"<div class="grid grid-cols-1 md:grid-cols-3 gap-8">"#,
    r#"<div class="text-center"><h3 class="text-2xl font-bold mb-4">Feature 1</h3><p>Amazing feature description</p></div>"#,
    r#"<div class="text-center"><h3 class="text-2xl font-bold mb-4">Feature 2</h3><p>Another great feature</p></div>"#,
    r#"<div class="text-center"><h3 class="text-2xl font-bold mb-4">Feature 3</h3><p>One more awesome feature</p></div>"#,
    r#"</div></div></section>"#,
);

const LANDING_PAGE_CSS: &str = ".hero-section { background: linear-gradient(135deg, #667eea 0%, #764ba2 100%); } .container { max-width: 1200px; }";

fn category(name: &str, description: &str, color: &str, slug: &str) -> NewCategory {
    NewCategory {
        name: name.to_string(),
        description: Some(description.to_string()),
        color: color.to_string(),
        slug: slug.to_string(),
    }
}

/// Insert the default categories and posts into `store`.
pub fn populate(store: &mut Store) {
    for new in [
        category("Blog", "Blog posts and articles", "#3B82F6", "blog"),
        category("Pages", "Static pages", "#10B981", "pages"),
        category("Notes", "Personal notes", "#F59E0B", "notes"),
    ] {
        store.collection_mut::<Category>().insert(new);
    }

    let posts = [
        NewContent {
            title: "Welcome to Your CMS".into(),
            content: concat!(
                "<h1>Welcome to Your Personal Content Management System</h1>",
                "<p>This is your first post! You can edit this content using the rich text editor.</p>",
                "<p>Features include:</p>",
                "<ul><li>Rich text editing</li><li>Category management</li>",
                "<li>Media library</li><li>Content organization</li></ul>",
            )
            .into(),
            excerpt: Some("Welcome to your personal content management system".into()),
            slug: "welcome-to-your-cms".into(),
            category: "blog".into(),
            tags: vec!["welcome".into(), "cms".into(), "getting-started".into()],
            status: ContentStatus::Published,
            featured_image: None,
            content_type: ContentType::RichText,
            page_css: None,
        },
        NewContent {
            title: "About Page".into(),
            content: "<h1>About</h1><p>This is your about page. You can customize this content to tell your story.</p>".into(),
            excerpt: Some("Learn more about this site".into()),
            slug: "about".into(),
            category: "pages".into(),
            tags: vec!["about".into(), "info".into()],
            status: ContentStatus::Published,
            featured_image: None,
            content_type: ContentType::RichText,
            page_css: None,
        },
        NewContent {
            title: "Landing Page Demo".into(),
            content: LANDING_PAGE_HTML.into(),
            excerpt: Some("A sample landing page built with the visual page builder".into()),
            slug: "landing-page-demo".into(),
            category: "pages".into(),
            tags: vec!["demo".into(), "landing".into(), "page-builder".into()],
            status: ContentStatus::Published,
            featured_image: None,
            content_type: ContentType::Page,
            page_css: Some(LANDING_PAGE_CSS.into()),
        },
    ];

    for new in posts {
        store.collection_mut::<Content>().insert(new);
    }

    tracing::debug!(
        categories = store.collection::<Category>().len(),
        content = store.collection::<Content>().len(),
        "seeded sample data"
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use quire_shared::Media;

    #[test]
    fn test_seed_contents() {
        let store = Store::seeded();
        assert_eq!(store.collection::<Category>().len(), 3);
        assert_eq!(store.collection::<Content>().len(), 3);
        assert!(store.collection::<Media>().is_empty());

        let landing = store.content_by_slug("landing-page-demo").unwrap();
        assert_eq!(landing.content_type, ContentType::Page);
        assert!(landing.page_css.is_some());

        // Every seeded post points at a seeded category.
        for post in store.collection::<Content>().all() {
            assert!(store.category_by_slug(&post.category).is_some());
        }
    }
}
