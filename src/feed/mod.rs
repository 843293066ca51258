//! Recent-items selection for the home page and the blog feed
//!
//! The feed plugin itself (RSS/Atom/JSON serialisation) belongs to the
//! external generator. This module decides which items it gets.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

use crate::config::{FeedContent, FeedOptions, SiteConfig};
use crate::content::{Doc, Post};
use crate::helpers::{absolute_url, full_url_for};

/// Keep the first `limit` items of a newest-first sequence
///
/// Order is preserved. A negative limit selects nothing.
pub fn select_recent<T>(items: &[T], limit: i64) -> &[T] {
    let limit = usize::try_from(limit).unwrap_or(0);
    &items[..limit.min(items.len())]
}

/// Parameters the feed plugin passes to its item-creation hook
#[derive(Debug, Clone)]
pub struct FeedParams<'a, R> {
    pub blog_posts: &'a [Post],
    /// Everything else the plugin passes along, forwarded untouched
    pub rest: R,
}

/// Item-creation hook installed in the blog plugin's feed options
///
/// Keeps only the most recent `options.limit` posts and hands them, with
/// the remaining parameters, to the plugin's default item creator.
pub fn create_feed_items<'a, R, F, T>(
    options: &FeedOptions,
    params: FeedParams<'a, R>,
    default_create_feed_items: F,
) -> T
where
    F: FnOnce(FeedParams<'a, R>) -> T,
{
    let limit = i64::try_from(options.limit).unwrap_or(i64::MAX);
    default_create_feed_items(FeedParams {
        blog_posts: select_recent(params.blog_posts, limit),
        rest: params.rest,
    })
}

/// A feed entry in the shape the feed plugin consumes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeedItem {
    pub title: String,
    pub id: String,
    pub link: String,
    pub date: DateTime<Local>,
    pub description: String,
}

impl FeedItem {
    /// Build an item for a blog post
    pub fn from_post(config: &SiteConfig, post: &Post) -> Self {
        let link = absolute_url(config, &post.permalink);
        Self {
            title: post.title.clone(),
            id: link.clone(),
            link,
            date: post.date,
            description: post.description.clone(),
        }
    }

    /// Build an item for a note
    pub fn from_doc(config: &SiteConfig, doc: &Doc) -> Self {
        let link = absolute_url(config, &doc.permalink);
        Self {
            title: doc.title.clone(),
            id: link.clone(),
            link,
            date: doc.date,
            description: doc.description.clone(),
        }
    }
}

/// The document written next to the blog for the feed plugin
#[derive(Debug, Clone, Serialize)]
pub struct Feed {
    pub title: String,
    pub link: String,
    pub copyright: String,
    pub language: String,
    /// Files the plugin is expected to produce
    pub files: Vec<String>,
    pub items: Vec<FeedItem>,
}

/// Select the feed items according to the configured content filter
pub fn build_feed(config: &SiteConfig, posts: &[Post], docs: &[Doc]) -> Feed {
    let options = &config.blog.feed_options;

    let mut candidates: Vec<FeedItem> = Vec::new();
    if matches!(options.content, FeedContent::All | FeedContent::Posts) {
        candidates.extend(posts.iter().map(|p| FeedItem::from_post(config, p)));
    }
    if matches!(options.content, FeedContent::All | FeedContent::Pages) {
        candidates.extend(docs.iter().map(|d| FeedItem::from_doc(config, d)));
    }
    // Stable sort keeps the incoming order of equal dates
    candidates.sort_by(|a, b| b.date.cmp(&a.date));

    let limit = i64::try_from(options.limit).unwrap_or(i64::MAX);
    let items = select_recent(&candidates, limit).to_vec();

    tracing::debug!(
        "Selected {} of {} feed candidates",
        items.len(),
        candidates.len()
    );

    Feed {
        title: config.title.clone(),
        link: full_url_for(config, &config.blog.route_base_path),
        copyright: options.copyright.clone(),
        language: config.i18n.default_locale.clone(),
        files: options
            .formats
            .file_names()
            .iter()
            .map(|f| f.to_string())
            .collect(),
        items,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn posts(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| {
                let date = Local
                    .with_ymd_and_hms(2023, 1, 1, 0, 0, 0)
                    .unwrap()
                    .checked_sub_signed(chrono::Duration::days(i as i64))
                    .unwrap();
                Post::new(
                    &format!("Post {}", i),
                    &format!("Description {}", i),
                    &format!("/blog/post-{}", i),
                    date,
                )
            })
            .collect()
    }

    #[test]
    fn test_length_is_min_of_limit_and_len() {
        let items = posts(7);
        for n in 0..12 {
            assert_eq!(
                select_recent(&items, n).len(),
                (n as usize).min(items.len())
            );
        }
    }

    #[test]
    fn test_identity_when_limit_exceeds_len() {
        let items = posts(4);
        assert_eq!(select_recent(&items, 4), items.as_slice());
        assert_eq!(select_recent(&items, 100), items.as_slice());
        assert_eq!(select_recent(&items, i64::MAX), items.as_slice());
    }

    #[test]
    fn test_twenty_of_twenty_five() {
        let items = posts(25);
        let recent = select_recent(&items, 20);
        assert_eq!(recent.len(), 20);
        assert_eq!(recent, &items[..20]);
    }

    #[test]
    fn test_order_preserved() {
        let items = posts(10);
        let recent = select_recent(&items, 6);
        for (i, post) in recent.iter().enumerate() {
            assert_eq!(post.permalink, format!("/blog/post-{}", i));
        }
    }

    #[test]
    fn test_zero_and_negative_limits() {
        let items = posts(5);
        assert!(select_recent(&items, 0).is_empty());
        assert!(select_recent(&items, -3).is_empty());
        assert!(select_recent::<Post>(&[], 20).is_empty());
    }

    #[test]
    fn test_create_feed_items_truncates_and_forwards() {
        let items = posts(25);
        let options = FeedOptions::default();

        let (titles, rest) = create_feed_items(
            &options,
            FeedParams {
                blog_posts: &items,
                rest: "site metadata",
            },
            |params| {
                let titles: Vec<String> =
                    params.blog_posts.iter().map(|p| p.title.clone()).collect();
                (titles, params.rest)
            },
        );

        assert_eq!(titles.len(), 20);
        assert_eq!(titles[0], "Post 0");
        assert_eq!(titles[19], "Post 19");
        assert_eq!(rest, "site metadata");
    }

    #[test]
    fn test_build_feed_content_filter() {
        let mut config = SiteConfig::default();
        config.blog.feed_options.limit = 3;
        let items = posts(5);
        let docs = vec![Doc {
            id: "python/python".to_string(),
            title: "Python".to_string(),
            description: String::new(),
            permalink: "/docs/python/python".to_string(),
            date: Local.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
            source: "python/python.md".to_string(),
        }];

        let feed = build_feed(&config, &items, &docs);
        assert_eq!(feed.items.len(), 3);
        assert_eq!(feed.items[0].link, "https://h4c5.github.io/blog/post-0");
        assert_eq!(feed.files, vec!["rss.xml", "atom.xml", "feed.json"]);

        config.blog.feed_options.content = FeedContent::All;
        let feed = build_feed(&config, &items, &docs);
        assert_eq!(feed.items[0].title, "Python");
        assert_eq!(feed.items[1].title, "Post 0");

        config.blog.feed_options.content = FeedContent::Pages;
        let feed = build_feed(&config, &items, &docs);
        assert_eq!(feed.items.len(), 1);
    }

    #[test]
    fn test_feed_links_with_base_url() {
        let dir = tempfile::TempDir::new().unwrap();
        let blog = dir.path().join("blog");
        std::fs::create_dir_all(&blog).unwrap();
        std::fs::write(
            blog.join("post.md"),
            "---\ntitle: Post\ndate: 2023-03-04\n---\n\nTexte",
        )
        .unwrap();

        let config = SiteConfig {
            base_url: "/notes/".to_string(),
            ..Default::default()
        };
        let site = crate::Site::with_config(dir.path(), config);
        let posts = crate::content::loader::ContentLoader::new(&site)
            .load_posts()
            .unwrap();
        assert_eq!(posts[0].permalink, "/notes/blog/post");

        let feed = build_feed(&site.config, &posts, &[]);
        assert_eq!(feed.items[0].link, "https://h4c5.github.io/notes/blog/post");
        assert_eq!(feed.items[0].id, feed.items[0].link);
        assert_eq!(feed.link, "https://h4c5.github.io/notes/blog");
    }

    #[test]
    fn test_doc_item_link_with_base_url() {
        let config = SiteConfig {
            base_url: "/notes/".to_string(),
            ..Default::default()
        };
        let doc = Doc {
            id: "python/python".to_string(),
            title: "Python".to_string(),
            description: String::new(),
            permalink: "/notes/docs/python/python".to_string(),
            date: Local.with_ymd_and_hms(2023, 6, 1, 0, 0, 0).unwrap(),
            source: "python/python.md".to_string(),
        };

        let item = FeedItem::from_doc(&config, &doc);
        assert_eq!(item.link, "https://h4c5.github.io/notes/docs/python/python");
    }
}
