//! Post and Doc models

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// A published blog post, as handed over by the content pipeline
///
/// Posts are immutable once built. Collections of posts are kept newest
/// first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    /// Post title
    pub title: String,

    /// Short summary shown on cards and in the feed
    pub description: String,

    /// Site path of the post, base URL included
    pub permalink: String,

    /// Publication date
    pub date: DateTime<Local>,

    /// URL-friendly name
    pub slug: String,

    /// Post tags
    pub tags: Vec<String>,

    /// Source file path, relative to the blog directory
    pub source: String,

    /// Drafts are never listed
    pub draft: bool,
}

impl Post {
    /// Create a post with minimal required fields
    pub fn new(title: &str, description: &str, permalink: &str, date: DateTime<Local>) -> Self {
        Self {
            title: title.to_string(),
            description: description.to_string(),
            permalink: permalink.to_string(),
            date,
            slug: slug::slugify(title),
            tags: Vec::new(),
            source: String::new(),
            draft: false,
        }
    }
}

/// A note page under the docs directory
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Doc {
    /// Doc id, its path under the docs directory without extension
    pub id: String,

    pub title: String,

    pub description: String,

    /// Site path of the note, base URL included
    pub permalink: String,

    /// Last modification of the source file
    pub date: DateTime<Local>,

    /// Source file path, relative to the docs directory
    pub source: String,
}
