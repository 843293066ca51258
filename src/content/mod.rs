//! Content module - post and note metadata

mod frontmatter;
pub mod loader;
mod post;

pub use frontmatter::FrontMatter;
pub use post::{Doc, Post};
