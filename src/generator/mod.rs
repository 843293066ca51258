//! Generator module - writes the site layer's outputs for the external generator

use anyhow::Result;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

use crate::content::{Doc, Post};
use crate::feed::build_feed;
use crate::theme::{layout_wrapper, render_home, ThemeLayout};
use crate::Site;

/// File the resolved configuration is written to
pub const SITE_CONFIG_FILE: &str = "site-config.json";

/// File the selected feed items are written to, under the blog route
pub const FEED_ITEMS_FILE: &str = "feed-items.json";

/// Writes pages, feed selection and configuration into the output directory
pub struct Generator<'a> {
    site: &'a Site,
}

impl<'a> Generator<'a> {
    /// Create a new generator
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Generate every output, returning the written paths
    pub fn generate(&self, posts: &[Post], docs: &[Doc]) -> Result<Vec<PathBuf>> {
        fs::create_dir_all(&self.site.output_dir)?;

        let written = vec![
            self.generate_home(posts)?,
            self.generate_feed_items(posts, docs)?,
            self.generate_site_config()?,
        ];

        Ok(written)
    }

    fn blog_output_dir(&self) -> PathBuf {
        self.site
            .output_dir
            .join(self.site.config.blog.route_base_path.trim_matches('/'))
    }

    /// Home page, wrapped in the layout override
    fn generate_home(&self, posts: &[Post]) -> Result<PathBuf> {
        let config = &self.site.config;
        let layout = layout_wrapper(config, ThemeLayout::new(config));
        let html = render_home(config, posts, &layout).to_html();

        let output_path = self.site.output_dir.join("index.html");
        write_file(&output_path, html)?;
        tracing::info!("Generated index.html");
        Ok(output_path)
    }

    /// Most recent items for the feed plugin
    fn generate_feed_items(&self, posts: &[Post], docs: &[Doc]) -> Result<PathBuf> {
        let feed = build_feed(&self.site.config, posts, docs);

        let output_path = self.blog_output_dir().join(FEED_ITEMS_FILE);
        write_json(&output_path, &feed)?;
        tracing::info!("Generated {} with {} items", FEED_ITEMS_FILE, feed.items.len());
        Ok(output_path)
    }

    /// Resolved configuration for the external generator
    fn generate_site_config(&self) -> Result<PathBuf> {
        let output_path = self.site.output_dir.join(SITE_CONFIG_FILE);
        write_json(&output_path, &self.site.config)?;
        tracing::info!("Generated {}", SITE_CONFIG_FILE);
        Ok(output_path)
    }
}

fn write_file(path: &Path, content: String) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, content)?;
    Ok(())
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    write_file(path, serde_json::to_string_pretty(value)?)
}
