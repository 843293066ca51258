//! List what the site layer sees

use anyhow::Result;

use crate::config::FooterLinks;
use crate::content::loader::ContentLoader;
use crate::feed::build_feed;
use crate::helpers::truncate;
use crate::theme::nav_href;
use crate::Site;

/// List site content by type
pub fn run(site: &Site, content_type: &str) -> Result<()> {
    let loader = ContentLoader::new(site);
    let config = &site.config;

    match content_type {
        "post" | "posts" => {
            let posts = loader.load_posts()?;
            println!("Posts ({}):", posts.len());
            for post in posts {
                println!(
                    "  {} - {} [{}]",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.permalink
                );
            }
        }
        "doc" | "docs" => {
            let docs = loader.load_docs()?;
            println!("Docs ({}):", docs.len());
            for doc in docs {
                println!("  {} [{}]", doc.title, doc.permalink);
            }
        }
        "feed" => {
            let feed = build_feed(config, &loader.load_posts()?, &loader.load_docs()?);
            println!(
                "Feed ({} of at most {}, {:?}):",
                feed.items.len(),
                config.blog.feed_options.limit,
                config.blog.feed_options.content
            );
            for item in feed.items {
                println!(
                    "  {} - {} {}",
                    item.date.format("%Y-%m-%d"),
                    item.title,
                    truncate(&item.description, 60, None)
                );
            }
        }
        "nav" => {
            println!("Navbar ({}):", config.theme.navbar.items.len());
            for item in &config.theme.navbar.items {
                println!(
                    "  {:?} {} -> {}",
                    item.position,
                    item.label,
                    nav_href(config, item)
                );
            }
        }
        "footer" => match &config.theme.footer.links {
            FooterLinks::Flat(links) => {
                println!("Footer ({}):", links.len());
                for link in links {
                    println!("  {} -> {}", link.label, link.target);
                }
            }
            FooterLinks::Grouped(sections) => {
                println!("Footer ({} sections):", sections.len());
                for section in sections {
                    println!("  {}", section.title);
                    for link in &section.items {
                        println!("    {} -> {}", link.label, link.target);
                    }
                }
            }
        },
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: posts, docs, feed, nav, footer",
                content_type
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    #[test]
    fn test_known_and_unknown_types() {
        let dir = TempDir::new().unwrap();
        let site = Site::with_config(dir.path(), SiteConfig::default());
        for kind in ["posts", "docs", "feed", "nav", "footer"] {
            assert!(run(&site, kind).is_ok(), "{} failed", kind);
        }
        assert!(run(&site, "tags").is_err());
    }
}
