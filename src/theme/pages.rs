//! The home page owned by the site layer

use super::components::{blog_news, new_article};
use super::layout::document;
use super::node::{el, Element, Node};
use super::wrapper::{Component, LayoutProps};
use crate::config::SiteConfig;
use crate::content::Post;
use crate::feed::select_recent;

/// Hero banner at the top of the home page
pub fn homepage_header(config: &SiteConfig) -> Node {
    el("header")
        .class("hero hero--primary")
        .child(
            el("div")
                .class("container")
                .child(el("h1").class("hero__title").text(&config.home.hero_title))
                .child(
                    el("p")
                        .class("hero__subtitle")
                        .text(&config.home.hero_subtitle),
                ),
        )
        .into()
}

fn section(heading: &str, cards: Vec<Node>) -> Element {
    el("div")
        .class("container margin-vert--xl")
        .child(el("div").child(el("h2").text(heading)))
        .child(el("div").children(cards))
}

/// Body of the home page: hero, featured notes and the most recent posts
pub fn home_content(config: &SiteConfig, posts: &[Post]) -> Node {
    let recent = select_recent(posts, config.home.recent_posts);

    let notes = config
        .home
        .featured_notes
        .iter()
        .map(|note| new_article(config, note))
        .collect();
    let posts = recent.iter().map(blog_news).collect();

    Node::Fragment(vec![
        homepage_header(config),
        el("main")
            .child(
                el("div")
                    .class("container")
                    .child(section("Notes récentes :", notes))
                    .child(section("Posts récents :", posts)),
            )
            .into(),
    ])
}

/// Complete home page document
pub fn render_home<L>(config: &SiteConfig, posts: &[Post], layout: &L) -> Node
where
    L: Component<LayoutProps>,
{
    let props = LayoutProps {
        title: Some(config.home.title.clone()),
        description: Some(config.description.clone()),
        children: home_content(config, posts),
    };
    let body = layout.render(&props);
    document(config, &props, body)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::{layout_wrapper, ThemeLayout};
    use chrono::{Duration, Local};

    fn posts(n: usize) -> Vec<Post> {
        (0..n)
            .map(|i| {
                Post::new(
                    &format!("Post {}", i),
                    "",
                    &format!("/blog/post-{}", i),
                    Local::now() - Duration::days(i as i64),
                )
            })
            .collect()
    }

    #[test]
    fn test_home_content_limits_recent_posts() {
        let config = SiteConfig::default();
        let node = home_content(&config, &posts(8));

        // one featured note plus five posts
        assert_eq!(node.find_by_class("card").len(), 6);
        let hrefs: Vec<_> = node
            .find_all("a")
            .iter()
            .filter_map(|a| a.get_attr("href"))
            .collect();
        assert_eq!(hrefs[0], "/docs/python/packaging-python");
        assert_eq!(hrefs[1], "/blog/post-0");
        assert_eq!(hrefs[5], "/blog/post-4");
    }

    #[test]
    fn test_home_content_without_posts() {
        let mut config = SiteConfig::default();
        config.home.featured_notes.clear();
        let node = home_content(&config, &[]);
        assert!(node.find_by_class("card").is_empty());
        assert_eq!(node.find_all("h2").len(), 2);
    }

    #[test]
    fn test_render_home_document() {
        let config = SiteConfig::default();
        let layout = layout_wrapper(&config, ThemeLayout::new(&config));
        let html = render_home(&config, &posts(2), &layout).to_html();

        assert!(html.contains("<title>Accueil | HacheNotes</title>"));
        assert!(html.contains("👋 Bienvenue"));
        assert!(html.contains("<h3>Post 1</h3>"));

        // analytics script follows the layout inside the body
        let footer_end = html.find("</footer>").unwrap();
        let script = html.find("_vercel/insights/script.js").unwrap();
        assert!(footer_end < script);
        assert!(html.ends_with("</script></body></html>"));
    }
}
