//! Presentational components: links, cards and the licence badge

use super::node::{el, Element, Node};
use crate::config::{FeaturedNote, SiteConfig};
use crate::content::Post;
use crate::helpers::{is_external, url_for};

/// Link to a site path or an external URL
///
/// The target is used as given. External targets open in a new tab.
pub fn link(to: &str, children: impl Into<Node>) -> Element {
    let anchor = el("a").attr("href", to);
    let anchor = if is_external(to) {
        anchor
            .attr("target", "_blank")
            .attr("rel", "noopener noreferrer")
    } else {
        anchor
    };
    anchor.child(children)
}

/// A card with a title header and a description body, linking to `target`
pub fn render_card(title: &str, description: &str, target: &str) -> Node {
    let card = el("div")
        .class("card margin-vert--md")
        .child(el("div").class("card__header").child(el("h3").text(title)))
        .child(el("div").class("card__body").child(el("p").text(description)));

    link(target, card).into()
}

/// Card for a blog post on the home page
pub fn blog_news(post: &Post) -> Node {
    render_card(&post.title, &post.description, &post.permalink)
}

/// Card for a hand-picked note
pub fn new_article(config: &SiteConfig, note: &FeaturedNote) -> Node {
    render_card(&note.title, &note.description, &url_for(config, &note.link))
}

/// Creative Commons Attribution 4.0 badge
pub fn creative_commons() -> Node {
    let label = "Licence Creative Commons Attribution 4.0 International";
    let badge = el("div")
        .child(
            el("img")
                .attr("alt", label)
                .attr("src", "https://i.creativecommons.org/l/by/4.0/88x31.png"),
        )
        .child(el("br"))
        .text(label);

    link("http://creativecommons.org/licenses/by/4.0/", badge)
        .attr("rel", "license")
        .into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Local;

    #[test]
    fn test_render_card_structure() {
        let card = render_card("T", "D", "/x");

        let links = card.find_all("a");
        assert_eq!(links.len(), 1);
        assert_eq!(links[0].get_attr("href"), Some("/x"));
        assert!(!links[0].has_attr("target"));

        let headers = card.find_by_class("card__header");
        assert_eq!(headers.len(), 1);
        assert_eq!(Node::from(headers[0].clone()).text_content(), "T");

        let bodies = card.find_by_class("card__body");
        assert_eq!(bodies.len(), 1);
        assert_eq!(Node::from(bodies[0].clone()).text_content(), "D");

        assert_eq!(
            card.to_html(),
            concat!(
                r#"<a href="/x"><div class="card margin-vert--md">"#,
                r#"<div class="card__header"><h3>T</h3></div>"#,
                r#"<div class="card__body"><p>D</p></div></div></a>"#
            )
        );
    }

    #[test]
    fn test_card_target_is_not_rewritten() {
        let card = render_card("T", "D", "pas une url");
        assert_eq!(card.find_all("a")[0].get_attr("href"), Some("pas une url"));
    }

    #[test]
    fn test_internal_link_passes_through() {
        let a = link("/blog/titre", Node::text("Titre"));
        assert_eq!(a.get_attr("href"), Some("/blog/titre"));
        assert!(!a.has_attr("target"));
        assert!(!a.has_attr("rel"));
    }

    #[test]
    fn test_external_link() {
        let a = link("https://gitlab.com/h4c5", Node::text("Gitlab"));
        assert_eq!(a.get_attr("target"), Some("_blank"));
        assert_eq!(a.get_attr("rel"), Some("noopener noreferrer"));
    }

    #[test]
    fn test_blog_news_uses_permalink() {
        let post = Post::new("Titre", "Résumé", "/blog/titre", Local::now());
        let card = blog_news(&post);
        assert_eq!(card.find_all("a")[0].get_attr("href"), Some("/blog/titre"));
        assert!(card.to_html().contains("<h3>Titre</h3>"));
        assert!(card.to_html().contains("<p>Résumé</p>"));
    }

    #[test]
    fn test_new_article_prefixes_base_url() {
        let config = SiteConfig {
            base_url: "/notes/".to_string(),
            ..Default::default()
        };
        let note = &SiteConfig::default().home.featured_notes[0];
        let card = new_article(&config, note);
        assert_eq!(
            card.find_all("a")[0].get_attr("href"),
            Some("/notes/docs/python/packaging-python")
        );
    }

    #[test]
    fn test_creative_commons() {
        let badge = creative_commons();
        let links = badge.find_all("a");
        assert_eq!(links[0].get_attr("rel"), Some("license"));
        assert_eq!(badge.find_all("img").len(), 1);
    }
}
