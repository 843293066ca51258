//! Theme overrides: render a provided component, then one fixed extra node
//!
//! Three overrides exist. The page layout gets the analytics script, blog
//! post items and doc contents get the comments widget. Each override takes
//! exactly the props of the component it wraps and forwards them as-is.

use super::embeds::{AnalyticsScript, Giscus};
use super::node::Node;
use crate::config::SiteConfig;
use crate::content::{Doc, Post};

/// Something that produces markup on its own
pub trait Render {
    fn render(&self) -> Node;
}

impl<F> Render for F
where
    F: Fn() -> Node,
{
    fn render(&self) -> Node {
        self()
    }
}

/// Renders nothing; stands in for an embed in tests
#[derive(Debug, Clone, Copy, Default)]
pub struct Empty;

impl Render for Empty {
    fn render(&self) -> Node {
        Node::empty()
    }
}

/// A component rendering markup from props
pub trait Component<P> {
    fn render(&self, props: &P) -> Node;
}

impl<P, F> Component<P> for F
where
    F: Fn(&P) -> Node,
{
    fn render(&self, props: &P) -> Node {
        self(props)
    }
}

/// Render `base` followed by `extra`, both always
pub fn wrap(base: &dyn Render, extra: &dyn Render) -> Node {
    Node::Fragment(vec![base.render(), extra.render()])
}

/// An override of `original` that appends `extra`
#[derive(Debug, Clone)]
pub struct Wrapped<C, E> {
    original: C,
    extra: E,
}

impl<C, E> Wrapped<C, E> {
    pub fn new(original: C, extra: E) -> Self {
        Self { original, extra }
    }
}

impl<P, C, E> Component<P> for Wrapped<C, E>
where
    C: Component<P>,
    E: Render,
{
    fn render(&self, props: &P) -> Node {
        wrap(&|| self.original.render(props), &self.extra)
    }
}

/// Props of the page layout
#[derive(Debug, Clone, Default)]
pub struct LayoutProps {
    /// Document title; the site title alone when absent
    pub title: Option<String>,
    pub description: Option<String>,
    pub children: Node,
}

/// Props of a blog post item
#[derive(Debug, Clone)]
pub struct BlogPostItemProps {
    pub post: Post,
    /// Post body rendered by the generator
    pub children: Node,
}

/// Props of a doc page's content area
#[derive(Debug, Clone)]
pub struct DocItemContentProps {
    pub doc: Doc,
    /// Doc body rendered by the generator
    pub children: Node,
}

pub type LayoutWrapper<L> = Wrapped<L, AnalyticsScript>;
pub type BlogPostItemWrapper<B> = Wrapped<B, Giscus>;
pub type DocItemContentWrapper<D> = Wrapped<D, Giscus>;

/// Layout followed by the analytics script
pub fn layout_wrapper<L>(config: &SiteConfig, layout: L) -> LayoutWrapper<L>
where
    L: Component<LayoutProps>,
{
    Wrapped::new(layout, AnalyticsScript::new(&config.analytics))
}

/// Blog post item followed by the comments widget
pub fn blog_post_item_wrapper<B>(config: &SiteConfig, item: B) -> BlogPostItemWrapper<B>
where
    B: Component<BlogPostItemProps>,
{
    Wrapped::new(item, Giscus::new(&config.comments))
}

/// Doc content followed by the comments widget
pub fn doc_item_content_wrapper<D>(config: &SiteConfig, content: D) -> DocItemContentWrapper<D>
where
    D: Component<DocItemContentProps>,
{
    Wrapped::new(content, Giscus::new(&config.comments))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::theme::node::el;
    use chrono::Local;

    fn text(s: &'static str) -> impl Fn() -> Node {
        move || Node::text(s)
    }

    #[test]
    fn test_wrap_renders_base_then_extra() {
        let node = wrap(&text("A"), &text("B"));
        assert_eq!(node, Node::Fragment(vec![Node::text("A"), Node::text("B")]));
        assert_eq!(node.to_html(), "AB");
    }

    #[test]
    fn test_wrap_with_empty_parts() {
        let node = wrap(&Empty, &text("B"));
        assert_eq!(node, Node::Fragment(vec![Node::empty(), Node::text("B")]));
        assert_eq!(node.to_html(), "B");

        let node = wrap(&text("A"), &Empty);
        assert_eq!(node.to_html(), "A");

        let node = wrap(&Empty, &Empty);
        assert!(node.is_empty());
    }

    #[test]
    fn test_props_are_forwarded_unchanged() {
        let original = |props: &LayoutProps| -> Node {
            el("main")
                .attr("title", props.title.clone().unwrap_or_default())
                .child(props.children.clone())
                .into()
        };
        let props = LayoutProps {
            title: Some("Accueil".to_string()),
            description: None,
            children: Node::text("contenu"),
        };

        let wrapped = Wrapped::new(original, Empty);
        match wrapped.render(&props) {
            Node::Fragment(parts) => {
                assert_eq!(parts.len(), 2);
                assert_eq!(parts[0], original(&props));
                assert!(parts[1].is_empty());
            }
            other => panic!("expected a fragment, got {:?}", other),
        }
    }

    #[test]
    fn test_layout_wrapper_appends_analytics() {
        let config = SiteConfig::default();
        let layout = layout_wrapper(&config, |props: &LayoutProps| props.children.clone());
        let html = layout
            .render(&LayoutProps {
                children: Node::text("page"),
                ..Default::default()
            })
            .to_html();
        assert!(html.starts_with("page<script defer src="));
        assert!(html.ends_with("</script>"));
    }

    #[test]
    fn test_blog_post_item_wrapper_appends_comments() {
        let config = SiteConfig::default();
        let item = blog_post_item_wrapper(&config, |props: &BlogPostItemProps| -> Node {
            el("article")
                .child(el("h1").text(&props.post.title))
                .child(props.children.clone())
                .into()
        });
        let props = BlogPostItemProps {
            post: Post::new("Titre", "", "/blog/titre", Local::now()),
            children: Node::raw("<p>corps</p>"),
        };
        let node = item.render(&props);
        let html = node.to_html();

        let article = html.find("<article>").unwrap();
        let separator = html.find("<hr>").unwrap();
        assert!(article < separator);
        assert!(html.contains("<p>corps</p>"));
        assert_eq!(node.find_all("script").len(), 1);
    }

    #[test]
    fn test_doc_item_content_wrapper_appends_comments() {
        let config = SiteConfig::default();
        let content = doc_item_content_wrapper(&config, |props: &DocItemContentProps| {
            props.children.clone()
        });
        let props = DocItemContentProps {
            doc: Doc {
                id: "python/python".to_string(),
                title: "Python".to_string(),
                description: String::new(),
                permalink: "/docs/python/python".to_string(),
                date: Local::now(),
                source: "python/python.md".to_string(),
            },
            children: Node::empty(),
        };
        let node = content.render(&props);
        assert!(node.to_html().starts_with("<hr><script"));
    }
}
