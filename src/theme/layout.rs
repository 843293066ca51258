//! Base page layout: navbar, main content and footer, plus the HTML document around it

use super::components::link;
use super::node::{el, Element, Node};
use super::wrapper::{Component, LayoutProps};
use crate::config::{
    FeedFormat, FooterLinks, FooterStyle, NavItem, NavPosition, NavTarget, SiteConfig,
};
use crate::helpers::url_for;

/// Resolve where a navbar item points
pub fn nav_href(config: &SiteConfig, item: &NavItem) -> String {
    match &item.target {
        NavTarget::Doc { doc_id } => url_for(config, &format!("docs/{}", doc_id)),
        NavTarget::Route { to } => url_for(config, to),
        NavTarget::External { href } => href.clone(),
    }
}

/// The layout every page is rendered in
#[derive(Debug, Clone, Copy)]
pub struct ThemeLayout<'a> {
    config: &'a SiteConfig,
}

impl<'a> ThemeLayout<'a> {
    pub fn new(config: &'a SiteConfig) -> Self {
        Self { config }
    }

    fn navbar(&self) -> Element {
        let navbar = &self.config.theme.navbar;

        let mut brand = el("a")
            .class("navbar__brand")
            .attr("href", url_for(self.config, ""));
        if let Some(logo) = &navbar.logo {
            brand = brand.child(
                el("img")
                    .class("navbar__logo")
                    .attr("src", url_for(self.config, &logo.src))
                    .attr("alt", &logo.alt),
            );
        }
        brand = brand.child(el("b").class("navbar__title").text(&navbar.title));

        let items = |position: NavPosition| -> Vec<Element> {
            navbar
                .items
                .iter()
                .filter(|item| item.position == position)
                .map(|item| {
                    link(&nav_href(self.config, item), Node::text(&item.label))
                        .class("navbar__item navbar__link")
                })
                .collect()
        };

        el("nav").class("navbar").child(
            el("div")
                .class("navbar__inner")
                .child(
                    el("div")
                        .class("navbar__items")
                        .child(brand)
                        .children(items(NavPosition::Left)),
                )
                .child(
                    el("div")
                        .class("navbar__items navbar__items--right")
                        .children(items(NavPosition::Right)),
                ),
        )
    }

    fn footer(&self) -> Element {
        let footer = &self.config.theme.footer;
        let style = match footer.style {
            FooterStyle::Dark => "footer footer--dark",
            FooterStyle::Light => "footer",
        };

        let item = |label: &str, target: &str| {
            el("li")
                .class("footer__item")
                .child(
                    link(&url_for(self.config, target), Node::text(label))
                        .class("footer__link-item"),
                )
        };

        let links: Node = match &footer.links {
            FooterLinks::Flat(links) => el("ul")
                .class("footer__links")
                .children(links.iter().map(|l| item(&l.label, &l.target)))
                .into(),
            FooterLinks::Grouped(sections) => el("div")
                .class("row footer__links")
                .children(sections.iter().map(|section| {
                    el("div")
                        .class("col footer__col")
                        .child(el("div").class("footer__title").text(&section.title))
                        .child(
                            el("ul")
                                .class("footer__items")
                                .children(section.items.iter().map(|l| item(&l.label, &l.target))),
                        )
                }))
                .into(),
        };

        el("footer").class(style).child(
            el("div")
                .class("container")
                .child(links)
                .child(el("div").class("footer__copyright").child(Node::raw(&footer.copyright))),
        )
    }
}

impl Component<LayoutProps> for ThemeLayout<'_> {
    fn render(&self, props: &LayoutProps) -> Node {
        Node::Fragment(vec![
            self.navbar().into(),
            el("div")
                .class("main-wrapper")
                .child(props.children.clone())
                .into(),
            self.footer().into(),
        ])
    }
}

/// Wrap a rendered body in the HTML document with its head
pub fn document(config: &SiteConfig, props: &LayoutProps, body: Node) -> Node {
    let title = match &props.title {
        Some(title) => format!("{} | {}", title, config.title),
        None => config.title.clone(),
    };

    let mut head = el("head")
        .child(el("meta").attr("charset", "UTF-8"))
        .child(
            el("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1.0"),
        )
        .child(el("title").text(&title));

    if let Some(description) = &props.description {
        head = head.child(
            el("meta")
                .attr("name", "description")
                .attr("content", description),
        );
    }

    head = head
        .children(config.theme.metadata.iter().map(|meta| {
            el("meta").attr("name", &meta.name).attr("content", &meta.content)
        }))
        .child(
            el("link")
                .attr("rel", "icon")
                .attr("href", url_for(config, &config.favicon)),
        )
        .children(feed_links(config));

    let html = el("html")
        .attr("lang", &config.i18n.default_locale)
        .attr("data-theme", &config.theme.color_mode.default_mode)
        .child(head)
        .child(el("body").child(body));

    Node::Fragment(vec![Node::raw("<!DOCTYPE html>"), html.into()])
}

/// `<link rel="alternate">` tags for the feeds the blog plugin publishes
fn feed_links(config: &SiteConfig) -> Vec<Element> {
    let route = config.blog.route_base_path.trim_matches('/');
    let formats: &[FeedFormat] = match config.blog.feed_options.formats {
        FeedFormat::All => &[FeedFormat::Rss, FeedFormat::Atom, FeedFormat::Json],
        ref single => std::slice::from_ref(single),
    };

    formats
        .iter()
        .map(|format| {
            let (mime, file) = match format {
                FeedFormat::Rss => ("application/rss+xml", "rss.xml"),
                FeedFormat::Atom => ("application/atom+xml", "atom.xml"),
                _ => ("application/json", "feed.json"),
            };
            el("link")
                .attr("rel", "alternate")
                .attr("type", mime)
                .attr("href", url_for(config, &format!("{}/{}", route, file)))
                .attr("title", &config.title)
        })
        .collect()
}
