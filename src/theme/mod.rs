//! Theme module - markup tree, components and theme overrides

pub mod components;
pub mod embeds;
pub mod layout;
pub mod node;
pub mod pages;
pub mod wrapper;

pub use components::{blog_news, creative_commons, link, new_article, render_card};
pub use embeds::{AnalyticsScript, Giscus};
pub use layout::{document, nav_href, ThemeLayout};
pub use node::{el, Element, Node};
pub use pages::{home_content, render_home};
pub use wrapper::{
    blog_post_item_wrapper, doc_item_content_wrapper, layout_wrapper, wrap, BlogPostItemProps,
    BlogPostItemWrapper, Component, DocItemContentProps, DocItemContentWrapper, Empty,
    LayoutProps, LayoutWrapper, Render, Wrapped,
};
