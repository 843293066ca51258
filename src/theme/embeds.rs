//! Third-party embeds appended by the theme overrides

use super::node::{el, Node};
use super::wrapper::Render;
use crate::config::{AnalyticsConfig, GiscusConfig};

/// Script served by giscus
const GISCUS_CLIENT: &str = "https://giscus.app/client.js";

/// Giscus comments widget, preceded by a separator
#[derive(Debug, Clone)]
pub struct Giscus {
    config: GiscusConfig,
}

impl Giscus {
    pub fn new(config: &GiscusConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }
}

fn flag(value: bool) -> &'static str {
    if value {
        "1"
    } else {
        "0"
    }
}

impl Render for Giscus {
    fn render(&self) -> Node {
        let c = &self.config;
        let script = el("script")
            .attr("src", GISCUS_CLIENT)
            .attr("data-repo", &c.repo)
            .attr("data-repo-id", &c.repo_id)
            .attr("data-category", &c.category)
            .attr("data-category-id", &c.category_id)
            .attr("data-mapping", &c.mapping)
            .attr("data-term", &c.term)
            .attr("data-strict", flag(c.strict))
            .attr("data-reactions-enabled", flag(c.reactions_enabled))
            .attr("data-emit-metadata", flag(c.emit_metadata))
            .attr("data-input-position", &c.input_position)
            .attr("data-theme", &c.theme)
            .attr("data-lang", &c.lang)
            .attr("data-loading", &c.loading)
            .attr("crossorigin", "anonymous")
            .flag("async");

        Node::Fragment(vec![el("hr").into(), script.into()])
    }
}

/// Deferred analytics script tag
#[derive(Debug, Clone)]
pub struct AnalyticsScript {
    src: String,
}

impl AnalyticsScript {
    pub fn new(config: &AnalyticsConfig) -> Self {
        Self {
            src: config.script_src.clone(),
        }
    }
}

impl Render for AnalyticsScript {
    fn render(&self) -> Node {
        el("script").flag("defer").attr("src", &self.src).into()
    }
}
