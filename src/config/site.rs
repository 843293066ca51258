//! Site configuration (_config.yml)

use anyhow::Result;
use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use super::ConfigError;

/// Main site configuration
///
/// Every field has a default, so an empty `_config.yml` (or none at all)
/// yields the HacheNotes site.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub favicon: String,

    // URL
    pub url: String,
    pub base_url: String,

    // Deployment
    pub organization_name: String,
    pub project_name: String,

    pub on_broken_links: BrokenLinkPolicy,
    pub on_broken_markdown_links: BrokenLinkPolicy,

    // Directory
    pub docs_dir: String,
    pub output_dir: String,

    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub markdown: MarkdownConfig,

    // Plugins
    #[serde(default)]
    pub blog: BlogPluginConfig,
    #[serde(default)]
    pub search: SearchPluginConfig,

    #[serde(default)]
    pub theme: ThemeConfig,
    #[serde(default)]
    pub home: HomeConfig,

    // Embeds
    #[serde(default)]
    pub comments: GiscusConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "HacheNotes".to_string(),
            description:
                "Ce blog regroupe mes notes sur la programmation python et la data science"
                    .to_string(),
            favicon: "/img/hache.svg".to_string(),

            url: "https://h4c5.github.io".to_string(),
            base_url: "/".to_string(),

            organization_name: "h4c5".to_string(),
            project_name: "blog".to_string(),

            on_broken_links: BrokenLinkPolicy::Throw,
            on_broken_markdown_links: BrokenLinkPolicy::Warn,

            docs_dir: "docs".to_string(),
            output_dir: "build".to_string(),

            i18n: I18nConfig::default(),
            markdown: MarkdownConfig::default(),

            blog: BlogPluginConfig::default(),
            search: SearchPluginConfig::default(),

            theme: ThemeConfig::default(),
            home: HomeConfig::default(),

            comments: GiscusConfig::default(),
            analytics: AnalyticsConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        tracing::debug!("Loaded configuration from {:?}", path.as_ref());
        Ok(config)
    }

    /// Check the invariants the external generator relies on
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            return Err(ConfigError::InvalidUrl(self.url.clone()));
        }

        if !self.base_url.starts_with('/') || !self.base_url.ends_with('/') {
            return Err(ConfigError::InvalidBaseUrl(self.base_url.clone()));
        }

        if !self.i18n.locales.contains(&self.i18n.default_locale) {
            return Err(ConfigError::UnknownDefaultLocale {
                locale: self.i18n.default_locale.clone(),
                locales: self.i18n.locales.clone(),
            });
        }

        if self.blog.feed_options.limit == 0 {
            return Err(ConfigError::ZeroFeedLimit);
        }

        if self.search.languages.is_empty() {
            return Err(ConfigError::NoSearchLanguage);
        }

        Ok(())
    }
}

/// What the external generator does when it finds a broken link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BrokenLinkPolicy {
    Ignore,
    Log,
    Warn,
    Throw,
}

/// Locale configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nConfig {
    pub default_locale: String,
    pub locales: Vec<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_locale: "fr".to_string(),
            locales: vec!["fr".to_string()],
        }
    }
}

/// Markdown options forwarded to the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkdownConfig {
    pub mermaid: bool,
}

impl Default for MarkdownConfig {
    fn default() -> Self {
        Self { mermaid: true }
    }
}

/// Blog plugin declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BlogPluginConfig {
    pub id: String,
    pub route_base_path: String,
    /// Directory holding the blog posts, relative to the site root
    pub path: String,
    pub show_reading_time: bool,
    #[serde(default)]
    pub feed_options: FeedOptions,
}

impl Default for BlogPluginConfig {
    fn default() -> Self {
        Self {
            id: "blog".to_string(),
            route_base_path: "blog".to_string(),
            path: "blog".to_string(),
            show_reading_time: true,
            feed_options: FeedOptions::default(),
        }
    }
}

/// Feed options of the blog plugin
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedOptions {
    /// Output formats the feed plugin emits
    #[serde(rename = "type")]
    pub formats: FeedFormat,
    /// Which collections contribute items
    pub content: FeedContent,
    pub copyright: String,
    /// Number of most recent items kept in the feed
    pub limit: usize,
}

impl Default for FeedOptions {
    fn default() -> Self {
        Self {
            formats: FeedFormat::All,
            content: FeedContent::Posts,
            copyright: format!(
                "Copyright © {} HacheNotes.",
                chrono::Local::now().year()
            ),
            limit: 20,
        }
    }
}

/// Feed output formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedFormat {
    Rss,
    Atom,
    Json,
    All,
}

impl FeedFormat {
    /// File names the feed plugin writes for this setting
    pub fn file_names(&self) -> &'static [&'static str] {
        match self {
            FeedFormat::Rss => &["rss.xml"],
            FeedFormat::Atom => &["atom.xml"],
            FeedFormat::Json => &["feed.json"],
            FeedFormat::All => &["rss.xml", "atom.xml", "feed.json"],
        }
    }
}

/// Content type filter of the feed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedContent {
    All,
    Posts,
    Pages,
}

/// Local search plugin declaration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchPluginConfig {
    pub languages: Vec<String>,
}

impl Default for SearchPluginConfig {
    fn default() -> Self {
        Self {
            languages: vec!["fr".to_string()],
        }
    }
}

/// Theme configuration: metadata, navbar, footer and palettes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThemeConfig {
    pub metadata: Vec<MetaTag>,
    pub navbar: NavbarConfig,
    pub footer: FooterConfig,
    pub color_mode: ColorModeConfig,
    pub prism: PrismConfig,
    pub mermaid: MermaidConfig,
}

impl Default for ThemeConfig {
    fn default() -> Self {
        Self {
            metadata: vec![MetaTag {
                name: "keywords".to_string(),
                content: "blog, python, data science, development".to_string(),
            }],
            navbar: NavbarConfig::default(),
            footer: FooterConfig::default(),
            color_mode: ColorModeConfig::default(),
            prism: PrismConfig::default(),
            mermaid: MermaidConfig::default(),
        }
    }
}

/// A `<meta name=.. content=..>` entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetaTag {
    pub name: String,
    pub content: String,
}

/// Navbar configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    pub title: String,
    pub logo: Option<LogoConfig>,
    pub items: Vec<NavItem>,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            title: "HacheNotes".to_string(),
            logo: Some(LogoConfig {
                alt: "HacheNotes logo (an axe)".to_string(),
                src: "img/hache.svg".to_string(),
            }),
            items: vec![
                NavItem {
                    label: "Notes".to_string(),
                    position: NavPosition::Left,
                    target: NavTarget::Doc {
                        doc_id: "python/python".to_string(),
                    },
                },
                NavItem {
                    label: "Blog".to_string(),
                    position: NavPosition::Left,
                    target: NavTarget::Route {
                        to: "/blog".to_string(),
                    },
                },
            ],
        }
    }
}

/// Navbar logo
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogoConfig {
    pub alt: String,
    pub src: String,
}

/// A navigation link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NavItem {
    pub label: String,
    #[serde(default)]
    pub position: NavPosition,
    #[serde(flatten)]
    pub target: NavTarget,
}

/// Side of the navbar an item sits on
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavPosition {
    #[default]
    Left,
    Right,
}

/// Where a navigation link points
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum NavTarget {
    /// A note, addressed by its id under the docs directory
    Doc { doc_id: String },
    /// A route of this site
    Route { to: String },
    /// An external URL
    External { href: String },
}

/// Footer configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FooterConfig {
    pub style: FooterStyle,
    pub links: FooterLinks,
    /// Raw HTML rendered below the links
    pub copyright: String,
}

impl Default for FooterConfig {
    fn default() -> Self {
        let link = |label: &str, target: &str| FooterLink {
            label: label.to_string(),
            target: target.to_string(),
        };

        Self {
            style: FooterStyle::Dark,
            links: FooterLinks::Flat(vec![
                link("Github", "https://github.com/h4c5"),
                link("Gitlab", "https://gitlab.com/h4c5"),
                link(
                    "Stack Overflow",
                    "https://stackoverflow.com/users/7685195/h4kim",
                ),
            ]),
            copyright: concat!(
                r#"Built with <a target="_blank" href="https://docusaurus.io/fr/">Docusaurus</a> <br/>"#,
                r#"<a rel="license" href="http://creativecommons.org/licenses/by/4.0/">"#,
                r#"<img alt="Licence Creative Commons" style="border-width:0" "#,
                r#"src="https://i.creativecommons.org/l/by/4.0/80x15.png" /></a>"#,
            )
            .to_string(),
        }
    }
}

/// Footer color style
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FooterStyle {
    Light,
    Dark,
}

/// Footer links, either a single row or grouped in titled columns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FooterLinks {
    Grouped(Vec<FooterSection>),
    Flat(Vec<FooterLink>),
}

impl FooterLinks {
    /// Iterate over every link regardless of grouping
    pub fn iter(&self) -> Box<dyn Iterator<Item = &FooterLink> + '_> {
        match self {
            FooterLinks::Flat(links) => Box::new(links.iter()),
            FooterLinks::Grouped(sections) => {
                Box::new(sections.iter().flat_map(|s| s.items.iter()))
            }
        }
    }
}

/// A titled column of footer links
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterSection {
    pub title: String,
    pub items: Vec<FooterLink>,
}

/// A footer link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FooterLink {
    pub label: String,
    #[serde(alias = "to", alias = "href")]
    pub target: String,
}

/// Light/dark mode toggles
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColorModeConfig {
    pub default_mode: String,
    pub disable_switch: bool,
    pub respect_prefers_color_scheme: bool,
}

impl Default for ColorModeConfig {
    fn default() -> Self {
        Self {
            default_mode: "light".to_string(),
            disable_switch: false,
            respect_prefers_color_scheme: false,
        }
    }
}

/// Code block palettes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PrismConfig {
    pub theme: String,
    pub dark_theme: String,
}

impl Default for PrismConfig {
    fn default() -> Self {
        Self {
            theme: "github".to_string(),
            dark_theme: "dracula".to_string(),
        }
    }
}

/// Diagram palettes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MermaidConfig {
    pub light: String,
    pub dark: String,
}

impl Default for MermaidConfig {
    fn default() -> Self {
        Self {
            light: "neutral".to_string(),
            dark: "forest".to_string(),
        }
    }
}

/// Home page content
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    /// Document title of the home page
    pub title: String,
    pub hero_title: String,
    pub hero_subtitle: String,
    /// Number of blog posts shown under "Posts récents"
    pub recent_posts: i64,
    pub featured_notes: Vec<FeaturedNote>,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            title: "Accueil".to_string(),
            hero_title: "👋 Bienvenue".to_string(),
            hero_subtitle:
                "Ce blog regroupe mes notes sur la programmation python et la data science"
                    .to_string(),
            recent_posts: 5,
            featured_notes: vec![FeaturedNote {
                link: "/docs/python/packaging-python".to_string(),
                title: "Packager son code python".to_string(),
                date: "2023-03-04".to_string(),
                description: "Packager son code python en 2023 avec pyproject.toml".to_string(),
            }],
        }
    }
}

/// A hand-picked note shown on the home page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeaturedNote {
    pub link: String,
    pub title: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub description: String,
}

/// Giscus comments widget settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GiscusConfig {
    pub repo: String,
    pub repo_id: String,
    pub category: String,
    pub category_id: String,
    pub mapping: String,
    pub term: String,
    pub strict: bool,
    pub reactions_enabled: bool,
    pub emit_metadata: bool,
    pub input_position: String,
    pub theme: String,
    pub lang: String,
    pub loading: String,
}

impl Default for GiscusConfig {
    fn default() -> Self {
        Self {
            repo: "h4c5/blog-giscus-comments".to_string(),
            repo_id: "R_kgDOHgdrtQ".to_string(),
            category: "Announcements".to_string(),
            category_id: "DIC_kwDOHgdrtc4CPsBs".to_string(),
            mapping: "pathname".to_string(),
            term: "Welcome to @giscus/react component!".to_string(),
            strict: false,
            reactions_enabled: true,
            emit_metadata: true,
            input_position: "top".to_string(),
            theme: "preferred_color_scheme".to_string(),
            lang: "fr".to_string(),
            loading: "lazy".to_string(),
        }
    }
}

/// Analytics snippet settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub script_src: String,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            script_src: "https://blog-h4c5.vercel.app/_vercel/insights/script.js".to_string(),
        }
    }
}
