//! Configuration module

mod error;
mod site;

pub use error::ConfigError;
pub use site::{
    AnalyticsConfig, BlogPluginConfig, BrokenLinkPolicy, ColorModeConfig, FeaturedNote,
    FeedContent, FeedFormat, FeedOptions, FooterConfig, FooterLink, FooterLinks, FooterSection,
    FooterStyle, GiscusConfig, HomeConfig, I18nConfig, LogoConfig, MarkdownConfig, MermaidConfig,
    MetaTag, NavItem, NavPosition, NavTarget, NavbarConfig, PrismConfig, SearchPluginConfig,
    SiteConfig, ThemeConfig,
};
