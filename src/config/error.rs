//! Configuration validation errors

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("url must be an absolute http(s) URL, got {0:?}")]
    InvalidUrl(String),

    #[error("base_url must start and end with '/', got {0:?}")]
    InvalidBaseUrl(String),

    #[error("default locale {locale:?} is not one of the configured locales {locales:?}")]
    UnknownDefaultLocale { locale: String, locales: Vec<String> },

    #[error("blog.feed_options.limit must be at least 1")]
    ZeroFeedLimit,

    #[error("search.languages must name at least one language")]
    NoSearchLanguage,
}
