//! Helper functions shared by the components and the generator

mod html;
mod url;

pub use html::*;
pub use url::*;
