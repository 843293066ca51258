//! Create a new blog post

use anyhow::Result;
use std::fs;
use std::path::PathBuf;

use crate::Site;

/// Create `<blog>/<date>-<slug>.md` with front-matter, returning its path
pub fn create_post(site: &Site, title: &str) -> Result<PathBuf> {
    let now = chrono::Local::now();
    let slug = slug::slugify(title);

    fs::create_dir_all(&site.blog_dir)?;
    let file_path = site
        .blog_dir
        .join(format!("{}-{}.md", now.format("%Y-%m-%d"), slug));

    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let content = format!(
        "---\ntitle: {}\ndescription: \nslug: {}\ndate: {}\ntags: []\n---\n\n<!--truncate-->\n",
        yaml_string(title),
        slug,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    fs::write(&file_path, content)?;
    tracing::info!("Created: {:?}", file_path);

    Ok(file_path)
}

/// Quote a value so YAML reads it back verbatim
fn yaml_string(value: &str) -> String {
    format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\""))
}
