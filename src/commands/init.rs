//! Initialize a new site

use anyhow::Result;
use std::fs;
use std::path::Path;

use crate::config::SiteConfig;
use crate::CONFIG_FILE;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("{:?} already exists", config_path);
    }

    let config = SiteConfig::default();

    fs::create_dir_all(target_dir.join(&config.blog.path))?;
    fs::create_dir_all(target_dir.join(&config.docs_dir).join("python"))?;

    let config_content = format!(
        "# HacheNotes site configuration\n# Every key is optional; removed keys fall back to these values.\n\n{}",
        serde_yaml::to_string(&config)?
    );
    fs::write(&config_path, config_content)?;

    let now = chrono::Local::now();
    let welcome = format!(
        r#"---
title: Bienvenue
description: Premier post du blog
date: {}
tags: [blog]
---

Ce blog regroupe mes notes sur la programmation python et la data science.

<!--truncate-->
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );
    fs::write(
        target_dir
            .join(&config.blog.path)
            .join(format!("{}-bienvenue.md", now.format("%Y-%m-%d"))),
        welcome,
    )?;

    let python_note = r#"---
title: Python
description: Notes sur python
---

# Python
"#;
    fs::write(
        target_dir.join(&config.docs_dir).join("python/python.md"),
        python_note,
    )?;

    tracing::info!("Initialized site in {:?}", target_dir);

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::loader::ContentLoader;
    use crate::Site;
    use tempfile::TempDir;

    #[test]
    fn test_init_site_round_trips() {
        let dir = TempDir::new().unwrap();
        init_site(dir.path()).unwrap();

        let site = Site::new(dir.path()).unwrap();
        assert_eq!(site.config, SiteConfig::default());

        let loader = ContentLoader::new(&site);
        assert_eq!(loader.load_posts().unwrap().len(), 1);
        assert_eq!(loader.load_docs().unwrap()[0].id, "python/python");

        assert!(init_site(dir.path()).is_err());
    }
}
