//! Generate the site layer's outputs

use anyhow::Result;
use notify_debouncer_mini::{new_debouncer, notify::RecursiveMode};
use std::path::PathBuf;
use std::sync::mpsc::channel;
use std::time::Duration;

use crate::content::loader::ContentLoader;
use crate::generator::Generator;
use crate::{Site, CONFIG_FILE};

/// Load content and write every output
pub fn run(site: &Site) -> Result<()> {
    let start = std::time::Instant::now();

    let loader = ContentLoader::new(site);
    let posts = loader.load_posts()?;
    let docs = loader.load_docs()?;

    tracing::info!("Loaded {} posts and {} docs", posts.len(), docs.len());

    let written = Generator::new(site).generate(&posts, &docs)?;

    let duration = start.elapsed();
    tracing::info!(
        "Generated {} files in {:.2}s",
        written.len(),
        duration.as_secs_f64()
    );

    Ok(())
}

/// Paths whose changes require a rebuild
pub fn watched_paths(site: &Site) -> Vec<PathBuf> {
    [
        site.blog_dir.clone(),
        site.docs_dir.clone(),
        site.base_dir.join(CONFIG_FILE),
    ]
    .into_iter()
    .filter(|p| p.exists())
    .collect()
}

/// Watch the site and regenerate on change
///
/// The configuration is re-read on every rebuild, so edits to
/// `_config.yml` take effect without a restart.
pub fn watch(site: &Site) -> Result<()> {
    let (tx, rx) = channel();
    let mut debouncer = new_debouncer(Duration::from_millis(500), tx)?;

    for path in watched_paths(site) {
        let mode = if path.is_dir() {
            RecursiveMode::Recursive
        } else {
            RecursiveMode::NonRecursive
        };
        debouncer.watcher().watch(&path, mode)?;
        tracing::debug!("Watching: {:?}", path);
    }

    tracing::info!("Watching for changes. Press Ctrl+C to stop.");

    for result in rx {
        match result {
            Ok(events) => {
                for event in &events {
                    tracing::info!("File changed: {}", event.path.display());
                }
                match Site::new(&site.base_dir).and_then(|site| run(&site)) {
                    Ok(()) => tracing::info!("Regenerated"),
                    Err(e) => tracing::error!("Generation failed: {}", e),
                }
            }
            Err(e) => tracing::error!("Watch error: {:?}", e),
        }
    }

    Ok(())
}
