//! Content loader - reads post and note metadata from the site directories

use anyhow::Result;
use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use super::{Doc, FrontMatter, Post};
use crate::helpers::{encode_path, strip_html, truncate, url_for};
use crate::Site;

/// Longest generated description, in characters
const DESCRIPTION_LENGTH: usize = 160;

/// Loads content metadata from the blog and docs directories
pub struct ContentLoader<'a> {
    site: &'a Site,
}

impl<'a> ContentLoader<'a> {
    /// Create a new content loader
    pub fn new(site: &'a Site) -> Self {
        Self { site }
    }

    /// Load all published posts, newest first
    pub fn load_posts(&self) -> Result<Vec<Post>> {
        let blog_dir = &self.site.blog_dir;
        if !blog_dir.exists() {
            return Ok(Vec::new());
        }

        let mut posts = Vec::new();

        for entry in WalkDir::new(blog_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_post(path) {
                    Ok(post) if post.draft => {
                        tracing::debug!("Skipping draft {:?}", path);
                    }
                    Ok(post) => posts.push(post),
                    Err(e) => {
                        tracing::warn!("Failed to load post {:?}: {}", path, e);
                    }
                }
            }
        }

        posts.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.source.cmp(&b.source)));

        Ok(posts)
    }

    /// Load a single post from a file
    fn load_post(&self, path: &Path) -> Result<Post> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        let source = relative_source(path, &self.site.blog_dir);
        let stem = content_stem(path);
        let (filename_date, filename_slug) = split_date_prefix(&stem);

        let date = fm
            .parse_date()
            .or(filename_date)
            .unwrap_or_else(|| file_modified(path));

        let slug = fm
            .slug
            .as_deref()
            .map(|s| s.trim_matches('/').to_string())
            .unwrap_or_else(|| slug::slugify(filename_slug));

        let title = fm
            .title
            .clone()
            .or_else(|| first_heading(body))
            .unwrap_or_else(|| filename_slug.to_string());

        let description = fm
            .description
            .clone()
            .unwrap_or_else(|| first_paragraph(body));

        let route = self.site.config.blog.route_base_path.trim_matches('/');
        let permalink = url_for(&self.site.config, &encode_path(&format!("{}/{}", route, slug)));

        Ok(Post {
            title,
            description,
            permalink,
            date,
            slug,
            tags: fm.tags,
            source,
            draft: fm.draft,
        })
    }

    /// Load all notes, ordered by id
    pub fn load_docs(&self) -> Result<Vec<Doc>> {
        let docs_dir = &self.site.docs_dir;
        if !docs_dir.exists() {
            return Ok(Vec::new());
        }

        let mut docs = Vec::new();

        for entry in WalkDir::new(docs_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if path.is_file() && is_markdown_file(path) {
                match self.load_doc(path) {
                    Ok(Some(doc)) => docs.push(doc),
                    Ok(None) => tracing::debug!("Skipping draft {:?}", path),
                    Err(e) => {
                        tracing::warn!("Failed to load doc {:?}: {}", path, e);
                    }
                }
            }
        }

        docs.sort_by(|a, b| a.id.cmp(&b.id));

        Ok(docs)
    }

    /// Load a single note, `None` for drafts
    fn load_doc(&self, path: &Path) -> Result<Option<Doc>> {
        let content = fs::read_to_string(path)?;
        let (fm, body) = FrontMatter::parse(&content)?;

        if fm.draft {
            return Ok(None);
        }

        let source = relative_source(path, &self.site.docs_dir);

        // The front-matter id replaces the file name, not the directories
        let without_ext = source
            .trim_end_matches(".mdx")
            .trim_end_matches(".md")
            .to_string();
        let id = match (&fm.id, without_ext.rsplit_once('/')) {
            (Some(id), Some((dir, _))) => format!("{}/{}", dir, id),
            (Some(id), None) => id.clone(),
            (None, _) => without_ext,
        };

        let title = fm
            .title
            .clone()
            .or_else(|| first_heading(body))
            .unwrap_or_else(|| content_stem(path));

        let description = fm
            .description
            .clone()
            .unwrap_or_else(|| first_paragraph(body));

        let route = match &fm.slug {
            Some(slug) => format!("docs/{}", slug.trim_matches('/')),
            None => format!("docs/{}", id),
        };
        let permalink = url_for(&self.site.config, &encode_path(&route));

        Ok(Some(Doc {
            id,
            title,
            description,
            permalink,
            date: fm.parse_date().unwrap_or_else(|| file_modified(path)),
            source,
        }))
    }
}

/// Check if a file is a markdown or MDX file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| matches!(e, "md" | "mdx" | "markdown"))
        .unwrap_or(false)
}

fn relative_source(path: &Path, dir: &Path) -> String {
    path.strip_prefix(dir)
        .unwrap_or(path)
        .to_string_lossy()
        .replace('\\', "/")
}

/// File stem, or the folder name for `index.md` posts
fn content_stem(path: &Path) -> String {
    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("untitled");
    if stem == "index" {
        if let Some(parent) = path
            .parent()
            .and_then(|p| p.file_name())
            .and_then(|s| s.to_str())
        {
            return parent.to_string();
        }
    }
    stem.to_string()
}

/// Split a `2023-03-04-my-post` name into its date and the rest
fn split_date_prefix(stem: &str) -> (Option<DateTime<Local>>, &str) {
    if stem.len() >= 10 && stem.is_char_boundary(10) {
        if let Ok(d) = NaiveDate::parse_from_str(&stem[..10], "%Y-%m-%d") {
            let rest = stem[10..].trim_start_matches('-');
            let date = d
                .and_hms_opt(0, 0, 0)
                .and_then(|dt| Local.from_local_datetime(&dt).earliest());
            if !rest.is_empty() {
                return (date, rest);
            }
            return (date, stem);
        }
    }
    (None, stem)
}

fn file_modified(path: &Path) -> DateTime<Local> {
    fs::metadata(path)
        .and_then(|m| m.modified())
        .map(DateTime::<Local>::from)
        .unwrap_or_else(|_| Local::now())
}

/// Text of the first `# ` heading
fn first_heading(body: &str) -> Option<String> {
    body.lines()
        .map(str::trim)
        .find_map(|line| line.strip_prefix("# "))
        .map(|title| title.trim().to_string())
}

/// First prose paragraph, without markup, cut to a card-sized summary
fn first_paragraph(body: &str) -> String {
    let mut paragraph = Vec::new();

    for line in body.lines().map(str::trim) {
        if line.is_empty() {
            if !paragraph.is_empty() {
                break;
            }
            continue;
        }
        if line == "<!--truncate-->" {
            break;
        }
        if line.starts_with('#')
            || line.starts_with("import ")
            || line.starts_with("export ")
            || line.starts_with("```")
            || line.starts_with(":::")
        {
            if !paragraph.is_empty() {
                break;
            }
            continue;
        }
        paragraph.push(line);
    }

    truncate(strip_html(&paragraph.join(" ")).trim(), DESCRIPTION_LENGTH, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use tempfile::TempDir;

    fn site_with(files: &[(&str, &str)]) -> (TempDir, Site) {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            let path = dir.path().join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let site = Site::with_config(dir.path(), SiteConfig::default());
        (dir, site)
    }

    #[test]
    fn test_load_posts_newest_first() {
        let (_dir, site) = site_with(&[
            (
                "blog/2023-01-10-first.md",
                "---\ntitle: Premier\ndescription: Le premier\n---\nTexte\n",
            ),
            (
                "blog/second.md",
                "---\ntitle: Second\ndate: 2023-06-01\n---\nTexte\n",
            ),
            (
                "blog/third/index.md",
                "---\ntitle: Troisième\ndate: 2023-03-01\n---\nTexte\n",
            ),
        ]);

        let posts = ContentLoader::new(&site).load_posts().unwrap();
        let titles: Vec<_> = posts.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Second", "Troisième", "Premier"]);

        assert_eq!(posts[2].slug, "first");
        assert_eq!(posts[2].permalink, "/blog/first");
        assert_eq!(posts[2].description, "Le premier");
        assert_eq!(posts[1].permalink, "/blog/third");
        assert_eq!(posts[1].source, "third/index.md");
    }

    #[test]
    fn test_drafts_and_broken_files_are_skipped() {
        let (_dir, site) = site_with(&[
            ("blog/draft.md", "---\ntitle: Brouillon\ndraft: true\n---\n"),
            ("blog/broken.md", "---\ntitle: [oops\n---\n"),
            ("blog/ok.md", "---\ntitle: Ok\ndate: 2023-01-01\n---\n"),
            ("blog/notes.txt", "not markdown"),
        ]);

        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].title, "Ok");
    }

    #[test]
    fn test_description_falls_back_to_first_paragraph() {
        let (_dir, site) = site_with(&[(
            "blog/2023-02-02-mdx.mdx",
            "---\ntitle: MDX\n---\nimport Tabs from '@theme/Tabs';\n\n# Titre\n\nUn <b>premier</b>\nparagraphe.\n\nUn second.\n",
        )]);

        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts[0].description, "Un premier paragraphe.");
    }

    #[test]
    fn test_slug_and_base_url() {
        let dir = TempDir::new().unwrap();
        fs::create_dir_all(dir.path().join("blog")).unwrap();
        fs::write(
            dir.path().join("blog/post.md"),
            "---\ntitle: Post\nslug: /mon-post/\ndate: 2023-01-01\n---\n",
        )
        .unwrap();
        let config = SiteConfig {
            base_url: "/notes/".to_string(),
            ..Default::default()
        };
        let site = Site::with_config(dir.path(), config);

        let posts = ContentLoader::new(&site).load_posts().unwrap();
        assert_eq!(posts[0].permalink, "/notes/blog/mon-post");
    }

    #[test]
    fn test_load_docs() {
        let (_dir, site) = site_with(&[
            (
                "docs/python/packaging.md",
                "---\nid: packaging-python\n---\n# Packager son code python\n\nAvec pyproject.toml\n",
            ),
            ("docs/python/python.md", "---\ntitle: Python\n---\n"),
            ("docs/wip.md", "---\ntitle: WIP\ndraft: true\n---\n"),
        ]);

        let docs = ContentLoader::new(&site).load_docs().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0].id, "python/packaging-python");
        assert_eq!(docs[0].title, "Packager son code python");
        assert_eq!(docs[0].description, "Avec pyproject.toml");
        assert_eq!(docs[0].permalink, "/docs/python/packaging-python");
        assert_eq!(docs[1].id, "python/python");
    }

    #[test]
    fn test_missing_directories() {
        let (_dir, site) = site_with(&[]);
        let loader = ContentLoader::new(&site);
        assert!(loader.load_posts().unwrap().is_empty());
        assert!(loader.load_docs().unwrap().is_empty());
    }
}
