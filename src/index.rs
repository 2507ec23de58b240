//! The posts index (`content/posts.json`).
//!
//! Listing pages read this file instead of walking the repository. It is
//! rebuilt from the front matter of every post after each publish.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::SiteConfig;
use crate::front_matter::Document;

/// Failure while reading or writing the index.
#[derive(Debug, Error)]
pub enum IndexError {
    #[error("failed to access {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("malformed posts index")]
    Json(#[from] serde_json::Error),
}

/// One post as listed in `posts.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PostEntry {
    pub title: String,
    pub date: String,
    pub category: String,
    pub tags: String,
    pub path: String,
}

impl PostEntry {
    /// Build an entry from a post file's text.
    ///
    /// The title falls back to the file name without `.md`.
    pub fn from_markdown(category: &str, file_name: &str, content_root: &str, text: &str) -> Self {
        let meta = Document::parse(text).front_matter;
        Self::with_fallbacks(
            category,
            file_name,
            content_root,
            meta.title(),
            meta.date(),
            meta.tags(),
        )
    }

    fn with_fallbacks(
        category: &str,
        file_name: &str,
        content_root: &str,
        title: Option<&str>,
        date: Option<&str>,
        tags: Option<&str>,
    ) -> Self {
        let stem = file_name.strip_suffix(".md").unwrap_or(file_name);
        Self {
            title: title.unwrap_or(stem).to_owned(),
            date: date.unwrap_or_default().to_owned(),
            category: category.to_owned(),
            tags: tags.unwrap_or_default().to_owned(),
            path: format!("{content_root}/{category}/{file_name}"),
        }
    }

    /// Text shown in listings: the title, or the path when untitled.
    pub fn display_title(&self) -> &str {
        if self.title.is_empty() { &self.path } else { &self.title }
    }
}

/// Either shape `posts.json` has been written in.
#[derive(Deserialize)]
#[serde(untagged)]
enum IndexFile {
    List(Vec<PostEntry>),
    Wrapped {
        #[serde(default)]
        posts: Vec<PostEntry>,
    },
}

/// Ordered list of index entries.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostIndex {
    entries: Vec<PostEntry>,
}

impl PostIndex {
    pub fn new(entries: Vec<PostEntry>) -> Self {
        Self { entries }
    }

    /// Parse `posts.json`: a bare array or `{ "posts": [...] }`.
    pub fn from_json(text: &str) -> Result<Self, IndexError> {
        let entries = match serde_json::from_str(text)? {
            IndexFile::List(entries) => entries,
            IndexFile::Wrapped { posts } => posts,
        };
        Ok(Self { entries })
    }

    /// Serialize as a pretty-printed array (2-space indent).
    pub fn to_json_pretty(&self) -> Result<String, IndexError> {
        Ok(serde_json::to_string_pretty(&self.entries)?)
    }

    /// Newest first, comparing `date` as a string (ISO dates sort correctly).
    /// Equal dates keep their relative order.
    pub fn sort_newest_first(&mut self) {
        self.entries.sort_by(|a, b| b.date.cmp(&a.date));
    }

    /// Entries of one category, in index order.
    pub fn by_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a PostEntry> + 'a {
        self.entries.iter().filter(move |entry| entry.category == category)
    }

    /// The first `n` entries.
    pub fn recent(&self, n: usize) -> &[PostEntry] {
        &self.entries[..n.min(self.entries.len())]
    }

    pub fn entries(&self) -> &[PostEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Rebuild the index from the posts under `root`.
///
/// Each configured category folder is scanned for `*.md` files; missing
/// folders are skipped. A post that cannot be read is still listed, with
/// metadata derived from its file name.
pub fn rebuild(root: &Path, config: &SiteConfig) -> Result<PostIndex, IndexError> {
    let mut entries = Vec::new();

    for category in &config.categories {
        let dir = config.category_dir(root, category);
        let mut files = match list_markdown_files(&dir) {
            Ok(files) => files,
            Err(source) if source.kind() == io::ErrorKind::NotFound => {
                debug!(dir = %dir.display(), "skipping missing category folder");
                continue;
            }
            Err(source) => return Err(IndexError::Io { path: dir, source }),
        };
        files.sort();

        for file_name in files {
            let file_path = dir.join(&file_name);
            let entry = match fs::read_to_string(&file_path) {
                Ok(text) => PostEntry::from_markdown(category, &file_name, &config.content_root, &text),
                Err(err) => {
                    warn!(path = %file_path.display(), error = %err, "unreadable post, listing without metadata");
                    PostEntry::with_fallbacks(category, &file_name, &config.content_root, None, None, None)
                }
            };
            entries.push(entry);
        }
    }

    let mut index = PostIndex::new(entries);
    index.sort_newest_first();
    debug!(posts = index.len(), "rebuilt posts index");
    Ok(index)
}

/// Write the index to `<root>/<content_root>/posts.json`.
pub fn write(root: &Path, config: &SiteConfig, index: &PostIndex) -> Result<PathBuf, IndexError> {
    let path = root.join(config.index_path());
    let json = index.to_json_pretty()?;
    fs::write(&path, json).map_err(|source| IndexError::Io {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Names of regular `*.md` files directly inside `dir`.
fn list_markdown_files(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let file_name = entry.file_name();
        if Path::new(&file_name).extension().is_none_or(|ext| ext != "md") {
            continue;
        }
        match file_name.into_string() {
            Ok(name) => names.push(name),
            Err(raw) => {
                warn!(path = %dir.join(raw).display(), "skipping post with a non UTF-8 file name");
            }
        }
    }
    Ok(names)
}
