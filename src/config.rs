//! Site layout configuration.

use std::path::{Path, PathBuf};

/// Where posts, uploads and the index live inside the site repository.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiteConfig {
    /// Post categories (folder names under `content_root`).
    /// The first one is the default category.
    pub categories: Vec<String>,
    /// Folder holding `<category>/<slug>.md` files and `posts.json`.
    pub content_root: String,
    /// Folder holding uploaded images per `<category>/<slug>`.
    pub uploads_root: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            categories: ["Paper-reviews", "Implementation", "Projects"]
                .map(String::from)
                .to_vec(),
            content_root: "content".to_owned(),
            uploads_root: "assets/uploads".to_owned(),
        }
    }
}

impl SiteConfig {
    /// Default category for new posts.
    pub fn default_category(&self) -> Option<&str> {
        self.categories.first().map(String::as_str)
    }

    /// Site-relative path of the posts index.
    pub fn index_path(&self) -> String {
        format!("{}/posts.json", self.content_root)
    }

    /// Directory on disk holding the posts of `category`.
    pub fn category_dir(&self, root: &Path, category: &str) -> PathBuf {
        root.join(&self.content_root).join(category)
    }
}
