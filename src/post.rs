//! Post naming and pre-render helpers.
//!
//! Posts live at `content/<category>/<slug>.md`; images uploaded for a
//! post live under `<uploads_root>/<category>/<slug>/`.

use std::borrow::Cow;
use std::fmt;

use thiserror::Error;

use crate::config::SiteConfig;

/// Required prefix of every post path.
const CONTENT_PREFIX: &str = "content/";

/// Image extensions recognized by [`fix_bare_images`].
const IMAGE_EXTENSIONS: [&str; 5] = ["png", "jpg", "jpeg", "gif", "webp"];

/// Characters allowed to follow a bare image name.
const IMAGE_NAME_TERMINATORS: &[u8] = b")],.!?";

/// Number of leading characters inspected by [`looks_like_html`].
const HTML_SNIFF_LEN: usize = 250;

/// Rejected post path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PostPathError {
    #[error("post path must start with `content/`: {0}")]
    NotUnderContent(String),
    #[error("post path must not contain `..`: {0}")]
    ParentTraversal(String),
    #[error("post path must end with `.md`: {0}")]
    NotMarkdown(String),
    #[error("slug is empty after normalization: {0:?}")]
    EmptySlug(String),
}

/// Turn a title or free-form name into a URL slug.
///
/// Lowercases, drops everything except ASCII word characters, whitespace
/// and `-`, then turns each run of whitespace and dashes into one `-`.
///
/// # Example
/// ```
/// assert_eq!(inkpress::post::slugify("  Hello, World! "), "hello-world");
/// ```
pub fn slugify(s: &str) -> String {
    let mut slug = String::with_capacity(s.len());
    for c in s.trim().chars() {
        let c = c.to_ascii_lowercase();
        if c.is_ascii_alphanumeric() || c == '_' {
            slug.push(c);
        } else if (c == '-' || c.is_whitespace()) && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    slug
}

/// A validated `content/<category>/<slug>.md` path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PostPath {
    path: String,
    category: String,
    slug: String,
}

impl PostPath {
    /// Path for a post in `category`, slugifying `slug`.
    pub fn new(category: &str, slug: &str) -> Result<Self, PostPathError> {
        let normalized = slugify(slug);
        if normalized.is_empty() {
            return Err(PostPathError::EmptySlug(slug.to_owned()));
        }
        Self::parse(&format!("{CONTENT_PREFIX}{category}/{normalized}.md"))
    }

    /// Validate a path taken from a query string or file listing.
    ///
    /// The value is trimmed and percent-decoded up to twice (a failed
    /// decode keeps the previous value); backslashes become `/`.
    pub fn parse(raw: &str) -> Result<Self, PostPathError> {
        let once = decode_or_keep(raw.trim());
        let twice = decode_or_keep(&once);
        let path = twice.replace('\\', "/");

        if !path.starts_with(CONTENT_PREFIX) {
            return Err(PostPathError::NotUnderContent(path));
        }
        if path.contains("..") {
            return Err(PostPathError::ParentTraversal(path));
        }
        let Some(stem) = path.strip_suffix(".md") else {
            return Err(PostPathError::NotMarkdown(path));
        };

        // `content/<category>/<slug>.md`; anything shallower keeps empty parts
        let (category, slug) = stem[CONTENT_PREFIX.len()..]
            .split_once('/')
            .filter(|(category, slug)| !category.is_empty() && !slug.is_empty())
            .map(|(category, slug)| (category.to_owned(), slug.to_owned()))
            .unwrap_or_default();

        Ok(Self {
            path,
            category,
            slug,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.path
    }

    /// Category folder, empty for paths directly under `content/`.
    pub fn category(&self) -> &str {
        &self.category
    }

    /// Slug (file stem, may contain `/`), empty for paths directly under `content/`.
    pub fn slug(&self) -> &str {
        &self.slug
    }

    /// Listing page to link back to from the post page.
    pub fn back_page(&self) -> &'static str {
        match self.category.as_str() {
            "reviews" => "reviews.html",
            "papers" => "papers.html",
            "notes" => "notes.html",
            "etc" => "etc.html",
            _ => "index.html",
        }
    }

    /// Folder for images uploaded with this post.
    pub fn upload_folder(&self, config: &SiteConfig) -> String {
        format!("{}/{}/{}", config.uploads_root, self.category, self.slug)
    }
}

impl fmt::Display for PostPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Percent-decode, keeping `s` when the result is not valid UTF-8.
fn decode_or_keep(s: &str) -> Cow<'_, str> {
    urlencoding::decode(s).unwrap_or(Cow::Borrowed(s))
}

/// Rewrite bare image names into image syntax pointing at `folder`.
///
/// `!photo.png` (at the start or after whitespace, not `![`) becomes
/// `![](<folder>/photo.png)`. The name must start with an ASCII letter or
/// digit, continue with letters, digits, `.`, `_` or `-`, end in a known
/// image extension, and be followed by the end of input, whitespace or one
/// of `)],.!?`.
///
/// # Example
/// ```
/// let fixed = inkpress::post::fix_bare_images("see !cat.png", "assets/uploads/notes/cats");
/// assert_eq!(fixed, "see ![](assets/uploads/notes/cats/cat.png)");
/// ```
pub fn fix_bare_images<'a>(body: &'a str, folder: &str) -> Cow<'a, str> {
    let bytes = body.as_bytes();
    let mut out: Option<String> = None;
    let mut copied = 0;
    let mut pos = 0;

    while let Some(off) = memchr::memchr(b'!', &bytes[pos..]) {
        let bang = pos + off;
        pos = bang + 1;

        let at_boundary = body[..bang].chars().next_back().is_none_or(char::is_whitespace);
        if !at_boundary {
            continue;
        }
        let Some(name_end) = bare_image_name_end(body, bang + 1) else {
            continue;
        };

        let buf = out.get_or_insert_with(|| String::with_capacity(body.len() + 64));
        buf.push_str(&body[copied..bang]);
        buf.push_str("![](");
        buf.push_str(folder);
        buf.push('/');
        buf.push_str(&body[bang + 1..name_end]);
        buf.push(')');
        copied = name_end;
        pos = name_end;
    }

    match out {
        Some(mut buf) => {
            buf.push_str(&body[copied..]);
            Cow::Owned(buf)
        }
        None => Cow::Borrowed(body),
    }
}

/// End of the longest valid image name starting at `start`.
fn bare_image_name_end(body: &str, start: usize) -> Option<usize> {
    let bytes = body.as_bytes();
    if !bytes.get(start)?.is_ascii_alphanumeric() {
        return None;
    }

    let run_end = start
        + bytes[start..]
            .iter()
            .take_while(|&&b| b.is_ascii_alphanumeric() || matches!(b, b'.' | b'_' | b'-'))
            .count();

    // Only a run end or a position before `.` can terminate a name
    (start + 1..=run_end).rev().find(|&end| {
        name_terminated(body, end) && has_image_extension(&body[start..end])
    })
}

fn has_image_extension(name: &str) -> bool {
    let Some(dot) = name.rfind('.') else {
        return false;
    };
    dot > 0
        && IMAGE_EXTENSIONS
            .iter()
            .any(|ext| name[dot + 1..].eq_ignore_ascii_case(ext))
}

fn name_terminated(body: &str, end: usize) -> bool {
    match body[end..].chars().next() {
        None => true,
        Some(c) if c.is_whitespace() => true,
        Some(c) => c.is_ascii() && IMAGE_NAME_TERMINATORS.contains(&(c as u8)),
    }
}

/// Whether fetched text is an HTML page rather than raw Markdown.
///
/// Static hosts answer unknown paths with an HTML page and status 200;
/// such a body must not be rendered as a post.
pub fn looks_like_html(text: &str) -> bool {
    let head: String = text
        .trim()
        .chars()
        .take(HTML_SNIFF_LEN)
        .collect::<String>()
        .to_lowercase();
    head.starts_with("<!doctype")
        || head.starts_with("<html")
        || head.contains("<head")
        || head.contains("<body")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slugify_basic() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("  Rust -- and   C++ "), "rust-and-c");
        assert_eq!(slugify("snake_case_kept"), "snake_case_kept");
        assert_eq!(slugify("a-!-b"), "a-b");
    }

    #[test]
    fn slugify_drops_non_ascii_word_chars() {
        assert_eq!(slugify("논문 리뷰 2024"), "-2024");
        assert_eq!(slugify("!!!"), "");
    }

    #[test]
    fn parse_valid_path() {
        let path = PostPath::parse("content/notes/first-post.md").unwrap();
        assert_eq!(path.as_str(), "content/notes/first-post.md");
        assert_eq!(path.category(), "notes");
        assert_eq!(path.slug(), "first-post");
        assert_eq!(path.back_page(), "notes.html");
    }

    #[test]
    fn parse_decodes_twice() {
        let path = PostPath::parse("content%252FProjects%252Fmy%2520post.md").unwrap();
        assert_eq!(path.as_str(), "content/Projects/my post.md");
        assert_eq!(path.category(), "Projects");
        assert_eq!(path.back_page(), "index.html");
    }

    #[test]
    fn parse_keeps_undecodable() {
        let path = PostPath::parse("content/notes/100%.md").unwrap();
        assert_eq!(path.slug(), "100%");
    }

    #[test]
    fn parse_backslashes() {
        let path = PostPath::parse(" content\\etc\\x.md ").unwrap();
        assert_eq!(path.as_str(), "content/etc/x.md");
        assert_eq!(path.back_page(), "etc.html");
    }

    #[test]
    fn parse_rejections() {
        assert!(matches!(
            PostPath::parse("assets/x.md"),
            Err(PostPathError::NotUnderContent(_))
        ));
        assert!(matches!(
            PostPath::parse("content/../secret.md"),
            Err(PostPathError::ParentTraversal(_))
        ));
        assert!(matches!(
            PostPath::parse("content/%2E%2E/secret.md"),
            Err(PostPathError::ParentTraversal(_))
        ));
        assert!(matches!(
            PostPath::parse("content/notes/x.html"),
            Err(PostPathError::NotMarkdown(_))
        ));
    }

    #[test]
    fn parse_shallow_path() {
        let path = PostPath::parse("content/loose.md").unwrap();
        assert_eq!(path.category(), "");
        assert_eq!(path.slug(), "");
        assert_eq!(path.back_page(), "index.html");
    }

    #[test]
    fn new_slugifies() {
        let path = PostPath::new("Projects", "My First Post!").unwrap();
        assert_eq!(path.to_string(), "content/Projects/my-first-post.md");
        assert_eq!(
            path.upload_folder(&SiteConfig::default()),
            "assets/uploads/Projects/my-first-post"
        );
        assert_eq!(
            PostPath::new("Projects", "???"),
            Err(PostPathError::EmptySlug("???".to_owned()))
        );
    }

    #[test]
    fn fix_bare_images_rewrites() {
        assert_eq!(
            fix_bare_images("!a.png", "f"),
            "![](f/a.png)"
        );
        assert_eq!(
            fix_bare_images("one !b.JPG, two\n!c.webp)", "f"),
            "one ![](f/b.JPG), two\n![](f/c.webp))"
        );
    }

    #[test]
    fn fix_bare_images_leaves_other_text() {
        let body = "Wow!a.png ![x](a.png) !a.txt !_a.png !a.pngx";
        assert!(matches!(fix_bare_images(body, "f"), Cow::Borrowed(_)));
    }

    #[test]
    fn fix_bare_images_backtracks_to_extension() {
        assert_eq!(
            fix_bare_images("!shot.png.", "f"),
            "![](f/shot.png)."
        );
        assert_eq!(
            fix_bare_images("!v1.2-final.gif?", "f"),
            "![](f/v1.2-final.gif)?"
        );
    }

    #[test]
    fn looks_like_html_sniffing() {
        assert!(looks_like_html("  <!DOCTYPE html><html>"));
        assert!(looks_like_html("<HTML lang=\"en\">"));
        assert!(looks_like_html("<meta charset=utf-8><head>"));
        assert!(!looks_like_html("---\ntitle: post\n---\n# Hi"));
        assert!(!looks_like_html(""));
    }
}
