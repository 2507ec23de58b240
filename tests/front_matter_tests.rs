use inkpress::front_matter::{split, Document, FrontMatter};
use inkpress::{parse, parse_with_options, to_html_with_options, Options};

#[test]
fn header_basic() {
    let result = parse("---\ntitle: Hello\n---\n# Content");
    assert_eq!(result.front_matter, Some("title: Hello\n"));
    assert_eq!(result.html, "<h1>Content</h1>\n");
}

#[test]
fn no_front_matter() {
    let result = parse("# Content");
    assert_eq!(result.front_matter, None);
    assert_eq!(result.html, "<h1>Content</h1>\n");
}

#[test]
fn option_disabled() {
    // With front_matter: false (default), `---` is a horizontal rule
    let input = "---\ntitle: Hello\n---\n";
    let options = Options::default();
    assert!(!options.front_matter);
    let result = parse_with_options(input, &options);
    assert_eq!(result.front_matter, None);
    assert_eq!(result.html, "<hr />\n<p>title: Hello</p>\n<hr />\n");
}

#[test]
fn empty_front_matter() {
    let result = parse("---\n---\nContent");
    assert_eq!(result.front_matter, Some(""));
    assert_eq!(result.html, "<p>Content</p>\n");
}

#[test]
fn no_closing_delimiter() {
    // Without closing delimiter, the whole post is Markdown
    let result = parse("---\ntitle: Hello\nno closing");
    assert_eq!(result.front_matter, None);
    assert_eq!(result.html, "<hr />\n<p>title: Hello<br />\nno closing</p>\n");
}

#[test]
fn not_at_start() {
    let result = parse("text\n---\ntitle: x\n---\n");
    assert_eq!(result.front_matter, None);
    assert!(result.html.starts_with("<p>text</p>\n<hr />\n"));
}

#[test]
fn crlf_header() {
    let result = parse("---\r\ntitle: Hello\r\n---\r\n# Content\r\n");
    assert_eq!(result.meta().title(), Some("Hello"));
    assert_eq!(result.html, "<h1>Content</h1>\n");
}

#[test]
fn html_option_roundtrip() {
    let input = "---\ntitle: T\n---\nBody *text*";
    let options = Options { front_matter: true };
    assert_eq!(to_html_with_options(input, &options), "<p>Body <em>text</em></p>\n");
}

#[test]
fn metadata_fields() {
    let result = parse("---\ntitle: Hello: World\ndate: 2024-05-01\ncategory: Projects\ntags: rust, web\n---\n");
    let meta = result.meta();
    assert_eq!(meta.title(), Some("Hello: World"));
    assert_eq!(meta.date(), Some("2024-05-01"));
    assert_eq!(meta.category(), Some("Projects"));
    assert_eq!(meta.tags(), Some("rust, web"));
    assert_eq!(result.html, "");
}

#[test]
fn header_markup_is_not_rendered() {
    let result = parse("---\ntitle: <script>x</script>\n---\nok");
    assert_eq!(result.html, "<p>ok</p>\n");
}

#[test]
fn compose_then_split() {
    let mut meta = FrontMatter::new();
    meta.insert("title", "Draft");
    meta.insert("date", "2024-06-01");
    meta.insert("category", "Implementation");
    meta.insert("tags", "notes");

    let text = meta.compose("# Draft\n\nBody\n");
    assert_eq!(
        text,
        "---\ntitle: Draft\ndate: 2024-06-01\ncategory: Implementation\ntags: notes\n---\n# Draft\n\nBody\n"
    );

    let (raw, body) = split(&text);
    assert_eq!(FrontMatter::parse(raw.unwrap()), meta);
    assert_eq!(body, "# Draft\n\nBody\n");
}

#[test]
fn document_parse() {
    let doc = Document::parse("---\ntitle: A\n---\nbody");
    assert_eq!(doc.front_matter.title(), Some("A"));
    assert_eq!(doc.body, "body");
}
