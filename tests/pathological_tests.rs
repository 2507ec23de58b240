use std::time::{Duration, Instant};

use inkpress::to_html;

/// Generous bound for about 1 MB on one line, even in debug builds.
const LIMIT: Duration = Duration::from_secs(2);

fn render_within_limit(input: &str) -> String {
    let started = Instant::now();
    let html = to_html(input);
    let elapsed = started.elapsed();
    assert!(elapsed < LIMIT, "{} bytes took {elapsed:?}", input.len());
    html
}

#[test]
fn unclosed_images_on_one_line() {
    let input = "![a](".repeat(200_000);
    let html = render_within_limit(&input);
    assert_eq!(html, format!("<p>{input}</p>\n"));
}

#[test]
fn unclosed_links_on_one_line() {
    let input = "[a](".repeat(250_000);
    let html = render_within_limit(&input);
    assert_eq!(html, format!("<p>{input}</p>\n"));
}

#[test]
fn openers_before_single_closer() {
    let input = "[".repeat(1_000_000) + "]";
    let html = render_within_limit(&input);
    assert_eq!(html, format!("<p>{input}</p>\n"));
}

#[test]
fn many_links_on_one_line() {
    let input = "[a](b.html) ".repeat(50_000);
    let html = render_within_limit(&input);
    assert_eq!(html.matches("<a href=\"b.html\">a</a>").count(), 50_000);
}
