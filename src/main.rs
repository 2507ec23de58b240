//! inkpress CLI: render posts and rebuild the posts index.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use inkpress::post::{fix_bare_images, looks_like_html};
use inkpress::{index, Options, PostPath, SiteConfig};

#[derive(Parser)]
#[command(name = "inkpress")]
#[command(about = "Render blog posts to safe HTML and maintain the posts index")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Render a Markdown post to an HTML fragment on stdout
    Render {
        /// Input file, `-` or nothing for stdin
        file: Option<PathBuf>,

        /// Render the `---` header instead of stripping it
        #[arg(long)]
        keep_front_matter: bool,

        /// Rewrite bare `!image.png` references into the upload folder of
        /// this post path (e.g. `content/Projects/demo.md`)
        #[arg(long, value_name = "POST_PATH")]
        fix_images_for: Option<String>,
    },
    /// Rebuild `posts.json` from the posts in a site checkout
    Index {
        /// Site repository root
        #[arg(long, default_value = ".")]
        root: PathBuf,

        /// Category folder to scan (repeatable; defaults to the site categories)
        #[arg(long = "category", value_name = "NAME")]
        categories: Vec<String>,

        /// Write `<root>/content/posts.json` instead of printing
        #[arg(long)]
        write: bool,
    },
}

fn setup_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn main() -> Result<()> {
    setup_logging();
    let cli = Cli::parse();

    match cli.command {
        Command::Render {
            file,
            keep_front_matter,
            fix_images_for,
        } => render(file, keep_front_matter, fix_images_for.as_deref()),
        Command::Index {
            root,
            categories,
            write,
        } => rebuild_index(root, categories, write),
    }
}

fn read_input(file: Option<&PathBuf>) -> Result<String> {
    match file {
        Some(path) if path.as_os_str() != "-" => fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display())),
        _ => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

fn render(file: Option<PathBuf>, keep_front_matter: bool, fix_images_for: Option<&str>) -> Result<()> {
    let input = read_input(file.as_ref())?;
    if looks_like_html(&input) {
        warn!("input looks like an HTML page; it will be escaped, not passed through");
    }

    let options = Options {
        front_matter: !keep_front_matter,
    };

    let html = match fix_images_for {
        Some(raw) => {
            let post = PostPath::parse(raw)
                .with_context(|| format!("invalid post path for --fix-images-for: {raw}"))?;
            let folder = post.upload_folder(&SiteConfig::default());
            let (_, body) = if options.front_matter {
                inkpress::front_matter::split(&input)
            } else {
                (None, input.as_str())
            };
            inkpress::to_html(&fix_bare_images(body, &folder))
        }
        None => inkpress::to_html_with_options(&input, &options),
    };

    io::stdout()
        .write_all(html.as_bytes())
        .context("failed to write output")?;
    Ok(())
}

fn rebuild_index(root: PathBuf, categories: Vec<String>, write: bool) -> Result<()> {
    let mut config = SiteConfig::default();
    if !categories.is_empty() {
        config.categories = categories;
    }

    let posts = index::rebuild(&root, &config)
        .with_context(|| format!("failed to rebuild index under {}", root.display()))?;

    if write {
        let path = index::write(&root, &config, &posts).context("failed to write posts index")?;
        info!(path = %path.display(), posts = posts.len(), "wrote posts index");
    } else {
        let json = posts.to_json_pretty().context("failed to serialize posts index")?;
        let mut stdout = io::stdout();
        stdout
            .write_all(json.as_bytes())
            .and_then(|()| stdout.write_all(b"\n"))
            .context("failed to write output")?;
    }
    Ok(())
}
