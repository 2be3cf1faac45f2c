//! Trellis CLI: reformat, filter and inspect HTML.
//!
//! The input is replayed through the tag consumer pipeline (optional
//! filter, optional trace) into a document, which is then serialized
//! compact or pretty, or dumped as JSON.

use std::fs;
use std::io;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use owo_colors::OwoColorize;
use trellis_dom::snapshot::NodeSnapshot;
use trellis_dom::{Document, NodeId};
use trellis_html::consumer::{Anchor, DomConsumer, FilterDecision, TagConsumer, TagConsumerExt};
use trellis_html::serializer::serialize_with;
use trellis_html::{SerializeOptions, Tag, parse_into};

/// Trellis: rebuild HTML through the typed tree builder
#[derive(Parser, Debug)]
#[command(name = "trellis")]
#[command(author, version, about, long_about = None)]
#[command(after_help = r#"EXAMPLES:
    # Normalize a file
    trellis page.html

    # Pretty-print inline HTML
    trellis --pretty --html '<div>content<span>yo</span></div>'

    # Remove every <script> subtree and unwrap <font> tags
    trellis --skip script --drop font page.html

    # Show the protocol events on stderr
    trellis --trace --html '<p id=x>hi</p>'

    # Dump the tree as JSON
    trellis --json page.html
"#)]
struct Cli {
    /// Path to an HTML file
    #[arg(value_name = "FILE")]
    path: Option<PathBuf>,

    /// Parse this HTML string instead of a file
    #[arg(long, value_name = "HTML")]
    html: Option<String>,

    /// Indent nested elements
    #[arg(short, long)]
    pretty: bool,

    /// Spaces per nesting level with --pretty
    #[arg(long, default_value = "2")]
    indent: usize,

    /// Omit the doctype line
    #[arg(long)]
    no_doctype: bool,

    /// Remove elements with this tag name, children included (repeatable)
    #[arg(long, value_name = "TAG")]
    skip: Vec<String>,

    /// Remove elements with this tag name but keep their children (repeatable)
    #[arg(long, value_name = "TAG")]
    drop: Vec<String>,

    /// Print the realized tree as JSON instead of markup
    #[arg(short, long)]
    json: bool,

    /// Log every protocol event to stderr
    #[arg(short, long)]
    trace: bool,
}

impl Cli {
    fn decide(&self, tag: &Tag) -> FilterDecision {
        if self.skip.iter().any(|name| tag.is(name)) {
            FilterDecision::Skip
        } else if self.drop.iter().any(|name| tag.is(name)) {
            FilterDecision::Drop
        } else {
            FilterDecision::Pass
        }
    }

    fn read_input(&self) -> anyhow::Result<String> {
        if let Some(ref html) = self.html {
            Ok(html.clone())
        } else if let Some(ref path) = self.path {
            fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
        } else {
            anyhow::bail!("no input: pass a file path or --html")
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let html = cli.read_input()?;

    let mut doc = Document::new();
    let consumer = DomConsumer::new(&mut doc, Anchor::Document)?.filter(|tag: &Tag| cli.decide(tag));
    if cli.trace {
        eprintln!("{}", "=== Events ===".cyan().bold());
        let _ = replay(&html, consumer.trace(io::stderr()))?;
    } else {
        let _ = replay(&html, consumer)?;
    }

    if cli.json {
        let snapshot = NodeSnapshot::capture(&doc, NodeId::ROOT)
            .context("document root missing from snapshot")?;
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
        return Ok(());
    }

    let options = SerializeOptions {
        pretty: cli.pretty,
        doctype: !cli.no_doctype,
        indent: cli.indent,
    };
    println!("{}", serialize_with(&doc, NodeId::ROOT, options));
    Ok(())
}

fn replay<C: TagConsumer>(html: &str, mut consumer: C) -> anyhow::Result<C::Output> {
    parse_into(html, &mut consumer).context("failed to parse input")
}
