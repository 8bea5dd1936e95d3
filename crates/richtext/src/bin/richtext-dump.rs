//! Prints formatted text as plain rendered lines, classified blocks or JSON.

use anyhow::Context;
use clap::Parser;
use clap::ValueEnum;
use ratatui::style::Style;
use richtext::config::Config;
use richtext::markup::BlockKind;
use richtext::markup::blocks;
use richtext::markup::document::FormattedDocument;
use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    /// Rendered lines without styles.
    Plain,
    /// One line per block: kind, marker and spans.
    Blocks,
    /// Blocks as a JSON array.
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "richtext-dump")]
#[command(version)]
#[command(about = "Render inline rich-text markup to the terminal", long_about = None)]
struct Args {
    /// Input file, stdin when omitted
    input: Option<PathBuf>,

    /// Render width (overrides the config file)
    #[arg(short, long)]
    width: Option<u16>,

    /// Do not word-wrap
    #[arg(long)]
    no_wrap: bool,

    /// YAML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, value_enum, default_value_t = Format::Plain)]
    format: Format,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => Config::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => Config::default(),
    };

    let input = match &args.input {
        Some(path) => fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?,
        None => {
            let mut s = String::new();
            io::stdin()
                .read_to_string(&mut s)
                .context("reading stdin")?;
            s
        }
    };
    log::debug!("read {} bytes, format {:?}", input.len(), args.format);

    let mut out = io::stdout().lock();
    match args.format {
        Format::Plain => {
            let theme = config.theme.to_theme()?;
            let mut options = config.render.to_options();
            if args.no_wrap {
                options.wrap = false;
            }
            let width = args.width.unwrap_or(config.render.width);
            let rendered =
                FormattedDocument::parse(input).render(width, &theme, &options, Style::default());
            for line in rendered.plain_lines() {
                writeln!(out, "{}", line.trim_end())?;
            }
        }
        Format::Blocks => {
            for block in blocks(&input) {
                write!(out, "{:>4} {:<14}", block.line + 1, kind_name(block.kind))?;
                if !block.marker.is_empty() {
                    write!(out, " marker={:?}", block.marker)?;
                }
                for span in &block.spans {
                    write!(out, " {:?}:{:?}", span.emphasis, span.text)?;
                }
                writeln!(out)?;
            }
        }
        Format::Json => {
            let all: Vec<_> = blocks(&input).collect();
            serde_json::to_writer_pretty(&mut out, &all).context("writing JSON")?;
            writeln!(out)?;
        }
    }
    Ok(())
}

fn kind_name(kind: BlockKind) -> &'static str {
    match kind {
        BlockKind::Quote => "quote",
        BlockKind::OrderedItem => "ordered_item",
        BlockKind::UnorderedItem => "unordered_item",
        BlockKind::Blank => "blank",
        BlockKind::Paragraph => "paragraph",
    }
}
