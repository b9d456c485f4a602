//! Folio CLI
//!
//! Render notebook covers to SVG and replay interaction scripts.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use folio_book::{render_book_with, BookConfig, BookEvent, BookVariant, BookView};
use folio_core::{Dimensions, OutlineCache};
use folio_theme::{color_theme, pattern_theme, ColorKey, PatternKey};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod config;
mod script;

use config::FolioConfig;
use script::{parse_script, Step};

#[derive(Parser)]
#[command(name = "folio")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Folio notebook cover renderer", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Motion config file (defaults to ./folio.toml when present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every command that mounts a book
#[derive(clap::Args)]
struct BookArgs {
    /// Cover title
    #[arg(short, long, default_value = "Caiet")]
    title: String,

    /// Cover color (violet, blue, emerald, rose, amber, slate, white)
    #[arg(long, default_value = "violet")]
    color: String,

    /// Cover pattern (simplu, dictando, matematica, romana, punctat)
    #[arg(short, long, default_value = "simplu")]
    pattern: String,

    /// Interaction variant (hover or drag)
    #[arg(long, default_value = "hover")]
    variant: String,

    /// Book width in pixels
    #[arg(long, default_value = "200")]
    width: f32,

    /// Book height in pixels
    #[arg(long, default_value = "268")]
    height: f32,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a book to SVG
    Render {
        #[command(flatten)]
        book: BookArgs,

        /// Engage the book (hover, or drag at --pointer-x) before rendering
        #[arg(short, long)]
        engage: bool,

        /// Pointer position for drag books, book-local pixels
        #[arg(long)]
        pointer_x: Option<f32>,

        /// Milliseconds to advance after engaging
        #[arg(long, default_value = "1000")]
        at_ms: f32,

        /// Output path (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replay an interaction script and print frame parameters as JSON
    Simulate {
        #[command(flatten)]
        book: BookArgs,

        /// Comma-separated steps, e.g. "enter,wait:100,leave,wait:200"
        #[arg(short, long)]
        script: String,

        /// Clock resolution for waits, in milliseconds
        #[arg(long, default_value = "16")]
        frame_ms: f32,
    },

    /// List cover colors and patterns
    Themes,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    match cli.command {
        Commands::Render {
            book,
            engage,
            pointer_x,
            at_ms,
            output,
        } => cmd_render(
            cli.config.as_deref(),
            &book,
            engage,
            pointer_x,
            at_ms,
            output.as_deref(),
        ),

        Commands::Simulate {
            book,
            script,
            frame_ms,
        } => cmd_simulate(cli.config.as_deref(), &book, &script, frame_ms),

        Commands::Themes => cmd_themes(),
    }
}

fn mount(config_path: Option<&Path>, args: &BookArgs) -> Result<BookView> {
    let config = FolioConfig::resolve(config_path)?;
    let color: ColorKey = args.color.parse()?;
    let pattern: PatternKey = args.pattern.parse()?;
    let variant: BookVariant = args.variant.parse().map_err(anyhow::Error::msg)?;
    let dimensions = Dimensions::try_new(args.width, args.height)
        .context("Invalid book dimensions")?;
    let book = BookConfig::new(&args.title, color, pattern).context("Invalid book")?;

    let mut cache = OutlineCache::new();
    let view = render_book_with(book, dimensions, variant, config.motion, &mut cache)?;
    Ok(view)
}

fn cmd_render(
    config_path: Option<&Path>,
    args: &BookArgs,
    engage: bool,
    pointer_x: Option<f32>,
    at_ms: f32,
    output: Option<&Path>,
) -> Result<()> {
    let mut view = mount(config_path, args)?;

    if engage || pointer_x.is_some() {
        let width = view.dimensions().width();
        let y = view.dimensions().height() / 2.0;
        view.handle_event(BookEvent::PointerEnter);
        if view.variant() == BookVariant::Drag {
            let x = pointer_x.unwrap_or(0.0).clamp(0.0, width);
            view.handle_event(BookEvent::PointerDown { x, y });
        }
        view.tick(at_ms.max(0.0));
    }

    let svg = view.to_svg();
    match output {
        Some(path) => {
            fs::write(path, &svg).with_context(|| format!("Failed to write {}", path.display()))?;
            info!("Rendered {} to {}", view.config().title(), path.display());
        }
        None => println!("{svg}"),
    }
    Ok(())
}

/// One line of `simulate` output
#[derive(Serialize)]
struct SimulatedFrame<'a> {
    step: usize,
    time_ms: f32,
    state: folio_book::InteractionState,
    frame: &'a folio_book::FrameParams,
}

fn cmd_simulate(config_path: Option<&Path>, args: &BookArgs, script: &str, frame_ms: f32) -> Result<()> {
    if !(frame_ms > 0.0 && frame_ms.is_finite()) {
        anyhow::bail!("--frame-ms must be positive, got {frame_ms}");
    }
    let mut view = mount(config_path, args)?;
    let steps = parse_script(script, view.dimensions().height() / 2.0)?;
    info!("Simulating {} steps on {}", steps.len(), view.id());

    let mut time_ms = 0.0;
    for (i, step) in steps.iter().enumerate() {
        match *step {
            Step::Event(event) => {
                view.handle_event(event);
            }
            Step::Wait(ms) => {
                let mut remaining = ms;
                while remaining > 0.0 {
                    let dt = remaining.min(frame_ms);
                    view.tick(dt);
                    remaining -= dt;
                }
                time_ms += ms;
            }
        }
        let line = SimulatedFrame {
            step: i + 1,
            time_ms,
            state: view.state(),
            frame: view.frame(),
        };
        println!("{}", serde_json::to_string(&line)?);
    }
    Ok(())
}

fn cmd_themes() -> Result<()> {
    println!("Colors:");
    for key in ColorKey::ALL {
        let theme = color_theme(key);
        println!(
            "  {:<10} {:<10} {}",
            key.as_str(),
            theme.label,
            theme.mid.to_css()
        );
    }
    println!();
    println!("Patterns:");
    for key in PatternKey::ALL {
        let theme = pattern_theme(key);
        let light = if theme.light_texture.is_some() {
            "light-cover variant"
        } else {
            ""
        };
        println!("  {:<10} {:<10} {}", key.as_str(), theme.label, light);
    }
    Ok(())
}
