//! Command-line interface for thesis-lens
//!
//! # Usage
//!
//! ```bash
//! export TEXT_ANALYTICS_ENDPOINT="https://<resource>.cognitiveservices.azure.com"
//! export TEXT_ANALYTICS_KEY="..."
//! export FINNHUB_API_KEY="..."
//!
//! # One-shot: highlight sentences, expand all with organizations, write HTML
//! thesis-lens analyze --file fixtures/wsb.txt --expand all --format html -o wsb.html
//!
//! # Interactive: click and hover sentences by number
//! thesis-lens interactive --file fixtures/wsb.txt
//! ```

mod app;
mod commands;
mod input;
mod output;

use anyhow::{Context, Result};
use app::Lens;
use clap::{Args, Parser, Subcommand};
use commands::Command;
use input::InputArgs;
use lens_api::LensConfig;
use lens_core::{HtmlOptions, SegmentEvent, render_html, render_text};
use output::{Expand, OutputFormat};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Parser, Debug)]
#[command(name = "thesis-lens")]
#[command(about = "Highlight sentence sentiment and the companies a text talks about", long_about = None)]
struct Cli {
    /// Document language sent to the text-analytics service
    #[arg(short, long, global = true)]
    language: Option<String>,

    #[command(subcommand)]
    command: CliCommand,
}

#[derive(Subcommand, Debug)]
enum CliCommand {
    /// Analyze text once and print the result
    Analyze(AnalyzeArgs),
    /// Explore the analyzed text by clicking and hovering sentences
    Interactive(InputArgs),
}

#[derive(Args, Debug)]
struct AnalyzeArgs {
    #[command(flatten)]
    input: InputArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    format: OutputFormat,

    /// Sentences to expand: all, none, or a list like 0,3
    #[arg(long, default_value = "none")]
    expand: Expand,

    /// Write output to a file instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
}

fn load_config(language: Option<String>) -> Result<LensConfig> {
    let mut builder = LensConfig::builder();
    if let Some(language) = language {
        builder = builder.language(language);
    }
    builder
        .with_env_keys()
        .build()
        .context("loading configuration from the environment")
}

fn html_options(config: &LensConfig) -> HtmlOptions {
    HtmlOptions {
        language: config.language.clone(),
        ..Default::default()
    }
}

fn write_output(path: Option<&Path>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))?;
            info!("Wrote {}", path.display());
        },
        None => {
            let mut stdout = io::stdout().lock();
            stdout.write_all(content.as_bytes())?;
            stdout.flush()?;
        },
    }
    Ok(())
}

async fn analyze(config: &LensConfig, args: AnalyzeArgs) -> Result<()> {
    let text = args.input.read()?;
    let lens = Lens::from_config(config)?;

    let mut page = lens.load(&text).await;
    for index in args.expand.targets(&page) {
        if let Err(e) = lens.dispatch(&mut page, index, SegmentEvent::Click).await {
            warn!("Could not expand sentence {}: {}", index, e);
        }
    }

    let rendered = match args.format {
        OutputFormat::Text => {
            let mut out = render_text(&page);
            if let Some(table) = output::organization_table(&page) {
                out.push('\n');
                out.push_str(&table.to_string());
                out.push('\n');
            }
            out
        },
        OutputFormat::Html => render_html(&page, &html_options(config))?,
        OutputFormat::Json => output::render_json(&page)?,
    };

    write_output(args.output.as_deref(), &rendered)
}

async fn interactive(config: &LensConfig, input: InputArgs) -> Result<()> {
    let text = input.read()?;
    let lens = Lens::from_config(config)?;

    println!("Analyzing {} characters...", text.chars().count());
    let mut page = lens.load(&text).await;
    print!("{}", render_text(&page));
    println!("\n{}\n", Command::help_text());

    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        print!("lens> ");
        stdout.flush()?;

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => {
                // EOF
                println!();
                break;
            },
            Ok(_) => {},
            Err(e) => {
                eprintln!("Error reading input: {e}");
                continue;
            },
        }

        if line.trim().is_empty() {
            continue;
        }

        let command = match Command::parse(&line) {
            Ok(command) => command,
            Err(e) => {
                eprintln!("{e}");
                continue;
            },
        };

        match command {
            Command::Show => print!("{}", render_text(&page)),
            Command::Event { index, event } => {
                match lens.dispatch(&mut page, index, event).await {
                    Ok(()) => print!("{}", render_text(&page)),
                    Err(e) => eprintln!("{e}"),
                }
            },
            Command::ExpandAll => {
                for index in Expand::All.targets(&page) {
                    if let Err(e) = lens.dispatch(&mut page, index, SegmentEvent::Click).await {
                        eprintln!("{e}");
                    }
                }
                print!("{}", render_text(&page));
            },
            Command::Html { path } => {
                let html = render_html(&page, &html_options(config))?;
                match std::fs::write(&path, html) {
                    Ok(()) => println!("Wrote {}", path.display()),
                    Err(e) => eprintln!("Could not write {}: {e}", path.display()),
                }
            },
            Command::Refresh => {
                let cleared = lens.clear_cache().await;
                info!("Cleared {} cached responses", cleared);
                page = lens.load(&text).await;
                print!("{}", render_text(&page));
            },
            Command::Help => println!("{}", Command::help_text()),
            Command::Exit => break,
        }
    }

    println!("Goodbye!");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    lens_utils::init_tracing();

    let cli = Cli::parse();
    let config = load_config(cli.language)?;

    match cli.command {
        CliCommand::Analyze(args) => analyze(&config, args).await,
        CliCommand::Interactive(input) => interactive(&config, input).await,
    }
}
