//! Command parsing for the interactive session

use anyhow::{Result, anyhow, bail};
use lens_core::SegmentEvent;
use std::path::PathBuf;

/// Parsed command from user input
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Print the document
    Show,
    /// Send a mouse-style event to one sentence
    Event { index: usize, event: SegmentEvent },
    /// Expand every sentence that mentions an organization
    ExpandAll,
    /// Write the current document as HTML
    Html { path: PathBuf },
    /// Clear cached market data and analyze the text again
    Refresh,
    /// Show help
    Help,
    /// Exit the session
    Exit,
}

fn index_arg(cmd: &str, args: &[&str]) -> Result<usize> {
    let raw = args
        .first()
        .ok_or_else(|| anyhow!("Missing sentence number for {cmd}"))?;
    raw.parse()
        .map_err(|_| anyhow!("'{raw}' is not a sentence number"))
}

impl Command {
    /// Parse a command; the leading `/` is optional
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let input = input.strip_prefix('/').unwrap_or(input);

        let parts: Vec<&str> = input.split_whitespace().collect();
        let Some((cmd, args)) = parts.split_first() else {
            bail!("Empty command");
        };
        let cmd = cmd.to_lowercase();

        match cmd.as_str() {
            "show" | "s" | "ls" => Ok(Command::Show),
            "click" | "c" | "toggle" => Ok(Command::Event {
                index: index_arg(&cmd, args)?,
                event: SegmentEvent::Click,
            }),
            "hover" | "enter" => Ok(Command::Event {
                index: index_arg(&cmd, args)?,
                event: SegmentEvent::HoverEnter,
            }),
            "leave" => Ok(Command::Event {
                index: index_arg(&cmd, args)?,
                event: SegmentEvent::HoverLeave,
            }),
            "expand" | "all" => Ok(Command::ExpandAll),
            "html" => {
                let path = args
                    .first()
                    .ok_or_else(|| anyhow!("Missing output path for html"))?;
                Ok(Command::Html {
                    path: PathBuf::from(path),
                })
            },
            "refresh" | "reload" => Ok(Command::Refresh),
            "help" | "h" | "?" => Ok(Command::Help),
            "exit" | "quit" | "q" => Ok(Command::Exit),
            _ => bail!("Unknown command: {cmd}"),
        }
    }

    pub fn help_text() -> &'static str {
        "Commands:\n\
        /show            - print the document\n\
        /click <n>       - expand or collapse sentence n\n\
        /hover <n>       - highlight sentence n\n\
        /leave <n>       - remove the highlight from sentence n\n\
        /expand          - expand every sentence with organizations\n\
        /html <path>     - write the document as HTML\n\
        /refresh         - drop cached market data and analyze again\n\
        /help            - show this help\n\
        /exit            - exit"
    }
}
