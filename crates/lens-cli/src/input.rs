//! Where the text to analyze comes from

use anyhow::{Context, Result};
use clap::Args;
use std::io::Read;
use std::path::PathBuf;

/// Text source shared by every subcommand
#[derive(Args, Debug, Clone)]
pub struct InputArgs {
    /// Text to analyze
    #[arg(short, long, conflicts_with = "file")]
    pub text: Option<String>,

    /// Read the text from a file (e.g. fixtures/wsb.txt)
    #[arg(short, long)]
    pub file: Option<PathBuf>,
}

impl InputArgs {
    /// Resolve the text, reading stdin when neither flag is given
    pub fn read(&self) -> Result<String> {
        if let Some(text) = &self.text {
            return Ok(text.clone());
        }

        if let Some(path) = &self.file {
            return std::fs::read_to_string(path)
                .with_context(|| format!("reading {}", path.display()));
        }

        let mut text = String::new();
        std::io::stdin()
            .read_to_string(&mut text)
            .context("reading text from stdin")?;
        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_inline_text_wins() {
        let args = InputArgs {
            text: Some("Tesla rallied.".to_string()),
            file: None,
        };
        assert_eq!(args.read().unwrap(), "Tesla rallied.");
    }

    #[test]
    fn test_reads_fixture_file() {
        let args = InputArgs {
            text: None,
            file: Some(PathBuf::from(concat!(
                env!("CARGO_MANIFEST_DIR"),
                "/../../fixtures/earnings.txt"
            ))),
        };
        assert!(args.read().unwrap().starts_with("Microsoft and Google"));
    }

    #[test]
    fn test_missing_file_names_path() {
        let args = InputArgs {
            text: None,
            file: Some(PathBuf::from("/definitely/not/here.txt")),
        };
        let err = args.read().unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.txt"));
    }
}
