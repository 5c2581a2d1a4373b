//! Output formatting for comparison verdicts

mod json;
mod terminal;

use std::io::IsTerminal;
use std::path::Path;

use anyhow::Result;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::compare::Verdict;
use crate::config::OutputFormat;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a verdict to a writer
    fn render(
        &self,
        verdict: &Verdict,
        left_path: &Path,
        right_path: &Path,
        writer: &mut dyn WriteColor,
    ) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Text => Box::new(TerminalOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Render a verdict to stdout
pub fn render_to_stdout(
    verdict: &Verdict,
    left_path: &Path,
    right_path: &Path,
    format: OutputFormat,
) -> Result<()> {
    let formatter = OutputFactory::create(format);
    let color = match format {
        OutputFormat::Text if std::io::stdout().is_terminal() => ColorChoice::Auto,
        _ => ColorChoice::Never,
    };
    let mut stdout = StandardStream::stdout(color);
    formatter.render(verdict, left_path, right_path, &mut stdout)
}
