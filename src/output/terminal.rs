//! Colored terminal output

use std::path::Path;

use anyhow::Result;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::compare::Verdict;

use super::OutputFormatter;

/// One-line verdict with a colored status word
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(
        &self,
        verdict: &Verdict,
        left_path: &Path,
        right_path: &Path,
        writer: &mut dyn WriteColor,
    ) -> Result<()> {
        let (word, color) = if verdict.equal {
            ("equal", Color::Green)
        } else {
            ("different", Color::Red)
        };

        writer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(writer, "{}", word)?;
        writer.reset()?;
        writeln!(
            writer,
            ": {} ↔ {} ({})",
            left_path.display(),
            right_path.display(),
            verdict.strategy
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compare::Strategy;
    use termcolor::NoColor;

    #[test]
    fn test_render_plain() {
        let verdict = Verdict {
            equal: false,
            strategy: Strategy::Tabular,
        };
        let mut out = NoColor::new(Vec::new());
        TerminalOutput::new()
            .render(&verdict, Path::new("a.csv"), Path::new("b.parquet"), &mut out)
            .unwrap();
        let text = String::from_utf8(out.into_inner()).unwrap();
        assert_eq!(text, "different: a.csv ↔ b.parquet (tabular)\n");
    }
}
