//! JSON output format

use std::path::Path;

use anyhow::Result;
use serde::Serialize;
use termcolor::WriteColor;

use crate::compare::{Strategy, Verdict};

use super::OutputFormatter;

/// JSON output formatter
pub struct JsonOutput {
    pretty: bool,
}

impl JsonOutput {
    pub fn new() -> Self {
        Self { pretty: true }
    }

    pub fn compact() -> Self {
        Self { pretty: false }
    }
}

impl Default for JsonOutput {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Serialize)]
struct JsonVerdict<'a> {
    left: &'a Path,
    right: &'a Path,
    equal: bool,
    strategy: Strategy,
}

impl OutputFormatter for JsonOutput {
    fn render(
        &self,
        verdict: &Verdict,
        left_path: &Path,
        right_path: &Path,
        writer: &mut dyn WriteColor,
    ) -> Result<()> {
        let output = JsonVerdict {
            left: left_path,
            right: right_path,
            equal: verdict.equal,
            strategy: verdict.strategy,
        };

        if self.pretty {
            serde_json::to_writer_pretty(&mut *writer, &output)?;
        } else {
            serde_json::to_writer(&mut *writer, &output)?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use termcolor::NoColor;

    #[test]
    fn test_render_compact() {
        let verdict = Verdict {
            equal: true,
            strategy: Strategy::SameFile,
        };
        let mut out = NoColor::new(Vec::new());
        JsonOutput::compact()
            .render(&verdict, Path::new("a.csv"), Path::new("a.csv"), &mut out)
            .unwrap();
        let value: serde_json::Value = serde_json::from_slice(&out.into_inner()).unwrap();
        assert_eq!(value["equal"], true);
        assert_eq!(value["strategy"], "same_file");
        assert_eq!(value["left"], "a.csv");
    }
}
