//
//  gocd-client
//  output/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Output Formatting
//!
//! Renders command results for the `gocd` binary. Every resource is
//! `Serialize`, so both formats come straight from serde.
//!
//! ```rust,ignore
//! use gocd_client::output::{OutputFormat, OutputWriter};
//!
//! let writer = OutputWriter::new(OutputFormat::Yaml);
//! writer.write(&agents)?;
//! ```

use std::io::Write;

use anyhow::{Context, Result};
use clap::ValueEnum;
use serde::Serialize;

/// Format of command output on stdout.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty-printed JSON.
    #[default]
    Json,
    /// YAML documents.
    Yaml,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Renders `value` without a trailing newline.
    pub fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let rendered = match self.format {
            OutputFormat::Json => {
                serde_json::to_string_pretty(value).context("Failed to render JSON")?
            }
            OutputFormat::Yaml => serde_yaml::to_string(value).context("Failed to render YAML")?,
        };
        Ok(rendered.trim_end().to_string())
    }

    /// Writes `value` to stdout.
    pub fn write<T: Serialize + ?Sized>(&self, value: &T) -> Result<()> {
        let rendered = self.render(value)?;
        let mut stdout = std::io::stdout().lock();
        writeln!(stdout, "{rendered}").context("Failed to write output")
    }

    /// Writes a confirmation line to stderr, leaving stdout for data.
    pub fn write_success(&self, msg: &str) {
        eprintln!("✓ {msg}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_render_json() {
        let writer = OutputWriter::new(OutputFormat::Json);
        let rendered = writer.render(&json!({"name": "build", "paused": false})).unwrap();
        assert_eq!(rendered, "{\n  \"name\": \"build\",\n  \"paused\": false\n}");
    }

    #[test]
    fn test_render_yaml() {
        let writer = OutputWriter::new(OutputFormat::Yaml);
        let rendered = writer.render(&json!({"name": "build", "paused": false})).unwrap();
        assert_eq!(rendered, "name: build\npaused: false");
    }

    #[test]
    fn test_default_is_json() {
        assert_eq!(OutputWriter::default().format(), OutputFormat::Json);
    }
}
