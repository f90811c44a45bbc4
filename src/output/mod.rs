//! Output formatting for comparison results

mod json;
mod terminal;

use std::path::Path;

use anyhow::Result;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::compare::{ComparisonResult, Reports};
use crate::config::OutputFormat;
use crate::error::ComparerError;

pub use json::JsonOutput;
pub use terminal::TerminalOutput;

/// What a formatter renders: the result, its report tables and where the data came from
pub struct RenderContext<'a> {
    pub result: &'a ComparisonResult,
    pub reports: &'a Reports,
    pub primary_path: &'a Path,
    pub secondary_path: &'a Path,
    /// Print report tables, not only the summary
    pub show_details: bool,
    /// Set when the content comparison failed after the structural one succeeded
    pub content_error: Option<&'a ComparerError>,
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Render a comparison to a writer
    fn render(&self, ctx: &RenderContext<'_>, writer: &mut dyn WriteColor) -> Result<()>;
}

/// Factory for creating output formatters
pub struct OutputFactory;

impl OutputFactory {
    /// Create an output formatter based on format type
    pub fn create(format: OutputFormat) -> Box<dyn OutputFormatter> {
        match format {
            OutputFormat::Terminal => Box::new(TerminalOutput::new()),
            OutputFormat::Json => Box::new(JsonOutput::new()),
        }
    }
}

/// Render a comparison to stdout, colored when stdout is a terminal
pub fn render_to_stdout(ctx: &RenderContext<'_>, format: OutputFormat) -> Result<()> {
    let formatter = OutputFactory::create(format);
    let mut stdout = StandardStream::stdout(ColorChoice::Auto);
    formatter.render(ctx, &mut stdout)
}
