//! Colored terminal output


use anyhow::Result;
use tabled::builder::Builder;
use tabled::settings::Style;
use termcolor::{Color, ColorSpec, WriteColor};

use crate::compare::{ComparisonResult, ReportTable};
use crate::model::ColumnDescriptor;

use super::{OutputFormatter, RenderContext};

/// Terminal output with colors and grid tables
pub struct TerminalOutput;

impl TerminalOutput {
    pub fn new() -> Self {
        Self
    }

    fn write_header(&self, ctx: &RenderContext<'_>, writer: &mut dyn WriteColor) -> Result<()> {
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        writeln!(
            writer,
            " {}: {} → {} (line id: {})",
            ctx.result.name,
            ctx.primary_path.display(),
            ctx.secondary_path.display(),
            ctx.result.line_id
        )?;
        writeln!(writer, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
        Ok(())
    }

    /// Returns false when the content comparison did not run
    fn write_structure(
        &self,
        result: &ComparisonResult,
        writer: &mut dyn WriteColor,
    ) -> Result<bool> {
        let verdict = &result.verdict;

        if verdict.is_unknown() {
            write!(
                writer,
                "The comparison could not proceed: at least one dataset is empty. "
            )?;
            write_fail(writer)?;
            return Ok(false);
        }

        if verdict.is_fully_matched {
            write!(
                writer,
                "The compared datasets are identical from a structural perspective ! - "
            )?;
            write_ok(writer)?;
            return Ok(true);
        }

        if verdict.is_disjoint() {
            write!(
                writer,
                "There are no structural matches between the compared datasets. They are completely different. "
            )?;
            write_fail(writer)?;
            return Ok(false);
        }

        write!(
            writer,
            "There are structural differences between the compared datasets, but also common fields. "
        )?;
        write_fail(writer)?;
        writeln!(writer, "Structural matches :")?;
        writeln!(writer, "{}", descriptor_grid(&verdict.matched))?;
        writeln!(writer, "Structural differences :")?;
        writeln!(writer, "{}", descriptor_grid(&verdict.mismatched))?;
        Ok(true)
    }

    fn write_counts(&self, result: &ComparisonResult, writer: &mut dyn WriteColor) -> Result<()> {
        if result.row_counts_match() {
            writeln!(
                writer,
                "Data counts match between datasets : {} recs !",
                result.primary_row_count
            )?;
        } else {
            writeln!(
                writer,
                "Data counts differ between datasets : PRIMARY : {} VS SECONDARY : {} !",
                result.primary_row_count, result.secondary_row_count
            )?;
        }
        Ok(())
    }

    fn write_summary(&self, result: &ComparisonResult, writer: &mut dyn WriteColor) -> Result<()> {
        if !result.has_differences() {
            write!(writer, "No content differences between the compared datasets ! - ")?;
            write_ok(writer)?;
            return Ok(());
        }

        write!(writer, "There are differences in the content of the 2 datasets. ")?;
        write_fail(writer)?;
        write!(writer, "There is a ")?;
        write_colored(
            writer,
            &format!("{:.2}", result.difference_percentage()),
            Color::Red,
        )?;
        writeln!(writer, " % difference between the 2 files.")?;
        Ok(())
    }

    fn write_details(&self, ctx: &RenderContext<'_>, writer: &mut dyn WriteColor) -> Result<()> {
        let reports = ctx.reports;

        if !reports.common_differences.is_empty() {
            writeln!(writer, "Records with differing fields (primary/secondary) :")?;
            writeln!(writer, "{}", report_grid(&reports.common_differences))?;
        }

        self.write_exclusive("Primary", &reports.primary_exclusive, writer)?;
        self.write_exclusive("Secondary", &reports.secondary_exclusive, writer)?;
        Ok(())
    }

    fn write_exclusive(
        &self,
        side: &str,
        table: &ReportTable,
        writer: &mut dyn WriteColor,
    ) -> Result<()> {
        if table.is_empty() {
            write!(
                writer,
                "No records that are only present in the {} dataset. - ",
                side
            )?;
            write_ok(writer)?;
        } else {
            writeln!(
                writer,
                "Records that are only present in the {} dataset : ",
                side
            )?;
            writeln!(writer, "{}", report_grid(table))?;
        }
        Ok(())
    }
}

impl Default for TerminalOutput {
    fn default() -> Self {
        Self::new()
    }
}

impl OutputFormatter for TerminalOutput {
    fn render(&self, ctx: &RenderContext<'_>, writer: &mut dyn WriteColor) -> Result<()> {
        self.write_header(ctx, writer)?;

        if !self.write_structure(ctx.result, writer)? {
            return Ok(());
        }

        if let Some(e) = ctx.content_error {
            write!(writer, "The content comparison could not run: {} ", e)?;
            write_fail(writer)?;
            return Ok(());
        }

        self.write_counts(ctx.result, writer)?;
        self.write_summary(ctx.result, writer)?;

        if ctx.show_details && ctx.result.has_differences() {
            self.write_details(ctx, writer)?;
        }

        Ok(())
    }
}

fn write_colored(writer: &mut dyn WriteColor, text: &str, color: Color) -> Result<()> {
    writer.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(writer, "{}", text)?;
    writer.reset()?;
    Ok(())
}

fn write_ok(writer: &mut dyn WriteColor) -> Result<()> {
    write_colored(writer, "OK", Color::Green)?;
    writeln!(writer, " ✅")?;
    Ok(())
}

fn write_fail(writer: &mut dyn WriteColor) -> Result<()> {
    write_colored(writer, "FAIL", Color::Red)?;
    writeln!(writer, " ❌")?;
    Ok(())
}

/// Grid with a leading row-index column
fn grid<I>(headers: &[String], rows: I) -> String
where
    I: IntoIterator<Item = (usize, Vec<String>)>,
{
    let mut builder = Builder::default();

    let mut header = vec![String::new()];
    header.extend(headers.iter().cloned());
    builder.push_record(header);

    for (index, cells) in rows {
        let mut record = vec![index.to_string()];
        record.extend(cells);
        builder.push_record(record);
    }

    let mut table = builder.build();
    table.with(Style::ascii());
    table.to_string()
}

fn report_grid(table: &ReportTable) -> String {
    grid(
        &table.headers,
        table
            .rows
            .iter()
            .map(|row| (row.index, row.cells.iter().map(|c| c.text()).collect())),
    )
}

fn descriptor_grid(columns: &[ColumnDescriptor]) -> String {
    let headers = ["Column".to_string(), "Data Type".to_string()];
    grid(
        &headers,
        columns
            .iter()
            .enumerate()
            .map(|(i, c)| (i, vec![c.name.clone(), c.data_type.to_string()])),
    )
}
