//! Output formatting for domain reports.
//!
//! Reports are ranked `(domain, count)` pairs, displayed as plain text,
//! a table, or CSV.

use std::io::Write;

use clap::ValueEnum;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// One `domain: count` line per entry (default)
    Text,
    /// Pretty-printed table
    Table,
    /// Comma-separated values
    Csv,
}

/// Formats ranked reports.
pub struct OutputFormatter {
    format: OutputFormat,
}

impl OutputFormatter {
    /// Create a new formatter with the specified format.
    pub fn new(format: OutputFormat) -> Self {
        Self { format }
    }

    /// Write `report` under `title` (the title is only shown in text mode).
    pub fn write<W: Write>(
        &self,
        title: &str,
        report: &[(&str, u64)],
        writer: &mut W,
    ) -> std::io::Result<()> {
        match self.format {
            OutputFormat::Text => self.write_text(title, report, writer),
            OutputFormat::Table => self.write_table(report, writer),
            OutputFormat::Csv => self.write_csv(report, writer),
        }
    }

    fn write_text<W: Write>(
        &self,
        title: &str,
        report: &[(&str, u64)],
        writer: &mut W,
    ) -> std::io::Result<()> {
        writeln!(writer, "{title}")?;
        for (domain, count) in report {
            writeln!(writer, "{domain}: {count}")?;
        }
        Ok(())
    }

    fn write_table<W: Write>(&self, report: &[(&str, u64)], writer: &mut W) -> std::io::Result<()> {
        use comfy_table::{Cell, CellAlignment, Table};

        let mut table = Table::new();
        table.set_header(vec![Cell::new("#"), Cell::new("domain"), Cell::new("count")]);

        for (rank, (domain, count)) in report.iter().enumerate() {
            table.add_row(vec![
                Cell::new(rank + 1).set_alignment(CellAlignment::Right),
                Cell::new(domain),
                Cell::new(count).set_alignment(CellAlignment::Right),
            ]);
        }

        writeln!(writer, "{table}")
    }

    fn write_csv<W: Write>(&self, report: &[(&str, u64)], writer: &mut W) -> std::io::Result<()> {
        writeln!(writer, "domain,count")?;
        for (domain, count) in report {
            // Escape commas and quotes
            if domain.contains(',') || domain.contains('"') || domain.contains('\n') {
                writeln!(writer, "\"{}\",{count}", domain.replace('"', "\"\""))?;
            } else {
                writeln!(writer, "{domain},{count}")?;
            }
        }
        Ok(())
    }
}
