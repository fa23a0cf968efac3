use anyhow::{Result, anyhow};
use std::io::Write;
use std::str::FromStr;

use crate::common::DateReport;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Table,
    Csv,
    Json,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(anyhow!("unknown output format: {}, expected table, csv or json", other)),
        }
    }
}

/// `chrono Time: 0.123ms`
pub fn timing_line(report: &DateReport) -> String {
    format!("{} Time: {:.3}ms", report.library, report.elapsed_millis())
}

/// Two column box table, `(index)` and `Values`.
pub fn render_table(rows: &[(String, String)]) -> String {
    const INDEX: &str = "(index)";
    const VALUES: &str = "Values";

    // width on chars, pt-br names carry accents
    let width = |s: &str| s.chars().count();
    let key_w = rows.iter().map(|(k, _)| width(k)).fold(width(INDEX), usize::max);
    let val_w = rows.iter().map(|(_, v)| width(v)).fold(width(VALUES), usize::max);

    let line = |l: char, m: char, r: char| {
        format!("{}{}{}{}{}\n", l, "─".repeat(key_w + 2), m, "─".repeat(val_w + 2), r)
    };
    let cell = |s: &str, w: usize| format!(" {}{} ", s, " ".repeat(w - width(s)));

    let mut out = line('┌', '┬', '┐');
    out += &format!("│{}│{}│\n", cell(INDEX, key_w), cell(VALUES, val_w));
    out += &line('├', '┼', '┤');
    for (k, v) in rows {
        out += &format!("│{}│{}│\n", cell(k, key_w), cell(v, val_w));
    }
    out += &line('└', '┴', '┘');
    out
}

pub fn write_table<W: Write>(out: &mut W, report: &DateReport) -> Result<()> {
    writeln!(out, "{}", timing_line(report))?;
    write!(out, "{}", render_table(&report.rows()))?;
    Ok(())
}

/// header: library,hour,next_week,zoned,is_before,is_leap_year,elapsed_us
pub fn write_csv<W: Write>(out: W, reports: &[DateReport]) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(out);
    for report in reports {
        wtr.serialize(report)?;
    }
    wtr.flush()?;
    Ok(())
}

pub fn write_json<W: Write>(mut out: W, reports: &[DateReport]) -> Result<()> {
    serde_json::to_writer_pretty(&mut out, reports)?;
    writeln!(out)?;
    Ok(())
}

/// Print all reports in `format`.
pub fn write_reports<W: Write>(
    mut out: W,
    reports: &[DateReport],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Table => {
            for report in reports {
                write_table(&mut out, report)?;
            }
            Ok(())
        }
        OutputFormat::Csv => write_csv(out, reports),
        OutputFormat::Json => write_json(out, reports),
    }
}
