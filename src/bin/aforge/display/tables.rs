use std::io::{self, Write};

use admet_forge::pipeline::StageReport;
use admet_forge::{DatasetRegistry, NamedDataset};
use polars::prelude::DataFrame;

use crate::util::text::truncate;

const INDENT: &str = "      ";

pub fn print_stage_reports(reports: &[StageReport]) {
    if reports.is_empty() {
        return;
    }

    let stderr = io::stderr();
    let mut out = stderr.lock();

    let _ = writeln!(out, "{}┌─ Stage Summary ─┐", INDENT);
    let _ = writeln!(out, "{}┌────────────────┬─────────────┬─────────┬─────────┬─────────┐", INDENT);
    let _ = writeln!(out, "{}│ Stage          │ Target      │ Rows In │Rows Out │ Dropped │", INDENT);
    let _ = writeln!(out, "{}├────────────────┼─────────────┼─────────┼─────────┼─────────┤", INDENT);

    for report in reports {
        let dropped = match report.dropped() {
            0 => "-".to_string(),
            n => n.to_string(),
        };
        let _ = writeln!(
            out,
            "{}│ {:<14} │ {:<11} │ {:>7} │ {:>7} │ {:>7} │",
            INDENT,
            report.stage.to_string(),
            report.target.column(),
            report.rows_in,
            report.rows_out,
            dropped
        );
    }

    let _ = writeln!(out, "{}└────────────────┴─────────────┴─────────┴─────────┴─────────┘", INDENT);
}

pub fn print_dataset_summary(dataset: &NamedDataset, df: &DataFrame) {
    let stderr = io::stderr();
    let mut out = stderr.lock();

    let size = std::fs::metadata(dataset.path())
        .map(|meta| format_size(meta.len()))
        .unwrap_or_else(|_| "?".to_string());

    let rows = [
        ("Dataset", dataset.name().to_string()),
        ("Path", dataset.path().display().to_string()),
        ("Size", size),
        ("Shape", format!("{} rows × {} columns", df.height(), df.width())),
    ];

    let _ = writeln!(out, "{}┌─ Dataset Summary ─┐", INDENT);
    for (key, value) in &rows {
        let _ = writeln!(out, "{}  {:<8} {}", INDENT, key, truncate(value, 60));
    }
    let _ = writeln!(out);

    let name_w = 30usize;
    let type_w = 10usize;
    let _ = writeln!(
        out,
        "{}┌{}┬{}┬──────────┐",
        INDENT,
        "─".repeat(name_w + 2),
        "─".repeat(type_w + 2)
    );
    let _ = writeln!(
        out,
        "{}│ {:<name_w$} │ {:<type_w$} │    Nulls │",
        INDENT, "Column", "Type"
    );
    let _ = writeln!(
        out,
        "{}├{}┼{}┼──────────┤",
        INDENT,
        "─".repeat(name_w + 2),
        "─".repeat(type_w + 2)
    );
    for column in df.get_columns() {
        let _ = writeln!(
            out,
            "{}│ {:<name_w$} │ {:<type_w$} │ {:>8} │",
            INDENT,
            truncate(column.name(), name_w),
            truncate(&column.dtype().to_string(), type_w),
            column.null_count()
        );
    }
    let _ = writeln!(
        out,
        "{}└{}┴{}┴──────────┘",
        INDENT,
        "─".repeat(name_w + 2),
        "─".repeat(type_w + 2)
    );
}

pub fn print_dataset_list(registry: &DatasetRegistry) {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for dataset in registry.all() {
        let marker = if dataset.exists() { "✓" } else { "·" };
        let _ = writeln!(
            out,
            "{} {:<40} {}",
            marker,
            dataset.name(),
            dataset.path().display()
        );
    }
}

fn format_size(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KiB", "MiB", "GiB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.1} {}", UNITS[unit])
    }
}
