//! Invoice report rendering, file naming, write and lookup.

use std::fmt::Write as _;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::info;

use crate::invoice::{DISCOUNT_PERCENT, Invoice};

const REPORT_WIDTH: usize = 50;

/// Report-level failure.
#[derive(Debug, Error)]
pub enum ReportError {
    #[error("could not write invoice {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("could not read invoice {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Deterministic report filename for a customer.
///
/// Whitespace and path separators both map to `_`, so a customer name can
/// never escape the invoice directory.
pub fn invoice_filename(customer: &str) -> String {
    let sanitized: String = customer
        .chars()
        .map(|c| {
            if c.is_whitespace() || c == '/' || c == '\\' {
                '_'
            } else {
                c
            }
        })
        .collect();
    format!("Invoice_{sanitized}.txt")
}

/// Render the invoice as a fixed-width text report.
pub fn render(invoice: &Invoice, store_name: &str) -> String {
    let width = REPORT_WIDTH;
    let rule = "-".repeat(width);
    let mut out = String::new();

    let _ = writeln!(out, "{store_name:^width$}");
    let _ = writeln!(out, "Date: {}", invoice.date().format("%Y-%m-%d"));
    let _ = writeln!(out, "Invoice To: {}", invoice.customer());
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(out, "{:<30}{:>6}{:>14}", "Items", "Qty", "Total");
    let _ = writeln!(out, "{rule}");
    for line in invoice.lines() {
        let _ = writeln!(
            out,
            "{:<30}{:>6}{:>14}",
            line.name,
            line.quantity,
            format!("${}", line.total())
        );
    }
    let _ = writeln!(out, "{rule}");
    let _ = writeln!(
        out,
        "{:<36}{:>14}",
        "Sub Total",
        format!("${}", invoice.subtotal())
    );
    let _ = writeln!(
        out,
        "{:<36}{:>14}",
        format!("Discount @{DISCOUNT_PERCENT}%"),
        format!("${}", invoice.discount())
    );
    let _ = writeln!(out, "{:>width$}", "----------");
    let _ = writeln!(
        out,
        "{:<36}{:>14}",
        "Grand Total",
        format!("${}", invoice.grand_total())
    );
    let _ = writeln!(out, "{:>width$}", "----------");
    out
}

/// Render and write the report under `dir`, returning the file path.
///
/// An existing report for the same customer is overwritten.
pub fn write_report(
    dir: &Path,
    invoice: &Invoice,
    store_name: &str,
) -> Result<PathBuf, ReportError> {
    let path = dir.join(invoice_filename(invoice.customer()));
    std::fs::write(&path, render(invoice, store_name)).map_err(|source| ReportError::Write {
        path: path.clone(),
        source,
    })?;
    info!(path = %path.display(), customer = invoice.customer(), "invoice written");
    Ok(path)
}

/// Look up a previously written report by customer name.
///
/// Returns the raw contents verbatim; a missing report is `None`.
pub fn find_report(dir: &Path, customer: &str) -> Result<Option<String>, ReportError> {
    let path = dir.join(invoice_filename(customer));
    match std::fs::read_to_string(&path) {
        Ok(contents) => Ok(Some(contents)),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
        Err(source) => Err(ReportError::Read { path, source }),
    }
}
