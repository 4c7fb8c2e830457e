//! `quickbill-invoicing` — invoice composition, rendering and lookup.
//!
//! Invoices are write-once text reports: composed from catalog products,
//! rendered, written to a per-customer file and discarded. Lookup treats a
//! written report as an opaque blob.

pub mod invoice;
pub mod report;

pub use invoice::{DISCOUNT_PERCENT, Invoice, LineItem};
pub use report::{ReportError, find_report, invoice_filename, render, write_report};
