//! Measurement report rendering.
//!
//! Reports are built in two steps: a pure builder turns a client and its
//! measurements into a [`ReportDocument`], which can then be rendered as a
//! styled XHTML page ([`ReportDocument::to_html`]) or as PDF bytes
//! ([`render_pdf`]). Nothing here reads the clock or the database, so the
//! same inputs always yield the same output.

pub mod document;
pub mod filename;
pub mod format;
pub mod html;
pub mod pdf;

pub use document::{
    detail_report, list_report, ClientCard, HistoryRow, HistoryTable, Metric, MetricSection,
    ReportClient, ReportDocument, ReportKind, ReportMeasurement, ReportSection,
};
pub use filename::{client_report_filename, detail_report_filename};
pub use pdf::{render_pdf, ReportError};
