//! Download file names for generated reports.

use std::sync::LazyLock;

use regex::Regex;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

use crate::client::full_name;
use crate::types::DbId;

static NON_ALNUM: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("valid regex"));

/// Slug used when a client's name has no ASCII letters or digits left.
const FALLBACK_SLUG: &str = "cliente";

/// Reduce a display name to an ASCII slug: accents are stripped, every run
/// of other characters becomes a single `_`.
fn slugify(name: &str) -> String {
    let stripped: String = name.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let replaced = NON_ALNUM.replace_all(&stripped, "_");
    let slug = replaced.trim_matches('_');
    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug.to_string()
    }
}

/// File name for a client's full measurement report, e.g.
/// `mediciones_Jose_Nandu.pdf`.
pub fn client_report_filename(first_name: &str, last_name: Option<&str>) -> String {
    format!("mediciones_{}.pdf", slugify(&full_name(first_name, last_name)))
}

/// File name for a single measurement report.
pub fn detail_report_filename(measurement_id: DbId) -> String {
    format!("medicion_{measurement_id}.pdf")
}
