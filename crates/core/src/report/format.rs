//! Value formatting shared by the HTML and PDF renderers.

use chrono::NaiveDate;

use crate::measurement::body_mass_index;

/// Placeholder for any missing value.
pub const MISSING: &str = "-";

/// Format a number with at most two decimals and no trailing zeros.
///
/// `72.5` → `"72.5"`, `80.0` → `"80"`, `23.456` → `"23.46"`. Missing and
/// non-finite values render as [`MISSING`].
pub fn format_number(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => trim_decimals(v),
        _ => MISSING.to_string(),
    }
}

/// Format the BMI derived from weight (kg) and height (cm).
pub fn format_bmi(weight_kg: Option<f64>, height_cm: Option<f64>) -> String {
    format_number(body_mass_index(weight_kg, height_cm))
}

/// Format a date as `YYYY-MM-DD`.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => MISSING.to_string(),
    }
}

/// Escape `&`, `<`, `>` and `"` for inclusion in HTML text or attributes.
pub fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            other => out.push(other),
        }
    }
    out
}

fn trim_decimals(value: f64) -> String {
    let mut s = format!("{value:.2}");
    if s.contains('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.ends_with('.') {
            s.pop();
        }
    }
    if s == "-0" {
        s = "0".to_string();
    }
    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numbers_drop_trailing_zeros() {
        assert_eq!(format_number(Some(72.5)), "72.5");
        assert_eq!(format_number(Some(80.0)), "80");
        assert_eq!(format_number(Some(23.456)), "23.46");
        assert_eq!(format_number(Some(0.004)), "0");
        assert_eq!(format_number(Some(-0.001)), "0");
        assert_eq!(format_number(Some(1.10)), "1.1");
    }

    #[test]
    fn missing_numbers_render_dash() {
        assert_eq!(format_number(None), "-");
        assert_eq!(format_number(Some(f64::NAN)), "-");
        assert_eq!(format_number(Some(f64::INFINITY)), "-");
    }

    #[test]
    fn bmi_rounds_to_two_decimals() {
        assert_eq!(format_bmi(Some(70.0), Some(175.0)), "22.86");
        assert_eq!(format_bmi(Some(80.0), Some(200.0)), "20");
    }

    #[test]
    fn bmi_renders_dash_without_inputs() {
        assert_eq!(format_bmi(None, Some(175.0)), "-");
        assert_eq!(format_bmi(Some(70.0), None), "-");
        assert_eq!(format_bmi(Some(70.0), Some(0.0)), "-");
    }

    #[test]
    fn dates_use_iso_format() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 9).unwrap();
        assert_eq!(format_date(Some(date)), "2024-03-09");
        assert_eq!(format_date(None), "-");
    }

    #[test]
    fn html_escaping_covers_markup_characters() {
        assert_eq!(
            escape_html(r#"<b>"Tom & Jerry"</b>"#),
            "&lt;b&gt;&quot;Tom &amp; Jerry&quot;&lt;/b&gt;"
        );
        assert_eq!(escape_html("plain"), "plain");
    }
}
