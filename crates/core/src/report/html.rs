//! XHTML rendering of a [`ReportDocument`].

use super::document::{ClientCard, Metric, ReportDocument, ReportKind, ReportSection};
use super::format::escape_html;

const LIST_STYLE: &str = "\
@page{size:A4;margin:16mm;}\
body{font-family:'Segoe UI',Arial,Helvetica,sans-serif;margin:0;padding:18px;color:#111827;background:#f1f2f5;font-size:12px;}\
.container{max-width:820px;margin:0 auto;}\
.header{background:#ffe5e6;border-radius:14px;padding:14px 16px;color:#111827;}\
.title{font-size:18px;font-weight:800;margin:0 0 4px 0;}\
.subtitle{font-size:11px;color:#6b7280;margin:0;}\
.card{background:#fff;border-radius:12px;padding:12px;}\
.card-soft{background:#ffe5d9;border-radius:12px;padding:12px;border:1px solid #ffe1d0;}\
.label{font-size:10px;color:#6b7280;text-transform:uppercase;letter-spacing:.08em;}\
.value{font-size:14px;font-weight:700;color:#111827;}\
.badge{display:inline-block;background:#ff5e62;color:#fff;border-radius:999px;padding:4px 10px;font-size:12px;font-weight:700;}\
.summary{display:flex;gap:12px;flex-wrap:wrap;margin-top:12px;}\
.summary-card{flex:1;min-width:130px;background:#fff7f2;border-radius:10px;padding:8px 10px;border:1px solid #ffe6da;}\
.table{width:100%;border-collapse:separate;border-spacing:0 4px;margin-top:10px;font-size:11px;}\
.table th{font-size:11px;color:#6b7280;text-align:left;padding:6px 8px;}\
.table tr{background:#f9fafb;}\
.table td{padding:6px 8px;font-size:11px;border-top:1px solid #f3f4f6;border-bottom:1px solid #f3f4f6;}\
.muted{color:#6b7280;font-size:11px;}\
.section-title{font-size:13px;font-weight:800;margin:14px 0 8px 0;color:#111827;}";

const DETAIL_STYLE: &str = "\
body{font-family:'Segoe UI',Arial,Helvetica,sans-serif;margin:0;padding:32px;color:#111827;background:#f1f2f5;}\
.container{max-width:900px;margin:0 auto;}\
.header{background:#ffe5e6;border-radius:20px;padding:22px 24px;color:#111827;}\
.title{font-size:24px;font-weight:800;margin:0 0 4px 0;}\
.subtitle{font-size:13px;color:#6b7280;margin:0;}\
.card{background:#fff;border-radius:18px;padding:20px;}\
.card-soft{background:#ffe5d9;border-radius:18px;padding:18px;border:1px solid #ffe1d0;}\
.section-title{font-size:16px;font-weight:800;margin:24px 0 12px 0;color:#111827;}\
.grid-4{display:grid;grid-template-columns:repeat(4,1fr);gap:12px;}\
.grid-3{display:grid;grid-template-columns:repeat(3,1fr);gap:12px;}\
.grid-2{display:grid;grid-template-columns:repeat(2,1fr);gap:12px;}\
.metric{background:#f9fafb;border:1px solid #eef0f4;border-radius:14px;padding:12px;text-align:center;}\
.metric .label{font-size:11px;color:#6b7280;text-transform:uppercase;letter-spacing:.08em;}\
.metric .value{font-size:18px;font-weight:800;color:#111827;}\
.metric .unit{font-size:11px;color:#6b7280;}\
.badge{display:inline-block;background:#ff5e62;color:#fff;border-radius:999px;padding:4px 10px;font-size:12px;font-weight:700;}\
.muted{color:#6b7280;font-size:12px;}";

impl ReportDocument {
    /// HTML view of the report: a standalone XHTML page with the same
    /// sections the PDF lays out, for previews or printing from a browser.
    pub fn to_html(&self) -> String {
        let style = match self.kind {
            ReportKind::List => LIST_STYLE,
            ReportKind::Detail => DETAIL_STYLE,
        };

        let mut html = String::with_capacity(8000);
        html.push_str("<?xml version=\"1.0\" encoding=\"UTF-8\"?>");
        html.push_str("<html xmlns=\"http://www.w3.org/1999/xhtml\" lang=\"es\">");
        html.push_str("<head><meta charset=\"utf-8\"/><style>");
        html.push_str(style);
        html.push_str("</style></head><body><div class=\"container\">");

        html.push_str("<div class=\"header\">");
        push_div(&mut html, "title", &self.title);
        push_div(&mut html, "subtitle", &self.subtitle);
        html.push_str("</div>");

        html.push_str("<div style=\"height:16px;\"></div>");
        push_card(&mut html, &self.card);

        for section in &self.sections {
            push_section(&mut html, section);
        }

        if let Some(footer) = &self.footer {
            html.push_str("<div class=\"muted\" style=\"margin-top:16px;\">");
            html.push_str(&escape_html(footer));
            html.push_str("</div>");
        }

        html.push_str("</div></body></html>");
        html
    }
}

fn push_div(html: &mut String, class: &str, text: &str) {
    html.push_str(&format!("<div class=\"{class}\">{}</div>", escape_html(text)));
}

fn push_card(html: &mut String, card: &ClientCard) {
    html.push_str("<div class=\"card\"><div class=\"card-soft\">");
    html.push_str(
        "<div style=\"display:flex;justify-content:space-between;align-items:center;gap:12px;\"><div>",
    );
    html.push_str(&format!(
        "<div style=\"font-size:20px;font-weight:800;\">{}</div>",
        escape_html(&card.name)
    ));
    push_div(html, "muted", &card.caption);
    html.push_str("</div>");
    push_div(html, "badge", &card.badge);
    html.push_str("</div>");

    if let Some(detail) = &card.detail {
        html.push_str(&format!(
            "<div class=\"muted\" style=\"margin-top:8px;\">{}</div>",
            escape_html(detail)
        ));
    }

    if !card.summary.is_empty() {
        html.push_str("<div class=\"summary\">");
        for metric in &card.summary {
            html.push_str("<div class=\"summary-card\">");
            push_div(html, "label", &metric.label);
            push_div(html, "value", &value_with_unit(metric));
            html.push_str("</div>");
        }
        html.push_str("</div>");
    }
    html.push_str("</div></div>");
}

fn push_section(html: &mut String, section: &ReportSection) {
    match section {
        ReportSection::Metrics(group) => {
            push_div(html, "section-title", &group.title);
            html.push_str(&format!(
                "<div class=\"card\"><div class=\"grid-{}\">",
                group.columns
            ));
            for metric in &group.metrics {
                html.push_str("<div class=\"metric\">");
                push_div(html, "label", &metric.label);
                push_div(html, "value", &metric.value);
                if let Some(unit) = &metric.unit {
                    push_div(html, "unit", unit);
                }
                html.push_str("</div>");
            }
            html.push_str("</div></div>");
        }
        ReportSection::History {
            title,
            table,
            empty_message,
        } => {
            push_div(html, "section-title", title);
            html.push_str("<div class=\"card\">");
            match table {
                None => push_div(html, "muted", empty_message),
                Some(table) => {
                    html.push_str("<table class=\"table\"><thead><tr>");
                    for header in &table.headers {
                        html.push_str(&format!("<th>{}</th>", escape_html(header)));
                    }
                    html.push_str("</tr></thead><tbody>");
                    for row in &table.rows {
                        html.push_str("<tr>");
                        for cell in &row.cells {
                            html.push_str(&format!("<td>{}</td>", escape_html(cell)));
                        }
                        html.push_str("</tr>");
                        if let Some(notes) = &row.notes {
                            html.push_str(&format!(
                                "<tr><td colspan=\"{}\" class=\"muted\">Notas: {}</td></tr>",
                                table.headers.len(),
                                escape_html(notes)
                            ));
                        }
                    }
                    html.push_str("</tbody></table>");
                }
            }
            html.push_str("</div>");
        }
        ReportSection::Notes { title, text } => {
            push_div(html, "section-title", title);
            html.push_str("<div class=\"card\">");
            push_div(html, "muted", text);
            html.push_str("</div>");
        }
    }
}

fn value_with_unit(metric: &Metric) -> String {
    match &metric.unit {
        Some(unit) => format!("{} {unit}", metric.value),
        None => metric.value.clone(),
    }
}
