//! Report document model and builders.
//!
//! Text in the model is stored unescaped; each renderer applies its own
//! escaping.

use chrono::NaiveDate;

use crate::client::full_name;
use crate::types::DbId;

use super::format::{format_bmi, format_date, format_number};

/// The client fields a report needs.
#[derive(Debug, Clone)]
pub struct ReportClient {
    pub id: DbId,
    pub first_name: String,
    pub last_name: Option<String>,
}

impl ReportClient {
    pub fn display_name(&self) -> String {
        full_name(&self.first_name, self.last_name.as_deref())
    }
}

/// The measurement fields a report needs.
#[derive(Debug, Clone)]
pub struct ReportMeasurement {
    pub id: DbId,
    pub measured_on: NaiveDate,
    pub weight_kg: f64,
    pub height_cm: f64,
    pub chest_cm: f64,
    pub waist_cm: f64,
    pub hip_cm: f64,
    pub left_arm_cm: f64,
    pub right_arm_cm: f64,
    pub left_leg_cm: f64,
    pub right_leg_cm: f64,
    pub body_fat_pct: Option<f64>,
    pub notes: Option<String>,
}

impl ReportMeasurement {
    fn bmi(&self) -> String {
        format_bmi(Some(self.weight_kg), Some(self.height_cm))
    }

    fn visible_notes(&self) -> Option<&str> {
        self.notes
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportKind {
    /// All measurements of one client, newest first.
    List,
    /// A single measurement.
    Detail,
}

/// A labelled value with an optional unit.
#[derive(Debug, Clone, PartialEq)]
pub struct Metric {
    pub label: String,
    pub value: String,
    pub unit: Option<String>,
}

impl Metric {
    fn new(label: &str, value: String, unit: &str) -> Self {
        Self {
            label: label.to_string(),
            value,
            unit: (!unit.is_empty()).then(|| unit.to_string()),
        }
    }
}

/// The highlighted block under the header identifying the client.
#[derive(Debug, Clone)]
pub struct ClientCard {
    pub name: String,
    pub caption: String,
    pub badge: String,
    pub detail: Option<String>,
    pub summary: Vec<Metric>,
}

#[derive(Debug, Clone)]
pub struct MetricSection {
    pub title: String,
    pub columns: usize,
    pub metrics: Vec<Metric>,
}

#[derive(Debug, Clone)]
pub struct HistoryRow {
    pub cells: Vec<String>,
    pub notes: Option<String>,
}

#[derive(Debug, Clone)]
pub struct HistoryTable {
    pub headers: Vec<String>,
    pub rows: Vec<HistoryRow>,
}

#[derive(Debug, Clone)]
pub enum ReportSection {
    Metrics(MetricSection),
    /// Measurement history; `table` is `None` when there is nothing to list.
    History {
        title: String,
        table: Option<HistoryTable>,
        empty_message: String,
    },
    Notes {
        title: String,
        text: String,
    },
}

/// A fully assembled report, ready to render.
#[derive(Debug, Clone)]
pub struct ReportDocument {
    pub kind: ReportKind,
    pub title: String,
    pub subtitle: String,
    pub card: ClientCard,
    pub sections: Vec<ReportSection>,
    pub footer: Option<String>,
}

const HISTORY_HEADERS: [&str; 7] = [
    "Fecha",
    "Peso (kg)",
    "Altura (cm)",
    "IMC",
    "Cintura (cm)",
    "Cadera (cm)",
    "Grasa (%)",
];

/// Build the multi-measurement report.
///
/// `measurements` must already be ordered newest first; the first entry is
/// summarised on the client card.
pub fn list_report(
    client: &ReportClient,
    measurements: &[ReportMeasurement],
    generated_on: NaiveDate,
) -> ReportDocument {
    let latest = measurements.first();

    let summary = latest
        .map(|m| {
            vec![
                Metric::new("Peso", format_number(Some(m.weight_kg)), "kg"),
                Metric::new("Altura", format_number(Some(m.height_cm)), "cm"),
                Metric::new("IMC", m.bmi(), ""),
                Metric::new("Grasa", format_number(m.body_fat_pct), "%"),
            ]
        })
        .unwrap_or_default();

    let card = ClientCard {
        name: client.display_name(),
        caption: format!("Cliente ID: {}", client.id),
        badge: format!("{} mediciones", measurements.len()),
        detail: Some(format!(
            "Ultima medicion: {}",
            format_date(latest.map(|m| m.measured_on))
        )),
        summary,
    };

    let table = (!measurements.is_empty()).then(|| HistoryTable {
        headers: HISTORY_HEADERS.iter().map(|h| h.to_string()).collect(),
        rows: measurements
            .iter()
            .map(|m| HistoryRow {
                cells: vec![
                    format_date(Some(m.measured_on)),
                    format_number(Some(m.weight_kg)),
                    format_number(Some(m.height_cm)),
                    m.bmi(),
                    format_number(Some(m.waist_cm)),
                    format_number(Some(m.hip_cm)),
                    format_number(m.body_fat_pct),
                ],
                notes: m.visible_notes().map(str::to_string),
            })
            .collect(),
    });

    ReportDocument {
        kind: ReportKind::List,
        title: "Reporte de Mediciones".to_string(),
        subtitle: "Resumen de mediciones del cliente".to_string(),
        card,
        sections: vec![ReportSection::History {
            title: "Historial de Mediciones".to_string(),
            table,
            empty_message: "No hay mediciones registradas.".to_string(),
        }],
        footer: Some(format!("Generado: {}", format_date(Some(generated_on)))),
    }
}

/// Build the single-measurement report.
pub fn detail_report(client: &ReportClient, measurement: &ReportMeasurement) -> ReportDocument {
    let m = measurement;
    let cm = |v: f64| format_number(Some(v));

    let mut sections = vec![
        ReportSection::Metrics(MetricSection {
            title: "Datos Basicos".to_string(),
            columns: 4,
            metrics: vec![
                Metric::new("Peso", cm(m.weight_kg), "kg"),
                Metric::new("Altura", cm(m.height_cm), "cm"),
                Metric::new("IMC", m.bmi(), ""),
                Metric::new("Grasa", format_number(m.body_fat_pct), "%"),
            ],
        }),
        ReportSection::Metrics(MetricSection {
            title: "Circunferencias Torso".to_string(),
            columns: 3,
            metrics: vec![
                Metric::new("Pecho", cm(m.chest_cm), "cm"),
                Metric::new("Cintura", cm(m.waist_cm), "cm"),
                Metric::new("Cadera", cm(m.hip_cm), "cm"),
            ],
        }),
        ReportSection::Metrics(MetricSection {
            title: "Circunferencias Brazos".to_string(),
            columns: 2,
            metrics: vec![
                Metric::new("Brazo Izquierdo", cm(m.left_arm_cm), "cm"),
                Metric::new("Brazo Derecho", cm(m.right_arm_cm), "cm"),
            ],
        }),
        ReportSection::Metrics(MetricSection {
            title: "Circunferencias Piernas".to_string(),
            columns: 2,
            metrics: vec![
                Metric::new("Pierna Izquierda", cm(m.left_leg_cm), "cm"),
                Metric::new("Pierna Derecha", cm(m.right_leg_cm), "cm"),
            ],
        }),
    ];

    if let Some(notes) = m.visible_notes() {
        sections.push(ReportSection::Notes {
            title: "Notas".to_string(),
            text: notes.to_string(),
        });
    }

    ReportDocument {
        kind: ReportKind::Detail,
        title: "Detalle de Medicion".to_string(),
        subtitle: "Resumen completo de la medicion registrada".to_string(),
        card: ClientCard {
            name: client.display_name(),
            caption: format!("Fecha: {}", format_date(Some(m.measured_on))),
            badge: format!("Medicion ID: {}", m.id),
            detail: None,
            summary: Vec::new(),
        },
        sections,
        footer: None,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn client() -> ReportClient {
        ReportClient {
            id: 5,
            first_name: "Ana".to_string(),
            last_name: Some("Mora".to_string()),
        }
    }

    pub(crate) fn measurement(id: DbId, day: u32, notes: Option<&str>) -> ReportMeasurement {
        ReportMeasurement {
            id,
            measured_on: NaiveDate::from_ymd_opt(2024, 5, day).unwrap(),
            weight_kg: 70.0,
            height_cm: 175.0,
            chest_cm: 95.5,
            waist_cm: 80.0,
            hip_cm: 98.25,
            left_arm_cm: 31.0,
            right_arm_cm: 31.5,
            left_leg_cm: 55.0,
            right_leg_cm: 55.2,
            body_fat_pct: None,
            notes: notes.map(str::to_string),
        }
    }

    fn generated() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 1).unwrap()
    }

    #[test]
    fn list_report_summarises_latest_measurement() {
        let items = vec![measurement(2, 20, None), measurement(1, 10, None)];
        let doc = list_report(&client(), &items, generated());

        assert_eq!(doc.kind, ReportKind::List);
        assert_eq!(doc.card.name, "Ana Mora");
        assert_eq!(doc.card.badge, "2 mediciones");
        assert_eq!(
            doc.card.detail.as_deref(),
            Some("Ultima medicion: 2024-05-20")
        );
        let bmi = doc.card.summary.iter().find(|m| m.label == "IMC").unwrap();
        assert_eq!(bmi.value, "22.86");
        let fat = doc.card.summary.iter().find(|m| m.label == "Grasa").unwrap();
        assert_eq!(fat.value, "-");
        assert_eq!(doc.footer.as_deref(), Some("Generado: 2024-06-01"));
    }

    #[test]
    fn list_report_rows_follow_input_order_and_carry_notes() {
        let items = vec![
            measurement(2, 20, Some("after holidays")),
            measurement(1, 10, Some("   ")),
        ];
        let doc = list_report(&client(), &items, generated());

        let ReportSection::History { table, .. } = &doc.sections[0] else {
            panic!("expected history section");
        };
        let table = table.as_ref().unwrap();
        assert_eq!(table.headers.len(), 7);
        assert_eq!(table.rows[0].cells[0], "2024-05-20");
        assert_eq!(table.rows[0].cells[5], "98.25");
        assert_eq!(table.rows[0].notes.as_deref(), Some("after holidays"));
        assert_eq!(table.rows[1].notes, None);
    }

    #[test]
    fn empty_list_report_has_no_table() {
        let doc = list_report(&client(), &[], generated());
        assert!(doc.card.summary.is_empty());
        assert_eq!(doc.card.detail.as_deref(), Some("Ultima medicion: -"));
        let ReportSection::History { table, .. } = &doc.sections[0] else {
            panic!("expected history section");
        };
        assert!(table.is_none());
    }

    #[test]
    fn detail_report_has_all_metric_groups() {
        let doc = detail_report(&client(), &measurement(9, 3, None));
        assert_eq!(doc.kind, ReportKind::Detail);
        assert_eq!(doc.card.badge, "Medicion ID: 9");
        assert_eq!(doc.card.caption, "Fecha: 2024-05-03");
        assert_eq!(doc.sections.len(), 4);

        let metrics: usize = doc
            .sections
            .iter()
            .map(|s| match s {
                ReportSection::Metrics(section) => section.metrics.len(),
                _ => 0,
            })
            .sum();
        assert_eq!(metrics, 11);
    }

    #[test]
    fn detail_report_appends_notes_section_when_present() {
        let doc = detail_report(&client(), &measurement(9, 3, Some(" hydrated ")));
        match doc.sections.last() {
            Some(ReportSection::Notes { text, .. }) => assert_eq!(text, "hydrated"),
            other => panic!("expected notes section, got {other:?}"),
        }
    }
}
