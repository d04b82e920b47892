//! PDF rendering of a [`ReportDocument`].
//!
//! Pages are A4 and laid out top to bottom with the standard Helvetica
//! faces, so no font files are embedded. Long history tables continue on a
//! new page with the header row repeated.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use crate::error::CoreError;

use super::document::{
    ClientCard, HistoryTable, Metric, MetricSection, ReportDocument, ReportSection,
};

const PAGE_WIDTH: f32 = 595.0;
const PAGE_HEIGHT: f32 = 842.0;
const MARGIN: f32 = 40.0;
const CONTENT_WIDTH: f32 = PAGE_WIDTH - 2.0 * MARGIN;
const PADDING: f32 = 16.0;
const GAP: f32 = 8.0;

/// Errors produced while serialising a report to PDF.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("failed to encode PDF page content: {0}")]
    Encode(String),

    #[error("failed to write PDF document: {0}")]
    Write(String),
}

impl From<ReportError> for CoreError {
    fn from(err: ReportError) -> Self {
        CoreError::Internal(err.to_string())
    }
}

#[derive(Debug, Clone, Copy)]
struct Rgb(f32, f32, f32);

const INK: Rgb = Rgb(0.067, 0.094, 0.153);
const MUTED: Rgb = Rgb(0.420, 0.447, 0.502);
const WHITE: Rgb = Rgb(1.0, 1.0, 1.0);
const HEADER_BG: Rgb = Rgb(1.0, 0.898, 0.902);
const CARD_BG: Rgb = Rgb(1.0, 0.898, 0.851);
const SUMMARY_BG: Rgb = Rgb(1.0, 0.969, 0.949);
const METRIC_BG: Rgb = Rgb(0.976, 0.980, 0.984);
const BADGE_BG: Rgb = Rgb(1.0, 0.369, 0.384);

#[derive(Debug, Clone, Copy)]
enum Font {
    Regular,
    Bold,
}

impl Font {
    fn resource(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }

    /// Rough average glyph width as a fraction of the font size.
    fn em_ratio(self) -> f32 {
        match self {
            Self::Regular => 0.5,
            Self::Bold => 0.55,
        }
    }
}

fn text_width(text: &str, font: Font, size: f32) -> f32 {
    text.chars().count() as f32 * size * font.em_ratio()
}

fn num(value: f32) -> Object {
    value.into()
}

/// Render `document` to PDF bytes.
pub fn render_pdf(document: &ReportDocument) -> Result<Vec<u8>, ReportError> {
    let mut canvas = Canvas::new();
    layout(&mut canvas, document);
    let pages = canvas.finish();

    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular_id,
            "F2" => bold_id,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for operations in pages {
        let content = Content { operations };
        let bytes = content
            .encode()
            .map_err(|e| ReportError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, bytes));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![
                Object::Integer(0),
                Object::Integer(0),
                Object::Integer(PAGE_WIDTH as i64),
                Object::Integer(PAGE_HEIGHT as i64),
            ],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buffer = Vec::new();
    doc.save_to(&mut buffer)
        .map_err(|e| ReportError::Write(e.to_string()))?;
    Ok(buffer)
}

// ---------------------------------------------------------------------------
// Layout
// ---------------------------------------------------------------------------

fn layout(canvas: &mut Canvas, document: &ReportDocument) {
    draw_header(canvas, &document.title, &document.subtitle);
    draw_card(canvas, &document.card);

    for section in &document.sections {
        match section {
            ReportSection::Metrics(group) => draw_metric_section(canvas, group),
            ReportSection::History {
                title,
                table,
                empty_message,
            } => {
                draw_section_title(canvas, title);
                match table {
                    Some(table) => draw_history(canvas, table),
                    None => {
                        canvas.ensure_space(16.0);
                        let y = canvas.y - 11.0;
                        canvas.text(MARGIN, y, Font::Regular, 10.0, MUTED, empty_message);
                        canvas.advance(16.0);
                    }
                }
            }
            ReportSection::Notes { title, text } => {
                draw_section_title(canvas, title);
                for line in wrap(text, Font::Regular, 10.0, CONTENT_WIDTH) {
                    canvas.ensure_space(14.0);
                    let y = canvas.y - 11.0;
                    canvas.text(MARGIN, y, Font::Regular, 10.0, MUTED, &line);
                    canvas.advance(14.0);
                }
            }
        }
    }

    if let Some(footer) = &document.footer {
        canvas.advance(GAP);
        canvas.ensure_space(12.0);
        let y = canvas.y - 9.0;
        canvas.text(MARGIN, y, Font::Regular, 8.0, MUTED, footer);
        canvas.advance(12.0);
    }
}

fn draw_header(canvas: &mut Canvas, title: &str, subtitle: &str) {
    let height = 56.0;
    let top = canvas.y;
    canvas.rect(MARGIN, top - height, CONTENT_WIDTH, height, HEADER_BG);
    canvas.text(MARGIN + PADDING, top - 26.0, Font::Bold, 18.0, INK, title);
    canvas.text(MARGIN + PADDING, top - 44.0, Font::Regular, 10.0, MUTED, subtitle);
    canvas.advance(height + PADDING);
}

fn draw_card(canvas: &mut Canvas, card: &ClientCard) {
    let mut height = 52.0;
    if card.detail.is_some() {
        height += 14.0;
    }
    if !card.summary.is_empty() {
        height += 46.0;
    }

    let top = canvas.y;
    let right = MARGIN + CONTENT_WIDTH - PADDING;
    let badge_width = text_width(&card.badge, Font::Bold, 10.0) + 16.0;
    let name_width = CONTENT_WIDTH - 2.0 * PADDING - badge_width - GAP;

    canvas.rect(MARGIN, top - height, CONTENT_WIDTH, height, CARD_BG);
    let name = truncate_to_width(&card.name, Font::Bold, 16.0, name_width);
    canvas.text(MARGIN + PADDING, top - 24.0, Font::Bold, 16.0, INK, &name);
    canvas.text(MARGIN + PADDING, top - 40.0, Font::Regular, 9.0, MUTED, &card.caption);

    canvas.rect(right - badge_width, top - 32.0, badge_width, 18.0, BADGE_BG);
    canvas.text(right - badge_width + 8.0, top - 26.5, Font::Bold, 10.0, WHITE, &card.badge);

    let mut cursor = top - 52.0;
    if let Some(detail) = &card.detail {
        canvas.text(MARGIN + PADDING, cursor + 2.0, Font::Regular, 9.0, MUTED, detail);
        cursor -= 14.0;
    }

    if !card.summary.is_empty() {
        let inner = CONTENT_WIDTH - 2.0 * PADDING;
        let n = card.summary.len() as f32;
        let box_width = (inner - GAP * (n - 1.0)) / n;
        for (i, metric) in card.summary.iter().enumerate() {
            let x = MARGIN + PADDING + i as f32 * (box_width + GAP);
            canvas.rect(x, cursor - 38.0, box_width, 38.0, SUMMARY_BG);
            canvas.text(x + 8.0, cursor - 14.0, Font::Regular, 8.0, MUTED, &metric.label.to_uppercase());
            canvas.text(x + 8.0, cursor - 30.0, Font::Bold, 11.0, INK, &value_with_unit(metric));
        }
    }

    canvas.advance(height + PADDING);
}

fn draw_section_title(canvas: &mut Canvas, title: &str) {
    canvas.ensure_space(44.0);
    let y = canvas.y - 14.0;
    canvas.text(MARGIN, y, Font::Bold, 12.0, INK, title);
    canvas.advance(22.0);
}

fn draw_metric_section(canvas: &mut Canvas, section: &MetricSection) {
    draw_section_title(canvas, &section.title);

    let columns = section.columns.max(1);
    let box_height = 54.0;
    let cols = columns as f32;
    let box_width = (CONTENT_WIDTH - GAP * (cols - 1.0)) / cols;

    for row in section.metrics.chunks(columns) {
        canvas.ensure_space(box_height + GAP);
        let top = canvas.y;
        for (i, metric) in row.iter().enumerate() {
            let x = MARGIN + i as f32 * (box_width + GAP);
            canvas.rect(x, top - box_height, box_width, box_height, METRIC_BG);
            let label = metric.label.to_uppercase();
            canvas.text_centered(x, box_width, top - 14.0, Font::Regular, 8.0, MUTED, &label);
            canvas.text_centered(x, box_width, top - 33.0, Font::Bold, 16.0, INK, &metric.value);
            if let Some(unit) = &metric.unit {
                canvas.text_centered(x, box_width, top - 47.0, Font::Regular, 8.0, MUTED, unit);
            }
        }
        canvas.advance(box_height + GAP);
    }
}

fn draw_history(canvas: &mut Canvas, table: &HistoryTable) {
    let columns = table.headers.len().max(1) as f32;
    let col_width = CONTENT_WIDTH / columns;
    let row_height = 18.0;
    let note_line = 12.0;

    draw_table_header(canvas, table, col_width, row_height);

    for (index, row) in table.rows.iter().enumerate() {
        let note_lines = row
            .notes
            .as_deref()
            .map(|n| wrap(&format!("Notas: {n}"), Font::Regular, 8.0, CONTENT_WIDTH - 12.0))
            .unwrap_or_default();
        let shaded = index % 2 == 0;

        // Keep the cells together with the first note line.
        let first_block = row_height + if note_lines.is_empty() { 0.0 } else { note_line };
        if canvas.ensure_space(first_block) {
            draw_table_header(canvas, table, col_width, row_height);
        }

        let top = canvas.y;
        if shaded {
            canvas.rect(MARGIN, top - row_height, CONTENT_WIDTH, row_height, METRIC_BG);
        }
        for (i, cell) in row.cells.iter().enumerate() {
            let x = MARGIN + 6.0 + i as f32 * col_width;
            canvas.text(x, top - 12.5, Font::Regular, 9.0, INK, cell);
        }
        canvas.advance(row_height);

        // Long notes continue on the next page line by line.
        for line in &note_lines {
            canvas.ensure_space(note_line);
            let top = canvas.y;
            if shaded {
                canvas.rect(MARGIN, top - note_line, CONTENT_WIDTH, note_line, METRIC_BG);
            }
            canvas.text(MARGIN + 6.0, top - 8.5, Font::Regular, 8.0, MUTED, line);
            canvas.advance(note_line);
        }
    }
}

fn draw_table_header(canvas: &mut Canvas, table: &HistoryTable, col_width: f32, height: f32) {
    canvas.ensure_space(height * 2.0);
    let top = canvas.y;
    for (i, header) in table.headers.iter().enumerate() {
        let x = MARGIN + 6.0 + i as f32 * col_width;
        canvas.text(x, top - 12.5, Font::Bold, 8.5, MUTED, header);
    }
    canvas.advance(height);
}

fn value_with_unit(metric: &Metric) -> String {
    match &metric.unit {
        Some(unit) => format!("{} {unit}", metric.value),
        None => metric.value.clone(),
    }
}

/// Greedy word wrap using the estimated glyph width.
fn wrap(text: &str, font: Font, size: f32, width: f32) -> Vec<String> {
    let max_chars = ((width / (size * font.em_ratio())).floor() as usize).max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: String = word.to_string();
            // Hard-split words that cannot fit on a line of their own.
            while word.chars().count() > max_chars {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let head: String = word.chars().take(max_chars).collect();
                word = word.chars().skip(max_chars).collect();
                lines.push(head);
            }
            let needed = if line.is_empty() {
                word.chars().count()
            } else {
                line.chars().count() + 1 + word.chars().count()
            };
            if needed > max_chars && !line.is_empty() {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.push_str(&word);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }
    lines
}

/// Cut `text` so it fits in `width`, marking the cut with `...`.
fn truncate_to_width(text: &str, font: Font, size: f32, width: f32) -> String {
    if text_width(text, font, size) <= width {
        return text.to_string();
    }
    let mut cut: String = text.chars().collect();
    while !cut.is_empty() && text_width(&format!("{cut}..."), font, size) > width {
        cut.pop();
    }
    format!("{}...", cut.trim_end())
}

/// Encode text for the WinAnsi-encoded standard fonts.
///
/// Latin-1 maps directly; a handful of common typographic characters use
/// their cp1252 slots; anything else becomes `?`.
fn win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            '\u{20}'..='\u{7e}' | '\u{a0}'..='\u{ff}' => c as u8,
            '€' => 0x80,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            _ => b'?',
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Canvas
// ---------------------------------------------------------------------------

/// Accumulates content-stream operations page by page.
struct Canvas {
    pages: Vec<Vec<Operation>>,
    ops: Vec<Operation>,
    y: f32,
}

impl Canvas {
    fn new() -> Self {
        Self {
            pages: Vec::new(),
            ops: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    /// Start a new page if `height` does not fit. Returns `true` on a break.
    fn ensure_space(&mut self, height: f32) -> bool {
        let at_top = self.y >= PAGE_HEIGHT - MARGIN;
        if self.y - height < MARGIN && !at_top {
            self.new_page();
            true
        } else {
            false
        }
    }

    fn new_page(&mut self) {
        let ops = std::mem::take(&mut self.ops);
        self.pages.push(ops);
        self.y = PAGE_HEIGHT - MARGIN;
    }

    fn advance(&mut self, dy: f32) {
        self.y -= dy;
    }

    fn finish(mut self) -> Vec<Vec<Operation>> {
        self.pages.push(self.ops);
        self.pages
    }

    fn rect(&mut self, x: f32, y: f32, w: f32, h: f32, color: Rgb) {
        self.ops.push(Operation::new("q", vec![]));
        self.ops.push(Operation::new(
            "rg",
            vec![num(color.0), num(color.1), num(color.2)],
        ));
        self.ops
            .push(Operation::new("re", vec![num(x), num(y), num(w), num(h)]));
        self.ops.push(Operation::new("f", vec![]));
        self.ops.push(Operation::new("Q", vec![]));
    }

    #[allow(clippy::too_many_arguments)]
    fn text(&mut self, x: f32, y: f32, font: Font, size: f32, color: Rgb, text: &str) {
        self.ops.push(Operation::new("BT", vec![]));
        self.ops.push(Operation::new(
            "Tf",
            vec![font.resource().into(), num(size)],
        ));
        self.ops.push(Operation::new(
            "rg",
            vec![num(color.0), num(color.1), num(color.2)],
        ));
        self.ops.push(Operation::new("Td", vec![num(x), num(y)]));
        self.ops.push(Operation::new(
            "Tj",
            vec![Object::string_literal(win_ansi(text))],
        ));
        self.ops.push(Operation::new("ET", vec![]));
    }

    #[allow(clippy::too_many_arguments)]
    fn text_centered(
        &mut self,
        x: f32,
        width: f32,
        y: f32,
        font: Font,
        size: f32,
        color: Rgb,
        text: &str,
    ) {
        let offset = ((width - text_width(text, font, size)) / 2.0).max(4.0);
        self.text(x + offset, y, font, size, color, text);
    }
}
