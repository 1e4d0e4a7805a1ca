//! PDF layout on A4 pages with the built-in Helvetica faces.
//!
//! Layout is top-down: a cursor tracks the baseline of the next line and a
//! new page starts whenever the next block would cross the bottom margin.
//! Text widths are estimated from an average glyph width, which is accurate
//! enough for wrapping with the built-in fonts.

use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfDocumentReference,
    PdfLayerReference, Point, Rgb,
};

use crate::error::{ConversionError, ConversionResult};
use crate::models::Table;

const FORMAT: &str = "PDF";

const PAGE_WIDTH: f32 = 210.0;
const PAGE_HEIGHT: f32 = 297.0;
const MARGIN: f32 = 20.0;

/// Body text size in points.
pub const BODY_SIZE: f32 = 11.0;
/// Title size in points.
pub const TITLE_SIZE: f32 = 18.0;
const TABLE_SIZE: f32 = 9.0;

const PT_TO_MM: f32 = 25.4 / 72.0;
const LINE_SPACING: f32 = 1.35;
const AVG_GLYPH_EM: f32 = 0.55;
const CELL_PADDING: f32 = 1.5;

fn render_err(e: impl ToString) -> ConversionError {
    ConversionError::render(FORMAT, e)
}

/// Sequential page composer.
pub struct PdfComposer {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    regular: IndirectFontRef,
    bold: IndirectFontRef,
    /// Distance of the next line's top from the page bottom, in mm.
    cursor: f32,
    pages: usize,
}

impl PdfComposer {
    /// Start a document with one empty page.
    pub fn new(title: &str) -> ConversionResult<Self> {
        let (doc, page, layer) =
            PdfDocument::new(title, Mm(PAGE_WIDTH), Mm(PAGE_HEIGHT), "Page 1");
        let regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(render_err)?;
        let bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(render_err)?;
        let layer = doc.get_page(page).get_layer(layer);

        Ok(Self {
            doc,
            layer,
            regular,
            bold,
            cursor: PAGE_HEIGHT - MARGIN,
            pages: 1,
        })
    }

    /// Number of pages so far.
    pub fn page_count(&self) -> usize {
        self.pages
    }

    fn new_page(&mut self) {
        self.pages += 1;
        let (page, layer) = self.doc.add_page(
            Mm(PAGE_WIDTH),
            Mm(PAGE_HEIGHT),
            format!("Page {}", self.pages),
        );
        self.layer = self.doc.get_page(page).get_layer(layer);
        self.cursor = PAGE_HEIGHT - MARGIN;
    }

    fn ensure_space(&mut self, height: f32) {
        if self.cursor - height < MARGIN {
            self.new_page();
        }
    }

    fn font(&self, bold: bool) -> &IndirectFontRef {
        if bold { &self.bold } else { &self.regular }
    }

    /// Write a wrapped paragraph across the content width. An empty
    /// paragraph still takes one line.
    pub fn paragraph(&mut self, text: &str, size: f32, bold: bool) {
        let line_height = line_height(size);
        for line in wrap(text, PAGE_WIDTH - 2.0 * MARGIN, size) {
            self.ensure_space(line_height);
            self.cursor -= line_height;
            let baseline = self.cursor + line_height * 0.25;
            self.layer
                .use_text(line, size, Mm(MARGIN), Mm(baseline), self.font(bold));
        }
    }

    /// Vertical gap.
    pub fn space(&mut self, height: f32) {
        self.ensure_space(height);
        self.cursor -= height;
    }

    /// Write a table spanning the content width with equal column widths.
    /// The header row is bold on a grey band and repeats on every page the
    /// table continues onto.
    pub fn table(&mut self, table: &Table) {
        let columns = table.columns().len().max(1);
        let col_width = (PAGE_WIDTH - 2.0 * MARGIN) / columns as f32;

        let header: Vec<Vec<String>> = table
            .columns()
            .iter()
            .map(|c| wrap(c, col_width - 2.0 * CELL_PADDING, TABLE_SIZE))
            .collect();
        self.table_row(&header, col_width, true);

        for record in table.records() {
            let cells: Vec<Vec<String>> = record
                .values()
                .iter()
                .map(|v| wrap(v, col_width - 2.0 * CELL_PADDING, TABLE_SIZE))
                .collect();
            let height = row_height(&cells);
            if self.cursor - height < MARGIN {
                self.new_page();
                self.table_row(&header, col_width, true);
            }
            self.table_row(&cells, col_width, false);
        }
    }

    fn table_row(&mut self, cells: &[Vec<String>], col_width: f32, header: bool) {
        let height = row_height(cells);
        self.ensure_space(height);
        let top = self.cursor;
        let bottom = top - height;
        let right = MARGIN + col_width * cells.len().max(1) as f32;

        if header {
            // A stroke as thick as the row paints the band.
            let grey = Color::Rgb(Rgb::new(0.83, 0.83, 0.83, None));
            self.layer.set_outline_color(grey);
            self.layer.set_outline_thickness(height / PT_TO_MM);
            let mid = bottom + height / 2.0;
            self.layer.add_line(horizontal(MARGIN, right, mid));
        }

        self.layer
            .set_outline_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        self.layer.set_outline_thickness(0.5);
        self.layer.add_line(horizontal(MARGIN, right, top));
        self.layer.add_line(horizontal(MARGIN, right, bottom));
        for idx in 0..=cells.len() {
            let x = MARGIN + col_width * idx as f32;
            self.layer.add_line(Line {
                points: vec![
                    (Point::new(Mm(x), Mm(top)), false),
                    (Point::new(Mm(x), Mm(bottom)), false),
                ],
                is_closed: false,
            });
        }

        let line_height = line_height(TABLE_SIZE);
        for (idx, lines) in cells.iter().enumerate() {
            let x = MARGIN + col_width * idx as f32 + CELL_PADDING;
            let mut y = top - CELL_PADDING;
            for line in lines {
                y -= line_height;
                self.layer.use_text(
                    line.as_str(),
                    TABLE_SIZE,
                    Mm(x),
                    Mm(y + line_height * 0.25),
                    self.font(header),
                );
            }
        }

        self.cursor = bottom;
    }

    /// Serialize the document.
    pub fn finish(self) -> ConversionResult<Vec<u8>> {
        self.doc.save_to_bytes().map_err(render_err)
    }
}

fn horizontal(from: f32, to: f32, y: f32) -> Line {
    Line {
        points: vec![
            (Point::new(Mm(from), Mm(y)), false),
            (Point::new(Mm(to), Mm(y)), false),
        ],
        is_closed: false,
    }
}

fn line_height(size: f32) -> f32 {
    size * PT_TO_MM * LINE_SPACING
}

fn row_height(cells: &[Vec<String>]) -> f32 {
    let lines = cells.iter().map(Vec::len).max().unwrap_or(1).max(1);
    lines as f32 * line_height(TABLE_SIZE) + 2.0 * CELL_PADDING
}

/// Greedy word wrap to `width` mm at `size` pt. Words longer than a line are
/// split. Always yields at least one (possibly empty) line.
pub fn wrap(text: &str, width: f32, size: f32) -> Vec<String> {
    let glyph = size * PT_TO_MM * AVG_GLYPH_EM;
    let limit = ((width / glyph).floor() as usize).max(1);

    let mut lines = Vec::new();
    for segment in text.split('\n') {
        let mut current = String::new();
        let mut current_len = 0;
        for word in segment.split_whitespace() {
            let mut chars: Vec<char> = word.chars().collect();
            while chars.len() > limit {
                if current_len > 0 {
                    lines.push(std::mem::take(&mut current));
                    current_len = 0;
                }
                let rest = chars.split_off(limit);
                lines.push(chars.into_iter().collect());
                chars = rest;
            }

            let needed = if current_len == 0 {
                chars.len()
            } else {
                current_len + 1 + chars.len()
            };
            if needed > limit {
                lines.push(std::mem::take(&mut current));
                current_len = 0;
            }
            if current_len > 0 {
                current.push(' ');
                current_len += 1;
            }
            current_len += chars.len();
            current.extend(chars);
        }
        lines.push(current);
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrap_short_text() {
        assert_eq!(wrap("hello world", 100.0, BODY_SIZE), vec!["hello world"]);
        assert_eq!(wrap("", 100.0, BODY_SIZE), vec![""]);
    }

    #[test]
    fn test_wrap_breaks_long_lines() {
        let text = "word ".repeat(200);
        let lines = wrap(&text, 50.0, BODY_SIZE);
        assert!(lines.len() > 1);
        let limit = lines.iter().map(|l| l.chars().count()).max().unwrap();
        assert!(lines.iter().all(|l| l.chars().count() <= limit));
        assert_eq!(lines.join(" ").split_whitespace().count(), 200);
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let word = "x".repeat(500);
        let lines = wrap(&word, 20.0, BODY_SIZE);
        assert!(lines.len() > 1);
        assert_eq!(lines.concat().len(), 500);
    }

    #[test]
    fn test_document_bytes() {
        let mut pdf = PdfComposer::new("Test").unwrap();
        pdf.paragraph("Hello", BODY_SIZE, false);
        let bytes = pdf.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF"));
    }

    #[test]
    fn test_paginates() {
        let mut pdf = PdfComposer::new("Long").unwrap();
        for i in 0..200 {
            pdf.paragraph(&format!("line {i}"), BODY_SIZE, false);
        }
        assert!(pdf.page_count() > 1);
    }

    #[test]
    fn test_table_paginates_with_header() {
        let mut table = Table::new(vec!["a".into(), "b".into()]);
        for i in 0..150 {
            table.push_row(vec![i.to_string(), "value".into()]);
        }
        let mut pdf = PdfComposer::new("Table").unwrap();
        pdf.table(&table);
        assert!(pdf.page_count() > 1);
        assert!(pdf.finish().unwrap().starts_with(b"%PDF"));
    }
}
