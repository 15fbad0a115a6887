//! Cursor de página: escribe bloques de arriba hacia abajo y abre una página
//! nueva cuando el bloque siguiente no cabe en el espacio restante.

use super::text::{ascent_mm, line_height_mm, text_width_mm, wrap_text};
use super::{DrawOp, FontWeight, Orientation, Page, Rgb, MARGIN_MM};

pub const BODY_PT: f32 = 9.5;
pub const HEADING_PT: f32 = 13.0;
pub const SUBHEADING_PT: f32 = 10.5;
pub const TITLE_PT: f32 = 18.0;
/// Columna de etiquetas en los bloques clave-valor
pub const LABEL_COL_MM: f32 = 48.0;

pub const TEXT_COLOR: Rgb = Rgb(17, 24, 39);
pub const MUTED_COLOR: Rgb = Rgb(107, 114, 128);
pub const RULE_COLOR: Rgb = Rgb(209, 213, 219);

pub struct PageWriter {
    pages: Vec<Page>,
    y: f32,
    /// Orientación de las páginas de texto (los diagramas fuerzan la suya)
    flow: Orientation,
}

impl PageWriter {
    pub fn new(flow: Orientation) -> Self {
        PageWriter { pages: vec![Page::new(flow)], y: MARGIN_MM, flow }
    }

    fn page(&mut self) -> &mut Page {
        // siempre hay al menos una página
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    pub fn orientation(&self) -> Orientation {
        self.pages.last().map(|p| p.orientation).unwrap_or(self.flow)
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn cursor(&self) -> f32 {
        self.y
    }

    pub fn set_cursor(&mut self, y: f32) {
        self.y = y;
    }

    pub fn left(&self) -> f32 {
        MARGIN_MM
    }

    pub fn content_width(&self) -> f32 {
        self.orientation().width_mm() - 2.0 * MARGIN_MM
    }

    pub fn bottom(&self) -> f32 {
        self.orientation().height_mm() - MARGIN_MM
    }

    pub fn remaining(&self) -> f32 {
        (self.bottom() - self.y).max(0.0)
    }

    /// Página nueva con la orientación dada; el cursor vuelve al margen.
    pub fn new_page(&mut self, orientation: Orientation) {
        self.pages.push(Page::new(orientation));
        self.y = MARGIN_MM;
    }

    /// Página dedicada: siempre nueva, sin importar dónde quedó el cursor.
    pub fn dedicated_page(&mut self, orientation: Orientation) {
        self.new_page(orientation);
    }

    /// Si `height` no cabe, salta a una página de texto nueva. Devuelve true
    /// cuando hubo salto. Un bloque más alto que una página completa se
    /// escribe igual desde el tope.
    pub fn ensure_space(&mut self, height: f32) -> bool {
        if self.y + height > self.bottom() && self.y > MARGIN_MM {
            let flow = self.flow;
            self.new_page(flow);
            return true;
        }
        false
    }

    pub fn push(&mut self, op: DrawOp) {
        self.page().ops.push(op);
    }

    pub fn spacer(&mut self, h: f32) {
        self.y += h;
    }

    /// Escribe una línea en la posición actual y avanza el cursor.
    pub fn line(&mut self, x: f32, size: f32, weight: FontWeight, color: Rgb, text: &str) {
        let lh = line_height_mm(size);
        self.ensure_space(lh);
        let baseline = self.y + ascent_mm(size);
        self.push(DrawOp::Text { x, y: baseline, size, weight, color, text: text.to_string() });
        self.y += lh;
    }

    pub fn title(&mut self, text: &str, subtitle: Option<&str>) {
        let x = self.left();
        self.line(x, TITLE_PT, FontWeight::Bold, TEXT_COLOR, text);
        if let Some(sub) = subtitle {
            self.line(x, SUBHEADING_PT, FontWeight::Regular, MUTED_COLOR, sub);
        }
        self.spacer(3.0);
    }

    /// Encabezado de sección: reserva alto para el encabezado y al menos una
    /// línea de cuerpo antes de escribir.
    pub fn heading(&mut self, text: &str) {
        let reserve = 3.0 + line_height_mm(HEADING_PT) + 2.0 + line_height_mm(BODY_PT);
        self.ensure_space(reserve);
        self.spacer(3.0);
        let x = self.left();
        self.line(x, HEADING_PT, FontWeight::Bold, TEXT_COLOR, text);
        let y = self.y + 0.5;
        let x2 = x + self.content_width();
        self.push(DrawOp::Line { x1: x, y1: y, x2, y2: y, width: 0.3, color: RULE_COLOR });
        self.spacer(1.5);
    }

    pub fn subheading(&mut self, text: &str) {
        let reserve = 1.5 + line_height_mm(SUBHEADING_PT) + line_height_mm(BODY_PT);
        self.ensure_space(reserve);
        self.spacer(1.5);
        let x = self.left();
        self.line(x, SUBHEADING_PT, FontWeight::Bold, TEXT_COLOR, text);
    }

    pub fn paragraph(&mut self, text: &str) {
        let x = self.left();
        let width = self.content_width();
        for l in wrap_text(text, width, BODY_PT, FontWeight::Regular) {
            self.line(x, BODY_PT, FontWeight::Regular, TEXT_COLOR, &l);
        }
    }

    pub fn bullet(&mut self, text: &str) {
        let x = self.left() + 3.0;
        let width = self.content_width() - 3.0;
        let lines = wrap_text(&format!("- {}", text), width, BODY_PT, FontWeight::Regular);
        for (i, l) in lines.iter().enumerate() {
            let indent = if i == 0 { 0.0 } else { 2.5 };
            self.line(x + indent, BODY_PT, FontWeight::Regular, TEXT_COLOR, l);
        }
    }

    /// Etiqueta en negrita a la izquierda, valor con word-wrap a la derecha.
    /// Si el bloque completo cabe en una página se mantiene junto.
    pub fn key_value(&mut self, label: &str, value: &str) {
        let value = if value.trim().is_empty() { "-" } else { value };
        let value_x = self.left() + LABEL_COL_MM;
        let value_w = self.content_width() - LABEL_COL_MM;
        let lines = wrap_text(value, value_w, BODY_PT, FontWeight::Regular);
        let lh = line_height_mm(BODY_PT);
        let block_h = lh * lines.len() as f32;
        if block_h <= self.bottom() - MARGIN_MM {
            self.ensure_space(block_h);
        }

        let label_x = self.left();
        let label_w = LABEL_COL_MM - 2.0;
        let label_text = super::text::truncate_to_width(label, label_w, BODY_PT, FontWeight::Bold);
        let baseline = self.y + ascent_mm(BODY_PT);
        self.push(DrawOp::Text {
            x: label_x,
            y: baseline,
            size: BODY_PT,
            weight: FontWeight::Bold,
            color: TEXT_COLOR,
            text: label_text,
        });
        for l in lines {
            self.line(value_x, BODY_PT, FontWeight::Regular, TEXT_COLOR, &l);
        }
    }

    /// Tabla simple de celdas de texto. La primera fila es el encabezado.
    pub fn table(&mut self, rows: &[Vec<String>], col_widths: &[f32]) {
        let row_h = line_height_mm(BODY_PT) + 1.6;
        let total_w: f32 = col_widths.iter().sum();
        let total_h = row_h * rows.len() as f32;
        if total_h <= self.bottom() - MARGIN_MM {
            self.ensure_space(total_h);
        }
        for (ri, row) in rows.iter().enumerate() {
            self.ensure_space(row_h);
            let top = self.y;
            let header = ri == 0;
            if header {
                self.push(DrawOp::Rect {
                    x: self.left(),
                    y: top,
                    w: total_w,
                    h: row_h,
                    fill: Some(Rgb(243, 244, 246)),
                    stroke: None,
                });
            }
            let mut x = self.left();
            for (ci, w) in col_widths.iter().enumerate() {
                let cell = row.get(ci).map(String::as_str).unwrap_or("");
                let weight = if header || ci == 0 { FontWeight::Bold } else { FontWeight::Regular };
                let text = super::text::truncate_to_width(cell, w - 2.0, BODY_PT, weight);
                // columnas numéricas alineadas a la derecha
                let tx = if ci == 0 { x + 1.0 } else { x + w - 1.0 - text_width_mm(&text, BODY_PT, weight) };
                self.push(DrawOp::Text { x: tx, y: top + 0.8 + ascent_mm(BODY_PT), size: BODY_PT, weight, color: TEXT_COLOR, text });
                x += w;
            }
            let y = top + row_h;
            let x1 = self.left();
            self.push(DrawOp::Line { x1, y1: y, x2: x1 + total_w, y2: y, width: 0.2, color: RULE_COLOR });
            self.y = y;
        }
        self.spacer(2.0);
    }

    pub fn finish(self) -> Vec<Page> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_space_salta_pagina() {
        let mut w = PageWriter::new(Orientation::Portrait);
        assert!(!w.ensure_space(50.0));
        w.set_cursor(w.bottom() - 5.0);
        assert!(w.ensure_space(10.0));
        assert_eq!(w.page_count(), 2);
        assert_eq!(w.cursor(), MARGIN_MM);
    }

    #[test]
    fn test_bloque_mas_alto_que_pagina_no_cicla() {
        let mut w = PageWriter::new(Orientation::Portrait);
        assert!(!w.ensure_space(1000.0));
        assert_eq!(w.page_count(), 1);
    }

    #[test]
    fn test_heading_reserva_espacio() {
        let mut w = PageWriter::new(Orientation::Portrait);
        w.set_cursor(w.bottom() - 6.0);
        w.heading("Approval Milestones");
        assert_eq!(w.page_count(), 2);
    }

    #[test]
    fn test_paginas_de_texto_vuelven_a_vertical() {
        let mut w = PageWriter::new(Orientation::Portrait);
        w.dedicated_page(Orientation::Landscape);
        w.new_page(Orientation::Portrait);
        for i in 0..200 {
            w.paragraph(&format!("line {}", i));
        }
        let pages = w.finish();
        assert_eq!(pages[1].orientation, Orientation::Landscape);
        assert!(pages[2..].iter().all(|p| p.orientation == Orientation::Portrait));
    }
}
