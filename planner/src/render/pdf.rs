// Backend PDF (printpdf). El display list usa origen arriba a la izquierda;
// PDF usa origen abajo a la izquierda, así que se invierte `y` por página.

use printpdf::path::PaintMode;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Line, Mm, PdfDocument, PdfLayerReference, Point, Rect,
    Rgb as PdfRgb,
};

use crate::error::{PlannerError, Result};

use super::{Document, DrawOp, FontWeight, Orientation, Page, Rgb};

fn color(c: Rgb) -> Color {
    Color::Rgb(PdfRgb::new(c.0 as f32 / 255.0, c.1 as f32 / 255.0, c.2 as f32 / 255.0, None))
}

/// Las fuentes base de PDF sólo cubren Latin-1; el resto se reemplaza.
fn pdf_safe(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\u{2013}' | '\u{2014}' => '-',
            '\u{2018}' | '\u{2019}' => '\'',
            '\u{201C}' | '\u{201D}' => '"',
            c if (c as u32) < 0x100 => c,
            _ => '?',
        })
        .collect()
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

fn draw_page(layer: &PdfLayerReference, page: &Page, fonts: &Fonts) {
    let height = page.orientation.height_mm();
    let flip = |y: f32| height - y;

    for op in &page.ops {
        match op {
            DrawOp::Text { x, y, size, weight, color: c, text } => {
                let font = match weight {
                    FontWeight::Regular => &fonts.regular,
                    FontWeight::Bold => &fonts.bold,
                };
                layer.set_fill_color(color(*c));
                layer.use_text(pdf_safe(text), *size, Mm(*x), Mm(flip(*y)), font);
            }
            DrawOp::Rect { x, y, w, h, fill, stroke } => {
                let mode = match (fill, stroke) {
                    (Some(_), Some(_)) => PaintMode::FillStroke,
                    (Some(_), None) => PaintMode::Fill,
                    (None, Some(_)) => PaintMode::Stroke,
                    (None, None) => continue,
                };
                if let Some(f) = fill {
                    layer.set_fill_color(color(*f));
                }
                if let Some(s) = stroke {
                    layer.set_outline_color(color(*s));
                    layer.set_outline_thickness(0.4);
                }
                let rect = Rect::new(Mm(*x), Mm(flip(*y + *h)), Mm(*x + *w), Mm(flip(*y))).with_mode(mode);
                layer.add_rect(rect);
            }
            DrawOp::Line { x1, y1, x2, y2, width, color: c } => {
                layer.set_outline_color(color(*c));
                layer.set_outline_thickness(*width / 0.352_778);
                let line = Line {
                    points: vec![
                        (Point::new(Mm(*x1), Mm(flip(*y1))), false),
                        (Point::new(Mm(*x2), Mm(flip(*y2))), false),
                    ],
                    is_closed: false,
                };
                layer.add_line(line);
            }
        }
    }
}

/// Serializa el documento a bytes PDF.
pub fn write_pdf(doc: &Document) -> Result<Vec<u8>> {
    let first_orientation = doc.pages.first().map(|p| p.orientation).unwrap_or(Orientation::Portrait);
    let (pdf, page1, layer1) = PdfDocument::new(
        pdf_safe(&doc.title),
        Mm(first_orientation.width_mm()),
        Mm(first_orientation.height_mm()),
        "Layer 1",
    );

    let fonts = Fonts {
        regular: pdf
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| PlannerError::Pdf(format!("{:?}", e)))?,
        bold: pdf
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| PlannerError::Pdf(format!("{:?}", e)))?,
    };

    for (i, page) in doc.pages.iter().enumerate() {
        let layer = if i == 0 {
            pdf.get_page(page1).get_layer(layer1)
        } else {
            let o = page.orientation;
            let (p, l) = pdf.add_page(Mm(o.width_mm()), Mm(o.height_mm()), "Layer 1");
            pdf.get_page(p).get_layer(l)
        };
        draw_page(&layer, page, &fonts);
    }

    pdf.save_to_bytes().map_err(|e| PlannerError::Pdf(format!("{:?}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pdf_safe() {
        assert_eq!(pdf_safe("Año – ok"), "Año - ok");
        assert_eq!(pdf_safe("日本"), "??");
    }
}
