//! Generador del documento de modificación curricular.
//!
//! `render_program` produce una lista de dibujo independiente del backend
//! (páginas con textos, rectángulos y líneas en mm, origen arriba a la
//! izquierda). `pdf::write_pdf` la convierte a bytes PDF. Orden fijo de
//! secciones:
//! 1. metadatos + cuestionario (base o derivado) + proyección de matrícula
//! 2. diagrama general por grupos (página vertical dedicada)
//! 3. diagrama de la malla (página horizontal dedicada)
//! 4. resumen en texto del diagrama general
//! 5. resumen en texto de la malla

pub mod filename;
pub mod grid;
pub mod layout;
pub mod overview;
pub mod pdf;
pub mod sections;
pub mod text;

use serde::Serialize;

use crate::algorithm::group_curriculum;
use crate::error::{PlannerError, Result};
use crate::models::Program;

pub use filename::{export_filename, sanitize_program_name};
use layout::PageWriter;

pub const A4_SHORT_MM: f32 = 210.0;
pub const A4_LONG_MM: f32 = 297.0;
pub const MARGIN_MM: f32 = 14.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    pub fn width_mm(self) -> f32 {
        match self {
            Orientation::Portrait => A4_SHORT_MM,
            Orientation::Landscape => A4_LONG_MM,
        }
    }

    pub fn height_mm(self) -> f32 {
        match self {
            Orientation::Portrait => A4_LONG_MM,
            Orientation::Landscape => A4_SHORT_MM,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Rgb(pub u8, pub u8, pub u8);

impl From<(u8, u8, u8)> for Rgb {
    fn from(t: (u8, u8, u8)) -> Self {
        Rgb(t.0, t.1, t.2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FontWeight {
    Regular,
    Bold,
}

/// Operación de dibujo. `y` de un texto es la baseline.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum DrawOp {
    Text { x: f32, y: f32, size: f32, weight: FontWeight, color: Rgb, text: String },
    Rect { x: f32, y: f32, w: f32, h: f32, fill: Option<Rgb>, stroke: Option<Rgb> },
    Line { x1: f32, y1: f32, x2: f32, y2: f32, width: f32, color: Rgb },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page {
    pub orientation: Orientation,
    pub ops: Vec<DrawOp>,
}

impl Page {
    pub fn new(orientation: Orientation) -> Self {
        Page { orientation, ops: Vec::new() }
    }

    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn has_text(&self, needle: &str) -> bool {
        self.texts().any(|t| t.contains(needle))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub pages: Vec<Page>,
}

impl Document {
    pub fn has_text(&self, needle: &str) -> bool {
        self.pages.iter().any(|p| p.has_text(needle))
    }
}

/// Archivo listo para descargar.
#[derive(Debug, Clone)]
pub struct ExportedDocument {
    pub filename: String,
    pub bytes: Vec<u8>,
}

/// Índices de página donde empieza cada sección (útil para tests y logs).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SectionPages {
    pub overview_diagram: usize,
    pub grid_diagram: usize,
    pub overview_recap: usize,
    pub grid_recap: usize,
}

/// Construye el documento completo de un programa.
pub fn render_program(program: &Program) -> Document {
    render_program_with_sections(program).0
}

pub fn render_program_with_sections(program: &Program) -> (Document, SectionPages) {
    let groups = group_curriculum(program);
    let info = program.info_or_default();

    let mut writer = PageWriter::new(Orientation::Portrait);
    sections::write_metadata(&mut writer, program, &info);

    writer.dedicated_page(Orientation::Portrait);
    let overview_diagram = writer.page_count() - 1;
    overview::draw_overview_diagram(&mut writer, program, &groups);

    writer.dedicated_page(Orientation::Landscape);
    let grid_diagram = writer.page_count() - 1;
    grid::draw_grid_diagram(&mut writer, program);

    writer.new_page(Orientation::Portrait);
    let overview_recap = writer.page_count() - 1;
    overview::write_overview_recap(&mut writer, &groups);

    writer.new_page(Orientation::Portrait);
    let grid_recap = writer.page_count() - 1;
    grid::write_grid_recap(&mut writer, program);

    let doc = Document { title: program.name.clone(), pages: writer.finish() };
    log::debug!("documento '{}': {} páginas", doc.title, doc.pages.len());
    (doc, SectionPages { overview_diagram, grid_diagram, overview_recap, grid_recap })
}

/// Exporta el programa seleccionado. Sin programa no hay documento: el
/// llamador debe validar la selección antes.
pub fn export_program_pdf(program: Option<&Program>) -> Result<ExportedDocument> {
    let program = program.ok_or(PlannerError::MissingProgram)?;
    let document = render_program(program);
    let bytes = pdf::write_pdf(&document)?;
    let filename = export_filename(program);
    log::info!("exportado '{}' ({} bytes, {} páginas)", filename, bytes.len(), document.pages.len());
    Ok(ExportedDocument { filename, bytes })
}
