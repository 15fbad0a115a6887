//! Diagrama general: un bloque con etiqueta por grupo (CORE, cada
//! categoría de electivo, SPEC Electives), apilados y con alto proporcional
//! a su contenido, escalados al espacio restante de la página.

use crate::algorithm::grouping::{credit_sum, CurriculumGroups, CORE_LABEL, SPEC_LABEL};
use crate::models::{ColorTag, Course, Program};

use super::layout::{PageWriter, BODY_PT, MUTED_COLOR, TEXT_COLOR};
use super::text::{format_credits, line_height_mm, text_width_mm, truncate_to_width, ascent_mm};
use super::{DrawOp, FontWeight, Rgb};

const ENTRY_PT: f32 = 7.5;
const LABEL_PT: f32 = 10.0;
const BLOCK_GAP_MM: f32 = 3.0;
const BLOCK_PAD_MM: f32 = 2.5;
const ENTRY_COLUMNS: usize = 2;
/// Tope de mm por unidad de peso, para que pocos bloques no se estiren
const MAX_UNIT_MM: f32 = 9.0;

/// Bloque del diagrama ya preparado para dibujar o resumir.
#[derive(Debug, Clone, PartialEq)]
pub struct OverviewBlock {
    pub label: String,
    pub color: ColorTag,
    pub summary: String,
    pub entries: Vec<String>,
}

impl OverviewBlock {
    /// Peso relativo: cabecera + filas de entradas (mínimo una).
    pub fn weight(&self) -> usize {
        1 + self.entries.len().div_ceil(ENTRY_COLUMNS).max(1)
    }
}

/// Color del bloque según palabras clave de la etiqueta.
pub fn block_color(label: &str) -> ColorTag {
    let l = label.to_lowercase();
    if l == "core" {
        ColorTag::Blue
    } else if l.contains("spec") {
        ColorTag::Purple
    } else if l.contains("open") {
        ColorTag::Green
    } else if l.contains("busi") {
        ColorTag::Orange
    } else if l.contains("game") {
        ColorTag::Red
    } else if l.contains("general") {
        ColorTag::Teal
    } else {
        ColorTag::Gray
    }
}

fn course_entry(c: &Course) -> String {
    format!("{} - {} ({} cr)", c.code(), c.title(), format_credits(c.credits()))
}

fn summary(count: usize, credits: f64) -> String {
    format!("{} courses | {} cr", count, format_credits(credits))
}

pub fn overview_blocks(groups: &CurriculumGroups) -> Vec<OverviewBlock> {
    let mut blocks = Vec::new();

    blocks.push(OverviewBlock {
        label: CORE_LABEL.to_string(),
        color: block_color(CORE_LABEL),
        summary: summary(groups.core.len(), credit_sum(&groups.core)),
        entries: groups.core.iter().map(course_entry).collect(),
    });

    for g in &groups.electives {
        let mut entries: Vec<String> = g.courses.iter().map(course_entry).collect();
        for row in &g.suggestions {
            let codes: Vec<&str> = row.filled().map(Course::code).collect();
            entries.push(format!("Suggested {} [{}]: {}", row.label, row.rule.describe(), codes.join(", ")));
        }
        blocks.push(OverviewBlock {
            label: g.label.clone(),
            color: block_color(&g.label),
            summary: summary(g.courses.len(), g.credits()),
            entries,
        });
    }

    if let Some(spec) = &groups.spec {
        let mut entries = Vec::new();
        if !spec.placeholders.is_empty() {
            entries.push(format!(
                "{} specialization slot(s) in the map ({} cr)",
                spec.placeholders.len(),
                format_credits(spec.credits())
            ));
        }
        for row in &spec.rows {
            let codes: Vec<&str> = row.courses.iter().map(Course::code).collect();
            let listed = if codes.is_empty() { "-".to_string() } else { codes.join(", ") };
            entries.push(format!("{} [{}]: {}", row.label, row.rule, listed));
        }
        blocks.push(OverviewBlock {
            label: SPEC_LABEL.to_string(),
            color: block_color(SPEC_LABEL),
            summary: summary(spec.course_count(), spec.credits()),
            entries,
        });
    }

    blocks
}

pub fn draw_overview_diagram(w: &mut PageWriter, program: &Program, groups: &CurriculumGroups) {
    w.title("Curriculum Overview", Some(&program.name));

    let blocks = overview_blocks(groups);
    let total_weight: usize = blocks.iter().map(OverviewBlock::weight).sum();
    let gaps = BLOCK_GAP_MM * blocks.len().saturating_sub(1) as f32;
    let available = (w.remaining() - gaps).max(0.0);
    let unit = if total_weight == 0 { 0.0 } else { (available / total_weight as f32).min(MAX_UNIT_MM) };

    let x = w.left();
    let width = w.content_width();
    let entry_lh = line_height_mm(ENTRY_PT);
    let col_w = (width - 2.0 * BLOCK_PAD_MM) / ENTRY_COLUMNS as f32;

    for block in &blocks {
        let top = w.cursor();
        let h = unit * block.weight() as f32;
        let fill: Rgb = block.color.rgb().into();
        w.push(DrawOp::Rect { x, y: top, w: width, h, fill: Some(fill), stroke: Some(Rgb(156, 163, 175)) });

        let label_base = top + BLOCK_PAD_MM + ascent_mm(LABEL_PT);
        w.push(DrawOp::Text {
            x: x + BLOCK_PAD_MM,
            y: label_base,
            size: LABEL_PT,
            weight: FontWeight::Bold,
            color: TEXT_COLOR,
            text: block.label.clone(),
        });
        let sw = text_width_mm(&block.summary, BODY_PT, FontWeight::Regular);
        w.push(DrawOp::Text {
            x: x + width - BLOCK_PAD_MM - sw,
            y: label_base,
            size: BODY_PT,
            weight: FontWeight::Regular,
            color: MUTED_COLOR,
            text: block.summary.clone(),
        });

        // entradas en columnas, tantas filas como quepan
        let entries_top = top + BLOCK_PAD_MM + line_height_mm(LABEL_PT) + 0.5;
        let room = (top + h - BLOCK_PAD_MM - entries_top).max(0.0);
        let visible_rows = (room / entry_lh).floor() as usize;
        let capacity = visible_rows * ENTRY_COLUMNS;
        let overflow = block.entries.len() > capacity;
        let shown = if overflow { capacity.saturating_sub(1) } else { block.entries.len() };

        let mut texts: Vec<String> = block.entries.iter().take(shown).cloned().collect();
        if overflow && capacity > 0 {
            texts.push(format!("+{} more", block.entries.len() - shown));
        }
        if block.entries.is_empty() && visible_rows > 0 {
            texts.push("No courses".to_string());
        }

        for (i, t) in texts.iter().enumerate() {
            let row = i / ENTRY_COLUMNS;
            let col = i % ENTRY_COLUMNS;
            let tx = x + BLOCK_PAD_MM + col as f32 * col_w;
            let ty = entries_top + row as f32 * entry_lh + ascent_mm(ENTRY_PT);
            w.push(DrawOp::Text {
                x: tx,
                y: ty,
                size: ENTRY_PT,
                weight: FontWeight::Regular,
                color: TEXT_COLOR,
                text: truncate_to_width(t, col_w - 2.0, ENTRY_PT, FontWeight::Regular),
            });
        }

        w.set_cursor(top + h + BLOCK_GAP_MM);
    }
}

/// Sección 4: el mismo contenido del diagrama, en texto corrido.
pub fn write_overview_recap(w: &mut PageWriter, groups: &CurriculumGroups) {
    w.title("Curriculum Overview - Summary", None);
    for block in overview_blocks(groups) {
        w.subheading(&format!("{} ({})", block.label, block.summary));
        if block.entries.is_empty() {
            w.bullet("No courses");
        }
        for e in &block.entries {
            w.bullet(e);
        }
    }
}
