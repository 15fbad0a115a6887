//! Diagrama de la malla: una fila por semestre, 6 tiles por fila, en página
//! horizontal. Entre un semestre de invierno y uno de otoño (cambio de año)
//! se dibuja una línea separadora.

use crate::models::{Course, Program, Semester, SLOTS_PER_ROW};

use super::layout::{PageWriter, MUTED_COLOR, TEXT_COLOR};
use super::text::{ascent_mm, format_credits, line_height_mm, text_width_mm, truncate_to_width, wrap_capped};
use super::{DrawOp, FontWeight, Rgb};

/// Bajo este alto el tile se dibuja en una sola línea "CODE - Title"
pub const COMPACT_TILE_MM: f32 = 14.0;
const MAX_ROW_MM: f32 = 30.0;
const LABEL_COL_MM: f32 = 38.0;
const TILE_GAP_MM: f32 = 1.2;
const TILE_PAD_MM: f32 = 1.4;
const CODE_PT: f32 = 8.0;
const TITLE_PT: f32 = 6.5;
const CREDITS_PT: f32 = 6.5;
const BADGE_PT: f32 = 5.0;
const SEPARATOR_COLOR: Rgb = Rgb(55, 65, 81);
const EMPTY_TILE_STROKE: Rgb = Rgb(209, 213, 219);
const TILE_STROKE: Rgb = Rgb(156, 163, 175);

/// Índices `i` tales que entre el semestre `i` y el `i + 1` hay cambio de
/// año académico (Winter seguido de Fall).
pub fn year_boundaries(semesters: &[Semester]) -> Vec<usize> {
    semesters
        .windows(2)
        .enumerate()
        .filter(|(_, pair)| pair[0].is_winter() && pair[1].is_fall())
        .map(|(i, _)| i)
        .collect()
}

/// Geometría de un tile.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

fn badge_column_width() -> f32 {
    text_width_mm("SPEC", BADGE_PT, FontWeight::Bold) + 2.0
}

/// Dibuja los badges alineados a la derecha, uno debajo de otro, tantos
/// como quepan en el alto del tile.
fn draw_badges(w: &mut PageWriter, course: &Course, r: TileRect) -> f32 {
    let badges = course.badges();
    if badges.is_empty() {
        return 0.0;
    }
    let bh = line_height_mm(BADGE_PT) + 0.4;
    let fits = (((r.h - 2.0 * TILE_PAD_MM) / bh).floor() as usize).max(1);
    let col_w = badge_column_width();
    for (i, b) in badges.iter().take(fits).enumerate() {
        let top = r.y + TILE_PAD_MM + i as f32 * bh;
        let tw = text_width_mm(b, BADGE_PT, FontWeight::Bold);
        let right = r.x + r.w - TILE_PAD_MM;
        w.push(DrawOp::Rect { x: right - tw - 1.0, y: top, w: tw + 1.0, h: bh - 0.3, fill: Some(Rgb(255, 255, 255)), stroke: None });
        w.push(DrawOp::Text {
            x: right - tw - 0.5,
            y: top + ascent_mm(BADGE_PT) + 0.1,
            size: BADGE_PT,
            weight: FontWeight::Bold,
            color: TEXT_COLOR,
            text: b.to_string(),
        });
    }
    col_w
}

/// Contenido de un tile con curso. Devuelve los textos dibujados (para tests).
pub fn draw_course_tile(w: &mut PageWriter, course: &Course, r: TileRect) -> Vec<String> {
    let fill: Rgb = course.color().rgb().into();
    w.push(DrawOp::Rect { x: r.x, y: r.y, w: r.w, h: r.h, fill: Some(fill), stroke: Some(TILE_STROKE) });

    let badge_w = draw_badges(w, course, r);
    let text_x = r.x + TILE_PAD_MM;
    let text_w = (r.w - 2.0 * TILE_PAD_MM - badge_w).max(1.0);
    let mut drawn = Vec::new();

    if r.h < COMPACT_TILE_MM {
        let single = format!("{} - {}", course.code(), course.title());
        let t = truncate_to_width(&single, text_w, TITLE_PT, FontWeight::Regular);
        let baseline = r.y + (r.h + ascent_mm(TITLE_PT)) / 2.0 - 0.3;
        w.push(DrawOp::Text { x: text_x, y: baseline, size: TITLE_PT, weight: FontWeight::Regular, color: TEXT_COLOR, text: t.clone() });
        drawn.push(t);
        return drawn;
    }

    let mut y = r.y + TILE_PAD_MM;
    let code = truncate_to_width(course.code(), text_w, CODE_PT, FontWeight::Bold);
    w.push(DrawOp::Text { x: text_x, y: y + ascent_mm(CODE_PT), size: CODE_PT, weight: FontWeight::Bold, color: TEXT_COLOR, text: code.clone() });
    drawn.push(code);
    y += line_height_mm(CODE_PT);

    let title_lh = line_height_mm(TITLE_PT);
    let credits_h = line_height_mm(CREDITS_PT);
    let avail = r.y + r.h - TILE_PAD_MM - y;
    let with_credits = ((avail - credits_h) / title_lh).floor();
    let max_lines = if with_credits >= 1.0 { with_credits as usize } else { ((avail / title_lh).floor() as usize).max(1) };

    let lines = wrap_capped(course.title(), text_w, TITLE_PT, FontWeight::Regular, max_lines);
    for l in &lines {
        w.push(DrawOp::Text { x: text_x, y: y + ascent_mm(TITLE_PT), size: TITLE_PT, weight: FontWeight::Regular, color: TEXT_COLOR, text: l.clone() });
        drawn.push(l.clone());
        y += title_lh;
    }

    if r.y + r.h - TILE_PAD_MM - y >= credits_h {
        let credits = format!("{} cr", format_credits(course.credits()));
        w.push(DrawOp::Text { x: text_x, y: y + ascent_mm(CREDITS_PT), size: CREDITS_PT, weight: FontWeight::Regular, color: MUTED_COLOR, text: credits.clone() });
        drawn.push(credits);
    }
    drawn
}

pub fn draw_grid_diagram(w: &mut PageWriter, program: &Program) {
    w.title("Curriculum Map", Some(&program.name));

    let semesters = &program.semesters;
    if semesters.is_empty() {
        w.paragraph("No terms defined for this program.");
        return;
    }

    let x0 = w.left();
    let width = w.content_width();
    let tile_w = (width - LABEL_COL_MM) / SLOTS_PER_ROW as f32;
    let top = w.cursor();
    let row_h = (w.remaining() / semesters.len() as f32).min(MAX_ROW_MM);

    for (i, sem) in semesters.iter().enumerate() {
        let y = top + i as f32 * row_h;

        let name = truncate_to_width(&sem.name, LABEL_COL_MM - 3.0, CODE_PT, FontWeight::Bold);
        w.push(DrawOp::Text { x: x0, y: y + TILE_PAD_MM + ascent_mm(CODE_PT), size: CODE_PT, weight: FontWeight::Bold, color: TEXT_COLOR, text: name });
        if row_h >= line_height_mm(CODE_PT) + line_height_mm(CREDITS_PT) {
            w.push(DrawOp::Text {
                x: x0,
                y: y + TILE_PAD_MM + line_height_mm(CODE_PT) + ascent_mm(CREDITS_PT),
                size: CREDITS_PT,
                weight: FontWeight::Regular,
                color: MUTED_COLOR,
                text: format!("{} cr", format_credits(sem.total_credits())),
            });
        }

        for (slot, cell) in sem.courses.iter().enumerate() {
            let r = TileRect {
                x: x0 + LABEL_COL_MM + slot as f32 * tile_w + TILE_GAP_MM / 2.0,
                y: y + TILE_GAP_MM / 2.0,
                w: tile_w - TILE_GAP_MM,
                h: row_h - TILE_GAP_MM,
            };
            match cell {
                Some(course) => {
                    draw_course_tile(w, course, r);
                }
                None => w.push(DrawOp::Rect { x: r.x, y: r.y, w: r.w, h: r.h, fill: None, stroke: Some(EMPTY_TILE_STROKE) }),
            }
        }
    }

    for i in year_boundaries(semesters) {
        let y = top + (i + 1) as f32 * row_h;
        w.push(DrawOp::Line { x1: x0, y1: y, x2: x0 + width, y2: y, width: 0.8, color: SEPARATOR_COLOR });
    }

    w.set_cursor(top + row_h * semesters.len() as f32);
}

fn slot_line(slot: usize, cell: &Option<Course>) -> String {
    match cell {
        Some(c) => {
            let badges = c.badges();
            let flags = if badges.is_empty() { String::new() } else { format!(" [{}]", badges.join(", ")) };
            format!("Slot {}: {} - {} ({} cr){}", slot + 1, c.code(), c.title(), format_credits(c.credits()), flags)
        }
        None => format!("Slot {}: (empty)", slot + 1),
    }
}

/// Sección 5: la malla semestre por semestre, en texto.
pub fn write_grid_recap(w: &mut PageWriter, program: &Program) {
    w.title("Curriculum Map - Summary", None);
    if program.semesters.is_empty() {
        w.paragraph("No terms defined for this program.");
    }
    for sem in &program.semesters {
        w.subheading(&format!("{} ({} credits)", sem.name, format_credits(sem.total_credits())));
        for (slot, cell) in sem.courses.iter().enumerate() {
            w.bullet(&slot_line(slot, cell));
        }
    }

    if !program.specialization_blocks.is_empty() {
        w.heading("Specialization Blocks");
        for b in &program.specialization_blocks {
            w.subheading(&format!("{} ({})", b.label, b.rule.describe()));
            let filled: Vec<String> = b
                .filled()
                .map(|c| format!("{} - {} ({} cr)", c.code(), c.title(), format_credits(c.credits())))
                .collect();
            if filled.is_empty() {
                w.bullet("No courses");
            }
            for f in filled {
                w.bullet(&f);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::Orientation;

    fn sem(name: &str) -> Semester {
        Semester::new(name, name)
    }

    #[test]
    fn test_year_boundaries() {
        let s = vec![sem("Year 1 Fall"), sem("Year 1 Winter"), sem("Year 2 Fall"), sem("Year 2 Winter"), sem("Summer")];
        assert_eq!(year_boundaries(&s), vec![1]);
        assert!(year_boundaries(&[]).is_empty());
    }

    #[test]
    fn test_tile_compacto_una_linea() {
        let mut w = PageWriter::new(Orientation::Landscape);
        let c = Course::new("COMP1000", "Introduction to Programming Fundamentals", 3.0);
        let r = TileRect { x: 20.0, y: 20.0, w: 38.0, h: COMPACT_TILE_MM - 2.0 };
        let drawn = draw_course_tile(&mut w, &c, r);
        assert_eq!(drawn.len(), 1);
        assert!(drawn[0].starts_with("COMP1000 - "));
    }

    #[test]
    fn test_tile_completo_codigo_titulo_creditos() {
        let mut w = PageWriter::new(Orientation::Landscape);
        let c = Course::new("COMP1000", "Programming", 3.0).with_core(true);
        let r = TileRect { x: 20.0, y: 20.0, w: 38.0, h: 26.0 };
        let drawn = draw_course_tile(&mut w, &c, r);
        assert_eq!(drawn.first().map(String::as_str), Some("COMP1000"));
        assert!(drawn.contains(&"Programming".to_string()));
        assert_eq!(drawn.last().map(String::as_str), Some("3 cr"));
        let pages = w.finish();
        assert!(pages[0].has_text("CORE"));
    }

    #[test]
    fn test_slot_line_con_flags() {
        let c = Course::new("GAME2001", "Level Design", 3.0).with_new_course(true).with_core(true);
        assert_eq!(slot_line(0, &Some(c)), "Slot 1: GAME2001 - Level Design (3 cr) [CORE, NEW]");
        assert_eq!(slot_line(5, &None), "Slot 6: (empty)");
    }
}
