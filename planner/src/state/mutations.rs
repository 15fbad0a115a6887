//! Operaciones inmutables sobre la colección de programas.
//!
//! Cada función recibe la colección actual y devuelve una nueva. Si el
//! programa, el semestre/bloque o el slot no existen se devuelve una copia
//! idéntica: nunca hay panic ni error.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::models::{normalize_program_info, Course, Program, ProgramStatus, ProgramType, SLOTS_PER_ROW};

/// Posición (semestre, slot) dentro de la malla de un programa.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlotRef {
    pub semester_id: String,
    pub slot: usize,
}

impl SlotRef {
    pub fn new(semester_id: &str, slot: usize) -> Self {
        SlotRef { semester_id: semester_id.to_string(), slot }
    }
}

fn program_index(programs: &[Program], program_id: &str) -> Option<usize> {
    programs.iter().position(|p| p.id == program_id)
}

fn semester_index(program: &Program, semester_id: &str) -> Option<usize> {
    program.semesters.iter().position(|s| s.id == semester_id)
}

/// Aplica `f` al slot indicado; no-op si algo no existe.
fn with_semester_slot<F>(
    programs: &[Program],
    program_id: &str,
    semester_id: &str,
    slot: usize,
    f: F,
) -> Vec<Program>
where
    F: FnOnce(&mut Option<Course>),
{
    if slot >= SLOTS_PER_ROW {
        return programs.to_vec();
    }
    let Some(pi) = program_index(programs, program_id) else {
        return programs.to_vec();
    };
    let Some(si) = semester_index(&programs[pi], semester_id) else {
        return programs.to_vec();
    };
    let mut next = programs.to_vec();
    f(&mut next[pi].semesters[si].courses[slot]);
    next
}

/// Coloca `course` en el slot (sobrescribe lo que hubiera).
pub fn insert_course_in_program(
    programs: &[Program],
    program_id: &str,
    semester_id: &str,
    slot: usize,
    course: Course,
) -> Vec<Program> {
    with_semester_slot(programs, program_id, semester_id, slot, |cell| *cell = Some(course))
}

/// Deja el slot vacío.
pub fn remove_course_from_program(
    programs: &[Program],
    program_id: &str,
    semester_id: &str,
    slot: usize,
) -> Vec<Program> {
    with_semester_slot(programs, program_id, semester_id, slot, |cell| *cell = None)
}

/// Intercambia el contenido de dos slots (uno puede estar vacío). Es su
/// propia inversa; intercambiar un slot consigo mismo no cambia nada.
pub fn swap_courses_across_semesters(
    programs: &[Program],
    program_id: &str,
    from: &SlotRef,
    to: &SlotRef,
) -> Vec<Program> {
    if from.slot >= SLOTS_PER_ROW || to.slot >= SLOTS_PER_ROW || from == to {
        return programs.to_vec();
    }
    let Some(pi) = program_index(programs, program_id) else {
        return programs.to_vec();
    };
    let (Some(fa), Some(fb)) = (
        semester_index(&programs[pi], &from.semester_id),
        semester_index(&programs[pi], &to.semester_id),
    ) else {
        return programs.to_vec();
    };

    let mut next = programs.to_vec();
    let semesters = &mut next[pi].semesters;
    let a = semesters[fa].courses[from.slot].take();
    let b = semesters[fb].courses[to.slot].take();
    semesters[fb].courses[to.slot] = a;
    semesters[fa].courses[from.slot] = b;
    next
}

fn with_block_slot<F>(programs: &[Program], program_id: &str, block_id: &str, slot: usize, f: F) -> Vec<Program>
where
    F: FnOnce(&mut Option<Course>),
{
    if slot >= SLOTS_PER_ROW {
        return programs.to_vec();
    }
    let Some(pi) = program_index(programs, program_id) else {
        return programs.to_vec();
    };
    let Some(bi) = programs[pi].specialization_blocks.iter().position(|b| b.id == block_id) else {
        return programs.to_vec();
    };
    let mut next = programs.to_vec();
    f(&mut next[pi].specialization_blocks[bi].courses[slot]);
    next
}

pub fn insert_course_in_block(
    programs: &[Program],
    program_id: &str,
    block_id: &str,
    slot: usize,
    course: Course,
) -> Vec<Program> {
    with_block_slot(programs, program_id, block_id, slot, |cell| *cell = Some(course))
}

pub fn remove_course_from_block(programs: &[Program], program_id: &str, block_id: &str, slot: usize) -> Vec<Program> {
    with_block_slot(programs, program_id, block_id, slot, |cell| *cell = None)
}

fn with_program<F>(programs: &[Program], program_id: &str, f: F) -> Vec<Program>
where
    F: FnOnce(&mut Program),
{
    let Some(pi) = program_index(programs, program_id) else {
        return programs.to_vec();
    };
    let mut next = programs.to_vec();
    f(&mut next[pi]);
    next
}

/// Marca / desmarca un milestone; al completarlo se registra la fecha.
pub fn toggle_milestone(programs: &[Program], program_id: &str, milestone_id: &str, today: NaiveDate) -> Vec<Program> {
    with_program(programs, program_id, |p| {
        if let Some(m) = p.milestones.iter_mut().find(|m| m.id == milestone_id) {
            m.completed = !m.completed;
            m.completed_on = if m.completed { Some(today) } else { None };
        }
    })
}

pub fn set_status(programs: &[Program], program_id: &str, status: ProgramStatus) -> Vec<Program> {
    with_program(programs, program_id, |p| p.status = status)
}

/// Cambia el flag core de un curso.
///
/// Invariante: en programas Specialization el flag no se puede editar (la
/// malla core viene del programa base), y un curso cuyo código está en la
/// lista heredada de cursos bloqueados no se puede desmarcar.
pub fn toggle_core(programs: &[Program], program_id: &str, semester_id: &str, slot: usize) -> Vec<Program> {
    let Some(pi) = program_index(programs, program_id) else {
        return programs.to_vec();
    };
    let program = &programs[pi];
    if program.program_type == ProgramType::Specialization {
        log::debug!("toggle_core ignorado: programa '{}' es Specialization", program_id);
        return programs.to_vec();
    }
    let inherited_lock = program
        .find_semester(semester_id)
        .and_then(|s| s.courses.get(slot))
        .and_then(Option::as_ref)
        .map(|c| program.locked_core_codes().iter().any(|code| code.eq_ignore_ascii_case(c.code())))
        .unwrap_or(false);
    if inherited_lock {
        return programs.to_vec();
    }
    with_semester_slot(programs, program_id, semester_id, slot, |cell| {
        if let Some(course) = cell.as_mut() {
            let current = course.is_core();
            course.set_core(!current);
        }
    })
}

/// Objetos se funden recursivamente; cualquier otro valor reemplaza.
fn merge_json(target: &mut Map<String, Value>, patch: &Map<String, Value>) {
    for (k, v) in patch {
        if let (Some(Value::Object(existing)), Value::Object(inner)) = (target.get_mut(k), v) {
            merge_json(existing, inner);
            continue;
        }
        target.insert(k.clone(), v.clone());
    }
}

/// Funde un registro parcial del cuestionario sobre el actual y lo normaliza.
pub fn update_info(programs: &[Program], program_id: &str, partial: &Value) -> Vec<Program> {
    with_program(programs, program_id, |p| {
        let mut merged = match serde_json::to_value(p.info_or_default()) {
            Ok(Value::Object(m)) => m,
            _ => Default::default(),
        };
        if let Value::Object(patch) = partial {
            merge_json(&mut merged, patch);
        }
        p.info = Some(normalize_program_info(Some(&Value::Object(merged)), p.program_type));
    })
}
