// Plantillas de creación de programas: malla por defecto, plantilla CIQE
// para programas derivados y milestones de aprobación.

use serde::{Deserialize, Serialize};

use crate::models::{
    ColorTag, Course, Milestone, ParentLink, Program, ProgramStatus, ProgramType, Semester,
};

/// Semestres genéricos de un programa base (4 años, otoño + invierno)
pub const BASE_SEMESTER_COUNT: usize = 8;

pub const DEFAULT_MILESTONES: [&str; 5] = [
    "Proposal drafted",
    "Department approval",
    "Faculty council approval",
    "CIQE review",
    "Senate approval",
];

/// Datos del formulario de creación.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewProgram {
    pub name: String,
    #[serde(rename = "type")]
    pub program_type: ProgramType,
    #[serde(default)]
    pub faculty: String,
    #[serde(default)]
    pub lead: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub parent_id: Option<String>,
}

pub fn blank_program(id: &str, name: &str, program_type: ProgramType) -> Program {
    Program {
        id: id.to_string(),
        name: name.to_string(),
        program_type,
        faculty: String::new(),
        lead: String::new(),
        status: ProgramStatus::Drafting,
        description: String::new(),
        semesters: Vec::new(),
        milestones: Vec::new(),
        reviews: Vec::new(),
        faculty_members: Vec::new(),
        info: None,
        parent: None,
        specialization_blocks: Vec::new(),
        elective_suggestions: Default::default(),
    }
}

/// "Year 1 Fall", "Year 1 Winter", ... "Year 4 Winter"
pub fn base_semesters() -> Vec<Semester> {
    (0..BASE_SEMESTER_COUNT)
        .map(|i| {
            let year = i / 2 + 1;
            let term = if i % 2 == 0 { "Fall" } else { "Winter" };
            Semester::new(&format!("sem-{}", i + 1), &format!("Year {} {}", year, term))
        })
        .collect()
}

fn block(id: &str, name: &str, courses: Vec<Course>) -> Semester {
    let mut s = Semester::new(id, name);
    for (slot, c) in s.courses.iter_mut().zip(courses) {
        *slot = Some(c);
    }
    s
}

/// Plantilla CIQE: estructura de bloques y créditos para Minor / Specialization.
pub fn ciqe_template(program_type: ProgramType) -> Vec<Semester> {
    match program_type {
        ProgramType::Minor => vec![
            block("block-1", "Minor Requirements", Vec::new()),
            block(
                "block-2",
                "Minor Electives",
                vec![
                    Course::new("OPEN", "Open Elective", 3.0).with_color(ColorTag::Green),
                    Course::new("OPEN", "Open Elective", 3.0).with_color(ColorTag::Green),
                ],
            ),
        ],
        ProgramType::Specialization => vec![
            block("block-1", "Specialization Requirements", Vec::new()),
            block(
                "block-2",
                "Specialization Electives",
                (0..3)
                    .map(|_| Course::specialization_placeholder("SPEC Elective", 3.0))
                    .collect(),
            ),
            block("block-3", "Capstone", Vec::new()),
        ],
        _ => Vec::new(),
    }
}

pub fn default_semesters(program_type: ProgramType) -> Vec<Semester> {
    if program_type.is_derived() {
        ciqe_template(program_type)
    } else {
        base_semesters()
    }
}

pub fn default_milestones() -> Vec<Milestone> {
    DEFAULT_MILESTONES
        .iter()
        .enumerate()
        .map(|(i, name)| Milestone {
            id: format!("ms-{}", i + 1),
            name: name.to_string(),
            completed: false,
            completed_on: None,
        })
        .collect()
}

/// Construye un programa nuevo. Si es derivado y se entrega el programa base,
/// hereda como bloqueados los códigos de los cursos core del base.
pub fn new_program(id: &str, form: &NewProgram, parent: Option<&Program>) -> Program {
    let mut program = blank_program(id, form.name.trim(), form.program_type);
    program.faculty = form.faculty.trim().to_string();
    program.lead = form.lead.trim().to_string();
    program.description = form.description.trim().to_string();
    program.semesters = default_semesters(form.program_type);
    program.milestones = default_milestones();

    if form.program_type.is_derived() {
        if let Some(base) = parent {
            let mut locked: Vec<String> = base
                .flattened_courses()
                .filter(|c| c.is_core())
                .map(|c| c.code().to_string())
                .collect();
            locked.sort();
            locked.dedup();
            program.parent = Some(ParentLink {
                parent_id: base.id.clone(),
                parent_name: base.name.clone(),
                locked_core_course_codes: locked,
            });
        }
    }
    program
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_semesters_alternan() {
        let s = base_semesters();
        assert_eq!(s.len(), 8);
        assert_eq!(s[0].name, "Year 1 Fall");
        assert_eq!(s[1].name, "Year 1 Winter");
        assert_eq!(s[7].name, "Year 4 Winter");
    }

    #[test]
    fn test_ciqe_specialization_tres_bloques() {
        let s = ciqe_template(ProgramType::Specialization);
        assert_eq!(s.len(), 3);
        let spec_count = s[1].courses.iter().flatten().filter(|c| c.kind().is_specialization()).count();
        assert_eq!(spec_count, 3);
        assert_eq!(ciqe_template(ProgramType::Minor).len(), 2);
    }
}
