//! Estado de la sesión: la colección de programas y el catálogo de cursos.
//!
//! No hay singleton global: `PlannerState` se pasa a `reduce` junto con una
//! `Action` y se obtiene el estado siguiente. El servidor guarda una única
//! instancia detrás de un `Mutex`.

pub mod mutations;
pub mod templates;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::models::{CatalogCourse, Course, Program, ProgramStatus};

pub use mutations::{
    insert_course_in_block, insert_course_in_program, remove_course_from_block, remove_course_from_program,
    set_status, swap_courses_across_semesters, toggle_core, toggle_milestone, update_info, SlotRef,
};
pub use templates::{new_program, NewProgram};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlannerState {
    pub programs: Vec<Program>,
    #[serde(default)]
    pub catalog: Vec<CatalogCourse>,
}

impl PlannerState {
    pub fn with_catalog(catalog: Vec<CatalogCourse>) -> Self {
        PlannerState { programs: Vec::new(), catalog }
    }

    pub fn program(&self, program_id: &str) -> Option<&Program> {
        self.programs.iter().find(|p| p.id == program_id)
    }

    pub fn catalog_course(&self, catalog_id: &str) -> Option<&CatalogCourse> {
        self.catalog.iter().find(|c| c.id == catalog_id)
    }
}

/// Acciones del usuario. JSON: `{"type": "insertCourse", "programId": ...}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum Action {
    CreateProgram {
        program: NewProgram,
    },
    InsertCourse {
        program_id: String,
        semester_id: String,
        slot: usize,
        course: Course,
    },
    InsertCatalogCourse {
        program_id: String,
        semester_id: String,
        slot: usize,
        catalog_id: String,
    },
    RemoveCourse {
        program_id: String,
        semester_id: String,
        slot: usize,
    },
    SwapCourses {
        program_id: String,
        from: SlotRef,
        to: SlotRef,
    },
    InsertBlockCourse {
        program_id: String,
        block_id: String,
        slot: usize,
        course: Course,
    },
    RemoveBlockCourse {
        program_id: String,
        block_id: String,
        slot: usize,
    },
    ToggleMilestone {
        program_id: String,
        milestone_id: String,
    },
    SetStatus {
        program_id: String,
        status: ProgramStatus,
    },
    ToggleCore {
        program_id: String,
        semester_id: String,
        slot: usize,
    },
    UpdateInfo {
        program_id: String,
        info: Value,
    },
}

impl Action {
    /// Programa afectado por la acción (`None` al crear uno nuevo).
    pub fn program_id(&self) -> Option<&str> {
        match self {
            Action::CreateProgram { .. } => None,
            Action::InsertCourse { program_id, .. }
            | Action::InsertCatalogCourse { program_id, .. }
            | Action::RemoveCourse { program_id, .. }
            | Action::SwapCourses { program_id, .. }
            | Action::InsertBlockCourse { program_id, .. }
            | Action::RemoveBlockCourse { program_id, .. }
            | Action::ToggleMilestone { program_id, .. }
            | Action::SetStatus { program_id, .. }
            | Action::ToggleCore { program_id, .. }
            | Action::UpdateInfo { program_id, .. } => Some(program_id),
        }
    }
}

/// Devuelve el estado siguiente. Acciones sobre ids inexistentes dejan el
/// estado igual.
pub fn reduce(state: PlannerState, action: Action) -> PlannerState {
    let PlannerState { programs, catalog } = state;
    let programs = match action {
        Action::CreateProgram { program: form } => {
            let parent = form
                .parent_id
                .as_deref()
                .and_then(|pid| programs.iter().find(|p| p.id == pid));
            let created = new_program(&Uuid::new_v4().to_string(), &form, parent);
            log::info!("programa creado: {} ({})", created.name, created.program_type.label());
            let mut next = programs;
            next.push(created);
            next
        }
        Action::InsertCourse { program_id, semester_id, slot, course } => {
            insert_course_in_program(&programs, &program_id, &semester_id, slot, course)
        }
        Action::InsertCatalogCourse { program_id, semester_id, slot, catalog_id } => {
            match catalog.iter().find(|c| c.id == catalog_id) {
                Some(entry) => {
                    insert_course_in_program(&programs, &program_id, &semester_id, slot, Course::from_catalog(entry))
                }
                None => {
                    log::warn!("curso de catálogo '{}' no existe", catalog_id);
                    programs
                }
            }
        }
        Action::RemoveCourse { program_id, semester_id, slot } => {
            remove_course_from_program(&programs, &program_id, &semester_id, slot)
        }
        Action::SwapCourses { program_id, from, to } => {
            swap_courses_across_semesters(&programs, &program_id, &from, &to)
        }
        Action::InsertBlockCourse { program_id, block_id, slot, course } => {
            insert_course_in_block(&programs, &program_id, &block_id, slot, course)
        }
        Action::RemoveBlockCourse { program_id, block_id, slot } => {
            remove_course_from_block(&programs, &program_id, &block_id, slot)
        }
        Action::ToggleMilestone { program_id, milestone_id } => {
            let today = chrono::Local::now().date_naive();
            toggle_milestone(&programs, &program_id, &milestone_id, today)
        }
        Action::SetStatus { program_id, status } => set_status(&programs, &program_id, status),
        Action::ToggleCore { program_id, semester_id, slot } => {
            toggle_core(&programs, &program_id, &semester_id, slot)
        }
        Action::UpdateInfo { program_id, info } => update_info(&programs, &program_id, &info),
    };
    PlannerState { programs, catalog }
}
