//! Cálculos puros sobre un programa: proyección de matrícula y agrupación
//! de la malla para el reporte.

pub mod grouping;
pub mod projection;

pub use grouping::{group_curriculum, CurriculumGroups, ElectiveGroup, SpecGroup, SpecRow, CORE_LABEL, SPEC_LABEL};
pub use projection::{
    academic_year_label, parse_starting_year, project_enrolment, project_enrolment_at, project_from_inputs,
    EnrolmentProjection, PROGRAM_YEARS, PROJECTION_YEARS,
};
