// Estructuras de datos principales: programa, malla, cursos, cuestionario

pub mod course;
pub mod info;
pub mod lenient;
pub mod program;

pub use course::{
    CatalogCourse, ColorTag, Course, CourseKind, PlaceholderKind, RowRule, Semester, SlotArray, SlotRow,
    SLOTS_PER_ROW,
};
pub use info::{
    normalize_program_info, BaseProgramInfo, DerivedProgramInfo, EnrolmentInputs, ProgramInfo,
    PROGRAM_INFO_SCHEMA_VERSION,
};
pub use program::{FacultyMember, Milestone, ParentLink, Program, ProgramStatus, ProgramType, Review};
