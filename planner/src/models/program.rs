use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::course::{Course, Semester, SlotRow};
use super::info::{normalize_program_info, ProgramInfo};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProgramType {
    #[serde(rename = "Undergraduate Degree")]
    UndergraduateDegree,
    #[serde(rename = "Honours Undergraduate Degree")]
    HonoursUndergraduateDegree,
    #[serde(rename = "Minor")]
    Minor,
    #[serde(rename = "Specialization")]
    Specialization,
    #[serde(rename = "Certificate")]
    Certificate,
    #[serde(rename = "Graduate Degree")]
    GraduateDegree,
}

impl ProgramType {
    pub fn label(self) -> &'static str {
        match self {
            ProgramType::UndergraduateDegree => "Undergraduate Degree",
            ProgramType::HonoursUndergraduateDegree => "Honours Undergraduate Degree",
            ProgramType::Minor => "Minor",
            ProgramType::Specialization => "Specialization",
            ProgramType::Certificate => "Certificate",
            ProgramType::GraduateDegree => "Graduate Degree",
        }
    }

    /// Minor y Specialization derivan de un programa base.
    pub fn is_derived(self) -> bool {
        matches!(self, ProgramType::Minor | ProgramType::Specialization)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ProgramStatus {
    #[default]
    #[serde(rename = "Drafting")]
    Drafting,
    #[serde(rename = "In Review")]
    InReview,
    #[serde(rename = "Approved")]
    Approved,
}

impl ProgramStatus {
    pub fn label(self) -> &'static str {
        match self {
            ProgramStatus::Drafting => "Drafting",
            ProgramStatus::InReview => "In Review",
            ProgramStatus::Approved => "Approved",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_on: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(default)]
    pub reviewer: String,
    #[serde(default)]
    pub comment: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FacultyMember {
    pub name: String,
    #[serde(default)]
    pub role: String,
    #[serde(default)]
    pub email: String,
}

/// Vínculo de un programa derivado con su programa base.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentLink {
    pub parent_id: String,
    #[serde(default)]
    pub parent_name: String,
    #[serde(default)]
    pub locked_core_course_codes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Program {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub program_type: ProgramType,
    #[serde(default)]
    pub faculty: String,
    #[serde(default)]
    pub lead: String,
    #[serde(default)]
    pub status: ProgramStatus,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub semesters: Vec<Semester>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub reviews: Vec<Review>,
    #[serde(default)]
    pub faculty_members: Vec<FacultyMember>,
    #[serde(default, rename = "programInfo", skip_serializing_if = "Option::is_none")]
    pub info: Option<ProgramInfo>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ParentLink>,
    #[serde(default)]
    pub specialization_blocks: Vec<SlotRow>,
    /// Categoría de electivo -> filas sugeridas
    #[serde(default)]
    pub elective_suggestions: BTreeMap<String, Vec<SlotRow>>,
}

impl Program {
    pub fn is_derived(&self) -> bool {
        self.program_type.is_derived()
    }

    /// Cursos de la malla en orden semestre por semestre, slot por slot.
    pub fn flattened_courses(&self) -> impl Iterator<Item = &Course> {
        self.semesters.iter().flat_map(|s| s.courses.iter().flatten())
    }

    pub fn total_credits(&self) -> f64 {
        self.semesters.iter().map(Semester::total_credits).sum()
    }

    pub fn find_semester(&self, semester_id: &str) -> Option<&Semester> {
        self.semesters.iter().find(|s| s.id == semester_id)
    }

    pub fn locked_core_codes(&self) -> &[String] {
        match &self.parent {
            Some(link) => &link.locked_core_course_codes,
            None => &[],
        }
    }

    /// Un curso está bloqueado si es core explícito o si su código está en
    /// la lista heredada del programa base.
    pub fn is_locked(&self, course: &Course) -> bool {
        course.is_core()
            || self
                .locked_core_codes()
                .iter()
                .any(|code| code.eq_ignore_ascii_case(course.code()))
    }

    /// ProgramInfo normalizado (se crea con defaults si nunca se guardó).
    pub fn info_or_default(&self) -> ProgramInfo {
        match &self.info {
            Some(info) => {
                let value = serde_json::to_value(info).ok();
                normalize_program_info(value.as_ref(), self.program_type)
            }
            None => normalize_program_info(None, self.program_type),
        }
    }

    /// Versión del documento, mínimo 1.
    pub fn version(&self) -> u32 {
        self.info_or_default().version().max(1)
    }
}
