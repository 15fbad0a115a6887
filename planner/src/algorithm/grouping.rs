//! Agrupación de la malla para el diagrama general del reporte.
//!
//! Los cursos se recorren semestre por semestre y se reparten en:
//! - `CORE`: sin clasificación de electivo y que no son placeholder SPEC
//! - un grupo por categoría de electivo (ordenados por etiqueta)
//! - `SPEC Electives`: placeholders de especialización + bloques del programa

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::{Course, Program, SlotRow};

pub const CORE_LABEL: &str = "CORE";
pub const SPEC_LABEL: &str = "SPEC Electives";

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElectiveGroup {
    pub label: String,
    pub courses: Vec<Course>,
    /// Filas de sugerencia del programa para esta categoría
    pub suggestions: Vec<SlotRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecRow {
    pub label: String,
    pub rule: String,
    pub courses: Vec<Course>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpecGroup {
    pub placeholders: Vec<Course>,
    pub rows: Vec<SpecRow>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurriculumGroups {
    pub core: Vec<Course>,
    pub electives: Vec<ElectiveGroup>,
    pub spec: Option<SpecGroup>,
}

pub fn credit_sum<'a>(courses: impl IntoIterator<Item = &'a Course>) -> f64 {
    courses.into_iter().map(Course::credits).sum()
}

impl ElectiveGroup {
    pub fn credits(&self) -> f64 {
        credit_sum(&self.courses)
    }
}

impl SpecGroup {
    pub fn course_count(&self) -> usize {
        self.placeholders.len() + self.rows.iter().map(|r| r.courses.len()).sum::<usize>()
    }

    pub fn credits(&self) -> f64 {
        credit_sum(&self.placeholders)
    }
}

fn spec_row_from_block(block: &SlotRow) -> SpecRow {
    SpecRow {
        label: block.label.clone(),
        rule: block.rule.describe(),
        courses: block.filled().cloned().collect(),
    }
}

/// Reparte los cursos del programa en grupos de presentación.
pub fn group_curriculum(program: &Program) -> CurriculumGroups {
    let mut core: Vec<Course> = Vec::new();
    let mut by_category: BTreeMap<String, Vec<Course>> = BTreeMap::new();
    let mut placeholders: Vec<Course> = Vec::new();

    for course in program.flattened_courses() {
        let kind = course.kind();
        if kind.is_specialization() {
            placeholders.push(course.clone());
            continue;
        }
        match kind.elective_category() {
            Some(category) => by_category.entry(category).or_default().push(course.clone()),
            None => core.push(course.clone()),
        }
    }

    // BTreeMap ya deja las categorías en orden lexicográfico
    let electives: Vec<ElectiveGroup> = by_category
        .into_iter()
        .map(|(label, courses)| {
            let suggestions = program.elective_suggestions.get(&label).cloned().unwrap_or_default();
            ElectiveGroup { label, courses, suggestions }
        })
        .collect();

    let spec = if placeholders.is_empty() && program.specialization_blocks.is_empty() {
        None
    } else {
        Some(SpecGroup {
            placeholders,
            rows: program.specialization_blocks.iter().map(spec_row_from_block).collect(),
        })
    };

    CurriculumGroups { core, electives, spec }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ProgramType, RowRule, Semester};
    use crate::state::templates::blank_program;

    #[test]
    fn test_spec_sin_placeholders_ni_bloques() {
        let mut p = blank_program("p1", "Demo", ProgramType::UndergraduateDegree);
        p.semesters = vec![Semester::new("s1", "Year 1 Fall")];
        p.semesters[0].courses[0] = Some(Course::new("COMP1000", "Programming", 3.0));
        let g = group_curriculum(&p);
        assert_eq!(g.core.len(), 1);
        assert!(g.electives.is_empty());
        assert!(g.spec.is_none());
    }

    #[test]
    fn test_sugerencias_asociadas_por_categoria() {
        let mut p = blank_program("p1", "Demo", ProgramType::UndergraduateDegree);
        p.semesters = vec![Semester::new("s1", "Year 1 Fall")];
        p.semesters[0].courses[0] = Some(Course::new("OPEN", "Open Elective", 3.0));
        p.elective_suggestions
            .insert("Open Elective".to_string(), vec![SlotRow::new("r1", "Arts", RowRule::Choose { count: 1 })]);
        let g = group_curriculum(&p);
        assert_eq!(g.electives.len(), 1);
        assert_eq!(g.electives[0].label, "Open Elective");
        assert_eq!(g.electives[0].suggestions.len(), 1);
    }
}
