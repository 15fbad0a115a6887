use serde::{Deserialize, Serialize};

use crate::algorithm::{CurriculumGroups, EnrolmentProjection};
use crate::models::{CatalogCourse, Program, ProgramStatus, ProgramType};
use crate::state::Action;

/// Parámetros de `GET /catalog`.
///
/// # Ejemplo
/// `/catalog?q=game%20design&limit=10`
#[derive(Debug, Deserialize)]
pub struct CatalogQuery {
    #[serde(default)]
    pub q: String,
    pub limit: Option<usize>,
}

impl CatalogQuery {
    pub const DEFAULT_LIMIT: usize = 25;

    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(Self::DEFAULT_LIMIT).clamp(1, 200)
    }
}

/// Resumen de un programa para listados.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProgramSummary {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub program_type: ProgramType,
    pub status: ProgramStatus,
    pub total_credits: f64,
    pub parent_id: Option<String>,
}

impl From<&Program> for ProgramSummary {
    fn from(p: &Program) -> Self {
        ProgramSummary {
            id: p.id.clone(),
            name: p.name.clone(),
            program_type: p.program_type,
            status: p.status,
            total_credits: p.total_credits(),
            parent_id: p.parent.as_ref().map(|l| l.parent_id.clone()),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResponse<'a> {
    pub program_id: &'a str,
    pub projection: EnrolmentProjection,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupsResponse<'a> {
    pub program_id: &'a str,
    pub groups: CurriculumGroups,
}

#[derive(Debug, Serialize)]
pub struct CatalogResponse<'a> {
    pub count: usize,
    pub courses: Vec<&'a CatalogCourse>,
}

/// Parsea una acción desde texto JSON.
pub fn parse_action(json: &str) -> Result<Action, serde_json::Error> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog_query_limit() {
        let q = CatalogQuery { q: String::new(), limit: None };
        assert_eq!(q.limit(), CatalogQuery::DEFAULT_LIMIT);
        let q = CatalogQuery { q: String::new(), limit: Some(0) };
        assert_eq!(q.limit(), 1);
    }

    #[test]
    fn test_parse_action_insert() {
        let json = r#"{
            "type": "removeCourse",
            "programId": "p1",
            "semesterId": "sem-1",
            "slot": 2
        }"#;
        match parse_action(json).unwrap() {
            Action::RemoveCourse { program_id, semester_id, slot } => {
                assert_eq!(program_id, "p1");
                assert_eq!(semester_id, "sem-1");
                assert_eq!(slot, 2);
            }
            other => panic!("acción inesperada: {:?}", other),
        }
    }

    #[test]
    fn test_parse_action_desconocida() {
        assert!(parse_action(r#"{"type": "dropTable"}"#).is_err());
    }
}
