use serde_json::json;

use curriculum_planner::api_json::parse_action;
use curriculum_planner::models::{CatalogCourse, ColorTag, ProgramStatus, ProgramType};
use curriculum_planner::state::{reduce, Action, NewProgram, PlannerState, SlotRef};

fn catalog() -> Vec<CatalogCourse> {
    vec![CatalogCourse {
        id: "cat-1".to_string(),
        code: "GAME1001".to_string(),
        title: "Game Design I".to_string(),
        credits: 3.0,
        color: ColorTag::Red,
        discipline: Some("GAME".to_string()),
    }]
}

fn create(state: PlannerState, name: &str, program_type: ProgramType, parent_id: Option<String>) -> PlannerState {
    reduce(
        state,
        Action::CreateProgram {
            program: NewProgram {
                name: name.to_string(),
                program_type,
                faculty: String::new(),
                lead: String::new(),
                description: String::new(),
                parent_id,
            },
        },
    )
}

#[test]
fn test_crear_programa_base_y_derivado() {
    let state = create(PlannerState::with_catalog(catalog()), "Game Development", ProgramType::UndergraduateDegree, None);
    assert_eq!(state.programs.len(), 1);
    let base_id = state.programs[0].id.clone();
    assert_eq!(state.programs[0].semesters.len(), 8);
    assert_eq!(state.programs[0].milestones.len(), 5);

    let state = create(state, "Games Minor", ProgramType::Minor, Some(base_id.clone()));
    let minor = &state.programs[1];
    assert_eq!(minor.parent.as_ref().map(|p| p.parent_id.as_str()), Some(base_id.as_str()));
    assert_eq!(minor.semesters[0].name, "Minor Requirements");
}

#[test]
fn test_insertar_desde_catalogo_y_mover() {
    let state = create(PlannerState::with_catalog(catalog()), "Game Development", ProgramType::UndergraduateDegree, None);
    let id = state.programs[0].id.clone();

    let state = reduce(
        state,
        Action::InsertCatalogCourse {
            program_id: id.clone(),
            semester_id: "sem-1".to_string(),
            slot: 0,
            catalog_id: "cat-1".to_string(),
        },
    );
    let course = state.programs[0].semesters[0].courses[0].clone().expect("curso insertado");
    assert_eq!(course.code(), "GAME1001");
    assert_eq!(course.color(), ColorTag::Red);
    assert_eq!(course.kind().elective_category().as_deref(), Some("GAME Elective"));

    let state = reduce(
        state,
        Action::SwapCourses { program_id: id.clone(), from: SlotRef::new("sem-1", 0), to: SlotRef::new("sem-2", 3) },
    );
    assert!(state.programs[0].semesters[0].courses[0].is_none());
    assert!(state.programs[0].semesters[1].courses[3].is_some());
}

#[test]
fn test_catalogo_inexistente_no_cambia_estado() {
    let state = create(PlannerState::with_catalog(catalog()), "Game Development", ProgramType::UndergraduateDegree, None);
    let id = state.programs[0].id.clone();
    let before = state.clone();
    let after = reduce(
        state,
        Action::InsertCatalogCourse { program_id: id, semester_id: "sem-1".into(), slot: 0, catalog_id: "missing".into() },
    );
    assert_eq!(after, before);
}

#[test]
fn test_acciones_desde_json() {
    let state = create(PlannerState::default(), "Game Development", ProgramType::UndergraduateDegree, None);
    let id = state.programs[0].id.clone();

    let action = parse_action(&json!({"type": "setStatus", "programId": id, "status": "In Review"}).to_string()).unwrap();
    assert_eq!(action.program_id(), Some(id.as_str()));
    let state = reduce(state, action);
    assert_eq!(state.programs[0].status, ProgramStatus::InReview);

    let action = parse_action(
        &json!({
            "type": "insertCourse",
            "programId": id,
            "semesterId": "sem-3",
            "slot": 4,
            "course": {"code": "SPEC", "title": "SPEC Elective", "credits": "3"}
        })
        .to_string(),
    )
    .unwrap();
    let state = reduce(state, action);
    let c = state.programs[0].semesters[2].courses[4].as_ref().unwrap();
    assert!(c.kind().is_specialization());
    assert_eq!(c.credits(), 3.0);
}

#[test]
fn test_programa_inexistente_no_cambia_estado() {
    let state = create(PlannerState::default(), "Game Development", ProgramType::UndergraduateDegree, None);
    let before = state.clone();
    let after = reduce(state, Action::ToggleMilestone { program_id: "nope".into(), milestone_id: "ms-1".into() });
    assert_eq!(after, before);
}
