use curriculum_planner::algorithm::{group_curriculum, CORE_LABEL};
use curriculum_planner::models::{Course, ProgramType, RowRule, Semester, SlotRow};
use curriculum_planner::state::templates::blank_program;

fn program_with(courses: Vec<Course>) -> curriculum_planner::models::Program {
    let mut p = blank_program("p1", "Game Development", ProgramType::HonoursUndergraduateDegree);
    let mut sem = Semester::new("sem-1", "Year 1 Fall");
    for (slot, c) in sem.courses.iter_mut().zip(courses) {
        *slot = Some(c);
    }
    p.semesters = vec![sem];
    p
}

#[test]
fn test_disciplina_game_siempre_game_elective() {
    let p = program_with(vec![
        Course::new("COMP2000", "Algorithms", 3.0).with_discipline("GAME"),
        Course::new("OPEN", "Open Elective", 3.0).with_discipline("GAME"),
        Course::new("XYZ", "Anything", 3.0).with_discipline("GAME"),
    ]);
    let g = group_curriculum(&p);
    assert!(g.core.is_empty());
    assert_eq!(g.electives.len(), 1);
    assert_eq!(g.electives[0].label, "GAME Elective");
    assert_eq!(g.electives[0].courses.len(), 3);
}

#[test]
fn test_spec_solo_en_grupo_spec() {
    let p = program_with(vec![
        Course::new("SPEC", "SPEC Elective", 3.0),
        Course::new("SPEC", "Specialization Elective", 3.0).with_discipline("BUSI"),
        Course::new("COMP1000", "Programming", 3.0).with_core(true),
        Course::new("OPEN", "Open Elective", 3.0),
    ]);
    let g = group_curriculum(&p);

    assert!(g.core.iter().all(|c| c.code() != "SPEC"));
    for group in &g.electives {
        assert!(group.courses.iter().all(|c| c.code() != "SPEC"), "SPEC en {}", group.label);
    }
    let spec = g.spec.expect("debe existir el grupo SPEC");
    assert_eq!(spec.placeholders.len(), 2);
    assert_eq!(spec.credits(), 6.0);
}

#[test]
fn test_categorias_ordenadas_y_core() {
    let p = program_with(vec![
        Course::new("OPEN", "Open Elective", 3.0),
        Course::new("BUSI-ELEC", "Business Elective", 3.0),
        Course::new("ELEC", "Elective", 3.0),
        Course::new("HIST1000", "Humanities Elective", 3.0),
        Course::new("COMP1000", "Programming", 4.0),
    ]);
    let g = group_curriculum(&p);
    let labels: Vec<&str> = g.electives.iter().map(|e| e.label.as_str()).collect();
    assert_eq!(labels, vec!["BUSI Elective", "General Elective", "Humanities Elective", "Open Elective"]);
    assert_eq!(g.core.len(), 1);
    assert_eq!(g.core[0].code(), "COMP1000");
    assert_ne!(CORE_LABEL, "");
}

#[test]
fn test_bloques_especializacion_generan_filas() {
    let mut p = program_with(vec![]);
    let mut row = SlotRow::new("blk-1", "Design Track", RowRule::Choose { count: 2 });
    row.courses[0] = Some(Course::new("GAME3001", "Systems Design", 3.0));
    p.specialization_blocks.push(row);
    let g = group_curriculum(&p);
    let spec = g.spec.unwrap();
    assert_eq!(spec.rows.len(), 1);
    assert_eq!(spec.rows[0].rule, "Choose 2");
    assert_eq!(spec.rows[0].courses.len(), 1);
}
