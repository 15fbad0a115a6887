use curriculum_planner::catalog::{load_catalog, load_catalog_json, load_catalog_xlsx, search_catalog};
use curriculum_planner::models::ColorTag;
use rust_xlsxwriter::Workbook;
use tempfile::tempdir;

#[test]
fn test_cargar_catalogo_xlsx() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let headers = ["Code", "Title", "Credits", "Color", "Discipline"];
    for (c, h) in headers.iter().enumerate() {
        sheet.write_string(0, c as u16, *h).unwrap();
    }
    sheet.write_string(1, 0, "GAME1001").unwrap();
    sheet.write_string(1, 1, "Game Design I").unwrap();
    sheet.write_number(1, 2, 3.0).unwrap();
    sheet.write_string(1, 3, "red").unwrap();
    sheet.write_string(1, 4, "GAME").unwrap();
    sheet.write_string(2, 0, "BUSI2000").unwrap();
    sheet.write_string(2, 1, "Principles of Marketing").unwrap();
    sheet.write_number(2, 2, 3.0).unwrap();
    workbook.save(&path).unwrap();

    let catalog = load_catalog_xlsx(&path).expect("debe leer el xlsx");
    assert_eq!(catalog.len(), 2);
    assert_eq!(catalog[0].code, "GAME1001");
    assert_eq!(catalog[0].credits, 3.0);
    assert_eq!(catalog[0].color, ColorTag::Red);
    assert_eq!(catalog[0].discipline.as_deref(), Some("GAME"));
    assert_eq!(catalog[1].color, ColorTag::Gray);

    let same = load_catalog(&path).unwrap();
    assert_eq!(same, catalog);
}

#[test]
fn test_cargar_catalogo_json_y_buscar() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("catalog.json");
    std::fs::write(
        &path,
        r#"[
            {"id": "c1", "code": "GAME1001", "title": "Game Design I", "credits": 3, "color": "course-red", "discipline": "GAME"},
            {"id": "c2", "code": "GAME2001", "title": "Level Design", "credits": "3"},
            {"id": "c3", "code": "COMP1000", "title": "Programming Fundamentals", "credits": 4}
        ]"#,
    )
    .unwrap();

    let catalog = load_catalog_json(&path).unwrap();
    assert_eq!(catalog.len(), 3);

    let hits = search_catalog(&catalog, "GAME", 10);
    let codes: Vec<&str> = hits.iter().map(|c| c.code.as_str()).collect();
    assert_eq!(codes, vec!["GAME1001", "GAME2001"]);

    let hits = search_catalog(&catalog, "level desing", 10);
    assert_eq!(hits.first().map(|c| c.code.as_str()), Some("GAME2001"));
}

#[test]
fn test_formato_no_soportado() {
    assert!(load_catalog("catalog.csv").is_err());
}
