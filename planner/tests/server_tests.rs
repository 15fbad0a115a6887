use std::sync::Mutex;

use actix_web::http::{header, StatusCode};
use actix_web::{test, web, App};
use serde_json::{json, Value};

use curriculum_planner::models::{CatalogCourse, ColorTag};
use curriculum_planner::server::configure;
use curriculum_planner::state::PlannerState;

fn shared_state() -> web::Data<Mutex<PlannerState>> {
    let catalog = vec![CatalogCourse {
        id: "cat-1".to_string(),
        code: "GAME1001".to_string(),
        title: "Game Design I".to_string(),
        credits: 3.0,
        color: ColorTag::Red,
        discipline: Some("GAME".to_string()),
    }];
    web::Data::new(Mutex::new(PlannerState::with_catalog(catalog)))
}

#[actix_web::test]
async fn test_flujo_crear_editar_exportar() {
    let data = shared_state();
    let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/programs")
        .set_json(json!({"name": "B.Sc. Game Dev", "type": "Undergraduate Degree", "faculty": "Business and IT"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let program: Value = test::read_body_json(resp).await;
    let id = program["id"].as_str().unwrap().to_string();
    assert_eq!(program["semesters"].as_array().unwrap().len(), 8);

    let req = test::TestRequest::post()
        .uri("/actions")
        .set_json(json!({"type": "insertCatalogCourse", "programId": id, "semesterId": "sem-1", "slot": 0, "catalogId": "cat-1"}))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let program: Value = test::read_body_json(resp).await;
    assert_eq!(program["semesters"][0]["courses"][0]["code"], "GAME1001");

    let req = test::TestRequest::get().uri(&format!("/programs/{}/groups", id)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["groups"]["electives"][0]["label"], "GAME Elective");

    let req = test::TestRequest::get().uri(&format!("/programs/{}/export", id)).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp.headers().get(header::CONTENT_DISPOSITION).unwrap().to_str().unwrap().to_string();
    assert!(disposition.contains("B_Sc_Game_Dev_major_curriculum_modification_v1.pdf"));
    let bytes = test::read_body(resp).await;
    assert!(bytes.starts_with(b"%PDF"));
}

#[actix_web::test]
async fn test_programa_inexistente_404() {
    let app = test::init_service(App::new().app_data(shared_state()).configure(configure)).await;

    let req = test::TestRequest::get().uri("/programs/nope").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::get().uri("/programs/nope/export").to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);

    let req = test::TestRequest::post()
        .uri("/actions")
        .set_json(json!({"type": "removeCourse", "programId": "nope", "semesterId": "sem-1", "slot": 0}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn test_accion_invalida_400() {
    let app = test::init_service(App::new().app_data(shared_state()).configure(configure)).await;
    let req = test::TestRequest::post().uri("/actions").set_json(json!({"type": "explode"})).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["error"].as_str().unwrap().starts_with("invalid JSON body"));

    // campo obligatorio ausente (sin `slot`)
    let req = test::TestRequest::post()
        .uri("/actions")
        .set_json(json!({"type": "removeCourse", "programId": "p1", "semesterId": "sem-1"}))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn test_proyeccion_y_catalogo() {
    let data = shared_state();
    let app = test::init_service(App::new().app_data(data.clone()).configure(configure)).await;

    let req = test::TestRequest::post()
        .uri("/programs")
        .set_json(json!({"name": "Robotics", "type": "Honours Undergraduate Degree"}))
        .to_request();
    let program: Value = test::call_and_read_body_json(&app, req).await;
    let id = program["id"].as_str().unwrap().to_string();

    let req = test::TestRequest::post()
        .uri("/actions")
        .set_json(json!({
            "type": "updateInfo",
            "programId": id,
            "info": {"enrolment": {"startingYear": "2025/26", "firstYearIntake": 100, "retentionLossPct": 10}}
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get().uri(&format!("/programs/{}/projection", id)).to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["projection"]["yearLabels"][0], "2025/26");
    assert_eq!(body["projection"]["rows"][1][1], 90);
    assert!(body["projection"]["rows"][1][0].is_null());

    let req = test::TestRequest::get().uri("/catalog?q=game").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 1);
    assert_eq!(body["courses"][0]["code"], "GAME1001");

    let req = test::TestRequest::get().uri("/programs").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["count"], 1);
}

#[actix_web::test]
async fn test_help() {
    let app = test::init_service(App::new().configure(configure)).await;
    let req = test::TestRequest::get().uri("/help").to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert!(body["routes"].as_array().unwrap().len() >= 9);
}
