use std::sync::{Mutex, MutexGuard};

use actix_cors::Cors;
use actix_web::error::InternalError;
use actix_web::http::header;
use actix_web::{web, App, HttpResponse, HttpServer, Responder};
use serde_json::json;

use crate::algorithm::{group_curriculum, project_from_inputs};
use crate::api_json::{CatalogQuery, CatalogResponse, GroupsResponse, ProgramSummary, ProjectionResponse};
use crate::catalog::search_catalog;
use crate::config::Config;
use crate::error::PlannerError;
use crate::models::{Program, ProgramType};
use crate::render::export_program_pdf;
use crate::state::{reduce, Action, NewProgram, PlannerState};

pub type SharedState = web::Data<Mutex<PlannerState>>;

fn lock(data: &SharedState) -> Result<MutexGuard<'_, PlannerState>, HttpResponse> {
    data.lock().map_err(|e| {
        log::error!("estado bloqueado: {}", e);
        HttpResponse::InternalServerError().json(json!({"error": "planner state unavailable"}))
    })
}

fn not_found(id: &str) -> HttpResponse {
    HttpResponse::NotFound().json(json!({"error": PlannerError::ProgramNotFound(id.to_string()).to_string()}))
}

fn apply(guard: &mut MutexGuard<'_, PlannerState>, action: Action) {
    let current = std::mem::take(&mut **guard);
    **guard = reduce(current, action);
}

/// GET /programs
async fn list_programs_handler(data: SharedState) -> impl Responder {
    let state = match lock(&data) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let programs: Vec<ProgramSummary> = state.programs.iter().map(ProgramSummary::from).collect();
    HttpResponse::Ok().json(json!({"count": programs.len(), "programs": programs}))
}

/// POST /programs
/// Crea un programa desde el formulario (`name`, `type`, `faculty`, `lead`,
/// `description`, `parentId` opcional).
async fn create_program_handler(data: SharedState, body: web::Json<NewProgram>) -> impl Responder {
    let form = body.into_inner();
    let mut state = match lock(&data) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    if let Some(pid) = form.parent_id.as_deref() {
        if form.program_type.is_derived() && state.program(pid).is_none() {
            return HttpResponse::BadRequest().json(json!({"error": format!("parent program '{}' not found", pid)}));
        }
    }
    apply(&mut state, Action::CreateProgram { program: form });
    match state.programs.last() {
        Some(p) => HttpResponse::Created().json(p),
        None => HttpResponse::InternalServerError().json(json!({"error": "program was not created"})),
    }
}

/// GET /programs/{id}
async fn get_program_handler(data: SharedState, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let state = match lock(&data) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    match state.program(&id) {
        Some(p) => HttpResponse::Ok().json(p),
        None => not_found(&id),
    }
}

/// POST /actions
/// Cuerpo: una acción etiquetada (`{"type": "swapCourses", ...}`). Responde
/// con el programa afectado ya actualizado.
async fn action_handler(data: SharedState, body: web::Json<Action>) -> impl Responder {
    let action = body.into_inner();

    let target = action.program_id().map(str::to_string);
    let mut state = match lock(&data) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    if let Some(id) = target.as_deref() {
        if state.program(id).is_none() {
            return not_found(id);
        }
    }
    apply(&mut state, action);

    let program = match target.as_deref() {
        Some(id) => state.program(id),
        None => state.programs.last(),
    };
    match program {
        Some(p) => HttpResponse::Ok().json(p),
        None => HttpResponse::InternalServerError().json(json!({"error": "program missing after action"})),
    }
}

/// Copia el programa para soltar el lock antes de calcular.
fn snapshot(data: &SharedState, id: &str) -> Result<Program, HttpResponse> {
    let state = lock(data)?;
    state.program(id).cloned().ok_or_else(|| not_found(id))
}

/// GET /programs/{id}/groups
async fn groups_handler(data: SharedState, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let program = match snapshot(&data, &id) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    HttpResponse::Ok().json(GroupsResponse { program_id: &id, groups: group_curriculum(&program) })
}

/// GET /programs/{id}/projection
async fn projection_handler(data: SharedState, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let program = match snapshot(&data, &id) {
        Ok(p) => p,
        Err(resp) => return resp,
    };
    let info = program.info_or_default();
    HttpResponse::Ok().json(ProjectionResponse { program_id: &id, projection: project_from_inputs(info.enrolment()) })
}

/// GET /programs/{id}/export
/// Descarga el PDF de modificación curricular.
async fn export_handler(data: SharedState, path: web::Path<String>) -> impl Responder {
    let id = path.into_inner();
    let program = match lock(&data) {
        Ok(state) => state.program(&id).cloned(),
        Err(resp) => return resp,
    };

    let rendered = web::block(move || export_program_pdf(program.as_ref())).await;
    match rendered {
        Ok(Ok(doc)) => HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((header::CONTENT_DISPOSITION, format!("attachment; filename=\"{}\"", doc.filename)))
            .body(doc.bytes),
        Ok(Err(PlannerError::MissingProgram)) => not_found(&id),
        Ok(Err(e)) => {
            log::error!("exportación fallida para '{}': {}", id, e);
            HttpResponse::InternalServerError().json(json!({"error": e.to_string()}))
        }
        Err(e) => HttpResponse::InternalServerError().json(json!({"error": format!("export task failed: {}", e)})),
    }
}

/// GET /catalog?q=...&limit=...
async fn catalog_handler(data: SharedState, query: web::Query<CatalogQuery>) -> impl Responder {
    let state = match lock(&data) {
        Ok(s) => s,
        Err(resp) => return resp,
    };
    let courses = search_catalog(&state.catalog, &query.q, query.limit());
    HttpResponse::Ok().json(CatalogResponse { count: courses.len(), courses })
}

async fn help_handler() -> impl Responder {
    let example_program = NewProgram {
        name: "B.Sc. Game Development".to_string(),
        program_type: ProgramType::HonoursUndergraduateDegree,
        faculty: "Faculty of Business and IT".to_string(),
        lead: "Dr. Rivera".to_string(),
        description: String::new(),
        parent_id: None,
    };

    let help = json!({
        "description": "API del planificador curricular. Los cambios se envían como acciones a POST /actions; cada acción devuelve el programa actualizado.",
        "routes": [
            "GET /programs",
            "POST /programs",
            "GET /programs/{id}",
            "POST /actions",
            "GET /programs/{id}/groups",
            "GET /programs/{id}/projection",
            "GET /programs/{id}/export",
            "GET /catalog?q=&limit=",
            "GET /help"
        ],
        "post_programs_example": example_program,
        "action_examples": [
            {"type": "insertCatalogCourse", "programId": "<id>", "semesterId": "sem-1", "slot": 0, "catalogId": "cat-1"},
            {"type": "swapCourses", "programId": "<id>", "from": {"semesterId": "sem-1", "slot": 0}, "to": {"semesterId": "sem-2", "slot": 3}},
            {"type": "toggleCore", "programId": "<id>", "semesterId": "sem-1", "slot": 0},
            {"type": "setStatus", "programId": "<id>", "status": "In Review"}
        ]
    });

    HttpResponse::Ok().json(help)
}

/// Cuerpos JSON que no deserializan responden 400 con `{"error": ...}`.
fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| {
        let body = json!({"error": format!("invalid JSON body: {}", err)});
        InternalError::from_response(err, HttpResponse::BadRequest().json(body)).into()
    })
}

/// Registra todas las rutas. Se usa tanto en `run_server` como en los tests.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .route("/programs", web::get().to(list_programs_handler))
        .route("/programs", web::post().to(create_program_handler))
        .route("/programs/{id}", web::get().to(get_program_handler))
        .route("/programs/{id}/groups", web::get().to(groups_handler))
        .route("/programs/{id}/projection", web::get().to(projection_handler))
        .route("/programs/{id}/export", web::get().to(export_handler))
        .route("/actions", web::post().to(action_handler))
        .route("/catalog", web::get().to(catalog_handler))
        .route("/help", web::get().to(help_handler));
}

fn cors(allowed_origin: Option<&str>) -> Cors {
    match allowed_origin {
        Some(origin) => Cors::default().allowed_origin(origin).allow_any_method().allow_any_header(),
        None => Cors::permissive(),
    }
}

pub async fn run_server(config: Config, state: PlannerState) -> std::io::Result<()> {
    let data: SharedState = web::Data::new(Mutex::new(state));
    let origin = config.allowed_origin.clone();
    log::info!("escuchando en http://{}", config.bind);

    HttpServer::new(move || {
        App::new()
            .wrap(cors(origin.as_deref()))
            .app_data(data.clone())
            .configure(configure)
    })
    .bind(&config.bind)?
    .run()
    .await
}
