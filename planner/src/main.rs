// --- Planificador curricular - Archivo principal ---

use curriculum_planner::catalog::load_catalog;
use curriculum_planner::config::Config;
use curriculum_planner::run_server;
use curriculum_planner::state::PlannerState;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("=== Planificador curricular (API) ===");

    let config = Config::from_env();
    let catalog = match &config.catalog_path {
        Some(path) => match load_catalog(path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("no se pudo leer el catálogo {:?}: {}; se inicia vacío", path, e);
                Vec::new()
            }
        },
        None => Vec::new(),
    };

    run_server(config, PlannerState::with_catalog(catalog)).await
}
