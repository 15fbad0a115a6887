// Biblioteca raíz del crate `curriculum_planner`.
// Modelo de programas y mallas, cálculos de proyección y agrupación,
// mutaciones inmutables del estado, exportación PDF y servidor HTTP.
pub mod algorithm;
pub mod api_json;
pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod server;
pub mod state;

pub use error::{PlannerError, Result};

/// Ejecuta el servidor HTTP (reexport para facilitar uso desde `main`)
pub use server::run_server;
