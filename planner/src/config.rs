// Configuración desde variables de entorno (con .env opcional)

use std::env;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:8080";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Dirección donde escucha el servidor HTTP
    pub bind: String,
    /// Catálogo de cursos a cargar al iniciar (.xlsx, .xls, .ods o .json)
    pub catalog_path: Option<PathBuf>,
    /// Origen permitido para CORS; sin valor se permite cualquiera
    pub allowed_origin: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config { bind: DEFAULT_BIND.to_string(), catalog_path: None, allowed_origin: None }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

impl Config {
    /// Lee `PLANNER_BIND`, `PLANNER_CATALOG` y `PLANNER_ALLOWED_ORIGIN`.
    pub fn from_env() -> Self {
        let _ = dotenv::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Config {
            bind: non_empty(lookup("PLANNER_BIND")).unwrap_or_else(|| DEFAULT_BIND.to_string()),
            catalog_path: non_empty(lookup("PLANNER_CATALOG")).map(PathBuf::from),
            allowed_origin: non_empty(lookup("PLANNER_ALLOWED_ORIGIN")),
        }
    }
}
