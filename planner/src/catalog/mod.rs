//! Catálogo global de cursos.
//!
//! Se carga al iniciar desde un Excel (primera hoja, fila de encabezados con
//! columnas código / título / créditos / color / disciplina) o desde un JSON
//! con la misma forma que `CatalogCourse`.

pub mod io;

use std::error::Error;
use std::path::Path;

use calamine::{open_workbook_auto, Data, Reader};

use crate::models::lenient::coerce_f64;
use crate::models::{CatalogCourse, ColorTag};

pub use io::normalize_name;

/// Similaridad mínima (Jaro-Winkler) para considerar que un título coincide
pub const TITLE_SIMILARITY_THRESHOLD: f64 = 0.75;

#[derive(Debug, Default)]
struct HeaderMap {
    code: Option<usize>,
    title: Option<usize>,
    credits: Option<usize>,
    color: Option<usize>,
    discipline: Option<usize>,
    id: Option<usize>,
}

fn detect_headers(headers: &[String]) -> HeaderMap {
    let mut map = HeaderMap::default();
    for (i, raw) in headers.iter().enumerate() {
        let h = io::normalize_header(raw);
        match h.as_str() {
            "id" => map.id = Some(i),
            "code" | "coursecode" | "codigo" => map.code = Some(i),
            "title" | "name" | "coursename" | "coursetitle" | "nombre" => map.title = Some(i),
            "credits" | "credit" | "creditos" => map.credits = Some(i),
            "color" | "colour" => map.color = Some(i),
            "discipline" | "disciplina" | "area" => map.discipline = Some(i),
            _ => {}
        }
    }
    map
}

fn row_value(row: &[String], idx: Option<usize>) -> String {
    idx.and_then(|i| row.get(i)).cloned().unwrap_or_default()
}

/// Construye el catálogo a partir de filas ya convertidas a texto. La primera
/// fila es el encabezado; las filas sin código se ignoran.
pub fn catalog_from_rows(rows: &[Vec<String>]) -> Result<Vec<CatalogCourse>, Box<dyn Error>> {
    let Some(header) = rows.first() else {
        return Ok(Vec::new());
    };
    let cols = detect_headers(header);
    if cols.code.is_none() || cols.title.is_none() {
        return Err("catalog sheet needs 'code' and 'title' columns".into());
    }

    let mut out = Vec::new();
    for (i, row) in rows.iter().enumerate().skip(1) {
        let code = row_value(row, cols.code).trim().to_string();
        if code.is_empty() {
            continue;
        }
        let id = row_value(row, cols.id);
        let credits = coerce_f64(&serde_json::Value::String(row_value(row, cols.credits))).max(0.0);
        let discipline = row_value(row, cols.discipline).trim().to_string();
        out.push(CatalogCourse {
            id: if id.trim().is_empty() { format!("cat-{}", i) } else { id.trim().to_string() },
            code,
            title: row_value(row, cols.title).trim().to_string(),
            credits,
            color: ColorTag::parse(&row_value(row, cols.color)),
            discipline: if discipline.is_empty() { None } else { Some(discipline) },
        });
    }
    Ok(out)
}

/// Lee el catálogo desde la primera hoja de un libro Excel.
pub fn load_catalog_xlsx<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogCourse>, Box<dyn Error>> {
    let mut workbook = open_workbook_auto(path)?;
    let sheet_names = workbook.sheet_names().to_owned();
    let Some(first) = sheet_names.first() else {
        return Err("No se encontraron hojas en el archivo Excel".into());
    };
    let range = workbook.worksheet_range(first)?;
    let rows: Vec<Vec<String>> = range
        .rows()
        .map(|r: &[Data]| r.iter().map(io::cell_to_string).collect())
        .collect();
    catalog_from_rows(&rows)
}

pub fn load_catalog_json<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogCourse>, Box<dyn Error>> {
    let text = std::fs::read_to_string(path)?;
    let courses: Vec<CatalogCourse> = serde_json::from_str(&text)?;
    Ok(courses)
}

/// Elige el lector según la extensión del archivo.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<CatalogCourse>, Box<dyn Error>> {
    let path = path.as_ref();
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_lowercase)
        .unwrap_or_default();
    let catalog = match ext.as_str() {
        "json" => load_catalog_json(path)?,
        "xlsx" | "xls" | "xlsm" | "ods" => load_catalog_xlsx(path)?,
        other => return Err(format!("unsupported catalog format '{}'", other).into()),
    };
    log::info!("catálogo cargado desde {:?}: {} cursos", path, catalog.len());
    Ok(catalog)
}

/// Busca cursos por código exacto (sin importar mayúsculas) o por título
/// parecido. Resultados: primero coincidencias de código, luego por
/// similaridad descendente.
pub fn search_catalog<'a>(catalog: &'a [CatalogCourse], query: &str, limit: usize) -> Vec<&'a CatalogCourse> {
    let q = query.trim();
    if q.is_empty() {
        return catalog.iter().take(limit).collect();
    }
    let q_norm = normalize_name(q);

    let mut scored: Vec<(f64, &CatalogCourse)> = catalog
        .iter()
        .filter_map(|c| {
            if c.code.eq_ignore_ascii_case(q) {
                return Some((2.0, c));
            }
            if c.code.to_lowercase().starts_with(&q.to_lowercase()) {
                return Some((1.5, c));
            }
            let title = normalize_name(&c.title);
            if !q_norm.is_empty() && title.contains(&q_norm) {
                return Some((1.0 + 0.1 * strsim::jaro_winkler(&title, &q_norm), c));
            }
            let sim = strsim::jaro_winkler(&title, &q_norm);
            (sim >= TITLE_SIMILARITY_THRESHOLD).then_some((sim, c))
        })
        .collect();

    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal).then(a.1.code.cmp(&b.1.code)));
    scored.into_iter().take(limit).map(|(_, c)| c).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows() -> Vec<Vec<String>> {
        let s = |v: &[&str]| v.iter().map(|x| x.to_string()).collect::<Vec<_>>();
        vec![
            s(&["Course Code", "Title", "Credits", "Colour", "Discipline"]),
            s(&["GAME1001", "Game Design I", "3", "red", "GAME"]),
            s(&["", "sin código", "3", "", ""]),
            s(&["BUSI2000", "Marketing", "3,5", "course-orange", ""]),
        ]
    }

    #[test]
    fn test_catalog_from_rows() {
        let cat = catalog_from_rows(&rows()).unwrap();
        assert_eq!(cat.len(), 2);
        assert_eq!(cat[0].discipline.as_deref(), Some("GAME"));
        assert_eq!(cat[0].color, ColorTag::Red);
        assert_eq!(cat[1].credits, 3.5);
        assert_eq!(cat[1].color, ColorTag::Orange);
        assert!(cat[1].discipline.is_none());
    }

    #[test]
    fn test_catalog_sin_columnas_requeridas() {
        let bad = vec![vec!["foo".to_string(), "bar".to_string()]];
        assert!(catalog_from_rows(&bad).is_err());
    }

    #[test]
    fn test_search_codigo_y_titulo() {
        let cat = catalog_from_rows(&rows()).unwrap();
        let hits = search_catalog(&cat, "game1001", 5);
        assert_eq!(hits[0].code, "GAME1001");
        let hits = search_catalog(&cat, "marketing", 5);
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].code, "BUSI2000");
        assert!(search_catalog(&cat, "quantum chromodynamics", 5).is_empty());
    }
}
