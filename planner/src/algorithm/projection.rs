//! Proyección de matrícula por cohorte.
//!
//! Fila `r` = año de programa (0 = primer año), columna `c` = año académico.
//! La celda (r, c) es la cohorte que ingresó `c - r` años después del año
//! inicial, crecida por la tasa de ingreso y reducida por la pérdida de
//! retención durante `r` años. Las celdas con `r > c` quedan en `None`
//! (la cohorte todavía no existe), que no es lo mismo que una cohorte de 0.

use std::sync::LazyLock;

use chrono::Datelike;
use regex::Regex;
use serde::Serialize;

use crate::models::lenient::finite_or_zero;
use crate::models::EnrolmentInputs;

/// Años de programa (filas)
pub const PROGRAM_YEARS: usize = 5;
/// Años académicos proyectados (columnas)
pub const PROJECTION_YEARS: usize = 6;

static ACADEMIC_YEAR: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*(\d{4})(?:\s*[/-]\s*(?:\d{2}|\d{4}))?\s*$").expect("academic year regex")
});

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrolmentProjection {
    pub year_labels: [String; PROJECTION_YEARS],
    pub rows: [[Option<u64>; PROJECTION_YEARS]; PROGRAM_YEARS],
    pub totals: [u64; PROJECTION_YEARS],
}

/// Extrae el año inicial de una etiqueta "YYYY/YY".
pub fn parse_starting_year(label: &str) -> Option<i32> {
    let caps = ACADEMIC_YEAR.captures(label)?;
    caps.get(1)?.as_str().parse::<i32>().ok()
}

/// 2025 -> "2025/26"
pub fn academic_year_label(year: i32) -> String {
    format!("{}/{:02}", year, (year + 1).rem_euclid(100))
}

pub fn academic_year_labels(start_year: i32) -> [String; PROJECTION_YEARS] {
    std::array::from_fn(|i| academic_year_label(start_year + i as i32))
}

/// Calcula la matriz usando el año calendario actual como fallback cuando
/// la etiqueta no se puede interpretar.
pub fn project_enrolment(
    starting_year: &str,
    first_year_intake: f64,
    intake_growth_pct: f64,
    retention_loss_pct: f64,
) -> EnrolmentProjection {
    let current_year = chrono::Local::now().year();
    project_enrolment_at(starting_year, first_year_intake, intake_growth_pct, retention_loss_pct, current_year)
}

pub fn project_from_inputs(inputs: &EnrolmentInputs) -> EnrolmentProjection {
    project_enrolment(
        &inputs.starting_year,
        inputs.first_year_intake,
        inputs.intake_growth_pct,
        inputs.retention_loss_pct,
    )
}

/// Igual que `project_enrolment` pero con el año de fallback explícito.
/// Celdas y totales saturan en `u64::MAX`.
pub fn project_enrolment_at(
    starting_year: &str,
    first_year_intake: f64,
    intake_growth_pct: f64,
    retention_loss_pct: f64,
    fallback_year: i32,
) -> EnrolmentProjection {
    let intake = finite_or_zero(first_year_intake).max(0.0);
    let growth = finite_or_zero(intake_growth_pct).max(-100.0);
    let loss = finite_or_zero(retention_loss_pct).clamp(0.0, 100.0);

    let start = parse_starting_year(starting_year).unwrap_or(fallback_year);

    let growth_factor = 1.0 + growth / 100.0;
    let retention_factor = 1.0 - loss / 100.0;

    let mut rows = [[None; PROJECTION_YEARS]; PROGRAM_YEARS];
    let mut totals = [0u64; PROJECTION_YEARS];

    for (r, row) in rows.iter_mut().enumerate() {
        for (c, cell) in row.iter_mut().enumerate() {
            if r > c {
                continue;
            }
            let cohort_offset = (c - r) as i32;
            let cohort_intake = intake * growth_factor.powi(cohort_offset);
            let projected = cohort_intake * retention_factor.powi(r as i32);
            let value = finite_or_zero(projected.round()).max(0.0) as u64;
            *cell = Some(value);
            totals[c] = totals[c].saturating_add(value);
        }
    }

    EnrolmentProjection { year_labels: academic_year_labels(start), rows, totals }
}
