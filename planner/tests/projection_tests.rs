use curriculum_planner::algorithm::{project_enrolment_at, PROGRAM_YEARS, PROJECTION_YEARS};

#[test]
fn test_celdas_nulas_sobre_diagonal() {
    let inputs = [
        (0.0, 0.0, 0.0),
        (100.0, 0.0, 10.0),
        (250.0, 12.5, 33.0),
        (80.0, -100.0, 100.0),
        (1.0, 400.0, 0.0),
    ];
    for (intake, growth, loss) in inputs {
        let p = project_enrolment_at("2025/26", intake, growth, loss, 2000);
        for r in 0..PROGRAM_YEARS {
            for c in 0..PROJECTION_YEARS {
                if r > c {
                    assert!(p.rows[r][c].is_none(), "({}, {}) debería ser null", r, c);
                } else {
                    assert!(p.rows[r][c].is_some(), "({}, {}) debería tener valor", r, c);
                }
            }
        }
    }
}

#[test]
fn test_totales_suman_columnas() {
    let p = project_enrolment_at("2024", 137.0, 7.5, 12.0, 2000);
    for c in 0..PROJECTION_YEARS {
        let sum: u64 = (0..PROGRAM_YEARS).filter_map(|r| p.rows[r][c]).sum();
        assert_eq!(p.totals[c], sum, "columna {}", c);
    }
}

#[test]
fn test_ejemplo_cien_alumnos_diez_por_ciento() {
    let p = project_enrolment_at("2025/26", 100.0, 0.0, 10.0, 2000);
    let row0: Vec<u64> = p.rows[0].iter().map(|c| c.unwrap()).collect();
    assert_eq!(row0, vec![100; 6]);
    assert_eq!(p.rows[1][1], Some(90));
    assert_eq!(p.rows[1][2], Some(90));
    assert_eq!(p.rows[2][2], Some(81));
    assert_eq!(p.totals[0], 100);
    assert_eq!(p.totals[1], 190);
}

#[test]
fn test_etiquetas_anio_academico() {
    let p = project_enrolment_at("2025/26", 100.0, 0.0, 10.0, 1999);
    assert_eq!(
        p.year_labels.to_vec(),
        vec!["2025/26", "2026/27", "2027/28", "2028/29", "2029/30", "2030/31"]
    );
}

#[test]
fn test_anio_invalido_usa_fallback() {
    let p = project_enrolment_at("sometime soon", 10.0, 0.0, 0.0, 2031);
    assert_eq!(p.year_labels[0], "2031/32");
}

fn diagonal_inferior(p: &curriculum_planner::algorithm::EnrolmentProjection) -> Vec<u64> {
    let mut values = Vec::new();
    for r in 0..PROGRAM_YEARS {
        for c in r..PROJECTION_YEARS {
            values.push(p.rows[r][c].unwrap());
        }
    }
    values
}

#[test]
fn test_matricula_negativa_se_trata_como_cero() {
    let p = project_enrolment_at("2025/26", -50.0, 0.0, 0.0, 2000);
    assert!(diagonal_inferior(&p).iter().all(|&v| v == 0));
    assert_eq!(p.totals, [0; PROJECTION_YEARS]);
}

#[test]
fn test_perdida_retencion_acotada() {
    // sobre 100: sólo sobrevive el primer año
    let p = project_enrolment_at("2025/26", 100.0, 0.0, 150.0, 2000);
    assert_eq!(p.rows[0], [Some(100); PROJECTION_YEARS]);
    for r in 1..PROGRAM_YEARS {
        for c in r..PROJECTION_YEARS {
            assert_eq!(p.rows[r][c], Some(0), "({}, {})", r, c);
        }
    }
    assert_eq!(p.totals, [100; PROJECTION_YEARS]);

    // bajo 0: sin pérdida
    let p = project_enrolment_at("2025/26", 100.0, 0.0, -20.0, 2000);
    assert!(diagonal_inferior(&p).iter().all(|&v| v == 100));
    assert_eq!(p.totals, [100, 200, 300, 400, 500, 500]);
}

#[test]
fn test_valores_no_finitos_como_cero() {
    let p = project_enrolment_at("2025/26", f64::NAN, f64::INFINITY, 10.0, 2000);
    assert!(diagonal_inferior(&p).iter().all(|&v| v == 0));

    // crecimiento infinito -> 0 %, la pérdida sigue aplicando
    let p = project_enrolment_at("2025/26", 100.0, f64::INFINITY, f64::NAN, 2000);
    assert!(diagonal_inferior(&p).iter().all(|&v| v == 100));

    let p = project_enrolment_at("2025/26", 100.0, f64::NEG_INFINITY, 10.0, 2000);
    assert_eq!(p.rows[0][5], Some(100));
    assert_eq!(p.rows[1][1], Some(90));
    assert_eq!(p.rows[2][2], Some(81));
}

#[test]
fn test_matricula_enorme_satura_totales() {
    let p = project_enrolment_at("2025/26", 1e19, 400.0, 0.0, 2000);
    for c in 0..PROJECTION_YEARS {
        let sum = (0..PROGRAM_YEARS)
            .filter_map(|r| p.rows[r][c])
            .fold(0u64, |acc, v| acc.saturating_add(v));
        assert_eq!(p.totals[c], sum, "columna {}", c);
    }
    assert_eq!(p.totals[PROJECTION_YEARS - 1], u64::MAX);
}
