//! Helpers de serde para campos numéricos "sucios".
//!
//! El frontend envía números como number, como string ("3", "3,5") o vacíos.
//! En vez de rechazar el registro completo se sustituye por 0 (o por la cota
//! que corresponda): un reporte aproximado es preferible a un error.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Convierte un `Value` arbitrario a f64 finito; cualquier cosa ilegible -> 0.0
pub fn coerce_f64(v: &Value) -> f64 {
    let n = match v {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.trim().replace(',', ".").parse::<f64>().unwrap_or(0.0),
        Value::Bool(b) => {
            if *b {
                1.0
            } else {
                0.0
            }
        }
        _ => 0.0,
    };
    if n.is_finite() { n } else { 0.0 }
}

/// Sanitiza un f64 ya tipado (NaN / inf -> 0.0)
pub fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() { n } else { 0.0 }
}

pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(coerce_f64(&v))
}

/// Créditos y conteos: nunca negativos.
pub fn non_negative_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(f64_or_zero(deserializer)?.max(0.0))
}

/// Enteros con piso 1 (chooseCount, version).
pub fn u32_at_least_one<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let n = f64_or_zero(deserializer)?.round();
    Ok(if n < 1.0 { 1 } else if n > u32::MAX as f64 { u32::MAX } else { n as u32 })
}

/// Strings que pueden llegar como número o null.
pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(deserializer)?;
    Ok(match v {
        Value::String(s) => s,
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_coerce_f64_variantes() {
        assert_eq!(coerce_f64(&json!(3)), 3.0);
        assert_eq!(coerce_f64(&json!("4.5")), 4.5);
        assert_eq!(coerce_f64(&json!("3,5")), 3.5);
        assert_eq!(coerce_f64(&json!("abc")), 0.0);
        assert_eq!(coerce_f64(&json!(null)), 0.0);
        assert_eq!(coerce_f64(&json!([1, 2])), 0.0);
    }

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "non_negative_f64")]
        credits: f64,
        #[serde(default = "one", deserialize_with = "u32_at_least_one")]
        count: u32,
    }

    fn one() -> u32 {
        1
    }

    #[test]
    fn test_campos_lenient_en_struct() {
        let p: Sample = serde_json::from_str(r#"{"credits": "-3", "count": "0"}"#).unwrap();
        assert_eq!(p.credits, 0.0);
        assert_eq!(p.count, 1);

        let p: Sample = serde_json::from_str(r#"{}"#).unwrap();
        assert_eq!(p.credits, 0.0);
        assert_eq!(p.count, 1);

        let p: Sample = serde_json::from_str(r#"{"credits": 6, "count": 2.4}"#).unwrap();
        assert_eq!(p.credits, 6.0);
        assert_eq!(p.count, 2);
    }
}
