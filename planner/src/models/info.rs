//! Cuestionario del programa (`ProgramInfo`).
//!
//! Los registros guardados por el navegador pueden ser parciales o de una
//! versión anterior del esquema. `normalize_program_info` los funde campo a
//! campo sobre los defaults tipados de la variante que corresponde al tipo
//! de programa: base (`Base`) o derivado (`Derived`, Minor / Specialization).

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::lenient::{f64_or_zero, non_negative_f64, string_or_empty, u32_at_least_one};
use super::program::ProgramType;

/// Versión actual del esquema. v1 guardaba los datos de matrícula planos
/// en la raíz del registro (`startingYear`, `firstYearIntake`, ...).
pub const PROGRAM_INFO_SCHEMA_VERSION: u32 = 2;

/// Parámetros de la proyección de matrícula.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnrolmentInputs {
    #[serde(deserialize_with = "string_or_empty")]
    pub starting_year: String,
    #[serde(deserialize_with = "non_negative_f64")]
    pub first_year_intake: f64,
    #[serde(deserialize_with = "f64_or_zero")]
    pub intake_growth_pct: f64,
    #[serde(deserialize_with = "f64_or_zero")]
    pub retention_loss_pct: f64,
}

impl Default for EnrolmentInputs {
    fn default() -> Self {
        EnrolmentInputs {
            starting_year: String::new(),
            first_year_intake: 0.0,
            intake_growth_pct: 0.0,
            retention_loss_pct: 0.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct BaseProgramInfo {
    pub schema_version: u32,
    #[serde(deserialize_with = "u32_at_least_one")]
    pub version: u32,
    #[serde(deserialize_with = "string_or_empty")]
    pub rationale: String,
    pub learning_outcomes: Vec<String>,
    #[serde(deserialize_with = "string_or_empty")]
    pub admission_requirements: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub delivery_mode: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub resources: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub consultation: String,
    pub enrolment: EnrolmentInputs,
}

impl Default for BaseProgramInfo {
    fn default() -> Self {
        BaseProgramInfo {
            schema_version: PROGRAM_INFO_SCHEMA_VERSION,
            version: 1,
            rationale: String::new(),
            learning_outcomes: Vec::new(),
            admission_requirements: String::new(),
            delivery_mode: "In person".to_string(),
            resources: String::new(),
            consultation: String::new(),
            enrolment: EnrolmentInputs::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DerivedProgramInfo {
    pub schema_version: u32,
    #[serde(deserialize_with = "u32_at_least_one")]
    pub version: u32,
    #[serde(deserialize_with = "string_or_empty")]
    pub modification_summary: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub rationale: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub student_impact: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub transition_plan: String,
    #[serde(deserialize_with = "string_or_empty")]
    pub consultation: String,
    pub enrolment: EnrolmentInputs,
}

impl Default for DerivedProgramInfo {
    fn default() -> Self {
        DerivedProgramInfo {
            schema_version: PROGRAM_INFO_SCHEMA_VERSION,
            version: 1,
            modification_summary: String::new(),
            rationale: String::new(),
            student_impact: String::new(),
            transition_plan: String::new(),
            consultation: String::new(),
            enrolment: EnrolmentInputs::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "camelCase")]
pub enum ProgramInfo {
    Base(BaseProgramInfo),
    Derived(DerivedProgramInfo),
}

impl ProgramInfo {
    pub fn defaults_for(program_type: ProgramType) -> Self {
        if program_type.is_derived() {
            ProgramInfo::Derived(DerivedProgramInfo::default())
        } else {
            ProgramInfo::Base(BaseProgramInfo::default())
        }
    }

    pub fn version(&self) -> u32 {
        match self {
            ProgramInfo::Base(b) => b.version,
            ProgramInfo::Derived(d) => d.version,
        }
    }

    pub fn enrolment(&self) -> &EnrolmentInputs {
        match self {
            ProgramInfo::Base(b) => &b.enrolment,
            ProgramInfo::Derived(d) => &d.enrolment,
        }
    }
}

/// Claves v1 que vivían en la raíz y ahora están dentro de `enrolment`.
const V1_ENROLMENT_KEYS: [(&str, &str); 4] = [
    ("startingYear", "startingYear"),
    ("firstYearIntake", "firstYearIntake"),
    ("intakeGrowth", "intakeGrowthPct"),
    ("retentionLoss", "retentionLossPct"),
];

fn migrate_v1(map: &mut Map<String, Value>) {
    let mut enrolment = match map.remove("enrolment") {
        Some(Value::Object(m)) => m,
        _ => Map::new(),
    };
    for (old, new) in V1_ENROLMENT_KEYS {
        if let Some(v) = map.remove(old) {
            enrolment.entry(new.to_string()).or_insert(v);
        }
    }
    if !enrolment.is_empty() {
        map.insert("enrolment".to_string(), Value::Object(enrolment));
    }
}

/// Funde `partial` sobre `T::default()`. Un campo que no deserializa (tipo
/// incorrecto) conserva el default en vez de invalidar el registro completo.
fn merge_over_defaults<T>(partial: &Map<String, Value>) -> T
where
    T: Serialize + DeserializeOwned + Default,
{
    let defaults = T::default();
    let mut merged = match serde_json::to_value(&defaults) {
        Ok(Value::Object(m)) => m,
        _ => return defaults,
    };

    for (key, value) in partial {
        if !merged.contains_key(key) {
            continue;
        }
        let previous = merged.insert(key.clone(), value.clone());
        if serde_json::from_value::<T>(Value::Object(merged.clone())).is_err() {
            log::debug!("program info: descartando campo '{}' con valor inválido", key);
            if let Some(prev) = previous {
                merged.insert(key.clone(), prev);
            }
        }
    }

    serde_json::from_value(Value::Object(merged)).unwrap_or(defaults)
}

/// Normaliza un registro parcial (o ausente) a un `ProgramInfo` completo.
/// La variante la decide el tipo de programa, no el campo `mode` guardado.
pub fn normalize_program_info(partial: Option<&Value>, program_type: ProgramType) -> ProgramInfo {
    let mut map = match partial {
        Some(Value::Object(m)) => m.clone(),
        _ => Map::new(),
    };
    map.remove("mode");

    let stored_version = map
        .get("schemaVersion")
        .and_then(Value::as_u64)
        .unwrap_or(1);
    if stored_version < 2 {
        migrate_v1(&mut map);
    }

    if program_type.is_derived() {
        let mut info: DerivedProgramInfo = merge_over_defaults(&map);
        info.schema_version = PROGRAM_INFO_SCHEMA_VERSION;
        info.version = info.version.max(1);
        ProgramInfo::Derived(info)
    } else {
        let mut info: BaseProgramInfo = merge_over_defaults(&map);
        info.schema_version = PROGRAM_INFO_SCHEMA_VERSION;
        info.version = info.version.max(1);
        ProgramInfo::Base(info)
    }
}
