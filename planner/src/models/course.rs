// Cursos, colores y filas de slots (semestres / bloques de especialización)

use std::sync::LazyLock;

use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize};

use super::lenient::{non_negative_f64, string_or_empty, u32_at_least_one};

/// Cada semestre / bloque tiene exactamente 6 posiciones.
pub const SLOTS_PER_ROW: usize = 6;

pub type SlotArray = [Option<Course>; SLOTS_PER_ROW];

static ELECTIVE_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\belectives?\b").expect("elective regex"));

/// Color semántico de un curso. Se resuelve a RGB (PDF) o a clase CSS
/// (navegador) sólo en el borde de cada presentación.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ColorTag {
    Blue,
    Green,
    Orange,
    Purple,
    Red,
    Teal,
    Yellow,
    Pink,
    #[default]
    Gray,
}

impl ColorTag {
    pub const ALL: [ColorTag; 9] = [
        ColorTag::Blue,
        ColorTag::Green,
        ColorTag::Orange,
        ColorTag::Purple,
        ColorTag::Red,
        ColorTag::Teal,
        ColorTag::Yellow,
        ColorTag::Pink,
        ColorTag::Gray,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ColorTag::Blue => "blue",
            ColorTag::Green => "green",
            ColorTag::Orange => "orange",
            ColorTag::Purple => "purple",
            ColorTag::Red => "red",
            ColorTag::Teal => "teal",
            ColorTag::Yellow => "yellow",
            ColorTag::Pink => "pink",
            ColorTag::Gray => "gray",
        }
    }

    /// Acepta el nombre del color o una clase CSS que lo contenga
    /// (p. ej. `course-blue`, `bg-teal-200`). Desconocido -> gris.
    pub fn parse(s: &str) -> ColorTag {
        let lower = s.trim().to_lowercase();
        if lower == "grey" || lower.contains("grey") {
            return ColorTag::Gray;
        }
        ColorTag::ALL
            .iter()
            .copied()
            .find(|c| lower == c.name() || lower.contains(c.name()))
            .unwrap_or_default()
    }

    /// Relleno claro usado en los diagramas del PDF.
    pub fn rgb(self) -> (u8, u8, u8) {
        match self {
            ColorTag::Blue => (191, 219, 254),
            ColorTag::Green => (187, 247, 208),
            ColorTag::Orange => (254, 215, 170),
            ColorTag::Purple => (221, 214, 254),
            ColorTag::Red => (254, 202, 202),
            ColorTag::Teal => (153, 246, 228),
            ColorTag::Yellow => (254, 240, 138),
            ColorTag::Pink => (251, 207, 232),
            ColorTag::Gray => (229, 231, 235),
        }
    }

    pub fn css_class(self) -> String {
        format!("course-{}", self.name())
    }
}

impl From<String> for ColorTag {
    fn from(s: String) -> Self {
        ColorTag::parse(&s)
    }
}

impl From<ColorTag> for String {
    fn from(c: ColorTag) -> Self {
        c.name().to_string()
    }
}

/// Tipo de placeholder (entrada de la malla que no es un curso de catálogo)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlaceholderKind {
    Specialization,
    BusinessElective,
    GameElective,
    OpenElective,
    GeneralElective,
    /// Placeholder con título propio, p. ej. "Humanities Elective"
    Titled(String),
}

/// Clasificación de un curso, decidida una sola vez al crearlo.
///
/// Prioridad: placeholder de especialización (o código `SPEC`), disciplina
/// explícita, códigos reservados, título con la palabra "elective", core.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CourseKind {
    Core,
    Catalog { discipline: String },
    Placeholder(PlaceholderKind),
}

impl CourseKind {
    pub fn classify(code: &str, title: &str, discipline: Option<&str>, spec_flag: bool) -> Self {
        let code_upper = code.trim().to_ascii_uppercase();
        if spec_flag || code_upper == "SPEC" {
            return CourseKind::Placeholder(PlaceholderKind::Specialization);
        }
        if let Some(d) = discipline.map(str::trim).filter(|d| !d.is_empty()) {
            return CourseKind::Catalog { discipline: d.to_string() };
        }
        match code_upper.as_str() {
            "BUSI-ELEC" => return CourseKind::Placeholder(PlaceholderKind::BusinessElective),
            "GAME-ELEC" => return CourseKind::Placeholder(PlaceholderKind::GameElective),
            "OPEN" => return CourseKind::Placeholder(PlaceholderKind::OpenElective),
            "ELEC" => return CourseKind::Placeholder(PlaceholderKind::GeneralElective),
            _ => {}
        }
        if ELECTIVE_WORD.is_match(title) {
            return CourseKind::Placeholder(PlaceholderKind::Titled(title.trim().to_string()));
        }
        CourseKind::Core
    }

    pub fn is_specialization(&self) -> bool {
        matches!(self, CourseKind::Placeholder(PlaceholderKind::Specialization))
    }

    /// Categoría de electivo, o `None` para core y placeholders SPEC.
    pub fn elective_category(&self) -> Option<String> {
        match self {
            CourseKind::Core => None,
            CourseKind::Catalog { discipline } => Some(format!("{} Elective", discipline)),
            CourseKind::Placeholder(p) => match p {
                PlaceholderKind::Specialization => None,
                PlaceholderKind::BusinessElective => Some("BUSI Elective".to_string()),
                PlaceholderKind::GameElective => Some("GAME Elective".to_string()),
                PlaceholderKind::OpenElective => Some("Open Elective".to_string()),
                PlaceholderKind::GeneralElective => Some("General Elective".to_string()),
                PlaceholderKind::Titled(t) => Some(t.clone()),
            },
        }
    }
}

/// Forma JSON de un curso tal como la envía el navegador.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CourseRecord {
    #[serde(default, deserialize_with = "string_or_empty")]
    code: String,
    #[serde(default, deserialize_with = "string_or_empty")]
    title: String,
    #[serde(default, deserialize_with = "non_negative_f64")]
    credits: f64,
    #[serde(default)]
    color: ColorTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    discipline: Option<String>,
    #[serde(default)]
    is_core: bool,
    #[serde(default)]
    is_new_course: bool,
    #[serde(default)]
    is_specialization_placeholder: bool,
}

/// Curso ubicado en un slot de la malla.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "CourseRecord", into = "CourseRecord")]
pub struct Course {
    code: String,
    title: String,
    credits: f64,
    color: ColorTag,
    discipline: Option<String>,
    is_core: bool,
    is_new_course: bool,
    is_specialization_placeholder: bool,
    kind: CourseKind,
}

impl From<CourseRecord> for Course {
    fn from(r: CourseRecord) -> Self {
        let discipline = r.discipline.map(|d| d.trim().to_string()).filter(|d| !d.is_empty());
        let kind = CourseKind::classify(&r.code, &r.title, discipline.as_deref(), r.is_specialization_placeholder);
        Course {
            code: r.code.trim().to_string(),
            title: r.title.trim().to_string(),
            credits: r.credits,
            color: r.color,
            discipline,
            is_core: r.is_core,
            is_new_course: r.is_new_course,
            is_specialization_placeholder: r.is_specialization_placeholder,
            kind,
        }
    }
}

impl From<Course> for CourseRecord {
    fn from(c: Course) -> Self {
        CourseRecord {
            code: c.code,
            title: c.title,
            credits: c.credits,
            color: c.color,
            discipline: c.discipline,
            is_core: c.is_core,
            is_new_course: c.is_new_course,
            is_specialization_placeholder: c.is_specialization_placeholder,
        }
    }
}

impl Course {
    pub fn new(code: &str, title: &str, credits: f64) -> Self {
        Course::from(CourseRecord {
            code: code.to_string(),
            title: title.to_string(),
            credits: super::lenient::finite_or_zero(credits).max(0.0),
            color: ColorTag::default(),
            discipline: None,
            is_core: false,
            is_new_course: false,
            is_specialization_placeholder: false,
        })
    }

    /// Placeholder de especialización ("SPEC Elective")
    pub fn specialization_placeholder(title: &str, credits: f64) -> Self {
        Course::new("SPEC", title, credits)
            .with_specialization_flag(true)
            .with_color(ColorTag::Purple)
    }

    fn reclassify(mut self) -> Self {
        self.kind = CourseKind::classify(
            &self.code,
            &self.title,
            self.discipline.as_deref(),
            self.is_specialization_placeholder,
        );
        self
    }

    pub fn with_discipline(mut self, discipline: &str) -> Self {
        let d = discipline.trim();
        self.discipline = if d.is_empty() { None } else { Some(d.to_string()) };
        self.reclassify()
    }

    pub fn with_specialization_flag(mut self, flag: bool) -> Self {
        self.is_specialization_placeholder = flag;
        self.reclassify()
    }

    pub fn with_color(mut self, color: ColorTag) -> Self {
        self.color = color;
        self
    }

    pub fn with_core(mut self, is_core: bool) -> Self {
        self.is_core = is_core;
        self
    }

    pub fn with_new_course(mut self, is_new: bool) -> Self {
        self.is_new_course = is_new;
        self
    }

    pub fn code(&self) -> &str {
        &self.code
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Créditos para agregación (nunca negativos).
    pub fn credits(&self) -> f64 {
        self.credits.max(0.0)
    }

    pub fn color(&self) -> ColorTag {
        self.color
    }

    pub fn discipline(&self) -> Option<&str> {
        self.discipline.as_deref()
    }

    pub fn is_core(&self) -> bool {
        self.is_core
    }

    pub fn is_new_course(&self) -> bool {
        self.is_new_course
    }

    pub fn is_specialization_placeholder(&self) -> bool {
        self.is_specialization_placeholder
    }

    pub fn kind(&self) -> &CourseKind {
        &self.kind
    }

    pub fn set_core(&mut self, is_core: bool) {
        self.is_core = is_core;
    }

    /// Flags que se dibujan como badges: CORE, NEW, SPEC.
    pub fn badges(&self) -> Vec<&'static str> {
        let mut out = Vec::new();
        if self.is_core {
            out.push("CORE");
        }
        if self.is_new_course {
            out.push("NEW");
        }
        if self.kind.is_specialization() {
            out.push("SPEC");
        }
        out
    }
}

/// Acepta listas de cualquier largo y las ajusta a 6 posiciones.
pub fn deserialize_slots<'de, D>(deserializer: D) -> Result<SlotArray, D::Error>
where
    D: Deserializer<'de>,
{
    let v: Vec<Option<Course>> = Option::<Vec<Option<Course>>>::deserialize(deserializer)?.unwrap_or_default();
    Ok(slots_from_vec(v))
}

pub fn slots_from_vec(v: Vec<Option<Course>>) -> SlotArray {
    let mut out: SlotArray = Default::default();
    for (i, c) in v.into_iter().take(SLOTS_PER_ROW).enumerate() {
        out[i] = c;
    }
    out
}

pub fn empty_slots() -> SlotArray {
    Default::default()
}

pub fn slots_credits(slots: &SlotArray) -> f64 {
    slots.iter().flatten().map(Course::credits).sum()
}

/// Semestre de la malla.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Semester {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default = "empty_slots", deserialize_with = "deserialize_slots")]
    pub courses: SlotArray,
}

impl Semester {
    pub fn new(id: &str, name: &str) -> Self {
        Semester { id: id.to_string(), name: name.to_string(), courses: empty_slots() }
    }

    pub fn total_credits(&self) -> f64 {
        slots_credits(&self.courses)
    }

    pub fn is_fall(&self) -> bool {
        self.name.to_lowercase().contains("fall")
    }

    pub fn is_winter(&self) -> bool {
        self.name.to_lowercase().contains("winter")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum RowType {
    Required,
    Choose,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotRowRecord {
    id: String,
    #[serde(default)]
    label: String,
    #[serde(default = "default_row_type")]
    row_type: RowType,
    #[serde(default = "one", deserialize_with = "u32_at_least_one")]
    choose_count: u32,
    #[serde(default = "empty_slots", deserialize_with = "deserialize_slots")]
    courses: SlotArray,
}

fn default_row_type() -> RowType {
    RowType::Required
}

fn one() -> u32 {
    1
}

/// Regla de cumplimiento de una fila: todos obligatorios o elegir N.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowRule {
    Required,
    Choose { count: u32 },
}

impl RowRule {
    pub fn describe(&self) -> String {
        match self {
            RowRule::Required => "Required".to_string(),
            RowRule::Choose { count } => format!("Choose {}", count),
        }
    }
}

/// Bloque de especialización o fila de sugerencias de electivos.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SlotRowRecord", into = "SlotRowRecord")]
pub struct SlotRow {
    pub id: String,
    pub label: String,
    pub rule: RowRule,
    pub courses: SlotArray,
}

impl From<SlotRowRecord> for SlotRow {
    fn from(r: SlotRowRecord) -> Self {
        let rule = match r.row_type {
            RowType::Required => RowRule::Required,
            RowType::Choose => RowRule::Choose { count: r.choose_count.max(1) },
        };
        SlotRow { id: r.id, label: r.label, rule, courses: r.courses }
    }
}

impl From<SlotRow> for SlotRowRecord {
    fn from(s: SlotRow) -> Self {
        let (row_type, choose_count) = match s.rule {
            RowRule::Required => (RowType::Required, 1),
            RowRule::Choose { count } => (RowType::Choose, count.max(1)),
        };
        SlotRowRecord { id: s.id, label: s.label, row_type, choose_count, courses: s.courses }
    }
}

impl SlotRow {
    pub fn new(id: &str, label: &str, rule: RowRule) -> Self {
        let rule = match rule {
            RowRule::Choose { count } => RowRule::Choose { count: count.max(1) },
            other => other,
        };
        SlotRow { id: id.to_string(), label: label.to_string(), rule, courses: empty_slots() }
    }

    pub fn filled(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter().flatten()
    }
}

/// Curso del catálogo global (lo que el usuario arrastra a la malla).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogCourse {
    pub id: String,
    pub code: String,
    pub title: String,
    #[serde(default, deserialize_with = "non_negative_f64")]
    pub credits: f64,
    #[serde(default)]
    pub color: ColorTag,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discipline: Option<String>,
}

impl Course {
    pub fn from_catalog(c: &CatalogCourse) -> Self {
        let course = Course::new(&c.code, &c.title, c.credits).with_color(c.color);
        match &c.discipline {
            Some(d) => course.with_discipline(d),
            None => course,
        }
    }
}
