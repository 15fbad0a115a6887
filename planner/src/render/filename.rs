use std::sync::LazyLock;

use regex::Regex;

use crate::models::Program;

static NON_ALNUM_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^A-Za-z0-9]+").expect("non-alnum regex"));

/// "B.Sc. Robotics!!" -> "B_Sc_Robotics". Mantiene mayúsculas/minúsculas.
pub fn sanitize_program_name(name: &str) -> String {
    NON_ALNUM_RUN.replace_all(name, "_").trim_matches('_').to_string()
}

/// `<nombre>_major_curriculum_modification_v<version>.pdf`
pub fn export_filename(program: &Program) -> String {
    let token = sanitize_program_name(&program.name);
    let token = if token.is_empty() { "program".to_string() } else { token };
    format!("{}_major_curriculum_modification_v{}.pdf", token, program.version())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize() {
        assert_eq!(sanitize_program_name("B.Sc. Robotics!!"), "B_Sc_Robotics");
        assert_eq!(sanitize_program_name("  Game -- Dev  "), "Game_Dev");
        assert_eq!(sanitize_program_name("Économie"), "conomie");
        assert_eq!(sanitize_program_name("!!!"), "");
    }
}
