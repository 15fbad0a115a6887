// Métricas aproximadas de Helvetica (unidades por 1000 em) para medir,
// partir y truncar texto sin depender del backend PDF.

use super::FontWeight;

pub const PT_TO_MM: f32 = 0.352_778;
pub const ELLIPSIS: &str = "...";

fn char_units(c: char) -> f32 {
    match c {
        ' ' | '!' | ',' | '.' | ':' | ';' | 'i' | 'j' | 'l' | '|' | '\'' => 278.0,
        'f' | 't' | 'I' | '/' | '(' | ')' | '[' | ']' | '-' => 300.0,
        'r' => 333.0,
        'm' => 833.0,
        'w' => 722.0,
        'M' => 833.0,
        'W' => 944.0,
        '0'..='9' => 556.0,
        'A'..='Z' => 690.0,
        'a'..='z' => 540.0,
        '&' | '%' | '@' => 800.0,
        _ => 556.0,
    }
}

pub fn text_width_mm(text: &str, size_pt: f32, weight: FontWeight) -> f32 {
    let units: f32 = text.chars().map(char_units).sum();
    let factor = match weight {
        FontWeight::Regular => 1.0,
        FontWeight::Bold => 1.06,
    };
    units / 1000.0 * size_pt * PT_TO_MM * factor
}

pub fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * 1.3
}

/// Distancia desde el tope de la línea hasta la baseline.
pub fn ascent_mm(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * 0.95
}

/// Corta `text` agregando "..." para que quepa en `max_mm`.
pub fn ellipsize(text: &str, max_mm: f32, size_pt: f32, weight: FontWeight) -> String {
    let mut chars: Vec<char> = text.trim_end().chars().collect();
    loop {
        let candidate: String = chars.iter().collect::<String>().trim_end().to_string() + ELLIPSIS;
        if chars.is_empty() || text_width_mm(&candidate, size_pt, weight) <= max_mm {
            return if chars.is_empty() { ELLIPSIS.to_string() } else { candidate };
        }
        chars.pop();
    }
}

/// Devuelve `text` tal cual si cabe; si no, truncado con "...".
pub fn truncate_to_width(text: &str, max_mm: f32, size_pt: f32, weight: FontWeight) -> String {
    if text_width_mm(text, size_pt, weight) <= max_mm {
        text.to_string()
    } else {
        ellipsize(text, max_mm, size_pt, weight)
    }
}

/// Word-wrap greedy. Palabras más largas que el ancho se parten por caracteres.
pub fn wrap_text(text: &str, max_mm: f32, size_pt: f32, weight: FontWeight) -> Vec<String> {
    let mut lines: Vec<String> = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            let candidate = if current.is_empty() { word.to_string() } else { format!("{} {}", current, word) };
            if text_width_mm(&candidate, size_pt, weight) <= max_mm {
                current = candidate;
                continue;
            }
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            if text_width_mm(word, size_pt, weight) <= max_mm {
                current = word.to_string();
            } else {
                // palabra sola demasiado larga
                for ch in word.chars() {
                    let mut extended = current.clone();
                    extended.push(ch);
                    if !current.is_empty() && text_width_mm(&extended, size_pt, weight) > max_mm {
                        lines.push(std::mem::take(&mut current));
                    }
                    current.push(ch);
                }
            }
        }
        if !current.is_empty() || lines.is_empty() {
            lines.push(current);
        }
    }
    lines
}

/// Word-wrap con tope de líneas; si sobra texto la última línea visible
/// termina en "...".
pub fn wrap_capped(text: &str, max_mm: f32, size_pt: f32, weight: FontWeight, max_lines: usize) -> Vec<String> {
    let mut lines = wrap_text(text, max_mm, size_pt, weight);
    let max_lines = max_lines.max(1);
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let forced = format!("{}{}", last.trim_end(), ELLIPSIS);
            *last = if text_width_mm(&forced, size_pt, weight) <= max_mm {
                forced
            } else {
                ellipsize(last, max_mm, size_pt, weight)
            };
        }
    }
    lines
}

/// 3.0 -> "3", 1.5 -> "1.5"
pub fn format_credits(credits: f64) -> String {
    let c = if credits.is_finite() { credits.max(0.0) } else { 0.0 };
    if (c - c.round()).abs() < 1e-9 {
        format!("{}", c.round() as i64)
    } else {
        format!("{:.1}", c)
    }
}
