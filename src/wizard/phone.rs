//! Formato progresivo del teléfono mientras se escribe

use crate::utils::validation::{phone_digits, PHONE_MAX_DIGITS};

/// Agrupar los dígitos tecleados: `300`, `300-123`, `300-123-4567`, y a partir
/// de 11 dígitos formato internacional `+57-300-123-4567`. Los dígitos que
/// superan el máximo se descartan.
pub fn format_phone(input: &str) -> String {
    let digits: String = phone_digits(input).chars().take(PHONE_MAX_DIGITS).collect();
    let international = digits.len() > 10;
    let groups: &[usize] = if international { &[2, 3, 3, 4] } else { &[3, 3, 4] };

    let mut parts = Vec::with_capacity(groups.len());
    let mut rest = digits.as_str();
    for &size in groups {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(size.min(rest.len()));
        parts.push(head);
        rest = tail;
    }

    let joined = parts.join("-");
    if international {
        format!("+{}", joined)
    } else {
        joined
    }
}
