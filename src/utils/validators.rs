// ============================================================================
// VALIDATORS - Reglas de formulario compartidas
// ============================================================================

use regex::Regex;

lazy_static::lazy_static! {
    // Mismo criterio laxo que los formularios del portal: algo@dominio
    static ref EMAIL_RE: Regex =
        Regex::new(r"^[A-Za-z0-9.!#$%&'*+/=?^_`{|}~-]+@[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?(?:\.[A-Za-z0-9](?:[A-Za-z0-9-]{0,61}[A-Za-z0-9])?)*$")
            .expect("regex de email válida");
}

pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}

pub fn is_valid_email(value: &str) -> bool {
    let value = value.trim();
    !value.is_empty() && value.len() <= 254 && EMAIL_RE.is_match(value)
}
