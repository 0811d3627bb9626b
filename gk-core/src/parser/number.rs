//! Lecture des champs numériques

/// Lit le plus long préfixe numérique d'un champ texte
///
/// Les espaces en tête sont ignorés, la suite du champ après le nombre aussi :
/// `"13.4abc"` → 13.4, `"52,5"` → 52. Un champ vide, sans préfixe numérique
/// ou non fini (`inf`, `NaN`) donne `None`.
pub fn parse_number(value: &str) -> Option<f64> {
    let trimmed = value.trim_start();
    if trimmed.is_empty() {
        return None;
    }

    match fast_float::parse_partial::<f64, _>(trimmed) {
        Ok((number, consumed)) if consumed > 0 && number.is_finite() => Some(number),
        _ => None,
    }
}
