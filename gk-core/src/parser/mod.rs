//! Parsers pour la table d'entrée

pub mod number;
pub mod survey;
pub mod table;

use std::borrow::Cow;

/// Décode le contenu brut d'un fichier d'entrée en texte UTF-8
///
/// Chemin rapide : validation SIMD. Sinon décodage avec remplacement des
/// séquences invalides. Le BOM éventuel est retiré. Le booléen indique si des
/// caractères ont été remplacés.
pub fn decode_input(data: &[u8]) -> (Cow<'_, str>, bool) {
    if let Ok(text) = simdutf8::basic::from_utf8(data) {
        return (Cow::Borrowed(text.strip_prefix('\u{feff}').unwrap_or(text)), false);
    }

    let (decoded, _, had_errors) = encoding_rs::UTF_8.decode(data);
    (decoded, had_errors)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_valid_utf8() {
        let (text, lossy) = decode_input("punkt_id;Höhe\n".as_bytes());
        assert_eq!(text, "punkt_id;Höhe\n");
        assert!(!lossy);
        assert!(matches!(text, Cow::Borrowed(_)));
    }

    #[test]
    fn test_decode_strips_bom() {
        let (text, lossy) = decode_input(b"\xEF\xBB\xBFpunkt_id\n");
        assert_eq!(text, "punkt_id\n");
        assert!(!lossy);
    }

    #[test]
    fn test_decode_invalid_is_lossy() {
        // "Höhe" en Latin-1
        let (text, lossy) = decode_input(b"H\xF6he\n");
        assert!(lossy);
        assert_eq!(text, "H\u{fffd}he\n");
    }
}
