//! Écriture de la table de sortie gl-Survey
//!
//! Format : BOM UTF-8, en-tête fixe de six colonnes, fins de ligne CRLF (y
//! compris après la dernière ligne), champs entre guillemets uniquement s'ils
//! contiennent le séparateur, un guillemet ou un retour à la ligne.

use std::fmt;
use std::str::FromStr;

use memchr::{memchr, memchr3};

use crate::types::ConvertedRecord;
use crate::GkError;

/// En-tête de la table de sortie
pub const OUTPUT_COLUMNS: [&str; 6] = [
    "Punktnummer",
    "Rechtswert",
    "Hochwert",
    "Höhe",
    "Art",
    "Bemerkung",
];

const BOM: char = '\u{feff}';
const LINE_END: &str = "\r\n";

/// Séparateur de champs de la table de sortie
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Separator {
    #[default]
    Semicolon,
    Comma,
    Tab,
}

impl Separator {
    pub fn as_char(self) -> char {
        match self {
            Self::Semicolon => ';',
            Self::Comma => ',',
            Self::Tab => '\t',
        }
    }

    fn as_byte(self) -> u8 {
        self.as_char() as u8
    }
}

impl FromStr for Separator {
    type Err = GkError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            ";" => Ok(Self::Semicolon),
            "," => Ok(Self::Comma),
            "\t" | "\\t" | "tab" | "TAB" => Ok(Self::Tab),
            _ => Err(GkError::InvalidSeparator(s.to_string())),
        }
    }
}

impl fmt::Display for Separator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Tab => write!(f, "\\t"),
            other => write!(f, "{}", other.as_char()),
        }
    }
}

/// Sérialise les points convertis en texte délimité
pub fn write_table(records: &[ConvertedRecord], separator: Separator) -> String {
    // ~64 octets par ligne en pratique
    let mut out = String::with_capacity(64 * (records.len() + 1));
    out.push(BOM);

    write_row(&mut out, OUTPUT_COLUMNS, separator);
    for record in records {
        write_row(
            &mut out,
            [
                record.point_number.as_str(),
                record.easting.as_str(),
                record.northing.as_str(),
                record.height.as_str(),
                record.point_type.as_str(),
                record.remarks.as_str(),
            ],
            separator,
        );
    }

    out
}

fn write_row(out: &mut String, fields: [&str; 6], separator: Separator) {
    for (i, field) in fields.iter().enumerate() {
        if i > 0 {
            out.push(separator.as_char());
        }
        write_field(out, field, separator);
    }
    out.push_str(LINE_END);
}

/// Écrit un champ, entre guillemets si nécessaire (guillemets internes doublés)
fn write_field(out: &mut String, field: &str, separator: Separator) {
    if needs_quoting(field, separator) {
        out.push('"');
        out.push_str(&field.replace('"', "\"\""));
        out.push('"');
    } else {
        out.push_str(field);
    }
}

fn needs_quoting(field: &str, separator: Separator) -> bool {
    let bytes = field.as_bytes();
    memchr3(b'"', b'\n', b'\r', bytes).is_some() || memchr(separator.as_byte(), bytes).is_some()
}
