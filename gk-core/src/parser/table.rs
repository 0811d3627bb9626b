//! Lecture d'une table délimitée (CSV, TSV, point-virgule)
//!
//! Le séparateur est détecté sur un aperçu des premières lignes. La première
//! ligne non vide est l'en-tête, les lignes vides ou blanches sont ignorées.

use csv::{ReaderBuilder, StringRecord};
use memchr::memchr;
use tracing::{debug, trace};

/// Séparateurs candidats, dans l'ordre d'essai
const CANDIDATE_DELIMITERS: [u8; 4] = [b',', b'\t', b'|', b';'];

/// Nombre de lignes examinées pour la détection du séparateur
const PREVIEW_ROWS: usize = 10;

/// Table brute : en-tête et lignes de texte
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    /// Noms de colonnes (espaces retirés)
    pub headers: Vec<String>,

    /// Lignes de données, hors en-tête
    pub rows: Vec<StringRecord>,

    /// Séparateur utilisé
    pub delimiter: u8,

    /// Un champ entre guillemets n'est jamais refermé
    pub unterminated_quote: bool,

    /// Première erreur du lecteur CSV (ligne ignorée)
    pub first_error: Option<String>,
}

impl RawTable {
    /// Index d'une colonne par son nom
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    /// Valeur d'une cellule, vide si la colonne ou la cellule manque
    pub fn cell<'a>(row: &'a StringRecord, index: Option<usize>) -> &'a str {
        index.and_then(|i| row.get(i)).unwrap_or("")
    }
}

/// Lit une table en détectant le séparateur
pub fn read_table(text: &str) -> RawTable {
    let text = strip_bom(text);
    let delimiter = detect_delimiter(text);
    read_table_with_delimiter(text, delimiter)
}

/// Lit une table avec un séparateur connu
pub fn read_table_with_delimiter(text: &str, delimiter: u8) -> RawTable {
    let text = strip_bom(text);
    let mut reader = csv_reader(text, delimiter);

    let mut table = RawTable {
        delimiter,
        unterminated_quote: has_unterminated_quote(text, delimiter),
        ..Default::default()
    };
    let mut header_seen = false;

    for (index, result) in reader.records().enumerate() {
        let record = match result {
            Ok(record) => record,
            Err(e) => {
                trace!(record = index, error = %e, "CSV record skipped");
                table.first_error.get_or_insert_with(|| e.to_string());
                continue;
            }
        };

        if is_blank(&record) {
            continue;
        }

        if header_seen {
            table.rows.push(record);
        } else {
            table.headers = record.iter().map(|h| h.trim().to_string()).collect();
            header_seen = true;
        }
    }

    debug!(
        delimiter = %(delimiter as char).escape_default(),
        columns = table.headers.len(),
        rows = table.rows.len(),
        "Table read"
    );

    table
}

/// Détecte le séparateur sur les premières lignes
///
/// Un candidat n'est retenu que s'il donne en moyenne au moins deux champs.
/// Il remplace le meilleur courant si la variation du nombre de champs d'une
/// ligne à l'autre n'augmente pas et si la moyenne augmente strictement.
pub fn detect_delimiter(text: &str) -> u8 {
    let text = strip_bom(text);
    let mut best: Option<(u8, usize, f64)> = None;

    for &candidate in &CANDIDATE_DELIMITERS {
        let mut reader = csv_reader(text, candidate);
        let mut rows = 0usize;
        let mut total_fields = 0usize;
        let mut delta = 0usize;
        let mut previous: Option<usize> = None;

        for record in reader
            .records()
            .filter_map(Result::ok)
            .filter(|r| !is_blank(r))
            .take(PREVIEW_ROWS)
        {
            let count = record.len();
            rows += 1;
            total_fields += count;
            if let Some(prev) = previous {
                delta += prev.abs_diff(count);
            }
            previous = Some(count);
        }

        if rows == 0 {
            continue;
        }
        let average = total_fields as f64 / rows as f64;
        if average < 2.0 {
            continue;
        }

        let better = match best {
            None => true,
            Some((_, best_delta, best_average)) => delta <= best_delta && average > best_average,
        };
        if better {
            best = Some((candidate, delta, average));
        }
    }

    best.map(|(delimiter, _, _)| delimiter).unwrap_or(b',')
}

/// Vérifie si le texte se termine à l'intérieur d'un champ entre guillemets
///
/// Un guillemet n'ouvre un champ qu'en début de champ ; à l'intérieur, `""`
/// est un guillemet échappé.
pub fn has_unterminated_quote(text: &str, delimiter: u8) -> bool {
    let bytes = text.as_bytes();
    if memchr(b'"', bytes).is_none() {
        return false;
    }

    let mut in_quotes = false;
    let mut at_field_start = true;
    let mut i = 0;

    while i < bytes.len() {
        let b = bytes[i];
        if in_quotes {
            if b == b'"' {
                if bytes.get(i + 1) == Some(&b'"') {
                    i += 1;
                } else {
                    in_quotes = false;
                }
            }
        } else if b == b'"' && at_field_start {
            in_quotes = true;
        }

        at_field_start = !in_quotes && (b == delimiter || b == b'\n' || b == b'\r');
        i += 1;
    }

    in_quotes
}

fn csv_reader(text: &str, delimiter: u8) -> csv::Reader<&[u8]> {
    ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(text.as_bytes())
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

/// Ligne vide ou composée uniquement d'espaces
fn is_blank(record: &StringRecord) -> bool {
    record.iter().all(|field| field.trim().is_empty())
}
