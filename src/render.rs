//! Mechanical field projections for output rendering. Rendering itself
//! (choosing `csv`/`compact`/`pretty`, writing to a sink) is out of core
//! per `spec.md` §1; this module only exposes the CSV row shape bit-exactly
//! specified in §6, since that exact header and quoting are testable
//! properties of the core model.

use crate::semantic::ParsedName;

pub const CSV_HEADER: &str =
    "Id,Verbatim,Cardinality,CanonicalStem,CanonicalSimple,CanonicalFull,Authorship,Year,Quality";

/// RFC-4180 field quoting: wrap in `"..."` and double any embedded quote
/// whenever the field contains the delimiter, a quote, or a newline.
fn csv_field(s: &str) -> String {
    if s.contains(',') || s.contains('"') || s.contains('\n') || s.contains('\r') {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

/// Project a `ParsedName` into the CSV row shape of `spec.md` §6. Fields
/// with no value render as empty strings, matching RFC-4180's treatment of
/// absent data.
pub fn to_csv_row(name: &ParsedName) -> String {
    let canonical_stem = name.canonical.as_ref().map(|c| c.stemmed.as_str()).unwrap_or("");
    let canonical_simple = name.canonical.as_ref().map(|c| c.simple.as_str()).unwrap_or("");
    let canonical_full = name.canonical.as_ref().map(|c| c.full.as_str()).unwrap_or("");
    let authorship = name.authorship.as_ref().map(|a| a.normalized.as_str()).unwrap_or("");
    let year = name.year.as_deref().unwrap_or("");

    [
        csv_field(&name.id.to_string()),
        csv_field(&name.verbatim),
        csv_field(&name.cardinality.to_string()),
        csv_field(canonical_stem),
        csv_field(canonical_simple),
        csv_field(canonical_full),
        csv_field(authorship),
        csv_field(year),
        csv_field(&name.quality.to_string()),
    ]
    .join(",")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ParserConfig;
    use crate::parse;

    #[test]
    fn header_is_bit_exact() {
        assert_eq!(
            CSV_HEADER,
            "Id,Verbatim,Cardinality,CanonicalStem,CanonicalSimple,CanonicalFull,Authorship,Year,Quality"
        );
    }

    #[test]
    fn quotes_fields_with_commas() {
        let cfg = ParserConfig::default();
        let name = parse("Pardosa moesta Banks, 1892", &cfg);
        let row = to_csv_row(&name);
        assert!(row.contains("\"Pardosa moesta Banks, 1892\""));
        assert!(row.ends_with(",1"));
    }
}
