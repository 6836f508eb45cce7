//! Glyph catalog standing in for an image asset store. Record icon/image
//! fields carry string identifiers; this module resolves them to small
//! two-row ASCII motifs rendered beside list entries and detail headers.
//! Unknown identifiers always resolve to the same fallback motif, for
//! contacts and articles alike.

/// Motif shown when an identifier has no catalog entry.
pub const FALLBACK_GLYPH: &[&str] = &["(+) ", " \\|/"];

/// Catalog of identifier to motif pairs. Kept as a flat slice because the
/// set is tiny and fixed at build time.
const CATALOG: &[(&str, &[&str])] = &[
    ("ambulance", &["[=]>", "o--o"]),
    ("police", &["/^\\ ", "|##|"]),
    ("fire", &[")((", "/||\\"]),
    ("emergency", &["!! !", "! !!"]),
    ("poison", &["_x_ ", "\\_/ "]),
    ("blood", &[" o  ", "(_) "]),
    ("helpline", &["(( )", " )) "]),
    ("mental_health", &["(~~)", " \\/ "]),
    ("disaster", &["/\\/\\", "\\/\\/"]),
    ("cardiovascular", &["<3<3", " <3 "]),
    ("diabetes", &["*.*.", ".*.*"]),
    ("epilepsy", &["~v~v", "v~v~"]),
    ("asthma", &["o~o~", "~o~o"]),
    ("tuberculosis", &["()()", ")( )"]),
    ("hypertension", &["^^--", "--^^"]),
    ("migraine", &["@  @", " @@ "]),
    ("anemia", &["o.o.", ".o.o"]),
    ("pneumonia", &["{}{}", "}{ {"]),
];

/// Resolve an icon/image identifier to its motif, falling back to
/// [`FALLBACK_GLYPH`] when the identifier is not in the catalog.
pub fn glyph(identifier: &str) -> &'static [&'static str] {
    CATALOG
        .iter()
        .find(|(name, _)| *name == identifier)
        .map(|(_, motif)| *motif)
        .unwrap_or(FALLBACK_GLYPH)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_identifier_resolves_to_its_motif() {
        assert_eq!(glyph("ambulance"), CATALOG[0].1);
    }

    #[test]
    fn unknown_identifier_falls_back() {
        assert_eq!(glyph("definitely-not-a-real-icon"), FALLBACK_GLYPH);
        assert_eq!(glyph(""), FALLBACK_GLYPH);
    }
}
