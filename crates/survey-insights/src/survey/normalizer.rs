use unicode_normalization::UnicodeNormalization;

/// Canonical form used by every fuzzy comparison against the option catalog:
/// lower-cased, diacritics removed, whitespace runs collapsed and trimmed.
pub fn canonicalize(value: &str) -> String {
    let cleaned = value.replace(['\u{feff}', '\u{200b}'], "");
    let stripped: String = cleaned
        .to_lowercase()
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect();
    stripped.split_whitespace().collect::<Vec<_>>().join(" ")
}

// Combining Diacritical Marks block, which is what NFD produces for Spanish accents and tildes.
fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_accents_case_and_whitespace() {
        assert_eq!(canonicalize("  Atención   a CLIENTES "), "atencion a clientes");
        assert_eq!(canonicalize("Campañas\tdigitales"), "campanas digitales");
        assert_eq!(canonicalize("\u{feff}Viñedo / Casa de vino"), "vinedo / casa de vino");
    }

    #[test]
    fn empty_and_blank_inputs_collapse_to_empty() {
        assert_eq!(canonicalize(""), "");
        assert_eq!(canonicalize("   \n\t "), "");
    }

    #[test]
    fn canonical_form_is_idempotent() {
        let samples = [
            "Digital Automatizada",
            "  Sí  muchas   veces ",
            "Institución Educativa",
            "Más de 30 personas",
            "ÀÉÎÕÜ ñ",
            "",
        ];
        for sample in samples {
            let once = canonicalize(sample);
            assert_eq!(canonicalize(&once), once, "not idempotent for {sample:?}");
        }
    }
}
