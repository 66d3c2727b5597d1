//! Expected ancestor languages per record language.
//!
//! Used by scoring to check that every root of a record comes from a
//! language that could plausibly have fed into the record's language.
//! Languages without an entry impose no expectation.

use super::language::normalize_language;

/// Canonical record language → canonical ancestor/donor languages.
const LINEAGE: &[(&str, &[&str])] = &[
    (
        "English",
        &[
            "Middle English",
            "Old English",
            "Anglo-Norman",
            "Old Northern French",
            "Old French",
            "Middle French",
            "French",
            "Latin",
            "Old Latin",
            "Late Latin",
            "Vulgar Latin",
            "Medieval Latin",
            "New Latin",
            "Ancient Greek",
            "Proto-Germanic",
            "Proto-Indo-European",
            "Proto-Italic",
            "Proto-Hellenic",
            "Old Norse",
            "Old Saxon",
            "Middle Dutch",
            "Dutch",
            "Frankish",
            "Italian",
            "Spanish",
            "Arabic",
            "Turkish",
            "Ottoman Turkish",
        ],
    ),
    (
        "French",
        &[
            "Middle French",
            "Old French",
            "Anglo-Norman",
            "Old Northern French",
            "Latin",
            "Old Latin",
            "Late Latin",
            "Vulgar Latin",
            "Medieval Latin",
            "New Latin",
            "Ancient Greek",
            "Frankish",
            "Gaulish",
            "Proto-Germanic",
            "Proto-Italic",
            "Proto-Indo-European",
            "Italian",
            "Arabic",
            "Turkish",
            "Ottoman Turkish",
        ],
    ),
    (
        "German",
        &[
            "Middle High German",
            "Old High German",
            "Proto-Germanic",
            "Proto-Indo-European",
            "Latin",
            "Late Latin",
            "Medieval Latin",
            "New Latin",
            "Ancient Greek",
            "French",
            "Old French",
        ],
    ),
    (
        "Spanish",
        &[
            "Old Spanish",
            "Latin",
            "Late Latin",
            "Vulgar Latin",
            "Medieval Latin",
            "Ancient Greek",
            "Arabic",
            "Turkish",
            "Ottoman Turkish",
            "Proto-Italic",
            "Proto-Indo-European",
            "Proto-Germanic",
        ],
    ),
    (
        "Italian",
        &[
            "Latin",
            "Late Latin",
            "Vulgar Latin",
            "Medieval Latin",
            "Ancient Greek",
            "Proto-Italic",
            "Proto-Indo-European",
            "Proto-Germanic",
            "Arabic",
            "Turkish",
            "Ottoman Turkish",
        ],
    ),
    (
        "Latin",
        &[
            "Old Latin",
            "Proto-Italic",
            "Proto-Indo-European",
            "Ancient Greek",
            "Etruscan",
            "Gaulish",
        ],
    ),
];

/// The expected ancestor languages for `record_language`, if the table
/// defines any.
pub fn expected_ancestors(record_language: &str) -> Option<&'static [&'static str]> {
    let canonical = normalize_language(record_language);
    LINEAGE
        .iter()
        .find(|(language, _)| *language == canonical)
        .map(|(_, ancestors)| *ancestors)
}

/// Whether `root_language` is a plausible ancestor of `record_language`.
///
/// True when no expectation is defined for the record language, when both
/// name the same language, or when the root language is in the table.
pub fn is_plausible_ancestor(record_language: &str, root_language: &str) -> bool {
    let Some(ancestors) = expected_ancestors(record_language) else {
        return true;
    };
    let root = normalize_language(root_language);
    root == normalize_language(record_language) || ancestors.contains(&root.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_accepts_classical_ancestors() {
        assert!(is_plausible_ancestor("English", "Latin"));
        assert!(is_plausible_ancestor("English", "Ancient Greek"));
        assert!(is_plausible_ancestor("English", "French"));
        assert!(is_plausible_ancestor("English", "Proto-Germanic"));
        assert!(is_plausible_ancestor("English", "Proto-Indo-European"));
    }

    #[test]
    fn aliases_resolve_before_checking() {
        assert!(is_plausible_ancestor("English", "Greek"));
        assert!(is_plausible_ancestor("eng", "grc"));
        assert!(is_plausible_ancestor("English", "PIE"));
    }

    #[test]
    fn english_rejects_unrelated_language() {
        assert!(!is_plausible_ancestor("English", "Sanskrit"));
        assert!(!is_plausible_ancestor("English", "Klingon"));
    }

    #[test]
    fn romance_languages_accept_arabic_and_turkish_loans() {
        for language in ["French", "Spanish", "Italian"] {
            assert!(is_plausible_ancestor(language, "Arabic"), "{language}");
            assert!(is_plausible_ancestor(language, "Turkish"), "{language}");
            assert!(is_plausible_ancestor(language, "Ottoman Turkish"), "{language}");
        }
    }

    #[test]
    fn latin_cannot_descend_from_french() {
        assert!(!is_plausible_ancestor("Latin", "Old French"));
        assert!(is_plausible_ancestor("Latin", "Proto-Italic"));
    }

    #[test]
    fn same_language_is_plausible() {
        assert!(is_plausible_ancestor("English", "English"));
        assert!(is_plausible_ancestor("French", "fra"));
    }

    #[test]
    fn undefined_language_imposes_no_expectation() {
        assert!(expected_ancestors("Japanese").is_none());
        assert!(is_plausible_ancestor("Japanese", "Middle Chinese"));
    }

    #[test]
    fn table_entries_are_canonical() {
        for (language, ancestors) in LINEAGE {
            assert_eq!(normalize_language(language), *language);
            for ancestor in *ancestors {
                assert_eq!(normalize_language(ancestor), *ancestor);
            }
        }
    }
}
