//! Typical attestation years per language.
//!
//! Sources frequently name a root's language without dating the root.
//! When enabled, these estimates fill unset root years after all sources
//! have been merged.

use crate::types::EtymologyRecord;

use super::language::normalize_language;

/// Canonical language → representative year (negative = BCE).
const LANGUAGE_ERAS: &[(&str, i32)] = &[
    ("Proto-Indo-European", -4500),
    ("Proto-Hellenic", -2000),
    ("Proto-Italic", -1000),
    ("Proto-Germanic", -500),
    ("Ancient Greek", -400),
    ("Old Latin", -300),
    ("Latin", -100),
    ("Vulgar Latin", 300),
    ("Late Latin", 400),
    ("Gothic", 350),
    ("Frankish", 500),
    ("Old English", 900),
    ("Medieval Latin", 900),
    ("Old High German", 900),
    ("Old Norse", 1000),
    ("Old French", 1000),
    ("Old Saxon", 850),
    ("Anglo-Norman", 1150),
    ("Old Northern French", 1100),
    ("Middle High German", 1200),
    ("Middle Dutch", 1200),
    ("Middle English", 1300),
    ("Middle French", 1450),
    ("New Latin", 1600),
];

/// The representative year for `language`, if one is defined.
pub fn typical_year(language: &str) -> Option<i32> {
    let canonical = normalize_language(language);
    LANGUAGE_ERAS
        .iter()
        .find(|(name, _)| *name == canonical)
        .map(|(_, year)| *year)
}

/// Fill every unset root year in `record` from [`typical_year`].
///
/// Never overwrites a year a source supplied. Returns the number of roots
/// that were dated.
pub fn estimate_root_years(record: &mut EtymologyRecord) -> usize {
    let mut dated = 0;
    for root in record.roots.iter_mut().filter(|r| r.year.is_none()) {
        if let Some(year) = typical_year(&root.language) {
            root.year = Some(year);
            dated += 1;
        }
    }
    dated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RootEntry;

    #[test]
    fn classical_languages_dated() {
        assert_eq!(typical_year("Latin"), Some(-100));
        assert_eq!(typical_year("Greek"), Some(-400));
        assert_eq!(typical_year("PIE"), Some(-4500));
        assert_eq!(typical_year("Old French"), Some(1000));
        assert_eq!(typical_year("Middle English"), Some(1300));
        assert_eq!(typical_year("Old English"), Some(900));
    }

    #[test]
    fn unknown_language_undated() {
        assert!(typical_year("Klingon").is_none());
        assert!(typical_year("English").is_none());
    }

    #[test]
    fn fills_only_missing_years() {
        let mut record = EtymologyRecord::new("etymology", "English");
        record.roots.push(RootEntry::new("etymologia", "Latin").with_year(1200));
        record.roots.push(RootEntry::new("ἐτυμολογία", "Ancient Greek"));
        record.roots.push(RootEntry::new("qapla", "Klingon"));

        assert_eq!(estimate_root_years(&mut record), 1);
        assert_eq!(record.roots[0].year, Some(1200));
        assert_eq!(record.roots[1].year, Some(-400));
        assert!(record.roots[2].year.is_none());
    }

    #[test]
    fn record_year_untouched() {
        let mut record = EtymologyRecord::new("etymology", "English");
        record.roots.push(RootEntry::new("etymologia", "Latin"));
        estimate_root_years(&mut record);
        assert!(record.year.is_none());
    }
}
