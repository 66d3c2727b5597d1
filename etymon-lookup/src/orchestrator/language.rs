//! Language name normalisation.
//!
//! Sources name the same language inconsistently ("Greek", "Ancient Greek",
//! "Koine Greek", "grc"). Every language name is mapped through a fixed
//! alias table to one canonical name so that root identity keys match
//! across sources. Names missing from the table pass through trimmed.

/// Alias (lowercase) → canonical language name.
///
/// Covers full names, common abbreviations and ISO 639-3 / Wiktionary
/// codes used by relation dumps.
const LANGUAGE_ALIASES: &[(&str, &str)] = &[
    // Greek
    ("ancient greek", "Ancient Greek"),
    ("greek", "Ancient Greek"),
    ("koine greek", "Ancient Greek"),
    ("classical greek", "Ancient Greek"),
    ("attic greek", "Ancient Greek"),
    ("homeric greek", "Ancient Greek"),
    ("grc", "Ancient Greek"),
    ("gk", "Ancient Greek"),
    ("modern greek", "Modern Greek"),
    ("ell", "Modern Greek"),
    // Latin
    ("latin", "Latin"),
    ("classical latin", "Latin"),
    ("lat", "Latin"),
    ("la", "Latin"),
    ("old latin", "Old Latin"),
    ("late latin", "Late Latin"),
    ("la-lat", "Late Latin"),
    ("vulgar latin", "Vulgar Latin"),
    ("la-vul", "Vulgar Latin"),
    ("medieval latin", "Medieval Latin"),
    ("mediaeval latin", "Medieval Latin"),
    ("ml", "Medieval Latin"),
    ("la-med", "Medieval Latin"),
    ("new latin", "New Latin"),
    ("modern latin", "New Latin"),
    ("la-new", "New Latin"),
    // French
    ("french", "French"),
    ("fra", "French"),
    ("fre", "French"),
    ("fr", "French"),
    ("old french", "Old French"),
    ("fro", "Old French"),
    ("middle french", "Middle French"),
    ("frm", "Middle French"),
    ("anglo-norman", "Anglo-Norman"),
    ("anglo-french", "Anglo-Norman"),
    ("xno", "Anglo-Norman"),
    ("old north french", "Old Northern French"),
    ("old northern french", "Old Northern French"),
    // English
    ("english", "English"),
    ("eng", "English"),
    ("en", "English"),
    ("modern english", "English"),
    ("old english", "Old English"),
    ("anglo-saxon", "Old English"),
    ("oe", "Old English"),
    ("ang", "Old English"),
    ("middle english", "Middle English"),
    ("enm", "Middle English"),
    // Germanic
    ("proto-germanic", "Proto-Germanic"),
    ("pgmc", "Proto-Germanic"),
    ("gem-pro", "Proto-Germanic"),
    ("german", "German"),
    ("deu", "German"),
    ("ger", "German"),
    ("de", "German"),
    ("old high german", "Old High German"),
    ("ohg", "Old High German"),
    ("goh", "Old High German"),
    ("middle high german", "Middle High German"),
    ("mhg", "Middle High German"),
    ("gmh", "Middle High German"),
    ("old norse", "Old Norse"),
    ("non", "Old Norse"),
    ("old saxon", "Old Saxon"),
    ("osx", "Old Saxon"),
    ("dutch", "Dutch"),
    ("nld", "Dutch"),
    ("dut", "Dutch"),
    ("middle dutch", "Middle Dutch"),
    ("dum", "Middle Dutch"),
    ("frankish", "Frankish"),
    ("frk", "Frankish"),
    ("gothic", "Gothic"),
    ("got", "Gothic"),
    // Reconstructed
    ("proto-indo-european", "Proto-Indo-European"),
    ("pie", "Proto-Indo-European"),
    ("ine", "Proto-Indo-European"),
    ("ine-pro", "Proto-Indo-European"),
    ("proto-italic", "Proto-Italic"),
    ("itc-pro", "Proto-Italic"),
    ("proto-hellenic", "Proto-Hellenic"),
    ("grk-pro", "Proto-Hellenic"),
    // Romance
    ("italian", "Italian"),
    ("ita", "Italian"),
    ("spanish", "Spanish"),
    ("spa", "Spanish"),
    ("es", "Spanish"),
    ("old spanish", "Old Spanish"),
    ("osp", "Old Spanish"),
    ("portuguese", "Portuguese"),
    ("por", "Portuguese"),
    // Other donors
    ("sanskrit", "Sanskrit"),
    ("san", "Sanskrit"),
    ("arabic", "Arabic"),
    ("ara", "Arabic"),
    ("ar", "Arabic"),
    ("turkish", "Turkish"),
    ("tur", "Turkish"),
    ("ottoman turkish", "Ottoman Turkish"),
    ("ota", "Ottoman Turkish"),
    ("persian", "Persian"),
    ("fas", "Persian"),
    ("hebrew", "Hebrew"),
    ("heb", "Hebrew"),
    ("gaulish", "Gaulish"),
    ("xtg", "Gaulish"),
    ("etruscan", "Etruscan"),
    ("ett", "Etruscan"),
];

/// Map a free-text language name to its canonical form.
///
/// Trims, collapses inner whitespace and drops a trailing period before
/// looking the name up case-insensitively. Unknown names are returned in
/// their cleaned form.
pub fn normalize_language(raw: &str) -> String {
    let cleaned = clean(raw);
    let lowered = cleaned.to_lowercase();
    LANGUAGE_ALIASES
        .iter()
        .find(|(alias, _)| *alias == lowered)
        .map_or(cleaned, |(_, canonical)| (*canonical).to_string())
}

/// Whether `raw` resolves to a name in the alias table.
pub fn is_known_language(raw: &str) -> bool {
    let lowered = clean(raw).to_lowercase();
    LANGUAGE_ALIASES.iter().any(|(alias, _)| *alias == lowered)
}

fn clean(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed.trim_end_matches('.').trim_end().to_string()
}
