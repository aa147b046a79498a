//! Name-key normalization used to fuse fragments of the same named feature.

use regex::Regex;
use std::sync::OnceLock;
use unicode_normalization::UnicodeNormalization;

/// Key assigned to segments without a usable name.
pub const UNNAMED_KEY: &str = "unnamed";

fn leading_article() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(la|le|les|l'|the|el|il|lo|los|las)\s+").expect("valid article pattern")
    })
}

fn piste_word() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\bpiste\b").expect("valid piste pattern"))
}

fn whitespace_run() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\s+").expect("valid whitespace pattern"))
}

fn is_combining_mark(c: char) -> bool {
    ('\u{0300}'..='\u{036f}').contains(&c)
}

/// Normalize a display name into a merge key.
///
/// Strips diacritics, lower-cases, drops one leading article, removes the
/// word "piste" and collapses whitespace. Empty input maps to `"unnamed"`.
///
/// ```
/// use powderpath_core::normalize_name_key;
/// assert_eq!(normalize_name_key("La Piste Verte"), "verte");
/// ```
pub fn normalize_name_key(raw: &str) -> String {
    let folded: String = raw.nfd().filter(|c| !is_combining_mark(*c)).collect();
    let lowered = folded.to_lowercase();
    let trimmed = lowered.trim();

    let without_article = leading_article().replace(trimmed, "");
    let without_piste = piste_word().replace_all(&without_article, "");
    let collapsed = whitespace_run().replace_all(&without_piste, " ");
    let key = collapsed.trim();

    if key.is_empty() {
        UNNAMED_KEY.to_string()
    } else {
        key.to_string()
    }
}

/// True when a display name reads "Unnamed…" (any case).
pub fn is_unnamed_label(name: &str) -> bool {
    name.trim_start()
        .get(..UNNAMED_KEY.len())
        .is_some_and(|prefix| prefix.eq_ignore_ascii_case(UNNAMED_KEY))
}
