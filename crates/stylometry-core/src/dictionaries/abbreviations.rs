//! Abbreviation dictionary for sentence boundary detection and tokenization.
//!
//! A period after one of these forms neither ends the sentence nor splits off
//! as its own token. Abbreviations that double as ordinary words ("in", "no",
//! "sat", "min") are left out: a sentence ending in such a word is far more
//! common in running prose than the abbreviation is.

use std::collections::HashSet;
use std::sync::LazyLock;

/// English abbreviations, lowercase, without the final period.
pub static ENGLISH_ABBREVIATIONS: LazyLock<HashSet<&'static str>> = LazyLock::new(|| {
    let mut set = HashSet::new();

    // Titles and honorifics
    set.extend([
        "mr", "mrs", "ms", "dr", "prof", "rev", "fr", "sr", "jr", "messrs", "mmes", "msgr", "hon",
        "esq", "capt", "col", "gen", "lt", "maj", "sgt", "cpl", "pvt", "adm", "cmdr", "sen", "rep",
        "gov", "pres",
    ]);

    // Academic degrees
    set.extend([
        "b.a", "b.s", "m.a", "m.s", "m.b.a", "ph.d", "m.d", "j.d", "ll.b", "ll.m", "d.d.s", "d.v.m",
        "ed.d", "psy.d",
    ]);

    // Latin and editorial
    set.extend([
        "etc", "vs", "e.g", "i.e", "cf", "viz", "ibid", "n.b", "p.s", "r.s.v.p", "al",
    ]);

    // Time and dates
    set.extend([
        "a.m", "p.m", "b.c", "a.d", "c.e", "b.c.e", "jan", "feb", "aug", "sept", "oct", "nov",
        "tues", "thurs",
    ]);

    // Places and organizations
    set.extend([
        "ave", "blvd", "apt", "ste", "bldg", "dept", "u.s", "u.k", "u.s.a", "e.u", "n.y", "calif",
        "inc", "corp", "ltd", "llc", "bros", "assn", "mfg", "intl",
    ]);

    // References and units
    set.extend([
        "vol", "vols", "nos", "pp", "fig", "figs", "approx", "lbs", "oz", "mph", "eds", "encl",
    ]);

    set
});

/// Check if a word (with or without its final period) is a known English
/// abbreviation.
pub fn is_english_abbreviation(word: &str) -> bool {
    let word_lower = word.to_lowercase();
    let trimmed = word_lower.trim_end_matches('.');
    ENGLISH_ABBREVIATIONS.contains(trimmed)
}
