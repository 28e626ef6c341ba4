//! Producer shorthand expansion
//!
//! Sample packs are full of two and three letter abbreviations ("kck",
//! "hh", "prc"). Expanding a segment before exact-match comparison lets
//! short tokens hit full keywords without loosening the fuzzy matcher.

/// Shorthand tokens mapped to the canonical word they stand for
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("kck", "kick"),
    ("kik", "kick"),
    ("kk", "kick"),
    ("bd", "kick"),
    ("kd", "kick"),
    ("bss", "bass"),
    ("bs", "bass"),
    ("808", "bass"),
    ("sub", "bass"),
    ("sn", "snare"),
    ("snr", "snare"),
    ("sd", "snare"),
    ("hh", "hihat"),
    ("hat", "hihat"),
    ("oh", "hihat"),
    ("ch", "hihat"),
    ("hihaat", "hihat"),
    ("hihat", "hihat"),
    ("clp", "clap"),
    ("cp", "clap"),
    ("prc", "percussion"),
    ("perc", "percussion"),
    ("percs", "percussion"),
    ("prcs", "percussion"),
    ("vox", "vocal"),
    ("voc", "vocal"),
    ("sfx", "fx"),
    ("drm", "drum"),
    ("dl", "drum loop"),
    ("lp", "loop"),
    ("mel", "melody"),
    ("arp", "arp"),
    ("cho", "chord"),
    ("amb", "ambience"),
    ("atm", "ambience"),
    ("gt", "guitar"),
    ("gtr", "guitar"),
    ("pno", "piano"),
    ("kbd", "piano"),
    ("str", "strings"),
    ("brs", "brass"),
    ("tom", "tom"),
    ("cym", "cymbal"),
    ("textue", "texture"),
    ("textur", "texture"),
    ("tex", "texture"),
];

/// Expand a lowercase token to its canonical form
///
/// Tokens without a table entry come back unchanged.
pub fn expand(token: &str) -> &str {
    ABBREVIATIONS
        .iter()
        .find(|(short, _)| *short == token)
        .map_or(token, |(_, full)| full)
}
