//! Keyword dictionary defaults and persistence
//!
//! Dictionaries live as pretty-printed JSON next to the other engine
//! state files. Loading never fails: a missing or corrupt file is
//! replaced by the built-in defaults, which are persisted immediately so
//! the next load sees a valid file.

use crate::Result;
use sorter_core::{CategoryKeywords, DictionaryMeta, KeywordDictionary, SortMode};
use std::path::Path;

/// Built-in dictionary for the given sort mode
pub fn default_dictionary(mode: SortMode) -> KeywordDictionary {
    match mode {
        SortMode::Presets => default_preset_dictionary(),
        SortMode::Samples => default_sample_dictionary(),
    }
}

fn default_preset_dictionary() -> KeywordDictionary {
    KeywordDictionary {
        categories: vec![
            CategoryKeywords::new("Bass", &["bass", "bs", "sub", "reese", "wobble", "growl"]),
            CategoryKeywords::new("Lead", &["lead", "ld", "solo", "screech"]),
            CategoryKeywords::new("Pad", &["pad", "pd", "atmosphere", "ambient"]),
            CategoryKeywords::new("Pluck", &["pluck", "plk", "pizz"]),
            CategoryKeywords::new(
                "Keys",
                &["keys", "ky", "piano", "epiano", "organ", "clav", "rhodes"],
            ),
            CategoryKeywords::new("Arp", &["arp", "arpeggio", "seq", "sequence"]),
            CategoryKeywords::new(
                "Strings",
                &["strings", "str", "violin", "cello", "arco", "ensemble"],
            ),
            CategoryKeywords::new("Brass", &["brass", "brs", "horn", "trumpet", "trombone"]),
            CategoryKeywords::new(
                "Woodwind",
                &["woodwind", "ww", "flute", "clarinet", "oboe", "sax"],
            ),
            CategoryKeywords::new("Drums", &["drum", "drums", "dr", "kick", "snare", "perc"]),
            CategoryKeywords::new("FX", &["fx", "riser", "impact", "sweep", "noise"]),
            CategoryKeywords::new("Vocal", &["vocal", "vox", "choir", "voice"]),
            CategoryKeywords::new("Misc", &[]),
        ],
        meta: DictionaryMeta {
            protected: vec!["Misc".to_string()],
        },
    }
}

fn default_sample_dictionary() -> KeywordDictionary {
    KeywordDictionary {
        categories: vec![
            CategoryKeywords::new("Kick", &["kick", "kicks", "bassdrum"]),
            CategoryKeywords::new("Snare", &["snare", "snares", "rimshot", "rim"]),
            CategoryKeywords::new(
                "HiHat",
                &["hihat", "hihats", "openhat", "closedhat", "hat", "hats"],
            ),
            CategoryKeywords::new("Clap", &["clap", "claps", "snap"]),
            CategoryKeywords::new(
                "Percussion",
                &[
                    "percussion",
                    "conga",
                    "bongo",
                    "shaker",
                    "tambourine",
                    "cowbell",
                    "cymbal",
                    "crash",
                    "ride",
                    "tom",
                ],
            ),
            CategoryKeywords::new("Bass", &["bass", "bassline", "reese", "donk"]),
            CategoryKeywords::new("808", &["808"]),
            CategoryKeywords::new(
                "Melody",
                &[
                    "melody", "melodic", "lead", "chord", "chords", "arp", "keys", "piano",
                    "guitar", "strings", "brass", "flute", "pluck", "synth",
                ],
            ),
            CategoryKeywords::new(
                "Vocal",
                &["vocal", "vocals", "acapella", "adlib", "chant"],
            ),
            CategoryKeywords::new(
                "FX",
                &[
                    "fx", "riser", "sweep", "impact", "downlifter", "uplifter", "whoosh",
                    "transition",
                ],
            ),
            CategoryKeywords::new(
                "Texture",
                &["texture", "ambience", "atmosphere", "drone", "noise", "foley"],
            ),
            CategoryKeywords::new(
                "Drum Loop",
                &["drum loop", "drumloop", "loop", "breakbeat", "break", "groove", "beat"],
            ),
            CategoryKeywords::new("One Shot", &["one shot", "oneshot", "stab", "hit"]),
            CategoryKeywords::new("MIDI", &["midi"]),
            CategoryKeywords::new("Misc", &[]),
        ],
        meta: DictionaryMeta {
            protected: vec!["Misc".to_string(), "MIDI".to_string()],
        },
    }
}

/// Load a dictionary from disk, falling back to the built-in defaults
///
/// A missing or unreadable file is treated as first run: the defaults are
/// written to `path` and returned. A write failure is logged and the
/// defaults are still returned so the caller can keep going.
pub fn load_dictionary(path: &Path, mode: SortMode) -> KeywordDictionary {
    match try_load(path) {
        Ok(dict) => dict,
        Err(err) => {
            tracing::warn!(
                "Keyword dictionary at {} unusable ({err}), restoring defaults",
                path.display()
            );
            let dict = default_dictionary(mode);
            if let Err(err) = save_dictionary(path, &dict) {
                tracing::warn!("Failed to persist default dictionary: {err}");
            }
            dict
        }
    }
}

fn try_load(path: &Path) -> Result<KeywordDictionary> {
    let raw = std::fs::read_to_string(path)?;
    let dict: KeywordDictionary = serde_json::from_str(&raw)?;
    dict.validate()?;
    Ok(dict)
}

/// Persist a dictionary as pretty-printed JSON
pub fn save_dictionary(path: &Path, dict: &KeywordDictionary) -> Result<()> {
    dict.validate()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(dict)?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Drop all custom keywords, keeping user-added categories intact
///
/// Returns the cleaned dictionary after persisting it.
pub fn restore_default_keywords(path: &Path, mode: SortMode) -> Result<KeywordDictionary> {
    let mut dict = load_dictionary(path, mode);
    dict.clear_custom();
    save_dictionary(path, &dict)?;
    Ok(dict)
}
