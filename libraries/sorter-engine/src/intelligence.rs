//! Musical metadata recovered from file names
//!
//! Producers encode tempo and key straight into file names ("Dark_Loop_
//! 120bpm_Cm.wav"). These extractors are a fallback for formats without
//! usable tags, and the only metadata source for preset files.

use crate::classify::word_boundary_hit;
use crate::extensions;
use lazy_static::lazy_static;
use regex::Regex;
use sorter_core::{AudioMetadata, SampleType, SortMode};

/// Accepted tempo range; candidates outside it are discarded
const BPM_MIN: u32 = 40;
const BPM_MAX: u32 = 250;

lazy_static! {
    /// Separators collapsed before pattern matching. Parentheses survive
    /// because "(84)" is a recognized tempo notation.
    static ref NAME_SEPARATORS: Regex = Regex::new(r"[_\-.]+").unwrap();
    /// "bpm128", "bpm 128"
    static ref BPM_PREFIXED: Regex = Regex::new(r"\bbpm\s*(\d{2,3})\b").unwrap();
    /// "128bpm", "128 bpm"
    static ref BPM_SUFFIXED: Regex = Regex::new(r"\b(\d{2,3})\s?bpm\b").unwrap();
    /// "(128)"
    static ref BPM_PARENS: Regex = Regex::new(r"\((\d{2,3})\)").unwrap();
    /// Bare two or three digit token
    static ref BPM_BARE: Regex = Regex::new(r"\b(\d{2,3})\b").unwrap();
}

/// Extract bpm, key, and mood from a sample file name
pub fn detect_sample_intelligence(file_name: &str) -> AudioMetadata {
    let name = normalize(file_name, SortMode::Samples);
    let mut metadata = AudioMetadata::empty();
    metadata.bpm = detect_bpm(&name).map(f64::from);
    if let Some(key) = detect_key(&name) {
        metadata.mood = key.mode.map(|mode| mode.mood().to_string());
        metadata.key = Some(key.label());
    }
    if metadata.mood.is_none() {
        metadata.mood = sample_mood(&name);
    }
    metadata
}

/// Extract bpm, key, and mood from a preset file name
pub fn detect_preset_intelligence(file_name: &str) -> AudioMetadata {
    let name = normalize(file_name, SortMode::Presets);
    let mut metadata = AudioMetadata::empty();
    metadata.bpm = detect_bpm(&name).map(f64::from);
    if let Some(key) = detect_key(&name) {
        metadata.mood = key.mode.map(|mode| mode.mood().to_string());
        metadata.key = Some(key.label());
    }
    if metadata.mood.is_none() {
        // Preset names are sparse; only two coarse buckets are worth guessing
        if name.contains("dark") {
            metadata.mood = Some("Dark".to_string());
        } else if name.contains("ambient") {
            metadata.mood = Some("Ambient".to_string());
        }
    }
    metadata
}

/// Decide whether a sample is a one-shot or a loop
///
/// Duration is the strongest signal when available; naming conventions
/// break the tie for files whose length could not be read.
pub fn detect_sample_type(file_name: &str, duration_sec: Option<f64>) -> SampleType {
    const SHOT_WORDS: &[&str] = &[
        "one shot", "oneshot", "1shot", "hit", "stab", "single", "shot", "note",
    ];
    const LOOP_WORDS: &[&str] = &[
        "loop",
        "lp",
        "beat",
        "groove",
        "phrase",
        "riff",
        "progression",
    ];

    if let Some(duration) = duration_sec {
        if duration <= 2.0 {
            return SampleType::OneShot;
        }
    }
    let name = normalize(file_name, SortMode::Samples);
    if SHOT_WORDS.iter().any(|w| word_boundary_hit(&name, w)) {
        return SampleType::OneShot;
    }
    if LOOP_WORDS.iter().any(|w| word_boundary_hit(&name, w)) {
        return SampleType::Loop;
    }
    if duration_sec.is_some() {
        return SampleType::Loop;
    }
    SampleType::Unknown
}

fn normalize(file_name: &str, mode: SortMode) -> String {
    let stem = extensions::strip_known_extension(file_name, mode).to_lowercase();
    NAME_SEPARATORS
        .replace_all(&stem, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Try tempo notations from most to least explicit; first hit wins
fn detect_bpm(name: &str) -> Option<u32> {
    let patterns: &[&Regex] = &[&BPM_PREFIXED, &BPM_SUFFIXED, &BPM_PARENS, &BPM_BARE];
    for pattern in patterns {
        if let Some(captures) = pattern.captures(name) {
            let value: u32 = captures.get(1).unwrap().as_str().parse().ok()?;
            return ((BPM_MIN..=BPM_MAX).contains(&value)).then_some(value);
        }
    }
    None
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum KeyMode {
    Major,
    Minor,
}

impl KeyMode {
    fn mood(self) -> &'static str {
        match self {
            Self::Major => "Major",
            Self::Minor => "Minor",
        }
    }

    fn parse(word: &str) -> Option<Self> {
        match word {
            "m" | "min" | "minor" => Some(Self::Minor),
            "maj" | "major" => Some(Self::Major),
            _ => None,
        }
    }
}

struct DetectedKey {
    /// Note with accidental, e.g. "F#" or "Bb"
    base: String,
    mode: Option<KeyMode>,
}

impl DetectedKey {
    fn label(&self) -> String {
        match self.mode {
            Some(KeyMode::Minor) => format!("{}m", self.base),
            _ => self.base.clone(),
        }
    }
}

/// Scan words left to right for the first musical key token
///
/// Accepts attached modes ("cm", "f#min", "dsharpmaj") and a detached
/// mode word right after a bare note ("a maj").
fn detect_key(name: &str) -> Option<DetectedKey> {
    let words: Vec<&str> = name.split_whitespace().collect();
    for (i, word) in words.iter().enumerate() {
        let Some((base, rest)) = parse_note(word) else {
            continue;
        };
        if let Some(mode) = KeyMode::parse(rest) {
            return Some(DetectedKey {
                base,
                mode: Some(mode),
            });
        }
        if !rest.is_empty() {
            // Trailing text that is not a mode: not a key token after all
            continue;
        }
        let mode = words.get(i + 1).and_then(|next| KeyMode::parse(next));
        return Some(DetectedKey { base, mode });
    }
    None
}

/// Split a word into note-with-accidental and the remaining text
fn parse_note(word: &str) -> Option<(String, &str)> {
    let mut chars = word.chars();
    let note = chars.next()?;
    if !('a'..='g').contains(&note) {
        return None;
    }
    let rest = chars.as_str();
    let (accidental, rest) = if let Some(tail) = rest.strip_prefix("sharp") {
        ("#", tail)
    } else if let Some(tail) = rest.strip_prefix("flat") {
        ("b", tail)
    } else if let Some(tail) = rest.strip_prefix('#') {
        ("#", tail)
    } else if let Some(tail) = rest.strip_prefix('b') {
        ("b", tail)
    } else {
        ("", rest)
    };
    Some((format!("{}{accidental}", note.to_ascii_uppercase()), rest))
}

/// Coarse mood buckets checked in priority order; first match wins
fn sample_mood(name: &str) -> Option<String> {
    const BUCKETS: &[(&str, &[&str])] = &[
        (
            "Dark",
            &[
                "dark",
                "grim",
                "gloom",
                "heavy",
                "trap",
                "hard",
                "dirty",
                "aggressive",
            ],
        ),
        (
            "Bright",
            &[
                "happy", "bright", "uplift", "plucky", "pop", "fun", "cheerful", "upbeat",
            ],
        ),
        (
            "Chill",
            &[
                "ambient", "chill", "soft", "warm", "lush", "dream", "mellow", "relax",
            ],
        ),
        (
            "Epic",
            &[
                "epic",
                "cinematic",
                "dramatic",
                "tension",
                "powerful",
                "massive",
            ],
        ),
    ];

    for (mood, words) in BUCKETS {
        if words.iter().any(|w| word_starts_at_boundary(name, w)) {
            return Some((*mood).to_string());
        }
    }
    None
}

/// Prefix-style word match: "uplift" should catch "uplifting"
fn word_starts_at_boundary(name: &str, word: &str) -> bool {
    name.match_indices(word).any(|(start, _)| {
        name[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_ascii_alphanumeric())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn suffixed_bpm_wins_over_bare_digits() {
        let meta = detect_sample_intelligence("808_Dark_Loop_120bpm_Cm.wav");
        assert_eq!(meta.bpm, Some(120.0));
    }

    #[test]
    fn bpm_in_parentheses() {
        let meta = detect_sample_intelligence("RQM - drum loop - 40acres (84 bpm).wav");
        assert_eq!(meta.bpm, Some(84.0));
    }

    #[test]
    fn bare_token_bpm() {
        let meta = detect_sample_intelligence("tech 95 groove.wav");
        assert_eq!(meta.bpm, Some(95.0));
    }

    #[test]
    fn out_of_range_tempo_is_rejected() {
        assert_eq!(detect_sample_intelligence("room 303 take.wav").bpm, None);
        assert_eq!(detect_sample_intelligence("take 20.wav").bpm, None);
    }

    #[test]
    fn attached_minor_key() {
        let meta = detect_sample_intelligence("Dark_Loop_120bpm_Cm.wav");
        assert_eq!(meta.key.as_deref(), Some("Cm"));
        assert_eq!(meta.mood.as_deref(), Some("Minor"));
    }

    #[test]
    fn sharp_note_with_attached_mode() {
        let meta = detect_sample_intelligence("pad f#m slow.wav");
        assert_eq!(meta.key.as_deref(), Some("F#m"));
        assert_eq!(meta.mood.as_deref(), Some("Minor"));
    }

    #[test]
    fn detached_mode_word() {
        let meta = detect_sample_intelligence("adore a maj bass.wav");
        assert_eq!(meta.key.as_deref(), Some("A"));
        assert_eq!(meta.mood.as_deref(), Some("Major"));
    }

    #[test]
    fn bare_note_has_no_mood() {
        let meta = detect_sample_intelligence("stab gb 01.wav");
        assert_eq!(meta.key.as_deref(), Some("Gb"));
        assert_eq!(meta.mood, None);
    }

    #[test]
    fn spelled_out_accidental() {
        let meta = detect_sample_intelligence("lead dsharpmin.wav");
        assert_eq!(meta.key.as_deref(), Some("D#m"));
        assert_eq!(meta.mood.as_deref(), Some("Minor"));
    }

    #[test]
    fn mood_bucket_fallback() {
        assert_eq!(
            detect_sample_intelligence("dark riser.wav").mood.as_deref(),
            Some("Dark")
        );
        assert_eq!(
            detect_sample_intelligence("uplifting pluck.wav")
                .mood
                .as_deref(),
            Some("Bright")
        );
        assert_eq!(detect_sample_intelligence("plain kick.wav").mood, None);
    }

    #[test]
    fn key_mode_outranks_mood_buckets() {
        let meta = detect_sample_intelligence("dark stab cm.wav");
        assert_eq!(meta.mood.as_deref(), Some("Minor"));
    }

    #[test]
    fn preset_moods_are_coarse() {
        assert_eq!(
            detect_preset_intelligence("Ambient Dreams.fxp")
                .mood
                .as_deref(),
            Some("Ambient")
        );
        assert_eq!(
            detect_preset_intelligence("Darkness.fxp").mood.as_deref(),
            Some("Dark")
        );
        assert_eq!(detect_preset_intelligence("Init.fxp").mood, None);
    }

    #[test]
    fn short_duration_forces_one_shot() {
        assert_eq!(
            detect_sample_type("anything loop.wav", Some(0.4)),
            SampleType::OneShot
        );
    }

    #[test]
    fn naming_decides_when_duration_is_missing() {
        assert_eq!(
            detect_sample_type("drum_loop_84.wav", None),
            SampleType::Loop
        );
        assert_eq!(
            detect_sample_type("kick one shot.wav", None),
            SampleType::OneShot
        );
        assert_eq!(detect_sample_type("mystery.wav", None), SampleType::Unknown);
    }

    #[test]
    fn long_unnamed_sample_defaults_to_loop() {
        assert_eq!(
            detect_sample_type("mystery.wav", Some(7.5)),
            SampleType::Loop
        );
    }
}
