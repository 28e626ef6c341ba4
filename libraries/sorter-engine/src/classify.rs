//! Keyword classification with tiered scoring
//!
//! A file name is matched against every category of the dictionary and
//! the highest-scoring category wins. Per keyword, match tiers are tried
//! from strongest to weakest and the first hit contributes its points;
//! points accumulate across a category's keywords. Ties resolve to the
//! category that appears first in the dictionary.

use crate::{abbrev, extensions};
use lazy_static::lazy_static;
use regex::Regex;
use sorter_core::{AudioMetadata, KeywordDictionary, SortMode};
use std::collections::HashSet;

lazy_static! {
    /// Characters treated as token separators in file names
    static ref SEPARATORS: Regex = Regex::new(r"[_\-.=()\[\]]+").unwrap();
    /// Producer prefix code at the start of a preset name ("BS Growler")
    static ref PRESET_PREFIX: Regex = Regex::new(r"^([a-z]{2,4})\s").unwrap();
}

/// Outcome of classifying a single file name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    /// Winning category name
    pub category: String,
    /// Raw keyword score of the winning category (before metadata boost)
    pub score: u32,
    /// Confidence on a 0-100 scale
    pub confidence: u8,
}

impl Classification {
    fn misc() -> Self {
        Self {
            category: "Misc".to_string(),
            score: 0,
            confidence: 0,
        }
    }
}

/// Classify a sample file name
///
/// Extracted metadata nudges the confidence upward (a file whose name and
/// tags agree is a safer bet) but never changes the winning category.
pub fn classify_sample(
    file_name: &str,
    dictionary: &KeywordDictionary,
    metadata: Option<&AudioMetadata>,
) -> Classification {
    // MIDI is structural, not a naming guess
    if extensions::is_midi_file(file_name) {
        return Classification {
            category: "MIDI".to_string(),
            score: 100,
            confidence: 100,
        };
    }

    let stem = extensions::strip_known_extension(file_name, SortMode::Samples);
    let lower = stem.to_lowercase();
    let name = normalized_name(&lower);
    let segments = split_segments(&lower);

    let mut best = Classification::misc();
    for category in &dictionary.categories {
        let mut score = 0u32;
        for word in category_keywords(category) {
            score += keyword_score(&word, &name, &segments);
        }
        if score > best.score {
            best.category = category.name.clone();
            best.score = score;
        }
    }

    if best.category == "Misc" && best.score == 0 {
        return best;
    }

    let boost = metadata.map_or(0, metadata_boost);
    best.confidence = sample_confidence(best.score + boost);
    best
}

/// Classify a preset file name
pub fn classify_preset(file_name: &str, dictionary: &KeywordDictionary) -> Classification {
    let stem = extensions::strip_known_extension(file_name, SortMode::Presets);
    let lower = stem.to_lowercase();
    let name = normalized_name(&lower);
    let prefix = PRESET_PREFIX
        .captures(&name)
        .map(|c| c.get(1).unwrap().as_str().to_string());

    let mut best = Classification::misc();
    for category in &dictionary.categories {
        let mut score = 0u32;
        for word in category_keywords(category) {
            if prefix.as_deref() == Some(word.as_str()) {
                score += 50;
                continue;
            }
            if word_boundary_hit(&name, &word) {
                score += match word.len() {
                    0..=2 => 1,
                    3..=4 => 4,
                    len => 6 + len as u32,
                };
                continue;
            }
            if word.len() > 5 && name.contains(word.as_str()) {
                score += 2;
            }
        }
        if score > best.score {
            best.category = category.name.clone();
            best.score = score;
        }
    }

    if best.category == "Misc" && best.score == 0 {
        return best;
    }
    best.confidence = preset_confidence(best.score);
    best
}

/// Collapse separator runs to single spaces
fn normalized_name(lower: &str) -> String {
    SEPARATORS
        .replace_all(lower, " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Split on separator runs, keeping spaces inside segments
fn split_segments(lower: &str) -> Vec<String> {
    SEPARATORS
        .split(lower)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Normalized keywords of a category: lowercased, trimmed, de-duplicated
fn category_keywords(category: &sorter_core::CategoryKeywords) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut words = Vec::new();
    for word in category.all_words() {
        let word = word.trim().to_lowercase();
        if word.is_empty() || !seen.insert(word.clone()) {
            continue;
        }
        words.push(word);
    }
    words
}

/// Score a single keyword against the tokenized name, strongest tier first
fn keyword_score(word: &str, name: &str, segments: &[String]) -> u32 {
    let count = segments.len();

    // Exact match after shorthand expansion
    if let Some(i) = segments.iter().position(|s| abbrev::expand(s) == word) {
        return 60 + position_bonus(i, count);
    }
    // Exact match on the raw token (catches keywords that are themselves
    // shorthand, like "hat" or "sub")
    if let Some(i) = segments.iter().position(|s| s == word) {
        return 65 + position_bonus(i, count);
    }
    // Token contains the keyword
    if word.len() > 3 && segments.iter().any(|s| s.contains(word)) {
        return 50;
    }
    // Typo tolerance, scaled down by edit distance
    if word.len() >= 5 {
        let max_edits = if word.len() <= 6 { 1 } else { 2 };
        for segment in segments {
            let len_diff = segment.len().abs_diff(word.len());
            if len_diff > max_edits + 1 {
                continue;
            }
            let distance = strsim::levenshtein(segment, word);
            if distance > 0 && distance <= max_edits {
                let base = (55 + word.len()) as f64;
                let factor = if distance == 1 { 0.75 } else { 0.50 };
                return (base * factor).round() as u32;
            }
        }
    }
    // Whole-word hit anywhere in the name
    if word_boundary_hit(name, word) {
        return match word.len() {
            0..=2 => 2,
            3..=4 => 10,
            len @ 5..=7 => 14 + len as u32,
            len => 18 + len as u32,
        };
    }
    // Weak substring evidence for longer keywords
    if word.len() > 5 && name.contains(word) {
        return 3;
    }
    0
}

fn position_bonus(index: usize, count: usize) -> u32 {
    if index + 1 == count {
        20
    } else if index == 0 {
        12
    } else {
        8
    }
}

/// Whole-word occurrence check (neighbors must not be alphanumeric)
pub(crate) fn word_boundary_hit(name: &str, word: &str) -> bool {
    if word.is_empty() {
        return false;
    }
    name.match_indices(word).any(|(start, matched)| {
        let before_ok = name[..start]
            .chars()
            .next_back()
            .map_or(true, |c| !c.is_ascii_alphanumeric());
        let after_ok = name[start + matched.len()..]
            .chars()
            .next()
            .map_or(true, |c| !c.is_ascii_alphanumeric());
        before_ok && after_ok
    })
}

/// Confidence boost when extracted metadata corroborates the name
fn metadata_boost(metadata: &AudioMetadata) -> u32 {
    let mut boost = 0;
    if metadata.bpm.is_some() {
        boost += 5;
    }
    if metadata.key.is_some() {
        boost += 5;
    }
    if metadata.mood.is_some() {
        boost += 3;
    }
    boost
}

/// Map a sample score onto a 0-100 confidence curve
///
/// Piecewise-linear and monotonic: weak substring evidence stays low while
/// a single exact token match already reads as reliable.
fn sample_confidence(score: u32) -> u8 {
    let s = f64::from(score);
    let confidence = match score {
        0 => 0.0,
        1..=9 => (s / 10.0 * 35.0).round(),
        10..=29 => 35.0 + ((s - 10.0) / 20.0 * 25.0).round(),
        30..=59 => 60.0 + ((s - 30.0) / 30.0 * 20.0).round(),
        60..=89 => 80.0 + ((s - 60.0) / 30.0 * 15.0).round(),
        _ => (95.0 + ((s - 90.0) / 5.0).round()).min(100.0),
    };
    confidence as u8
}

/// Map a preset score onto a 0-100 confidence curve
///
/// Calibrated so a prefix-code hit (50 points) reads as high confidence.
fn preset_confidence(score: u32) -> u8 {
    let s = f64::from(score);
    let confidence = match score {
        0 => 0.0,
        1..=9 => (s / 10.0 * 40.0).round(),
        10..=24 => 40.0 + ((s - 10.0) / 15.0 * 25.0).round(),
        25..=49 => 65.0 + ((s - 25.0) / 25.0 * 20.0).round(),
        _ => (85.0 + ((s - 50.0) / 10.0).round()).min(100.0),
    };
    confidence as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use sorter_core::{CategoryKeywords, DictionaryMeta};

    fn dict(categories: Vec<CategoryKeywords>) -> KeywordDictionary {
        KeywordDictionary {
            categories,
            meta: DictionaryMeta {
                protected: vec!["Misc".to_string()],
            },
        }
    }

    fn kick_dict() -> KeywordDictionary {
        dict(vec![
            CategoryKeywords::new("Kick", &["kick"]),
            CategoryKeywords::new("Misc", &[]),
        ])
    }

    #[test]
    fn shorthand_token_expands_to_keyword() {
        let result = classify_sample("kck_808.wav", &kick_dict(), None);
        assert_eq!(result.category, "Kick");
        // 60 for the expanded match plus 12 for the leading position
        assert_eq!(result.score, 72);
        assert_eq!(result.confidence, 86);
    }

    #[test]
    fn raw_token_match_outranks_expanded_match() {
        let d = dict(vec![
            CategoryKeywords::new("HiHat", &["hat"]),
            CategoryKeywords::new("Misc", &[]),
        ]);
        // expand("hat") is "hihat", so only the raw tier can hit
        let result = classify_sample("hat_01.wav", &d, None);
        assert_eq!(result.category, "HiHat");
        assert_eq!(result.score, 77);
        assert_eq!(result.confidence, 89);
    }

    #[test]
    fn midi_files_short_circuit() {
        let result = classify_sample("anything at all.mid", &kick_dict(), None);
        assert_eq!(result.category, "MIDI");
        assert_eq!(result.score, 100);
        assert_eq!(result.confidence, 100);
    }

    #[test]
    fn fuzzy_tier_tolerates_one_typo() {
        let d = dict(vec![
            CategoryKeywords::new("Percussion", &["percussion"]),
            CategoryKeywords::new("Misc", &[]),
        ]);
        let result = classify_sample("percusion_01.wav", &d, None);
        assert_eq!(result.category, "Percussion");
        // round((55 + 10) * 0.75)
        assert_eq!(result.score, 49);
        assert_eq!(result.confidence, 73);
    }

    #[test]
    fn short_keyword_needs_a_word_boundary() {
        let d = dict(vec![
            CategoryKeywords::new("FX", &["fx"]),
            CategoryKeywords::new("Misc", &[]),
        ]);
        // Spaces are not token separators, so only the whole-word tier can hit
        let hit = classify_sample("air fx 1.wav", &d, None);
        assert_eq!(hit.category, "FX");
        assert_eq!(hit.score, 2);
        assert_eq!(hit.confidence, 7);

        // "fx2" has an alphanumeric neighbor, so nothing matches
        let miss = classify_sample("air fx2.wav", &d, None);
        assert_eq!(miss.category, "Misc");
        assert_eq!(miss.score, 0);
        assert_eq!(miss.confidence, 0);
    }

    #[test]
    fn ties_resolve_to_the_earlier_category() {
        let d = dict(vec![
            CategoryKeywords::new("First", &["kick"]),
            CategoryKeywords::new("Second", &["kick"]),
            CategoryKeywords::new("Misc", &[]),
        ]);
        let result = classify_sample("kick.wav", &d, None);
        assert_eq!(result.category, "First");
    }

    #[test]
    fn metadata_lifts_confidence_but_not_category() {
        let mut metadata = AudioMetadata::empty();
        metadata.bpm = Some(140.0);
        metadata.key = Some("Cm".to_string());

        let plain = classify_sample("kck_808.wav", &kick_dict(), None);
        let boosted = classify_sample("kck_808.wav", &kick_dict(), Some(&metadata));
        assert_eq!(boosted.category, plain.category);
        assert_eq!(boosted.score, plain.score);
        // score 72 + 10 boost lands at 82 on the curve
        assert_eq!(boosted.confidence, 91);
    }

    #[test]
    fn metadata_never_rescues_a_zero_score() {
        let mut metadata = AudioMetadata::empty();
        metadata.bpm = Some(120.0);
        let result = classify_sample("zzzz.wav", &kick_dict(), Some(&metadata));
        assert_eq!(result.category, "Misc");
        assert_eq!(result.confidence, 0);
    }

    #[test]
    fn preset_prefix_code_scores_high() {
        let d = dict(vec![
            CategoryKeywords::new("Bass", &["bass", "bs"]),
            CategoryKeywords::new("Lead", &["lead"]),
            CategoryKeywords::new("Misc", &[]),
        ]);
        let result = classify_preset("BS Growler.fxp", &d);
        assert_eq!(result.category, "Bass");
        assert_eq!(result.score, 50);
        assert_eq!(result.confidence, 85);
    }

    #[test]
    fn preset_word_boundary_scores_modestly() {
        let d = dict(vec![
            CategoryKeywords::new("Lead", &["lead"]),
            CategoryKeywords::new("Misc", &[]),
        ]);
        let result = classify_preset("Dark Lead 01.fxp", &d);
        assert_eq!(result.category, "Lead");
        assert_eq!(result.score, 4);
        assert_eq!(result.confidence, 16);
    }

    #[test]
    fn unmatched_preset_lands_in_misc() {
        let d = dict(vec![
            CategoryKeywords::new("Lead", &["lead"]),
            CategoryKeywords::new("Misc", &[]),
        ]);
        let result = classify_preset("Init.fxp", &d);
        assert_eq!(result.category, "Misc");
        assert_eq!(result.confidence, 0);
    }

    #[test]
    fn sample_confidence_is_monotonic() {
        let mut last = 0;
        for score in 0..=120 {
            let value = sample_confidence(score);
            assert!(value >= last, "dip at score {score}");
            assert!(value <= 100);
            last = value;
        }
    }

    #[test]
    fn preset_confidence_is_monotonic() {
        let mut last = 0;
        for score in 0..=120 {
            let value = preset_confidence(score);
            assert!(value >= last, "dip at score {score}");
            assert!(value <= 100);
            last = value;
        }
    }

    #[test]
    fn repeated_runs_give_identical_classifications() {
        let samples = crate::keywords::default_dictionary(sorter_core::SortMode::Samples);
        let presets = crate::keywords::default_dictionary(sorter_core::SortMode::Presets);
        for name in ["kck_808.wav", "hat_01.wav", "percusion loop.wav", "zzz.wav"] {
            let first = classify_sample(name, &samples, None);
            assert_eq!(classify_sample(name, &samples, None), first);
        }
        for name in ["BS Growler.fxp", "Dark Lead 01.fxp", "Init.fxp"] {
            let first = classify_preset(name, &presets);
            assert_eq!(classify_preset(name, &presets), first);
        }
    }
}
