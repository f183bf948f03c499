//! Readability scores for German text.
//!
//! Two independent measures are computed: the German adaptation of the
//! Flesch Reading Ease (Amstad), where higher means easier, and the
//! Wiener Sachtextformel, which ranges from about 4 (easy) to 15 (hard).
//! Text without any words scores `NaN` on both.

mod text;

pub use text::{syllables, words, TextStats};

use serde::{Deserialize, Serialize};

const FRE_BASE: f64 = 180.0;
const FRE_SENTENCE_LENGTH: f64 = 1.0;
const FRE_SYLLABLES_PER_WORD: f64 = 58.5;

/// The four published variants of the Wiener Sachtextformel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WstfVariant {
    /// Prose text; the variant used throughout the pipeline.
    #[default]
    First,
    Second,
    Third,
    Fourth,
}

/// Both scores for one block of text.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub fre: f64,
    pub wstf: f64,
}

impl Scores {
    pub fn of(text: &str) -> Self {
        let stats = TextStats::of(text);
        Self {
            fre: fre_from_stats(&stats),
            wstf: wstf_from_stats(&stats, WstfVariant::First),
        }
    }
}

pub fn flesch_reading_ease(text: &str) -> f64 {
    fre_from_stats(&TextStats::of(text))
}

pub fn wiener_sachtextformel(text: &str, variant: WstfVariant) -> f64 {
    wstf_from_stats(&TextStats::of(text), variant)
}

fn fre_from_stats(s: &TextStats) -> f64 {
    if s.is_empty() {
        return f64::NAN;
    }
    let asl = s.words as f64 / s.sentences as f64;
    let asw = s.syllables as f64 / s.words as f64;
    round_to(
        FRE_BASE - FRE_SENTENCE_LENGTH * asl - FRE_SYLLABLES_PER_WORD * asw,
        2,
    )
}

fn wstf_from_stats(s: &TextStats, variant: WstfVariant) -> f64 {
    if s.is_empty() {
        return f64::NAN;
    }
    let words = s.words as f64;
    let ms = 100.0 * s.polysyllables as f64 / words;
    let sl = words / s.sentences as f64;
    let iw = 100.0 * s.long_words as f64 / words;
    let es = 100.0 * s.monosyllables as f64 / words;

    let score = match variant {
        WstfVariant::First => 0.1935 * ms + 0.1672 * sl + 0.1297 * iw - 0.0327 * es - 0.875,
        WstfVariant::Second => 0.2007 * ms + 0.1682 * sl + 0.1373 * iw - 2.779,
        WstfVariant::Third => 0.2963 * ms + 0.1905 * sl - 1.1144,
        WstfVariant::Fourth => 0.2744 * ms + 0.2656 * sl - 1.693,
    };
    round_to(score, 1)
}

fn round_to(x: f64, places: i32) -> f64 {
    let f = 10f64.powi(places);
    (x * f).round() / f
}

/// Mean over the finite values; `NaN` when there are none.
pub fn mean<I: IntoIterator<Item = f64>>(values: I) -> f64 {
    let (sum, n) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        f64::NAN
    } else {
        sum / n as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fre_simple_sentence() {
        // 2 words, 1 sentence, 3 syllables
        assert_eq!(flesch_reading_ease("Hallo Welt."), 90.25);
    }

    #[test]
    fn test_wstf_first_variant() {
        assert_eq!(wiener_sachtextformel("Hallo Welt.", WstfVariant::First), -2.2);
    }

    const KITA: &str = "Die Gemeinde baut einen Kindergarten. Das Rathaus liegt zentral.";

    #[test]
    fn test_stats_multi_sentence() {
        let s = TextStats::of(KITA);
        assert_eq!(
            s,
            TextStats {
                sentences: 2,
                words: 9,
                syllables: 17,
                polysyllables: 2,
                monosyllables: 4,
                long_words: 4,
            }
        );
    }

    #[test]
    fn test_wstf_all_variants() {
        // MS = 22.22, SL = 4.5, IW = 44.44, ES = 44.44
        assert_eq!(wiener_sachtextformel(KITA, WstfVariant::First), 8.5);
        assert_eq!(wiener_sachtextformel(KITA, WstfVariant::Second), 8.5);
        assert_eq!(wiener_sachtextformel(KITA, WstfVariant::Third), 6.3);
        assert_eq!(wiener_sachtextformel(KITA, WstfVariant::Fourth), 5.6);
    }

    #[test]
    fn test_fre_multi_sentence() {
        // ASL = 4.5, ASW = 17 / 9
        assert_eq!(flesch_reading_ease(KITA), 65.0);
    }

    #[test]
    fn test_empty_text_is_nan() {
        let s = Scores::of("   ");
        assert!(s.fre.is_nan());
        assert!(s.wstf.is_nan());
    }

    #[test]
    fn test_scores_deterministic() {
        let text = "In unserer Gemeinde gibt es drei Kinderkrippen und vier Kindergärten. \
                    Die Trägerschaft liegt bei der Gemeinde sowie bei der evangelischen Kirche.";
        assert_eq!(Scores::of(text), Scores::of(text));
    }

    #[test]
    fn test_easy_text_scores_easier_than_hard_text() {
        let easy = "Das ist ein Haus. Das Haus ist rot. Ich mag das Haus.";
        let hard = "Die Trägerschaft der Kindertagesstätten obliegt grundsätzlich der \
                    kommunalen Gebietskörperschaft beziehungsweise kirchlichen Institutionen.";
        let (e, h) = (Scores::of(easy), Scores::of(hard));
        assert!(e.fre > h.fre);
        assert!(e.wstf < h.wstf);
    }

    #[test]
    fn test_mean_skips_nan() {
        assert_eq!(mean([1.0, f64::NAN, 3.0]), 2.0);
        assert!(mean(Vec::<f64>::new()).is_nan());
    }
}
