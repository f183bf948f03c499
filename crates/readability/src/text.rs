//! Word, sentence and syllable counting for German prose.

use std::sync::OnceLock;

use hyphenation::{Hyphenator, Language, Load, Standard};

const VOWELS: &[char] = &['a', 'e', 'i', 'o', 'u', 'ä', 'ö', 'ü', 'y'];
/// Adjacent vowels spoken as two syllables (`The-a-ter`, `Po-e-sie`, `Feu-er`).
const HIATUS: &[(char, char)] = &[
    ('e', 'a'),
    ('e', 'o'),
    ('i', 'a'),
    ('i', 'o'),
    ('o', 'a'),
    ('o', 'e'),
    ('u', 'a'),
    ('u', 'e'),
    ('u', 'o'),
];
const SENTENCE_END: &[char] = &['.', '!', '?'];

/// Raw counts every formula in this crate is derived from.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TextStats {
    pub sentences: usize,
    pub words: usize,
    pub syllables: usize,
    /// Words with three or more syllables.
    pub polysyllables: usize,
    /// Words with exactly one syllable.
    pub monosyllables: usize,
    /// Words with more than six letters.
    pub long_words: usize,
}

impl TextStats {
    pub fn of(text: &str) -> Self {
        let mut stats = TextStats::default();

        for sentence in text.split(SENTENCE_END) {
            let mut had_word = false;
            for word in words(sentence) {
                had_word = true;
                let syl = syllables(word);
                stats.words += 1;
                stats.syllables += syl;
                if syl >= 3 {
                    stats.polysyllables += 1;
                }
                if syl == 1 {
                    stats.monosyllables += 1;
                }
                if word.chars().filter(|c| c.is_alphabetic()).count() > 6 {
                    stats.long_words += 1;
                }
            }
            if had_word {
                stats.sentences += 1;
            }
        }

        stats
    }

    pub fn is_empty(&self) -> bool {
        self.words == 0
    }
}

/// Whitespace tokens with surrounding punctuation removed. Tokens without
/// any alphanumeric character (dashes, bullets, quotes) are not words.
pub fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split_whitespace()
        .map(|tok| tok.trim_matches(|c: char| !c.is_alphanumeric()))
        .filter(|tok| tok.chars().any(char::is_alphanumeric))
}

static GERMAN: OnceLock<Option<Standard>> = OnceLock::new();

fn dictionary() -> Option<&'static Standard> {
    GERMAN
        .get_or_init(|| match Standard::from_embedded(Language::German1996) {
            Ok(dict) => Some(dict),
            Err(e) => {
                tracing::warn!(error = %e, "German hyphenation patterns unavailable, counting vowel groups");
                None
            }
        })
        .as_ref()
}

/// Syllables of a word: hyphenation segments from the German (1996)
/// patterns, summed over the alphabetic parts of compounds like
/// `Kranken-Haus`. The patterns never break off a single leading or
/// trailing letter (`Abend`), so a part never counts fewer syllables than
/// its vowel groups. Every word has at least one syllable.
pub fn syllables(word: &str) -> usize {
    let count: usize = word
        .split(|c: char| !c.is_alphabetic())
        .filter(|part| !part.is_empty())
        .map(|part| {
            let lower = part.to_lowercase();
            let segments = dictionary().map_or(0, |d| d.hyphenate(&lower).breaks.len() + 1);
            segments.max(vowel_groups(&lower))
        })
        .sum();
    count.max(1)
}

/// Vowel groups of a lowercase word, split at hiatus pairs. The `u` of
/// `qu` is a consonant.
fn vowel_groups(word: &str) -> usize {
    let mut count = 0;
    let mut prev_vowel: Option<char> = None;
    let mut after_q = false;
    for c in word.chars() {
        if VOWELS.contains(&c) && !(c == 'u' && after_q) {
            match prev_vowel {
                Some(p) if !HIATUS.contains(&(p, c)) => {}
                _ => count += 1,
            }
            prev_vowel = Some(c);
        } else {
            prev_vowel = None;
        }
        after_q = c == 'q';
    }
    count
}
