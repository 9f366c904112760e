//! Sentiment scoring for tweet text.
//!
//! Scoring sits behind the [`SentimentAnalyzer`] trait so searches can plug in
//! any model. [`LexiconAnalyzer`] is the built-in default: a word lexicon with
//! intensifier and negation handling, producing a polarity and a subjectivity
//! score per text.

use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;
use std::sync::OnceLock;

/// Polarity and subjectivity of a piece of text.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct Sentiment {
    /// From -1.0 (negative) to 1.0 (positive)
    pub polarity: f64,
    /// From 0.0 (objective) to 1.0 (subjective)
    pub subjectivity: f64,
}

/// A pure text → sentiment function.
pub trait SentimentAnalyzer: Send + Sync {
    fn analyze(&self, text: &str) -> Sentiment;
}

impl<F> SentimentAnalyzer for F
where
    F: Fn(&str) -> Sentiment + Send + Sync,
{
    fn analyze(&self, text: &str) -> Sentiment {
        self(text)
    }
}

/// (word, polarity, subjectivity)
const LEXICON: &[(&str, f64, f64)] = &[
    ("amazing", 0.6, 0.9),
    ("awesome", 1.0, 1.0),
    ("beautiful", 0.85, 1.0),
    ("best", 1.0, 0.3),
    ("brilliant", 0.9, 1.0),
    ("cool", 0.35, 0.65),
    ("easy", 0.43, 0.83),
    ("excellent", 1.0, 1.0),
    ("excited", 0.375, 0.75),
    ("fantastic", 0.4, 0.9),
    ("fast", 0.2, 0.6),
    ("favorite", 0.5, 1.0),
    ("free", 0.4, 0.8),
    ("fun", 0.3, 0.2),
    ("glad", 0.5, 1.0),
    ("good", 0.7, 0.6),
    ("great", 0.8, 0.75),
    ("happy", 0.8, 1.0),
    ("interesting", 0.5, 0.5),
    ("love", 0.5, 0.6),
    ("lovely", 0.5, 0.75),
    ("new", 0.136, 0.455),
    ("nice", 0.6, 1.0),
    ("perfect", 1.0, 1.0),
    ("useful", 0.3, 0.0),
    ("win", 0.8, 0.4),
    ("wonderful", 1.0, 1.0),
    ("angry", -0.5, 1.0),
    ("awful", -1.0, 1.0),
    ("bad", -0.7, 0.667),
    ("boring", -1.0, 1.0),
    ("broken", -0.4, 0.4),
    ("disappointing", -0.6, 0.7),
    ("fail", -0.5, 0.3),
    ("hard", -0.292, 0.542),
    ("hate", -0.8, 0.9),
    ("horrible", -1.0, 1.0),
    ("poor", -0.4, 0.6),
    ("sad", -0.5, 1.0),
    ("scary", -0.5, 1.0),
    ("slow", -0.3, 0.4),
    ("stupid", -0.8, 1.0),
    ("terrible", -1.0, 1.0),
    ("ugly", -0.7, 1.0),
    ("worst", -1.0, 1.0),
    ("wrong", -0.5, 0.9),
];

const INTENSIFIERS: &[(&str, f64)] = &[
    ("absolutely", 1.5),
    ("extremely", 1.5),
    ("incredibly", 1.5),
    ("quite", 1.1),
    ("really", 1.3),
    ("so", 1.2),
    ("super", 1.3),
    ("totally", 1.3),
    ("very", 1.3),
];

const NEGATIONS: &[&str] = &["not", "no", "never", "nothing", "neither", "nor"];

/// Multiplier applied to the polarity of a negated word.
const NEGATION_FACTOR: f64 = -0.5;

fn lexicon() -> &'static HashMap<&'static str, (f64, f64)> {
    static LEX: OnceLock<HashMap<&'static str, (f64, f64)>> = OnceLock::new();
    LEX.get_or_init(|| LEXICON.iter().map(|(w, p, s)| (*w, (*p, *s))).collect())
}

fn word_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"[a-z]+(?:'[a-z]+)?").expect("word pattern is valid"))
}

fn intensity(word: &str) -> Option<f64> {
    INTENSIFIERS
        .iter()
        .find(|(w, _)| *w == word)
        .map(|(_, factor)| *factor)
}

fn is_negation(word: &str) -> bool {
    NEGATIONS.contains(&word) || word.ends_with("n't")
}

/// Lexicon-based analyzer.
///
/// Each lexicon word found in the text is scored; an intensifier directly
/// before it scales both scores, and a negation within the two preceding words
/// flips and halves its polarity. The text's sentiment is the mean over scored
/// words, or zero for both when nothing is scored.
#[derive(Debug, Clone, Copy, Default)]
pub struct LexiconAnalyzer;

impl LexiconAnalyzer {
    pub fn new() -> Self {
        LexiconAnalyzer
    }
}

impl SentimentAnalyzer for LexiconAnalyzer {
    fn analyze(&self, text: &str) -> Sentiment {
        let lowered = text.to_lowercase();
        let words: Vec<&str> = word_regex()
            .find_iter(&lowered)
            .map(|m| m.as_str())
            .collect();

        let mut scored: Vec<(f64, f64)> = Vec::new();
        for (i, word) in words.iter().enumerate() {
            let Some(&(mut polarity, mut subjectivity)) = lexicon().get(word) else {
                continue;
            };

            let previous = i.checked_sub(1).map(|j| words[j]);
            if let Some(factor) = previous.and_then(intensity) {
                polarity *= factor;
                subjectivity *= factor;
            }

            let negated = words[i.saturating_sub(2)..i]
                .iter()
                .any(|w| is_negation(w));
            if negated {
                polarity *= NEGATION_FACTOR;
            }

            scored.push((polarity.clamp(-1.0, 1.0), subjectivity.clamp(0.0, 1.0)));
        }

        if scored.is_empty() {
            return Sentiment::default();
        }

        let n = scored.len() as f64;
        let polarity = scored.iter().map(|(p, _)| p).sum::<f64>() / n;
        let subjectivity = scored.iter().map(|(_, s)| s).sum::<f64>() / n;

        Sentiment {
            polarity: polarity.clamp(-1.0, 1.0),
            subjectivity: subjectivity.clamp(0.0, 1.0),
        }
    }
}
