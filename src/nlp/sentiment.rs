// Sentiment scoring using a lexicon-based approach
// Each lexicon word carries a (polarity, subjectivity) pair. The document scores are the
// averages over the words that were assessed, with intensifiers and negations applied.
use anyhow::Result;
use once_cell::sync::Lazy;
use std::collections::{HashMap, HashSet};

use super::{SentimentScorer, SentimentScores};

// (polarity, subjectivity)
static LEXICON: Lazy<HashMap<&'static str, (f64, f64)>> = Lazy::new(|| {
    [
        // Positive
        ("good", (0.7, 0.6)),
        ("great", (0.8, 0.75)),
        ("excellent", (1.0, 1.0)),
        ("wonderful", (1.0, 1.0)),
        ("fantastic", (0.4, 0.9)),
        ("amazing", (0.6, 0.9)),
        ("awesome", (1.0, 1.0)),
        ("love", (0.5, 0.6)),
        ("loved", (0.7, 0.8)),
        ("loves", (0.5, 0.6)),
        ("lovely", (0.5, 0.75)),
        ("happy", (0.8, 1.0)),
        ("joy", (0.8, 0.9)),
        ("pleased", (0.5, 1.0)),
        ("delighted", (0.7, 0.8)),
        ("satisfied", (0.5, 1.0)),
        ("perfect", (1.0, 1.0)),
        ("beautiful", (0.85, 1.0)),
        ("brilliant", (0.9, 1.0)),
        ("outstanding", (0.5, 0.75)),
        ("superb", (1.0, 1.0)),
        ("magnificent", (1.0, 1.0)),
        ("marvelous", (1.0, 1.0)),
        ("terrific", (1.0, 1.0)),
        ("fabulous", (0.4, 0.9)),
        ("exceptional", (0.66, 1.0)),
        ("impressive", (1.0, 1.0)),
        ("remarkable", (0.75, 0.75)),
        ("best", (1.0, 0.3)),
        ("better", (0.5, 0.5)),
        ("positive", (0.23, 0.55)),
        ("success", (0.3, 0.3)),
        ("successful", (0.75, 0.95)),
        ("win", (0.8, 0.4)),
        ("winner", (0.5, 0.5)),
        ("winning", (0.5, 0.75)),
        ("triumph", (0.5, 0.5)),
        ("enjoy", (0.4, 0.5)),
        ("enjoyed", (0.4, 0.5)),
        ("pleasant", (0.73, 0.97)),
        ("comfortable", (0.4, 0.8)),
        ("excited", (0.4, 0.75)),
        ("exciting", (0.3, 0.8)),
        ("thrilled", (0.6, 0.8)),
        ("like", (0.2, 0.3)),
        ("liked", (0.3, 0.4)),
        ("favorite", (0.5, 1.0)),
        ("nice", (0.6, 1.0)),
        ("fine", (0.42, 0.5)),
        ("easy", (0.43, 0.83)),
        ("helpful", (0.5, 0.6)),
        ("recommend", (0.3, 0.4)),
        ("fun", (0.3, 0.2)),
        ("glad", (0.5, 1.0)),
        ("cool", (0.35, 0.65)),
        // Negative
        ("bad", (-0.7, 0.67)),
        ("terrible", (-1.0, 1.0)),
        ("awful", (-1.0, 1.0)),
        ("horrible", (-1.0, 1.0)),
        ("poor", (-0.4, 0.6)),
        ("worst", (-1.0, 1.0)),
        ("worse", (-0.4, 0.6)),
        ("hate", (-0.8, 0.9)),
        ("hated", (-0.9, 0.7)),
        ("angry", (-0.5, 1.0)),
        ("sad", (-0.5, 1.0)),
        ("upset", (-0.5, 0.6)),
        ("disappointed", (-0.75, 0.75)),
        ("disappointing", (-0.6, 0.7)),
        ("dissatisfied", (-0.5, 1.0)),
        ("unhappy", (-0.6, 0.9)),
        ("fail", (-0.5, 0.3)),
        ("failure", (-0.32, 0.3)),
        ("failed", (-0.5, 0.3)),
        ("problem", (-0.2, 0.3)),
        ("wrong", (-0.5, 0.9)),
        ("difficult", (-0.5, 1.0)),
        ("hard", (-0.29, 0.54)),
        ("broken", (-0.4, 0.4)),
        ("painful", (-0.7, 0.9)),
        ("hurt", (-0.5, 0.6)),
        ("damaged", (-0.4, 0.5)),
        ("disaster", (-0.8, 0.8)),
        ("negative", (-0.3, 0.4)),
        ("loss", (-0.3, 0.3)),
        ("lost", (-0.2, 0.2)),
        ("reject", (-0.3, 0.4)),
        ("rejected", (-0.3, 0.4)),
        ("dislike", (-0.5, 0.7)),
        ("unpleasant", (-0.6, 0.9)),
        ("uncomfortable", (-0.5, 0.8)),
        ("frustrated", (-0.7, 0.7)),
        ("frustrating", (-0.7, 0.8)),
        ("boring", (-1.0, 1.0)),
        ("useless", (-0.5, 0.2)),
        ("slow", (-0.3, 0.39)),
        ("expensive", (-0.5, 0.7)),
        ("ugly", (-0.7, 1.0)),
        ("stupid", (-0.8, 1.0)),
        ("annoying", (-0.8, 0.9)),
        ("sorry", (-0.5, 1.0)),
    ]
    .iter()
    .copied()
    .collect()
});

// Intensifiers scale the next assessed word
static INTENSIFIERS: Lazy<HashMap<&'static str, f64>> = Lazy::new(|| {
    [
        ("very", 1.3),
        ("really", 1.2),
        ("extremely", 1.5),
        ("absolutely", 1.4),
        ("incredibly", 1.4),
        ("highly", 1.3),
        ("totally", 1.3),
        ("so", 1.2),
        ("quite", 1.1),
        ("somewhat", 0.8),
        ("slightly", 0.7),
        ("barely", 0.5),
    ]
    .iter()
    .copied()
    .collect()
});

// Negation words
static NEGATIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "not", "no", "never", "nothing", "nobody", "nowhere", "neither", "nor",
        "none", "isn't", "wasn't", "don't", "doesn't", "didn't", "can't",
        "couldn't", "won't", "wouldn't", "aren't", "weren't", "n't",
    ]
    .iter()
    .copied()
    .collect()
});

const NEGATION_FACTOR: f64 = -0.5;

/// Scores text against the built-in word lexicon.
#[derive(Debug, Default, Clone, Copy)]
pub struct LexiconSentiment;

impl SentimentScorer for LexiconSentiment {
    fn name(&self) -> &'static str {
        "lexicon"
    }

    fn score(&self, text: &str) -> Result<SentimentScores> {
        Ok(analyze_sentiment_text(text))
    }
}

pub fn analyze_sentiment_text(text: &str) -> SentimentScores {
    let words: Vec<String> = text
        .to_lowercase()
        .replace('’', "'")
        .split(|c: char| !c.is_alphanumeric() && c != '\'')
        .map(|s| s.trim_matches('\''))
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect();

    let mut assessments: Vec<(f64, f64)> = Vec::new();

    for (i, word) in words.iter().enumerate() {
        let Some(&(polarity, subjectivity)) = LEXICON.get(word.as_str()) else {
            continue;
        };

        let multiplier = if i > 0 {
            INTENSIFIERS.get(words[i - 1].as_str()).copied().unwrap_or(1.0)
        } else {
            1.0
        };

        // Negation in the previous 1-2 words
        let is_negated = (i > 0 && NEGATIONS.contains(words[i - 1].as_str()))
            || (i > 1 && NEGATIONS.contains(words[i - 2].as_str()));

        let mut p = (polarity * multiplier).clamp(-1.0, 1.0);
        let s = (subjectivity * multiplier).clamp(0.0, 1.0);
        if is_negated {
            p *= NEGATION_FACTOR;
        }
        assessments.push((p, s));
    }

    if assessments.is_empty() {
        return SentimentScores::default();
    }

    let n = assessments.len() as f64;
    let polarity = assessments.iter().map(|(p, _)| p).sum::<f64>() / n;
    let subjectivity = assessments.iter().map(|(_, s)| s).sum::<f64>() / n;

    SentimentScores {
        polarity: polarity.clamp(-1.0, 1.0),
        subjectivity: subjectivity.clamp(0.0, 1.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_sentiment_positive() {
        let scores = analyze_sentiment_text("This is a wonderful day! I'm feeling great and happy!");
        assert!(scores.polarity > 0.0);
        assert!(scores.subjectivity > 0.0);
    }

    #[test]
    fn test_analyze_sentiment_negative() {
        let scores = analyze_sentiment_text("This is terrible and awful. I hate it!");
        assert!(scores.polarity < 0.0);
    }

    #[test]
    fn test_analyze_sentiment_neutral() {
        let scores = analyze_sentiment_text("The sky is blue. The grass is green.");
        assert_eq!(scores.polarity, 0.0);
        assert_eq!(scores.subjectivity, 0.0);
    }

    #[test]
    fn test_negation_handling() {
        let scores = analyze_sentiment_text("This is not good at all.");
        assert!((scores.polarity - (-0.35)).abs() < 1e-9);
    }

    #[test]
    fn test_contraction_negation() {
        let scores = analyze_sentiment_text("It doesn’t work and it isn't good");
        assert!(scores.polarity < 0.0);
    }

    #[test]
    fn test_intensifier_clamps() {
        let plain = analyze_sentiment_text("good");
        let intensified = analyze_sentiment_text("extremely good");
        assert!(intensified.polarity > plain.polarity);
        assert!(intensified.polarity <= 1.0);
        assert_eq!(analyze_sentiment_text("extremely excellent").polarity, 1.0);
    }

    #[test]
    fn test_averages_mixed_words() {
        let scores = analyze_sentiment_text("good but bad");
        assert!(scores.polarity.abs() < 1e-9);
        assert!((scores.subjectivity - 0.635).abs() < 1e-9);
    }

    #[test]
    fn test_empty_text() {
        assert_eq!(analyze_sentiment_text(""), SentimentScores::default());
        assert_eq!(LexiconSentiment.score("   ").unwrap(), SentimentScores::default());
    }
}
