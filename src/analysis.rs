use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::nlp::{ParsedDocument, Pipeline, SentimentScores};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub text: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SentimentLabel {
    Positive,
    Negative,
    Neutral,
}

impl SentimentLabel {
    /// Strict sign test: a polarity of exactly zero is neutral.
    pub fn from_polarity(polarity: f64) -> Self {
        if polarity > 0.0 {
            SentimentLabel::Positive
        } else if polarity < 0.0 {
            SentimentLabel::Negative
        } else {
            SentimentLabel::Neutral
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SentimentResult {
    pub polarity: f64,
    pub subjectivity: f64,
    pub label: SentimentLabel,
}

impl From<SentimentScores> for SentimentResult {
    fn from(scores: SentimentScores) -> Self {
        Self {
            polarity: scores.polarity,
            subjectivity: scores.subjectivity,
            label: SentimentLabel::from_polarity(scores.polarity),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub text: String,
    pub label: String,
    /// Character offsets, end-exclusive.
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub sentiment: SentimentResult,
    pub entities: Vec<Entity>,
    pub key_phrases: Vec<String>,
    pub processed_text: String,
}

/// Runs sentiment scoring and document parsing side by side and merges the results.
pub fn analyze(pipeline: &Pipeline, text: &str) -> Result<AnalysisResponse> {
    let (scores, parsed) = rayon::join(
        || pipeline.scorer().score(text),
        || pipeline.parser().parse(text),
    );
    let scores = scores.context("sentiment scoring failed")?;
    let parsed = parsed.context("document parsing failed")?;

    assemble(text, scores, parsed)
}

fn assemble(text: &str, scores: SentimentScores, parsed: ParsedDocument) -> Result<AnalysisResponse> {
    let mut offsets = CharOffsets::new(text);
    let mut entities = Vec::with_capacity(parsed.entities.len());
    for entity in &parsed.entities {
        let span = entity.span;
        let surface = text
            .get(span.start..span.end)
            .ok_or_else(|| anyhow!("parser returned invalid entity span {}..{}", span.start, span.end))?;
        entities.push(Entity {
            text: surface.to_string(),
            label: entity.label.to_string(),
            start: offsets.char_index(span.start),
            end: offsets.char_index(span.end),
        });
    }

    let key_phrases = parsed
        .noun_chunks
        .iter()
        .map(|span| {
            text.get(span.start..span.end)
                .map(str::to_string)
                .ok_or_else(|| anyhow!("parser returned invalid chunk span {}..{}", span.start, span.end))
        })
        .collect::<Result<Vec<_>>>()?;

    Ok(AnalysisResponse {
        sentiment: scores.into(),
        entities,
        key_phrases,
        processed_text: text.to_string(),
    })
}

// Converts byte offsets to character offsets, walking forward from the last lookup.
struct CharOffsets<'a> {
    text: &'a str,
    byte: usize,
    chars: usize,
}

impl<'a> CharOffsets<'a> {
    fn new(text: &'a str) -> Self {
        Self { text, byte: 0, chars: 0 }
    }

    fn char_index(&mut self, byte: usize) -> usize {
        if byte < self.byte {
            self.byte = 0;
            self.chars = 0;
        }
        self.chars += self.text[self.byte..byte].chars().count();
        self.byte = byte;
        self.chars
    }
}
