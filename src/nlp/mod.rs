// NLP components for textlens
pub mod chunker;
pub mod ner;
pub mod sentiment;
pub mod tokenizer;

use anyhow::Result;
use log::info;
use std::sync::Arc;

pub use ner::{extract_entities_from_text, EntityLabel, EntitySpan};
pub use sentiment::{analyze_sentiment_text, LexiconSentiment};

/// Byte range into the analysed text, end-exclusive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SentimentScores {
    pub polarity: f64,
    pub subjectivity: f64,
}

/// Entities and noun chunks found in one document, both in order of appearance.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedDocument {
    pub entities: Vec<EntitySpan>,
    pub noun_chunks: Vec<Span>,
}

pub trait SentimentScorer: Send + Sync {
    fn name(&self) -> &'static str;
    fn score(&self, text: &str) -> Result<SentimentScores>;
}

pub trait DocumentParser: Send + Sync {
    fn name(&self) -> &'static str;
    fn parse(&self, text: &str) -> Result<ParsedDocument>;
}

/// Entity recognizer and noun chunker driven by patterns, gazetteers and word lists.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleParser;

impl DocumentParser for RuleParser {
    fn name(&self) -> &'static str {
        "rules"
    }

    fn parse(&self, text: &str) -> Result<ParsedDocument> {
        let tokens = tokenizer::tokenize(text);
        Ok(ParsedDocument {
            entities: extract_entities_from_text(text),
            noun_chunks: chunker::noun_chunks(&tokens),
        })
    }
}

/// The loaded sentiment scorer and document parser, shared read-only by every request.
#[derive(Clone)]
pub struct Pipeline {
    scorer: Arc<dyn SentimentScorer>,
    parser: Arc<dyn DocumentParser>,
}

impl Pipeline {
    pub fn new(scorer: Arc<dyn SentimentScorer>, parser: Arc<dyn DocumentParser>) -> Self {
        Self { scorer, parser }
    }

    /// Builds the default pipeline and forces its lexicons and patterns to compile, so the
    /// first request does not pay for initialisation.
    pub fn load() -> Result<Self> {
        let pipeline = Self::new(Arc::new(LexiconSentiment), Arc::new(RuleParser));
        pipeline.scorer.score("warm up")?;
        pipeline.parser.parse("Warm up on Monday in Paris.")?;
        info!(
            "Loaded NLP pipeline (sentiment: {}, parser: {})",
            pipeline.scorer.name(),
            pipeline.parser.name()
        );
        Ok(pipeline)
    }

    pub fn scorer(&self) -> &dyn SentimentScorer {
        self.scorer.as_ref()
    }

    pub fn parser(&self) -> &dyn DocumentParser {
        self.parser.as_ref()
    }
}
