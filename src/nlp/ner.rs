// Named Entity Recognition using patterns and gazetteers
// Candidates are collected per entity type in priority order; a candidate that overlaps an
// already accepted span is dropped. Offsets are byte ranges into the input.
use once_cell::sync::Lazy;
use regex::Regex;
use std::fmt;

use super::tokenizer::is_function_word;
use super::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntityLabel {
    Person,
    Org,
    Gpe,
    Date,
    Time,
    Money,
    Percent,
}

impl EntityLabel {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityLabel::Person => "PERSON",
            EntityLabel::Org => "ORG",
            EntityLabel::Gpe => "GPE",
            EntityLabel::Date => "DATE",
            EntityLabel::Time => "TIME",
            EntityLabel::Money => "MONEY",
            EntityLabel::Percent => "PERCENT",
        }
    }
}

impl fmt::Display for EntityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySpan {
    pub label: EntityLabel,
    pub span: Span,
}

static KNOWN_ORGANIZATIONS: &[&str] = &[
    "Apple", "Google", "Alphabet", "Microsoft", "Amazon", "Meta", "Facebook",
    "Netflix", "Tesla", "IBM", "Intel", "Nvidia", "NVIDIA", "AMD", "Samsung",
    "Sony", "Toyota", "Twitter", "OpenAI", "Oracle", "Adobe", "Uber", "Airbnb",
    "Spotify", "Walmart", "Disney", "NASA", "FBI", "CIA", "NATO", "UN", "EU",
    "Reuters", "BBC", "CNN", "Boeing", "Pfizer", "Goldman Sachs", "JPMorgan",
    "Morgan Stanley", "Harvard", "Stanford", "MIT", "Congress", "Senate",
    "Federal Reserve", "World Bank", "Red Cross", "SpaceX", "Salesforce",
];

static KNOWN_PLACES: &[&str] = &[
    "United States", "USA", "US", "America", "United Kingdom", "UK", "England",
    "Scotland", "Ireland", "France", "Germany", "Japan", "China", "India",
    "Canada", "Mexico", "Brazil", "Italy", "Spain", "Russia", "Australia",
    "Ukraine", "Israel", "Egypt", "Nigeria", "Kenya", "Korea", "New York",
    "California", "Texas", "Florida", "Hawaii", "London", "Paris", "Berlin",
    "Tokyo", "Beijing", "Washington", "Chicago", "Los Angeles", "San Francisco",
    "Boston", "Seattle", "Miami", "Austin", "Denver", "Portland", "Atlanta",
    "Cupertino", "Moscow", "Madrid", "Rome", "Sydney", "Toronto", "Dublin",
    "Amsterdam", "Singapore", "Hong Kong", "Mumbai", "Delhi", "Shanghai",
];

const MONTHS: &str = "January|February|March|April|May|June|July|August|September|October|November|December|Jan|Feb|Mar|Apr|Jun|Jul|Aug|Sep|Sept|Oct|Nov|Dec";
const WEEKDAYS: &str = "Monday|Tuesday|Wednesday|Thursday|Friday|Saturday|Sunday";

/// Builds a `\b(?:a|b|c)\b` alternation, longest names first so that
/// "New York" wins over a shorter entry sharing its prefix.
fn gazetteer_pattern(names: &[&str]) -> Regex {
    let mut sorted: Vec<&str> = names.to_vec();
    sorted.sort_by(|a, b| b.len().cmp(&a.len()));
    let alternation = sorted
        .iter()
        .map(|n| regex::escape(n))
        .collect::<Vec<_>>()
        .join("|");
    Regex::new(&format!(r"\b(?:{})\b", alternation)).unwrap()
}

static MONEY_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:[$€£]\s*\d+(?:,\d{3})*(?:\.\d+)?|\b\d+(?:,\d{3})*(?:\.\d+)?\s*(?:USD|EUR|GBP|dollars?|euros?|pounds?)\b)(?:\s+(?:thousand|million|billion|trillion)\b)?").unwrap()
});

static PERCENT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d+(?:\.\d+)?(?:\s?%|\s?(?:percent|per cent)\b)").unwrap()
});

static TIME_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b\d{1,2}(?::\d{2})?\s?(?:[aApP]\.[mM]\.|[aApP][mM]\b)|\b\d{1,2}:\d{2}\b").unwrap()
});

static DATE_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(&format!(
        r"\b(?:\d{{1,2}}[/-]\d{{1,2}}[/-]\d{{2,4}}|\d{{4}}[/-]\d{{1,2}}[/-]\d{{1,2}}|(?:{m})\.?\s+\d{{1,2}}(?:st|nd|rd|th)?(?:,?\s+\d{{4}})?|\d{{1,2}}(?:st|nd|rd|th)?\s+(?:{m})(?:,?\s+\d{{4}})?|(?:{m})\s+\d{{4}}|(?:{d}))\b",
        m = MONTHS,
        d = WEEKDAYS
    ))
    .unwrap()
});

static YEAR_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:1[5-9]|20)\d{2}s?\b").unwrap()
});

static ORGANIZATION_SUFFIX_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:\p{Lu}[\p{L}&]*\s+)*\p{Lu}[\p{L}&]*,?\s+(?:Inc|LLC|Corp|Corporation|Ltd|Limited|Company|Co|Group|Institute|University|College|Bank|Foundation|Association|Agency|Holdings|Labs)\b\.?").unwrap()
});

static ORGANIZATION_OF_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:University|Bank|Institute|Department|Ministry)\s+of\s+\p{Lu}\p{L}+(?:\s+\p{Lu}\p{L}+)*").unwrap()
});

static ORGANIZATION_PATTERN: Lazy<Regex> = Lazy::new(|| gazetteer_pattern(KNOWN_ORGANIZATIONS));

static LOCATION_PATTERN: Lazy<Regex> = Lazy::new(|| gazetteer_pattern(KNOWN_PLACES));

static TITLED_PERSON_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(?:Mr|Mrs|Ms|Dr|Prof|Sir|Dame)\.?\s+(\p{Lu}\p{Ll}+(?: +\p{Lu}\p{Ll}+)*)").unwrap()
});

static PERSON_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(\p{Lu}\p{Ll}+(?: +\p{Lu}\.)?(?: +\p{Lu}\p{Ll}+)+)\b").unwrap()
});

static WORD_PATTERN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\S+").unwrap());

// Whitespace-separated words of a match, with their absolute byte offsets.
fn words_with_offsets(base: usize, matched: &str) -> Vec<(usize, &str)> {
    WORD_PATTERN
        .find_iter(matched)
        .map(|w| (base + w.start(), w.as_str()))
        .collect()
}

struct Candidates<'t> {
    text: &'t str,
    accepted: Vec<EntitySpan>,
}

impl<'t> Candidates<'t> {
    fn new(text: &'t str) -> Self {
        Self {
            text,
            accepted: Vec::new(),
        }
    }

    fn overlaps(&self, start: usize, end: usize) -> bool {
        self.accepted
            .iter()
            .any(|e| e.span.start < end && start < e.span.end)
    }

    fn offer(&mut self, label: EntityLabel, start: usize, end: usize) {
        if start >= end || self.overlaps(start, end) {
            return;
        }
        self.accepted.push(EntitySpan {
            label,
            span: Span { start, end },
        });
    }

    fn offer_matches(&mut self, pattern: &Regex, label: EntityLabel) {
        let text = self.text;
        for m in pattern.find_iter(text) {
            self.offer(label, m.start(), m.end());
        }
    }

    fn offer_group(&mut self, pattern: &Regex, label: EntityLabel) {
        let text = self.text;
        for cap in pattern.captures_iter(text) {
            if let Some(m) = cap.get(1) {
                self.offer(label, m.start(), m.end());
            }
        }
    }

    // Organization names ending in a corporate suffix. A leading "The" or other function
    // word is not part of the name, and the suffix alone is not a name.
    fn offer_organizations(&mut self) {
        let text = self.text;
        for m in ORGANIZATION_SUFFIX_PATTERN.find_iter(text) {
            let words = words_with_offsets(m.start(), m.as_str());
            let skip = words
                .iter()
                .take_while(|(_, word)| is_function_word(word))
                .count();
            if words.len() - skip < 2 {
                continue;
            }
            self.offer(EntityLabel::Org, words[skip].0, m.end());
        }
    }

    // Runs of capitalised words. Leading function words ("The", "When") and words already
    // claimed by another entity are trimmed, and a run must keep at least two words to
    // count as a name.
    fn offer_names(&mut self) {
        let text = self.text;
        for cap in PERSON_PATTERN.captures_iter(text) {
            let Some(m) = cap.get(1) else { continue };
            let words = words_with_offsets(m.start(), m.as_str());
            let mut first = 0;
            while first < words.len() {
                let (start, word) = words[first];
                if !is_function_word(word) && !self.overlaps(start, start + word.len()) {
                    break;
                }
                first += 1;
            }
            let mut last = words.len();
            while last > first {
                let (start, word) = words[last - 1];
                if !self.overlaps(start, start + word.len()) {
                    break;
                }
                last -= 1;
            }
            if last - first < 2 {
                continue;
            }
            let (end_start, end_word) = words[last - 1];
            self.offer(EntityLabel::Person, words[first].0, end_start + end_word.len());
        }
    }

    fn into_sorted(mut self) -> Vec<EntitySpan> {
        self.accepted.sort_by_key(|e| e.span.start);
        self.accepted
    }
}

pub fn extract_entities_from_text(text: &str) -> Vec<EntitySpan> {
    let mut candidates = Candidates::new(text);

    // Numeric expressions first, they are the least ambiguous
    candidates.offer_matches(&MONEY_PATTERN, EntityLabel::Money);
    candidates.offer_matches(&PERCENT_PATTERN, EntityLabel::Percent);
    candidates.offer_matches(&TIME_PATTERN, EntityLabel::Time);
    candidates.offer_matches(&DATE_PATTERN, EntityLabel::Date);
    candidates.offer_matches(&YEAR_PATTERN, EntityLabel::Date);

    // Organizations before places so "Bank of America" is not split
    candidates.offer_matches(&ORGANIZATION_OF_PATTERN, EntityLabel::Org);
    candidates.offer_organizations();
    candidates.offer_matches(&ORGANIZATION_PATTERN, EntityLabel::Org);
    candidates.offer_matches(&LOCATION_PATTERN, EntityLabel::Gpe);

    // Person names last to avoid false positives on the spans above
    candidates.offer_group(&TITLED_PERSON_PATTERN, EntityLabel::Person);
    candidates.offer_names();

    candidates.into_sorted()
}
