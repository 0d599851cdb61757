// Offset-preserving tokenizer with a coarse part-of-speech tagger.
// Tags come from closed-class word lists, suffix heuristics and capitalisation,
// which is enough to drive the noun chunker and to trim entity candidates.
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

static TOKEN_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[\p{L}\p{N}]+(?:['’\-.][\p{L}\p{N}]+)*|\S").unwrap()
});

static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "a", "an", "the", "this", "that", "these", "those", "my", "your", "his",
        "her", "its", "our", "their", "some", "any", "every", "each", "no", "all",
        "both", "another", "such", "what", "which", "whose", "either", "neither",
        "several", "many", "few", "most", "much",
    ]
    .iter()
    .copied()
    .collect()
});

static PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them",
        "myself", "yourself", "himself", "herself", "itself", "ourselves",
        "themselves", "who", "whom", "someone", "something", "everyone",
        "everything", "anyone", "anything", "nobody", "nothing", "mine", "yours",
        "ours", "theirs",
    ]
    .iter()
    .copied()
    .collect()
});

static SUBJECT_PRONOUNS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["i", "you", "he", "she", "it", "we", "they"].iter().copied().collect()
});

static AUXILIARIES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "am", "is", "are", "was", "were", "be", "been", "being", "have", "has",
        "had", "having", "do", "does", "did", "will", "would", "shall", "should",
        "can", "could", "may", "might", "must",
    ]
    .iter()
    .copied()
    .collect()
});

static PARTICLES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    ["not", "to", "n't"].iter().copied().collect()
});

static ADPOSITIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "of", "in", "on", "at", "by", "for", "with", "about", "against", "between",
        "into", "through", "during", "before", "after", "above", "below", "from",
        "up", "down", "over", "under", "around", "among", "across", "behind",
        "beyond", "near", "since", "until", "upon", "within", "without", "via",
        "per", "toward", "towards", "onto", "off", "out",
    ]
    .iter()
    .copied()
    .collect()
});

static CONJUNCTIONS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "and", "or", "but", "nor", "so", "yet", "because", "although", "though",
        "while", "if", "unless", "whereas", "than", "whether",
    ]
    .iter()
    .copied()
    .collect()
});

static ADVERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "very", "really", "too", "also", "just", "quite", "always", "never",
        "often", "sometimes", "here", "there", "now", "then", "still", "already",
        "even", "again", "ever", "soon", "almost", "rather", "how", "when",
        "where", "why", "however", "perhaps", "maybe", "yesterday", "today",
        "tomorrow", "once", "twice",
    ]
    .iter()
    .copied()
    .collect()
});

static ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "good", "great", "bad", "new", "old", "big", "small", "large", "little",
        "long", "short", "high", "low", "best", "better", "worst", "worse",
        "happy", "sad", "nice", "fine", "first", "last", "next", "other", "same",
        "different", "important", "young", "early", "late", "free", "full",
        "easy", "hard", "simple", "real", "true", "whole", "major", "local",
        "public", "red", "blue", "green", "black", "white", "poor", "rich",
        "strong", "weak", "main", "top", "amazing", "excellent", "terrible",
        "awful", "horrible", "wonderful", "fantastic", "perfect", "brilliant",
        "huge", "tiny", "quick", "fast", "slow", "cheap", "awesome",
        "fresh", "clean", "dirty", "hot", "cold", "warm", "dark", "bright",
        "favorite", "upset", "angry", "proud", "glad", "sure", "able",
    ]
    .iter()
    .copied()
    .collect()
});

static ADJECTIVE_SUFFIXES: &[&str] = &["ful", "ous", "ive", "able", "ible", "less", "ical"];

static VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "love", "loves", "like", "likes", "hate", "hates", "want", "wants", "need",
        "needs", "make", "makes", "made", "get", "gets", "got", "go", "goes",
        "went", "say", "says", "said", "know", "knows", "knew", "think", "thinks",
        "thought", "take", "takes", "took", "see", "sees", "saw", "come", "comes",
        "came", "give", "gives", "gave", "find", "finds", "found", "founded",
        "buy", "buys", "bought", "sell", "sells", "sold", "build", "builds",
        "built", "run", "runs", "ran", "use", "uses", "enjoy", "enjoys", "prefer",
        "prefers", "recommend", "recommends", "become", "becomes", "became",
        "begin", "begins", "began", "feel", "feels", "felt", "met", "meet",
        "meets", "lead", "leads", "led", "keep", "keeps", "kept", "tell", "tells",
        "told", "work", "works", "live", "lives", "announce", "announces",
        "visit", "visits", "bring", "brings", "brought", "won", "lost", "paid",
        "grow", "grows", "grew", "rise", "rises", "rose", "fall", "falls", "fell",
        "speak", "speaks", "spoke", "write", "writes", "wrote", "drive", "drove",
        "fly", "flies", "flew", "draw", "drew", "choose", "chose", "break",
        "broke", "stand", "stood", "teach", "taught", "catch", "caught", "hear",
        "heard", "hold", "holds", "held", "send", "sends", "sent", "spend",
        "spent", "fight", "fought", "sank", "ate",
    ]
    .iter()
    .copied()
    .collect()
});

static NUMBER_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "one", "two", "three", "four", "five", "six", "seven", "eight", "nine",
        "ten", "eleven", "twelve", "twenty", "thirty", "hundred", "thousand",
        "million", "billion", "dozen",
    ]
    .iter()
    .copied()
    .collect()
});

/// Coarse universal part-of-speech tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tag {
    Det,
    Pron,
    Adj,
    Noun,
    Propn,
    Num,
    Verb,
    Aux,
    Adp,
    Cconj,
    Adv,
    Part,
    Punct,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub text: &'a str,
    /// Byte range into the source text.
    pub start: usize,
    pub end: usize,
    pub tag: Tag,
    pub sent_start: bool,
}

/// Returns true when `word` belongs to one of the closed word classes
/// (determiners, pronouns, adpositions, conjunctions, adverbs, auxiliaries).
pub fn is_function_word(word: &str) -> bool {
    let lower = word.to_lowercase();
    let w = lower.as_str();
    DETERMINERS.contains(w)
        || PRONOUNS.contains(w)
        || ADPOSITIONS.contains(w)
        || CONJUNCTIONS.contains(w)
        || ADVERBS.contains(w)
        || AUXILIARIES.contains(w)
}

pub fn tokenize(text: &str) -> Vec<Token<'_>> {
    let matches: Vec<_> = TOKEN_PATTERN.find_iter(text).collect();
    let mut tokens: Vec<Token> = Vec::with_capacity(matches.len());
    let mut sent_start = true;
    let mut prev: Option<(Tag, String)> = None;

    for (i, m) in matches.iter().enumerate() {
        let word = m.as_str();
        let next = matches.get(i + 1).map(|n| n.as_str());
        let tag = tag_word(word, sent_start, prev.as_ref().map(|(t, w)| (*t, w.as_str())), next);
        tokens.push(Token {
            text: word,
            start: m.start(),
            end: m.end(),
            tag,
            sent_start,
        });
        sent_start = matches!(word, "." | "!" | "?");
        prev = Some((tag, word.to_lowercase()));
    }

    tokens
}

// Words that can only start a predicate or its complement, never continue a noun phrase:
// "grew quickly", "approves the plan".
fn follows_verb(next: &str) -> bool {
    let lower = next.to_lowercase();
    let w = lower.as_str();
    DETERMINERS.contains(w)
        || matches!(w, "also" | "never" | "always" | "often" | "still" | "just")
        || (w.len() > 4 && w.ends_with("ly"))
}

fn tag_word(word: &str, sent_start: bool, prev: Option<(Tag, &str)>, next: Option<&str>) -> Tag {
    let first = match word.chars().next() {
        Some(c) => c,
        None => return Tag::Punct,
    };
    if !first.is_alphanumeric() {
        return Tag::Punct;
    }
    if word.chars().all(|c| c.is_numeric() || c == '.' || c == ',' || c == '-') {
        return Tag::Num;
    }

    let lower = word.to_lowercase();
    let w = lower.as_str();

    if NUMBER_WORDS.contains(w) {
        return Tag::Num;
    }
    if DETERMINERS.contains(w) {
        return Tag::Det;
    }
    if PRONOUNS.contains(w) {
        return Tag::Pron;
    }
    if AUXILIARIES.contains(w) {
        return Tag::Aux;
    }
    if PARTICLES.contains(w) {
        return Tag::Part;
    }
    if ADPOSITIONS.contains(w) {
        return Tag::Adp;
    }
    if CONJUNCTIONS.contains(w) {
        return Tag::Cconj;
    }
    if ADVERBS.contains(w) {
        return Tag::Adv;
    }

    let capitalized = first.is_uppercase();
    if capitalized && !sent_start {
        return Tag::Propn;
    }
    if VERBS.contains(w) {
        return Tag::Verb;
    }
    if ADJECTIVES.contains(w) || ADJECTIVE_SUFFIXES.iter().any(|s| w.len() > s.len() + 2 && w.ends_with(s)) {
        return Tag::Adj;
    }
    if let Some((tag, prev_word)) = prev {
        if tag == Tag::Aux || SUBJECT_PRONOUNS.contains(prev_word) {
            return Tag::Verb;
        }
    }
    if w.len() > 4 && w.ends_with("ly") {
        return Tag::Adv;
    }
    if w.len() > 4 && w.ends_with("ed") {
        return Tag::Verb;
    }
    if w.len() > 5 && w.ends_with("ing") && !matches!(prev, Some((Tag::Det, _)) | Some((Tag::Adj, _))) {
        return Tag::Verb;
    }
    if capitalized {
        return Tag::Propn;
    }
    // Unknown word right after a noun phrase and before a determiner or adverb.
    if matches!(prev, Some((Tag::Noun | Tag::Propn, _))) && next.is_some_and(follows_verb) {
        return Tag::Verb;
    }
    Tag::Noun
}
