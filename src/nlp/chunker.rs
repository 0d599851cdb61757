// Base noun phrase segmentation over tagged tokens.
use super::tokenizer::{Tag, Token};
use super::Span;

/// Returns the noun chunks of `tokens` as byte spans, in order of appearance.
///
/// A chunk is an optional determiner, any number of adjectives or numbers, and one or
/// more nouns. A pronoun on its own is also a chunk.
pub fn noun_chunks(tokens: &[Token<'_>]) -> Vec<Span> {
    let mut chunks = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        match tokens[i].tag {
            Tag::Pron => {
                chunks.push(Span {
                    start: tokens[i].start,
                    end: tokens[i].end,
                });
                i += 1;
            }
            Tag::Det | Tag::Adj | Tag::Num | Tag::Noun | Tag::Propn => {
                let start = i;
                let mut j = i;
                if tokens[j].tag == Tag::Det {
                    j += 1;
                }
                while j < tokens.len() && matches!(tokens[j].tag, Tag::Adj | Tag::Num) {
                    j += 1;
                }
                let head = j;
                while j < tokens.len() && matches!(tokens[j].tag, Tag::Noun | Tag::Propn) {
                    j += 1;
                }
                if j > head {
                    chunks.push(Span {
                        start: tokens[start].start,
                        end: tokens[j - 1].end,
                    });
                    i = j;
                } else {
                    i += 1;
                }
            }
            _ => i += 1,
        }
    }

    chunks
}
