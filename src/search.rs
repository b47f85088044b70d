//! Free-text matching over the catalog.
//!
//! Queries follow the usual text-index conventions: bare words match
//! case-insensitively and any one of them is enough, `"quoted phrases"` must
//! all appear, and `-word` excludes lessons containing `word`. Words on both
//! sides are folded to their unaccented form, reduced to their English stem
//! and stripped of stop words, so `swim` finds "Swimming" and `cafe` finds
//! "Café". Only the `subject` and `location` attributes are searched.

use crate::model::Lesson;
use rust_stemmers::{Algorithm, Stemmer};
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// A parsed search query.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TextQuery {
    terms: Vec<String>,
    phrases: Vec<String>,
    excluded: Vec<String>,
}

const STOP_WORDS: &[&str] = &[
    "a", "about", "an", "and", "are", "as", "at", "be", "but", "by", "for", "from", "how", "i",
    "in", "into", "is", "it", "its", "of", "on", "or", "that", "the", "this", "to", "was", "what",
    "when", "where", "who", "will", "with",
];

/// Lowercase with diacritics removed.
fn fold(text: &str) -> String {
    text.nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// The index keys of `text`: folded, stemmed words without stop words.
fn words(text: &str) -> Vec<String> {
    let stemmer = Stemmer::create(Algorithm::English);
    fold(text)
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty() && !STOP_WORDS.contains(w))
        .map(|w| stemmer.stem(w).into_owned())
        .collect()
}

impl TextQuery {
    pub fn parse(input: &str) -> Self {
        let mut query = Self::default();
        // odd segments sit between quotes
        for (i, segment) in input.split('"').enumerate() {
            if i % 2 == 1 {
                let phrase = fold(segment.trim());
                if !phrase.is_empty() {
                    query.phrases.push(phrase);
                }
                continue;
            }
            for token in segment.split_whitespace() {
                match token.strip_prefix('-') {
                    Some(negated) => query.excluded.extend(words(negated)),
                    None => query.terms.extend(words(token)),
                }
            }
        }
        query
    }

    /// True when the query has nothing positive to look for.
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty() && self.phrases.is_empty()
    }

    pub fn matches(&self, lesson: &Lesson) -> bool {
        if self.is_empty() {
            return false;
        }
        let fields: Vec<String> = ["subject", "location"]
            .into_iter()
            .filter_map(|field| lesson.text(field))
            .map(fold)
            .collect();
        let indexed: Vec<String> = fields.iter().flat_map(|f| words(f)).collect();
        let has_word = |w: &String| indexed.contains(w);

        if self.excluded.iter().any(has_word) {
            return false;
        }
        if !self.phrases.is_empty() {
            return self.phrases.iter().all(|phrase| {
                fields.iter().any(|f| f.contains(phrase.as_str()))
            });
        }
        self.terms.iter().any(has_word)
    }
}
