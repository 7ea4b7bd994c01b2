//! Rule-based English annotator.
//!
//! Splits sentences on terminal punctuation, tokenizes on whitespace with
//! punctuation peeled into single-character tokens, and assigns a coarse
//! part-of-speech from surface form plus a pronoun lexicon. Deterministic
//! and stateless, so annotation is idempotent across passes.

use corpometrics_core::{Annotator, Document, PartOfSpeech, Sentence, Token};

/// Lowercased personal, possessive, reflexive, demonstrative, interrogative,
/// and indefinite pronouns.
const PRONOUNS: &[&str] = &[
    "i",
    "me",
    "my",
    "mine",
    "myself",
    "we",
    "us",
    "our",
    "ours",
    "ourselves",
    "you",
    "your",
    "yours",
    "yourself",
    "yourselves",
    "he",
    "him",
    "his",
    "himself",
    "she",
    "her",
    "hers",
    "herself",
    "it",
    "its",
    "itself",
    "they",
    "them",
    "their",
    "theirs",
    "themselves",
    "who",
    "whom",
    "whose",
    "this",
    "that",
    "these",
    "those",
    "what",
    "which",
    "anyone",
    "anybody",
    "anything",
    "everyone",
    "everybody",
    "everything",
    "someone",
    "somebody",
    "something",
    "nobody",
    "nothing",
    "none",
    "one",
    "oneself",
];

/// Characters that end a sentence.
const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// Characters tagged PUNCT. Anything else non-alphanumeric is SYM.
const PUNCT_CHARS: &[char] = &[
    '.', ',', ';', ':', '!', '?', '\'', '"', '(', ')', '[', ']', '{', '}', '-', '–', '—', '…', '«',
    '»',
];

/// A lightweight annotator with no model behind it.
///
/// Suitable as a default for English stimuli and as a test double for the
/// metric functions. Anything needing real linguistic accuracy should inject
/// a model-backed [`Annotator`] instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct BasicAnnotator;

impl Annotator for BasicAnnotator {
    fn annotate(&self, text: &str) -> Document {
        let mut sentences: Vec<Sentence> = Vec::new();
        let mut tokens: Vec<Token> = Vec::new();
        let mut word = String::new();

        for ch in text.chars() {
            if ch.is_whitespace() {
                flush_word(&mut word, &mut tokens);
            } else if ch.is_alphanumeric() || (!word.is_empty() && (ch == '\'' || ch == '-')) {
                word.push(ch);
            } else {
                flush_word(&mut word, &mut tokens);
                tokens.push(mark_token(ch));
                if SENTENCE_TERMINATORS.contains(&ch) && has_content(&tokens) {
                    sentences.push(Sentence {
                        tokens: std::mem::take(&mut tokens),
                    });
                }
            }
        }
        flush_word(&mut word, &mut tokens);
        if !tokens.is_empty() {
            sentences.push(Sentence { tokens });
        }

        Document {
            text: text.to_string(),
            sentences,
        }
    }
}

fn flush_word(word: &mut String, tokens: &mut Vec<Token>) {
    if word.is_empty() {
        return;
    }
    tokens.push(word_token(std::mem::take(word)));
}

fn word_token(text: String) -> Token {
    let is_alphabetic = text.chars().all(char::is_alphabetic);
    let pos = if is_alphabetic && PRONOUNS.contains(&text.to_lowercase().as_str()) {
        PartOfSpeech::Pronoun
    } else if text.chars().all(char::is_numeric) {
        PartOfSpeech::Numeral
    } else {
        PartOfSpeech::Other
    };
    Token {
        text,
        pos,
        is_alphabetic,
        is_punctuation: false,
    }
}

fn mark_token(ch: char) -> Token {
    let is_punctuation = PUNCT_CHARS.contains(&ch);
    Token {
        text: ch.to_string(),
        pos: if is_punctuation {
            PartOfSpeech::Punctuation
        } else {
            PartOfSpeech::Symbol
        },
        is_alphabetic: false,
        is_punctuation,
    }
}

/// A sentence is closed at a terminator only once it holds a non-mark token;
/// this keeps "..." together instead of emitting one sentence per dot.
fn has_content(tokens: &[Token]) -> bool {
    tokens.iter().any(|t| !t.is_punctuation)
}
