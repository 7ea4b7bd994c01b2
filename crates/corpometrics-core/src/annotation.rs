//! Annotation view types and the adapter traits metrics are computed over.
//!
//! The annotator and subword tokenizer are external collaborators: metrics
//! read their output through [`Document`]/[`Sentence`]/[`Token`] and never
//! construct annotations themselves. Both adapters are injected capabilities,
//! passed explicitly into every metric function.

/// Universal part-of-speech category, as assigned by the annotator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PartOfSpeech {
    Adjective,
    Adposition,
    Adverb,
    Auxiliary,
    CoordinatingConjunction,
    Determiner,
    Interjection,
    Noun,
    Numeral,
    Particle,
    Pronoun,
    ProperNoun,
    Punctuation,
    SubordinatingConjunction,
    Symbol,
    Verb,
    Other,
}

impl PartOfSpeech {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Adjective => "ADJ",
            Self::Adposition => "ADP",
            Self::Adverb => "ADV",
            Self::Auxiliary => "AUX",
            Self::CoordinatingConjunction => "CCONJ",
            Self::Determiner => "DET",
            Self::Interjection => "INTJ",
            Self::Noun => "NOUN",
            Self::Numeral => "NUM",
            Self::Particle => "PART",
            Self::Pronoun => "PRON",
            Self::ProperNoun => "PROPN",
            Self::Punctuation => "PUNCT",
            Self::SubordinatingConjunction => "SCONJ",
            Self::Symbol => "SYM",
            Self::Verb => "VERB",
            Self::Other => "X",
        }
    }
}

/// One annotated token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    /// Surface text exactly as it appeared in the input.
    pub text: String,
    pub pos: PartOfSpeech,
    /// Whether every character of the surface text is alphabetic.
    pub is_alphabetic: bool,
    /// Whether the annotator flagged this token as punctuation.
    pub is_punctuation: bool,
}

impl Token {
    pub fn new(
        text: impl Into<String>,
        pos: PartOfSpeech,
        is_alphabetic: bool,
        is_punctuation: bool,
    ) -> Self {
        Self {
            text: text.into(),
            pos,
            is_alphabetic,
            is_punctuation,
        }
    }
}

/// An ordered sequence of tokens forming one sentence.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Sentence {
    pub tokens: Vec<Token>,
}

/// One annotated text: the source text plus its sentences in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    /// The raw input text the annotation was produced from.
    pub text: String,
    pub sentences: Vec<Sentence>,
}

impl Document {
    /// All tokens of the document, flattened across sentences in order.
    pub fn tokens(&self) -> impl Iterator<Item = &Token> {
        self.sentences.iter().flat_map(|s| s.tokens.iter())
    }
}

/// A natural-language annotator: raw text in, sentences of tokens out.
///
/// Implementations must be stateless with respect to input — annotating the
/// same text twice yields the same [`Document`].
pub trait Annotator {
    fn annotate(&self, text: &str) -> Document;
}

/// A subword tokenizer, consumed only for the length of its encoding.
pub trait SubwordTokenizer {
    /// Encode a token's surface text into subword ids.
    fn encode(&self, text: &str) -> Vec<u32>;

    /// Number of subword units the text decomposes into.
    fn subword_count(&self, text: &str) -> usize {
        self.encode(text).len()
    }
}
