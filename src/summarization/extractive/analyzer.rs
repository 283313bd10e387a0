//! Sentence and word splitting behind a capability trait.

use std::collections::HashSet;

use regex::Regex;
use unicode_segmentation::UnicodeSegmentation;

use crate::summarization::core::errors::{SummarizeError, SummarizeResult};
use crate::summarization::extractive::stopwords;

/// Sentence-final punctuation, optional closing quotes/brackets, then whitespace.
const SENTENCE_BOUNDARY: &str = r#"[.!?]+["'”’)\]]*\s+"#;

/// Tokens that end with a period without ending the sentence.
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "vs", "etc", "e.g", "i.e", "inc", "ltd",
    "co", "corp", "fig", "approx", "dept", "mme", "mlle", "cf",
];

/// Text used by `ensure_ready` to check the splitter end to end.
const READINESS_PROBE: &str = "Ready check one. Ready check two.";

/// Language-processing capability used by the extractive summarizer.
pub trait TextAnalyzer: Send + Sync {
    /// Prepare any resources (word lists, compiled rules). Called once at startup.
    ///
    /// # Errors
    /// Returns an error if the analyzer cannot be used.
    fn ensure_ready(&self) -> SummarizeResult<()>;

    /// Split text into sentences, in document order.
    ///
    /// # Errors
    /// Returns a tokenization error if the text cannot be split.
    fn sentences(&self, text: &str) -> SummarizeResult<Vec<String>>;

    /// Split one sentence into lowercase word tokens.
    ///
    /// # Errors
    /// Returns a tokenization error if the sentence cannot be split.
    fn words(&self, sentence: &str) -> SummarizeResult<Vec<String>>;

    /// Whether a lowercase token is a stop word.
    fn is_stop_word(&self, word: &str) -> bool;
}

/// Punctuation-driven sentence splitter with Unicode word segmentation and
/// combined English/French stop words.
pub struct RuleBasedAnalyzer {
    boundary: Regex,
    stop_words: HashSet<&'static str>,
}

impl RuleBasedAnalyzer {
    /// Create an analyzer.
    ///
    /// # Errors
    /// Returns a tokenization error if the boundary rule fails to compile.
    pub fn new() -> SummarizeResult<Self> {
        let boundary = Regex::new(SENTENCE_BOUNDARY)
            .map_err(|err| SummarizeError::Tokenization(err.to_string()))?;
        Ok(Self {
            boundary,
            stop_words: stopwords::combined(),
        })
    }
}

impl TextAnalyzer for RuleBasedAnalyzer {
    fn ensure_ready(&self) -> SummarizeResult<()> {
        if self.stop_words.is_empty() {
            return Err(SummarizeError::Tokenization(
                "stop-word lists are empty".to_string(),
            ));
        }
        let probe = self.sentences(READINESS_PROBE)?;
        if probe.len() != 2 {
            return Err(SummarizeError::Tokenization(format!(
                "sentence splitter self-check produced {} sentences, expected 2",
                probe.len()
            )));
        }
        Ok(())
    }

    fn sentences(&self, text: &str) -> SummarizeResult<Vec<String>> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in self.boundary.find_iter(text) {
            let matched = boundary.as_str();
            let punct_len = matched.trim_end().len();
            if matched.starts_with('.')
                && punct_len == 1
                && self.continues_after_period(
                    &text[start..boundary.start()],
                    &text[boundary.end()..],
                )
            {
                continue;
            }

            let sentence = text[start..boundary.start() + punct_len].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = boundary.end();
        }

        let tail = text[start..].trim();
        if !tail.is_empty() {
            sentences.push(tail.to_string());
        }

        Ok(sentences)
    }

    fn words(&self, sentence: &str) -> SummarizeResult<Vec<String>> {
        Ok(sentence
            .to_lowercase()
            .unicode_words()
            .map(str::to_string)
            .collect())
    }

    fn is_stop_word(&self, word: &str) -> bool {
        self.stop_words.contains(word)
    }
}

impl RuleBasedAnalyzer {
    /// Whether a period between `preceding` and `following` belongs to an abbreviation
    /// or a name initial rather than ending the sentence.
    fn continues_after_period(&self, preceding: &str, following: &str) -> bool {
        let Some(token) = preceding.split_whitespace().last() else {
            return false;
        };
        let token = token.trim_start_matches(|c: char| !c.is_alphanumeric());

        if ABBREVIATIONS.contains(&token.to_lowercase().as_str()) {
            return true;
        }
        is_initial(token) && self.starts_with_name(following)
    }

    /// Whether `text` opens with a capitalized word that is not a common function word.
    fn starts_with_name(&self, text: &str) -> bool {
        let Some(word) = text.unicode_words().next() else {
            return false;
        };
        word.chars().next().is_some_and(char::is_uppercase)
            && !self.is_stop_word(&word.to_lowercase())
    }
}

/// A lone uppercase letter other than the pronoun "I".
fn is_initial(token: &str) -> bool {
    let mut chars = token.chars();
    matches!((chars.next(), chars.next()), (Some(c), None) if c.is_uppercase() && c != 'I')
}
