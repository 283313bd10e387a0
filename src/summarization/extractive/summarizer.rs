//! Frequency-based extractive summarization.
//!
//! Sentences are ranked by the summed, max-normalized frequency of their content
//! words; the best ones are returned in document order. No model is involved, so
//! the same text always yields the same summary.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::Arc;

use tracing::debug;

use crate::summarization::core::errors::SummarizeResult;
use crate::summarization::extractive::analyzer::TextAnalyzer;

/// Default number of sentences kept.
pub const DEFAULT_NUM_SENTENCES: usize = 5;

/// A sentence with its position and score.
#[derive(Clone, Debug, PartialEq)]
pub struct ScoredSentence {
    /// Position in the document (0-indexed).
    pub position: usize,
    /// Sentence text.
    pub text: String,
    /// Sum of normalized word frequencies.
    pub score: f64,
}

/// Extractive summarizer over a shared text analyzer.
#[derive(Clone)]
pub struct ExtractiveSummarizer {
    analyzer: Arc<dyn TextAnalyzer>,
}

impl ExtractiveSummarizer {
    /// Create a summarizer using `analyzer` for splitting and stop words.
    #[must_use]
    pub const fn new(analyzer: Arc<dyn TextAnalyzer>) -> Self {
        Self { analyzer }
    }

    /// Summarize `text` down to at most `num_sentences` sentences joined by spaces.
    ///
    /// Texts with `num_sentences` sentences or fewer are returned whole.
    ///
    /// # Errors
    /// Returns a tokenization error if sentence or word splitting fails.
    pub fn summarize(&self, text: &str, num_sentences: usize) -> SummarizeResult<String> {
        let sentences = self.analyzer.sentences(text)?;
        if sentences.len() <= num_sentences {
            return Ok(sentences.join(" "));
        }

        let scored = self.score_sentences(&sentences)?;
        let mut top = select_top(scored, num_sentences);
        top.sort_by_key(|sentence| sentence.position);

        debug!(
            "Extractive summary kept {} of {} sentences",
            top.len(),
            sentences.len()
        );

        Ok(top
            .into_iter()
            .map(|sentence| sentence.text)
            .collect::<Vec<_>>()
            .join(" "))
    }

    /// Frequencies of qualifying words across `sentences`, divided by the highest count.
    ///
    /// A qualifying word is alphanumeric and not a stop word.
    ///
    /// # Errors
    /// Returns a tokenization error if word splitting fails.
    pub fn word_frequencies(&self, sentences: &[String]) -> SummarizeResult<HashMap<String, f64>> {
        let mut counts: HashMap<String, u32> = HashMap::new();
        for sentence in sentences {
            for word in self.analyzer.words(sentence)? {
                if self.qualifies(&word) {
                    *counts.entry(word).or_insert(0) += 1;
                }
            }
        }

        let max_count = counts.values().copied().max().unwrap_or(1);
        Ok(counts
            .into_iter()
            .map(|(word, count)| (word, f64::from(count) / f64::from(max_count)))
            .collect())
    }

    /// Score every sentence by the summed normalized frequency of its words.
    ///
    /// # Errors
    /// Returns a tokenization error if word splitting fails.
    pub fn score_sentences(&self, sentences: &[String]) -> SummarizeResult<Vec<ScoredSentence>> {
        let frequencies = self.word_frequencies(sentences)?;

        sentences
            .iter()
            .enumerate()
            .map(|(position, text)| -> SummarizeResult<ScoredSentence> {
                let score = self
                    .analyzer
                    .words(text)?
                    .iter()
                    .filter_map(|word| frequencies.get(word))
                    .sum();
                Ok(ScoredSentence {
                    position,
                    text: text.clone(),
                    score,
                })
            })
            .collect()
    }

    fn qualifies(&self, word: &str) -> bool {
        word.chars().all(char::is_alphanumeric) && !self.analyzer.is_stop_word(word)
    }
}

/// Highest-scoring sentences first; equal scores keep document order.
fn select_top(mut scored: Vec<ScoredSentence>, count: usize) -> Vec<ScoredSentence> {
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
    scored.truncate(count);
    scored
}
