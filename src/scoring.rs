use std::fmt;

/// Number of characters that make up one "word" for WPM purposes.
pub const CHARS_PER_WORD: f64 = 5.0;

/// Visual state of one passage character.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CellTag {
    #[default]
    Neutral,
    Correct,
    Incorrect,
}

/// Result of diffing an input against a passage, one tag per passage char.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Scorecard {
    pub tags: Vec<CellTag>,
    pub total_typed: usize,
    pub correct_chars: usize,
    pub total_errors: usize,
}

/// Compares `input` to `passage` position by position, from scratch.
///
/// Input characters past the end of the passage only count towards
/// `total_typed`. Passage positions the input has not reached stay neutral.
pub fn score_input(passage: &str, input: &str) -> Scorecard {
    let mut tags = vec![CellTag::Neutral; passage.chars().count()];
    let mut correct_chars = 0;
    let mut total_errors = 0;

    for (tag, (expected, typed)) in tags.iter_mut().zip(passage.chars().zip(input.chars())) {
        if typed == expected {
            *tag = CellTag::Correct;
            correct_chars += 1;
        } else {
            *tag = CellTag::Incorrect;
            total_errors += 1;
        }
    }

    Scorecard {
        tags,
        total_typed: input.chars().count(),
        correct_chars,
        total_errors,
    }
}

pub fn wpm(correct_chars: usize, elapsed_secs: u32) -> u32 {
    let minutes = elapsed_secs as f64 / 60.0;
    if minutes > 0.0 {
        ((correct_chars as f64 / CHARS_PER_WORD) / minutes).round() as u32
    } else {
        0
    }
}

/// Percentage of typed characters that were correct, to one decimal place.
pub fn accuracy(correct_chars: usize, total_typed: usize) -> f64 {
    if total_typed > 0 {
        round1(correct_chars as f64 / total_typed as f64 * 100.0)
    } else {
        0.0
    }
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Statistics shown both live and in the final report.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Stats {
    pub wpm: u32,
    pub accuracy: f64,
    pub errors: usize,
}

impl Stats {
    pub fn compute(card: &Scorecard, elapsed_secs: u32) -> Self {
        Self {
            wpm: wpm(card.correct_chars, elapsed_secs),
            accuracy: accuracy(card.correct_chars, card.total_typed),
            errors: card.total_errors,
        }
    }
}

impl fmt::Display for Stats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "WPM: {} | Accuracy: {:.1}% | Total Errors: {}",
            self.wpm, self.accuracy, self.errors
        )
    }
}
