//! Quiz sessions: shuffled answers with a one-way reveal.
//!
//! A session starts `Unrevealed`, where the view carries no correctness
//! information. The first reveal moves it to `Revealed` and yields the reveal
//! sound, if any. Further reveals change nothing. Every display mode renders the
//! same [`QuizView`].

use config::{DisplayMode, QuizItem};
use rand::Rng;
use serde::Serialize;
use tracing::debug;

use crate::ActionDescriptor;

/// Shuffle `items` in place with Fisher–Yates: walk from the last index down to
/// 1, swapping each element with a uniformly chosen one at or below it.
pub fn shuffle<T, R: Rng + ?Sized>(items: &mut [T], rng: &mut R) {
    for i in (1..items.len()).rev() {
        let j = rng.random_range(0..=i);
        items.swap(i, j);
    }
}

/// Reveal state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizState {
    /// Answers shown without correctness.
    Unrevealed,
    /// Correctness shown for every answer.
    Revealed,
}

/// Result of a reveal request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The session moved to `Revealed`; play `sound` if present.
    Revealed {
        /// Sound to play for the reveal.
        sound: Option<ActionDescriptor>,
    },
    /// The session was already revealed.
    AlreadyRevealed,
}

/// One answer with its hidden tag.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Answer {
    /// Answer text.
    text: String,
    /// True when listed under `correctAnswers`.
    correct: bool,
}

/// A single invocation of a quiz item.
#[derive(Debug, Clone)]
pub struct QuizSession {
    /// Question text.
    question: String,
    /// Answers in display order, fixed at construction.
    answers: Vec<Answer>,
    /// Presentation mode.
    display_mode: DisplayMode,
    /// Sound for the reveal transition.
    reveal_sound: Option<String>,
    /// Current state.
    state: QuizState,
}

impl QuizSession {
    /// Build a session from `quiz`, shuffling its answers with `rng`.
    pub fn new<R: Rng + ?Sized>(quiz: &QuizItem, rng: &mut R) -> Self {
        let mut answers: Vec<Answer> = quiz
            .correct_answers
            .iter()
            .map(|text| Answer {
                text: text.clone(),
                correct: true,
            })
            .chain(quiz.wrong_answers.iter().map(|text| Answer {
                text: text.clone(),
                correct: false,
            }))
            .collect();
        shuffle(&mut answers, rng);
        debug!(question = %quiz.question, answers = answers.len(), "quiz session started");
        Self {
            question: quiz.question.clone(),
            answers,
            display_mode: quiz.display_mode,
            reveal_sound: quiz.reveal_sound_path.clone(),
            state: QuizState::Unrevealed,
        }
    }

    /// Current state.
    pub fn state(&self) -> QuizState {
        self.state
    }

    /// Handle the user's reveal signal.
    pub fn reveal(&mut self) -> RevealOutcome {
        match self.state {
            QuizState::Revealed => RevealOutcome::AlreadyRevealed,
            QuizState::Unrevealed => {
                self.state = QuizState::Revealed;
                RevealOutcome::Revealed {
                    sound: self
                        .reveal_sound
                        .clone()
                        .map(|path| ActionDescriptor::PlaySound { path }),
                }
            }
        }
    }

    /// Render-ready snapshot of the session.
    pub fn view(&self) -> QuizView {
        let revealed = self.state == QuizState::Revealed;
        QuizView {
            question: self.question.clone(),
            display_mode: self.display_mode,
            state: self.state,
            answers: self
                .answers
                .iter()
                .map(|a| AnswerView {
                    text: a.text.clone(),
                    correct: revealed.then_some(a.correct),
                })
                .collect(),
        }
    }
}

/// An answer as the host should draw it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AnswerView {
    /// Answer text.
    pub text: String,
    /// Correctness; `None` until revealed.
    pub correct: Option<bool>,
}

impl AnswerView {
    /// Check or cross once revealed, empty before.
    pub fn marker(&self) -> &'static str {
        match self.correct {
            Some(true) => "✓",
            Some(false) => "✗",
            None => "",
        }
    }

    /// Answer text prefixed with its marker when revealed.
    pub fn display(&self) -> String {
        match self.marker() {
            "" => self.text.clone(),
            m => format!("{} {}", m, self.text),
        }
    }
}

/// Snapshot of a session handed to the host for rendering.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QuizView {
    /// Question text.
    pub question: String,
    /// Presentation mode.
    pub display_mode: DisplayMode,
    /// Session state at snapshot time.
    pub state: QuizState,
    /// Answers in display order.
    pub answers: Vec<AnswerView>,
}

impl QuizView {
    /// True once correctness is visible.
    pub fn is_revealed(&self) -> bool {
        self.state == QuizState::Revealed
    }
}
