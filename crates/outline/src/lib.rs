//! Walkthrough outline
//!
//! Turns a loaded [`config::Configuration`] into what a host draws and runs:
//! - [`Outline`] materializes render nodes on demand and tracks folder expansion
//! - [`action_for`] and [`context_action_for`] map items to effect descriptors
//! - [`QuizSession`] owns the shuffle-and-reveal interaction for quiz items
//!
//! Everything here is synchronous and free of side effects; executing the
//! descriptors is left to the engine.
mod action;
mod quiz;
mod tree;

pub use action::{ActionDescriptor, DiffChoice, Highlight, action_for, context_action_for};
pub use quiz::{AnswerView, QuizSession, QuizState, QuizView, RevealOutcome, shuffle};
pub use tree::{BOOTSTRAP_CONTEXT, BOOTSTRAP_LABEL, Collapsible, NodeId, Outline, RenderNode};
