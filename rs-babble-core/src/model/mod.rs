//! Top-level module for the Markov babbling system.
//!
//! This module provides a first-order word generator, including:
//! - Tokens and the corpus tokenizer (`Token`, `tokenize`)
//! - The learned transition table (`TransitionTable`)
//! - Successor sampling and the generation walks (`sampler`)
//! - The trained model (`MarkovModel`)
//! - Request shapes (`Request`)
//! - A high-level generation interface owning its random source (`Generator`)

/// Word and line-break tokens, and the corpus tokenizer.
pub mod token;

/// Internal representation of one token's successor distribution.
///
/// Tracks outgoing transitions and supports weighted random sampling.
/// This module is not exposed publicly.
mod state;

/// Transition table learned from a token sequence.
///
/// Handles pair counting, normalization and line-start collection.
pub mod transition;

/// Successor sampling and the walks shared by the generation modes.
pub mod sampler;

/// Trained model: transition table, line starts and retry budget.
///
/// Validates the corpus and exposes the four generation modes over
/// a caller-supplied random source.
pub mod markov_model;

/// The four request shapes a caller can ask for.
pub mod request;

/// High-level interface owning a model and its random source.
///
/// Seeds once at construction, then serves any number of requests.
pub mod generator;
