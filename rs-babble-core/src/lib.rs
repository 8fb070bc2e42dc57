//! First-order Markov text generation library.
//!
//! This crate provides a word-level babbling system including:
//! - A tokenizer that keeps line breaks as first-class tokens
//! - A transition model learned once from a corpus
//! - Four generation modes (retry budget, word count, start word, both)
//! - Chat command parsing into generation requests
//! - Internal utilities for corpus loading and path handling
//!
//! The trained model is immutable; all randomness comes from a source
//! injected by the caller, so generation is reproducible under a fixed seed.

/// Core Markov model and generation logic.
///
/// Exposes the model, the generator wrapper and the request shapes.
pub mod model;

/// Chat command parsing.
///
/// Turns an inbound chat message into a generation request.
pub mod command;

/// Error types.
pub mod error;

/// I/O utilities (corpus loading, path helpers).
pub mod io;

pub use command::{CommandError, CommandParser};
pub use error::ModelError;
pub use model::generator::Generator;
pub use model::markov_model::MarkovModel;
pub use model::request::Request;
pub use model::token::{Token, tokenize};
