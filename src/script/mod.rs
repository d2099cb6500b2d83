pub mod engine;
pub mod executor;

use thiserror::Error;

/// Anything that can go wrong while running a user script.
/// The executor turns every variant into an `error: ...` status.
#[derive(Debug, Error)]
pub enum ScriptFault {
    #[error("syntax error: {0}")]
    Compile(#[from] rhai::ParseError),
    #[error("{0}")]
    Runtime(#[from] Box<rhai::EvalAltResult>),
}
