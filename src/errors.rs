//! Error taxonomy for dock and frame contract violations.
//
//! Every variant here is a programmer-contract violation: reported
//! immediately, never retried, never swallowed.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DockError {
    /// The host container handed to a frame is not attached to a live scene
    /// tree.
    #[error("the host container must be part of the scene")]
    InvalidHost,

    /// A structural accessor was used before the embedded surface finished
    /// loading.
    #[error("the embedded surface is not ready")]
    NotReady,

    /// The embedded document unexpectedly lacks a structural node that could
    /// not be synthesized.
    #[error("embedded document is missing an expected {0} node")]
    MissingExpectedNode(&'static str),
}

pub type DockResult<T> = Result<T, DockError>;
