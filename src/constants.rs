//! Shared crate-wide constants.

/// Ticks an embedded surface waits between its first readiness signal and
/// the `Loaded` transition, so the embedded document settles before any
/// structural read.
///
/// Units: event-loop ticks. This is the settle quantum; it must stay at
/// least 1 so synchronous at-attach readiness never loads within the attach
/// call itself.
pub const SETTLE_TICKS: u64 = 1;

/// Default poll interval for the demo event loop, in milliseconds.
pub const POLL_INTERVAL_MS: u64 = 16;
