//! Per-instance identity tokens.
//
//! Every dock instance scopes its element ids, class names, and style rules
//! with one of these tokens so that several docks on the same scene can
//! never cross-affect each other. Tokens only need to be collision-resistant
//! across concurrently created instances, not cryptographically secure.

use std::hash::{BuildHasher, Hash, Hasher, RandomState};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

/// Process-wide creation counter so two tokens generated within the same
/// clock tick still differ.
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

/// A unique, id/class-safe token identifying one dock instance.
///
/// The rendered form is lowercase hex only, so it can be embedded in element
/// ids (`dock_<token>`) and class names (`inside_<token>`) without escaping.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct InstanceToken(String);

impl InstanceToken {
    pub fn generate() -> Self {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos())
            .unwrap_or(0);
        let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
        // RandomState is freshly keyed per call, which injects per-process
        // and per-call entropy without pulling in a randomness dependency.
        let mut hasher = RandomState::new().build_hasher();
        nanos.hash(&mut hasher);
        seq.hash(&mut hasher);
        let a = hasher.finish();
        let mut hasher = RandomState::new().build_hasher();
        a.hash(&mut hasher);
        nanos.hash(&mut hasher);
        let b = hasher.finish();
        Self(format!("{a:016x}{b:08x}", b = b as u32))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Suffix a class or id fragment with this token: `inside` becomes
    /// `inside_<token>`.
    pub fn scoped(&self, fragment: &str) -> String {
        format!("{fragment}_{}", self.0)
    }
}

impl std::fmt::Display for InstanceToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokens_are_unique_across_many_instances() {
        let mut seen = std::collections::HashSet::new();
        for _ in 0..1000 {
            let token = InstanceToken::generate();
            assert!(seen.insert(token.as_str().to_string()), "token collision");
        }
    }

    #[test]
    fn tokens_are_class_safe() {
        let token = InstanceToken::generate();
        assert!(!token.as_str().is_empty());
        assert!(
            token
                .as_str()
                .chars()
                .all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())
        );
    }

    #[test]
    fn scoped_appends_token() {
        let token = InstanceToken::generate();
        let class = token.scoped("inside");
        assert!(class.starts_with("inside_"));
        assert!(class.ends_with(token.as_str()));
    }
}
