//! Generalization depth
//!
//! The only tunable of the codec: how deep below the root template
//! generation may go. `None` = unbounded (exact, not a large constant).

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Errors raised when a depth bound is given as text
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    /// Depth bounds cannot be negative
    #[error("generalization depth must be non-negative, got '{0}'")]
    Negative(String),

    /// Neither an integer nor an unbounded keyword
    #[error("generalization depth must be an integer or 'unbounded', got '{0}'")]
    NotAnInteger(String),
}

/// Maximum depth of generalized nodes
///
/// No `Default`: callers state the bound explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GeneralizationDepth(Option<usize>);

impl GeneralizationDepth {
    /// Generalize at every internal node
    pub const fn unbounded() -> Self {
        Self(None)
    }

    /// Generalize only nodes at depth `< max_depth`
    pub const fn limited(max_depth: usize) -> Self {
        Self(Some(max_depth))
    }

    /// Is a node at `depth` generalized?
    #[inline]
    pub fn allows(&self, depth: usize) -> bool {
        self.0.map_or(true, |max| depth < max)
    }
}

impl FromStr for GeneralizationDepth {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "unbounded" | "inf" | "none" => return Ok(Self::unbounded()),
            _ => {}
        }

        // Sign first, so out-of-range negatives are still reported as negative
        if let Some(magnitude) = trimmed.strip_prefix('-') {
            return Err(if is_digits(magnitude) {
                ConfigurationError::Negative(trimmed.to_string())
            } else {
                ConfigurationError::NotAnInteger(trimmed.to_string())
            });
        }

        trimmed
            .parse::<usize>()
            .map(Self::limited)
            .map_err(|_| ConfigurationError::NotAnInteger(trimmed.to_string()))
    }
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

impl fmt::Display for GeneralizationDepth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(max_depth) => write!(f, "{}", max_depth),
            None => f.write_str("unbounded"),
        }
    }
}
