//! Tunable limits applied by the tracker services.

/// Limits applied when validating task text and walking task hierarchies.
///
/// # Examples
///
/// ```
/// use backlog::config::TrackerConfig;
///
/// let config = TrackerConfig::default();
/// assert_eq!(config.max_summary_length, 100);
///
/// let strict = TrackerConfig::strict();
/// assert!(strict.max_subtree_size < config.max_subtree_size);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackerConfig {
    /// Maximum task summary length in characters.
    pub max_summary_length: usize,
    /// Maximum task description length in characters.
    pub max_description_length: usize,
    /// Maximum comment length in characters.
    pub max_comment_length: usize,
    /// Maximum number of descendants a sprint cascade will touch.
    pub max_subtree_size: usize,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            max_summary_length: 100,
            max_description_length: 255,
            max_comment_length: 255,
            max_subtree_size: 10_000,
        }
    }
}

impl TrackerConfig {
    /// Creates a lenient configuration with generous text limits.
    ///
    /// Useful for imports of historical data written under other rules.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            max_summary_length: 1_000,
            max_description_length: 100_000,
            max_comment_length: 100_000,
            ..Default::default()
        }
    }

    /// Creates a strict configuration with reduced limits.
    #[must_use]
    pub const fn strict() -> Self {
        Self {
            max_summary_length: 80,
            max_description_length: 255,
            max_comment_length: 255,
            max_subtree_size: 500,
        }
    }
}
