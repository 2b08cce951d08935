//! Reader options.

/// Options for decoding CDF files.
#[derive(Debug, Clone, Default)]
pub struct ReaderOptions {
    /// Reject input whose magic word does not identify a CDF file.
    /// When off (the default) a foreign magic only logs a warning.
    pub strict_magic: bool,
    /// Upper bound on the length of any pointer chain.
    /// `None` bounds chains by the number of decoded records.
    pub max_chain_length: Option<usize>,
}

impl ReaderOptions {
    /// Create reader options with defaults.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enable strict magic checking.
    #[must_use]
    pub fn strict(mut self) -> Self {
        self.strict_magic = true;
        self
    }

    /// Override the chain length bound.
    #[must_use]
    pub fn with_max_chain_length(mut self, limit: usize) -> Self {
        self.max_chain_length = Some(limit);
        self
    }

    /// Effective chain bound for a catalog of `record_count` records.
    #[must_use]
    pub fn chain_limit(&self, record_count: usize) -> usize {
        self.max_chain_length.unwrap_or(record_count)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_builder() {
        let options = ReaderOptions::new();
        assert!(!options.strict_magic);
        assert_eq!(options.chain_limit(12), 12);

        let options = ReaderOptions::new().strict().with_max_chain_length(3);
        assert!(options.strict_magic);
        assert_eq!(options.chain_limit(12), 3);
    }
}
