//! Reconstruction options and configuration.

/// Which structures to reconstruct from an analysis response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    /// Reconstruct tables
    pub tables: bool,
    /// Reconstruct form key/value pairs
    pub forms: bool,
}

impl Features {
    /// Tables and forms.
    pub const ALL: Features = Features {
        tables: true,
        forms: true,
    };

    /// Neither tables nor forms.
    pub const NONE: Features = Features {
        tables: false,
        forms: false,
    };
}

impl Default for Features {
    fn default() -> Self {
        Self::ALL
    }
}

/// Options for reconstructing documents.
#[derive(Debug, Clone)]
pub struct ParseOptions {
    /// Structures to reconstruct beyond page text
    pub features: Features,

    /// Whether batch parsing may use several threads
    pub parallel: bool,
}

impl ParseOptions {
    /// Create new parse options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reconstructed features.
    pub fn with_features(mut self, features: Features) -> Self {
        self.features = features;
        self
    }

    /// Enable or disable table reconstruction.
    pub fn with_tables(mut self, tables: bool) -> Self {
        self.features.tables = tables;
        self
    }

    /// Enable or disable form reconstruction.
    pub fn with_forms(mut self, forms: bool) -> Self {
        self.features.forms = forms;
        self
    }

    /// Reconstruct page text only.
    pub fn text_only(mut self) -> Self {
        self.features = Features::NONE;
        self
    }

    /// Enable or disable parallel batch processing.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Disable parallel batch processing.
    pub fn sequential(mut self) -> Self {
        self.parallel = false;
        self
    }
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            features: Features::ALL,
            parallel: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_options_builder() {
        let options = ParseOptions::new().with_forms(false).sequential();

        assert!(options.features.tables);
        assert!(!options.features.forms);
        assert!(!options.parallel);
    }

    #[test]
    fn test_text_only() {
        let options = ParseOptions::new().text_only();
        assert_eq!(options.features, Features::NONE);
    }

    #[test]
    fn test_default_options() {
        let options = ParseOptions::default();
        assert_eq!(options.features, Features::ALL);
        assert!(options.parallel);
    }
}
