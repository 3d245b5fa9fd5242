use std::fmt;
use std::sync::Arc;

/// Suffix appended to left-hand copies of compared columns
pub const LEFT_SUFFIX: &str = "__left";
/// Suffix appended to right-hand copies of compared columns
pub const RIGHT_SUFFIX: &str = "__right";

/// Function used to normalise column names before matching
pub type ColumnCleaner = Arc<dyn Fn(&str) -> String + Send + Sync>;

/// Default column cleaner: trim surrounding whitespace and lowercase.
#[must_use]
pub fn default_cleaner(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Options for building a [`crate::TableDiffer`].
#[derive(Clone)]
pub struct DiffOptions {
    pub column_cleaner: ColumnCleaner,
    pub left_suffix: String,
    pub right_suffix: String,
}

impl Default for DiffOptions {
    fn default() -> Self {
        DiffOptions {
            column_cleaner: Arc::new(default_cleaner),
            left_suffix: LEFT_SUFFIX.to_string(),
            right_suffix: RIGHT_SUFFIX.to_string(),
        }
    }
}

impl DiffOptions {
    /// Use a custom column-name cleaner
    #[must_use]
    pub fn with_cleaner<F>(mut self, cleaner: F) -> Self
    where
        F: Fn(&str) -> String + Send + Sync + 'static,
    {
        self.column_cleaner = Arc::new(cleaner);
        self
    }

    /// Keep column names exactly as given
    #[must_use]
    pub fn without_cleaning(self) -> Self {
        self.with_cleaner(str::to_string)
    }

    /// Set the suffixes that tell the two copies of a compared column apart
    #[must_use]
    pub fn with_suffixes(mut self, left: &str, right: &str) -> Self {
        self.left_suffix = left.to_string();
        self.right_suffix = right.to_string();
        self
    }
}

impl fmt::Debug for DiffOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiffOptions")
            .field("left_suffix", &self.left_suffix)
            .field("right_suffix", &self.right_suffix)
            .finish_non_exhaustive()
    }
}
