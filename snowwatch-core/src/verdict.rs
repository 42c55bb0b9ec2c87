//! Weather classifications and the binary snow verdict derived from them.

use std::fmt;

/// The one classification that counts as snowing. Exact match, case included.
pub const SNOW: &str = "Snow";

/// The short condition string reported by the weather API (`"Snow"`,
/// `"Rain"`, `"Clear"`, ...). Stored verbatim, never normalized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Classification(String);

impl Classification {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Case-sensitive, exact comparison against `"Snow"`.
    pub fn is_snow(&self) -> bool {
        self.0 == SNOW
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The two visible states of the app.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Verdict {
    Snowing,
    #[default]
    NotSnowing,
}

impl Verdict {
    /// Derive the verdict from the most recent classification, if any.
    ///
    /// Anything that is not exactly `"Snow"`, including having no data at
    /// all, is `NotSnowing`.
    pub fn from_classification(classification: Option<&Classification>) -> Self {
        match classification {
            Some(c) if c.is_snow() => Verdict::Snowing,
            _ => Verdict::NotSnowing,
        }
    }

    pub fn is_snowing(self) -> bool {
        matches!(self, Verdict::Snowing)
    }
}
