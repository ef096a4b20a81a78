//! Tunable knobs for the reconciler.

/// Minimum score a candidate needs to be considered at all
pub const DEFAULT_THRESHOLD: f64 = 0.85;
/// Required lead of the best candidate over the runner-up
pub const DEFAULT_MARGIN: f64 = 0.05;
/// Share of the score decided by release-year equality
pub const DEFAULT_YEAR_WEIGHT: f64 = 0.15;
pub const DEFAULT_MAX_CANDIDATES: usize = 3;
/// Library entries further than this many years away are never offered
pub const DEFAULT_MAX_YEAR_DRIFT: u32 = 2;

/// Reconciler settings.
///
/// The year guard (`max_year_drift`) runs before scoring: entries outside
/// the drift are never candidates, so they cannot make a match ambiguous.
/// Set it to `None` to compare every entry and let the margin decide.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchOptions {
    pub threshold: f64,
    pub margin: f64,
    /// 0.0 disables the year boost entirely
    pub year_weight: f64,
    /// Candidates listed for an ambiguous item
    pub max_candidates: usize,
    /// Largest accepted year difference; `None` disables the guard
    pub max_year_drift: Option<u32>,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            margin: DEFAULT_MARGIN,
            year_weight: DEFAULT_YEAR_WEIGHT,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            max_year_drift: Some(DEFAULT_MAX_YEAR_DRIFT),
        }
    }
}

impl MatchOptions {
    pub fn with_threshold(threshold: f64) -> Self {
        Self {
            threshold,
            ..Self::default()
        }
    }

    /// Rejects values that make the score comparison meaningless
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=1.0).contains(&self.threshold) {
            return Err(format!("threshold must be within 0..=1, got {}", self.threshold));
        }
        if !(0.0..=1.0).contains(&self.margin) {
            return Err(format!("margin must be within 0..=1, got {}", self.margin));
        }
        if !(0.0..1.0).contains(&self.year_weight) {
            return Err(format!(
                "year weight must be within 0..1, got {}",
                self.year_weight
            ));
        }
        if self.max_candidates < 2 {
            return Err("at least two candidates must be listed for ambiguous items".to_string());
        }
        Ok(())
    }
}
