//! Closed complexity vocabulary and the per-axis rollup.
//!
//! Model responses describe cost in free text; everything downstream works
//! with the fixed label set below. Out-of-set text always collapses to
//! [`ComplexityClass::Unknown`] so renderers and stored records never see
//! an unranked label.

use serde::{Deserialize, Serialize};

/// One asymptotic cost class from the fixed vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ComplexityClass {
    /// `O(1)`
    Constant,
    /// `O(log n)`
    Logarithmic,
    /// `O(n)`
    Linear,
    /// `O(n log n)`
    Linearithmic,
    /// `O(n²)`
    Quadratic,
    /// `O(2ⁿ)`
    Exponential,
    /// Anything outside the vocabulary, or no statement at all.
    Unknown,
}

/// All ranked classes, cheapest first. `Unknown` is deliberately absent.
const RANKED: [ComplexityClass; 6] = [
    ComplexityClass::Constant,
    ComplexityClass::Logarithmic,
    ComplexityClass::Linear,
    ComplexityClass::Linearithmic,
    ComplexityClass::Quadratic,
    ComplexityClass::Exponential,
];

impl ComplexityClass {
    /// Parses an exact vocabulary label, coercing anything else to `Unknown`.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let trimmed = text.trim();
        RANKED.iter().copied().find(|class| class.label() == trimmed).unwrap_or(Self::Unknown)
    }

    /// The canonical display label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Constant => "O(1)",
            Self::Logarithmic => "O(log n)",
            Self::Linear => "O(n)",
            Self::Linearithmic => "O(n log n)",
            Self::Quadratic => "O(n²)",
            Self::Exponential => "O(2ⁿ)",
            Self::Unknown => "Unknown",
        }
    }

    /// Cost rank from 1 (constant) to 6 (exponential); `None` for `Unknown`.
    #[must_use]
    pub fn rank(self) -> Option<u8> {
        match self {
            Self::Constant => Some(1),
            Self::Logarithmic => Some(2),
            Self::Linear => Some(3),
            Self::Linearithmic => Some(4),
            Self::Quadratic => Some(5),
            Self::Exponential => Some(6),
            Self::Unknown => None,
        }
    }

    /// Returns the costlier of two classes.
    ///
    /// `Unknown` never wins against a ranked class; two `Unknown`s stay
    /// `Unknown`.
    #[must_use]
    pub fn worse(self, other: Self) -> Self {
        match (self.rank(), other.rank()) {
            (None, _) => other,
            (_, None) => self,
            (Some(a), Some(b)) => {
                if b > a {
                    other
                } else {
                    self
                }
            }
        }
    }

    /// Lowercased label used for case-insensitive scanning.
    fn scan_label(self) -> &'static str {
        match self {
            Self::Constant => "o(1)",
            Self::Logarithmic => "o(log n)",
            Self::Linear => "o(n)",
            Self::Linearithmic => "o(n log n)",
            Self::Quadratic => "o(n²)",
            Self::Exponential => "o(2ⁿ)",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for ComplexityClass {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl From<String> for ComplexityClass {
    fn from(value: String) -> Self {
        Self::parse(&value)
    }
}

impl From<ComplexityClass> for String {
    fn from(value: ComplexityClass) -> Self {
        value.label().to_string()
    }
}

/// A time/space cost pair, each axis independent of the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComplexityEstimate {
    /// Time cost class.
    pub time: ComplexityClass,
    /// Space cost class.
    pub space: ComplexityClass,
}

impl ComplexityEstimate {
    /// The safe default: both axes `Unknown`.
    #[must_use]
    pub const fn unknown() -> Self {
        Self { time: ComplexityClass::Unknown, space: ComplexityClass::Unknown }
    }

    /// Extracts a time/space pair from a free-text complexity statement.
    ///
    /// Scans line by line: a line mentioning `time` or `space` contributes
    /// the first vocabulary label at or after that keyword, falling back to
    /// the first label anywhere on the line. The earliest hit per axis wins;
    /// axes with no hit stay `Unknown`.
    #[must_use]
    pub fn from_statement(text: &str) -> Self {
        let mut time = ComplexityClass::Unknown;
        let mut space = ComplexityClass::Unknown;

        for line in text.lines() {
            let lower = line.to_lowercase();
            if time == ComplexityClass::Unknown {
                if let Some(found) = class_near(&lower, "time") {
                    time = found;
                }
            }
            if space == ComplexityClass::Unknown {
                if let Some(found) = class_near(&lower, "space") {
                    space = found;
                }
            }
        }

        Self { time, space }
    }
}

impl Default for ComplexityEstimate {
    fn default() -> Self {
        Self::unknown()
    }
}

/// Finds the vocabulary label closest to `keyword` in a lowercased line.
fn class_near(lower: &str, keyword: &str) -> Option<ComplexityClass> {
    let at = lower.find(keyword)?;
    first_class_in(&lower[at..]).or_else(|| first_class_in(lower))
}

/// Finds the earliest vocabulary label in a lowercased fragment.
fn first_class_in(lower: &str) -> Option<ComplexityClass> {
    RANKED
        .iter()
        .copied()
        .filter_map(|class| lower.find(class.scan_label()).map(|idx| (idx, class)))
        .min_by_key(|(idx, _)| *idx)
        .map(|(_, class)| class)
}

/// Rolls per-group estimates up to a repository-wide estimate.
///
/// Each axis takes its own maximum over the inputs, so an `Unknown` time in
/// one group never hides another group's known space cost. An empty slice
/// and all-`Unknown` inputs both yield the `Unknown` pair.
#[must_use]
pub fn overall_complexity(estimates: &[ComplexityEstimate]) -> ComplexityEstimate {
    estimates.iter().fold(ComplexityEstimate::unknown(), |acc, estimate| ComplexityEstimate {
        time: acc.time.worse(estimate.time),
        space: acc.space.worse(estimate.space),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- ComplexityClass tests ---

    #[test]
    fn parse_accepts_every_vocabulary_label() {
        assert_eq!(ComplexityClass::parse("O(1)"), ComplexityClass::Constant);
        assert_eq!(ComplexityClass::parse("O(log n)"), ComplexityClass::Logarithmic);
        assert_eq!(ComplexityClass::parse("O(n)"), ComplexityClass::Linear);
        assert_eq!(ComplexityClass::parse("O(n log n)"), ComplexityClass::Linearithmic);
        assert_eq!(ComplexityClass::parse("O(n²)"), ComplexityClass::Quadratic);
        assert_eq!(ComplexityClass::parse("O(2ⁿ)"), ComplexityClass::Exponential);
    }

    #[test]
    fn parse_coerces_out_of_set_text_to_unknown() {
        assert_eq!(ComplexityClass::parse("O(n³)"), ComplexityClass::Unknown);
        assert_eq!(ComplexityClass::parse("fast"), ComplexityClass::Unknown);
        assert_eq!(ComplexityClass::parse(""), ComplexityClass::Unknown);
    }

    #[test]
    fn parse_trims_surrounding_whitespace() {
        assert_eq!(ComplexityClass::parse("  O(n)  "), ComplexityClass::Linear);
    }

    #[test]
    fn ranks_order_the_vocabulary() {
        let ranks: Vec<Option<u8>> = RANKED.iter().map(|c| c.rank()).collect();
        assert_eq!(ranks, vec![Some(1), Some(2), Some(3), Some(4), Some(5), Some(6)]);
        assert_eq!(ComplexityClass::Unknown.rank(), None);
    }

    #[test]
    fn worse_prefers_higher_rank_and_ignores_unknown() {
        assert_eq!(
            ComplexityClass::Linear.worse(ComplexityClass::Quadratic),
            ComplexityClass::Quadratic
        );
        assert_eq!(
            ComplexityClass::Quadratic.worse(ComplexityClass::Constant),
            ComplexityClass::Quadratic
        );
        assert_eq!(
            ComplexityClass::Unknown.worse(ComplexityClass::Constant),
            ComplexityClass::Constant
        );
        assert_eq!(
            ComplexityClass::Unknown.worse(ComplexityClass::Unknown),
            ComplexityClass::Unknown
        );
    }

    #[test]
    fn serde_round_trips_labels_and_coerces_junk() {
        let json = serde_json::to_string(&ComplexityClass::Linearithmic).unwrap();
        assert_eq!(json, "\"O(n log n)\"");

        let back: ComplexityClass = serde_json::from_str("\"O(n²)\"").unwrap();
        assert_eq!(back, ComplexityClass::Quadratic);

        let junk: ComplexityClass = serde_json::from_str("\"O(whatever)\"").unwrap();
        assert_eq!(junk, ComplexityClass::Unknown);
    }

    // --- from_statement tests ---

    #[test]
    fn from_statement_reads_per_axis_lines() {
        let estimate = ComplexityEstimate::from_statement(
            "Time complexity: O(n log n)\nSpace complexity: O(1)",
        );
        assert_eq!(estimate.time, ComplexityClass::Linearithmic);
        assert_eq!(estimate.space, ComplexityClass::Constant);
    }

    #[test]
    fn from_statement_accepts_label_before_keyword() {
        let estimate = ComplexityEstimate::from_statement("runs in O(n) time");
        assert_eq!(estimate.time, ComplexityClass::Linear);
        assert_eq!(estimate.space, ComplexityClass::Unknown);
    }

    #[test]
    fn from_statement_ignores_lines_without_an_axis_keyword() {
        let estimate = ComplexityEstimate::from_statement("The loop is O(n²).");
        assert_eq!(estimate, ComplexityEstimate::unknown());
    }

    #[test]
    fn from_statement_keeps_the_first_hit_per_axis() {
        let estimate = ComplexityEstimate::from_statement(
            "Time: O(n)\nTime for the slow path: O(n²)\nSpace: O(log n)",
        );
        assert_eq!(estimate.time, ComplexityClass::Linear);
        assert_eq!(estimate.space, ComplexityClass::Logarithmic);
    }

    #[test]
    fn from_statement_on_free_prose_yields_unknown_pair() {
        let estimate = ComplexityEstimate::from_statement("It depends on the input shape.");
        assert_eq!(estimate, ComplexityEstimate::unknown());
    }

    // --- overall_complexity tests ---

    #[test]
    fn overall_takes_independent_per_axis_maxima() {
        let estimates = [
            ComplexityEstimate { time: ComplexityClass::Linear, space: ComplexityClass::Unknown },
            ComplexityEstimate {
                time: ComplexityClass::Unknown,
                space: ComplexityClass::Quadratic,
            },
            ComplexityEstimate {
                time: ComplexityClass::Logarithmic,
                space: ComplexityClass::Constant,
            },
        ];
        let overall = overall_complexity(&estimates);
        assert_eq!(overall.time, ComplexityClass::Linear);
        assert_eq!(overall.space, ComplexityClass::Quadratic);
    }

    #[test]
    fn overall_is_order_independent() {
        let mut estimates = vec![
            ComplexityEstimate { time: ComplexityClass::Constant, space: ComplexityClass::Linear },
            ComplexityEstimate {
                time: ComplexityClass::Exponential,
                space: ComplexityClass::Unknown,
            },
            ComplexityEstimate {
                time: ComplexityClass::Linearithmic,
                space: ComplexityClass::Constant,
            },
        ];
        let forward = overall_complexity(&estimates);
        estimates.reverse();
        let backward = overall_complexity(&estimates);
        assert_eq!(forward, backward);
    }

    #[test]
    fn overall_of_empty_and_all_unknown_is_unknown() {
        assert_eq!(overall_complexity(&[]), ComplexityEstimate::unknown());
        let estimates = [ComplexityEstimate::unknown(), ComplexityEstimate::unknown()];
        assert_eq!(overall_complexity(&estimates), ComplexityEstimate::unknown());
    }
}
