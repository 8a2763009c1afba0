use std::collections::BTreeMap;

use crate::history::latest_pair;
use crate::models::{Aspect, AspectChange, ComparisonResult, NormalizedResult, OverallTrend};

/// Sub-scale changes beyond this many points produce a note.
const NOTE_THRESHOLD: i32 = 2;
/// Total-score changes beyond this many points move the overall trend.
const TREND_THRESHOLD: i32 = 5;

/// Diff `current` against `previous` (the older test). Lower scores are better.
/// Returns `None` when either side is missing.
pub fn compare(
    current: Option<&NormalizedResult>,
    previous: Option<&NormalizedResult>,
) -> Option<ComparisonResult> {
    let (current, previous) = (current?, previous?);

    let mut changes = BTreeMap::new();
    let mut improvements = Vec::new();
    let mut concerns = Vec::new();

    for aspect in Aspect::ALL {
        let now = current.score(aspect);
        let before = previous.score(aspect);
        let change = now.saturating_sub(before);

        changes.insert(
            aspect,
            AspectChange {
                current: now,
                previous: before,
                change,
                percentage: percentage_change(change, before),
                improved: change < 0,
            },
        );

        if change < -NOTE_THRESHOLD {
            improvements.push(format!(
                "{} menurun {} poin",
                aspect.label(),
                change.unsigned_abs()
            ));
        } else if change > NOTE_THRESHOLD {
            concerns.push(format!(
                "{} meningkat {} poin, perlu perhatian",
                aspect.label(),
                change
            ));
        }
    }

    let overall_trend = overall_trend(current.total.saturating_sub(previous.total));
    tracing::debug!(
        current = current.test_number,
        previous = previous.test_number,
        trend = %overall_trend,
        "compared test results"
    );

    Some(ComparisonResult {
        changes,
        improvements,
        concerns,
        overall_trend,
    })
}

/// Compare the two most recent entries of a newest-first history.
pub fn compare_latest(results: &[NormalizedResult]) -> Option<ComparisonResult> {
    let (current, previous) = latest_pair(results)?;
    compare(Some(current), Some(previous))
}

pub fn overall_trend(total_change: i32) -> OverallTrend {
    if total_change < -TREND_THRESHOLD {
        OverallTrend::Improving
    } else if total_change > TREND_THRESHOLD {
        OverallTrend::Worsening
    } else {
        OverallTrend::Stable
    }
}

/// Rounded percent change relative to `previous`; 0 when `previous` is not positive.
/// Halves round toward positive infinity.
pub fn percentage_change(change: i32, previous: i32) -> i64 {
    if previous <= 0 {
        return 0;
    }
    let ratio = change as f64 / previous as f64 * 100.0;
    (ratio + 0.5).floor() as i64
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::result;

    fn with_total(mut value: NormalizedResult, total: i32) -> NormalizedResult {
        value.total = total;
        value
    }

    #[test]
    fn missing_side_is_not_comparable() {
        let current = result(4, 8, 12);
        assert!(compare(Some(&current), None).is_none());
        assert!(compare(None, Some(&current)).is_none());
        assert!(compare_latest(&[current]).is_none());
    }

    #[test]
    fn equal_totals_are_stable_without_notes() {
        let previous = result(5, 5, 5);
        let current = result(6, 4, 5);

        let comparison = compare(Some(&current), Some(&previous)).unwrap();
        assert_eq!(comparison.overall_trend, OverallTrend::Stable);
        assert!(comparison.improvements.is_empty());
        assert!(comparison.concerns.is_empty());
    }

    #[test]
    fn zero_previous_score_forces_zero_percentage() {
        let previous = result(0, 4, 4);
        let current = result(3, 4, 4);

        let comparison = compare(Some(&current), Some(&previous)).unwrap();
        let depression = comparison.change(Aspect::Depression).unwrap();
        assert_eq!(depression.change, 3);
        assert_eq!(depression.percentage, 0);
        assert!(!depression.improved);
        assert_eq!(comparison.concerns, vec!["Depresi meningkat 3 poin, perlu perhatian"]);
    }

    #[test]
    fn depression_drop_of_six_is_noted_and_improving() {
        let previous = with_total(result(10, 8, 12), 30);
        let current = with_total(result(4, 8, 12), 24);

        let comparison = compare(Some(&current), Some(&previous)).unwrap();
        let depression = comparison.change(Aspect::Depression).unwrap();
        assert_eq!(depression.change, -6);
        assert_eq!(depression.percentage, -60);
        assert!(depression.improved);
        assert_eq!(comparison.improvements, vec!["Depresi menurun 6 poin"]);
        assert!(comparison.concerns.is_empty());

        for aspect in [Aspect::Anxiety, Aspect::Stress] {
            let change = comparison.change(aspect).unwrap();
            assert_eq!(change.change, 0);
            assert!(!change.improved);
        }

        // Total delta of -6 crosses the strict -5 threshold.
        assert_eq!(comparison.overall_trend, OverallTrend::Improving);
    }

    #[test]
    fn thresholds_are_strict() {
        assert_eq!(overall_trend(-5), OverallTrend::Stable);
        assert_eq!(overall_trend(-6), OverallTrend::Improving);
        assert_eq!(overall_trend(5), OverallTrend::Stable);
        assert_eq!(overall_trend(6), OverallTrend::Worsening);

        let previous = result(10, 10, 10);
        let current = result(8, 12, 10);
        let comparison = compare(Some(&current), Some(&previous)).unwrap();
        assert!(comparison.improvements.is_empty());
        assert!(comparison.concerns.is_empty());
    }

    #[test]
    fn rising_scores_raise_concerns_and_worsen() {
        let previous = result(3, 2, 6);
        let current = result(7, 6, 10);

        let comparison = compare(Some(&current), Some(&previous)).unwrap();
        assert_eq!(comparison.concerns.len(), 3);
        assert_eq!(comparison.concerns[1], "Kecemasan meningkat 4 poin, perlu perhatian");
        assert_eq!(comparison.overall_trend, OverallTrend::Worsening);
        assert_eq!(comparison.change(Aspect::Anxiety).unwrap().percentage, 200);
    }

    #[test]
    fn extreme_scores_saturate_instead_of_overflowing() {
        let previous = result(-2, 0, 0);
        let current = result(i32::MAX, 0, 0);
        let comparison = compare(Some(&current), Some(&previous)).unwrap();
        let depression = comparison.change(Aspect::Depression).unwrap();
        assert_eq!(depression.change, i32::MAX);
        assert_eq!(depression.percentage, 0);
        assert_eq!(comparison.overall_trend, OverallTrend::Worsening);

        let previous = result(1, 0, 0);
        let current = result(i32::MIN, 0, 0);
        let comparison = compare(Some(&current), Some(&previous)).unwrap();
        let depression = comparison.change(Aspect::Depression).unwrap();
        assert_eq!(depression.change, i32::MIN);
        assert!(depression.improved);
        assert_eq!(comparison.improvements, vec!["Depresi menurun 2147483648 poin"]);
        assert_eq!(comparison.overall_trend, OverallTrend::Improving);
    }

    #[test]
    fn percentage_rounds_halves_up() {
        assert_eq!(percentage_change(1, 8), 13);
        assert_eq!(percentage_change(-1, 8), -12);
        assert_eq!(percentage_change(-1, 3), -33);
        assert_eq!(percentage_change(5, 0), 0);
    }
}
