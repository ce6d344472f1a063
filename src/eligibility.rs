use chrono::{Datelike, NaiveDate, Utc};
use serde::Serialize;
use utoipa::ToSchema;

/// Outcome of evaluating a candidate leave range against the annual
/// allowance. Pure data; handlers embed it in responses so callers can
/// show the same numbers the gate was decided on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct Eligibility {
    #[schema(example = 6)]
    pub requested_days: u32,
    #[schema(example = 4)]
    pub prior_approved_days: u32,
    #[schema(example = 10)]
    pub annual_total: u32,
    #[schema(example = 20)]
    pub ceiling: u32,
    #[schema(example = false)]
    pub over_limit: bool,
}

/// Inclusive day count of a range. Callers must have rejected end < start.
pub fn requested_days(start: NaiveDate, end: NaiveDate) -> u32 {
    debug_assert!(end >= start);
    (end - start).num_days() as u32 + 1
}

/// Evaluate a candidate range against already-approved days of the year.
/// Stateless arithmetic; the ceiling comes from configuration.
pub fn evaluate(
    start: NaiveDate,
    end: NaiveDate,
    prior_approved_days: u32,
    ceiling: u32,
) -> Eligibility {
    let requested = requested_days(start, end);
    let annual_total = requested + prior_approved_days;

    Eligibility {
        requested_days: requested,
        prior_approved_days,
        annual_total,
        ceiling,
        over_limit: annual_total > ceiling,
    }
}

pub fn current_year() -> i32 {
    Utc::now().date_naive().year()
}

/// First and last calendar day of a year, for the approved-days window.
pub fn year_bounds(year: i32) -> (NaiveDate, NaiveDate) {
    (
        NaiveDate::from_ymd_opt(year, 1, 1).unwrap(),
        NaiveDate::from_ymd_opt(year, 12, 31).unwrap(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    #[test]
    fn single_day_counts_as_one() {
        assert_eq!(requested_days(d(2024, 7, 10), d(2024, 7, 10)), 1);
    }

    #[test]
    fn day_count_is_inclusive_span() {
        assert_eq!(requested_days(d(2024, 7, 10), d(2024, 7, 15)), 6);
        assert_eq!(requested_days(d(2024, 12, 30), d(2025, 1, 2)), 4);
        // leap day
        assert_eq!(requested_days(d(2024, 2, 28), d(2024, 3, 1)), 3);
    }

    #[test]
    fn within_limit_with_no_prior_days() {
        let e = evaluate(d(2024, 7, 10), d(2024, 7, 15), 0, 20);
        assert_eq!(e.requested_days, 6);
        assert_eq!(e.annual_total, 6);
        assert!(!e.over_limit);
    }

    #[test]
    fn prior_days_push_total_over_limit() {
        let e = evaluate(d(2024, 7, 10), d(2024, 7, 15), 16, 20);
        assert_eq!(e.annual_total, 22);
        assert!(e.over_limit);
    }

    #[test]
    fn total_equal_to_ceiling_is_allowed() {
        let e = evaluate(d(2024, 3, 1), d(2024, 3, 10), 10, 20);
        assert_eq!(e.annual_total, 20);
        assert!(!e.over_limit);

        let one_more = evaluate(d(2024, 3, 1), d(2024, 3, 11), 10, 20);
        assert_eq!(one_more.annual_total, 21);
        assert!(one_more.over_limit);
    }

    #[test]
    fn total_is_monotonic_in_both_operands() {
        let base = evaluate(d(2024, 5, 1), d(2024, 5, 3), 4, 20);
        let longer = evaluate(d(2024, 5, 1), d(2024, 5, 4), 4, 20);
        let more_prior = evaluate(d(2024, 5, 1), d(2024, 5, 3), 5, 20);
        assert!(longer.annual_total > base.annual_total);
        assert!(more_prior.annual_total > base.annual_total);
    }

    #[test]
    fn ceiling_comes_from_configuration() {
        // the historical 15-day ceiling must flip the same range over
        let e = evaluate(d(2024, 7, 1), d(2024, 7, 16), 0, 20);
        assert!(!e.over_limit);
        let e = evaluate(d(2024, 7, 1), d(2024, 7, 16), 0, 15);
        assert!(e.over_limit);
    }

    #[test]
    fn year_bounds_cover_the_whole_year() {
        let (from, to) = year_bounds(2024);
        assert_eq!(from, d(2024, 1, 1));
        assert_eq!(to, d(2024, 12, 31));
    }
}
