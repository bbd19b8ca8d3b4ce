//! Booking legality rules.
//!
//! Pure decision functions used by
//! [`crate::application::services::ReservationService`]: given the reservations
//! already held on a car, decide whether a new or extended booking may be
//! stored. Nothing here touches the store.
//!
//! Two rule sets are supported, selected by [`BookingRules`]:
//!
//! - [`BookingRules::Legacy`] tests a single date against existing spans: the
//!   new issue date for a fresh booking, the new return date for an extension.
//!   The reservation being extended is part of the candidate set.
//! - [`BookingRules::Strict`] rejects any inclusive interval overlap with another
//!   reservation of the same car.

use chrono::NaiveDate;
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

use crate::domain::entities::Reservation;

/// Inclusive date range `[start, end]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DateSpan {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateSpan {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// Returns true if `date` lies within the span, bounds included.
    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date <= self.end
    }

    /// Inclusive overlap: `max(start1, start2) <= min(end1, end2)`.
    pub fn overlaps(&self, other: &DateSpan) -> bool {
        self.start.max(other.start) <= self.end.min(other.end)
    }

    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }
}

/// Rule set applied by the booking validator and the availability engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingRules {
    /// Historical single-date checks and the wide occupancy predicate.
    Legacy,
    /// Full interval overlap and "reservation covers the date" occupancy.
    #[default]
    Strict,
}

impl BookingRules {
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingRules::Legacy => "legacy",
            BookingRules::Strict => "strict",
        }
    }
}

impl fmt::Display for BookingRules {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingRules {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" => Ok(BookingRules::Legacy),
            "strict" => Ok(BookingRules::Strict),
            other => Err(format!(
                "unknown booking rules '{}', expected 'legacy' or 'strict'",
                other
            )),
        }
    }
}

/// What is being validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingKind {
    New,
    Extension { reservation_id: i64 },
}

impl BookingKind {
    pub fn label(&self) -> &'static str {
        match self {
            BookingKind::New => "new",
            BookingKind::Extension { .. } => "extension",
        }
    }
}

/// Why a booking was refused.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingRejection {
    /// The requested dates clash with `conflicting_reservation`.
    Conflict {
        kind: BookingKind,
        conflicting_reservation: i64,
        existing: DateSpan,
    },
    /// Issue date lies before `today` or after the return date.
    InvalidRange { requested: DateSpan, today: NaiveDate },
}

impl BookingRejection {
    pub fn label(&self) -> &'static str {
        match self {
            BookingRejection::Conflict { .. } => "conflict",
            BookingRejection::InvalidRange { .. } => "invalid_range",
        }
    }
}

/// Result of a booking decision. Rejections are values, not errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BookingOutcome<T> {
    Accepted(T),
    Rejected(BookingRejection),
}

impl<T> BookingOutcome<T> {
    pub fn into_result(self) -> Result<T, BookingRejection> {
        match self {
            BookingOutcome::Accepted(value) => Ok(value),
            BookingOutcome::Rejected(rejection) => Err(rejection),
        }
    }
}

/// Finds the first existing reservation that conflicts with `requested`.
pub fn find_conflict<'a>(
    existing: &'a [Reservation],
    requested: DateSpan,
    kind: BookingKind,
    rules: BookingRules,
) -> Option<&'a Reservation> {
    existing.iter().find(|r| {
        let span = r.span();
        match (rules, kind) {
            (BookingRules::Legacy, BookingKind::New) => span.contains(requested.start),
            (BookingRules::Legacy, BookingKind::Extension { .. }) => span.contains(requested.end),
            (BookingRules::Strict, BookingKind::Extension { reservation_id })
                if r.id == reservation_id =>
            {
                false
            }
            (BookingRules::Strict, _) => span.overlaps(&requested),
        }
    })
}

/// Requires `today <= issue <= return`.
pub fn check_range(requested: DateSpan, today: NaiveDate) -> Result<(), BookingRejection> {
    if today <= requested.start && requested.is_ordered() {
        Ok(())
    } else {
        Err(BookingRejection::InvalidRange { requested, today })
    }
}

/// Full decision for one booking request.
///
/// Legacy rules test conflicts before the date range; strict rules reject a
/// malformed range first since a reversed span has no meaningful overlap.
pub fn evaluate(
    existing: &[Reservation],
    requested: DateSpan,
    kind: BookingKind,
    rules: BookingRules,
    today: NaiveDate,
) -> Result<(), BookingRejection> {
    let conflict = || match find_conflict(existing, requested, kind, rules) {
        Some(r) => Err(BookingRejection::Conflict {
            kind,
            conflicting_reservation: r.id,
            existing: r.span(),
        }),
        None => Ok(()),
    };

    match rules {
        BookingRules::Legacy => {
            conflict()?;
            check_range(requested, today)
        }
        BookingRules::Strict => {
            check_range(requested, today)?;
            conflict()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn reservation(id: i64, start: NaiveDate, end: NaiveDate) -> Reservation {
        Reservation::new(id, 1, 10, start, end, Utc::now())
    }

    fn january() -> Vec<Reservation> {
        vec![reservation(1, d(2024, 1, 1), d(2024, 1, 10))]
    }

    fn today() -> NaiveDate {
        d(2023, 12, 1)
    }

    #[test]
    fn test_span_contains_bounds() {
        let span = DateSpan::new(d(2024, 1, 1), d(2024, 1, 10));
        assert!(span.contains(d(2024, 1, 1)));
        assert!(span.contains(d(2024, 1, 10)));
        assert!(!span.contains(d(2024, 1, 11)));
        assert!(!span.contains(d(2023, 12, 31)));
    }

    #[test]
    fn test_span_overlap_is_inclusive() {
        let a = DateSpan::new(d(2024, 1, 1), d(2024, 1, 10));
        assert!(a.overlaps(&DateSpan::new(d(2024, 1, 10), d(2024, 1, 12))));
        assert!(a.overlaps(&DateSpan::new(d(2023, 12, 1), d(2024, 2, 1))));
        assert!(!a.overlaps(&DateSpan::new(d(2024, 1, 11), d(2024, 1, 15))));
    }

    #[test]
    fn test_rules_parse() {
        assert_eq!("legacy".parse::<BookingRules>(), Ok(BookingRules::Legacy));
        assert_eq!(" STRICT ".parse::<BookingRules>(), Ok(BookingRules::Strict));
        assert!("lenient".parse::<BookingRules>().is_err());
        assert_eq!(BookingRules::default(), BookingRules::Strict);
    }

    #[test]
    fn test_issue_date_inside_existing_span_conflicts_under_both_rules() {
        for rules in [BookingRules::Legacy, BookingRules::Strict] {
            for return_date in [d(2024, 1, 6), d(2024, 1, 20), d(2024, 3, 1)] {
                let result = evaluate(
                    &january(),
                    DateSpan::new(d(2024, 1, 5), return_date),
                    BookingKind::New,
                    rules,
                    today(),
                );
                assert!(
                    matches!(
                        result,
                        Err(BookingRejection::Conflict {
                            conflicting_reservation: 1,
                            ..
                        })
                    ),
                    "rules={rules} return={return_date}"
                );
            }
        }
    }

    #[test]
    fn test_booking_after_existing_span_is_accepted() {
        for rules in [BookingRules::Legacy, BookingRules::Strict] {
            let result = evaluate(
                &january(),
                DateSpan::new(d(2024, 1, 11), d(2024, 1, 15)),
                BookingKind::New,
                rules,
                today(),
            );
            assert_eq!(result, Ok(()), "rules={rules}");
        }
    }

    #[test]
    fn test_legacy_new_booking_ignores_enclosing_span() {
        // Starts before the existing reservation and ends inside it.
        let requested = DateSpan::new(d(2023, 12, 25), d(2024, 1, 3));

        let legacy = evaluate(
            &january(),
            requested,
            BookingKind::New,
            BookingRules::Legacy,
            today(),
        );
        assert_eq!(legacy, Ok(()));

        let strict = evaluate(
            &january(),
            requested,
            BookingKind::New,
            BookingRules::Strict,
            today(),
        );
        assert!(matches!(strict, Err(BookingRejection::Conflict { .. })));
    }

    #[test]
    fn test_issue_date_in_past_is_invalid_range() {
        let result = evaluate(
            &[],
            DateSpan::new(d(2023, 11, 30), d(2023, 12, 5)),
            BookingKind::New,
            BookingRules::Strict,
            today(),
        );
        assert!(matches!(result, Err(BookingRejection::InvalidRange { .. })));
    }

    #[test]
    fn test_issue_after_return_is_invalid_range() {
        for rules in [BookingRules::Legacy, BookingRules::Strict] {
            let result = evaluate(
                &[],
                DateSpan::new(d(2024, 2, 10), d(2024, 2, 1)),
                BookingKind::New,
                rules,
                today(),
            );
            assert!(matches!(result, Err(BookingRejection::InvalidRange { .. })));
        }
    }

    #[test]
    fn test_issue_on_today_single_day_is_accepted() {
        let result = check_range(DateSpan::new(today(), today()), today());
        assert_eq!(result, Ok(()));
    }

    #[test]
    fn test_legacy_reports_conflict_before_invalid_range() {
        // Past issue date that also lands inside an existing span.
        let existing = vec![reservation(5, d(2023, 11, 1), d(2023, 11, 30))];
        let requested = DateSpan::new(d(2023, 11, 15), d(2023, 12, 5));

        let legacy = evaluate(
            &existing,
            requested,
            BookingKind::New,
            BookingRules::Legacy,
            today(),
        );
        assert!(matches!(legacy, Err(BookingRejection::Conflict { .. })));

        let strict = evaluate(
            &existing,
            requested,
            BookingKind::New,
            BookingRules::Strict,
            today(),
        );
        assert!(matches!(strict, Err(BookingRejection::InvalidRange { .. })));
    }

    #[test]
    fn test_legacy_extension_checks_return_date_only() {
        let existing = vec![
            reservation(1, d(2024, 1, 1), d(2024, 1, 10)),
            reservation(2, d(2024, 1, 20), d(2024, 1, 25)),
        ];
        let kind = BookingKind::Extension { reservation_id: 1 };

        // New return date lands inside reservation 2.
        let clash = evaluate(
            &existing,
            DateSpan::new(d(2024, 1, 1), d(2024, 1, 22)),
            kind,
            BookingRules::Legacy,
            today(),
        );
        assert!(matches!(
            clash,
            Err(BookingRejection::Conflict {
                conflicting_reservation: 2,
                ..
            })
        ));

        // Jumping past reservation 2 entirely is not detected by the legacy rule.
        let jump = evaluate(
            &existing,
            DateSpan::new(d(2024, 1, 1), d(2024, 1, 30)),
            kind,
            BookingRules::Legacy,
            today(),
        );
        assert_eq!(jump, Ok(()));

        let strict = evaluate(
            &existing,
            DateSpan::new(d(2024, 1, 1), d(2024, 1, 30)),
            kind,
            BookingRules::Strict,
            today(),
        );
        assert!(matches!(
            strict,
            Err(BookingRejection::Conflict {
                conflicting_reservation: 2,
                ..
            })
        ));
    }

    #[test]
    fn test_legacy_extension_conflicts_with_itself_when_return_inside_own_span() {
        let existing = january();
        let kind = BookingKind::Extension { reservation_id: 1 };
        let shortened = DateSpan::new(d(2024, 1, 1), d(2024, 1, 8));

        let legacy = evaluate(&existing, shortened, kind, BookingRules::Legacy, today());
        assert!(matches!(
            legacy,
            Err(BookingRejection::Conflict {
                conflicting_reservation: 1,
                ..
            })
        ));

        let strict = evaluate(&existing, shortened, kind, BookingRules::Strict, today());
        assert_eq!(strict, Ok(()));
    }

    #[test]
    fn test_legacy_extension_beyond_own_span_does_not_self_conflict() {
        let result = evaluate(
            &january(),
            DateSpan::new(d(2024, 1, 1), d(2024, 1, 15)),
            BookingKind::Extension { reservation_id: 1 },
            BookingRules::Legacy,
            today(),
        );
        assert_eq!(result, Ok(()));
    }
}
