//! Date-range validation and helpers for searches and bookings.
//!
//! Validation runs locally, before any request is sent; the first failing
//! rule wins and its message is shown to the user as-is. Comparisons are
//! date-only; time of day never enters the picture.

use chrono::NaiveDate;
use std::collections::BTreeSet;

use crate::error::{ApiError, Result};
use crate::models::Booking;

/// A validated, strictly ordered date range (`to > from`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    /// Number of nights covered by the range
    pub fn nights(&self) -> i64 {
        (self.to - self.from).num_days()
    }
}

/// Dates entered into the room search form.
///
/// Both dates are optional at the form level; validation promotes them to
/// a [`DateRange`] or reports why it cannot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchDates {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl SearchDates {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Validate for an availability search: both dates present, end
    /// strictly after start. Past dates are allowed here.
    pub fn validate(&self) -> Result<DateRange> {
        let (Some(from), Some(to)) = (self.from, self.to) else {
            return Err(ApiError::validation("Please select both dates!"));
        };
        if to <= from {
            return Err(ApiError::validation("End date must be after start date!"));
        }
        Ok(DateRange { from, to })
    }
}

/// Dates entered into the booking form.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BookingDates {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}

impl BookingDates {
    pub fn new(from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        Self { from, to }
    }

    /// Validate for a booking submission. Rules are checked in order:
    ///
    /// 1. both dates present,
    /// 2. check-in not before `today`,
    /// 3. check-out strictly after check-in.
    pub fn validate(&self, today: NaiveDate) -> Result<DateRange> {
        let (Some(from), Some(to)) = (self.from, self.to) else {
            return Err(ApiError::validation(
                "Please select both check-in and check-out dates!",
            ));
        };
        if from < today {
            return Err(ApiError::validation("Check-in date cannot be in the past!"));
        }
        if to <= from {
            return Err(ApiError::validation(
                "Check-out date must be after check-in date!",
            ));
        }
        Ok(DateRange { from, to })
    }
}

/// Filter window applied to a user's booking list.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookingWindow {
    #[default]
    All,
    /// Check-in strictly after the reference date
    Upcoming,
    /// Check-out strictly before the reference date
    Completed,
    /// Status is CANCELLED, regardless of dates
    Cancelled,
}

impl BookingWindow {
    /// Parse a user-supplied window name
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_lowercase().as_str() {
            "all" => Some(Self::All),
            "upcoming" => Some(Self::Upcoming),
            "completed" => Some(Self::Completed),
            "cancelled" | "canceled" => Some(Self::Cancelled),
            _ => None,
        }
    }

    /// Whether the booking falls inside this window on `today`
    pub fn includes(&self, booking: &Booking, today: NaiveDate) -> bool {
        match self {
            Self::All => true,
            Self::Upcoming => booking.from_date > today,
            Self::Completed => booking.to_date < today,
            Self::Cancelled => booking.is_cancelled(),
        }
    }

    /// Filter a booking list, keeping arrival order
    pub fn apply(&self, bookings: Vec<Booking>, today: NaiveDate) -> Vec<Booking> {
        bookings
            .into_iter()
            .filter(|b| self.includes(b, today))
            .collect()
    }
}

/// Expand bookings into the set of individually booked dates
/// (inclusive of both endpoints), for availability calendars.
pub fn booked_dates(bookings: &[Booking]) -> BTreeSet<NaiveDate> {
    let mut dates = BTreeSet::new();
    for booking in bookings {
        let mut day = booking.from_date;
        while day <= booking.to_date {
            dates.insert(day);
            let Some(next) = day.succ_opt() else { break };
            day = next;
        }
    }
    dates
}
