//! Calendar tenure and salary percentage calculations.

use bigdecimal::BigDecimal;
use chrono::{Datelike, Months, NaiveDate};

/// Elapsed time between two dates, decomposed into whole calendar units.
///
/// `months` is the remainder after whole years and `days` the remainder
/// after whole months, so `start + years + months + days == end`.
///
/// # Examples
/// ```
/// use admissions::domain::Tenure;
/// use chrono::NaiveDate;
///
/// let start = NaiveDate::from_ymd_opt(2022, 5, 10).expect("valid date");
/// let end = NaiveDate::from_ymd_opt(2025, 7, 5).expect("valid date");
/// let tenure = Tenure::between(start, end);
/// assert_eq!((tenure.years(), tenure.months(), tenure.days()), (3, 1, 25));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tenure {
    years: i32,
    months: i32,
    days: i32,
}

impl Tenure {
    /// Compute the tenure from `start` to `end`.
    ///
    /// A `start` after `end` yields a zero tenure; future hire dates are
    /// rejected before reaching this point.
    pub fn between(start: NaiveDate, end: NaiveDate) -> Self {
        if start >= end {
            return Self::default();
        }

        let mut total_months = month_index(end) - month_index(start);
        let mut days = i64::from(end.day()) - i64::from(start.day());
        if days < 0 {
            total_months -= 1;
            let anchor = u32::try_from(total_months)
                .ok()
                .and_then(|months| start.checked_add_months(Months::new(months)));
            days = anchor.map_or(0, |anchor| (end - anchor).num_days());
        }

        Self {
            years: narrow(total_months.div_euclid(12)),
            months: narrow(total_months.rem_euclid(12)),
            days: narrow(days),
        }
    }

    /// Build a tenure from stored components.
    pub const fn from_parts(years: i32, months: i32, days: i32) -> Self {
        Self {
            years,
            months,
            days,
        }
    }

    /// Whole years elapsed.
    pub const fn years(&self) -> i32 {
        self.years
    }

    /// Whole months elapsed after the whole years.
    pub const fn months(&self) -> i32 {
        self.months
    }

    /// Days elapsed after the whole months.
    pub const fn days(&self) -> i32 {
        self.days
    }
}

fn month_index(date: NaiveDate) -> i64 {
    i64::from(date.year()) * 12 + i64::from(date.month0())
}

fn narrow(value: i64) -> i32 {
    i32::try_from(value).unwrap_or(i32::MAX)
}

/// Exactly 35% of `salary`.
///
/// The result keeps every digit of the input: the unscaled value is
/// multiplied by 35 and the scale raised by two, so no rounding occurs.
/// A salary already at the largest representable scale is truncated to
/// that scale instead.
///
/// # Examples
/// ```
/// use admissions::domain::percentage_35;
/// use bigdecimal::BigDecimal;
/// use std::str::FromStr;
///
/// let salary = BigDecimal::from_str("3500.00").expect("decimal");
/// assert_eq!(percentage_35(&salary).to_string(), "1225.0000");
/// ```
pub fn percentage_35(salary: &BigDecimal) -> BigDecimal {
    let (digits, scale) = salary.as_bigint_and_exponent();
    match scale.checked_add(2) {
        Some(raised) => BigDecimal::new(digits * 35, raised),
        None => BigDecimal::new(digits * 35 / 100, scale),
    }
}

#[cfg(test)]
mod tests {
    //! Regression coverage for tenure decomposition and percentages.

    use std::str::FromStr;

    use super::*;
    use rstest::rstest;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
    }

    fn reconstruct(start: NaiveDate, tenure: Tenure) -> NaiveDate {
        let months = u32::try_from(tenure.years() * 12 + tenure.months()).expect("non-negative");
        let days = u64::try_from(tenure.days()).expect("non-negative");
        start
            .checked_add_months(Months::new(months))
            .and_then(|anchor| anchor.checked_add_days(chrono::Days::new(days)))
            .expect("date in range")
    }

    #[rstest]
    #[case::same_day(date(2024, 3, 1), date(2024, 3, 1), (0, 0, 0))]
    #[case::days_only(date(2024, 3, 1), date(2024, 3, 20), (0, 0, 19))]
    #[case::borrow_month(date(2022, 5, 10), date(2025, 7, 5), (3, 1, 25))]
    #[case::exact_years(date(2020, 7, 5), date(2025, 7, 5), (5, 0, 0))]
    #[case::month_end_clamp(date(2024, 1, 31), date(2024, 3, 1), (0, 1, 1))]
    #[case::leap_day(date(2020, 2, 29), date(2021, 2, 28), (0, 11, 30))]
    #[case::future_start(date(2030, 1, 1), date(2025, 1, 1), (0, 0, 0))]
    fn decomposes_calendar_periods(
        #[case] start: NaiveDate,
        #[case] end: NaiveDate,
        #[case] expected: (i32, i32, i32),
    ) {
        let tenure = Tenure::between(start, end);
        assert_eq!((tenure.years(), tenure.months(), tenure.days()), expected);
    }

    #[rstest]
    fn reconstruction_reaches_end_date_for_every_start_in_range() {
        let end = date(2025, 7, 5);
        let mut start = date(2019, 1, 1);
        while start <= end {
            let tenure = Tenure::between(start, end);
            assert!(tenure.years() >= 0 && tenure.months() >= 0 && tenure.days() >= 0);
            assert!(tenure.months() < 12);
            assert_eq!(reconstruct(start, tenure), end, "start {start}");
            start = start.succ_opt().expect("next day");
        }
    }

    #[rstest]
    #[case("3500.00", "1225.0000")]
    #[case("1", "0.35")]
    #[case("0.01", "0.0035")]
    #[case("1234567.89", "432098.7615")]
    fn percentage_is_exact(#[case] salary: &str, #[case] expected: &str) {
        let salary = BigDecimal::from_str(salary).expect("decimal salary");
        let expected = BigDecimal::from_str(expected).expect("decimal expected");
        let computed = percentage_35(&salary);
        assert_eq!(computed, expected);
        assert_eq!(computed, salary * BigDecimal::from_str("0.35").expect("factor"));
    }

    #[rstest]
    #[case::largest_scale(1234, i64::MAX, 431, i64::MAX)]
    #[case::room_for_two_digits(1234, i64::MAX - 2, 43190, i64::MAX)]
    fn percentage_at_the_scale_limit_does_not_overflow(
        #[case] digits: i64,
        #[case] scale: i64,
        #[case] expected_digits: i64,
        #[case] expected_scale: i64,
    ) {
        let salary = BigDecimal::new(digits.into(), scale);
        let computed = percentage_35(&salary);
        assert_eq!(
            computed.as_bigint_and_exponent(),
            (expected_digits.into(), expected_scale)
        );
    }
}
