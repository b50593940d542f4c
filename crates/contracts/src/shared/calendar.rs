//! Month grid layout for the events calendar.
//!
//! The grid always starts on a Monday and ends on a Sunday; days from the
//! neighbouring months pad the first and last week.

use chrono::{Datelike, Duration, NaiveDate};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub in_current_month: bool,
}

impl CalendarDay {
    /// `yyyy-mm-dd`, the key used by [`bucket_by_date`].
    pub fn iso_key(&self) -> String {
        iso_key(self.date)
    }
}

pub fn iso_key(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

pub fn first_day_of_month(reference: NaiveDate) -> NaiveDate {
    reference.with_day(1).unwrap_or(reference)
}

pub fn last_day_of_month(reference: NaiveDate) -> NaiveDate {
    let first = first_day_of_month(reference);
    shift_month(first, 1) - Duration::days(1)
}

/// Move `months` calendar months away, clamping the day to the target month length.
pub fn shift_month(date: NaiveDate, months: i32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let mut day = date.day();
    loop {
        if let Some(d) = NaiveDate::from_ymd_opt(year, month, day) {
            return d;
        }
        if day <= 28 {
            return date;
        }
        day -= 1;
    }
}

/// Build the weeks × 7 grid covering the month of `reference`.
pub fn month_grid(reference: NaiveDate) -> Vec<Vec<CalendarDay>> {
    let first = first_day_of_month(reference);
    let last = last_day_of_month(reference);

    // Sunday = 0 numbering shifted to a Monday-start week.
    let weekday = first.weekday().num_days_from_sunday() as i64;
    let offset = (weekday + 6) % 7;

    let mut days: Vec<CalendarDay> = Vec::with_capacity(42);
    for back in (1..=offset).rev() {
        days.push(CalendarDay {
            date: first - Duration::days(back),
            in_current_month: false,
        });
    }

    let mut current = first;
    while current <= last {
        days.push(CalendarDay {
            date: current,
            in_current_month: true,
        });
        current += Duration::days(1);
    }

    let mut next = last + Duration::days(1);
    while days.len() % 7 != 0 {
        days.push(CalendarDay {
            date: next,
            in_current_month: false,
        });
        next += Duration::days(1);
    }

    days.chunks(7).map(|week| week.to_vec()).collect()
}

/// Group items by the `yyyy-mm-dd` key of the date returned by `date_of`.
pub fn bucket_by_date<T, F>(items: &[T], date_of: F) -> BTreeMap<String, Vec<T>>
where
    T: Clone,
    F: Fn(&T) -> Option<NaiveDate>,
{
    let mut map: BTreeMap<String, Vec<T>> = BTreeMap::new();
    for item in items {
        if let Some(date) = date_of(item) {
            map.entry(iso_key(date)).or_default().push(item.clone());
        }
    }
    map
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn d(y: i32, m: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, day).unwrap()
    }

    fn check_grid(reference: NaiveDate) {
        let grid = month_grid(reference);
        assert!(grid.iter().all(|week| week.len() == 7));
        assert_eq!(grid[0][0].date.weekday(), Weekday::Mon);
        assert_eq!(grid.last().unwrap()[6].date.weekday(), Weekday::Sun);

        let flat: Vec<CalendarDay> = grid.into_iter().flatten().collect();
        for pair in flat.windows(2) {
            assert_eq!(pair[1].date, pair[0].date + Duration::days(1));
        }

        let in_month: Vec<NaiveDate> = flat
            .iter()
            .filter(|c| c.in_current_month)
            .map(|c| c.date)
            .collect();
        let first = first_day_of_month(reference);
        let last = last_day_of_month(reference);
        assert_eq!(in_month.first(), Some(&first));
        assert_eq!(in_month.last(), Some(&last));
        assert_eq!(in_month.len() as u32, last.day());

        for cell in &flat {
            let same_month =
                cell.date.month() == reference.month() && cell.date.year() == reference.year();
            assert_eq!(cell.in_current_month, same_month);
        }
    }

    #[test]
    fn test_grid_invariants_for_a_full_year() {
        for month in 1..=12 {
            check_grid(d(2024, month, 15));
            check_grid(d(2025, month, 1));
        }
    }

    #[test]
    fn test_month_starting_on_monday_has_no_leading_padding() {
        // 1 September 2025 is a Monday.
        let grid = month_grid(d(2025, 9, 10));
        assert_eq!(grid[0][0].date, d(2025, 9, 1));
        assert!(grid[0][0].in_current_month);
    }

    #[test]
    fn test_month_starting_on_sunday_pads_six_days() {
        // 1 June 2025 is a Sunday.
        let grid = month_grid(d(2025, 6, 1));
        assert_eq!(grid[0][0].date, d(2025, 5, 26));
        assert_eq!(grid[0].iter().filter(|c| !c.in_current_month).count(), 6);
        assert_eq!(grid[0][6].date, d(2025, 6, 1));
    }

    #[test]
    fn test_february_2021_fits_in_four_rows() {
        // 1 February 2021 is a Monday and the month has 28 days.
        assert_eq!(month_grid(d(2021, 2, 5)).len(), 4);
    }

    #[test]
    fn test_shift_month_clamps_day() {
        assert_eq!(shift_month(d(2024, 1, 31), 1), d(2024, 2, 29));
        assert_eq!(shift_month(d(2024, 12, 5), 1), d(2025, 1, 5));
        assert_eq!(shift_month(d(2024, 1, 5), -1), d(2023, 12, 5));
    }

    #[test]
    fn test_bucket_by_date() {
        let items = vec![(1, d(2024, 5, 1)), (2, d(2024, 5, 1)), (3, d(2024, 5, 2))];
        let buckets = bucket_by_date(&items, |(_, date)| Some(*date));
        assert_eq!(buckets["2024-05-01"].len(), 2);
        assert_eq!(buckets["2024-05-02"][0].0, 3);
    }
}
