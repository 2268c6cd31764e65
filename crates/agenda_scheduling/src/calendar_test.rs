#[cfg(test)]
mod tests {
    use crate::calendar::{
        days_in_month, first_of_month, month_grid, next_month, prev_month, CalendarCell,
    };
    use chrono::{Datelike, NaiveDate, Weekday};

    #[test]
    fn grid_length_is_blanks_plus_days() {
        // June 2024 starts on a Saturday (column 6) and has 30 days
        let reference = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
        let grid = month_grid(reference);
        assert_eq!(grid.leading_blanks(), 6);
        assert_eq!(grid.days_in_month(), 30);

        let cells: Vec<CalendarCell> = grid.collect();
        assert_eq!(cells.len(), 36);
    }

    #[test]
    fn first_day_cell_lands_on_its_weekday_column() {
        let reference = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
        assert_eq!(reference.weekday(), Weekday::Sat);

        let cells: Vec<CalendarCell> = month_grid(reference).collect();
        let first_day_position = cells
            .iter()
            .position(|cell| cell.date().is_some())
            .unwrap();
        assert_eq!(
            first_day_position as u32,
            reference.weekday().num_days_from_sunday()
        );
        assert_eq!(
            cells[first_day_position].date(),
            Some(NaiveDate::from_ymd_opt(2024, 6, 1).unwrap())
        );
    }

    #[test]
    fn days_are_ascending_and_cover_the_month() {
        let reference = NaiveDate::from_ymd_opt(2024, 2, 10).unwrap(); // leap February
        let days: Vec<_> = month_grid(reference).filter_map(|c| c.date()).collect();
        assert_eq!(days.len(), 29);
        assert_eq!(days.first().unwrap().day(), 1);
        assert_eq!(days.last().unwrap().day(), 29);
        assert!(days.windows(2).all(|w| w[0] < w[1]));
        assert!(days.iter().all(|d| d.month() == 2 && d.year() == 2024));
    }

    #[test]
    fn grid_is_restartable_from_the_reference_alone() {
        let reference = NaiveDate::from_ymd_opt(2025, 5, 20).unwrap();
        let first: Vec<CalendarCell> = month_grid(reference).collect();
        let second: Vec<CalendarCell> = month_grid(reference).collect();
        assert_eq!(first, second);

        // cloning a partially consumed grid restarts nothing, but a fresh
        // clone taken before iteration replays the same sequence
        let grid = month_grid(reference);
        let replay = grid.clone();
        let consumed: Vec<_> = grid.skip(10).collect();
        let full: Vec<_> = replay.collect();
        assert_eq!(full.len(), consumed.len() + 10);
    }

    #[test]
    fn month_navigation_steps_by_whole_months() {
        let reference = NaiveDate::from_ymd_opt(2024, 1, 31).unwrap();
        assert_eq!(
            next_month(reference),
            NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()
        );
        assert_eq!(
            prev_month(reference),
            NaiveDate::from_ymd_opt(2023, 12, 1).unwrap()
        );
        assert_eq!(
            first_of_month(reference),
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
        );
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(
            days_in_month(NaiveDate::from_ymd_opt(2024, 2, 1).unwrap()),
            29
        );
        assert_eq!(
            days_in_month(NaiveDate::from_ymd_opt(2023, 2, 1).unwrap()),
            28
        );
        assert_eq!(
            days_in_month(NaiveDate::from_ymd_opt(2024, 12, 25).unwrap()),
            31
        );
    }
}
