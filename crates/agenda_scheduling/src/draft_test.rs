#[cfg(test)]
mod tests {
    use crate::draft::BookingDraft;
    use crate::error::SchedulingError;
    use crate::policy::{BookedSlotSet, SlotTime};
    use chrono::{NaiveDate, NaiveTime};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn slot(label: &str) -> SlotTime {
        SlotTime {
            label: label.to_string(),
            time: NaiveTime::parse_from_str(label, "%H:%M").unwrap(),
        }
    }

    #[test]
    fn selecting_a_new_date_clears_the_time() {
        let today = date(2024, 6, 10); // Monday
        let mut draft = BookingDraft::new(today);
        let booked = BookedSlotSet::new();

        draft.select_day(date(2024, 6, 11), today).unwrap();
        draft.select_time(slot("14:00"), &booked).unwrap();
        assert!(draft.tentative_slot().is_some());

        draft.select_day(date(2024, 6, 12), today).unwrap();
        assert!(draft.selected_time().is_none());
        assert!(draft.tentative_slot().is_none());
    }

    #[test]
    fn month_navigation_clears_the_whole_selection() {
        let today = date(2024, 6, 10);
        let mut draft = BookingDraft::new(today);
        let booked = BookedSlotSet::new();

        draft.select_day(date(2024, 6, 11), today).unwrap();
        draft.select_time(slot("09:00"), &booked).unwrap();

        draft.next_month();
        assert_eq!(draft.displayed_month(), date(2024, 7, 1));
        assert!(draft.selected_date().is_none());
        assert!(draft.selected_time().is_none());

        draft.prev_month();
        assert_eq!(draft.displayed_month(), date(2024, 6, 1));
    }

    #[test]
    fn clicking_a_weekend_day_leaves_the_selection_untouched() {
        let today = date(2024, 6, 5); // Wednesday
        let mut draft = BookingDraft::new(today);

        draft.select_day(date(2024, 6, 6), today).unwrap();
        let saturday = date(2024, 6, 8);
        let err = draft.select_day(saturday, today).unwrap_err();
        assert!(matches!(err, SchedulingError::DayNotSelectable));
        // selectedDate must not change
        assert_eq!(draft.selected_date(), Some(date(2024, 6, 6)));
    }

    #[test]
    fn time_selection_requires_a_date() {
        let today = date(2024, 6, 10);
        let mut draft = BookingDraft::new(today);
        let booked = BookedSlotSet::new();
        let err = draft.select_time(slot("14:00"), &booked).unwrap_err();
        assert!(matches!(err, SchedulingError::Validation(_)));
    }

    #[test]
    fn booked_slots_cannot_be_selected() {
        let today = date(2024, 6, 10);
        let mut draft = BookingDraft::new(today);
        let mut booked = BookedSlotSet::new();
        booked.insert(date(2024, 6, 11).and_hms_opt(14, 0, 0).unwrap());

        draft.select_day(date(2024, 6, 11), today).unwrap();
        let err = draft.select_time(slot("14:00"), &booked).unwrap_err();
        assert!(matches!(err, SchedulingError::SlotTaken));
        assert!(draft.selected_time().is_none());

        // a free time on the same day is fine
        draft.select_time(slot("15:00"), &booked).unwrap();
        assert_eq!(
            draft.tentative_slot(),
            Some(date(2024, 6, 11).and_hms_opt(15, 0, 0).unwrap())
        );
    }

    #[test]
    fn tentative_slot_is_derived_not_stored() {
        let today = date(2024, 6, 10);
        let mut draft = BookingDraft::new(today);
        let booked = BookedSlotSet::new();

        assert!(draft.tentative_slot().is_none());
        draft.select_day(date(2024, 6, 11), today).unwrap();
        assert!(draft.tentative_slot().is_none());
        draft.select_time(slot("10:00"), &booked).unwrap();
        assert_eq!(
            draft.tentative_slot(),
            Some(date(2024, 6, 11).and_hms_opt(10, 0, 0).unwrap())
        );
        draft.clear();
        assert!(draft.tentative_slot().is_none());
    }
}
