mod tests {
    use myrtio_marble_clock::{ClockReading, NaiveDate, TimeText};

    fn reading(epoch: u64) -> ClockReading {
        ClockReading {
            text: TimeText::from_hm(0, 0).unwrap(),
            epoch,
        }
    }

    fn ymd(year: i32, month: u32, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(year, month, day)
    }

    #[test]
    fn test_unix_epoch() {
        assert_eq!(reading(0).date(), ymd(1970, 1, 1));
        assert_eq!(reading(86_399).date(), ymd(1970, 1, 1));
        assert_eq!(reading(86_400).date(), ymd(1970, 1, 2));
    }

    #[test]
    fn test_leap_day() {
        // 2024-02-29 00:00:00 UTC
        assert_eq!(reading(1_709_164_800).date(), ymd(2024, 2, 29));
        assert_eq!(reading(1_709_251_199).date(), ymd(2024, 2, 29));
        assert_eq!(reading(1_709_251_200).date(), ymd(2024, 3, 1));
        // 2023 has no leap day
        assert_eq!(reading(1_677_542_400).date(), ymd(2023, 2, 28));
        assert_eq!(reading(1_677_628_800).date(), ymd(2023, 3, 1));
    }

    #[test]
    fn test_year_rollover() {
        assert_eq!(reading(1_704_067_199).date(), ymd(2023, 12, 31));
        assert_eq!(reading(1_704_067_200).date(), ymd(2024, 1, 1));
    }

    #[test]
    fn test_date_format() {
        let date = reading(1_709_164_800).date().unwrap();
        assert_eq!(date.to_string(), "2024-02-29");
        assert_eq!(reading(1_704_067_200).date().unwrap().to_string(), "2024-01-01");
    }

    #[test]
    fn test_unrepresentable_epoch() {
        assert_eq!(reading(u64::MAX).date(), None);
    }
}
