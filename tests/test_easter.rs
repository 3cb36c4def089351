use holiday_rules::easter::{gregorian_easter, julian_calendar_offset, julian_easter};
use holiday_rules::{Computus, Date, Holiday, ObservanceType, Rule, Weekday};
use proptest::prelude::*;

#[test]
fn western_and_orthodox_easter() {
    let cases = [
        (2019, Date::from_ymd(2019, 4, 21), Date::from_ymd(2019, 4, 28)),
        (2020, Date::from_ymd(2020, 4, 12), Date::from_ymd(2020, 4, 19)),
        (2021, Date::from_ymd(2021, 4, 4), Date::from_ymd(2021, 5, 2)),
        (2024, Date::from_ymd(2024, 3, 31), Date::from_ymd(2024, 5, 5)),
    ];
    for (year, western, orthodox) in cases {
        assert_eq!(Computus::Gregorian.easter(year), western, "{year}");
        assert_eq!(Computus::Julian.easter(year), orthodox, "{year}");
    }
}

#[test]
fn orthodox_easter_never_precedes_western() {
    for year in 1900..2100 {
        let western = gregorian_easter(year);
        let orthodox = julian_easter(year);
        assert!(orthodox >= western, "{year}");
        assert_eq!((orthodox - western) % 7, 0, "{year}");
    }
}

proptest! {
    #[test]
    fn easter_is_sunday(year in 1583i32..10_000) {
        prop_assert_eq!(gregorian_easter(year).weekday(), Weekday::Sunday);
        prop_assert_eq!(julian_easter(year).weekday(), Weekday::Sunday);
    }

    #[test]
    fn gregorian_easter_within_march_22_and_april_25(year in 1583i32..10_000) {
        let easter = gregorian_easter(year);
        prop_assert!(easter >= Date::from_ymd(year, 3, 22));
        prop_assert!(easter <= Date::from_ymd(year, 4, 25));
    }

    #[test]
    fn offset_rule_is_plain_day_arithmetic(year in 1583i32..5000, days in -400i16..400, julian in any::<bool>()) {
        let computus = if julian { Computus::Julian } else { Computus::Gregorian };
        let holiday = Holiday::new("Movable feast", ObservanceType::Religious, Rule::EasterOffset { days, computus });
        let it = holiday.calc(year).unwrap().unwrap();
        prop_assert_eq!(it.actual, computus.easter(year) + days as i32);
        prop_assert_eq!(it.actual - computus.easter(year), days as i32);
    }

    #[test]
    fn julian_offset_is_monotonic(year in 1583i32..10_000) {
        let step = julian_calendar_offset(year + 1) - julian_calendar_offset(year);
        prop_assert!(step == 0 || step == 1);
    }
}
