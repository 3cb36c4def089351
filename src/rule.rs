use crate::easter::Computus;
use crate::equinox::Equinox;
use crate::{days_in_month, lunar, Date, Error, Result, Weekday};

/// A hand-written rule: returns the actual date for a year, or `None` if the
/// holiday does not occur that year.
pub type CalcFn = fn(year: i32) -> Result<Option<Date>>;

#[derive(Debug, Clone, Copy)]
pub enum Rule {
    /// A fixed day of a month, such as 25 December.
    DayOfMonth { month: u8, day: u8 },
    /// The `nth` occurrence of a weekday in a month. Negative values count
    /// back from the end of the month, so `-1` is the last occurrence.
    WeekdayOfMonth { month: u8, weekday: Weekday, nth: i8 },
    /// The `nth` occurrence of a weekday counted from a fixed day of a month,
    /// the day itself included. `1` is "on or after", `-1` "on or before".
    WeekdayFrom {
        month: u8,
        day: u8,
        weekday: Weekday,
        nth: i8,
    },
    /// A number of days before or after Easter Sunday.
    EasterOffset { days: i16, computus: Computus },
    /// A fixed day of a lunar month, shifted by `shift` solar days.
    LunarDayOfMonth { month: u8, day: u8, shift: i8 },
    /// The day of the March or September equinox.
    Equinox(Equinox),
    /// Anything else, usually one-off historical exceptions.
    Custom(CalcFn),
}

impl Rule {
    /// The first `weekday` on or after the given day of the month.
    pub const fn weekday_on_or_after(month: u8, day: u8, weekday: Weekday) -> Self {
        Rule::WeekdayFrom {
            month,
            day,
            weekday,
            nth: 1,
        }
    }

    /// Checks the parameters of the rule without evaluating it.
    pub fn validate(&self) -> Result<()> {
        match *self {
            Rule::DayOfMonth { month, day } => check_month_day(month, day),
            Rule::WeekdayFrom { month, day, nth, .. } => {
                check_month_day(month, day)?;
                check_nth(nth)
            }
            Rule::WeekdayOfMonth { month, nth, .. } => {
                check_month(month)?;
                check_nth(nth)
            }
            Rule::LunarDayOfMonth { month, day, .. } => check_lunar_month_day(month, day),
            Rule::EasterOffset { .. } | Rule::Equinox(_) | Rule::Custom(_) => Ok(()),
        }
    }

    /// The actual date of the rule in `year`, if the rule yields one.
    pub fn evaluate(&self, year: i32) -> Result<Option<Date>> {
        match *self {
            Rule::DayOfMonth { month, day } => day_of_month(year, month, day),
            Rule::WeekdayOfMonth {
                month,
                weekday,
                nth,
            } => weekday_of_month(year, month, weekday, nth),
            Rule::WeekdayFrom {
                month,
                day,
                weekday,
                nth,
            } => {
                check_month_day(month, day)?;
                check_nth(nth)?;
                Ok(Date::from_ymd_opt(year, month, day).and_then(|it| weekday_from(it, weekday, nth)))
            }
            Rule::EasterOffset { days, computus } => Ok(Some(easter_offset(year, days, computus))),
            Rule::LunarDayOfMonth { month, day, shift } => lunar_day_of_month(year, month, day, shift),
            Rule::Equinox(equinox) => equinox.date(year).map(Some),
            Rule::Custom(func) => func(year),
        }
    }
}

fn check_month(month: u8) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidRule(format!("month {month} out of range")));
    }
    Ok(())
}

fn check_month_day(month: u8, day: u8) -> Result<()> {
    check_month(month)?;
    // any leap year gives the longest possible month
    if day < 1 || day > days_in_month(2000, month) {
        return Err(Error::InvalidRule(format!(
            "day {day} out of range for month {month}"
        )));
    }
    Ok(())
}

fn check_nth(nth: i8) -> Result<()> {
    if nth == 0 {
        return Err(Error::InvalidRule("weekday occurrence must not be 0".into()));
    }
    Ok(())
}

fn check_lunar_month_day(month: u8, day: u8) -> Result<()> {
    if !(1..=12).contains(&month) || !(1..=30).contains(&day) {
        return Err(Error::InvalidRule(format!(
            "lunar month/day {month}/{day} out of range"
        )));
    }
    Ok(())
}

/// A fixed day of a month. `None` for 29 February in common years.
pub fn day_of_month(year: i32, month: u8, day: u8) -> Result<Option<Date>> {
    check_month_day(month, day)?;
    Ok(Date::from_ymd_opt(year, month, day))
}

/// The `nth` occurrence of `weekday` counted from `start`, which counts as an
/// occurrence itself.
///
/// Positive `nth` counts forwards, negative `nth` counts backwards, `0` yields
/// `None`.
pub fn weekday_from(start: Date, weekday: Weekday, nth: i8) -> Option<Date> {
    let nth = nth as i32;
    match nth {
        0 => None,
        1.. => Some(start + start.weekday().days_until(weekday) + (nth - 1) * 7),
        _ => Some(start - weekday.days_until(start.weekday()) + (nth + 1) * 7),
    }
}

/// The `nth` occurrence of `weekday` in a month; negative `nth` counts from the
/// end of the month.
///
/// Counting past the occurrences in the month continues into the adjacent
/// months, so the 5th Tuesday of a month with four Tuesdays falls in the next
/// month. `nth` must not be 0.
pub fn weekday_of_month(year: i32, month: u8, weekday: Weekday, nth: i8) -> Result<Option<Date>> {
    check_month(month)?;
    check_nth(nth)?;
    let start = if nth < 0 {
        Date::from_ymd(year, month, days_in_month(year, month))
    } else {
        Date::from_ymd(year, month, 1)
    };
    Ok(weekday_from(start, weekday, nth))
}

/// A number of days before or after Easter Sunday.
#[inline]
pub fn easter_offset(year: i32, days: i16, computus: Computus) -> Date {
    computus.easter(year) + days as i32
}

/// A day of a lunar month, converted to the solar calendar and then moved by
/// `shift` solar days.
///
/// The lunar year is numbered like the solar year it starts in, so month 12 of
/// lunar year `y` usually falls in January or February of `y + 1`.
///
/// Day 30 only exists in long months; in years where the month has 29 days
/// the result is `None`.
pub fn lunar_day_of_month(year: i32, month: u8, day: u8, shift: i8) -> Result<Option<Date>> {
    check_lunar_month_day(month, day)?;
    if day > lunar::month_days(year, month, false)? {
        return Ok(None);
    }
    Ok(Some(lunar::lunar_to_solar(year, month, day, false)? + shift as i32))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u8, d: u8) -> Option<Date> {
        Some(Date::from_ymd(y, m, d))
    }

    #[test]
    fn fixed_day() {
        let rule = Rule::DayOfMonth { month: 6, day: 20 };
        for year in 2015..=2020 {
            assert_eq!(rule.evaluate(year).unwrap(), date(year, 6, 20));
        }
    }

    #[test]
    fn leap_day_only_in_leap_years() {
        let rule = Rule::DayOfMonth { month: 2, day: 29 };
        assert_eq!(rule.evaluate(2020).unwrap(), date(2020, 2, 29));
        assert_eq!(rule.evaluate(2021).unwrap(), None);
        assert!(rule.validate().is_ok());
    }

    #[test]
    fn weekday_of_month_counts_both_ways() {
        // June 2015 has five Tuesdays: 2, 9, 16, 23, 30
        let cases = [
            (1, date(2015, 6, 2)),
            (2, date(2015, 6, 9)),
            (3, date(2015, 6, 16)),
            (4, date(2015, 6, 23)),
            (5, date(2015, 6, 30)),
            (-1, date(2015, 6, 30)),
            (-2, date(2015, 6, 23)),
            (-3, date(2015, 6, 16)),
            (-4, date(2015, 6, 9)),
            (-5, date(2015, 6, 2)),
        ];
        for (nth, want) in cases {
            let rule = Rule::WeekdayOfMonth {
                month: 6,
                weekday: Weekday::Tuesday,
                nth,
            };
            assert_eq!(rule.evaluate(2015).unwrap(), want, "{nth}");
        }
    }

    #[test]
    fn last_weekday_in_four_and_five_occurrence_months() {
        // May 2021 has five Mondays, May 2022 four
        assert_eq!(weekday_of_month(2021, 5, Weekday::Monday, -1).unwrap(), date(2021, 5, 31));
        assert_eq!(weekday_of_month(2022, 5, Weekday::Monday, -1).unwrap(), date(2022, 5, 30));
        // fourth Thursday of November
        assert_eq!(weekday_of_month(2020, 11, Weekday::Thursday, 4).unwrap(), date(2020, 11, 26));
        // a fifth Thursday that November 2021 does not have spills into December
        assert_eq!(weekday_of_month(2021, 11, Weekday::Thursday, 5).unwrap(), date(2021, 12, 2));
    }

    #[test]
    fn weekday_counted_from_day() {
        // 2015-06-15 is a Monday
        let cases = [
            (1, date(2015, 6, 16)),
            (2, date(2015, 6, 23)),
            (3, date(2015, 6, 30)),
            (4, date(2015, 7, 7)),
            (5, date(2015, 7, 14)),
            (-1, date(2015, 6, 9)),
            (-2, date(2015, 6, 2)),
            (-3, date(2015, 5, 26)),
            (-4, date(2015, 5, 19)),
            (-5, date(2015, 5, 12)),
        ];
        for (nth, want) in cases {
            let rule = Rule::WeekdayFrom {
                month: 6,
                day: 15,
                weekday: Weekday::Tuesday,
                nth,
            };
            assert_eq!(rule.evaluate(2015).unwrap(), want, "{nth}");
        }
    }

    #[test]
    fn start_day_counts_as_occurrence() {
        let monday = Date::from_ymd(2015, 6, 15);
        assert_eq!(weekday_from(monday, Weekday::Monday, 1), Some(monday));
        assert_eq!(weekday_from(monday, Weekday::Monday, -1), Some(monday));
        assert_eq!(weekday_from(monday, Weekday::Monday, 2), Some(monday + 7));
        assert_eq!(weekday_from(monday, Weekday::Monday, -2), Some(monday - 7));
    }

    #[test]
    fn on_or_after_moves_at_most_six_days() {
        let rule = Rule::weekday_on_or_after(5, 24, Weekday::Monday);
        for year in 2000..2030 {
            let got = rule.evaluate(year).unwrap().unwrap();
            let start = Date::from_ymd(year, 5, 24);
            assert_eq!(got.weekday(), Weekday::Monday);
            assert!((0..=6).contains(&(got - start)), "{year}");
        }
    }

    #[test]
    fn easter_offsets() {
        let cases = [
            (2015, 0, Computus::Gregorian, date(2015, 4, 5)),
            (2016, 10, Computus::Gregorian, date(2016, 4, 6)),
            (2017, -10, Computus::Gregorian, date(2017, 4, 6)),
            (2015, 0, Computus::Julian, date(2015, 4, 12)),
            (2016, 10, Computus::Julian, date(2016, 5, 11)),
            (2017, -10, Computus::Julian, date(2017, 4, 6)),
        ];
        for (year, days, computus, want) in cases {
            let rule = Rule::EasterOffset { days, computus };
            assert_eq!(rule.evaluate(year).unwrap(), want, "{year} {days} {computus:?}");
        }
    }

    #[test]
    fn lunar_shifts_are_solar_days() {
        let eve = Rule::LunarDayOfMonth {
            month: 1,
            day: 1,
            shift: -1,
        };
        let new_year = Rule::LunarDayOfMonth {
            month: 1,
            day: 1,
            shift: 0,
        };
        let second = Rule::LunarDayOfMonth {
            month: 1,
            day: 1,
            shift: 1,
        };
        assert_eq!(eve.evaluate(2024).unwrap(), date(2024, 2, 9));
        assert_eq!(new_year.evaluate(2024).unwrap(), date(2024, 2, 10));
        assert_eq!(second.evaluate(2024).unwrap(), date(2024, 2, 11));
        // the eve of 2020 falls in the previous solar month
        assert_eq!(eve.evaluate(2020).unwrap(), date(2020, 1, 24));
    }

    #[test]
    fn lunar_out_of_range_is_an_error() {
        let rule = Rule::LunarDayOfMonth {
            month: 8,
            day: 15,
            shift: 0,
        };
        assert!(matches!(rule.evaluate(2101), Err(Error::YearNotAvailable { .. })));
    }

    #[test]
    fn custom_rules_are_plain_functions() {
        fn marine_day(year: i32) -> Result<Option<Date>> {
            if year == 2020 || year == 2021 {
                return weekday_of_month(year, 7, Weekday::Thursday, 4);
            }
            weekday_of_month(year, 7, Weekday::Monday, 3)
        }

        let rule = Rule::Custom(marine_day);
        assert_eq!(rule.evaluate(2019).unwrap(), date(2019, 7, 15));
        assert_eq!(rule.evaluate(2020).unwrap(), date(2020, 7, 23));
        assert_eq!(rule.evaluate(2021).unwrap(), date(2021, 7, 22));
        assert_eq!(rule.evaluate(2022).unwrap(), date(2022, 7, 18));
    }

    #[test]
    fn malformed_parameters() {
        assert!(Rule::DayOfMonth { month: 13, day: 1 }.validate().is_err());
        assert!(Rule::DayOfMonth { month: 4, day: 31 }.validate().is_err());
        assert!(Rule::DayOfMonth { month: 4, day: 0 }.validate().is_err());
        assert!(matches!(
            Rule::DayOfMonth { month: 0, day: 1 }.evaluate(2020),
            Err(Error::InvalidRule(_))
        ));
        assert!(Rule::LunarDayOfMonth {
            month: 1,
            day: 31,
            shift: 0
        }
        .validate()
        .is_err());
    }

    #[test]
    fn zeroth_occurrence_is_rejected() {
        let of_month = Rule::WeekdayOfMonth {
            month: 1,
            weekday: Weekday::Monday,
            nth: 0,
        };
        let from_day = Rule::WeekdayFrom {
            month: 5,
            day: 24,
            weekday: Weekday::Monday,
            nth: 0,
        };
        for rule in [of_month, from_day] {
            assert!(matches!(rule.validate(), Err(Error::InvalidRule(_))), "{rule:?}");
            assert!(matches!(rule.evaluate(2020), Err(Error::InvalidRule(_))), "{rule:?}");
        }
        assert!(matches!(
            weekday_of_month(2020, 1, Weekday::Monday, 0),
            Err(Error::InvalidRule(_))
        ));
        assert_eq!(weekday_from(Date::from_ymd(2020, 5, 24), Weekday::Monday, 0), None);
    }

    #[test]
    fn lunar_day_30_only_in_long_months() {
        let rule = Rule::LunarDayOfMonth {
            month: 1,
            day: 30,
            shift: 0,
        };
        assert!(rule.validate().is_ok());
        let mut seen = (false, false);
        for year in 2000..2030 {
            let long = lunar::month_days(year, 1, false).unwrap() == 30;
            let got = rule.evaluate(year).unwrap();
            assert_eq!(got.is_some(), long, "{year}");
            if let Some(it) = got {
                assert_eq!(it, lunar::lunar_to_solar(year, 1, 30, false).unwrap());
            }
            if long {
                seen.0 = true;
            } else {
                seen.1 = true;
            }
        }
        assert_eq!(seen, (true, true));
    }
}
