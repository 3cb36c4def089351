//! Easter computus for the Gregorian and Julian calendars.
//!
//! Both functions return a [`Date`] in the Gregorian calendar, so Western and
//! Orthodox movable feasts can be compared directly.

use crate::Date;

/// Which Easter computus a movable feast follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Computus {
    /// Western churches.
    #[default]
    Gregorian,
    /// Orthodox churches; computed on the Julian calendar.
    Julian,
}

impl Computus {
    #[inline]
    pub const fn easter(self, year: i32) -> Date {
        match self {
            Computus::Gregorian => gregorian_easter(year),
            Computus::Julian => julian_easter(year),
        }
    }
}

/// Easter Sunday according to the anonymous Gregorian (Meeus/Jones/Butcher)
/// algorithm.
pub const fn gregorian_easter(year: i32) -> Date {
    let golden = year.rem_euclid(19);
    let century = year.div_euclid(100);
    let year_of_century = year.rem_euclid(100);

    let skipped_leaps = century / 4;
    let century_leap = century % 4;
    let lunar_correction = (century + 8) / 25;
    let solar_correction = (century - lunar_correction + 1) / 3;

    // days from March 21 to the Paschal full moon
    let epact = (19 * golden + century - skipped_leaps - solar_correction + 15).rem_euclid(30);
    let i = year_of_century / 4;
    let k = year_of_century % 4;
    // days from the full moon to the following Sunday
    let to_sunday = (32 + 2 * century_leap + 2 * i - epact - k).rem_euclid(7);
    let m = (golden + 11 * epact + 22 * to_sunday) / 451;

    let n = epact + to_sunday - 7 * m + 114;
    Date::from_ymd(year, (n / 31) as u8, (n % 31 + 1) as u8)
}

/// Orthodox Easter Sunday (Meeus Julian algorithm), converted to the
/// Gregorian calendar.
pub const fn julian_easter(year: i32) -> Date {
    let a = year.rem_euclid(4);
    let b = year.rem_euclid(7);
    let c = year.rem_euclid(19);
    let d = (19 * c + 15) % 30;
    let e = (2 * a + 4 * b - d + 34).rem_euclid(7);

    let n = d + e + 114;
    // Interpreting the Julian month/day as Gregorian and shifting by the
    // calendar drift yields the Gregorian date of the same day.
    Date::from_ymd(year, (n / 31) as u8, (n % 31 + 1) as u8).add_days(julian_calendar_offset(year))
}

/// Days the Julian calendar lags behind the Gregorian calendar for dates from
/// 1 March of `year` onwards.
///
/// The drift grows by one day in every century year that is not divisible by
/// 400: 10 days in 1582, 13 days for 1900–2099, 14 days for 2100–2199.
#[inline]
pub const fn julian_calendar_offset(year: i32) -> i32 {
    year.div_euclid(100) - year.div_euclid(400) - 2
}
