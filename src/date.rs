use crate::{Error, Holiday, Weekday};

/// A proleptic Gregorian calendar date without time of day or timezone.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[repr(transparent)]
pub struct Date(
    /// Days since 1st of January, 1970. (UNIX epoch)
    pub(crate) i32,
);

impl Date {
    /// Builds a date without checking that the day exists in the month;
    /// out-of-range days roll over into the following month.
    pub const fn from_ymd(year: i32, month: u8, day: u8) -> Self {
        // Source: https://howardhinnant.github.io/date_algorithms.html

        let m = month as i32;
        let d = day as i32;

        let adjusted_year = year - if m <= 2 { 1 } else { 0 };

        let era = if adjusted_year >= 0 {
            adjusted_year / 400
        } else {
            (adjusted_year - 399) / 400
        };

        let year_of_era = adjusted_year - era * 400;
        let month_part = if m > 2 { m - 3 } else { m + 9 };
        let day_of_year = (153 * month_part + 2) / 5 + d - 1;
        let day_of_era = year_of_era * 365 + year_of_era / 4 - year_of_era / 100 + day_of_year;

        Self(era * 146097 + day_of_era - 719468)
    }

    /// Builds a date, returning `None` if it does not exist in the calendar.
    pub const fn from_ymd_opt(year: i32, month: u8, day: u8) -> Option<Self> {
        if month < 1 || month > 12 || day < 1 || day > days_in_month(year, month) {
            return None;
        }
        Some(Self::from_ymd(year, month, day))
    }

    #[inline]
    pub const fn from_year(year: i32) -> Self {
        Self::from_ymd(year, 1, 1)
    }

    pub const fn ymd(&self) -> (i32, u8, u8) {
        // Source: https://howardhinnant.github.io/date_algorithms.html

        let shifted = self.0 + 719468;
        let era = if shifted >= 0 {
            shifted / 146097
        } else {
            (shifted - 146096) / 146097
        };
        let day_of_era = shifted - era * 146097;
        let year_of_era =
            (day_of_era - day_of_era / 1460 + day_of_era / 36524 - day_of_era / 146096) / 365;
        let day_of_year = day_of_era - (365 * year_of_era + year_of_era / 4 - year_of_era / 100);
        let month_part = (5 * day_of_year + 2) / 153;

        let day = day_of_year - (153 * month_part + 2) / 5 + 1;
        let month = if month_part < 10 {
            month_part + 3
        } else {
            month_part - 9
        };
        let year = year_of_era + era * 400 + if month <= 2 { 1 } else { 0 };

        (year, month as u8, day as u8)
    }

    /// Day of the month
    #[inline]
    pub const fn day(&self) -> u8 {
        self.ymd().2
    }

    /// Month of the year
    #[inline]
    pub const fn month(&self) -> u8 {
        self.ymd().1
    }

    /// Year
    #[inline]
    pub const fn year(&self) -> i32 {
        self.ymd().0
    }

    pub const fn weekday(&self) -> Weekday {
        // 1970-01-01 was a Thursday.
        match Weekday::from_ordinal(((self.0 + 3).rem_euclid(7) + 1) as u8) {
            Some(it) => it,
            None => unreachable!(),
        }
    }

    /// Days elapsed since the UNIX epoch.
    #[inline]
    pub const fn days_since_epoch(&self) -> i32 {
        self.0
    }

    #[inline]
    pub const fn add_days(self, days: i32) -> Self {
        Self(self.0 + days)
    }

    /// Signed number of days from `other` to `self`.
    #[inline]
    pub const fn days_since(&self, other: &Self) -> i32 {
        self.0 - other.0
    }
}

pub const fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

pub const fn days_in_month(year: i32, month: u8) -> u8 {
    match month {
        1 | 3 | 5 | 7 | 8 | 10 | 12 => 31,
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 0,
    }
}

impl std::ops::Add<i32> for Date {
    type Output = Date;

    #[inline]
    fn add(self, rhs: i32) -> Self::Output {
        self.add_days(rhs)
    }
}
impl std::ops::AddAssign<i32> for Date {
    #[inline]
    fn add_assign(&mut self, rhs: i32) {
        self.0 += rhs;
    }
}
impl std::ops::Sub<i32> for Date {
    type Output = Date;

    #[inline]
    fn sub(self, rhs: i32) -> Self::Output {
        self.add_days(-rhs)
    }
}
impl std::ops::Sub for Date {
    type Output = i32;

    #[inline]
    fn sub(self, rhs: Self) -> Self::Output {
        self.days_since(&rhs)
    }
}

const SECONDS_IN_DAY: i64 = 86400;

impl TryFrom<Date> for std::time::SystemTime {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let secs = value.0 as i64 * SECONDS_IN_DAY;
        let offset = std::time::Duration::from_secs(secs.unsigned_abs());
        let result = if secs >= 0 {
            std::time::SystemTime::UNIX_EPOCH.checked_add(offset)
        } else {
            std::time::SystemTime::UNIX_EPOCH.checked_sub(offset)
        };
        result.ok_or(crate::Error::DateTooLarge)
    }
}

impl From<std::time::SystemTime> for Date {
    fn from(value: std::time::SystemTime) -> Self {
        let days = match value.duration_since(std::time::SystemTime::UNIX_EPOCH) {
            Ok(duration) => duration.as_secs() as i64 / SECONDS_IN_DAY,
            Err(err) => {
                let secs = err.duration().as_secs() as i64;
                // round towards the earlier day for instants before the epoch
                -((secs + SECONDS_IN_DAY - 1) / SECONDS_IN_DAY)
            }
        };

        Date(days as i32)
    }
}

// Days from 0001-01-01 (day 1 of the common era) to the UNIX epoch.
#[cfg(feature = "chrono")]
const CE_TO_UNIX_DAYS: i32 = 719163;

#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::NaiveDate {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let days = value
            .0
            .checked_add(CE_TO_UNIX_DAYS)
            .ok_or(crate::Error::DateTooLarge)?;
        chrono::NaiveDate::from_num_days_from_ce_opt(days).ok_or(crate::Error::DateTooLarge)
    }
}
#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::DateTime<chrono::Utc> {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let naive = chrono::NaiveDate::try_from(value)?
            .and_hms_opt(0, 0, 0)
            .ok_or(crate::Error::DateTooLarge)?;

        Ok(chrono::TimeZone::from_utc_datetime(&chrono::Utc, &naive))
    }
}
#[cfg(feature = "chrono")]
impl TryFrom<Date> for chrono::DateTime<chrono::Local> {
    type Error = crate::Error;

    #[inline]
    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let dt_utc = chrono::DateTime::<chrono::Utc>::try_from(value)?;
        Ok(dt_utc.with_timezone(&chrono::Local))
    }
}

#[cfg(feature = "chrono")]
impl From<chrono::NaiveDate> for Date {
    fn from(value: chrono::NaiveDate) -> Self {
        Date(chrono::Datelike::num_days_from_ce(&value) - CE_TO_UNIX_DAYS)
    }
}
#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Utc>> for Date {
    #[inline]
    fn from(value: chrono::DateTime<chrono::Utc>) -> Self {
        Date::from(value.date_naive())
    }
}
#[cfg(feature = "chrono")]
impl From<chrono::DateTime<chrono::Local>> for Date {
    #[inline]
    fn from(value: chrono::DateTime<chrono::Local>) -> Self {
        Date::from(value.naive_local().date())
    }
}

// Julian day number of 1970-01-01.
#[cfg(feature = "time")]
const UNIX_EPOCH_JULIAN_DAY: i32 = 2440588;

#[cfg(feature = "time")]
impl TryFrom<Date> for time::Date {
    type Error = crate::Error;

    fn try_from(value: Date) -> Result<Self, Self::Error> {
        let julian_day = value
            .0
            .checked_add(UNIX_EPOCH_JULIAN_DAY)
            .ok_or(crate::Error::DateTooLarge)?;
        time::Date::from_julian_day(julian_day).map_err(|_| crate::Error::DateTooLarge)
    }
}
#[cfg(feature = "time")]
impl From<time::Date> for Date {
    #[inline]
    fn from(value: time::Date) -> Self {
        Date(value.to_julian_day() - UNIX_EPOCH_JULIAN_DAY)
    }
}

impl std::fmt::Debug for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "Date({y:04}-{m:02}-{d:02})")
    }
}

impl std::fmt::Display for Date {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let (y, m, d) = self.ymd();
        write!(f, "{y:04}-{m:02}-{d:02}")
    }
}

impl std::str::FromStr for Date {
    type Err = Error;

    fn from_str(date: &str) -> Result<Self, Self::Err> {
        let invalid = || Error::InvalidDate(date.to_string());

        // allow a leading minus sign on the year
        let (sign, rest) = match date.strip_prefix('-') {
            Some(rest) => (-1, rest),
            None => (1, date),
        };
        let mut parts = rest.split('-');
        let year: i32 = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        let month = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        let day = parts.next().ok_or_else(invalid)?.parse().map_err(|_| invalid())?;
        if parts.next().is_some() {
            return Err(invalid());
        }

        Date::from_ymd_opt(sign * year, month, day).ok_or_else(invalid)
    }
}

pub trait DateExt: Into<Date> + Clone {
    /// Whether this date is the actual or observed date of `holiday`.
    fn is_observance_of(&self, holiday: &Holiday) -> crate::Result<bool> {
        crate::contains([holiday], self.clone())
    }

    /// The lunar calendar date corresponding to this date.
    fn to_lunar(&self) -> crate::Result<crate::lunar::LunarDate> {
        crate::lunar::solar_to_lunar(self.clone().into())
    }
}

impl DateExt for Date {}
impl DateExt for std::time::SystemTime {}

#[cfg(feature = "chrono")]
impl DateExt for chrono::NaiveDate {}
#[cfg(feature = "chrono")]
impl DateExt for chrono::DateTime<chrono::Utc> {}
#[cfg(feature = "chrono")]
impl DateExt for chrono::DateTime<chrono::Local> {}

#[cfg(feature = "time")]
impl DateExt for time::Date {}
