//! Conversion between the Gregorian calendar and the Chinese lunisolar
//! calendar.
//!
//! Conversions are table driven. Each lunar year is encoded as a bit set:
//!
//! * bits 0–3: ordinal of the leap month, 0 if the year has none;
//! * bit `0x8000 >> (m - 1)`: month `m` has 30 days instead of 29;
//! * bit `0x10000`: the leap month has 30 days instead of 29.
//!
//! The table and the solar date of every lunar new year are compiled in from
//! `lunar.csv` by the build script.

use tracing::debug;

use crate::{Date, Error, Result};

include!(concat!(env!("OUT_DIR"), "/lunar_data.rs"));

/// First lunar year covered by the table.
pub const MIN_YEAR: i32 = DATA_MIN_YEAR;
/// Last lunar year covered by the table.
pub const MAX_YEAR: i32 = DATA_MAX_YEAR;

/// A date in the lunisolar calendar.
///
/// A leap month carries the ordinal of the month it follows; only `leap`
/// tells the two apart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LunarDate {
    pub year: i32,
    pub month: u8,
    pub day: u8,
    pub leap: bool,
}

impl LunarDate {
    pub const fn new(year: i32, month: u8, day: u8, leap: bool) -> Self {
        LunarDate {
            year,
            month,
            day,
            leap,
        }
    }

    #[inline]
    pub fn to_solar(&self) -> Result<Date> {
        lunar_to_solar(self.year, self.month, self.day, self.leap)
    }
}

impl TryFrom<Date> for LunarDate {
    type Error = Error;

    #[inline]
    fn try_from(value: Date) -> Result<Self> {
        solar_to_lunar(value)
    }
}

impl TryFrom<LunarDate> for Date {
    type Error = Error;

    #[inline]
    fn try_from(value: LunarDate) -> Result<Self> {
        value.to_solar()
    }
}

impl std::fmt::Display for LunarDate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)?;
        if self.leap {
            f.write_str(" (leap)")?;
        }
        Ok(())
    }
}

fn year_info(year: i32) -> Result<u32> {
    if !(DATA_MIN_YEAR..=DATA_MAX_YEAR).contains(&year) {
        debug!(year, "lunar year outside table");
        return Err(Error::YearNotAvailable {
            year,
            min: DATA_MIN_YEAR,
            max: DATA_MAX_YEAR,
        });
    }
    Ok(LUNAR_INFO[(year - DATA_MIN_YEAR) as usize])
}

#[inline]
const fn info_leap_month(info: u32) -> u8 {
    (info & 0xf) as u8
}

#[inline]
const fn info_month_days(info: u32, month: u8) -> u8 {
    if info & (0x10000 >> month) != 0 {
        30
    } else {
        29
    }
}

#[inline]
const fn info_leap_month_days(info: u32) -> u8 {
    if info_leap_month(info) == 0 {
        0
    } else if info & 0x10000 != 0 {
        30
    } else {
        29
    }
}

/// Month lengths of a lunar year in calendar order, leap month included
/// directly after its predecessor.
fn months(info: u32) -> impl Iterator<Item = (u8, bool, u8)> {
    let leap_month = info_leap_month(info);
    (1..=12u8).flat_map(move |month| {
        let regular = Some((month, false, info_month_days(info, month)));
        let leap = (month == leap_month).then(|| (month, true, info_leap_month_days(info)));
        regular.into_iter().chain(leap)
    })
}

/// Ordinal of the leap month of `year`, if it has one.
pub fn leap_month(year: i32) -> Result<Option<u8>> {
    let leap = info_leap_month(year_info(year)?);
    Ok((leap != 0).then_some(leap))
}

/// Number of days in a lunar month.
pub fn month_days(year: i32, month: u8, leap: bool) -> Result<u8> {
    let info = year_info(year)?;
    let invalid = Error::InvalidLunarDate {
        year,
        month,
        day: 1,
        leap,
    };
    if !(1..=12).contains(&month) {
        return Err(invalid);
    }
    if leap {
        if info_leap_month(info) != month {
            return Err(invalid);
        }
        return Ok(info_leap_month_days(info));
    }
    Ok(info_month_days(info, month))
}

/// Number of days in a lunar year.
pub fn year_days(year: i32) -> Result<u16> {
    Ok(months(year_info(year)?).map(|(_, _, days)| days as u16).sum())
}

/// Solar date of the first day of the lunar year.
pub fn new_year(year: i32) -> Result<Date> {
    year_info(year)?;
    Ok(NEW_YEAR_JUMP_TABLE[(year - DATA_MIN_YEAR) as usize])
}

/// Converts a Gregorian date to the lunar calendar.
pub fn solar_to_lunar(date: Date) -> Result<LunarDate> {
    // The jump table holds the accumulated lengths of whole lunar years; the
    // last entry is the first day past the table.
    let index = NEW_YEAR_JUMP_TABLE.partition_point(|start| *start <= date);
    if index == 0 || index == NEW_YEAR_JUMP_TABLE.len() {
        debug!(%date, "solar date outside lunar table");
        return Err(Error::DateNotAvailable(date));
    }

    let year = DATA_MIN_YEAR + index as i32 - 1;
    let mut offset = date - NEW_YEAR_JUMP_TABLE[index - 1];
    for (month, leap, days) in months(LUNAR_INFO[index - 1]) {
        if offset < days as i32 {
            return Ok(LunarDate::new(year, month, offset as u8 + 1, leap));
        }
        offset -= days as i32;
    }

    // unreachable: the build script checks the jump table against the month lengths
    Err(Error::DateNotAvailable(date))
}

/// Converts a lunar date to the Gregorian calendar.
pub fn lunar_to_solar(year: i32, month: u8, day: u8, leap: bool) -> Result<Date> {
    let info = year_info(year)?;
    let invalid = Error::InvalidLunarDate {
        year,
        month,
        day,
        leap,
    };

    let mut offset = 0i32;
    for (m, l, days) in months(info) {
        if m == month && l == leap {
            if day < 1 || day > days {
                return Err(invalid);
            }
            return Ok(NEW_YEAR_JUMP_TABLE[(year - DATA_MIN_YEAR) as usize] + offset + day as i32 - 1);
        }
        offset += days as i32;
    }

    Err(invalid)
}
