//! Holiday rule evaluation engine.
//!
//! A [`Holiday`] binds a name and a validity window to exactly one date
//! [`Rule`] and an optional list of observed-date substitutions. Calling
//! [`Holiday::calc`] for a year yields the actual date of the holiday and the
//! date it is observed on, or `None` when the holiday does not apply that year.
//!
//! ```
//! use holiday_rules::{observed, templates, Date, Overrides};
//!
//! let boxing_day = templates::CHRISTMAS_DAY_2.clone_with(
//!     Overrides::new()
//!         .name("Boxing Day")
//!         .observed(observed::WEEKEND_TO_MONDAY),
//! );
//! let it = boxing_day.calc(2021).unwrap().unwrap();
//! assert_eq!(it.actual, Date::from_ymd(2021, 12, 26));
//! assert_eq!(it.observed, Date::from_ymd(2021, 12, 27));
//! ```

mod date;
pub mod easter;
pub mod equinox;
mod holiday;
pub mod lunar;
pub mod observed;
pub mod rule;
pub mod templates;
mod weekday;

pub use date::{days_in_month, is_leap_year, Date, DateExt};
pub use easter::Computus;
pub use equinox::Equinox;
pub use holiday::{Holiday, HolidayBuilder, ObservanceType, Occurrence, Overrides};
pub use lunar::LunarDate;
pub use observed::AltDay;
pub use rule::{CalcFn, Rule};
pub use weekday::Weekday;

/// Holidays among `holidays` whose actual or observed date is `date`.
///
/// Observed dates may be pushed across a year boundary, so the neighbouring
/// years are evaluated as well.
pub fn get<'a, I>(holidays: I, date: impl Into<Date>) -> Result<Vec<&'a Holiday>>
where
    I: IntoIterator<Item = &'a Holiday>,
{
    let date = date.into();
    let year = date.year();

    let mut found = Vec::new();
    'holidays: for holiday in holidays {
        let mut evaluated = false;
        let mut unavailable = None;
        for y in [year, year - 1, year + 1] {
            match holiday.calc(y) {
                Ok(Some(it)) if it.actual == date || it.observed == date => {
                    found.push(holiday);
                    continue 'holidays;
                }
                Ok(_) => evaluated = true,
                Err(err @ Error::YearNotAvailable { .. }) => {
                    unavailable.get_or_insert(err);
                }
                Err(err) => return Err(err),
            }
        }
        // only an error if none of the years could be evaluated
        if let (false, Some(err)) = (evaluated, unavailable) {
            return Err(err);
        }
    }
    Ok(found)
}

#[inline]
pub fn contains<'a, I>(holidays: I, date: impl Into<Date>) -> Result<bool>
where
    I: IntoIterator<Item = &'a Holiday>,
{
    get(holidays, date).map(|it| !it.is_empty())
}

/// Error states the holiday engine might encounter.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Year is outside the span covered by a table or approximation.
    #[error("Year {year} is outside the supported range {min}..={max}")]
    YearNotAvailable { year: i32, min: i32, max: i32 },
    /// Date is outside the span covered by the lunar table.
    #[error("Date {0} is outside the supported lunar range")]
    DateNotAvailable(Date),
    /// Lunar date does not exist in the lunar calendar.
    #[error("Lunar date {year}-{month:02}-{day:02} (leap month: {leap}) does not exist")]
    InvalidLunarDate {
        year: i32,
        month: u8,
        day: u8,
        leap: bool,
    },
    /// Holiday rule is malformed.
    #[error("Invalid holiday rule: {0}")]
    InvalidRule(String),
    /// Text is not a valid `YYYY-MM-DD` date.
    #[error("Invalid date {0:?}")]
    InvalidDate(String),
    /// Conversion to another date format is not supported.
    #[error("Date is too large for conversion")]
    DateTooLarge,
}

pub type Result<T> = std::result::Result<T, Error>;
