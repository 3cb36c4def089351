use crate::{Date, Error, Result, Weekday};

/// Move a holiday falling on `weekday` by `offset` days.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AltDay {
    pub weekday: Weekday,
    pub offset: i8,
}

impl AltDay {
    #[inline]
    pub const fn new(weekday: Weekday, offset: i8) -> Self {
        AltDay { weekday, offset }
    }
}

/// Saturday and Sunday holidays are observed on the following Monday.
pub const WEEKEND_TO_MONDAY: &[AltDay] = &[
    AltDay::new(Weekday::Saturday, 2),
    AltDay::new(Weekday::Sunday, 1),
];

/// Saturday holidays are observed on Friday, Sunday holidays on Monday.
pub const NEAREST_WEEKDAY: &[AltDay] = &[
    AltDay::new(Weekday::Saturday, -1),
    AltDay::new(Weekday::Sunday, 1),
];

pub const SUNDAY_TO_MONDAY: &[AltDay] = &[AltDay::new(Weekday::Sunday, 1)];

/// The date `actual` is observed on.
///
/// The first substitution naming the weekday of `actual` applies; later ones
/// for the same weekday are ignored. Without a match the holiday is observed
/// on its actual date.
#[inline]
pub fn resolve(actual: Option<Date>, substitutions: &[AltDay]) -> Option<Date> {
    actual.map(|it| observe(it, substitutions))
}

pub(crate) fn observe(actual: Date, substitutions: &[AltDay]) -> Date {
    let weekday = actual.weekday();
    substitutions
        .iter()
        .find(|it| it.weekday == weekday)
        .map_or(actual, |it| actual + it.offset as i32)
}

/// Fails if two substitutions name the same weekday.
pub fn check_distinct(substitutions: &[AltDay]) -> Result<()> {
    let mut seen = [false; 7];
    for alt in substitutions {
        let slot = &mut seen[alt.weekday.ordinal() as usize - 1];
        if *slot {
            return Err(Error::InvalidRule(format!(
                "{} has more than one observed substitution",
                alt.weekday
            )));
        }
        *slot = true;
    }
    Ok(())
}
