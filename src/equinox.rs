//! Closed-form approximation of the equinox dates, valid for 1851–2150.

use tracing::debug;

use crate::{Date, Error, Result};

pub const MIN_YEAR: i32 = 1851;
pub const MAX_YEAR: i32 = 2150;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Equinox {
    /// March equinox.
    Vernal,
    /// September equinox.
    Autumnal,
}

impl Equinox {
    #[inline]
    pub const fn month(self) -> u8 {
        match self {
            Equinox::Vernal => 3,
            Equinox::Autumnal => 9,
        }
    }

    fn band_constant(self, year: i32) -> f64 {
        match (self, year) {
            (Equinox::Vernal, ..=1899) => 19.8277,
            (Equinox::Vernal, 1900..=1979) => 20.8357,
            (Equinox::Vernal, 1980..=2099) => 20.8431,
            (Equinox::Vernal, _) => 21.8510,
            (Equinox::Autumnal, ..=1899) => 22.2588,
            (Equinox::Autumnal, 1900..=1979) => 23.2588,
            (Equinox::Autumnal, 1980..=2099) => 23.2488,
            (Equinox::Autumnal, _) => 24.2488,
        }
    }

    /// Day of month of the equinox in `year`.
    pub fn day_of_month(self, year: i32) -> Result<u8> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            debug!(year, equinox = ?self, "equinox approximation out of range");
            return Err(Error::YearNotAvailable {
                year,
                min: MIN_YEAR,
                max: MAX_YEAR,
            });
        }

        let elapsed = (year - 1980) as f64;
        let base = 0.242194 * elapsed - (elapsed / 4.0).floor();
        let day = base + self.band_constant(year);
        Ok(day.floor() as u8)
    }

    #[inline]
    pub fn date(self, year: i32) -> Result<Date> {
        Ok(Date::from_ymd(year, self.month(), self.day_of_month(year)?))
    }
}
