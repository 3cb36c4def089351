//! Jurisdiction-neutral holiday templates.
//!
//! Templates are `static` values meant to be cloned and localized with
//! [`Holiday::clone_with`]:
//!
//! ```
//! use holiday_rules::{templates, Overrides};
//!
//! let loppiainen = templates::EPIPHANY.clone_with(Overrides::new().name("Loppiainen"));
//! assert_eq!(templates::EPIPHANY.name, "Epiphany");
//! assert_eq!(loppiainen.name, "Loppiainen");
//! ```
//!
//! The list is compiled from `templates.csv`.

use crate::{Computus, Equinox, Holiday, ObservanceType, Rule};

macro_rules! declare_templates {
    ($($ident:ident: $code:literal $name:literal $kind:ident ($rule:expr)),* $(,)?) => {
        $(
            #[doc = $name]
            pub static $ident: Holiday = Holiday::new($name, ObservanceType::$kind, $rule);
        )*

        /// Codes of all templates in declaration order.
        pub const CODES: &[&str] = &[$($code),*];

        static ALL: &[&Holiday] = &[$(&$ident),*];
    };
}

include!(concat!(env!("OUT_DIR"), "/templates.rs"));

/// Looks up a template by its code, such as `"good-friday"`.
#[inline]
pub fn get(code: &str) -> Option<&'static Holiday> {
    CODE_TO_TEMPLATE.get(code).copied()
}

/// All templates in declaration order.
pub fn iter() -> impl Iterator<Item = &'static Holiday> {
    ALL.iter().copied()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Date;

    #[test]
    fn lookup_by_code() {
        let good_friday = get("good-friday").unwrap();
        assert!(std::ptr::eq(good_friday, &GOOD_FRIDAY));
        assert_eq!(good_friday.name, "Good Friday");
        assert!(get("no-such-holiday").is_none());
    }

    #[test]
    fn every_code_resolves() {
        assert_eq!(CODES.len(), iter().count());
        for (code, template) in CODES.iter().zip(iter()) {
            assert!(std::ptr::eq(get(code).unwrap(), template), "{code}");
        }
    }

    #[test]
    fn templates_are_valid() {
        for template in iter() {
            template.validate().unwrap();
            assert_eq!(template.start_year, None);
            assert!(template.observed.is_empty());
        }
    }

    #[test]
    fn dates_in_2024() {
        let expected = [
            (&NEW_YEAR, Date::from_ymd(2024, 1, 1)),
            (&EASTER, Date::from_ymd(2024, 3, 31)),
            (&ASCENSION_DAY, Date::from_ymd(2024, 5, 9)),
            (&PENTECOST, Date::from_ymd(2024, 5, 19)),
            (&CORPUS_CHRISTI, Date::from_ymd(2024, 5, 30)),
            (&ORTHODOX_EASTER, Date::from_ymd(2024, 5, 5)),
            (&LUNAR_NEW_YEAR_EVE, Date::from_ymd(2024, 2, 9)),
            (&LUNAR_NEW_YEAR, Date::from_ymd(2024, 2, 10)),
            (&LUNAR_NEW_YEAR_2, Date::from_ymd(2024, 2, 11)),
            (&MID_AUTUMN, Date::from_ymd(2024, 9, 17)),
            (&VERNAL_EQUINOX, Date::from_ymd(2024, 3, 20)),
            (&AUTUMNAL_EQUINOX, Date::from_ymd(2024, 9, 22)),
        ];
        for (template, date) in expected {
            assert_eq!(template.calc(2024).unwrap().unwrap().actual, date, "{}", template.name);
        }
    }
}
