use std::borrow::Cow;

use tracing::{debug, trace};

use crate::observed::{self, AltDay};
use crate::{Date, Error, Result, Rule};

/// Classification of a holiday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ObservanceType {
    /// Statutory day off.
    #[default]
    Public,
    /// Banks and some businesses close.
    Bank,
    Religious,
    Other,
}

/// The dates a holiday falls on in one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Occurrence {
    /// Date produced by the rule.
    pub actual: Date,
    /// Date the holiday is observed on after weekday substitution.
    pub observed: Date,
}

impl Occurrence {
    #[inline]
    pub fn is_substituted(&self) -> bool {
        self.actual != self.observed
    }
}

/// A named holiday rule.
///
/// Text and list fields borrow `'static` data until they are modified, so
/// templates can be `static` items and clones of them stay cheap. Modifying a
/// clone copies the data first and never touches the value it was cloned from.
#[derive(Debug, Clone)]
pub struct Holiday {
    pub name: Cow<'static, str>,
    pub description: Cow<'static, str>,
    pub kind: ObservanceType,
    /// First year the holiday is held, inclusive.
    pub start_year: Option<i32>,
    /// Last year the holiday is held, inclusive.
    pub end_year: Option<i32>,
    /// Years inside the validity window in which the holiday is not held.
    pub except_years: Cow<'static, [i32]>,
    /// Weekday substitutions; the first one matching the actual date applies.
    pub observed: Cow<'static, [AltDay]>,
    pub rule: Rule,
}

impl Holiday {
    /// A holiday held every year on its actual date.
    pub const fn new(name: &'static str, kind: ObservanceType, rule: Rule) -> Self {
        Holiday {
            name: Cow::Borrowed(name),
            description: Cow::Borrowed(""),
            kind,
            start_year: None,
            end_year: None,
            except_years: Cow::Borrowed(&[]),
            observed: Cow::Borrowed(&[]),
            rule,
        }
    }

    pub fn builder(name: impl Into<Cow<'static, str>>, rule: Rule) -> HolidayBuilder {
        let mut holiday = Holiday::new("", ObservanceType::Public, rule);
        holiday.name = name.into();
        HolidayBuilder { holiday }
    }

    /// Whether the holiday is held in `year` at all.
    pub fn is_active(&self, year: i32) -> bool {
        if self.start_year.is_some_and(|start| year < start) {
            return false;
        }
        if self.end_year.is_some_and(|end| year > end) {
            return false;
        }
        !self.except_years.contains(&year)
    }

    /// Computes the actual and observed dates of the holiday in `year`.
    ///
    /// Returns `Ok(None)` when the holiday is not held that year, either
    /// because the year is outside its validity window or because the rule
    /// yields no date (29 February in a common year, for example).
    pub fn calc(&self, year: i32) -> Result<Option<Occurrence>> {
        if !self.is_active(year) {
            debug!(holiday = %self.name, year, "outside validity window");
            return Ok(None);
        }

        let Some(actual) = self.rule.evaluate(year)? else {
            debug!(holiday = %self.name, year, "rule yields no date");
            return Ok(None);
        };
        let observed = observed::observe(actual, &self.observed);

        trace!(holiday = %self.name, year, %actual, %observed, "evaluated");
        Ok(Some(Occurrence { actual, observed }))
    }

    /// Checks the configuration without evaluating the rule.
    pub fn validate(&self) -> Result<()> {
        self.rule.validate()?;
        if let (Some(start), Some(end)) = (self.start_year, self.end_year) {
            if start > end {
                return Err(Error::InvalidRule(format!(
                    "{}: start year {start} is after end year {end}",
                    self.name
                )));
            }
        }
        observed::check_distinct(&self.observed)
    }

    /// A copy of this holiday with the fields set in `overrides` replaced.
    pub fn clone_with(&self, overrides: Overrides) -> Holiday {
        let Overrides {
            name,
            description,
            kind,
            start_year,
            end_year,
            except_years,
            observed,
            rule,
        } = overrides;

        Holiday {
            name: name.unwrap_or_else(|| self.name.clone()),
            description: description.unwrap_or_else(|| self.description.clone()),
            kind: kind.unwrap_or(self.kind),
            start_year: start_year.unwrap_or(self.start_year),
            end_year: end_year.unwrap_or(self.end_year),
            except_years: except_years.unwrap_or_else(|| self.except_years.clone()),
            observed: observed.unwrap_or_else(|| self.observed.clone()),
            rule: rule.unwrap_or(self.rule),
        }
    }
}

/// Fields to replace when deriving a holiday with [`Holiday::clone_with`].
///
/// Unset fields keep the value of the base holiday.
#[derive(Debug, Clone, Default)]
pub struct Overrides {
    name: Option<Cow<'static, str>>,
    description: Option<Cow<'static, str>>,
    kind: Option<ObservanceType>,
    start_year: Option<Option<i32>>,
    end_year: Option<Option<i32>>,
    except_years: Option<Cow<'static, [i32]>>,
    observed: Option<Cow<'static, [AltDay]>>,
    rule: Option<Rule>,
}

impl Overrides {
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<Cow<'static, str>>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn kind(mut self, kind: ObservanceType) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Pass `None` to remove the lower bound of the base holiday.
    pub fn start_year(mut self, year: impl Into<Option<i32>>) -> Self {
        self.start_year = Some(year.into());
        self
    }

    /// Pass `None` to remove the upper bound of the base holiday.
    pub fn end_year(mut self, year: impl Into<Option<i32>>) -> Self {
        self.end_year = Some(year.into());
        self
    }

    pub fn except_years(mut self, years: impl Into<Cow<'static, [i32]>>) -> Self {
        self.except_years = Some(years.into());
        self
    }

    pub fn observed(mut self, substitutions: impl Into<Cow<'static, [AltDay]>>) -> Self {
        self.observed = Some(substitutions.into());
        self
    }

    pub fn rule(mut self, rule: Rule) -> Self {
        self.rule = Some(rule);
        self
    }
}

/// Runtime construction of a [`Holiday`], validated on [`build`](Self::build).
#[derive(Debug, Clone)]
pub struct HolidayBuilder {
    holiday: Holiday,
}

impl HolidayBuilder {
    pub fn description(mut self, description: impl Into<Cow<'static, str>>) -> Self {
        self.holiday.description = description.into();
        self
    }

    pub fn kind(mut self, kind: ObservanceType) -> Self {
        self.holiday.kind = kind;
        self
    }

    pub fn start_year(mut self, year: i32) -> Self {
        self.holiday.start_year = Some(year);
        self
    }

    pub fn end_year(mut self, year: i32) -> Self {
        self.holiday.end_year = Some(year);
        self
    }

    pub fn except_years(mut self, years: impl Into<Cow<'static, [i32]>>) -> Self {
        self.holiday.except_years = years.into();
        self
    }

    pub fn observed(mut self, substitutions: impl Into<Cow<'static, [AltDay]>>) -> Self {
        self.holiday.observed = substitutions.into();
        self
    }

    pub fn build(self) -> Result<Holiday> {
        self.holiday.validate()?;
        Ok(self.holiday)
    }
}
