use core::fmt;
use core::fmt::Write as _;
use core::str::FromStr;

use chrono::format::{Item, StrftimeItems};
use chrono::{Datelike, Days, Local, Months, NaiveDate, Weekday};

use crate::{WindowError, WindowResult};

/// The unit a [`CalendarWindow`] is aligned to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalendarUnit {
    Day,
    Week,
    Month,
}

impl FromStr for CalendarUnit {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "day" | "days" => Ok(Self::Day),
            "week" | "weeks" => Ok(Self::Week),
            "month" | "months" => Ok(Self::Month),
            _ => Err(WindowError::InvalidUnit(s.to_owned())),
        }
    }
}

/// Calendar rules used to align windows.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Calendar {
    /// First day of a week-aligned window.
    pub week_start: Weekday,
    /// Earliest date the system supports. Windows containing it are the minimum windows.
    pub min_date: NaiveDate,
}

impl Calendar {
    pub fn new(week_start: Weekday, min_date: NaiveDate) -> Self {
        Self {
            week_start,
            min_date,
        }
    }

    pub fn with_week_start(mut self, week_start: Weekday) -> Self {
        self.week_start = week_start;
        self
    }

    pub fn with_min_date(mut self, min_date: NaiveDate) -> Self {
        self.min_date = min_date;
        self
    }

    /// Aligns `date` down to the first day of the unit containing it.
    ///
    /// `None` when that day lies before `NaiveDate::MIN`.
    fn unit_start(&self, date: NaiveDate, unit: CalendarUnit) -> Option<NaiveDate> {
        match unit {
            CalendarUnit::Day => Some(date),
            CalendarUnit::Week => {
                let from = self.week_start.num_days_from_monday();
                let cur = date.weekday().num_days_from_monday();
                let back = (7 + cur - from) % 7;
                date.checked_sub_days(Days::new(u64::from(back)))
            }
            CalendarUnit::Month => date.with_day(1),
        }
    }
}

impl Default for Calendar {
    fn default() -> Self {
        Self {
            week_start: Weekday::Mon,
            min_date: NaiveDate::from_ymd_opt(2006, 1, 1).unwrap_or(NaiveDate::MIN),
        }
    }
}

/// Shifts an aligned date by `units` whole units (negative shifts go backward).
fn shift(date: NaiveDate, unit: CalendarUnit, units: i64) -> Option<NaiveDate> {
    let magnitude = units.unsigned_abs();
    match unit {
        CalendarUnit::Day | CalendarUnit::Week => {
            let days = if unit == CalendarUnit::Week {
                magnitude.checked_mul(7)?
            } else {
                magnitude
            };
            if units >= 0 {
                date.checked_add_days(Days::new(days))
            } else {
                date.checked_sub_days(Days::new(days))
            }
        }
        CalendarUnit::Month => {
            let months = Months::new(u32::try_from(magnitude).ok()?);
            if units >= 0 {
                date.checked_add_months(months)
            } else {
                date.checked_sub_months(months)
            }
        }
    }
}

/// An aligned, half-open date range `[start, end)` covering `unit_count` units.
///
/// Windows are immutable values: [`CalendarWindow::next`] and [`CalendarWindow::previous`]
/// return new windows, so an older window stays valid to compare against.
///
/// Both ends are always aligned to `unit` boundaries, which is what keeps repeated shifting
/// drift-free: a month window is `[YYYY-MM-01, next month's 01)` no matter how many times it
/// was shifted, so January followed by `next()` ends on the last day of February.
///
/// With `feature = "serde"`, windows serialize as `{end_date, unit, unit_count, calendar}` and
/// are rebuilt through [`CalendarWindow::new`] on deserialization, so a payload can never
/// produce an unaligned or inverted window.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(try_from = "WindowRepr", into = "WindowRepr")
)]
pub struct CalendarWindow {
    start: NaiveDate,
    end: NaiveDate,
    unit: CalendarUnit,
    unit_count: u32,
    calendar: Calendar,
}

impl CalendarWindow {
    /// Builds the window of `unit_count` units whose last unit contains `end_date`.
    ///
    /// `end_date` is aligned up to the end of its unit, then `unit_count` units are subtracted
    /// to find `start`. For example `(2024-03-15, Month, 1)` yields `[2024-03-01, 2024-04-01)`
    /// and `(2024-03-15, Day, 7)` yields `[2024-03-09, 2024-03-16)`.
    pub fn new(
        end_date: NaiveDate,
        unit: CalendarUnit,
        unit_count: u32,
        calendar: Calendar,
    ) -> WindowResult<Self> {
        if unit_count < 1 {
            return Err(WindowError::InvalidUnitCount(unit_count));
        }
        let end = calendar
            .unit_start(end_date, unit)
            .and_then(|aligned| shift(aligned, unit, 1))
            .ok_or(WindowError::OutOfRange)?;
        let start = shift(end, unit, -i64::from(unit_count)).ok_or(WindowError::OutOfRange)?;
        debug_assert!(start < end);
        Ok(Self {
            start,
            end,
            unit,
            unit_count,
            calendar,
        })
    }

    /// Same as [`CalendarWindow::new`], with the unit given by name (`"day"`, `"week"`,
    /// `"month"`).
    pub fn parse_unit(
        end_date: NaiveDate,
        unit: &str,
        unit_count: u32,
        calendar: Calendar,
    ) -> WindowResult<Self> {
        Self::new(end_date, unit.parse()?, unit_count, calendar)
    }

    /// First day of the window (inclusive).
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// First day after the window (exclusive).
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    /// Last day of the window (inclusive).
    pub fn last_day(&self) -> NaiveDate {
        self.end.pred_opt().unwrap_or(self.start)
    }

    pub fn unit(&self) -> CalendarUnit {
        self.unit
    }

    pub fn unit_count(&self) -> u32 {
        self.unit_count
    }

    pub fn calendar(&self) -> &Calendar {
        &self.calendar
    }

    pub fn len_days(&self) -> i64 {
        (self.end - self.start).num_days()
    }

    fn shifted(&self, units: i64) -> WindowResult<Self> {
        let start = shift(self.start, self.unit, units).ok_or(WindowError::OutOfRange)?;
        let end = shift(self.end, self.unit, units).ok_or(WindowError::OutOfRange)?;
        Ok(Self {
            start,
            end,
            ..*self
        })
    }

    /// The adjacent window after this one.
    pub fn next(&self) -> WindowResult<Self> {
        self.shifted(i64::from(self.unit_count))
    }

    /// The adjacent window before this one.
    ///
    /// Fails with [`WindowError::BeforeMinimum`] when this window is already the minimum one,
    /// since the previous window would contain no supported day.
    pub fn previous(&self) -> WindowResult<Self> {
        if self.is_minimum() {
            return Err(WindowError::BeforeMinimum {
                min: self.calendar.min_date,
            });
        }
        self.shifted(-i64::from(self.unit_count))
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start <= date && date < self.end
    }

    /// Whether today (local time) falls within the window.
    pub fn is_current_period(&self) -> bool {
        self.contains(Local::now().date_naive())
    }

    /// Whether this window contains (or starts before) the calendar's minimum date.
    pub fn is_minimum(&self) -> bool {
        self.start <= self.calendar.min_date
    }

    /// Describes the window using a strftime-style `format` for each date.
    ///
    /// Single-unit windows render their start date only; longer windows render
    /// `"{start} - {last_day}"`.
    pub fn describe(&self, format: &str) -> WindowResult<String> {
        let items: Vec<Item<'_>> = StrftimeItems::new(format).collect();
        if items.iter().any(|item| matches!(item, Item::Error)) {
            return Err(WindowError::InvalidFormat(format.to_owned()));
        }

        let mut out = String::new();
        let render = |date: NaiveDate, out: &mut String| {
            write!(out, "{}", date.format_with_items(items.iter()))
                .map_err(|_| WindowError::InvalidFormat(format.to_owned()))
        };
        render(self.start, &mut out)?;
        if self.unit_count > 1 {
            out.push_str(" - ");
            render(self.last_day(), &mut out)?;
        }
        Ok(out)
    }

    /// Like [`CalendarWindow::describe`], with an injected date formatter.
    pub fn describe_with(&self, mut format_date: impl FnMut(NaiveDate) -> String) -> String {
        if self.unit_count == 1 {
            return format_date(self.start);
        }
        let start = format_date(self.start);
        let last = format_date(self.last_day());
        format!("{start} - {last}")
    }
}

/// Wire form of a [`CalendarWindow`]: the arguments of [`CalendarWindow::new`].
#[cfg(feature = "serde")]
#[derive(serde::Serialize, serde::Deserialize)]
struct WindowRepr {
    /// Last day of the window (inclusive).
    end_date: NaiveDate,
    unit: CalendarUnit,
    unit_count: u32,
    calendar: Calendar,
}

#[cfg(feature = "serde")]
impl TryFrom<WindowRepr> for CalendarWindow {
    type Error = WindowError;

    fn try_from(repr: WindowRepr) -> WindowResult<Self> {
        Self::new(repr.end_date, repr.unit, repr.unit_count, repr.calendar)
    }
}

#[cfg(feature = "serde")]
impl From<CalendarWindow> for WindowRepr {
    fn from(window: CalendarWindow) -> Self {
        Self {
            end_date: window.last_day(),
            unit: window.unit,
            unit_count: window.unit_count,
            calendar: window.calendar,
        }
    }
}

impl fmt::Display for CalendarWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}
