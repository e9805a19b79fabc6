//! Calendar capability and day/month arithmetic.
//!
//! Every other module goes through these helpers instead of doing raw
//! date arithmetic, so day boundaries are always computed in the same
//! timezone.

use std::cmp::Ordering;

use chrono::{
    DateTime, Datelike, Duration, LocalResult, Months, NaiveDate, NaiveDateTime, NaiveTime,
    TimeZone, Utc, Weekday,
};
use chrono_tz::Tz;

use crate::error::{PickerError, PickerResult};

/// Instants handled by the picker.
pub type Date = DateTime<Utc>;

/// Calendar capability consumed by the selection engine.
pub trait Calendar {
    fn timezone(&self) -> Tz;

    fn first_weekday(&self) -> Weekday;

    fn last_weekday(&self) -> Weekday {
        self.first_weekday().pred()
    }

    /// The current day in this calendar's timezone.
    fn today(&self) -> NaiveDate;

    fn is_today(&self, date: Date) -> bool {
        local_date(self, date) == self.today()
    }
}

/// Timezone-aware calendar with a configurable week start.
#[derive(Debug, Clone)]
pub struct ZonedCalendar {
    tz: Tz,
    first_weekday: Weekday,
    pinned_today: Option<NaiveDate>,
}

impl ZonedCalendar {
    pub fn new(tz: Tz, first_weekday: Weekday) -> Self {
        ZonedCalendar {
            tz,
            first_weekday,
            pinned_today: None,
        }
    }

    /// UTC calendar with weeks starting on Sunday.
    pub fn utc() -> Self {
        Self::new(Tz::UTC, Weekday::Sun)
    }

    /// Build a calendar from an IANA zone name and a 1-based weekday ordinal.
    pub fn from_names(timezone: &str, first_weekday: u8) -> PickerResult<Self> {
        let tz: Tz = timezone
            .parse()
            .map_err(|_| PickerError::UnknownTimezone(timezone.to_string()))?;
        Ok(Self::new(tz, weekday_from_ordinal(first_weekday)?))
    }

    /// Freeze "today" instead of reading the system clock.
    pub fn with_today(mut self, today: NaiveDate) -> Self {
        self.pinned_today = Some(today);
        self
    }
}

impl Calendar for ZonedCalendar {
    fn timezone(&self) -> Tz {
        self.tz
    }

    fn first_weekday(&self) -> Weekday {
        self.first_weekday
    }

    fn today(&self) -> NaiveDate {
        self.pinned_today
            .unwrap_or_else(|| Utc::now().with_timezone(&self.tz).date_naive())
    }
}

/// Map a 1-based ordinal (1 = Sunday) to a weekday.
pub fn weekday_from_ordinal(ordinal: u8) -> PickerResult<Weekday> {
    match ordinal {
        1..=7 => Ok((1..ordinal).fold(Weekday::Sun, |day, _| day.succ())),
        _ => Err(PickerError::InvalidWeekday(ordinal)),
    }
}

/// 1-based ordinal of a weekday (1 = Sunday).
pub fn weekday_ordinal(weekday: Weekday) -> u8 {
    weekday.number_from_sunday() as u8
}

/// Day of `date` in the calendar's timezone.
pub fn local_date<C: Calendar + ?Sized>(calendar: &C, date: Date) -> NaiveDate {
    date.with_timezone(&calendar.timezone()).date_naive()
}

pub fn weekday<C: Calendar + ?Sized>(calendar: &C, date: Date) -> Weekday {
    local_date(calendar, date).weekday()
}

/// First instant of the calendar day containing `date`.
pub fn start_of_day<C: Calendar + ?Sized>(calendar: &C, date: Date) -> Date {
    day_start(calendar, local_date(calendar, date))
}

/// Last second (23:59:59) of the calendar day containing `date`.
pub fn end_of_day<C: Calendar + ?Sized>(calendar: &C, date: Date) -> Date {
    day_end(calendar, local_date(calendar, date))
}

pub fn start_of_month<C: Calendar + ?Sized>(calendar: &C, date: Date) -> Date {
    day_start(calendar, first_of_month(local_date(calendar, date)))
}

pub fn end_of_month<C: Calendar + ?Sized>(calendar: &C, date: Date) -> Date {
    day_end(calendar, last_of_month(local_date(calendar, date)))
}

pub fn is_same_day<C: Calendar + ?Sized>(calendar: &C, a: Date, b: Date) -> bool {
    local_date(calendar, a) == local_date(calendar, b)
}

/// Total order by instant.
pub fn compare(a: Date, b: Date) -> Ordering {
    a.cmp(&b)
}

/// Shift by whole calendar days, keeping the local time of day.
/// Returns `None` when the result falls outside the representable range.
pub fn add_days<C: Calendar + ?Sized>(calendar: &C, date: Date, days: i64) -> Option<Date> {
    let tz = calendar.timezone();
    let local = date.with_timezone(&tz).naive_local();
    let shifted = local.checked_add_signed(Duration::try_days(days)?)?;
    Some(localize_earliest(tz, shifted))
}

/// Shift by whole months, clamping the day to the target month's length.
/// A shift past the representable range leaves `date` unchanged.
pub fn add_months<C: Calendar + ?Sized>(calendar: &C, date: Date, months: i32) -> Date {
    let tz = calendar.timezone();
    let local = date.with_timezone(&tz).naive_local();
    let shifted = if months >= 0 {
        local.checked_add_months(Months::new(months.unsigned_abs()))
    } else {
        local.checked_sub_months(Months::new(months.unsigned_abs()))
    };
    localize_earliest(tz, shifted.unwrap_or(local))
}

/// Start of `day` in the calendar's timezone.
pub fn day_start<C: Calendar + ?Sized>(calendar: &C, day: NaiveDate) -> Date {
    localize_earliest(calendar.timezone(), day.and_time(NaiveTime::MIN))
}

/// End (23:59:59) of `day` in the calendar's timezone.
pub fn day_end<C: Calendar + ?Sized>(calendar: &C, day: NaiveDate) -> Date {
    let last_second = NaiveTime::from_hms_opt(23, 59, 59).unwrap_or(NaiveTime::MIN);
    localize_latest(calendar.timezone(), day.and_time(last_second))
}

pub fn first_of_month(day: NaiveDate) -> NaiveDate {
    day.with_day(1).unwrap_or(day)
}

pub fn last_of_month(day: NaiveDate) -> NaiveDate {
    first_of_month(day)
        .checked_add_months(Months::new(1))
        .and_then(|next| next.pred_opt())
        .unwrap_or(day)
}

fn localize_earliest(tz: Tz, local: NaiveDateTime) -> Date {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        // DST gap: move forward to the first valid instant.
        LocalResult::None => skip_gap(tz, local),
    }
}

fn localize_latest(tz: Tz, local: NaiveDateTime) -> Date {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(_, latest) => latest.with_timezone(&Utc),
        LocalResult::None => skip_gap(tz, local),
    }
}

fn skip_gap(tz: Tz, local: NaiveDateTime) -> Date {
    let mut probe = local;
    for _ in 0..(4 * 60) {
        probe = match probe.checked_add_signed(Duration::minutes(1)) {
            Some(next) => next,
            None => break,
        };
        if let Some(dt) = tz.from_local_datetime(&probe).earliest() {
            return dt.with_timezone(&Utc);
        }
    }
    // No real zone has a gap this long; read the wall time as UTC.
    local.and_utc()
}
