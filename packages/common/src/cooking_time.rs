use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const SECS_PER_MINUTE: i64 = 60;
const SECS_PER_HOUR: i64 = 60 * SECS_PER_MINUTE;
const SECS_PER_DAY: i64 = 24 * SECS_PER_HOUR;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CookingTimeError {
    #[error("Cooking time is required")]
    Empty,
    #[error("Enter the cooking time as HH:MM or HH:MM:SS")]
    Malformed,
    #[error("Minutes and seconds must be below 60")]
    OutOfRange,
}

/// How long a recipe takes, kept as whole seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CookingTime(i64);

impl CookingTime {
    /// Negative values clamp to zero.
    pub fn from_secs(secs: i64) -> Self {
        Self(secs.max(0))
    }

    pub fn as_secs(&self) -> i64 {
        self.0
    }

    pub fn total_minutes(&self) -> i64 {
        self.0 / SECS_PER_MINUTE
    }
}

impl FromStr for CookingTime {
    type Err = CookingTimeError;

    /// Accepts `H:MM`, `H:MM:SS` and either form prefixed by a day count (`D H:MM:SS`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(CookingTimeError::Empty);
        }

        let (days, clock) = match s.split_once(char::is_whitespace) {
            Some((days, rest)) => (parse_number(days)?, rest.trim()),
            None => (0, s),
        };

        let parts: Vec<&str> = clock.split(':').collect();
        let (hours, minutes, seconds) = match parts.as_slice() {
            [h, m] => (parse_number(h)?, parse_number(m)?, 0),
            [h, m, sec] => (parse_number(h)?, parse_number(m)?, parse_number(sec)?),
            _ => return Err(CookingTimeError::Malformed),
        };

        if minutes >= 60 || seconds >= 60 {
            return Err(CookingTimeError::OutOfRange);
        }

        days.checked_mul(SECS_PER_DAY)
            .and_then(|d| d.checked_add(hours.checked_mul(SECS_PER_HOUR)?))
            .and_then(|t| t.checked_add(minutes * SECS_PER_MINUTE + seconds))
            .map(Self)
            .ok_or(CookingTimeError::OutOfRange)
    }
}

fn parse_number(part: &str) -> Result<i64, CookingTimeError> {
    if part.is_empty() || !part.chars().all(|c| c.is_ascii_digit()) {
        return Err(CookingTimeError::Malformed);
    }
    part.parse().map_err(|_| CookingTimeError::OutOfRange)
}

impl fmt::Display for CookingTime {
    /// `H:MM:SS`, with a `N day(s), ` prefix once the duration reaches a day.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = self.0 / SECS_PER_DAY;
        let rest = self.0 % SECS_PER_DAY;
        let hours = rest / SECS_PER_HOUR;
        let minutes = rest % SECS_PER_HOUR / SECS_PER_MINUTE;
        let seconds = rest % SECS_PER_MINUTE;

        match days {
            0 => {}
            1 => write!(f, "1 day, ")?,
            n => write!(f, "{n} days, ")?,
        }
        write!(f, "{hours}:{minutes:02}:{seconds:02}")
    }
}
