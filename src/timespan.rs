use std::error::Error;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Wall clock position inside a video in MM:SS form.
///
/// Both fields are the two digit values the indexing step emits, so positions up
/// to 99:99 are representable. Ordering matches the textual MM:SS ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp {
    minutes: u8,
    seconds: u8,
}

impl Timestamp {
    #[must_use]
    pub const fn new(minutes: u8, seconds: u8) -> Self {
        Self { minutes, seconds }
    }

    #[must_use]
    pub const fn minutes(self) -> u8 {
        self.minutes
    }

    #[must_use]
    pub const fn seconds(self) -> u8 {
        self.seconds
    }

    /// Seconds since the start of the video.
    #[must_use]
    pub fn total_seconds(self) -> u32 {
        u32::from(self.minutes) * 60 + u32::from(self.seconds)
    }
}

impl FromStr for Timestamp {
    type Err = TimeSpanError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let invalid = || TimeSpanError::InvalidFormat(input.to_owned());
        if input.len() != 5 || !input.bytes().all(|byte| byte == b':' || byte.is_ascii_digit()) {
            return Err(invalid());
        }
        let (minutes, seconds) = input.split_once(':').ok_or_else(invalid)?;
        if minutes.len() != 2 || seconds.len() != 2 {
            return Err(invalid());
        }
        Ok(Self::new(
            minutes.parse().map_err(|_| invalid())?,
            seconds.parse().map_err(|_| invalid())?,
        ))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.minutes, self.seconds)
    }
}

/// Time range covered by one index entry.
///
/// The start is strictly before the end. Reversed or empty ranges are rejected
/// both by [`new`](Self::new) and when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawTimeSpan", into = "RawTimeSpan")]
pub struct TimeSpan {
    start: Timestamp,
    end: Timestamp,
}

impl TimeSpan {
    /// Placeholder span for index entries without any segments below them.
    pub const EMPTY: Self = Self {
        start: Timestamp::new(0, 0),
        end: Timestamp::new(0, 1),
    };

    /// Create a new `TimeSpan`.
    ///
    /// # Errors
    ///
    /// Errors when `start` is not strictly before `end`.
    pub fn new(start: Timestamp, end: Timestamp) -> Result<Self, TimeSpanError> {
        if start < end {
            Ok(Self { start, end })
        } else {
            Err(TimeSpanError::OutOfOrder { start, end })
        }
    }

    #[must_use]
    pub const fn start(self) -> Timestamp {
        self.start
    }

    #[must_use]
    pub const fn end(self) -> Timestamp {
        self.end
    }

    /// Smallest span containing every given span.
    ///
    /// Returns `None` when there are no spans. Parent entries of a video index
    /// cover whatever their children cover, so their span is the hull over the
    /// child spans.
    pub fn enclosing(spans: impl IntoIterator<Item = Self>) -> Option<Self> {
        spans.into_iter().reduce(|hull, span| Self {
            start: hull.start.min(span.start),
            end: hull.end.max(span.end),
        })
    }
}

impl fmt::Display for TimeSpan {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} - {}", self.start, self.end)
    }
}

/// Wire form of a [`TimeSpan`] as the indexing step emits it.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct RawTimeSpan {
    start_time: String,
    end_time: String,
}

impl TryFrom<RawTimeSpan> for TimeSpan {
    type Error = TimeSpanError;

    fn try_from(raw: RawTimeSpan) -> Result<Self, Self::Error> {
        Self::new(raw.start_time.parse()?, raw.end_time.parse()?)
    }
}

impl From<TimeSpan> for RawTimeSpan {
    fn from(span: TimeSpan) -> Self {
        Self {
            start_time: span.start.to_string(),
            end_time: span.end.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TimeSpanError {
    /// The input is not in MM:SS form.
    InvalidFormat(String),
    /// The start of a span is not strictly before its end.
    OutOfOrder { start: Timestamp, end: Timestamp },
}

impl Error for TimeSpanError {}

impl fmt::Display for TimeSpanError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::InvalidFormat(input) => {
                write!(f, "invalid timestamp {input:?}, expected MM:SS")
            }
            Self::OutOfOrder { start, end } => {
                write!(f, "span start {start} must be before its end {end}")
            }
        }
    }
}

#[cfg(test)]
#[track_caller]
fn span(start: &str, end: &str) -> TimeSpan {
    TimeSpan::new(start.parse().unwrap(), end.parse().unwrap()).unwrap()
}

#[test]
fn parses_a_valid_timestamp() {
    let timestamp = "07:30".parse::<Timestamp>().unwrap();
    assert_eq!(timestamp, Timestamp::new(7, 30));
}

#[test]
fn display_is_zero_padded() {
    assert_eq!(Timestamp::new(3, 5).to_string(), "03:05");
}

#[test]
fn rejects_single_digit_fields() {
    assert!("7:30".parse::<Timestamp>().is_err());
    assert!("07:3".parse::<Timestamp>().is_err());
}

#[test]
fn rejects_non_digits() {
    assert!("ab:cd".parse::<Timestamp>().is_err());
    assert!("+1:23".parse::<Timestamp>().is_err());
    assert!("0130".parse::<Timestamp>().is_err());
}

#[test]
fn ordering_matches_textual_ordering() {
    let earlier = "09:59".parse::<Timestamp>().unwrap();
    let later = "10:00".parse::<Timestamp>().unwrap();
    assert!(earlier < later);
}

#[test]
fn rejects_reversed_span() {
    let start = Timestamp::new(2, 0);
    let end = Timestamp::new(1, 0);
    assert_eq!(
        TimeSpan::new(start, end),
        Err(TimeSpanError::OutOfOrder { start, end })
    );
}

#[test]
fn rejects_zero_length_span() {
    let point = Timestamp::new(1, 30);
    assert!(TimeSpan::new(point, point).is_err());
}

#[test]
fn enclosing_covers_all_spans() {
    let hull = TimeSpan::enclosing([
        span("01:00", "02:00"),
        span("00:30", "01:10"),
        span("03:00", "04:30"),
    ])
    .unwrap();
    assert_eq!(hull, span("00:30", "04:30"));
}

#[test]
fn enclosing_of_nothing_is_none() {
    assert_eq!(TimeSpan::enclosing([]), None);
}

#[test]
fn span_display_is_the_time_badge() {
    assert_eq!(span("00:45", "01:30").to_string(), "00:45 - 01:30");
}
