//! Time values and sample time windows.

use mediaref_error::{MediaRefResult, TimeSpecError, TimeSpecErrorKind};
use serde::{Deserialize, Serialize};

/// A point in time or a length of time as it appears in metadata.
///
/// Either a number of seconds or a clock string. Clock strings are read
/// left to right as `H:MM:SS`; with fewer components the last ones are the
/// least significant, so `"1:23"` is one minute and 23 seconds.
///
/// # Examples
///
/// ```
/// use mediaref_core::TimeValue;
///
/// assert_eq!(TimeValue::from("1:23").to_seconds().unwrap(), 83.0);
/// assert_eq!(TimeValue::from("1:02:03").to_seconds().unwrap(), 3723.0);
/// assert_eq!(TimeValue::from(12.5).to_seconds().unwrap(), 12.5);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TimeValue {
    /// Seconds as a number
    Seconds(f64),
    /// `H:MM:SS`, `MM:SS` or a decimal number as text
    Text(String),
}

impl From<f64> for TimeValue {
    fn from(value: f64) -> Self {
        TimeValue::Seconds(value)
    }
}

impl From<u32> for TimeValue {
    fn from(value: u32) -> Self {
        TimeValue::Seconds(value as f64)
    }
}

impl From<&str> for TimeValue {
    fn from(value: &str) -> Self {
        TimeValue::Text(value.to_string())
    }
}

impl From<String> for TimeValue {
    fn from(value: String) -> Self {
        TimeValue::Text(value)
    }
}

impl TimeValue {
    /// Convert to seconds.
    ///
    /// # Errors
    ///
    /// Returns an invalid time value error for non-finite numbers, more than
    /// three clock components, negative or non-numeric components, or a
    /// fractional hour/minute component.
    pub fn to_seconds(&self) -> MediaRefResult<f64> {
        match self {
            TimeValue::Seconds(seconds) if seconds.is_finite() => Ok(*seconds),
            TimeValue::Seconds(seconds) => Err(invalid_value(seconds.to_string())),
            TimeValue::Text(text) => parse_clock(text.trim()),
        }
    }
}

fn invalid_value(text: impl Into<String>) -> mediaref_error::MediaRefError {
    TimeSpecError::new(TimeSpecErrorKind::InvalidTimeValue(text.into())).into()
}

fn parse_clock(text: &str) -> MediaRefResult<f64> {
    let segments: Vec<&str> = text.split(':').collect();
    if segments.len() > 3 {
        return Err(invalid_value(text));
    }

    let last = segments.len() - 1;
    let mut seconds = 0.0;
    for (index, segment) in segments.iter().enumerate() {
        let value: f64 = segment
            .trim()
            .parse()
            .map_err(|_| invalid_value(text))?;
        if !value.is_finite() || value < 0.0 || (index < last && value.fract() != 0.0) {
            return Err(invalid_value(text));
        }
        seconds = seconds * 60.0 + value;
    }
    Ok(seconds)
}

/// Normalised time slice of an asset.
///
/// `duration_sec` is `None` when the window runs to the end of the asset.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimeWindow {
    /// Offset from the beginning of the asset
    pub start_time_sec: f64,
    /// Length of the window, if bounded
    pub duration_sec: Option<f64>,
}

impl Default for TimeWindow {
    fn default() -> Self {
        Self {
            start_time_sec: 0.0,
            duration_sec: None,
        }
    }
}

impl TimeWindow {
    /// Build a window from the optional start, duration and end inputs.
    ///
    /// `duration` and `end` are mutually exclusive. A missing start means 0;
    /// with neither duration nor end the window is open-ended.
    ///
    /// # Errors
    ///
    /// - Conflicting time spec if both `duration` and `end` are given
    /// - Invalid time value if any input cannot be read as seconds
    /// - Invalid time window if the start is negative or the window is empty
    ///
    /// # Examples
    ///
    /// ```
    /// use mediaref_core::{TimeValue, TimeWindow};
    ///
    /// let start = TimeValue::from("0:30");
    /// let end = TimeValue::from("1:00");
    /// let window = TimeWindow::normalize(Some(&start), None, Some(&end)).unwrap();
    /// assert_eq!(window.start_time_sec, 30.0);
    /// assert_eq!(window.duration_sec, Some(30.0));
    /// ```
    pub fn normalize(
        start: Option<&TimeValue>,
        duration: Option<&TimeValue>,
        end: Option<&TimeValue>,
    ) -> MediaRefResult<Self> {
        if let (Some(duration), Some(end)) = (duration, end) {
            return Err(TimeSpecError::new(TimeSpecErrorKind::ConflictingTimeSpec(format!(
                "duration {:?} and endTime {:?}",
                duration, end
            )))
            .into());
        }

        let start_time_sec = match start {
            Some(start) => start.to_seconds()?,
            None => 0.0,
        };
        if start_time_sec < 0.0 {
            return Err(invalid_window(format!(
                "start time {} is negative",
                start_time_sec
            )));
        }

        let duration_sec = match (duration, end) {
            (Some(duration), None) => Some(duration.to_seconds()?),
            (None, Some(end)) => Some(end.to_seconds()? - start_time_sec),
            _ => None,
        };
        if let Some(duration_sec) = duration_sec
            && duration_sec <= 0.0
        {
            return Err(invalid_window(format!(
                "window starting at {}s has non-positive duration {}s",
                start_time_sec, duration_sec
            )));
        }

        Ok(Self {
            start_time_sec,
            duration_sec,
        })
    }

    /// End of the window, if bounded.
    pub fn end_time_sec(&self) -> Option<f64> {
        self.duration_sec.map(|d| self.start_time_sec + d)
    }
}

fn invalid_window(message: String) -> mediaref_error::MediaRefError {
    TimeSpecError::new(TimeSpecErrorKind::InvalidTimeWindow(message)).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clock_strings() {
        assert_eq!(TimeValue::from("45").to_seconds().unwrap(), 45.0);
        assert_eq!(TimeValue::from("0:45").to_seconds().unwrap(), 45.0);
        assert_eq!(TimeValue::from("2:00:00").to_seconds().unwrap(), 7200.0);
        assert_eq!(TimeValue::from("1:23.5").to_seconds().unwrap(), 83.5);
    }

    #[test]
    fn test_rejects_garbage_clock_strings() {
        assert!(TimeValue::from("1:2:3:4").to_seconds().is_err());
        assert!(TimeValue::from("a:30").to_seconds().is_err());
        assert!(TimeValue::from("1.5:00").to_seconds().is_err());
        assert!(TimeValue::from("-1:00").to_seconds().is_err());
        assert!(TimeValue::from("").to_seconds().is_err());
        assert!(TimeValue::Seconds(f64::NAN).to_seconds().is_err());
    }

    #[test]
    fn test_defaults_to_open_window() {
        let window = TimeWindow::normalize(None, None, None).unwrap();
        assert_eq!(window, TimeWindow::default());
        assert_eq!(window.end_time_sec(), None);
    }

    #[test]
    fn test_duration_and_end_conflict() {
        let d = TimeValue::from(10.0);
        let e = TimeValue::from(20.0);
        let err = TimeWindow::normalize(None, Some(&d), Some(&e)).unwrap_err();
        assert!(err.is_conflicting_time_spec());
    }

    #[test]
    fn test_end_before_start_is_rejected() {
        let s = TimeValue::from(30.0);
        let e = TimeValue::from("0:20");
        let err = TimeWindow::normalize(Some(&s), None, Some(&e)).unwrap_err();
        assert!(!err.is_conflicting_time_spec());
        assert!(format!("{}", err).contains("non-positive"));

        let s = TimeValue::from(-1.0);
        assert!(TimeWindow::normalize(Some(&s), None, None).is_err());
    }

    #[test]
    fn test_duration_window() {
        let s = TimeValue::from(5.0);
        let d = TimeValue::from("0:10");
        let window = TimeWindow::normalize(Some(&s), Some(&d), None).unwrap();
        assert_eq!(window.duration_sec, Some(10.0));
        assert_eq!(window.end_time_sec(), Some(15.0));
    }
}
