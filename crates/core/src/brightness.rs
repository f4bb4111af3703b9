//! Brightness values and the absolute/percentage conversion.
//!
//! Both directions truncate toward zero, so absolute values do not survive a
//! round trip through percentages: `895 → 0% → 400`. Existing users depend
//! on these exact numbers; keep the truncation.

use crate::error::{Error, Result};
use crate::{BRIGHTNESS_MAX, BRIGHTNESS_MIN, BRIGHTNESS_RANGE};
use std::fmt;
use std::str::FromStr;

/// Absolute brightness in device units, always within
/// [`BRIGHTNESS_MIN`]..=[`BRIGHTNESS_MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Brightness(u32);

impl Brightness {
    pub const MIN: Self = Self(BRIGHTNESS_MIN);
    pub const MAX: Self = Self(BRIGHTNESS_MAX);

    pub fn new(value: u32) -> Result<Self> {
        if !(BRIGHTNESS_MIN..=BRIGHTNESS_MAX).contains(&value) {
            return Err(Error::OutOfRange {
                field: "brightness",
                value,
                min: BRIGHTNESS_MIN,
                max: BRIGHTNESS_MAX,
            });
        }
        Ok(Self(value))
    }

    pub fn get(self) -> u32 {
        self.0
    }
}

impl fmt::Display for Brightness {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Brightness as an integer percentage, always within 0..=100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Percentage(u8);

impl Percentage {
    pub fn new(value: u32) -> Result<Self> {
        if value > 100 {
            return Err(Error::OutOfRange {
                field: "percentage",
                value,
                min: 0,
                max: 100,
            });
        }
        Ok(Self(value as u8))
    }

    pub fn get(self) -> u8 {
        self.0
    }
}

impl fmt::Display for Percentage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.0)
    }
}

/// `floor((absolute - MIN) / RANGE * 100)`.
///
/// # Panics
/// If `absolute` is outside [`BRIGHTNESS_MIN`]..=[`BRIGHTNESS_MAX`].
pub fn percentage_from_absolute(absolute: u32) -> u8 {
    assert!(
        (BRIGHTNESS_MIN..=BRIGHTNESS_MAX).contains(&absolute),
        "absolute brightness {absolute} out of range"
    );
    let percentage = (absolute - BRIGHTNESS_MIN) * 100 / BRIGHTNESS_RANGE;
    assert!(percentage <= 100);
    percentage as u8
}

/// `floor(percentage * RANGE / 100) + MIN`.
///
/// # Panics
/// If `percentage` is greater than 100.
pub fn absolute_from_percentage(percentage: u32) -> u32 {
    assert!(percentage <= 100, "percentage {percentage} out of range");
    let absolute = percentage * BRIGHTNESS_RANGE / 100 + BRIGHTNESS_MIN;
    assert!((BRIGHTNESS_MIN..=BRIGHTNESS_MAX).contains(&absolute));
    absolute
}

pub fn to_percentage(brightness: Brightness) -> Percentage {
    Percentage(percentage_from_absolute(brightness.0))
}

pub fn to_absolute(percentage: Percentage) -> Brightness {
    Brightness(absolute_from_percentage(u32::from(percentage.0)))
}

/// A requested brightness, either `<int>` or `<int>%`, not yet range-checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BrightnessValue {
    Absolute(u32),
    Percentage(u32),
}

impl BrightnessValue {
    /// Range-check against the domain of the value's kind and resolve it to
    /// an absolute brightness.
    pub fn resolve(self) -> Result<Brightness> {
        match self {
            Self::Absolute(v) => Brightness::new(v),
            Self::Percentage(p) => Percentage::new(p).map(to_absolute),
        }
    }
}

impl FromStr for BrightnessValue {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let (digits, percent) = match s.strip_suffix('%') {
            Some(d) => (d, true),
            None => (s, false),
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return Err(Error::InvalidValue(s.to_string()));
        }
        let value: u32 = digits
            .parse()
            .map_err(|_| Error::InvalidValue(s.to_string()))?;
        Ok(if percent {
            Self::Percentage(value)
        } else {
            Self::Absolute(value)
        })
    }
}

impl fmt::Display for BrightnessValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Absolute(v) => write!(f, "{v}"),
            Self::Percentage(p) => write!(f, "{p}%"),
        }
    }
}
