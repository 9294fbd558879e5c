//! Timestamp normalization.
//!
//! Callers may pass whole epoch seconds (integer) or fractional epoch seconds
//! (float). Fractional input is NOT converted arithmetically: the digits after
//! the decimal point of the float's shortest rendering are copied verbatim
//! into the seconds-fraction position. Which rendering supplies the digits,
//! and how they are copied, depends on [`FractionStyle`].

use chrono::{DateTime, FixedOffset, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

const DATE_TIME: &str = "%Y-%m-%dT%H:%M:%S";
const OFFSET: &str = "%:z";
/// Significant digits the legacy collector kept when stringifying floats.
const LEGACY_PRECISION: usize = 14;

/// Rendering of literal fractional digits taken from a float timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FractionStyle {
    /// `1700000000.123456` → `2023-11-14T22:13:20.123456+00:00`. Digits
    /// come from the shortest round-trip rendering, leading zeros included.
    #[default]
    Literal,
    /// `1700000000.123456` → `2023-11-14T22:13:201235+00:00`. Byte-compatible
    /// with the legacy collector: the float is rendered with 14 significant
    /// digits (trailing zeros dropped), the fraction is read as an integer
    /// (leading zeros lost) and glued to the seconds with no separator. Not
    /// valid ISO-8601; only enable when wire compatibility requires it.
    Legacy,
}

/// Caller timestamp input after classification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    Now,
    Seconds(i64),
    Fractional { seconds: i64, digits: String },
    /// Unsupported type or unrepresentable number. Rendered as now.
    Invalid,
}

impl Timestamp {
    pub fn classify(value: Option<&Value>, style: FractionStyle) -> Self {
        match value {
            None | Some(Value::Null) => Timestamp::Now,
            Some(Value::Number(n)) => {
                if let Some(seconds) = n.as_i64() {
                    Timestamp::Seconds(seconds)
                } else if n.is_u64() {
                    Timestamp::Invalid
                } else {
                    n.as_f64()
                        .map(|f| Self::from_float(f, style))
                        .unwrap_or(Timestamp::Invalid)
                }
            }
            Some(_) => Timestamp::Invalid,
        }
    }

    fn from_float(value: f64, style: FractionStyle) -> Self {
        if !value.is_finite() {
            return Timestamp::Invalid;
        }

        let rendered = match style {
            FractionStyle::Literal => value.to_string(),
            FractionStyle::Legacy => match legacy_rendering(value) {
                Some(rendered) => rendered,
                None => return Timestamp::Invalid,
            },
        };
        match rendered.split_once('.') {
            None => rendered
                .parse()
                .map(Timestamp::Seconds)
                .unwrap_or(Timestamp::Invalid),
            Some((whole, digits)) => match whole.parse() {
                Ok(seconds) => Timestamp::Fractional {
                    seconds,
                    digits: digits.to_string(),
                },
                Err(_) => Timestamp::Invalid,
            },
        }
    }

    pub fn render(&self, offset: &FixedOffset, style: FractionStyle) -> String {
        match self {
            Timestamp::Now => now(offset),
            Timestamp::Seconds(seconds) => match at(*seconds, offset) {
                Some(dt) => iso8601(&dt, ""),
                None => {
                    debug!("Timestamp {} out of range, using current time", seconds);
                    now(offset)
                }
            },
            Timestamp::Fractional { seconds, digits } => match at(*seconds, offset) {
                Some(dt) => iso8601(&dt, &fraction(digits, style)),
                None => {
                    debug!("Timestamp {}.{} out of range, using current time", seconds, digits);
                    now(offset)
                }
            },
            Timestamp::Invalid => {
                debug!("Discarding unsupported timestamp input, using current time");
                now(offset)
            }
        }
    }
}

/// Normalizes a caller timestamp into an ISO-8601 string with offset.
pub fn format_time(value: Option<&Value>, offset: &FixedOffset, style: FractionStyle) -> String {
    Timestamp::classify(value, style).render(offset, style)
}

fn at(seconds: i64, offset: &FixedOffset) -> Option<DateTime<FixedOffset>> {
    offset.timestamp_opt(seconds, 0).single()
}

fn now(offset: &FixedOffset) -> String {
    iso8601(&Utc::now().with_timezone(offset), "")
}

fn iso8601(dt: &DateTime<FixedOffset>, fraction: &str) -> String {
    format!("{}{}{}", dt.format(DATE_TIME), fraction, dt.format(OFFSET))
}

/// `%.14G` without the exponent form: fixed notation with 14 significant
/// digits and trailing fractional zeros removed. Magnitudes that would switch
/// to exponent notation yield `None`.
fn legacy_rendering(value: f64) -> Option<String> {
    if value == 0.0 {
        return Some("0".to_string());
    }

    let scientific = format!("{:.*e}", LEGACY_PRECISION - 1, value);
    let exponent: i32 = scientific.split_once('e')?.1.parse().ok()?;
    if exponent < -4 || exponent >= LEGACY_PRECISION as i32 {
        return None;
    }

    let decimals = (LEGACY_PRECISION as i32 - 1 - exponent).max(0) as usize;
    let fixed = format!("{:.*}", decimals, value);
    if !fixed.contains('.') {
        return Some(fixed);
    }
    Some(fixed.trim_end_matches('0').trim_end_matches('.').to_string())
}

fn fraction(digits: &str, style: FractionStyle) -> String {
    match style {
        FractionStyle::Literal => format!(".{}", digits),
        FractionStyle::Legacy => {
            let trimmed = digits.trim_start_matches('0');
            if trimmed.is_empty() {
                "0".to_string()
            } else {
                trimmed.to_string()
            }
        }
    }
}
