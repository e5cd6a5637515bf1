//! Validated value types shared by the clinica domain model.
//!
//! These wrappers guarantee their invariant at construction time, so the
//! rest of the workspace never re-checks them: text fields are non-empty
//! and trimmed, monetary amounts are non-negative with exactly two
//! decimal places, and coverage percentages stay inside 0–100.

/// Errors that can occur when constructing validated value types.
#[derive(Debug, thiserror::Error)]
pub enum ValueError {
    /// The input text was empty or contained only whitespace
    #[error("text cannot be empty")]
    EmptyText,
    /// The input was not a decimal number with at most two fractional digits
    #[error("'{0}' is not a valid amount (expected digits with up to two decimal places)")]
    MalformedDecimal(String),
    /// The amount was negative
    #[error("amount cannot be negative")]
    NegativeAmount,
    /// The percentage fell outside the 0–100 range
    #[error("percentage must be between 0 and 100")]
    PercentOutOfRange,
}

/// A string type that guarantees non-empty content.
///
/// Wraps a `String` that contains at least one non-whitespace character.
/// Input is trimmed of leading and trailing whitespace on construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText`, trimming the input first.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::EmptyText` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, ValueError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ValueError::EmptyText);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the inner `String`.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Length in bytes of the trimmed content.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always false; kept for clippy's `len_without_is_empty`.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}

/// Parse a decimal string with at most two fractional digits into
/// hundredths. Shared by [`Money`] and [`CoveragePercent`].
fn parse_hundredths(input: &str) -> Result<i64, ValueError> {
    let s = input.trim();
    let malformed = || ValueError::MalformedDecimal(input.to_owned());

    let (negative, digits) = match s.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, s),
    };

    let (whole, frac) = match digits.split_once('.') {
        Some((w, f)) => (w, f),
        None => (digits, ""),
    };

    if whole.is_empty() || frac.len() > 2 {
        return Err(malformed());
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !frac.bytes().all(|b| b.is_ascii_digit()) {
        return Err(malformed());
    }

    let whole: i64 = whole.parse().map_err(|_| malformed())?;
    let frac: i64 = if frac.is_empty() {
        0
    } else if frac.len() == 1 {
        frac.parse::<i64>().map_err(|_| malformed())? * 10
    } else {
        frac.parse().map_err(|_| malformed())?
    };

    let value = whole
        .checked_mul(100)
        .and_then(|v| v.checked_add(frac))
        .ok_or_else(malformed)?;
    Ok(if negative { -value } else { value })
}

fn format_hundredths(value: i64, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    write!(f, "{}.{:02}", value / 100, value % 100)
}

/// A non-negative monetary amount with exactly two decimal places.
///
/// Stored as an integer count of hundredths, so arithmetic and
/// comparison are exact. The serialized form is the decimal string
/// (`"1250.00"`), never a float.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Money(i64);

impl Money {
    /// Parses a decimal string such as `"12"`, `"12.5"` or `"12.50"`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::MalformedDecimal` for non-decimal input and
    /// `ValueError::NegativeAmount` for negative amounts.
    pub fn parse(input: &str) -> Result<Self, ValueError> {
        let hundredths = parse_hundredths(input)?;
        if hundredths < 0 {
            return Err(ValueError::NegativeAmount);
        }
        Ok(Self(hundredths))
    }

    /// Constructs from an integer count of hundredths.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::NegativeAmount` if `hundredths` is negative.
    pub fn from_hundredths(hundredths: i64) -> Result<Self, ValueError> {
        if hundredths < 0 {
            return Err(ValueError::NegativeAmount);
        }
        Ok(Self(hundredths))
    }

    /// The amount as an integer count of hundredths.
    pub fn hundredths(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_hundredths(self.0, f)
    }
}

impl std::str::FromStr for Money {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for Money {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for Money {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Money::parse(&s).map_err(serde::de::Error::custom)
    }
}

/// A coverage percentage between 0 and 100 with two decimal places.
///
/// Same exact-decimal representation as [`Money`], with the additional
/// range invariant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct CoveragePercent(i64);

impl CoveragePercent {
    /// Parses a decimal string such as `"80"` or `"62.5"`.
    ///
    /// # Errors
    ///
    /// Returns `ValueError::MalformedDecimal` for non-decimal input and
    /// `ValueError::PercentOutOfRange` outside 0–100.
    pub fn parse(input: &str) -> Result<Self, ValueError> {
        let hundredths = parse_hundredths(input)?;
        if !(0..=10_000).contains(&hundredths) {
            return Err(ValueError::PercentOutOfRange);
        }
        Ok(Self(hundredths))
    }

    /// The percentage as an integer count of hundredths (0..=10000).
    pub fn hundredths(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for CoveragePercent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        format_hundredths(self.0, f)
    }
}

impl std::str::FromStr for CoveragePercent {
    type Err = ValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for CoveragePercent {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CoveragePercent {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        CoveragePercent::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn non_empty_text_trims_input() {
        let text = NonEmptyText::new("  Cardiology  ").expect("valid text");
        assert_eq!(text.as_str(), "Cardiology");
    }

    #[test]
    fn non_empty_text_rejects_whitespace_only() {
        let err = NonEmptyText::new("   ").expect_err("should reject blank input");
        assert!(matches!(err, ValueError::EmptyText));
    }

    #[test]
    fn money_parses_all_fraction_widths() {
        assert_eq!(Money::parse("12").expect("whole").hundredths(), 1200);
        assert_eq!(Money::parse("12.5").expect("one digit").hundredths(), 1250);
        assert_eq!(Money::parse("12.50").expect("two digits").hundredths(), 1250);
    }

    #[test]
    fn money_formats_with_two_places() {
        assert_eq!(Money::parse("7.5").expect("parse").to_string(), "7.50");
        assert_eq!(Money::parse("0.05").expect("parse").to_string(), "0.05");
    }

    #[test]
    fn money_rejects_malformed_and_negative() {
        assert!(matches!(
            Money::parse("12.345").expect_err("three decimals"),
            ValueError::MalformedDecimal(_)
        ));
        assert!(matches!(
            Money::parse("abc").expect_err("not a number"),
            ValueError::MalformedDecimal(_)
        ));
        assert!(matches!(
            Money::parse("-3.00").expect_err("negative"),
            ValueError::NegativeAmount
        ));
    }

    #[test]
    fn coverage_percent_enforces_range() {
        assert_eq!(
            CoveragePercent::parse("100").expect("upper bound").hundredths(),
            10_000
        );
        assert_eq!(CoveragePercent::parse("0").expect("lower bound").hundredths(), 0);
        assert!(matches!(
            CoveragePercent::parse("100.01").expect_err("over 100"),
            ValueError::PercentOutOfRange
        ));
    }

    #[test]
    fn money_serde_round_trips_as_string() {
        let money = Money::parse("1250.00").expect("parse");
        let json = serde_json::to_string(&money).expect("serialize");
        assert_eq!(json, "\"1250.00\"");
        let back: Money = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, money);
    }
}
