use std::fmt;
use std::str::FromStr;

use serde::de::{self, Unexpected, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{RecipeError, Result};
use crate::scan::Cursor;

fn gcd(m: i128, n: i128) -> i128 {
    if n == 0 {
        m
    } else {
        gcd(n, m % n)
    }
}

/// An exact rational number.
///
/// Always held in lowest terms with a positive denominator, so two fractions
/// are equal exactly when their numerators and denominators are equal. There
/// are no mutators; every operation returns a new value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Fraction {
    numerator: i64,
    denominator: i64,
}

impl Fraction {
    pub const ZERO: Fraction = Fraction {
        numerator: 0,
        denominator: 1,
    };

    /// Creates `numerator / denominator` reduced to lowest terms.
    ///
    /// The sign is carried by the numerator: `Fraction::new(1, -2)` is `-1/2`.
    pub fn new(numerator: i64, denominator: i64) -> Result<Fraction> {
        Self::reduce(numerator.into(), denominator.into())
    }

    /// Creates the fraction `n / 1`.
    pub fn from_integer(n: i64) -> Fraction {
        Fraction {
            numerator: n,
            denominator: 1,
        }
    }

    // Intermediate products are computed in i128 so that only a final result
    // outside the i64 range is an error.
    fn reduce(numerator: i128, denominator: i128) -> Result<Fraction> {
        if denominator == 0 {
            return Err(RecipeError::invalid(
                "cannot create a fraction with a denominator of zero",
            ));
        }
        let divisor = gcd(numerator.abs(), denominator.abs()) * denominator.signum();
        let out_of_range = |_| {
            RecipeError::invalid(format!(
                "fraction {}/{} is out of range",
                numerator, denominator
            ))
        };
        Ok(Fraction {
            numerator: i64::try_from(numerator / divisor).map_err(out_of_range)?,
            denominator: i64::try_from(denominator / divisor).map_err(out_of_range)?,
        })
    }

    pub fn numerator(&self) -> i64 {
        self.numerator
    }

    pub fn denominator(&self) -> i64 {
        self.denominator
    }

    pub fn is_zero(&self) -> bool {
        self.numerator == 0
    }

    /// Combines a whole number and a (normally proper) fraction into a single
    /// improper fraction: `whole * d + n` over `d`.
    pub fn from_mixed_number(whole: i64, fractional: Fraction) -> Result<Fraction> {
        let denominator = i128::from(fractional.denominator);
        Self::reduce(
            i128::from(whole) * denominator + i128::from(fractional.numerator),
            denominator,
        )
    }

    /// Splits this fraction into `(floor(n / d), (n mod d) / d)`.
    ///
    /// The remainder always satisfies `0 <= numerator < denominator`, and
    /// `from_mixed_number` applied to the pair gives back `self`.
    pub fn to_mixed_number(&self) -> (i64, Fraction) {
        let whole = self.numerator.div_euclid(self.denominator);
        let remainder = self.numerator.rem_euclid(self.denominator);
        // gcd(n mod d, d) == gcd(n, d) == 1, except for a zero remainder
        // where the denominator is already 1.
        let proper = Fraction {
            numerator: remainder,
            denominator: self.denominator,
        };
        (whole, proper)
    }

    /// Parses a non-negative mixed number such as `"3"`, `"3/4"` or `"1 1 / 2"`.
    ///
    /// Surrounding whitespace is allowed; anything else after the number is an
    /// error.
    pub fn parse(text: &str) -> Result<Fraction> {
        let mut cursor = Cursor::new(text);
        let quantity = take_mixed_number(&mut cursor)?
            .ok_or_else(|| RecipeError::parse("no fractional number specified"))?;
        let rest = cursor.rest();
        if !rest.trim().is_empty() {
            return Err(RecipeError::parse(format!(
                "unexpected trailing data: '{}'",
                rest
            )));
        }
        Ok(quantity)
    }
}

fn parse_int(digits: &str) -> Result<i64> {
    digits
        .parse()
        .map_err(|_| RecipeError::parse(format!("number '{}' is too large", digits)))
}

/// Consumes an optional whole-number run followed by an optional fraction run.
///
/// Returns `Ok(None)` when neither part is present.
pub(crate) fn take_mixed_number(cursor: &mut Cursor<'_>) -> Result<Option<Fraction>> {
    let whole = cursor.take_whole_number().map(parse_int).transpose()?;
    let fractional = match cursor.take_fraction() {
        Some((numerator, denominator)) => {
            // "1/0" is a well-formed run, so a zero denominator is reported by
            // construction as InvalidArgument rather than as a parse error.
            Some(Fraction::new(parse_int(numerator)?, parse_int(denominator)?)?)
        }
        None => None,
    };
    if whole.is_none() && fractional.is_none() {
        return Ok(None);
    }
    Fraction::from_mixed_number(whole.unwrap_or(0), fractional.unwrap_or(Fraction::ZERO))
        .map(Some)
}

impl Default for Fraction {
    fn default() -> Self {
        Fraction::ZERO
    }
}

impl From<i64> for Fraction {
    fn from(n: i64) -> Self {
        Fraction::from_integer(n)
    }
}

impl From<i32> for Fraction {
    fn from(n: i32) -> Self {
        Fraction::from_integer(n.into())
    }
}

impl From<u32> for Fraction {
    fn from(n: u32) -> Self {
        Fraction::from_integer(n.into())
    }
}

impl FromStr for Fraction {
    type Err = RecipeError;

    fn from_str(s: &str) -> Result<Self> {
        Fraction::parse(s)
    }
}

/// Mixed-number text: `3/4`, `1 1/2`, `2`, `-1 1/2`.
impl fmt::Display for Fraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // i128 so that the magnitude of i64::MIN fits
        let magnitude = i128::from(self.numerator).abs();
        let denominator = i128::from(self.denominator);
        if self.numerator < 0 {
            f.write_str("-")?;
        }
        match (magnitude / denominator, magnitude % denominator) {
            (whole, 0) => write!(f, "{}", whole),
            (0, rem) => write!(f, "{}/{}", rem, denominator),
            (whole, rem) => write!(f, "{} {}/{}", whole, rem, denominator),
        }
    }
}

impl Serialize for Fraction {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        if self.denominator == 1 {
            serializer.serialize_i64(self.numerator)
        } else {
            serializer.collect_str(self)
        }
    }
}

struct FractionVisitor;

impl<'de> Visitor<'de> for FractionVisitor {
    type Value = Fraction;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("an integer or a mixed number such as '1 1/2'")
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> std::result::Result<Self::Value, E> {
        Ok(Fraction::from_integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> std::result::Result<Self::Value, E> {
        i64::try_from(v)
            .map(Fraction::from_integer)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> std::result::Result<Self::Value, E> {
        Err(E::invalid_type(Unexpected::Float(v), &self))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> std::result::Result<Self::Value, E> {
        Fraction::parse(v).map_err(|e| E::custom(format!("invalid quantity '{}': {}", v, e)))
    }
}

impl<'de> Deserialize<'de> for Fraction {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        deserializer.deserialize_any(FractionVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frac(n: i64, d: i64) -> Fraction {
        Fraction::new(n, d).unwrap()
    }

    #[test]
    fn test_lowest_terms() {
        assert_eq!(frac(2, 3), frac(2, 3));
        assert_eq!(frac(6, 8), frac(3, 4));
        assert_ne!(frac(2, 5), frac(1, 4));
        assert_eq!(frac(0, 7), Fraction::ZERO);
    }

    #[test]
    fn test_reduction_has_unit_gcd() {
        for n in -24..=24 {
            for d in (-12..=12).filter(|&d| d != 0) {
                let f = frac(n, d);
                assert_eq!(gcd(f.numerator().into(), f.denominator().into()).abs(), 1);
                assert!(f.denominator() > 0);
                assert_eq!(f.numerator() * d, n * f.denominator());
            }
        }
    }

    #[test]
    fn test_sign_is_carried_by_numerator() {
        assert_eq!(frac(1, -2), frac(-1, 2));
        assert_eq!(frac(-3, -6), frac(1, 2));
        assert_eq!(frac(-4, 2).denominator(), 1);
    }

    #[test]
    fn test_zero_denominator() {
        assert!(matches!(
            Fraction::new(1, 0),
            Err(RecipeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_from_mixed_number() {
        assert_eq!(Fraction::from_mixed_number(1, frac(1, 3)).unwrap(), frac(4, 3));
        assert_eq!(Fraction::from_mixed_number(0, frac(5, 6)).unwrap(), frac(5, 6));
        assert_eq!(Fraction::from_mixed_number(4, frac(2, 3)).unwrap(), frac(14, 3));
    }

    #[test]
    fn test_to_mixed_number() {
        assert_eq!(frac(3, 4).to_mixed_number(), (0, frac(3, 4)));
        assert_eq!(frac(3, 2).to_mixed_number(), (1, frac(1, 2)));
        assert_eq!(frac(15, 4).to_mixed_number(), (3, frac(3, 4)));
        assert_eq!(frac(8, 4).to_mixed_number(), (2, Fraction::ZERO));
        assert_eq!(frac(-3, 2).to_mixed_number(), (-2, frac(1, 2)));
    }

    #[test]
    fn test_mixed_number_inverse() {
        for whole in -5..=5 {
            for d in 1..=9 {
                for n in 0..d {
                    let proper = frac(n, d);
                    let f = Fraction::from_mixed_number(whole, proper).unwrap();
                    assert_eq!(f.to_mixed_number(), (whole, proper));
                }
            }
        }
    }

    #[test]
    fn test_overflow_is_an_error() {
        assert!(matches!(
            Fraction::from_mixed_number(i64::MAX, frac(1, 2)),
            Err(RecipeError::InvalidArgument(_))
        ));
        assert_eq!(frac(i64::MIN, i64::MIN), Fraction::from_integer(1));
        assert!(Fraction::new(i64::MIN, -1).is_err());
    }

    #[test]
    fn test_parse() {
        assert_eq!(Fraction::parse("3").unwrap(), frac(3, 1));
        assert_eq!(Fraction::parse("3/4").unwrap(), frac(3, 4));
        assert_eq!(Fraction::parse(" 1 1/2 ").unwrap(), frac(3, 2));
        assert_eq!(Fraction::parse("3 3 / 4").unwrap(), frac(15, 4));
        assert_eq!(Fraction::parse("6/8").unwrap(), frac(3, 4));
        assert_eq!("2 / 3".parse::<Fraction>().unwrap(), frac(2, 3));
    }

    #[test]
    fn test_parse_errors() {
        for text in ["", "   ", "abc", "/2"] {
            assert!(
                matches!(Fraction::parse(text), Err(RecipeError::Parse(_))),
                "expected parse error for {:?}",
                text
            );
        }
        assert!(matches!(
            Fraction::parse("1 1/2 cups"),
            Err(RecipeError::Parse(msg)) if msg.contains("trailing")
        ));
        assert!(matches!(
            Fraction::parse("1/0"),
            Err(RecipeError::InvalidArgument(_))
        ));
        assert!(matches!(
            Fraction::parse("99999999999999999999"),
            Err(RecipeError::Parse(_))
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(frac(3, 4).to_string(), "3/4");
        assert_eq!(frac(3, 2).to_string(), "1 1/2");
        assert_eq!(frac(4, 2).to_string(), "2");
        assert_eq!(Fraction::ZERO.to_string(), "0");
        assert_eq!(frac(-3, 2).to_string(), "-1 1/2");
        assert_eq!(Fraction::parse(&frac(29, 8).to_string()).unwrap(), frac(29, 8));
    }

    #[test]
    fn test_serde() {
        assert_eq!(serde_json::to_string(&frac(3, 2)).unwrap(), r#""1 1/2""#);
        assert_eq!(serde_json::to_string(&frac(4, 1)).unwrap(), "4");
        assert_eq!(serde_json::from_str::<Fraction>("4").unwrap(), frac(4, 1));
        assert_eq!(
            serde_json::from_str::<Fraction>(r#""1 1/4""#).unwrap(),
            frac(5, 4)
        );
        assert!(serde_json::from_str::<Fraction>("1.5").is_err());
        assert!(serde_json::from_str::<Fraction>(r#""a lot""#).is_err());
    }
}
