//! Kubernetes resource quantities (`100m`, `0.5`, `256Mi`, `5Gi`, `1e3`).
//!
//! A [`Quantity`] keeps the text it was parsed from so output is verbatim,
//! and compares by value in milli-units so `1Gi == 1024Mi`.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Largest accepted decimal exponent (`1e18` == exa).
const MAX_EXPONENT: u32 = 18;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid quantity '{input}': {reason}")]
pub struct QuantityError {
    pub input: String,
    pub reason: &'static str,
}

#[derive(Debug, Clone)]
pub struct Quantity {
    raw: String,
    milli: i128,
}

impl Quantity {
    pub fn parse(input: &str) -> Result<Self, QuantityError> {
        let err = |reason| QuantityError {
            input: input.to_string(),
            reason,
        };

        let s = input.trim();
        if s.is_empty() {
            return Err(err("empty"));
        }

        let (negative, rest) = match s.as_bytes()[0] {
            b'-' => (true, &s[1..]),
            b'+' => (false, &s[1..]),
            _ => (false, s),
        };

        let num_end = rest
            .find(|c: char| !(c.is_ascii_digit() || c == '.'))
            .unwrap_or(rest.len());
        let (number, suffix) = rest.split_at(num_end);

        let (int_part, frac_part) = match number.split_once('.') {
            Some((i, f)) => (i, f),
            None => (number, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(err("missing number"));
        }
        if frac_part.contains('.') {
            return Err(err("more than one decimal point"));
        }

        let digits = format!("{}{}", int_part, frac_part);
        let mantissa: i128 = digits.parse().map_err(|_| err("number out of range"))?;
        let scale = pow10(frac_part.len() as u32).ok_or_else(|| err("too many decimals"))?;

        let (num, den) = multiplier(suffix).ok_or_else(|| err("unknown suffix"))?;

        // value * 1000 = mantissa / scale * num / den * 1000
        let numerator = mantissa
            .checked_mul(num)
            .and_then(|v| v.checked_mul(1000))
            .ok_or_else(|| err("value out of range"))?;
        let denominator = scale
            .checked_mul(den)
            .ok_or_else(|| err("value out of range"))?;
        // Round up so tiny positive values never collapse to zero.
        let mut milli = numerator
            .checked_add(denominator - 1)
            .ok_or_else(|| err("value out of range"))?
            / denominator;
        if negative {
            milli = -milli;
        }

        Ok(Self {
            raw: s.to_string(),
            milli,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    /// Value in thousandths of the base unit (millicores, milli-bytes).
    pub fn milli_value(&self) -> i128 {
        self.milli
    }

    pub fn is_positive(&self) -> bool {
        self.milli > 0
    }
}

fn pow10(exp: u32) -> Option<i128> {
    10i128.checked_pow(exp)
}

/// Returns the multiplier of a suffix as a `(numerator, denominator)` pair.
fn multiplier(suffix: &str) -> Option<(i128, i128)> {
    let binary = |power: u32| Some((1024i128.pow(power), 1));
    let decimal = |power: u32| Some((1000i128.pow(power), 1));
    match suffix {
        "" => Some((1, 1)),
        "m" => Some((1, 1000)),
        "k" => decimal(1),
        "M" => decimal(2),
        "G" => decimal(3),
        "T" => decimal(4),
        "P" => decimal(5),
        "E" => decimal(6),
        "Ki" => binary(1),
        "Mi" => binary(2),
        "Gi" => binary(3),
        "Ti" => binary(4),
        "Pi" => binary(5),
        "Ei" => binary(6),
        _ => {
            let exp = suffix.strip_prefix(['e', 'E'])?;
            let (negative, digits) = match exp.strip_prefix('-') {
                Some(d) => (true, d),
                None => (false, exp.strip_prefix('+').unwrap_or(exp)),
            };
            let power: u32 = digits.parse().ok()?;
            if power > MAX_EXPONENT {
                return None;
            }
            let factor = pow10(power)?;
            if negative {
                Some((1, factor))
            } else {
                Some((factor, 1))
            }
        }
    }
}

impl FromStr for Quantity {
    type Err = QuantityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

impl PartialEq for Quantity {
    fn eq(&self, other: &Self) -> bool {
        self.milli == other.milli
    }
}

impl Eq for Quantity {}

impl PartialOrd for Quantity {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Quantity {
    fn cmp(&self, other: &Self) -> Ordering {
        self.milli.cmp(&other.milli)
    }
}

impl Serialize for Quantity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.raw)
    }
}

impl<'de> Deserialize<'de> for Quantity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        Quantity::parse(&raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn milli(s: &str) -> i128 {
        Quantity::parse(s).unwrap().milli_value()
    }

    #[test]
    fn cpu_quantities() {
        assert_eq!(milli("100m"), 100);
        assert_eq!(milli("0.5"), 500);
        assert_eq!(milli("2"), 2000);
        assert_eq!(milli(".25"), 250);
    }

    #[test]
    fn memory_quantities() {
        assert_eq!(milli("256Mi"), 256 * 1024 * 1024 * 1000);
        assert_eq!(milli("1.5Gi"), 1536 * 1024 * 1024 * 1000);
        assert_eq!(milli("1k"), 1_000_000);
        assert_eq!(milli("1e3"), 1_000_000);
        assert_eq!(milli("5e-1"), 500);
    }

    #[test]
    fn binary_and_decimal_compare_by_value() {
        let a = Quantity::parse("1Gi").unwrap();
        let b = Quantity::parse("1024Mi").unwrap();
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "1Gi");
        assert!(Quantity::parse("1G").unwrap() < a);
    }

    #[test]
    fn signs() {
        assert!(Quantity::parse("-1Gi").unwrap().milli_value() < 0);
        assert!(!Quantity::parse("0").unwrap().is_positive());
        assert!(Quantity::parse("+1").unwrap().is_positive());
    }

    #[test]
    fn rejects_garbage() {
        assert!(Quantity::parse("").is_err());
        assert!(Quantity::parse("abc").is_err());
        assert!(Quantity::parse("5Gb").is_err());
        assert!(Quantity::parse("1.2.3").is_err());
        assert!(Quantity::parse("Gi").is_err());
        assert!(Quantity::parse("1e99").is_err());
        assert!(Quantity::parse("170141183460469231731687303715884105m").is_err());
    }

    #[test]
    fn serializes_verbatim() {
        let q = Quantity::parse("512Mi").unwrap();
        assert_eq!(serde_yaml::to_string(&q).unwrap(), "512Mi\n");
        let back: Quantity = serde_yaml::from_str("512Mi").unwrap();
        assert_eq!(back, q);
    }
}
