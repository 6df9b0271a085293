//! Exact conversion between user entered decimal amounts and on-chain base units.

use alloy_primitives::{
    U256,
    utils::{ParseUnits, Unit},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

/// Errors raised while parsing or converting an amount.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("amount is empty")]
    Empty,
    #[error("invalid amount {0:?}: expected a non-negative decimal number")]
    Malformed(String),
    #[error("amount {amount} has more than {decimals} fractional digits")]
    TooPrecise { amount: String, decimals: u8 },
    #[error("unsupported number of decimals: {0}")]
    InvalidDecimals(u8),
    #[error("amount {0} does not fit in 256 bits")]
    Overflow(String),
}

/// A validated, non-negative decimal amount as entered by a user, e.g. `"2.5"`.
///
/// The amount is kept as text: it is only turned into an integer once the number of decimals of
/// the asset is known, see [`to_base_units`].
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DecimalAmount(String);

impl DecimalAmount {
    /// Returns the amount as entered.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of significant digits after the decimal point.
    pub fn fractional_digits(&self) -> usize {
        self.digits().1.len()
    }

    /// Integer and fractional digits, without the trailing zeros of the fraction.
    fn digits(&self) -> (&str, &str) {
        let (int, frac) = self.0.split_once('.').unwrap_or((self.0.as_str(), ""));
        (int, frac.trim_end_matches('0'))
    }
}

impl FromStr for DecimalAmount {
    type Err = AmountError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(AmountError::Empty);
        }
        let (int, frac) = s.split_once('.').unwrap_or((s, ""));
        let digits_only = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if !digits_only(int) || !digits_only(frac) || (int.is_empty() && frac.is_empty()) {
            return Err(AmountError::Malformed(s.to_string()));
        }
        Ok(Self(s.to_string()))
    }
}

impl TryFrom<String> for DecimalAmount {
    type Error = AmountError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<DecimalAmount> for String {
    fn from(amount: DecimalAmount) -> Self {
        amount.0
    }
}

impl fmt::Display for DecimalAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Converts a decimal amount into base units of an asset with `decimals` decimals.
///
/// The conversion is exact: amounts with more fractional digits than the asset supports are
/// rejected instead of being truncated.
///
/// # Example
///
/// ```
/// use alloy_primitives::U256;
/// use scw_common::{DecimalAmount, to_base_units};
///
/// let amount: DecimalAmount = "2.5".parse()?;
/// assert_eq!(to_base_units(&amount, 18)?, U256::from(2_500_000_000_000_000_000u128));
/// # Ok::<_, scw_common::AmountError>(())
/// ```
pub fn to_base_units(amount: &DecimalAmount, decimals: u8) -> Result<U256, AmountError> {
    let unit = Unit::new(decimals).ok_or(AmountError::InvalidDecimals(decimals))?;
    let (int, frac) = amount.digits();
    if frac.len() > decimals as usize {
        return Err(AmountError::TooPrecise { amount: amount.to_string(), decimals });
    }
    let int = if int.is_empty() { "0" } else { int };
    let significant = if frac.is_empty() { int.to_string() } else { format!("{int}.{frac}") };
    let parsed = ParseUnits::parse_units(&significant, unit)
        .map_err(|_| AmountError::Overflow(amount.to_string()))?;
    Ok(parsed.get_absolute())
}

/// Formats base units as a decimal amount, dropping insignificant trailing zeros.
///
/// ```
/// use alloy_primitives::U256;
/// use scw_common::from_base_units;
///
/// assert_eq!(from_base_units(U256::from(2_500_000_000_000_000_000u128), 18)?, "2.5");
/// assert_eq!(from_base_units(U256::from(3u64), 0)?, "3");
/// # Ok::<_, scw_common::AmountError>(())
/// ```
pub fn from_base_units(value: U256, decimals: u8) -> Result<String, AmountError> {
    let unit = Unit::new(decimals).ok_or(AmountError::InvalidDecimals(decimals))?;
    let formatted = ParseUnits::U256(value).format_units(unit);
    let Some((int, frac)) = formatted.split_once('.') else { return Ok(formatted) };
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() { Ok(int.to_string()) } else { Ok(format!("{int}.{frac}")) }
}
