use crate::error::ParseError;
use crate::token::TokenAmount;
use primitive_types::U256;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Denominator of the slippage factor: tenths of a percent.
const PER_MILLE: u32 = 1000;

/// Maximum acceptable adverse movement, in tenths of a percent.
///
/// `0.5%` is stored as `5`. The minimum acceptable amount is
/// `amount * (1000 - tenths) / 1000`, floored. Serialized as the bare number
/// of tenths; deserialization enforces the 100% bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u16", into = "u16")]
pub struct SlippageTolerance {
    tenths: u16,
}

impl SlippageTolerance {
    /// No slippage allowed.
    pub const ZERO: SlippageTolerance = SlippageTolerance { tenths: 0 };

    /// Half a percent, the default for swaps and liquidity changes.
    pub const HALF_PERCENT: SlippageTolerance = SlippageTolerance { tenths: 5 };

    /// Creates a tolerance from tenths of a percent.
    ///
    /// # Errors
    /// Returns [`ParseError::SlippageOutOfRange`] above 100%.
    pub fn from_tenths(tenths: u16) -> Result<Self, ParseError> {
        if u32::from(tenths) > PER_MILLE {
            return Err(ParseError::SlippageOutOfRange(format!(
                "{}.{}",
                tenths / 10,
                tenths % 10
            )));
        }
        Ok(Self { tenths })
    }

    pub fn tenths(&self) -> u16 {
        self.tenths
    }

    /// Numerator of the factor applied to amounts, over 1000.
    pub fn factor(&self) -> u32 {
        PER_MILLE - u32::from(self.tenths)
    }

    /// Scales `amount` down by the tolerance, rounding towards zero.
    ///
    /// Computed as `q * f + r * f / 1000` with `amount = q * 1000 + r`, which
    /// equals `floor(amount * f / 1000)` without the intermediate overflow.
    #[must_use]
    pub fn apply(&self, amount: TokenAmount) -> TokenAmount {
        let denominator = U256::from(PER_MILLE);
        let factor = U256::from(self.factor());
        let (quotient, remainder) = amount.0.div_mod(denominator);
        TokenAmount(quotient * factor + remainder * factor / denominator)
    }
}

impl TryFrom<u16> for SlippageTolerance {
    type Error = ParseError;

    fn try_from(tenths: u16) -> Result<Self, Self::Error> {
        Self::from_tenths(tenths)
    }
}

impl From<SlippageTolerance> for u16 {
    fn from(slippage: SlippageTolerance) -> Self {
        slippage.tenths
    }
}

impl FromStr for SlippageTolerance {
    type Err = ParseError;

    /// Parses a percentage with at most one decimal, e.g. `"0.5"` or `"2"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim_end_matches('%');
        let (int_part, frac_part) = input.split_once('.').unwrap_or((input, ""));

        if let Some(found) = int_part
            .chars()
            .chain(frac_part.chars())
            .find(|c| !c.is_ascii_digit())
        {
            return Err(ParseError::InvalidCharacter {
                input: s.to_string(),
                found,
            });
        }
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(ParseError::Empty);
        }
        if frac_part.len() > 1 {
            return Err(ParseError::TooPrecise {
                input: s.to_string(),
                found: frac_part.len(),
                max: 1,
            });
        }

        let whole = int_part.trim_start_matches('0');
        if whole.len() > 4 {
            return Err(ParseError::SlippageOutOfRange(s.to_string()));
        }
        let whole: u32 = if whole.is_empty() {
            0
        } else {
            whole
                .parse()
                .map_err(|_| ParseError::SlippageOutOfRange(s.to_string()))?
        };
        let tenth: u32 = frac_part.parse().unwrap_or(0);
        let tenths = whole * 10 + tenth;
        if tenths > PER_MILLE {
            return Err(ParseError::SlippageOutOfRange(s.to_string()));
        }
        // Bounded by PER_MILLE above.
        Ok(Self {
            tenths: tenths as u16,
        })
    }
}

impl fmt::Display for SlippageTolerance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}%", self.tenths / 10, self.tenths % 10)
    }
}
