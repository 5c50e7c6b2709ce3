use crate::pool::SwapDirection;
use crate::slippage::SlippageTolerance;
use crate::token::{TokenAmount, TokenPair};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Advisory swap quote. The pool re-validates `minimum_out` on execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Quote {
    pub direction: SwapDirection,
    pub amount_in: TokenAmount,
    pub amount_out: TokenAmount,
    pub minimum_out: TokenAmount,
    pub slippage: SlippageTolerance,
}

impl Quote {
    /// Builds a quote, deriving the minimum from the tolerance.
    #[must_use]
    pub fn new(
        direction: SwapDirection,
        amount_in: TokenAmount,
        amount_out: TokenAmount,
        slippage: SlippageTolerance,
    ) -> Self {
        Self {
            direction,
            amount_in,
            amount_out,
            minimum_out: slippage.apply(amount_out),
            slippage,
        }
    }

    /// Output tokens per input token, for display only.
    ///
    /// Returns `None` for a zero input or amounts too large for a [`Decimal`].
    pub fn rate(&self, pair: &TokenPair) -> Option<Decimal> {
        if self.amount_in.is_zero() {
            return None;
        }
        let amount_in =
            Decimal::from_str(&pair.input(self.direction).to_display_units(self.amount_in)).ok()?;
        let amount_out =
            Decimal::from_str(&pair.output(self.direction).to_display_units(self.amount_out))
                .ok()?;
        amount_out.checked_div(amount_in)
    }
}
