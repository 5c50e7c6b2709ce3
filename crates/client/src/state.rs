use dex_domain::pool::StateSnapshot;
use dex_domain::token::{LIQUIDITY_DECIMALS, TokenAmount, TokenPair};
use dex_domain::units::{round_for_display, to_display_units};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The cached state rendered as decimal strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormattedState {
    pub symbol_a: String,
    pub symbol_b: String,
    pub reserve_a: String,
    pub reserve_b: String,
    pub balance_a: String,
    pub balance_b: String,
    pub liquidity: String,
    pub total_liquidity: String,
    /// Percentage of outstanding shares held by the account.
    pub pool_share: String,
}

impl FormattedState {
    /// Formats `snapshot`, rounding amounts to `places` fractional digits.
    pub fn new(pair: &TokenPair, snapshot: &StateSnapshot, places: u32) -> Self {
        let token_a = |amount| round_for_display(&pair.token_a.to_display_units(amount), places);
        let token_b = |amount| round_for_display(&pair.token_b.to_display_units(amount), places);
        let shares = |amount| {
            round_for_display(&to_display_units(LIQUIDITY_DECIMALS, amount), places)
        };

        Self {
            symbol_a: pair.token_a.symbol.clone(),
            symbol_b: pair.token_b.symbol.clone(),
            reserve_a: token_a(snapshot.pool.reserve_a),
            reserve_b: token_b(snapshot.pool.reserve_b),
            balance_a: token_a(snapshot.user.balance_a),
            balance_b: token_b(snapshot.user.balance_b),
            liquidity: shares(snapshot.user.liquidity),
            total_liquidity: shares(snapshot.pool.total_liquidity),
            pool_share: pool_share(snapshot.user.liquidity, snapshot.pool.total_liquidity),
        }
    }
}

fn pool_share(held: TokenAmount, total: TokenAmount) -> String {
    if total.is_zero() {
        return "0".to_string();
    }
    let as_decimal = |amount| Decimal::from_str(&to_display_units(LIQUIDITY_DECIMALS, amount));
    match (as_decimal(held), as_decimal(total)) {
        (Ok(held), Ok(total)) => held
            .checked_div(total)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(|pct| pct.round_dp(2).normalize().to_string())
            .unwrap_or_else(|| "?".to_string()),
        _ => "?".to_string(),
    }
}

impl fmt::Display for FormattedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Reserves: {} {} / {} {}",
            self.reserve_a, self.symbol_a, self.reserve_b, self.symbol_b
        )?;
        writeln!(
            f,
            "Balances: {} {} / {} {}",
            self.balance_a, self.symbol_a, self.balance_b, self.symbol_b
        )?;
        write!(
            f,
            "Liquidity: {} of {} ({}%)",
            self.liquidity, self.total_liquidity, self.pool_share
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use dex_domain::address::from_index;
    use dex_domain::pool::{PoolState, UserPosition};
    use dex_domain::token::Token;

    fn pair() -> TokenPair {
        TokenPair::new(
            Token::new(from_index(1), "WETH", 18),
            Token::new(from_index(2), "USDC", 6),
        )
    }

    fn amount(decimals: u8, s: &str) -> TokenAmount {
        dex_domain::units::to_base_units(decimals, s).unwrap()
    }

    #[test]
    fn test_rounds_for_display() {
        let snapshot = StateSnapshot {
            pool: PoolState {
                reserve_a: amount(18, "10.123456789"),
                reserve_b: amount(6, "20000"),
                total_liquidity: amount(18, "400"),
            },
            user: UserPosition {
                balance_a: amount(18, "1"),
                balance_b: amount(6, "0.5"),
                liquidity: amount(18, "100"),
            },
        };
        let state = FormattedState::new(&pair(), &snapshot, 6);
        assert_eq!(state.reserve_a, "10.123457");
        assert_eq!(state.reserve_b, "20000");
        assert_eq!(state.balance_b, "0.5");
        assert_eq!(state.liquidity, "100");
        assert_eq!(state.pool_share, "25");
        assert!(state.to_string().contains("10.123457 WETH"));
    }

    #[test]
    fn test_empty_pool_share() {
        let state = FormattedState::new(&pair(), &StateSnapshot::default(), 6);
        assert_eq!(state.pool_share, "0");
        assert_eq!(state.reserve_a, "0");
    }
}
