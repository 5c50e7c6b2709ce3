//! Liquidity share accounting.
//!
//! All divisions floor, matching the pool: a client minimum computed here is
//! never higher than what the contract can pay out.

use crate::error::MathError;
use crate::pool::PoolState;
use crate::token::TokenAmount;

/// Underlying amount redeemed by burning `shares` out of `total` shares.
///
/// `floor(reserve * shares / total)`.
pub fn redeemable(
    reserve: TokenAmount,
    shares: TokenAmount,
    total: TokenAmount,
) -> Result<TokenAmount, MathError> {
    if total.is_zero() {
        return Err(MathError::NoLiquidity);
    }
    let numerator = reserve
        .0
        .checked_mul(shares.0)
        .ok_or(MathError::Overflow)?;
    Ok(TokenAmount(numerator / total.0))
}

/// Counter-amount that keeps a deposit at the pool ratio.
///
/// `floor(amount * reserve_other / reserve_same)`.
pub fn paired_amount(
    amount: TokenAmount,
    reserve_same: TokenAmount,
    reserve_other: TokenAmount,
) -> Result<TokenAmount, MathError> {
    if reserve_same.is_zero() || reserve_other.is_zero() {
        return Err(MathError::EmptyReserves);
    }
    let numerator = amount
        .0
        .checked_mul(reserve_other.0)
        .ok_or(MathError::Overflow)?;
    Ok(TokenAmount(numerator / reserve_same.0))
}

/// Shares minted for depositing `amount_a` and `amount_b`.
///
/// The first deposit mints `isqrt(a * b)`; later deposits mint the smaller of
/// the two proportional claims.
pub fn minted(
    amount_a: TokenAmount,
    amount_b: TokenAmount,
    pool: &PoolState,
) -> Result<TokenAmount, MathError> {
    if pool.total_liquidity.is_zero() {
        let product = amount_a
            .0
            .checked_mul(amount_b.0)
            .ok_or(MathError::Overflow)?;
        return Ok(TokenAmount(product.integer_sqrt()));
    }
    if pool.is_empty() {
        return Err(MathError::EmptyReserves);
    }

    let total = pool.total_liquidity.0;
    let from_a = amount_a.0.checked_mul(total).ok_or(MathError::Overflow)? / pool.reserve_a.0;
    let from_b = amount_b.0.checked_mul(total).ok_or(MathError::Overflow)? / pool.reserve_b.0;
    Ok(TokenAmount(from_a.min(from_b)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_redeemable_floors() {
        // 1000 * 1 / 3 = 333.33 -> 333
        let out = redeemable(
            TokenAmount::from(1000u64),
            TokenAmount::from(1u64),
            TokenAmount::from(3u64),
        )
        .unwrap();
        assert_eq!(out, TokenAmount::from(333u64));
    }

    #[test]
    fn test_redeemable_all_shares_returns_reserve() {
        let reserve = TokenAmount::from(987_654u64);
        let total = TokenAmount::from(4242u64);
        assert_eq!(redeemable(reserve, total, total).unwrap(), reserve);
    }

    #[test]
    fn test_redeemable_without_liquidity() {
        assert_eq!(
            redeemable(
                TokenAmount::from(10u64),
                TokenAmount::from(1u64),
                TokenAmount::zero()
            ),
            Err(MathError::NoLiquidity)
        );
    }

    #[test]
    fn test_paired_amount() {
        // 50 * 2000 / 1000
        let b = paired_amount(
            TokenAmount::from(50u64),
            TokenAmount::from(1000u64),
            TokenAmount::from(2000u64),
        )
        .unwrap();
        assert_eq!(b, TokenAmount::from(100u64));
        assert_eq!(
            paired_amount(
                TokenAmount::from(50u64),
                TokenAmount::zero(),
                TokenAmount::from(2000u64)
            ),
            Err(MathError::EmptyReserves)
        );
    }

    #[test]
    fn test_minted_first_and_later_deposits() {
        let empty = PoolState::default();
        let first = minted(
            TokenAmount::from(1000u64),
            TokenAmount::from(4000u64),
            &empty,
        )
        .unwrap();
        assert_eq!(first, TokenAmount::from(2000u64));

        let pool = PoolState {
            reserve_a: TokenAmount::from(1000u64),
            reserve_b: TokenAmount::from(4000u64),
            total_liquidity: TokenAmount::from(2000u64),
        };
        // min(100 * 2000 / 1000, 800 * 2000 / 4000) = min(200, 400)
        let later = minted(TokenAmount::from(100u64), TokenAmount::from(800u64), &pool).unwrap();
        assert_eq!(later, TokenAmount::from(200u64));
    }

    proptest! {
        #[test]
        fn prop_redeemable_never_exceeds_reserve(
            reserve in any::<u64>(),
            total in 1u64..,
            share_seed in any::<u64>(),
        ) {
            let shares = share_seed.min(total);
            let out = redeemable(
                TokenAmount::from(reserve),
                TokenAmount::from(shares),
                TokenAmount::from(total),
            ).unwrap();
            prop_assert!(out <= TokenAmount::from(reserve));
            let expected = u128::from(reserve) * u128::from(shares) / u128::from(total);
            prop_assert_eq!(out, TokenAmount::from(expected));
        }
    }
}
