use crate::error::MathError;
use crate::token::TokenAmount;
use primitive_types::U256;

/// Output amount of a fee-less constant-product swap.
///
/// formula: dy = y - (x * y) / (x + dx)
///
/// The division floors, so the pool keeps the rounding remainder and the
/// product of the new reserves never drops below `k`.
pub fn amount_out(
    amount_in: TokenAmount,
    reserve_in: TokenAmount,
    reserve_out: TokenAmount,
) -> Result<TokenAmount, MathError> {
    let amount_in = amount_in.0;
    let reserve_in = reserve_in.0;
    let reserve_out = reserve_out.0;

    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(MathError::EmptyReserves);
    }
    if amount_in.is_zero() {
        return Ok(TokenAmount::zero());
    }

    let k = reserve_in
        .checked_mul(reserve_out)
        .ok_or(MathError::Overflow)?;
    let new_reserve_in = reserve_in
        .checked_add(amount_in)
        .ok_or(MathError::Overflow)?;

    Ok(TokenAmount(reserve_out - k / new_reserve_in))
}

/// Basis points in one whole.
pub const BPS: u32 = 10_000;

/// Output amount of a constant-product swap that keeps `fee_bps` of the input
/// in the pool.
///
/// The fee is taken from the input before pricing, so the effective input is
/// `dx * (10000 - fee) / 10000` and the result is `amount_out` over the
/// scaled reserves. A fee of zero gives exactly [`amount_out`].
///
/// # Errors
/// Returns [`MathError::InvalidFee`] when `fee_bps` reaches 100%.
pub fn amount_out_with_fee(
    amount_in: TokenAmount,
    reserve_in: TokenAmount,
    reserve_out: TokenAmount,
    fee_bps: u32,
) -> Result<TokenAmount, MathError> {
    if fee_bps >= BPS {
        return Err(MathError::InvalidFee(fee_bps));
    }
    if fee_bps == 0 {
        return amount_out(amount_in, reserve_in, reserve_out);
    }
    if reserve_in.is_zero() || reserve_out.is_zero() {
        return Err(MathError::EmptyReserves);
    }

    let scale = U256::from(BPS);
    let effective_in = amount_in
        .0
        .checked_mul(U256::from(BPS - fee_bps))
        .ok_or(MathError::Overflow)?;
    let scaled_reserve_in = reserve_in.0.checked_mul(scale).ok_or(MathError::Overflow)?;
    let numerator = effective_in
        .checked_mul(reserve_out.0)
        .ok_or(MathError::Overflow)?;
    let denominator = scaled_reserve_in
        .checked_add(effective_in)
        .ok_or(MathError::Overflow)?;

    Ok(TokenAmount(numerator / denominator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_out_reference_pool() {
        // k = 1000 * 2000 = 2,000,000
        // k / (1000 + 100) = 1818.18 -> 1818
        // out = 2000 - 1818 = 182
        let out = amount_out(
            TokenAmount::from(100u64),
            TokenAmount::from(1000u64),
            TokenAmount::from(2000u64),
        )
        .unwrap();
        assert_eq!(out, TokenAmount::from(182u64));
    }

    #[test]
    fn test_amount_out_preserves_k() {
        let r_in = TokenAmount::from(1000u64);
        let r_out = TokenAmount::from(2000u64);
        let dx = TokenAmount::from(100u64);
        let dy = amount_out(dx, r_in, r_out).unwrap();
        let k_before = r_in.0 * r_out.0;
        let k_after = (r_in.0 + dx.0) * (r_out.0 - dy.0);
        assert!(k_after >= k_before);
    }

    #[test]
    fn test_amount_out_empty_reserves() {
        assert_eq!(
            amount_out(
                TokenAmount::from(1u64),
                TokenAmount::zero(),
                TokenAmount::from(5u64)
            ),
            Err(MathError::EmptyReserves)
        );
    }

    #[test]
    fn test_amount_out_with_fee() {
        // 30 bps on 10 in: effective 10 * 9970 = 99,700 (scaled by 10,000)
        // 99,700 * 1000 / (1000 * 10,000 + 99,700) = 9.87 -> 9
        let out = amount_out_with_fee(
            TokenAmount::from(10u64),
            TokenAmount::from(1000u64),
            TokenAmount::from(1000u64),
            30,
        )
        .unwrap();
        assert_eq!(out, TokenAmount::from(9u64));
    }

    #[test]
    fn test_fee_lowers_output() {
        let r_in = TokenAmount::from(1000u64);
        let r_out = TokenAmount::from(2000u64);
        let dx = TokenAmount::from(100u64);
        // 100 * 9970 * 2000 / (10,000,000 + 997,000) = 181.3 -> 181
        assert_eq!(
            amount_out_with_fee(dx, r_in, r_out, 30).unwrap(),
            TokenAmount::from(181u64)
        );
        assert_eq!(
            amount_out_with_fee(dx, r_in, r_out, 0).unwrap(),
            amount_out(dx, r_in, r_out).unwrap()
        );
    }

    #[test]
    fn test_fee_of_whole_input_is_rejected() {
        let one = TokenAmount::from(1u64);
        assert_eq!(
            amount_out_with_fee(one, one, one, BPS),
            Err(MathError::InvalidFee(BPS))
        );
    }

    #[test]
    fn test_amount_out_overflow() {
        let huge = TokenAmount(U256::MAX);
        assert_eq!(
            amount_out(TokenAmount::from(1u64), huge, huge),
            Err(MathError::Overflow)
        );
    }
}
