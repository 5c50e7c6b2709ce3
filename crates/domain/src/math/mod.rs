/// Constant-product (x * y = k) swap formulas.
pub mod constant_product;
/// Liquidity share accounting.
pub mod shares;
