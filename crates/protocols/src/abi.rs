//! Solidity interfaces of the pool and its ERC-20 tokens.
//!
//! Calldata and return values are encoded by the `sol!` bindings; this module
//! only adds the 256-bit conversions between the domain amounts and the ABI
//! words.

use alloy::primitives::U256 as Word;
use alloy::sol;
use dex_domain::token::TokenAmount;
use primitive_types::U256;

/// Four-byte function selector.
pub type Selector = [u8; 4];

sol! {
    /// SimpleDEX constant-product pool over two ERC-20 tokens.
    interface ISimpleDex {
        function tokenA() external view returns (address);
        function tokenB() external view returns (address);
        function reserveA() external view returns (uint256);
        function reserveB() external view returns (uint256);
        function liquidity(address provider) external view returns (uint256);
        function totalLiquidity() external view returns (uint256);
        function getQuoteAToB(uint256 amountIn) external view returns (uint256);
        function getQuoteBToA(uint256 amountIn) external view returns (uint256);

        function addLiquidity(
            uint256 amountADesired,
            uint256 amountBDesired,
            uint256 amountAMin,
            uint256 amountBMin
        ) external returns (uint256);
        function removeLiquidity(
            uint256 shares,
            uint256 amountAMin,
            uint256 amountBMin
        ) external returns (uint256, uint256);
        function swapAForB(uint256 amountIn, uint256 minAmountOut) external returns (uint256);
        function swapBForA(uint256 amountIn, uint256 minAmountOut) external returns (uint256);
    }

    /// The ERC-20 subset the client reads and approves through.
    interface IERC20 {
        function balanceOf(address owner) external view returns (uint256);
        function symbol() external view returns (string);
        function decimals() external view returns (uint8);
        function allowance(address owner, address spender) external view returns (uint256);
        function approve(address spender, uint256 amount) external returns (bool);
    }

    /// Pre-standard tokens that return their symbol as `bytes32`.
    interface IERC20Bytes32 {
        function symbol() external view returns (bytes32);
    }
}

/// ABI word of a domain amount.
#[must_use]
pub fn to_word(amount: TokenAmount) -> Word {
    Word::from_be_bytes(amount.0.to_big_endian())
}

/// Domain amount of an ABI word.
#[must_use]
pub fn from_word(word: Word) -> TokenAmount {
    TokenAmount(U256::from_big_endian(&word.to_be_bytes::<32>()))
}
