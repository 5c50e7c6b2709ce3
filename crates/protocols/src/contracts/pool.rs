use crate::abi::{ISimpleDex, from_word, to_word};
use crate::chain::{ChainReader, ContractCall};
use crate::error::ChainError;
use alloy::sol_types::SolCall;
use dex_domain::address::Address;
use dex_domain::pool::SwapDirection;
use dex_domain::token::TokenAmount;
use std::sync::Arc;
use tracing::debug;

/// Handle on a deployed SimpleDEX pool.
#[derive(Clone)]
pub struct PoolContract {
    address: Address,
    reader: Arc<dyn ChainReader>,
}

impl PoolContract {
    /// Creates a handle reading through `reader`.
    pub fn new(address: Address, reader: Arc<dyn ChainReader>) -> Self {
        Self { address, reader }
    }

    /// Pool contract address.
    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    async fn read<C: SolCall + Send>(&self, call: C) -> Result<C::Return, ChainError> {
        let request = ContractCall::encode(self.address, &call);
        debug!(pool = %self.address, method = request.label, "Reading pool");
        let data = self.reader.call(&request).await?;
        C::abi_decode_returns(&data).map_err(|source| ChainError::Abi {
            label: request.label,
            source,
        })
    }

    /// Address of token A.
    pub async fn token_a(&self) -> Result<Address, ChainError> {
        self.read(ISimpleDex::tokenACall {}).await
    }

    /// Address of token B.
    pub async fn token_b(&self) -> Result<Address, ChainError> {
        self.read(ISimpleDex::tokenBCall {}).await
    }

    /// Pool balance of token A.
    pub async fn reserve_a(&self) -> Result<TokenAmount, ChainError> {
        self.read(ISimpleDex::reserveACall {}).await.map(from_word)
    }

    /// Pool balance of token B.
    pub async fn reserve_b(&self) -> Result<TokenAmount, ChainError> {
        self.read(ISimpleDex::reserveBCall {}).await.map(from_word)
    }

    /// Liquidity shares held by `owner`.
    pub async fn liquidity_of(&self, owner: Address) -> Result<TokenAmount, ChainError> {
        self.read(ISimpleDex::liquidityCall { provider: owner })
            .await
            .map(from_word)
    }

    /// Outstanding liquidity shares.
    pub async fn total_liquidity(&self) -> Result<TokenAmount, ChainError> {
        self.read(ISimpleDex::totalLiquidityCall {})
            .await
            .map(from_word)
    }

    /// Output amount the pool quotes for `amount_in` in `direction`.
    pub async fn quote(
        &self,
        direction: SwapDirection,
        amount_in: TokenAmount,
    ) -> Result<TokenAmount, ChainError> {
        let amount_in = to_word(amount_in);
        let out = match direction {
            SwapDirection::AToB => {
                self.read(ISimpleDex::getQuoteAToBCall { amountIn: amount_in })
                    .await?
            }
            SwapDirection::BToA => {
                self.read(ISimpleDex::getQuoteBToACall { amountIn: amount_in })
                    .await?
            }
        };
        Ok(from_word(out))
    }

    /// `addLiquidity(desiredA, desiredB, minA, minB)`.
    #[must_use]
    pub fn add_liquidity_call(
        &self,
        desired_a: TokenAmount,
        desired_b: TokenAmount,
        min_a: TokenAmount,
        min_b: TokenAmount,
    ) -> ContractCall {
        ContractCall::encode(
            self.address,
            &ISimpleDex::addLiquidityCall {
                amountADesired: to_word(desired_a),
                amountBDesired: to_word(desired_b),
                amountAMin: to_word(min_a),
                amountBMin: to_word(min_b),
            },
        )
    }

    /// `removeLiquidity(shares, minA, minB)`.
    #[must_use]
    pub fn remove_liquidity_call(
        &self,
        shares: TokenAmount,
        min_a: TokenAmount,
        min_b: TokenAmount,
    ) -> ContractCall {
        ContractCall::encode(
            self.address,
            &ISimpleDex::removeLiquidityCall {
                shares: to_word(shares),
                amountAMin: to_word(min_a),
                amountBMin: to_word(min_b),
            },
        )
    }

    /// `swapAForB` / `swapBForA(amountIn, minAmountOut)`.
    #[must_use]
    pub fn swap_call(
        &self,
        direction: SwapDirection,
        amount_in: TokenAmount,
        minimum_out: TokenAmount,
    ) -> ContractCall {
        let amount_in = to_word(amount_in);
        let min_amount_out = to_word(minimum_out);
        match direction {
            SwapDirection::AToB => ContractCall::encode(
                self.address,
                &ISimpleDex::swapAForBCall {
                    amountIn: amount_in,
                    minAmountOut: min_amount_out,
                },
            ),
            SwapDirection::BToA => ContractCall::encode(
                self.address,
                &ISimpleDex::swapBForACall {
                    amountIn: amount_in,
                    minAmountOut: min_amount_out,
                },
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::{Bytes, U256};
    use alloy::sol_types::SolValue;
    use async_trait::async_trait;
    use dex_domain::address::from_index;

    struct FixedReader(Bytes);

    #[async_trait]
    impl ChainReader for FixedReader {
        async fn call(&self, _call: &ContractCall) -> Result<Bytes, ChainError> {
            Ok(self.0.clone())
        }
    }

    fn contract(ret: Vec<u8>) -> PoolContract {
        PoolContract::new(from_index(7), Arc::new(FixedReader(ret.into())))
    }

    #[test]
    fn test_swap_call_encoding() {
        let dex = contract(Vec::new());
        let call = dex.swap_call(
            SwapDirection::BToA,
            TokenAmount::from(100u64),
            TokenAmount::from(90u64),
        );
        assert_eq!(call.to, from_index(7));
        assert_eq!(call.label, "swapBForA");

        let decoded = ISimpleDex::swapBForACall::abi_decode(&call.data).unwrap();
        assert_eq!(decoded.amountIn, U256::from(100u64));
        assert_eq!(decoded.minAmountOut, U256::from(90u64));
    }

    #[test]
    fn test_add_liquidity_call_keeps_argument_order() {
        let dex = contract(Vec::new());
        let call = dex.add_liquidity_call(
            TokenAmount::from(1u64),
            TokenAmount::from(2u64),
            TokenAmount::from(3u64),
            TokenAmount::from(4u64),
        );
        assert_eq!(call.data.len(), 4 + 4 * 32);
        let decoded = ISimpleDex::addLiquidityCall::abi_decode(&call.data).unwrap();
        assert_eq!(decoded.amountAMin, U256::from(3u64));
        assert_eq!(decoded.amountBMin, U256::from(4u64));
    }

    #[tokio::test]
    async fn test_reads_decode_words() {
        let dex = contract(U256::from(5000u64).abi_encode());
        assert_eq!(dex.reserve_a().await.unwrap(), TokenAmount::from(5000u64));

        let addr = from_index(99);
        let dex = contract(addr.abi_encode());
        assert_eq!(dex.token_b().await.unwrap(), addr);
    }

    #[tokio::test]
    async fn test_short_return_is_an_error() {
        let dex = contract(vec![0u8; 4]);
        assert!(matches!(
            dex.total_liquidity().await,
            Err(ChainError::Abi { label: "totalLiquidity", .. })
        ));
    }
}
