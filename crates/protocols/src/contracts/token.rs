use crate::abi::{IERC20, IERC20Bytes32, from_word, to_word};
use crate::chain::{ChainReader, ContractCall};
use crate::error::ChainError;
use alloy::primitives::Bytes;
use alloy::sol_types::SolCall;
use dex_domain::address::Address;
use dex_domain::token::{Token, TokenAmount};
use std::sync::Arc;

/// Handle on an ERC-20 token.
#[derive(Clone)]
pub struct TokenContract {
    address: Address,
    reader: Arc<dyn ChainReader>,
}

impl TokenContract {
    /// Creates a handle reading through `reader`.
    pub fn new(address: Address, reader: Arc<dyn ChainReader>) -> Self {
        Self { address, reader }
    }

    #[must_use]
    pub fn address(&self) -> Address {
        self.address
    }

    async fn raw<C: SolCall + Send>(
        &self,
        call: C,
    ) -> Result<(&'static str, Bytes), ChainError> {
        let request = ContractCall::encode(self.address, &call);
        let data = self.reader.call(&request).await?;
        Ok((request.label, data))
    }

    async fn read<C: SolCall + Send>(&self, call: C) -> Result<C::Return, ChainError> {
        let (label, data) = self.raw(call).await?;
        C::abi_decode_returns(&data).map_err(|source| ChainError::Abi { label, source })
    }

    pub async fn balance_of(&self, owner: Address) -> Result<TokenAmount, ChainError> {
        self.read(IERC20::balanceOfCall { owner })
            .await
            .map(from_word)
    }

    /// Token symbol; `bytes32` symbols are read up to the first zero byte.
    pub async fn symbol(&self) -> Result<String, ChainError> {
        let (label, data) = self.raw(IERC20::symbolCall {}).await?;
        let source = match IERC20::symbolCall::abi_decode_returns(&data) {
            Ok(symbol) => return Ok(symbol),
            Err(source) => source,
        };
        IERC20Bytes32::symbolCall::abi_decode_returns(&data)
            .ok()
            .and_then(|word| {
                let end = word.iter().position(|b| *b == 0).unwrap_or(word.len());
                String::from_utf8(word[..end].to_vec()).ok()
            })
            .ok_or(ChainError::Abi { label, source })
    }

    pub async fn decimals(&self) -> Result<u8, ChainError> {
        self.read(IERC20::decimalsCall {}).await
    }

    /// Amount `spender` may still pull from `owner`.
    pub async fn allowance(
        &self,
        owner: Address,
        spender: Address,
    ) -> Result<TokenAmount, ChainError> {
        self.read(IERC20::allowanceCall { owner, spender })
            .await
            .map(from_word)
    }

    /// Reads symbol and decimals concurrently.
    pub async fn metadata(&self) -> Result<Token, ChainError> {
        let (symbol, decimals) = tokio::try_join!(self.symbol(), self.decimals())?;
        Ok(Token::new(self.address, symbol, decimals))
    }

    /// `approve(spender, amount)`.
    #[must_use]
    pub fn approve_call(&self, spender: Address, amount: TokenAmount) -> ContractCall {
        ContractCall::encode(
            self.address,
            &IERC20::approveCall {
                spender,
                amount: to_word(amount),
            },
        )
    }
}
