//! In-memory chain hosting ERC-20 tokens and one SimpleDEX pool.
//!
//! Calldata is decoded with the same `sol!` bindings the contract handles
//! encode with, so everything above the [`ChainReader`] / [`Wallet`] seam is
//! exercised unchanged. Writes apply to a copy of the state that is committed
//! only if execution succeeds; a reverted transaction is still mined.
//!
//! The pool follows the documented constant-product formula. A swap fee can be
//! configured with [`SimulatedChain::set_pool_fee`].

use crate::abi::IERC20::IERC20Calls as TokenCall;
use crate::abi::ISimpleDex::ISimpleDexCalls as PoolCall;
use crate::abi::{Selector, from_word, to_word};
use crate::chain::{ChainReader, ContractCall, TransactionReceipt, Wallet};
use crate::error::ChainError;
use alloy::primitives::{B256, Bytes};
use alloy::sol_types::{SolCall, SolInterface, SolType, SolValue, sol_data};
use async_trait::async_trait;
use dex_domain::address::{self, Address};
use dex_domain::error::MathError;
use dex_domain::math::{constant_product, shares};
use dex_domain::pool::{PoolState, SwapDirection};
use dex_domain::token::TokenAmount;
use primitive_types::U256;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::debug;

const GAS_PER_TX: u64 = 21_000;

#[derive(Debug, Clone, Default)]
struct SimToken {
    symbol: String,
    decimals: u8,
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
}

impl SimToken {
    fn balance(&self, owner: &Address) -> U256 {
        self.balances.get(owner).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: &Address, spender: &Address) -> U256 {
        self.allowances
            .get(&(*owner, *spender))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(&mut self, from: Address, to: Address, amount: U256) -> Result<(), String> {
        let from_balance = self.balance(&from);
        if from_balance < amount {
            return Err(format!("{}: transfer amount exceeds balance", self.symbol));
        }
        self.balances.insert(from, from_balance - amount);
        let to_balance = self.balance(&to);
        self.balances.insert(to, to_balance + amount);
        Ok(())
    }

    fn transfer_from(
        &mut self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), String> {
        let allowed = self.allowance(&from, &spender);
        if allowed < amount {
            return Err(format!("{}: insufficient allowance", self.symbol));
        }
        self.transfer(from, to, amount)?;
        self.allowances.insert((from, spender), allowed - amount);
        Ok(())
    }
}

#[derive(Debug, Clone)]
struct SimPool {
    address: Address,
    token_a: Address,
    token_b: Address,
    reserve_a: U256,
    reserve_b: U256,
    total_liquidity: U256,
    shares: HashMap<Address, U256>,
    fee_bps: u32,
}

impl SimPool {
    fn state(&self) -> PoolState {
        PoolState {
            reserve_a: TokenAmount(self.reserve_a),
            reserve_b: TokenAmount(self.reserve_b),
            total_liquidity: TokenAmount(self.total_liquidity),
        }
    }

    fn shares_of(&self, owner: &Address) -> U256 {
        self.shares.get(owner).copied().unwrap_or_default()
    }

    fn quote(&self, direction: SwapDirection, amount_in: U256) -> Result<U256, String> {
        let (reserve_in, reserve_out) = self.state().reserves_for(direction);
        constant_product::amount_out_with_fee(
            TokenAmount(amount_in),
            reserve_in,
            reserve_out,
            self.fee_bps,
        )
        .map(|amount| amount.0)
        .map_err(math_reason)
    }
}

fn math_reason(error: MathError) -> String {
    match error {
        MathError::EmptyReserves => "insufficient reserves".to_string(),
        other => other.to_string(),
    }
}

#[derive(Debug, Clone, Default)]
struct ChainState {
    tokens: HashMap<Address, SimToken>,
    pool: Option<SimPool>,
    block_number: u64,
    tx_count: u64,
    next_contract: u64,
    failing_reads: HashSet<Selector>,
    failing_writes: HashSet<Selector>,
    failing_contract_writes: HashSet<(Address, Selector)>,
}

impl ChainState {
    fn token(&self, address: &Address) -> Result<&SimToken, String> {
        self.tokens
            .get(address)
            .ok_or_else(|| format!("no token at {address}"))
    }

    fn token_mut(&mut self, address: &Address) -> Result<&mut SimToken, String> {
        self.tokens
            .get_mut(address)
            .ok_or_else(|| format!("no token at {address}"))
    }

    fn pool_at(&self, address: &Address) -> Option<&SimPool> {
        self.pool.as_ref().filter(|p| p.address == *address)
    }

    fn read(&self, to: &Address, data: &[u8]) -> Result<Vec<u8>, String> {
        if let Some(p) = self.pool_at(to) {
            let value = match PoolCall::abi_decode(data).map_err(|e| e.to_string())? {
                PoolCall::tokenA(_) => return Ok(p.token_a.abi_encode()),
                PoolCall::tokenB(_) => return Ok(p.token_b.abi_encode()),
                PoolCall::reserveA(_) => p.reserve_a,
                PoolCall::reserveB(_) => p.reserve_b,
                PoolCall::totalLiquidity(_) => p.total_liquidity,
                PoolCall::liquidity(c) => p.shares_of(&c.provider),
                PoolCall::getQuoteAToB(c) => {
                    p.quote(SwapDirection::AToB, from_word(c.amountIn).0)?
                }
                PoolCall::getQuoteBToA(c) => {
                    p.quote(SwapDirection::BToA, from_word(c.amountIn).0)?
                }
                _ => return Err("not a view function".to_string()),
            };
            return Ok(word(value));
        }

        let token = self.token(to)?;
        match TokenCall::abi_decode(data).map_err(|e| e.to_string())? {
            TokenCall::symbol(_) => Ok(token.symbol.abi_encode()),
            TokenCall::decimals(_) => Ok(<sol_data::Uint<8> as SolType>::abi_encode(&token.decimals)),
            TokenCall::balanceOf(c) => Ok(word(token.balance(&c.owner))),
            TokenCall::allowance(c) => Ok(word(token.allowance(&c.owner, &c.spender))),
            TokenCall::approve(_) => Err("not a view function".to_string()),
        }
    }

    fn execute(&mut self, from: Address, to: &Address, data: &[u8]) -> Result<(), String> {
        if self.pool_at(to).is_some() {
            return match PoolCall::abi_decode(data).map_err(|e| e.to_string())? {
                PoolCall::swapAForB(c) => self.swap(
                    from,
                    SwapDirection::AToB,
                    from_word(c.amountIn).0,
                    from_word(c.minAmountOut).0,
                ),
                PoolCall::swapBForA(c) => self.swap(
                    from,
                    SwapDirection::BToA,
                    from_word(c.amountIn).0,
                    from_word(c.minAmountOut).0,
                ),
                PoolCall::addLiquidity(c) => self.add_liquidity(
                    from,
                    from_word(c.amountADesired),
                    from_word(c.amountBDesired),
                    from_word(c.amountAMin),
                    from_word(c.amountBMin),
                ),
                PoolCall::removeLiquidity(c) => self.remove_liquidity(
                    from,
                    from_word(c.shares),
                    from_word(c.amountAMin),
                    from_word(c.amountBMin),
                ),
                _ => Err("not a state-changing function".to_string()),
            };
        }

        match TokenCall::abi_decode(data).map_err(|e| e.to_string())? {
            TokenCall::approve(c) => {
                let amount = from_word(c.amount).0;
                self.token_mut(to)?
                    .allowances
                    .insert((from, c.spender), amount);
                Ok(())
            }
            _ => Err("not a state-changing function".to_string()),
        }
    }

    fn pool_mut(&mut self) -> Result<&mut SimPool, String> {
        self.pool.as_mut().ok_or_else(|| "no pool deployed".to_string())
    }

    fn swap(
        &mut self,
        from: Address,
        direction: SwapDirection,
        amount_in: U256,
        minimum_out: U256,
    ) -> Result<(), String> {
        let p = self.pool_mut()?.clone();

        if amount_in.is_zero() {
            return Err("amount in must be positive".to_string());
        }
        let amount_out = p.quote(direction, amount_in)?;
        if amount_out < minimum_out {
            return Err("slippage: output below minimum".to_string());
        }

        let (token_in, token_out) = match direction {
            SwapDirection::AToB => (p.token_a, p.token_b),
            SwapDirection::BToA => (p.token_b, p.token_a),
        };
        self.token_mut(&token_in)?
            .transfer_from(p.address, from, p.address, amount_in)?;
        self.token_mut(&token_out)?
            .transfer(p.address, from, amount_out)?;

        let pool = self.pool_mut()?;
        match direction {
            SwapDirection::AToB => {
                pool.reserve_a += amount_in;
                pool.reserve_b -= amount_out;
            }
            SwapDirection::BToA => {
                pool.reserve_b += amount_in;
                pool.reserve_a -= amount_out;
            }
        }
        Ok(())
    }

    fn add_liquidity(
        &mut self,
        from: Address,
        desired_a: TokenAmount,
        desired_b: TokenAmount,
        min_a: TokenAmount,
        min_b: TokenAmount,
    ) -> Result<(), String> {
        let p = self.pool_mut()?.clone();
        let state = p.state();

        let (amount_a, amount_b) = if state.total_liquidity.is_zero() {
            (desired_a, desired_b)
        } else {
            let optimal_b = shares::paired_amount(desired_a, state.reserve_a, state.reserve_b)
                .map_err(math_reason)?;
            if optimal_b <= desired_b {
                if optimal_b < min_b {
                    return Err("insufficient B amount".to_string());
                }
                (desired_a, optimal_b)
            } else {
                let optimal_a =
                    shares::paired_amount(desired_b, state.reserve_b, state.reserve_a)
                        .map_err(math_reason)?;
                if optimal_a < min_a {
                    return Err("insufficient A amount".to_string());
                }
                (optimal_a, desired_b)
            }
        };

        let minted = shares::minted(amount_a, amount_b, &state).map_err(math_reason)?;
        if minted.is_zero() {
            return Err("insufficient liquidity minted".to_string());
        }

        self.token_mut(&p.token_a)?
            .transfer_from(p.address, from, p.address, amount_a.0)?;
        self.token_mut(&p.token_b)?
            .transfer_from(p.address, from, p.address, amount_b.0)?;

        let pool = self.pool_mut()?;
        pool.reserve_a += amount_a.0;
        pool.reserve_b += amount_b.0;
        pool.total_liquidity += minted.0;
        let held = pool.shares_of(&from);
        pool.shares.insert(from, held + minted.0);
        Ok(())
    }

    fn remove_liquidity(
        &mut self,
        from: Address,
        burned: TokenAmount,
        min_a: TokenAmount,
        min_b: TokenAmount,
    ) -> Result<(), String> {
        let p = self.pool_mut()?.clone();

        let held = p.shares_of(&from);
        if burned.is_zero() || held < burned.0 {
            return Err("insufficient liquidity".to_string());
        }
        let state = p.state();
        let amount_a = shares::redeemable(state.reserve_a, burned, state.total_liquidity)
            .map_err(math_reason)?;
        let amount_b = shares::redeemable(state.reserve_b, burned, state.total_liquidity)
            .map_err(math_reason)?;
        if amount_a < min_a || amount_b < min_b {
            return Err("slippage: redeemed amounts below minimum".to_string());
        }

        self.token_mut(&p.token_a)?
            .transfer(p.address, from, amount_a.0)?;
        self.token_mut(&p.token_b)?
            .transfer(p.address, from, amount_b.0)?;

        let pool = self.pool_mut()?;
        pool.reserve_a -= amount_a.0;
        pool.reserve_b -= amount_b.0;
        pool.total_liquidity -= burned.0;
        pool.shares.insert(from, held - burned.0);
        Ok(())
    }
}

fn word(value: U256) -> Vec<u8> {
    to_word(TokenAmount(value)).abi_encode()
}

/// In-memory chain. Share it behind an [`Arc`] between readers and wallets.
#[derive(Debug, Default)]
pub struct SimulatedChain {
    state: Mutex<ChainState>,
}

impl SimulatedChain {
    /// Creates an empty chain.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, ChainState> {
        // State is only mutated through whole-copy commits, so a poisoned
        // lock still holds consistent data.
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn next_address(state: &mut ChainState) -> Address {
        state.next_contract += 1;
        address::from_index(0x1000 + state.next_contract)
    }

    /// Deploys an ERC-20 token and returns its address.
    pub fn deploy_token(&self, symbol: &str, decimals: u8) -> Address {
        let mut state = self.lock();
        let address = Self::next_address(&mut state);
        state.tokens.insert(
            address,
            SimToken {
                symbol: symbol.to_string(),
                decimals,
                ..SimToken::default()
            },
        );
        address
    }

    /// Deploys the pool over two existing tokens and returns its address.
    pub fn deploy_pool(&self, token_a: Address, token_b: Address) -> Address {
        let mut state = self.lock();
        let address = Self::next_address(&mut state);
        state.pool = Some(SimPool {
            address,
            token_a,
            token_b,
            reserve_a: U256::zero(),
            reserve_b: U256::zero(),
            total_liquidity: U256::zero(),
            shares: HashMap::new(),
            fee_bps: 0,
        });
        address
    }

    /// Charges `fee_bps` on swap inputs from now on.
    pub fn set_pool_fee(&self, fee_bps: u32) {
        if let Some(pool) = self.lock().pool.as_mut() {
            pool.fee_bps = fee_bps;
        }
    }

    /// Credits `amount` of `token` to `to`.
    pub fn mint(&self, token: Address, to: Address, amount: TokenAmount) {
        let mut state = self.lock();
        if let Some(token) = state.tokens.get_mut(&token) {
            let balance = token.balance(&to);
            token.balances.insert(to, balance + amount.0);
        }
    }

    /// Seeds pool reserves on behalf of `provider` without approvals.
    ///
    /// Shares are minted with the regular deposit formula.
    pub fn seed_pool(&self, provider: Address, amount_a: TokenAmount, amount_b: TokenAmount) {
        let mut state = self.lock();
        let Some(pool) = state.pool.as_mut() else {
            return;
        };
        let minted = shares::minted(amount_a, amount_b, &pool.state()).unwrap_or_default();
        pool.reserve_a += amount_a.0;
        pool.reserve_b += amount_b.0;
        pool.total_liquidity += minted.0;
        let held = pool.shares_of(&provider);
        pool.shares.insert(provider, held + minted.0);
        let (pool_address, token_a, token_b) = (pool.address, pool.token_a, pool.token_b);

        for (token, amount) in [(token_a, amount_a), (token_b, amount_b)] {
            if let Some(token) = state.tokens.get_mut(&token) {
                let balance = token.balance(&pool_address);
                token.balances.insert(pool_address, balance + amount.0);
            }
        }
    }

    /// Current pool state, if a pool is deployed.
    pub fn pool_state(&self) -> Option<PoolState> {
        self.lock().pool.as_ref().map(SimPool::state)
    }

    /// Liquidity shares held by `owner`.
    pub fn shares_of(&self, owner: Address) -> TokenAmount {
        self.lock()
            .pool
            .as_ref()
            .map(|p| TokenAmount(p.shares_of(&owner)))
            .unwrap_or_default()
    }

    /// Balance of `owner` in `token`.
    pub fn balance_of(&self, token: Address, owner: Address) -> TokenAmount {
        self.lock()
            .tokens
            .get(&token)
            .map(|t| TokenAmount(t.balance(&owner)))
            .unwrap_or_default()
    }

    /// Allowance granted by `owner` to `spender` in `token`.
    pub fn allowance(&self, token: Address, owner: Address, spender: Address) -> TokenAmount {
        self.lock()
            .tokens
            .get(&token)
            .map(|t| TokenAmount(t.allowance(&owner, &spender)))
            .unwrap_or_default()
    }

    /// Makes every read of `C` fail until cleared.
    pub fn fail_reads<C: SolCall>(&self) {
        self.lock().failing_reads.insert(C::SELECTOR);
    }

    /// Makes every transaction calling `C` revert until cleared.
    pub fn fail_writes<C: SolCall>(&self) {
        self.lock().failing_writes.insert(C::SELECTOR);
    }

    /// Makes transactions calling `C` on `contract` revert until cleared.
    pub fn fail_writes_to<C: SolCall>(&self, contract: Address) {
        self.lock()
            .failing_contract_writes
            .insert((contract, C::SELECTOR));
    }

    /// Removes all injected failures.
    pub fn clear_failures(&self) {
        let mut state = self.lock();
        state.failing_reads.clear();
        state.failing_writes.clear();
        state.failing_contract_writes.clear();
    }

    /// Number of mined transactions, reverted ones included.
    pub fn transaction_count(&self) -> u64 {
        self.lock().tx_count
    }

    /// A wallet sending from `account` on this chain.
    pub fn wallet(self: &Arc<Self>, account: Address) -> SimulatedWallet {
        SimulatedWallet {
            chain: Arc::clone(self),
            account: Some(account),
        }
    }

    /// A wallet with no connected account.
    pub fn disconnected_wallet(self: &Arc<Self>) -> SimulatedWallet {
        SimulatedWallet {
            chain: Arc::clone(self),
            account: None,
        }
    }

    fn transact(&self, from: Address, call: &ContractCall) -> TransactionReceipt {
        let mut state = self.lock();
        state.tx_count += 1;
        state.block_number += 1;
        let tx_hash = B256::left_padding_from(&state.tx_count.to_be_bytes());
        let block_number = state.block_number;

        let injected = call.selector().is_some_and(|selector| {
            state.failing_writes.contains(&selector)
                || state.failing_contract_writes.contains(&(call.to, selector))
        });
        let outcome = if injected {
            Err("injected failure".to_string())
        } else {
            let mut next = ChainState::clone(&state);
            next.execute(from, &call.to, &call.data).map(|()| next)
        };

        let success = match outcome {
            Ok(next) => {
                *state = next;
                true
            }
            Err(reason) => {
                debug!(tx_hash = %tx_hash, method = call.label, reason = %reason, "Simulated revert");
                false
            }
        };

        TransactionReceipt {
            tx_hash,
            block_number,
            success,
            gas_used: GAS_PER_TX,
        }
    }
}

#[async_trait]
impl ChainReader for SimulatedChain {
    async fn call(&self, call: &ContractCall) -> Result<Bytes, ChainError> {
        let state = self.lock();
        let injected = call
            .selector()
            .is_some_and(|selector| state.failing_reads.contains(&selector));
        let result = if injected {
            Err("injected failure".to_string())
        } else {
            state.read(&call.to, &call.data)
        };
        result.map(Bytes::from).map_err(|reason| ChainError::CallFailed {
            to: call.to,
            label: call.label,
            reason,
        })
    }
}

/// Wallet submitting transactions to a [`SimulatedChain`].
#[derive(Debug, Clone)]
pub struct SimulatedWallet {
    chain: Arc<SimulatedChain>,
    account: Option<Address>,
}

#[async_trait]
impl Wallet for SimulatedWallet {
    fn account(&self) -> Option<Address> {
        self.account
    }

    async fn submit(&self, call: ContractCall) -> Result<TransactionReceipt, ChainError> {
        let from = self.account.ok_or(ChainError::NoAccount)?;
        let receipt = self.chain.transact(from, &call);
        if !receipt.success {
            return Err(ChainError::Reverted {
                label: call.label,
                tx_hash: receipt.tx_hash,
                reason: "execution reverted".to_string(),
            });
        }
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::abi::{IERC20, ISimpleDex};
    use crate::contracts::{PoolContract, TokenContract};

    struct Fixture {
        chain: Arc<SimulatedChain>,
        pool: PoolContract,
        token_a: TokenContract,
        user: Address,
    }

    fn fixture() -> Fixture {
        let chain = Arc::new(SimulatedChain::new());
        let token_a = chain.deploy_token("WETH", 18);
        let token_b = chain.deploy_token("ABC", 18);
        let pool = chain.deploy_pool(token_a, token_b);
        chain.seed_pool(
            address::from_index(1),
            TokenAmount::from(1000u64),
            TokenAmount::from(2000u64),
        );
        let user = address::from_index(2);
        chain.mint(token_a, user, TokenAmount::from(500u64));
        chain.mint(token_b, user, TokenAmount::from(500u64));
        let reader: Arc<dyn ChainReader> = chain.clone();
        Fixture {
            pool: PoolContract::new(pool, reader.clone()),
            token_a: TokenContract::new(token_a, reader),
            chain,
            user,
        }
    }

    #[tokio::test]
    async fn test_reads_through_abi() {
        let f = fixture();
        assert_eq!(f.pool.reserve_a().await.unwrap(), TokenAmount::from(1000u64));
        assert_eq!(f.pool.reserve_b().await.unwrap(), TokenAmount::from(2000u64));
        // isqrt(1000 * 2000) = 1414
        assert_eq!(
            f.pool.total_liquidity().await.unwrap(),
            TokenAmount::from(1414u64)
        );
        let meta = f.token_a.metadata().await.unwrap();
        assert_eq!(meta.symbol, "WETH");
        assert_eq!(meta.decimals, 18);
        assert_eq!(f.pool.token_a().await.unwrap(), f.token_a.address());
    }

    #[tokio::test]
    async fn test_quote_matches_formula() {
        let f = fixture();
        let out = f
            .pool
            .quote(SwapDirection::AToB, TokenAmount::from(100u64))
            .await
            .unwrap();
        assert_eq!(out, TokenAmount::from(182u64));
    }

    #[tokio::test]
    async fn test_pool_fee_applies_to_quotes_and_swaps() {
        let f = fixture();
        f.chain.set_pool_fee(30);
        // 99.7 effective in: 99.7 * 2000 / 1099.7 = 181.3
        let out = f
            .pool
            .quote(SwapDirection::AToB, TokenAmount::from(100u64))
            .await
            .unwrap();
        assert_eq!(out, TokenAmount::from(181u64));

        let wallet = f.chain.wallet(f.user);
        wallet
            .submit(f.token_a.approve_call(f.pool.address(), TokenAmount::from(100u64)))
            .await
            .unwrap();
        wallet
            .submit(f.pool.swap_call(SwapDirection::AToB, TokenAmount::from(100u64), out))
            .await
            .unwrap();
        let state = f.chain.pool_state().unwrap();
        assert_eq!(state.reserve_a, TokenAmount::from(1100u64));
        assert_eq!(state.reserve_b, TokenAmount::from(1819u64));
    }

    #[tokio::test]
    async fn test_whole_input_fee_makes_quotes_fail() {
        let f = fixture();
        f.chain.set_pool_fee(10_000);
        assert!(matches!(
            f.pool
                .quote(SwapDirection::AToB, TokenAmount::from(100u64))
                .await,
            Err(ChainError::CallFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_quote_on_empty_pool_fails() {
        let chain = Arc::new(SimulatedChain::new());
        let a = chain.deploy_token("A", 18);
        let b = chain.deploy_token("B", 18);
        let pool = PoolContract::new(chain.deploy_pool(a, b), chain.clone());
        assert!(matches!(
            pool.quote(SwapDirection::AToB, TokenAmount::from(1u64)).await,
            Err(ChainError::CallFailed { .. })
        ));
    }

    #[tokio::test]
    async fn test_swap_requires_allowance() {
        let f = fixture();
        let wallet = f.chain.wallet(f.user);
        let swap = f.pool.swap_call(
            SwapDirection::AToB,
            TokenAmount::from(100u64),
            TokenAmount::zero(),
        );
        assert!(matches!(
            wallet.submit(swap.clone()).await,
            Err(ChainError::Reverted { .. })
        ));

        wallet
            .submit(f.token_a.approve_call(f.pool.address(), TokenAmount::from(100u64)))
            .await
            .unwrap();
        wallet.submit(swap).await.unwrap();

        let state = f.chain.pool_state().unwrap();
        assert_eq!(state.reserve_a, TokenAmount::from(1100u64));
        assert_eq!(state.reserve_b, TokenAmount::from(1818u64));
        assert_eq!(
            f.chain
                .allowance(f.token_a.address(), f.user, f.pool.address()),
            TokenAmount::zero()
        );
        assert_eq!(f.chain.transaction_count(), 3);
    }

    #[tokio::test]
    async fn test_swap_below_minimum_reverts_without_state_change() {
        let f = fixture();
        let wallet = f.chain.wallet(f.user);
        wallet
            .submit(f.token_a.approve_call(f.pool.address(), TokenAmount::from(100u64)))
            .await
            .unwrap();
        let swap = f.pool.swap_call(
            SwapDirection::AToB,
            TokenAmount::from(100u64),
            TokenAmount::from(183u64),
        );
        assert!(wallet.submit(swap).await.is_err());
        assert_eq!(
            f.chain.pool_state().unwrap().reserve_a,
            TokenAmount::from(1000u64)
        );
        assert_eq!(
            f.chain
                .allowance(f.token_a.address(), f.user, f.pool.address()),
            TokenAmount::from(100u64)
        );
    }

    #[tokio::test]
    async fn test_injected_read_failure() {
        let f = fixture();
        f.chain.fail_reads::<ISimpleDex::reserveBCall>();
        assert!(f.pool.reserve_b().await.is_err());
        assert!(f.pool.reserve_a().await.is_ok());
        f.chain.clear_failures();
        assert!(f.pool.reserve_b().await.is_ok());
    }

    #[tokio::test]
    async fn test_injected_write_failure_targets_one_contract() {
        let f = fixture();
        let token_b = f.pool.token_b().await.unwrap();
        let token_b = TokenContract::new(token_b, f.chain.clone());
        f.chain
            .fail_writes_to::<IERC20::approveCall>(token_b.address());
        let wallet = f.chain.wallet(f.user);

        wallet
            .submit(f.token_a.approve_call(f.pool.address(), TokenAmount::from(1u64)))
            .await
            .unwrap();
        assert!(matches!(
            wallet
                .submit(token_b.approve_call(f.pool.address(), TokenAmount::from(1u64)))
                .await,
            Err(ChainError::Reverted { label: "approve", .. })
        ));
        assert_eq!(f.chain.transaction_count(), 2);
    }

    #[tokio::test]
    async fn test_disconnected_wallet_cannot_submit() {
        let f = fixture();
        let wallet = f.chain.disconnected_wallet();
        assert!(matches!(
            wallet
                .submit(f.token_a.approve_call(f.pool.address(), TokenAmount::from(1u64)))
                .await,
            Err(ChainError::NoAccount)
        ));
    }
}
