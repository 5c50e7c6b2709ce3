//! The SimpleDEX client adapter.
//!
//! [`DexClient`] owns the pool handle, the cached token metadata and the last
//! good state snapshot. Reads go through an injected [`ChainReader`]; writes
//! go through an injected [`Wallet`] and are strictly sequential: every
//! approval is mined before the action that needs it is submitted.

use crate::approval::{Approval, Execution, GrantedApproval, SwapOutcome};
use crate::config::ClientConfig;
use crate::error::ClientError;
use crate::state::FormattedState;
use dex_domain::address::Address;
use dex_domain::math::shares;
use dex_domain::pool::{PoolState, StateSnapshot, SwapDirection, UserPosition};
use dex_domain::quote::Quote;
use dex_domain::slippage::SlippageTolerance;
use dex_domain::token::{LIQUIDITY_DECIMALS, Token, TokenAmount, TokenPair};
use dex_domain::units;
use dex_protocols::chain::{ChainReader, ContractCall, Wallet};
use dex_protocols::contracts::{PoolContract, TokenContract};
use dex_protocols::error::ChainError;
use std::sync::Arc;
use tokio::sync::{OnceCell, RwLock};
use tracing::{debug, info, warn};

/// Adapter between user intents and one SimpleDEX pool.
pub struct DexClient {
    config: ClientConfig,
    pool: PoolContract,
    reader: Arc<dyn ChainReader>,
    wallet: Arc<dyn Wallet>,
    tokens: OnceCell<TokenPair>,
    snapshot: RwLock<Option<StateSnapshot>>,
}

impl DexClient {
    /// Creates a client for the pool at `pool_address`.
    ///
    /// Nothing is read until the first operation that needs chain data.
    pub fn new(
        config: ClientConfig,
        pool_address: Address,
        reader: Arc<dyn ChainReader>,
        wallet: Arc<dyn Wallet>,
    ) -> Self {
        Self {
            pool: PoolContract::new(pool_address, reader.clone()),
            config,
            reader,
            wallet,
            tokens: OnceCell::new(),
            snapshot: RwLock::new(None),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    #[must_use]
    pub fn pool_address(&self) -> Address {
        self.pool.address()
    }

    /// The connected account, if any.
    #[must_use]
    pub fn account(&self) -> Option<Address> {
        self.wallet.account()
    }

    fn require_account(&self) -> Result<Address, ClientError> {
        self.wallet.account().ok_or(ClientError::NotConnected)
    }

    fn token_contract(&self, address: Address) -> TokenContract {
        TokenContract::new(address, self.reader.clone())
    }

    /// Discovers the pool's tokens and their metadata.
    ///
    /// The pair is read once and cached for the client's lifetime; later
    /// calls return the cached value.
    ///
    /// # Errors
    /// Returns [`ClientError::StateUnavailable`] if any read fails.
    pub async fn bootstrap(&self) -> Result<&TokenPair, ClientError> {
        self.tokens
            .get_or_try_init(|| async {
                let (address_a, address_b) =
                    tokio::try_join!(self.pool.token_a(), self.pool.token_b())?;
                let contract_a = self.token_contract(address_a);
                let contract_b = self.token_contract(address_b);
                let (token_a, token_b) =
                    tokio::try_join!(contract_a.metadata(), contract_b.metadata())?;

                info!(
                    pool = %self.pool.address(),
                    token_a = %token_a.symbol,
                    token_b = %token_b.symbol,
                    "Discovered pool tokens"
                );
                Ok::<_, ChainError>(TokenPair::new(token_a, token_b))
            })
            .await
            .map_err(|e| {
                warn!(error = %e, "Token discovery failed");
                ClientError::StateUnavailable(e)
            })
    }

    /// The cached token pair, if discovery already ran.
    #[must_use]
    pub fn tokens(&self) -> Option<&TokenPair> {
        self.tokens.get()
    }

    /// Parses a human amount of `token` into base units.
    ///
    /// # Errors
    /// Returns [`ClientError::Parse`] for malformed input or excess precision.
    pub fn to_base_units(&self, token: &Token, amount: &str) -> Result<TokenAmount, ClientError> {
        Ok(token.to_base_units(amount)?)
    }

    /// Formats base units of `token` as a decimal string.
    #[must_use]
    pub fn to_display_units(&self, token: &Token, amount: TokenAmount) -> String {
        token.to_display_units(amount)
    }

    /// Quotes a swap of a human `amount_in` of the input token.
    ///
    /// `slippage` defaults to the configured swap tolerance.
    ///
    /// # Errors
    /// Returns [`ClientError::Parse`] for a malformed amount and
    /// [`ClientError::QuoteUnavailable`] when the pool cannot price it,
    /// including when token discovery fails.
    pub async fn quote(
        &self,
        direction: SwapDirection,
        amount_in: &str,
        slippage: Option<SlippageTolerance>,
    ) -> Result<Quote, ClientError> {
        let pair = self.bootstrap().await.map_err(|e| match e {
            ClientError::StateUnavailable(source) => {
                ClientError::QuoteUnavailable(source.to_string())
            }
            other => other,
        })?;
        let amount_in = pair.input(direction).to_base_units(amount_in)?;
        self.quote_base_units(direction, amount_in, slippage).await
    }

    /// Quotes a swap of `amount_in` base units.
    ///
    /// # Errors
    /// Returns [`ClientError::QuoteUnavailable`] when the quote call fails,
    /// including on an empty pool, or when a nonzero input would yield
    /// nothing.
    pub async fn quote_base_units(
        &self,
        direction: SwapDirection,
        amount_in: TokenAmount,
        slippage: Option<SlippageTolerance>,
    ) -> Result<Quote, ClientError> {
        let slippage = slippage.unwrap_or(self.config.swap_slippage);
        let amount_out = self
            .pool
            .quote(direction, amount_in)
            .await
            .map_err(|e| {
                warn!(%direction, amount_in = %amount_in, error = %e, "Quote failed");
                ClientError::QuoteUnavailable(e.to_string())
            })?;
        if amount_out.is_zero() && !amount_in.is_zero() {
            warn!(%direction, amount_in = %amount_in, "Quote rounds down to zero output");
            return Err(ClientError::QuoteUnavailable(format!(
                "{amount_in} in yields no output"
            )));
        }

        let quote = Quote::new(direction, amount_in, amount_out, slippage);
        debug!(
            %direction,
            amount_in = %quote.amount_in,
            amount_out = %quote.amount_out,
            minimum_out = %quote.minimum_out,
            "Quoted swap"
        );
        Ok(quote)
    }

    /// Re-reads reserves, balances and liquidity for the connected account.
    ///
    /// The six reads run concurrently. The cached snapshot is replaced only if
    /// all of them succeed.
    ///
    /// # Errors
    /// Returns [`ClientError::NotConnected`] without an account and
    /// [`ClientError::StateUnavailable`] if any read fails.
    pub async fn refresh_state(&self) -> Result<StateSnapshot, ClientError> {
        let account = self.require_account()?;
        let pair = self.bootstrap().await?;
        let token_a = self.token_contract(pair.token_a.address);
        let token_b = self.token_contract(pair.token_b.address);

        let reads = tokio::try_join!(
            self.pool.reserve_a(),
            self.pool.reserve_b(),
            token_a.balance_of(account),
            token_b.balance_of(account),
            self.pool.liquidity_of(account),
            self.pool.total_liquidity(),
        );
        let (reserve_a, reserve_b, balance_a, balance_b, liquidity, total_liquidity) = reads
            .map_err(|e| {
                warn!(error = %e, "State refresh failed, keeping previous snapshot");
                ClientError::StateUnavailable(e)
            })?;

        let snapshot = StateSnapshot {
            pool: PoolState {
                reserve_a,
                reserve_b,
                total_liquidity,
            },
            user: UserPosition {
                balance_a,
                balance_b,
                liquidity,
            },
        };
        *self.snapshot.write().await = Some(snapshot);

        info!(
            reserve_a = %reserve_a,
            reserve_b = %reserve_b,
            liquidity = %liquidity,
            total_liquidity = %total_liquidity,
            "Refreshed pool state"
        );
        Ok(snapshot)
    }

    /// The last successfully refreshed state.
    pub async fn snapshot(&self) -> Option<StateSnapshot> {
        *self.snapshot.read().await
    }

    /// The last state as display strings, rounded to the configured places.
    pub async fn formatted_state(&self) -> Option<FormattedState> {
        let pair = self.tokens.get()?;
        let snapshot = self.snapshot().await?;
        Some(FormattedState::new(
            pair,
            &snapshot,
            self.config.display_decimals,
        ))
    }

    /// Refreshes after a mined action; a failure here does not fail the action.
    async fn refresh_after(&self, action: &'static str) {
        if let Err(e) = self.refresh_state().await {
            warn!(action, error = %e, "Refresh after transaction failed");
        }
    }

    /// Approves `spender` for `amount` of `token`, then submits `action`.
    ///
    /// # Errors
    /// See [`DexClient::approve_all_and_submit`].
    pub async fn approve_and_submit(
        &self,
        token: &Token,
        spender: Address,
        amount: TokenAmount,
        action: ContractCall,
    ) -> Result<Execution, ClientError> {
        self.approve_all_and_submit(vec![Approval::new(token.clone(), spender, amount)], action)
            .await
    }

    /// Submits each approval in order, waiting for each receipt, then submits
    /// `action`.
    ///
    /// Nothing is rolled back or retried. If the action fails, the allowances
    /// granted for it are read back and reported in the error.
    ///
    /// # Errors
    /// - [`ClientError::NotConnected`] without an account.
    /// - [`ClientError::ApprovalFailed`] if an approval fails; `action` is not
    ///   submitted.
    /// - [`ClientError::ActionFailed`] if `action` fails after all approvals
    ///   were mined.
    pub async fn approve_all_and_submit(
        &self,
        approvals: Vec<Approval>,
        action: ContractCall,
    ) -> Result<Execution, ClientError> {
        let account = self.require_account()?;
        let mut granted = Vec::with_capacity(approvals.len());

        for approval in approvals {
            let call = self
                .token_contract(approval.token.address)
                .approve_call(approval.spender, approval.amount);
            match self.wallet.submit(call).await {
                Ok(receipt) => {
                    info!(
                        token = %approval.token.symbol,
                        spender = %approval.spender,
                        amount = %approval.amount,
                        tx_hash = %receipt.tx_hash,
                        "Approval mined"
                    );
                    granted.push(GrantedApproval {
                        approval,
                        receipt,
                        remaining_allowance: None,
                    });
                }
                Err(source) => {
                    warn!(token = %approval.token.symbol, error = %source, "Approval failed");
                    return Err(ClientError::ApprovalFailed {
                        symbol: approval.token.symbol,
                        granted,
                        source,
                    });
                }
            }
        }

        let label = action.label;
        match self.wallet.submit(action).await {
            Ok(receipt) => {
                info!(action = label, tx_hash = %receipt.tx_hash, block = receipt.block_number, "Action mined");
                Ok(Execution {
                    approvals: granted,
                    receipt,
                })
            }
            Err(source) => {
                for grant in &mut granted {
                    grant.remaining_allowance = self
                        .token_contract(grant.approval.token.address)
                        .allowance(account, grant.approval.spender)
                        .await
                        .ok();
                }
                warn!(
                    action = label,
                    approvals = granted.len(),
                    error = %source,
                    "Action failed after approval, allowances left in place"
                );
                Err(ClientError::ActionFailed {
                    action: label,
                    approvals: granted,
                    source,
                })
            }
        }
    }

    /// Swaps a human `amount_in` of the input token.
    ///
    /// Quotes first, approves the pool for exactly `amount_in`, then swaps
    /// with the quote's minimum output. `slippage` defaults to the configured
    /// swap tolerance.
    ///
    /// # Errors
    /// Any of the [`ClientError`] variants of the steps above.
    pub async fn swap(
        &self,
        direction: SwapDirection,
        amount_in: &str,
        slippage: Option<SlippageTolerance>,
    ) -> Result<SwapOutcome, ClientError> {
        self.require_account()?;
        let pair = self.bootstrap().await?;
        let token_in = pair.input(direction);
        let amount_in = token_in.to_base_units(amount_in)?;

        let quote = self
            .quote_base_units(direction, amount_in, slippage)
            .await?;
        let action = self
            .pool
            .swap_call(direction, quote.amount_in, quote.minimum_out);
        let execution = self
            .approve_and_submit(token_in, self.pool.address(), quote.amount_in, action)
            .await?;

        self.refresh_after("swap").await;
        Ok(SwapOutcome { quote, execution })
    }

    /// Deposits human amounts of both tokens.
    ///
    /// Minimums are the desired amounts reduced by `slippage`, defaulting to
    /// the configured liquidity tolerance.
    ///
    /// # Errors
    /// Any of the [`ClientError`] variants of the approve-then-act sequence.
    pub async fn add_liquidity(
        &self,
        amount_a: &str,
        amount_b: &str,
        slippage: Option<SlippageTolerance>,
    ) -> Result<Execution, ClientError> {
        self.require_account()?;
        let pair = self.bootstrap().await?;
        let slippage = slippage.unwrap_or(self.config.liquidity_slippage);
        let desired_a = pair.token_a.to_base_units(amount_a)?;
        let desired_b = pair.token_b.to_base_units(amount_b)?;
        let min_a = slippage.apply(desired_a);
        let min_b = slippage.apply(desired_b);

        debug!(
            desired_a = %desired_a,
            desired_b = %desired_b,
            min_a = %min_a,
            min_b = %min_b,
            "Adding liquidity"
        );

        let spender = self.pool.address();
        let action = self
            .pool
            .add_liquidity_call(desired_a, desired_b, min_a, min_b);
        let execution = self
            .approve_all_and_submit(
                vec![
                    Approval::new(pair.token_a.clone(), spender, desired_a),
                    Approval::new(pair.token_b.clone(), spender, desired_b),
                ],
                action,
            )
            .await?;

        self.refresh_after("addLiquidity").await;
        Ok(execution)
    }

    /// Burns a human amount of liquidity shares (18 decimals).
    ///
    /// State is refreshed first. Expected outputs are the floor of each
    /// reserve's proportional claim, reduced by `slippage`, defaulting to the
    /// configured liquidity tolerance.
    ///
    /// # Errors
    /// - [`ClientError::InsufficientShares`] when burning more than is held.
    /// - [`ClientError::StateUnavailable`] when the refresh fails.
    /// - [`ClientError::QuoteUnavailable`] when no shares are outstanding.
    /// - [`ClientError::ActionFailed`] when the transaction fails.
    pub async fn remove_liquidity(
        &self,
        liquidity: &str,
        slippage: Option<SlippageTolerance>,
    ) -> Result<Execution, ClientError> {
        self.require_account()?;
        self.bootstrap().await?;
        let slippage = slippage.unwrap_or(self.config.liquidity_slippage);
        let burned = units::to_base_units(LIQUIDITY_DECIMALS, liquidity)?;
        let snapshot = self.refresh_state().await?;

        let held = snapshot.user.liquidity;
        if burned > held {
            return Err(ClientError::InsufficientShares {
                requested: burned,
                held,
            });
        }

        let pool = snapshot.pool;
        let redeem = |reserve| {
            shares::redeemable(reserve, burned, pool.total_liquidity)
                .map_err(|e| ClientError::QuoteUnavailable(e.to_string()))
        };
        let expected_a = redeem(pool.reserve_a)?;
        let expected_b = redeem(pool.reserve_b)?;
        let min_a = slippage.apply(expected_a);
        let min_b = slippage.apply(expected_b);

        debug!(
            shares = %burned,
            expected_a = %expected_a,
            expected_b = %expected_b,
            min_a = %min_a,
            min_b = %min_b,
            "Removing liquidity"
        );

        let action = self.pool.remove_liquidity_call(burned, min_a, min_b);
        let execution = self.approve_all_and_submit(Vec::new(), action).await?;

        self.refresh_after("removeLiquidity").await;
        Ok(execution)
    }

    /// Counter-amount that keeps a deposit at the pool's current ratio.
    ///
    /// `amount` is a human amount of the input token of `direction`; the
    /// result is in base units of the other token. Returns `None` when no
    /// snapshot is cached or the pool is empty, where any ratio is accepted.
    ///
    /// # Errors
    /// Returns [`ClientError::Parse`] for a malformed amount.
    pub async fn paired_deposit(
        &self,
        direction: SwapDirection,
        amount: &str,
    ) -> Result<Option<TokenAmount>, ClientError> {
        let pair = self.bootstrap().await?;
        let amount = pair.input(direction).to_base_units(amount)?;
        let Some(snapshot) = self.snapshot().await else {
            return Ok(None);
        };
        if snapshot.pool.is_empty() {
            return Ok(None);
        }
        let (reserve_same, reserve_other) = snapshot.pool.reserves_for(direction);
        Ok(shares::paired_amount(amount, reserve_same, reserve_other).ok())
    }
}
