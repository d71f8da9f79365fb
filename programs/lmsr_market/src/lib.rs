//! # LMSR Market: Binary-Outcome Prediction Markets
//!
//! A prediction market on Solana where an automated market maker, not an
//! order book, prices every trade.
//!
//! ## Overview
//!
//! A creator opens a market on a yes/no question with an expiry and an
//! LMSR liquidity parameter. Traders buy YES or NO shares at prices set
//! by the log-sum-exp cost function; net stakes accumulate in a vault
//! owned by the market. After expiry the market authority records the
//! outcome, and winning holders redeem their shares for a proportional
//! cut of the vault.
//!
//! ## How it works
//! - The LMSR cost function prices purchases; larger trades and more
//!   lopsided books cost more per share.
//! - Fees come off the gross cost; only the net stake backs the shares.
//! - Resolution is a one-shot, authority-signed transition.
//! - Claims burn the holder's winning tokens, so each claim pays once.

use anchor_lang::prelude::*;

pub mod amm;
pub mod instructions;
pub mod state;

pub use amm::*;
pub use instructions::*;

use state::Side;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

/// Main LMSR market program
#[program]
pub mod lmsr_market {
    use super::*;

    /// Open a new binary market
    pub fn create_market(
        ctx: Context<CreateMarket>,
        seed: u64,
        question: String,
        expiry_ts: i64,
        fee_bps: u16,
        treasury: Pubkey,
        b_scaled: u64,
    ) -> Result<()> {
        ctx.accounts.create_market(
            seed,
            question,
            expiry_ts,
            fee_bps,
            treasury,
            b_scaled,
            &ctx.bumps,
        )
    }

    /// Buy `share_amount` YES or NO shares at the current LMSR price
    pub fn buy_outcome(ctx: Context<BuyOutcome>, side: Side, share_amount: u64) -> Result<()> {
        ctx.accounts.buy_outcome(side, share_amount)
    }

    /// Record the winning side (market authority only, after expiry)
    pub fn resolve_market(ctx: Context<ResolveMarket>, winning_side: Side) -> Result<()> {
        ctx.accounts.resolve_market(winning_side)
    }

    /// Redeem winning shares for a proportional share of the vault
    pub fn claim_rewards(ctx: Context<ClaimRewards>) -> Result<()> {
        ctx.accounts.claim_rewards()
    }
}
