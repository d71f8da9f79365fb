//! Market Creation
//!
//! Initializes the market account, the YES/NO outcome mints, and the
//! collateral vault in one shot. The market PDA is keyed by creator and
//! seed, so the same creator can run many markets side by side; the PDA
//! is the mint authority for both outcome mints and the vault owner.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::state::Market;

/// Event emitted when a market is created
#[event]
pub struct MarketCreated {
    pub market: Pubkey,
    pub authority: Pubkey,
    pub question: String,
    pub expiry_ts: i64,
    pub fee_bps: u16,
    pub treasury: Pubkey,
    pub b_scaled: u64,
}

#[derive(Accounts)]
#[instruction(seed: u64)]
pub struct CreateMarket<'info> {
    /// Market creator; becomes the resolving authority
    #[account(mut)]
    pub creator: Signer<'info>,

    #[account(
        init,
        payer = creator,
        space = 8 + Market::INIT_SPACE,
        seeds = [Market::SEED, creator.key().as_ref(), &seed.to_le_bytes()],
        bump,
    )]
    pub market: Box<Account<'info, Market>>,

    /// Collateral token mint (e.g. USDC)
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = creator,
        mint::decimals = collateral_mint.decimals,
        mint::authority = market,
        seeds = [b"yes_mint", market.key().as_ref()],
        bump,
    )]
    pub yes_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        init,
        payer = creator,
        mint::decimals = collateral_mint.decimals,
        mint::authority = market,
        seeds = [b"no_mint", market.key().as_ref()],
        bump,
    )]
    pub no_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Vault holding the net stakes backing all outstanding shares
    #[account(
        init,
        payer = creator,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> CreateMarket<'info> {
    pub fn create_market(
        &mut self,
        seed: u64,
        question: String,
        expiry_ts: i64,
        fee_bps: u16,
        treasury: Pubkey,
        b_scaled: u64,
        bumps: &CreateMarketBumps,
    ) -> Result<()> {
        let clock = Clock::get()?;

        require!(fee_bps <= 10_000, CreateMarketError::InvalidFee);
        require!(b_scaled > 0, CreateMarketError::InvalidLiquidity);
        require!(
            question.len() <= Market::MAX_QUESTION_LEN,
            CreateMarketError::QuestionTooLong
        );
        require!(
            expiry_ts > clock.unix_timestamp,
            CreateMarketError::InvalidExpiry
        );

        self.market.set_inner(Market {
            seed,
            bump: bumps.market,
            authority: self.creator.key(),
            question: question.clone(),
            expiry_ts,
            yes_mint: self.yes_mint.key(),
            no_mint: self.no_mint.key(),
            collateral_mint: self.collateral_mint.key(),
            fee_bps,
            treasury,
            b_scaled,
            yes_shares: 0,
            no_shares: 0,
            resolved: false,
            winner: None,
        });

        emit!(MarketCreated {
            market: self.market.key(),
            authority: self.creator.key(),
            question,
            expiry_ts,
            fee_bps,
            treasury,
            b_scaled,
        });

        Ok(())
    }
}

#[error_code]
pub enum CreateMarketError {
    #[msg("Fee must not exceed 10000 basis points")]
    InvalidFee,
    #[msg("Liquidity parameter must be positive")]
    InvalidLiquidity,
    #[msg("Question exceeds the maximum length")]
    QuestionTooLong,
    #[msg("Expiry must be in the future")]
    InvalidExpiry,
}
