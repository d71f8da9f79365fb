//! Reward Settlement
//!
//! After resolution, holders of winning shares redeem them for a
//! proportional cut of the vault:
//!
//! ```text
//! payout = floor(vault_balance * holder_shares / winning_shares)
//! ```
//!
//! The divisor is the market's recorded winning-share total, so claims
//! are order dependent: each claimant is paid out of whatever the vault
//! holds when they arrive, and flooring bounds the running sum by the
//! vault balance at resolution. Burning the holder's full winning balance
//! makes the claim once-only.

use anchor_lang::prelude::*;
use anchor_spl::token_interface::{
    burn, transfer_checked, Burn, Mint, TokenAccount, TokenInterface, TransferChecked,
};

use crate::state::{proportional_payout, Market, MarketError, Side};

/// Event emitted when a holder redeems winning shares
#[event]
pub struct RewardsClaimed {
    pub market: Pubkey,
    pub claimer: Pubkey,
    pub shares_burned: u64,
    pub payout: u64,
}

#[derive(Accounts)]
pub struct ClaimRewards<'info> {
    #[account(mut)]
    pub claimer: Signer<'info>,

    #[account(
        seeds = [Market::SEED, market.authority.as_ref(), &market.seed.to_le_bytes()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        mut,
        constraint = yes_mint.key() == market.yes_mint @ ClaimError::WrongMint,
    )]
    pub yes_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        constraint = no_mint.key() == market.no_mint @ ClaimError::WrongMint,
    )]
    pub no_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        constraint = collateral_mint.key() == market.collateral_mint @ ClaimError::WrongMint,
    )]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Holder's outcome token account for the side they are redeeming
    #[account(
        mut,
        constraint = claimer_outcome.owner == claimer.key() @ ClaimError::NotTokenOwner,
    )]
    pub claimer_outcome: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Holder's funding account, credited with the payout
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = claimer,
    )]
    pub claimer_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
}

impl<'info> ClaimRewards<'info> {
    pub fn claim_rewards(&mut self) -> Result<()> {
        require!(self.market.resolved, MarketError::MarketNotResolved);
        let winner = self.market.winner.ok_or(MarketError::MarketNotResolved)?;

        // Losing-side credits have no claim value; rejecting here leaves
        // them as a recorded loss rather than burning them.
        let winning_mint = match winner {
            Side::Yes => &self.yes_mint,
            Side::No => &self.no_mint,
        };
        require!(
            self.claimer_outcome.mint == winning_mint.key(),
            ClaimError::WrongSide
        );

        let holder_shares = self.claimer_outcome.amount;
        require!(holder_shares > 0, ClaimError::NoTokensToRedeem);

        let winning_shares = self.market.winning_shares()?;
        let payout = proportional_payout(self.vault.amount, holder_shares, winning_shares)?;
        require!(self.vault.amount >= payout, ClaimError::InsufficientVaultFunds);

        // Pay out of the vault, market PDA signing
        let authority = self.market.authority;
        let seed_bytes = self.market.seed.to_le_bytes();
        let bump = [self.market.bump];
        let market_seeds: &[&[u8]] = &[Market::SEED, authority.as_ref(), &seed_bytes, &bump];

        transfer_checked(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                TransferChecked {
                    from: self.vault.to_account_info(),
                    mint: self.collateral_mint.to_account_info(),
                    to: self.claimer_collateral.to_account_info(),
                    authority: self.market.to_account_info(),
                },
                &[market_seeds],
            ),
            payout,
            self.collateral_mint.decimals,
        )?;

        // Burn the redeemed credits so the claim cannot repeat
        burn(
            CpiContext::new(
                self.token_program.to_account_info(),
                Burn {
                    mint: winning_mint.to_account_info(),
                    from: self.claimer_outcome.to_account_info(),
                    authority: self.claimer.to_account_info(),
                },
            ),
            holder_shares,
        )?;

        emit!(RewardsClaimed {
            market: self.market.key(),
            claimer: self.claimer.key(),
            shares_burned: holder_shares,
            payout,
        });

        Ok(())
    }
}

#[error_code]
pub enum ClaimError {
    #[msg("You tried to claim the wrong side")]
    WrongSide,
    #[msg("No tokens to redeem")]
    NoTokensToRedeem,
    #[msg("Insufficient vault funds")]
    InsufficientVaultFunds,
    #[msg("Mint does not belong to this market")]
    WrongMint,
    #[msg("Token account is not owned by the claimer")]
    NotTokenOwner,
}
