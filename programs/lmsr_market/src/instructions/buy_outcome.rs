//! Outcome Purchasing
//!
//! Prices a share purchase off the LMSR cost function, splits the gross
//! cost into fee and net stake, and mints outcome tokens to the buyer.
//!
//! Every step commits or none do: the collateral transfers, the share
//! counters, and the mint all happen inside one instruction, so no other
//! caller can observe a half-applied trade.

use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{
        mint_to, transfer_checked, Mint, MintTo, TokenAccount, TokenInterface, TransferChecked,
    },
};

use crate::amm::{fee_amount, lmsr_buy_cost, CostError};
use crate::state::{Market, Side};

/// Event emitted when outcome shares are bought
#[event]
pub struct OutcomeBought {
    pub market: Pubkey,
    pub buyer: Pubkey,
    pub side: Side,
    pub share_amount: u64,
    pub gross_cost: u64,
    pub fee: u64,
    pub net_stake: u64,
}

#[derive(Accounts)]
pub struct BuyOutcome<'info> {
    #[account(mut)]
    pub buyer: Signer<'info>,

    #[account(
        mut,
        seeds = [Market::SEED, market.authority.as_ref(), &market.seed.to_le_bytes()],
        bump = market.bump,
    )]
    pub market: Box<Account<'info, Market>>,

    #[account(
        mut,
        constraint = yes_mint.key() == market.yes_mint @ TradeError::WrongMint,
    )]
    pub yes_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        mut,
        constraint = no_mint.key() == market.no_mint @ TradeError::WrongMint,
    )]
    pub no_mint: Box<InterfaceAccount<'info, Mint>>,

    #[account(
        constraint = collateral_mint.key() == market.collateral_mint @ TradeError::WrongMint,
    )]
    pub collateral_mint: Box<InterfaceAccount<'info, Mint>>,

    /// Buyer's funding account, debited by the gross cost
    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = buyer,
    )]
    pub buyer_collateral: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = buyer,
        associated_token::mint = yes_mint,
        associated_token::authority = buyer,
    )]
    pub buyer_yes: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        init_if_needed,
        payer = buyer,
        associated_token::mint = no_mint,
        associated_token::authority = buyer,
    )]
    pub buyer_no: Box<InterfaceAccount<'info, TokenAccount>>,

    /// Fee sink configured at market creation
    #[account(
        mut,
        constraint = treasury.key() == market.treasury @ TradeError::WrongTreasury,
    )]
    pub treasury: Box<InterfaceAccount<'info, TokenAccount>>,

    #[account(
        mut,
        associated_token::mint = collateral_mint,
        associated_token::authority = market,
    )]
    pub vault: Box<InterfaceAccount<'info, TokenAccount>>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,
}

impl<'info> BuyOutcome<'info> {
    pub fn buy_outcome(&mut self, side: Side, share_amount: u64) -> Result<()> {
        require!(share_amount > 0, TradeError::InvalidAmount);

        let clock = Clock::get()?;
        self.market.assert_open(clock.unix_timestamp)?;

        // Price the trade; fee comes out of the gross cost, the vault
        // receives only the net stake.
        let gross_cost = lmsr_buy_cost(
            self.market.b_scaled,
            self.market.yes_shares,
            self.market.no_shares,
            side,
            share_amount,
        )?;
        let fee = fee_amount(gross_cost, self.market.fee_bps)?;
        let net_stake = gross_cost.checked_sub(fee).ok_or(CostError::MathError)?;

        require!(
            self.buyer_collateral.amount >= gross_cost,
            TradeError::InsufficientFunds
        );

        if fee > 0 {
            transfer_checked(
                CpiContext::new(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: self.buyer_collateral.to_account_info(),
                        mint: self.collateral_mint.to_account_info(),
                        to: self.treasury.to_account_info(),
                        authority: self.buyer.to_account_info(),
                    },
                ),
                fee,
                self.collateral_mint.decimals,
            )?;
        }
        if net_stake > 0 {
            transfer_checked(
                CpiContext::new(
                    self.token_program.to_account_info(),
                    TransferChecked {
                        from: self.buyer_collateral.to_account_info(),
                        mint: self.collateral_mint.to_account_info(),
                        to: self.vault.to_account_info(),
                        authority: self.buyer.to_account_info(),
                    },
                ),
                net_stake,
                self.collateral_mint.decimals,
            )?;
        }

        self.market.record_purchase(side, share_amount)?;

        // Mint the buyer's outcome credits, market PDA signing
        let authority = self.market.authority;
        let seed_bytes = self.market.seed.to_le_bytes();
        let bump = [self.market.bump];
        let market_seeds: &[&[u8]] = &[Market::SEED, authority.as_ref(), &seed_bytes, &bump];

        let (mint, destination) = match side {
            Side::Yes => (&self.yes_mint, &self.buyer_yes),
            Side::No => (&self.no_mint, &self.buyer_no),
        };

        mint_to(
            CpiContext::new_with_signer(
                self.token_program.to_account_info(),
                MintTo {
                    mint: mint.to_account_info(),
                    to: destination.to_account_info(),
                    authority: self.market.to_account_info(),
                },
                &[market_seeds],
            ),
            share_amount,
        )?;

        emit!(OutcomeBought {
            market: self.market.key(),
            buyer: self.buyer.key(),
            side,
            share_amount,
            gross_cost,
            fee,
            net_stake,
        });

        Ok(())
    }
}

#[error_code]
pub enum TradeError {
    #[msg("Share amount must be positive")]
    InvalidAmount,
    #[msg("Insufficient funds to cover the purchase")]
    InsufficientFunds,
    #[msg("Mint does not belong to this market")]
    WrongMint,
    #[msg("Treasury does not match the market configuration")]
    WrongTreasury,
}
