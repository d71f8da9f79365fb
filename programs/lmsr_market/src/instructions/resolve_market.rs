//! Market Resolution
//!
//! Oracle-gated transition from open to resolved. The resolving identity
//! is the market's configured authority; how it reaches its YES/NO
//! decision (AI agent, multisig, committee) is outside this program --
//! only the signature matters here.
//!
//! Resolution is irreversible: once the winner is set, no instruction can
//! change it.

use anchor_lang::prelude::*;

use crate::state::{Market, Side};

/// Event emitted when a market is resolved
#[event]
pub struct MarketResolved {
    pub market: Pubkey,
    pub winner: Side,
    pub resolved_at: i64,
}

#[derive(Accounts)]
pub struct ResolveMarket<'info> {
    #[account(
        mut,
        seeds = [Market::SEED, authority.key().as_ref(), &market.seed.to_le_bytes()],
        bump = market.bump,
        has_one = authority @ ResolveError::Unauthorized,
    )]
    pub market: Account<'info, Market>,

    /// The market's configured resolver
    pub authority: Signer<'info>,
}

impl<'info> ResolveMarket<'info> {
    pub fn resolve_market(&mut self, winning_side: Side) -> Result<()> {
        let clock = Clock::get()?;

        self.market.assert_resolvable(clock.unix_timestamp)?;
        self.market.set_winner(winning_side)?;

        emit!(MarketResolved {
            market: self.market.key(),
            winner: winning_side,
            resolved_at: clock.unix_timestamp,
        });

        msg!("Market {} resolved: {:?}", self.market.key(), winning_side);

        Ok(())
    }
}

#[error_code]
pub enum ResolveError {
    #[msg("Only the market authority can resolve")]
    Unauthorized,
}
