//! Prediction Market State
//!
//! Each market is a single yes/no question with its own LMSR book and
//! collateral vault. The gating and settlement arithmetic live here as
//! plain methods taking an explicit `now`, shared by every instruction.

use anchor_lang::prelude::*;

/// Individual prediction market account
///
/// Seeds: ["market", authority, seed.to_le_bytes()]
#[account]
#[derive(InitSpace)]
pub struct Market {
    /// Creator-chosen discriminator, part of the PDA seeds
    pub seed: u64,

    /// PDA bump seed
    pub bump: u8,

    /// Market creator; also the only identity allowed to resolve
    pub authority: Pubkey,

    /// The prediction question
    /// Example: "Will ETH flip BTC by market cap in 2026?"
    #[max_len(256)]
    pub question: String,

    /// Unix timestamp when trading ends and resolution becomes possible
    pub expiry_ts: i64,

    /// YES outcome token mint
    pub yes_mint: Pubkey,

    /// NO outcome token mint
    pub no_mint: Pubkey,

    /// Collateral token mint backing the market
    pub collateral_mint: Pubkey,

    /// Trading fee in basis points (100 = 1%, max 10000)
    pub fee_bps: u16,

    /// Collateral token account receiving fees
    pub treasury: Pubkey,

    /// LMSR liquidity parameter, in collateral base units
    pub b_scaled: u64,

    /// Cumulative YES shares minted; never decreases while open
    pub yes_shares: u64,

    /// Cumulative NO shares minted; never decreases while open
    pub no_shares: u64,

    /// Whether the outcome has been decided
    pub resolved: bool,

    /// Winning side, set exactly once at resolution
    pub winner: Option<Side>,
}

impl Market {
    pub const SEED: &'static [u8] = b"market";
    pub const MAX_QUESTION_LEN: usize = 256;

    /// Gate for trading: the market must be unexpired and unresolved.
    pub fn assert_open(&self, now: i64) -> Result<()> {
        require!(!self.resolved, MarketError::MarketAlreadyResolved);
        require!(now < self.expiry_ts, MarketError::MarketExpired);
        Ok(())
    }

    /// Gate for resolution: the market must be expired and unresolved.
    pub fn assert_resolvable(&self, now: i64) -> Result<()> {
        require!(!self.resolved, MarketError::MarketAlreadyResolved);
        require!(now >= self.expiry_ts, MarketError::MarketNotExpiredYet);
        Ok(())
    }

    /// Add freshly minted shares to one side's running total.
    pub fn record_purchase(&mut self, side: Side, delta: u64) -> Result<()> {
        let counter = match side {
            Side::Yes => &mut self.yes_shares,
            Side::No => &mut self.no_shares,
        };
        *counter = counter.checked_add(delta).ok_or(MarketError::MathError)?;
        Ok(())
    }

    /// One-shot outcome assignment. The winner is immutable afterwards.
    pub fn set_winner(&mut self, side: Side) -> Result<()> {
        require!(!self.resolved, MarketError::MarketAlreadyResolved);
        self.winner = Some(side);
        self.resolved = true;
        Ok(())
    }

    /// Total shares on the winning side; the settlement divisor.
    pub fn winning_shares(&self) -> Result<u64> {
        let winner = self.winner.ok_or(MarketError::MarketNotResolved)?;
        let total = match winner {
            Side::Yes => self.yes_shares,
            Side::No => self.no_shares,
        };
        require!(total > 0, MarketError::NoWinningShares);
        Ok(total)
    }
}

/// One holder's cut of the vault: `floor(vault * holder / winning)`.
///
/// The divisor is the market's recorded winning-share total, never the
/// remaining token supply, so each claim is computed against the vault
/// balance it finds. Earlier claimants see a larger balance; flooring
/// keeps the running payout sum <= the balance at resolution.
pub fn proportional_payout(
    vault_balance: u64,
    holder_shares: u64,
    winning_shares: u64,
) -> Result<u64> {
    require!(winning_shares > 0, MarketError::NoWinningShares);
    let payout = (vault_balance as u128)
        .checked_mul(holder_shares as u128)
        .ok_or(MarketError::MathError)?
        / winning_shares as u128;
    let payout = u64::try_from(payout).map_err(|_| MarketError::MathError)?;
    require!(payout > 0, MarketError::NoRewardsAvailable);
    Ok(payout)
}

/// One side of a binary market
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, InitSpace, Debug)]
pub enum Side {
    Yes,
    No,
}

#[error_code]
pub enum MarketError {
    #[msg("Attempted to trade on an expired market")]
    MarketExpired,
    #[msg("Attempted to resolve the market before expiry")]
    MarketNotExpiredYet,
    #[msg("The market is already resolved")]
    MarketAlreadyResolved,
    #[msg("The market is not yet resolved")]
    MarketNotResolved,
    #[msg("No shares outstanding on the winning side")]
    NoWinningShares,
    #[msg("No rewards available")]
    NoRewardsAvailable,
    #[msg("Math error (overflow/underflow)")]
    MathError,
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    const EXPIRY: i64 = 1_700_000_000;

    fn open_market() -> Market {
        Market {
            seed: 7,
            bump: 255,
            authority: Pubkey::default(),
            question: "Will it rain tomorrow?".to_string(),
            expiry_ts: EXPIRY,
            yes_mint: Pubkey::default(),
            no_mint: Pubkey::default(),
            collateral_mint: Pubkey::default(),
            fee_bps: 100,
            treasury: Pubkey::default(),
            b_scaled: 10_000_000,
            yes_shares: 0,
            no_shares: 0,
            resolved: false,
            winner: None,
        }
    }

    #[test]
    fn test_trading_gate() {
        let market = open_market();
        assert!(market.assert_open(EXPIRY - 1).is_ok());
        assert_eq!(
            market.assert_open(EXPIRY).unwrap_err(),
            MarketError::MarketExpired.into()
        );

        let mut resolved = open_market();
        resolved.set_winner(Side::Yes).unwrap();
        assert_eq!(
            resolved.assert_open(EXPIRY - 1).unwrap_err(),
            MarketError::MarketAlreadyResolved.into()
        );
    }

    #[test]
    fn test_resolution_gate() {
        let market = open_market();
        assert_eq!(
            market.assert_resolvable(EXPIRY - 1).unwrap_err(),
            MarketError::MarketNotExpiredYet.into()
        );
        assert!(market.assert_resolvable(EXPIRY).is_ok());
    }

    #[test]
    fn test_winner_is_immutable() {
        let mut market = open_market();
        market.set_winner(Side::No).unwrap();
        assert!(market.resolved);
        assert_eq!(market.winner, Some(Side::No));

        assert_eq!(
            market.set_winner(Side::Yes).unwrap_err(),
            MarketError::MarketAlreadyResolved.into()
        );
        assert_eq!(
            market.assert_resolvable(EXPIRY + 10).unwrap_err(),
            MarketError::MarketAlreadyResolved.into()
        );
        assert_eq!(market.winner, Some(Side::No));
    }

    #[test]
    fn test_record_purchase_accumulates() {
        let mut market = open_market();
        market.record_purchase(Side::Yes, 60).unwrap();
        market.record_purchase(Side::No, 25).unwrap();
        market.record_purchase(Side::Yes, 40).unwrap();
        assert_eq!(market.yes_shares, 100);
        assert_eq!(market.no_shares, 25);

        assert_eq!(
            market.record_purchase(Side::Yes, u64::MAX).unwrap_err(),
            MarketError::MathError.into()
        );
    }

    #[test]
    fn test_winning_shares_requires_resolution() {
        let mut market = open_market();
        assert_eq!(
            market.winning_shares().unwrap_err(),
            MarketError::MarketNotResolved.into()
        );

        market.record_purchase(Side::Yes, 100).unwrap();
        market.set_winner(Side::Yes).unwrap();
        assert_eq!(market.winning_shares().unwrap(), 100);

        let mut empty = open_market();
        empty.set_winner(Side::No).unwrap();
        assert_eq!(
            empty.winning_shares().unwrap_err(),
            MarketError::NoWinningShares.into()
        );
    }

    #[test]
    fn test_sole_winner_drains_vault() {
        assert_eq!(proportional_payout(92_138_293, 100, 100).unwrap(), 92_138_293);
    }

    #[test]
    fn test_payouts_conserve_vault() {
        // A holds 60, B holds 40 of 100 winning shares; vault = 1000.
        // A claims first against the full balance, B against what remains;
        // the divisor never shrinks, so the sum stays under the vault.
        let vault = 1_000u64;
        let payout_a = proportional_payout(vault, 60, 100).unwrap();
        assert_eq!(payout_a, 600);

        let remaining = vault - payout_a;
        let payout_b = proportional_payout(remaining, 40, 100).unwrap();
        assert_eq!(payout_b, 160);

        assert!(payout_a + payout_b <= vault);
        // Claiming earlier pays more per share
        assert!(payout_a * 40 > payout_b * 60);
    }

    #[test]
    fn test_claim_exhausts_holder() {
        // After a claim the holder's credit is burned to zero; a second
        // attempt has nothing to redeem.
        let vault = 500u64;
        let payout = proportional_payout(vault, 20, 50).unwrap();
        assert_eq!(payout, 200);
        assert_eq!(
            proportional_payout(vault - payout, 0, 50).unwrap_err(),
            MarketError::NoRewardsAvailable.into()
        );
    }

    #[test]
    fn test_dusty_payout_is_rejected() {
        // 1 share of a million against a 10-unit vault floors to zero
        assert_eq!(
            proportional_payout(10, 1, 1_000_000).unwrap_err(),
            MarketError::NoRewardsAvailable.into()
        );
    }
}
