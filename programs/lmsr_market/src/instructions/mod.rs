//! Instruction handlers for the prediction market program
//!
//! Each instruction is one atomic state transition:
//! - `create_market` - Open a new yes/no market (permissionless)
//! - `buy_outcome` - Buy YES or NO shares at the LMSR price
//! - `resolve_market` - Record the winning side (market authority only)
//! - `claim_rewards` - Redeem winning shares after resolution

pub mod buy_outcome;
pub mod claim_rewards;
pub mod create_market;
pub mod resolve_market;

pub use buy_outcome::*;
pub use claim_rewards::*;
pub use create_market::*;
pub use resolve_market::*;
