//! # Automated Market Maker (AMM) Module
//!
//! This module implements the **Logarithmic Market Scoring Rule** (LMSR)
//! for pricing YES/NO shares in prediction markets.
//!
//! ## The LMSR cost function
//!
//! Unlike constant-product AMMs (x * y = k), an LMSR market maker quotes
//! trades off a convex cost function over the outstanding share vector:
//!
//! ```text
//!            C(q) = b * ln(e^(q_yes / b) + e^(q_no / b))
//!
//!   ┌────────────────────────────────────────┐
//!   │              Cost Space                │
//!   │                                        │
//!   │  cost ▲                        ╱       │
//!   │       │                     ╱          │
//!   │       │                 ╱              │
//!   │       │            ╱                   │
//!   │       │      ╱          slope = price  │
//!   │       │ ╱                              │
//!   │       └──────────────────▶ q_side      │
//!   │                                        │
//!   │  A trade costs C(after) - C(before);   │
//!   │  the slope at q is the marginal price  │
//!   └────────────────────────────────────────┘
//! ```
//!
//! The liquidity parameter `b` sets price sensitivity: larger `b` means a
//! flatter curve and a deeper market.

pub mod lmsr;

pub use lmsr::*;
