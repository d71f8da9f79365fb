//! State structures for the prediction market program

pub mod market;

pub use market::*;
