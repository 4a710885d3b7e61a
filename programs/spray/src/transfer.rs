use anchor_lang::prelude::*;

/// Moves native lamports out of the funds held for a settlement.
///
/// Any error is fatal to the enclosing settlement.
pub trait NativeTransfer {
    fn send_native(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}

/// Moves fungible tokens of a single mint.
///
/// `pull_token` draws from a balance the owner pre-authorised; it may fail for
/// reasons outside the program (allowance, balance, token hooks). Any error is
/// fatal to the enclosing settlement.
pub trait TokenTransfer {
    fn pull_token(&mut self, from: &Pubkey, amount: u64) -> Result<()>;
    fn push_token(&mut self, to: &Pubkey, amount: u64) -> Result<()>;
}
