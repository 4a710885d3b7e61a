use anchor_lang::prelude::*;

#[event]
pub struct ProtocolInitialized {
    pub authority: Pubkey,
    pub fee_wallet: Pubkey,
    pub fee_bps: u16,
    pub timestamp: i64,
}

#[event]
pub struct FeeUpdated {
    pub authority: Pubkey,
    pub old_fee_bps: u16,
    pub new_fee_bps: u16,
    pub timestamp: i64,
}

#[event]
pub struct FeeRecipientUpdated {
    pub authority: Pubkey,
    pub old_fee_wallet: Pubkey,
    pub new_fee_wallet: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct ProtocolPaused {
    pub authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct ProtocolUnpaused {
    pub authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct ControlTransferred {
    pub old_authority: Pubkey,
    pub new_authority: Pubkey,
    pub timestamp: i64,
}

#[event]
pub struct BatchDistributed {
    pub payer: Pubkey,
    /// None for native SOL batches
    pub mint: Option<Pubkey>,
    pub recipient_count: u32,
    pub total_requested: u64,
    pub fee_amount: u64,
    pub refund: u64,
    pub timestamp: i64,
}
