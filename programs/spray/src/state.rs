use anchor_lang::prelude::*;

use crate::errors::ErrorCode;

/// Global protocol configuration (single instance)
#[account(zero_copy(unsafe))]
#[repr(C)]
pub struct ProtocolConfig {
    /// Controller that can update fees, pause and hand over control
    pub authority: Pubkey,
    /// Wallet that receives protocol fees
    pub fee_wallet: Pubkey,
    /// Protocol fee in basis points (0..=MAX_FEE_BPS)
    pub fee_bps: u16,
    /// Non-zero while distributions are halted
    pub paused: u8,
    /// Non-zero while a settlement is running
    pub settlement_lock: u8,
    /// Bump seed for PDA derivation (stored for CU optimization)
    pub bump: u8,
    /// Bump seed of the settlement vault PDA
    pub vault_bump: u8,
}

impl ProtocolConfig {
    pub fn is_paused(&self) -> bool {
        self.paused != 0
    }

    pub fn is_settling(&self) -> bool {
        self.settlement_lock != 0
    }

    /// Rejects paused or re-entered settlements, then takes the lock
    pub fn begin_settlement(&mut self) -> Result<SettlementTerms> {
        require!(!self.is_paused(), ErrorCode::Paused);
        require!(!self.is_settling(), ErrorCode::SettlementInProgress);

        self.settlement_lock = 1;

        Ok(SettlementTerms {
            fee_wallet: self.fee_wallet,
            fee_bps: self.fee_bps,
            vault_bump: self.vault_bump,
        })
    }

    pub fn end_settlement(&mut self) {
        self.settlement_lock = 0;
    }
}

/// Config snapshot a settlement runs under, read before any transfer
#[derive(Clone, Copy, Debug)]
pub struct SettlementTerms {
    pub fee_wallet: Pubkey,
    pub fee_bps: u16,
    pub vault_bump: u8,
}

/// Program-owned PDA that briefly holds funds in flight.
///
/// Native settlements move the payer's supplied lamports here and pay out
/// from it. It is also the authority of the per-mint token vaults and the
/// delegate payers approve before a token settlement.
#[account]
#[derive(Default)]
pub struct SettlementVault {}

/// One entry of a custom-amount batch
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub struct RecipientInput {
    /// Recipient's wallet address
    pub address: Pubkey,
    /// Amount owed in base units (lamports or token base units)
    pub amount: u64,
}

// Compile-time size assertion to catch accidental struct changes
// ProtocolConfig: see constants.rs for full breakdown = 78
const _: () = assert!(std::mem::size_of::<ProtocolConfig>() == 70); // 78 - 8 (discriminator added by Anchor)
