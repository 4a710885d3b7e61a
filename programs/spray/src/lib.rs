use anchor_lang::prelude::*;

pub mod constants;
pub mod distribution;
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod transfer;
mod utils;

use instructions::*;
use state::RecipientInput;

declare_id!("SPRAYvGq1mS4hxCr2aq7yGTsK4G8Uu8Vu3dYFZ1RJh2");

// Security contact information (embedded on-chain)
#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "Spray",
    project_url: "https://github.com/spray-protocol/spray",
    contacts: "link:https://github.com/spray-protocol/spray/security",
    policy: "https://github.com/spray-protocol/spray/blob/main/SECURITY.md",
    source_code: "https://github.com/spray-protocol/spray",
    source_release: "v0.1.0"
}

#[program]
pub mod spray {
    use super::*;

    /// Initializes the protocol configuration and settlement vault
    /// Can only be called once by the program's upgrade authority
    pub fn initialize_protocol(
        ctx: Context<InitializeProtocol>,
        fee_wallet: Pubkey,
        fee_bps: u16,
    ) -> Result<()> {
        instructions::initialize_protocol::handler(ctx, fee_wallet, fee_bps)
    }

    /// Updates the protocol fee rate (capped at MAX_FEE_BPS)
    /// Only callable by current protocol authority
    pub fn update_fee(ctx: Context<UpdateProtocolConfig>, new_fee_bps: u16) -> Result<()> {
        instructions::update_protocol_config::update_fee_handler(ctx, new_fee_bps)
    }

    /// Updates the protocol fee wallet
    /// Only callable by current protocol authority
    pub fn update_fee_recipient(
        ctx: Context<UpdateProtocolConfig>,
        new_fee_wallet: Pubkey,
    ) -> Result<()> {
        instructions::update_protocol_config::update_fee_recipient_handler(ctx, new_fee_wallet)
    }

    /// Halts all distributions
    /// Only callable by current protocol authority
    pub fn pause(ctx: Context<SetPauseState>) -> Result<()> {
        instructions::pause_protocol::pause_handler(ctx)
    }

    /// Resumes distributions
    /// Only callable by current protocol authority
    pub fn unpause(ctx: Context<SetPauseState>) -> Result<()> {
        instructions::pause_protocol::unpause_handler(ctx)
    }

    /// Hands protocol control to a new address (single step, irreversible)
    /// Only callable by current protocol authority
    pub fn transfer_control(ctx: Context<TransferControl>, new_authority: Pubkey) -> Result<()> {
        instructions::transfer_control::handler(ctx, new_authority)
    }

    /// Sends SOL to many recipients with per-recipient amounts
    /// Excess supplied lamports are refunded in the same instruction
    pub fn distribute_native<'info>(
        ctx: Context<'_, '_, 'info, 'info, DistributeNative<'info>>,
        recipients: Vec<RecipientInput>,
        supplied_lamports: u64,
    ) -> Result<()> {
        instructions::distribute_native::custom_handler(ctx, recipients, supplied_lamports)
    }

    /// Sends the same SOL amount to many recipients
    /// Excess supplied lamports are refunded in the same instruction
    pub fn distribute_equal_native<'info>(
        ctx: Context<'_, '_, 'info, 'info, DistributeNative<'info>>,
        recipients: Vec<Pubkey>,
        amount_per_recipient: u64,
        supplied_lamports: u64,
    ) -> Result<()> {
        instructions::distribute_native::equal_handler(
            ctx,
            recipients,
            amount_per_recipient,
            supplied_lamports,
        )
    }

    /// Sends SPL tokens to many recipients with per-recipient amounts
    /// Pulls exactly amount + fee through the payer's delegation
    pub fn distribute_token<'info>(
        ctx: Context<'_, '_, 'info, 'info, DistributeToken<'info>>,
        recipients: Vec<RecipientInput>,
    ) -> Result<()> {
        instructions::distribute_token::custom_handler(ctx, recipients)
    }

    /// Sends the same SPL token amount to many recipients
    /// Pulls exactly amount + fee through the payer's delegation
    pub fn distribute_equal_token<'info>(
        ctx: Context<'_, '_, 'info, 'info, DistributeToken<'info>>,
        recipients: Vec<Pubkey>,
        amount_per_recipient: u64,
    ) -> Result<()> {
        instructions::distribute_token::equal_handler(ctx, recipients, amount_per_recipient)
    }

    /// Returns the fee charged on `amount` at the current rate
    pub fn calculate_fee(ctx: Context<Quote>, amount: u64) -> Result<u64> {
        instructions::quote::fee_handler(ctx, amount)
    }

    /// Returns `amount` plus fee at the current rate
    pub fn calculate_total_cost(ctx: Context<Quote>, amount: u64) -> Result<u64> {
        instructions::quote::total_cost_handler(ctx, amount)
    }
}
