use anchor_lang::prelude::*;

use crate::{
    constants::{MAX_FEE_BPS, PROTOCOL_CONFIG_SEED},
    errors::ErrorCode,
    events::{FeeRecipientUpdated, FeeUpdated},
    state::ProtocolConfig,
};

#[derive(Accounts)]
pub struct UpdateProtocolConfig<'info> {
    #[account(
        mut,
        seeds = [PROTOCOL_CONFIG_SEED],
        bump = protocol_config.load()?.bump,
        constraint = protocol_config.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub protocol_config: AccountLoader<'info, ProtocolConfig>,

    pub authority: Signer<'info>,
}

/// Updates the protocol fee rate
/// Only callable by current protocol authority
pub fn update_fee_handler(ctx: Context<UpdateProtocolConfig>, new_fee_bps: u16) -> Result<()> {
    // Ceiling is enforced on write so every read can trust it
    require!(new_fee_bps <= MAX_FEE_BPS, ErrorCode::FeeTooHigh);

    let protocol_config = &mut ctx.accounts.protocol_config.load_mut()?;
    let old_fee_bps = protocol_config.fee_bps;

    protocol_config.fee_bps = new_fee_bps;

    emit!(FeeUpdated {
        authority: ctx.accounts.authority.key(),
        old_fee_bps,
        new_fee_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

/// Updates the protocol fee wallet
/// Only callable by current protocol authority
pub fn update_fee_recipient_handler(
    ctx: Context<UpdateProtocolConfig>,
    new_fee_wallet: Pubkey,
) -> Result<()> {
    require!(new_fee_wallet != Pubkey::default(), ErrorCode::ZeroAddress);

    let protocol_config = &mut ctx.accounts.protocol_config.load_mut()?;
    let old_fee_wallet = protocol_config.fee_wallet;

    protocol_config.fee_wallet = new_fee_wallet;

    emit!(FeeRecipientUpdated {
        authority: ctx.accounts.authority.key(),
        old_fee_wallet,
        new_fee_wallet,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
