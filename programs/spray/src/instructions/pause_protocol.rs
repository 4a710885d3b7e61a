use anchor_lang::prelude::*;

use crate::{
    constants::PROTOCOL_CONFIG_SEED,
    errors::ErrorCode,
    events::{ProtocolPaused, ProtocolUnpaused},
    state::ProtocolConfig,
};

#[derive(Accounts)]
pub struct SetPauseState<'info> {
    #[account(
        mut,
        seeds = [PROTOCOL_CONFIG_SEED],
        bump = protocol_config.load()?.bump,
        constraint = protocol_config.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub protocol_config: AccountLoader<'info, ProtocolConfig>,

    pub authority: Signer<'info>,
}

/// Halts every distribution until unpaused
/// Fails on an already paused protocol
pub fn pause_handler(ctx: Context<SetPauseState>) -> Result<()> {
    let protocol_config = &mut ctx.accounts.protocol_config.load_mut()?;
    require!(!protocol_config.is_paused(), ErrorCode::AlreadyPaused);

    protocol_config.paused = 1;

    emit!(ProtocolPaused {
        authority: ctx.accounts.authority.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}

/// Resumes distributions
/// Fails on a protocol that is not paused
pub fn unpause_handler(ctx: Context<SetPauseState>) -> Result<()> {
    let protocol_config = &mut ctx.accounts.protocol_config.load_mut()?;
    require!(protocol_config.is_paused(), ErrorCode::NotPaused);

    protocol_config.paused = 0;

    emit!(ProtocolUnpaused {
        authority: ctx.accounts.authority.key(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
