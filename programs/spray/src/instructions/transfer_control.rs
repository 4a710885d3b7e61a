use anchor_lang::prelude::*;

use crate::{
    constants::PROTOCOL_CONFIG_SEED, errors::ErrorCode, events::ControlTransferred,
    state::ProtocolConfig,
};

#[derive(Accounts)]
pub struct TransferControl<'info> {
    #[account(
        mut,
        seeds = [PROTOCOL_CONFIG_SEED],
        bump = protocol_config.load()?.bump,
        constraint = protocol_config.load()?.authority == authority.key() @ ErrorCode::Unauthorized
    )]
    pub protocol_config: AccountLoader<'info, ProtocolConfig>,

    pub authority: Signer<'info>,
}

/// Hands protocol control to a new address in one step
/// Only callable by current protocol authority
/// Irreversible: the old authority loses every admin right immediately,
/// even when the new address is one nobody can sign for
pub fn handler(ctx: Context<TransferControl>, new_authority: Pubkey) -> Result<()> {
    require!(new_authority != Pubkey::default(), ErrorCode::InvalidController);

    let protocol_config = &mut ctx.accounts.protocol_config.load_mut()?;
    let old_authority = protocol_config.authority;

    protocol_config.authority = new_authority;

    emit!(ControlTransferred {
        old_authority,
        new_authority,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
