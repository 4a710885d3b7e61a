use anchor_lang::prelude::*;

use crate::{
    constants::{
        MAX_FEE_BPS, PROTOCOL_CONFIG_SEED, PROTOCOL_CONFIG_SIZE, SETTLEMENT_VAULT_SEED,
        SETTLEMENT_VAULT_SIZE,
    },
    errors::ErrorCode,
    events::ProtocolInitialized,
    state::{ProtocolConfig, SettlementVault},
    utils::verify_upgrade_authority,
};

#[derive(Accounts)]
pub struct InitializeProtocol<'info> {
    #[account(
        init,
        payer = authority,
        space = PROTOCOL_CONFIG_SIZE,
        seeds = [PROTOCOL_CONFIG_SEED],
        bump
    )]
    pub protocol_config: AccountLoader<'info, ProtocolConfig>,

    #[account(
        init,
        payer = authority,
        space = SETTLEMENT_VAULT_SIZE,
        seeds = [SETTLEMENT_VAULT_SEED],
        bump
    )]
    pub settlement_vault: Account<'info, SettlementVault>,

    #[account(mut)]
    pub authority: Signer<'info>,

    /// CHECK: Program data PDA and upgrade authority are verified in the handler
    #[account(
        constraint = program_data.owner == &anchor_lang::solana_program::bpf_loader_upgradeable::id()
            @ ErrorCode::Unauthorized
    )]
    pub program_data: AccountInfo<'info>,

    pub system_program: Program<'info, System>,
}

/// Initializes the protocol configuration and settlement vault
/// Can only be called once by the program's upgrade authority
pub fn handler(ctx: Context<InitializeProtocol>, fee_wallet: Pubkey, fee_bps: u16) -> Result<()> {
    require!(fee_wallet != Pubkey::default(), ErrorCode::ZeroAddress);
    require!(fee_bps <= MAX_FEE_BPS, ErrorCode::FeeTooHigh);

    verify_upgrade_authority(&ctx.accounts.program_data, &ctx.accounts.authority.key())?;

    let protocol_config = &mut ctx.accounts.protocol_config.load_init()?;

    protocol_config.authority = ctx.accounts.authority.key();
    protocol_config.fee_wallet = fee_wallet;
    protocol_config.fee_bps = fee_bps;
    protocol_config.paused = 0;
    protocol_config.settlement_lock = 0;
    protocol_config.bump = ctx.bumps.protocol_config;
    protocol_config.vault_bump = ctx.bumps.settlement_vault;

    emit!(ProtocolInitialized {
        authority: ctx.accounts.authority.key(),
        fee_wallet,
        fee_bps,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
