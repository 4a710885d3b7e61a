use anchor_lang::prelude::*;

use crate::{
    constants::PROTOCOL_CONFIG_SEED,
    distribution::{calculate_fee, calculate_total_cost},
    errors::ErrorCode,
    state::ProtocolConfig,
};

#[derive(Accounts)]
pub struct Quote<'info> {
    #[account(
        seeds = [PROTOCOL_CONFIG_SEED],
        bump = protocol_config.load()?.bump
    )]
    pub protocol_config: AccountLoader<'info, ProtocolConfig>,
}

/// Fee a settlement of `amount` would be charged at the current rate
pub fn fee_handler(ctx: Context<Quote>, amount: u64) -> Result<u64> {
    let fee_bps = ctx.accounts.protocol_config.load()?.fee_bps;
    let fee = calculate_fee(amount, fee_bps).ok_or(ErrorCode::MathOverflow)?;
    Ok(fee)
}

/// Amount plus fee, i.e. what a payer must supply or approve
pub fn total_cost_handler(ctx: Context<Quote>, amount: u64) -> Result<u64> {
    let fee_bps = ctx.accounts.protocol_config.load()?.fee_bps;
    let total = calculate_total_cost(amount, fee_bps).ok_or(ErrorCode::MathOverflow)?;
    Ok(total)
}
