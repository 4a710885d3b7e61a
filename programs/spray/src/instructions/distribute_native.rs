use anchor_lang::{
    prelude::*,
    system_program::{self, Transfer},
};

use crate::{
    constants::{PROTOCOL_CONFIG_SEED, SETTLEMENT_VAULT_SEED},
    distribution::{settle_native, SettlementPlan},
    errors::ErrorCode,
    events::BatchDistributed,
    state::{ProtocolConfig, RecipientInput, SettlementTerms, SettlementVault},
    utils::{validate_native_destinations, VaultLamports},
};

#[derive(Accounts)]
pub struct DistributeNative<'info> {
    /// Must stay the first field: the pause check precedes every other account constraint
    #[account(
        mut,
        seeds = [PROTOCOL_CONFIG_SEED],
        bump = protocol_config.load()?.bump,
        constraint = !protocol_config.load()?.is_paused() @ ErrorCode::Paused
    )]
    pub protocol_config: AccountLoader<'info, ProtocolConfig>,

    #[account(
        mut,
        seeds = [SETTLEMENT_VAULT_SEED],
        bump = protocol_config.load()?.vault_bump
    )]
    pub settlement_vault: Account<'info, SettlementVault>,

    #[account(mut)]
    pub payer: Signer<'info>,

    /// CHECK: Only receives lamports; must be the configured fee wallet
    #[account(
        mut,
        constraint = fee_wallet.key() == protocol_config.load()?.fee_wallet @ ErrorCode::InvalidFeeRecipient
    )]
    pub fee_wallet: UncheckedAccount<'info>,

    pub system_program: Program<'info, System>,
}

/// Sends each recipient its own lamport amount
/// remaining_accounts: recipient wallets (writable, in request order)
pub fn custom_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, DistributeNative<'info>>,
    recipients: Vec<RecipientInput>,
    supplied_lamports: u64,
) -> Result<()> {
    let terms = ctx.accounts.protocol_config.load_mut()?.begin_settlement()?;

    let plan = SettlementPlan::custom(&recipients, terms.fee_bps)?;

    execute(ctx.accounts, ctx.remaining_accounts, &terms, &plan, supplied_lamports)
}

/// Sends every recipient the same lamport amount
/// remaining_accounts: recipient wallets (writable, in request order)
pub fn equal_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, DistributeNative<'info>>,
    recipients: Vec<Pubkey>,
    amount_per_recipient: u64,
    supplied_lamports: u64,
) -> Result<()> {
    let terms = ctx.accounts.protocol_config.load_mut()?.begin_settlement()?;

    let plan = SettlementPlan::equal(&recipients, amount_per_recipient, terms.fee_bps)?;

    execute(ctx.accounts, ctx.remaining_accounts, &terms, &plan, supplied_lamports)
}

fn execute<'info>(
    accounts: &DistributeNative<'info>,
    remaining_accounts: &'info [AccountInfo<'info>],
    terms: &SettlementTerms,
    plan: &SettlementPlan,
    supplied_lamports: u64,
) -> Result<()> {
    // Phase 1: every check before any lamport moves
    require!(
        supplied_lamports >= plan.total_required,
        ErrorCode::InsufficientFunds
    );
    validate_native_destinations(plan, remaining_accounts)?;

    let vault_info = accounts.settlement_vault.to_account_info();
    let vault_balance_before = vault_info.lamports();

    // Phase 2: take the supplied funds into the vault, then pay out of it.
    // The config borrow is not held across the CPI.
    system_program::transfer(
        CpiContext::new(
            accounts.system_program.to_account_info(),
            Transfer {
                from: accounts.payer.to_account_info(),
                to: vault_info.clone(),
            },
        ),
        supplied_lamports,
    )?;

    let mut destinations: Vec<AccountInfo<'info>> =
        remaining_accounts[..plan.recipient_count()].to_vec();
    destinations.push(accounts.fee_wallet.to_account_info());
    destinations.push(accounts.payer.to_account_info());

    let mut transfer = VaultLamports::new(vault_info.clone(), destinations);
    let receipt = settle_native(
        plan,
        &terms.fee_wallet,
        &accounts.payer.key(),
        supplied_lamports,
        &mut transfer,
    )?;

    // Reconcile: the vault ends where it started
    require!(
        vault_info.lamports() == vault_balance_before,
        ErrorCode::SettlementImbalance
    );

    // Phase 3: release the lock
    accounts.protocol_config.load_mut()?.end_settlement();

    #[cfg(feature = "verbose")]
    msg!(
        "Distributed {} lamports to {} recipients, fee {}, refund {}",
        receipt.distributed,
        receipt.recipient_count,
        receipt.fee_amount,
        receipt.refund
    );

    emit!(BatchDistributed {
        payer: accounts.payer.key(),
        mint: None,
        recipient_count: receipt.recipient_count,
        total_requested: receipt.total_requested,
        fee_amount: receipt.fee_amount,
        refund: receipt.refund,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
