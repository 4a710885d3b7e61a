use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::AssociatedToken,
    token_interface::{Mint, TokenAccount, TokenInterface},
};

use crate::{
    constants::{PROTOCOL_CONFIG_SEED, SETTLEMENT_VAULT_SEED},
    distribution::{settle_token, SettlementPlan},
    errors::ErrorCode,
    events::BatchDistributed,
    state::{ProtocolConfig, RecipientInput, SettlementTerms, SettlementVault},
    utils::{token_balance, validate_fee_token_account, validate_token_destinations, VaultTokens},
};

#[derive(Accounts)]
pub struct DistributeToken<'info> {
    /// Must stay the first field: the pause check precedes every other account constraint
    #[account(
        mut,
        seeds = [PROTOCOL_CONFIG_SEED],
        bump = protocol_config.load()?.bump,
        constraint = !protocol_config.load()?.is_paused() @ ErrorCode::Paused
    )]
    pub protocol_config: AccountLoader<'info, ProtocolConfig>,

    /// Delegate of the payer's token account and authority of the vault ATA
    #[account(
        seeds = [SETTLEMENT_VAULT_SEED],
        bump = protocol_config.load()?.vault_bump
    )]
    pub settlement_vault: Account<'info, SettlementVault>,

    #[account(mut)]
    pub payer: Signer<'info>,

    #[account(
        mut,
        token::mint = mint,
        token::authority = payer,
        token::token_program = token_program,
    )]
    pub payer_token_account: InterfaceAccount<'info, TokenAccount>,

    pub mint: InterfaceAccount<'info, Mint>,

    /// CHECK: Fee wallet's ATA for this mint - validated in handler when a fee is due
    #[account(mut)]
    pub fee_token_account: UncheckedAccount<'info>,

    pub token_program: Interface<'info, TokenInterface>,
    pub associated_token_program: Program<'info, AssociatedToken>,
    pub system_program: Program<'info, System>,

    /// Created on first use of a mint
    #[account(
        init_if_needed,
        payer = payer,
        associated_token::mint = mint,
        associated_token::authority = settlement_vault,
        associated_token::token_program = token_program,
    )]
    pub vault_token_account: InterfaceAccount<'info, TokenAccount>,
}

/// Sends each recipient its own token amount
/// Payer must first approve the settlement vault as delegate for amount + fee
/// remaining_accounts: recipient ATAs (writable, in request order)
pub fn custom_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, DistributeToken<'info>>,
    recipients: Vec<RecipientInput>,
) -> Result<()> {
    let terms = ctx.accounts.protocol_config.load_mut()?.begin_settlement()?;

    let plan = SettlementPlan::custom(&recipients, terms.fee_bps)?;

    execute(ctx.accounts, ctx.remaining_accounts, &terms, &plan)
}

/// Sends every recipient the same token amount
/// Payer must first approve the settlement vault as delegate for amount + fee
/// remaining_accounts: recipient ATAs (writable, in request order)
pub fn equal_handler<'info>(
    ctx: Context<'_, '_, 'info, 'info, DistributeToken<'info>>,
    recipients: Vec<Pubkey>,
    amount_per_recipient: u64,
) -> Result<()> {
    let terms = ctx.accounts.protocol_config.load_mut()?.begin_settlement()?;

    let plan = SettlementPlan::equal(&recipients, amount_per_recipient, terms.fee_bps)?;

    execute(ctx.accounts, ctx.remaining_accounts, &terms, &plan)
}

fn execute<'info>(
    accounts: &DistributeToken<'info>,
    remaining_accounts: &'info [AccountInfo<'info>],
    terms: &SettlementTerms,
    plan: &SettlementPlan,
) -> Result<()> {
    let mint_key = accounts.mint.key();
    let token_program_key = accounts.token_program.key();
    let vault_key = accounts.settlement_vault.key();

    // Phase 1: every check before any token moves; no partial pull
    let source = &accounts.payer_token_account;
    require!(
        Option::<Pubkey>::from(source.delegate) == Some(vault_key),
        ErrorCode::AllowanceInsufficient
    );
    require!(
        source.delegated_amount >= plan.total_required,
        ErrorCode::AllowanceInsufficient
    );
    require!(
        source.amount >= plan.total_required,
        ErrorCode::AllowanceInsufficient
    );

    validate_token_destinations(plan, remaining_accounts, &mint_key, &token_program_key)?;

    if plan.fee_amount > 0 {
        validate_fee_token_account(
            &accounts.fee_token_account,
            &terms.fee_wallet,
            &mint_key,
            &token_program_key,
        )?;
    }

    let vault_token_info = accounts.vault_token_account.to_account_info();
    let vault_balance_before = accounts.vault_token_account.amount;

    // Phase 2: pull then push, signed by the vault PDA
    let bump = [terms.vault_bump];
    let seeds: &[&[u8]] = &[SETTLEMENT_VAULT_SEED, &bump];
    let signer_seeds = &[seeds];

    let mut destinations: Vec<AccountInfo<'info>> =
        remaining_accounts[..plan.recipient_count()].to_vec();
    destinations.push(accounts.fee_token_account.to_account_info());

    let mut transfer = VaultTokens::new(
        accounts.token_program.to_account_info(),
        accounts.mint.to_account_info(),
        accounts.mint.decimals,
        accounts.settlement_vault.to_account_info(),
        vault_token_info.clone(),
        source,
        destinations,
        signer_seeds,
    );
    let receipt = settle_token(plan, &terms.fee_wallet, &accounts.payer.key(), &mut transfer)?;

    // Reconcile: nothing stays behind in the vault
    require!(
        token_balance(&vault_token_info)? == vault_balance_before,
        ErrorCode::SettlementImbalance
    );

    // Phase 3: release the lock
    accounts.protocol_config.load_mut()?.end_settlement();

    #[cfg(feature = "verbose")]
    msg!(
        "Distributed {} tokens of {} to {} recipients, fee {}",
        receipt.distributed,
        mint_key,
        receipt.recipient_count,
        receipt.fee_amount
    );

    emit!(BatchDistributed {
        payer: accounts.payer.key(),
        mint: Some(mint_key),
        recipient_count: receipt.recipient_count,
        total_requested: receipt.total_requested,
        fee_amount: receipt.fee_amount,
        refund: receipt.refund,
        timestamp: Clock::get()?.unix_timestamp,
    });

    Ok(())
}
