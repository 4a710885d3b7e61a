use anchor_lang::prelude::*;
use anchor_spl::{
    associated_token::get_associated_token_address_with_program_id,
    token, token_2022,
    token_interface::{self, TokenAccount, TransferChecked},
};

use crate::{
    distribution::SettlementPlan,
    errors::ErrorCode,
    transfer::{NativeTransfer, TokenTransfer},
};

/// Checks that the first accounts in `remaining_accounts` are the plan's
/// recipients, in order, and writable
pub fn validate_native_destinations(
    plan: &SettlementPlan,
    remaining_accounts: &[AccountInfo],
) -> Result<()> {
    require!(
        remaining_accounts.len() >= plan.recipient_count(),
        ErrorCode::InsufficientRemainingAccounts
    );

    for (payout, info) in plan.payouts.iter().zip(remaining_accounts) {
        require!(info.key() == payout.recipient, ErrorCode::RecipientAccountMismatch);
        require!(info.is_writable, ErrorCode::RecipientAccountMismatch);
    }

    Ok(())
}

/// Checks that the first accounts in `remaining_accounts` are the canonical
/// ATAs of the plan's recipients, in order, writable and initialized
pub fn validate_token_destinations(
    plan: &SettlementPlan,
    remaining_accounts: &[AccountInfo],
    mint: &Pubkey,
    token_program: &Pubkey,
) -> Result<()> {
    require!(
        remaining_accounts.len() >= plan.recipient_count(),
        ErrorCode::InsufficientRemainingAccounts
    );

    for (payout, info) in plan.payouts.iter().zip(remaining_accounts) {
        let expected_ata =
            get_associated_token_address_with_program_id(&payout.recipient, mint, token_program);
        require!(info.key() == expected_ata, ErrorCode::RecipientAccountMismatch);
        require!(info.is_writable, ErrorCode::RecipientAccountMismatch);

        validate_token_account(info, &payout.recipient, mint)
            .map_err(|_| error!(ErrorCode::RecipientAccountMismatch))?;
    }

    Ok(())
}

/// Checks the account that will receive a token fee
pub fn validate_fee_token_account(
    info: &AccountInfo,
    fee_wallet: &Pubkey,
    mint: &Pubkey,
    token_program: &Pubkey,
) -> Result<()> {
    let expected_ata = get_associated_token_address_with_program_id(fee_wallet, mint, token_program);
    require!(info.key() == expected_ata, ErrorCode::InvalidFeeRecipient);
    require!(info.is_writable, ErrorCode::InvalidFeeRecipient);

    validate_token_account(info, fee_wallet, mint)
        .map_err(|_| error!(ErrorCode::InvalidFeeRecipient))
}

/// Validates that a token account exists, belongs to a token program and is
/// held by `owner` for `mint`
pub fn validate_token_account(info: &AccountInfo, owner: &Pubkey, mint: &Pubkey) -> Result<()> {
    require!(!info.data_is_empty(), ErrorCode::RecipientAccountMismatch);

    // SPL Token or Token-2022
    let valid_owner = info.owner == &token::ID || info.owner == &token_2022::ID;
    require!(valid_owner, ErrorCode::InvalidTokenProgram);

    let token_account = TokenAccount::try_deserialize(&mut &info.data.borrow()[..])
        .map_err(|_| ErrorCode::RecipientAccountMismatch)?;

    require!(token_account.owner == *owner, ErrorCode::RecipientAccountMismatch);
    require!(token_account.mint == *mint, ErrorCode::RecipientAccountMismatch);

    Ok(())
}

/// Current balance of a token account, read from its data
pub fn token_balance(info: &AccountInfo) -> Result<u64> {
    let token_account = TokenAccount::try_deserialize(&mut &info.data.borrow()[..])?;
    Ok(token_account.amount)
}

/// Offset of the `Option<Pubkey>` upgrade authority in upgradeable-loader
/// program data: 4-byte enum tag, then the 8-byte deploy slot
const UPGRADE_AUTHORITY_OFFSET: usize = 12;
const PROGRAM_DATA_HEADER_LEN: usize = UPGRADE_AUTHORITY_OFFSET + 1 + 32;

/// Reads the upgrade authority out of a program data account's bytes.
/// An immutable program has none and is rejected
pub fn upgrade_authority(program_data: &[u8]) -> Result<Pubkey> {
    require!(
        program_data.len() >= PROGRAM_DATA_HEADER_LEN,
        ErrorCode::Unauthorized
    );
    require!(
        program_data[UPGRADE_AUTHORITY_OFFSET] == 1,
        ErrorCode::Unauthorized
    );

    let key = &program_data[UPGRADE_AUTHORITY_OFFSET + 1..PROGRAM_DATA_HEADER_LEN];
    Pubkey::try_from(key).map_err(|_| error!(ErrorCode::Unauthorized))
}

/// Requires `program_data` to be this program's data account and `authority`
/// its current upgrade authority
pub fn verify_upgrade_authority(program_data: &AccountInfo, authority: &Pubkey) -> Result<()> {
    let (expected, _) = Pubkey::find_program_address(
        &[crate::ID.as_ref()],
        &anchor_lang::solana_program::bpf_loader_upgradeable::id(),
    );
    require_keys_eq!(program_data.key(), expected, ErrorCode::Unauthorized);

    let upgrade_authority = upgrade_authority(&program_data.try_borrow_data()?)?;
    require_keys_eq!(upgrade_authority, *authority, ErrorCode::Unauthorized);

    Ok(())
}

fn find_destination<'a, 'info>(
    destinations: &'a [AccountInfo<'info>],
    key: &Pubkey,
) -> Result<&'a AccountInfo<'info>> {
    let info = destinations
        .iter()
        .find(|info| info.key == key)
        .ok_or(ErrorCode::TransferFailed)?;
    require!(info.is_writable, ErrorCode::TransferFailed);
    Ok(info)
}

/// Pays lamports straight out of the program-owned settlement vault
pub struct VaultLamports<'info> {
    vault: AccountInfo<'info>,
    destinations: Vec<AccountInfo<'info>>,
}

impl<'info> VaultLamports<'info> {
    pub fn new(vault: AccountInfo<'info>, destinations: Vec<AccountInfo<'info>>) -> Self {
        Self { vault, destinations }
    }
}

impl NativeTransfer for VaultLamports<'_> {
    fn send_native(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        let destination = find_destination(&self.destinations, to)?;

        // Debit first; a destination that aliases the vault nets to zero
        let debited = self
            .vault
            .lamports()
            .checked_sub(amount)
            .ok_or(ErrorCode::InsufficientFunds)?;
        **self.vault.try_borrow_mut_lamports()? = debited;

        let credited = destination
            .lamports()
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        **destination.try_borrow_mut_lamports()? = credited;

        #[cfg(feature = "verbose")]
        msg!("Sent {} lamports to {}", amount, to);

        Ok(())
    }
}

/// Pulls tokens into the vault's token account using the payer's delegation
/// to the vault PDA, and pushes them out to recipients' ATAs
pub struct VaultTokens<'a, 'info> {
    token_program: AccountInfo<'info>,
    mint: AccountInfo<'info>,
    decimals: u8,
    vault_authority: AccountInfo<'info>,
    vault_token_account: AccountInfo<'info>,
    source: AccountInfo<'info>,
    source_owner: Pubkey,
    destinations: Vec<AccountInfo<'info>>,
    signer_seeds: &'a [&'a [&'a [u8]]],
}

impl<'a, 'info> VaultTokens<'a, 'info> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        token_program: AccountInfo<'info>,
        mint: AccountInfo<'info>,
        decimals: u8,
        vault_authority: AccountInfo<'info>,
        vault_token_account: AccountInfo<'info>,
        source: &InterfaceAccount<'info, TokenAccount>,
        destinations: Vec<AccountInfo<'info>>,
        signer_seeds: &'a [&'a [&'a [u8]]],
    ) -> Self {
        Self {
            token_program,
            mint,
            decimals,
            vault_authority,
            vault_token_account,
            source_owner: source.owner,
            source: source.to_account_info(),
            destinations,
            signer_seeds,
        }
    }

    fn transfer(&self, from: AccountInfo<'info>, to: AccountInfo<'info>, amount: u64) -> Result<()> {
        let cpi_accounts = TransferChecked {
            from,
            mint: self.mint.clone(),
            to,
            authority: self.vault_authority.clone(),
        };
        let cpi_ctx = CpiContext::new_with_signer(
            self.token_program.clone(),
            cpi_accounts,
            self.signer_seeds,
        );
        token_interface::transfer_checked(cpi_ctx, amount, self.decimals)
    }
}

impl TokenTransfer for VaultTokens<'_, '_> {
    fn pull_token(&mut self, from: &Pubkey, amount: u64) -> Result<()> {
        require!(self.source_owner == *from, ErrorCode::TransferFailed);

        let before = token_balance(&self.vault_token_account)?;

        self.transfer(self.source.clone(), self.vault_token_account.clone(), amount)?;

        // Fee-on-transfer mints deliver less than was pulled
        let after = token_balance(&self.vault_token_account)?;
        let received = after.checked_sub(before).ok_or(ErrorCode::MathUnderflow)?;
        require!(received == amount, ErrorCode::SettlementImbalance);

        Ok(())
    }

    fn push_token(&mut self, to: &Pubkey, amount: u64) -> Result<()> {
        let ata = get_associated_token_address_with_program_id(
            to,
            self.mint.key,
            self.token_program.key,
        );
        let destination = find_destination(&self.destinations, &ata)?.clone();

        self.transfer(self.vault_token_account.clone(), destination, amount)?;

        #[cfg(feature = "verbose")]
        msg!("Sent {} tokens to {}", amount, to);

        Ok(())
    }
}
