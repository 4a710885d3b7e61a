//! Instruction builders for Mollusk tests
//!
//! NOTE: This is written for mollusk-svm 0.5.1 with solana-sdk 2.2
//! All imports from solana_sdk::*, not modular crates

use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

/// Program ID - must match lib.rs
pub const PROGRAM_ID: Pubkey = solana_sdk::pubkey!("SPRAYvGq1mS4hxCr2aq7yGTsK4G8Uu8Vu3dYFZ1RJh2");

// Anchor discriminators (first 8 bytes of sha256("global:function_name"))
// These must match the IDL/program
pub const DISCRIMINATOR_INITIALIZE_PROTOCOL: [u8; 8] = [0xbc, 0xe9, 0xfc, 0x6a, 0x86, 0x92, 0xca, 0x5b];
pub const DISCRIMINATOR_UPDATE_FEE: [u8; 8] = [0xe8, 0xfd, 0xc3, 0xf7, 0x94, 0xd4, 0x49, 0xde];
pub const DISCRIMINATOR_UPDATE_FEE_RECIPIENT: [u8; 8] = [0xf9, 0x00, 0xc6, 0x23, 0xb7, 0x7b, 0x39, 0xbc];
pub const DISCRIMINATOR_PAUSE: [u8; 8] = [0xd3, 0x16, 0xdd, 0xfb, 0x4a, 0x79, 0xc1, 0x2f];
pub const DISCRIMINATOR_UNPAUSE: [u8; 8] = [0xa9, 0x90, 0x04, 0x26, 0x0a, 0x8d, 0xbc, 0xff];
pub const DISCRIMINATOR_TRANSFER_CONTROL: [u8; 8] = [0xcb, 0x78, 0x2c, 0x77, 0x17, 0x1b, 0x0b, 0x81];
pub const DISCRIMINATOR_DISTRIBUTE_NATIVE: [u8; 8] = [0x20, 0xc8, 0xac, 0x31, 0x39, 0xea, 0x89, 0x59];
pub const DISCRIMINATOR_DISTRIBUTE_EQUAL_NATIVE: [u8; 8] = [0x23, 0x64, 0xb5, 0xe0, 0xa6, 0x58, 0xd2, 0x08];
pub const DISCRIMINATOR_DISTRIBUTE_TOKEN: [u8; 8] = [0xad, 0xfa, 0xe5, 0x9f, 0x0c, 0x73, 0x34, 0x72];
pub const DISCRIMINATOR_DISTRIBUTE_EQUAL_TOKEN: [u8; 8] = [0x26, 0x3b, 0xc2, 0xae, 0x1a, 0xd9, 0xa0, 0x23];
pub const DISCRIMINATOR_CALCULATE_FEE: [u8; 8] = [0x68, 0x68, 0x64, 0x73, 0xe9, 0xa8, 0x0f, 0xda];
pub const DISCRIMINATOR_CALCULATE_TOTAL_COST: [u8; 8] = [0x0a, 0x2f, 0x49, 0x2f, 0x9d, 0x14, 0xf8, 0xa4];

/// Recipient input for instructions
#[derive(Clone, Copy, Debug)]
pub struct RecipientInput {
    pub address: Pubkey,
    pub amount: u64,
}

/// Derive protocol config PDA
pub fn derive_protocol_config() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"protocol_config"], &PROGRAM_ID)
}

/// Derive settlement vault PDA
pub fn derive_settlement_vault() -> (Pubkey, u8) {
    Pubkey::find_program_address(&[b"settlement_vault"], &PROGRAM_ID)
}

/// Derive program data PDA for BPF upgradeable loader
pub fn derive_program_data() -> (Pubkey, u8) {
    Pubkey::find_program_address(
        &[PROGRAM_ID.as_ref()],
        &solana_sdk::bpf_loader_upgradeable::id(),
    )
}

fn with_discriminator(discriminator: [u8; 8], args: &[u8]) -> Vec<u8> {
    let mut data = Vec::with_capacity(8 + args.len());
    data.extend_from_slice(&discriminator);
    data.extend_from_slice(args);
    data
}

/// Borsh Vec<RecipientInput>: 4-byte length prefix + (address, amount) per entry
fn encode_recipients(recipients: &[RecipientInput]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + recipients.len() * 40);
    data.extend_from_slice(&(recipients.len() as u32).to_le_bytes());
    for recipient in recipients {
        data.extend_from_slice(&recipient.address.to_bytes());
        data.extend_from_slice(&recipient.amount.to_le_bytes());
    }
    data
}

/// Borsh Vec<Pubkey>: 4-byte length prefix + addresses
fn encode_addresses(addresses: &[Pubkey]) -> Vec<u8> {
    let mut data = Vec::with_capacity(4 + addresses.len() * 32);
    data.extend_from_slice(&(addresses.len() as u32).to_le_bytes());
    for address in addresses {
        data.extend_from_slice(&address.to_bytes());
    }
    data
}

/// Build initialize_protocol instruction
///
/// Accounts:
/// 0. protocol_config (writable) - PDA to initialize
/// 1. settlement_vault (writable) - PDA to initialize
/// 2. authority (writable, signer) - Must be upgrade authority
/// 3. program_data - BPF loader program data
/// 4. system_program
pub fn build_initialize_protocol(
    authority: Pubkey,
    program_data: Pubkey,
    fee_wallet: Pubkey,
    fee_bps: u16,
) -> Instruction {
    let mut args = fee_wallet.to_bytes().to_vec();
    args.extend_from_slice(&fee_bps.to_le_bytes());

    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(derive_protocol_config().0, false),
            AccountMeta::new(derive_settlement_vault().0, false),
            AccountMeta::new(authority, true),
            AccountMeta::new_readonly(program_data, false),
            AccountMeta::new_readonly(system_program::id(), false),
        ],
        data: with_discriminator(DISCRIMINATOR_INITIALIZE_PROTOCOL, &args),
    }
}

/// Accounts shared by every admin instruction:
/// 0. protocol_config (writable)
/// 1. authority (signer)
fn admin_instruction(authority: Pubkey, data: Vec<u8>) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![
            AccountMeta::new(derive_protocol_config().0, false),
            AccountMeta::new_readonly(authority, true),
        ],
        data,
    }
}

pub fn build_update_fee(authority: Pubkey, new_fee_bps: u16) -> Instruction {
    admin_instruction(
        authority,
        with_discriminator(DISCRIMINATOR_UPDATE_FEE, &new_fee_bps.to_le_bytes()),
    )
}

pub fn build_update_fee_recipient(authority: Pubkey, new_fee_wallet: Pubkey) -> Instruction {
    admin_instruction(
        authority,
        with_discriminator(DISCRIMINATOR_UPDATE_FEE_RECIPIENT, &new_fee_wallet.to_bytes()),
    )
}

pub fn build_pause(authority: Pubkey) -> Instruction {
    admin_instruction(authority, DISCRIMINATOR_PAUSE.to_vec())
}

pub fn build_unpause(authority: Pubkey) -> Instruction {
    admin_instruction(authority, DISCRIMINATOR_UNPAUSE.to_vec())
}

pub fn build_transfer_control(authority: Pubkey, new_authority: Pubkey) -> Instruction {
    admin_instruction(
        authority,
        with_discriminator(DISCRIMINATOR_TRANSFER_CONTROL, &new_authority.to_bytes()),
    )
}

/// Accounts:
/// 0. protocol_config (writable)
/// 1. settlement_vault (writable)
/// 2. payer (writable, signer)
/// 3. fee_wallet (writable)
/// 4. system_program
/// remaining_accounts: recipient wallets (writable, in order)
fn native_instruction(
    payer: Pubkey,
    fee_wallet: Pubkey,
    recipients: &[Pubkey],
    data: Vec<u8>,
) -> Instruction {
    let mut accounts = vec![
        AccountMeta::new(derive_protocol_config().0, false),
        AccountMeta::new(derive_settlement_vault().0, false),
        AccountMeta::new(payer, true),
        AccountMeta::new(fee_wallet, false),
        AccountMeta::new_readonly(system_program::id(), false),
    ];

    for recipient in recipients {
        accounts.push(AccountMeta::new(*recipient, false));
    }

    Instruction {
        program_id: PROGRAM_ID,
        accounts,
        data,
    }
}

/// Build distribute_native instruction
pub fn build_distribute_native(
    payer: Pubkey,
    fee_wallet: Pubkey,
    recipients: &[RecipientInput],
    supplied_lamports: u64,
) -> Instruction {
    let mut args = encode_recipients(recipients);
    args.extend_from_slice(&supplied_lamports.to_le_bytes());

    let wallets: Vec<Pubkey> = recipients.iter().map(|r| r.address).collect();
    native_instruction(
        payer,
        fee_wallet,
        &wallets,
        with_discriminator(DISCRIMINATOR_DISTRIBUTE_NATIVE, &args),
    )
}

/// Build distribute_equal_native instruction
pub fn build_distribute_equal_native(
    payer: Pubkey,
    fee_wallet: Pubkey,
    recipients: &[Pubkey],
    amount_per_recipient: u64,
    supplied_lamports: u64,
) -> Instruction {
    let mut args = encode_addresses(recipients);
    args.extend_from_slice(&amount_per_recipient.to_le_bytes());
    args.extend_from_slice(&supplied_lamports.to_le_bytes());

    native_instruction(
        payer,
        fee_wallet,
        recipients,
        with_discriminator(DISCRIMINATOR_DISTRIBUTE_EQUAL_NATIVE, &args),
    )
}

/// Addresses a token distribution touches
pub struct TokenAccounts {
    pub payer: Pubkey,
    pub payer_token_account: Pubkey,
    pub mint: Pubkey,
    pub fee_token_account: Pubkey,
    pub vault_token_account: Pubkey,
}

/// Accounts (matching DistributeToken context order):
/// 0. protocol_config (writable)
/// 1. settlement_vault
/// 2. payer (writable, signer)
/// 3. payer_token_account (writable)
/// 4. mint
/// 5. fee_token_account (writable)
/// 6. token_program
/// 7. associated_token_program
/// 8. system_program
/// 9. vault_token_account (writable)
/// remaining_accounts: recipient ATAs (writable, in order)
fn token_instruction(token: &TokenAccounts, recipient_atas: &[Pubkey], data: Vec<u8>) -> Instruction {
    let mut accounts = vec![
        AccountMeta::new(derive_protocol_config().0, false),
        AccountMeta::new_readonly(derive_settlement_vault().0, false),
        AccountMeta::new(token.payer, true),
        AccountMeta::new(token.payer_token_account, false),
        AccountMeta::new_readonly(token.mint, false),
        AccountMeta::new(token.fee_token_account, false),
        AccountMeta::new_readonly(spl_token::id(), false),
        AccountMeta::new_readonly(spl_associated_token_account::id(), false),
        AccountMeta::new_readonly(system_program::id(), false),
        AccountMeta::new(token.vault_token_account, false),
    ];

    for ata in recipient_atas {
        accounts.push(AccountMeta::new(*ata, false));
    }

    Instruction {
        program_id: PROGRAM_ID,
        accounts,
        data,
    }
}

/// Build distribute_token instruction
pub fn build_distribute_token(
    token: &TokenAccounts,
    recipients: &[RecipientInput],
    recipient_atas: &[Pubkey],
) -> Instruction {
    token_instruction(
        token,
        recipient_atas,
        with_discriminator(DISCRIMINATOR_DISTRIBUTE_TOKEN, &encode_recipients(recipients)),
    )
}

/// Build distribute_equal_token instruction
pub fn build_distribute_equal_token(
    token: &TokenAccounts,
    recipients: &[Pubkey],
    amount_per_recipient: u64,
    recipient_atas: &[Pubkey],
) -> Instruction {
    let mut args = encode_addresses(recipients);
    args.extend_from_slice(&amount_per_recipient.to_le_bytes());

    token_instruction(
        token,
        recipient_atas,
        with_discriminator(DISCRIMINATOR_DISTRIBUTE_EQUAL_TOKEN, &args),
    )
}

/// Build calculate_fee instruction
///
/// Accounts:
/// 0. protocol_config
pub fn build_calculate_fee(amount: u64) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![AccountMeta::new_readonly(derive_protocol_config().0, false)],
        data: with_discriminator(DISCRIMINATOR_CALCULATE_FEE, &amount.to_le_bytes()),
    }
}

/// Build calculate_total_cost instruction
pub fn build_calculate_total_cost(amount: u64) -> Instruction {
    Instruction {
        program_id: PROGRAM_ID,
        accounts: vec![AccountMeta::new_readonly(derive_protocol_config().0, false)],
        data: with_discriminator(DISCRIMINATOR_CALCULATE_TOTAL_COST, &amount.to_le_bytes()),
    }
}
