// Fee configuration
pub const MAX_FEE_BPS: u16 = 500;              // 5% hard ceiling
pub const BPS_DENOMINATOR: u64 = 10_000;       // 10000 bps = 100%

// Recipient limits
pub const MIN_RECIPIENTS: usize = 1;
pub const MAX_RECIPIENTS: usize = 200;

// PDA seeds
pub const PROTOCOL_CONFIG_SEED: &[u8] = b"protocol_config";
pub const SETTLEMENT_VAULT_SEED: &[u8] = b"settlement_vault";

// Account sizes for zero-copy structs
// ProtocolConfig:
// - discriminator: 8
// - authority: 32
// - fee_wallet: 32
// - fee_bps: 2
// - paused: 1
// - settlement_lock: 1
// - bump: 1
// - vault_bump: 1
// Total: 8 + 32 + 32 + 2 + 1 + 1 + 1 + 1 = 78
// NOTE: #[repr(C)] keeps fee_bps 2-byte aligned at offset 64, no padding needed
pub const PROTOCOL_CONFIG_SIZE: usize = 78;

// SettlementVault carries no data beyond its discriminator
pub const SETTLEMENT_VAULT_SIZE: usize = 8;
