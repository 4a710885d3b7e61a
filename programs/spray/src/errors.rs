use anchor_lang::prelude::*;

#[error_code]
pub enum ErrorCode {
    #[msg("Recipient count must be between 1 and 200")]
    InvalidRecipientCount,

    #[msg("Amount must be greater than zero")]
    InvalidAmount,

    #[msg("Address cannot be zero")]
    ZeroAddress,

    #[msg("Recipient account does not match the requested recipient")]
    RecipientAccountMismatch,

    #[msg("Not enough accounts provided in remaining_accounts")]
    InsufficientRemainingAccounts,

    #[msg("Invalid protocol fee recipient")]
    InvalidFeeRecipient,

    #[msg("Invalid token program")]
    InvalidTokenProgram,

    #[msg("Supplied funds do not cover amount plus fee")]
    InsufficientFunds,

    #[msg("Token allowance or balance does not cover amount plus fee")]
    AllowanceInsufficient,

    #[msg("Asset transfer failed")]
    TransferFailed,

    #[msg("Settlement did not balance")]
    SettlementImbalance,

    #[msg("Protocol is paused")]
    Paused,

    #[msg("Protocol is already paused")]
    AlreadyPaused,

    #[msg("Protocol is not paused")]
    NotPaused,

    #[msg("A settlement is already in progress")]
    SettlementInProgress,

    #[msg("Unauthorized")]
    Unauthorized,

    #[msg("Fee exceeds maximum of 500 bps")]
    FeeTooHigh,

    #[msg("Invalid controller address")]
    InvalidController,

    #[msg("Math overflow")]
    MathOverflow,

    #[msg("Math underflow")]
    MathUnderflow,
}
