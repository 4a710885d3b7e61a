use anchor_lang::prelude::*;

use crate::{
    constants::{BPS_DENOMINATOR, MAX_RECIPIENTS, MIN_RECIPIENTS},
    errors::ErrorCode,
    state::RecipientInput,
    transfer::{NativeTransfer, TokenTransfer},
};

/// Protocol fee owed on `amount`, rounded down
/// Returns None on overflow
pub fn calculate_fee(amount: u64, fee_bps: u16) -> Option<u64> {
    (amount as u128)
        .checked_mul(fee_bps as u128)?
        .checked_div(BPS_DENOMINATOR as u128)?
        .try_into()
        .ok()
}

/// Amount plus protocol fee
/// Returns None on overflow
pub fn calculate_total_cost(amount: u64, fee_bps: u16) -> Option<u64> {
    amount.checked_add(calculate_fee(amount, fee_bps)?)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Payout {
    pub recipient: Pubkey,
    pub amount: u64,
}

/// Amounts owed for one batch, derived from the request and the fee rate
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SettlementPlan {
    pub payouts: Vec<Payout>,
    pub total_requested: u64,
    pub fee_amount: u64,
    pub total_required: u64,
}

impl SettlementPlan {
    /// Plan for a batch where every recipient names its own amount
    pub fn custom(recipients: &[RecipientInput], fee_bps: u16) -> Result<Self> {
        require_recipient_count(recipients.len())?;

        let mut payouts = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            require!(recipient.address != Pubkey::default(), ErrorCode::ZeroAddress);
            require!(recipient.amount > 0, ErrorCode::InvalidAmount);

            payouts.push(Payout {
                recipient: recipient.address,
                amount: recipient.amount,
            });
        }

        Self::from_payouts(payouts, fee_bps)
    }

    /// Plan for a batch paying the same amount to every recipient
    pub fn equal(recipients: &[Pubkey], amount_per_recipient: u64, fee_bps: u16) -> Result<Self> {
        require_recipient_count(recipients.len())?;
        require!(amount_per_recipient > 0, ErrorCode::InvalidAmount);

        let mut payouts = Vec::with_capacity(recipients.len());
        for recipient in recipients {
            require!(*recipient != Pubkey::default(), ErrorCode::ZeroAddress);

            payouts.push(Payout {
                recipient: *recipient,
                amount: amount_per_recipient,
            });
        }

        Self::from_payouts(payouts, fee_bps)
    }

    fn from_payouts(payouts: Vec<Payout>, fee_bps: u16) -> Result<Self> {
        let total_requested = payouts
            .iter()
            .try_fold(0u64, |acc, p| acc.checked_add(p.amount))
            .ok_or(ErrorCode::MathOverflow)?;

        let fee_amount = calculate_fee(total_requested, fee_bps).ok_or(ErrorCode::MathOverflow)?;

        let total_required = total_requested
            .checked_add(fee_amount)
            .ok_or(ErrorCode::MathOverflow)?;

        Ok(Self {
            payouts,
            total_requested,
            fee_amount,
            total_required,
        })
    }

    pub fn recipient_count(&self) -> usize {
        self.payouts.len()
    }
}

fn require_recipient_count(count: usize) -> Result<()> {
    require!(
        (MIN_RECIPIENTS..=MAX_RECIPIENTS).contains(&count),
        ErrorCode::InvalidRecipientCount
    );
    Ok(())
}

/// Funds supplied for one settlement and where they went.
///
/// Every disbursement is recorded before the matching transfer is invoked,
/// so the ledger never lags behind the value that has left the vault.
#[derive(Debug)]
pub struct FundsLedger {
    supplied: u64,
    disbursed: u64,
    refunded: u64,
}

impl FundsLedger {
    pub fn new(supplied: u64) -> Self {
        Self {
            supplied,
            disbursed: 0,
            refunded: 0,
        }
    }

    pub fn remaining(&self) -> Result<u64> {
        let remaining = self
            .supplied
            .checked_sub(self.disbursed)
            .ok_or(ErrorCode::MathUnderflow)?
            .checked_sub(self.refunded)
            .ok_or(ErrorCode::MathUnderflow)?;
        Ok(remaining)
    }

    pub fn disburse(&mut self, amount: u64) -> Result<()> {
        require!(amount <= self.remaining()?, ErrorCode::InsufficientFunds);
        self.disbursed = self
            .disbursed
            .checked_add(amount)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(())
    }

    /// Marks everything not yet disbursed as owed back to the payer
    pub fn take_refund(&mut self) -> Result<u64> {
        let refund = self.remaining()?;
        self.refunded = self
            .refunded
            .checked_add(refund)
            .ok_or(ErrorCode::MathOverflow)?;
        Ok(refund)
    }

    /// Checks the ledger against the plan it settled
    pub fn close(self, plan: &SettlementPlan) -> Result<SettlementReceipt> {
        require!(
            self.disbursed == plan.total_required,
            ErrorCode::SettlementImbalance
        );
        require!(self.remaining()? == 0, ErrorCode::SettlementImbalance);

        let distributed = self
            .disbursed
            .checked_sub(plan.fee_amount)
            .ok_or(ErrorCode::MathUnderflow)?;

        Ok(SettlementReceipt {
            recipient_count: plan.recipient_count() as u32,
            total_requested: plan.total_requested,
            fee_amount: plan.fee_amount,
            distributed,
            refund: self.refunded,
        })
    }
}

/// Outcome of a completed settlement
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SettlementReceipt {
    pub recipient_count: u32,
    pub total_requested: u64,
    pub fee_amount: u64,
    pub distributed: u64,
    pub refund: u64,
}

/// Pays out a native batch from `supplied` funds and refunds the excess.
///
/// `supplied` must already be held by whatever backs `transfer`.
pub fn settle_native<T: NativeTransfer>(
    plan: &SettlementPlan,
    fee_wallet: &Pubkey,
    payer: &Pubkey,
    supplied: u64,
    transfer: &mut T,
) -> Result<SettlementReceipt> {
    require!(supplied >= plan.total_required, ErrorCode::InsufficientFunds);

    let mut ledger = FundsLedger::new(supplied);

    for payout in &plan.payouts {
        ledger.disburse(payout.amount)?;
        transfer.send_native(&payout.recipient, payout.amount)?;
    }

    if plan.fee_amount > 0 {
        ledger.disburse(plan.fee_amount)?;
        transfer.send_native(fee_wallet, plan.fee_amount)?;
    }

    let refund = ledger.take_refund()?;
    if refund > 0 {
        transfer.send_native(payer, refund)?;
    }

    ledger.close(plan)
}

/// Pulls exactly `total_required` from the payer, then pushes every payout
/// and the fee.
pub fn settle_token<T: TokenTransfer>(
    plan: &SettlementPlan,
    fee_wallet: &Pubkey,
    payer: &Pubkey,
    transfer: &mut T,
) -> Result<SettlementReceipt> {
    transfer.pull_token(payer, plan.total_required)?;

    let mut ledger = FundsLedger::new(plan.total_required);

    for payout in &plan.payouts {
        ledger.disburse(payout.amount)?;
        transfer.push_token(&payout.recipient, payout.amount)?;
    }

    if plan.fee_amount > 0 {
        ledger.disburse(plan.fee_amount)?;
        transfer.push_token(fee_wallet, plan.fee_amount)?;
    }

    ledger.close(plan)
}
