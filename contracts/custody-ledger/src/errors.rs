use soroban_sdk::contracterror;

/// Errors returned by every custody ledger entry point.
///
/// Codes are stable: off-chain callers match on the `u32` value carried in
/// the Soroban result envelope.
#[contracterror]
#[derive(Copy, Clone, Debug, Eq, PartialEq, PartialOrd, Ord)]
#[repr(u32)]
pub enum CustodyError {
    /// Caller is not a member of the admin set
    NotAnAdmin = 1,
    /// Role change attempted by an identity without super-admin rights
    NotSuperAdmin = 2,
    /// Parallel argument arrays have different lengths
    ArrayLengthMismatch = 3,
    /// Transfer attempted before the holder's release time
    IncompleteVesting = 4,
    /// Transfer attempted while the ledger is paused
    Paused = 5,
    /// Debit exceeds the holder's balance
    InsufficientBalance = 6,
    /// Index lookup or removal for an identity that is not an admin
    UnknownAdmin = 7,
    /// `initialize` has already run
    AlreadyInitialized = 8,
    /// Identity is already in the admin set
    AlreadyAdmin = 9,
    /// Caller is neither the owner nor an approved operator
    NotApproved = 10,
    /// Amount is zero or negative
    InvalidAmount = 11,
    /// Required approvals outside `1..=admin count`
    InvalidThreshold = 12,
    /// Revoking the only remaining super-admin
    LastSuperAdmin = 13,
    /// Owner tried to approve itself as operator
    SelfApproval = 14,
    /// Arithmetic overflow on a balance or supply counter
    Overflow = 15,
}
