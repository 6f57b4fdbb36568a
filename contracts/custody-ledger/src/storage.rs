use soroban_sdk::{contracttype, Address, BytesN};

/// Storage keys for every table the custody ledger owns.
///
/// Small singletons (config, counters, pause flag) live in instance storage;
/// per-holder and per-proposal entries live in persistent storage.
#[contracttype]
#[derive(Clone)]
#[cfg_attr(test, derive(Debug, PartialEq))]
pub enum DataKey {
    /// Set once by `initialize`
    Initialized,

    // Admin registry
    AdminCount,
    /// Ordered admin list: position -> admin
    AdminAt(u32),
    /// Reverse lookup: admin -> position
    AdminIndex(Address),
    SuperAdmin(Address),
    SuperAdminCount,

    // Consensus gate
    ConsensusConfig,
    /// sha256(XDR(action)) -> Proposal
    Proposal(BytesN<32>),

    // Vesting and pause
    /// (holder, asset id) -> release timestamp
    Release(Address, u64),
    Paused,

    // Ledger tables
    Balance(Address, u64),
    /// (owner, operator) -> approved
    Operator(Address, Address),
    /// Set on first receipt of any asset
    Holder(Address),

    // Supply counters
    Supply(u64),
    TotalSupply,
    MintedIds,
    Minted(u64),
}
