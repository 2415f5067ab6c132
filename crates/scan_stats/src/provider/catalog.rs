//! Statistic catalog: scopes, kinds, labels, cache keys.

/// Cache-key namespace prefix shared by every statistic.
const CACHE_PREFIX: &str = "scanstat";

/// Chain space a statistic belongs to. Spaces have separate scan endpoints
/// and cache-key namespaces; provider behavior is identical across them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Scope {
    Core,
    Evm,
}

impl Scope {
    pub fn as_str(self) -> &'static str {
        match self {
            Scope::Core => "core",
            Scope::Evm => "evm",
        }
    }

    /// Statistics served for this space.
    pub fn catalog(self) -> &'static [StatKind] {
        match self {
            Scope::Core => CORE_CATALOG,
            Scope::Evm => EVM_CATALOG,
        }
    }
}

impl std::fmt::Display for Scope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum StatKind {
    ActiveAccounts,
    CoinHolders,
    AccountGrowth,
    Contracts,
    Supply,
    Transactions,
    CoinTransfers,
    Tps,
    TopMiners,
    TopGasUsed,
    TopCoinSenders,
    TopCoinReceivers,
    TopTxSenders,
    TopTxReceivers,
    TopTokenParticipants,
    TopTokenTransfers,
}

pub(crate) const ALL_KINDS: &[StatKind] = &[
    StatKind::ActiveAccounts,
    StatKind::CoinHolders,
    StatKind::AccountGrowth,
    StatKind::Contracts,
    StatKind::Supply,
    StatKind::Transactions,
    StatKind::CoinTransfers,
    StatKind::Tps,
    StatKind::TopMiners,
    StatKind::TopGasUsed,
    StatKind::TopCoinSenders,
    StatKind::TopCoinReceivers,
    StatKind::TopTxSenders,
    StatKind::TopTxReceivers,
    StatKind::TopTokenParticipants,
    StatKind::TopTokenTransfers,
];

/// Core space: series stats including total supply, plus miner and transfer
/// leaderboards. Token-activity boards are an EVM-space concern.
const CORE_CATALOG: &[StatKind] = &[
    StatKind::ActiveAccounts,
    StatKind::CoinHolders,
    StatKind::AccountGrowth,
    StatKind::Contracts,
    StatKind::Supply,
    StatKind::Transactions,
    StatKind::CoinTransfers,
    StatKind::Tps,
    StatKind::TopMiners,
    StatKind::TopGasUsed,
    StatKind::TopCoinSenders,
    StatKind::TopCoinReceivers,
    StatKind::TopTxSenders,
    StatKind::TopTxReceivers,
];

/// EVM space: no supply endpoint and no miner board, but token
/// participant and transfer boards exist.
const EVM_CATALOG: &[StatKind] = &[
    StatKind::ActiveAccounts,
    StatKind::CoinHolders,
    StatKind::AccountGrowth,
    StatKind::Contracts,
    StatKind::Transactions,
    StatKind::CoinTransfers,
    StatKind::Tps,
    StatKind::TopGasUsed,
    StatKind::TopCoinSenders,
    StatKind::TopCoinReceivers,
    StatKind::TopTxSenders,
    StatKind::TopTxReceivers,
    StatKind::TopTokenParticipants,
    StatKind::TopTokenTransfers,
];

impl StatKind {
    /// Verbatim prefix of the rendered snippet.
    pub fn label(self) -> &'static str {
        match self {
            StatKind::ActiveAccounts => "Active Accounts",
            StatKind::CoinHolders => "Coin Holders",
            StatKind::AccountGrowth => "Account Growth",
            StatKind::Contracts => "Contracts",
            StatKind::Supply => "Supply",
            StatKind::Transactions => "Transactions",
            StatKind::CoinTransfers => "Coin Transfers",
            StatKind::Tps => "TPS",
            StatKind::TopMiners => "Top Miners",
            StatKind::TopGasUsed => "Top Gas Users",
            StatKind::TopCoinSenders => "Top Coin Senders",
            StatKind::TopCoinReceivers => "Top Coin Receivers",
            StatKind::TopTxSenders => "Top Transaction Senders",
            StatKind::TopTxReceivers => "Top Transaction Receivers",
            StatKind::TopTokenParticipants => "Top Token Participants",
            StatKind::TopTokenTransfers => "Top Token Transfers",
        }
    }

    /// Stable cache-key segment; also the CLI-facing statistic name.
    pub fn key_suffix(self) -> &'static str {
        match self {
            StatKind::ActiveAccounts => "active_accounts",
            StatKind::CoinHolders => "coin_holders",
            StatKind::AccountGrowth => "account_growth",
            StatKind::Contracts => "contracts",
            StatKind::Supply => "supply",
            StatKind::Transactions => "transactions",
            StatKind::CoinTransfers => "coin_transfers",
            StatKind::Tps => "tps",
            StatKind::TopMiners => "top_miners",
            StatKind::TopGasUsed => "top_gas_used",
            StatKind::TopCoinSenders => "top_coin_senders",
            StatKind::TopCoinReceivers => "top_coin_receivers",
            StatKind::TopTxSenders => "top_tx_senders",
            StatKind::TopTxReceivers => "top_tx_receivers",
            StatKind::TopTokenParticipants => "top_token_participants",
            StatKind::TopTokenTransfers => "top_token_transfers",
        }
    }

    /// Parse a CLI-facing name back into a kind.
    pub fn from_name(name: &str) -> Option<Self> {
        ALL_KINDS.iter().copied().find(|k| k.key_suffix() == name)
    }
}

impl std::fmt::Display for StatKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.key_suffix())
    }
}

/// Namespaced cache key for a (scope, statistic) pair. Keys must stay unique
/// across the full catalog; a collision would cross-contaminate statistics.
pub fn cache_key(scope: Scope, kind: StatKind) -> String {
    format!("{CACHE_PREFIX}:{}:{}", scope.as_str(), kind.key_suffix())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn cache_keys_unique_across_catalog() {
        let mut keys = HashSet::new();
        for scope in [Scope::Core, Scope::Evm] {
            for &kind in scope.catalog() {
                assert!(keys.insert(cache_key(scope, kind)), "duplicate key");
            }
        }
        assert_eq!(keys.len(), 28);
    }

    #[test]
    fn cache_key_shape() {
        assert_eq!(cache_key(Scope::Core, StatKind::Tps), "scanstat:core:tps");
        assert_eq!(
            cache_key(Scope::Evm, StatKind::TopTokenTransfers),
            "scanstat:evm:top_token_transfers"
        );
    }

    #[test]
    fn supply_and_miners_are_core_only() {
        assert!(Scope::Core.catalog().contains(&StatKind::Supply));
        assert!(Scope::Core.catalog().contains(&StatKind::TopMiners));
        assert!(!Scope::Evm.catalog().contains(&StatKind::Supply));
        assert!(!Scope::Evm.catalog().contains(&StatKind::TopMiners));
    }

    #[test]
    fn token_boards_are_evm_only() {
        for kind in [StatKind::TopTokenParticipants, StatKind::TopTokenTransfers] {
            assert!(Scope::Evm.catalog().contains(&kind));
            assert!(!Scope::Core.catalog().contains(&kind));
        }
    }

    #[test]
    fn from_name_roundtrip() {
        for &kind in ALL_KINDS {
            assert_eq!(StatKind::from_name(kind.key_suffix()), Some(kind));
        }
        assert!(StatKind::from_name("block_reward").is_none());
    }
}
