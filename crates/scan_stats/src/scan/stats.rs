//! Per-statistic endpoints. Every method returns an already-human-formatted
//! fragment; numeric formatting happens here, never in providers.

use super::client::ScanClient;
use super::format::{group_digits, render_leaderboard, render_series};
use super::ScanError;
use crate::provider::{StatFetcher, StatKind};
use async_trait::async_trait;
use serde::Deserialize;

/// Days of history rendered for daily-series statistics.
const SERIES_DAYS: usize = 7;
/// Entries rendered for leaderboard statistics.
const TOP_LIMIT: usize = 10;

#[derive(Deserialize)]
struct SeriesData {
    list: Vec<SeriesPoint>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeriesPoint {
    stat_time: String,
    count: String,
}

#[derive(Deserialize)]
struct TpsData {
    tps: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct SupplyData {
    total_supply: String,
    total_circulating: String,
    #[serde(default)]
    total_staking: Option<String>,
}

#[derive(Deserialize)]
struct TopListData {
    list: Vec<TopEntry>,
}

/// Leaderboard row. Miner boards name the address field `miner`; transfer
/// boards report `value`, transaction boards report `count`.
#[derive(Deserialize)]
struct TopEntry {
    #[serde(alias = "miner")]
    address: String,
    #[serde(default)]
    value: Option<String>,
    #[serde(default)]
    count: Option<String>,
}

impl TopEntry {
    fn amount(&self) -> &str {
        self.value
            .as_deref()
            .or(self.count.as_deref())
            .unwrap_or("0")
    }
}

impl ScanClient {
    async fn series(&self, path: &str) -> Result<String, ScanError> {
        let data: SeriesData = self.get_data(&format!("{path}?limit={SERIES_DAYS}")).await?;
        if data.list.is_empty() {
            return Err(ScanError::Empty(path.to_string()));
        }
        // The API returns newest first; render oldest first.
        let mut points: Vec<(String, String)> = data
            .list
            .into_iter()
            .map(|p| (p.stat_time, p.count))
            .collect();
        points.reverse();
        Ok(render_series(&points))
    }

    async fn top(&self, path: &str) -> Result<String, ScanError> {
        let data: TopListData = self.get_data(&format!("{path}?limit={TOP_LIMIT}")).await?;
        if data.list.is_empty() {
            return Err(ScanError::Empty(path.to_string()));
        }
        let entries: Vec<(String, String)> = data
            .list
            .iter()
            .map(|e| (e.address.clone(), e.amount().to_string()))
            .collect();
        Ok(render_leaderboard(&entries))
    }

    pub async fn active_accounts(&self) -> Result<String, ScanError> {
        self.series("/statistics/account/active").await
    }

    pub async fn coin_holders(&self) -> Result<String, ScanError> {
        self.series("/statistics/account/holder").await
    }

    pub async fn account_growth(&self) -> Result<String, ScanError> {
        self.series("/statistics/account/growth").await
    }

    pub async fn contracts(&self) -> Result<String, ScanError> {
        self.series("/statistics/contract").await
    }

    pub async fn transactions(&self) -> Result<String, ScanError> {
        self.series("/statistics/transaction").await
    }

    pub async fn coin_transfers(&self) -> Result<String, ScanError> {
        self.series("/statistics/transfer").await
    }

    pub async fn tps(&self) -> Result<String, ScanError> {
        let data: TpsData = self.get_data("/statistics/tps").await?;
        Ok(data.tps)
    }

    pub async fn supply(&self) -> Result<String, ScanError> {
        let data: SupplyData = self.get_data("/statistics/supply").await?;
        let mut lines = vec![
            format!("Total: {}", group_digits(&data.total_supply)),
            format!("Circulating: {}", group_digits(&data.total_circulating)),
        ];
        if let Some(staking) = &data.total_staking {
            lines.push(format!("Staking: {}", group_digits(staking)));
        }
        Ok(lines.join("\n"))
    }

    pub async fn top_miners(&self) -> Result<String, ScanError> {
        self.top("/statistics/top/miner").await
    }

    pub async fn top_gas_used(&self) -> Result<String, ScanError> {
        self.top("/statistics/top/gas").await
    }

    pub async fn top_coin_senders(&self) -> Result<String, ScanError> {
        self.top("/statistics/top/transfer/sender").await
    }

    pub async fn top_coin_receivers(&self) -> Result<String, ScanError> {
        self.top("/statistics/top/transfer/receiver").await
    }

    pub async fn top_tx_senders(&self) -> Result<String, ScanError> {
        self.top("/statistics/top/transaction/sender").await
    }

    pub async fn top_tx_receivers(&self) -> Result<String, ScanError> {
        self.top("/statistics/top/transaction/receiver").await
    }

    pub async fn top_token_participants(&self) -> Result<String, ScanError> {
        self.top("/statistics/top/token/participant").await
    }

    pub async fn top_token_transfers(&self) -> Result<String, ScanError> {
        self.top("/statistics/top/token/transfer").await
    }
}

#[async_trait]
impl StatFetcher for ScanClient {
    async fn fetch_stat(&self, kind: StatKind) -> Result<String, ScanError> {
        match kind {
            StatKind::ActiveAccounts => self.active_accounts().await,
            StatKind::CoinHolders => self.coin_holders().await,
            StatKind::AccountGrowth => self.account_growth().await,
            StatKind::Contracts => self.contracts().await,
            StatKind::Supply => self.supply().await,
            StatKind::Transactions => self.transactions().await,
            StatKind::CoinTransfers => self.coin_transfers().await,
            StatKind::Tps => self.tps().await,
            StatKind::TopMiners => self.top_miners().await,
            StatKind::TopGasUsed => self.top_gas_used().await,
            StatKind::TopCoinSenders => self.top_coin_senders().await,
            StatKind::TopCoinReceivers => self.top_coin_receivers().await,
            StatKind::TopTxSenders => self.top_tx_senders().await,
            StatKind::TopTxReceivers => self.top_tx_receivers().await,
            StatKind::TopTokenParticipants => self.top_token_participants().await,
            StatKind::TopTokenTransfers => self.top_token_transfers().await,
        }
    }
}
