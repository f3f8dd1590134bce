//! ClankApp whale-transaction API

use std::time::Duration;

use super::{get_json, http_client};
use crate::error::Result;
use crate::model::{WhaleAverage, WhaleTransaction, WhaleTransactionPage};

const SERVICE: &str = "ClankApp";

/// Client for the ClankApp v2 API
#[derive(Clone, Debug)]
pub struct ClankClient {
    client: reqwest::Client,
    base_url: String,
}

impl ClankClient {
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        Ok(Self {
            client: http_client(timeout)?,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Average amount of recent Ethereum whale transactions
    pub async fn ethereum_whale_average(&self) -> Result<WhaleAverage> {
        let url = format!("{}/blockchain/ethereum/whales-amount-average", self.base_url);
        get_json(&self.client, SERVICE, &url, &[]).await
    }

    /// Most recent Ethereum whale transactions, newest first
    pub async fn latest_ethereum_transactions(&self, size: usize) -> Result<Vec<WhaleTransaction>> {
        let url = format!("{}/explorer/tx", self.base_url);
        let size = size.to_string();
        let page: WhaleTransactionPage = get_json(
            &self.client,
            SERVICE,
            &url,
            &[("s_date", "desc"), ("t_blockchain", "ethereum"), ("size", &size)],
        )
        .await?;

        Ok(page.data)
    }
}
