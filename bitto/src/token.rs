use anyhow::{bail, Context, Result};

use alloy::primitives::{Address, B256, U256};
use alloy::providers::Provider;

use crate::abi::IBittoToken;
use crate::addresses::BITTO_TOKEN;
use crate::units::{format_token, TOKEN_DECIMALS};

pub type TxHash = B256;

/// Parallel recipient/value columns for one batchTransfer call.
/// recipients[i] receives values[i]; the constructor is the only way in,
/// so the columns can never go out of step.
#[derive(Debug, Clone)]
pub struct TransferBatch {
    recipients: Vec<Address>,
    values: Vec<U256>,
}

impl TransferBatch {
    pub fn new(recipients: Vec<Address>, values: Vec<U256>) -> Result<Self> {
        if recipients.len() != values.len() {
            bail!(
                "recipient and value columns are out of step ({} vs {})",
                recipients.len(),
                values.len()
            );
        }
        if recipients.is_empty() {
            bail!("batch is empty, nothing to drop");
        }
        Ok(Self { recipients, values })
    }

    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }

    pub fn recipients(&self) -> &[Address] {
        &self.recipients
    }

    pub fn values(&self) -> &[U256] {
        &self.values
    }

    pub fn total(&self) -> U256 {
        self.values
            .iter()
            .fold(U256::ZERO, |acc, v| acc.saturating_add(*v))
    }

    /// Addresses that appear more than once, in first-seen order.
    pub fn duplicates(&self) -> Vec<Address> {
        let mut seen = std::collections::HashSet::new();
        let mut dups = Vec::new();
        for addr in &self.recipients {
            if !seen.insert(*addr) && !dups.contains(addr) {
                dups.push(*addr);
            }
        }
        dups
    }
}

pub async fn balance_of<P: Provider + Clone>(provider: P, owner: Address) -> Result<U256> {
    let token = IBittoToken::new(BITTO_TOKEN, provider);
    Ok(token.balanceOf(owner).call().await?)
}

pub async fn decimals<P: Provider + Clone>(provider: P) -> u32 {
    IBittoToken::new(BITTO_TOKEN, provider)
        .decimals()
        .call()
        .await
        .unwrap_or(18) as u32
}

/// Submit one batchTransfer carrying the whole roster.
/// Preflights the sender's token balance against the batch total, then
/// simulates the call before spending gas when `try_sim` is set. Returns
/// the recipient count and the tx hash; the receipt is not awaited.
pub async fn batch_transfer<P: Provider + Clone>(
    provider: P,
    from: Address,
    batch: &TransferBatch,
    try_sim: bool,
    gas_price_wei: Option<u128>,
) -> Result<(usize, TxHash)> {
    let token = IBittoToken::new(BITTO_TOKEN, provider.clone());

    let balance = token.balanceOf(from).call().await?;
    let total = batch.total();
    if balance < total {
        bail!(
            "token balance {} is below the batch total {}",
            format_token(balance, TOKEN_DECIMALS),
            format_token(total, TOKEN_DECIMALS)
        );
    }

    if try_sim {
        token
            .batchTransfer(batch.recipients().to_vec(), batch.values().to_vec())
            .from(from)
            .call()
            .await
            .context("batch transfer preflight reverted")?;
    }

    let mut call = token
        .batchTransfer(batch.recipients().to_vec(), batch.values().to_vec())
        .from(from);
    if let Some(gp) = gas_price_wei.filter(|g| *g > 0) {
        call = call.gas_price(gp);
    }
    let pending = call.send().await?;
    let tx = *pending.tx_hash();
    Ok((batch.len(), tx))
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    const A: Address = address!("0x1111111111111111111111111111111111111111");
    const B: Address = address!("0x2222222222222222222222222222222222222222");

    #[test]
    fn rejects_out_of_step_columns() {
        let err = TransferBatch::new(vec![A, B], vec![U256::from(1u64)]).unwrap_err();
        assert!(err.to_string().contains("out of step"));
    }

    #[test]
    fn rejects_empty_batch() {
        assert!(TransferBatch::new(vec![], vec![]).is_err());
    }

    #[test]
    fn keeps_index_correspondence() {
        let batch =
            TransferBatch::new(vec![A, B], vec![U256::from(1u64), U256::from(2u64)]).unwrap();
        assert_eq!(batch.len(), 2);
        assert_eq!(batch.recipients()[0], A);
        assert_eq!(batch.values()[0], U256::from(1u64));
        assert_eq!(batch.recipients()[1], B);
        assert_eq!(batch.values()[1], U256::from(2u64));
    }

    #[test]
    fn totals_the_value_column() {
        let batch =
            TransferBatch::new(vec![A, B], vec![U256::from(3u64), U256::from(4u64)]).unwrap();
        assert_eq!(batch.total(), U256::from(7u64));
    }

    #[test]
    fn reports_each_duplicate_once() {
        let batch = TransferBatch::new(
            vec![A, B, A, A],
            vec![U256::from(1u64); 4],
        )
        .unwrap();
        assert_eq!(batch.duplicates(), vec![A]);

        let clean = TransferBatch::new(vec![A, B], vec![U256::from(1u64); 2]).unwrap();
        assert!(clean.duplicates().is_empty());
    }
}
