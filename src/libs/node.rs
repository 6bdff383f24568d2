//! Thin JSON-RPC client for the node-level queries the contract proxy
//! does not cover: chain id, the node's unlocked account list and native
//! balances. Contract calls and transaction submission go through the
//! alloy provider instead; alloy is used here only for types and key
//! handling.

use alloy::primitives::{Address, U256};
use alloy::signers::local::PrivateKeySigner;
use anyhow::{Context, Result};
use reqwest::Client as HttpClient;
use serde_json::Value;
use url::Url;

#[derive(Clone, Debug)]
pub struct NodeClient {
    rpc_url: Url,
    http: HttpClient,
    /// Address derived from the configured private key. The key itself
    /// never leaves the alloy signer.
    pub address: Address,
}

impl NodeClient {
    pub fn new(rpc_url: String, private_key: String) -> Result<Self> {
        let url = Url::parse(&rpc_url)
            .with_context(|| format!("failed to parse RPC_URL: {rpc_url}"))?;
        let signer: PrivateKeySigner = private_key
            .parse()
            .context("PRIVATE_KEY did not contain a valid hex encoded secret")?;
        Ok(Self {
            rpc_url: url,
            http: HttpClient::new(),
            address: signer.address(),
        })
    }

    /// `eth_chainId` as a native u64.
    pub async fn chain_id(&self) -> Result<u64> {
        let res = self.rpc("eth_chainId", serde_json::json!([])).await?;
        let hex = res.as_str().context("chainId not string")?;
        let val =
            u64::from_str_radix(hex.trim_start_matches("0x"), 16).context("bad chainId hex")?;
        Ok(val)
    }

    /// `eth_accounts`: the accounts the node manages. Public endpoints
    /// return an empty list; local development nodes list their unlocked
    /// accounts.
    pub async fn accounts(&self) -> Result<Vec<Address>> {
        let res = self.rpc("eth_accounts", serde_json::json!([])).await?;
        decode_address_list(&res)
    }

    /// `eth_getBalance` at a block tag, in wei.
    pub async fn get_balance_at(&self, address: Address, block: &str) -> Result<U256> {
        let res = self
            .rpc("eth_getBalance", serde_json::json!([address, block]))
            .await?;
        let hex = res.as_str().context("balance not string")?;
        decode_quantity(hex)
    }

    async fn rpc(&self, method: &str, params: Value) -> Result<Value> {
        let body = serde_json::json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": method,
            "params": params,
        });
        let res = self
            .http
            .post(self.rpc_url.as_str())
            .json(&body)
            .send()
            .await?;
        let status = res.status();
        let bytes = res.bytes().await?;
        let v: Value = match serde_json::from_slice(&bytes) {
            Ok(json) => json,
            Err(e) => {
                let mut sample = String::from_utf8_lossy(&bytes).to_string();
                if sample.len() > 512 {
                    sample.truncate(512);
                }
                let hint = if sample.trim_start().starts_with('<') {
                    "Response looks like HTML; RPC_URL may point at a gateway page rather than a JSON-RPC endpoint."
                } else if sample.trim().is_empty() {
                    "Empty body from RPC. The node may be down; with no RPC_URL set the local development endpoint is assumed."
                } else {
                    "Non-JSON response from RPC."
                };
                return Err(anyhow::anyhow!(
                    "RPC decode error ({status}): {e}. {hint}\nEndpoint: {}\nSample: {}",
                    self.rpc_url,
                    sample
                ));
            }
        };
        if let Some(err) = v.get("error") {
            anyhow::bail!("rpc error: {}", err);
        }
        Ok(v.get("result").cloned().unwrap_or(Value::Null))
    }
}

/// Hex quantity -> U256. Nodes return "0x0", "0x1" etc, so odd-length
/// strings are padded before decoding.
fn decode_quantity(hex_str: &str) -> Result<U256> {
    let mut stripped = hex_str.trim_start_matches("0x");
    let padded;
    if stripped.len() % 2 == 1 {
        padded = format!("0{}", stripped);
        stripped = &padded;
    }
    let bytes = hex::decode(stripped).context("bad quantity hex")?;
    Ok(U256::from_be_slice(&bytes))
}

fn decode_address_list(res: &Value) -> Result<Vec<Address>> {
    let arr = res.as_array().cloned().unwrap_or_default();
    let mut out = Vec::with_capacity(arr.len());
    for v in arr {
        let s = v.as_str().context("account entry not string")?;
        let addr: Address = s
            .parse()
            .with_context(|| format!("bad account address `{s}`"))?;
        out.push(addr);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_short_quantities() {
        assert_eq!(decode_quantity("0x0").unwrap(), U256::ZERO);
        assert_eq!(decode_quantity("0x1").unwrap(), U256::from(1u64));
        assert_eq!(decode_quantity("0xde0b6b3a7640000").unwrap(), U256::from(10u64).pow(U256::from(18u64)));
    }

    #[test]
    fn rejects_bad_quantities() {
        assert!(decode_quantity("0xzz").is_err());
    }

    #[test]
    fn decodes_account_lists() {
        let v = serde_json::json!(["0x1111111111111111111111111111111111111111"]);
        let accts = decode_address_list(&v).unwrap();
        assert_eq!(accts.len(), 1);

        let empty = serde_json::json!([]);
        assert!(decode_address_list(&empty).unwrap().is_empty());

        // null result decodes to no accounts rather than an error
        assert!(decode_address_list(&Value::Null).unwrap().is_empty());
    }
}
