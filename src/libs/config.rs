use {
    dotenv::dotenv,
    serde::{Deserialize, Serialize},
    std::{fmt::Debug, str::FromStr},
};

use crate::constants::DEFAULT_RPC;

pub fn load_env() {
    dotenv().ok();
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Config {
    pub rpc_url: String,
    pub private_key: String,
}

impl Config {
    pub fn new() -> Self {
        Self {
            rpc_url: std::env::var("RPC_URL").unwrap_or_else(|_| DEFAULT_RPC.to_string()),
            private_key: std::env::var("PRIVATE_KEY")
                .expect("config.rs: PRIVATE_KEY is not set"),
        }
    }

    /// Parse env var to T; fall back to typed default.
    pub fn get_var_t<T>(key: &str, default: T) -> T
    where
        T: FromStr,
        <T as FromStr>::Err: Debug,
    {
        std::env::var(key)
            .ok()
            .and_then(|s| s.parse::<T>().ok())
            .unwrap_or(default)
    }
}
