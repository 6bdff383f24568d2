use std::io::{self, Write};

use anyhow::Result;

use alloy::primitives::Address;
use alloy::providers::Provider;

use std::env;
use std::fs::{create_dir_all, OpenOptions};

alloy::sol! {
    #[sol(rpc)]
    interface IERC20Meta {
        function symbol() view returns (string);
        function name() view returns (string);
        function decimals() view returns (uint8);
    }
}

/// Read ERC20 `symbol()`; on failure returns a short hex of the address.
pub async fn addr_to_symbol<P: Provider + Clone>(provider: P, token: Address) -> Result<String> {
    let erc = IERC20Meta::new(token, provider);
    match erc.symbol().call().await {
        Ok(sym) => Ok(sym),
        Err(_) => {
            let s = token.as_slice();
            Ok(format!(
                "0x{}…{}",
                hex::encode(&s[0..3]),
                hex::encode(&s[17..20])
            ))
        }
    }
}

/// Append one line to the dated drop audit log under logs/.
/// No-op unless DEBUG_LOGS=true.
pub fn save_log_to_file(log: &str) {
    if !is_debug_logs_enabled() {
        return;
    }

    if let Err(e) = create_dir_all("logs") {
        eprintln!("save_log_to_file mkdir error: {e}");
        return;
    }
    let now = chrono::Utc::now().format("%d-%m-%Y").to_string();
    let file_name = format!("logs/drops_{}.txt", now);
    let time_now = chrono::Utc::now().format("%H:%M:%S%.3f").to_string();
    let log_with_time = format!("[{}] {log}", time_now);

    if let Err(e) = append_line(&file_name, &log_with_time) {
        eprintln!("save_log_to_file error: {e}");
    }
}

fn is_debug_logs_enabled() -> bool {
    match env::var("DEBUG_LOGS") {
        Ok(val) => val.eq_ignore_ascii_case("true"),
        Err(_) => false,
    }
}

fn append_line(path: &str, line: &str) -> io::Result<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    writeln!(file, "{line}")?;
    Ok(())
}
