use {
    crate::app::roster::parse_roster,
    crate::constants::{CHAIN_ID, GAS_PRICE_WEI, MAX_BATCH},
    crate::libs::config::{load_env, Config},
    crate::libs::lookup::{addr_to_symbol, save_log_to_file},
    crate::libs::node::NodeClient,
    crate::libs::writing::{cc, Console},
    crate::log,
    alloy::primitives::Address,
    alloy::providers::{Provider, ProviderBuilder},
    alloy::signers::local::PrivateKeySigner,
    alloy::signers::Signer,
    anyhow::{Context, Result},
    bitto::addresses::BITTO_TOKEN,
    bitto::token,
    bitto::units::{format_token, TOKEN_DECIMALS},
    std::str::FromStr,
    url::Url,
};

/// Everything the drop loop needs, built once at startup. Nothing here
/// mutates after construction; the token proxy is rebuilt per call from
/// the provider.
pub struct AppState<P: Provider + Clone> {
    pub provider: P,
    pub node: NodeClient,
    pub account: Address,
    pub symbol: String,
    pub decimals: u32,
}

pub async fn init() -> Result<()> {
    load_env();
    let cfg = Config::new();

    let url = Url::parse(&cfg.rpc_url)
        .with_context(|| format!("bad RPC endpoint `{}`", cfg.rpc_url))?;
    let signer = PrivateKeySigner::from_str(&cfg.private_key)
        .context("PRIVATE_KEY did not contain a valid hex encoded secret")?
        .with_chain_id(Some(*CHAIN_ID));
    let account = signer.address();
    let provider = ProviderBuilder::new()
        .with_chain_id(*CHAIN_ID)
        .wallet(signer)
        .connect_http(url);
    let node = NodeClient::new(cfg.rpc_url.clone(), cfg.private_key.clone())?;

    let state = bootstrap(provider, node, account).await?;
    run(state).await
}

async fn bootstrap<P: Provider + Clone>(
    provider: P,
    node: NodeClient,
    account: Address,
) -> Result<AppState<P>> {
    let chain = node
        .chain_id()
        .await
        .context("node unreachable, check RPC_URL")?;
    if chain != *CHAIN_ID {
        log!(
            cc::LIGHT_YELLOW,
            "node reports chain id {chain}, configured {}",
            *CHAIN_ID
        );
    }
    report_node_accounts(&node).await;

    let symbol = addr_to_symbol(provider.clone(), BITTO_TOKEN).await?;
    let decimals = token::decimals(provider.clone()).await;
    log!(cc::LIGHT_CYAN, "token {} at {:?}", symbol, BITTO_TOKEN);
    log!(cc::LIGHT_CYAN, "account {:?}", account);

    Ok(AppState {
        provider,
        node,
        account,
        symbol,
        decimals,
    })
}

/// The node's managed-account list is informational: signing happens
/// locally. An empty list is stated outright, never papered over.
async fn report_node_accounts(node: &NodeClient) {
    match node.accounts().await {
        Ok(accounts) if accounts.is_empty() => {
            log!(
                cc::LIGHT_GRAY,
                "node manages no accounts; signing locally as {:?}",
                node.address
            );
        }
        Ok(accounts) => {
            if accounts.contains(&node.address) {
                log!(cc::LIGHT_GRAY, "node also manages the signing account");
            } else {
                log!(
                    cc::LIGHT_YELLOW,
                    "node manages {} account(s), none of them the signer",
                    accounts.len()
                );
            }
        }
        Err(e) => {
            save_log_to_file(&format!("eth_accounts probe failed: {e}"));
        }
    }
}

async fn show_balances<P: Provider + Clone>(state: &AppState<P>) {
    match state.node.get_balance_at(state.account, "latest").await {
        Ok(wei) => log!(
            cc::LIGHT_GREEN,
            "native balance: {}",
            format_token(wei, TOKEN_DECIMALS)
        ),
        Err(e) => log!(cc::LIGHT_RED, "native balance query failed: {e}"),
    }
    match token::balance_of(state.provider.clone(), state.account).await {
        Ok(bal) => log!(
            cc::LIGHT_GREEN,
            "{} balance: {}",
            state.symbol,
            format_token(bal, state.decimals)
        ),
        Err(e) => log!(cc::LIGHT_RED, "{} balance query failed: {e}", state.symbol),
    }
}

async fn run<P: Provider + Clone>(state: AppState<P>) -> Result<()> {
    let mut console = Console::new();
    show_balances(&state).await;

    loop {
        let Some(text) = console.read_roster()? else { break };

        let batch = match parse_roster(&text) {
            Ok(b) => b,
            Err(e) => {
                console.err(&e.to_string());
                continue;
            }
        };

        if batch.len() > *MAX_BATCH {
            console.err(&format!(
                "roster has {} rows, above the per transaction cap of {}; split the paste",
                batch.len(),
                *MAX_BATCH
            ));
            continue;
        }

        let dups = batch.duplicates();
        if !dups.is_empty() {
            log!(
                cc::LIGHT_YELLOW,
                "{} recipient(s) appear more than once, first: {:?}",
                dups.len(),
                dups[0]
            );
        }

        let total = batch.total();
        let question = format!(
            "Drop {} {} to {} accounts?",
            format_token(total, state.decimals),
            state.symbol,
            batch.len()
        );
        if !console.confirm(&question)? {
            log!(cc::LIGHT_GRAY, "drop cancelled");
            continue;
        }

        let gas = (*GAS_PRICE_WEI > 0).then_some(*GAS_PRICE_WEI);
        // One drop in flight at a time: the send is awaited before the
        // prompt comes back.
        match token::batch_transfer(state.provider.clone(), state.account, &batch, true, gas).await
        {
            Ok((n, tx)) => {
                console.status(&format!("Token dropped to {n} accounts"));
                log!(cc::LIGHT_GREEN, "tx: {tx:?}");
                save_log_to_file(&format!(
                    "drop ok: {} recipients, total {}, tx {tx:?}",
                    n,
                    format_token(total, state.decimals)
                ));
                show_balances(&state).await;
            }
            Err(e) => {
                console.err(&e.to_string());
                save_log_to_file(&format!("drop failed: {e}"));
            }
        }
    }
    Ok(())
}
