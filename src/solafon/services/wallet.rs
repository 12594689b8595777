// src/solafon/services/wallet.rs
//
// Read-only wallet queries plus relaying of transactions the caller has
// already signed. No key material ever passes through here.

use serde_json::Value;
use tracing::info;

use crate::solafon::{
    client::SolafonClient,
    models::{
        AddressArgs, GatewayError, SendTransactionArgs, SignatureArgs, SimulateTransactionArgs,
        TokenPricesArgs, TransactionHistoryArgs,
    },
};

pub async fn get_wallet_balance(
    client: &SolafonClient,
    args: AddressArgs,
) -> Result<Value, GatewayError> {
    client
        .get("/api/wallet/balance", &[("address", args.address)])
        .await
}

pub async fn get_token_list(client: &SolafonClient) -> Result<Value, GatewayError> {
    client.get("/api/wallet/tokens", &[]).await
}

pub async fn get_token_prices(
    client: &SolafonClient,
    args: TokenPricesArgs,
) -> Result<Value, GatewayError> {
    client
        .get("/api/wallet/prices", &[("mints", args.mints)])
        .await
}

pub async fn get_transaction_history(
    client: &SolafonClient,
    args: TransactionHistoryArgs,
) -> Result<Value, GatewayError> {
    client
        .get(
            "/api/wallet/transactions",
            &[
                ("address", args.address),
                ("limit", args.limit.to_string()),
                ("before", args.before.unwrap_or_default()),
            ],
        )
        .await
}

pub async fn get_transaction_status(
    client: &SolafonClient,
    args: SignatureArgs,
) -> Result<Value, GatewayError> {
    client
        .get("/api/wallet/status", &[("signature", args.signature)])
        .await
}

pub async fn get_latest_blockhash(client: &SolafonClient) -> Result<Value, GatewayError> {
    client.get("/api/wallet/blockhash", &[]).await
}

pub async fn send_transaction(
    client: &SolafonClient,
    args: SendTransactionArgs,
) -> Result<Value, GatewayError> {
    info!("Relaying signed transaction");
    let body = serde_json::to_value(&args)?;
    client.post("/api/wallet/send", &body).await
}

pub async fn simulate_transaction(
    client: &SolafonClient,
    args: SimulateTransactionArgs,
) -> Result<Value, GatewayError> {
    let body = serde_json::to_value(&args)?;
    client.post("/api/wallet/simulate", &body).await
}
