//! Manual smoke test against the sandbox venue.
//!
//! Places and cancels a resting order one tick above the best ask, then
//! crosses the book with the smallest market order and looks up its fills.
//! Trades real sandbox balances.
//!
//! Requires `ENCLAVE_KEY` and `ENCLAVE_SECRET` (a `.env` file works).
//!
//! Run: RUST_LOG=enclave_sdk=debug cargo run --example smoke_test

use enclave_sdk::prelude::*;
use std::time::{SystemTime, UNIX_EPOCH};

#[tokio::main]
async fn main() -> Result<(), SdkError> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let symbol = Symbol::from("AVAX");
    let market = Market::from("AVAX-USDC");

    let client = EnclaveClient::builder()
        .environment(Environment::Sandbox)
        .api_key(ApiKey::from_env()?)
        .build()?;

    client.status().wait_for_endpoint().await?;
    client.status().authed_hello().await?;

    // ── Balance ──────────────────────────────────────────────────────────
    let balance = client.account().balance(&symbol).await?;
    println!("{} balance: {}", symbol, balance.total_balance);

    // ── Market increments ────────────────────────────────────────────────
    let markets = client.markets().list().await?;
    let Some(pair) = markets.find(&market) else {
        println!("{} is not tradable", market);
        return Ok(());
    };
    let (base_min, quote_min) = (pair.base_increment, pair.quote_increment);
    println!("base-min: {} quote-min: {}", base_min, quote_min);

    // ── Top of book ──────────────────────────────────────────────────────
    let book = client.markets().depth(&market).await?;
    let Some(best_ask) = book.best_ask().copied() else {
        println!("no asks are resting on the book");
        return Ok(());
    };
    println!(
        "best-ask-price: {} best-ask-size: {}",
        best_ask.price, best_ask.quantity
    );

    // ── Resting order, then cancel ───────────────────────────────────────
    let resting = AddOrderRequest::limit(
        market.clone(),
        Side::Ask,
        best_ask.price + quote_min,
        base_min,
    );
    let order = client.orders().add(&resting).await?;
    println!("order placed, current state: {}", order.status);

    client.orders().cancel_all().await?;
    let order = client.orders().get(&order.order_id).await?;
    println!("order state: {}", order.status);

    // ── Market order and its fills ───────────────────────────────────────
    let side = if book.best_ask().is_some() {
        Side::Bid
    } else {
        Side::Ask
    };
    let client_order_id = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos().to_string())
        .unwrap_or_default();

    let taker = AddOrderRequest::market(market.clone(), side, base_min)
        .with_client_order_id(client_order_id);
    let order = client.orders().add(&taker).await?;
    if order.status != OrderState::FullyFilled {
        println!("market order did not fill: {}", order.status);
        return Ok(());
    }
    println!("market order placed, current state: {}", order.status);

    let fills = client.fills().by_order_id(&order.order_id).await?;
    println!("found n-fills for market order: {}", fills.len());

    let fills = client
        .fills()
        .by_client_order_id(&order.client_order_id)
        .await?;
    println!("found n-fills by client order ID for market order: {}", fills.len());

    let page = client.fills().list(&FillParams::new()).await?;
    println!("found n-fills any orders: {}", page.result.len());

    Ok(())
}

