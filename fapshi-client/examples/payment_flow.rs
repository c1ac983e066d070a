//! Payment flow against the Fapshi sandbox.
//!
//! Creates a payment link, polls its status, then expires it. Each step shows
//! how a response's status code separates rejected input, gateway refusals
//! and network failures.
//!
//! # Running this example
//!
//! ```bash
//! export FAPSHI_API_USER=<sandbox api user>
//! export FAPSHI_API_KEY=<sandbox api key>
//! cargo run --example payment_flow
//! ```

#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::use_debug,
    reason = "examples are allowed to use println and simple formatting"
)]

use fapshi_client::{
    Envelope, FapshiClient, FapshiConfig, PaymentLinkOptions, config::SANDBOX_BASE_URL,
};

fn describe(step: &str, response: &impl Envelope) {
    match response.status_code() {
        200..=299 => println!("{step}: ok"),
        400 => println!("{step}: rejected locally: {:?}", response.message()),
        500 => println!("{step}: network failure: {:?}", response.message()),
        status => println!("{step}: gateway refused ({status}): {:?}", response.message()),
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt().with_env_filter("fapshi_client=debug").init();

    let config = FapshiConfig::from_env()?.with_base_url(SANDBOX_BASE_URL);
    let client = FapshiClient::new(config)?;

    // Rejected before any request is sent.
    let too_small = client.create_payment_link(50, PaymentLinkOptions::new()).await;
    describe("create link for 50 XAF", &too_small);

    let link = client
        .create_payment_link(
            5000,
            PaymentLinkOptions::new()
                .email("buyer@example.com")
                .external_id("order-1042")
                .message("Order #1042"),
        )
        .await;
    describe("create link for 5000 XAF", &link);
    if !link.is_success() {
        return Ok(());
    }

    let Some(trans_id) = link.trans_id else {
        eprintln!("gateway returned no transaction id");
        return Ok(());
    };
    println!("pay at {}", link.link.unwrap_or_default());

    let status = client.get_payment_status(&trans_id).await;
    describe("status", &status);
    println!("{trans_id} is {:?}", status.status);

    let expired = client.cancel_payment_link(&trans_id).await;
    describe("expire", &expired);
    println!("{trans_id} is now {:?}", expired.status);

    Ok(())
}
