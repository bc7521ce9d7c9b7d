//! Lobby churn and statistics example
//!
//! Run with: cargo run --example lobby_stats [CLIENTS]
//!
//! Registers a batch of clients with mixed genders and preferences,
//! churns them through partner swaps and disconnects, and prints hub
//! statistics snapshots along the way. Useful for eyeballing pool
//! behavior under load.

use std::sync::Arc;
use std::time::Duration;

use roulette_rs::{ClientId, Gender, HubConfig, Preference, ServerEvent, SignalingHub};

fn profile_for(index: usize) -> (Gender, Preference) {
    match index % 4 {
        0 => (Gender::Male, Preference::Opposite),
        1 => (Gender::Female, Preference::Opposite),
        2 => (Gender::Male, Preference::Any),
        _ => (Gender::Unspecified, Preference::Any),
    }
}

async fn print_snapshot(hub: &SignalingHub, label: &str) {
    let stats = hub.stats().await;
    let pools = hub.pool_sizes().await;
    println!(
        "[{label}] active={} paired={} waiting={} | pools: any={} seeking-male={} seeking-female={} | pairs={} relayed={}",
        stats.active_clients,
        stats.paired_clients,
        stats.waiting_clients,
        pools.any,
        pools.seeking_male,
        pools.seeking_female,
        stats.pairs_formed,
        stats.messages_relayed,
    );
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("roulette_rs=warn".parse()?),
        )
        .init();

    let count: usize = std::env::args()
        .nth(1)
        .map(|arg| arg.parse())
        .transpose()?
        .unwrap_or(40);

    let hub = Arc::new(SignalingHub::with_config(
        HubConfig::new().max_clients(count),
    ));

    println!("=== Lobby churn: {} clients ===", count);

    // Register everyone; each client just drains its channel.
    for index in 0..count {
        let (gender, preference) = profile_for(index);
        let id = ClientId::from(format!("client-{index}"));
        let mut events = hub.register(id, gender, preference).await?;
        tokio::spawn(async move {
            while let Some(event) = events.recv().await {
                if let ServerEvent::Error { message } = event {
                    eprintln!("client error: {message}");
                }
            }
        });
    }
    print_snapshot(&hub, "after registration").await;

    // Every paired client on the even side swaps partners once.
    for index in (0..count).step_by(2) {
        let id = ClientId::from(format!("client-{index}"));
        if hub.partner_of(&id).await.is_some() {
            hub.next_partner(&id).await?;
        }
    }
    tokio::time::sleep(Duration::from_millis(50)).await;
    print_snapshot(&hub, "after swaps").await;

    // A quarter of the lobby leaves.
    for index in (0..count).step_by(4) {
        hub.disconnect(&ClientId::from(format!("client-{index}"))).await;
    }
    print_snapshot(&hub, "after departures").await;

    let stats = hub.stats().await;
    println!(
        "uptime={:?} total_registrations={}",
        stats.uptime, stats.total_registrations
    );

    Ok(())
}
