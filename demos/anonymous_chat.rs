//! Anonymous chat matchmaking example
//!
//! Run with: cargo run --example anonymous_chat
//!
//! Simulates a handful of in-process clients connecting to a
//! `SignalingHub`, getting paired, and exchanging a minimal negotiation
//! handshake (offer -> answer -> candidate) before one side asks for the
//! next partner. In a real deployment each simulated client would be a
//! WebSocket connection; the hub does not care.
//!
//! Set RUST_LOG=roulette_rs=debug to watch the hub's internal decisions.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::mpsc;

use roulette_rs::{
    ClientEvent, ClientId, Gender, Preference, RelayKind, ServerEvent, SignalingHub,
};

/// One simulated client: drains its outbound channel and reacts the way a
/// browser client would.
async fn run_client(
    hub: Arc<SignalingHub>,
    id: ClientId,
    mut events: mpsc::UnboundedReceiver<ServerEvent>,
) {
    while let Some(event) = events.recv().await {
        match event {
            ServerEvent::Status { message } => {
                println!("[{}] status: {}", id, message);
            }
            ServerEvent::PartnerFound {
                partner_id,
                partner_gender,
                initiator,
            } => {
                println!(
                    "[{}] paired with {} ({:?}), initiator={}",
                    id, partner_id, partner_gender, initiator
                );
                if initiator {
                    let event = ClientEvent::Offer {
                        target_id: partner_id,
                        payload: json!({"sdp": format!("offer from {}", id)}),
                    };
                    let _ = hub.dispatch(&id, event).await;
                }
            }
            ServerEvent::Offer { sender_id, .. } => {
                println!("[{}] got offer from {}", id, sender_id);
                let event = ClientEvent::Answer {
                    target_id: sender_id,
                    payload: json!({"sdp": format!("answer from {}", id)}),
                };
                let _ = hub.dispatch(&id, event).await;
            }
            ServerEvent::Answer { sender_id, .. } => {
                println!("[{}] got answer from {}", id, sender_id);
                let _ = hub
                    .relay(
                        &id,
                        RelayKind::Candidate,
                        &sender_id,
                        json!({"candidate": "udp 192.0.2.1 3478"}),
                    )
                    .await;
            }
            ServerEvent::Candidate { sender_id, .. } => {
                println!("[{}] got candidate from {}; P2P link ready", id, sender_id);
            }
            ServerEvent::Signal { sender_id, .. } => {
                println!("[{}] got signal from {}", id, sender_id);
            }
            ServerEvent::PartnerDisconnected => {
                println!("[{}] partner left, back to waiting", id);
            }
            ServerEvent::Error { message } => {
                println!("[{}] error: {}", id, message);
            }
        }
    }
    println!("[{}] channel closed", id);
}

async fn connect(
    hub: &Arc<SignalingHub>,
    name: &str,
    gender: Gender,
    preference: Preference,
) -> Result<(), roulette_rs::Error> {
    let id = ClientId::from(name);
    let events = hub.register(id.clone(), gender, preference).await?;
    tokio::spawn(run_client(Arc::clone(hub), id, events));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("roulette_rs=info".parse()?),
        )
        .init();

    let hub = Arc::new(SignalingHub::new());

    println!("=== Anonymous chat simulation ===");
    println!();

    // Alice waits alone until a compatible partner shows up.
    connect(&hub, "alice", Gender::Female, Preference::Opposite).await?;
    tokio::time::sleep(Duration::from_millis(100)).await;

    // Bob seeks the opposite gender: instant match with Alice.
    connect(&hub, "bob", Gender::Male, Preference::Opposite).await?;
    tokio::time::sleep(Duration::from_millis(300)).await;

    // Two no-preference clients pair with each other.
    connect(&hub, "carol", Gender::Female, Preference::Any).await?;
    connect(&hub, "dave", Gender::Unspecified, Preference::Any).await?;
    tokio::time::sleep(Duration::from_millis(300)).await;

    // Bob wants someone new; Alice goes back to the pool.
    println!();
    println!("--- bob skips to the next partner ---");
    hub.next_partner(&ClientId::from("bob")).await?;
    tokio::time::sleep(Duration::from_millis(300)).await;

    // Everybody leaves.
    for name in ["alice", "bob", "carol", "dave"] {
        hub.disconnect(&ClientId::from(name)).await;
    }
    tokio::time::sleep(Duration::from_millis(100)).await;

    let stats = hub.stats().await;
    println!();
    println!(
        "Done: {} registrations, {} pairs formed, {} messages relayed",
        stats.total_registrations, stats.pairs_formed, stats.messages_relayed
    );

    Ok(())
}
