//! Overlay client: connect to the broadcast server and render widget state.
//!
//! A terminal stand-in for the on-screen overlay: the engine is driven
//! exactly as a graphical front end would drive it, and the current widget
//! state is printed whenever it changes.

use statuscast::client::OverlayClient;
use statuscast::config::OverlayConfig;
use statuscast::overlay::OverlayEngine;
use std::time::{Duration, Instant};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().or_else(|_| EnvFilter::try_new("info"))?;
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = OverlayConfig::from_env();
    let (client, mut events, mut conn_state) = OverlayClient::new(config.port);
    tokio::spawn(client.run());

    let mut engine = OverlayEngine::new(config, Instant::now());
    engine.note_connection(*conn_state.borrow_and_update());

    let mut frame = tokio::time::interval(Duration::from_millis(100));
    let mut last_line = String::new();

    loop {
        tokio::select! {
            event = events.recv() => {
                let Some(event) = event else { break };
                engine.apply(Instant::now(), &event);
            }
            changed = conn_state.changed() => {
                if changed.is_err() {
                    break;
                }
                engine.note_connection(*conn_state.borrow_and_update());
            }
            _ = frame.tick() => {
                let now = Instant::now();
                engine.tick(now);
                let line = status_line(&engine, now);
                if line != last_line {
                    println!("{line}");
                    last_line = line;
                }
            }
        }
    }
    Ok(())
}

fn status_line(engine: &OverlayEngine, now: Instant) -> String {
    let (current, spent, capacity) = engine.ammo.counts();
    let log: Vec<&str> = engine.log.visible().map(|e| e.text.as_str()).collect();
    format!(
        "score {:>7} | health {:>3.0}% | {} {}/{} ({} spent) | {}",
        engine.score.displayed_at(now),
        engine.health.fraction() * 100.0,
        engine.weapon_name().to_uppercase(),
        current,
        capacity,
        spent,
        log.join(" | "),
    )
}
