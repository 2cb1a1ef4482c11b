//! Headless table client: joins one table and logs what a player would see.

use std::process::ExitCode;
use std::time::Duration;

use table_client::api::wallet::{HttpWalletApi, WalletBalance};
use table_client::telemetry;
use table_client::timers::{Clock, SystemClock};
use table_client::{ClientConfig, ClientError, ClientEvent, ConnectionId, TableSession, WsTransport};
use tokio::sync::mpsc;
use tracing::{error, info, warn};

#[tokio::main]
async fn main() -> ExitCode {
    telemetry::init_tracing();

    let config = match ClientConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    match run(config).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, code = err.code(), "table client stopped");
            ExitCode::FAILURE
        }
    }
}

async fn run(config: ClientConfig) -> Result<(), ClientError> {
    let clock = SystemClock;
    let wallet_api = HttpWalletApi::new(&config.api_url, config.api_token.clone());
    let mut wallet = WalletBalance::new();
    let mut session = TableSession::new(clock, config.timings);

    let (tx, mut rx) = mpsc::channel(256);
    let conn_id = ConnectionId::new();
    let transport = WsTransport::connect(&config.server_url, conn_id, tx).await?;
    session.connect(conn_id, config.join.clone(), Box::new(transport));

    refresh_wallet(&mut wallet, &wallet_api).await;

    loop {
        let sleep_for = session
            .next_deadline()
            .map(|deadline| Duration::from_millis((deadline - clock.now_ms()).max(0) as u64))
            .unwrap_or(Duration::from_secs(3600));

        tokio::select! {
            received = rx.recv() => match received {
                Some((id, event)) => session.handle_event(id, event),
                None => {
                    info!("[TABLE SESSION] transport channel closed");
                    break;
                }
            },
            _ = tokio::time::sleep(sleep_for) => {
                session.fire_due_timers();
            }
            _ = tokio::signal::ctrl_c() => {
                info!("[TABLE SESSION] interrupted, leaving");
                session.disconnect();
                break;
            }
        }

        for event in session.drain_events() {
            match event {
                ClientEvent::Notice(notice) => {
                    info!(level = ?notice.level, message = %notice.message, "notice")
                }
                ClientEvent::AdvisoryShown(advisory) => {
                    info!(message = %advisory.message, "advisory")
                }
                ClientEvent::RefreshWallet => refresh_wallet(&mut wallet, &wallet_api).await,
                ClientEvent::WalletBalance { balance } => {
                    wallet.set(balance);
                    info!(balance = %wallet.label(), "wallet");
                }
                ClientEvent::NavigateToLobby => {
                    info!("[TABLE SESSION] back to lobby");
                    return Ok(());
                }
                other => tracing::debug!(event = ?other, "session event"),
            }
        }
    }
    Ok(())
}

async fn refresh_wallet(wallet: &mut WalletBalance, api: &HttpWalletApi) {
    match wallet.refresh(api).await {
        Ok(_) => info!(balance = %wallet.label(), "wallet"),
        Err(err) => warn!(balance = %wallet.label(), error = %err, "wallet"),
    }
}
