use std::error::Error;
use std::time::Duration;

use table_client::config::SessionTimings;
use table_client::events::{ClientEvent, Notice, NoticeLevel};
use table_client::timers::ManualClock;
use table_client::ws::{ConnectionId, JoinRequest, ServerMsg, TransportEvent, WsTransport};
use table_client::TableSession;
use tokio::sync::mpsc;
use tokio::time::timeout;

use crate::support::harness::ME;
use crate::support::snapshots::{TableBuilder, TABLE_ID};
use crate::support::ws_server::spawn_table_server;

const WAIT: Duration = Duration::from_secs(5);

type Events = mpsc::Receiver<(ConnectionId, TransportEvent)>;

async fn pump_until(
    session: &mut TableSession<ManualClock>,
    rx: &mut Events,
    done: impl Fn(&TableSession<ManualClock>) -> bool,
) -> Result<(), Box<dyn Error>> {
    while !done(session) {
        let (id, event) = timeout(WAIT, rx.recv()).await?.ok_or("event channel closed")?;
        session.handle_event(id, event);
    }
    Ok(())
}

async fn joined_session(
    url: &str,
) -> Result<(TableSession<ManualClock>, Events), Box<dyn Error>> {
    let (tx, rx) = mpsc::channel(64);
    let conn = ConnectionId::new();
    let transport = WsTransport::connect(url, conn, tx).await?;
    let mut session = TableSession::new(ManualClock::starting_at(1_000), SessionTimings::default());
    session.connect(conn, JoinRequest::new(TABLE_ID, ME, "alice"), Box::new(transport));
    Ok((session, rx))
}

#[tokio::test]
async fn join_state_and_intent_cross_the_wire() -> Result<(), Box<dyn Error>> {
    let initial = TableBuilder::new(&[ME, "b"]).mid_round().build();
    let push = serde_json::to_value(ServerMsg::InitialGameState(initial.clone()))?;
    let mut server = spawn_table_server(vec![push]).await;

    let (mut session, mut rx) = joined_session(&server.url).await?;
    pump_until(&mut session, &mut rx, |s| s.snapshot().is_some()).await?;

    let join = timeout(WAIT, server.received.recv()).await?.ok_or("no join frame")?;
    assert_eq!(join["event"], "joinTable");
    assert_eq!(join["data"]["tableId"], TABLE_ID);
    assert_eq!(join["data"]["userId"], ME);

    let snapshot = session.snapshot().ok_or("snapshot expected")?;
    assert_eq!(snapshot.turn, initial.turn);
    assert_eq!(snapshot.players[0].hand, initial.players[0].hand);
    assert!(session.action_gate().can_draw);

    session.click_deck()?;
    let draw = timeout(WAIT, server.received.recv()).await?.ok_or("no draw frame")?;
    assert_eq!(draw["event"], "drawCard");
    assert_eq!(draw["data"]["source"], "deck");

    session.disconnect();
    server.handle.abort();
    Ok(())
}

#[tokio::test]
async fn server_going_away_surfaces_a_warning() -> Result<(), Box<dyn Error>> {
    let server = spawn_table_server(Vec::new()).await;
    let (mut session, mut rx) = joined_session(&server.url).await?;
    pump_until(&mut session, &mut rx, |s| s.is_connected()).await?;
    session.drain_events();

    server.handle.abort();
    pump_until(&mut session, &mut rx, |s| !s.is_connected()).await?;

    let events = session.drain_events();
    assert!(events.contains(&ClientEvent::ConnectionChanged { connected: false }));
    assert!(events.contains(&ClientEvent::Notice(Notice::warning(
        "Disconnected from game server."
    ))));
    Ok(())
}

#[tokio::test]
async fn malformed_push_is_surfaced_and_lenient_fields_still_apply() -> Result<(), Box<dyn Error>> {
    let pushes = vec![
        serde_json::json!({"event": "mysteryEvent", "data": {}}),
        serde_json::json!({"event": "gameStateUpdate", "data": {"tableId": TABLE_ID}}),
        serde_json::json!({
            "event": "gameStateUpdate",
            "data": {"tableId": TABLE_ID, "mode": null, "status": "waiting", "players": []}
        }),
    ];
    let server = spawn_table_server(pushes).await;
    let (mut session, mut rx) = joined_session(&server.url).await?;
    pump_until(&mut session, &mut rx, |s| s.snapshot().is_some()).await?;

    let warnings: Vec<String> = session
        .drain_events()
        .into_iter()
        .filter_map(|event| match event {
            ClientEvent::Notice(notice) if notice.level == NoticeLevel::Warning => {
                Some(notice.message)
            }
            _ => None,
        })
        .collect();
    // Only the snapshot missing its status is unreadable; the unknown event is skipped.
    assert_eq!(
        warnings,
        ["Received an update from the game server that could not be read."]
    );
    assert!(session.snapshot().is_some_and(|s| s.players.is_empty()));

    session.disconnect();
    server.handle.abort();
    Ok(())
}
