use table_client::events::{ClientEvent, NoticeLevel};
use table_client::services::DealPhase;
use table_client::ws::{ConnectionId, JoinRequest, MemoryTransport, ServerMsg, TransportEvent};

use crate::support::harness::SessionHarness;
use crate::support::snapshots::TableBuilder;

#[test]
fn disconnect_mid_animation_leaves_nothing_behind() {
    let mut h = SessionHarness::connected();
    h.push_snapshot(TableBuilder::new(&["a", "b"]).build());
    h.advance(700 + 90 * 4);
    assert_eq!(h.session.deal_phase(), DealPhase::Dealing);
    h.events();

    h.session.disconnect();
    assert_eq!(h.session.deal_phase(), DealPhase::Idle);
    assert!(h.session.snapshot().is_none());
    assert!(h.session.visible_hand_counts().is_empty());
    assert_eq!(h.session.next_deadline(), None);
    assert_eq!(h.sent.closes(), 1);

    // Timers that would have fired are gone.
    assert_eq!(h.advance(60_000), 0);
    let events = h.events();
    assert!(events.contains(&ClientEvent::DealPhaseChanged {
        from: DealPhase::Dealing,
        to: DealPhase::Idle,
    }));
    assert!(!events.iter().any(|e| matches!(e, ClientEvent::Notice(_))));
}

#[test]
fn switching_tables_starts_clean() {
    let mut h = SessionHarness::connected();
    h.push_snapshot(TableBuilder::new(&["a", "b"]).build());
    let old = h.conn;

    let (transport, sent) = MemoryTransport::new();
    let fresh = ConnectionId::new();
    h.session
        .connect(fresh, JoinRequest::new("t2", "a", "alice"), Box::new(transport));
    assert_eq!(h.session.deal_phase(), DealPhase::Idle);
    assert!(h.session.snapshot().is_none());

    // Leftovers from the old channel are dropped.
    h.session.handle_event(
        old,
        TransportEvent::Message(ServerMsg::GameStateUpdate(
            TableBuilder::new(&["a", "b"]).build(),
        )),
    );
    assert!(h.session.snapshot().is_none());

    h.session.handle_event(fresh, TransportEvent::Connected);
    assert_eq!(sent.event_names(), ["joinTable"]);

    // Same deal on the new table animates, since nothing carried over.
    h.session.handle_event(
        fresh,
        TransportEvent::Message(ServerMsg::InitialGameState(
            TableBuilder::new(&["a", "b"]).table_id("t2").build(),
        )),
    );
    assert_eq!(h.session.deal_phase(), DealPhase::Shuffling);
}

#[test]
fn transport_drop_warns_and_rejoins_on_reconnect() {
    let mut h = SessionHarness::connected();
    h.push_snapshot(TableBuilder::new(&["a", "b"]).mid_round().build());
    h.events();

    h.session
        .handle_event(h.conn, TransportEvent::Disconnected { reason: None });
    assert!(!h.session.is_connected());
    assert_eq!(
        h.notices(),
        vec![(
            NoticeLevel::Warning,
            "Disconnected from game server.".to_string()
        )]
    );

    h.session.handle_event(h.conn, TransportEvent::Connected);
    assert!(h.session.is_connected());
    assert_eq!(h.sent.event_names(), ["joinTable"]);
}
