use std::error::Error;

use table_client::domain::{Card, Rank, Suit};
use table_client::events::NoticeLevel;
use table_client::services::{ActionGate, DiscardPileRole, TurnPhase};
use table_client::ws::ClientMsg;

use crate::support::harness::SessionHarness;
use crate::support::snapshots::TableBuilder;

#[test]
fn draw_phase_offers_draw_and_drop_only() -> Result<(), Box<dyn Error>> {
    let mut h = SessionHarness::connected();
    h.push_snapshot(
        TableBuilder::new(&["a", "b"])
            .mid_round()
            .discard(vec![Card::new(Rank::Queen, Suit::Clubs)])
            .build(),
    );
    assert_eq!(
        h.notices(),
        vec![(
            NoticeLevel::Info,
            "Your turn: draw from the deck or discard pile.".to_string()
        )]
    );

    assert_eq!(h.session.turn_phase(), TurnPhase::Draw);
    assert_eq!(h.session.discard_pile_role(), DiscardPileRole::DrawSource);
    assert_eq!(
        h.session.action_gate(),
        ActionGate {
            can_draw: true,
            can_drop: true,
            ..ActionGate::default()
        }
    );

    // Spreading before drawing is refused locally.
    assert!(h.session.spread_selected().is_err());
    assert!(h.sent.is_empty());

    h.session.click_discard_pile()?;
    match h.sent.sent().as_slice() {
        [ClientMsg::DrawCard { source, .. }] => {
            assert_eq!(serde_json::to_value(source)?, "discard")
        }
        other => panic!("unexpected {other:?}"),
    }
    assert_eq!(
        h.session.action_log().latest(),
        Some("You drew from the discard pile.")
    );
    Ok(())
}

#[test]
fn no_optimistic_update_after_intent() -> Result<(), Box<dyn Error>> {
    let mut h = SessionHarness::connected();
    let before = TableBuilder::new(&["a", "b"]).mid_round().build();
    h.push_snapshot(before.clone());

    h.session.click_deck()?;
    h.session.click_deck()?;

    // Still the draw phase until the server says otherwise.
    assert_eq!(h.session.snapshot(), Some(&before));
    assert_eq!(h.sent.event_names(), ["drawCard", "drawCard"]);
    Ok(())
}

#[test]
fn post_draw_flow_discards_spreads_and_drops_are_gated() -> Result<(), Box<dyn Error>> {
    let mut h = SessionHarness::connected();
    let snapshot = TableBuilder::new(&["a", "b"])
        .mid_round()
        .build_with(|s| s.players[0].has_taken_action_this_turn = true);
    let hand = snapshot.players[0].hand.clone();
    h.push_snapshot(snapshot);
    h.events();

    assert_eq!(h.session.discard_pile_role(), DiscardPileRole::DiscardTarget);
    assert!(h.session.drop_hand().is_err());
    assert_eq!(
        h.notices(),
        vec![(
            NoticeLevel::Error,
            "You have already drawn this turn.".to_string()
        )]
    );

    for card in &hand[..3] {
        assert!(h.session.toggle_card(*card));
    }
    let gate = h.session.action_gate();
    assert!(gate.can_spread && !gate.can_discard && !gate.can_hit);

    h.session.spread_selected()?;
    match h.sent.sent().as_slice() {
        [ClientMsg::Spread { cards, .. }] => assert_eq!(cards.as_slice(), &hand[..3]),
        other => panic!("unexpected {other:?}"),
    }
    assert!(h.session.selection().is_empty());
    Ok(())
}

#[test]
fn server_rejection_leaves_snapshot_untouched() -> Result<(), Box<dyn Error>> {
    let mut h = SessionHarness::connected();
    let snapshot = TableBuilder::new(&["a", "b"]).mid_round().build();
    h.push_snapshot(snapshot.clone());
    h.events();

    h.session.drop_hand()?;
    h.push(table_client::ws::ServerMsg::GameError {
        message: "Cannot drop while hit-locked".into(),
    });

    assert_eq!(
        h.notices(),
        vec![(
            NoticeLevel::Error,
            "Cannot drop while hit-locked".to_string()
        )]
    );
    assert_eq!(h.session.snapshot(), Some(&snapshot));
    assert_eq!(h.session.last_error(), Some("Cannot drop while hit-locked"));
    Ok(())
}
