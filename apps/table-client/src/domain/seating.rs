//! Seat layout relative to the local viewer.

use crate::domain::snapshot::{GameSnapshot, Player};

/// Seat positions around the table, counted clockwise from the viewer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatPosition {
    Bottom,
    Top,
    Right,
    Left,
}

impl SeatPosition {
    const BY_OFFSET: [SeatPosition; 4] = [
        SeatPosition::Bottom,
        SeatPosition::Top,
        SeatPosition::Right,
        SeatPosition::Left,
    ];
}

#[derive(Debug, Clone, PartialEq)]
pub struct SeatView<'a> {
    pub position: SeatPosition,
    pub seat_index: usize,
    pub player: &'a Player,
    pub is_current_turn: bool,
}

/// Player `offset` seats after the viewer, or `None` if that seat is empty.
///
/// A viewer who is not seated (spectator, or not yet in the snapshot) is
/// treated as sitting at index 0.
pub fn seat_at<'a>(snapshot: &'a GameSnapshot, viewer_id: &str, offset: usize) -> Option<&'a Player> {
    let total = snapshot.players.len();
    if offset >= total {
        return None;
    }
    let local = snapshot.seat_of(viewer_id).unwrap_or(0);
    snapshot.players.get((local + offset) % total)
}

/// All occupied seats, viewer first, up to four positions.
pub fn seat_layout<'a>(snapshot: &'a GameSnapshot, viewer_id: &str) -> Vec<SeatView<'a>> {
    let total = snapshot.players.len();
    let local = snapshot.seat_of(viewer_id).unwrap_or(0);
    SeatPosition::BY_OFFSET
        .iter()
        .enumerate()
        .filter(|(offset, _)| *offset < total)
        .map(|(offset, position)| {
            let seat_index = (local + offset) % total;
            SeatView {
                position: *position,
                seat_index,
                player: &snapshot.players[seat_index],
                is_current_turn: seat_index == snapshot.current_player_index,
            }
        })
        .collect()
}
