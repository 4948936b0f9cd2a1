//! Plain-text and JSON frames for replays.

use serde::Serialize;

use crate::game::{Direction, Session, Status, Values};
use crate::replay::ReplayEngine;

/// Snapshot of a replay at one turn, for machine-readable output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Frame {
    /// Turn number (moves applied so far).
    pub turn: usize,
    /// Move that produced this frame (None at turn 0).
    pub direction: Option<Direction>,
    /// Score after this turn.
    pub score: u64,
    /// Score gained on this turn.
    pub score_delta: u64,
    /// Session status after this turn.
    pub status: Status,
    /// Tile values.
    pub grid: Values,
}

impl Frame {
    /// Capture the engine's current turn.
    #[must_use]
    pub fn capture(engine: &ReplayEngine) -> Self {
        let session = engine.session();
        Self {
            turn: engine.turn(),
            direction: engine.last_direction(),
            score: session.score(),
            score_delta: engine.last_move().map_or(0, |m| m.score_delta),
            status: session.status(),
            grid: session.grid().values(),
        }
    }
}

/// Render a session as a text frame: header line plus the grid.
#[must_use]
pub fn render_text<R>(session: &Session<R>, turn: usize) -> String {
    let status = match session.status() {
        Status::Playing => "PLAYING",
        Status::Won => "WON",
        Status::GameOver => "GAME OVER",
    };

    let mut out = String::new();
    out.push_str(&format!(
        "Turn {turn} | Score {} | Max tile {} | {status}\n",
        session.score(),
        session.grid().max_tile()
    ));
    out.push_str(&session.grid().to_string());
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::replay::Recording;

    #[test]
    fn test_render_text_header() {
        let session = Session::from_seed(5);
        let text = render_text(&session, 0);
        let header = text.lines().next().unwrap();
        assert!(header.starts_with("Turn 0 | Score 0"));
        assert!(header.ends_with("PLAYING"));
    }

    #[test]
    fn test_frame_capture() {
        let session = Session::from_seed(12);
        let direction = session.grid().legal_moves()[0];
        let mut engine = ReplayEngine::new(Recording::new(12, vec![direction])).unwrap();

        let start = Frame::capture(&engine);
        assert_eq!(start.turn, 0);
        assert_eq!(start.direction, None);

        engine.step_forward().unwrap();
        let next = Frame::capture(&engine);
        assert_eq!(next.turn, 1);
        assert_eq!(next.direction, Some(direction));
        assert_eq!(next.grid, engine.session().grid().values());

        let json = serde_json::to_string(&next).unwrap();
        assert!(json.contains("\"status\":\"playing\""));
    }
}
