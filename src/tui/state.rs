use crate::controller::Session;
use crate::model::{GameType, Mode};

/// State owned by the UI thread: the dashboard session plus input editing
/// and presentation bookkeeping. Never mutated from another thread.
pub struct UiState {
    pub session: Session,

    // Mission-control inputs
    pub game_id: String,
    pub editing_game_id: bool,
    pub batch_size: u32,
    pub iterations: u32,
    pub game_type: GameType,

    pub draft_scroll: u16,
    pub show_help: bool,
    pub info: String,
}

impl UiState {
    pub fn new(game_id: String, batch_size: u32, iterations: u32, game_type: GameType) -> Self {
        Self {
            session: Session::default(),
            game_id,
            editing_game_id: false,
            batch_size: batch_size.max(1),
            iterations: iterations.max(1),
            game_type,
            draft_scroll: 0,
            show_help: false,
            info: String::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.session.mode
    }

    /// Whether Enter may start a run right now. The start control is
    /// disabled while the active mode has a request in flight, and a draft
    /// additionally needs a non-empty game id.
    pub fn can_start(&self) -> bool {
        if self.session.active_loading() {
            return false;
        }
        match self.session.mode {
            Mode::Draft => !self.game_id.trim().is_empty(),
            Mode::Eval => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn start_is_disabled_while_loading() {
        let mut s = UiState::new("22200477".into(), 3, 1, GameType::All);
        assert!(s.can_start());
        let _ = s.session.begin_draft();
        assert!(!s.can_start());
        // The other mode's in-flight draft does not block an eval start.
        s.session.set_mode(Mode::Eval);
        assert!(s.can_start());
    }

    #[test]
    fn empty_game_id_disables_draft_start_only() {
        let mut s = UiState::new("  ".into(), 3, 1, GameType::All);
        assert!(!s.can_start());
        s.session.set_mode(Mode::Eval);
        assert!(s.can_start());
    }
}
