//! Top-level game states and transitions
//!
//! Each state is a small object behind the [`GameState`] trait. The
//! [`StateManager`] owns the current one plus the state it replaced, which
//! is enough for ConfirmExit to step back to wherever it was opened from.

use crate::game::{Outcome, Session};
use crate::input::{InputEvent, Key};
use crate::render::Scene;
use std::fmt::Debug;

/// Identifies a state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StateId {
    Playing,
    Paused,
    GameOver,
    ConfirmExit,
}

/// What a state asks the manager to do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    None,
    Change(StateId),
    /// Return to the previous state
    Back,
    Exit,
}

/// What the main loop should do next
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    Continue,
    Exit,
}

pub trait GameState: Debug {
    fn id(&self) -> StateId;

    fn on_enter(&mut self, session: &mut Session);

    fn on_exit(&mut self, _next: StateId, _session: &mut Session) {}

    fn handle_input(&mut self, key: Key, repeat: bool, session: &mut Session) -> Transition;

    fn update(&mut self, _session: &mut Session) -> Transition {
        Transition::None
    }

    fn render(&self, _session: &Session) -> Scene {
        Scene::default()
    }
}

/// Build a fresh state, `from` being the state it replaces
pub fn create(id: StateId, from: Option<StateId>) -> Box<dyn GameState> {
    match id {
        StateId::Playing => Box::new(PlayingState),
        StateId::Paused => Box::new(PausedState {
            resuming: from == Some(StateId::Playing),
        }),
        StateId::GameOver => Box::new(GameOverState),
        StateId::ConfirmExit => Box::new(ConfirmExitState),
    }
}

fn outcome_transition(outcome: Outcome) -> Transition {
    match outcome {
        Outcome::Continue => Transition::None,
        Outcome::GameOver => Transition::Change(StateId::GameOver),
    }
}

#[derive(Debug)]
struct PlayingState;

impl GameState for PlayingState {
    fn id(&self) -> StateId {
        StateId::Playing
    }

    fn on_enter(&mut self, session: &mut Session) {
        let title = session.score().title();
        session.set_title(title);
    }

    fn handle_input(&mut self, key: Key, repeat: bool, session: &mut Session) -> Transition {
        match key {
            Key::Cancel => Transition::Change(StateId::Paused),
            Key::Confirm => Transition::None,
            key => outcome_transition(session.handle_key(key, repeat)),
        }
    }

    fn update(&mut self, session: &mut Session) -> Transition {
        outcome_transition(session.update())
    }

    fn render(&self, session: &Session) -> Scene {
        session.scene()
    }
}

#[derive(Debug)]
struct PausedState {
    /// Paused mid-game rather than waiting for the first start
    resuming: bool,
}

impl GameState for PausedState {
    fn id(&self) -> StateId {
        StateId::Paused
    }

    fn on_enter(&mut self, session: &mut Session) {
        session.clock_mut().pause();
        if self.resuming {
            session.set_title("Paused... press <Enter> to resume!");
        } else {
            session.set_title("Tetris - press <Enter> to start!");
        }
    }

    fn on_exit(&mut self, _next: StateId, session: &mut Session) {
        session.clock_mut().resume();
    }

    fn handle_input(&mut self, key: Key, _repeat: bool, _session: &mut Session) -> Transition {
        match key {
            Key::Confirm => Transition::Change(StateId::Playing),
            _ => Transition::None,
        }
    }
}

#[derive(Debug)]
struct GameOverState;

impl GameState for GameOverState {
    fn id(&self) -> StateId {
        StateId::GameOver
    }

    fn on_enter(&mut self, session: &mut Session) {
        let title = format!("Game Over! {} - press <Enter> to restart", session.score().title());
        session.set_title(title);
    }

    fn handle_input(&mut self, key: Key, _repeat: bool, session: &mut Session) -> Transition {
        match key {
            Key::Confirm => {
                session.reset();
                Transition::Change(StateId::Playing)
            }
            _ => Transition::None,
        }
    }

    fn render(&self, session: &Session) -> Scene {
        session.scene()
    }
}

#[derive(Debug)]
struct ConfirmExitState;

impl GameState for ConfirmExitState {
    fn id(&self) -> StateId {
        StateId::ConfirmExit
    }

    fn on_enter(&mut self, session: &mut Session) {
        session.clock_mut().pause();
        session.set_title("Press <Enter> to exit or <Esc> to cancel!");
    }

    fn on_exit(&mut self, _next: StateId, session: &mut Session) {
        session.clock_mut().resume();
    }

    fn handle_input(&mut self, key: Key, _repeat: bool, _session: &mut Session) -> Transition {
        match key {
            Key::Confirm => Transition::Exit,
            Key::Cancel => Transition::Back,
            _ => Transition::None,
        }
    }
}

/// Owns the current state and one level of history
#[derive(Debug)]
pub struct StateManager {
    current: Box<dyn GameState>,
    previous: Option<Box<dyn GameState>>,
}

impl StateManager {
    /// Start in Paused, waiting for the player
    pub fn new(session: &mut Session) -> Self {
        let mut current = create(StateId::Paused, None);
        current.on_enter(session);
        Self {
            current,
            previous: None,
        }
    }

    pub fn current(&self) -> StateId {
        self.current.id()
    }

    pub fn previous(&self) -> Option<StateId> {
        self.previous.as_ref().map(|state| state.id())
    }

    /// Replace the current state with a fresh `id` state
    pub fn change_state(&mut self, id: StateId, session: &mut Session) {
        let from = self.current.id();
        tracing::debug!(?from, to = ?id, "state change");
        self.current.on_exit(id, session);
        let next = create(id, Some(from));
        self.previous = Some(std::mem::replace(&mut self.current, next));
        self.current.on_enter(session);
    }

    /// Swap back to the previous state, if there is one
    pub fn go_back(&mut self, session: &mut Session) {
        let Some(previous) = self.previous.take() else {
            return;
        };
        let to = previous.id();
        tracing::debug!(from = ?self.current.id(), ?to, "state back");
        self.current.on_exit(to, session);
        self.previous = Some(std::mem::replace(&mut self.current, previous));
        self.current.on_enter(session);
    }

    fn apply(&mut self, transition: Transition, session: &mut Session) -> Control {
        match transition {
            Transition::None => {}
            Transition::Change(id) => self.change_state(id, session),
            Transition::Back => self.go_back(session),
            Transition::Exit => {
                tracing::info!(score = session.score().points, "exit confirmed");
                return Control::Exit;
            }
        }
        Control::Continue
    }

    /// Dispatch one input event to the current state
    pub fn handle_event(&mut self, event: InputEvent, session: &mut Session) -> Control {
        match event {
            InputEvent::Terminate => {
                if self.current() != StateId::ConfirmExit {
                    self.change_state(StateId::ConfirmExit, session);
                }
                Control::Continue
            }
            InputEvent::KeyDown { key, repeat } => {
                let transition = self.current.handle_input(key, repeat, session);
                self.apply(transition, session)
            }
        }
    }

    /// Per-frame update of the current state
    pub fn update(&mut self, session: &mut Session) -> Control {
        let transition = self.current.update(session);
        self.apply(transition, session)
    }

    pub fn render(&self, session: &Session) -> Scene {
        self.current.render(session)
    }
}
