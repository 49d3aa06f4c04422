//! Application state and the transitions between loading, swiping and
//! summary.
//!
//! Timed steps are not performed here. The shell watches
//! [`AppState::pending_exit`] and [`AppState::summary_due`] and dispatches
//! [`AppAction::ExitFinished`] / [`AppAction::ShowSummary`] when their timers
//! elapse.

use log::{debug, info, warn};
use std::rc::Rc;
use yew::functional::Reducible;

use crate::gesture::{GestureTracker, Point, Release, SwipeDirection};
use crate::session::{Advance, Item, Session};

pub const SUMMARY_DELAY_MS: u32 = 300;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppPhase {
    Loading,
    Failed(String),
    Swiping,
    Summary,
}

#[derive(Debug, Clone)]
pub enum AppAction {
    BatchLoaded(Vec<Item>),
    BatchFailed(String),
    Retry,
    PointerDown { pointer_id: i32, at: Point },
    PointerMove { pointer_id: i32, at: Point },
    PointerUp { pointer_id: i32 },
    PointerCancel { pointer_id: i32 },
    Button(SwipeDirection),
    ExitFinished { ticket: u64 },
    ShowSummary,
    Restart,
    BackToSwiping,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppState {
    pub phase: AppPhase,
    pub session: Session,
    pub gesture: GestureTracker,
    /// Set when the last card is committed; cleared once the summary shows.
    pub summary_due: bool,
    /// Bumped on every retry so the fetch effect runs again.
    pub attempt: u32,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            phase: AppPhase::Loading,
            session: Session::default(),
            gesture: GestureTracker::new(),
            summary_due: false,
            attempt: 0,
        }
    }
}

impl AppState {
    pub fn pending_exit(&self) -> Option<u64> {
        self.gesture.commit_ticket()
    }

    pub fn accepts_swipes(&self) -> bool {
        self.phase == AppPhase::Swiping && self.session.active().is_some()
    }

    pub fn apply(&mut self, action: AppAction) {
        match action {
            AppAction::BatchLoaded(items) => {
                if self.phase != AppPhase::Loading {
                    warn!("Ignoring batch that arrived outside of loading");
                    return;
                }
                info!("Session ready with {} items", items.len());
                self.session = Session::new(items);
                self.gesture.reset();
                self.summary_due = false;
                self.phase = AppPhase::Swiping;
            }
            AppAction::BatchFailed(message) => {
                if self.phase == AppPhase::Loading {
                    self.phase = AppPhase::Failed(message);
                }
            }
            AppAction::Retry => {
                if matches!(self.phase, AppPhase::Failed(_)) {
                    self.attempt += 1;
                    info!("Retrying batch fetch (attempt {})", self.attempt + 1);
                    self.phase = AppPhase::Loading;
                }
            }
            AppAction::PointerDown { pointer_id, at } => {
                if self.accepts_swipes() {
                    self.gesture.press(pointer_id, at);
                }
            }
            AppAction::PointerMove { pointer_id, at } => {
                if self.accepts_swipes() {
                    self.gesture.drag(pointer_id, at);
                }
            }
            AppAction::PointerUp { pointer_id } => {
                if !self.accepts_swipes() {
                    return;
                }
                if let Release::Commit(direction) = self.gesture.release(pointer_id) {
                    debug!("Card {:?} swiped {:?}", self.active_id(), direction);
                }
            }
            AppAction::PointerCancel { pointer_id } => {
                self.gesture.cancel(pointer_id);
            }
            AppAction::Button(direction) => {
                if self.accepts_swipes() && self.gesture.fling(direction) {
                    debug!("Card {:?} sent {:?} by button", self.active_id(), direction);
                }
            }
            AppAction::ExitFinished { ticket } => {
                let Some(direction) = self.gesture.finish(ticket) else {
                    return;
                };
                if self.phase != AppPhase::Swiping {
                    return;
                }
                if self.session.advance(direction) == Advance::Finished {
                    self.summary_due = true;
                }
            }
            AppAction::ShowSummary => {
                if self.summary_due && self.phase == AppPhase::Swiping {
                    info!(
                        "Deck finished: {} liked, {} passed",
                        self.session.liked().len(),
                        self.session.disliked().len()
                    );
                    self.summary_due = false;
                    self.phase = AppPhase::Summary;
                }
            }
            AppAction::Restart => {
                if matches!(self.phase, AppPhase::Swiping | AppPhase::Summary) {
                    self.session.restart();
                    self.gesture.reset();
                    self.summary_due = false;
                    self.phase = AppPhase::Swiping;
                }
            }
            AppAction::BackToSwiping => {
                if self.phase == AppPhase::Summary {
                    self.phase = AppPhase::Swiping;
                }
            }
        }
    }

    fn active_id(&self) -> Option<u32> {
        self.session.active().map(|item| item.id)
    }
}

impl Reducible for AppState {
    type Action = AppAction;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        next.apply(action);
        Rc::new(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn swiping(count: u32) -> AppState {
        let mut state = AppState::default();
        state.apply(AppAction::BatchLoaded(
            (0..count)
                .map(|id| Item::new(id, format!("https://cataas.com/cat?{id}")))
                .collect(),
        ));
        state
    }

    fn drag(state: &mut AppState, dx: f64) {
        state.apply(AppAction::PointerDown {
            pointer_id: 1,
            at: Point::new(0.0, 0.0),
        });
        state.apply(AppAction::PointerMove {
            pointer_id: 1,
            at: Point::new(dx, 5.0),
        });
        state.apply(AppAction::PointerUp { pointer_id: 1 });
    }

    fn finish_exit(state: &mut AppState) {
        let ticket = state.pending_exit().expect("exit animation pending");
        state.apply(AppAction::ExitFinished { ticket });
    }

    #[test]
    fn loads_into_swiping() {
        let state = swiping(3);
        assert_eq!(state.phase, AppPhase::Swiping);
        assert_eq!(state.session.len(), 3);
    }

    #[test]
    fn failed_batch_never_reaches_swiping() {
        let mut state = AppState::default();
        state.apply(AppAction::BatchFailed("HTTP 503".to_string()));
        assert_eq!(state.phase, AppPhase::Failed("HTTP 503".to_string()));
        assert!(state.session.is_empty());

        state.apply(AppAction::PointerDown {
            pointer_id: 1,
            at: Point::new(0.0, 0.0),
        });
        assert!(!state.gesture.is_dragging());

        state.apply(AppAction::Retry);
        assert_eq!(state.phase, AppPhase::Loading);
        assert_eq!(state.attempt, 1);
    }

    #[test]
    fn short_drag_leaves_session_untouched() {
        let mut state = swiping(3);
        drag(&mut state, 100.0);
        drag(&mut state, -99.0);
        assert_eq!(state.pending_exit(), None);
        assert_eq!(state.session.position(), 0);
        assert!(state.session.liked().is_empty());
        assert!(state.session.disliked().is_empty());
    }

    #[test]
    fn long_drags_classify_after_exit_animation() {
        let mut state = swiping(3);
        drag(&mut state, 101.0);
        assert_eq!(state.session.position(), 0);
        finish_exit(&mut state);
        assert_eq!(state.session.liked().len(), 1);

        drag(&mut state, -101.0);
        finish_exit(&mut state);
        assert_eq!(state.session.disliked().len(), 1);
        assert_eq!(state.session.position(), 2);
    }

    #[test]
    fn stale_exit_timer_is_ignored() {
        let mut state = swiping(3);
        drag(&mut state, 150.0);
        let ticket = state.pending_exit().unwrap();
        state.apply(AppAction::Restart);
        state.apply(AppAction::ExitFinished { ticket });
        assert_eq!(state.session.position(), 0);
    }

    #[test]
    fn like_on_last_card_shows_summary_once() {
        let mut state = swiping(2);
        drag(&mut state, -200.0);
        finish_exit(&mut state);
        assert_eq!(state.session.position(), 1);

        state.apply(AppAction::Button(SwipeDirection::Right));
        state.apply(AppAction::Button(SwipeDirection::Right));
        let ticket = state.pending_exit().unwrap();
        state.apply(AppAction::ExitFinished { ticket });
        state.apply(AppAction::ExitFinished { ticket });
        assert!(state.summary_due);
        assert_eq!(state.phase, AppPhase::Swiping);
        assert_eq!(state.session.liked().len(), 1);

        state.apply(AppAction::ShowSummary);
        assert_eq!(state.phase, AppPhase::Summary);
        assert!(!state.summary_due);

        state.apply(AppAction::BackToSwiping);
        state.apply(AppAction::ShowSummary);
        assert_eq!(state.phase, AppPhase::Swiping);
    }

    #[test]
    fn buttons_disabled_when_exhausted() {
        let mut state = swiping(1);
        state.apply(AppAction::Button(SwipeDirection::Left));
        finish_exit(&mut state);
        state.apply(AppAction::Button(SwipeDirection::Right));
        assert_eq!(state.pending_exit(), None);
        assert_eq!(state.session.position(), 1);
    }

    #[test]
    fn back_to_swiping_keeps_progress() {
        let mut state = swiping(1);
        state.apply(AppAction::Button(SwipeDirection::Right));
        finish_exit(&mut state);
        state.apply(AppAction::ShowSummary);

        state.apply(AppAction::BackToSwiping);
        assert_eq!(state.phase, AppPhase::Swiping);
        assert_eq!(state.session.position(), 1);
        assert_eq!(state.session.liked().len(), 1);
    }

    #[test]
    fn restart_from_summary_reuses_items() {
        let mut state = swiping(2);
        for _ in 0..2 {
            state.apply(AppAction::Button(SwipeDirection::Right));
            finish_exit(&mut state);
        }
        state.apply(AppAction::ShowSummary);

        state.apply(AppAction::Restart);
        assert_eq!(state.phase, AppPhase::Swiping);
        assert_eq!(state.session.position(), 0);
        assert_eq!(state.session.len(), 2);
        assert!(state.session.liked().is_empty());
        assert!(!state.summary_due);
    }

    #[test]
    fn partition_holds_through_mixed_swipes() {
        let mut state = swiping(6);
        for step in 0..6 {
            if step % 2 == 0 {
                drag(&mut state, 130.0);
            } else {
                state.apply(AppAction::Button(SwipeDirection::Left));
            }
            finish_exit(&mut state);
            let session = &state.session;
            assert_eq!(
                session.liked().len() + session.disliked().len(),
                session.position()
            );
        }
        assert_eq!(state.session.liked().len(), 3);
        assert!(state.summary_due);
    }

    #[test]
    fn reduce_returns_new_state() {
        let state = Rc::new(AppState::default());
        let next = state.clone().reduce(AppAction::BatchFailed("boom".to_string()));
        assert_eq!(state.phase, AppPhase::Loading);
        assert!(matches!(next.phase, AppPhase::Failed(_)));
    }
}
