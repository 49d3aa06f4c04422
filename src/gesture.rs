use log::debug;

pub const SWIPE_THRESHOLD: f64 = 100.0;
pub const EXIT_ANIMATION_MS: u32 = 200;

const EXIT_ACCELERATION: f64 = 3.0;
const EXIT_VERTICAL_FACTOR: f64 = 0.5;
const DRAG_VERTICAL_DAMPING: f64 = 0.3;
const ROTATION_PER_PX: f64 = 0.1;
const FADE_DISTANCE: f64 = 200.0;
const BUTTON_FLING_DISTANCE: f64 = 150.0;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    fn relative_to(self, origin: Point) -> Point {
        Point::new(self.x - origin.x, self.y - origin.y)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SwipeDirection {
    Left,
    Right,
}

impl SwipeDirection {
    fn from_offset(dx: f64) -> Self {
        if dx > 0.0 {
            Self::Right
        } else {
            Self::Left
        }
    }

    fn sign(self) -> f64 {
        match self {
            Self::Left => -1.0,
            Self::Right => 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GesturePhase {
    Idle,
    Dragging {
        pointer_id: i32,
        origin: Point,
        offset: Point,
    },
    /// The card is flying off screen; `ticket` identifies this commit.
    Committing {
        direction: SwipeDirection,
        offset: Point,
        ticket: u64,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Release {
    /// No gesture from this pointer was in progress.
    Ignored,
    /// Below threshold: the card snaps back.
    Abandoned,
    Commit(SwipeDirection),
}

/// Drag state of the active card.
///
/// Only one pointer drives a gesture at a time; events from any other
/// pointer are dropped until the gesture resolves.
#[derive(Debug, Clone, PartialEq)]
pub struct GestureTracker {
    phase: GesturePhase,
    commits: u64,
}

impl Default for GestureTracker {
    fn default() -> Self {
        Self {
            phase: GesturePhase::Idle,
            commits: 0,
        }
    }
}

impl GestureTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> GesturePhase {
        self.phase
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.phase, GesturePhase::Dragging { .. })
    }

    pub fn commit_ticket(&self) -> Option<u64> {
        match self.phase {
            GesturePhase::Committing { ticket, .. } => Some(ticket),
            _ => None,
        }
    }

    pub fn offset(&self) -> Point {
        match self.phase {
            GesturePhase::Idle => Point::ZERO,
            GesturePhase::Dragging { offset, .. } | GesturePhase::Committing { offset, .. } => {
                offset
            }
        }
    }

    pub fn press(&mut self, pointer_id: i32, at: Point) -> bool {
        if self.phase != GesturePhase::Idle {
            return false;
        }
        self.phase = GesturePhase::Dragging {
            pointer_id,
            origin: at,
            offset: Point::ZERO,
        };
        true
    }

    pub fn drag(&mut self, pointer_id: i32, at: Point) -> bool {
        match &mut self.phase {
            GesturePhase::Dragging {
                pointer_id: active,
                origin,
                offset,
            } if *active == pointer_id => {
                *offset = at.relative_to(*origin);
                true
            }
            _ => false,
        }
    }

    pub fn release(&mut self, pointer_id: i32) -> Release {
        let offset = match self.phase {
            GesturePhase::Dragging {
                pointer_id: active,
                offset,
                ..
            } if active == pointer_id => offset,
            _ => return Release::Ignored,
        };

        if offset.x.abs() > SWIPE_THRESHOLD {
            let direction = SwipeDirection::from_offset(offset.x);
            self.begin_commit(direction, offset);
            Release::Commit(direction)
        } else {
            debug!("drag of {:.1}px released below threshold", offset.x);
            self.phase = GesturePhase::Idle;
            Release::Abandoned
        }
    }

    pub fn cancel(&mut self, pointer_id: i32) -> bool {
        match self.phase {
            GesturePhase::Dragging {
                pointer_id: active, ..
            } if active == pointer_id => {
                self.phase = GesturePhase::Idle;
                true
            }
            _ => false,
        }
    }

    /// Commits without a drag, as the pass and like buttons do.
    pub fn fling(&mut self, direction: SwipeDirection) -> bool {
        if self.commit_ticket().is_some() {
            return false;
        }
        let offset = Point::new(direction.sign() * BUTTON_FLING_DISTANCE, 0.0);
        self.begin_commit(direction, offset);
        true
    }

    /// Ends the exit animation started by commit `ticket`.
    pub fn finish(&mut self, ticket: u64) -> Option<SwipeDirection> {
        match self.phase {
            GesturePhase::Committing {
                direction,
                ticket: current,
                ..
            } if current == ticket => {
                self.phase = GesturePhase::Idle;
                Some(direction)
            }
            _ => None,
        }
    }

    pub fn reset(&mut self) {
        self.phase = GesturePhase::Idle;
    }

    pub fn motion(&self) -> CardMotion {
        match self.phase {
            GesturePhase::Idle => CardMotion::REST,
            GesturePhase::Dragging { offset, .. } => CardMotion {
                translate_x: offset.x,
                translate_y: offset.y * DRAG_VERTICAL_DAMPING,
                rotation_deg: offset.x * ROTATION_PER_PX,
                opacity: (1.0 - offset.x.abs() / FADE_DISTANCE).max(0.0),
                animated: false,
            },
            GesturePhase::Committing { offset, .. } => CardMotion {
                translate_x: offset.x * EXIT_ACCELERATION,
                translate_y: offset.y * EXIT_VERTICAL_FACTOR,
                rotation_deg: offset.x * ROTATION_PER_PX * 2.0,
                opacity: 0.0,
                animated: true,
            },
        }
    }

    pub fn indicators(&self) -> Indicators {
        let dx = self.offset().x;
        Indicators {
            like: (dx / SWIPE_THRESHOLD).clamp(0.0, 1.0),
            nope: (-dx / SWIPE_THRESHOLD).clamp(0.0, 1.0),
        }
    }

    fn begin_commit(&mut self, direction: SwipeDirection, offset: Point) {
        self.commits += 1;
        debug!("commit #{} swiping {:?}", self.commits, direction);
        self.phase = GesturePhase::Committing {
            direction,
            offset,
            ticket: self.commits,
        };
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMotion {
    pub translate_x: f64,
    pub translate_y: f64,
    pub rotation_deg: f64,
    pub opacity: f64,
    /// Whether the card eases toward this pose instead of tracking the pointer.
    pub animated: bool,
}

impl CardMotion {
    pub const REST: CardMotion = CardMotion {
        translate_x: 0.0,
        translate_y: 0.0,
        rotation_deg: 0.0,
        opacity: 1.0,
        animated: false,
    };
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Indicators {
    pub like: f64,
    pub nope: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dragged(dx: f64, dy: f64) -> GestureTracker {
        let mut tracker = GestureTracker::new();
        assert!(tracker.press(1, Point::new(200.0, 300.0)));
        assert!(tracker.drag(1, Point::new(200.0 + dx, 300.0 + dy)));
        tracker
    }

    #[test]
    fn release_without_press_is_ignored() {
        let mut tracker = GestureTracker::new();
        assert_eq!(tracker.release(1), Release::Ignored);
        assert_eq!(tracker.phase(), GesturePhase::Idle);
    }

    #[test]
    fn offset_is_relative_to_origin() {
        let tracker = dragged(42.0, -10.0);
        assert_eq!(tracker.offset(), Point::new(42.0, -10.0));
    }

    #[test]
    fn short_drag_snaps_back() {
        let mut tracker = dragged(100.0, 0.0);
        assert_eq!(tracker.release(1), Release::Abandoned);
        assert_eq!(tracker.offset(), Point::ZERO);
        assert_eq!(tracker.commit_ticket(), None);
    }

    #[test]
    fn long_drag_commits_in_drag_direction() {
        let mut right = dragged(101.0, 0.0);
        assert_eq!(right.release(1), Release::Commit(SwipeDirection::Right));

        let mut left = dragged(-150.0, 20.0);
        assert_eq!(left.release(1), Release::Commit(SwipeDirection::Left));
    }

    #[test]
    fn second_pointer_cannot_hijack_gesture() {
        let mut tracker = dragged(30.0, 0.0);
        assert!(!tracker.press(2, Point::ZERO));
        assert!(!tracker.drag(2, Point::new(900.0, 0.0)));
        assert_eq!(tracker.release(2), Release::Ignored);
        assert_eq!(tracker.offset(), Point::new(30.0, 0.0));
    }

    #[test]
    fn cancel_abandons_drag() {
        let mut tracker = dragged(180.0, 0.0);
        assert!(tracker.cancel(1));
        assert_eq!(tracker.phase(), GesturePhase::Idle);
        assert_eq!(tracker.release(1), Release::Ignored);
    }

    #[test]
    fn finish_yields_direction_once() {
        let mut tracker = dragged(-120.0, 0.0);
        tracker.release(1);
        let ticket = tracker.commit_ticket().unwrap();

        assert_eq!(tracker.finish(ticket + 1), None);
        assert_eq!(tracker.finish(ticket), Some(SwipeDirection::Left));
        assert_eq!(tracker.finish(ticket), None);
        assert_eq!(tracker.phase(), GesturePhase::Idle);
    }

    #[test]
    fn fling_uses_commit_path_and_blocks_repeat() {
        let mut tracker = GestureTracker::new();
        assert!(tracker.fling(SwipeDirection::Right));
        assert!(!tracker.fling(SwipeDirection::Left));
        assert!(!tracker.press(1, Point::ZERO));

        let ticket = tracker.commit_ticket().unwrap();
        assert_eq!(tracker.finish(ticket), Some(SwipeDirection::Right));

        assert!(tracker.fling(SwipeDirection::Left));
        assert!(tracker.commit_ticket().unwrap() > ticket);
    }

    #[test]
    fn drag_motion_rotates_and_fades() {
        let motion = dragged(100.0, 50.0).motion();
        assert!((motion.rotation_deg - 10.0).abs() < 1e-9);
        assert!((motion.opacity - 0.5).abs() < 1e-9);
        assert!((motion.translate_y - 15.0).abs() < 1e-9);
        assert!(!motion.animated);

        assert_eq!(dragged(-400.0, 0.0).motion().opacity, 0.0);
    }

    #[test]
    fn exit_motion_accelerates_off_screen() {
        let mut tracker = dragged(120.0, 40.0);
        tracker.release(1);
        let motion = tracker.motion();
        assert!((motion.translate_x - 360.0).abs() < 1e-9);
        assert!((motion.translate_y - 20.0).abs() < 1e-9);
        assert_eq!(motion.opacity, 0.0);
        assert!(motion.animated);
    }

    #[test]
    fn indicators_track_horizontal_offset() {
        let half = dragged(50.0, 0.0).indicators();
        assert!((half.like - 0.5).abs() < 1e-9);
        assert_eq!(half.nope, 0.0);

        let past = dragged(-250.0, 0.0).indicators();
        assert_eq!(past.like, 0.0);
        assert_eq!(past.nope, 1.0);
    }
}
