use crate::gesture::{CardMotion, EXIT_ANIMATION_MS};

pub const STACK_DEPTH: usize = 3;

const SCALE_STEP: f64 = 0.05;
const DEPTH_OFFSET_PX: f64 = 4.0;
const TOP_Z_INDEX: i32 = 10;

/// Resting pose of a card `depth` places below the top of the stack.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StackSlot {
    pub depth: usize,
    pub scale: f64,
    pub y_offset: f64,
    pub z_index: i32,
}

impl StackSlot {
    pub fn at(depth: usize) -> Self {
        Self {
            depth,
            scale: 1.0 - depth as f64 * SCALE_STEP,
            y_offset: depth as f64 * DEPTH_OFFSET_PX,
            z_index: TOP_Z_INDEX - depth as i32,
        }
    }

    pub fn is_active(&self) -> bool {
        self.depth == 0
    }
}

pub fn card_style(slot: &StackSlot, motion: &CardMotion) -> String {
    let transition = if motion.animated {
        format!("all {}ms ease-out", EXIT_ANIMATION_MS)
    } else {
        "none".to_string()
    };
    format!(
        "transform: translateX({:.1}px) translateY({:.1}px) rotate({:.2}deg) scale({:.2}); \
         opacity: {:.3}; z-index: {}; transition: {};",
        motion.translate_x,
        motion.translate_y + slot.y_offset,
        motion.rotation_deg,
        slot.scale,
        motion.opacity,
        slot.z_index,
        transition
    )
}
