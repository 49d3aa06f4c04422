use crate::session::{Item, Session};

#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub total: usize,
    pub liked_count: usize,
    pub passed_count: usize,
    /// Rounded percentage of the whole deck that was liked.
    pub like_rate: u32,
    pub liked: Vec<Item>,
}

impl Summary {
    pub fn from_session(session: &Session) -> Self {
        let total = session.len();
        let liked_count = session.liked().len();
        let like_rate = if total == 0 {
            0
        } else {
            (liked_count as f64 / total as f64 * 100.0).round() as u32
        };

        Self {
            total,
            liked_count,
            passed_count: total.saturating_sub(liked_count),
            like_rate,
            liked: session.liked().to_vec(),
        }
    }

    pub fn has_matches(&self) -> bool {
        !self.liked.is_empty()
    }
}
