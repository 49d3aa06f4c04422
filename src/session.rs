use crate::gesture::SwipeDirection;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Liked,
    Disliked,
}

impl From<SwipeDirection> for Outcome {
    fn from(direction: SwipeDirection) -> Self {
        match direction {
            SwipeDirection::Right => Outcome::Liked,
            SwipeDirection::Left => Outcome::Disliked,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Item {
    pub id: u32,
    pub url: String,
    pub outcome: Option<Outcome>,
}

impl Item {
    pub fn new(id: u32, url: impl Into<String>) -> Self {
        Self {
            id,
            url: url.into(),
            outcome: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Next,
    /// The last item was just classified.
    Finished,
    Ignored,
}

/// Ordered deck of items plus the outcomes recorded so far.
///
/// `liked` and `disliked` always partition `items[..position]`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Session {
    items: Vec<Item>,
    position: usize,
    liked: Vec<Item>,
    disliked: Vec<Item>,
}

impl Session {
    pub fn new(items: Vec<Item>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    pub fn items(&self) -> &[Item] {
        &self.items
    }

    pub fn position(&self) -> usize {
        self.position
    }

    pub fn liked(&self) -> &[Item] {
        &self.liked
    }

    pub fn disliked(&self) -> &[Item] {
        &self.disliked
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn is_exhausted(&self) -> bool {
        self.position >= self.items.len()
    }

    pub fn active(&self) -> Option<&Item> {
        self.items.get(self.position)
    }

    /// The active item and up to `depth - 1` items queued behind it.
    pub fn upcoming(&self, depth: usize) -> &[Item] {
        let start = self.position.min(self.items.len());
        let end = (start + depth).min(self.items.len());
        &self.items[start..end]
    }

    pub fn advance(&mut self, direction: SwipeDirection) -> Advance {
        let Some(item) = self.items.get_mut(self.position) else {
            return Advance::Ignored;
        };

        let outcome = Outcome::from(direction);
        item.outcome = Some(outcome);
        let classified = item.clone();
        match outcome {
            Outcome::Liked => self.liked.push(classified),
            Outcome::Disliked => self.disliked.push(classified),
        }
        self.position += 1;

        if self.is_exhausted() {
            Advance::Finished
        } else {
            Advance::Next
        }
    }

    pub fn restart(&mut self) {
        self.position = 0;
        self.liked.clear();
        self.disliked.clear();
        for item in &mut self.items {
            item.outcome = None;
        }
    }

    /// Number shown in the "n / total" counter, starting at 1.
    pub fn display_index(&self) -> usize {
        (self.position + 1).min(self.items.len())
    }

    pub fn progress_percent(&self) -> f64 {
        if self.items.is_empty() {
            return 0.0;
        }
        self.display_index() as f64 / self.items.len() as f64 * 100.0
    }
}
