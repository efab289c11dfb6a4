// navmap_core/src/trail.rs

/// One record of a [`TrailHistory`] together with its insertion index.
#[derive(Debug, Clone, PartialEq)]
pub struct TrailEntry<T> {
    pub index: usize,
    pub value: T,
}

/// An append-only, insertion-ordered history of resolved fixes.
///
/// The only way to drop entries is [`TrailHistory::reset`], which clears
/// everything at once. Accessors hand out shared references, so stored entries
/// cannot be changed from the outside.
#[derive(Debug, Clone)]
pub struct TrailHistory<T> {
    entries: Vec<TrailEntry<T>>,
}

impl<T> Default for TrailHistory<T> {
    fn default() -> Self {
        Self {
            entries: Vec::new(),
        }
    }
}

impl<T> TrailHistory<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, value: T) {
        let index = self.entries.len();
        self.entries.push(TrailEntry { index, value });
    }

    /// The most recent entry.
    pub fn last(&self) -> Option<&T> {
        self.entries.last().map(|entry| &entry.value)
    }

    /// The entry before the most recent one, drawn as the faded trailing marker.
    pub fn ghost(&self) -> Option<&T> {
        let len = self.entries.len();
        if len < 2 {
            return None;
        }
        self.entries.get(len - 2).map(|entry| &entry.value)
    }

    /// `(ghost, last)`, the two ends of the newest trail segment.
    pub fn segment(&self) -> Option<(&T, &T)> {
        Some((self.ghost()?, self.last()?))
    }

    pub fn reset(&mut self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&T> {
        self.entries.get(index).map(|entry| &entry.value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TrailEntry<T>> {
        self.entries.iter()
    }
}
