/// Fixed-length ring of derivative vectors.
///
/// Logical index `0` is the oldest entry and `len() - 1` the newest.
/// [`push`](History::push) overwrites the oldest entry and makes it the
/// newest, so shifting the history never moves any data.
#[derive(Debug, Clone)]
pub struct History {
    slots: Vec<Vec<f64>>,
    head: usize,
}

impl History {
    pub(super) fn new(len: usize, dimension: usize) -> Self {
        assert!(len > 0, "history needs at least one slot");
        Self {
            slots: vec![vec![0.0; dimension]; len],
            head: 0,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Returns the derivative at logical index `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    #[must_use]
    pub fn get(&self, i: usize) -> &[f64] {
        &self.slots[self.physical(i)]
    }

    /// Returns the newest derivative.
    #[must_use]
    pub fn newest(&self) -> &[f64] {
        self.get(self.len() - 1)
    }

    /// Iterates from oldest to newest.
    pub fn iter(&self) -> impl Iterator<Item = &[f64]> {
        (0..self.len()).map(|i| self.get(i))
    }

    pub(super) fn get_mut(&mut self, i: usize) -> &mut [f64] {
        let slot = self.physical(i);
        &mut self.slots[slot]
    }

    /// Drops the oldest derivative and appends `ddt` as the newest.
    pub(super) fn push(&mut self, ddt: &[f64]) {
        self.slots[self.head].copy_from_slice(ddt);
        self.head = (self.head + 1) % self.slots.len();
    }

    fn physical(&self, i: usize) -> usize {
        assert!(i < self.len(), "history index {i} out of range");
        (self.head + i) % self.slots.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn firsts(history: &History) -> Vec<f64> {
        history.iter().map(|d| d[0]).collect()
    }

    #[test]
    fn push_drops_oldest() {
        let mut history = History::new(3, 1);
        for value in 1..=3 {
            history.push(&[f64::from(value)]);
        }
        assert_eq!(firsts(&history), vec![1.0, 2.0, 3.0]);

        history.push(&[4.0]);
        assert_eq!(firsts(&history), vec![2.0, 3.0, 4.0]);
        assert_eq!(history.newest(), &[4.0]);
    }

    #[test]
    fn logical_writes_follow_head() {
        let mut history = History::new(3, 2);
        history.push(&[9.0, 9.0]);

        history.get_mut(0).copy_from_slice(&[1.0, -1.0]);
        history.get_mut(2).copy_from_slice(&[3.0, -3.0]);

        assert_eq!(history.get(0), &[1.0, -1.0]);
        assert_eq!(history.get(2), &[3.0, -3.0]);
        assert_eq!(history.len(), 3);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn rejects_index_past_end() {
        let history = History::new(2, 1);
        let _ = history.get(2);
    }
}
