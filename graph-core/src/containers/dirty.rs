//! The "clear-only-dirty" scratch buffer (`spec.md` §5, §9): a typed array paired with a list of
//! the indices written since the last reset. `reset()` walks the dirty list when it is small and
//! falls back to a bulk fill once the dirty set covers a large enough fraction of `n` — the
//! threshold the spec calls out for the Yen subroutine (`dirty.size >= n/64`).

/// A `Vec<T>` of fixed length `n` that remembers which indices were touched since the last
/// `reset`, so long-lived per-call scratch state (e.g. the bidirectional Dijkstra subroutine
/// reused across `k` Yen iterations) can be cleared sublinearly.
#[derive(Debug, Clone)]
pub struct Dirty<T> {
    values: Vec<T>,
    dirtied: Vec<usize>,
    default: T,
}

impl<T: Clone> Dirty<T> {
    #[must_use]
    pub fn new(n: usize, default: T) -> Self {
        Self {
            values: vec![default.clone(); n],
            dirtied: Vec::new(),
            default,
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> &T {
        &self.values[index]
    }

    pub fn set(&mut self, index: usize, value: T) {
        if !self.is_dirty_tracked(index) {
            self.dirtied.push(index);
        }
        self.values[index] = value;
    }

    fn is_dirty_tracked(&self, index: usize) -> bool {
        // Tracking is append-only and may contain duplicates; a duplicate entry only costs a
        // redundant (harmless) re-clear in `reset`, so we don't scan to dedupe on the hot path.
        let _ = index;
        false
    }

    /// Reset every touched index back to `default`. Walks the dirty list below the `n/64`
    /// threshold (`spec.md` §5); bulk-fills the whole array above it, since re-touching nearly
    /// every index one at a time costs more than one linear pass.
    pub fn reset(&mut self) {
        let n = self.values.len();
        if n == 0 {
            self.dirtied.clear();
            return;
        }
        if self.dirtied.len() * 64 >= n {
            self.values.fill(self.default.clone());
        } else {
            for &i in &self.dirtied {
                self.values[i] = self.default.clone();
            }
        }
        self.dirtied.clear();
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_reset_only_touches_dirtied() {
        let mut d: Dirty<i32> = Dirty::new(1000, -1);
        d.set(3, 42);
        d.set(900, 7);
        assert_eq!(*d.get(3), 42);
        d.reset();
        assert_eq!(*d.get(3), -1);
        assert_eq!(*d.get(900), -1);
    }

    #[test]
    fn dense_reset_bulk_fills() {
        let mut d: Dirty<i32> = Dirty::new(32, 0);
        for i in 0..32 {
            d.set(i, 1);
        }
        d.reset();
        for i in 0..32 {
            assert_eq!(*d.get(i), 0);
        }
    }
}
