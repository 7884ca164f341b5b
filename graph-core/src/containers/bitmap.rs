//! Dense bit sets (`spec.md` §4.2: `Bitmap`, `BitmapSet`).

use fixedbitset::FixedBitSet;

/// A dense bit set over `0..n` with constant-time get/set/clear and a scan-all-set iterator.
///
/// Thin wrapper around [`FixedBitSet`] (already in the teacher's workspace dependency table) so
/// the rest of the crate has one name to import regardless of which backing crate is in use.
#[derive(Debug, Clone)]
pub struct Bitmap {
    bits: FixedBitSet,
}

impl Bitmap {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            bits: FixedBitSet::with_capacity(n),
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.bits.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bits.len() == 0
    }

    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        self.bits.contains(index)
    }

    pub fn set(&mut self, index: usize, value: bool) {
        self.bits.set(index, value);
    }

    pub fn clear_all(&mut self) {
        self.bits.clear();
    }

    pub fn ones(&self) -> impl Iterator<Item = usize> + '_ {
        self.bits.ones()
    }

    #[must_use]
    pub fn count_ones(&self) -> usize {
        self.bits.count_ones(..)
    }
}

/// A [`Bitmap`] paired with an explicit list of the indices that were set, so clearing after a
/// sparse pass is `O(|set|)` rather than `O(n)` (`spec.md` §4.2).
#[derive(Debug, Clone)]
pub struct BitmapSet {
    bits: Bitmap,
    set_indices: Vec<usize>,
}

impl BitmapSet {
    #[must_use]
    pub fn new(n: usize) -> Self {
        Self {
            bits: Bitmap::new(n),
            set_indices: Vec::new(),
        }
    }

    #[must_use]
    pub fn get(&self, index: usize) -> bool {
        self.bits.get(index)
    }

    /// Sets `index`, recording it for cheap clearing. Idempotent: setting an already-set index
    /// does not duplicate the bookkeeping entry.
    pub fn set(&mut self, index: usize) {
        if !self.bits.get(index) {
            self.bits.set(index, true);
            self.set_indices.push(index);
        }
    }

    /// Clears exactly the indices that were `set` since construction/last clear, in `O(k)`.
    pub fn clear(&mut self) {
        for &index in &self.set_indices {
            self.bits.set(index, false);
        }
        self.set_indices.clear();
    }

    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.set_indices.iter().copied()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bitmap_set_get_clear() {
        let mut b = Bitmap::new(8);
        b.set(3, true);
        b.set(5, true);
        assert!(b.get(3));
        assert!(!b.get(4));
        assert_eq!(b.ones().collect::<Vec<_>>(), vec![3, 5]);
        b.clear_all();
        assert_eq!(b.count_ones(), 0);
    }

    #[test]
    fn bitmap_set_cheap_clear() {
        let mut bs = BitmapSet::new(100);
        bs.set(7);
        bs.set(42);
        bs.set(7);
        assert_eq!(bs.iter().collect::<Vec<_>>(), vec![7, 42]);
        bs.clear();
        assert!(!bs.get(7));
        assert!(!bs.get(42));
        assert_eq!(bs.iter().count(), 0);
    }
}
