//! Compact permission set.
//!
//! Permissions are interned by the catalog into dense indices, so a role's
//! grants fit in a few machine words and a check is a single bit test.

/// Set of catalog indices stored as a growable bitfield.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    words: Vec<u64>,
}

impl PermissionSet {
    #[must_use]
    pub const fn new() -> Self {
        Self { words: Vec::new() }
    }

    /// Adds an index. Returns `true` if it was not present.
    pub fn insert(&mut self, index: usize) -> bool {
        let (word, bit) = (index / 64, index % 64);
        if word >= self.words.len() {
            self.words.resize(word + 1, 0);
        }
        let mask = 1u64 << bit;
        let added = self.words[word] & mask == 0;
        self.words[word] |= mask;
        added
    }

    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.words
            .get(index / 64)
            .is_some_and(|word| word & (1u64 << (index % 64)) != 0)
    }

    /// In-place union.
    pub fn union_with(&mut self, other: &Self) {
        if other.words.len() > self.words.len() {
            self.words.resize(other.words.len(), 0);
        }
        for (mine, theirs) in self.words.iter_mut().zip(&other.words) {
            *mine |= theirs;
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.words.iter().map(|w| w.count_ones() as usize).sum()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.iter().all(|w| *w == 0)
    }

    /// Indices in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = usize> + '_ {
        self.words.iter().enumerate().flat_map(|(i, word)| {
            (0..64)
                .filter(move |bit| word & (1u64 << bit) != 0)
                .map(move |bit| i * 64 + bit)
        })
    }
}

impl FromIterator<usize> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = Self::new();
        for index in iter {
            set.insert(index);
        }
        set
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_insert_and_contains() {
        let mut set = PermissionSet::new();
        assert!(set.insert(3));
        assert!(!set.insert(3));
        assert!(set.insert(130));

        assert!(set.contains(3));
        assert!(set.contains(130));
        assert!(!set.contains(4));
        assert!(!set.contains(10_000));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn test_empty() {
        let set = PermissionSet::new();
        assert!(set.is_empty());
        assert_eq!(set.len(), 0);
        assert!(!set.contains(0));
        assert_eq!(set.iter().count(), 0);
    }

    #[test]
    fn test_union_with_grows() {
        let mut small: PermissionSet = [1, 2].into_iter().collect();
        let large: PermissionSet = [2, 70, 200].into_iter().collect();
        small.union_with(&large);

        assert_eq!(small.iter().collect::<Vec<_>>(), vec![1, 2, 70, 200]);
    }

    #[test]
    fn test_iter_is_ascending() {
        let set: PermissionSet = [64, 0, 63, 65, 5].into_iter().collect();
        assert_eq!(set.iter().collect::<Vec<_>>(), vec![0, 5, 63, 64, 65]);
    }
}
