use hashbrown::HashSet;

use crate::RegionCoord;

/// Set of regions a light source currently keeps lit.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RegionSet {
    inner: HashSet<RegionCoord>,
}

impl RegionSet {
    pub fn new() -> Self {
        Self {
            inner: HashSet::new(),
        }
    }

    #[inline]
    pub fn insert(&mut self, region: RegionCoord) -> bool {
        self.inner.insert(region)
    }

    #[inline]
    pub fn contains(&self, region: &RegionCoord) -> bool {
        self.inner.contains(region)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = RegionCoord> + '_ {
        self.inner.iter().copied()
    }

    /// Regions in `self` that are not in `other`.
    pub fn difference<'a>(&'a self, other: &'a RegionSet) -> impl Iterator<Item = RegionCoord> + 'a {
        self.inner.difference(&other.inner).copied()
    }

    pub fn extend_from(&mut self, other: &RegionSet) {
        self.inner.extend(other.inner.iter().copied());
    }
}

impl FromIterator<RegionCoord> for RegionSet {
    fn from_iter<T: IntoIterator<Item = RegionCoord>>(iter: T) -> Self {
        Self {
            inner: iter.into_iter().collect(),
        }
    }
}

impl Extend<RegionCoord> for RegionSet {
    fn extend<T: IntoIterator<Item = RegionCoord>>(&mut self, iter: T) {
        self.inner.extend(iter);
    }
}

impl IntoIterator for RegionSet {
    type Item = RegionCoord;
    type IntoIter = hashbrown::hash_set::IntoIter<RegionCoord>;

    fn into_iter(self) -> Self::IntoIter {
        self.inner.into_iter()
    }
}
