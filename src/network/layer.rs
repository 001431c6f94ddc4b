use super::Comparator;
use std::cmp::Ordering;
use std::fmt;

/// The comparators sharing one depth. They touch pairwise disjoint wires.
#[derive(Debug, Clone, Default)]
pub struct Layer {
    pub depth: usize,
    comparators: Vec<Comparator>,
}

impl Layer {
    pub fn new(depth: usize) -> Self {
        Layer {
            depth,
            comparators: Vec::new(),
        }
    }

    pub fn add(&mut self, comparator: Comparator) {
        self.comparators.push(comparator);
    }

    pub fn comparators(&self) -> &[Comparator] {
        &self.comparators
    }

    pub fn size(&self) -> usize {
        self.comparators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comparators.is_empty()
    }

    pub fn contains(&self, comparator: &Comparator) -> bool {
        self.comparators.contains(comparator)
    }

    fn sorted(&self) -> Vec<(usize, usize)> {
        let mut pairs: Vec<_> = self.comparators.iter().map(|c| (c.wire0, c.wire1)).collect();
        pairs.sort_unstable();
        pairs
    }
}

// Layers compare as sets of wire pairs; depth and insertion order are ignored.
impl PartialEq for Layer {
    fn eq(&self, other: &Self) -> bool {
        self.size() == other.size() && self.sorted() == other.sorted()
    }
}

impl Eq for Layer {}

impl PartialOrd for Layer {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Layer {
    fn cmp(&self, other: &Self) -> Ordering {
        self.size()
            .cmp(&other.size())
            .then_with(|| self.sorted().cmp(&other.sorted()))
    }
}

impl fmt::Display for Layer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.comparators.iter().map(|c| c.to_string()).collect();
        write!(f, "{}", parts.join(";"))
    }
}
