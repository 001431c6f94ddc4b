use std::fmt;

/// A compare-swap between two wires, tagged with the layer it was placed in.
///
/// Field order gives the `(depth, wire0, wire1)` ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Comparator {
    pub depth: usize,
    pub wire0: usize,
    pub wire1: usize,
}

impl Comparator {
    pub fn new(wire0: usize, wire1: usize, depth: usize) -> Self {
        Comparator {
            depth,
            wire0,
            wire1,
        }
    }

    /// Standard orientation: the smaller value ends on the lower wire.
    pub fn is_ascending(&self) -> bool {
        self.wire0 < self.wire1
    }

    pub fn touches(&self, wire: usize) -> bool {
        self.wire0 == wire || self.wire1 == wire
    }

    /// Whether applying this comparator exchanges the values on its wires.
    #[inline]
    pub fn swaps<T: PartialOrd>(&self, low: &T, high: &T) -> bool {
        if self.is_ascending() { low > high } else { low < high }
    }
}

impl fmt::Display for Comparator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.wire0, self.wire1)
    }
}
