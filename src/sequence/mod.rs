//! Interned binary assignments of wire values
//!
//! A [`Sequence`] is an n-bit 0/1 assignment to the wires of a network,
//! identified by its integer value. Wire 0 is the most significant bit, so a
//! sorted sequence of cardinality k has value `2^k - 1`.
//!
//! Sequences are interned per width: [`Sequence::get_instance`] always hands
//! back the same `&'static` entry for the same `(width, value)`. Each width's
//! table is built exactly once, on first use or by [`initialize_cache`], and
//! is immutable afterwards, so lookups are safe from any thread.

pub mod permutation;

pub use permutation::Permutation;

use crate::error::{MAX_WIRES, Result, check_wires};
use std::fmt;
use std::sync::OnceLock;

static CACHE: [OnceLock<Box<[Sequence]>>; MAX_WIRES + 1] = [const { OnceLock::new() }; MAX_WIRES + 1];

/// Build every table up to `max_wires` ahead of the search.
pub fn initialize_cache(max_wires: usize) -> Result<()> {
    check_wires(max_wires)?;
    for width in 1..=max_wires {
        table(width);
    }
    Ok(())
}

fn table(width: usize) -> &'static [Sequence] {
    CACHE[width].get_or_init(|| {
        (0..1u32 << width)
            .map(|value| Sequence {
                value,
                width: width as u8,
                cardinality: value.count_ones() as u8,
            })
            .collect()
    })
}

/// An n-bit assignment with its cardinality computed once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Sequence {
    value: u32,
    width: u8,
    cardinality: u8,
}

impl Sequence {
    /// The canonical sequence for `(width, value)`.
    ///
    /// # Panics
    /// If `width` exceeds [`MAX_WIRES`] or `value` does not fit in `width` bits.
    pub fn get_instance(width: usize, value: u32) -> &'static Sequence {
        &table(width)[value as usize]
    }

    /// Bit mask of `wire` inside a value of the given width.
    #[inline]
    pub fn mask(width: usize, wire: usize) -> u32 {
        1 << (width - 1 - wire)
    }

    pub fn width(&self) -> usize {
        self.width as usize
    }

    pub fn value(&self) -> u32 {
        self.value
    }

    /// Number of ones.
    pub fn cardinality(&self) -> usize {
        self.cardinality as usize
    }

    /// Value carried by `wire`; wires outside the sequence read as 0.
    #[inline]
    pub fn get(&self, wire: usize) -> bool {
        wire < self.width() && self.value & Sequence::mask(self.width(), wire) != 0
    }

    pub fn bits(&self) -> Vec<bool> {
        (0..self.width()).map(|w| self.get(w)).collect()
    }

    /// The canonical sequence with the values on wires `i` and `j` exchanged.
    ///
    /// Out-of-range wires leave the sequence unchanged.
    pub fn swapped(&self, i: usize, j: usize) -> &'static Sequence {
        let width = self.width();
        let value = if i < width && j < width && self.get(i) != self.get(j) {
            self.value ^ (Sequence::mask(width, i) | Sequence::mask(width, j))
        } else {
            self.value
        };
        Sequence::get_instance(width, value)
    }

    /// The canonical sequence after moving the value on wire `i` to wire `perm[i]`.
    pub fn permute(&self, perm: &Permutation) -> Result<&'static Sequence> {
        perm.check_len(self.width())?;
        Ok(Sequence::get_instance(
            self.width(),
            self.permuted_value(perm.as_slice()),
        ))
    }

    /// Value after permutation, for callers that validated the permutation length already.
    #[inline]
    pub(crate) fn permuted_value(&self, perm: &[usize]) -> u32 {
        let width = self.width();
        let mut permuted = 0;
        for (wire, &target) in perm.iter().enumerate().take(width) {
            if self.get(wire) {
                permuted |= Sequence::mask(width, target);
            }
        }
        permuted
    }

    /// True when all zeros precede all ones.
    pub fn is_sorted(&self) -> bool {
        self.value == (1u32 << self.cardinality) - 1
    }
}

impl fmt::Display for Sequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for wire in 0..self.width() {
            write!(f, "{}", if self.get(wire) { '1' } else { '0' })?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instances_are_interned() {
        let a = Sequence::get_instance(5, 19);
        let b = Sequence::get_instance(5, 19);
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.value(), 19);
        assert_eq!(a.width(), 5);
    }

    #[test]
    fn test_bit_order_and_cardinality() {
        // 0b0110 on four wires: wires 1 and 2 carry ones
        let s = Sequence::get_instance(4, 0b0110);
        assert_eq!(s.bits(), vec![false, true, true, false]);
        assert_eq!(s.cardinality(), 2);
        assert_eq!(s.to_string(), "0110");
        assert!(!s.get(4), "out-of-range wires read as zero");
    }

    #[test]
    fn test_identity_permutation_is_noop() {
        for width in 1..=6 {
            let id = Permutation::identity(width);
            for value in 0..(1u32 << width) {
                let s = Sequence::get_instance(width, value);
                assert!(std::ptr::eq(s.permute(&id).unwrap(), s));
            }
        }
    }

    #[test]
    fn test_swap_and_permute_preserve_cardinality() {
        let perm = Permutation::new(vec![3, 0, 4, 1, 2]).unwrap();
        for value in 0..32u32 {
            let s = Sequence::get_instance(5, value);
            for i in 0..5 {
                for j in 0..5 {
                    assert_eq!(s.swapped(i, j).cardinality(), s.cardinality());
                }
            }
            assert_eq!(s.permute(&perm).unwrap().cardinality(), s.cardinality());
        }
    }

    #[test]
    fn test_swapped_moves_bits() {
        let s = Sequence::get_instance(3, 0b100);
        assert_eq!(s.swapped(0, 2).value(), 0b001);
        assert_eq!(s.swapped(1, 2).value(), 0b100);
        assert!(std::ptr::eq(s.swapped(0, 7), s));
    }

    #[test]
    fn test_permute_moves_wire_values() {
        // wire 0 -> wire 2, wire 1 -> wire 0, wire 2 -> wire 1
        let perm = Permutation::new(vec![2, 0, 1]).unwrap();
        let s = Sequence::get_instance(3, 0b100);
        assert_eq!(s.permute(&perm).unwrap().value(), 0b001);
    }

    #[test]
    fn test_permute_rejects_wrong_length() {
        let s = Sequence::get_instance(3, 1);
        assert!(s.permute(&Permutation::identity(4)).is_err());
    }

    #[test]
    fn test_is_sorted() {
        assert!(Sequence::get_instance(4, 0b0011).is_sorted());
        assert!(Sequence::get_instance(4, 0).is_sorted());
        assert!(Sequence::get_instance(4, 0b1111).is_sorted());
        assert!(!Sequence::get_instance(4, 0b0101).is_sorted());
    }

    #[test]
    fn test_initialize_cache_bounds() {
        assert!(initialize_cache(4).is_ok());
        assert!(initialize_cache(MAX_WIRES + 1).is_err());
    }
}
