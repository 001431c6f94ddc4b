//! Reference networks and size bounds

use super::Network;
use crate::error::Result;
use crate::parser::parse_network;

/// Smallest known sorting network size for 0..=17 wires.
pub const OPT_SIZE: [usize; 18] = [0, 0, 1, 3, 5, 9, 12, 16, 19, 25, 29, 35, 39, 45, 51, 56, 60, 71];

const INSTANCES: [(usize, &str); 3] = [
    (
        6,
        "[(0,1);(2,3);(0,4);(1,4);(2,5);(3,5);(1,3);(4,5);(0,2);(1,2);(2,4);(3,4)]",
    ),
    (
        7,
        "[(0,1);(2,3);(4,5);(1,6);(3,6);(5,6);(0,2);(2,3);(1,4);(4,5);(3,5);(2,4);(3,4);(0,1);(1,3);(1,2)]",
    ),
    (
        8,
        "[(0,1);(2,3);(4,5);(6,7);(1,3);(5,7);(0,2);(3,7);(4,6);(1,5);(3,5);(2,6);(5,6);(3,5);(0,4);(1,2);(2,4);(3,4);(1,2)]",
    ),
];

pub fn optimal_size(wires: usize) -> Option<usize> {
    OPT_SIZE.get(wires).copied()
}

/// A stored optimal sorting network, where one is on record.
pub fn known_instance(wires: usize) -> Option<Result<Network>> {
    INSTANCES
        .iter()
        .find(|(n, _)| *n == wires)
        .map(|(n, text)| parse_network(*n, text))
}

/// The Green filter: comparators `(i, i + len)` for `len = 1, 2, 4, ...`.
///
/// Seeding the search with it starts from far fewer outputs than the empty
/// network.
pub fn green_filter(wires: usize) -> Result<Network> {
    let mut net = Network::new(wires)?;
    let mut len = 1;
    while len < wires {
        for k in 0..len {
            let mut i = k;
            while i + len < wires {
                net.add_comparator(i, i + len)?;
                i += 2 * len;
            }
        }
        len *= 2;
    }
    Ok(net)
}
