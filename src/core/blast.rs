// Copyright 2017-2024 Sean Gillespie.
//
// Licensed under the Apache License, Version 2.0 <LICENSE-APACHE or
// http://www.apache.org/licenses/LICENSE-2.0> or the MIT license
// <LICENSE-MIT or http://opensource.org/licenses/MIT>, at your
// option. This file may not be copied, modified, or distributed
// except according to those terms.

//! Precomputed neighbourhoods used to resolve explosions.

use std::sync::LazyLock;

use crate::core::*;

static NEIGHBOR_TABLE: LazyLock<NeighborTable> = LazyLock::new(NeighborTable::new);

struct NeighborTable {
    table: [SquareSet; 64],
}

impl NeighborTable {
    fn new() -> NeighborTable {
        let mut nt = NeighborTable {
            table: [SquareSet::empty(); 64],
        };

        for sq in squares() {
            nt.table[sq.0 as usize] = Direction::ALL
                .iter()
                .filter_map(|&dir| sq.towards(dir))
                .collect();
        }

        nt
    }
}

/// The in-bounds squares adjacent to `sq`; at most eight of them.
pub fn neighbors(sq: Square) -> SquareSet {
    NEIGHBOR_TABLE.table[sq.0 as usize]
}

/// The blast radius of an explosion centered on `sq`: the square itself and its neighbours.
pub fn blast_radius(sq: Square) -> SquareSet {
    let mut radius = neighbors(sq);
    radius.insert(sq);
    radius
}

#[cfg(test)]
mod tests {
    use crate::core::*;

    fn sorted(set: SquareSet) -> Vec<Square> {
        set.into_iter().collect()
    }

    #[test]
    fn corner_has_three_neighbors() {
        assert_eq!(vec![B1, A2, B2], sorted(neighbors(A1)));
    }

    #[test]
    fn edge_has_five_neighbors() {
        assert_eq!(5, neighbors(E1).into_iter().count());
        assert_eq!(5, neighbors(H4).into_iter().count());
    }

    #[test]
    fn center_blast_radius() {
        assert_eq!(
            vec![D3, E3, F3, D4, E4, F4, D5, E5, F5],
            sorted(blast_radius(E4))
        );
    }
}
