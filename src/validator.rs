use petgraph::graphmap::UnGraphMap;
use petgraph::visit::Dfs;
use strum::VariantArray;
use thiserror::Error;

use crate::board::Grid;
use crate::catalog::compatible;
use crate::direction::Direction;
use crate::location::Location;

/// Why a grid is not a finished network.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum Violation {
    /// A piece reached from the origin opens toward the edge of the board or toward a neighbor that does not open back.
    #[error("{at:?} opens {direction:?} without a matching neighbor")]
    Incompatible { at: Location, direction: Direction },
    /// Every joint met was fine, but some cells cannot be reached from the origin.
    #[error("only {reached} of {total} cells are connected to the origin")]
    Disconnected { reached: usize, total: usize },
}

/// The grid as an undirected graph: one node per cell, one edge per pair of neighbors opening toward each other.
///
/// Edge weights are the direction from the upper or left cell of the pair.
pub fn network(grid: &Grid) -> UnGraphMap<Location, Direction> {
    let mut graph = UnGraphMap::with_capacity(grid.len(), 2 * grid.len());

    for location in grid.locations() {
        graph.add_node(location);
        let Some(piece) = grid.get(location) else { continue };

        for direction in [Direction::Right, Direction::Down] {
            let neighbor = direction.attempt_from(location);
            if compatible(&piece, grid.get(neighbor).as_ref(), direction) {
                graph.add_edge(location, neighbor, direction);
            }
        }
    }

    graph
}

/// Certify that `grid` is one connected network with every opening matched.
///
/// Walks depth-first from `(0, 0)` along matched joints, checking every opening of every piece it visits.
/// A second component is never visited and so shows up as [`Violation::Disconnected`].
pub fn validate(grid: &Grid) -> Result<(), Violation> {
    let graph = network(grid);
    let mut dfs = Dfs::new(&graph, Location(0, 0));
    let mut reached = 0;

    while let Some(location) = dfs.next(&graph) {
        reached += 1;
        let Some(piece) = grid.get(location) else { continue };

        for direction in Direction::VARIANTS.iter().copied().filter(|d| piece.opens_toward(*d)) {
            let neighbor = grid.get(direction.attempt_from(location));
            if !compatible(&piece, neighbor.as_ref(), direction) {
                return Err(Violation::Incompatible { at: location, direction });
            }
        }
    }

    match reached == grid.len() {
        true => Ok(()),
        false => Err(Violation::Disconnected { reached, total: grid.len() }),
    }
}

/// Shorthand for `validate(grid).is_ok()`.
pub fn is_goal(grid: &Grid) -> bool {
    validate(grid).is_ok()
}
