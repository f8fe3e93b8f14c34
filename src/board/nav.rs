//! Shortest-path adapter backing the pathfinding oracle.
//!
//! The real game engine owns mover pathing; the planner only ever asks
//! "shortest path from here to that edge, or nothing if blocked". This
//! module answers that query with a plain BFS over unblocked cells, which
//! is exact for path existence and length and close enough in shape for
//! damage estimation.

use std::collections::VecDeque;

use super::location::{Edge, Location, ARENA_SIZE};
use super::map::GameMap;

/// Returns the shortest unblocked path from `start` to any cell of `edge`,
/// including both endpoints, or `None` when the start is blocked, out of
/// bounds, or walled off from the edge.
pub fn shortest_path_to_edge(
    map: &GameMap,
    start: Location,
    edge: Edge,
) -> Option<Vec<Location>> {
    if !start.in_arena_bounds() || map.contains_stationary_unit(start) {
        return None;
    }

    let cell_count = (ARENA_SIZE * ARENA_SIZE) as usize;
    let mut visited = vec![false; cell_count];
    let mut came_from: Vec<Option<Location>> = vec![None; cell_count];
    let mut queue = VecDeque::new();

    let index = |loc: Location| (loc.y * ARENA_SIZE + loc.x) as usize;

    visited[index(start)] = true;
    queue.push_back(start);

    while let Some(current) = queue.pop_front() {
        if edge.contains(current) {
            return Some(reconstruct(&came_from, start, current, index));
        }
        for next in current.neighbors() {
            if !next.in_arena_bounds() || map.contains_stationary_unit(next) {
                continue;
            }
            let ni = index(next);
            if visited[ni] {
                continue;
            }
            visited[ni] = true;
            came_from[ni] = Some(current);
            queue.push_back(next);
        }
    }

    None
}

fn reconstruct(
    came_from: &[Option<Location>],
    start: Location,
    goal: Location,
    index: impl Fn(Location) -> usize,
) -> Vec<Location> {
    let mut path = vec![goal];
    let mut current = goal;
    while current != start {
        current = came_from[index(current)].expect("BFS predecessor chain broken");
        path.push(current);
    }
    path.reverse();
    path
}
