use std::{collections::VecDeque, hash::Hash};

use glam::IVec2;

use crate::{geom::DIR_4, HashSet};

/// Generate a shortest paths map on a grid according to a neighbors function.
pub fn dijkstra_map<'a, T, I>(
    mut neighbors: impl FnMut(&T) -> I + 'a,
    starts: impl IntoIterator<Item = T>,
) -> impl Iterator<Item = (T, usize)> + 'a
where
    T: Clone + Eq + Hash + 'a,
    I: IntoIterator<Item = T>,
{
    let mut edge: VecDeque<(T, usize)> =
        starts.into_iter().map(|s| (s, 0)).collect();
    let mut seen = HashSet::default();

    std::iter::from_fn(move || {
        // Candidates are in a queue and consumed first-in, first-out. This
        // should guarantee that the first time a node is popped from the queue
        // it shows the shortest path length from start to that node.

        while let Some((node, len)) = edge.pop_front() {
            if !seen.contains(&node) {
                seen.insert(node.clone());
                for n in neighbors(&node) {
                    if !seen.contains(&n) {
                        edge.push_back((n, len + 1));
                    }
                }
                return Some((node, len));
            }
        }
        None
    })
}

/// 4-connected breadth-first flood fill.
///
/// Starting from `start`, a cell is accepted if `is_valid` holds for it and
/// `matches(target, &value(cell))` is true. The start cell obeys the same
/// rule, so an invalid or non-matching start gives an empty set.
pub fn flood_fill<T>(
    start: impl Into<IVec2>,
    target: &T,
    is_valid: impl Fn(IVec2) -> bool,
    value: impl Fn(IVec2) -> T,
    matches: impl Fn(&T, &T) -> bool,
) -> HashSet<IVec2> {
    let start = start.into();
    let accept = |p: IVec2| is_valid(p) && matches(target, &value(p));

    if !accept(start) {
        return Default::default();
    }

    dijkstra_map(
        |&p: &IVec2| {
            DIR_4
                .iter()
                .map(move |&d| p + d)
                .filter(|&n| accept(n))
                .collect::<Vec<_>>()
        },
        [start],
    )
    .map(|(p, _)| p)
    .collect()
}
