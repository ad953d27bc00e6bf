//! Foothold pathfinding over the voxel world
//!
//! A search expands a move graph outward from the start position: for every
//! discovered node, each cardinal neighbor column contributes the footholds
//! an agent could actually move to under the walk/fall/jump rules. The
//! expansion is breadth-first by discovery order with a depth tiebreak on
//! destination hits - it does not guarantee shortest paths. When the
//! destination is never reached the search reports the closest reachable
//! node instead, and "no path at all" is a normal outcome, not an error.

use ahash::{HashMap, HashMapExt};
use smallvec::SmallVec;

use crate::world::{CHUNK_SIZE, World};
use hakoniwa_voxel::{Coordinate, Direction, cross_neighbors};

/// How a foothold is entered from its predecessor.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MoveKind {
    /// Level step, or a single-block step up.
    Walk,
    /// Two- or three-block jump up.
    JumpWalk,
    /// Step off a ledge and drop.
    FallWalk,
}

/// One move of a path: a cardinal direction and the manner of the
/// transition.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub direction: Direction,
    pub kind: MoveKind,
}

/// Index of a node in the search arena.
pub type NodeId = usize;

/// One reachable foothold discovered during a search.
///
/// Nodes form a tree through parent indices; the root (the start position)
/// has no parent and no arrival move. Children are recorded in discovery
/// order and may include already-known nodes reached again via another
/// route.
#[derive(Debug)]
pub struct PathNode {
    pub parent: Option<NodeId>,
    pub pos: Coordinate,
    pub arrival: Option<Move>,
    pub children: SmallVec<[NodeId; 4]>,
}

/// Result of a completed search.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PathOutcome {
    /// A node standing exactly on the destination.
    Destination(NodeId),
    /// No way to the destination; the discovered node closest to it.
    Closest(NodeId),
    /// Nothing reachable at all.
    Unreachable,
}

/// Any fallback candidate must start out closer than this.
const BACKUP_RADIUS: f32 = 100.0;

/// A single-use search from `start` towards `dest` over a read-only world.
///
/// The world must not be mutated while a search runs; no snapshot is taken.
pub struct PathFinder<'w> {
    start: Coordinate,
    dest: Coordinate,
    world: &'w World,
    nodes: Vec<PathNode>,
    dest_nodes: Vec<NodeId>,
    backup: Option<NodeId>,
    backup_dist: f32,
    checked: HashMap<Coordinate, NodeId>,
}

impl<'w> PathFinder<'w> {
    pub fn new(start: Coordinate, dest: Coordinate, world: &'w World) -> Self {
        Self {
            start,
            dest,
            world,
            nodes: Vec::new(),
            dest_nodes: Vec::new(),
            backup: None,
            backup_dist: BACKUP_RADIUS,
            checked: HashMap::new(),
        }
    }

    /// The node behind `id`. Valid for every id returned by this search.
    pub fn node(&self, id: NodeId) -> &PathNode {
        &self.nodes[id]
    }

    /// Tree depth of a node; the cost measure for destination tiebreaks.
    pub fn cost(&self, id: NodeId) -> usize {
        let mut cost = 1;
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            cost += 1;
            current = parent;
        }
        cost
    }

    /// Runs the search to completion.
    ///
    /// Every discovered node is expanded exactly once, in discovery order.
    /// Returns the cheapest destination hit if there is one, otherwise the
    /// closest discovered node, otherwise `Unreachable`.
    pub fn find(&mut self) -> PathOutcome {
        self.intern(None, self.start, None);
        let mut next = 0;
        while next < self.nodes.len() {
            self.expand(next);
            next += 1;
        }

        if let Some(id) = self.cheapest_destination() {
            log::debug!(
                "path found: {} nodes searched, cost {}",
                self.nodes.len(),
                self.cost(id)
            );
            return PathOutcome::Destination(id);
        }
        match self.backup {
            Some(id) => {
                log::debug!(
                    "no direct path, closest is ({}, {}, {})",
                    self.nodes[id].pos.x,
                    self.nodes[id].pos.y,
                    self.nodes[id].pos.z
                );
                PathOutcome::Closest(id)
            }
            None => {
                log::debug!("no path found");
                PathOutcome::Unreachable
            }
        }
    }

    /// The moves from the start position to `id`, in travel order.
    pub fn move_sequence(&self, id: NodeId) -> Vec<Move> {
        let mut moves = Vec::new();
        let mut current = id;
        while let Some(parent) = self.nodes[current].parent {
            if let Some(mv) = self.nodes[current].arrival {
                moves.push(mv);
            }
            current = parent;
        }
        moves.reverse();
        moves
    }

    fn cheapest_destination(&self) -> Option<NodeId> {
        self.dest_nodes.iter().copied().min_by_key(|&id| self.cost(id))
    }

    /// Creates a node, or returns the one already memoized for `pos`.
    /// Re-reaching a coordinate never re-parents it, so the tree stays
    /// acyclic. New nodes compete for the closest-to-destination fallback.
    fn intern(
        &mut self,
        parent: Option<NodeId>,
        pos: Coordinate,
        arrival: Option<Move>,
    ) -> NodeId {
        if let Some(&existing) = self.checked.get(&pos) {
            return existing;
        }
        let id = self.nodes.len();
        self.nodes.push(PathNode {
            parent,
            pos,
            arrival,
            children: SmallVec::new(),
        });
        self.checked.insert(pos, id);

        let dist = pos.distance(self.dest);
        if dist < self.backup_dist {
            self.backup_dist = dist;
            self.backup = Some(id);
        }
        id
    }

    /// Discovers every foothold reachable from `id` with one move.
    fn expand(&mut self, id: NodeId) {
        let pos = self.nodes[id].pos;
        let size = CHUNK_SIZE as i32;

        for (direction, next_pos) in cross_neighbors(pos) {
            for foothold in self.world.reachable_footholds(next_pos.x, next_pos.y) {
                if foothold.x < 0 || foothold.y < 0 || foothold.x >= size || foothold.y >= size {
                    continue;
                }

                let kind = match foothold.z - pos.z {
                    0 => Some(MoveKind::Walk),
                    dz if dz < 0 => self.fall_move(pos, next_pos, foothold),
                    1 => self
                        .clearance(pos, 3..=3)
                        .then_some(MoveKind::Walk),
                    2 => self
                        .clearance(pos, 3..=4)
                        .then_some(MoveKind::JumpWalk),
                    3 => self
                        .clearance(pos, 3..=5)
                        .then_some(MoveKind::JumpWalk),
                    _ => None,
                };

                if let Some(kind) = kind {
                    let child = self.intern(Some(id), foothold, Some(Move { direction, kind }));
                    self.nodes[id].children.push(child);
                    if foothold == self.dest {
                        self.dest_nodes.push(child);
                    }
                }
            }
        }
    }

    /// A drop into a neighbor column is allowed when nothing blocks the
    /// step off at head height and the agent would land exactly on the
    /// candidate foothold, not sail past it to a lower ledge.
    fn fall_move(
        &self,
        pos: Coordinate,
        next_pos: Coordinate,
        foothold: Coordinate,
    ) -> Option<MoveKind> {
        let step_clear = self
            .world
            .get(next_pos.x, next_pos.y, pos.z + 1)
            .is_none();
        let landing = self
            .world
            .nearest_ground_below(next_pos.x, next_pos.y, pos.z);
        (step_clear && landing == Some(foothold.z)).then_some(MoveKind::FallWalk)
    }

    /// Whether the head-clearance band above the current position is empty
    /// at every z offset in `band`.
    fn clearance(&self, pos: Coordinate, band: std::ops::RangeInclusive<i32>) -> bool {
        band.into_iter()
            .all(|dz| self.world.get_coord(pos.add_z(dz)).is_none())
    }
}
