//! Search tree node and UCT scoring.
//!
//! Each node owns the handle to the state it was reached in, plus the
//! statistics UCT selection reads. Nodes reference each other through the
//! arena in [`crate::tree`]; the parent link is an index, never an owner.

use search_core::{StateError, StateHandle};

use crate::index::ActionMap;

/// Index into the node arena. Using a newtype for type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub u32);

impl NodeId {
    pub const NONE: NodeId = NodeId(u32::MAX);

    pub fn is_none(self) -> bool {
        self == Self::NONE
    }

    pub fn is_some(self) -> bool {
        !self.is_none()
    }
}

/// A vertex of the search tree.
pub struct Node {
    /// Parent node index (NONE for the root). Used only to walk upward
    /// during backpropagation, never for ownership or destruction.
    pub parent: NodeId,

    /// Owned handle to the decision state at this node.
    pub state: StateHandle,

    /// Children indexed by the action label that reaches them.
    pub children: ActionMap,

    /// Enumerator over this state's actions that have not produced a
    /// child yet. Exhaustion flips `is_explored`.
    pub(crate) untried: Box<dyn Iterator<Item = String>>,

    /// Number of simulations that passed through this node.
    pub visit_count: u32,

    /// Sum of rewards backpropagated through this node. May be negative.
    pub total_reward: i64,

    /// Whether the state is an end-of-decision state. Computed once at
    /// creation, immutable afterwards.
    pub is_terminal: bool,

    /// Whether every action from this state has produced a child.
    /// Starts equal to `is_terminal`.
    pub is_explored: bool,
}

impl std::fmt::Debug for Node {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Node")
            .field("parent", &self.parent)
            .field("visit_count", &self.visit_count)
            .field("total_reward", &self.total_reward)
            .field("is_terminal", &self.is_terminal)
            .field("is_explored", &self.is_explored)
            .finish_non_exhaustive()
    }
}

impl Node {
    /// Build a node for `state`, querying terminality once. Terminal
    /// nodes count as explored and are never expanded.
    pub(crate) fn new(
        state: StateHandle,
        parent: NodeId,
        index_capacity: usize,
    ) -> Result<Self, StateError> {
        let is_terminal = state.is_terminal()?;
        let untried = state.untried_actions();
        Ok(Self {
            parent,
            children: ActionMap::with_capacity(index_capacity),
            untried,
            visit_count: 0,
            total_reward: 0,
            is_terminal,
            is_explored: is_terminal,
            state,
        })
    }

    /// Mean reward over all simulations through this node. Zero before
    /// the first backpropagation.
    #[inline]
    pub fn mean_reward(&self) -> f64 {
        if self.visit_count == 0 {
            0.0
        } else {
            self.total_reward as f64 / f64::from(self.visit_count)
        }
    }

    /// UCT score of this node viewed as a child of a parent with
    /// `parent_visits` visits:
    ///
    /// `total_reward/visits + exploration * sqrt(2 ln(parent_visits) / visits)`
    ///
    /// Every candidate has been backpropagated through at least once
    /// before it can be scored, so `visit_count` is nonzero here.
    #[inline]
    pub fn uct_score(&self, parent_visits: u32, exploration: f64) -> f64 {
        debug_assert!(self.visit_count > 0, "scored an unvisited node");
        let visits = f64::from(self.visit_count);
        let exploit = self.total_reward as f64 / visits;
        let explore = exploration * (2.0 * f64::from(parent_visits).ln() / visits).sqrt();
        exploit + explore
    }
}
