//! Search loop implementation.
//!
//! Each iteration runs the three phases of the core algorithm:
//! 1. Selection: descend through fully explored nodes via UCT, expanding
//!    at most one new child along the way
//! 2. Rollout: play the reached state out to a terminal reward with the
//!    state's own proposal policy
//! 3. Backpropagation: add the reward along the path back to the root
//!
//! After the iteration budget is spent, the best root child under pure
//! exploitation (exploration weight zero) names the action to return.

use std::rc::Rc;

use search_core::{StateError, StateHandle};
use thiserror::Error;
use tracing::{debug, trace};

use crate::config::MctsConfig;
use crate::index::DuplicateAction;
use crate::node::NodeId;
use crate::tree::{SearchTree, TreeStats};

/// Errors that can abort a search.
///
/// All of these are boundary failures discovered mid-descent; the search
/// fails fast rather than trying to roll tree statistics back, and the
/// failed tree is dropped with the search value.
#[derive(Debug, Error)]
pub enum SearchError {
    /// A state capability returned an invalid or absent result.
    #[error("state protocol violation: {0}")]
    StateProtocol(#[from] StateError),

    /// The action enumerator repeated a label that already has a child.
    #[error(transparent)]
    DuplicateAction(#[from] DuplicateAction),

    /// The node arena reached the end of its id space.
    #[error("search tree exceeded the addressable node limit")]
    TreeLimit,

    /// The root has no children to choose from (terminal initial state).
    #[error("no actions available from the initial state")]
    NoActions,
}

/// Outcome of a completed search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Label of the best first action from the initial state.
    pub action: String,

    /// Mean reward observed at the root.
    pub value: f64,

    /// Number of simulation iterations run.
    pub iterations: u32,

    /// Number of nodes the tree grew to.
    pub nodes: usize,
}

/// A single UCT search over one tree.
///
/// The tree is exclusively owned by the search and released when the
/// search value drops.
pub struct MctsSearch {
    tree: SearchTree,
    config: MctsConfig,
}

impl MctsSearch {
    /// Build the root node from the initial state.
    pub fn new(initial: StateHandle, config: MctsConfig) -> Result<Self, SearchError> {
        let tree = SearchTree::new(initial, config.index_capacity())?;
        Ok(Self { tree, config })
    }

    /// Run the configured number of iterations, then extract the best
    /// root action under pure exploitation.
    pub fn run(&mut self) -> Result<SearchOutcome, SearchError> {
        for iteration in 0..self.config.iterations {
            trace!(iteration, nodes = self.tree.len(), "simulation");
            self.simulate()?;
        }

        let root = self.tree.root();
        let (action, _) = self
            .tree
            .best_child(root, 0.0)
            .ok_or(SearchError::NoActions)?;

        let outcome = SearchOutcome {
            action: action.to_owned(),
            value: self.tree.get(root).mean_reward(),
            iterations: self.config.iterations,
            nodes: self.tree.len(),
        };
        debug!(
            action = %outcome.action,
            value = outcome.value,
            nodes = outcome.nodes,
            "search complete"
        );
        Ok(outcome)
    }

    /// One iteration: select, roll out, backpropagate.
    fn simulate(&mut self) -> Result<(), SearchError> {
        let reached = self.select(self.tree.root())?;
        let reward = rollout(&self.tree.get(reached).state)?;
        self.tree.backpropagate(reached, reward);
        trace!(reached = reached.0, reward, "simulation complete");
        Ok(())
    }

    /// Descend from `from` until reaching a terminal node or expanding
    /// one new child.
    ///
    /// Fully explored nodes are traversed via their UCT-best child. An
    /// unexplored node either yields one fresh action (the new child is
    /// returned immediately, bounding each call to one allocation) or is
    /// marked explored once its enumerator runs dry, after which the loop
    /// re-evaluates the same node.
    fn select(&mut self, from: NodeId) -> Result<NodeId, SearchError> {
        let mut current = from;
        loop {
            let (is_terminal, is_explored) = {
                let node = self.tree.get(current);
                (node.is_terminal, node.is_explored)
            };

            if is_terminal {
                return Ok(current);
            }

            if is_explored {
                // A non-terminal node only becomes explored through its
                // enumerator, so an empty children index here means the
                // state enumerated no actions at all.
                let Some((_, child)) = self.tree.best_child(current, self.config.exploration)
                else {
                    return Err(SearchError::StateProtocol(StateError::Absent(
                        "untried_actions",
                    )));
                };
                current = child;
                continue;
            }

            let next_action = self.tree.get_mut(current).untried.next();
            match next_action {
                Some(label) => {
                    let node = self.tree.get(current);
                    if node.children.get(&label).is_some() {
                        return Err(SearchError::DuplicateAction(DuplicateAction { label }));
                    }
                    let state = Rc::clone(&node.state);
                    let successor = state.apply(&label)?;
                    let child = self.tree.add_child(current, label, successor)?;
                    trace!(parent = current.0, child = child.0, "expanded");
                    return Ok(child);
                }
                None => {
                    self.tree.get_mut(current).is_explored = true;
                }
            }
        }
    }

    /// The search tree, for inspection.
    pub fn tree(&self) -> &SearchTree {
        &self.tree
    }

    /// Statistics of the current tree.
    pub fn stats(&self) -> TreeStats {
        self.tree.stats()
    }
}

/// Play out from `start` to a terminal state and read its reward.
///
/// The rollout holds its own handle to each state it passes through and
/// releases the previous one as it advances; the tree's stored states are
/// never mutated or retained.
fn rollout(start: &StateHandle) -> Result<i64, SearchError> {
    let mut state = Rc::clone(start);
    while !state.is_terminal()? {
        let action = state.propose_action()?;
        state = state.apply(&action)?;
    }
    Ok(state.reward()?)
}

/// Run a whole search with the default configuration and return the label
/// of the best first action.
pub fn search(initial: StateHandle) -> Result<String, SearchError> {
    let mut search = MctsSearch::new(initial, MctsConfig::default())?;
    Ok(search.run()?.action)
}
