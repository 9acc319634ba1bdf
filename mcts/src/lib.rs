//! Monte Carlo Tree Search (MCTS) under the UCT selection policy.
//!
//! This crate provides a domain-agnostic search engine that works with
//! any host state implementing the `search-core` [`DecisionState`]
//! contract. The engine incrementally builds a tree over the host's
//! state space and returns the action label with the best expected
//! reward at the root.
//!
//! # Overview
//!
//! Each simulation iteration runs three phases:
//!
//! 1. **Selection**: Descend through fully explored nodes using UCT
//!    (Upper Confidence bound for Trees) to balance exploration and
//!    exploitation, expanding at most one new child where an untried
//!    action remains
//! 2. **Rollout**: Play the reached state out to a terminal state with
//!    the host's proposal policy and read the terminal reward
//! 3. **Backpropagation**: Add the reward and one visit to every node on
//!    the path from the reached node back to the root
//!
//! After the iteration budget is spent, the root's children are scored
//! once more with exploration weight zero and the best one's action
//! label is returned.
//!
//! # Usage
//!
//! ```rust,ignore
//! use std::rc::Rc;
//!
//! use games_tictactoe::TicTacToe;
//! use mcts::{MctsConfig, MctsSearch};
//!
//! let state = TicTacToe::new(42);
//! let config = MctsConfig::default().with_iterations(2000);
//!
//! let mut search = MctsSearch::new(Rc::new(state), config)?;
//! let outcome = search.run()?;
//!
//! println!("Best action: {}", outcome.action);
//! println!("Root value:  {}", outcome.value);
//! ```
//!
//! # Configuration
//!
//! The [`MctsConfig`] struct controls search behavior:
//!
//! - `iterations`: simulation budget per search (default: 5000)
//! - `exploration`: UCT exploration weight during selection
//!   (default: √2; the final choice always uses 0)
//! - `branching_estimate`: expected branching factor, sizing each node's
//!   fixed-capacity children index (default: 10)
//!
//! # Structure
//!
//! The tree is an arena of nodes addressed by [`NodeId`]; each node owns
//! a reference-counted handle to its state and a fixed-capacity
//! [`ActionMap`] from action label to child. Parent links are plain
//! arena indices used only for the upward backpropagation walk, so
//! dropping the search releases the whole tree top-down in one pass.

pub mod config;
pub mod index;
pub mod node;
pub mod search;
pub mod tree;

// Re-export main types
pub use config::MctsConfig;
pub use index::{ActionMap, DuplicateAction};
pub use node::{Node, NodeId};
pub use search::{search, MctsSearch, SearchError, SearchOutcome};
pub use tree::{SearchTree, TreeStats};
