//! Capability contract between the search engine and host decision states.
//!
//! The engine is domain-agnostic: everything it learns about a problem
//! comes through [`DecisionState`]. A host supplies terminality checks,
//! terminal rewards, a rollout proposal policy, transitions, and a lazy
//! enumeration of the actions available from a state. The engine never
//! inspects action labels beyond equality and hashing.

use std::rc::Rc;

use thiserror::Error;

/// Shared handle to an opaque decision state.
///
/// A tree node holds the one long-term reference to its state; rollouts
/// clone the handle for the duration of a single simulation and release
/// intermediate states as they advance. `Rc` keeps the whole engine
/// single-threaded by construction.
pub type StateHandle = Rc<dyn DecisionState>;

/// Failure of a state capability call.
///
/// Every required capability either produces a value or reports why it
/// could not. An absent result where a value is required is a contract
/// violation, not a normal outcome, and aborts the search that hit it.
#[derive(Debug, Error)]
pub enum StateError {
    /// A capability produced no usable result.
    #[error("state returned no result for `{0}`")]
    Absent(&'static str),

    /// The backend failed internally.
    #[error("state backend error: {0}")]
    Backend(String),
}

/// Capability set a host must implement per state type.
///
/// All calls are blocking, in-process, and single-threaded; no reentrancy
/// is required of implementations.
pub trait DecisionState {
    /// Whether this state is an end-of-decision state.
    fn is_terminal(&self) -> Result<bool, StateError>;

    /// Scalar reward of a terminal state. Only meaningful once
    /// [`is_terminal`](Self::is_terminal) reports true.
    fn reward(&self) -> Result<i64, StateError>;

    /// Rollout policy: propose a default (often randomized) action from
    /// this state.
    fn propose_action(&self) -> Result<String, StateError>;

    /// Apply an action, producing the successor state.
    fn apply(&self, action: &str) -> Result<StateHandle, StateError>;

    /// Lazy, finite enumeration of this state's actions.
    ///
    /// Yields one label per `next()` and `None` once exhausted. Labels
    /// must not repeat across the sequence; the engine rejects a repeat
    /// as a protocol violation.
    fn untried_actions(&self) -> Box<dyn Iterator<Item = String>>;
}

impl std::fmt::Debug for dyn DecisionState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("dyn DecisionState")
    }
}
