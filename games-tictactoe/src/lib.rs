//! TicTacToe decision-state backend for the mcts engine.
//!
//! This crate provides a complete reference implementation of the
//! `search-core` [`DecisionState`] contract, used by the engine's tests
//! and benches and by the `selfplay` binary.
//!
//! Rewards are scored for the player to move in the position the search
//! starts from: +1 if that mark wins the line, -1 if the opponent does,
//! 0 for a draw. Action labels are board positions `"0"` through `"8"`.

use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use rand::seq::SliceRandom;
use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha20Rng;
use search_core::{DecisionState, StateError, StateHandle};

/// Winning positions (rows, columns, diagonals).
const LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8], // rows
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8], // columns
    [0, 4, 8],
    [2, 4, 6], // diagonals
];

/// A tic-tac-toe position.
///
/// Cells hold 1 for X, -1 for O, 0 when empty. X moves first in a fresh
/// game. Randomness (move ordering, rollout proposals) comes from a
/// seeded ChaCha20 stream; successor states derive their streams from
/// the parent's, so a whole search is reproducible from one seed.
pub struct TicTacToe {
    board: [i8; 9],
    /// Mark making the next move.
    to_move: i8,
    /// Mark rewards are scored for: the player searching from the root.
    perspective: i8,
    rng: RefCell<ChaCha20Rng>,
}

impl TicTacToe {
    /// Create an empty board with X to move.
    pub fn new(seed: u64) -> Self {
        Self::from_board([0; 9], 1, seed)
    }

    /// Build a position with `to_move` as the searching player.
    pub fn from_board(board: [i8; 9], to_move: i8, seed: u64) -> Self {
        Self {
            board,
            to_move,
            perspective: to_move,
            rng: RefCell::new(ChaCha20Rng::seed_from_u64(seed)),
        }
    }

    pub fn board(&self) -> &[i8; 9] {
        &self.board
    }

    pub fn to_move(&self) -> i8 {
        self.to_move
    }

    /// The mark holding a completed line, if any.
    pub fn winner(&self) -> Option<i8> {
        for line in &LINES {
            let sum: i8 = line.iter().map(|&i| self.board[i]).sum();
            if sum == 3 {
                return Some(1);
            }
            if sum == -3 {
                return Some(-1);
            }
        }
        None
    }

    /// Whether the game has ended by a win or a full board.
    pub fn is_over(&self) -> bool {
        self.winner().is_some() || self.board.iter().all(|&cell| cell != 0)
    }

    /// Place the current mark at `cell`, returning the successor
    /// position. `None` if the game is over or the cell is taken.
    pub fn make_move(&self, cell: usize) -> Option<TicTacToe> {
        if self.is_over() || cell >= 9 || self.board[cell] != 0 {
            return None;
        }

        let mut board = self.board;
        board[cell] = self.to_move;
        Some(TicTacToe {
            board,
            to_move: -self.to_move,
            perspective: self.perspective,
            rng: RefCell::new(ChaCha20Rng::seed_from_u64(self.rng.borrow_mut().next_u64())),
        })
    }

    fn empty_cells(&self) -> Vec<usize> {
        (0..9).filter(|&i| self.board[i] == 0).collect()
    }

    /// Whether placing the current mark at `cell` completes a line.
    fn wins_at(&self, cell: usize) -> bool {
        let mut board = self.board;
        board[cell] = self.to_move;
        LINES
            .iter()
            .any(|line| line.iter().map(|&i| board[i]).sum::<i8>() == self.to_move * 3)
    }
}

impl DecisionState for TicTacToe {
    fn is_terminal(&self) -> Result<bool, StateError> {
        Ok(self.is_over())
    }

    fn reward(&self) -> Result<i64, StateError> {
        Ok(self
            .winner()
            .map_or(0, |mark| i64::from(mark * self.perspective)))
    }

    fn propose_action(&self) -> Result<String, StateError> {
        let cells = self.empty_cells();
        if cells.is_empty() {
            return Err(StateError::Absent("propose_action"));
        }
        let pick = cells[self.rng.borrow_mut().gen_range(0..cells.len())];
        Ok(pick.to_string())
    }

    fn apply(&self, action: &str) -> Result<StateHandle, StateError> {
        let cell: usize = action
            .parse()
            .map_err(|_| StateError::Backend(format!("bad action label `{action}`")))?;
        let next = self
            .make_move(cell)
            .ok_or_else(|| StateError::Backend(format!("illegal move `{action}`")))?;
        Ok(Rc::new(next))
    }

    fn untried_actions(&self) -> Box<dyn Iterator<Item = String>> {
        if self.is_over() {
            return Box::new(std::iter::empty());
        }

        let mut cells = self.empty_cells();

        // A move that wins on the spot dominates every alternative, so
        // enumerate it alone.
        if let Some(&win) = cells.iter().find(|&&cell| self.wins_at(cell)) {
            return Box::new(std::iter::once(win.to_string()));
        }

        cells.shuffle(&mut *self.rng.borrow_mut());
        Box::new(cells.into_iter().map(|cell| cell.to_string()))
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let mark = match self.board[row * 3 + col] {
                    1 => "X",
                    -1 => "O",
                    _ => ".",
                };
                write!(f, " {mark}")?;
            }
            if row < 2 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
