//! State and rules engine for a two-player chess match.
//!
//! A host (typically a UI) owns one [`Match`] per session and drives it with
//! intents: [`Match::select`] for clicks, [`Match::tick`] once per second,
//! [`Match::pause`] / [`Match::resume`], and [`Match::export`] /
//! [`Match::import`] for saving and loading.
//!
//! ```
//! use chess_match::{Match, SelectOutcome, Square};
//!
//! let mut game = Match::new();
//! game.select(Square::new(4, 1));
//! let outcome = game.select(Square::new(4, 3));
//! assert!(matches!(outcome, SelectOutcome::Moved(_)));
//! assert_eq!(game.current_turn(), 1);
//! ```

pub mod board;
pub mod clock;
pub mod engine;
pub mod error;
pub mod game;
pub mod graveyard;
pub mod movegen;
pub mod ruleset;
pub mod selection;
pub mod snapshot;
pub mod types;

pub use board::*;
pub use clock::*;
pub use engine::*;
pub use error::{MatchError, Result};
pub use game::*;
pub use graveyard::*;
pub use movegen::{Move, MoveKind, destinations, pseudo_moves};
pub use ruleset::*;
pub use selection::*;
pub use snapshot::*;
pub use types::*;
