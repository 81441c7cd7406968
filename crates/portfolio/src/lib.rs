//! Portfolio → chess mapping
//!
//! Turns a list of portfolio holdings into chess-piece roles (king for the
//! largest position, queen for the most volatile, and so on), then binds the
//! mapped symbols to the squares of the player's pieces so market events
//! about a symbol can be located on the board.
//!
//! # Usage
//!
//! ```ignore
//! let mappings = portfolio::map_portfolio(&holdings);
//! let board = SquareAssignment::bind(&mappings, Color::White, &rules);
//! assert_eq!(board.square_of("SPY"), Some(Square::E1));
//! ```

mod assignment;
mod holding;
mod mapper;

pub use assignment::*;
pub use holding::*;
pub use mapper::*;
