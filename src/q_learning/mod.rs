//! Tabular Q-learning over the joint mouse/cat/cheese configuration
//!
//! The state is a mixed-radix index over three cell indices, so the table
//! holds `cells³` rows of four action values each.
//!
//! ## Update variants
//!
//! | Variant | Delta applied to Q(s,a) |
//! |---------|-------------------------|
//! | `RewardOnly` | α[r − Q(s,a)] |
//! | `Bellman` | α[r + γ max_a' Q(s',a') − Q(s,a)] |
//!
//! ## Usage Example
//!
//! ```no_run
//! use catmouse::{Entities, Grid, LearningConfig, Position, Snapshot};
//! use catmouse::q_learning::TabularAgent;
//!
//! let grid = Grid::open(5).unwrap();
//! let mut agent = TabularAgent::new(&grid, LearningConfig::default())
//!     .unwrap()
//!     .with_seed(7);
//!
//! let snapshot = Snapshot::new(
//!     Position::new(2, 2),
//!     Entities::single(Position::new(0, 0)),
//!     Entities::single(Position::new(4, 4)),
//! );
//!
//! // Choose, transition, score and learn in one call.
//! let action = agent.act(&grid, &snapshot, 0.9).unwrap();
//! ```

pub mod agent;
pub mod q_table;
pub mod state;

pub use agent::TabularAgent;
pub use q_table::QTable;
pub use state::{StateIndex, decode_state, encode_snapshot, encode_state, state_count};
