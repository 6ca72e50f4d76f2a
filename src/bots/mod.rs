//! Player decision makers.
//!
//! ## Overview
//!
//! - [`BacktrackBot`]: depth-bounded look-ahead with memoization and an
//!   optional rollout estimator
//! - [`RandomBot`]: uniform over legal options
//! - [`PromptedBot`]: numbered text prompts answered by a closure
//!
//! ## Usage
//!
//! ```rust
//! use card_battler::bots::{BacktrackBot, SearchConfig};
//! use card_battler::core::BattleConfig;
//! use card_battler::games::starter;
//!
//! let config = BattleConfig::default().with_seed(7).with_max_turns(40);
//! let mut battle = starter::encounter(config, |asc, rng| vec![starter::jaw_worm(asc, rng)]);
//!
//! let mut bot = BacktrackBot::new(SearchConfig::default().with_depth(2));
//! let result = battle.run(&mut bot).unwrap();
//! println!("{result:?} after {} turns", battle.turn());
//! ```

pub mod bot;
pub mod random;
pub mod config;
pub mod stats;
pub mod backtrack;
pub mod prompted;

pub use bot::{Bot, FirstCandidate, TargetChooser};
pub use random::RandomBot;
pub use config::SearchConfig;
pub use stats::SearchStats;
pub use backtrack::BacktrackBot;
pub use prompted::{PromptedBot, ResponseStats};
