//! Photo organization module.
//!
//! Places timestamped files into a `year/year_MMMonth` folder structure
//! under the output root, naming each copy after its timestamp.

mod executor;
mod planner;
mod types;

pub use executor::PlacementExecutor;
pub use planner::{parse_locale, strip_diacritics, PlacementPlanner, DEFAULT_MONTH_LOCALE};
pub use types::*;
