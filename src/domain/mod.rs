//! Flow traversal engine
//!
//! Visibility predicates, the shared traversal functions, the two navigators
//! built on them and the load-time integrity check for flow definitions.

mod engine;
mod paged;
mod sequential;
mod validation;
mod visibility;


pub use engine::{next_visible_index, progress_percent, visible_count, visible_steps};
pub use paged::{PageMove, PagedNavigator};
pub use sequential::{NavigatorState, SequentialNavigator};
pub use validation::{ensure_valid, validate_flow, FlowIssue, ValidationResult};
pub use visibility::{is_visible, rule_matches};
