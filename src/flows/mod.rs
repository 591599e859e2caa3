//! Flow registry - bundled and user-supplied questionnaire definitions

mod registry;

pub use registry::{bundled_flows, FlowRegistry};
