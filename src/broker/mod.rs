pub mod engine;
pub mod queue;
pub mod registry;
pub mod topic;

pub use engine::Broker;
