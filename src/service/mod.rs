pub mod groups;
pub mod publisher;
pub mod ranking;
pub mod voting;
