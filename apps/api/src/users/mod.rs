// User identity and skill roster: the plumbing that feeds recommendation snapshots.

pub mod handlers;
#[cfg(test)]
pub mod memory;
pub mod store;
