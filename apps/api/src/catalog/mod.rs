// Career catalog: loading, seeding, and the live snapshot the recommendation
// engine reads from. The engine itself never touches a provider.

pub mod handlers;
pub mod provider;
pub mod seed;
pub mod store;
