// Career recommendation core: skill matching, coverage scoring, next-step
// selection and ranking over a catalog snapshot. Everything below `engine`
// is pure; `service` and `handlers` are the only parts that touch collaborators.

pub mod career;
pub mod engine;
pub mod handlers;
pub mod matcher;
pub mod next_steps;
pub mod scorer;
pub mod service;
pub mod skill;
