pub mod assistant;
pub mod config;
pub mod countdown;
pub mod models;
pub mod records;
pub mod seed;
#[cfg(test)]
pub mod test_helpers;
pub mod treasury;
pub mod workspace;
