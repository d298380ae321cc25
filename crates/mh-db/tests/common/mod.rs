#![allow(dead_code)]

mod fixtures;
mod test_db;

pub use fixtures::{create_test_role, create_test_user, sample_meeting, sample_role};
pub use test_db::create_test_pool;
