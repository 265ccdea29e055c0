//! Store error types

use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("cache capacity must be positive (got {0})")]
    InvalidCapacity(usize),
}
