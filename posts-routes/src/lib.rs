use crate::error::PostServiceError;
use error_stack::Report;

pub mod error;
mod metrics;
pub mod routes;
pub mod service;
pub mod state;

#[cfg(test)]
mod tests;

pub type ServiceResult<T> = Result<T, Report<PostServiceError>>;
