//! Service layer providing the owner-scoped car store on top of models.
//! - Separates business logic from data access.
//! - Reuses validation and entity definitions in `models` crate.
//! - Provides clear error types and documented interfaces.

pub mod errors;
pub mod auth;
pub mod car;
pub mod db;
#[cfg(test)]
pub mod test_support;
