//! Owner-scoped car store: repository seam (SeaORM and in-memory) plus the
//! application service that validates input and enforces the owner predicate.

pub mod repository;
pub mod repo;
pub mod service;

pub use common::types::car::{Availability, Car, CarPatch, NewCar};
pub use service::{parse_car_id, CarService};
