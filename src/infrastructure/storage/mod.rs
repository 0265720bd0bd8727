//! Storage traits and implementations

mod file;
mod memory;
mod reservation_repository;
mod traits;

pub use file::FileKeyValueStore;
pub use memory::InMemoryKeyValueStore;
pub use reservation_repository::{KeyValueReservationRepository, RESERVATIONS_KEY};
pub use traits::KeyValueStore;
