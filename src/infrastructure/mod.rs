//! Infrastructure layer - external concerns

pub mod notifications;
pub mod storage;

pub use notifications::{RecordingDispatcher, TimerDispatcher};
pub use storage::{
    FileKeyValueStore, InMemoryKeyValueStore, KeyValueReservationRepository, KeyValueStore,
};
