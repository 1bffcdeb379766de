pub mod locking;

pub use locking::GameLocks;
