pub mod snapshot_repo;
pub mod unit_repo;

pub use snapshot_repo::SnapshotRepo;
pub use unit_repo::UnitRepo;
