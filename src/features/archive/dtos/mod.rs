mod archive_dto;

pub use archive_dto::{ArchiveSnapshotDto, ArchiveStatus};
