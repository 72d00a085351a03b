//! Shared building blocks: trailing checksums and the sorted merge walk

pub mod checksum;
pub mod sorted_merge;
