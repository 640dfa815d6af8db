//! Record types of the sVCr container.
//!
//! Each record knows how to read itself from a [`ByteIoReader`](crate::utils::byte_io::ByteIoReader)
//! in the fixed field order of the container layout.

pub mod frame;
pub mod header;
pub mod voice;
