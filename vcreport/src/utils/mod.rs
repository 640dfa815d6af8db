//! Supporting infrastructure.
//!
//! Little-endian byte input and the error types shared by the reader and
//! the frame decoder.

pub mod byte_io;
pub mod errors;
