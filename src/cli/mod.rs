pub mod command;
pub mod manifest;
pub mod output;
pub mod progress;
pub mod unpack;
