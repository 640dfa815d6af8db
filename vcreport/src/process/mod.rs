/// Sequential container reading.
///
/// Provides the [`ContainerReader`](read::ContainerReader), which decodes the
/// report header, voice entries and frames from any [`std::io::Read`] source.
pub mod read;

/// Frame to PCM conversion.
///
/// Provides the [`FrameDecoder`](decode::FrameDecoder) and the
/// [`Codec`](decode::Codec)/[`CodecSession`](decode::CodecSession) traits it
/// decodes packets through.
pub mod decode;

/// Opus codec backed by libopus.
#[cfg(feature = "opus")]
pub mod opus;

#[cfg(test)]
pub(crate) mod testing;

/// A one-voice container: silence frame followed by a 3-byte Opus packet.
pub const EXAMPLE_DATA: &[u8] = &[
    0x73, 0x56, 0x43, 0x72, 0x82, 0xB4, 0x54, 0x00, 0x00, 0x00, 0x80, 0x3F, 0x00, 0x00, 0x00, 0x40,
    0x00, 0x00, 0x00, 0x3F, 0x00, 0x01, 0xBF, 0xD6, 0x54, 0x00, 0x00, 0x00, 0x80, 0x40, 0x00, 0x00,
    0xC0, 0xBF, 0x00, 0x00, 0x00, 0x00, 0x66, 0x66, 0x66, 0x66, 0x66, 0x66, 0x29, 0x40, 0x02, 0x00,
    0x00, 0x03, 0xF8, 0xFF, 0xFE,
];
