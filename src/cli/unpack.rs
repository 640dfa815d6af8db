use std::fs::{self, File};
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, ensure};
use indicatif::{MultiProgress, ProgressBar};
use log::{debug, info, warn};
use vcreport::process::decode::{Codec, FrameDecoder, FrameStats};
use vcreport::process::opus::OpusCodec;
use vcreport::process::read::ContainerReader;
use vcreport::structs::frame::PcmBlock;
use vcreport::structs::voice::VoiceEntry;

use super::command::Cli;
use super::manifest::Manifest;
use super::output::{ensure_output_dir, report_dir, voice_file_name};
use super::progress::create_voice_progress_bar;
use crate::errors::FileIoError;
use crate::timestamp::frames_duration_str;
use crate::wav::WAVWriter;

pub struct UnpackOptions<'a> {
    /// Parent of the per-report directory; the current directory if `None`.
    pub output_path: Option<&'a Path>,
    pub write_manifest: bool,
}

#[derive(Debug, Clone)]
pub struct VoiceSummary {
    pub path: PathBuf,
    pub frames: u16,
    pub silent_frames: u64,
}

#[derive(Debug, Clone)]
pub struct UnpackSummary {
    pub output_dir: PathBuf,
    pub voices: Vec<VoiceSummary>,
    pub frames_read: u64,
    pub bytes_read: u64,
}

pub fn cmd_unpack(cli: &Cli, multi: Option<&MultiProgress>) -> Result<UnpackSummary> {
    info!("Unpacking voice call report: {}", cli.input.display());

    let options = UnpackOptions {
        output_path: cli.output_path.as_deref(),
        write_manifest: cli.manifest,
    };
    let summary = unpack_report(&cli.input, &options, &OpusCodec, multi)?;

    for voice in &summary.voices {
        debug!(
            "{}: {} frames, {} silent",
            voice.path.display(),
            voice.frames,
            voice.silent_frames
        );
    }

    info!(
        "Unpacked {} voices ({} frames, {} of audio) from {} bytes into {}",
        summary.voices.len(),
        summary.frames_read,
        frames_duration_str(summary.frames_read),
        summary.bytes_read,
        summary.output_dir.display()
    );

    Ok(summary)
}

/// Converts one container into a directory of per-voice WAV files.
///
/// Stops at the first error. Files of voices finished before the error are
/// left in place; the file of the failing voice is removed.
pub fn unpack_report<C: Codec>(
    input: &Path,
    options: &UnpackOptions,
    codec: &C,
    multi: Option<&MultiProgress>,
) -> Result<UnpackSummary> {
    let file = File::open(input).map_err(|source| FileIoError::Open {
        path: input.to_path_buf(),
        source,
    })?;
    let mut reader = ContainerReader::new(BufReader::new(file));

    let header = reader.read_header()?;
    info!("Phone number: {}", header.reporter_phone);
    info!("Position: {}", header.reporter_position);
    info!("Reason: {}", header.reason_lossy());
    info!("Voices: {}", header.voice_count);

    let output_dir = report_dir(input, options.output_path);
    ensure_output_dir(&output_dir)?;

    let mut manifest = options
        .write_manifest
        .then(|| Manifest::with_header(&header));
    let voice_count = header.voice_count as usize;
    let mut voices = Vec::with_capacity(voice_count);
    let mut block = PcmBlock::silence();

    for voice_index in 0..voice_count {
        let voice = reader
            .read_voice_entry()
            .with_context(|| format!("voice {}/{voice_count}", voice_index + 1))?;

        let file_name = voice_file_name(&voice);
        let path = output_dir.join(&file_name);
        info!(
            "Voice {}/{voice_count}: phone {}, position {}, distance {:.2}, {} frames -> {}",
            voice_index + 1,
            voice.phone,
            voice.position,
            voice.distance,
            voice.frame_count,
            path.display()
        );

        let pb = multi
            .map(|multi| {
                create_voice_progress_bar(multi, voice_index, voice_count, voice.frame_count)
            })
            .transpose()?;

        let stats = unpack_voice(&mut reader, &voice, &path, codec, &mut block, pb.as_ref())
            .with_context(|| format!("voice {}/{voice_count} ({file_name})", voice_index + 1));
        if stats.is_err() {
            discard_partial(&path);
        }

        if let Some(pb) = &pb {
            match &stats {
                Ok(_) => pb.finish_with_message(file_name.clone()),
                Err(_) => pb.abandon_with_message("failed"),
            }
        }
        let stats = stats?;

        if let Some(manifest) = manifest.as_mut() {
            manifest.push_voice(&voice, stats.silent_frames, file_name);
        }
        voices.push(VoiceSummary {
            path,
            frames: voice.frame_count,
            silent_frames: stats.silent_frames,
        });
    }

    let frames_read = reader.frames_read();
    let bytes_read = reader.finish()?;

    if let Some(manifest) = manifest {
        manifest.write_to(&output_dir)?;
    }

    Ok(UnpackSummary {
        output_dir,
        voices,
        frames_read,
        bytes_read,
    })
}

/// Removes the WAV of a voice that failed part way, whose body no longer
/// matches its header.
fn discard_partial(path: &Path) {
    match fs::remove_file(path) {
        Ok(()) => debug!("Removed incomplete {}", path.display()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
        Err(e) => warn!("Failed to remove incomplete {}: {e}", path.display()),
    }
}

fn unpack_voice<R: Read, C: Codec>(
    reader: &mut ContainerReader<R>,
    voice: &VoiceEntry,
    path: &Path,
    codec: &C,
    block: &mut PcmBlock,
    pb: Option<&ProgressBar>,
) -> Result<FrameStats> {
    let mut wav = WAVWriter::create(path, voice.frame_count)?;
    let mut decoder = FrameDecoder::open(codec)?;

    for frame_index in 0..voice.frame_count {
        let frame = reader.read_frame()?;
        decoder
            .decode(&frame, block)
            .with_context(|| format!("frame {frame_index}"))?;
        wav.write_block(block)?;

        if let Some(pb) = pb {
            pb.inc(1);
        }
    }

    wav.finish()?;
    let wav_stats = wav.stats();
    ensure!(
        wav_stats.is_complete(),
        "wrote {} data bytes but header declares {}",
        wav_stats.data_written,
        wav_stats.declared_data_size
    );

    let stats = decoder.finish();
    debug!(
        "{}: {} decoded, {} silent, {}",
        path.display(),
        stats.decoded_frames,
        stats.silent_frames,
        frames_duration_str(stats.total_frames())
    );
    Ok(stats)
}
