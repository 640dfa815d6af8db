use anyhow::Result;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};

pub fn create_voice_progress_bar(
    multi: &MultiProgress,
    voice_index: usize,
    voice_count: usize,
    frame_count: u16,
) -> Result<ProgressBar> {
    let pb = multi.add(ProgressBar::new(frame_count as u64));
    pb.set_style(ProgressStyle::with_template(
        "{prefix} {bar:40.cyan/blue} {pos}/{len} frames ({percent}%) {msg}",
    )?);
    pb.set_prefix(format!("voice {}/{voice_count}", voice_index + 1));
    pb.set_message("decoding");
    Ok(pb)
}
