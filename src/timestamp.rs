use vcreport::structs::frame::{SAMPLE_RATE, SAMPLES_PER_FRAME};

pub fn time_str(sec: f64) -> String {
    let ms = sec * 1000f64;
    let hours = (ms / 3600000f64) as u64;
    let minutes = ((ms % 3600000f64) / 60000f64) as u64;
    let seconds = ((ms % 60000f64) / 1000f64) as u64;
    let milliseconds = (ms % 1000f64) as u64;

    format!(
        "{hours:0width$}:{minutes:02}:{seconds:02}.{milliseconds:03}",
        width = if hours >= 100 { 0 } else { 2 }
    )
}

/// Playback length of `frames` 20 ms frames.
pub fn frames_duration_str(frames: u64) -> String {
    let samples = frames * SAMPLES_PER_FRAME as u64;
    time_str(samples as f64 / SAMPLE_RATE as f64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_frame_durations() {
        assert_eq!(frames_duration_str(0), "00:00:00.000");
        assert_eq!(frames_duration_str(50), "00:00:01.000");
        assert_eq!(frames_duration_str(75), "00:00:01.500");
        assert_eq!(frames_duration_str(3000), "00:01:00.000");
        assert_eq!(frames_duration_str(180_000), "01:00:00.000");
    }
}
