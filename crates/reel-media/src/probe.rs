//! FFprobe metadata lookup.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::process::Stdio;
use tokio::process::Command;

use crate::error::{MediaError, MediaResult};

/// What the planner needs to know about a source video.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VideoMetadata {
    /// Duration in seconds, 0 when ffprobe did not report one
    pub duration: f64,
    pub width: u32,
    pub height: u32,
    pub fps: f64,
    pub codec: String,
    /// File size in bytes
    pub size: u64,
}

#[derive(Debug, Deserialize)]
struct ProbeOutput {
    #[serde(default)]
    format: Option<ProbeFormat>,
    #[serde(default)]
    streams: Vec<ProbeStream>,
}

#[derive(Debug, Deserialize)]
struct ProbeFormat {
    duration: Option<String>,
    size: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ProbeStream {
    codec_type: String,
    codec_name: Option<String>,
    width: Option<u32>,
    height: Option<u32>,
    duration: Option<String>,
    avg_frame_rate: Option<String>,
    r_frame_rate: Option<String>,
}

/// Probe a video file with ffprobe.
pub async fn probe_video(path: impl AsRef<Path>) -> MediaResult<VideoMetadata> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(MediaError::FileNotFound(path.to_path_buf()));
    }

    which::which("ffprobe").map_err(|_| MediaError::FfprobeNotFound)?;

    tracing::debug!(path = %path.display(), "Probing video");

    let output = Command::new("ffprobe")
        .args([
            "-v",
            "quiet",
            "-print_format",
            "json",
            "-show_format",
            "-show_streams",
        ])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .await?;

    if !output.status.success() {
        return Err(MediaError::ffprobe_failed(
            format!("ffprobe exited with {}", output.status),
            Some(String::from_utf8_lossy(&output.stderr).to_string()),
        ));
    }

    parse_probe_output(&output.stdout)
}

/// Video duration in seconds.
pub async fn get_duration(path: impl AsRef<Path>) -> MediaResult<f64> {
    let metadata = probe_video(path).await?;
    Ok(metadata.duration)
}

/// Parse ffprobe's JSON report.
///
/// The container duration wins; the video stream's own duration is used when
/// the container does not carry one.
pub fn parse_probe_output(json: &[u8]) -> MediaResult<VideoMetadata> {
    let probe: ProbeOutput = serde_json::from_slice(json)?;

    let video = probe
        .streams
        .iter()
        .find(|s| s.codec_type == "video")
        .ok_or_else(|| MediaError::invalid_video("no video stream found"))?;

    let format_duration = probe
        .format
        .as_ref()
        .and_then(|f| f.duration.as_deref())
        .and_then(parse_seconds);
    let duration = format_duration
        .or_else(|| video.duration.as_deref().and_then(parse_seconds))
        .unwrap_or(0.0);

    let size = probe
        .format
        .as_ref()
        .and_then(|f| f.size.as_deref())
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(0);

    let fps = video
        .avg_frame_rate
        .as_deref()
        .and_then(parse_frame_rate)
        .or_else(|| video.r_frame_rate.as_deref().and_then(parse_frame_rate))
        .unwrap_or(30.0);

    Ok(VideoMetadata {
        duration,
        width: video.width.unwrap_or(0),
        height: video.height.unwrap_or(0),
        fps,
        codec: video.codec_name.clone().unwrap_or_default(),
        size,
    })
}

fn parse_seconds(s: &str) -> Option<f64> {
    s.parse::<f64>().ok().filter(|d| d.is_finite() && *d >= 0.0)
}

/// Parse a frame rate such as "30/1" or "29.97". "0/0" is treated as absent.
fn parse_frame_rate(s: &str) -> Option<f64> {
    if let Some((num, den)) = s.split_once('/') {
        let num: f64 = num.parse().ok()?;
        let den: f64 = den.parse().ok()?;
        return (den > 0.0 && num > 0.0).then_some(num / den);
    }
    s.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "streams": [
            {"codec_type": "audio", "codec_name": "aac"},
            {"codec_type": "video", "codec_name": "h264", "width": 1920, "height": 1080,
             "duration": "611.2", "avg_frame_rate": "30000/1001", "r_frame_rate": "30/1"}
        ],
        "format": {"duration": "612.480000", "size": "104857600"}
    }"#;

    #[test]
    fn test_parse_frame_rate() {
        assert!((parse_frame_rate("30/1").unwrap() - 30.0).abs() < 0.01);
        assert!((parse_frame_rate("30000/1001").unwrap() - 29.97).abs() < 0.01);
        assert!((parse_frame_rate("25").unwrap() - 25.0).abs() < 0.01);
        assert!(parse_frame_rate("0/0").is_none());
    }

    #[test]
    fn test_parse_probe_output() {
        let meta = parse_probe_output(SAMPLE.as_bytes()).unwrap();
        assert!((meta.duration - 612.48).abs() < 1e-9);
        assert_eq!(meta.width, 1920);
        assert_eq!(meta.codec, "h264");
        assert_eq!(meta.size, 104_857_600);
        assert!((meta.fps - 29.97).abs() < 0.01);
    }

    #[test]
    fn test_stream_duration_fallback() {
        let json = r#"{
            "streams": [{"codec_type": "video", "duration": "42.5", "avg_frame_rate": "0/0", "r_frame_rate": "24/1"}],
            "format": {}
        }"#;
        let meta = parse_probe_output(json.as_bytes()).unwrap();
        assert_eq!(meta.duration, 42.5);
        assert_eq!(meta.fps, 24.0);
    }

    #[test]
    fn test_missing_duration_is_zero() {
        let json = r#"{"streams": [{"codec_type": "video"}]}"#;
        let meta = parse_probe_output(json.as_bytes()).unwrap();
        assert_eq!(meta.duration, 0.0);
    }

    #[test]
    fn test_audio_only_rejected() {
        let json = r#"{"streams": [{"codec_type": "audio"}], "format": {"duration": "10"}}"#;
        let err = parse_probe_output(json.as_bytes()).unwrap_err();
        assert!(matches!(err, MediaError::InvalidVideo(_)));
    }

    #[test]
    fn test_garbage_output() {
        let err = parse_probe_output(b"not json").unwrap_err();
        assert!(matches!(err, MediaError::JsonParse(_)));
    }

    #[tokio::test]
    async fn test_missing_file() {
        let err = get_duration("/definitely/not/here.mp4").await.unwrap_err();
        assert!(matches!(err, MediaError::FileNotFound(_)));
    }

    #[test]
    fn test_empty_file_is_not_a_video() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let result = tokio_test::block_on(probe_video(file.path()));
        // Either ffprobe is missing or it rejects the empty file
        assert!(result.is_err());
    }
}
