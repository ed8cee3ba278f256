use std::path::Path;
use std::process::Command;

use crate::error::{AppError, AppResult};

/// Sample rate whisper.cpp expects (16 kHz mono f32).
pub const WHISPER_SAMPLE_RATE: u32 = 16_000;

/// Decodes an audio file into 16 kHz mono f32 PCM.
///
/// WAV containers are read directly; every other supported container is
/// converted through `ffmpeg` into a temporary WAV first.
pub fn decode_audio(path: &Path) -> AppResult<Vec<f32>> {
    if !path.exists() {
        return Err(AppError::NotFound {
            path: path.to_path_buf(),
        });
    }

    let is_wav = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("wav"));

    if is_wav {
        read_wav(path)
    } else {
        let converted = convert_with_ffmpeg(path)?;
        read_wav(&converted)
    }
}

fn read_wav(path: &Path) -> AppResult<Vec<f32>> {
    let mut reader = hound::WavReader::open(path)
        .map_err(|error| AppError::Audio(format!("{}: {error}", path.display())))?;
    let spec = reader.spec();

    let samples: Vec<f32> = match spec.sample_format {
        hound::SampleFormat::Int => {
            if spec.bits_per_sample != 16 {
                return Err(AppError::Audio(format!(
                    "{}: unsupported bit depth {} (expected 16-bit PCM)",
                    path.display(),
                    spec.bits_per_sample
                )));
            }
            reader
                .samples::<i16>()
                .map(|sample| sample.map(|value| f32::from(value) / f32::from(i16::MAX)))
                .collect::<Result<_, _>>()
                .map_err(|error| AppError::Audio(format!("{}: {error}", path.display())))?
        }
        hound::SampleFormat::Float => reader
            .samples::<f32>()
            .collect::<Result<_, _>>()
            .map_err(|error| AppError::Audio(format!("{}: {error}", path.display())))?,
    };

    let mono = downmix(&samples, spec.channels);
    Ok(resample_linear(
        &mono,
        spec.sample_rate,
        WHISPER_SAMPLE_RATE,
    ))
}

/// Averages interleaved channels into a mono stream.
fn downmix(samples: &[f32], channels: u16) -> Vec<f32> {
    if channels <= 1 {
        return samples.to_vec();
    }

    let channels = usize::from(channels);
    samples
        .chunks_exact(channels)
        .map(|frame| frame.iter().sum::<f32>() / channels as f32)
        .collect()
}

/// Linear-interpolation resampler; adequate for speech input.
fn resample_linear(samples: &[f32], source_rate: u32, target_rate: u32) -> Vec<f32> {
    if source_rate == target_rate || samples.is_empty() {
        return samples.to_vec();
    }

    let ratio = f64::from(target_rate) / f64::from(source_rate);
    let new_len = (samples.len() as f64 * ratio) as usize;
    let mut resampled = Vec::with_capacity(new_len);

    for i in 0..new_len {
        let src_idx = i as f64 / ratio;
        let idx_floor = src_idx.floor() as usize;
        let idx_ceil = (idx_floor + 1).min(samples.len() - 1);
        let frac = (src_idx - idx_floor as f64) as f32;
        resampled.push(samples[idx_floor] * (1.0 - frac) + samples[idx_ceil] * frac);
    }

    resampled
}

fn convert_with_ffmpeg(path: &Path) -> AppResult<tempfile::TempPath> {
    let ffmpeg = which::which("ffmpeg").map_err(|_| AppError::BinaryMissing {
        binary: "ffmpeg".to_owned(),
    })?;

    // TempPath removes the converted file once the caller drops it.
    let wav_path = tempfile::Builder::new()
        .prefix("voxscribe-decode-")
        .suffix(".wav")
        .tempfile()?
        .into_temp_path();

    let output = Command::new(&ffmpeg)
        .arg("-y")
        .arg("-i")
        .arg(path)
        .arg("-ar")
        .arg(WHISPER_SAMPLE_RATE.to_string())
        .arg("-ac")
        .arg("1")
        .arg("-f")
        .arg("wav")
        .arg(&wav_path)
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(AppError::Audio(format!(
            "ffmpeg failed on {}: {}",
            path.display(),
            stderr.lines().last().unwrap_or("unknown error")
        )));
    }

    Ok(wav_path)
}
