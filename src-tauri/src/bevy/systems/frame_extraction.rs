//! Frame extraction system
//!
//! This module handles extracting rendered frames from the GPU and
//! preparing them for transfer to the Tauri frontend.

use bevy::{prelude::*, render::renderer::RenderDevice, time::Time};

use crate::bevy::plugins::image_copy::CapturedFrame;
use crate::bevy::resources::{
    FrameBufferRes, FrameCount, FrameRateLimiter, FrameTimings, MainWorldReceiver, PerfStatsRes,
    PreRollFrames,
};
use crate::config::performance::*;
use crate::tauri_bridge::shared_state::lock;
use crate::tauri_bridge::Frame;

/// Extract and process frame data from the render pipeline
pub fn extract_and_process_frame(
    receiver: Res<MainWorldReceiver>,
    buffer: Option<Res<FrameBufferRes>>,
    perf_stats: Option<Res<PerfStatsRes>>,
    mut count: ResMut<FrameCount>,
    mut pre_roll: ResMut<PreRollFrames>,
    mut timings: ResMut<FrameTimings>,
    mut frame_limiter: ResMut<FrameRateLimiter>,
    time: Res<Time>,
) {
    let Some(b) = buffer else { return };

    // Wait for scene to be fully rendered
    if pre_roll.0 > 0 {
        while receiver.try_recv().is_ok() {}
        pre_roll.0 -= 1;
        if pre_roll.0 % 10 == 0 && pre_roll.0 > 0 {
            debug!("Pre-roll frames remaining: {}", pre_roll.0);
        }
        return;
    }

    // Frame rate limiting - skip if not enough time has passed
    let now = std::time::Instant::now();
    let elapsed = now.duration_since(frame_limiter.last_frame_time);
    if elapsed < frame_limiter.min_frame_interval {
        // Drain the receiver but don't process - too early for next frame
        while receiver.try_recv().is_ok() {}
        return;
    }
    frame_limiter.last_frame_time = now;

    let frame_start = std::time::Instant::now();

    // Keep only the latest frame from the render world
    let receive_start = std::time::Instant::now();
    let mut captured = None;
    while let Ok(data) = receiver.try_recv() {
        captured = Some(data);
    }
    let receive_time = receive_start.elapsed().as_secs_f64() * 1000.0;

    let Some(captured) = captured else { return };

    // Remove row padding and store raw RGBA data
    let process_start = std::time::Instant::now();
    let Some(frame) = remove_row_padding(captured) else {
        return;
    };
    let process_time = process_start.elapsed().as_secs_f64() * 1000.0;
    let data_size = frame.rgba.len();

    if let Err(err) = b.0.publish(frame) {
        warn!("Dropping frame: {err}");
        return;
    }
    count.0 += 1;

    let total_time = frame_start.elapsed().as_secs_f64() * 1000.0;
    timings.frame_times.push(total_time);

    // Keep only last N samples for averaging
    if timings.frame_times.len() > FRAME_TIMING_SAMPLES {
        timings.frame_times.remove(0);
    }

    // Update performance stats
    if let Some(perf_res) = &perf_stats {
        if let Ok(mut stats) = lock(&perf_res.0 .0) {
            stats.gpu_transfer_ms = receive_time;
            stats.data_processing_ms = process_time;
            stats.frame_encoding_ms = total_time;
            stats.frame_count = count.0;
            stats.data_size_kb = data_size as f64 / 1024.0;

            // Calculate FPS from frame times
            if !timings.frame_times.is_empty() {
                let avg_time =
                    timings.frame_times.iter().sum::<f64>() / timings.frame_times.len() as f64;
                stats.bevy_fps = if avg_time > 0.0 { 1000.0 / avg_time } else { 0.0 };
            }
        }
    }

    // Log detailed stats periodically
    let current_time = time.elapsed_secs_f64();
    if current_time - timings.last_print_time >= STATS_PRINT_INTERVAL {
        let avg_time = timings.frame_times.iter().sum::<f64>() / timings.frame_times.len() as f64;
        let max_time = timings.frame_times.iter().cloned().fold(0.0f64, f64::max);
        let min_time = timings.frame_times.iter().cloned().fold(f64::MAX, f64::min);

        info!(
            "Frame {} | Receive: {:.2}ms | Process: {:.2}ms | Total: {:.2}ms | Avg: {:.2}ms (Min: {:.2}ms, Max: {:.2}ms) | Size: {:.1}KB",
            count.0,
            receive_time,
            process_time,
            total_time,
            avg_time,
            min_time,
            max_time,
            data_size as f64 / 1024.0
        );
        timings.last_print_time = current_time;
    }
}

/// Remove GPU buffer row padding alignment, returning a tightly packed frame
fn remove_row_padding(captured: CapturedFrame) -> Option<Frame> {
    let CapturedFrame {
        width,
        height,
        data,
    } = captured;
    if data.is_empty() {
        return None;
    }

    let row_bytes = width as usize * 4;
    let aligned_row_bytes = RenderDevice::align_copy_bytes_per_row(row_bytes);

    let rgba = if row_bytes == aligned_row_bytes {
        // No padding, use as-is
        data
    } else {
        data.chunks(aligned_row_bytes)
            .take(height as usize)
            .flat_map(|row| &row[..row_bytes.min(row.len())])
            .cloned()
            .collect()
    };

    if rgba.len() != row_bytes * height as usize {
        warn!(
            "Discarding short frame: {} bytes for {}x{}",
            rgba.len(),
            width,
            height
        );
        return None;
    }

    Some(Frame {
        width,
        height,
        rgba,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn padding_is_stripped_per_row() {
        // 3 px * 4 bytes = 12 bytes per row, padded to the 256 byte alignment
        let aligned = RenderDevice::align_copy_bytes_per_row(12);
        assert_eq!(aligned, 256);

        let mut data = vec![0u8; aligned * 2];
        data[..12].fill(1);
        data[aligned..aligned + 12].fill(2);

        let frame = remove_row_padding(CapturedFrame {
            width: 3,
            height: 2,
            data,
        })
        .unwrap();
        assert_eq!((frame.width, frame.height), (3, 2));
        assert_eq!(&frame.rgba[..12], &[1; 12]);
        assert_eq!(&frame.rgba[12..], &[2; 12]);
    }

    #[test]
    fn aligned_rows_are_kept_as_is() {
        // 64 px * 4 bytes = 256 bytes, already aligned
        let frame = remove_row_padding(CapturedFrame {
            width: 64,
            height: 2,
            data: vec![7; 512],
        })
        .unwrap();
        assert_eq!(frame.rgba.len(), 512);
    }

    #[test]
    fn empty_or_truncated_frames_are_dropped() {
        assert!(remove_row_padding(CapturedFrame {
            width: 3,
            height: 2,
            data: Vec::new(),
        })
        .is_none());
        assert!(remove_row_padding(CapturedFrame {
            width: 64,
            height: 2,
            data: vec![0; 256],
        })
        .is_none());
    }
}
