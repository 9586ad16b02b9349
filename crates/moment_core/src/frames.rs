//! Ordered frame access over a parsed timeline.

use serde_json::Value;

use crate::error::{MomentError, Result};
use crate::models::Frame;

/// Frames of one match, totally ordered by timestamp.
#[derive(Debug, Clone, Default)]
pub struct FrameStream {
    frames: Vec<Frame>,
}

impl FrameStream {
    pub fn new(mut frames: Vec<Frame>) -> Self {
        frames.sort_by_key(|f| f.timestamp_ms);
        Self { frames }
    }

    /// Parse a timeline record (`{"info": {"frames": [...]}}`).
    ///
    /// Frames without a timestamp are skipped with a warning.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(&value)
    }

    pub fn from_value(value: &Value) -> Result<Self> {
        if !value.is_object() {
            return Err(MomentError::MalformedInput("timeline record is not an object".into()));
        }
        let info = value.get("info").unwrap_or(value);

        let mut frames = Vec::new();
        if let Some(raw_frames) = info.get("frames").and_then(Value::as_array) {
            for (idx, raw) in raw_frames.iter().enumerate() {
                match Frame::from_value(raw) {
                    Ok(frame) => frames.push(frame),
                    Err(e) => log::warn!("Skipping frame #{}: {}", idx, e),
                }
            }
        }

        Ok(Self::new(frames))
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn event_count(&self) -> usize {
        self.frames.iter().map(|f| f.events.len()).sum()
    }

    /// Closest frame to `timestamp_minutes`, earliest on ties.
    pub fn nearest(&self, timestamp_minutes: f64) -> Option<(usize, &Frame)> {
        let target_ms = timestamp_minutes * 60_000.0;
        let mut best: Option<(usize, &Frame, f64)> = None;

        for (idx, frame) in self.frames.iter().enumerate() {
            let diff = (frame.timestamp_ms as f64 - target_ms).abs();
            match best {
                Some((_, _, best_diff)) if diff >= best_diff => {}
                _ => best = Some((idx, frame, diff)),
            }
        }

        best.map(|(idx, frame, _)| (idx, frame))
    }

    /// Last frame whose timestamp is not after `timestamp_ms`.
    pub fn frame_at_or_before(&self, timestamp_ms: u64) -> Option<&Frame> {
        let idx = self.frames.partition_point(|f| f.timestamp_ms <= timestamp_ms);
        idx.checked_sub(1).map(|i| &self.frames[i])
    }
}
