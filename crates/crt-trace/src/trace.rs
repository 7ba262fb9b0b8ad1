use std::collections::VecDeque;

use crt_core::BeamPosition;
use serde::{Deserialize, Serialize};

/// One recorded beam position, stamped with wall-clock time in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TracePoint {
    pub position: BeamPosition,
    pub captured_at: f64,
}

impl TracePoint {
    pub fn new(position: BeamPosition, captured_at: f64) -> Self {
        Self { position, captured_at }
    }

    /// Seconds elapsed since capture. Negative if `now` precedes the capture.
    pub fn age(&self, now: f64) -> f64 {
        now - self.captured_at
    }

    pub fn is_expired(&self, now: f64, persistence_seconds: f64) -> bool {
        self.age(now) >= persistence_seconds
    }

    /// `max(0, intensity - age / persistence)`. A point stamped after `now`
    /// is treated as age zero.
    pub fn opacity(&self, now: f64, persistence_seconds: f64, intensity_factor: f64) -> f64 {
        let age = self.age(now).max(0.0);
        (intensity_factor - age / persistence_seconds).max(0.0)
    }
}

/// A retained point together with its current opacity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VisibleTracePoint {
    pub position: BeamPosition,
    pub opacity: f64,
}

/// Phosphor trail: recent beam positions, oldest first.
///
/// Growth is bounded only by [`TraceBuffer::evict_expired`]; there is no
/// capacity limit. Persistence is passed per call so a changed setting
/// applies on the next eviction pass.
#[derive(Debug, Clone, Default)]
pub struct TraceBuffer {
    points: VecDeque<TracePoint>,
}

impl TraceBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a new point. Never rejects, never deduplicates.
    pub fn record(&mut self, position: BeamPosition, now: f64) {
        self.points.push_back(TracePoint::new(position, now));
    }

    /// Drop every point whose age is `>= persistence_seconds`, keeping order.
    /// Returns the number of points removed.
    pub fn evict_expired(&mut self, now: f64, persistence_seconds: f64) -> usize {
        let before = self.points.len();
        self.points.retain(|p| !p.is_expired(now, persistence_seconds));
        let evicted = before - self.points.len();
        if evicted > 0 {
            log::trace!("evicted {} trace points, {} retained", evicted, self.points.len());
        }
        evicted
    }

    /// Every retained point with its opacity, oldest first. Opacity is never
    /// negative; fully faded points are included with opacity `0`.
    pub fn visible_points(
        &self,
        now: f64,
        persistence_seconds: f64,
        intensity_factor: f64,
    ) -> impl Iterator<Item = VisibleTracePoint> + '_ {
        self.points.iter().map(move |p| VisibleTracePoint {
            position: p.position,
            opacity: p.opacity(now, persistence_seconds, intensity_factor),
        })
    }

    /// Like [`TraceBuffer::visible_points`] but without fully faded points.
    pub fn drawable_points(
        &self,
        now: f64,
        persistence_seconds: f64,
        intensity_factor: f64,
    ) -> Vec<VisibleTracePoint> {
        self.visible_points(now, persistence_seconds, intensity_factor)
            .filter(|v| v.opacity > 0.0)
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &TracePoint> {
        self.points.iter()
    }

    pub fn oldest(&self) -> Option<&TracePoint> {
        self.points.front()
    }

    pub fn newest(&self) -> Option<&TracePoint> {
        self.points.back()
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }
}
