use glam::f32::Vec2;

/// One synthetic bird: the shared path plus its own offsets, stored per axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Bird {
    // sequential id starting from 0
    pub id: usize,
    lons: Vec<f32>,
    lats: Vec<f32>,
}

impl Bird {
    /// Creates a new [`Bird`] by displacing every path sample by the matching offsets.
    ///
    /// Offsets shorter than the path leave the remaining samples undisplaced.
    pub fn from_path(id: usize, path: &[Vec2], offsets_lon: &[f32], offsets_lat: &[f32]) -> Self {
        let lons = path
            .iter()
            .enumerate()
            .map(|(k, p)| p.x + offsets_lon.get(k).copied().unwrap_or(0.))
            .collect();
        let lats = path
            .iter()
            .enumerate()
            .map(|(k, p)| p.y + offsets_lat.get(k).copied().unwrap_or(0.))
            .collect();

        Bird { id, lons, lats }
    }

    pub fn len(&self) -> usize {
        self.lons.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lons.is_empty()
    }

    pub fn lons(&self) -> &[f32] {
        &self.lons
    }

    pub fn lats(&self) -> &[f32] {
        &self.lats
    }

    /// Location at `frame`, clamped to the last sample
    pub fn position(&self, frame: usize) -> Vec2 {
        if self.is_empty() {
            return Vec2::ZERO;
        }
        let i = frame.min(self.len() - 1);
        Vec2::new(self.lons[i], self.lats[i])
    }

    /// Sliding window over the samples `[frame - trail_length, frame]`, clamped at
    /// the start of the sequence, so at most `trail_length + 1` samples.
    /// Frames past the end behave like the last frame.
    pub fn trail(&self, frame: usize, trail_length: usize) -> (&[f32], &[f32]) {
        if self.is_empty() {
            return (&[], &[]);
        }
        let frame = frame.min(self.len() - 1);
        let start = frame.saturating_sub(trail_length);

        (&self.lons[start..=frame], &self.lats[start..=frame])
    }

    /// The trail as points, handy for drawing a polyline
    pub fn trail_points(&self, frame: usize, trail_length: usize) -> Vec<Vec2> {
        let (lons, lats) = self.trail(frame, trail_length);
        lons.iter()
            .zip(lats.iter())
            .map(|(x, y)| Vec2::new(*x, *y))
            .collect()
    }
}
