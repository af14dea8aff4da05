use glam::Vec2;
use itertools::Itertools;

use crate::{
    error::{MigrationError, Result},
    math_helpers::{lerp, Bounds},
};

/// Named stop on the migration route, in degrees
#[derive(Debug, Clone, PartialEq)]
pub struct Waypoint {
    pub name: String,
    pub lon: f32,
    pub lat: f32,
}

impl Waypoint {
    pub fn new(name: &str, lon: f32, lat: f32) -> Self {
        Waypoint {
            name: name.to_owned(),
            lon,
            lat,
        }
    }

    #[inline]
    pub fn location(&self) -> Vec2 {
        Vec2::new(self.lon, self.lat)
    }
}

/// Polyline through the waypoints, measured in planar degree space.
#[derive(Debug, Clone)]
pub struct Route {
    waypoints: Vec<Waypoint>,
    /// cumulative length at each waypoint, starts at 0
    cumulative: Vec<f32>,
}

impl Route {
    pub fn new(waypoints: Vec<Waypoint>) -> Result<Self> {
        if waypoints.len() < 2 {
            return Err(MigrationError::EmptyRoute(waypoints.len()));
        }

        let cumulative = cumulative_lengths(&waypoints);
        let total = cumulative[cumulative.len() - 1];

        if total <= 0. || !total.is_finite() {
            return Err(MigrationError::DegenerateRoute);
        }

        Ok(Route {
            waypoints,
            cumulative,
        })
    }

    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    pub fn start(&self) -> &Waypoint {
        &self.waypoints[0]
    }

    pub fn destination(&self) -> &Waypoint {
        &self.waypoints[self.waypoints.len() - 1]
    }

    pub fn length(&self) -> f32 {
        self.cumulative[self.cumulative.len() - 1]
    }

    /// Point at normalized distance `t` along the route, `t` is clamped to [0, 1]
    pub fn interpolate(&self, t: f32) -> Vec2 {
        let t = t.clamp(0., 1.);
        let target = t * self.length();

        // first segment whose end lies at or beyond the target distance
        let seg = self
            .cumulative
            .iter()
            .skip(1)
            .position(|&c| c >= target)
            .unwrap_or(self.cumulative.len() - 2);

        let seg_start = self.cumulative[seg];
        let seg_len = self.cumulative[seg + 1] - seg_start;
        let a = self.waypoints[seg].location();
        let b = self.waypoints[seg + 1].location();

        if seg_len <= 0. {
            return a;
        }

        lerp(a, b, (target - seg_start) / seg_len)
    }

    /// Evenly parameterised path with `num_frames + 1` samples, first and last
    /// sample sitting on the first and last waypoint.
    pub fn smooth_path(&self, num_frames: usize) -> Vec<Vec2> {
        if num_frames == 0 {
            return vec![self.start().location()];
        }

        (0..=num_frames)
            .map(|i| self.interpolate(i as f32 / num_frames as f32))
            .collect()
    }

    pub fn bounds(&self) -> Bounds {
        // a route always has at least two waypoints
        Bounds::from_points(self.waypoints.iter().map(Waypoint::location)).unwrap_or(Bounds {
            min_lon: 0.,
            min_lat: 0.,
            max_lon: 0.,
            max_lat: 0.,
        })
    }
}

fn cumulative_lengths(waypoints: &[Waypoint]) -> Vec<f32> {
    let mut cumulative = Vec::with_capacity(waypoints.len());
    cumulative.push(0.);
    for (a, b) in waypoints.iter().tuple_windows() {
        let last = cumulative[cumulative.len() - 1];
        cumulative.push(last + a.location().distance(b.location()));
    }
    cumulative
}

impl Default for Route {
    /// Autumn route from southern Siberia down to the Guangdong coast
    fn default() -> Self {
        let waypoints = vec![
            Waypoint::new("Siberian Start", 108.0, 52.0),
            Waypoint::new("North China Plain", 117.0, 39.0),
            Waypoint::new("Yangtze River Delta", 121.0, 31.0),
            Waypoint::new("Poyang Lake", 116.0, 29.0),
            Waypoint::new("Guangdong Coast (Destination)", 113.5, 22.5),
        ];

        let cumulative = cumulative_lengths(&waypoints);

        Route {
            waypoints,
            cumulative,
        }
    }
}
