use std::f32::consts::PI;

use glam::Vec2;

use crate::options::WindowSize;

/// `n` evenly spaced samples over `[start, stop]`, both ends included
pub fn linspace(start: f32, stop: f32, n: usize) -> Vec<f32> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f32;
            (0..n)
                .map(|i| {
                    // pin the last sample, accumulated error would miss `stop`
                    if i == n - 1 {
                        stop
                    } else {
                        start + step * i as f32
                    }
                })
                .collect()
        }
    }
}

/// Noise envelope over one full sine period, `sin(linspace(0, 2π, n)) + offset`.
///
/// With the default offset of 0.5 the envelope starts and ends at 0.5, peaks at
/// 1.5 a quarter of the way in and bottoms out at -0.5 at three quarters.
pub fn envelope(n: usize, offset: f32) -> Vec<f32> {
    linspace(0., 2. * PI, n)
        .into_iter()
        .map(|x| x.sin() + offset)
        .collect()
}

#[inline]
pub fn lerp(a: Vec2, b: Vec2, t: f32) -> Vec2 {
    a + (b - a) * t
}

/// Axis aligned box in (lon, lat) degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_lon: f32,
    pub min_lat: f32,
    pub max_lon: f32,
    pub max_lat: f32,
}

impl Bounds {
    /// Smallest box containing all points, None for an empty input
    pub fn from_points<I: IntoIterator<Item = Vec2>>(points: I) -> Option<Self> {
        points.into_iter().fold(None, |acc, p| {
            Some(match acc {
                None => Bounds {
                    min_lon: p.x,
                    min_lat: p.y,
                    max_lon: p.x,
                    max_lat: p.y,
                },
                Some(b) => Bounds {
                    min_lon: b.min_lon.min(p.x),
                    min_lat: b.min_lat.min(p.y),
                    max_lon: b.max_lon.max(p.x),
                    max_lat: b.max_lat.max(p.y),
                },
            })
        })
    }

    pub fn with_margin(&self, margin: f32) -> Self {
        Bounds {
            min_lon: self.min_lon - margin,
            min_lat: self.min_lat - margin,
            max_lon: self.max_lon + margin,
            max_lat: self.max_lat + margin,
        }
    }

    pub fn width(&self) -> f32 {
        self.max_lon - self.min_lon
    }

    pub fn height(&self) -> f32 {
        self.max_lat - self.min_lat
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.min_lon && p.x <= self.max_lon && p.y >= self.min_lat && p.y <= self.max_lat
    }
}

/// Linear mapping of a geographic box onto the window rectangle.
///
/// Both axes are stretched independently, like a plot with fixed x and y limits.
#[derive(Debug, Clone, Copy)]
pub struct MapProjection {
    pub bounds: Bounds,
    pub window: WindowSize,
}

impl MapProjection {
    pub fn new(bounds: Bounds, window: WindowSize) -> Self {
        MapProjection { bounds, window }
    }

    pub fn to_screen(&self, geo: Vec2) -> Vec2 {
        let tx = (geo.x - self.bounds.min_lon) / self.bounds.width().max(f32::EPSILON);
        let ty = (geo.y - self.bounds.min_lat) / self.bounds.height().max(f32::EPSILON);

        Vec2::new(
            self.window.win_left as f32 + tx * self.window.win_w as f32,
            self.window.win_bottom as f32 + ty * self.window.win_h as f32,
        )
    }

    pub fn to_geo(&self, screen: Vec2) -> Vec2 {
        let tx = (screen.x - self.window.win_left as f32) / self.window.win_w as f32;
        let ty = (screen.y - self.window.win_bottom as f32) / self.window.win_h as f32;

        Vec2::new(
            self.bounds.min_lon + tx * self.bounds.width(),
            self.bounds.min_lat + ty * self.bounds.height(),
        )
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use glam::Vec2;
    use rstest::rstest;

    use super::{envelope, lerp, linspace, Bounds, MapProjection};
    use crate::options::get_window_size;

    macro_rules! assert_eqf32 {
        ($x:expr, $y:expr) => {
            assert_relative_eq!($x, $y, epsilon = 1e-3_f32)
        };
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(301, 301)]
    fn linspace_length(#[case] n: usize, #[case] expected: usize) {
        assert_eq!(linspace(0., 1., n).len(), expected);
    }

    #[test]
    fn linspace_includes_both_ends() {
        let xs = linspace(-1., 3., 5);
        assert_eq!(xs, vec![-1., 0., 1., 2., 3.]);
    }

    #[test]
    fn envelope_shape() {
        let env = envelope(301, 0.5);

        assert_eqf32!(env[0], 0.5);
        assert_eqf32!(env[300], 0.5);
        assert_eqf32!(env[75], 1.5);
        assert_eqf32!(env[150], 0.5);
        assert_eqf32!(env[225], -0.5);
    }

    #[test]
    fn lerp_midpoint() {
        let m = lerp(Vec2::new(0., 0.), Vec2::new(4., -2.), 0.5);
        assert_eqf32!(m.x, 2.);
        assert_eqf32!(m.y, -1.);
    }

    #[test]
    fn bounds_with_margin() {
        let b = Bounds::from_points(vec![Vec2::new(108., 52.), Vec2::new(113.5, 22.5)])
            .unwrap()
            .with_margin(2.);

        assert_eqf32!(b.min_lon, 106.);
        assert_eqf32!(b.max_lon, 115.5);
        assert_eqf32!(b.min_lat, 20.5);
        assert_eqf32!(b.max_lat, 54.);
    }

    #[test]
    fn bounds_of_nothing() {
        assert!(Bounds::from_points(Vec::<Vec2>::new()).is_none());
    }

    #[test]
    fn projection_maps_corners() {
        let bounds = Bounds {
            min_lon: 100.,
            min_lat: 20.,
            max_lon: 120.,
            max_lat: 60.,
        };
        let proj = MapProjection::new(bounds, get_window_size(400, 800));

        let bl = proj.to_screen(Vec2::new(100., 20.));
        assert_eqf32!(bl.x, -200.);
        assert_eqf32!(bl.y, -400.);

        let tr = proj.to_screen(Vec2::new(120., 60.));
        assert_eqf32!(tr.x, 200.);
        assert_eqf32!(tr.y, 400.);

        let center = proj.to_screen(Vec2::new(110., 40.));
        assert_eqf32!(center.x, 0.);
        assert_eqf32!(center.y, 0.);
    }

    #[test]
    fn projection_inverts() {
        let bounds = Bounds {
            min_lon: 106.,
            min_lat: 20.5,
            max_lon: 123.,
            max_lat: 54.,
        };
        let proj = MapProjection::new(bounds, get_window_size(1000, 1000));
        let geo = Vec2::new(116., 29.);
        let back = proj.to_geo(proj.to_screen(geo));

        assert_eqf32!(back.x, geo.x);
        assert_eqf32!(back.y, geo.y);
    }
}
