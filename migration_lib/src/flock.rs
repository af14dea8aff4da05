use glam::Vec2;
use log::debug;
use rand::Rng;
use rand_distr::StandardNormal;
use rand_xoshiro::{rand_core::SeedableRng, Xoshiro256PlusPlus};

use crate::{
    bird::Bird,
    error::Result,
    math_helpers::envelope,
    options::RunOptions,
    route::Route,
};

/// Drawable snapshot of the flock at one frame
#[derive(Debug, Clone, PartialEq)]
pub struct FrameState {
    pub frame: usize,
    /// current location of every bird, shared by the marker and the glow layer
    pub positions: Vec<Vec2>,
    /// one trail per bird, oldest sample first
    pub trails: Vec<Vec<Vec2>>,
}

/// Parameters that shape the per-bird noise, kept so the flock can be rebuilt
#[derive(Debug, Clone, Copy)]
struct NoiseParams {
    num_frames: usize,
    num_birds: usize,
    noise_scale: f32,
    envelope_offset: f32,
}

impl From<&RunOptions> for NoiseParams {
    fn from(ro: &RunOptions) -> Self {
        NoiseParams {
            num_frames: ro.num_frames,
            num_birds: ro.num_birds,
            noise_scale: ro.noise_scale,
            envelope_offset: ro.envelope_offset,
        }
    }
}

/// The shared migration path and every bird's perturbed copy of it.
///
/// All birds hold exactly `path().len()` samples.
pub struct Flock {
    route: Route,
    path: Vec<Vec2>,
    birds: Vec<Bird>,
    seed: u64,
    params: NoiseParams,
}

impl Flock {
    pub fn new(route: Route, run_options: &RunOptions) -> Result<Self> {
        run_options.validate()?;

        let params = NoiseParams::from(run_options);
        let path = route.smooth_path(params.num_frames);
        let birds = Flock::get_birds(&path, params, run_options.seed);

        debug!(
            "built flock of {} birds over {} samples, route length {:.2} deg",
            birds.len(),
            path.len(),
            route.length()
        );

        Ok(Flock {
            route,
            path,
            birds,
            seed: run_options.seed,
            params,
        })
    }

    /// Draws the offsets bird by bird, longitudes before latitudes, from a single
    /// seeded stream so the whole flock is reproducible from the seed alone.
    fn get_birds(path: &[Vec2], params: NoiseParams, seed: u64) -> Vec<Bird> {
        let mut rng = Xoshiro256PlusPlus::seed_from_u64(seed);
        let n = path.len();
        let env = envelope(n, params.envelope_offset);

        let sample_offsets = |rng: &mut Xoshiro256PlusPlus| -> Vec<f32> {
            env.iter()
                .map(|e| {
                    let z: f32 = rng.sample(StandardNormal);
                    z * params.noise_scale * e
                })
                .collect()
        };

        (0..params.num_birds)
            .map(|id| {
                let offsets_lon = sample_offsets(&mut rng);
                let offsets_lat = sample_offsets(&mut rng);
                Bird::from_path(id, path, &offsets_lon, &offsets_lat)
            })
            .collect()
    }

    /// Per-frame update: every bird's position and its trailing window
    pub fn frame(&self, frame: usize, trail_length: usize) -> FrameState {
        let frame = frame.min(self.frame_count().saturating_sub(1));

        FrameState {
            frame,
            positions: self.birds.iter().map(|b| b.position(frame)).collect(),
            trails: self
                .birds
                .iter()
                .map(|b| b.trail_points(frame, trail_length))
                .collect(),
        }
    }

    /// Rebuilds the birds with the current seed, picking up any changed noise options
    pub fn restart(&mut self, run_options: &RunOptions) -> Result<()> {
        run_options.validate()?;

        self.params = NoiseParams::from(run_options);
        self.seed = run_options.seed;
        self.path = self.route.smooth_path(self.params.num_frames);
        self.birds = Flock::get_birds(&self.path, self.params, self.seed);

        Ok(())
    }

    /// Rebuilds the birds from a new seed, keeping the path
    pub fn reseed(&mut self, seed: u64) {
        self.seed = seed;
        self.birds = Flock::get_birds(&self.path, self.params, seed);
        debug!("reseeded flock with {}", seed);
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn path(&self) -> &[Vec2] {
        &self.path
    }

    pub fn birds(&self) -> &[Bird] {
        &self.birds
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Number of samples in the path and in every bird, `num_frames + 1`
    pub fn frame_count(&self) -> usize {
        self.path.len()
    }

    /// Number of animated frames, the final path sample is never shown
    pub fn num_frames(&self) -> usize {
        self.params.num_frames
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use crate::{error::MigrationError, options::RunOptions, route::Route};

    use super::Flock;

    fn small_options() -> RunOptions {
        let mut ro = RunOptions::default();
        ro.num_frames = 60;
        ro.num_birds = 4;
        ro
    }

    #[test]
    fn every_bird_matches_the_path_length() {
        let flock = Flock::new(Route::default(), &RunOptions::default()).unwrap();

        assert_eq!(flock.path().len(), 301);
        assert_eq!(flock.birds().len(), 10);
        for b in flock.birds() {
            assert_eq!(b.len(), flock.path().len());
            assert_eq!(b.lats().len(), flock.path().len());
        }
    }

    #[test]
    fn same_seed_same_flock() {
        let a = Flock::new(Route::default(), &small_options()).unwrap();
        let b = Flock::new(Route::default(), &small_options()).unwrap();

        assert_eq!(a.birds(), b.birds());
    }

    #[test]
    fn different_seed_different_flock() {
        let a = Flock::new(Route::default(), &small_options()).unwrap();
        let mut ro = small_options();
        ro.seed = 7;
        let b = Flock::new(Route::default(), &ro).unwrap();

        assert_ne!(a.birds(), b.birds());
    }

    #[test]
    fn birds_are_not_identical() {
        let flock = Flock::new(Route::default(), &small_options()).unwrap();
        assert_ne!(flock.birds()[0], flock.birds()[1]);
    }

    #[test]
    fn zero_noise_follows_the_path() {
        let mut ro = small_options();
        ro.noise_scale = 0.;
        let flock = Flock::new(Route::default(), &ro).unwrap();

        for b in flock.birds() {
            for (k, p) in flock.path().iter().enumerate() {
                assert_relative_eq!(b.position(k).x, p.x, epsilon = 1e-5);
                assert_relative_eq!(b.position(k).y, p.y, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn noise_stays_near_the_path() {
        let flock = Flock::new(Route::default(), &RunOptions::default()).unwrap();

        let map = flock.route().bounds().with_margin(2.);

        // 0.1 deg standard deviation scaled by at most 1.5
        for b in flock.birds() {
            for (k, p) in flock.path().iter().enumerate() {
                assert!(b.position(k).distance(*p) < 2.);
                assert!(map.contains(b.position(k)));
            }
        }
    }

    #[test]
    fn frame_state_has_one_entry_per_bird() {
        let flock = Flock::new(Route::default(), &small_options()).unwrap();
        let state = flock.frame(10, 5);

        assert_eq!(state.frame, 10);
        assert_eq!(state.positions.len(), 4);
        assert_eq!(state.trails.len(), 4);
        for (pos, trail) in state.positions.iter().zip(state.trails.iter()) {
            assert_eq!(trail.len(), 6);
            assert_eq!(trail[trail.len() - 1], *pos);
        }
    }

    #[test]
    fn first_frame_trail_is_a_single_sample() {
        let flock = Flock::new(Route::default(), &small_options()).unwrap();
        let state = flock.frame(0, 50);

        assert!(state.trails.iter().all(|t| t.len() == 1));
    }

    #[test]
    fn frame_is_clamped() {
        let flock = Flock::new(Route::default(), &small_options()).unwrap();
        let state = flock.frame(1_000, 5);

        assert_eq!(state.frame, 60);
    }

    #[test]
    fn reseed_changes_birds_not_path() {
        let mut flock = Flock::new(Route::default(), &small_options()).unwrap();
        let path = flock.path().to_vec();
        let before = flock.birds().to_vec();

        flock.reseed(1234);

        assert_eq!(flock.seed(), 1234);
        assert_eq!(flock.path(), &path[..]);
        assert_ne!(flock.birds(), &before[..]);
    }

    #[test]
    fn restart_picks_up_new_options() {
        let mut flock = Flock::new(Route::default(), &small_options()).unwrap();
        let mut ro = small_options();
        ro.num_frames = 20;
        ro.num_birds = 2;

        flock.restart(&ro).unwrap();

        assert_eq!(flock.frame_count(), 21);
        assert_eq!(flock.birds().len(), 2);
        assert_eq!(flock.num_frames(), 20);
    }

    #[test]
    fn rejects_empty_flock() {
        let mut ro = small_options();
        ro.num_birds = 0;
        let res = Flock::new(Route::default(), &ro);

        assert!(matches!(res, Err(MigrationError::NoBirds)));
    }
}
