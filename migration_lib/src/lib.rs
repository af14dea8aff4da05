use birdwatcher::{BirdData, Birdwatcher};
use error::Result;
use flock::Flock;
use options::RunOptions;
use route::Route;

pub mod bird;
pub mod flock;
pub mod route;

pub mod birdwatcher;
pub mod error;
pub mod math_helpers;
pub mod options;
pub mod playback;

/// Builds the flock for `route` and collects every bird's trajectory, saving it
/// according to the save options
pub fn migrate_base(route: Route, run_options: &RunOptions) -> Result<Vec<BirdData>> {
    let flock = Flock::new(route, run_options)?;
    let mut bird_watcher = Birdwatcher::new();

    bird_watcher.watch_flock(&flock);

    bird_watcher.pop_data_save(&run_options.save_options)
}

#[cfg(test)]
mod tests {
    use crate::{migrate_base, options::RunOptions, route::Route};

    #[test]
    fn migrate_base_collects_all_samples() {
        let data = migrate_base(Route::default(), &RunOptions::default()).unwrap();
        assert_eq!(data.len(), 10 * 301);
    }
}
