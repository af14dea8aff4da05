use std::{fs::OpenOptions, mem, path::Path};

use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;

use crate::{
    error::Result,
    flock::{Flock, FrameState},
    options::SaveOptions,
};

/// One trajectory sample, a row of the exported CSV
#[derive(Serialize, Debug, Clone, Copy, PartialEq)]
pub struct BirdData {
    pub id: usize,
    pub frame: usize,
    pub lon: f32,
    pub lat: f32,
}

/// Accumulates trajectory samples and writes them out as CSV
pub struct Birdwatcher {
    locations: Vec<BirdData>,
}

const PREFIX: &'static str = "migration-data";

impl Birdwatcher {
    pub fn new() -> Self {
        Birdwatcher {
            locations: Vec::new(),
        }
    }

    /// Records every bird at every frame, ordered by bird then frame
    pub fn watch_flock(&mut self, flock: &Flock) {
        let mut rows: Vec<BirdData> = flock
            .birds()
            .iter()
            .flat_map(|b| {
                b.lons()
                    .iter()
                    .zip(b.lats().iter())
                    .enumerate()
                    .map(move |(frame, (lon, lat))| BirdData {
                        id: b.id,
                        frame,
                        lon: *lon,
                        lat: *lat,
                    })
            })
            .collect();

        self.locations.append(&mut rows);
    }

    /// Records the positions shown in a single frame
    pub fn watch_frame(&mut self, state: &FrameState) {
        let frame = state.frame;
        self.locations
            .extend(state.positions.iter().enumerate().map(|(id, p)| BirdData {
                id,
                frame,
                lon: p.x,
                lat: p.y,
            }));
    }

    pub fn len(&self) -> usize {
        self.locations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locations.is_empty()
    }

    pub fn pop_data(&mut self) -> Vec<BirdData> {
        mem::take(&mut self.locations)
    }

    /// Saves the latest data in CSV format, then returns it while emptying the birdwatcher's memory
    ///
    /// Depending on save options, either attempts to overwrite the current file or write's a new timestamped file
    pub fn pop_data_save(&mut self, save_options: &SaveOptions) -> Result<Vec<BirdData>> {
        let data = self.pop_data();

        if !save_options.save_locations {
            return Ok(data);
        }

        if let Some(path) = &save_options.save_locations_path {
            let file_path = Path::new(path)
                .join(Birdwatcher::get_dataset_name(save_options, Utc::now()));

            let file = OpenOptions::new()
                .write(true)
                .create(true)
                .truncate(true)
                .open(&file_path)?;
            let mut wtr = csv::Writer::from_writer(file);

            for row in data.iter() {
                wtr.serialize(row)?;
            }
            wtr.flush()?;

            info!("saved {} samples to {}", data.len(), file_path.display());
        }

        Ok(data)
    }

    fn get_dataset_name(save_options: &SaveOptions, now: DateTime<Utc>) -> String {
        match save_options.save_locations_timestamp {
            true => {
                let datetime_part = now.timestamp_millis();
                format!(
                    "{prefix}_{datetime}.csv",
                    prefix = PREFIX,
                    datetime = datetime_part
                )
            }
            false => format!("{prefix}.csv", prefix = PREFIX),
        }
    }
}

impl Default for Birdwatcher {
    fn default() -> Self {
        Self::new()
    }
}
