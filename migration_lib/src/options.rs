use crate::error::{MigrationError, Result};

pub const DEFAULT_TITLE: &str = "2024 Autumn Bird Migration to Guangdong (Simulated Flock)";

#[derive(Debug, Clone)]
pub struct RunOptions {
    /// number of animated frames, the path holds `num_frames + 1` samples
    pub num_frames: usize,
    pub num_birds: usize,
    pub seed: u64,

    /// standard deviation of the per-sample offset, in degrees
    pub noise_scale: f32,
    /// added to the sine envelope, shifts where the noise vanishes
    pub envelope_offset: f32,

    pub trail_length: usize,
    /// padding around the waypoint bounds, in degrees
    pub map_margin: f32,
    pub frame_interval_ms: u64,

    pub marker_size: f32,
    pub glow_size: f32,
    pub title: String,

    pub window: WindowSize,
    pub save_options: SaveOptions,
}

impl RunOptions {
    /// Checks that the options describe an animation that can be built
    pub fn validate(&self) -> Result<()> {
        if self.num_frames == 0 {
            return Err(MigrationError::ZeroFrames);
        }
        if self.num_birds == 0 {
            return Err(MigrationError::NoBirds);
        }
        if !self.noise_scale.is_finite() || self.noise_scale < 0. {
            return Err(MigrationError::InvalidOption(format!(
                "noise_scale must be a non-negative number, got {}",
                self.noise_scale
            )));
        }
        if !self.envelope_offset.is_finite() {
            return Err(MigrationError::InvalidOption(
                "envelope_offset must be finite".to_owned(),
            ));
        }
        if !self.map_margin.is_finite() || self.map_margin < 0. {
            return Err(MigrationError::InvalidOption(format!(
                "map_margin must be a non-negative number, got {}",
                self.map_margin
            )));
        }
        if self.frame_interval_ms == 0 {
            return Err(MigrationError::InvalidOption(
                "frame_interval_ms must be positive".to_owned(),
            ));
        }
        if self.window.win_w <= 0 || self.window.win_h <= 0 {
            return Err(MigrationError::InvalidOption(format!(
                "window must have a positive size, got {}x{}",
                self.window.win_w, self.window.win_h
            )));
        }

        Ok(())
    }
}

impl Default for RunOptions {
    fn default() -> Self {
        let init_height = 1000;
        let init_width = 1000;

        RunOptions {
            num_frames: 300,
            num_birds: 10,
            seed: 42,
            noise_scale: 0.1,
            envelope_offset: 0.5,
            trail_length: 50,
            map_margin: 2.,
            frame_interval_ms: 50,
            marker_size: 20.,
            glow_size: 150.,
            title: DEFAULT_TITLE.to_owned(),
            window: self::get_window_size(init_width, init_height),
            save_options: SaveOptions {
                save_locations: false,
                save_locations_path: Some("./".to_owned()),
                save_locations_timestamp: true,
            },
        }
    }
}

pub fn get_window_size(init_width: u32, init_height: u32) -> WindowSize {
    WindowSize {
        win_left: init_width as i32 / -2,
        win_right: init_width as i32 / 2,
        win_top: init_height as i32 / 2,
        win_bottom: init_height as i32 / -2,
        win_h: init_height as i32,
        win_w: init_width as i32,
    }
}

/// Window rectangle centered at (0, 0), y pointing up
#[derive(Debug, PartialEq, Eq, Clone, Copy)]
pub struct WindowSize {
    /// lowest x value
    pub win_left: i32,
    /// highest x value
    pub win_right: i32,
    /// highest y value
    pub win_top: i32,
    /// lowest y value
    pub win_bottom: i32,
    /// height
    pub win_h: i32,
    /// width
    pub win_w: i32,
}

#[derive(Debug, Clone)]
pub struct SaveOptions {
    pub save_locations: bool,
    pub save_locations_path: Option<String>,
    pub save_locations_timestamp: bool,
}
