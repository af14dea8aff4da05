// https://docs.rs/clap-serde/latest/clap_serde/#
use std::{fs, path::Path};

use clap_serde_derive::{
    clap::{self, Parser},
    serde::Serialize,
    ClapSerde,
};
use migration_lib::{
    error::{MigrationError, Result},
    options::{self, RunOptions, SaveOptions},
};

#[derive(Parser)]
#[command(version, about, long_about = None)]
/// Animated bird migration along an interpolated route.
pub struct Args {
    /// Config file, read as YAML for .yaml/.yml and as TOML otherwise
    #[arg(short, long = "config", default_value = "config.toml")]
    pub config_path: std::path::PathBuf,

    /// Capture every frame of one animation cycle as PNG into this directory
    #[arg(long)]
    pub record: Option<std::path::PathBuf>,

    /// Rest of arguments
    #[command(flatten)]
    pub config: <Config as ClapSerde>::Opt,
}

#[derive(ClapSerde, Serialize)]
/// Programatic configuration
///
/// Uses defaults, which can be overwritten by specifying a filepath for the `-c` or `--config` arg option
pub struct Config {
    #[default(10)]
    #[arg(short = 'n', long)]
    /// number of birds
    pub num_birds: usize,

    #[default(300)]
    #[arg(short = 'f', long)]
    /// number of animated frames
    pub num_frames: usize,

    #[default(42)]
    #[arg(long)]
    pub seed: u64,

    #[default(0.1)]
    #[arg(long = "noise")]
    /// standard deviation of the per-sample offset in degrees
    pub noise_scale: f32,

    #[default(0.5)]
    #[arg(long = "env_offset")]
    pub envelope_offset: f32,

    #[default(50)]
    #[arg(short = 'l', long = "trail")]
    pub trail_length: usize,

    #[default(2.)]
    #[arg(long = "margin")]
    /// padding around the route in degrees
    pub map_margin: f32,

    #[default(50)]
    #[arg(short = 'i', long = "interval")]
    /// milliseconds per frame
    pub frame_interval_ms: u64,

    #[default(false)]
    #[arg(short = 's', long)]
    /// save trajectories when the window closes
    pub save: bool,

    #[default(true)]
    #[arg(short = 't', long)]
    /// timestamp saved files instead of overwriting the last one
    pub save_timestamp: bool,

    #[default("./".to_owned())]
    #[arg(long = "save_path")]
    pub save_path: String,

    #[default(1000)]
    #[arg(short = 'x', long)]
    pub init_width: u32,

    #[default(1000)]
    #[arg(short = 'y', long)]
    pub init_height: u32,
}

impl Config {
    /// Parses the command line and merges it over the config file, if one exists
    pub fn load(args: &mut Args) -> Result<Config> {
        if !args.config_path.exists() {
            log::debug!(
                "no config file at {}, using defaults and flags",
                args.config_path.display()
            );
            return Ok(Config::from(&mut args.config));
        }

        let file_opt = read_config_file(&args.config_path)?;
        log::info!("loaded config from {}", args.config_path.display());

        Ok(Config::from(file_opt).merge(&mut args.config))
    }

    pub fn to_run_options(&self) -> RunOptions {
        let mut run_options = RunOptions::default();

        run_options.num_birds = self.num_birds;
        run_options.num_frames = self.num_frames;
        run_options.seed = self.seed;
        run_options.noise_scale = self.noise_scale;
        run_options.envelope_offset = self.envelope_offset;
        run_options.trail_length = self.trail_length;
        run_options.map_margin = self.map_margin;
        run_options.frame_interval_ms = self.frame_interval_ms;

        run_options.window = options::get_window_size(self.init_width, self.init_height);
        run_options.save_options = SaveOptions {
            save_locations: self.save,
            save_locations_timestamp: self.save_timestamp,
            save_locations_path: Some(self.save_path.clone()),
        };

        run_options
    }
}

fn read_config_file(path: &Path) -> Result<<Config as ClapSerde>::Opt> {
    let raw = fs::read_to_string(path)?;

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    if is_yaml {
        serde_yaml::from_str(&raw)
            .map_err(|e| MigrationError::Config(format!("{}: {}", path.display(), e)))
    } else {
        toml::from_str(&raw)
            .map_err(|e| MigrationError::Config(format!("{}: {}", path.display(), e)))
    }
}
