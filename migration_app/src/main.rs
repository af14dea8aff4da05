extern crate nannou;
use std::path::PathBuf;

use clap_serde_derive::clap::Parser;
use log::{error, info, warn};
use nannou::prelude::*;
use nannou_egui::{egui, Egui};
use migration_lib::birdwatcher::Birdwatcher;
use migration_lib::error::Result;
use migration_lib::flock::Flock;
use migration_lib::math_helpers::MapProjection;
use migration_lib::options::{RunOptions, SaveOptions};
use migration_lib::playback::{PlaybackSignal, Playhead};
use migration_lib::route::Route;

mod cliargs;
mod drawing;
use cliargs::{Args, Config};
use drawing::Drawable;

fn main() {
    env_logger::init();

    nannou::app(model)
        .update(update)
        .run();
}

struct ControlsState {
    controls_open: bool,
}

/// Frame capture of one full cycle, one PNG per frame
struct Recorder {
    dir: PathBuf,
    next_frame: usize,
}

struct Model {
    egui: Egui,
    flock: Flock,
    playhead: Playhead,
    run_options: RunOptions,
    last_update_micros: u128,
    since_last_update_micros: u128,
    control_state: ControlsState,
    bird_watcher: Birdwatcher,
    recorder: Option<Recorder>,
}

/// Builds the run options and the flock from the command line and config file
fn load() -> Result<(RunOptions, Flock, Option<PathBuf>)> {
    let mut args = Args::parse();
    let config = Config::load(&mut args)?;
    let run_options = config.to_run_options();

    let flock = Flock::new(Route::default(), &run_options)?;
    info!(
        "{} birds over {} frames, seed {}",
        run_options.num_birds, run_options.num_frames, run_options.seed
    );

    Ok((run_options, flock, args.record))
}

fn model(app: &App) -> Model {
    let (run_options, flock, record) = match load() {
        Ok(loaded) => loaded,
        Err(err) => {
            error!("cannot start: {}", err);
            std::process::exit(1);
        }
    };

    let recorder = match record {
        Some(dir) => match std::fs::create_dir_all(&dir) {
            Ok(()) => {
                info!("recording frames into {}", dir.display());
                Some(Recorder { dir, next_frame: 0 })
            }
            Err(err) => {
                error!("cannot create {}: {}", dir.display(), err);
                std::process::exit(1);
            }
        },
        None => None,
    };

    let main_window = match app
        .new_window()
        .key_pressed(key_pressed)
        .closed(window_closed)
        .size(run_options.window.win_w as u32, run_options.window.win_h as u32)
        .title(&run_options.title)
        .raw_event(raw_window_event)
        .view(view)
        .build()
    {
        Ok(id) => id,
        Err(err) => {
            error!("cannot open window: {:?}", err);
            std::process::exit(1);
        }
    };

    let egui = match app.window(main_window) {
        Some(window) => Egui::from_window(&window),
        None => {
            error!("main window vanished right after creation");
            std::process::exit(1);
        }
    };

    Model {
        egui,
        playhead: Playhead::new(run_options.num_frames, run_options.frame_interval_ms),
        flock,
        run_options,
        last_update_micros: 0,
        since_last_update_micros: 0,
        control_state: ControlsState {
            controls_open: false,
        },
        bird_watcher: Birdwatcher::new(),
        recorder,
    }
}

fn update(app: &App, model: &mut Model, update: Update) {
    record_update_timing(app, model);

    // update window size as it could be resized
    let win = app.window_rect();
    let window = &mut model.run_options.window;
    window.win_left = win.left() as i32;
    window.win_right = win.right() as i32;
    window.win_top = win.top() as i32;
    window.win_bottom = win.bottom() as i32;
    window.win_h = win.h() as i32;
    window.win_w = win.w() as i32;

    update_controls(model, &update);

    if let Some(recorder) = model.recorder.as_mut() {
        if recorder.next_frame >= model.playhead.num_frames() {
            info!(
                "recorded {} frames into {}",
                recorder.next_frame,
                recorder.dir.display()
            );
            model.recorder = None;
        } else {
            model
                .playhead
                .signal(PlaybackSignal::UpdatePlayhead(recorder.next_frame));
            recorder.next_frame += 1;
        }
        return;
    }

    if model.playhead.should_advance(update.since_last) {
        model.playhead.tick();
    }
}

fn update_controls(model: &mut Model, update: &Update) {
    let Model {
        ref mut egui,
        ref mut playhead,
        ref mut run_options,
        ..
    } = *model;

    egui.set_elapsed_time(update.since_start);
    let ctx = egui.begin_frame();
    egui::Window::new("controls")
        .default_size(egui::vec2(0.0, 200.0))
        .open(&mut model.control_state.controls_open)
        .show(&ctx, |ui| {
            ui.horizontal(|ui| {
                let label = if playhead.is_paused() { "play" } else { "pause" };
                if ui.button(label).clicked() {
                    playhead.signal(PlaybackSignal::PlayPause);
                }
                if ui.button("reverse").clicked() {
                    playhead.signal(PlaybackSignal::SwitchDirection);
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label("frame");
                let mut frame = playhead.frame();
                let last = playhead.num_frames() - 1;
                if ui.add(egui::Slider::new(&mut frame, 0..=last)).changed() {
                    playhead.signal(PlaybackSignal::UpdatePlayhead(frame));
                }
            });

            ui.horizontal(|ui| {
                ui.label("trail length");
                ui.add(egui::Slider::new(&mut run_options.trail_length, 0..=200))
            });

            ui.horizontal(|ui| {
                ui.label("interval (ms)");
                if ui
                    .add(egui::Slider::new(&mut run_options.frame_interval_ms, 5..=500))
                    .changed()
                {
                    playhead.set_interval(run_options.frame_interval_ms);
                }
            });

            ui.separator();

            ui.horizontal(|ui| {
                ui.label(format!("No. birds: {n}", n = run_options.num_birds));
            });

            ui.horizontal(|ui| {
                ui.label(format!(
                    "Frame: {f} / {n}",
                    f = playhead.frame(),
                    n = playhead.num_frames()
                ));
            });

            ui.horizontal(|ui| {
                ui.label(format!(
                    "Time since last update: {t:2.2}",
                    t = model.since_last_update_micros as f64 / 1000.
                ));
            });
        });
}

fn raw_window_event(_app: &App, model: &mut Model, event: &nannou::winit::event::WindowEvent) {
    model.egui.handle_raw_event(event);
}

fn record_update_timing(app: &App, model: &mut Model) {
    let micros_now = app.duration.since_start.as_micros();
    model.since_last_update_micros = micros_now - model.last_update_micros;
    model.last_update_micros = micros_now;
}

fn key_pressed(_app: &App, model: &mut Model, key: Key) {
    match key {
        // pause the whole animation
        Key::Space => model.playhead.signal(PlaybackSignal::PlayPause),
        Key::Right => model.playhead.signal(PlaybackSignal::TickForward),
        Key::Left => model.playhead.signal(PlaybackSignal::TickBackward),
        Key::D => model.playhead.signal(PlaybackSignal::SwitchDirection),
        // show/hide controls
        Key::C => model.control_state.controls_open = !model.control_state.controls_open,
        // restart the flock from the configured seed
        Key::R => {
            if let Err(err) = model.flock.restart(&model.run_options) {
                warn!("restart failed: {}", err);
            }
            model.playhead.set_num_frames(model.run_options.num_frames);
            model.playhead.rewind();
        }
        // new flock from a fresh seed
        Key::N => {
            let seed = model.flock.seed().wrapping_add(1);
            model.flock.reseed(seed);
            info!("reseeded with {}", seed);
        }
        Key::S => {
            let save_options = SaveOptions {
                save_locations: true,
                ..model.run_options.save_options.clone()
            };
            save_trajectories(model, &save_options);
        }
        _ => {}
    }
}

fn window_closed(_app: &App, model: &mut Model) {
    if model.run_options.save_options.save_locations {
        let save_options = model.run_options.save_options.clone();
        save_trajectories(model, &save_options);
    }
}

fn save_trajectories(model: &mut Model, save_options: &SaveOptions) {
    model.bird_watcher.watch_flock(&model.flock);
    if let Err(err) = model.bird_watcher.pop_data_save(save_options) {
        error!("saving trajectories failed: {}", err);
    }
}

fn view(app: &App, model: &Model, frame: Frame) {
    let draw = app.draw();
    let win = app.window_rect();

    let bounds = model
        .flock
        .route()
        .bounds()
        .with_margin(model.run_options.map_margin);
    let projection = MapProjection::new(bounds, model.run_options.window);

    drawing::draw_map(&draw, &projection);

    model
        .flock
        .route()
        .draw(&draw, &projection, &model.run_options);

    model
        .flock
        .frame(model.playhead.frame(), model.run_options.trail_length)
        .draw(&draw, &projection, &model.run_options);

    drawing::draw_overlay(&draw, win, &model.run_options);

    if let Err(err) = draw.to_frame(app, &frame) {
        warn!("drawing frame failed: {:?}", err);
    }

    if let Some(recorder) = &model.recorder {
        let path = recorder
            .dir
            .join(format!("frame_{:04}.png", model.playhead.frame()));
        app.main_window().capture_frame(path);
    } else if let Err(err) = model.egui.draw_to_frame(&frame) {
        warn!("drawing controls failed: {:?}", err);
    }
}
