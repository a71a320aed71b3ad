//! Sprite runner demo.
//!
//! Plays the sprite sheet described by an INI file (see
//! [`SpriteViewConfig`]) using:
//! - **bevy_ecs** to hold the sprite view and run its systems
//! - **crossbeam-channel** timer threads as animation clocks
//! - **raylib** for the window (feature `raylib`, `--window`)
//!
//! Without a window the demo runs headless and logs each blit.
//!
//! # Main Loop
//!
//! 1. Load configuration, apply CLI overrides
//! 2. Spawn a `SpriteView` entity, register its listener
//! 3. Each frame: update frame time, pump clocks, render, dispatch events
//!
//! # Running
//!
//! ```sh
//! cargo run -- --seconds 3 --columns 8 --rows 8 --sheet-size 600x600
//! cargo run --release --features raylib -- --window
//! ```
//!
//! In the window, `S` starts, `X` stops and `P` pauses.

use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use bevy_ecs::prelude::*;
use clap::Parser;
use log::{debug, info, warn};

use spriterunner::components::grid::{GridConfig, PixelRect};
use spriterunner::components::spritesheet::SpriteSheet;
use spriterunner::components::spriteview::SpriteView;
use spriterunner::events::spriteview::{SpriteViewMessage, StateChangeListener};
use spriterunner::resources::frametime::FrameTime;
use spriterunner::resources::sheetstore::{SheetStore, in_sample_size, sampled_size};
use spriterunner::resources::spriteconfig::SpriteViewConfig;
use spriterunner::resources::surface::Surface;
use spriterunner::systems::clock::sprite_view_clock_system;
use spriterunner::systems::render::render_pass;
use spriterunner::systems::spriteconfig::apply_sprite_config_changes;
use spriterunner::systems::spriteview::{sprite_view_notify_system, update_sprite_view_messages};
use spriterunner::systems::time::update_frame_time;

/// Sprite sheet runner
#[derive(Parser)]
#[command(version, about = "Plays a sprite sheet as a frame-by-frame animation.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./spriterunner.ini")]
    config: PathBuf,

    /// Override the number of columns.
    #[arg(long)]
    columns: Option<i32>,

    /// Override the number of rows.
    #[arg(long)]
    rows: Option<i32>,

    /// Override the frame rate.
    #[arg(long)]
    fps: Option<i32>,

    /// Sheet size as WIDTHxHEIGHT when running headless.
    #[arg(long, value_name = "WxH", value_parser = parse_size)]
    sheet_size: Option<(u32, u32)>,

    /// Seconds to run headless before exiting.
    #[arg(long, default_value_t = 3.0)]
    seconds: f32,

    /// Open a raylib window instead of running headless.
    #[cfg(feature = "raylib")]
    #[arg(long)]
    window: bool,
}

fn parse_size(s: &str) -> Result<(u32, u32), String> {
    let (w, h) = s
        .split_once(['x', 'X'])
        .ok_or_else(|| format!("expected WIDTHxHEIGHT, got '{}'", s))?;
    let w = w.trim().parse::<u32>().map_err(|e| e.to_string())?;
    let h = h.trim().parse::<u32>().map_err(|e| e.to_string())?;
    Ok((w, h))
}

/// Status line shared between the view's listener and the host that shows it.
type StatusText = Arc<Mutex<String>>;

fn read_status(status: &StatusText) -> String {
    status.lock().map(|s| s.clone()).unwrap_or_default()
}

/// Listener that keeps the status line current and logs each change.
struct StatusLog {
    status: StatusText,
}

impl StatusLog {
    fn set(&self, text: String) {
        if let Ok(mut status) = self.status.lock() {
            *status = text;
        }
    }
}

impl StateChangeListener for StatusLog {
    fn on_start(&mut self, _view: &SpriteView) {
        info!("Status: Started");
        self.set("Started".to_string());
    }

    fn on_stop(&mut self, _view: &SpriteView) {
        info!("Status: Stopped");
        self.set("Stopped".to_string());
    }

    fn on_update_frame(&mut self, view: &SpriteView) {
        debug!(
            "Status: Frame {} (cell {},{})",
            view.current_frame(),
            view.render_column(),
            view.render_row()
        );
        self.set(format!("Frame {}", view.current_frame()));
    }
}

/// Headless surface that logs blits.
struct LogSurface {
    width: i32,
    height: i32,
    blits: u64,
}

impl Surface for LogSurface {
    fn size(&self) -> (i32, i32) {
        (self.width, self.height)
    }

    fn blit(&mut self, sheet: &SpriteSheet, src: PixelRect, dst: PixelRect) {
        self.blits += 1;
        debug!(
            "blit '{}' src=({},{})-({},{}) dst={}x{}",
            sheet.tex_key,
            src.left,
            src.top,
            src.right,
            src.bottom,
            dst.width(),
            dst.height()
        );
    }
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = SpriteViewConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        warn!("{}; using defaults", e);
    }
    if cli.columns.is_some() || cli.rows.is_some() {
        config.grid = GridConfig::new(
            cli.columns.unwrap_or(config.grid.columns() as i32),
            cli.rows.unwrap_or(config.grid.rows() as i32),
        );
        // last_frame follows the new grid
        config.playback = config.playback.with_default_last_frame();
    }
    if let Some(fps) = cli.fps {
        config.playback = config.playback.with_fps(fps);
    }
    if let Some((w, h)) = cli.sheet_size {
        config.sheet_width = w;
        config.sheet_height = h;
    }

    #[cfg(feature = "raylib")]
    if cli.window {
        window::run(config);
        return;
    }

    run_headless(config, cli.seconds);
}

/// World with the resources and the sprite view entity both hosts share.
///
/// The view's listener writes into `status`.
fn build_world(config: SpriteViewConfig, sheets: SheetStore, status: StatusText) -> World {
    let mut world = World::new();
    world.insert_resource(FrameTime::default());
    world.insert_resource(sheets);
    world.init_resource::<Messages<SpriteViewMessage>>();
    world.spawn(SpriteView::new().with_listener(StatusLog { status }));
    // applied on the first update
    world.insert_resource(config);
    world
}

fn schedules() -> (Schedule, Schedule) {
    let mut update = Schedule::default();
    update.add_systems(apply_sprite_config_changes);
    update.add_systems(sprite_view_clock_system.after(apply_sprite_config_changes));

    let mut post_render = Schedule::default();
    post_render.add_systems((sprite_view_notify_system, update_sprite_view_messages).chain());

    (update, post_render)
}

fn run_headless(mut config: SpriteViewConfig, seconds: f32) {
    if config.declared_sheet().is_none() {
        warn!(
            "No sheet size configured for '{}'; pass --sheet-size WxH to animate",
            config.sheet_key
        );
    } else {
        // decode size the windowed loader would end up with
        let (w, h) = (config.sheet_width, config.sheet_height);
        let (req_w, req_h) = (config.window_width, config.window_height);
        let (sampled_w, sampled_h) = sampled_size(w, h, req_w, req_h);
        info!(
            "Sheet {}x{} decodes with sample size {} to {}x{} for a {}x{} view",
            w,
            h,
            in_sample_size(w, h, req_w, req_h),
            sampled_w,
            sampled_h,
            req_w,
            req_h
        );
        config.sheet_width = sampled_w;
        config.sheet_height = sampled_h;
    }

    let mut surface = LogSurface {
        width: config.window_width as i32,
        height: config.window_height as i32,
        blits: 0,
    };
    let status = StatusText::default();
    let mut world = build_world(config, SheetStore::new(), status.clone());
    let (mut update, mut post_render) = schedules();

    let run_for = Duration::try_from_secs_f32(seconds).unwrap_or(Duration::ZERO);
    let started = Instant::now();
    let mut last = started;
    while started.elapsed() < run_for {
        let now = Instant::now();
        update_frame_time(&mut world, (now - last).as_secs_f32());
        last = now;

        update.run(&mut world);
        render_pass(&mut world, &mut surface);
        post_render.run(&mut world);

        std::thread::sleep(Duration::from_millis(16));
    }

    let mut views = world.query::<&mut SpriteView>();
    for mut view in views.iter_mut(&mut world) {
        info!(
            "Ran {:.1}s: frame {}, {} blits, last status '{}'",
            seconds,
            view.current_frame(),
            surface.blits,
            read_status(&status)
        );
        view.stop();
        view.dispatch_notifications();
    }
}

#[cfg(feature = "raylib")]
mod window {
    use super::*;
    use raylib::prelude::*;
    use spriterunner::resources::raylibsurface::{RaylibSurface, TextureStore};

    pub fn run(config: SpriteViewConfig) {
        let (mut rl, thread) = raylib::init()
            .size(config.window_width as i32, config.window_height as i32)
            .resizable()
            .title("Sprite Runner")
            .build();
        rl.set_target_fps(60);

        let mut textures = TextureStore::new();
        let mut sheets = SheetStore::new();
        let path = config.sheet_path.to_string_lossy().into_owned();
        let loaded = textures.load(
            &mut rl,
            &thread,
            &config.sheet_key,
            &path,
            config.window_width,
            config.window_height,
        );
        let status = StatusText::new(Mutex::new(match loaded {
            Ok(sheet) => {
                sheets.insert(sheet);
                "Image loaded. Ready.".to_string()
            }
            Err(e) => {
                log::error!("{}", e);
                format!("Error loading {}", path)
            }
        }));

        let mut world = build_world(config, sheets, status.clone());
        let (mut update, mut post_render) = schedules();

        while !rl.window_should_close() {
            {
                let mut views = world.query::<&mut SpriteView>();
                for mut view in views.iter_mut(&mut world) {
                    if rl.is_key_pressed(KeyboardKey::KEY_S) {
                        view.start();
                    }
                    if rl.is_key_pressed(KeyboardKey::KEY_X) {
                        view.stop();
                    }
                    if rl.is_key_pressed(KeyboardKey::KEY_P) {
                        view.pause();
                    }
                }
            }

            let dt = rl.get_frame_time();
            update_frame_time(&mut world, dt);
            update.run(&mut world);

            let (w, h) = (rl.get_screen_width(), rl.get_screen_height());
            {
                let mut d = rl.begin_drawing(&thread);
                d.clear_background(Color::RAYWHITE);
                {
                    let mut surface = RaylibSurface::new(&mut d, &textures, w, h - 30);
                    render_pass(&mut world, &mut surface);
                }
                d.draw_text(
                    &format!("Status: {}", read_status(&status)),
                    10,
                    h - 24,
                    20,
                    Color::DARKGRAY,
                );
            }

            // listener updates the status line for the next frame
            post_render.run(&mut world);
        }
    }
}
