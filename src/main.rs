//! `lcd-status-monitor [CONFIG]`
//!
//! Loads settings (the named file, or `monitor.toml` when present), brings up
//! the panel and runs the update loop until SIGINT or SIGTERM.

use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::Context;
use embedded_graphics::prelude::Size;
use tracing::{info, warn};

use lcd_status_monitor::config::{self, DEFAULT_CONFIG_FILE, DeviceKind, Settings};
use lcd_status_monitor::dashboard::Dashboard;
use lcd_status_monitor::device::{DeviceChannel, SimulatedLcd, power_on};
use lcd_status_monitor::frame::Background;
use lcd_status_monitor::shutdown::ShutdownToken;
use lcd_status_monitor::update_loop::UpdateLoop;
use lcd_status_monitor::{logging, sensors, signals};

fn load_settings() -> anyhow::Result<Settings> {
    match std::env::args_os().nth(1).map(PathBuf::from) {
        Some(path) => config::load_from_file(&path).with_context(|| format!("loading {}", path.display())),
        None => config::load_or_default(Path::new(DEFAULT_CONFIG_FILE)).context("loading default settings"),
    }
}

fn main() -> anyhow::Result<()> {
    let settings = load_settings()?;
    logging::init(settings.logging.debug);
    info!(os = std::env::consts::OS, family = std::env::consts::FAMILY, "starting");

    let sensors = sensors::for_host(&settings.service).context("no sensor backend for this host")?;

    let token = ShutdownToken::new();
    // The loop still runs without handlers; it just can't be stopped gracefully
    let _signals = signals::spawn_listener(token.clone())
        .inspect_err(|e| warn!(error = %e, "signal handlers not installed"))
        .ok();

    let display_cfg = &settings.display;
    let mut device = match settings.device.kind {
        DeviceKind::Simulated => SimulatedLcd::new(Size::new(display_cfg.width, display_cfg.height))
            .with_screencap(settings.device.screencap.clone()),
    };
    info!(device = device.name(), port = %display_cfg.port, "opening display");
    power_on(&mut device, display_cfg.brightness, display_cfg.orientation);

    let expected = display_cfg.oriented_size();
    if device.size() != expected {
        warn!(
            expected = ?expected,
            actual = ?device.size(),
            "panel did not take the configured orientation"
        );
    }

    let started = Instant::now();
    let background = Background::for_display(&settings.background.dir, &settings.background.stem, expected);
    info!(image = %background.image.display(), "background selected");
    let dashboard = Dashboard::build(background, &settings.font_path, &settings.service.logo);

    let update_loop = UpdateLoop::new(sensors, device, dashboard, token, settings.refresh_interval());
    info!(elapsed_ms = started.elapsed().as_millis() as u64, "dashboard built");
    let summary = update_loop.run().context("update loop")?;

    info!(
        ticks = summary.ticks,
        frames = summary.frames,
        draw_failures = summary.draw_failures,
        uptime_s = summary.uptime.as_secs(),
        "stopped"
    );
    Ok(())
}
