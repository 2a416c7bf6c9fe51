// Crate-level lints: pixel math casts between i32, u32 and f32 throughout
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]

//! System telemetry dashboard for small serial LCD panels.
//!
//! Every second the monitor samples CPU load, CPU temperature, memory use,
//! the local IP address and whether a watched service is running, and draws
//! them onto a fixed layout: three radial gauges, a clock, an IP label and a
//! status dot over a full-screen background image.
//!
//! # Pipeline
//!
//! ```text
//! SensorSource ──sample──▶ Dashboard::apply ──▶ DashboardFrame
//!                                                    │ compositor::render
//!                                                    ▼
//!                         DeviceChannel ◀──send── Vec<DrawCommand>
//! ```
//!
//! - [`sensors`]: per-platform metric readers behind [`sensors::SensorSource`].
//!   Failures degrade to sentinel values and never stop the loop.
//! - [`widgets`] and [`frame`]: the retained widget model.
//! - [`geometry`]: value → arc segment math for radial gauges.
//! - [`compositor`]: turns a frame into ordered draw commands.
//! - [`device`]: the panel abstraction and the simulated panel.
//! - [`update_loop`]: the tick state machine.
//! - [`shutdown`] and [`signals`]: cooperative cancellation on SIGINT/SIGTERM.
//!
//! # Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML settings and fixed layout constants |
//! | [`dashboard`] | Default widget layout and value bindings |
//! | [`render`] | Full vs partial frame tracking |
//! | [`profiling`] | Per-tick timing and failure counters |
//! | [`logging`] | Tracing subscriber setup |

pub mod colors;
pub mod compositor;
pub mod config;
pub mod dashboard;
pub mod device;
pub mod frame;
pub mod geometry;
pub mod logging;
pub mod profiling;
pub mod render;
pub mod sensors;
pub mod shutdown;
pub mod signals;
pub mod update_loop;
pub mod widgets;
