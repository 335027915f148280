//! backtop application layer
//!
//! Runs a [`ScrollToTop`](backtop_widgets::ScrollToTop) control on the
//! deterministic headless host:
//!
//! - [`headless_runtime`]: mounts the control and routes host events to it
//! - [`scenario`]: JSON-scripted interactions and assertions
//! - [`config`]: TOML widget configuration

pub mod config;
pub mod headless_runtime;
pub mod scenario;

pub use config::WidgetConfigFile;
pub use headless_runtime::{HeadlessRunConfig, HeadlessRuntime};
pub use scenario::{ReportStatus, Scenario, ScenarioReport, ScenarioStep};
