//! Scripted headless scenarios.
//!
//! A scenario is a JSON object with a `steps` array. Every step is tagged by
//! `type`:
//!
//! ```json
//! {"steps": [
//!   {"type": "scroll", "y": 1200},
//!   {"type": "click"},
//!   {"type": "settle"},
//!   {"type": "assert_scroll", "y": 0}
//! ]}
//! ```

use anyhow::Result;
use backtop_core::Position;
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::headless_runtime::HeadlessRuntime;

/// Sequence of scripted steps.
#[derive(Debug, Clone, Deserialize)]
pub struct Scenario {
    pub steps: Vec<ScenarioStep>,
}

fn default_tolerance() -> f32 {
    0.5
}

/// One scripted interaction or check.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScenarioStep {
    Scroll {
        y: f32,
    },
    Resize {
        width: f32,
        height: f32,
    },
    PointerDown {
        x: f32,
        y: f32,
    },
    PointerMove {
        x: f32,
        y: f32,
    },
    PointerUp {
        x: f32,
        y: f32,
    },
    /// Click at a point, or at the control's center when omitted.
    Click {
        #[serde(default)]
        x: Option<f32>,
        #[serde(default)]
        y: Option<f32>,
    },
    Wait {
        ms: u64,
    },
    /// Pump animation frames until the control is idle.
    Settle {
        #[serde(default)]
        max_frames: Option<u32>,
    },
    AssertVisible {
        visible: bool,
    },
    AssertScroll {
        y: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
    AssertPosition {
        x: f32,
        y: f32,
        #[serde(default = "default_tolerance")]
        tolerance: f32,
    },
}

impl ScenarioStep {
    pub fn name(&self) -> &'static str {
        match self {
            ScenarioStep::Scroll { .. } => "scroll",
            ScenarioStep::Resize { .. } => "resize",
            ScenarioStep::PointerDown { .. } => "pointer_down",
            ScenarioStep::PointerMove { .. } => "pointer_move",
            ScenarioStep::PointerUp { .. } => "pointer_up",
            ScenarioStep::Click { .. } => "click",
            ScenarioStep::Wait { .. } => "wait",
            ScenarioStep::Settle { .. } => "settle",
            ScenarioStep::AssertVisible { .. } => "assert_visible",
            ScenarioStep::AssertScroll { .. } => "assert_scroll",
            ScenarioStep::AssertPosition { .. } => "assert_position",
        }
    }
}

/// Report status for a scenario run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportStatus {
    Passed,
    Failed,
}

/// Machine-readable result of a scenario run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub status: ReportStatus,
    pub steps_run: usize,
    pub failed_step_index: Option<usize>,
    pub assertion: Option<String>,
    pub message: Option<String>,
    pub final_scroll_y: f32,
    pub position: Position,
    pub visible: bool,
    pub clicks: u64,
    pub elapsed_ms: f64,
}

impl ScenarioReport {
    fn snapshot(runtime: &HeadlessRuntime, steps_run: usize) -> Self {
        Self {
            status: ReportStatus::Passed,
            steps_run,
            failed_step_index: None,
            assertion: None,
            message: None,
            final_scroll_y: runtime.scroll_y(),
            position: runtime.position(),
            visible: runtime.is_visible(),
            clicks: runtime.clicks(),
            elapsed_ms: runtime.now(),
        }
    }

    pub fn passed(&self) -> bool {
        self.status == ReportStatus::Passed
    }

    pub fn write_to_writer<W: Write>(&self, writer: &mut W) -> Result<()> {
        let payload = serde_json::to_string_pretty(self)?;
        writer.write_all(payload.as_bytes())?;
        writer.write_all(b"\n")?;
        Ok(())
    }
}

impl Scenario {
    /// Load a scenario from JSON text.
    pub fn from_json(input: &str) -> Result<Self> {
        Ok(serde_json::from_str(input)?)
    }

    /// Load a scenario from file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    /// Scroll down, click the control, and let the animation finish.
    pub fn demo() -> Self {
        Self {
            steps: vec![
                ScenarioStep::Scroll { y: 1200.0 },
                ScenarioStep::AssertVisible { visible: true },
                ScenarioStep::Click { x: None, y: None },
                ScenarioStep::Settle { max_frames: None },
                ScenarioStep::AssertScroll {
                    y: 0.0,
                    tolerance: default_tolerance(),
                },
                ScenarioStep::AssertVisible { visible: false },
            ],
        }
    }

    /// Execute every step against `runtime`.
    ///
    /// Host errors abort with `Err`; the first failed assertion stops the run
    /// and is recorded in the returned report.
    pub fn run(&self, runtime: &mut HeadlessRuntime) -> Result<ScenarioReport> {
        for (index, step) in self.steps.iter().enumerate() {
            tracing::debug!(index, step = step.name(), "scenario step");
            if let Some(message) = apply_step(runtime, step)? {
                tracing::warn!(index, step = step.name(), %message, "assertion failed");
                let mut report = ScenarioReport::snapshot(runtime, index + 1);
                report.status = ReportStatus::Failed;
                report.failed_step_index = Some(index);
                report.assertion = Some(step.name().to_string());
                report.message = Some(message);
                return Ok(report);
            }
        }
        Ok(ScenarioReport::snapshot(runtime, self.steps.len()))
    }
}

/// Apply one step, returning an assertion failure message if it failed.
fn apply_step(runtime: &mut HeadlessRuntime, step: &ScenarioStep) -> Result<Option<String>> {
    match *step {
        ScenarioStep::Scroll { y } => runtime.scroll(y)?,
        ScenarioStep::Resize { width, height } => runtime.resize(width, height)?,
        ScenarioStep::PointerDown { x, y } => {
            if !runtime.pointer_down(Position::new(x, y)) {
                tracing::debug!(x, y, "pointer down landed outside the control");
            }
        }
        ScenarioStep::PointerMove { x, y } => runtime.pointer_move(Position::new(x, y)),
        ScenarioStep::PointerUp { x, y } => runtime.pointer_up(Position::new(x, y)),
        ScenarioStep::Click { x, y } => {
            let center = runtime.control_center();
            let point = Position::new(x.unwrap_or(center.x), y.unwrap_or(center.y));
            if !runtime.click_at(point) {
                tracing::debug!(x = point.x, y = point.y, "click landed outside the control");
            }
        }
        ScenarioStep::Wait { ms } => runtime.wait(ms),
        ScenarioStep::Settle { max_frames } => {
            let budget = max_frames.unwrap_or(runtime.config().max_frames);
            let frame_ms = runtime.config().frame_ms;
            runtime.run_frames(frame_ms, budget);
        }
        ScenarioStep::AssertVisible { visible } => {
            if runtime.is_visible() != visible {
                return Ok(Some(format!(
                    "expected visible={visible}, got visible={}",
                    runtime.is_visible()
                )));
            }
        }
        ScenarioStep::AssertScroll { y, tolerance } => {
            let actual = runtime.scroll_y();
            if (actual - y).abs() > tolerance {
                return Ok(Some(format!("expected scroll {y}, got {actual}")));
            }
        }
        ScenarioStep::AssertPosition { x, y, tolerance } => {
            let actual = runtime.position();
            if (actual.x - x).abs() > tolerance || (actual.y - y).abs() > tolerance {
                return Ok(Some(format!(
                    "expected position ({x}, {y}), got ({}, {})",
                    actual.x, actual.y
                )));
            }
        }
    }
    Ok(None)
}
