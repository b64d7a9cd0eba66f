//! Interaction scripts: a JSON description of a stage, its content and a
//! sequence of toolbar, pointer, keyboard and frame events, replayed against
//! a headless [`Surface`] driven by a [`ManualScheduler`].
//!
//! ```json
//! {
//!   "stage":   { "width": 800, "height": 600 },
//!   "content": { "width": 1600, "height": 1200 },
//!   "events": [
//!     { "type": "select", "tool": "zoom-pan" },
//!     { "type": "zoom", "direction": "in" },
//!     { "type": "pointer_down" },
//!     { "type": "pointer_move", "dx": 5, "dy": 0 },
//!     { "type": "frame" },
//!     { "type": "pointer_up" }
//!   ]
//! }
//! ```

#[cfg(test)]
#[path = "script_test.rs"]
mod script_test;

use std::cell::RefCell;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use serde::{Deserialize, Serialize};
use stage::config::{ConfigError, ZoomConfig};
use stage::consts::CONTROL_GROUP;
use stage::container::HeadlessContainer;
use stage::geom::Size;
use stage::input::{Button, Key, Modifiers, PointerEvent};
use stage::manager::ToolError;
use stage::pan_zoom::PanMode;
use stage::scheduler::ManualScheduler;
use stage::shortcuts::ToolAction;
use stage::surface::Surface;
use stage::viewport::{ImageViewport, Viewport, ZoomDirection};

#[derive(Debug, thiserror::Error)]
pub enum ScriptError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid script: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid zoom config: {0}")]
    Config(#[from] ConfigError),
    #[error("surface setup failed: {0}")]
    Setup(#[from] ToolError),
    #[error("event {index}: {source}")]
    Event {
        index: usize,
        #[source]
        source: ToolError,
    },
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Script {
    /// Zoom settings; falls back to the environment when absent.
    #[serde(default)]
    pub config: Option<ZoomConfig>,
    pub stage: Size,
    pub content: Size,
    #[serde(default)]
    pub events: Vec<ScriptEvent>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ScriptEvent {
    Select {
        tool: String,
        #[serde(default = "default_active")]
        active: bool,
    },
    PointerDown {
        #[serde(default)]
        button: Button,
    },
    PointerMove {
        dx: f64,
        dy: f64,
    },
    PointerUp {
        #[serde(default)]
        button: Button,
    },
    /// Fire every queued animation-frame callback.
    Frame,
    Zoom {
        direction: ZoomDirection,
    },
    Fit,
    Original,
    /// Fit oversized content, natural size otherwise.
    Auto,
    /// Set the pan offset directly.
    Position {
        x: f64,
        y: f64,
    },
    Key {
        key: String,
        #[serde(default)]
        modifiers: Modifiers,
    },
    Unmount,
}

fn default_active() -> bool {
    true
}

/// Viewport and tool state after a replay.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Report {
    pub zoom_scale: f64,
    pub x: f64,
    pub y: f64,
    pub selected_tool: Option<String>,
    pub pan_mode: Option<&'static str>,
    pub cursor: Option<String>,
    pub frames_requested: usize,
    pub frames_run: usize,
    pub mounted: bool,
}

impl Script {
    /// # Errors
    ///
    /// [`ScriptError::Io`] or [`ScriptError::Parse`].
    pub fn load(path: &Path) -> Result<Self, ScriptError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ScriptError::Io { path: path.to_owned(), source })?;
        Self::parse(&raw)
    }

    /// # Errors
    ///
    /// [`ScriptError::Parse`] for malformed JSON or unknown event types.
    pub fn parse(raw: &str) -> Result<Self, ScriptError> {
        Ok(serde_json::from_str(raw)?)
    }

    /// The script's zoom config, or the environment's when the script has none.
    ///
    /// # Errors
    ///
    /// [`ScriptError::Config`] if the resolved config is invalid.
    pub fn resolve_config(&self) -> Result<ZoomConfig, ScriptError> {
        let config = match self.config {
            Some(config) => config,
            None => ZoomConfig::from_env()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Replay every event and report the final state.
    ///
    /// # Errors
    ///
    /// [`ScriptError::Config`] if `config` is invalid, otherwise
    /// [`ScriptError::Event`] naming the first event a tool rejected.
    pub fn replay(&self, config: ZoomConfig) -> Result<Report, ScriptError> {
        let scheduler = Rc::new(ManualScheduler::new());
        let mut surface = Surface::new(scheduler.clone())?;

        let mut viewport = ImageViewport::with_sizes(config, self.stage, self.content)?;
        viewport.attach_container(Box::new(HeadlessContainer::new()));
        let viewport = Rc::new(RefCell::new(viewport));
        surface.mount(viewport.clone());

        let mut frames_run = 0;
        for (index, event) in self.events.iter().enumerate() {
            tracing::debug!(index, ?event, "replaying event");
            let result = match event {
                ScriptEvent::Select { tool, active } => surface.select_tool(tool, *active),
                ScriptEvent::PointerDown { button } => {
                    surface.pointer_down(&PointerEvent::button(*button));
                    Ok(())
                }
                ScriptEvent::PointerMove { dx, dy } => {
                    surface.pointer_move(&PointerEvent::movement(*dx, *dy));
                    Ok(())
                }
                ScriptEvent::PointerUp { button } => {
                    surface.pointer_up(&PointerEvent::button(*button));
                    Ok(())
                }
                ScriptEvent::Frame => {
                    frames_run += scheduler.run_frame();
                    Ok(())
                }
                ScriptEvent::Zoom { direction } => surface.perform(&ToolAction::Zoom(*direction)),
                ScriptEvent::Fit => surface.perform(&ToolAction::SizeToFit),
                ScriptEvent::Original => surface.perform(&ToolAction::SizeToOriginal),
                ScriptEvent::Auto => surface.perform(&ToolAction::SizeToAuto),
                ScriptEvent::Position { x, y } => {
                    viewport.borrow_mut().set_zoom_position(*x, *y);
                    Ok(())
                }
                ScriptEvent::Key { key, modifiers } => {
                    surface.key_down(&Key(key.clone()), *modifiers).map(|action| {
                        if action.is_none() {
                            tracing::info!(index, %key, "key not bound");
                        }
                    })
                }
                ScriptEvent::Unmount => {
                    surface.unmount();
                    Ok(())
                }
            };
            result.map_err(|source| ScriptError::Event { index, source })?;
        }

        let (zoom_scale, position) = {
            let viewport = viewport.borrow();
            (viewport.zoom_scale(), viewport.zoom_position())
        };
        let cursor = viewport.borrow_mut().stage_container().and_then(|c| c.cursor()).map(|c| c.to_string());
        let manager = surface.manager();
        Ok(Report {
            zoom_scale,
            x: position.x,
            y: position.y,
            selected_tool: manager.selected_in_group(CONTROL_GROUP).map(|t| t.id().to_string()),
            pan_mode: manager.pan_zoom().map(|p| match p.mode() {
                PanMode::Viewing => "viewing",
                PanMode::Moving => "moving",
            }),
            cursor,
            frames_requested: scheduler.requested(),
            frames_run,
            mounted: surface.is_mounted(),
        })
    }
}
