//! Viewport transform state and the contract tools drive it through.
//!
//! `zoom_scale` is a scale factor (1.0 = natural content size) and
//! `zoom_position` is the on-stage offset of the content's top-left corner in
//! CSS pixels. A content point `p` lands on stage at `p * zoom_scale + zoom_position`.

#[cfg(test)]
#[path = "viewport_test.rs"]
mod viewport_test;

use std::cell::RefCell;
use std::rc::Rc;

use serde::Deserialize;

use crate::config::{ConfigError, ZoomConfig};
use crate::consts::{ORIGINAL_ZOOM_SCALE, ZOOM_BOUND_EPSILON};
use crate::container::{Cursor, StageContainer};
use crate::geom::{Point, Size};
use crate::notify::{Observers, Subscription};

/// Direction of one discrete zoom step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ZoomDirection {
    In,
    Out,
}

impl ZoomDirection {
    /// Map a signed unit (`+1` zoom in, `-1` zoom out). Zero has no direction.
    #[must_use]
    pub fn from_sign(sign: i32) -> Option<Self> {
        match sign.signum() {
            1 => Some(Self::In),
            -1 => Some(Self::Out),
            _ => None,
        }
    }
}

/// What the tools need from the rendered surface.
pub trait Viewport {
    fn zoom_scale(&self) -> f64;

    fn zoom_position(&self) -> Point;

    /// Change the scale by one step, clamped to the configured bounds.
    fn handle_zoom(&mut self, direction: ZoomDirection);

    /// Set the pan offset directly. Last write wins.
    fn set_zoom_position(&mut self, x: f64, y: f64);

    /// Scale content to fit the stage and centre it.
    fn size_to_fit(&mut self);

    /// Show content at its natural size, centred.
    fn size_to_original(&mut self);

    /// Fit oversized content, otherwise show it at natural size. Centred either way.
    fn size_to_auto(&mut self);

    /// Host element, once the surface is mounted.
    fn stage_container(&mut self) -> Option<&mut dyn StageContainer>;
}

/// A viewport shared between the surface and its tools.
pub type SharedViewport = Rc<RefCell<dyn Viewport>>;

/// Write `cursor` to the viewport's container, if it has one.
pub(crate) fn write_cursor(viewport: &mut dyn Viewport, cursor: Cursor) {
    if let Some(container) = viewport.stage_container() {
        container.set_cursor(cursor);
    }
}

/// Transform change published to viewport observers.
///
/// Carries the complete new transform so listeners never need to read the
/// viewport back while it is being mutated.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ViewportChange {
    /// Scale changed (position usually changes with it).
    Zoomed { scale: f64, position: Point },
    /// Only the pan offset changed.
    Moved { position: Point },
}

/// Viewport over a single image-like content of known natural size.
pub struct ImageViewport {
    config: ZoomConfig,
    zoom_scale: f64,
    position: Point,
    stage_size: Size,
    content_size: Size,
    container: Option<Box<dyn StageContainer>>,
    observers: Observers<ViewportChange>,
}

impl Default for ImageViewport {
    fn default() -> Self {
        Self::from_valid(ZoomConfig::default())
    }
}

impl ImageViewport {
    /// Create an unmounted viewport with empty stage and content sizes.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] when `config` fails [`ZoomConfig::validate`].
    pub fn new(config: ZoomConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_valid(config))
    }

    /// Create a viewport with known stage and content sizes.
    ///
    /// # Errors
    ///
    /// Same as [`ImageViewport::new`].
    pub fn with_sizes(config: ZoomConfig, stage: Size, content: Size) -> Result<Self, ConfigError> {
        Ok(Self { stage_size: stage, content_size: content, ..Self::new(config)? })
    }

    fn from_valid(config: ZoomConfig) -> Self {
        Self {
            config,
            zoom_scale: ORIGINAL_ZOOM_SCALE,
            position: Point::default(),
            stage_size: Size::default(),
            content_size: Size::default(),
            container: None,
            observers: Observers::new(),
        }
    }

    #[must_use]
    pub fn config(&self) -> &ZoomConfig {
        &self.config
    }

    #[must_use]
    pub fn stage_size(&self) -> Size {
        self.stage_size
    }

    #[must_use]
    pub fn content_size(&self) -> Size {
        self.content_size
    }

    /// Update the visible stage size (host resize).
    pub fn set_stage_size(&mut self, size: Size) {
        self.stage_size = size;
    }

    /// Update the natural content size (new image loaded).
    pub fn set_content_size(&mut self, size: Size) {
        self.content_size = size;
    }

    pub fn attach_container(&mut self, container: Box<dyn StageContainer>) {
        self.container = Some(container);
    }

    pub fn detach_container(&mut self) -> Option<Box<dyn StageContainer>> {
        self.container.take()
    }

    /// Listen for transform changes.
    ///
    /// Listeners run synchronously inside the mutating call. When the viewport
    /// sits behind a [`SharedViewport`] that `RefCell` is mutably borrowed at
    /// that point, so a listener must read state from the [`ViewportChange`]
    /// it receives and must not borrow the shared viewport.
    pub fn subscribe(&self, listener: impl Fn(&ViewportChange) + 'static) -> Subscription<ViewportChange> {
        self.observers.subscribe(listener)
    }

    /// Convert a stage point to content coordinates.
    #[must_use]
    pub fn stage_to_content(&self, stage: Point) -> Point {
        Point {
            x: (stage.x - self.position.x) / self.zoom_scale,
            y: (stage.y - self.position.y) / self.zoom_scale,
        }
    }

    /// Convert a content point to stage coordinates.
    #[must_use]
    pub fn content_to_stage(&self, content: Point) -> Point {
        Point {
            x: content.x * self.zoom_scale + self.position.x,
            y: content.y * self.zoom_scale + self.position.y,
        }
    }

    /// Set scale, keeping the content point under the stage centre fixed.
    fn zoom_about_center(&mut self, scale: f64) {
        let center = self.stage_size.center();
        let anchor = self.stage_to_content(center);
        self.zoom_scale = scale;
        self.position = Point::new(center.x - anchor.x * scale, center.y - anchor.y * scale);
        self.notify_zoomed();
    }

    /// Set scale and centre the content on the stage.
    fn zoom_centered(&mut self, scale: f64) {
        self.zoom_scale = scale;
        self.position = Point::new(
            (self.stage_size.width - self.content_size.width * scale) * 0.5,
            (self.stage_size.height - self.content_size.height * scale) * 0.5,
        );
        self.notify_zoomed();
    }

    fn notify_zoomed(&self) {
        tracing::debug!(scale = self.zoom_scale, x = self.position.x, y = self.position.y, "viewport zoomed");
        self.observers.notify(&ViewportChange::Zoomed { scale: self.zoom_scale, position: self.position });
    }

    /// Scale at which the content exactly fits the stage.
    fn fit_scale(&self) -> f64 {
        if self.stage_size.is_degenerate() || self.content_size.is_degenerate() {
            return ORIGINAL_ZOOM_SCALE;
        }
        let sx = self.stage_size.width / self.content_size.width;
        let sy = self.stage_size.height / self.content_size.height;
        sx.min(sy)
    }

    fn overflows_stage(&self) -> bool {
        self.content_size.width > self.stage_size.width || self.content_size.height > self.stage_size.height
    }
}

impl Viewport for ImageViewport {
    fn zoom_scale(&self) -> f64 {
        self.zoom_scale
    }

    fn zoom_position(&self) -> Point {
        self.position
    }

    fn handle_zoom(&mut self, direction: ZoomDirection) {
        let current = self.zoom_scale;
        let target = match direction {
            ZoomDirection::In => current * self.config.step,
            ZoomDirection::Out => current / self.config.step,
        };
        let next = self.config.clamp(target);
        if (next - current).abs() <= ZOOM_BOUND_EPSILON * current {
            tracing::trace!(scale = current, ?direction, "zoom at bound");
            return;
        }
        self.zoom_about_center(next);
    }

    fn set_zoom_position(&mut self, x: f64, y: f64) {
        let position = Point::new(x, y);
        if position == self.position {
            return;
        }
        self.position = position;
        self.observers.notify(&ViewportChange::Moved { position });
    }

    fn size_to_fit(&mut self) {
        let scale = self.config.clamp(self.fit_scale());
        self.zoom_centered(scale);
    }

    fn size_to_original(&mut self) {
        self.zoom_centered(ORIGINAL_ZOOM_SCALE);
    }

    fn size_to_auto(&mut self) {
        if self.overflows_stage() {
            self.size_to_fit();
        } else {
            self.size_to_original();
        }
    }

    fn stage_container(&mut self) -> Option<&mut dyn StageContainer> {
        self.container.as_deref_mut().map(|c| c as &mut dyn StageContainer)
    }
}
