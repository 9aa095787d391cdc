use std::collections::HashMap;

use tracing::{debug, info, warn};

use crate::consts::{DEFAULT_HEIGHT_PCT, DEFAULT_LEFT_PCT, DEFAULT_TOP_PCT, DEFAULT_WIDTH_PCT};
use crate::geometry::{Frame, PercentRect};
use crate::hit::HotspotExtent;
use crate::input::{EndReason, InputError, Interaction, PointerEvent, Session};
use crate::output::SettingsOutput;
use crate::policy::Policy;
use crate::store::{LayoutStore, StoreError, Toggled, WidgetGeometry, WidgetRecord};
use crate::surface::{Surface, SurfaceError};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    #[error(transparent)]
    Surface(#[from] SurfaceError),
    #[error(transparent)]
    Input(#[from] InputError),
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("unknown widget: {0}")]
    UnknownWidget(String),
}

/// Geometry tunables shared by every widget on a board.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub policy: Policy,
    /// Box given to newly added widgets.
    pub default_box: PercentRect,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            policy: Policy::default(),
            default_box: PercentRect::new(DEFAULT_LEFT_PCT, DEFAULT_TOP_PCT, DEFAULT_WIDTH_PCT, DEFAULT_HEIGHT_PCT),
        }
    }
}

/// Pointer interaction state for one widget.
///
/// The engine reads the widget's current geometry from the [`Surface`] on
/// every event rather than trusting the store, so a stale record can never
/// make the box jump under the pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct WidgetEngine {
    name: String,
    session: Session,
    policy: Policy,
}

impl WidgetEngine {
    #[must_use]
    pub fn new(name: &str, policy: Policy) -> Self {
        Self { name: name.to_owned(), session: Session::Idle, policy }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn session(&self) -> Session {
        self.session
    }

    /// Start a move or resize at `pointer`.
    ///
    /// A move records where on its own face the box was grabbed. A resize
    /// widens the grabbed hotspot. Any session already running is replaced.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Surface`] if the box cannot be resolved (move)
    /// or the hotspot cannot be styled (resize). The engine is then idle,
    /// unless shrinking the previous resize hotspot failed, in which case
    /// that resize is still running.
    pub fn begin_interaction<S: Surface + ?Sized>(
        &mut self,
        mode: Interaction,
        pointer: PointerEvent,
        surface: &mut S,
    ) -> Result<(), EngineError> {
        self.release_hotspot(surface)?;
        self.session = Session::Idle;

        self.session = match mode {
            Interaction::Move => {
                let grab = Frame::resolve(surface)?.grab_offset(pointer);
                Session::Dragging { grab }
            }
            Interaction::Resize(direction) => {
                surface.apply_hotspot(direction, HotspotExtent::ACTIVE)?;
                Session::Resizing { direction }
            }
        };
        info!(name = %self.name, mode = ?mode, "interaction started");
        Ok(())
    }

    /// Follow the pointer and push the resulting geometry into `store`.
    ///
    /// Returns the geometry that was applied, or `None` when no session is
    /// running. On error the session stays active; only this event is lost.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Surface`] if the box or container cannot be
    /// resolved, and [`EngineError::UnknownWidget`] if the store no longer
    /// holds this widget.
    pub fn continue_interaction<S: Surface + ?Sized>(
        &mut self,
        pointer: PointerEvent,
        surface: &S,
        store: &mut LayoutStore,
    ) -> Result<Option<WidgetGeometry>, EngineError> {
        if !self.session.is_active() {
            return Ok(None);
        }
        let frame = Frame::resolve(surface).inspect_err(|e| {
            warn!(name = %self.name, error = %e, "skipping pointer move");
        })?;
        let record = store.get(&self.name).ok_or_else(|| EngineError::UnknownWidget(self.name.clone()))?;
        let mouse = frame.pointer_relative_to_parent(pointer);

        let next = match self.session {
            Session::Idle => return Ok(None),
            Session::Dragging { grab } => {
                let offset = frame.grab_to_parent(grab);
                let origin = self.policy.drag(mouse, offset, record.size.width, record.size.height);
                PercentRect::new(origin.x, origin.y, record.size.width, record.size.height)
            }
            Session::Resizing { direction } => {
                let mut next = self.policy.resize(direction, mouse, frame.box_relative_to_parent());
                // Untouched axes keep the stored values exactly.
                if !direction.moves_left() && !direction.moves_right() {
                    next.x = record.position.left;
                    next.width = record.size.width;
                }
                if !direction.moves_top() && !direction.moves_bottom() {
                    next.y = record.position.top;
                    next.height = record.size.height;
                }
                next
            }
        };

        let geometry = WidgetGeometry::from_rect(&self.name, next);
        store.update(&geometry);
        Ok(Some(geometry))
    }

    /// End the running session.
    ///
    /// Pointer-up always publishes settings. Pointer-leave publishes only when
    /// it actually ends a drag or resize. Returns whether a session was running.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Surface`] if the hotspot could not be shrunk
    /// back. The session is over and settings are published regardless.
    pub fn end_interaction<S: Surface + ?Sized>(
        &mut self,
        reason: EndReason,
        surface: &mut S,
        store: &mut LayoutStore,
    ) -> Result<bool, EngineError> {
        let was_active = self.session.is_active();
        let released = self.release_hotspot(surface);
        self.session = Session::Idle;

        if was_active {
            info!(name = %self.name, reason = ?reason, "interaction ended");
        }
        if reason == EndReason::PointerUp || was_active {
            store.output_settings();
        }
        released?;
        Ok(was_active)
    }

    fn release_hotspot<S: Surface + ?Sized>(&self, surface: &mut S) -> Result<(), EngineError> {
        if let Session::Resizing { direction } = self.session {
            surface.apply_hotspot(direction, HotspotExtent::IDLE)?;
        }
        Ok(())
    }
}

/// All widgets of one dashboard: the store plus one engine per widget.
///
/// Pointer events are routed by widget name. The host supplies the surface
/// for the widget the event belongs to.
pub struct BoardCore {
    pub store: LayoutStore,
    engines: HashMap<String, WidgetEngine>,
    config: EngineConfig,
}

impl Default for BoardCore {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}

impl BoardCore {
    /// A board that logs settings snapshots through `tracing`.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self::from_store(config, LayoutStore::new())
    }

    /// A board that reports settings snapshots to `output`.
    #[must_use]
    pub fn with_output(config: EngineConfig, output: impl SettingsOutput + 'static) -> Self {
        Self::from_store(config, LayoutStore::with_output(output))
    }

    fn from_store(config: EngineConfig, store: LayoutStore) -> Self {
        Self { store: store.default_box(config.default_box), engines: HashMap::new(), config }
    }

    #[must_use]
    pub fn config(&self) -> EngineConfig {
        self.config
    }

    // --- Widget list ---

    /// Add a widget and give it an interaction engine.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the name is taken.
    pub fn add(&mut self, name: &str) -> Result<WidgetRecord, EngineError> {
        let record = self.store.add(name)?;
        self.engines.insert(record.name.clone(), WidgetEngine::new(&record.name, self.config.policy));
        Ok(record)
    }

    /// Add the next `Widget {n}`.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if the generated name is taken.
    pub fn add_next(&mut self) -> Result<WidgetRecord, EngineError> {
        let record = self.store.add_next()?;
        self.engines.insert(record.name.clone(), WidgetEngine::new(&record.name, self.config.policy));
        Ok(record)
    }

    /// Remove a widget and drop its engine. Absent names are ignored.
    pub fn remove(&mut self, name: &str) -> Option<WidgetRecord> {
        self.engines.remove(name);
        self.store.remove(name)
    }

    /// Remove the widget if present, add it otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Store`] if adding fails.
    pub fn toggle(&mut self, name: &str) -> Result<Toggled, EngineError> {
        if self.remove(name).is_some() {
            return Ok(Toggled::Removed);
        }
        self.add(name)?;
        Ok(Toggled::Added)
    }

    // --- Pointer events ---

    /// Pointer-down on a widget's body or one of its hotspots.
    ///
    /// # Errors
    ///
    /// See [`WidgetEngine::begin_interaction`]; also
    /// [`EngineError::UnknownWidget`].
    pub fn pointer_down<S: Surface + ?Sized>(
        &mut self,
        name: &str,
        mode: Interaction,
        pointer: PointerEvent,
        surface: &mut S,
    ) -> Result<(), EngineError> {
        self.engine_mut(name)?.begin_interaction(mode, pointer, surface)
    }

    /// Pointer-move over a widget.
    ///
    /// # Errors
    ///
    /// See [`WidgetEngine::continue_interaction`].
    pub fn pointer_move<S: Surface + ?Sized>(
        &mut self,
        name: &str,
        pointer: PointerEvent,
        surface: &S,
    ) -> Result<Option<WidgetGeometry>, EngineError> {
        let engine = self
            .engines
            .get_mut(name)
            .ok_or_else(|| EngineError::UnknownWidget(name.to_owned()))?;
        let applied = engine.continue_interaction(pointer, surface, &mut self.store)?;
        if let Some(g) = &applied {
            debug!(name = %g.name, "geometry applied");
        }
        Ok(applied)
    }

    /// Pointer-up over a widget.
    ///
    /// # Errors
    ///
    /// See [`WidgetEngine::end_interaction`].
    pub fn pointer_up<S: Surface + ?Sized>(&mut self, name: &str, surface: &mut S) -> Result<bool, EngineError> {
        self.end(name, EndReason::PointerUp, surface)
    }

    /// Pointer left a widget's hit area.
    ///
    /// # Errors
    ///
    /// See [`WidgetEngine::end_interaction`].
    pub fn pointer_leave<S: Surface + ?Sized>(&mut self, name: &str, surface: &mut S) -> Result<bool, EngineError> {
        self.end(name, EndReason::PointerLeave, surface)
    }

    fn end<S: Surface + ?Sized>(&mut self, name: &str, reason: EndReason, surface: &mut S) -> Result<bool, EngineError> {
        let engine = self
            .engines
            .get_mut(name)
            .ok_or_else(|| EngineError::UnknownWidget(name.to_owned()))?;
        engine.end_interaction(reason, surface, &mut self.store)
    }

    // --- Queries ---

    #[must_use]
    pub fn engine(&self, name: &str) -> Option<&WidgetEngine> {
        self.engines.get(name)
    }

    #[must_use]
    pub fn widget(&self, name: &str) -> Option<&WidgetRecord> {
        self.store.get(name)
    }

    #[must_use]
    pub fn widgets(&self) -> &[WidgetRecord] {
        self.store.widgets()
    }

    fn engine_mut(&mut self, name: &str) -> Result<&mut WidgetEngine, EngineError> {
        self.engines
            .get_mut(name)
            .ok_or_else(|| EngineError::UnknownWidget(name.to_owned()))
    }
}
