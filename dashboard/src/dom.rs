//! Browser bindings: a [`Surface`] over DOM elements and the exported board.
//!
//! This module is the only place that touches `web_sys`. Each widget's
//! surface holds its box element and its eight hotspot elements directly,
//! so nothing is ever looked up by a synthesized element id.
//!
//! Errors crossing into JavaScript become `js_sys::Error` values.

use std::collections::HashMap;
use std::fmt;

use tracing::warn;
use wasm_bindgen::prelude::*;
use web_sys::{Element as DomElement, HtmlElement};

use crate::engine::{BoardCore, EngineConfig};
use crate::geometry::PixelRect;
use crate::hit::HotspotExtent;
use crate::input::{Direction, Interaction, PointerEvent};
use crate::output::JsonOutput;
use crate::store::Toggled;
use crate::surface::{Element, Surface, SurfaceError};

/// A widget box rendered in the DOM, plus its hotspot elements.
pub struct DomSurface {
    widget: HtmlElement,
    hotspots: [Option<HtmlElement>; 8],
}

impl DomSurface {
    #[must_use]
    pub fn new(widget: HtmlElement) -> Self {
        Self { widget, hotspots: Default::default() }
    }

    /// Register the element that captures pointer-down for `direction`.
    pub fn set_hotspot(&mut self, direction: Direction, element: HtmlElement) {
        self.hotspots[direction.index()] = Some(element);
    }
}

fn rect_of(element: &DomElement) -> PixelRect {
    let r = element.get_bounding_client_rect();
    PixelRect::new(r.left(), r.top(), r.width(), r.height())
}

impl Surface for DomSurface {
    fn box_rect(&self) -> Option<PixelRect> {
        self.widget.is_connected().then(|| rect_of(&self.widget))
    }

    fn parent_rect(&self) -> Option<PixelRect> {
        self.widget.parent_element().map(|p| rect_of(&p))
    }

    fn apply_hotspot(&mut self, direction: Direction, extent: HotspotExtent) -> Result<(), SurfaceError> {
        let element = Element::Hotspot(direction);
        let hotspot = self.hotspots[direction.index()]
            .as_ref()
            .ok_or(SurfaceError::MissingElement(element))?;
        let style = hotspot.style();
        let thickness = format!("{}px", extent.thickness);
        let offset = format!("{}px", extent.offset);

        let mut props: Vec<(&str, &str)> = Vec::with_capacity(4);
        if direction.moves_left() || direction.moves_right() {
            props.push(("width", thickness.as_str()));
        }
        if direction.moves_top() || direction.moves_bottom() {
            props.push(("height", thickness.as_str()));
        }
        if direction.moves_top() {
            props.push(("top", offset.as_str()));
        }
        if direction.moves_bottom() {
            props.push(("bottom", offset.as_str()));
        }
        if direction.moves_left() {
            props.push(("left", offset.as_str()));
        }
        if direction.moves_right() {
            props.push(("right", offset.as_str()));
        }
        for (name, value) in props {
            style
                .set_property(name, value)
                .map_err(|e| SurfaceError::Style { element, message: js_message(&e) })?;
        }
        Ok(())
    }
}

fn js_message(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

fn to_js(e: impl fmt::Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}

/// A dashboard running in the browser.
///
/// The host renders one element per widget, hands it over with
/// [`Board::attach`], and forwards pointer events. After any call that
/// returns `true` from `pointer_move` it re-renders from [`Board::widgets_json`].
///
/// Settings snapshots go to the callback passed to the constructor as a JSON
/// string, or to `tracing` when none is given.
#[wasm_bindgen]
pub struct Board {
    core: BoardCore,
    surfaces: HashMap<String, DomSurface>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(None)
    }
}

#[wasm_bindgen]
impl Board {
    #[wasm_bindgen(constructor)]
    #[must_use]
    pub fn new(on_settings: Option<js_sys::Function>) -> Board {
        let config = EngineConfig::default();
        let core = match on_settings {
            Some(callback) => BoardCore::with_output(config, JsonOutput::new(move |json: &str| {
                if let Err(e) = callback.call1(&JsValue::NULL, &JsValue::from_str(json)) {
                    warn!(error = %js_message(&e), "settings callback failed");
                }
            })),
            None => BoardCore::new(config),
        };
        Self { core, surfaces: HashMap::new() }
    }

    /// Add a widget; returns its record as JSON.
    ///
    /// # Errors
    ///
    /// Fails if the name is taken.
    pub fn add(&mut self, name: &str) -> Result<String, JsValue> {
        let record = self.core.add(name).map_err(to_js)?;
        serde_json::to_string(&record).map_err(to_js)
    }

    /// Add the next `Widget {n}`; returns its record as JSON.
    ///
    /// # Errors
    ///
    /// Fails if the generated name is taken.
    pub fn add_next(&mut self) -> Result<String, JsValue> {
        let record = self.core.add_next().map_err(to_js)?;
        serde_json::to_string(&record).map_err(to_js)
    }

    /// Remove a widget. Returns whether it existed.
    pub fn remove(&mut self, name: &str) -> bool {
        self.surfaces.remove(name);
        self.core.remove(name).is_some()
    }

    /// Toggle a widget. Returns `true` if it was added.
    ///
    /// # Errors
    ///
    /// Fails if adding fails.
    pub fn toggle(&mut self, name: &str) -> Result<bool, JsValue> {
        let toggled = self.core.toggle(name).map_err(to_js)?;
        if toggled == Toggled::Removed {
            self.surfaces.remove(name);
        }
        Ok(toggled == Toggled::Added)
    }

    /// Bind a widget to its rendered box element.
    pub fn attach(&mut self, name: &str, widget: HtmlElement) {
        self.surfaces.insert(name.to_owned(), DomSurface::new(widget));
    }

    /// Bind one of a widget's hotspot elements (`"n"`, `"ne"`, ... `"nw"`).
    ///
    /// # Errors
    ///
    /// Fails on an unknown hotspot name or if the widget was never attached.
    pub fn attach_hotspot(&mut self, name: &str, hotspot: &str, element: HtmlElement) -> Result<(), JsValue> {
        let direction: Direction = hotspot.parse().map_err(to_js)?;
        let surface = self
            .surfaces
            .get_mut(name)
            .ok_or_else(|| to_js(SurfaceError::MissingElement(Element::Widget)))?;
        surface.set_hotspot(direction, element);
        Ok(())
    }

    /// Pointer-down on the widget body (`hotspot` absent) or a hotspot.
    ///
    /// # Errors
    ///
    /// Fails on invalid coordinates, unknown names, or unresolvable elements.
    pub fn pointer_down(&mut self, name: &str, hotspot: Option<String>, client_x: f64, client_y: f64) -> Result<(), JsValue> {
        let pointer = PointerEvent::new(client_x, client_y).map_err(to_js)?;
        let mode = match hotspot {
            Some(h) => Interaction::Resize(h.parse().map_err(to_js)?),
            None => Interaction::Move,
        };
        let surface = surface_mut(&mut self.surfaces, name)?;
        self.core.pointer_down(name, mode, pointer, surface).map_err(to_js)
    }

    /// Pointer-move over a widget. Returns `true` if its geometry changed.
    ///
    /// # Errors
    ///
    /// Fails if the widget's box or container cannot be resolved this time;
    /// the interaction stays active.
    pub fn pointer_move(&mut self, name: &str, client_x: f64, client_y: f64) -> Result<bool, JsValue> {
        let pointer = PointerEvent::new(client_x, client_y).map_err(to_js)?;
        let surface = surface_mut(&mut self.surfaces, name)?;
        let applied = self.core.pointer_move(name, pointer, &*surface).map_err(to_js)?;
        Ok(applied.is_some())
    }

    /// Pointer-up over a widget.
    ///
    /// # Errors
    ///
    /// Fails on unknown names or if a hotspot could not be restyled.
    pub fn pointer_up(&mut self, name: &str) -> Result<(), JsValue> {
        let surface = surface_mut(&mut self.surfaces, name)?;
        self.core.pointer_up(name, surface).map_err(to_js)?;
        Ok(())
    }

    /// Pointer left a widget's hit area.
    ///
    /// # Errors
    ///
    /// Fails on unknown names or if a hotspot could not be restyled.
    pub fn pointer_leave(&mut self, name: &str) -> Result<(), JsValue> {
        let surface = surface_mut(&mut self.surfaces, name)?;
        self.core.pointer_leave(name, surface).map_err(to_js)?;
        Ok(())
    }

    /// Every widget record as a JSON array, in insertion order.
    ///
    /// # Errors
    ///
    /// Fails only if serialization fails.
    pub fn widgets_json(&self) -> Result<String, JsValue> {
        self.core.store.snapshot_json().map_err(to_js)
    }
}

fn surface_mut<'a>(surfaces: &'a mut HashMap<String, DomSurface>, name: &str) -> Result<&'a mut DomSurface, JsValue> {
    surfaces
        .get_mut(name)
        .ok_or_else(|| to_js(SurfaceError::MissingElement(Element::Widget)))
}
