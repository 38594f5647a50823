//! Canvas document and state management.

use crate::camera::{Camera, PAN_STEP, ZOOM_STEP};
use crate::config::CanvasConfig;
use crate::history::{History, Snapshot};
use crate::selection::HandleKind;
use crate::shapes::{SerializableColor, Shape, ShapeId, bounds_intersect};
use crate::storage::{MemoryStorage, PersistedState, StateStorage, StorageError};
use crate::tools::{ToolKind, ToolManager};
use kurbo::{Point, Rect, Size, Vec2};
use std::fmt;

/// The shape store: ordered shapes, their undo history and the storage
/// they are written through to.
///
/// Shapes are kept back to front; the last shape is drawn on top and wins
/// hit tests. Every accepted mutation is persisted immediately. Storage
/// failures are logged and otherwise ignored, so the in-memory state always
/// stays authoritative.
pub struct CanvasDocument {
    shapes: Vec<Shape>,
    history: History,
    virtual_size: Size,
    storage: Box<dyn StateStorage>,
}

impl fmt::Debug for CanvasDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CanvasDocument")
            .field("shapes", &self.shapes)
            .field("history", &self.history.len())
            .field("virtual_size", &self.virtual_size)
            .finish_non_exhaustive()
    }
}

impl CanvasDocument {
    /// Create a document over `storage`, restoring whatever it holds.
    ///
    /// A missing or unreadable state starts the document empty.
    pub fn new(virtual_size: Size, storage: Box<dyn StateStorage>) -> Self {
        let (shapes, history) = match storage.load() {
            Ok(state) => {
                log::info!(
                    "Restored {} shapes and {} undo states",
                    state.current_shapes.len(),
                    state.history.len()
                );
                (state.current_shapes, History::from_snapshots(state.history))
            }
            Err(StorageError::NotFound(_)) => (Vec::new(), History::new()),
            Err(err) => {
                log::warn!("Could not load saved canvas, starting empty: {err}");
                (Vec::new(), History::new())
            }
        };
        Self {
            shapes,
            history,
            virtual_size,
            storage,
        }
    }

    /// Create an empty document backed by memory only.
    pub fn in_memory(virtual_size: Size) -> Self {
        Self::new(virtual_size, Box::new(MemoryStorage::new()))
    }

    /// Shapes back to front.
    pub fn shapes(&self) -> &[Shape] {
        &self.shapes
    }

    pub fn shapes_ordered(&self) -> impl Iterator<Item = &Shape> {
        self.shapes.iter()
    }

    pub fn get_shape(&self, id: ShapeId) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.id() == id)
    }

    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        !self.history.is_empty()
    }

    pub fn virtual_size(&self) -> Size {
        self.virtual_size
    }

    pub fn virtual_rect(&self) -> Rect {
        Rect::from_origin_size(Point::ZERO, self.virtual_size)
    }

    /// Whether `bounds` overlaps the virtual canvas.
    pub fn is_within_canvas(&self, bounds: Rect) -> bool {
        bounds_intersect(bounds, self.virtual_rect())
    }

    pub fn selected_shape(&self) -> Option<&Shape> {
        self.shapes.iter().find(|s| s.is_selected())
    }

    pub fn selected_id(&self) -> Option<ShapeId> {
        self.selected_shape().map(Shape::id)
    }

    fn selected_index(&self) -> Option<usize> {
        self.shapes.iter().position(Shape::is_selected)
    }

    fn index_of(&self, id: ShapeId) -> Option<usize> {
        self.shapes.iter().position(|s| s.id() == id)
    }

    /// Clear every shape's selection flag. Selection is not undoable, but
    /// the cleared flags are still written out.
    pub fn clear_selection(&mut self) {
        if self.deselect_all() {
            self.persist();
        }
    }

    /// Returns whether any flag was set.
    fn deselect_all(&mut self) -> bool {
        let mut changed = false;
        for shape in self.shapes.iter_mut().filter(|s| s.is_selected()) {
            shape.set_selected(false);
            changed = true;
        }
        changed
    }

    /// The state as written to storage.
    pub fn persisted_state(&self) -> PersistedState {
        PersistedState {
            history: self.history.to_snapshots(),
            current_shapes: self.shapes.clone(),
        }
    }

    fn persist(&self) {
        if let Err(err) = self.storage.save(&self.persisted_state()) {
            log::error!("Failed to save canvas state: {err}");
        }
    }

    fn push_snapshot(&mut self) {
        self.history.push(Snapshot::capture(&self.shapes));
    }

    /// Push a deep copy of the current shapes onto the undo history.
    pub fn save_state(&mut self) {
        self.push_snapshot();
        self.persist();
    }

    /// Append a shape on top.
    ///
    /// Rejected without a snapshot when the shape lies entirely off the
    /// virtual canvas or a shape with the same id is already stored.
    pub fn add_shape(&mut self, shape: Shape) -> bool {
        if !shape.intersects_rect(self.virtual_rect()) {
            log::debug!("Rejected {} outside the canvas", shape.kind_name());
            return false;
        }
        if self.index_of(shape.id()).is_some() {
            log::warn!("Rejected duplicate shape {}", shape.id());
            return false;
        }
        self.push_snapshot();
        self.shapes.push(shape);
        self.persist();
        true
    }

    /// Remove a shape by id. Unknown ids change nothing.
    pub fn remove_shape(&mut self, id: ShapeId) -> Option<Shape> {
        let index = self.index_of(id)?;
        self.push_snapshot();
        let removed = self.shapes.remove(index);
        self.persist();
        Some(removed)
    }

    /// Remove every shape.
    pub fn clear(&mut self) {
        self.push_snapshot();
        self.shapes.clear();
        self.persist();
    }

    /// Move a shape to the top of the order, then record the new order.
    pub fn bring_to_front(&mut self, id: ShapeId) -> bool {
        let Some(index) = self.index_of(id) else {
            return false;
        };
        let shape = self.shapes.remove(index);
        self.shapes.push(shape);
        self.save_state();
        true
    }

    /// Restore the most recent snapshot. Returns false when there is
    /// nothing to undo. The popped snapshot is discarded.
    pub fn undo(&mut self) -> bool {
        let Some(snapshot) = self.history.pop() else {
            return false;
        };
        self.shapes = snapshot.into_shapes();
        self.deselect_all();
        self.persist();
        true
    }

    /// Select the topmost shape under a model-space point and bring it to
    /// the front.
    ///
    /// Points off the virtual canvas only clear the selection.
    pub fn select_at(&mut self, point: Point) -> Option<ShapeId> {
        let deselected = self.deselect_all();
        let on_canvas = point.x >= 0.0
            && point.x <= self.virtual_size.width
            && point.y >= 0.0
            && point.y <= self.virtual_size.height;
        let hit = if on_canvas {
            self.shapes.iter().rposition(|s| s.contains(point))
        } else {
            None
        };
        let Some(index) = hit else {
            if deselected {
                self.persist();
            }
            return None;
        };
        let id = self.shapes[index].id();
        self.shapes[index].set_selected(true);
        self.bring_to_front(id);
        Some(id)
    }

    /// Translate the selected shape by a model-space delta.
    ///
    /// The whole delta is dropped if it would carry the shape off the
    /// virtual canvas.
    pub fn move_selected(&mut self, delta: Vec2) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        let candidate = self.shapes[index].bounds() + delta;
        if !self.is_within_canvas(candidate) {
            return false;
        }
        self.shapes[index].translate(delta);
        self.persist();
        true
    }

    /// Drag a handle of the selected shape to a model-space point.
    ///
    /// A resize the shape refuses, or one that leaves the virtual canvas,
    /// leaves the geometry exactly as it was.
    pub fn resize_selected(&mut self, handle: HandleKind, point: Point) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        let backup = self.shapes[index].clone();
        if !self.shapes[index].resize(handle, point) {
            return false;
        }
        if !self.is_within_canvas(self.shapes[index].bounds()) {
            self.shapes[index] = backup;
            return false;
        }
        self.persist();
        true
    }

    /// Set the outline color of the selected shape (None removes it).
    pub fn set_selected_stroke(&mut self, color: Option<SerializableColor>) -> bool {
        self.restyle_selected(|shape| shape.style_mut().stroke_color = color)
    }

    /// Set the fill color of the selected shape (None removes it).
    pub fn set_selected_fill(&mut self, color: Option<SerializableColor>) -> bool {
        self.restyle_selected(|shape| shape.style_mut().fill_color = color)
    }

    fn restyle_selected(&mut self, apply: impl FnOnce(&mut Shape)) -> bool {
        let Some(index) = self.selected_index() else {
            return false;
        };
        self.push_snapshot();
        apply(&mut self.shapes[index]);
        self.persist();
        true
    }

    /// Remove the selected shape.
    pub fn delete_selected(&mut self) -> Option<Shape> {
        let id = self.selected_id()?;
        let removed = self.remove_shape(id);
        self.clear_selection();
        removed
    }

    /// Forget every shape and undo state and delete the stored state.
    pub fn clear_persistent_data(&mut self) {
        self.shapes.clear();
        self.history.clear();
        if let Err(err) = self.storage.delete() {
            log::error!("Failed to delete saved canvas state: {err}");
        }
    }

    /// [`select_at`](Self::select_at) for a point on screen.
    pub fn select_shape_at(&mut self, camera: &Camera, view_point: Point) -> Option<ShapeId> {
        self.select_at(camera.screen_to_world(view_point))
    }

    /// Resize handle of the selected shape under a point on screen.
    pub fn handle_at(&self, camera: &Camera, view_point: Point) -> Option<HandleKind> {
        let point = camera.screen_to_world(view_point);
        self.selected_shape()?.handle_at(point)
    }

    /// Move the selected shape by a drag delta measured on screen.
    pub fn move_selected_by_screen(&mut self, camera: &Camera, delta: Vec2) -> bool {
        self.move_selected(camera.screen_delta_to_world(delta))
    }

    /// [`resize_selected`](Self::resize_selected) for a point on screen.
    pub fn resize_selected_to(
        &mut self,
        camera: &Camera,
        handle: HandleKind,
        view_point: Point,
    ) -> bool {
        self.resize_selected(handle, camera.screen_to_world(view_point))
    }
}

/// Runtime canvas state: the document together with its view and tools.
#[derive(Debug)]
pub struct Canvas {
    /// The document being edited.
    pub document: CanvasDocument,
    /// Camera for view transform.
    pub camera: Camera,
    /// Tool manager.
    pub tool_manager: ToolManager,
    unsaved_changes: bool,
}

impl Default for Canvas {
    fn default() -> Self {
        Self::new(&CanvasConfig::default(), Box::new(MemoryStorage::new()))
    }
}

impl Canvas {
    /// Create a canvas over the given storage.
    pub fn new(config: &CanvasConfig, storage: Box<dyn StateStorage>) -> Self {
        Self {
            document: CanvasDocument::new(config.virtual_size(), storage),
            camera: Camera::new(config.virtual_size(), config.viewport_size()),
            tool_manager: ToolManager::new(),
            unsaved_changes: false,
        }
    }

    /// Create a canvas backed by the configured state file.
    ///
    /// Falls back to memory-only storage if the storage directory cannot be
    /// prepared.
    pub fn open(config: &CanvasConfig) -> Self {
        let storage: Box<dyn StateStorage> = match config.open_storage() {
            Ok(storage) => {
                log::info!("Using canvas state at {}", storage.path().display());
                Box::new(storage)
            }
            Err(err) => {
                log::error!("Canvas state will not be saved: {err}");
                Box::new(MemoryStorage::new())
            }
        };
        Self::new(config, storage)
    }

    fn track(&mut self, changed: bool) -> bool {
        self.unsaved_changes |= changed;
        changed
    }

    /// Whether anything changed since the last [`mark_saved`](Self::mark_saved).
    pub fn has_unsaved_changes(&self) -> bool {
        self.unsaved_changes
    }

    pub fn mark_saved(&mut self) {
        self.unsaved_changes = false;
    }

    pub fn set_tool(&mut self, tool: ToolKind) {
        self.tool_manager.set_tool(tool);
    }

    /// Update the physical viewport size.
    pub fn set_viewport_size(&mut self, size: Size) {
        self.camera.set_viewport_size(size);
    }

    /// Select the topmost shape under a screen point.
    pub fn select_shape_at(&mut self, view_point: Point) -> Option<ShapeId> {
        let hit = self.document.select_shape_at(&self.camera, view_point);
        self.track(hit.is_some());
        hit
    }

    pub fn handle_at(&self, view_point: Point) -> Option<HandleKind> {
        self.document.handle_at(&self.camera, view_point)
    }

    /// Record the undo state at the start of a move drag.
    pub fn begin_move(&mut self) -> bool {
        self.begin_manipulation()
    }

    /// Record the undo state at the start of a resize drag.
    pub fn begin_resize(&mut self) -> bool {
        self.begin_manipulation()
    }

    fn begin_manipulation(&mut self) -> bool {
        if self.document.selected_shape().is_none() {
            return false;
        }
        self.document.save_state();
        true
    }

    pub fn move_selected_by_screen(&mut self, delta: Vec2) -> bool {
        let moved = self.document.move_selected_by_screen(&self.camera, delta);
        self.track(moved)
    }

    pub fn resize_selected_to(&mut self, handle: HandleKind, view_point: Point) -> bool {
        let resized = self.document.resize_selected_to(&self.camera, handle, view_point);
        self.track(resized)
    }

    pub fn delete_selected(&mut self) -> bool {
        let deleted = self.document.delete_selected().is_some();
        self.track(deleted)
    }

    pub fn clear(&mut self) {
        self.document.clear();
        self.track(true);
    }

    pub fn undo(&mut self) -> bool {
        let undone = self.document.undo();
        self.track(undone)
    }

    /// In-progress shape for a drag between two screen points.
    pub fn preview_shape(&self, start_view: Point, current_view: Point) -> Option<Shape> {
        self.tool_manager.preview_shape(
            self.camera.screen_to_world(start_view),
            self.camera.screen_to_world(current_view),
        )
    }

    /// Finish a drawing drag and add the resulting shape.
    pub fn finish_drawing(&mut self, start_view: Point, end_view: Point) -> bool {
        let shape = self.tool_manager.finish_shape(
            self.camera.screen_to_world(start_view),
            self.camera.screen_to_world(end_view),
        );
        let added = shape.is_some_and(|shape| self.document.add_shape(shape));
        self.track(added)
    }

    /// Set the outline color for new shapes and the selected shape.
    pub fn set_stroke_color(&mut self, color: SerializableColor) -> bool {
        self.tool_manager.stroke_color = color;
        let changed = self.document.set_selected_stroke(Some(color));
        self.track(changed)
    }

    /// Set the fill color for new shapes and the selected shape.
    pub fn set_fill_color(&mut self, color: SerializableColor) -> bool {
        self.tool_manager.fill_color = color;
        let changed = self.document.set_selected_fill(Some(color));
        self.track(changed)
    }

    pub fn zoom_by(&mut self, delta: f64, view_point: Point) {
        self.camera.zoom_by(delta, view_point);
    }

    fn viewport_center(&self) -> Point {
        let size = self.camera.viewport_size;
        Point::new(size.width / 2.0, size.height / 2.0)
    }

    pub fn zoom_in(&mut self) {
        self.camera.zoom_by(ZOOM_STEP, self.viewport_center());
    }

    pub fn zoom_out(&mut self) {
        self.camera.zoom_by(-ZOOM_STEP, self.viewport_center());
    }

    pub fn pan(&mut self, delta: Vec2) {
        self.camera.pan(delta);
    }

    /// Pan one keyboard step in each direction given by the signs of
    /// `dx` and `dy`.
    pub fn pan_step(&mut self, dx: f64, dy: f64) {
        let step = |d: f64| if d == 0.0 { 0.0 } else { d.signum() * PAN_STEP };
        self.camera.pan(Vec2::new(step(dx), step(dy)));
    }

    pub fn reset_view(&mut self) {
        self.camera.reset();
    }
}
