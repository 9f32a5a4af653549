//! The layer stack: ordered layers, the current-layer pointer with its
//! LIFO history, the scratch preview surface, and the compositor.

use slab::Slab;
use tracing::debug;

use crate::canvas::layer::Layer;
use crate::canvas::surface::{Color, Surface};

pub type LayerId = usize;

pub const DEFAULT_MAX_LAYERS: usize = 10;

/// An ordered, never-empty collection of layers plus one scratch surface
/// for live shape previews. Paint order is back to front: later entries in
/// `order` draw on top. Exactly one layer is current at any time; every
/// change of the current layer pushes the previous one onto a history
/// stack so a deletion can fall back to the prior selection.
#[derive(Debug, Clone)]
pub struct LayerStack {
    layers: Slab<Layer>,
    order: Vec<LayerId>,
    current: LayerId,
    history: Vec<LayerId>,
    scratch: Surface,
    max_layers: usize,
}

impl LayerStack {
    pub fn new(width: u32, height: u32, key: Color, max_layers: usize) -> Self {
        let mut layers = Slab::new();
        let first = layers.insert(Layer::new(width, height, key));
        Self {
            layers,
            order: vec![first],
            current: first,
            history: Vec::new(),
            scratch: Surface::new(width, height, key),
            max_layers: max_layers.max(1),
        }
    }

    /// Rebuild a stack from decoded document pages, bottom layer first.
    /// The page count may exceed `max_layers`; the cap only limits
    /// interactive adds.
    pub fn from_surfaces(surfaces: Vec<Surface>, max_layers: usize) -> Self {
        assert!(!surfaces.is_empty());
        let key = surfaces[0].key();
        let (width, height) = (surfaces[0].width(), surfaces[0].height());

        let mut layers = Slab::new();
        let order: Vec<LayerId> = surfaces
            .into_iter()
            .map(|surface| layers.insert(Layer::from_surface(surface)))
            .collect();
        let current = *order.last().expect("non-empty surfaces");
        Self {
            layers,
            order,
            current,
            history: Vec::new(),
            scratch: Surface::new(width, height, key),
            max_layers: max_layers.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn width(&self) -> u32 {
        self.scratch.width()
    }

    pub fn height(&self) -> u32 {
        self.scratch.height()
    }

    pub fn max_layers(&self) -> usize {
        self.max_layers
    }

    pub fn current_id(&self) -> LayerId {
        self.current
    }

    pub fn order(&self) -> &[LayerId] {
        &self.order
    }

    pub fn history(&self) -> &[LayerId] {
        &self.history
    }

    pub fn layer(&self, id: LayerId) -> Option<&Layer> {
        self.layers.get(id)
    }

    pub fn layer_mut(&mut self, id: LayerId) -> Option<&mut Layer> {
        self.layers.get_mut(id)
    }

    pub fn current_layer(&self) -> &Layer {
        &self.layers[self.current]
    }

    pub fn current_layer_mut(&mut self) -> &mut Layer {
        &mut self.layers[self.current]
    }

    pub fn scratch(&self) -> &Surface {
        &self.scratch
    }

    pub fn scratch_mut(&mut self) -> &mut Surface {
        &mut self.scratch
    }

    /// Append a blank layer cloned from the top layer's geometry and make
    /// it current. Refused (returns `false`) at the layer cap.
    pub fn add_layer(&mut self) -> bool {
        if self.order.len() >= self.max_layers {
            debug!(cap = self.max_layers, "layer cap reached, add refused");
            return false;
        }
        let top = *self.order.last().expect("stack is never empty");
        let layer = self.layers[top].clone_without_content();
        let id = self.layers.insert(layer);
        self.order.push(id);
        self.history.push(self.current);
        self.current = id;
        debug!(id, total = self.order.len(), "layer added");
        true
    }

    /// Remove the current layer. Refused (returns `false`) when it is the
    /// last one. The new current layer comes from the history stack,
    /// falling back to the bottom layer.
    pub fn delete_layer(&mut self) -> bool {
        if self.order.len() <= 1 {
            return false;
        }
        let dead = self.current;
        self.order.retain(|&id| id != dead);
        self.history.retain(|&id| id != dead);
        self.layers.remove(dead);
        self.current = self
            .history
            .pop()
            .unwrap_or_else(|| self.order[0]);
        debug!(dead, current = self.current, "layer deleted");
        true
    }

    /// Swap the current layer with the one above it in paint order. The
    /// current pointer is unchanged.
    pub fn move_current_up(&mut self) -> bool {
        let Some(pos) = self.order.iter().position(|&id| id == self.current) else {
            return false;
        };
        if pos + 1 >= self.order.len() {
            return false;
        }
        self.order.swap(pos, pos + 1);
        true
    }

    pub fn move_current_down(&mut self) -> bool {
        let Some(pos) = self.order.iter().position(|&id| id == self.current) else {
            return false;
        };
        if pos == 0 {
            return false;
        }
        self.order.swap(pos, pos - 1);
        true
    }

    /// Make `id` the current layer, pushing the previous current onto
    /// history. No-op for unknown ids or when `id` is already current.
    pub fn set_current(&mut self, id: LayerId) -> bool {
        if id == self.current || !self.layers.contains(id) {
            return false;
        }
        self.history.push(self.current);
        self.current = id;
        true
    }

    pub fn toggle_visibility(&mut self, id: LayerId) {
        if let Some(layer) = self.layers.get_mut(id) {
            layer.visible = !layer.visible;
        }
    }

    pub fn clear_current(&mut self) {
        self.layers[self.current].surface.clear();
    }

    pub fn clear_scratch(&mut self) {
        self.scratch.clear();
    }

    /// Pure compositor: visible layers back to front at their offsets,
    /// then the scratch preview on top unconditionally.
    pub fn render_frame(&self) -> Surface {
        let mut frame = self.compose(Color::TRANSPARENT);
        self.scratch.composite_onto(&mut frame, (0, 0));
        frame
    }

    /// Visible layers flattened over an opaque background; the scratch
    /// preview is excluded. This is the export path.
    pub fn flatten(&self, background: Color) -> Surface {
        self.compose(background)
    }

    fn compose(&self, background: Color) -> Surface {
        let mut frame = Surface::new(self.width(), self.height(), background);
        for &id in &self.order {
            let layer = &self.layers[id];
            if !layer.visible {
                continue;
            }
            layer.surface.composite_onto(&mut frame, layer.offset);
        }
        frame
    }

    /// Layer surfaces in paint order, for the document encoder.
    pub fn surfaces(&self) -> Vec<&Surface> {
        self.order.iter().map(|&id| &self.layers[id].surface).collect()
    }
}
