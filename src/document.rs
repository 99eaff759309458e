use serde::Serialize;

use crate::error::{EditorError, EditorResult};
use crate::layer::{FlipAxis, ImageAssetRef, Layer, LayerId, LayerKind, LayerUpdate};
use crate::selection::Selection;

/// A layer removed by [`Document::delete`]
#[derive(Debug, Clone, PartialEq)]
pub struct DeletedLayer {
    pub layer: Layer,
    /// Where the layer sat in paint order
    pub index: usize,
    /// Whether removing it cleared the selection
    pub was_active: bool,
}

/// The ordered layer collection of a proof together with its selection.
///
/// Order is paint order: later layers paint on top. Every successful
/// mutation bumps [`version`](Self::version), so readers holding an older
/// version know their snapshot is stale.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Document {
    layers: Vec<Layer>,
    selection: Selection,
    version: u64,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    /// The starting proof: background, product photo and front logo, with
    /// the background selected.
    pub fn seeded() -> Self {
        let background = Layer::new("background-1", "Business Background", LayerKind::Background);
        Self {
            selection: Selection::starting_at(background.id().clone()),
            layers: vec![
                background,
                Layer::new("product-1", "Product Photo", LayerKind::Product),
                Layer::new("design-1", "Front Logo", LayerKind::Design),
            ],
            version: 0,
        }
    }

    pub fn from_layers(layers: Vec<Layer>) -> EditorResult<Self> {
        let mut document = Self::new();
        for layer in layers {
            document.insert_layer(layer)?;
        }
        document.version = 0;
        Ok(document)
    }

    pub fn layers(&self) -> &[Layer] {
        &self.layers
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn contains(&self, id: &LayerId) -> bool {
        self.index_of(id).is_some()
    }

    pub fn index_of(&self, id: &LayerId) -> Option<usize> {
        self.layers.iter().position(|layer| layer.id() == id)
    }

    pub fn layer(&self, id: &LayerId) -> EditorResult<&Layer> {
        self.layers
            .iter()
            .find(|layer| layer.id() == id)
            .ok_or_else(|| EditorError::NotFound(id.clone()))
    }

    fn layer_mut(&mut self, id: &LayerId) -> EditorResult<&mut Layer> {
        self.layers
            .iter_mut()
            .find(|layer| layer.id() == id)
            .ok_or_else(|| EditorError::NotFound(id.clone()))
    }

    fn touch(&mut self) {
        self.version += 1;
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn active_layer(&self) -> Option<&Layer> {
        self.selection.active_layer(&self.layers)
    }

    /// Selects `id`, returning the previously active id
    pub fn select(&mut self, id: &LayerId) -> EditorResult<Option<LayerId>> {
        let previous = self.selection.select(id, &self.layers)?;
        self.touch();
        Ok(previous)
    }

    pub fn clear_selection(&mut self) -> Option<LayerId> {
        let previous = self.selection.clear();
        if previous.is_some() {
            self.touch();
        }
        previous
    }

    /// Flips visibility and returns the new value
    pub fn toggle_visibility(&mut self, id: &LayerId) -> EditorResult<bool> {
        let visible = self.layer_mut(id)?.toggle_visible();
        self.touch();
        log::debug!("Layer {} visible: {}", id, visible);
        Ok(visible)
    }

    /// Flips the lock and returns the new value
    pub fn toggle_lock(&mut self, id: &LayerId) -> EditorResult<bool> {
        let locked = self.layer_mut(id)?.toggle_locked();
        self.touch();
        log::debug!("Layer {} locked: {}", id, locked);
        Ok(locked)
    }

    /// Removes a layer, keeping the relative order of the rest.
    ///
    /// If the layer was active the selection is cleared in the same call.
    pub fn delete(&mut self, id: &LayerId) -> EditorResult<DeletedLayer> {
        let index = self
            .index_of(id)
            .ok_or_else(|| EditorError::NotFound(id.clone()))?;
        let layer = self.layers.remove(index);
        let was_active = self.selection.forget(id);
        self.touch();
        log::debug!("Deleted layer {} at index {} (was active: {})", id, index, was_active);
        Ok(DeletedLayer {
            layer,
            index,
            was_active,
        })
    }

    /// Merges a partial update into a layer. Fields absent from `update`
    /// are left as they are.
    pub fn update_fields(&mut self, id: &LayerId, update: &LayerUpdate) -> EditorResult<()> {
        self.layer_mut(id)?.apply_update(update)?;
        self.touch();
        log::debug!("Updated layer {}: {:?}", id, update);
        Ok(())
    }

    pub fn set_image(&mut self, id: &LayerId, image: Option<ImageAssetRef>) -> EditorResult<()> {
        self.update_fields(id, &LayerUpdate::new().image(image))
    }

    /// Rotates by `degrees` and returns the resulting rotation
    pub fn rotate_by(&mut self, id: &LayerId, degrees: i32) -> EditorResult<i32> {
        let rotation = self.layer_mut(id)?.rotate_by(degrees)?;
        self.touch();
        Ok(rotation)
    }

    pub fn flip(&mut self, id: &LayerId, axis: FlipAxis) -> EditorResult<()> {
        self.layer_mut(id)?.flip(axis)?;
        self.touch();
        Ok(())
    }

    /// Appends a new layer on top with a freshly generated id
    pub fn add_layer(&mut self, kind: LayerKind, name: &str) -> LayerId {
        let mut id = LayerId::generate(kind);
        while self.contains(&id) {
            id = LayerId::generate(kind);
        }
        self.layers.push(Layer::new(id.clone(), name, kind));
        self.touch();
        log::debug!("Added {} layer {}", kind, id);
        id
    }

    /// Appends an existing layer on top. Its id must be new and its size positive.
    pub fn insert_layer(&mut self, layer: Layer) -> EditorResult<()> {
        if self.contains(layer.id()) {
            return Err(EditorError::DuplicateId(layer.id().clone()));
        }
        layer.size().validate()?;
        self.layers.push(layer);
        self.touch();
        Ok(())
    }

    /// Moves a layer to `new_index` in paint order, returning its old index.
    /// Indices past the end move the layer to the top.
    pub fn move_layer(&mut self, id: &LayerId, new_index: usize) -> EditorResult<usize> {
        let old_index = self
            .index_of(id)
            .ok_or_else(|| EditorError::NotFound(id.clone()))?;
        let layer = self.layers.remove(old_index);
        let new_index = new_index.min(self.layers.len());
        self.layers.insert(new_index, layer);
        self.touch();
        Ok(old_index)
    }
}
