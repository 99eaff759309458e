use serde::Serialize;

use crate::error::{EditorError, EditorResult};
use crate::layer::{Layer, LayerId};

/// Tracks the single active layer, if any.
///
/// The active id always names a layer of the collection it was validated
/// against; [`Document`](crate::Document) clears it when that layer goes away.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selection {
    active: Option<LayerId>,
}

impl Selection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts with `active` selected. The caller guarantees it exists.
    pub(crate) fn starting_at(active: LayerId) -> Self {
        Self { active: Some(active) }
    }

    pub fn active_id(&self) -> Option<&LayerId> {
        self.active.as_ref()
    }

    pub fn is_active(&self, id: &LayerId) -> bool {
        self.active.as_ref() == Some(id)
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none()
    }

    /// Makes `id` the active layer. Returns the previously active id.
    ///
    /// Fails with [`EditorError::InvalidSelection`] if `id` is not in `layers`,
    /// in which case the selection is unchanged.
    pub fn select(&mut self, id: &LayerId, layers: &[Layer]) -> EditorResult<Option<LayerId>> {
        if !layers.iter().any(|layer| layer.id() == id) {
            return Err(EditorError::InvalidSelection(id.clone()));
        }
        Ok(self.active.replace(id.clone()))
    }

    /// Clears the selection and returns what was active
    pub fn clear(&mut self) -> Option<LayerId> {
        self.active.take()
    }

    pub fn active_layer<'a>(&self, layers: &'a [Layer]) -> Option<&'a Layer> {
        let active = self.active.as_ref()?;
        layers.iter().find(|layer| layer.id() == active)
    }

    /// Drops the selection if it points at `id`
    pub(crate) fn forget(&mut self, id: &LayerId) -> bool {
        if self.is_active(id) {
            self.active = None;
            true
        } else {
            false
        }
    }
}
