use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use crate::error::{EditorError, EditorResult};

pub const OPACITY_MIN: i32 = 0;
pub const OPACITY_MAX: i32 = 100;
/// Rotation is kept within one full turn either way.
pub const ROTATION_LIMIT_DEG: i32 = 360;

/// A unique, stable identifier for a layer
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LayerId(String);

impl LayerId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Creates a fresh id for a layer of the given kind, e.g. `design-5f0c...`
    pub fn generate(kind: LayerKind) -> Self {
        Self(format!("{}-{}", kind.as_str(), Uuid::new_v4().simple()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LayerId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl From<String> for LayerId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// What a layer contributes to the proof. Fixed at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    Background,
    Product,
    Design,
}

impl LayerKind {
    pub const ALL: [LayerKind; 3] = [LayerKind::Background, LayerKind::Product, LayerKind::Design];

    pub fn as_str(&self) -> &'static str {
        match self {
            LayerKind::Background => "background",
            LayerKind::Product => "product",
            LayerKind::Design => "design",
        }
    }

    /// Text shown in place of a missing image
    pub fn placeholder_label(&self) -> &'static str {
        match self {
            LayerKind::Background => "Business Background",
            LayerKind::Product => "Product Photo",
            LayerKind::Design => "Logo/Design",
        }
    }
}

impl fmt::Display for LayerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque reference to an image owned by someone else (a path or a URL).
///
/// The store never opens or decodes it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageAssetRef(String);

impl ImageAssetRef {
    pub fn new(location: impl Into<String>) -> Self {
        Self(location.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last path segment, for labels
    pub fn display_name(&self) -> &str {
        self.0
            .rsplit(['/', '\\'])
            .find(|segment| !segment.is_empty())
            .unwrap_or(&self.0)
    }
}

impl fmt::Display for ImageAssetRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Offset in proof-local units. Unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Moves by `(dx, dy)`, stopping at the ends of the `i32` range
    pub fn saturating_offset(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x.saturating_add(dx), self.y.saturating_add(dy))
    }
}

/// Extent in proof-local units. Both components must be positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: i32,
    pub height: i32,
}

impl Size {
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    pub(crate) fn validate(&self) -> EditorResult<()> {
        for (field, value) in [("width", self.width), ("height", self.height)] {
            if value <= 0 {
                return Err(EditorError::OutOfRange {
                    field,
                    value: value as i64,
                    min: 1,
                    max: i32::MAX as i64,
                });
            }
        }
        Ok(())
    }
}

impl Default for Size {
    fn default() -> Self {
        Self::new(100, 100)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipAxis {
    Horizontal,
    Vertical,
}

/// Placement of a layer on the proof
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transform {
    pub position: Position,
    pub size: Size,
    /// Degrees, clockwise, within `-360..=360`
    pub rotation_deg: i32,
    pub flip_horizontal: bool,
    pub flip_vertical: bool,
}

/// Kind-specific text content edited from the property panel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerContent {
    Background { company_name: String, tagline: String },
    Product { product_type: String },
    Design,
}

impl LayerContent {
    pub fn empty_for(kind: LayerKind) -> Self {
        match kind {
            LayerKind::Background => LayerContent::Background {
                company_name: String::new(),
                tagline: String::new(),
            },
            LayerKind::Product => LayerContent::Product {
                product_type: String::new(),
            },
            LayerKind::Design => LayerContent::Design,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    id: LayerId,
    kind: LayerKind,
    name: String,
    visible: bool,
    locked: bool,
    /// Percent, `0..=100`
    opacity: u8,
    image: Option<ImageAssetRef>,
    transform: Transform,
    content: LayerContent,
}

impl Layer {
    pub fn new(id: impl Into<LayerId>, name: &str, kind: LayerKind) -> Self {
        Self {
            id: id.into(),
            kind,
            name: name.to_string(),
            visible: true,
            locked: false,
            opacity: OPACITY_MAX as u8,
            image: None,
            transform: Transform::default(),
            content: LayerContent::empty_for(kind),
        }
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    pub fn with_image(mut self, image: ImageAssetRef) -> Self {
        self.image = Some(image);
        self
    }

    pub fn id(&self) -> &LayerId {
        &self.id
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub fn opacity(&self) -> u8 {
        self.opacity
    }

    pub fn image(&self) -> Option<&ImageAssetRef> {
        self.image.as_ref()
    }

    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    pub fn position(&self) -> Position {
        self.transform.position
    }

    pub fn size(&self) -> Size {
        self.transform.size
    }

    pub fn content(&self) -> &LayerContent {
        &self.content
    }

    pub(crate) fn toggle_visible(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub(crate) fn toggle_locked(&mut self) -> bool {
        self.locked = !self.locked;
        self.locked
    }

    pub(crate) fn rotate_by(&mut self, degrees: i32) -> EditorResult<i32> {
        if self.locked {
            return Err(EditorError::Locked(self.id.clone()));
        }
        // Both terms are below a full turn, so the sum cannot overflow
        self.transform.rotation_deg =
            (self.transform.rotation_deg % ROTATION_LIMIT_DEG + degrees % ROTATION_LIMIT_DEG) % ROTATION_LIMIT_DEG;
        Ok(self.transform.rotation_deg)
    }

    pub(crate) fn flip(&mut self, axis: FlipAxis) -> EditorResult<()> {
        if self.locked {
            return Err(EditorError::Locked(self.id.clone()));
        }
        match axis {
            FlipAxis::Horizontal => self.transform.flip_horizontal = !self.transform.flip_horizontal,
            FlipAxis::Vertical => self.transform.flip_vertical = !self.transform.flip_vertical,
        }
        Ok(())
    }

    /// Merges `update` into this layer. Either every field applies or none does.
    pub(crate) fn apply_update(&mut self, update: &LayerUpdate) -> EditorResult<()> {
        if self.locked && update.touches_geometry() {
            return Err(EditorError::Locked(self.id.clone()));
        }
        if let Some(size) = &update.size {
            size.validate()?;
        }
        let wants_background_text = update.company_name.is_some() || update.tagline.is_some();
        if wants_background_text && self.kind != LayerKind::Background {
            return Err(EditorError::UnsupportedField {
                id: self.id.clone(),
                field: "company_name/tagline",
            });
        }
        if update.product_type.is_some() && self.kind != LayerKind::Product {
            return Err(EditorError::UnsupportedField {
                id: self.id.clone(),
                field: "product_type",
            });
        }

        if let Some(name) = &update.name {
            self.name = name.clone();
        }
        if let Some(position) = update.position {
            self.transform.position = position;
        }
        if let Some(size) = update.size {
            self.transform.size = size;
        }
        if let Some(opacity) = update.opacity {
            let clamped = opacity.clamp(OPACITY_MIN, OPACITY_MAX);
            if clamped != opacity {
                log::debug!("Clamped opacity {} to {} on {}", opacity, clamped, self.id);
            }
            self.opacity = clamped as u8;
        }
        if let Some(rotation) = update.rotation_deg {
            let clamped = rotation.clamp(-ROTATION_LIMIT_DEG, ROTATION_LIMIT_DEG);
            if clamped != rotation {
                log::debug!("Clamped rotation {} to {} on {}", rotation, clamped, self.id);
            }
            self.transform.rotation_deg = clamped;
        }
        if let Some(image) = &update.image {
            self.image = image.clone();
        }
        match &mut self.content {
            LayerContent::Background { company_name, tagline } => {
                if let Some(value) = &update.company_name {
                    *company_name = value.clone();
                }
                if let Some(value) = &update.tagline {
                    *tagline = value.clone();
                }
            }
            LayerContent::Product { product_type } => {
                if let Some(value) = &update.product_type {
                    *product_type = value.clone();
                }
            }
            LayerContent::Design => {}
        }
        Ok(())
    }
}

/// A partial set of field changes. `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LayerUpdate {
    pub name: Option<String>,
    pub position: Option<Position>,
    pub size: Option<Size>,
    /// Clamped into `0..=100` when applied
    pub opacity: Option<i32>,
    /// Clamped into `-360..=360` when applied
    pub rotation_deg: Option<i32>,
    /// `Some(None)` clears the image
    pub image: Option<Option<ImageAssetRef>>,
    pub company_name: Option<String>,
    pub tagline: Option<String>,
    pub product_type: Option<String>,
}

impl LayerUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn position(mut self, x: i32, y: i32) -> Self {
        self.position = Some(Position::new(x, y));
        self
    }

    pub fn size(mut self, width: i32, height: i32) -> Self {
        self.size = Some(Size::new(width, height));
        self
    }

    pub fn opacity(mut self, opacity: i32) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn rotation(mut self, degrees: i32) -> Self {
        self.rotation_deg = Some(degrees);
        self
    }

    pub fn image(mut self, image: Option<ImageAssetRef>) -> Self {
        self.image = Some(image);
        self
    }

    pub fn company_name(mut self, value: impl Into<String>) -> Self {
        self.company_name = Some(value.into());
        self
    }

    pub fn tagline(mut self, value: impl Into<String>) -> Self {
        self.tagline = Some(value.into());
        self
    }

    pub fn product_type(mut self, value: impl Into<String>) -> Self {
        self.product_type = Some(value.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// True if this update moves, resizes or rotates the layer
    pub fn touches_geometry(&self) -> bool {
        self.position.is_some() || self.size.is_some() || self.rotation_deg.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_opacity_is_clamped() {
        let mut layer = Layer::new("design-1", "Front Logo", LayerKind::Design);
        layer.apply_update(&LayerUpdate::new().opacity(250)).unwrap();
        assert_eq!(layer.opacity(), 100);
        layer.apply_update(&LayerUpdate::new().opacity(-3)).unwrap();
        assert_eq!(layer.opacity(), 0);
    }

    #[test]
    fn test_invalid_size_leaves_layer_untouched() {
        let mut layer = Layer::new("product-1", "Product Photo", LayerKind::Product);
        let before = layer.clone();
        let err = layer
            .apply_update(&LayerUpdate::new().name("Mug").size(0, 40))
            .unwrap_err();
        assert!(matches!(err, EditorError::OutOfRange { field: "width", .. }));
        assert_eq!(layer, before);
    }

    #[test]
    fn test_locked_layer_rejects_geometry_but_not_opacity() {
        let mut layer = Layer::new("background-1", "Business Background", LayerKind::Background);
        layer.toggle_locked();
        assert_eq!(
            layer.apply_update(&LayerUpdate::new().position(5, 5)),
            Err(EditorError::Locked(LayerId::new("background-1")))
        );
        assert!(layer.apply_update(&LayerUpdate::new().opacity(40)).is_ok());
        assert_eq!(layer.opacity(), 40);
        assert!(layer.flip(FlipAxis::Vertical).is_err());
    }

    #[test]
    fn test_content_fields_follow_kind() {
        let mut layer = Layer::new("product-1", "Product Photo", LayerKind::Product);
        layer.apply_update(&LayerUpdate::new().product_type("Mug")).unwrap();
        assert_eq!(
            layer.content(),
            &LayerContent::Product { product_type: "Mug".to_string() }
        );
        assert!(matches!(
            layer.apply_update(&LayerUpdate::new().tagline("Since 1999")),
            Err(EditorError::UnsupportedField { .. })
        ));
    }

    #[test]
    fn test_rotate_wraps_within_a_turn() {
        let mut layer = Layer::new("design-1", "Front Logo", LayerKind::Design);
        for _ in 0..5 {
            layer.rotate_by(90).unwrap();
        }
        assert_eq!(layer.transform().rotation_deg, 90);
    }

    #[test]
    fn test_rotate_by_extreme_degrees_stays_in_range() {
        let mut layer = Layer::new("design-1", "Front Logo", LayerKind::Design);
        layer.rotate_by(90).unwrap();
        let rotation = layer.rotate_by(i32::MAX).unwrap();
        assert_eq!(rotation, (90 + i32::MAX % 360) % 360);
        let rotation = layer.rotate_by(i32::MIN).unwrap();
        assert!((-ROTATION_LIMIT_DEG..ROTATION_LIMIT_DEG).contains(&rotation));
    }

    #[test]
    fn test_saturating_offset() {
        let position = Position::new(i32::MAX - 1, i32::MIN + 1);
        assert_eq!(position.saturating_offset(10, -10), Position::new(i32::MAX, i32::MIN));
        assert_eq!(Position::new(5, 5).saturating_offset(-2, 3), Position::new(3, 8));
    }

    #[test]
    fn test_asset_display_name() {
        assert_eq!(ImageAssetRef::new("/tmp/art/logo.png").display_name(), "logo.png");
        assert_eq!(ImageAssetRef::new("C:\\art\\mug.jpg").display_name(), "mug.jpg");
        assert_eq!(ImageAssetRef::new("logo.png").display_name(), "logo.png");
    }
}
