use serde::{Deserialize, Serialize};

use crate::geometry::{Point, Rect};

pub const MASK_WEIGHT_NONE: u8 = 0;
pub const MASK_WEIGHT_FULL: u8 = 255;

/// Mask resolution. `None` makes the interactor fill its entire rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MaskType {
    None,
    Low,
    Medium,
    High,
}

impl MaskType {
    /// Side length of the square weight grid.
    pub fn size(self) -> usize {
        match self {
            MaskType::None => 0,
            MaskType::Low => 8,
            MaskType::Medium => 16,
            MaskType::High => 32,
        }
    }
}

/// A square grid of per-cell weights refining an interactor's effective
/// shape within its bounding rectangle. Row-major, one byte per cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mask {
    mask_type: MaskType,
    data: Vec<u8>,
}

impl Mask {
    pub fn new(mask_type: MaskType) -> Self {
        let size = mask_type.size();
        Self {
            mask_type,
            data: vec![MASK_WEIGHT_NONE; size * size],
        }
    }

    pub fn mask_type(&self) -> MaskType {
        self.mask_type
    }

    pub fn size(&self) -> usize {
        self.mask_type.size()
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    pub fn weight(&self, row: usize, col: usize) -> u8 {
        self.data[row * self.size() + col]
    }

    pub fn set_weight(&mut self, row: usize, col: usize, weight: u8) {
        let size = self.size();
        self.data[row * size + col] = weight;
    }
}

/// Scene access needed for mask building: which object is frontmost at a
/// given GUI-space point. Backed by a camera ray-cast in the application;
/// must only be called from the owning thread.
pub trait ScenePicker {
    fn topmost_at(&self, point: Point) -> Option<String>;
}

/// Builds a stencil mask for the object `owner_id` within its projected
/// rectangle. Each cell center is probed against the scene; cells where the
/// owning object is frontmost get full weight, occluded cells get none.
pub fn build_mask(
    mask_type: MaskType,
    rect: &Rect,
    owner_id: &str,
    picker: &dyn ScenePicker,
) -> Mask {
    let mut mask = Mask::new(mask_type);
    let size = mask.size();

    for row in 0..size {
        let y = rect.y + (row as f32 + 0.5) * rect.height / size as f32;
        for col in 0..size {
            let x = rect.x + (col as f32 + 0.5) * rect.width / size as f32;
            let covered = picker
                .topmost_at(Point::new(x, y))
                .is_some_and(|hit| hit == owner_id);
            if covered {
                mask.set_weight(row, col, MASK_WEIGHT_FULL);
            }
        }
    }

    mask
}
