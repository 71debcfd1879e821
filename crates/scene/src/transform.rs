//! Decomposed node transforms.
//!
//! Nodes carry translation, scale, and rotation separately; the composed
//! [`Matrix`] applies scale and rotation about `origin` in local space, then
//! translation in parent space.

use glam::Vec2;
use vellum_core::Matrix;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Transform {
    pub translation: Vec2,
    pub scale: Vec2,
    /// Radians.
    pub rotation: f32,
    /// Pivot for scale/rotation, in local coordinates.
    pub origin: Vec2,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec2::ZERO,
            scale: Vec2::ONE,
            rotation: 0.0,
            origin: Vec2::ZERO,
        }
    }
}

impl Transform {
    pub fn from_translation(translation: Vec2) -> Self {
        Self {
            translation,
            ..Self::default()
        }
    }

    pub fn matrix(&self) -> Matrix {
        if self.rotation == 0.0 && self.scale == Vec2::ONE {
            // Common case: pure translation.
            Matrix::translate(self.translation.x, self.translation.y)
        } else {
            Matrix::from_trs(self.translation, self.rotation, self.scale, self.origin)
        }
    }

    pub fn is_identity(&self) -> bool {
        *self == Self::default()
    }
}

/// Partial transform update; `None` fields are untouched.
#[derive(Copy, Clone, Debug, Default)]
pub struct TransformPatch {
    pub x: Option<f32>,
    pub y: Option<f32>,
    pub scale_x: Option<f32>,
    pub scale_y: Option<f32>,
    pub rotation: Option<f32>,
    pub origin_x: Option<f32>,
    pub origin_y: Option<f32>,
}

impl TransformPatch {
    pub fn apply_to(self, t: &mut Transform) {
        if let Some(x) = self.x {
            t.translation.x = x;
        }
        if let Some(y) = self.y {
            t.translation.y = y;
        }
        if let Some(sx) = self.scale_x {
            t.scale.x = sx;
        }
        if let Some(sy) = self.scale_y {
            t.scale.y = sy;
        }
        if let Some(r) = self.rotation {
            t.rotation = r;
        }
        if let Some(ox) = self.origin_x {
            t.origin.x = ox;
        }
        if let Some(oy) = self.origin_y {
            t.origin.y = oy;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity_matrix_for_default() {
        assert!(Transform::default().matrix().is_identity());
    }

    #[test]
    fn test_translation_only() {
        let t = Transform::from_translation(Vec2::new(5.0, -3.0));
        assert_eq!(t.matrix().apply(Vec2::ZERO), Vec2::new(5.0, -3.0));
    }

    #[test]
    fn test_patch_merges() {
        let mut t = Transform::default();
        TransformPatch {
            x: Some(10.0),
            scale_x: Some(2.0),
            ..Default::default()
        }
        .apply_to(&mut t);
        assert_eq!(t.translation, Vec2::new(10.0, 0.0));
        assert_eq!(t.scale, Vec2::new(2.0, 1.0));
    }
}
