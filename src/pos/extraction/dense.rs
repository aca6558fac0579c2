//! Dense array storage
//!
//! A `DenseArray` is the rectangular, zero-padded result of ragged-to-dense
//! conversion: one flat `f32` buffer with shape
//! `[frames][max_points][max_dims]`. Cells outside a frame's actual
//! `(point_count, dim_count)` are zero, never uninitialized.

use serde::Serialize;

/// Rectangular `[frames][max_points][max_dims]` array of `f32`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DenseArray {
    frames: usize,
    max_points: usize,
    max_dims: usize,
    values: Vec<f32>,
}

impl DenseArray {
    /// Allocate a zero-filled array of the given shape.
    pub fn zeros(frames: usize, max_points: usize, max_dims: usize) -> Self {
        Self {
            frames,
            max_points,
            max_dims,
            values: vec![0.0; frames * max_points * max_dims],
        }
    }

    /// The array shape as `(frames, max_points, max_dims)`
    pub fn shape(&self) -> (usize, usize, usize) {
        (self.frames, self.max_points, self.max_dims)
    }

    /// One cell. Panics if any index is outside the shape.
    pub fn get(&self, frame: usize, point: usize, dim: usize) -> f32 {
        self.values[self.offset(frame, point, dim)]
    }

    pub(crate) fn set(&mut self, frame: usize, point: usize, dim: usize, value: f32) {
        let offset = self.offset(frame, point, dim);
        self.values[offset] = value;
    }

    /// Reset one frame's slab to zero (used when the frame's extraction
    /// fails partway through).
    pub(crate) fn clear_frame(&mut self, frame: usize) {
        let stride = self.max_points * self.max_dims;
        let start = frame * stride;
        self.values[start..start + stride].fill(0.0);
    }

    /// One frame as a `[max_points * max_dims]` row-major slice
    pub fn frame(&self, frame: usize) -> &[f32] {
        let stride = self.max_points * self.max_dims;
        let start = frame * stride;
        &self.values[start..start + stride]
    }

    /// The whole buffer, frame-major
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    fn offset(&self, frame: usize, point: usize, dim: usize) -> usize {
        assert!(
            frame < self.frames && point < self.max_points && dim < self.max_dims,
            "index ({}, {}, {}) outside shape ({}, {}, {})",
            frame,
            point,
            dim,
            self.frames,
            self.max_points,
            self.max_dims
        );
        (frame * self.max_points + point) * self.max_dims + dim
    }
}
