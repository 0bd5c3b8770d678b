//! Draw submission seam.

use crate::mesh::MeshBatch;

/// World-to-screen mapping applied by the consumer of a batch.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform2D {
    /// Uniform zoom.
    pub scale: f32,
    /// Screen-space translation after scaling.
    pub offset: [f32; 2],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform2D {
    /// No scaling, no offset.
    pub const IDENTITY: Self = Self { scale: 1.0, offset: [0.0, 0.0] };

    /// Maps a world point to screen space.
    #[inline]
    #[must_use]
    pub fn apply(&self, point: [f32; 2]) -> [f32; 2] {
        [point[0] * self.scale + self.offset[0], point[1] * self.scale + self.offset[1]]
    }
}

/// Receives one draw per tile-type batch.
///
/// Implemented by whatever owns the GPU. The store only decides what to
/// draw.
pub trait DrawSink {
    /// Submits a batch.
    fn draw_batch(&mut self, batch: &MeshBatch, transform: &Transform2D);
}

/// Sink that only counts submissions.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CountingSink {
    /// Batches received.
    pub draws: usize,
    /// Quads received.
    pub quads: usize,
}

impl DrawSink for CountingSink {
    fn draw_batch(&mut self, batch: &MeshBatch, _transform: &Transform2D) {
        self.draws += 1;
        self.quads += batch.quad_count();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transform_apply() {
        let t = Transform2D { scale: 2.0, offset: [-10.0, 5.0] };
        assert_eq!(t.apply([4.0, 4.0]), [-2.0, 13.0]);
        assert_eq!(Transform2D::IDENTITY.apply([7.0, 9.0]), [7.0, 9.0]);
    }
}
