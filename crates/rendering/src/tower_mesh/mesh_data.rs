//! Vertex + index accumulator for the procedural tower layers.
//!
//! Every primitive is emitted with flat per-face normals. Polygons are given
//! in the XZ plane as `Vec2(x, z)` and must be convex.

use bevy::prelude::*;
use bevy::render::mesh::{Indices, PrimitiveTopology};
use bevy::render::render_asset::RenderAssetUsages;

/// Side count of the tube emitted for struts.
const STRUT_SIDES: usize = 6;

#[derive(Default)]
pub(crate) struct TowerMeshData {
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    indices: Vec<u32>,
}

impl TowerMeshData {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    pub(crate) fn into_mesh(self) -> Mesh {
        let uvs: Vec<[f32; 2]> = vec![[0.0, 0.0]; self.positions.len()];
        Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::RENDER_WORLD | RenderAssetUsages::MAIN_WORLD,
        )
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, self.positions)
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals)
        .with_inserted_attribute(Mesh::ATTRIBUTE_UV_0, uvs)
        .with_inserted_indices(Indices::U32(self.indices))
    }

    fn push_quad(&mut self, corners: [Vec3; 4], normal: Vec3) {
        let base = self.positions.len() as u32;
        for c in corners {
            self.positions.push(c.to_array());
            self.normals.push(normal.to_array());
        }
        self.indices
            .extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
    }

    fn push_fan(&mut self, polygon: &[Vec2], y: f32, up: bool) {
        if polygon.len() < 3 {
            return;
        }
        let base = self.positions.len() as u32;
        let normal = if up { Vec3::Y } else { Vec3::NEG_Y };
        for p in polygon {
            self.positions.push([p.x, y, p.y]);
            self.normals.push(normal.to_array());
        }
        // Polygons wind counter-clockwise seen from +Y (x right, z down the
        // screen), which is clockwise in Bevy's right-handed view, so the
        // upward cap reverses the fan.
        for k in 1..polygon.len() as u32 - 1 {
            if up {
                self.indices.extend_from_slice(&[base, base + k + 1, base + k]);
            } else {
                self.indices.extend_from_slice(&[base, base + k, base + k + 1]);
            }
        }
    }

    /// Vertical quad from `a` to `b` (both in XZ) spanning `y0..y1`.
    /// The normal points to the right of the a→b direction seen from above.
    pub(crate) fn add_wall(&mut self, a: Vec2, b: Vec2, y0: f32, y1: f32) {
        let edge = b - a;
        if edge.length_squared() < 1e-12 {
            return;
        }
        let n = Vec2::new(edge.y, -edge.x).normalize();
        let normal = Vec3::new(n.x, 0.0, n.y);
        self.push_quad(
            [
                Vec3::new(a.x, y0, a.y),
                Vec3::new(a.x, y1, a.y),
                Vec3::new(b.x, y1, b.y),
                Vec3::new(b.x, y0, b.y),
            ],
            normal,
        );
    }

    /// Closed prism extruded from a convex polygon between `y0` and `y1`.
    pub(crate) fn add_prism(&mut self, polygon: &[Vec2], y0: f32, y1: f32) {
        if polygon.len() < 3 {
            return;
        }
        self.push_fan(polygon, y1, true);
        self.push_fan(polygon, y0, false);
        for (k, a) in polygon.iter().enumerate() {
            let b = polygon[(k + 1) % polygon.len()];
            self.add_wall(*a, b, y0, y1);
        }
    }

    /// Hexagonal tube of `radius` from `start` to `end`, capped at both ends.
    pub(crate) fn add_strut(&mut self, start: Vec3, end: Vec3, radius: f32) {
        let axis = end - start;
        let Some(dir) = axis.try_normalize() else {
            return;
        };
        let side = dir.any_orthonormal_vector();
        let up = dir.cross(side);
        let ring: Vec<Vec3> = (0..STRUT_SIDES)
            .map(|k| {
                let angle = std::f32::consts::TAU * k as f32 / STRUT_SIDES as f32;
                (side * angle.cos() + up * angle.sin()) * radius
            })
            .collect();

        for k in 0..STRUT_SIDES {
            let r0 = ring[k];
            let r1 = ring[(k + 1) % STRUT_SIDES];
            let normal = (r0 + r1).normalize_or_zero();
            self.push_quad([start + r0, start + r1, end + r1, end + r0], normal);
        }

        for (center, normal) in [(start, -dir), (end, dir)] {
            let base = self.positions.len() as u32;
            self.positions.push(center.to_array());
            self.normals.push(normal.to_array());
            for r in &ring {
                self.positions.push((center + *r).to_array());
                self.normals.push(normal.to_array());
            }
            for k in 0..STRUT_SIDES as u32 {
                let a = base + 1 + k;
                let b = base + 1 + (k + 1) % STRUT_SIDES as u32;
                if normal.dot(dir) > 0.0 {
                    self.indices.extend_from_slice(&[base, a, b]);
                } else {
                    self.indices.extend_from_slice(&[base, b, a]);
                }
            }
        }
    }

    #[cfg(test)]
    pub(crate) fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }
}
