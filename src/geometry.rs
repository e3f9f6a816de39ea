// geometry.rs - Wireframe meshes for decorative primitives
//
// Pure functions, built once when a scene mounts. Sizes match the
// primitives they stand in for: unit cube, unit-radius sphere and
// icosahedron, torus with ring radius 0.8 and tube radius 0.3.

use std::f32::consts::{PI, TAU};

use glam::Vec3;

const SPHERE_RINGS: usize = 6;
const SPHERE_SEGMENTS: usize = 12;
const TORUS_RADIUS: f32 = 0.8;
const TORUS_TUBE: f32 = 0.3;
const TORUS_RADIAL: usize = 8;
const TORUS_TUBULAR: usize = 16;

/// The closed set of primitive forms a decorative shape can take
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeKind {
    Sphere,
    Box,
    Torus,
    Icosahedron,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 4] = [Self::Sphere, Self::Box, Self::Torus, Self::Icosahedron];
}

#[derive(Debug, Clone, Default)]
pub struct Mesh {
    pub vertices: Vec<Vec3>,
    pub edges: Vec<[u16; 2]>,
}

pub fn mesh(kind: ShapeKind) -> Mesh {
    match kind {
        ShapeKind::Sphere => sphere(SPHERE_RINGS, SPHERE_SEGMENTS),
        ShapeKind::Box => cube(),
        ShapeKind::Torus => torus(TORUS_RADIUS, TORUS_TUBE, TORUS_RADIAL, TORUS_TUBULAR),
        ShapeKind::Icosahedron => icosahedron(),
    }
}

/// One mesh per kind, indexed by `ShapeKind as usize`
pub struct MeshSet([Mesh; 4]);

impl MeshSet {
    pub fn new() -> Self {
        Self(ShapeKind::ALL.map(mesh))
    }

    #[inline]
    pub fn get(&self, kind: ShapeKind) -> &Mesh {
        &self.0[kind as usize]
    }
}

impl Default for MeshSet {
    fn default() -> Self {
        Self::new()
    }
}

fn cube() -> Mesh {
    let vertices: Vec<Vec3> = (0..8)
        .map(|i| {
            let c = |bit: u32| if i & (1 << bit) == 0 { -0.5 } else { 0.5 };
            Vec3::new(c(0), c(1), c(2))
        })
        .collect();

    // Corners one bit apart share an edge
    let mut edges = Vec::with_capacity(12);
    for a in 0..8u16 {
        for b in (a + 1)..8 {
            if (a ^ b).count_ones() == 1 {
                edges.push([a, b]);
            }
        }
    }
    Mesh { vertices, edges }
}

fn icosahedron() -> Mesh {
    let phi = (1.0 + 5f32.sqrt()) / 2.0;
    let mut raw = Vec::with_capacity(12);
    for &a in &[-1.0, 1.0] {
        for &b in &[-phi, phi] {
            raw.push(Vec3::new(0.0, a, b));
            raw.push(Vec3::new(a, b, 0.0));
            raw.push(Vec3::new(b, 0.0, a));
        }
    }

    // Unnormalized edge length is exactly 2
    let mut edges = Vec::with_capacity(30);
    for a in 0..raw.len() {
        for b in (a + 1)..raw.len() {
            if (raw[a].distance_squared(raw[b]) - 4.0).abs() < 1e-3 {
                edges.push([a as u16, b as u16]);
            }
        }
    }
    let vertices = raw.into_iter().map(Vec3::normalize).collect();
    Mesh { vertices, edges }
}

fn sphere(rings: usize, segments: usize) -> Mesh {
    let mut vertices = Vec::with_capacity((rings - 1) * segments + 2);
    vertices.push(Vec3::Y);
    for i in 1..rings {
        let theta = PI * i as f32 / rings as f32;
        for j in 0..segments {
            let phi = TAU * j as f32 / segments as f32;
            vertices.push(Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin()));
        }
    }
    vertices.push(Vec3::NEG_Y);

    let south = (vertices.len() - 1) as u16;
    let at = |ring: usize, seg: usize| (1 + ring * segments + seg % segments) as u16;

    let mut edges = Vec::new();
    for j in 0..segments {
        edges.push([0, at(0, j)]);
        edges.push([at(rings - 2, j), south]);
    }
    for r in 0..rings - 1 {
        for j in 0..segments {
            edges.push([at(r, j), at(r, j + 1)]);
            if r + 1 < rings - 1 {
                edges.push([at(r, j), at(r + 1, j)]);
            }
        }
    }
    Mesh { vertices, edges }
}

fn torus(radius: f32, tube: f32, radial: usize, tubular: usize) -> Mesh {
    let mut vertices = Vec::with_capacity(radial * tubular);
    for i in 0..tubular {
        let u = TAU * i as f32 / tubular as f32;
        for j in 0..radial {
            let v = TAU * j as f32 / radial as f32;
            let r = radius + tube * v.cos();
            vertices.push(Vec3::new(r * u.cos(), r * u.sin(), tube * v.sin()));
        }
    }

    let at = |i: usize, j: usize| ((i % tubular) * radial + j % radial) as u16;
    let mut edges = Vec::with_capacity(2 * radial * tubular);
    for i in 0..tubular {
        for j in 0..radial {
            edges.push([at(i, j), at(i, j + 1)]);
            edges.push([at(i, j), at(i + 1, j)]);
        }
    }
    Mesh { vertices, edges }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn check_indices(m: &Mesh) {
        for &[a, b] in &m.edges {
            assert!((a as usize) < m.vertices.len());
            assert!((b as usize) < m.vertices.len());
            assert_ne!(a, b);
        }
    }

    #[test]
    fn cube_topology() {
        let m = mesh(ShapeKind::Box);
        assert_eq!((m.vertices.len(), m.edges.len()), (8, 12));
        check_indices(&m);
    }

    #[test]
    fn icosahedron_topology() {
        let m = mesh(ShapeKind::Icosahedron);
        assert_eq!((m.vertices.len(), m.edges.len()), (12, 30));
        for v in &m.vertices {
            assert!((v.length() - 1.0).abs() < 1e-5);
        }
        check_indices(&m);
    }

    #[test]
    fn sphere_topology() {
        let m = mesh(ShapeKind::Sphere);
        let ring_verts = (SPHERE_RINGS - 1) * SPHERE_SEGMENTS;
        assert_eq!(m.vertices.len(), ring_verts + 2);
        // ring loops + meridians
        assert_eq!(m.edges.len(), ring_verts + SPHERE_RINGS * SPHERE_SEGMENTS);
        check_indices(&m);
    }

    #[test]
    fn torus_stays_within_its_radii() {
        let m = mesh(ShapeKind::Torus);
        assert_eq!(m.vertices.len(), TORUS_RADIAL * TORUS_TUBULAR);
        assert_eq!(m.edges.len(), 2 * TORUS_RADIAL * TORUS_TUBULAR);
        for v in &m.vertices {
            let ring = v.truncate().length();
            assert!(ring >= TORUS_RADIUS - TORUS_TUBE - 1e-5);
            assert!(ring <= TORUS_RADIUS + TORUS_TUBE + 1e-5);
        }
        check_indices(&m);
    }

    #[test]
    fn mesh_set_indexes_by_kind() {
        let set = MeshSet::new();
        assert_eq!(set.get(ShapeKind::Box).vertices.len(), 8);
        assert_eq!(set.get(ShapeKind::Icosahedron).edges.len(), 30);
    }
}
