use bytemuck::{Pod, Zeroable};
use glam::Vec2;
use crate::components::color::Color;

/// A shaded sphere projected to a screen-space disc.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct SphereInstance {
    /// Screen position of the center in CSS pixels.
    pub x: f32,
    pub y: f32,
    /// Screen radius in CSS pixels.
    pub radius: f32,
    /// Distance in front of the camera (larger = farther).
    pub depth: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha: f32,
    /// Highlight offset from the center as a fraction of `radius`, in [-1, 1].
    pub light_dx: f32,
    pub light_dy: f32,
    /// Diffuse strength at the highlight.
    pub lit: f32,
    /// Brightness floor on the unlit side (ambient or emissive).
    pub floor: f32,
}

/// A projected point.
/// 8 floats = 32 bytes stride.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct PointInstance {
    pub x: f32,
    pub y: f32,
    /// Side length of the drawn square in CSS pixels.
    pub size: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha: f32,
    _pad: f32,
}

impl PointInstance {
    pub const FLOATS: usize = 8;

    pub fn new(pos: Vec2, size: f32, color: Color, alpha: f32) -> Self {
        Self {
            x: pos.x,
            y: pos.y,
            size,
            r: color.r,
            g: color.g,
            b: color.b,
            alpha,
            _pad: 0.0,
        }
    }
}

/// A contiguous run of projected polyline vertices.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PathRun {
    pub start: u32,
    pub len: u32,
    pub color: Color,
    pub alpha: f32,
}

/// One half of a projected ring: an outer and an inner arc of `samples`
/// vertices each. The band is traced outer arc forward, inner arc backward.
///
/// Rings are split into a far and a near half so a planet sorts between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnnulusRun {
    pub depth: f32,
    pub outer_start: u32,
    pub inner_start: u32,
    pub samples: u32,
    pub color: Color,
    pub alpha: f32,
}

/// One depth-ordered solid to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Solid<'a> {
    Sphere(&'a SphereInstance),
    Annulus(&'a AnnulusRun),
}

/// Render buffer holding everything the painter draws in one frame.
///
/// Draw order: points, then paths, then solids back-to-front.
pub struct RenderBuffer {
    pub clear_color: Color,
    /// Spheres sorted back-to-front.
    pub spheres: Vec<SphereInstance>,
    /// Annuli sorted back-to-front.
    pub annuli: Vec<AnnulusRun>,
    pub points: Vec<PointInstance>,
    pub paths: Vec<PathRun>,
    /// Screen-space vertex pool shared by paths and annuli.
    pub vertices: Vec<Vec2>,
}

impl RenderBuffer {
    pub fn new() -> Self {
        Self::with_capacity(64, 8192)
    }

    pub fn with_capacity(max_solids: usize, max_points: usize) -> Self {
        Self {
            clear_color: Color::BLACK,
            spheres: Vec::with_capacity(max_solids),
            annuli: Vec::with_capacity(4),
            points: Vec::with_capacity(max_points),
            paths: Vec::with_capacity(16),
            vertices: Vec::with_capacity(2048),
        }
    }

    pub fn clear(&mut self) {
        self.spheres.clear();
        self.annuli.clear();
        self.points.clear();
        self.paths.clear();
        self.vertices.clear();
    }

    pub fn sphere_count(&self) -> u32 {
        self.spheres.len() as u32
    }

    pub fn point_count(&self) -> u32 {
        self.points.len() as u32
    }

    /// Point instances as a flat float slice, `PointInstance::FLOATS` per instance.
    pub fn point_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.points)
    }

    /// Vertices of one path run.
    pub fn path_vertices(&self, run: &PathRun) -> &[Vec2] {
        let start = run.start as usize;
        &self.vertices[start..start + run.len as usize]
    }

    /// Outer and inner arcs of one annulus half.
    pub fn annulus_arcs(&self, run: &AnnulusRun) -> (&[Vec2], &[Vec2]) {
        let n = run.samples as usize;
        let outer = run.outer_start as usize;
        let inner = run.inner_start as usize;
        (&self.vertices[outer..outer + n], &self.vertices[inner..inner + n])
    }

    /// Spheres and annuli merged into a single back-to-front sequence.
    /// Both lists are already sorted; ties draw the annulus first.
    pub fn solids(&self) -> Vec<Solid<'_>> {
        let mut out = Vec::with_capacity(self.spheres.len() + self.annuli.len());
        let (mut i, mut j) = (0, 0);
        while i < self.spheres.len() || j < self.annuli.len() {
            let take_sphere = match (self.spheres.get(i), self.annuli.get(j)) {
                (Some(s), Some(a)) => s.depth > a.depth,
                (Some(_), None) => true,
                _ => false,
            };
            if take_sphere {
                out.push(Solid::Sphere(&self.spheres[i]));
                i += 1;
            } else {
                out.push(Solid::Annulus(&self.annuli[j]));
                j += 1;
            }
        }
        out
    }
}

impl Default for RenderBuffer {
    fn default() -> Self {
        Self::new()
    }
}
