//! The finalized output of a path: an immutable vertex buffer.

use crate::math::{point, vector, Point, Vector};

use bytemuck::{Pod, Zeroable};

use std::fmt;
use std::mem;
use std::ops::Deref;
use std::sync::Arc;

/// A vertex of the stroke geometry.
///
/// The layout is `#[repr(C)]`: two floats of position followed by two floats of
/// normal, see [`VertexLayout`](struct.VertexLayout.html).
#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, Pod, Zeroable)]
#[cfg_attr(feature = "serialization", derive(Serialize, Deserialize))]
pub struct PathVertex {
    pub position: [f32; 2],
    pub normal: [f32; 2],
}

impl PathVertex {
    #[inline]
    pub fn new(position: Point, normal: Vector) -> Self {
        PathVertex {
            position: position.to_array(),
            normal: normal.to_array(),
        }
    }

    #[inline]
    pub fn position(&self) -> Point {
        point(self.position[0], self.position[1])
    }

    /// The extrusion direction of the vertex.
    ///
    /// Unit length, except at joins where the length compensates for the angle
    /// between the two segments.
    #[inline]
    pub fn normal(&self) -> Vector {
        vector(self.normal[0], self.normal[1])
    }

    /// Position of the stroke outline at this vertex for a given line width.
    #[inline]
    pub fn extrude(&self, line_width: f32) -> Point {
        self.position() + self.normal() * (line_width * 0.5)
    }
}

/// Describes how `PathVertex` is laid out in memory for a GPU vertex fetch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct VertexLayout {
    pub stride: usize,
    pub position_offset: usize,
    pub normal_offset: usize,
    /// Number of float components of each attribute.
    pub components: usize,
}

impl VertexLayout {
    pub const PATH_VERTEX: Self = VertexLayout {
        stride: mem::size_of::<PathVertex>(),
        position_offset: 0,
        normal_offset: mem::size_of::<[f32; 2]>(),
        components: 2,
    };
}

/// An immutable, ordered sequence of vertices produced by finalizing a path.
///
/// Cloning the buffer is cheap and shares the storage, and the buffer can be sent
/// to another thread (typically the one uploading it to the GPU).
#[derive(Clone, PartialEq)]
pub struct VertexBuffer {
    vertices: Arc<[PathVertex]>,
}

impl VertexBuffer {
    /// A buffer without any vertex.
    pub fn empty() -> Self {
        VertexBuffer {
            vertices: Arc::from(Vec::new()),
        }
    }

    pub(crate) fn from_vec(vertices: Vec<PathVertex>) -> Self {
        VertexBuffer {
            vertices: Arc::from(vertices),
        }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    #[inline]
    pub fn vertices(&self) -> &[PathVertex] {
        &self.vertices
    }

    /// The vertices as raw bytes, ready to be copied into a GPU buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.vertices[..])
    }

    pub fn layout(&self) -> VertexLayout {
        VertexLayout::PATH_VERTEX
    }

    /// Iterate over the edges of the line-list interpretation of the buffer.
    pub fn edges(&self) -> impl Iterator<Item = (&PathVertex, &PathVertex)> + '_ {
        self.vertices.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Returns true if both buffers share the same storage.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.vertices, &other.vertices)
    }
}

impl Default for VertexBuffer {
    fn default() -> Self {
        Self::empty()
    }
}

impl From<Vec<PathVertex>> for VertexBuffer {
    fn from(vertices: Vec<PathVertex>) -> Self {
        VertexBuffer::from_vec(vertices)
    }
}

impl Deref for VertexBuffer {
    type Target = [PathVertex];
    fn deref(&self) -> &[PathVertex] {
        &self.vertices
    }
}

impl fmt::Debug for VertexBuffer {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("VertexBuffer")
            .field("len", &self.len())
            .field("vertices", &&self.vertices[..])
            .finish()
    }
}

#[test]
fn vertex_layout() {
    assert_eq!(VertexLayout::PATH_VERTEX.stride, 16);
    assert_eq!(VertexLayout::PATH_VERTEX.normal_offset, 8);

    let buffer = VertexBuffer::from_vec(vec![
        PathVertex::new(point(1.0, 2.0), vector(0.0, -1.0)),
        PathVertex::new(point(3.0, 4.0), vector(1.0, 0.0)),
    ]);
    assert_eq!(buffer.as_bytes().len(), 32);
    assert_eq!(&buffer.as_bytes()[0..4], &1.0f32.to_ne_bytes()[..]);
    assert_eq!(&buffer.as_bytes()[8..12], &0.0f32.to_ne_bytes()[..]);
    assert_eq!(&buffer.as_bytes()[16..20], &3.0f32.to_ne_bytes()[..]);
}

#[test]
fn empty_buffer() {
    let buffer = VertexBuffer::empty();
    assert!(buffer.is_empty());
    assert_eq!(buffer.as_bytes().len(), 0);
    assert_eq!(buffer.edges().count(), 0);
}

#[test]
fn extrude() {
    let v = PathVertex::new(point(1.0, 1.0), vector(0.0, -1.0));
    assert_eq!(v.extrude(2.0), point(1.0, 0.0));
    assert_eq!(v.extrude(-2.0), point(1.0, 2.0));
}

#[test]
fn buffers_can_be_sent_to_other_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<VertexBuffer>();
}
