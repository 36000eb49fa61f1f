//! Index buffers with a width chosen from the vertex count.

use serde::Serialize;

/// Largest vertex count addressable with 16-bit indices.
pub const MAX_NARROW_VERTICES: usize = 65535;

/// Triangle indices, either 16 or 32 bits wide.
///
/// The width is picked once from the total vertex count when the buffer
/// is created and never changes while it is filled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "width", content = "data", rename_all = "lowercase")]
pub enum IndexBuffer {
    /// Narrow indices for meshes of at most 65535 vertices.
    U16(Vec<u16>),
    /// Wide indices for anything larger.
    U32(Vec<u32>),
}

impl IndexBuffer {
    /// Create an empty buffer sized for `len` indices into a mesh of
    /// `total_vertices` vertices.
    pub(crate) fn with_capacity(total_vertices: usize, len: usize) -> Self {
        if total_vertices <= MAX_NARROW_VERTICES {
            IndexBuffer::U16(Vec::with_capacity(len))
        } else {
            IndexBuffer::U32(Vec::with_capacity(len))
        }
    }

    /// Append an index.
    ///
    /// The width was chosen from the vertex count this index addresses, so
    /// a narrow buffer never sees an index above `u16::MAX`.
    pub(crate) fn push(&mut self, index: u32) {
        match self {
            IndexBuffer::U16(v) => {
                debug_assert!(index as usize <= MAX_NARROW_VERTICES);
                v.push(index as u16);
            }
            IndexBuffer::U32(v) => v.push(index),
        }
    }

    /// Append a triangle.
    pub(crate) fn push_triangle(&mut self, a: u32, b: u32, c: u32) {
        self.push(a);
        self.push(b);
        self.push(c);
    }

    /// Number of indices.
    pub fn len(&self) -> usize {
        match self {
            IndexBuffer::U16(v) => v.len(),
            IndexBuffer::U32(v) => v.len(),
        }
    }

    /// True if the buffer holds no indices.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// True for 16-bit indices.
    pub fn is_narrow(&self) -> bool {
        matches!(self, IndexBuffer::U16(_))
    }

    /// Iterate over the indices, widened to `u32`.
    pub fn iter(&self) -> IndexIter<'_> {
        match self {
            IndexBuffer::U16(v) => IndexIter::U16(v.iter()),
            IndexBuffer::U32(v) => IndexIter::U32(v.iter()),
        }
    }
}

/// Iterator over an [`IndexBuffer`], yielding `u32`.
#[derive(Debug, Clone)]
pub enum IndexIter<'a> {
    /// Narrow source.
    U16(std::slice::Iter<'a, u16>),
    /// Wide source.
    U32(std::slice::Iter<'a, u32>),
}

impl Iterator for IndexIter<'_> {
    type Item = u32;

    fn next(&mut self) -> Option<u32> {
        match self {
            IndexIter::U16(it) => it.next().map(|&x| x as u32),
            IndexIter::U32(it) => it.next().copied(),
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self {
            IndexIter::U16(it) => it.size_hint(),
            IndexIter::U32(it) => it.size_hint(),
        }
    }
}

impl ExactSizeIterator for IndexIter<'_> {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_threshold() {
        assert!(IndexBuffer::with_capacity(0, 0).is_narrow());
        assert!(IndexBuffer::with_capacity(MAX_NARROW_VERTICES, 3).is_narrow());
        assert!(!IndexBuffer::with_capacity(MAX_NARROW_VERTICES + 1, 3).is_narrow());
    }

    #[test]
    fn test_push_and_read_back() {
        let mut narrow = IndexBuffer::with_capacity(10, 3);
        narrow.push_triangle(0, 2, 1);
        assert_eq!(narrow.iter().collect::<Vec<_>>(), vec![0, 2, 1]);
        assert_eq!(narrow.iter().len(), 3);

        let mut wide = IndexBuffer::with_capacity(100_000, 3);
        wide.push_triangle(70_000, 1, 99_999);
        assert_eq!(wide.iter().collect::<Vec<_>>(), vec![70_000, 1, 99_999]);
        assert_eq!(wide.len(), 3);
    }

    #[test]
    fn test_serialize_tagged() {
        let mut buf = IndexBuffer::with_capacity(3, 3);
        buf.push_triangle(0, 1, 2);
        let json = serde_json::to_string(&buf).unwrap();
        assert_eq!(json, r#"{"width":"u16","data":[0,1,2]}"#);
    }
}
