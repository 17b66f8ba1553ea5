//! CPU-side description of how one vertex record is packed.
//!
//! A [`BufferLayout`] is built by pushing attributes in the order they
//! appear inside the record; byte offsets and the overall stride fall out
//! of the declaration order. [`VertexArray::add_buffer`] walks the layout
//! to emit one attribute-pointer call per element.
//!
//! [`VertexArray::add_buffer`]: crate::renderer::VertexArray::add_buffer

/// Scalar kinds a vertex attribute can be made of.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeKind {
    Float,
    UnsignedInt,
    UnsignedByte,
}

impl AttributeKind {
    /// Size of one scalar of this kind, in bytes.
    pub fn size(self) -> u32 {
        match self {
            AttributeKind::Float => 4,
            AttributeKind::UnsignedInt => 4,
            AttributeKind::UnsignedByte => 1,
        }
    }

    /// The matching GL component type enum.
    pub fn gl_type(self) -> u32 {
        match self {
            AttributeKind::Float => glow::FLOAT,
            AttributeKind::UnsignedInt => glow::UNSIGNED_INT,
            AttributeKind::UnsignedByte => glow::UNSIGNED_BYTE,
        }
    }

    /// Whether fixed-point data of this kind is normalized to `0.0..=1.0`
    /// when the attribute is consumed as floats.
    pub fn normalized(self) -> bool {
        matches!(self, AttributeKind::UnsignedByte)
    }
}

/// Maps a Rust scalar onto its [`AttributeKind`], so layouts can be
/// declared with the same types the vertex structs are made of.
pub trait LayoutScalar {
    const KIND: AttributeKind;
}

impl LayoutScalar for f32 {
    const KIND: AttributeKind = AttributeKind::Float;
}

impl LayoutScalar for u32 {
    const KIND: AttributeKind = AttributeKind::UnsignedInt;
}

impl LayoutScalar for u8 {
    const KIND: AttributeKind = AttributeKind::UnsignedByte;
}

/// One attribute slot within a vertex record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BufferElement {
    pub kind: AttributeKind,
    pub count: u32,
    /// Byte offset of this attribute from the start of the record.
    pub offset: u32,
}

impl BufferElement {
    pub fn byte_size(&self) -> u32 {
        self.kind.size() * self.count
    }

    pub fn normalized(&self) -> bool {
        self.kind.normalized()
    }
}

/// Ordered attribute list plus the accumulated record stride.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BufferLayout {
    elements: Vec<BufferElement>,
    stride: u32,
}

impl BufferLayout {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `count` scalars of type `T` as the next attribute. The new
    /// element starts where the previous one ended.
    pub fn push<T: LayoutScalar>(&mut self, count: u32) -> &mut Self {
        self.elements.push(BufferElement {
            kind: T::KIND,
            count,
            offset: self.stride,
        });
        self.stride += T::KIND.size() * count;
        self
    }

    pub fn elements(&self) -> &[BufferElement] {
        &self.elements
    }

    /// Distance in bytes between the starts of consecutive records.
    pub fn stride(&self) -> u32 {
        self.stride
    }

    /// Whether `data_len` bytes divide into whole records of this layout.
    /// An empty layout has no record to divide by and fits nothing.
    pub fn fits(&self, data_len: usize) -> bool {
        self.stride != 0 && data_len % self.stride as usize == 0
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets_accumulate_in_push_order() {
        let mut layout = BufferLayout::new();
        layout.push::<f32>(3).push::<f32>(3).push::<f32>(2);

        let elements = layout.elements();
        assert_eq!(elements.len(), 3);
        assert_eq!(elements[0].offset, 0);
        assert_eq!(elements[1].offset, 12);
        assert_eq!(elements[2].offset, 24);
        assert_eq!(layout.stride(), 32);
    }

    #[test]
    fn stride_equals_sum_of_element_sizes() {
        let mut layout = BufferLayout::new();
        layout.push::<f32>(2).push::<u8>(4).push::<u32>(1);

        let total: u32 = layout.elements().iter().map(|e| e.byte_size()).sum();
        assert_eq!(layout.stride(), total);

        // each element starts where the previous ends
        for pair in layout.elements().windows(2) {
            assert_eq!(pair[1].offset, pair[0].offset + pair[0].byte_size());
        }
    }

    #[test]
    fn unsigned_bytes_are_normalized() {
        let mut layout = BufferLayout::new();
        layout.push::<u8>(4).push::<f32>(3).push::<u32>(2);

        let elements = layout.elements();
        assert!(elements[0].normalized());
        assert!(!elements[1].normalized());
        assert!(!elements[2].normalized());
    }

    #[test]
    fn gl_types_match_scalar_kinds() {
        assert_eq!(AttributeKind::Float.gl_type(), glow::FLOAT);
        assert_eq!(AttributeKind::UnsignedInt.gl_type(), glow::UNSIGNED_INT);
        assert_eq!(AttributeKind::UnsignedByte.gl_type(), glow::UNSIGNED_BYTE);
    }

    #[test]
    fn empty_layout_has_zero_stride() {
        let layout = BufferLayout::new();
        assert!(layout.is_empty());
        assert_eq!(layout.stride(), 0);
    }

    #[test]
    fn fits_accepts_only_whole_records() {
        let mut layout = BufferLayout::new();
        layout.push::<f32>(2).push::<f32>(2);
        assert_eq!(layout.stride(), 16);

        assert!(layout.fits(0));
        assert!(layout.fits(64));
        assert!(!layout.fits(65));
        assert!(!layout.fits(15));
    }

    #[test]
    fn empty_layout_fits_nothing() {
        let layout = BufferLayout::new();
        assert!(!layout.fits(0));
        assert!(!layout.fits(16));
    }
}
