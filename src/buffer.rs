use super::*;

use crate::codec::NumericTypeTag;

/// Packed elements of one GL numeric type, owned by whoever holds it.
///
/// An empty buffer holds no allocation at all: [`NativeBuffer::as_ptr`]
/// returns null, which is what GL expects for "no data".
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NativeBuffer {
    tag:  NumericTypeTag,
    data: Option<Box<[u8]>>,
}

impl NativeBuffer {
    pub fn null(tag: NumericTypeTag) -> Self {
        NativeBuffer { tag, data: None }
    }

    /// Zero-filled room for `count` elements; null when `count` is 0.
    pub fn zeroed(tag: NumericTypeTag, count: usize) -> Self {
        if count == 0 {
            NativeBuffer::null(tag)
        } else {
            NativeBuffer::from_bytes(tag, vec![0; count * tag.width()])
        }
    }

    /// Wraps already-packed bytes. An empty `bytes` yields a null buffer.
    pub fn from_bytes(tag: NumericTypeTag, bytes: Vec<u8>) -> Self {
        let data = if bytes.is_empty() { None } else { Some(bytes.into_boxed_slice()) };
        NativeBuffer { tag, data }
    }

    #[inline]
    pub fn tag(&self) -> NumericTypeTag {
        self.tag
    }

    #[inline]
    pub fn is_null(&self) -> bool {
        self.data.is_none()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.data.as_ref().map_or(0, |data| data.len())
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Whole elements held. Trailing bytes of a pass-through buffer whose
    /// length isn't a multiple of the width are not counted.
    #[inline]
    pub fn element_count(&self) -> usize {
        self.len() / self.tag.width()
    }

    pub fn element(&self, index: usize) -> Option<f64> {
        let width = self.tag.width();
        let start = index.checked_mul(width)?;
        let bytes = self.as_bytes().get(start..start.checked_add(width)?)?;
        Some(self.tag.decode(bytes))
    }

    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        match self.data {
            Some(ref data) => &data[..],
            None => &[],
        }
    }

    #[inline]
    pub fn as_bytes_mut(&mut self) -> &mut [u8] {
        match self.data {
            Some(ref mut data) => &mut data[..],
            None => &mut [],
        }
    }

    /// Pointer for a GL call that borrows the buffer; null when empty.
    #[inline]
    pub fn as_ptr(&self) -> *const GLvoid {
        self.data.as_ref().map_or(ptr::null(), |data| data.as_ptr() as *const GLvoid)
    }

    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut GLvoid {
        self.data.as_mut().map_or(ptr::null_mut(), |data| data.as_mut_ptr() as *mut GLvoid)
    }

    #[inline]
    pub fn size(&self) -> GLsizeiptr {
        self.len() as GLsizeiptr
    }

    /// Hands the allocation to the host; `None` for a null buffer.
    pub fn into_boxed_bytes(self) -> Option<Box<[u8]>> {
        self.data
    }
}

impl AsRef<[u8]> for NativeBuffer {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_null_buffer_has_no_allocation() {
        let buffer = NativeBuffer::zeroed(NumericTypeTag::Float32, 0);
        assert!(buffer.is_null());
        assert!(buffer.as_ptr().is_null());
        assert_eq!(buffer.size(), 0);
        assert_eq!(buffer.element(0), None);
        assert_eq!(buffer.into_boxed_bytes(), None);

        assert!(NativeBuffer::from_bytes(NumericTypeTag::UInt8, vec![]).is_null());
    }

    #[test]
    fn test_zeroed_is_sized_by_width() {
        let buffer = NativeBuffer::zeroed(NumericTypeTag::Int16, 3);
        assert!(!buffer.is_null());
        assert_eq!(buffer.len(), 6);
        assert_eq!(buffer.element_count(), 3);
        assert_eq!(buffer.element(2), Some(0.0));
    }

    #[test]
    fn test_element_is_bounds_checked() {
        let mut buffer = NativeBuffer::zeroed(NumericTypeTag::UInt16, 2);
        buffer.as_bytes_mut()[2..4].copy_from_slice(&513u16.to_ne_bytes());
        assert_eq!(buffer.element(1), Some(513.0));
        assert_eq!(buffer.element(2), None);
        assert_eq!(buffer.element(usize::max_value()), None);
    }

    #[test]
    fn test_partial_trailing_element_is_not_counted() {
        let buffer = NativeBuffer::from_bytes(NumericTypeTag::Int32, vec![0; 7]);
        assert_eq!(buffer.len(), 7);
        assert_eq!(buffer.element_count(), 1);
        assert_eq!(buffer.element(1), None);
    }
}
