//! Bulk conversion between script sequences and [`NativeBuffer`]s.
//!
//! Both directions are single pass and allocate their result up front.
//! Encoding fails on the first element that isn't a number and drops
//! whatever it had written so far; decoding never fails and instead returns
//! fewer elements when the input is short (see [`TrailingElement`]).

use super::*;

use crate::codec::NumericTypeTag;
use crate::buffer::NativeBuffer;
use crate::script::{Kind, ScriptStack, Value};

/// An ordered, 1-based run of script values to be encoded.
pub trait SourceSequence {
    fn len(&self) -> usize;

    /// Element at 1-based `index`; `Value::Nil` past the end.
    fn get(&self, index: usize) -> Value;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl SourceSequence for [Value] {
    fn len(&self) -> usize {
        <[Value]>::len(self)
    }

    fn get(&self, index: usize) -> Value {
        index.checked_sub(1)
            .and_then(|i| <[Value]>::get(self, i))
            .cloned()
            .unwrap_or(Value::Nil)
    }
}

impl SourceSequence for Vec<Value> {
    fn len(&self) -> usize {
        self.as_slice().len()
    }

    fn get(&self, index: usize) -> Value {
        SourceSequence::get(self.as_slice(), index)
    }
}

/// A sequence argument read in place from the script stack.
pub struct StackSequence<'s, S: ?Sized> {
    stack: &'s S,
    pos:   usize,
}

impl<'s, S: ScriptStack + ?Sized> StackSequence<'s, S> {
    /// Fails with `TypeMismatch` unless the argument at `pos` is a sequence.
    pub fn new(stack: &'s S, pos: usize) -> Result<Self> {
        if stack.is_sequence(pos) {
            Ok(StackSequence { stack, pos })
        } else {
            Err(MarshalError::type_mismatch(pos, Kind::Table, stack.kind_at(pos)))
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }
}

impl<'s, S: ScriptStack + ?Sized> SourceSequence for StackSequence<'s, S> {
    fn len(&self) -> usize {
        self.stack.sequence_length(self.pos)
    }

    fn get(&self, index: usize) -> Value {
        self.stack.sequence_get(self.pos, index)
    }
}

/// What the decoder does with an element that ends exactly at the end of
/// the input.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TrailingElement {
    /// Only decode an element while another byte follows it, so an input of
    /// exactly `n * width` bytes yields `n - 1` values. Long-standing
    /// readback behaviour that existing scripts rely on.
    Drop,
    /// Decode every element that fits completely.
    Keep,
}

impl Default for TrailingElement {
    fn default() -> Self {
        TrailingElement::Drop
    }
}

/// Packs `seq` into a freshly allocated buffer of `seq.len()` elements.
///
/// An empty sequence produces a null buffer.
pub fn sequence_to_buffer<Q>(tag: NumericTypeTag, seq: &Q) -> Result<NativeBuffer>
where
    Q: SourceSequence + ?Sized,
{
    let count = seq.len();
    if count == 0 {
        trace!("encode {}: empty sequence, null buffer", tag);
        return Ok(NativeBuffer::null(tag));
    }

    let width = tag.width();
    let mut buffer = NativeBuffer::zeroed(tag, count);
    for (i, slot) in buffer.as_bytes_mut().chunks_exact_mut(width).enumerate() {
        let index = i + 1;
        let value = seq.get(index);
        match value.as_number() {
            Some(n) => tag.encode_into(n, slot),
            None => {
                return Err(MarshalError::ElementTypeMismatch {
                    index,
                    expected: Kind::Number,
                    actual:   value.kind(),
                });
            }
        }
    }

    trace!("encode {}: {} elements into {} bytes", tag, count, buffer.len());
    Ok(buffer)
}

/// Unpacks `bytes` with the historical exclusive bound.
#[inline]
pub fn buffer_to_sequence(tag: NumericTypeTag, bytes: &[u8]) -> Vec<f64> {
    buffer_to_sequence_with(tag, bytes, TrailingElement::Drop)
}

pub fn buffer_to_sequence_with(
    tag: NumericTypeTag,
    bytes: &[u8],
    trailing: TrailingElement,
) -> Vec<f64> {
    let width = tag.width();
    let size = bytes.len();

    let mut values = Vec::with_capacity(size / width);
    let mut start = 0;
    loop {
        let end = start + width;
        let fits = match trailing {
            TrailingElement::Drop => end < size,
            TrailingElement::Keep => end <= size,
        };
        if !fits {
            break;
        }
        values.push(tag.decode(&bytes[start..end]));
        start = end;
    }

    let consumed = values.len() * width;
    if consumed != size {
        debug!(
            "decode {}: {} of {} bytes used, {} elements",
            tag, consumed, size, values.len(),
        );
    } else {
        trace!("decode {}: {} elements from {} bytes", tag, values.len(), size);
    }
    values
}

/// Length of the sequence argument at `pos`.
pub fn checked_array_length<S>(stack: &S, pos: usize) -> Result<usize>
where
    S: ScriptStack + ?Sized,
{
    StackSequence::new(stack, pos).map(|seq| seq.len())
}

/// Turns the table (or byte string) at `pos` into a buffer for a GL upload.
///
/// Byte strings are taken as already packed and copied as-is.
pub fn encode_for_upload<S>(stack: &S, tag: NumericTypeTag, pos: usize) -> Result<NativeBuffer>
where
    S: ScriptStack + ?Sized,
{
    match stack.kind_at(pos) {
        Kind::String => {
            let bytes = stack.check_string(pos)?;
            trace!("encode {}: {} raw bytes passed through", tag, bytes.len());
            Ok(NativeBuffer::from_bytes(tag, bytes.to_vec()))
        }
        _ => sequence_to_buffer(tag, &StackSequence::new(stack, pos)?),
    }
}

/// Pushes the decoded contents of a readback buffer as one table and returns
/// the number of results pushed.
pub fn decode_from_readback<S>(stack: &mut S, tag: NumericTypeTag, bytes: &[u8]) -> usize
where
    S: ScriptStack + ?Sized,
{
    stack.push_sequence(buffer_to_sequence(tag, bytes));
    1
}
