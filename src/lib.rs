//! Marshalling between a scripting host's dynamic values and the packed,
//! strictly typed byte buffers OpenGL consumes and produces.
//!
//! A script hands over a table of numbers (or a raw byte string) together
//! with a GL type tag such as `GL_FLOAT`; [`marshal::sequence_to_buffer`]
//! packs it into a [`NativeBuffer`] ready for `glBufferData`. Going the other
//! way, [`marshal::buffer_to_sequence`] unpacks a readback buffer into plain
//! `f64` values for the script.

#[macro_use]
extern crate bitflags;
#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate log;

pub mod gl;
use crate::gl::types::*;

mod error;
pub use crate::error::{MarshalError, Result};

pub mod codec;
pub use crate::codec::NumericTypeTag;

mod buffer;
pub use crate::buffer::NativeBuffer;

pub mod script;
pub use crate::script::{ArgStack, Kind, ScriptStack, Value};

pub mod marshal;
pub use crate::marshal::{
    buffer_to_sequence,
    buffer_to_sequence_with,
    checked_array_length,
    decode_from_readback,
    encode_for_upload,
    sequence_to_buffer,
    SourceSequence,
    StackSequence,
    TrailingElement,
};

pub mod binding;

use std::{
    error::Error,
    fmt,
    mem,
    ptr,
};
