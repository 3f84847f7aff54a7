//! Script-callable entry points and the GL type constants scripts pass to
//! them.
//!
//! ```text
//! bytes = gl.TableToBytes(gl.FLOAT, { 1.0, 2.5, -3.75 })
//! t     = gl.BytesToTable(gl.FLOAT, bytes)   --> { 1.0, 2.5 }
//! ```

use super::*;

use std::collections::BTreeMap;

use crate::codec::NumericTypeTag;
use crate::marshal;
use crate::script::ScriptStack;

/// A native function as the host calls it; returns the number of results it
/// pushed.
pub type ScriptFn = fn(&mut dyn ScriptStack) -> Result<usize>;

pub static FUNCTIONS: [(&str, ScriptFn); 3] = [
    ("TableToBytes", table_to_bytes),
    ("BytesToTable", bytes_to_table),
    ("ArrayLength",  array_length),
];

lazy_static! {
    /// Type tag constants, keyed by their name without the `GL_` prefix.
    pub static ref CONSTANTS: BTreeMap<&'static str, GLenum> = {
        let mut constants = BTreeMap::new();
        constants.insert("BYTE",           gl::BYTE);
        constants.insert("UNSIGNED_BYTE",  gl::UNSIGNED_BYTE);
        constants.insert("SHORT",          gl::SHORT);
        constants.insert("UNSIGNED_SHORT", gl::UNSIGNED_SHORT);
        constants.insert("INT",            gl::INT);
        constants.insert("UNSIGNED_INT",   gl::UNSIGNED_INT);
        constants.insert("FLOAT",          gl::FLOAT);
        constants
    };
}

#[inline]
pub fn constant(name: &str) -> Option<GLenum> {
    CONSTANTS.get(name).cloned()
}

/// Where [`register`] installs functions and constants, typically the
/// script's `gl` table.
pub trait Namespace {
    fn set_function(&mut self, name: &'static str, function: ScriptFn);
    fn set_integer(&mut self, name: &'static str, value: i64);
}

pub fn register<N: Namespace + ?Sized>(namespace: &mut N) {
    for &(name, function) in FUNCTIONS.iter() {
        namespace.set_function(name, function);
    }
    for (&name, &value) in CONSTANTS.iter() {
        namespace.set_integer(name, value as i64);
    }
    debug!("registered {} functions and {} constants", FUNCTIONS.len(), CONSTANTS.len());
}

fn type_tag_arg(stack: &dyn ScriptStack, pos: usize) -> Result<NumericTypeTag> {
    stack.check_integer(pos).map(NumericTypeTag::from_script_integer)
}

/// `TableToBytes(type, table_or_string) -> string | nil`
pub fn table_to_bytes(stack: &mut dyn ScriptStack) -> Result<usize> {
    let tag = type_tag_arg(stack, 1)?;
    let buffer = marshal::encode_for_upload(&*stack, tag, 2)?;
    if buffer.is_null() {
        stack.push_nil();
    } else {
        stack.push_bytes(buffer.as_bytes());
    }
    Ok(1)
}

/// `BytesToTable(type, string) -> table`
pub fn bytes_to_table(stack: &mut dyn ScriptStack) -> Result<usize> {
    let tag = type_tag_arg(stack, 1)?;
    let bytes = stack.check_string(2)?.to_vec();
    Ok(marshal::decode_from_readback(stack, tag, &bytes))
}

/// `ArrayLength(table) -> number`
pub fn array_length(stack: &mut dyn ScriptStack) -> Result<usize> {
    let len = marshal::checked_array_length(&*stack, 1)?;
    stack.push_number(len as f64);
    Ok(1)
}
