use super::*;

mod bindings {
    include!(concat!(env!("OUT_DIR"), "/gl_bindings.rs"));
}
pub use crate::gl::bindings::*;

#[macro_use]
mod macros;

mod error;
pub use crate::gl::error::*;

mod get;
pub use crate::gl::get::*;

mod transfer;
pub use crate::gl::transfer::*;
