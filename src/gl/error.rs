use super::*;

bitflags! {
    /// Every error `glGetError` reported since the queue was last drained.
    pub struct GlError: u32 {
        const INVALID_ENUM                  = 1 << 0;
        const INVALID_VALUE                 = 1 << 1;
        const INVALID_OPERATION             = 1 << 2;
        const INVALID_FRAMEBUFFER_OPERATION = 1 << 3;
        const OUT_OF_MEMORY                 = 1 << 4;
        const UNRECOGNIZED                  = 1 << 31;
    }
}

impl GlError {
    pub fn from_code(code: GLenum) -> Self {
        match code {
            gl::NO_ERROR                      => GlError::empty(),
            gl::INVALID_ENUM                  => GlError::INVALID_ENUM,
            gl::INVALID_VALUE                 => GlError::INVALID_VALUE,
            gl::INVALID_OPERATION             => GlError::INVALID_OPERATION,
            gl::INVALID_FRAMEBUFFER_OPERATION => GlError::INVALID_FRAMEBUFFER_OPERATION,
            gl::OUT_OF_MEMORY                 => GlError::OUT_OF_MEMORY,
            _                                 => GlError::UNRECOGNIZED,
        }
    }
}

impl fmt::Display for GlError {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        fmt::Debug::fmt(self, f)
    }
}

impl Error for GlError { }

/// Drains the GL error queue.
pub unsafe fn get_error() -> Result<(), GlError> {
    let mut error = GlError::empty();
    loop {
        let next_error = gl::GetError();
        if next_error == gl::NO_ERROR {
            break;
        }
        error |= GlError::from_code(next_error);
    }
    if error.is_empty() {
        Ok(())
    } else {
        warn!("GL reported {}", error);
        Err(error)
    }
}

/// Failure of a transfer that marshals script values and then calls GL.
#[derive(Debug, thiserror::Error)]
pub enum TransferError {
    #[error(transparent)]
    Marshal(#[from] MarshalError),
    #[error("GL error: {0}")]
    Gl(#[from] GlError),
    #[error("unsupported pixel type {0:#06x}")]
    UnsupportedType(GLenum),
    #[error("buffer holds {len} bytes, transfer needs {needed}")]
    BufferTooSmall { needed: usize, len: usize },
}
