use super::*;

use crate::marshal;
use crate::script::ScriptStack;

/// Values per pixel for a client-side pixel `format`. Unlisted formats are
/// sized as four components.
pub fn format_components(format: GLenum) -> usize {
    match format {
        gl::RED | gl::GREEN | gl::BLUE |
        gl::RED_INTEGER | gl::GREEN_INTEGER | gl::BLUE_INTEGER |
        gl::DEPTH_COMPONENT | gl::STENCIL_INDEX => 1,
        gl::RG | gl::RG_INTEGER | gl::DEPTH_STENCIL => 2,
        gl::RGB | gl::BGR | gl::RGB_INTEGER | gl::BGR_INTEGER => 3,
        _ => 4,
    }
}

fn pixel_elements(width: GLsizei, height: GLsizei, format: GLenum) -> usize {
    width.max(0) as usize * height.max(0) as usize * format_components(format)
}

/// Pixel transfers size client memory from the tag's width, which is only
/// trustworthy for the seven known element types.
fn check_pixel_type(tag: NumericTypeTag) -> Result<(), TransferError> {
    if tag.is_known() {
        Ok(())
    } else {
        Err(TransferError::UnsupportedType(tag.code()))
    }
}

/// # Safety
/// A GL context must be current on this thread with its functions loaded.
#[inline]
pub unsafe fn buffer_data_from(target: GLenum, buffer: &NativeBuffer, usage: GLenum) -> Result<(), GlError> {
    gl::BufferData(target, buffer.size(), buffer.as_ptr(), usage);
    get_error()
}

/// # Safety
/// A GL context must be current on this thread with its functions loaded.
/// The buffer bound at `target` must hold `offset + buffer.len()` bytes.
#[inline]
pub unsafe fn buffer_sub_data_from(target: GLenum, offset: usize, buffer: &NativeBuffer) -> Result<(), GlError> {
    if buffer.is_null() {
        return Ok(());
    }
    gl::BufferSubData(target, offset as GLintptr, buffer.size(), buffer.as_ptr());
    get_error()
}

/// Encodes the table or string argument at `pos` and hands it to
/// `glBufferData` for the buffer bound at `target`.
///
/// # Safety
/// A GL context must be current on this thread with its functions loaded.
pub unsafe fn buffer_data_from_script<S>(
    stack: &S,
    pos: usize,
    target: GLenum,
    tag: NumericTypeTag,
    usage: GLenum,
) -> Result<(), TransferError>
where
    S: ScriptStack + ?Sized,
{
    let buffer = marshal::encode_for_upload(stack, tag, pos)?;
    buffer_data_from(target, &buffer, usage)?;
    Ok(())
}

/// Uploads `buffer` into a region of the 2D texture bound at `target`,
/// reading tightly packed rows from client memory.
///
/// Fails with `UnsupportedType` for tags outside the seven known types and
/// with `BufferTooSmall` when `buffer` can't cover the region; GL is not
/// called in either case.
///
/// # Safety
/// A GL context must be current on this thread with its functions loaded.
pub unsafe fn tex_sub_image_2d_from(
    target: GLenum,
    level: GLint,
    x: GLint,
    y: GLint,
    width: GLsizei,
    height: GLsizei,
    format: GLenum,
    buffer: &NativeBuffer,
) -> Result<(), TransferError> {
    check_pixel_type(buffer.tag())?;
    let needed = pixel_elements(width, height, format) * buffer.tag().width();
    if buffer.len() < needed {
        return Err(TransferError::BufferTooSmall { needed, len: buffer.len() });
    }

    gl_with_temp_state!(
        unpack_alignment = UNPACK_ALIGNMENT,
        unpack_buffer = PIXEL_UNPACK_BUFFER_BINDING,
        {
            gl::BindBuffer(gl::PIXEL_UNPACK_BUFFER, 0);
            gl::PixelStorei(gl::UNPACK_ALIGNMENT, 1);
            gl::TexSubImage2D(
                target, level, x, y, width, height,
                format, buffer.tag().code(), buffer.as_ptr(),
            );
        }
    );
    get_error()?;
    Ok(())
}

/// Reads a block of pixels from the current read framebuffer into a fresh
/// buffer of `tag` elements.
///
/// Fails with `UnsupportedType` before allocating for tags outside the seven
/// known types.
///
/// # Safety
/// A GL context must be current on this thread with its functions loaded.
pub unsafe fn read_pixels_into(
    x: GLint,
    y: GLint,
    width: GLsizei,
    height: GLsizei,
    format: GLenum,
    tag: NumericTypeTag,
) -> Result<NativeBuffer, TransferError> {
    check_pixel_type(tag)?;
    let mut buffer = NativeBuffer::zeroed(tag, pixel_elements(width, height, format));
    if buffer.is_null() {
        return Ok(buffer);
    }

    gl_with_temp_state!(
        pack_alignment = PACK_ALIGNMENT,
        pack_buffer = PIXEL_PACK_BUFFER_BINDING,
        {
            gl::BindBuffer(gl::PIXEL_PACK_BUFFER, 0);
            gl::PixelStorei(gl::PACK_ALIGNMENT, 1);
            gl::ReadPixels(x, y, width, height, format, tag.code(), buffer.as_mut_ptr());
        }
    );
    get_error()?;
    Ok(buffer)
}

/// `glReadPixels` straight into a script table; returns the number of
/// results pushed.
///
/// # Safety
/// A GL context must be current on this thread with its functions loaded.
pub unsafe fn read_pixels_to_script<S>(
    stack: &mut S,
    x: GLint,
    y: GLint,
    width: GLsizei,
    height: GLsizei,
    format: GLenum,
    tag: NumericTypeTag,
) -> Result<usize, TransferError>
where
    S: ScriptStack + ?Sized,
{
    let buffer = read_pixels_into(x, y, width, height, format, tag)?;
    Ok(marshal::decode_from_readback(stack, tag, buffer.as_bytes()))
}
