use super::*;

#[inline]
pub unsafe fn get<T: GlGet>(parameter: GLenum) -> T {
    let mut result = T::default();
    T::GL_GET(parameter, &mut result);
    result
}

pub unsafe trait GlGet: Default {
    const GL_GET: unsafe fn (GLenum, *mut Self);
}

unsafe impl GlGet for GLint {
    const GL_GET: unsafe fn (GLenum, *mut Self) = gl::GetIntegerv;
}
unsafe impl GlGet for GLuint {
    const GL_GET: unsafe fn (GLenum, *mut Self) = {
        unsafe fn get(p: GLenum, r: *mut GLuint) { gl::GetIntegerv(p, r as *mut GLint); }
        get
    };
}
