/// Runs `$block` with the named pieces of GL state saved into `$temp`
/// beforehand and put back afterwards. The block must not return early.
macro_rules! gl_with_temp_state {
    ($($temp:ident = $get:ident),+, $block:block) => { {
        $(
            let $temp = gl::get(gl::$get);
        )+
        let result = $block;
        $(
            gl_restore_temp_state!($temp, $get);
        )+
        result
    } }
}

macro_rules! gl_restore_temp_state {
    ($temp:ident, PACK_ALIGNMENT)   => { gl::PixelStorei(gl::PACK_ALIGNMENT, $temp) };
    ($temp:ident, UNPACK_ALIGNMENT) => { gl::PixelStorei(gl::UNPACK_ALIGNMENT, $temp) };
    ($temp:ident, PIXEL_PACK_BUFFER_BINDING) => {
        gl::BindBuffer(gl::PIXEL_PACK_BUFFER, $temp)
    };
    ($temp:ident, PIXEL_UNPACK_BUFFER_BINDING) => {
        gl::BindBuffer(gl::PIXEL_UNPACK_BUFFER, $temp)
    };
}
