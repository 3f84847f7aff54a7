//! Element-level conversion between script numbers and GL numeric encodings.
//!
//! Every GL type tag maps to one native Rust type. Decoding reinterprets
//! `width` bytes in native byte order and widens to `f64`; encoding narrows an
//! `f64` with an `as` cast and writes the native bytes back out.
//!
//! Narrowing follows `as` semantics: integers truncate toward zero and
//! saturate at the target bounds, NaN becomes 0, and `f64 -> f32` rounds to
//! nearest.

use super::*;

use bytemuck::Pod;

/// One of the GL numeric encodings a buffer can hold.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum NumericTypeTag {
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float32,
    /// Any other GL enum. Treated as a 1-byte unsigned element.
    Unknown(GLenum),
}

impl NumericTypeTag {
    pub const ALL: [NumericTypeTag; 7] = [
        NumericTypeTag::Int8,
        NumericTypeTag::UInt8,
        NumericTypeTag::Int16,
        NumericTypeTag::UInt16,
        NumericTypeTag::Int32,
        NumericTypeTag::UInt32,
        NumericTypeTag::Float32,
    ];

    pub fn from_code(code: GLenum) -> Self {
        match code {
            gl::BYTE           => NumericTypeTag::Int8,
            gl::UNSIGNED_BYTE  => NumericTypeTag::UInt8,
            gl::SHORT          => NumericTypeTag::Int16,
            gl::UNSIGNED_SHORT => NumericTypeTag::UInt16,
            gl::INT            => NumericTypeTag::Int32,
            gl::UNSIGNED_INT   => NumericTypeTag::UInt32,
            gl::FLOAT          => NumericTypeTag::Float32,
            other => {
                debug!("unknown GL type tag {:#06x}, assuming 1-byte elements", other);
                NumericTypeTag::Unknown(other)
            }
        }
    }

    /// Tag from a script integer. Values that don't fit a `GLenum` can't name
    /// a known type and take the fallback arm.
    pub fn from_script_integer(code: i64) -> Self {
        if code < 0 || code > GLenum::max_value() as i64 {
            debug!("type tag {} is out of GLenum range, assuming 1-byte elements", code);
            NumericTypeTag::Unknown(code as GLenum)
        } else {
            NumericTypeTag::from_code(code as GLenum)
        }
    }

    pub fn code(self) -> GLenum {
        match self {
            NumericTypeTag::Int8       => gl::BYTE,
            NumericTypeTag::UInt8      => gl::UNSIGNED_BYTE,
            NumericTypeTag::Int16      => gl::SHORT,
            NumericTypeTag::UInt16     => gl::UNSIGNED_SHORT,
            NumericTypeTag::Int32      => gl::INT,
            NumericTypeTag::UInt32     => gl::UNSIGNED_INT,
            NumericTypeTag::Float32    => gl::FLOAT,
            NumericTypeTag::Unknown(c) => c,
        }
    }

    #[inline]
    pub fn width(self) -> usize {
        match self {
            NumericTypeTag::Int8    => mem::size_of::<GLbyte>(),
            NumericTypeTag::UInt8   => mem::size_of::<GLubyte>(),
            NumericTypeTag::Int16   => mem::size_of::<GLshort>(),
            NumericTypeTag::UInt16  => mem::size_of::<GLushort>(),
            NumericTypeTag::Int32   => mem::size_of::<GLint>(),
            NumericTypeTag::UInt32  => mem::size_of::<GLuint>(),
            NumericTypeTag::Float32 => mem::size_of::<GLfloat>(),
            NumericTypeTag::Unknown(_) => 1,
        }
    }

    pub fn is_known(self) -> bool {
        match self {
            NumericTypeTag::Unknown(_) => false,
            _ => true,
        }
    }

    /// Decodes the first `self.width()` bytes of `bytes`.
    ///
    /// # Panics
    /// If `bytes` is shorter than one element.
    #[inline]
    pub fn decode(self, bytes: &[u8]) -> f64 {
        match self {
            NumericTypeTag::Int8    => read::<GLbyte>(bytes).to_f64(),
            NumericTypeTag::UInt8   => read::<GLubyte>(bytes).to_f64(),
            NumericTypeTag::Int16   => read::<GLshort>(bytes).to_f64(),
            NumericTypeTag::UInt16  => read::<GLushort>(bytes).to_f64(),
            NumericTypeTag::Int32   => read::<GLint>(bytes).to_f64(),
            NumericTypeTag::UInt32  => read::<GLuint>(bytes).to_f64(),
            NumericTypeTag::Float32 => read::<GLfloat>(bytes).to_f64(),
            NumericTypeTag::Unknown(_) => read::<GLubyte>(bytes).to_f64(),
        }
    }

    /// Narrows `value` and writes it into the first `self.width()` bytes of
    /// `out`.
    ///
    /// # Panics
    /// If `out` is shorter than one element.
    #[inline]
    pub fn encode_into(self, value: f64, out: &mut [u8]) {
        match self {
            NumericTypeTag::Int8    => write(GLbyte::from_f64(value), out),
            NumericTypeTag::UInt8   => write(GLubyte::from_f64(value), out),
            NumericTypeTag::Int16   => write(GLshort::from_f64(value), out),
            NumericTypeTag::UInt16  => write(GLushort::from_f64(value), out),
            NumericTypeTag::Int32   => write(GLint::from_f64(value), out),
            NumericTypeTag::UInt32  => write(GLuint::from_f64(value), out),
            NumericTypeTag::Float32 => write(GLfloat::from_f64(value), out),
            NumericTypeTag::Unknown(_) => write(GLubyte::from_f64(value), out),
        }
    }

    pub fn encode(self, value: f64) -> Encoded {
        let mut encoded = Encoded { bytes: [0; MAX_WIDTH], width: self.width() };
        self.encode_into(value, &mut encoded.bytes);
        encoded
    }
}

impl From<GLenum> for NumericTypeTag {
    fn from(code: GLenum) -> Self {
        NumericTypeTag::from_code(code)
    }
}

impl fmt::Display for NumericTypeTag {
    fn fmt(&self, f: &mut fmt::Formatter) -> Result<(), fmt::Error> {
        match *self {
            NumericTypeTag::Int8       => f.write_str("GL_BYTE"),
            NumericTypeTag::UInt8      => f.write_str("GL_UNSIGNED_BYTE"),
            NumericTypeTag::Int16      => f.write_str("GL_SHORT"),
            NumericTypeTag::UInt16     => f.write_str("GL_UNSIGNED_SHORT"),
            NumericTypeTag::Int32      => f.write_str("GL_INT"),
            NumericTypeTag::UInt32     => f.write_str("GL_UNSIGNED_INT"),
            NumericTypeTag::Float32    => f.write_str("GL_FLOAT"),
            NumericTypeTag::Unknown(c) => write!(f, "{:#06x}", c),
        }
    }
}

/// Widest element any tag produces.
pub const MAX_WIDTH: usize = 4;

/// The native bytes of one encoded element.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Encoded {
    bytes: [u8; MAX_WIDTH],
    width: usize,
}

impl std::ops::Deref for Encoded {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        &self.bytes[..self.width]
    }
}

#[inline]
pub fn width_of(tag: NumericTypeTag) -> usize {
    tag.width()
}

#[inline]
pub fn decode(tag: NumericTypeTag, bytes: &[u8]) -> f64 {
    tag.decode(bytes)
}

#[inline]
pub fn encode(tag: NumericTypeTag, value: f64) -> Encoded {
    tag.encode(value)
}

trait Element: Pod {
    fn from_f64(value: f64) -> Self;
    fn to_f64(self) -> f64;
}

macro_rules! impl_element {
    ($($ty:ty),+) => { $(
        impl Element for $ty {
            #[inline] fn from_f64(value: f64) -> Self { value as $ty }
            #[inline] fn to_f64(self) -> f64 { self as f64 }
        }
    )+ }
}

impl_element!(GLbyte, GLubyte, GLshort, GLushort, GLint, GLuint, GLfloat);

#[inline]
fn read<T: Element>(bytes: &[u8]) -> T {
    bytemuck::pod_read_unaligned(&bytes[..mem::size_of::<T>()])
}

#[inline]
fn write<T: Element>(value: T, out: &mut [u8]) {
    out[..mem::size_of::<T>()].copy_from_slice(bytemuck::bytes_of(&value));
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn test_widths() {
        assert_eq!(width_of(NumericTypeTag::Int8), 1);
        assert_eq!(width_of(NumericTypeTag::UInt8), 1);
        assert_eq!(width_of(NumericTypeTag::Int16), 2);
        assert_eq!(width_of(NumericTypeTag::UInt16), 2);
        assert_eq!(width_of(NumericTypeTag::Int32), 4);
        assert_eq!(width_of(NumericTypeTag::UInt32), 4);
        assert_eq!(width_of(NumericTypeTag::Float32), 4);
    }

    #[test]
    fn test_unknown_tag_falls_back_to_one_byte() {
        for &code in &[0u32, gl::DOUBLE, gl::HALF_FLOAT, 0xFFFF_FFFF] {
            let tag = NumericTypeTag::from_code(code);
            assert_eq!(tag, NumericTypeTag::Unknown(code));
            assert_eq!(tag.width(), 1);
        }
        assert_eq!(NumericTypeTag::from_script_integer(-1).width(), 1);
        assert_eq!(NumericTypeTag::Unknown(gl::DOUBLE).decode(&[200]), 200.0);
    }

    struct Recorder;

    lazy_static! {
        static ref RECORDS: std::sync::Mutex<Vec<(log::Level, String)>> = Default::default();
    }

    impl log::Log for Recorder {
        fn enabled(&self, _: &log::Metadata) -> bool { true }
        fn log(&self, record: &log::Record) {
            if let Ok(mut records) = RECORDS.lock() {
                records.push((record.level(), record.args().to_string()));
            }
        }
        fn flush(&self) { }
    }

    static RECORDER: Recorder = Recorder;

    #[test]
    fn test_unknown_tag_fallback_logs_quietly() {
        let _ = log::set_logger(&RECORDER);
        log::set_max_level(log::LevelFilter::Trace);

        for _ in 0..100 {
            NumericTypeTag::from_code(gl::HALF_FLOAT);
        }
        NumericTypeTag::from_script_integer(-1);

        let records = RECORDS.lock().unwrap();
        let fallbacks: Vec<_> = records.iter()
            .filter(|&&(_, ref message)| message.contains("assuming 1-byte elements"))
            .collect();
        assert!(!fallbacks.is_empty());
        assert!(fallbacks.iter().all(|&&(level, _)| level == log::Level::Debug));
    }

    #[test]
    fn test_codes_map_back() {
        for &tag in NumericTypeTag::ALL.iter() {
            assert!(tag.is_known());
            assert_eq!(NumericTypeTag::from_code(tag.code()), tag);
        }
        assert_eq!(NumericTypeTag::from_script_integer(gl::FLOAT as i64), NumericTypeTag::Float32);
    }

    #[test]
    fn test_decode_sign_and_zero_extension() {
        assert_eq!(NumericTypeTag::Int8.decode(&[0xFF]), -1.0);
        assert_eq!(NumericTypeTag::UInt8.decode(&[0xFF]), 255.0);
        assert_eq!(NumericTypeTag::Int16.decode(&(-2i16).to_ne_bytes()), -2.0);
        assert_eq!(NumericTypeTag::UInt16.decode(&[0xFF, 0xFF]), 65535.0);
        assert_eq!(NumericTypeTag::Int32.decode(&i32::min_value().to_ne_bytes()), i32::min_value() as f64);
        assert_eq!(NumericTypeTag::UInt32.decode(&[0xFF; 4]), 4294967295.0);
    }

    #[test]
    fn test_decode_reads_only_first_element() {
        let bytes = [1u16.to_ne_bytes(), 7u16.to_ne_bytes()].concat();
        assert_eq!(NumericTypeTag::UInt16.decode(&bytes), 1.0);
        assert_eq!(NumericTypeTag::UInt16.decode(&bytes[2..]), 7.0);
    }

    #[test]
    fn test_encode_native_bytes() {
        assert_eq!(&*encode(NumericTypeTag::Int16, -2.0), &(-2i16).to_ne_bytes()[..]);
        assert_eq!(&*encode(NumericTypeTag::Float32, 2.5), &2.5f32.to_ne_bytes()[..]);
        assert_eq!(encode(NumericTypeTag::UInt8, 7.0).len(), 1);
    }

    #[test]
    fn test_integer_ranges_round_trip() {
        let mut rng = rand::thread_rng();
        let ranges: [(NumericTypeTag, i64, i64); 6] = [
            (NumericTypeTag::Int8,   i8::min_value() as i64,  i8::max_value() as i64),
            (NumericTypeTag::UInt8,  0,                       u8::max_value() as i64),
            (NumericTypeTag::Int16,  i16::min_value() as i64, i16::max_value() as i64),
            (NumericTypeTag::UInt16, 0,                       u16::max_value() as i64),
            (NumericTypeTag::Int32,  i32::min_value() as i64, i32::max_value() as i64),
            (NumericTypeTag::UInt32, 0,                       u32::max_value() as i64),
        ];
        for &(tag, lo, hi) in ranges.iter() {
            for &value in &[lo, hi, 0] {
                assert_eq!(decode(tag, &encode(tag, value as f64)), value as f64, "{}", tag);
            }
            for _ in 0..256 {
                let value = rng.gen_range(lo, hi + 1);
                assert_eq!(decode(tag, &encode(tag, value as f64)), value as f64, "{}", tag);
            }
        }
    }

    #[test]
    fn test_float_round_trip_is_single_precision() {
        let tag = NumericTypeTag::Float32;
        for &exact in &[0.0, 1.0, -3.75, 2.5, 1024.0, 0.5] {
            assert_eq!(decode(tag, &encode(tag, exact)), exact);
        }
        let tenth = decode(tag, &encode(tag, 0.1));
        assert_ne!(tenth, 0.1);
        assert_eq!(tenth, 0.1f32 as f64);
    }

    #[test]
    fn test_narrowing_saturates_and_truncates() {
        assert_eq!(decode(NumericTypeTag::Int8, &encode(NumericTypeTag::Int8, 300.0)), 127.0);
        assert_eq!(decode(NumericTypeTag::Int8, &encode(NumericTypeTag::Int8, -300.0)), -128.0);
        assert_eq!(decode(NumericTypeTag::UInt8, &encode(NumericTypeTag::UInt8, -1.0)), 0.0);
        assert_eq!(decode(NumericTypeTag::UInt16, &encode(NumericTypeTag::UInt16, f64::NAN)), 0.0);
        assert_eq!(decode(NumericTypeTag::Int32, &encode(NumericTypeTag::Int32, -2.9)), -2.0);
        assert_eq!(decode(NumericTypeTag::UInt32, &encode(NumericTypeTag::UInt32, 1e12)), u32::max_value() as f64);
    }
}
