use byteorder::{BigEndian, ByteOrder};

use crate::{ClassFileError, Result};

/// Forward-only reader over an in-memory class image.
///
/// There is no way to seek or peek: every read consumes the bytes it returns.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    buf: &'a [u8],
    offset: usize,
}

impl<'a> ByteCursor<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, offset: 0 }
    }

    pub fn position(&self) -> usize {
        self.offset
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.offset
    }

    /// Returns the next `n` bytes, or `TruncatedInput` without advancing if fewer remain.
    pub fn take_exact(&mut self, n: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if n > available {
            return Err(ClassFileError::TruncatedInput {
                offset: self.offset,
                needed: n,
                available,
            });
        }

        let bytes = &self.buf[self.offset..self.offset + n];
        self.offset += n;
        Ok(bytes)
    }

    pub fn take_u1(&mut self) -> Result<u8> {
        Ok(self.take_exact(1)?[0])
    }

    pub fn take_u2(&mut self) -> Result<u16> {
        Ok(BigEndian::read_u16(self.take_exact(2)?))
    }

    pub fn take_u4(&mut self) -> Result<u32> {
        Ok(BigEndian::read_u32(self.take_exact(4)?))
    }
}

#[cfg(test)]
mod take_tests {
    use super::*;

    #[test]
    fn it_should_read_big_endian_integers() {
        let mut cursor = ByteCursor::new(&[0x01, 0x12, 0x34, 0xca, 0xfe, 0xba, 0xbe]);

        assert_eq!(cursor.take_u1().unwrap(), 0x01);
        assert_eq!(cursor.take_u2().unwrap(), 0x1234);
        assert_eq!(cursor.take_u4().unwrap(), 0xCAFEBABE);
        assert_eq!(cursor.remaining(), 0);
    }

    #[test]
    fn it_should_advance_by_exactly_the_bytes_taken() {
        let mut cursor = ByteCursor::new(&[1, 2, 3, 4, 5]);

        assert_eq!(cursor.take_exact(3).unwrap(), &[1, 2, 3]);
        assert_eq!(cursor.position(), 3);
        assert_eq!(cursor.take_exact(0).unwrap(), &[] as &[u8]);
        assert_eq!(cursor.position(), 3);
    }

    #[test]
    fn it_should_fail_on_a_short_read() {
        let mut cursor = ByteCursor::new(&[0xca, 0xfe, 0xba]);

        assert_eq!(
            cursor.take_u4(),
            Err(ClassFileError::TruncatedInput {
                offset: 0,
                needed: 4,
                available: 3
            })
        );
    }

    #[test]
    fn it_should_not_advance_after_a_short_read() {
        let mut cursor = ByteCursor::new(&[0x00, 0x01, 0x02]);
        cursor.take_u1().unwrap();

        assert!(cursor.take_u4().is_err());
        assert_eq!(cursor.position(), 1);
        assert_eq!(cursor.take_u2().unwrap(), 0x0102);
    }
}
