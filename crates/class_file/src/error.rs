use thiserror::Error;

use crate::constant_pool;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ClassFileError {
    #[error("Truncated input at offset {offset}: needed {needed} bytes, {available} available")]
    TruncatedInput {
        offset: usize,
        needed: usize,
        available: usize,
    },
    #[error("Invalid magic identifier: 0x{0:08X}")]
    InvalidMagic(u32),
    #[error("Unsupported constant pool tag: {0}")]
    UnsupportedConstantTag(u8),
    #[error("Unsupported feature: {0}")]
    UnsupportedFeature(&'static str),
    #[error("Invalid constant pool index: {0}")]
    InvalidConstantPoolIndex(u16),
    #[error("Expected {0}, found {1:?}")]
    UnexpectedConstantPoolEntry(&'static str, constant_pool::CpInfo),
}
