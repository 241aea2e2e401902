// https://docs.oracle.com/javase/specs/jvms/se19/html/jvms-4.html

mod access_flags;
pub mod attributes;
mod class_file;
#[macro_use]
pub mod constant_pool;
mod cursor;
mod error;
mod parser;
mod render;

use std::fmt;

pub use self::class_file::{ClassFile, MethodInfo, CLASS_FILE_MAGIC};
pub use access_flags::{AccessFlags, FlagContext};
pub use constant_pool::{ConstantPool, CpInfo};
pub use cursor::ByteCursor;
pub use error::ClassFileError;
pub use parser::Parser;
pub use render::write_report;

pub type Result<T, E = ClassFileError> = std::result::Result<T, E>;

/// A named, length-prefixed attribute whose payload is carried uninterpreted.
#[derive(Clone, PartialEq, Eq)]
pub struct Attribute {
    pub attribute_name_index: u16,
    pub info: Vec<u8>,
}
impl Attribute {
    pub fn length(&self) -> u32 {
        self.info.len() as u32
    }
}
impl fmt::Debug for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Attribute")
            .field("attribute_name_index", &self.attribute_name_index)
            .field("info", &format!("({} bytes)", self.info.len()))
            .finish()
    }
}
