use std::{borrow::Cow, ops::Index};

#[macro_export]
macro_rules! matches_cp_info {
    ($cp:expr, $index:expr, $i:ident) => {
        match $cp.get($index) {
            Some($crate::constant_pool::CpInfo::$i(n)) => Ok(n),
            Some(c) => Err($crate::ClassFileError::UnexpectedConstantPoolEntry(
                stringify!($i),
                c.clone(),
            )),
            None => Err($crate::ClassFileError::InvalidConstantPoolIndex($index)),
        }
    };
}

/// The constant pool table. Entries are addressed from 1; slot 0 is never stored.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ConstantPool {
    cp_infos: Vec<CpInfo>,
}
impl ConstantPool {
    pub fn new(cp_infos: Vec<CpInfo>) -> Self {
        Self { cp_infos }
    }

    pub fn get(&self, index: u16) -> Option<&CpInfo> {
        if index == 0 {
            return None;
        }
        self.cp_infos.get(index as usize - 1)
    }

    pub fn len(&self) -> usize {
        self.cp_infos.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cp_infos.is_empty()
    }

    /// The `constant_pool_count` this table would be declared with.
    pub fn count(&self) -> usize {
        self.cp_infos.len() + 1
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CpInfo> {
        self.cp_infos.iter()
    }

    /// Text of the Utf8 entry at `index`.
    pub fn utf8(&self, index: u16) -> crate::Result<Cow<'_, str>> {
        matches_cp_info!(self, index, Utf8).map(Utf8Info::to_string_lossy)
    }
}
impl Index<u16> for ConstantPool {
    type Output = CpInfo;

    fn index(&self, index: u16) -> &Self::Output {
        assert!(index != 0, "constant pool index 0 is never stored");
        &self.cp_infos[index as usize - 1]
    }
}
impl<'a> IntoIterator for &'a ConstantPool {
    type Item = &'a CpInfo;
    type IntoIter = std::slice::Iter<'a, CpInfo>;

    fn into_iter(self) -> Self::IntoIter {
        self.cp_infos.iter()
    }
}

pub const CONSTANT_UTF8: u8 = 1;
pub const CONSTANT_INTEGER: u8 = 3;
pub const CONSTANT_FLOAT: u8 = 4;
pub const CONSTANT_LONG: u8 = 5;
pub const CONSTANT_DOUBLE: u8 = 6;
pub const CONSTANT_CLASS: u8 = 7;
pub const CONSTANT_STRING: u8 = 8;
pub const CONSTANT_FIELDREF: u8 = 9;
pub const CONSTANT_METHODREF: u8 = 10;
pub const CONSTANT_INTERFACE_METHODREF: u8 = 11;
pub const CONSTANT_NAME_AND_TYPE: u8 = 12;
pub const CONSTANT_METHOD_HANDLE: u8 = 15;
pub const CONSTANT_METHOD_TYPE: u8 = 16;
pub const CONSTANT_INVOKE_DYNAMIC: u8 = 18;

#[derive(Debug, PartialEq, Eq, Clone)]
pub enum CpInfo {
    Utf8(Utf8Info),
    Integer(IntegerInfo),
    Float(FloatInfo),
    Long(LongInfo),
    Double(DoubleInfo),
    Class(ClassInfo),
    String(StringInfo),
    FieldRef(RefInfo),
    MethodRef(RefInfo),
    InterfaceMethodRef(RefInfo),
    NameAndType(NameAndTypeInfo),
    MethodHandle(MethodHandleInfo),
    MethodType(MethodTypeInfo),
    InvokeDynamic(InvokeDynamicInfo),
}
impl CpInfo {
    pub fn tag(&self) -> u8 {
        match self {
            CpInfo::Utf8(_) => CONSTANT_UTF8,
            CpInfo::Integer(_) => CONSTANT_INTEGER,
            CpInfo::Float(_) => CONSTANT_FLOAT,
            CpInfo::Long(_) => CONSTANT_LONG,
            CpInfo::Double(_) => CONSTANT_DOUBLE,
            CpInfo::Class(_) => CONSTANT_CLASS,
            CpInfo::String(_) => CONSTANT_STRING,
            CpInfo::FieldRef(_) => CONSTANT_FIELDREF,
            CpInfo::MethodRef(_) => CONSTANT_METHODREF,
            CpInfo::InterfaceMethodRef(_) => CONSTANT_INTERFACE_METHODREF,
            CpInfo::NameAndType(_) => CONSTANT_NAME_AND_TYPE,
            CpInfo::MethodHandle(_) => CONSTANT_METHOD_HANDLE,
            CpInfo::MethodType(_) => CONSTANT_METHOD_TYPE,
            CpInfo::InvokeDynamic(_) => CONSTANT_INVOKE_DYNAMIC,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            CpInfo::Utf8(_) => "Utf8",
            CpInfo::Integer(_) => "Integer",
            CpInfo::Float(_) => "Float",
            CpInfo::Long(_) => "Long",
            CpInfo::Double(_) => "Double",
            CpInfo::Class(_) => "Class",
            CpInfo::String(_) => "String",
            CpInfo::FieldRef(_) => "Fieldref",
            CpInfo::MethodRef(_) => "Methodref",
            CpInfo::InterfaceMethodRef(_) => "InterfaceMethodref",
            CpInfo::NameAndType(_) => "NameAndType",
            CpInfo::MethodHandle(_) => "MethodHandle",
            CpInfo::MethodType(_) => "MethodType",
            CpInfo::InvokeDynamic(_) => "InvokeDynamic",
        }
    }
}

/// Raw modified UTF-8 payload of a `CONSTANT_Utf8_info`.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct Utf8Info {
    pub bytes: Vec<u8>,
}
impl Utf8Info {
    pub fn length(&self) -> u16 {
        self.bytes.len() as u16
    }

    /// Decodes the payload as modified UTF-8, substituting U+FFFD for anything malformed.
    pub fn to_string_lossy(&self) -> Cow<'_, str> {
        match cesu8::from_java_cesu8(&self.bytes) {
            Ok(s) => s,
            Err(_) => String::from_utf8_lossy(&self.bytes),
        }
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct IntegerInfo {
    pub bytes: u32,
}
impl IntegerInfo {
    pub fn value(&self) -> i32 {
        self.bytes as i32
    }
}

// Kept as raw bits so that equality stays total for NaN payloads.
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct FloatInfo {
    pub bytes: u32,
}
impl FloatInfo {
    pub fn value(&self) -> f32 {
        f32::from_bits(self.bytes)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LongInfo {
    pub high_bytes: u32,
    pub low_bytes: u32,
}
impl LongInfo {
    pub fn value(&self) -> i64 {
        ((self.high_bytes as u64) << 32 | self.low_bytes as u64) as i64
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct DoubleInfo {
    pub high_bytes: u32,
    pub low_bytes: u32,
}
impl DoubleInfo {
    pub fn value(&self) -> f64 {
        f64::from_bits((self.high_bytes as u64) << 32 | self.low_bytes as u64)
    }
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct ClassInfo {
    // The value of the name_index item must be a valid index into the constant_pool table.
    // The constant_pool entry at that index must be a CONSTANT_Utf8_info structure
    // representing a valid binary class or interface name encoded in internal form.
    pub name_index: u16,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct StringInfo {
    pub string_index: u16,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct RefInfo {
    pub class_index: u16,
    pub name_and_type_index: u16,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct NameAndTypeInfo {
    pub name_index: u16,
    pub descriptor_index: u16,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MethodHandleInfo {
    pub reference_kind: u8,
    pub reference_index: u16,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct MethodTypeInfo {
    pub descriptor_index: u16,
}

#[derive(Debug, PartialEq, Eq, Clone)]
pub struct InvokeDynamicInfo {
    pub bootstrap_method_attr_index: u16,
    pub name_and_type_index: u16,
}

#[cfg(test)]
mod lookup_tests {
    use super::*;

    fn pool() -> ConstantPool {
        ConstantPool::new(vec![
            CpInfo::Class(ClassInfo { name_index: 2 }),
            CpInfo::Utf8(Utf8Info {
                bytes: b"Hello".to_vec(),
            }),
        ])
    }

    #[test]
    fn it_should_address_entries_from_one() {
        let pool = pool();

        assert_eq!(pool.get(0), None);
        assert_eq!(pool.get(1), Some(&CpInfo::Class(ClassInfo { name_index: 2 })));
        assert_eq!(pool.get(3), None);
        assert_eq!(pool.count(), 3);
    }

    #[test]
    #[should_panic(expected = "constant pool index 0 is never stored")]
    fn it_should_panic_when_indexing_slot_zero() {
        let _ = &pool()[0];
    }

    #[test]
    fn it_should_resolve_utf8_entries() {
        assert_eq!(pool().utf8(2).unwrap(), "Hello");
    }

    #[test]
    fn it_should_reject_a_reference_to_the_wrong_kind() {
        assert_eq!(
            pool().utf8(1),
            Err(crate::ClassFileError::UnexpectedConstantPoolEntry(
                "Utf8",
                CpInfo::Class(ClassInfo { name_index: 2 })
            ))
        );
    }

    #[test]
    fn it_should_reject_an_out_of_range_reference() {
        assert_eq!(
            pool().utf8(7),
            Err(crate::ClassFileError::InvalidConstantPoolIndex(7))
        );
    }

    #[test]
    fn it_should_decode_modified_utf8_nulls() {
        let info = Utf8Info {
            bytes: vec![b'a', 0xc0, 0x80, b'b'],
        };

        assert_eq!(info.to_string_lossy(), "a\0b");
    }

    #[test]
    fn it_should_substitute_malformed_utf8() {
        let info = Utf8Info {
            bytes: vec![b'a', 0xff, b'b'],
        };

        assert_eq!(info.to_string_lossy(), "a\u{FFFD}b");
    }

    #[test]
    fn it_should_combine_wide_constant_words() {
        let long = LongInfo {
            high_bytes: 0xFFFF_FFFF,
            low_bytes: 0xFFFF_FFFE,
        };
        let double = DoubleInfo {
            high_bytes: 0x4000_0000,
            low_bytes: 0,
        };

        assert_eq!(long.value(), -2);
        assert_eq!(double.value(), 2.0);
        assert_eq!(IntegerInfo { bytes: 0xFFFF_FFFF }.value(), -1);
        assert_eq!(FloatInfo { bytes: 0x3FC0_0000 }.value(), 1.5);
    }
}
