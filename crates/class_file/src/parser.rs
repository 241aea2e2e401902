use log::{debug, trace, warn};

use crate::{
    attributes::Attributes,
    class_file::{MethodInfo, CLASS_FILE_MAGIC},
    constant_pool::*,
};

use super::*;

/// Single forward pass over a class image.
pub struct Parser<'a> {
    r: ByteCursor<'a>,
}
impl<'a> Parser<'a> {
    pub fn new(buf: &'a [u8]) -> Self {
        Self {
            r: ByteCursor::new(buf),
        }
    }

    pub fn parse(&mut self) -> Result<ClassFile> {
        let magic = self.parse_magic_identifier()?;
        let (major_version, minor_version) = self.parse_version()?;
        debug!("class file version {}.{}", major_version, minor_version);

        let constant_pool = self.parse_constant_pool()?;
        let access_flags = AccessFlags::from_bits_truncate(self.read_u16()?);
        let this_class = self.read_u16()?;
        let super_class = self.read_u16()?;

        let interfaces_count = self.read_u16()?;
        if interfaces_count != 0 {
            return Err(ClassFileError::UnsupportedFeature("interfaces"));
        }

        let fields_count = self.read_u16()?;
        if fields_count != 0 {
            return Err(ClassFileError::UnsupportedFeature("fields"));
        }

        let methods_count = self.read_u16()?;
        let methods = (0..methods_count)
            .map(|_| self.parse_method_info())
            .collect::<Result<Vec<_>>>()?;

        let attributes_count = self.read_u16()?;
        let attributes = self.parse_attributes(attributes_count)?;

        if self.r.remaining() > 0 {
            warn!(
                "ignoring {} trailing bytes at offset {}",
                self.r.remaining(),
                self.r.position()
            );
        }

        Ok(ClassFile {
            magic,
            minor_version,
            major_version,
            constant_pool,
            access_flags,
            this_class,
            super_class,
            interfaces_count,
            fields_count,
            methods,
            attributes,
        })
    }

    fn parse_method_info(&mut self) -> Result<MethodInfo> {
        let access_flags = AccessFlags::from_bits_truncate(self.read_u16()?);
        let name_index = self.read_u16()?;
        let descriptor_index = self.read_u16()?;
        let attributes_count = self.read_u16()?;
        trace!(
            "method name_index={} descriptor_index={} with {} attributes",
            name_index,
            descriptor_index,
            attributes_count
        );
        let attributes = self.parse_attributes(attributes_count)?;

        Ok(MethodInfo {
            access_flags,
            name_index,
            descriptor_index,
            attributes,
        })
    }

    fn parse_magic_identifier(&mut self) -> Result<u32> {
        match self.read_u32()? {
            CLASS_FILE_MAGIC => Ok(CLASS_FILE_MAGIC),
            magic_identifier => Err(ClassFileError::InvalidMagic(magic_identifier)),
        }
    }

    fn parse_version(&mut self) -> Result<(u16, u16)> {
        let minor = self.read_u16()?;
        let major = self.read_u16()?;
        Ok((major, minor))
    }

    fn parse_constant_pool(&mut self) -> Result<ConstantPool> {
        let constant_pool_count = self.read_u16()?;
        if constant_pool_count == 0 {
            warn!("constant_pool_count is 0, treating the constant pool as empty");
        }

        let count = constant_pool_count.saturating_sub(1) as usize;
        let cp_infos = (0..count)
            .map(|_| self.parse_cp_info())
            .collect::<Result<Vec<_>>>()?;

        debug!("decoded {} constant pool entries", cp_infos.len());
        Ok(ConstantPool::new(cp_infos))
    }

    fn parse_cp_info(&mut self) -> Result<CpInfo> {
        let tag = self.read_u8()?;
        let cp_info = match tag {
            CONSTANT_UTF8 => self.parse_utf8()?,
            CONSTANT_INTEGER => CpInfo::Integer(IntegerInfo {
                bytes: self.read_u32()?,
            }),
            CONSTANT_FLOAT => CpInfo::Float(FloatInfo {
                bytes: self.read_u32()?,
            }),
            CONSTANT_LONG => {
                let (high_bytes, low_bytes) = self.parse_wide()?;
                CpInfo::Long(LongInfo {
                    high_bytes,
                    low_bytes,
                })
            }
            CONSTANT_DOUBLE => {
                let (high_bytes, low_bytes) = self.parse_wide()?;
                CpInfo::Double(DoubleInfo {
                    high_bytes,
                    low_bytes,
                })
            }
            CONSTANT_CLASS => CpInfo::Class(ClassInfo {
                name_index: self.read_u16()?,
            }),
            CONSTANT_STRING => CpInfo::String(StringInfo {
                string_index: self.read_u16()?,
            }),
            CONSTANT_FIELDREF => CpInfo::FieldRef(self.parse_ref_info()?),
            CONSTANT_METHODREF => CpInfo::MethodRef(self.parse_ref_info()?),
            CONSTANT_INTERFACE_METHODREF => CpInfo::InterfaceMethodRef(self.parse_ref_info()?),
            CONSTANT_NAME_AND_TYPE => self.parse_name_and_type_info()?,
            CONSTANT_METHOD_HANDLE => self.parse_method_handle()?,
            CONSTANT_METHOD_TYPE => CpInfo::MethodType(MethodTypeInfo {
                descriptor_index: self.read_u16()?,
            }),
            CONSTANT_INVOKE_DYNAMIC => self.parse_invoke_dynamic_info()?,
            _ => return Err(ClassFileError::UnsupportedConstantTag(tag)),
        };

        trace!("constant {:?}", cp_info);
        Ok(cp_info)
    }

    fn parse_utf8(&mut self) -> Result<CpInfo> {
        let length = self.read_u16()?;
        let bytes = self.r.take_exact(length as usize)?.to_vec();

        Ok(CpInfo::Utf8(Utf8Info { bytes }))
    }

    fn parse_wide(&mut self) -> Result<(u32, u32)> {
        let high_bytes = self.read_u32()?;
        let low_bytes = self.read_u32()?;
        Ok((high_bytes, low_bytes))
    }

    fn parse_name_and_type_info(&mut self) -> Result<CpInfo> {
        let name_index = self.read_u16()?;
        let descriptor_index = self.read_u16()?;

        Ok(CpInfo::NameAndType(NameAndTypeInfo {
            name_index,
            descriptor_index,
        }))
    }

    fn parse_method_handle(&mut self) -> Result<CpInfo> {
        let reference_kind = self.read_u8()?;
        let reference_index = self.read_u16()?;

        Ok(CpInfo::MethodHandle(MethodHandleInfo {
            reference_kind,
            reference_index,
        }))
    }

    fn parse_invoke_dynamic_info(&mut self) -> Result<CpInfo> {
        let bootstrap_method_attr_index = self.read_u16()?;
        let name_and_type_index = self.read_u16()?;

        Ok(CpInfo::InvokeDynamic(InvokeDynamicInfo {
            bootstrap_method_attr_index,
            name_and_type_index,
        }))
    }

    fn parse_ref_info(&mut self) -> Result<RefInfo> {
        let class_index = self.read_u16()?;
        let name_and_type_index = self.read_u16()?;

        Ok(RefInfo {
            class_index,
            name_and_type_index,
        })
    }

    fn parse_attribute(&mut self) -> Result<Attribute> {
        let attribute_name_index = self.read_u16()?;
        let attribute_length = self.read_u32()?;
        let info = self.r.take_exact(attribute_length as usize)?.to_vec();

        Ok(Attribute {
            attribute_name_index,
            info,
        })
    }

    fn parse_attributes(&mut self, attributes_count: u16) -> Result<Attributes> {
        (0..attributes_count)
            .map(|_| self.parse_attribute())
            .collect::<Result<Vec<_>>>()
            .map(Attributes)
    }

    fn read_u32(&mut self) -> Result<u32> {
        self.r.take_u4()
    }

    fn read_u16(&mut self) -> Result<u16> {
        self.r.take_u2()
    }

    fn read_u8(&mut self) -> Result<u8> {
        self.r.take_u1()
    }
}

#[cfg(test)]
mod parse_magic_identifier_tests {
    use super::*;

    #[test]
    fn it_should_be_able_to_parse_the_correct_identifier() {
        assert_eq!(
            Parser::new(&[0xca, 0xfe, 0xba, 0xbe]).parse_magic_identifier(),
            Ok(0xCAFEBABE)
        );
    }

    #[test]
    fn it_should_fail_if_there_is_not_enough_data() {
        assert!(matches!(
            Parser::new(&[0xca, 0xfe, 0xba]).parse_magic_identifier(),
            Err(ClassFileError::TruncatedInput { .. })
        ));
    }

    #[test]
    fn it_should_fail_if_the_magic_identifier_is_incorrect() {
        assert_eq!(
            Parser::new(&[0xca, 0xfe, 0xda, 0xda]).parse_magic_identifier(),
            Err(ClassFileError::InvalidMagic(0xCAFEDADA))
        );
    }
}
