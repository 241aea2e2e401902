use std::borrow::Cow;

use crate::{
    attributes::Attributes, constant_pool::ClassInfo, matches_cp_info, parser::Parser,
    AccessFlags, Attribute, ConstantPool, Result,
};

pub const CLASS_FILE_MAGIC: u32 = 0xCAFEBABE;

/// A decoded class file. Built once by [`ClassFile::parse`] and never mutated by the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassFile {
    pub magic: u32,
    pub minor_version: u16,
    pub major_version: u16,
    pub constant_pool: ConstantPool,
    pub access_flags: AccessFlags,
    pub this_class: u16,
    pub super_class: u16,
    pub interfaces_count: u16,
    pub fields_count: u16,
    pub methods: Vec<MethodInfo>,
    pub attributes: Attributes,
}
impl ClassFile {
    pub fn parse(bytes: &[u8]) -> Result<ClassFile> {
        Parser::new(bytes).parse()
    }

    pub fn super_class(&self) -> Result<Option<Cow<'_, str>>> {
        // If the value of the super_class item is zero, then this class file must represent the
        // class Object, the only class or interface without a direct superclass.
        if self.super_class == 0 {
            return Ok(None);
        }

        let ClassInfo { name_index } =
            matches_cp_info!(self.constant_pool, self.super_class, Class)?;

        Ok(Some(self.constant_pool.utf8(*name_index)?))
    }

    pub fn class_name(&self) -> Result<Cow<'_, str>> {
        // The constant_pool entry at this_class must be a CONSTANT_Class_info structure
        // representing the class or interface defined by this class file.
        let ClassInfo { name_index } =
            matches_cp_info!(self.constant_pool, self.this_class, Class)?;

        self.constant_pool.utf8(*name_index)
    }

    pub fn method_name(&self, method: &MethodInfo) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8(method.name_index)
    }

    pub fn method_descriptor(&self, method: &MethodInfo) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8(method.descriptor_index)
    }

    pub fn attribute_name(&self, attribute: &Attribute) -> Result<Cow<'_, str>> {
        self.constant_pool.utf8(attribute.attribute_name_index)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MethodInfo {
    pub access_flags: AccessFlags,
    pub name_index: u16,
    pub descriptor_index: u16,
    pub attributes: Attributes,
}
