use crate::{constant_pool::CpInfo, Attribute};

use super::ConstantPool;

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Attributes(pub Vec<Attribute>);
impl Attributes {
    pub fn find_by_name(&self, name: &str, constant_pool: &ConstantPool) -> Option<&Attribute> {
        for a in &self.0 {
            let Some(CpInfo::Utf8(s)) = constant_pool.get(a.attribute_name_index) else {
                continue;
            };

            if s.to_string_lossy() == name {
                return Some(a);
            }
        }

        None
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Attribute> {
        self.0.iter()
    }
}
impl<'a> IntoIterator for &'a Attributes {
    type Item = &'a Attribute;
    type IntoIter = std::slice::Iter<'a, Attribute>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}
