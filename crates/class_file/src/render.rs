use std::{borrow::Cow, fmt, io};

use crate::{
    constant_pool::CpInfo, Attribute, ClassFile, ConstantPool, FlagContext, MethodInfo,
};

/// Writes the diagnostic report for `class_file` to `sink`.
pub fn write_report<W: io::Write>(class_file: &ClassFile, mut sink: W) -> io::Result<()> {
    write!(sink, "{}", class_file)
}

impl fmt::Display for ClassFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cp = &self.constant_pool;

        writeln!(f, "magic: {:08X}", self.magic)?;
        writeln!(f, "minor_version: {}", self.minor_version)?;
        writeln!(f, "major_version: {}", self.major_version)?;
        writeln!(f, "constant_pool_count: {}", cp.count())?;
        for (i, cp_info) in cp.iter().enumerate() {
            writeln!(f, "constant_pool[{}]: {}", i + 1, cp_info)?;
        }

        writeln!(
            f,
            "access_flags: 0x{:04X} {}",
            self.access_flags.bits(),
            self.access_flags.describe(FlagContext::Class).trim_end()
        )?;
        writeln!(
            f,
            "this_class: {} {}",
            self.this_class,
            class_name_at(cp, self.this_class)
        )?;
        writeln!(
            f,
            "super_class: {} {}",
            self.super_class,
            class_name_at(cp, self.super_class)
        )?;
        writeln!(f, "interfaces_count: {}", self.interfaces_count)?;
        writeln!(f, "fields_count: {}", self.fields_count)?;

        writeln!(f, "methods_count: {}", self.methods.len())?;
        for (i, method) in self.methods.iter().enumerate() {
            write_method(f, cp, i, method)?;
        }

        writeln!(f, "attributes_count: {}", self.attributes.len())?;
        for (i, attribute) in self.attributes.iter().enumerate() {
            write_attribute(f, cp, "", i, attribute)?;
        }

        Ok(())
    }
}

impl fmt::Display for CpInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name(), self.tag())?;
        match self {
            CpInfo::Utf8(info) => write!(
                f,
                " length:{} {}",
                info.length(),
                escape_controls(info.to_string_lossy())
            ),
            CpInfo::Integer(info) => {
                write!(f, " bytes:0x{:08X} value:{}", info.bytes, info.value())
            }
            CpInfo::Float(info) => {
                write!(f, " bytes:0x{:08X} value:{}", info.bytes, info.value())
            }
            CpInfo::Long(info) => write!(
                f,
                " high_bytes:0x{:08X} low_bytes:0x{:08X} value:{}",
                info.high_bytes,
                info.low_bytes,
                info.value()
            ),
            CpInfo::Double(info) => write!(
                f,
                " high_bytes:0x{:08X} low_bytes:0x{:08X} value:{}",
                info.high_bytes,
                info.low_bytes,
                info.value()
            ),
            CpInfo::Class(info) => write!(f, " name_index:{}", info.name_index),
            CpInfo::String(info) => write!(f, " string_index:{}", info.string_index),
            CpInfo::FieldRef(info) | CpInfo::MethodRef(info) | CpInfo::InterfaceMethodRef(info) => {
                write!(
                    f,
                    " class_index:{} name_and_type_index:{}",
                    info.class_index, info.name_and_type_index
                )
            }
            CpInfo::NameAndType(info) => write!(
                f,
                " name_index:{} descriptor_index:{}",
                info.name_index, info.descriptor_index
            ),
            CpInfo::MethodHandle(info) => write!(
                f,
                " reference_kind:{} reference_index:{}",
                info.reference_kind, info.reference_index
            ),
            CpInfo::MethodType(info) => write!(f, " descriptor_index:{}", info.descriptor_index),
            CpInfo::InvokeDynamic(info) => write!(
                f,
                " bootstrap_method_attr_index:{} name_and_type_index:{}",
                info.bootstrap_method_attr_index, info.name_and_type_index
            ),
        }
    }
}

fn write_method(
    f: &mut fmt::Formatter<'_>,
    cp: &ConstantPool,
    i: usize,
    method: &MethodInfo,
) -> fmt::Result {
    writeln!(
        f,
        "method[{}]: flags:0x{:04X} {} name_index:{} {} descriptor_index:{} {}",
        i,
        method.access_flags.bits(),
        method.access_flags.describe(FlagContext::Method).trim_end(),
        method.name_index,
        utf8_at(cp, method.name_index),
        method.descriptor_index,
        utf8_at(cp, method.descriptor_index)
    )?;
    for (j, attribute) in method.attributes.iter().enumerate() {
        write_attribute(f, cp, "  ", j, attribute)?;
    }

    Ok(())
}

fn write_attribute(
    f: &mut fmt::Formatter<'_>,
    cp: &ConstantPool,
    indent: &str,
    i: usize,
    attribute: &Attribute,
) -> fmt::Result {
    writeln!(
        f,
        "{}attr[{}]: attribute_name_index:{} {} length:{}",
        indent,
        i,
        attribute.attribute_name_index,
        utf8_at(cp, attribute.attribute_name_index),
        attribute.length()
    )?;
    if attribute.info.is_empty() {
        return Ok(());
    }
    writeln!(f, "{}  {}", indent, hex_pairs(&attribute.info))
}

/// Utf8 text at `index`, or a placeholder when the reference does not resolve.
fn utf8_at(cp: &ConstantPool, index: u16) -> Cow<'_, str> {
    match cp.get(index) {
        Some(CpInfo::Utf8(info)) => escape_controls(info.to_string_lossy()),
        _ => Cow::Owned(format!("<invalid #{}>", index)),
    }
}

fn class_name_at(cp: &ConstantPool, index: u16) -> Cow<'_, str> {
    match cp.get(index) {
        Some(CpInfo::Class(info)) => utf8_at(cp, info.name_index),
        _ => Cow::Owned(format!("<invalid #{}>", index)),
    }
}

/// Escapes control characters so that text never spans report lines.
fn escape_controls(s: Cow<'_, str>) -> Cow<'_, str> {
    if !s.chars().any(char::is_control) {
        return s;
    }

    Cow::Owned(
        s.chars()
            .map(|c| {
                if c.is_control() {
                    c.escape_debug().to_string()
                } else {
                    c.to_string()
                }
            })
            .collect(),
    )
}

fn hex_pairs(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02X}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod render_tests {
    use super::*;
    use crate::{
        attributes::Attributes,
        constant_pool::{ClassInfo, Utf8Info},
        AccessFlags,
    };

    fn utf8(s: &str) -> CpInfo {
        CpInfo::Utf8(Utf8Info {
            bytes: s.as_bytes().to_vec(),
        })
    }

    fn class_file(constant_pool: Vec<CpInfo>) -> ClassFile {
        ClassFile {
            magic: 0xCAFEBABE,
            minor_version: 0,
            major_version: 52,
            constant_pool: ConstantPool::new(constant_pool),
            access_flags: AccessFlags::PUBLIC | AccessFlags::SUPER,
            this_class: 1,
            super_class: 0,
            interfaces_count: 0,
            fields_count: 0,
            methods: vec![],
            attributes: Attributes::default(),
        }
    }

    #[test]
    fn it_should_render_hex_pairs_in_uppercase() {
        assert_eq!(hex_pairs(&[0x2a, 0xb7, 0x00, 0x01]), "2A B7 00 01");
        assert_eq!(hex_pairs(&[]), "");
    }

    #[test]
    fn it_should_render_utf8_entries_as_text() {
        assert_eq!(utf8("Hello").to_string(), "Utf8(1) length:5 Hello");
    }

    #[test]
    fn it_should_keep_each_utf8_entry_on_one_line() {
        let report = class_file(vec![utf8("a\nb\tc"), utf8("d")]).to_string();
        let lines = report.lines().collect::<Vec<_>>();

        assert_eq!(lines[4], "constant_pool[1]: Utf8(1) length:5 a\\nb\\tc");
        assert_eq!(lines[5], "constant_pool[2]: Utf8(1) length:1 d");
    }

    #[test]
    fn it_should_escape_control_characters_in_resolved_names() {
        let mut class_file = class_file(vec![utf8("x\ry")]);
        class_file.methods.push(MethodInfo {
            access_flags: AccessFlags::empty(),
            name_index: 1,
            descriptor_index: 1,
            attributes: Attributes::default(),
        });

        assert!(class_file
            .to_string()
            .contains("name_index:1 x\\ry descriptor_index:1 x\\ry\n"));
    }

    #[test]
    fn it_should_render_the_header() {
        let report = class_file(vec![
            CpInfo::Class(ClassInfo { name_index: 2 }),
            utf8("Hello"),
        ])
        .to_string();

        assert!(report.starts_with(
            "magic: CAFEBABE\nminor_version: 0\nmajor_version: 52\nconstant_pool_count: 3\n"
        ));
        assert!(report.contains("constant_pool[1]: Class(7) name_index:2\n"));
        assert!(report.contains("access_flags: 0x0021 public super\n"));
        assert!(report.contains("this_class: 1 Hello\n"));
        assert!(report.contains("super_class: 0 <invalid #0>\n"));
    }

    #[test]
    fn it_should_tolerate_dangling_references() {
        let mut class_file = class_file(vec![]);
        class_file.this_class = 9;
        class_file.methods.push(MethodInfo {
            access_flags: AccessFlags::PUBLIC,
            name_index: 4,
            descriptor_index: 5,
            attributes: Attributes(vec![Attribute {
                attribute_name_index: 6,
                info: vec![0xb1],
            }]),
        });

        let report = class_file.to_string();

        assert!(report.contains("this_class: 9 <invalid #9>\n"));
        assert!(report.contains(
            "method[0]: flags:0x0001 public name_index:4 <invalid #4> descriptor_index:5 <invalid #5>\n"
        ));
        assert!(report.contains("  attr[0]: attribute_name_index:6 <invalid #6> length:1\n    B1\n"));
    }

    #[test]
    fn it_should_write_the_report_to_a_sink() {
        let class_file = class_file(vec![]);
        let mut sink = Vec::new();

        write_report(&class_file, &mut sink).unwrap();

        assert_eq!(String::from_utf8(sink).unwrap(), class_file.to_string());
    }
}
