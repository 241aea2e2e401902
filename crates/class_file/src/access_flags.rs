use bitflags::bitflags;

bitflags! {
    /// Modifier bits shared by classes, fields and methods.
    ///
    /// `0x0020`, `0x0040` and `0x0080` carry different meanings depending on the
    /// holder; see [`FlagContext`].
    pub struct AccessFlags: u16 {
        const PUBLIC = 0x0001;
        const PRIVATE = 0x0002;
        const PROTECTED = 0x0004;
        const STATIC = 0x0008;
        const FINAL = 0x0010;
        const SUPER = 0x0020;
        const SYNCHRONIZED = 0x0020;
        const VOLATILE = 0x0040;
        const BRIDGE = 0x0040;
        const TRANSIENT = 0x0080;
        const VARARGS = 0x0080;
        const NATIVE = 0x0100;
        const INTERFACE = 0x0200;
        const ABSTRACT = 0x0400;
        const STRICT = 0x0800;
        const SYNTHETIC = 0x1000;
        const ANNOTATION = 0x2000;
        const ENUM = 0x4000;
        const MODULE = 0x8000;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagContext {
    Class,
    Method,
    Field,
}

const SHARED_FLAGS: [(AccessFlags, &str); 12] = [
    (AccessFlags::PUBLIC, "public"),
    (AccessFlags::PRIVATE, "private"),
    (AccessFlags::PROTECTED, "protected"),
    (AccessFlags::STATIC, "static"),
    (AccessFlags::FINAL, "final"),
    (AccessFlags::NATIVE, "native"),
    (AccessFlags::INTERFACE, "interface"),
    (AccessFlags::ABSTRACT, "abstract"),
    (AccessFlags::STRICT, "strict"),
    (AccessFlags::SYNTHETIC, "synthetic"),
    (AccessFlags::ANNOTATION, "annotation"),
    (AccessFlags::ENUM, "enum"),
];

impl AccessFlags {
    /// Words for every set bit, each followed by a single space.
    pub fn describe(self, context: FlagContext) -> String {
        let contextual: &[(AccessFlags, &str)] = match context {
            FlagContext::Class => &[(Self::SUPER, "super")],
            FlagContext::Method => &[
                (Self::SYNCHRONIZED, "synchronized"),
                (Self::BRIDGE, "bridge"),
                (Self::VARARGS, "varargs"),
            ],
            FlagContext::Field => &[(Self::VOLATILE, "volatile"), (Self::TRANSIENT, "transient")],
        };

        SHARED_FLAGS
            .iter()
            .chain(contextual)
            .filter(|(flag, _)| self.contains(*flag))
            .fold(String::new(), |mut s, (_, word)| {
                s.push_str(word);
                s.push(' ');
                s
            })
    }
}
