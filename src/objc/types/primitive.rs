//! Single-symbol leaf types and the lookup table between encoding bytes and their C spelling.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Primitive {
    Class,
    Selector,
    Char,
    UChar,
    Short,
    UShort,
    Int,
    UInt,
    Long,
    ULong,
    LongLong,
    ULongLong,
    Int128,
    UInt128,
    Float,
    Double,
    LongDouble,
    Bool,
    Void,
    VoidConst,
    VoidIn,
    Unknown,
    CharPtr,
    Atom,
}

impl Primitive {
    pub const ALL: [Primitive; 24] = [
        Primitive::Class,
        Primitive::Selector,
        Primitive::Char,
        Primitive::UChar,
        Primitive::Short,
        Primitive::UShort,
        Primitive::Int,
        Primitive::UInt,
        Primitive::Long,
        Primitive::ULong,
        Primitive::LongLong,
        Primitive::ULongLong,
        Primitive::Int128,
        Primitive::UInt128,
        Primitive::Float,
        Primitive::Double,
        Primitive::LongDouble,
        Primitive::Bool,
        Primitive::Void,
        Primitive::VoidConst,
        Primitive::VoidIn,
        Primitive::Unknown,
        Primitive::CharPtr,
        Primitive::Atom,
    ];

    /// Maps an encoding byte to its leaf. `@` is not listed here because it decodes to an object.
    pub const fn from_code(code: u8) -> Option<Self> {
        let primitive = match code {
            b'#' => Primitive::Class,
            b':' => Primitive::Selector,
            b'c' => Primitive::Char,
            b'C' => Primitive::UChar,
            b's' => Primitive::Short,
            b'S' => Primitive::UShort,
            b'i' => Primitive::Int,
            b'I' => Primitive::UInt,
            b'l' => Primitive::Long,
            b'L' => Primitive::ULong,
            b'q' => Primitive::LongLong,
            b'Q' => Primitive::ULongLong,
            b't' => Primitive::Int128,
            b'T' => Primitive::UInt128,
            b'f' => Primitive::Float,
            b'd' => Primitive::Double,
            b'D' => Primitive::LongDouble,
            b'B' => Primitive::Bool,
            b'v' => Primitive::Void,
            b'1' => Primitive::VoidConst,
            b'2' => Primitive::VoidIn,
            b'?' => Primitive::Unknown,
            b'*' => Primitive::CharPtr,
            b'%' => Primitive::Atom,
            _ => return None,
        };
        Some(primitive)
    }

    pub const fn code(self) -> u8 {
        match self {
            Primitive::Class => b'#',
            Primitive::Selector => b':',
            Primitive::Char => b'c',
            Primitive::UChar => b'C',
            Primitive::Short => b's',
            Primitive::UShort => b'S',
            Primitive::Int => b'i',
            Primitive::UInt => b'I',
            Primitive::Long => b'l',
            Primitive::ULong => b'L',
            Primitive::LongLong => b'q',
            Primitive::ULongLong => b'Q',
            Primitive::Int128 => b't',
            Primitive::UInt128 => b'T',
            Primitive::Float => b'f',
            Primitive::Double => b'd',
            Primitive::LongDouble => b'D',
            Primitive::Bool => b'B',
            Primitive::Void => b'v',
            Primitive::VoidConst => b'1',
            Primitive::VoidIn => b'2',
            Primitive::Unknown => b'?',
            Primitive::CharPtr => b'*',
            Primitive::Atom => b'%',
        }
    }

    /// C spelling used by the pretty-printer.
    pub const fn c_name(self) -> &'static str {
        match self {
            Primitive::Class => "Class",
            Primitive::Selector => "SEL",
            Primitive::Char => "char",
            Primitive::UChar => "unsigned char",
            Primitive::Short => "short",
            Primitive::UShort => "unsigned short",
            Primitive::Int => "int",
            Primitive::UInt => "unsigned int",
            Primitive::Long => "long",
            Primitive::ULong => "unsigned long",
            Primitive::LongLong => "long long",
            Primitive::ULongLong => "unsigned long long",
            Primitive::Int128 => "__int128",
            Primitive::UInt128 => "unsigned __int128",
            Primitive::Float => "float",
            Primitive::Double => "double",
            Primitive::LongDouble => "long double",
            Primitive::Bool => "BOOL",
            Primitive::Void => "void",
            Primitive::VoidConst => "const void",
            Primitive::VoidIn => "in void",
            Primitive::Unknown => "unknown",
            Primitive::CharPtr => "char *",
            Primitive::Atom => "NXAtom",
        }
    }

    pub fn is_void(self) -> bool {
        matches!(self, Primitive::Void | Primitive::VoidConst | Primitive::VoidIn)
    }

    /// True for leaves that are stored as a machine pointer.
    pub fn is_pointer_sized(self) -> bool {
        matches!(
            self,
            Primitive::Class | Primitive::Selector | Primitive::CharPtr | Primitive::Atom
        )
    }
}
