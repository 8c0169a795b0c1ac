//! Type qualifiers that prefix another encoding (`r^v`, `jd`, `Vv`, ...).

use bitflags::bitflags;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Modifier {
    Atomic,
    Complex,
    Const,
    In,
    Inout,
    Out,
    Bycopy,
    Byref,
    Oneway,
    Register,
}

impl Modifier {
    pub const ALL: [Modifier; 10] = [
        Modifier::Atomic,
        Modifier::Complex,
        Modifier::Const,
        Modifier::In,
        Modifier::Inout,
        Modifier::Out,
        Modifier::Bycopy,
        Modifier::Byref,
        Modifier::Oneway,
        Modifier::Register,
    ];

    pub const fn from_code(code: u8) -> Option<Self> {
        let modifier = match code {
            b'A' => Modifier::Atomic,
            b'j' => Modifier::Complex,
            b'r' => Modifier::Const,
            b'n' => Modifier::In,
            b'N' => Modifier::Inout,
            b'o' => Modifier::Out,
            b'O' => Modifier::Bycopy,
            b'R' => Modifier::Byref,
            b'V' => Modifier::Oneway,
            b'+' => Modifier::Register,
            _ => return None,
        };
        Some(modifier)
    }

    pub const fn code(self) -> u8 {
        match self {
            Modifier::Atomic => b'A',
            Modifier::Complex => b'j',
            Modifier::Const => b'r',
            Modifier::In => b'n',
            Modifier::Inout => b'N',
            Modifier::Out => b'o',
            Modifier::Bycopy => b'O',
            Modifier::Byref => b'R',
            Modifier::Oneway => b'V',
            Modifier::Register => b'+',
        }
    }

    pub const fn keyword(self) -> &'static str {
        match self {
            Modifier::Atomic => "_Atomic",
            Modifier::Complex => "_Complex",
            Modifier::Const => "const",
            Modifier::In => "in",
            Modifier::Inout => "inout",
            Modifier::Out => "out",
            Modifier::Bycopy => "bycopy",
            Modifier::Byref => "byref",
            Modifier::Oneway => "oneway",
            Modifier::Register => "register",
        }
    }

    pub const fn flag(self) -> Qualifiers {
        match self {
            Modifier::Atomic => Qualifiers::ATOMIC,
            Modifier::Complex => Qualifiers::COMPLEX,
            Modifier::Const => Qualifiers::CONST,
            Modifier::In => Qualifiers::IN,
            Modifier::Inout => Qualifiers::INOUT,
            Modifier::Out => Qualifiers::OUT,
            Modifier::Bycopy => Qualifiers::BYCOPY,
            Modifier::Byref => Qualifiers::BYREF,
            Modifier::Oneway => Qualifiers::ONEWAY,
            Modifier::Register => Qualifiers::REGISTER,
        }
    }
}

bitflags! {
    /// Flattened view over a stack of [`Modifier`] wrappers.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Qualifiers: u16 {
        const ATOMIC   = 0b00_0000_0001;
        const COMPLEX  = 0b00_0000_0010;
        const CONST    = 0b00_0000_0100;
        const IN       = 0b00_0000_1000;
        const INOUT    = 0b00_0001_0000;
        const OUT      = 0b00_0010_0000;
        const BYCOPY   = 0b00_0100_0000;
        const BYREF    = 0b00_1000_0000;
        const ONEWAY   = 0b01_0000_0000;
        const REGISTER = 0b10_0000_0000;
    }
}

impl Qualifiers {
    /// Distributed-objects qualifiers that only appear on method arguments and return values.
    pub const DISTRIBUTED: Qualifiers = Qualifiers::IN
        .union(Qualifiers::INOUT)
        .union(Qualifiers::OUT)
        .union(Qualifiers::BYCOPY)
        .union(Qualifiers::BYREF)
        .union(Qualifiers::ONEWAY);
}
