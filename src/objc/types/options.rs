//! Knobs that decide how forgiving the decoder is with damaged or ambiguous encodings.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Block signatures without the `@?` self marker become opaque blocks instead of failing.
    pub lenient_blocks: bool,
    /// Inside named field lists, only read `@"X"` as a class name when another field name or the
    /// end of the list follows; otherwise `"X"` names the next field.
    pub field_class_names: bool,
    /// Any failed sub-decode fails the enclosing production.
    pub strict: bool,
}

impl DecodeOptions {
    pub const fn new() -> Self {
        Self {
            lenient_blocks: true,
            field_class_names: true,
            strict: false,
        }
    }

    pub const fn strict() -> Self {
        Self {
            lenient_blocks: false,
            field_class_names: true,
            strict: true,
        }
    }

    pub const fn with_lenient_blocks(mut self, enabled: bool) -> Self {
        self.lenient_blocks = enabled;
        self
    }

    pub const fn with_field_class_names(mut self, enabled: bool) -> Self {
        self.field_class_names = enabled;
        self
    }

    pub const fn with_strict(mut self, enabled: bool) -> Self {
        self.strict = enabled;
        self
    }

    pub(crate) const fn tolerates_block_damage(&self) -> bool {
        self.lenient_blocks && !self.strict
    }
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self::new()
    }
}
