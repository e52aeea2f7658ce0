use crate::encoding::control::Width;

/// Matter data type name attached to a value being encoded, e.g. `"uint16"`.
///
/// Hints select the integer family and can pin the integer width. A signed
/// hint that pins no width leaves it to the value's magnitude; an unsigned one
/// writes eight bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeHint<'a>(&'a str);

impl<'a> TypeHint<'a> {
    pub const fn new(name: &'a str) -> Self {
        Self(name)
    }

    pub const fn name(self) -> &'a str {
        self.0
    }

    /// `int8`, `int16`, `int64`, ... take the signed path; everything else
    /// takes the unsigned one.
    pub fn is_signed(self) -> bool {
        self.0.starts_with("int")
    }

    pub fn is_octet_string(self) -> bool {
        self.0 == "octstr"
    }

    /// Width forced regardless of magnitude. Values that do not fit are
    /// truncated to the low-order bytes.
    pub fn forced_width(self) -> Option<Width> {
        match self.0 {
            "int8" | "uint8" | "enum8" | "percent" => Some(Width::One),
            "int16" | "uint16" | "enum16" | "percent100ths" => Some(Width::Two),
            "int32" | "uint32" => Some(Width::Four),
            _ => None,
        }
    }
}

impl<'a> From<&'a str> for TypeHint<'a> {
    fn from(name: &'a str) -> Self {
        Self(name)
    }
}
