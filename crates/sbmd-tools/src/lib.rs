use clap::ValueEnum;

/// CLI-friendly names for the type hints scripts pass to the encoder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TypeHintArg {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Enum8,
    Enum16,
    Bitmap8,
    Bitmap16,
    Bitmap32,
    Percent,
    Percent100ths,
    Double,
    String,
    Octstr,
}

impl TypeHintArg {
    /// The hint name as scripts spell it.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
            Self::Enum8 => "enum8",
            Self::Enum16 => "enum16",
            Self::Bitmap8 => "bitmap8",
            Self::Bitmap16 => "bitmap16",
            Self::Bitmap32 => "bitmap32",
            Self::Percent => "percent",
            Self::Percent100ths => "percent100ths",
            Self::Double => "double",
            Self::String => "string",
            Self::Octstr => "octstr",
        }
    }
}

/// Space-separated lowercase hex, the layout used by the golden fixtures.
pub fn to_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{b:02x}"))
        .collect::<Vec<_>>()
        .join(" ")
}
