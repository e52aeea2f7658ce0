/// Control byte layout: element types, tag forms and tags.
pub mod control;
/// Reading and writing whole elements, including containers.
pub mod element;
/// Little-endian integers, sign extension and width selection.
pub mod primitives;
/// Bounds-checked cursor over an input buffer.
pub mod reader;
/// Growable output buffer.
pub mod writer;

pub use reader::TlvReader;
pub use writer::TlvWriter;
