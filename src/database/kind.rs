// Type kinds and descriptors for scan destinations

use std::fmt;

/// The kind of a destination type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Invalid,
    Bool,
    Int,
    Int8,
    Int16,
    Int32,
    Int64,
    Uint,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uintptr,
    Float32,
    Float64,
    Complex64,
    Complex128,
    String,
    /// Composite record (a struct, a date, a JSON document)
    Struct,
    Array,
    Slice,
    Map,
    Pointer,
    Chan,
    Func,
    Interface,
    UnsafePointer,
}

impl ValueKind {
    /// Whether a raw column value can be coerced into this kind directly
    pub fn is_value(self) -> bool {
        is_value_kind(self)
    }
}

impl fmt::Display for ValueKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self)
    }
}

/// True for bool, every integer/float/complex width, string and composite records.
/// False for slices, maps, pointers, channels, functions and interfaces.
pub fn is_value_kind(kind: ValueKind) -> bool {
    matches!(
        kind,
        ValueKind::Bool
            | ValueKind::Int
            | ValueKind::Int8
            | ValueKind::Int16
            | ValueKind::Int32
            | ValueKind::Int64
            | ValueKind::Uint
            | ValueKind::Uint8
            | ValueKind::Uint16
            | ValueKind::Uint32
            | ValueKind::Uint64
            | ValueKind::Uintptr
            | ValueKind::Float32
            | ValueKind::Float64
            | ValueKind::Complex64
            | ValueKind::Complex128
            | ValueKind::String
            | ValueKind::Struct
    )
}

/// A type: its kind plus, for pointers/slices/arrays, the element type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeDescriptor {
    kind: ValueKind,
    elem: Option<Box<TypeDescriptor>>,
}

impl TypeDescriptor {
    pub fn of(kind: ValueKind) -> Self {
        Self { kind, elem: None }
    }

    pub fn pointer_to(elem: TypeDescriptor) -> Self {
        Self {
            kind: ValueKind::Pointer,
            elem: Some(Box::new(elem)),
        }
    }

    pub fn slice_of(elem: TypeDescriptor) -> Self {
        Self {
            kind: ValueKind::Slice,
            elem: Some(Box::new(elem)),
        }
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    /// Element type one level down, `None` for non-container kinds
    pub fn elem(&self) -> Option<&TypeDescriptor> {
        self.elem.as_deref()
    }

    /// Dereference one level if this is a pointer, otherwise the type itself
    pub fn deref_pointer(&self) -> &TypeDescriptor {
        match (self.kind, self.elem()) {
            (ValueKind::Pointer, Some(elem)) => elem,
            _ => self,
        }
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.kind, self.elem()) {
            (ValueKind::Pointer, Some(elem)) => write!(f, "*{}", elem),
            (ValueKind::Slice, Some(elem)) => write!(f, "[]{}", elem),
            (kind, _) => write!(f, "{}", kind),
        }
    }
}
