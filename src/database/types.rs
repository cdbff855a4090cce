// Record mapping types

use super::convert::Destination;
use super::kind::TypeDescriptor;

/// A named, typed field of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldDescriptor {
    pub name: String,
    pub ty: TypeDescriptor,
}

impl FieldDescriptor {
    pub fn new(name: impl Into<String>, ty: TypeDescriptor) -> Self {
        Self {
            name: name.into(),
            ty,
        }
    }

    /// Field stored through an `Option`
    pub fn is_indirect(&self) -> bool {
        self.ty.kind() == super::kind::ValueKind::Pointer
    }
}

/// A struct that rows can be scanned into
///
/// Field names are camel-case (`UserId` or `UserID`); result columns are
/// matched to them by name. `destinations` must return one entry per field
/// listed by `fields`, with the same names and matching types.
pub trait Record: Default {
    fn fields() -> Vec<FieldDescriptor>;

    fn destinations(&mut self) -> Vec<(&'static str, Destination<'_>)>;
}
