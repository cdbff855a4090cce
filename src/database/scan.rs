// Row scanning: one record from a cursor into typed destinations

use tracing::{debug, warn};

use super::convert::{Destination, ValueConverter};
use super::error::ScanError;
use super::kind::TypeDescriptor;
use super::raw::RowSource;

/// Per-column scan metadata plus the destination it fills
#[derive(Debug)]
pub struct ColumnSlot<'a> {
    /// Destination is pointer-like (an `Option` field)
    pub indirect: bool,
    /// Declared destination type; a pointer type when `indirect` is set
    pub element_type: TypeDescriptor,
    pub dest: Destination<'a>,
}

impl<'a> ColumnSlot<'a> {
    /// Slot whose metadata is taken from the destination itself
    pub fn new(dest: Destination<'a>) -> Self {
        Self {
            indirect: dest.is_indirect(),
            element_type: dest.type_descriptor(),
            dest,
        }
    }

    /// Slot with caller-supplied metadata
    pub fn with_metadata(indirect: bool, element_type: TypeDescriptor, dest: Destination<'a>) -> Self {
        Self {
            indirect,
            element_type,
            dest,
        }
    }

    /// A slot that reads and discards its column
    pub fn ignored() -> Self {
        Self::new(Destination::Ignore)
    }
}

/// Read one record from `row` into `slots`, converting each column
///
/// The row is read in full before anything is assigned: if the read fails the
/// driver error is returned as `ScanError::Read` and no destination or
/// converter is touched. NULL columns are skipped and leave their destination
/// as it was. A source handing back the wrong number of values is rejected
/// before any assignment. The first conversion failure aborts the scan.
pub fn scan_row<R, C>(row: &R, slots: &mut [ColumnSlot<'_>], converter: &C) -> Result<(), ScanError<R::Error>>
where
    R: RowSource + ?Sized,
    C: ValueConverter + ?Sized,
{
    let raw_values = match row.scan_raw(slots.len()) {
        Ok(values) => values,
        Err(e) => {
            warn!("Row read failed for {} destination(s)", slots.len());
            return Err(ScanError::Read(e));
        }
    };

    if raw_values.len() != slots.len() {
        warn!(
            "Row source returned {} value(s) for {} destination(s)",
            raw_values.len(),
            slots.len()
        );
        return Err(ScanError::ColumnCount {
            expected: slots.len(),
            actual: raw_values.len(),
        });
    }

    for (column, (slot, raw)) in slots.iter_mut().zip(raw_values.iter()).enumerate() {
        if raw.is_null() {
            continue;
        }

        let target = if slot.indirect {
            slot.element_type.deref_pointer()
        } else {
            &slot.element_type
        };

        converter
            .convert_assign(&mut slot.dest, raw, slot.indirect, target)
            .map_err(|source| {
                debug!("Column {} conversion into {} failed: {}", column, target, source);
                ScanError::Convert { column, source }
            })?;
    }

    Ok(())
}
