// Column → field resolution

use std::collections::HashMap;

use tracing::debug;

use crate::naming::to_candidate_names;

/// Find the field a column maps to
///
/// Tries the plain candidate first ("user_id" → "UserId"), then the initialism
/// candidate ("UserID"). Exact, case-sensitive matches only; `None` when
/// neither name is a known field.
pub fn find_field<'m, V>(fields: &'m HashMap<String, V>, column: &str) -> Option<(String, &'m V)> {
    let names = to_candidate_names(column);

    if let Some(field) = fields.get(&names.plain) {
        return Some((names.plain, field));
    }
    if let Some(field) = fields.get(&names.initialism) {
        return Some((names.initialism, field));
    }
    None
}

/// Resolve every column of a result set, in column order
pub fn resolve_columns<'m, V, S>(
    fields: &'m HashMap<String, V>,
    columns: &[S],
) -> Vec<Option<(String, &'m V)>>
where
    S: AsRef<str>,
{
    columns
        .iter()
        .map(|column| {
            let resolved = find_field(fields, column.as_ref());
            if resolved.is_none() {
                debug!("Column '{}' has no matching field", column.as_ref());
            }
            resolved
        })
        .collect()
}
