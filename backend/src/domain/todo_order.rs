//! Reordering rules shared by every todo store.
//!
//! Requested ids take positions `1..=k` in the given sequence. Todos that were
//! not mentioned keep their relative order and follow the listed ones.

use std::collections::HashSet;

use super::TodoId;

/// Reasons a requested order cannot be applied.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReorderError {
    /// The same id appears more than once.
    #[error("todo {id} appears more than once in the requested order")]
    Duplicate { id: TodoId },
    /// The id does not name an existing todo.
    #[error("todo {id} not found")]
    Unknown { id: TodoId },
}

/// Reject requests that list the same id twice.
pub fn ensure_distinct(requested: &[TodoId]) -> Result<(), ReorderError> {
    let mut seen = HashSet::with_capacity(requested.len());
    for id in requested {
        if !seen.insert(*id) {
            return Err(ReorderError::Duplicate { id: *id });
        }
    }
    Ok(())
}

/// Compute the full id sequence after applying `requested` to `current`.
///
/// `current` is the existing order. The result contains every id of
/// `current` exactly once.
///
/// # Examples
/// ```
/// use todo_backend::domain::{TodoId, resequence};
///
/// let ids = |raw: &[i64]| -> Vec<TodoId> {
///     raw.iter().map(|v| TodoId::new(*v).expect("positive")).collect()
/// };
/// let order = resequence(&ids(&[1, 2, 3, 4]), &ids(&[3, 1])).expect("valid order");
/// assert_eq!(order, ids(&[3, 1, 2, 4]));
/// ```
pub fn resequence(current: &[TodoId], requested: &[TodoId]) -> Result<Vec<TodoId>, ReorderError> {
    ensure_distinct(requested)?;

    let known: HashSet<TodoId> = current.iter().copied().collect();
    if let Some(id) = requested.iter().find(|id| !known.contains(id)) {
        return Err(ReorderError::Unknown { id: *id });
    }

    let listed: HashSet<TodoId> = requested.iter().copied().collect();
    let mut order = requested.to_vec();
    order.extend(current.iter().copied().filter(|id| !listed.contains(id)));
    Ok(order)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn ids(raw: &[i64]) -> Vec<TodoId> {
        raw.iter()
            .map(|value| TodoId::new(*value).expect("positive id"))
            .collect()
    }

    #[rstest]
    #[case(&[1, 2, 3], &[3, 1, 2], &[3, 1, 2])]
    #[case(&[1, 2, 3], &[], &[1, 2, 3])]
    #[case(&[1, 2, 3, 4, 5], &[4], &[4, 1, 2, 3, 5])]
    #[case(&[5, 9, 2], &[2, 5], &[2, 5, 9])]
    fn resequence_places_listed_ids_first(
        #[case] current: &[i64],
        #[case] requested: &[i64],
        #[case] expected: &[i64],
    ) {
        let order = resequence(&ids(current), &ids(requested)).expect("valid order");
        assert_eq!(order, ids(expected));
    }

    #[rstest]
    fn duplicates_are_rejected_before_lookup() {
        let err = resequence(&ids(&[1, 2]), &ids(&[7, 7])).expect_err("duplicate");
        assert_eq!(
            err,
            ReorderError::Duplicate {
                id: TodoId::new(7).expect("positive id")
            }
        );
    }

    #[rstest]
    fn unknown_ids_are_reported() {
        let err = resequence(&ids(&[1, 2]), &ids(&[2, 8])).expect_err("unknown");
        assert_eq!(
            err,
            ReorderError::Unknown {
                id: TodoId::new(8).expect("positive id")
            }
        );
    }
}
