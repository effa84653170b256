//! Custom layout editing.
//!
//! The layout editor screen lets the user add and remove rows, and add,
//! rename, or delete individual keys.  Each operation here takes the current
//! [`KeyboardSettings`] by reference and returns an edited copy, leaving the
//! input untouched.  The caller persists the result.
//!
//! # Row renumbering
//!
//! Removing a row renumbers the remaining rows `0..n` in their existing
//! order, so the layout never has gaps after a deletion.  Appending always
//! uses one past the highest existing index, and fails rather than reuse an
//! index when the highest one is `i32::MAX`.

use std::collections::BTreeMap;

use thiserror::Error;

use super::settings::{KeyboardSettings, RowIndex};

/// Error type for layout edits that reference a row or key that is absent.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum LayoutEditError {
    /// No row with this index exists in the layout.
    #[error("layout row not found: {0}")]
    RowNotFound(RowIndex),

    /// The row exists but has no key at this position.
    #[error("no key at position {position} in layout row {row}")]
    KeyOutOfRange { row: RowIndex, position: usize },

    /// The highest row index is already `i32::MAX`, so no row can follow it.
    #[error("no row index after {0} is available")]
    RowIndexOverflow(RowIndex),
}

/// Appends a new row after the highest existing index and returns the edited
/// settings together with the index the row received.
///
/// An empty layout receives row 0.
///
/// # Errors
///
/// Returns [`LayoutEditError::RowIndexOverflow`] if the highest index is
/// `i32::MAX`.  Existing rows are never replaced.
pub fn append_row(
    settings: &KeyboardSettings,
    keys: Vec<String>,
) -> Result<(KeyboardSettings, RowIndex), LayoutEditError> {
    let index = match settings.custom_layout.keys().next_back() {
        Some(&last) => last
            .checked_add(1)
            .ok_or(LayoutEditError::RowIndexOverflow(last))?,
        None => 0,
    };
    let mut edited = settings.clone();
    edited.custom_layout.insert(index, keys);
    Ok((edited, index))
}

/// Removes row `index` and renumbers the remaining rows `0..n`.
///
/// # Errors
///
/// Returns [`LayoutEditError::RowNotFound`] if `index` is not in the layout.
pub fn remove_row(
    settings: &KeyboardSettings,
    index: RowIndex,
) -> Result<KeyboardSettings, LayoutEditError> {
    if !settings.custom_layout.contains_key(&index) {
        return Err(LayoutEditError::RowNotFound(index));
    }
    let renumbered: BTreeMap<RowIndex, Vec<String>> = settings
        .custom_layout
        .iter()
        .filter(|(i, _)| **i != index)
        .zip(0..)
        .map(|((_, keys), new_index)| (new_index, keys.clone()))
        .collect();
    Ok(settings.clone().with_custom_layout(renumbered))
}

/// Replaces every key in row `index`.
///
/// # Errors
///
/// Returns [`LayoutEditError::RowNotFound`] if `index` is not in the layout.
pub fn replace_row(
    settings: &KeyboardSettings,
    index: RowIndex,
    keys: Vec<String>,
) -> Result<KeyboardSettings, LayoutEditError> {
    edit_row(settings, index, |row| {
        *row = keys;
        Ok(())
    })
}

/// Appends `key` to the end of row `index`.
///
/// The editor appends an empty label first and lets the user type it in, so
/// an empty `key` is accepted.
///
/// # Errors
///
/// Returns [`LayoutEditError::RowNotFound`] if `index` is not in the layout.
pub fn push_key(
    settings: &KeyboardSettings,
    index: RowIndex,
    key: impl Into<String>,
) -> Result<KeyboardSettings, LayoutEditError> {
    let key = key.into();
    edit_row(settings, index, |row| {
        row.push(key);
        Ok(())
    })
}

/// Replaces the key at `position` in row `index`.
///
/// # Errors
///
/// Returns [`LayoutEditError::RowNotFound`] or
/// [`LayoutEditError::KeyOutOfRange`].
pub fn replace_key(
    settings: &KeyboardSettings,
    index: RowIndex,
    position: usize,
    key: impl Into<String>,
) -> Result<KeyboardSettings, LayoutEditError> {
    let key = key.into();
    edit_row(settings, index, |row| {
        let slot = row.get_mut(position).ok_or(LayoutEditError::KeyOutOfRange {
            row: index,
            position,
        })?;
        *slot = key;
        Ok(())
    })
}

/// Removes the key at `position` in row `index`.
///
/// # Errors
///
/// Returns [`LayoutEditError::RowNotFound`] or
/// [`LayoutEditError::KeyOutOfRange`].
pub fn remove_key(
    settings: &KeyboardSettings,
    index: RowIndex,
    position: usize,
) -> Result<KeyboardSettings, LayoutEditError> {
    edit_row(settings, index, |row| {
        if position >= row.len() {
            return Err(LayoutEditError::KeyOutOfRange {
                row: index,
                position,
            });
        }
        row.remove(position);
        Ok(())
    })
}

fn edit_row<F>(
    settings: &KeyboardSettings,
    index: RowIndex,
    edit: F,
) -> Result<KeyboardSettings, LayoutEditError>
where
    F: FnOnce(&mut Vec<String>) -> Result<(), LayoutEditError>,
{
    let mut edited = settings.clone();
    let row = edited
        .custom_layout
        .get_mut(&index)
        .ok_or(LayoutEditError::RowNotFound(index))?;
    edit(row)?;
    Ok(edited)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keys(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|k| (*k).to_string()).collect()
    }

    fn three_rows() -> KeyboardSettings {
        let mut layout = BTreeMap::new();
        layout.insert(0, keys(&["1", "2"]));
        layout.insert(1, keys(&["q", "w"]));
        layout.insert(2, keys(&["a", "s"]));
        KeyboardSettings::default().with_custom_layout(layout)
    }

    #[test]
    fn test_append_row_uses_one_past_highest_index() {
        let (edited, index) = append_row(&three_rows(), keys(&["z"])).unwrap();
        assert_eq!(index, 3);
        assert_eq!(edited.custom_layout[&3], keys(&["z"]));
    }

    #[test]
    fn test_append_row_on_empty_layout_uses_row_zero() {
        let empty = KeyboardSettings::default().with_custom_layout(BTreeMap::new());
        let (edited, index) = append_row(&empty, Vec::new()).unwrap();
        assert_eq!(index, 0);
        assert!(edited.custom_layout[&0].is_empty());
    }

    #[test]
    fn test_append_row_leaves_input_untouched() {
        let original = three_rows();
        let _ = append_row(&original, keys(&["z"]));
        assert_eq!(original.custom_layout.len(), 3);
    }

    #[test]
    fn test_append_row_after_max_index_fails_without_replacing() {
        // Arrange
        let mut layout = BTreeMap::new();
        layout.insert(RowIndex::MAX, keys(&["keep"]));
        let settings = KeyboardSettings::default().with_custom_layout(layout);

        // Act
        let result = append_row(&settings, keys(&["new"]));

        // Assert
        assert_eq!(result, Err(LayoutEditError::RowIndexOverflow(RowIndex::MAX)));
        assert_eq!(settings.custom_layout[&RowIndex::MAX], keys(&["keep"]));
    }

    #[test]
    fn test_append_row_after_negative_indices() {
        let mut layout = BTreeMap::new();
        layout.insert(-5, keys(&["a"]));
        layout.insert(-2, keys(&["b"]));
        let settings = KeyboardSettings::default().with_custom_layout(layout);

        let (edited, index) = append_row(&settings, keys(&["c"])).unwrap();

        assert_eq!(index, -1);
        assert_eq!(edited.custom_layout.len(), 3);
    }

    #[test]
    fn test_remove_row_renumbers_remaining_rows() {
        // Act
        let edited = remove_row(&three_rows(), 1).expect("row 1 exists");

        // Assert
        let indices: Vec<RowIndex> = edited.custom_layout.keys().copied().collect();
        assert_eq!(indices, vec![0, 1]);
        assert_eq!(edited.custom_layout[&0], keys(&["1", "2"]));
        assert_eq!(edited.custom_layout[&1], keys(&["a", "s"]));
    }

    #[test]
    fn test_remove_row_closes_gaps_in_sparse_layout() {
        let mut layout = BTreeMap::new();
        layout.insert(0, keys(&["a"]));
        layout.insert(4, keys(&["b"]));
        layout.insert(9, keys(&["c"]));
        let settings = KeyboardSettings::default().with_custom_layout(layout);

        let edited = remove_row(&settings, 0).expect("row 0 exists");

        assert_eq!(edited.custom_layout[&0], keys(&["b"]));
        assert_eq!(edited.custom_layout[&1], keys(&["c"]));
        assert_eq!(edited.custom_layout.len(), 2);
    }

    #[test]
    fn test_remove_row_fails_for_missing_index() {
        assert_eq!(
            remove_row(&three_rows(), 7),
            Err(LayoutEditError::RowNotFound(7))
        );
    }

    #[test]
    fn test_replace_row_swaps_all_keys() {
        let edited = replace_row(&three_rows(), 2, keys(&["x"])).expect("row 2 exists");
        assert_eq!(edited.custom_layout[&2], keys(&["x"]));
    }

    #[test]
    fn test_push_key_appends_to_row_end() {
        let edited = push_key(&three_rows(), 0, "3").expect("row 0 exists");
        assert_eq!(edited.custom_layout[&0], keys(&["1", "2", "3"]));
    }

    #[test]
    fn test_push_key_accepts_empty_label() {
        let edited = push_key(&three_rows(), 0, "").expect("row 0 exists");
        assert_eq!(edited.custom_layout[&0].last().map(String::as_str), Some(""));
    }

    #[test]
    fn test_replace_key_changes_key_at_position() {
        let edited = replace_key(&three_rows(), 1, 1, "e").expect("key exists");
        assert_eq!(edited.custom_layout[&1], keys(&["q", "e"]));
    }

    #[test]
    fn test_replace_key_out_of_range_fails() {
        assert_eq!(
            replace_key(&three_rows(), 1, 5, "e"),
            Err(LayoutEditError::KeyOutOfRange { row: 1, position: 5 })
        );
    }

    #[test]
    fn test_remove_key_drops_key_at_position() {
        let edited = remove_key(&three_rows(), 2, 0).expect("key exists");
        assert_eq!(edited.custom_layout[&2], keys(&["s"]));
    }

    #[test]
    fn test_remove_key_on_missing_row_fails() {
        assert_eq!(
            remove_key(&three_rows(), -1, 0),
            Err(LayoutEditError::RowNotFound(-1))
        );
    }

    #[test]
    fn test_edits_do_not_change_case_of_keys() {
        let edited = push_key(&three_rows(), 1, "E").expect("row 1 exists");
        assert_eq!(edited.custom_layout[&1], keys(&["q", "w", "E"]));
    }
}
