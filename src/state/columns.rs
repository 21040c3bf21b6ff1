//! Visibility of the columns of a list resource.

use std::sync::Arc;

use {parking_lot::RwLock, tracing::warn};

/// Shared, ordered set of list columns and whether each is shown.
///
/// Cloning yields another handle to the same columns.
#[derive(Debug, Clone)]
pub struct ColumnVisibility {
    /// Resource the columns belong to, e.g. `"album"`.
    resource: String,
    /// Columns in display order.
    columns: Arc<RwLock<Vec<(String, bool)>>>,
}

impl ColumnVisibility {
    /// Creates a column set with every column visible.
    ///
    /// # Arguments
    ///
    /// * `resource` - Resource the columns belong to.
    /// * `fields` - Column field names in display order.
    pub fn new<I, S>(resource: impl Into<String>, fields: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            resource: resource.into(),
            columns: Arc::new(RwLock::new(
                fields.into_iter().map(|field| (field.into(), true)).collect(),
            )),
        }
    }

    /// Resource the columns belong to.
    #[must_use]
    pub fn resource(&self) -> &str {
        &self.resource
    }

    /// Snapshot of all columns in display order.
    #[must_use]
    pub fn columns(&self) -> Vec<(String, bool)> {
        self.columns.read().clone()
    }

    /// Returns `true` if `field` is a known, visible column.
    #[must_use]
    pub fn is_visible(&self, field: &str) -> bool {
        self.columns
            .read()
            .iter()
            .any(|(name, visible)| name == field && *visible)
    }

    /// Names of the visible columns in display order.
    #[must_use]
    pub fn visible_fields(&self) -> Vec<String> {
        self.columns
            .read()
            .iter()
            .filter(|(_, visible)| *visible)
            .map(|(name, _)| name.clone())
            .collect()
    }

    /// Shows or hides `field`. Unknown fields are ignored.
    ///
    /// # Returns
    ///
    /// The new visibility, or `None` if `field` is unknown.
    pub fn set_visible(&self, field: &str, visible: bool) -> Option<bool> {
        let mut columns = self.columns.write();
        match columns.iter_mut().find(|(name, _)| name == field) {
            Some((_, current)) => {
                *current = visible;
                Some(visible)
            }
            None => {
                warn!(resource = %self.resource, field, "Ignoring unknown column");
                None
            }
        }
    }

    /// Flips the visibility of `field`. Unknown fields are ignored.
    ///
    /// # Returns
    ///
    /// The new visibility, or `None` if `field` is unknown.
    pub fn toggle(&self, field: &str) -> Option<bool> {
        let visible = self.is_visible(field);
        self.set_visible(field, !visible)
    }
}

#[cfg(test)]
mod tests {
    use crate::state::columns::ColumnVisibility;

    #[test]
    fn test_new_columns_are_visible() {
        let columns = ColumnVisibility::new("album", ["artist", "year"]);
        assert_eq!(columns.resource(), "album");
        assert_eq!(columns.visible_fields(), vec!["artist", "year"]);
    }

    #[test]
    fn test_toggle_flips_visibility() {
        let columns = ColumnVisibility::new("album", ["artist", "year"]);

        assert_eq!(columns.toggle("year"), Some(false));
        assert!(!columns.is_visible("year"));
        assert_eq!(columns.visible_fields(), vec!["artist"]);

        assert_eq!(columns.toggle("year"), Some(true));
        assert!(columns.is_visible("year"));
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let columns = ColumnVisibility::new("album", ["artist"]);

        assert_eq!(columns.toggle("genre"), None);
        assert_eq!(columns.set_visible("genre", true), None);
        assert!(!columns.is_visible("genre"));
        assert_eq!(columns.columns(), vec![("artist".to_string(), true)]);
    }

    #[test]
    fn test_clones_share_columns() {
        let columns = ColumnVisibility::new("album", ["artist"]);
        let other = columns.clone();

        other.set_visible("artist", false);
        assert!(!columns.is_visible("artist"));
    }
}
