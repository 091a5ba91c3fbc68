//! Model folder names and schema file resolution.

use crate::newtype_string::define_newtype_string;
use std::path::{Path, PathBuf};

define_newtype_string! {
    /// Name of a model folder under the model root (e.g. `user`, `_userRole`).
    ///
    /// Join-table folders are prefixed with `_`; the prefix is not part of the
    /// schema file name.
    pub struct ModelFolder;
}

impl ModelFolder {
    /// Whether this folder holds a join table (leading `_`).
    pub fn is_join_table(&self) -> bool {
        self.as_str().starts_with('_')
    }

    /// File name of the history model inside this folder.
    ///
    /// ```
    /// use hg_core::ModelFolder;
    /// assert_eq!(ModelFolder::new("user").schema_file_name(), "userHistory.prisma");
    /// assert_eq!(ModelFolder::new("_userRole").schema_file_name(), "userRoleHistory.prisma");
    /// ```
    pub fn schema_file_name(&self) -> String {
        let stem = self.as_str().strip_prefix('_').unwrap_or(self.as_str());
        format!("{stem}History.prisma")
    }

    /// Full path of the history model given the model root directory.
    pub fn schema_path(&self, model_root: &Path) -> PathBuf {
        model_root.join(self.as_str()).join(self.schema_file_name())
    }
}
