//! Folder model

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

backend_id!(
    /// Backend-assigned identifier of a folder
    FolderId
);

/// A named grouping container; folders form a tree through `parent`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Folder {
    #[serde(rename = "_id", alias = "id")]
    pub id: FolderId,
    pub name: String,
    #[serde(default)]
    pub parent: Option<FolderId>,
}

/// Create shape for `POST /folders`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewFolder {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<FolderId>,
}

impl NewFolder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            parent: None,
        }
    }

    #[must_use]
    pub fn under(mut self, parent: FolderId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn validated(&self) -> Result<Self> {
        Ok(Self {
            name: validate_folder_name(&self.name)?,
            parent: self.parent.clone(),
        })
    }
}

/// Update shape for `PUT /folders/:id`.
///
/// `parent: None` leaves the parent untouched, `Some(None)` moves the folder
/// to the root and `Some(Some(id))` moves it under `id`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FolderUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent: Option<Option<FolderId>>,
}

impl FolderUpdate {
    pub fn rename(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            parent: None,
        }
    }

    pub fn move_to(parent: Option<FolderId>) -> Self {
        Self {
            name: None,
            parent: Some(parent),
        }
    }

    /// New parent requested by this update, if it re-parents under a folder.
    pub fn new_parent(&self) -> Option<&FolderId> {
        self.parent.as_ref().and_then(Option::as_ref)
    }

    pub fn validated(&self) -> Result<Self> {
        if self.name.is_none() && self.parent.is_none() {
            return Err(Error::InvalidInput(
                "Folder update must change the name or the parent".to_string(),
            ));
        }
        let name = self
            .name
            .as_deref()
            .map(validate_folder_name)
            .transpose()?;
        Ok(Self {
            name,
            parent: self.parent.clone(),
        })
    }
}

fn validate_folder_name(name: &str) -> Result<String> {
    let name = name.trim();
    if name.is_empty() {
        return Err(Error::InvalidInput("Folder name is required".to_string()));
    }
    Ok(name.to_string())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn folder_deserializes_with_optional_parent() {
        let root: Folder = serde_json::from_value(json!({ "_id": "f1", "name": "Root" })).unwrap();
        assert_eq!(root.parent, None);

        let child: Folder =
            serde_json::from_value(json!({ "_id": "f2", "name": "Child", "parent": "f1" }))
                .unwrap();
        assert_eq!(child.parent, Some(FolderId::new("f1")));
    }

    #[test]
    fn folder_update_distinguishes_root_from_unchanged() {
        assert_eq!(
            serde_json::to_value(FolderUpdate::rename("Docs")).unwrap(),
            json!({ "name": "Docs" })
        );
        assert_eq!(
            serde_json::to_value(FolderUpdate::move_to(None)).unwrap(),
            json!({ "parent": null })
        );
        assert_eq!(
            serde_json::to_value(FolderUpdate::move_to(Some(FolderId::new("f9")))).unwrap(),
            json!({ "parent": "f9" })
        );
    }

    #[test]
    fn empty_update_is_rejected() {
        assert!(FolderUpdate::default().validated().is_err());
        assert!(FolderUpdate::rename("   ").validated().is_err());
    }

    #[test]
    fn new_folder_trims_name() {
        let folder = NewFolder::new("  Reading ")
            .under(FolderId::new("f1"))
            .validated()
            .unwrap();
        assert_eq!(folder.name, "Reading");
        assert_eq!(folder.parent, Some(FolderId::new("f1")));
    }

    #[test]
    fn folder_id_parses_and_rejects_blank() {
        let id: FolderId = " f1 ".parse().unwrap();
        assert_eq!(id.as_str(), "f1");
        assert!(matches!(
            "  ".parse::<FolderId>(),
            Err(crate::Error::InvalidInput(_))
        ));
    }
}
