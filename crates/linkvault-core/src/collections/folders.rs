use std::collections::HashSet;

use crate::models::{Folder, FolderId};

/// Folders in server order; new folders are appended.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FolderCollection {
    folders: Vec<Folder>,
}

impl FolderCollection {
    pub const fn new() -> Self {
        Self {
            folders: Vec::new(),
        }
    }

    pub fn replace_all(&mut self, folders: Vec<Folder>) {
        self.folders = folders;
    }

    pub fn push(&mut self, folder: Folder) {
        self.folders.push(folder);
    }

    /// Replace the record with the same id in place, or append it.
    pub fn upsert(&mut self, folder: Folder) {
        match self.folders.iter_mut().find(|existing| existing.id == folder.id) {
            Some(existing) => *existing = folder,
            None => self.folders.push(folder),
        }
    }

    pub fn remove(&mut self, id: &FolderId) -> Option<Folder> {
        let index = self.folders.iter().position(|folder| &folder.id == id)?;
        Some(self.folders.remove(index))
    }

    pub fn get(&self, id: &FolderId) -> Option<&Folder> {
        self.folders.iter().find(|folder| &folder.id == id)
    }

    pub fn as_slice(&self) -> &[Folder] {
        &self.folders
    }

    pub fn len(&self) -> usize {
        self.folders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.folders.is_empty()
    }

    pub fn children(&self, parent: Option<&FolderId>) -> Vec<&Folder> {
        self.folders
            .iter()
            .filter(|folder| folder.parent.as_ref() == parent)
            .collect()
    }

    /// Whether moving `folder` under `new_parent` would make it its own ancestor.
    ///
    /// Walks parent pointers up from `new_parent`. Unknown folders end the walk,
    /// and so does revisiting a folder when local data already holds a cycle.
    pub fn would_create_cycle(&self, folder: &FolderId, new_parent: &FolderId) -> bool {
        let mut visited = HashSet::new();
        let mut cursor = Some(new_parent);
        while let Some(current) = cursor {
            if current == folder {
                return true;
            }
            if !visited.insert(current) {
                return false;
            }
            cursor = self.get(current).and_then(|found| found.parent.as_ref());
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn folder(id: &str, parent: Option<&str>) -> Folder {
        Folder {
            id: FolderId::new(id),
            name: id.to_uppercase(),
            parent: parent.map(FolderId::new),
        }
    }

    fn tree() -> FolderCollection {
        let mut folders = FolderCollection::new();
        folders.replace_all(vec![
            folder("root", None),
            folder("a", Some("root")),
            folder("b", Some("a")),
            folder("other", None),
        ]);
        folders
    }

    #[test]
    fn moving_under_descendant_is_a_cycle() {
        let folders = tree();
        let root = FolderId::new("root");
        assert!(folders.would_create_cycle(&root, &FolderId::new("b")));
        assert!(folders.would_create_cycle(&root, &root));
        assert!(!folders.would_create_cycle(&FolderId::new("b"), &FolderId::new("other")));
        assert!(!folders.would_create_cycle(&FolderId::new("a"), &FolderId::new("unknown")));
    }

    #[test]
    fn cycle_walk_terminates_on_corrupt_data() {
        let mut folders = FolderCollection::new();
        folders.replace_all(vec![folder("x", Some("y")), folder("y", Some("x"))]);
        assert!(!folders.would_create_cycle(&FolderId::new("z"), &FolderId::new("x")));
    }

    #[test]
    fn upsert_replaces_in_place() {
        let mut folders = tree();
        folders.upsert(folder("a", None));
        assert_eq!(folders.as_slice()[1], folder("a", None));
        assert_eq!(folders.len(), 4);

        folders.upsert(folder("new", None));
        assert_eq!(folders.as_slice()[4].id, FolderId::new("new"));
    }

    #[test]
    fn children_lists_direct_descendants() {
        let folders = tree();
        let roots: Vec<&str> = folders
            .children(None)
            .into_iter()
            .map(|folder| folder.id.as_str())
            .collect();
        assert_eq!(roots, vec!["root", "other"]);
        assert_eq!(folders.children(Some(&FolderId::new("a"))).len(), 1);
    }

    #[test]
    fn remove_returns_deleted_record() {
        let mut folders = tree();
        assert_eq!(folders.remove(&FolderId::new("b")), Some(folder("b", Some("a"))));
        assert_eq!(folders.remove(&FolderId::new("b")), None);
    }
}
