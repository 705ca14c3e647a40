//! In-memory mirrors of the backend's link and folder lists.
//!
//! These types only apply patches; deciding *when* to apply them (after the
//! backend confirmed) is the dashboard's job.

mod folders;

pub use folders::FolderCollection;

use crate::models::{FolderId, Link, LinkId};

/// Links in display order. Server order after a load, newest-first after adds.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LinkCollection {
    links: Vec<Link>,
}

impl LinkCollection {
    pub const fn new() -> Self {
        Self { links: Vec::new() }
    }

    /// Replace everything with a fresh server list, keeping server order.
    pub fn replace_all(&mut self, links: Vec<Link>) {
        self.links = links;
    }

    /// Insert a confirmed record at the front.
    pub fn prepend(&mut self, link: Link) {
        self.links.insert(0, link);
    }

    /// Remove every record with `id`; returns how many were removed.
    pub fn remove(&mut self, id: &LinkId) -> usize {
        let before = self.links.len();
        self.links.retain(|link| &link.id != id);
        before - self.links.len()
    }

    pub fn get(&self, id: &LinkId) -> Option<&Link> {
        self.links.iter().find(|link| &link.id == id)
    }

    pub fn as_slice(&self) -> &[Link] {
        &self.links
    }

    pub fn len(&self) -> usize {
        self.links.len()
    }

    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    pub fn filtered(&self, folder: Option<&FolderId>) -> Vec<Link> {
        filter_by_folder(&self.links, folder)
    }
}

/// Links whose folder equals `folder`; every link when `folder` is `None`.
pub fn filter_by_folder(links: &[Link], folder: Option<&FolderId>) -> Vec<Link> {
    match folder {
        None => links.to_vec(),
        Some(folder) => links
            .iter()
            .filter(|link| link.folder_id() == Some(folder))
            .cloned()
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::models::{FolderRef, LinkType};

    fn link(id: &str, folder: Option<&str>) -> Link {
        Link {
            id: LinkId::new(id),
            url: format!("https://example.com/{id}"),
            title: id.to_uppercase(),
            kind: LinkType::Other,
            description: None,
            tags: Vec::new(),
            folder: folder.map(|folder| FolderRef {
                id: FolderId::new(folder),
                name: None,
            }),
            created_at: None,
        }
    }

    fn ids(links: &[Link]) -> Vec<&str> {
        links.iter().map(|link| link.id.as_str()).collect()
    }

    #[test]
    fn prepend_keeps_newest_first() {
        let mut links = LinkCollection::new();
        links.replace_all(vec![link("a", None), link("b", None)]);
        links.prepend(link("c", None));
        links.prepend(link("d", None));
        assert_eq!(ids(links.as_slice()), vec!["d", "c", "a", "b"]);
    }

    #[test]
    fn remove_unknown_id_is_a_no_op() {
        let mut links = LinkCollection::new();
        links.replace_all(vec![link("a", None)]);
        assert_eq!(links.remove(&LinkId::new("zzz")), 0);
        assert_eq!(links.len(), 1);
        assert_eq!(links.remove(&LinkId::new("a")), 1);
        assert!(links.is_empty());
    }

    #[test]
    fn filter_none_returns_everything() {
        let links = vec![link("a", Some("f1")), link("b", None)];
        assert_eq!(filter_by_folder(&links, None), links);
    }

    #[test]
    fn filter_by_folder_is_pure_and_idempotent() {
        let links = vec![
            link("a", Some("f1")),
            link("b", Some("f2")),
            link("c", None),
            link("d", Some("f1")),
        ];
        let folder = FolderId::new("f1");

        let once = filter_by_folder(&links, Some(&folder));
        assert_eq!(ids(&once), vec!["a", "d"]);
        assert_eq!(filter_by_folder(&once, Some(&folder)), once);
        assert_eq!(links.len(), 4);
    }
}
