//! Data models for LinkVault

/// Declares a backend-assigned string identifier.
macro_rules! backend_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Wrap a raw identifier, trimming surrounding whitespace.
            pub fn new(raw: impl AsRef<str>) -> Self {
                Self(raw.as_ref().trim().to_string())
            }

            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl std::str::FromStr for $name {
            type Err = crate::Error;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                let id = Self::new(s);
                if id.0.is_empty() {
                    return Err(crate::Error::InvalidInput(format!(
                        "{} must not be empty",
                        stringify!($name)
                    )));
                }
                Ok(id)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self::new(value)
            }
        }
    };
}

mod folder;
mod link;

pub use folder::{Folder, FolderId, FolderUpdate, NewFolder};
pub use link::{FolderRef, Link, LinkId, LinkType, NewLink};
