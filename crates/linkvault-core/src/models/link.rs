//! Link model

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use super::FolderId;
use crate::error::{Error, Result};
use crate::util::{normalize_tags, normalize_text_option};

backend_id!(
    /// Backend-assigned identifier of a saved link
    LinkId
);

/// Classification shown next to a link's title
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LinkType {
    YouTube,
    Tweet,
    Article,
    #[default]
    Other,
}

impl LinkType {
    pub const ALL: [Self; 4] = [Self::YouTube, Self::Tweet, Self::Article, Self::Other];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::YouTube => "YouTube",
            Self::Tweet => "Tweet",
            Self::Article => "Article",
            Self::Other => "Other",
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LinkType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| {
                Error::InvalidInput(format!(
                    "Unknown link type '{wanted}' (expected YouTube, Tweet, Article or Other)"
                ))
            })
    }
}

/// Folder a link belongs to.
///
/// The backend may send either a bare folder id or a populated folder object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "FolderRefRepr", into = "FolderId")]
pub struct FolderRef {
    pub id: FolderId,
    pub name: Option<String>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum FolderRefRepr {
    Id(FolderId),
    Populated {
        #[serde(rename = "_id", alias = "id")]
        id: FolderId,
        #[serde(default)]
        name: Option<String>,
    },
}

impl From<FolderRefRepr> for FolderRef {
    fn from(value: FolderRefRepr) -> Self {
        match value {
            FolderRefRepr::Id(id) => Self { id, name: None },
            FolderRefRepr::Populated { id, name } => Self { id, name },
        }
    }
}

impl From<FolderRef> for FolderId {
    fn from(value: FolderRef) -> Self {
        value.id
    }
}

/// A saved link as returned by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    #[serde(rename = "_id", alias = "id")]
    pub id: LinkId,
    pub url: String,
    pub title: String,
    #[serde(rename = "type", default)]
    pub kind: LinkType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub folder: Option<FolderRef>,
    #[serde(
        rename = "createdAt",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<DateTime<Utc>>,
}

impl Link {
    pub fn folder_id(&self) -> Option<&FolderId> {
        self.folder.as_ref().map(|folder| &folder.id)
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> std::result::Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Create shape for `POST /links`, also used as the add-link form state.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NewLink {
    pub url: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: LinkType,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub folder: Option<FolderId>,
}

impl NewLink {
    pub fn new(url: impl Into<String>, title: impl Into<String>, kind: LinkType) -> Self {
        Self {
            url: url.into(),
            title: title.into(),
            kind,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.tags = tags.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn in_folder(mut self, folder: FolderId) -> Self {
        self.folder = Some(folder);
        self
    }

    /// Trimmed copy ready to send, or the reason it cannot be sent.
    pub fn validated(&self) -> Result<Self> {
        let url = self.url.trim();
        if url.is_empty() {
            return Err(Error::InvalidInput("Link URL is required".to_string()));
        }
        let title = self.title.trim();
        if title.is_empty() {
            return Err(Error::InvalidInput("Link title is required".to_string()));
        }

        Ok(Self {
            url: url.to_string(),
            title: title.to_string(),
            kind: self.kind,
            description: normalize_text_option(self.description.clone()),
            tags: normalize_tags(&self.tags),
            folder: self
                .folder
                .clone()
                .filter(|folder| !folder.as_str().is_empty()),
        })
    }
}
