use serde::{Deserialize, Serialize};

/// Content table primary keys are SQLite INTEGER rowids.
pub type DbId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;

/// The two kinds of content a group catalog can hold.
///
/// Anything the metadata service reports that is not `"series"` is
/// normalized to [`ContentType::Movie`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentType {
    Movie,
    Series,
}

impl ContentType {
    /// The lowercase string stored in the `content.type` column.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentType::Movie => "movie",
            ContentType::Series => "series",
        }
    }

    /// Normalize a metadata-service type string: `"series"` maps to
    /// `Series`, everything else to `Movie`.
    pub fn from_service_type(raw: &str) -> Self {
        if raw == "series" {
            ContentType::Series
        } else {
            ContentType::Movie
        }
    }
}

impl std::fmt::Display for ContentType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentType {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "movie" => Ok(ContentType::Movie),
            "series" => Ok(ContentType::Series),
            other => Err(crate::error::CoreError::Validation(format!(
                "Unknown content type: {other}"
            ))),
        }
    }
}
