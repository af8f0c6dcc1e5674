//! Metadata fields that point at other assets.

use crate::MetadataRecord;

/// How a link field stores its reference(s).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum LinkKind {
    /// A single media URI string
    #[display("single")]
    Single,
}

/// A metadata field whose value is a media URI.
#[derive(Debug, Clone, Copy)]
pub struct LinkField {
    /// JSON name of the field
    pub name: &'static str,
    /// Value shape
    pub kind: LinkKind,
    read: fn(&MetadataRecord) -> Option<&str>,
}

impl LinkField {
    /// Raw link values of this field in `record`.
    pub fn values<'a>(&self, record: &'a MetadataRecord) -> Vec<&'a str> {
        match self.kind {
            LinkKind::Single => (self.read)(record).into_iter().collect(),
        }
    }
}

/// Link fields in traversal order.
pub const LINK_FIELDS: &[LinkField] = &[LinkField {
    name: "cover",
    kind: LinkKind::Single,
    read: cover,
}];

fn cover(record: &MetadataRecord) -> Option<&str> {
    record.cover.as_deref()
}

/// Every raw link value of `record`, in [`LINK_FIELDS`] order.
///
/// # Examples
///
/// ```
/// use mediaref_core::{MetadataRecord, link_values};
///
/// let record = MetadataRecord::default().with_cover("uuid:COVER-ID");
/// assert_eq!(link_values(&record), vec![("cover", "uuid:COVER-ID")]);
/// ```
pub fn link_values(record: &MetadataRecord) -> Vec<(&'static str, &str)> {
    LINK_FIELDS
        .iter()
        .flat_map(|field| field.values(record).into_iter().map(move |v| (field.name, v)))
        .collect()
}
