//! Field selections for the `fields` query parameter

/// Paper fields requested by default
pub const DEFAULT_PAPER_FIELDS: &[&str] = &[
    "paperId",
    "title",
    "abstract",
    "year",
    "authors",
    "citationCount",
    "url",
    "openAccessPdf",
];

/// Author fields requested by default
pub const DEFAULT_AUTHOR_FIELDS: &[&str] = &[
    "authorId",
    "name",
    "affiliations",
    "paperCount",
    "citationCount",
    "hIndex",
];

/// Paper fields requested for citation and reference listings
pub const DEFAULT_CITATION_FIELDS: &[&str] = &["paperId", "title", "year", "authors", "citationCount"];

/// Every paper field the Graph API exposes
pub const ALL_PAPER_FIELDS: &[&str] = &[
    "paperId",
    "corpusId",
    "externalIds",
    "url",
    "title",
    "abstract",
    "venue",
    "year",
    "referenceCount",
    "citationCount",
    "influentialCitationCount",
    "isOpenAccess",
    "openAccessPdf",
    "fieldsOfStudy",
    "s2FieldsOfStudy",
    "publicationTypes",
    "publicationDate",
    "journal",
    "authors",
];

/// Every author field the Graph API exposes
pub const ALL_AUTHOR_FIELDS: &[&str] = &[
    "authorId",
    "externalIds",
    "url",
    "name",
    "affiliations",
    "homepage",
    "paperCount",
    "citationCount",
    "hIndex",
];

/// Join the requested fields, or `defaults` when none were requested
pub fn build_fields_param<S: AsRef<str>>(fields: &[S], defaults: &[&str]) -> String {
    if fields.is_empty() {
        defaults.join(",")
    } else {
        fields.iter().map(AsRef::as_ref).collect::<Vec<_>>().join(",")
    }
}
