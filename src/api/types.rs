//! Response models for the Graph and Recommendations APIs
//!
//! Only the fields requested through `fields=` are present in a response, so
//! almost everything is optional. Field names mirror the API's JSON keys.

#![allow(missing_docs)]

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Author record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
    /// Semantic Scholar author ID (absent for unresolved co-authors)
    #[serde(default)]
    pub author_id: Option<String>,
    /// Display name
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub affiliations: Option<Vec<String>>,
    #[serde(default)]
    pub homepage: Option<String>,
    #[serde(default)]
    pub paper_count: Option<u64>,
    #[serde(default)]
    pub citation_count: Option<u64>,
    #[serde(default)]
    pub h_index: Option<u64>,
}

/// Identifiers of a paper in external catalogues
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExternalIds {
    #[serde(rename = "DOI", default)]
    pub doi: Option<String>,
    #[serde(rename = "ArXiv", default)]
    pub arxiv: Option<String>,
    #[serde(rename = "PMID", default)]
    pub pmid: Option<String>,
    #[serde(rename = "PMCID", default)]
    pub pmcid: Option<String>,
    #[serde(rename = "MAG", default)]
    pub mag: Option<String>,
    #[serde(rename = "CorpusId", default)]
    pub corpus_id: Option<u64>,
    #[serde(rename = "ACL", default)]
    pub acl: Option<String>,
}

/// Open-access PDF location
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OpenAccessPdf {
    /// Direct PDF URL
    pub url: String,
    /// Licence status reported by the API
    #[serde(default)]
    pub status: Option<String>,
}

/// Journal metadata
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Journal {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub pages: Option<String>,
    #[serde(default)]
    pub volume: Option<String>,
}

/// Field-of-study classification with its source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct S2FieldOfStudy {
    pub category: String,
    pub source: String,
}

/// Paper record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paper {
    /// Semantic Scholar paper ID
    pub paper_id: String,
    #[serde(default)]
    pub corpus_id: Option<u64>,
    #[serde(default)]
    pub external_ids: Option<ExternalIds>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(rename = "abstract", default)]
    pub abstract_text: Option<String>,
    #[serde(default)]
    pub venue: Option<String>,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub reference_count: Option<u64>,
    #[serde(default)]
    pub citation_count: Option<u64>,
    #[serde(default)]
    pub influential_citation_count: Option<u64>,
    #[serde(default)]
    pub is_open_access: Option<bool>,
    #[serde(default)]
    pub open_access_pdf: Option<OpenAccessPdf>,
    #[serde(default)]
    pub fields_of_study: Option<Vec<String>>,
    #[serde(default)]
    pub s2_fields_of_study: Option<Vec<S2FieldOfStudy>>,
    #[serde(default)]
    pub publication_types: Option<Vec<String>>,
    #[serde(default)]
    pub publication_date: Option<NaiveDate>,
    #[serde(default)]
    pub journal: Option<Journal>,
    #[serde(default)]
    pub authors: Option<Vec<Author>>,
}

impl Paper {
    /// Comma-separated author names, or `None` when no names are known
    pub fn author_names(&self) -> Option<String> {
        let names: Vec<&str> = self
            .authors
            .iter()
            .flatten()
            .filter_map(|author| author.name.as_deref())
            .collect();
        (!names.is_empty()).then(|| names.join(", "))
    }
}

/// A paper citing the queried one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub citing_paper: Paper,
    #[serde(default)]
    pub intents: Option<Vec<String>>,
    #[serde(default)]
    pub contexts: Option<Vec<String>>,
    #[serde(default)]
    pub is_influential: Option<bool>,
}

/// A paper cited by the queried one
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reference {
    pub cited_paper: Paper,
    #[serde(default)]
    pub intents: Option<Vec<String>>,
    #[serde(default)]
    pub contexts: Option<Vec<String>>,
    #[serde(default)]
    pub is_influential: Option<bool>,
}

/// Relevance-ranked paper search page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaperSearchResponse {
    pub total: u64,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub next: Option<u64>,
    #[serde(default)]
    pub data: Vec<Paper>,
}

/// Author search page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorSearchResponse {
    pub total: u64,
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub next: Option<u64>,
    #[serde(default)]
    pub data: Vec<Author>,
}

/// Generic offset-paginated listing
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    #[serde(default)]
    pub offset: Option<u64>,
    #[serde(default)]
    pub next: Option<u64>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Papers citing a paper
pub type CitationsResponse = Page<Citation>;

/// Papers referenced by a paper
pub type ReferencesResponse = Page<Reference>;

/// Papers written by an author
pub type AuthorPapersResponse = Page<Paper>;

/// Recommendation results
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationsResponse {
    #[serde(default)]
    pub recommended_papers: Vec<Paper>,
}
