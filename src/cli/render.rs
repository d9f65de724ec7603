//! Human-readable output

use crate::api::types::{Author, AuthorSearchResponse, Paper, PaperSearchResponse};

/// Paper search page with a result header
pub fn paper_search(response: &PaperSearchResponse, offset: u32) -> String {
    let papers: Vec<&Paper> = response.data.iter().collect();
    let mut out = if papers.is_empty() {
        format!("Found {} papers, none on this page", response.total)
    } else {
        format!(
            "Found {} papers, showing {}-{}:",
            response.total,
            offset as usize + 1,
            offset as usize + papers.len()
        )
    };
    if !papers.is_empty() {
        out.push_str("\n\n");
        out.push_str(&numbered_papers(&papers, offset));
    }
    out
}

/// Labelled paper listing
pub fn paper_list(label: &str, papers: &[&Paper], offset: u32) -> String {
    if papers.is_empty() {
        return format!("No {label} found");
    }
    format!(
        "{} {label}:\n\n{}",
        papers.len(),
        numbered_papers(papers, offset)
    )
}

fn numbered_papers(papers: &[&Paper], offset: u32) -> String {
    papers
        .iter()
        .enumerate()
        .map(|(i, paper)| format!("{}. {}", offset as usize + i + 1, paper_summary(paper)))
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn paper_summary(paper: &Paper) -> String {
    let mut lines = vec![
        paper.title.clone().unwrap_or_else(|| "(untitled)".to_string()),
        format!(
            "   Authors: {}",
            paper.author_names().unwrap_or_else(|| "unknown".to_string())
        ),
        format!(
            "   Year: {} | Citations: {}",
            paper
                .year
                .map(|y| y.to_string())
                .unwrap_or_else(|| "unknown".to_string()),
            paper.citation_count.unwrap_or(0)
        ),
    ];
    if let Some(pdf) = &paper.open_access_pdf {
        lines.push(format!("   PDF: {}", pdf.url));
    }
    lines.push(format!("   ID: {}", paper.paper_id));
    lines.join("\n")
}

/// Full paper record
pub fn paper_detail(paper: &Paper) -> String {
    let mut lines = vec![paper_summary(paper)];
    if let Some(venue) = paper.venue.as_deref().filter(|v| !v.is_empty()) {
        lines.push(format!("   Venue: {venue}"));
    }
    if let Some(date) = paper.publication_date {
        lines.push(format!("   Published: {date}"));
    }
    if let Some(url) = &paper.url {
        lines.push(format!("   URL: {url}"));
    }
    if let Some(abstract_text) = &paper.abstract_text {
        lines.push(String::new());
        lines.push(abstract_text.clone());
    }
    lines.join("\n")
}

/// Batch results, reporting IDs the API could not resolve
pub fn batch(ids: &[String], papers: &[Option<Paper>]) -> String {
    ids.iter()
        .zip(papers)
        .enumerate()
        .map(|(i, (id, paper))| match paper {
            Some(paper) => format!("{}. {}", i + 1, paper_summary(paper)),
            None => format!("{}. {id}: not found", i + 1),
        })
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Author search page with a result header
pub fn author_search(response: &AuthorSearchResponse, offset: u32) -> String {
    if response.data.is_empty() {
        return format!("Found {} authors, none on this page", response.total);
    }
    let entries = response
        .data
        .iter()
        .enumerate()
        .map(|(i, author)| format!("{}. {}", offset as usize + i + 1, author_summary(author)))
        .collect::<Vec<_>>()
        .join("\n\n");
    format!("Found {} authors:\n\n{entries}", response.total)
}

fn author_summary(author: &Author) -> String {
    let mut lines = vec![author.name.clone().unwrap_or_else(|| "(unnamed)".to_string())];
    if let Some(affiliations) = author.affiliations.as_ref().filter(|a| !a.is_empty()) {
        lines.push(format!("   Affiliations: {}", affiliations.join(", ")));
    }
    lines.push(format!(
        "   h-index: {} | Papers: {} | Citations: {}",
        author.h_index.unwrap_or(0),
        author.paper_count.unwrap_or(0),
        author.citation_count.unwrap_or(0)
    ));
    if let Some(id) = &author.author_id {
        lines.push(format!("   ID: {id}"));
    }
    lines.join("\n")
}

/// Full author record
pub fn author_detail(author: &Author) -> String {
    let mut out = author_summary(author);
    if let Some(homepage) = &author.homepage {
        out.push_str(&format!("\n   Homepage: {homepage}"));
    }
    if let Some(url) = &author.url {
        out.push_str(&format!("\n   URL: {url}"));
    }
    out
}
