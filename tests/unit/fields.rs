use scholar_client::api::fields::{
    build_fields_param, ALL_AUTHOR_FIELDS, ALL_PAPER_FIELDS, DEFAULT_AUTHOR_FIELDS,
    DEFAULT_CITATION_FIELDS, DEFAULT_PAPER_FIELDS,
};

#[test]
fn empty_selection_uses_defaults() {
    let none: [&str; 0] = [];
    assert_eq!(
        build_fields_param(&none, DEFAULT_PAPER_FIELDS),
        "paperId,title,abstract,year,authors,citationCount,url,openAccessPdf"
    );
    assert_eq!(
        build_fields_param(&none, DEFAULT_CITATION_FIELDS),
        "paperId,title,year,authors,citationCount"
    );
}

#[test]
fn explicit_selection_is_kept_in_order() {
    let fields = vec!["year".to_string(), "title".to_string()];
    assert_eq!(build_fields_param(&fields, DEFAULT_PAPER_FIELDS), "year,title");
}

#[test]
fn defaults_are_subsets_of_full_lists() {
    for field in DEFAULT_PAPER_FIELDS.iter().chain(DEFAULT_CITATION_FIELDS) {
        assert!(ALL_PAPER_FIELDS.contains(field), "{field}");
    }
    for field in DEFAULT_AUTHOR_FIELDS {
        assert!(ALL_AUTHOR_FIELDS.contains(field), "{field}");
    }
}
