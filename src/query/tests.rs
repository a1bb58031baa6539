//! Tests for search query composition.

use rstest::rstest;

use crate::facets::{FilterState, Language, PopularityTier, RawFacets, TopicKeyword};

use super::{SearchOrder, SearchQuery, SearchSort};

fn filter(
    language: Language,
    popularity: Option<PopularityTier>,
    keyword: Option<&str>,
) -> FilterState {
    FilterState {
        language,
        popularity,
        keyword: keyword.map(|token| TopicKeyword::parse(token).expect("keyword should validate")),
        free_text: String::new(),
    }
}

#[rstest]
fn high_popularity_python_composes_full_query() {
    let query = SearchQuery::for_repositories(&filter(
        Language::Python,
        Some(PopularityTier::High),
        None,
    ));

    assert_eq!(
        query.qualifiers(),
        ["language:python", "stars:>10000"],
        "qualifier list mismatch"
    );
    assert_eq!(query.sort(), SearchSort::Stars, "sort mismatch");
    assert_eq!(query.order(), SearchOrder::Descending, "order mismatch");
    assert_eq!(query.per_page(), Some(10), "page size mismatch");
}

#[rstest]
#[case::high(PopularityTier::High, "stars:>10000")]
#[case::medium(PopularityTier::Medium, "stars:1000..10000")]
#[case::low(PopularityTier::Low, "stars:<1000")]
fn popularity_tier_table(#[case] tier: PopularityTier, #[case] expected: &str) {
    let query = SearchQuery::for_repositories(&filter(Language::Rust, Some(tier), None));
    assert_eq!(
        query.qualifiers().get(1).map(String::as_str),
        Some(expected),
        "star range mismatch"
    );
}

#[rstest]
fn keyword_appended_after_popularity() {
    let query = SearchQuery::for_repositories(&filter(
        Language::Javascript,
        Some(PopularityTier::Low),
        Some("frontend"),
    ));
    assert_eq!(
        query.qualifier_string(),
        "language:javascript stars:<1000 frontend",
        "qualifier string mismatch"
    );
}

#[rstest]
fn absent_facets_leave_only_language() {
    let query = SearchQuery::for_repositories(&filter(Language::Go, None, None));
    assert_eq!(query.qualifiers(), ["language:go"], "qualifier list mismatch");
}

#[rstest]
fn equal_filters_compose_identical_queries() {
    let build = || {
        let raw = RawFacets {
            language: Some("Rust".to_owned()),
            popularity: Some("HIGH".to_owned()),
            keyword: Some("docker".to_owned()),
            free_text: Some("  tokio  ".to_owned()),
        };
        let state = FilterState::validate(&raw).expect("selection should validate");
        SearchQuery::for_repositories(&state)
    };

    assert_eq!(build(), build(), "determinism: equal filters, equal queries");
}

#[rstest]
fn free_text_never_contributes_a_qualifier() {
    let mut with_text = filter(Language::Rust, Some(PopularityTier::High), None);
    with_text.free_text = "async runtime".to_owned();
    let without_text = filter(Language::Rust, Some(PopularityTier::High), None);

    assert_eq!(
        SearchQuery::for_repositories(&with_text),
        SearchQuery::for_repositories(&without_text),
        "free text must not alter the composed query"
    );
}

#[rstest]
fn issue_query_prefix_leads_and_language_follows() {
    let query = SearchQuery::for_good_first_issues(Some("rust"));
    assert_eq!(
        query.qualifier_string(),
        "label:\"good first issue\" state:open language:rust",
        "issue qualifier string mismatch"
    );
    assert_eq!(query.sort(), SearchSort::Created, "issue sort mismatch");
    assert_eq!(query.per_page(), None, "issue search carries no page cap");
}

#[rstest]
#[case::absent(None)]
#[case::blank(Some("   "))]
fn issue_query_without_language_is_prefix_only(#[case] language: Option<&str>) {
    let query = SearchQuery::for_good_first_issues(language);
    assert_eq!(
        query.qualifier_string(),
        "label:\"good first issue\" state:open",
        "prefix-only qualifier string mismatch"
    );
}

#[rstest]
fn issue_query_language_token_passes_through_unvalidated() {
    let query = SearchQuery::for_good_first_issues(Some("haskell"));
    assert_eq!(
        query.qualifier_string(),
        "label:\"good first issue\" state:open language:haskell",
        "issue flow accepts any language token"
    );
}
