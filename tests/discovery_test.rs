//! Projection of plain and faceted search pages into paged resources

use scholars_middleware::discovery::*;
use serde_json::json;

fn results(count: usize) -> Vec<String> {
    (0..count).map(|i| format!("per-{}", i)).collect()
}

fn facet_result_page(field: &str, values: &[(&str, u64)], pageable: Pageable) -> FacetResultPage {
    let content = values
        .iter()
        .map(|(value, count)| FacetFieldEntry::new(field, *value, *count))
        .collect::<Vec<_>>();
    let total = content.len() as u64;
    FacetResultPage::new(content, pageable, total)
}

fn links() -> PageLinkBuilder {
    PageLinkBuilder::new(
        "http://localhost:9000/persons/search/faceted",
        vec![("query", "biology"), ("facets", "subjectArea,organization,keyword")],
    )
}

#[test]
fn test_facet_order_and_entries_preserved() {
    let page = Page::new(results(2), Pageable::new(0, 2), 2);
    let faceted = FacetPage::new(
        page,
        vec![
            facet_result_page("subjectArea", &[("Chemistry", 1), ("Biology", 7), ("Art", 7)], Pageable::new(0, 10)),
            facet_result_page("organization", &[("Library", 3)], Pageable::new(0, 10)),
            facet_result_page("keyword", &[("cells", 2), ("dna", 2)], Pageable::new(0, 10)),
        ],
    );

    let resource = FacetPagedResourcesAssembler::new().to_resource(SearchPage::Faceted(faceted), &links());
    let facets = resource.facets.unwrap();

    let fields: Vec<&str> = facets.iter().map(|f| f.field.as_str()).collect();
    assert_eq!(fields, vec!["subjectArea", "organization", "keyword"]);

    // No re-sorting of entries
    assert_eq!(
        facets[0].entries,
        vec![Entry::new("Chemistry", 1), Entry::new("Biology", 7), Entry::new("Art", 7)]
    );
}

#[test]
fn test_empty_facet_result_page_omitted() {
    let page = Page::new(results(1), Pageable::new(0, 20), 1);
    let faceted = FacetPage::new(
        page,
        vec![
            facet_result_page("subjectArea", &[("Biology", 1)], Pageable::new(0, 10)),
            facet_result_page("positionType", &[], Pageable::new(0, 10)),
            facet_result_page("keyword", &[("dna", 1)], Pageable::new(0, 10)),
        ],
    );

    let resource = FacetPagedResourcesAssembler::new().to_resource(SearchPage::Faceted(faceted), &links());
    let facets = resource.facets.unwrap();

    assert_eq!(facets.len(), 2);
    assert!(facets.iter().all(|f| f.field != "positionType"));
}

#[test]
fn test_faceted_page_without_values_has_empty_facets() {
    let faceted = FacetPage::new(
        Page::new(Vec::<String>::new(), Pageable::new(0, 20), 0),
        vec![facet_result_page("subjectArea", &[], Pageable::new(0, 10))],
    );

    let resource = FacetPagedResourcesAssembler::new().to_resource(SearchPage::Faceted(faceted), &links());
    let json = serde_json::to_value(&resource).unwrap();

    assert_eq!(json["facets"], json!([]));
}

#[test]
fn test_plain_page_matches_base_transform() {
    let page = Page::new(results(5), Pageable::new(1, 5), 23);

    let base = PagedResourcesAssembler::new().to_resource(page.clone(), &links());
    let projected = FacetPagedResourcesAssembler::new().to_resource(SearchPage::Plain(page), &links());

    assert_eq!(projected, base);
    assert!(projected.facets.is_none());

    let json = serde_json::to_value(&projected).unwrap();
    assert!(json.get("facets").is_none());
}

#[test]
fn test_links_identical_with_and_without_facets() {
    let page = Page::new(results(5), Pageable::new(1, 5), 23);

    let plain = FacetPagedResourcesAssembler::new().to_resource(SearchPage::Plain(page.clone()), &links());
    let faceted = FacetPagedResourcesAssembler::new().to_resource(
        SearchPage::Faceted(FacetPage::new(
            page,
            vec![facet_result_page("organization", &[("Library", 9)], Pageable::new(0, 10))],
        )),
        &links(),
    );

    assert_eq!(plain.links, faceted.links);
    assert_eq!(plain.page, faceted.page);
    assert_eq!(plain.content, faceted.content);
}

#[test]
fn test_facet_cursor_copied_verbatim() {
    let outer = Pageable::new(0, 20);
    let facet_cursor = Pageable::new(3, 4);

    let faceted = FacetPage::new(
        Page::new(results(20), outer, 100),
        vec![facet_result_page("keyword", &[("dna", 12), ("rna", 11)], facet_cursor)],
    );

    let resource = FacetPagedResourcesAssembler::new().to_resource(SearchPage::Faceted(faceted), &links());
    let facets = resource.facets.unwrap();

    assert_eq!(facets[0].page, facet_cursor);
    assert_ne!(facets[0].page, outer);
}

#[test]
fn test_response_shape() {
    let faceted = FacetPage::new(
        Page::new(results(2), Pageable::new(0, 2), 3),
        vec![facet_result_page("subjectArea", &[("Biology", 42)], Pageable::new(0, 10))],
    );

    let resource = FacetPagedResourcesAssembler::new().to_resource(SearchPage::Faceted(faceted), &links());
    let json = serde_json::to_value(&resource).unwrap();

    assert_eq!(
        json["page"],
        json!({"number": 0, "size": 2, "totalElements": 3, "totalPages": 2})
    );
    assert_eq!(
        json["facets"][0],
        json!({
            "field": "subjectArea",
            "entries": [{"value": "Biology", "count": 42}],
            "page": {"number": 0, "size": 10}
        })
    );

    let rels: Vec<&str> = resource.links.iter().map(|l| l.rel.as_str()).collect();
    assert!(rels.contains(&REL_SELF));
    assert!(rels.contains(&REL_NEXT));
    assert!(!rels.contains(&REL_PREV));
    assert_eq!(
        resource.link(REL_NEXT).unwrap().href,
        "http://localhost:9000/persons/search/faceted?query=biology&facets=subjectArea%2Corganization%2Ckeyword&page=1&size=2"
    );
}

#[test]
fn test_parsed_request_round_trips_into_links() {
    let params = vec![
        ("query".to_string(), "cell biology".to_string()),
        ("facets".to_string(), "subjectArea".to_string()),
        ("subjectArea.limit".to_string(), "5".to_string()),
        ("page".to_string(), "2".to_string()),
        ("size".to_string(), "10".to_string()),
    ];

    let request = DiscoveryRequest::parse(&params, &RequestLimits::default()).unwrap();
    assert_eq!(request.pageable, Pageable::new(2, 10));
    assert_eq!(request.facets[0].limit, 5);

    let builder = PageLinkBuilder::new("/persons/search/faceted", params);
    assert_eq!(
        builder.href(request.pageable.next()),
        "/persons/search/faceted?query=cell+biology&facets=subjectArea&subjectArea.limit=5&page=3&size=10"
    );
}
