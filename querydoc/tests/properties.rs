use proptest::prelude::*;
use querydoc::prelude::*;
use querydoc::sort::SortField;
use serde_json::{Value, json};

// One builder call with generated arguments
#[derive(Debug, Clone)]
enum Mutation {
    Match(String, String),
    Terms(String, Vec<String>),
    NotMatch(String, String),
    ShouldMatch(String, String),
    Filter(Occur, String, String),
    FieldExists(Vec<String>),
    Range(String, i64),
    QueryString(Vec<String>, String),
    GeoLocation(String, f64, f64),
    GeoCircle(String, f64, f64, u32),
    MoreLikeThis(String, String),
    Sort(String),
    SearchAfter(String),
    From(u64),
    Size(u64),
    MatchAll,
}

impl Mutation {
    fn apply(&self, builder: &mut QueryDocumentBuilder) {
        match self {
            Mutation::Match(field, value) => {
                builder.add_match(field.as_str(), value.as_str(), None);
            },
            Mutation::Terms(field, values) => {
                builder.add_terms(field.as_str(), values.clone());
            },
            Mutation::NotMatch(field, value) => {
                builder.add_not_match(field.as_str(), value.as_str(), None);
            },
            Mutation::ShouldMatch(field, value) => {
                builder.add_should_match(field.as_str(), value.as_str(), None);
            },
            Mutation::Filter(occur, field, value) => {
                builder.add_filter(*occur, field.as_str(), value.as_str(), None);
            },
            Mutation::FieldExists(fields) => {
                builder.add_field_exists(fields.clone());
            },
            Mutation::Range(field, gte) => {
                builder.add_range(field.as_str(), json!({ "gte": gte }));
            },
            Mutation::QueryString(fields, query) => {
                builder.add_query_string(fields.clone(), query.as_str(), None);
            },
            Mutation::GeoLocation(field, lat, lon) => {
                builder.add_geo_location(field.as_str(), *lat, *lon);
            },
            Mutation::GeoCircle(field, lat, lon, radius) => {
                builder.add_geo_circle(field.as_str(), *lat, *lon, *radius, None);
            },
            Mutation::MoreLikeThis(field, id) => {
                builder.set_more_like_this(field.as_str(), id.as_str(), None);
            },
            Mutation::Sort(uri) => {
                builder.set_sort_from_uris(uri.as_str());
            },
            Mutation::SearchAfter(cursor) => {
                builder.set_search_after(cursor.as_str());
            },
            Mutation::From(from) => {
                builder.set_from(*from);
            },
            Mutation::Size(size) => {
                builder.set_size(*size);
            },
            Mutation::MatchAll => {
                builder.set_match_all(json!({}));
            },
        }
    }
}

fn name_strategy() -> impl Strategy<Value = String> {
    "[a-z_]{0,8}"
}

fn occur_strategy() -> impl Strategy<Value = Occur> {
    prop_oneof![Just(Occur::Must), Just(Occur::MustNot), Just(Occur::Should)]
}

fn mutation_strategy() -> impl Strategy<Value = Mutation> {
    prop_oneof![
        (name_strategy(), name_strategy()).prop_map(|(f, v)| Mutation::Match(f, v)),
        (name_strategy(), prop::collection::vec(name_strategy(), 0..4)).prop_map(|(f, v)| Mutation::Terms(f, v)),
        (name_strategy(), name_strategy()).prop_map(|(f, v)| Mutation::NotMatch(f, v)),
        (name_strategy(), name_strategy()).prop_map(|(f, v)| Mutation::ShouldMatch(f, v)),
        (occur_strategy(), name_strategy(), name_strategy()).prop_map(|(o, f, v)| Mutation::Filter(o, f, v)),
        prop::collection::vec(name_strategy(), 0..4).prop_map(Mutation::FieldExists),
        (name_strategy(), any::<i64>()).prop_map(|(f, v)| Mutation::Range(f, v)),
        (prop::collection::vec(name_strategy(), 1..4), name_strategy()).prop_map(|(f, q)| Mutation::QueryString(f, q)),
        (name_strategy(), -90.0..90.0f64, -180.0..180.0f64).prop_map(|(f, lat, lon)| Mutation::GeoLocation(f, lat, lon)),
        (name_strategy(), -90.0..90.0f64, -180.0..180.0f64, 1..1000u32)
            .prop_map(|(f, lat, lon, r)| Mutation::GeoCircle(f, lat, lon, r)),
        (name_strategy(), name_strategy()).prop_map(|(f, id)| Mutation::MoreLikeThis(f, id)),
        "[a-z_:]{0,12}".prop_map(Mutation::Sort),
        name_strategy().prop_map(Mutation::SearchAfter),
        any::<u64>().prop_map(Mutation::From),
        any::<u64>().prop_map(Mutation::Size),
        Just(Mutation::MatchAll),
    ]
}

// A generated `field[:order[:mode]]` URI with the parts it was built from
fn sort_uri_strategy() -> impl Strategy<Value = (String, String, Option<String>)> {
    let order = prop_oneof![Just("asc"), Just("desc"), Just(""), Just("sideways")];
    let mode = prop::option::of(prop_oneof![Just("min"), Just("max"), Just("sum"), Just("avg"), Just("median")]);

    ("[a-z_]{0,6}", order, mode).prop_map(|(field, order, mode)| {
        (field, order.to_string(), mode.map(str::to_string))
    })
}

fn render_uri(field: &str, order: &str, mode: Option<&str>) -> String {
    match mode {
        Some(mode) => format!("{field}:{order}:{mode}"),
        None if order.is_empty() => field.to_string(),
        None => format!("{field}:{order}"),
    }
}

proptest! {
    #[test]
    fn finalize_is_idempotent(mutations in prop::collection::vec(mutation_strategy(), 0..16)) {
        let mut builder = QueryDocumentBuilder::new();
        for mutation in &mutations {
            mutation.apply(&mut builder);
        }

        let first = builder.finalize().to_json().unwrap();
        let second = builder.finalize().to_json().unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn finalized_query_always_has_a_root(mutations in prop::collection::vec(mutation_strategy(), 0..16)) {
        let mut builder = QueryDocumentBuilder::new();
        for mutation in &mutations {
            mutation.apply(&mut builder);
        }

        let document = builder.finalize().to_json().unwrap();
        let query = document["query"].as_object().unwrap();
        prop_assert_eq!(query.len(), 1);

        let root = query.keys().next().unwrap().as_str();
        prop_assert!(["bool", "match_all", "more_like_this"].contains(&root));

        if mutations.iter().any(|m| matches!(m, Mutation::MatchAll)) {
            prop_assert_eq!(root, "match_all");
        }
    }

    #[test]
    fn sort_uris_keep_order_and_valid_values(uris in prop::collection::vec(sort_uri_strategy(), 1..6)) {
        let rendered: Vec<String> = uris
            .iter()
            .map(|(field, order, mode)| render_uri(field, order, mode.as_deref()))
            .collect();

        let mut builder = QueryDocumentBuilder::new();
        builder.set_sort_from_uris(rendered);

        let Some(Sort::Fields(sorts)) = builder.finalize().sort else {
            panic!("expected a list of sort fields");
        };

        let expected: Vec<&(String, String, Option<String>)> =
            uris.iter().filter(|(field, _, _)| !field.is_empty()).collect();
        prop_assert_eq!(sorts.len(), expected.len());

        for (sort, (field, order, mode)) in sorts.iter().zip(expected) {
            let options = single(sort, field);
            let expected_order = if order == "asc" { SortOrder::Asc } else { SortOrder::Desc };
            prop_assert_eq!(options.order, expected_order);

            let expected_mode = mode.as_deref().and_then(|mode| mode.parse::<SortMode>().ok());
            prop_assert_eq!(options.mode, expected_mode);
        }
    }

    #[test]
    fn should_match_clauses_accumulate(values in prop::collection::vec(name_strategy(), 1..8)) {
        let mut builder = QueryDocumentBuilder::new();
        for value in &values {
            builder.add_should_match("field", value.as_str(), None);
        }

        let document = builder.finalize().to_json().unwrap();
        let should = document["query"]["bool"]["should"].as_array().cloned().unwrap_or_default();
        prop_assert_eq!(should.len(), values.len());

        for (clause, value) in should.iter().zip(&values) {
            prop_assert_eq!(&clause["match"]["field"]["query"], &Value::from(value.as_str()));
        }
    }
}

fn single<'a>(sort: &'a SortField, field: &str) -> &'a querydoc::sort::SortOptions {
    assert_eq!(sort.len(), 1);
    sort.get(field).unwrap()
}
