//! Property tests for the refinement algebra.

use proptest::prelude::*;
use proptest::sample::select;
use serde_json::{Map, Value};

use search_state_core::{
    Context, IndexId, Refinement, SearchState, WidgetPath, WidgetProps, clean_up_value,
    get_current_refinement_value, refine_value,
};

const PLAIN_KEYS: [&str; 4] = ["q", "r", "s", "page"];
const NAMESPACES: [&str; 2] = ["range", "menu"];
const ATTRIBUTES: [&str; 2] = ["price", "brand"];
const INDEX_IDS: [&str; 2] = ["A", "B"];

fn index(id: &str) -> IndexId {
    IndexId::new(id).unwrap()
}

fn leaf_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,4}".prop_map(Value::from),
        any::<bool>().prop_map(Value::from),
        Just(Value::Null),
    ]
}

fn key(keys: &'static [&'static str]) -> impl Strategy<Value = String> {
    select(keys).prop_map(str::to_string)
}

fn partition() -> impl Strategy<Value = Map<String, Value>> {
    (
        prop::collection::btree_map(key(&PLAIN_KEYS), leaf_value(), 0..4),
        prop::collection::btree_map(
            key(&NAMESPACES),
            prop::collection::btree_map(key(&ATTRIBUTES), leaf_value(), 0..3),
            0..3,
        ),
    )
        .prop_map(|(plain, namespaces)| {
            let mut map: Map<String, Value> = plain.into_iter().collect();
            for (namespace, inner) in namespaces {
                map.insert(namespace, Value::Object(inner.into_iter().collect()));
            }
            map
        })
}

fn search_state() -> impl Strategy<Value = SearchState> {
    (
        partition(),
        prop::option::of(prop::collection::btree_map(key(&INDEX_IDS), partition(), 0..3)),
    )
        .prop_map(|(mut root, indices)| {
            if let Some(indices) = indices {
                let indices = indices
                    .into_iter()
                    .map(|(id, partition)| (id, Value::Object(partition)))
                    .collect();
                root.insert("indices".to_string(), Value::Object(indices));
            }
            SearchState::from_value(Value::Object(root)).unwrap()
        })
}

fn flat_state_without_namespaces() -> impl Strategy<Value = SearchState> {
    prop::collection::btree_map(key(&PLAIN_KEYS), leaf_value(), 0..4).prop_map(|plain| {
        SearchState::from_value(Value::Object(plain.into_iter().collect())).unwrap()
    })
}

fn context() -> impl Strategy<Value = Context> {
    prop_oneof![
        Just(Context::single(index("main"))),
        Just(Context::multi(index("A")).with_main_index(index("main"))),
        Just(Context::multi(index("B")).with_main_index(index("main"))),
    ]
}

/// Ids that never collide with a namespace name or the page key.
fn widget_id() -> impl Strategy<Value = String> {
    prop_oneof![
        key(&["q", "r", "s"]),
        (key(&NAMESPACES), key(&ATTRIBUTES)).prop_map(|(ns, attr)| format!("{ns}.{attr}")),
    ]
}

fn read(state: &SearchState, context: &Context, id: &str) -> Value {
    get_current_refinement_value(&WidgetProps::default(), state, context, id, Value::from("<unset>"))
        .unwrap()
}

proptest! {
    #[test]
    fn cleanup_is_idempotent(
        state in search_state(),
        context in context(),
        id in widget_id(),
    ) {
        let once = clean_up_value(&state, &context, &id).unwrap();
        let twice = clean_up_value(&once, &context, &id).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn cleanup_removes_the_widget_value(
        state in search_state(),
        context in context(),
        id in widget_id(),
    ) {
        let cleaned = clean_up_value(&state, &context, &id).unwrap();
        prop_assert_eq!(read(&cleaned, &context, &id), Value::from("<unset>"));
    }

    #[test]
    fn write_then_read_round_trips(
        state in flat_state_without_namespaces(),
        id in key(&PLAIN_KEYS),
        value in leaf_value(),
    ) {
        let context = Context::single(index("main"));
        let refinement = Refinement::new().with(id.clone(), value.clone());
        let next = refine_value(&state, &refinement, &context, false, None).unwrap();
        prop_assert_eq!(read(&next, &context, &id), value);
    }

    #[test]
    fn writes_leave_sibling_widgets_alone(
        state in search_state(),
        write_context in context(),
        read_context in context(),
        written in widget_id(),
        other in widget_id(),
        value in leaf_value(),
    ) {
        prop_assume!(written != other || write_context != read_context);
        let path = WidgetPath::parse(&written);
        let refinement = Refinement::new().with(path.key(), value);
        let before = read(&state, &read_context, &other);
        let next = refine_value(&state, &refinement, &write_context, false, path.namespace())
            .unwrap();
        prop_assert_eq!(read(&next, &read_context, &other), before);
    }

    #[test]
    fn writes_never_mutate_the_input(
        state in search_state(),
        context in context(),
        id in widget_id(),
        value in leaf_value(),
        reset_page in any::<bool>(),
    ) {
        let snapshot = state.to_value();
        let path = WidgetPath::parse(&id);
        let refinement = Refinement::new().with(path.key(), value);
        let _next = refine_value(&state, &refinement, &context, reset_page, path.namespace())
            .unwrap();
        prop_assert_eq!(state.to_value(), snapshot);
    }
}
