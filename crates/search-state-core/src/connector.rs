//! Per-widget facade over the reader, writer and cleaner.

use search_state_model::{Context, Refinement, Result, SearchState, WidgetPath, WidgetProps};
use serde_json::Value;

use crate::cleaner::clean_up_value;
use crate::reader::get_current_refinement_value;
use crate::writer::refine_value;

/// A mounted widget: its id, its static props and whether refining it
/// restarts pagination.
#[derive(Debug, Clone)]
pub struct Connector {
    path: WidgetPath,
    props: WidgetProps,
    reset_page: bool,
}

impl Connector {
    pub fn new(id: &str) -> Self {
        Self {
            path: WidgetPath::parse(id),
            props: WidgetProps::default(),
            reset_page: true,
        }
    }

    #[must_use]
    pub fn with_props(mut self, props: WidgetProps) -> Self {
        self.props = props;
        self
    }

    #[must_use]
    pub fn with_default_refinement(mut self, value: Value) -> Self {
        self.props.default_refinement = Some(value);
        self
    }

    #[must_use]
    pub fn with_reset_page(mut self, reset_page: bool) -> Self {
        self.reset_page = reset_page;
        self
    }

    pub fn path(&self) -> &WidgetPath {
        &self.path
    }

    pub fn current_value(
        &self,
        state: &SearchState,
        context: &Context,
        default_value: Value,
    ) -> Result<Value> {
        get_current_refinement_value(&self.props, state, context, self.path.id(), default_value)
    }

    /// Writes `value` under the widget's key, inside its namespace when the id
    /// carries one.
    pub fn refine(&self, state: &SearchState, context: &Context, value: Value) -> Result<SearchState> {
        let refinement = Refinement::new().with(self.path.key(), value);
        refine_value(
            state,
            &refinement,
            context,
            self.reset_page,
            self.path.namespace(),
        )
    }

    pub fn clean_up(&self, state: &SearchState, context: &Context) -> Result<SearchState> {
        clean_up_value(state, context, self.path.id())
    }
}

#[cfg(test)]
mod tests {
    use search_state_model::IndexId;
    use serde_json::json;

    use super::*;

    fn index(id: &str) -> IndexId {
        IndexId::new(id).unwrap()
    }

    #[test]
    fn lifecycle_in_single_index_mode() {
        let context = Context::single(index("main"));
        let rating = Connector::new("range.rating").with_default_refinement(json!("1:5"));

        let state = SearchState::new();
        assert_eq!(rating.current_value(&state, &context, Value::Null).unwrap(), json!("1:5"));

        let state = rating.refine(&state, &context, json!("3:5")).unwrap();
        assert_eq!(state.to_value(), json!({"range": {"rating": "3:5"}, "page": 1}));
        assert_eq!(rating.current_value(&state, &context, Value::Null).unwrap(), json!("3:5"));

        let state = rating.clean_up(&state, &context).unwrap();
        assert_eq!(state.to_value(), json!({"range": {}, "page": 1}));
    }

    #[test]
    fn props_default_applies_until_refined() {
        let context = Context::multi(index("products"));
        let menu = Connector::new("menu.category")
            .with_props(WidgetProps::with_default_refinement(json!("phones")));
        assert_eq!(menu.path().namespace(), Some("menu"));
        assert_eq!(menu.path().key(), "category");

        let state = SearchState::new();
        assert_eq!(menu.current_value(&state, &context, Value::Null).unwrap(), json!("phones"));

        let state = menu.refine(&state, &context, json!("laptops")).unwrap();
        assert_eq!(
            state.to_value(),
            json!({"indices": {"products": {"menu": {"category": "laptops"}, "page": 1}}})
        );
    }

    #[test]
    fn lifecycle_in_multi_index_mode() {
        let context = Context::multi(index("products"));
        let query = Connector::new("query").with_reset_page(false);

        let state = query.refine(&SearchState::new(), &context, json!("phone")).unwrap();
        assert_eq!(state.to_value(), json!({"indices": {"products": {"query": "phone"}}}));

        let state = query.clean_up(&state, &context).unwrap();
        assert_eq!(state.to_value(), json!({"indices": {"products": {}}}));
    }
}
