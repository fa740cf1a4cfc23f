use search_state_model::WidgetPath;

/// Splits `namespace.attribute` on the first dot. Total over all strings.
pub fn split_widget_id(id: &str) -> WidgetPath {
    WidgetPath::parse(id)
}
