use anyhow::{Context as _, Result};
use serde_json::Value;
use tracing::{info, info_span};

use search_state_cli::input::{build_context, load_state, parse_refinement, parse_value};
use search_state_core::{
    clean_up_value, get_current_refinement_value, refine_value, widget_entries,
};
use search_state_model::{Context, SearchState, WidgetProps};

use crate::cli::{CleanArgs, GetArgs, InspectArgs, RefineArgs, ScopeArgs};
use crate::summary::print_entries;

fn load_scope(scope: &ScopeArgs) -> Result<(SearchState, Context)> {
    let state = load_state(&scope.state)?;
    let context = build_context(
        scope.context.as_deref(),
        scope.index.as_deref(),
        scope.main_index.as_deref(),
    )?;
    Ok((state, context))
}

fn print_json(value: &impl serde::Serialize) -> Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("render json")?;
    println!("{rendered}");
    Ok(())
}

pub fn run_get(args: &GetArgs) -> Result<()> {
    let span = info_span!("get", id = %args.id);
    let _guard = span.enter();
    let (state, context) = load_scope(&args.scope)?;
    let props = WidgetProps {
        default_refinement: args.default_refinement.as_deref().map(parse_value),
    };
    let value: Value = get_current_refinement_value(
        &props,
        &state,
        &context,
        &args.id,
        parse_value(&args.default_value),
    )
    .with_context(|| format!("read widget {}", args.id))?;
    info!("read widget value");
    print_json(&value)
}

pub fn run_refine(args: &RefineArgs) -> Result<()> {
    let span = info_span!("refine", namespace = args.namespace.as_deref().unwrap_or(""));
    let _guard = span.enter();
    let (state, context) = load_scope(&args.scope)?;
    let refinement = parse_refinement(&args.set)?;
    let next = refine_value(
        &state,
        &refinement,
        &context,
        args.reset_page,
        args.namespace.as_deref(),
    )
    .context("apply refinement")?;
    info!(
        keys = refinement.len(),
        reset_page = args.reset_page,
        "refinement applied"
    );
    print_json(&next)
}

pub fn run_clean(args: &CleanArgs) -> Result<()> {
    let span = info_span!("clean", id = %args.id);
    let _guard = span.enter();
    let (state, context) = load_scope(&args.scope)?;
    let next = clean_up_value(&state, &context, &args.id)
        .with_context(|| format!("clean up widget {}", args.id))?;
    info!(changed = next != state, "widget cleaned up");
    print_json(&next)
}

pub fn run_inspect(args: &InspectArgs) -> Result<()> {
    let state = load_state(&args.state)?;
    let entries = widget_entries(&state);
    info!(entries = entries.len(), "state inspected");
    print_entries(&entries);
    Ok(())
}
