//! Command execution. Each command returns the markup to print.

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use lift_search_form::{
    FixedClock, FormConfig, QueryContext, SearchForm, SearchFormWidget, WidgetSettings,
};
use tracing::debug;

use crate::cli::{Cli, Commands};
use crate::fixture::Fixture;

/// Run the parsed command line.
pub fn run(cli: &Cli) -> Result<String> {
    let config = load_config(cli)?;

    match &cli.command {
        Commands::Form { context } => {
            let (search_form, ctx, _) = prepare(config, context.as_deref(), None)?;
            Ok(search_form.render_form(&ctx))
        }
        Commands::Filters { context } => {
            let (search_form, ctx, _) = prepare(config, context.as_deref(), None)?;
            Ok(search_form.render_filter_panel(&ctx))
        }
        Commands::Loop { context, template } => {
            let template = std::fs::read_to_string(template)
                .with_context(|| format!("failed to read loop template {}", template.display()))?;
            let (search_form, ctx, _) = prepare(config, context.as_deref(), Some(template))?;
            Ok(search_form.render_results_loop(&ctx))
        }
        Commands::Widget { context, title } => {
            let (search_form, ctx, fixture) = prepare(config, context.as_deref(), None)?;
            let settings = WidgetSettings::update(
                WidgetSettings {
                    title: title.clone(),
                },
                WidgetSettings::default(),
            );
            let widget = SearchFormWidget::new(settings);
            Ok(widget.render(&search_form, &ctx, &fixture.widget))
        }
        Commands::Config => {
            serde_yaml_ng::to_string(&config).context("failed to serialize configuration")
        }
    }
}

fn load_config(cli: &Cli) -> Result<FormConfig> {
    let mut config = FormConfig::load(cli.config.as_deref())?;
    if let Some(site_url) = &cli.site_url {
        config.site_url = site_url.clone();
        config.validate()?;
    }
    Ok(config)
}

fn prepare(
    config: FormConfig,
    context: Option<&Path>,
    loop_template: Option<String>,
) -> Result<(SearchForm, Arc<dyn QueryContext>, Fixture)> {
    let fixture = Fixture::load(context)?;
    debug!(
        is_search = fixture.query.is_search,
        content_types = ?fixture.content_types,
        "loaded query fixture"
    );

    let mut builder = SearchForm::builder(fixture.content_types.clone())
        .with_config(config)
        .with_taxonomies(fixture.taxonomies.clone());
    if let Some(now) = fixture.now {
        builder = builder.with_clock(FixedClock(now));
    }
    if let Some(template) = loop_template {
        builder = builder.with_loop_template(template);
    }
    let search_form = builder.build()?;

    let ctx: Arc<dyn QueryContext> = Arc::new(fixture.query.clone());
    Ok((search_form, ctx, fixture))
}
