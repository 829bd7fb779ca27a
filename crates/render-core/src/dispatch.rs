//! Runs a renderer's stages against a formatter.

use crate::error::RenderError;
use crate::formatter::{Formatter, RenderOutput};
use crate::options::OptionsContext;
use crate::registry::FormatterFactory;
use crate::spec::RendererSpec;
use folio_types::FormatId;
use serde_json::Value;

/// Renders `spec` in `format`.
///
/// The options context is seeded from `option_values`, then handed to `customize`
/// (if any) before required options are validated, so the callback may supply
/// them. Validation happens before the formatter is created: a render that is
/// going to fail on options never touches a formatter.
///
/// Stages run prepare, build, finalize, each group in declaration order. A stage
/// the formatter does not implement is skipped. The first failing handler aborts
/// the render.
///
/// # Errors
///
/// - `RenderError::MissingRequiredOption` for the first unset required option.
/// - `RenderError::NoFormatterRegistered` if `factory` has nothing for the pair.
/// - `RenderError::StageExecutionFailure` if a stage handler fails.
/// - `RenderError::OutputFailure` if the formatter cannot produce its output.
pub fn render<F, I, K, V>(
    spec: &RendererSpec,
    factory: &F,
    format: impl Into<FormatId>,
    option_values: I,
    customize: Option<&dyn Fn(&mut OptionsContext)>,
) -> Result<RenderOutput, RenderError>
where
    F: FormatterFactory + ?Sized,
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<Value>,
{
    let mut options = OptionsContext::for_spec(spec).with_values(option_values);
    if let Some(customize) = customize {
        customize(&mut options);
    }
    render_with_options(spec, factory, format.into(), options)
}

/// The part of [`render`] that runs once the options context is final.
pub fn render_with_options<F>(
    spec: &RendererSpec,
    factory: &F,
    format: FormatId,
    options: OptionsContext,
) -> Result<RenderOutput, RenderError>
where
    F: FormatterFactory + ?Sized,
{
    spec.validate(&options)?;

    let mut formatter =
        factory
            .create(spec.id(), &format)
            .ok_or_else(|| RenderError::NoFormatterRegistered {
                renderer: spec.id().to_string(),
                format: format.to_string(),
            })?;

    log::info!("Rendering '{}' as '{}'", spec.id(), format);
    execute(spec, formatter.as_mut(), &options)
}

/// Runs every stage of `spec` against an already constructed formatter and
/// returns its output. Options are not validated here.
pub fn execute(
    spec: &RendererSpec,
    formatter: &mut dyn Formatter,
    options: &OptionsContext,
) -> Result<RenderOutput, RenderError> {
    for stage in spec.execution_plan() {
        let name = stage.name().as_str();
        if !formatter.has_handler(stage.kind(), name) {
            log::debug!("Skipping {}: not implemented by formatter", stage.handler_name());
            continue;
        }

        log::debug!("Running {}", stage.handler_name());
        formatter
            .invoke_handler(stage.kind(), name, options)
            .map_err(|source| RenderError::StageExecutionFailure {
                stage: name.to_string(),
                handler: stage.handler_name(),
                source,
            })?;
    }

    formatter.output().map_err(RenderError::OutputFailure)
}

/// Builder form of [`render`].
///
/// ```ignore
/// let pdf = RenderRequest::new(&DOCUMENT, "pdf")
///     .option("author", "Ralph Waldo Emerson")
///     .customize(|o| o.set("text", QUOTE))
///     .render(&registry)?;
/// ```
pub struct RenderRequest<'a> {
    spec: &'a RendererSpec,
    format: FormatId,
    options: OptionsContext,
    customizers: Vec<Box<dyn FnOnce(&mut OptionsContext) + 'a>>,
}

impl<'a> RenderRequest<'a> {
    pub fn new(spec: &'a RendererSpec, format: impl Into<FormatId>) -> Self {
        Self {
            spec,
            format: format.into(),
            options: OptionsContext::for_spec(spec),
            customizers: Vec::new(),
        }
    }

    pub fn option(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.set(name, value);
        self
    }

    pub fn options<I, K, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.options = self.options.with_values(values);
        self
    }

    /// Adds a callback that may adjust the options after they are seeded and
    /// before validation. Callbacks run in the order they were added.
    pub fn customize(mut self, customize: impl FnOnce(&mut OptionsContext) + 'a) -> Self {
        self.customizers.push(Box::new(customize));
        self
    }

    pub fn render<F>(self, factory: &F) -> Result<RenderOutput, RenderError>
    where
        F: FormatterFactory + ?Sized,
    {
        let mut options = self.options;
        for customize in self.customizers {
            customize(&mut options);
        }
        render_with_options(self.spec, factory, self.format, options)
    }
}
