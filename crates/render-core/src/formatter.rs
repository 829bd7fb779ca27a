use crate::error::FormatterError;
use crate::options::OptionsContext;
use crate::spec::StageKind;
use folio_types::StageName;
use std::collections::HashMap;
use std::fmt;

/// The artifact a formatter produces once all stages have run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutput {
    Bytes(Vec<u8>),
    Text(String),
}

impl RenderOutput {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            RenderOutput::Bytes(b) => b,
            RenderOutput::Text(s) => s.as_bytes(),
        }
    }

    pub fn into_bytes(self) -> Vec<u8> {
        match self {
            RenderOutput::Bytes(b) => b,
            RenderOutput::Text(s) => s.into_bytes(),
        }
    }

    /// The text output, or `None` for binary output.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            RenderOutput::Text(s) => Some(s),
            RenderOutput::Bytes(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    pub fn is_empty(&self) -> bool {
        self.as_bytes().is_empty()
    }
}

impl From<Vec<u8>> for RenderOutput {
    fn from(bytes: Vec<u8>) -> Self {
        RenderOutput::Bytes(bytes)
    }
}

impl From<String> for RenderOutput {
    fn from(text: String) -> Self {
        RenderOutput::Text(text)
    }
}

/// A backend that implements some or all of a renderer's stages.
///
/// The dispatcher checks each stage with the `has_*` methods and only invokes
/// the handlers a formatter reports; stages it does not implement are skipped without
/// error. Prepare handlers are optional and absent by default.
///
/// Most formatters keep their handlers in a [`StageHandlers`] table and delegate
/// to it, or wrap themselves in a [`HandlerFormatter`].
pub trait Formatter {
    fn has_stage_handler(&self, stage: &str) -> bool;

    fn invoke_stage_handler(
        &mut self,
        stage: &str,
        options: &OptionsContext,
    ) -> Result<(), FormatterError>;

    fn has_finalize_handler(&self, stage: &str) -> bool;

    fn invoke_finalize_handler(
        &mut self,
        stage: &str,
        options: &OptionsContext,
    ) -> Result<(), FormatterError>;

    fn has_prepare_handler(&self, _stage: &str) -> bool {
        false
    }

    fn invoke_prepare_handler(
        &mut self,
        stage: &str,
        _options: &OptionsContext,
    ) -> Result<(), FormatterError> {
        Err(FormatterError::Other(format!(
            "no handler {}",
            StageKind::Prepare.handler_name(stage)
        )))
    }

    /// Returns the accumulated artifact.
    fn output(&mut self) -> Result<RenderOutput, FormatterError>;

    fn has_handler(&self, kind: StageKind, stage: &str) -> bool {
        match kind {
            StageKind::Prepare => self.has_prepare_handler(stage),
            StageKind::Build => self.has_stage_handler(stage),
            StageKind::Finalize => self.has_finalize_handler(stage),
        }
    }

    fn invoke_handler(
        &mut self,
        kind: StageKind,
        stage: &str,
        options: &OptionsContext,
    ) -> Result<(), FormatterError> {
        match kind {
            StageKind::Prepare => self.invoke_prepare_handler(stage, options),
            StageKind::Build => self.invoke_stage_handler(stage, options),
            StageKind::Finalize => self.invoke_finalize_handler(stage, options),
        }
    }
}

pub type StageHandler<F> = fn(&mut F, &OptionsContext) -> Result<(), FormatterError>;
pub type OutputHandler<F> = fn(&mut F) -> Result<RenderOutput, FormatterError>;

/// A lookup table from stage name to the formatter method handling it.
///
/// This replaces finding `build_<stage>` by name at runtime: a formatter lists
/// its handlers once, usually in a `Lazy` static, and the table answers the
/// `has_*` queries.
pub struct StageHandlers<F> {
    handlers: HashMap<StageKind, HashMap<StageName, StageHandler<F>>>,
    output: Option<OutputHandler<F>>,
}

impl<F> StageHandlers<F> {
    pub fn new() -> Self {
        Self {
            handlers: HashMap::new(),
            output: None,
        }
    }

    pub fn on_prepare(self, stage: impl Into<StageName>, handler: StageHandler<F>) -> Self {
        self.on(StageKind::Prepare, stage, handler)
    }

    pub fn on_build(self, stage: impl Into<StageName>, handler: StageHandler<F>) -> Self {
        self.on(StageKind::Build, stage, handler)
    }

    pub fn on_finalize(self, stage: impl Into<StageName>, handler: StageHandler<F>) -> Self {
        self.on(StageKind::Finalize, stage, handler)
    }

    pub fn on(
        mut self,
        kind: StageKind,
        stage: impl Into<StageName>,
        handler: StageHandler<F>,
    ) -> Self {
        self.handlers
            .entry(kind)
            .or_default()
            .insert(stage.into(), handler);
        self
    }

    /// Sets the operation that retrieves the formatter's output.
    pub fn with_output(mut self, output: OutputHandler<F>) -> Self {
        self.output = Some(output);
        self
    }

    pub fn contains(&self, kind: StageKind, stage: &str) -> bool {
        self.lookup(kind, stage).is_some()
    }

    pub fn invoke(
        &self,
        kind: StageKind,
        stage: &str,
        target: &mut F,
        options: &OptionsContext,
    ) -> Result<(), FormatterError> {
        let handler = self.lookup(kind, stage).ok_or_else(|| {
            FormatterError::Other(format!("no handler {}", kind.handler_name(stage)))
        })?;
        handler(target, options)
    }

    pub fn output(&self, target: &mut F) -> Result<RenderOutput, FormatterError> {
        match self.output {
            Some(output) => output(target),
            None => Err(FormatterError::MissingOutput),
        }
    }

    fn lookup(&self, kind: StageKind, stage: &str) -> Option<StageHandler<F>> {
        self.handlers.get(&kind)?.get(stage).copied()
    }
}

impl<F> Default for StageHandlers<F> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F> fmt::Debug for StageHandlers<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<String> = self
            .handlers
            .iter()
            .flat_map(|(kind, stages)| stages.keys().map(move |s| kind.handler_name(s.as_str())))
            .collect();
        names.sort();
        f.debug_struct("StageHandlers")
            .field("handlers", &names)
            .field("has_output", &self.output.is_some())
            .finish()
    }
}

/// Adapts any value with a static [`StageHandlers`] table into a [`Formatter`].
pub struct HandlerFormatter<F: 'static> {
    target: F,
    handlers: &'static StageHandlers<F>,
}

impl<F: 'static> HandlerFormatter<F> {
    pub fn new(target: F, handlers: &'static StageHandlers<F>) -> Self {
        Self { target, handlers }
    }

    pub fn target(&self) -> &F {
        &self.target
    }

    pub fn into_inner(self) -> F {
        self.target
    }
}

impl<F: 'static> Formatter for HandlerFormatter<F> {
    fn has_stage_handler(&self, stage: &str) -> bool {
        self.handlers.contains(StageKind::Build, stage)
    }

    fn invoke_stage_handler(
        &mut self,
        stage: &str,
        options: &OptionsContext,
    ) -> Result<(), FormatterError> {
        self.handlers
            .invoke(StageKind::Build, stage, &mut self.target, options)
    }

    fn has_finalize_handler(&self, stage: &str) -> bool {
        self.handlers.contains(StageKind::Finalize, stage)
    }

    fn invoke_finalize_handler(
        &mut self,
        stage: &str,
        options: &OptionsContext,
    ) -> Result<(), FormatterError> {
        self.handlers
            .invoke(StageKind::Finalize, stage, &mut self.target, options)
    }

    fn has_prepare_handler(&self, stage: &str) -> bool {
        self.handlers.contains(StageKind::Prepare, stage)
    }

    fn invoke_prepare_handler(
        &mut self,
        stage: &str,
        options: &OptionsContext,
    ) -> Result<(), FormatterError> {
        self.handlers
            .invoke(StageKind::Prepare, stage, &mut self.target, options)
    }

    fn output(&mut self) -> Result<RenderOutput, FormatterError> {
        self.handlers.output(&mut self.target)
    }
}
