//! Declarative renderer specifications.
//!
//! A [`RendererSpec`] describes a document type: which options it needs, which
//! ones it merely accepts, and the named stages a formatter may implement to
//! produce it. Specs are assembled once through [`RendererSpecBuilder`] and are
//! immutable afterwards, so a single spec can be shared by any number of
//! concurrent renders.
//!
//! Declaration never fails. Conflicting declarations are resolved on the spot,
//! logged with `log::warn!` and recorded as [`DeclarationWarning`]s; everything
//! else is checked when a render runs.

use crate::error::RenderError;
use crate::options::OptionsContext;
use folio_types::{RendererId, StageName};
use std::fmt;

/// When a stage runs relative to the others.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum StageKind {
    /// Runs before every body stage (`prepare_<name>`).
    Prepare,
    /// A body stage (`build_<name>`).
    Build,
    /// Runs after every body stage (`finalize_<name>`).
    Finalize,
}

impl StageKind {
    pub fn prefix(self) -> &'static str {
        match self {
            StageKind::Prepare => "prepare",
            StageKind::Build => "build",
            StageKind::Finalize => "finalize",
        }
    }

    /// The conventional formatter operation name for a stage of this kind,
    /// e.g. `build_document_body` or `finalize_document`.
    pub fn handler_name(self, stage: &str) -> String {
        format!("{}_{}", self.prefix(), stage)
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prefix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageDescriptor {
    name: StageName,
    kind: StageKind,
}

impl StageDescriptor {
    pub fn new(name: impl Into<StageName>, kind: StageKind) -> Self {
        Self { name: name.into(), kind }
    }

    pub fn name(&self) -> &StageName {
        &self.name
    }

    pub fn kind(&self) -> StageKind {
        self.kind
    }

    pub fn is_finalize(&self) -> bool {
        self.kind == StageKind::Finalize
    }

    pub fn handler_name(&self) -> String {
        self.kind.handler_name(self.name.as_str())
    }
}

/// A non-fatal problem found while declaring a spec.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeclarationWarning {
    /// The option shadows a built-in `OptionsContext` method, so no accessor is generated for it.
    AccessorCollision(String),
    /// `declare_option` was called for a name that is already required; the call was ignored.
    AlreadyRequired(String),
    /// An optional name was later declared required and moved to the required set.
    PromotedToRequired(String),
    /// The same stage was declared twice with the same kind; the repeat was ignored.
    DuplicateStage { kind: StageKind, name: String },
}

impl fmt::Display for DeclarationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeclarationWarning::AccessorCollision(name) => write!(
                f,
                "option '{}' collides with an existing options accessor; no accessor generated",
                name
            ),
            DeclarationWarning::AlreadyRequired(name) => {
                write!(f, "option '{}' is already required; optional declaration ignored", name)
            }
            DeclarationWarning::PromotedToRequired(name) => {
                write!(f, "optional option '{}' promoted to required", name)
            }
            DeclarationWarning::DuplicateStage { kind, name } => {
                write!(f, "{} stage '{}' declared twice; repeat ignored", kind, name)
            }
        }
    }
}

/// The frozen description of a document type.
#[derive(Debug, Clone)]
pub struct RendererSpec {
    id: RendererId,
    required_options: Vec<String>,
    declared_options: Vec<String>,
    suppressed_accessors: Vec<String>,
    stages: Vec<StageDescriptor>,
    warnings: Vec<DeclarationWarning>,
}

impl RendererSpec {
    pub fn builder(id: impl Into<RendererId>) -> RendererSpecBuilder {
        RendererSpecBuilder::new(id)
    }

    pub fn id(&self) -> &RendererId {
        &self.id
    }

    pub fn required_options(&self) -> &[String] {
        &self.required_options
    }

    pub fn declared_options(&self) -> &[String] {
        &self.declared_options
    }

    pub fn is_required(&self, name: &str) -> bool {
        self.required_options.iter().any(|n| n == name)
    }

    pub fn is_declared(&self, name: &str) -> bool {
        self.is_required(name) || self.declared_options.iter().any(|n| n == name)
    }

    /// Whether `OptionsContext::assign` accepts this name.
    pub fn has_accessor(&self, name: &str) -> bool {
        self.is_declared(name) && !self.suppressed_accessors.iter().any(|n| n == name)
    }

    /// Every option name with an accessor, required ones first.
    pub fn accessor_names(&self) -> impl Iterator<Item = &str> {
        self.required_options
            .iter()
            .chain(self.declared_options.iter())
            .map(String::as_str)
            .filter(|name| self.has_accessor(name))
    }

    /// Stages in declaration order, all kinds interleaved as declared.
    pub fn stages(&self) -> &[StageDescriptor] {
        &self.stages
    }

    /// Stages in the order they execute: prepare, then build, then finalize,
    /// each group keeping its declaration order.
    pub fn execution_plan(&self) -> Vec<&StageDescriptor> {
        [StageKind::Prepare, StageKind::Build, StageKind::Finalize]
            .into_iter()
            .flat_map(|kind| self.stages.iter().filter(move |s| s.kind == kind))
            .collect()
    }

    pub fn declaration_warnings(&self) -> &[DeclarationWarning] {
        &self.warnings
    }

    /// Checks that every required option is set, reporting the first missing one
    /// in declaration order.
    pub fn validate(&self, options: &OptionsContext) -> Result<(), RenderError> {
        match self.required_options.iter().find(|name| !options.is_set(name)) {
            Some(missing) => Err(RenderError::MissingRequiredOption(missing.clone())),
            None => Ok(()),
        }
    }
}

/// Collects declarations for a [`RendererSpec`].
///
/// ```ignore
/// let spec = RendererSpec::builder("document")
///     .declare_required_options(["text", "author"])
///     .declare_option("heading")
///     .declare_stage("document_body")
///     .declare_finalize("document")
///     .build();
/// ```
#[derive(Debug)]
pub struct RendererSpecBuilder {
    spec: RendererSpec,
}

impl RendererSpecBuilder {
    pub fn new(id: impl Into<RendererId>) -> Self {
        Self {
            spec: RendererSpec {
                id: id.into(),
                required_options: Vec::new(),
                declared_options: Vec::new(),
                suppressed_accessors: Vec::new(),
                stages: Vec::new(),
                warnings: Vec::new(),
            },
        }
    }

    pub fn declare_required_option(mut self, name: impl Into<String>) -> Self {
        self.add_required(name.into());
        self
    }

    pub fn declare_required_options<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.add_required(name.into());
        }
        self
    }

    pub fn declare_option(mut self, name: impl Into<String>) -> Self {
        self.add_optional(name.into());
        self
    }

    pub fn declare_options<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for name in names {
            self.add_optional(name.into());
        }
        self
    }

    pub fn declare_prepare(mut self, name: impl Into<StageName>) -> Self {
        self.add_stage(name.into(), StageKind::Prepare);
        self
    }

    pub fn declare_stage(mut self, name: impl Into<StageName>) -> Self {
        self.add_stage(name.into(), StageKind::Build);
        self
    }

    pub fn declare_finalize(mut self, name: impl Into<StageName>) -> Self {
        self.add_stage(name.into(), StageKind::Finalize);
        self
    }

    pub fn build(self) -> RendererSpec {
        log::debug!(
            "Built renderer '{}': {} required option(s), {} optional option(s), {} stage(s)",
            self.spec.id,
            self.spec.required_options.len(),
            self.spec.declared_options.len(),
            self.spec.stages.len()
        );
        self.spec
    }

    fn add_required(&mut self, name: String) {
        if self.spec.required_options.contains(&name) {
            return;
        }
        if let Some(pos) = self.spec.declared_options.iter().position(|n| *n == name) {
            self.spec.declared_options.remove(pos);
            self.warn(DeclarationWarning::PromotedToRequired(name.clone()));
        }
        self.check_accessor_collision(&name);
        self.spec.required_options.push(name);
    }

    fn add_optional(&mut self, name: String) {
        if self.spec.declared_options.contains(&name) {
            return;
        }
        if self.spec.required_options.contains(&name) {
            self.warn(DeclarationWarning::AlreadyRequired(name));
            return;
        }
        self.check_accessor_collision(&name);
        self.spec.declared_options.push(name);
    }

    fn add_stage(&mut self, name: StageName, kind: StageKind) {
        let duplicate = self
            .spec
            .stages
            .iter()
            .any(|s| s.kind == kind && s.name == name);
        if duplicate {
            self.warn(DeclarationWarning::DuplicateStage {
                kind,
                name: name.to_string(),
            });
            return;
        }
        self.spec.stages.push(StageDescriptor { name, kind });
    }

    fn check_accessor_collision(&mut self, name: &str) {
        let collides = OptionsContext::RESERVED_ACCESSORS.contains(&name);
        let already_suppressed = self.spec.suppressed_accessors.iter().any(|n| n == name);
        if collides && !already_suppressed {
            self.spec.suppressed_accessors.push(name.to_string());
            self.warn(DeclarationWarning::AccessorCollision(name.to_string()));
        }
    }

    fn warn(&mut self, warning: DeclarationWarning) {
        log::warn!("Renderer '{}': {}", self.spec.id, warning);
        self.spec.warnings.push(warning);
    }
}
