//! Cat use-case service.
//!
//! # Responsibility
//! - Own every business rule for cat records: input checks, identificator
//!   derivation, name case normalization and PDF export.
//! - Translate repository results into typed `CatServiceError` values.
//!
//! # Invariants
//! - Every write that changes a name refreshes the identificator first.
//! - No local recovery or retry; failures surface at the point of detection.
//! - The service is storage-agnostic and renderer-agnostic.

use crate::model::cat::{Cat, CatId};
use crate::model::identificator::{IdentificatorStrategy, StandardIdentificator};
use crate::render::{DocumentRenderer, PdfRenderer, RenderError};
use crate::repo::cat_repo::{CatRepository, RepoError};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub type CatServiceResult<T> = Result<T, CatServiceError>;

/// Caller-facing classification of service failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// No record matches the query.
    NotFound,
    /// Caller input violates a precondition.
    InvalidArgument,
    /// Storage, rendering or internal consistency failure.
    Fatal,
}

impl ErrorKind {
    /// HTTP-equivalent status for web adapters.
    pub fn status_code(self) -> u16 {
        match self {
            Self::NotFound => 404,
            Self::InvalidArgument => 400,
            Self::Fatal => 500,
        }
    }
}

/// Service error for cat use-cases.
#[derive(Debug)]
pub enum CatServiceError {
    InvalidArgument(&'static str),
    NotFound(String),
    Repo(RepoError),
    Render(RenderError),
    /// A record the operation relies on vanished or is malformed.
    InconsistentState(String),
}

impl CatServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidArgument(_) => ErrorKind::InvalidArgument,
            Self::NotFound(_) => ErrorKind::NotFound,
            Self::Repo(_) | Self::Render(_) | Self::InconsistentState(_) => ErrorKind::Fatal,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }
}

impl Display for CatServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidArgument(message) => write!(f, "invalid argument: {message}"),
            Self::NotFound(message) => write!(f, "{message}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Render(err) => write!(f, "{err}"),
            Self::InconsistentState(details) => write!(f, "inconsistent cat state: {details}"),
        }
    }
}

impl Error for CatServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Render(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for CatServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<RenderError> for CatServiceError {
    fn from(value: RenderError) -> Self {
        Self::Render(value)
    }
}

const EMPTY_NAME: &str = "cat name is empty";

/// Cat service facade over repository, identificator and renderer
/// implementations.
pub struct CatService<R, I = StandardIdentificator, D = PdfRenderer>
where
    R: CatRepository,
    I: IdentificatorStrategy,
    D: DocumentRenderer,
{
    repo: R,
    identificator: I,
    renderer: D,
}

impl<R: CatRepository> CatService<R> {
    /// Creates a service with the standard identificator and PDF renderer.
    pub fn new(repo: R) -> Self {
        Self::with_parts(repo, StandardIdentificator, PdfRenderer::default())
    }
}

impl<R, I, D> CatService<R, I, D>
where
    R: CatRepository,
    I: IdentificatorStrategy,
    D: DocumentRenderer,
{
    pub fn with_parts(repo: R, identificator: I, renderer: D) -> Self {
        Self {
            repo,
            identificator,
            renderer,
        }
    }

    /// Returns every stored cat.
    pub fn list_all(&self) -> CatServiceResult<Vec<Cat>> {
        let cats = self.repo.find_all()?;
        non_empty(cats, "there is no cat in the database")
    }

    /// Case-insensitive substring search on names.
    pub fn find_by_name(&self, name: &str) -> CatServiceResult<Vec<Cat>> {
        let cats = self.repo.find_by_name_containing_ignore_case(name)?;
        non_empty(cats, "cat not found")
    }

    pub fn find_by_age(&self, age: i32) -> CatServiceResult<Vec<Cat>> {
        let cats = self.repo.find_by_age(age)?;
        non_empty(cats, "cat not found")
    }

    /// Stamps and persists a new cat, returning it with its assigned id.
    pub fn create(&self, mut cat: Cat) -> CatServiceResult<Cat> {
        cat.refresh_identificator(&self.identificator);
        let saved = self.repo.save(&cat)?;
        info!(
            "event=cat_create module=service status=ok id={}",
            saved.id.unwrap_or_default()
        );
        Ok(saved)
    }

    /// Creates a cat whose name is stored uppercased.
    pub fn create_with_uppercased_name(&self, name: &str, age: i32) -> CatServiceResult<Cat> {
        if name.is_empty() {
            return Err(CatServiceError::InvalidArgument(EMPTY_NAME));
        }

        self.create(Cat::new(name.to_uppercase(), age))
    }

    /// Deletes every cat with exactly this name and returns the deleted set.
    ///
    /// The lookup runs before the empty-name check, so an empty name still
    /// costs one query before being rejected.
    pub fn delete_by_name(&self, name: &str) -> CatServiceResult<Vec<Cat>> {
        let to_delete = self.repo.find_by_name(name)?;

        if name.is_empty() {
            return Err(CatServiceError::InvalidArgument(EMPTY_NAME));
        }

        self.repo.delete_all(&to_delete)?;
        info!(
            "event=cat_delete module=service status=ok count={}",
            to_delete.len()
        );
        Ok(to_delete)
    }

    /// Renames every cat named exactly `old_name`.
    ///
    /// Cats already carrying `new_name` are returned as-is without a write.
    pub fn rename_all(&self, old_name: &str, new_name: &str) -> CatServiceResult<Vec<Cat>> {
        if old_name.is_empty() || new_name.is_empty() {
            return Err(CatServiceError::InvalidArgument(EMPTY_NAME));
        }

        let cats = non_empty(self.repo.find_by_name(old_name)?, "cat not found")?;

        let mut renamed = 0usize;
        let mut result = Vec::with_capacity(cats.len());
        for mut cat in cats {
            if cat.name != new_name {
                cat.rename(new_name, &self.identificator);
                cat = self.repo.save(&cat)?;
                renamed += 1;
            }
            result.push(cat);
        }

        info!(
            "event=cat_rename module=service status=ok matched={} renamed={}",
            result.len(),
            renamed
        );
        Ok(result)
    }

    pub fn get_by_id(&self, id: CatId) -> CatServiceResult<Cat> {
        if id < 0 {
            return Err(CatServiceError::InvalidArgument("id is not valid"));
        }

        self.repo
            .find_by_id(id)?
            .ok_or_else(|| CatServiceError::NotFound(format!("cat not found: {id}")))
    }

    /// Re-saves an existing cat unchanged.
    ///
    /// A missing record is an internal inconsistency for this operation
    /// (callers are expected to hold a valid id), so it maps to a fatal error
    /// rather than `NotFound`.
    pub fn refresh(&self, id: CatId) -> CatServiceResult<Cat> {
        let cat = self.repo.find_by_id(id)?.ok_or_else(|| {
            warn!("event=cat_refresh module=service status=error id={id} error_code=missing_record");
            CatServiceError::InconsistentState(format!("refresh target {id} does not exist"))
        })?;

        if !cat.is_persisted() {
            return Err(CatServiceError::InvalidArgument(
                "cat id is required for updating a record",
            ));
        }

        Ok(self.repo.save(&cat)?)
    }

    /// Finds cats named exactly `name.to_uppercase()` and stores their names
    /// lowercased.
    pub fn lowercase_all_matching_uppercased_name(&self, name: &str) -> CatServiceResult<Vec<Cat>> {
        if name.is_empty() {
            return Err(CatServiceError::InvalidArgument(EMPTY_NAME));
        }

        let cats = non_empty(self.repo.find_by_name(&name.to_uppercase())?, "cat not found")?;

        let mut updated = Vec::with_capacity(cats.len());
        for mut cat in cats {
            let lowered = cat.name.to_lowercase();
            cat.rename(lowered, &self.identificator);
            updated.push(self.repo.save(&cat)?);
        }

        info!(
            "event=cat_lowercase module=service status=ok count={}",
            updated.len()
        );
        Ok(updated)
    }

    /// Renders a one-page summary of the cat with this id.
    pub fn export_pdf(&self, id: CatId) -> CatServiceResult<Vec<u8>> {
        let cat = self
            .repo
            .find_by_id(id)?
            .ok_or_else(|| CatServiceError::NotFound(format!("cat not found: {id}")))?;

        let bytes = self.renderer.render_lines(&summary_lines(&cat))?;
        info!(
            "event=cat_export module=service status=ok id={} bytes={}",
            id,
            bytes.len()
        );
        Ok(bytes)
    }
}

/// Summary lines drawn by `export_pdf`, top to bottom.
pub fn summary_lines(cat: &Cat) -> Vec<String> {
    vec![
        format!("Name: {}", cat.name),
        format!("Age: {}", cat.age),
        format!(
            "Identificator: {}",
            cat.identificator.as_deref().unwrap_or_default()
        ),
    ]
}

fn non_empty(cats: Vec<Cat>, message: &str) -> CatServiceResult<Vec<Cat>> {
    if cats.is_empty() {
        return Err(CatServiceError::NotFound(message.to_string()));
    }
    Ok(cats)
}
