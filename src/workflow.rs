// Upload workflow controller. Holds the state the page used to keep in
// globals (batch mode, file filter, status text) and runs one
// submission at a time: validate, read, encode, post, save.

use crate::api::Backend;
use crate::error::{SubmitError, ValidationError};
use crate::payload::{DetectForm, DetectPayload, ResizeForm, ResizePayload, SelectedFile};
use crate::routes::{BatchMode, RouteSet, Workflow};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Name every downloaded result is saved under.
pub const DOWNLOAD_NAME: &str = "boxed.zip";

/// Receives the blob of a successful submission.
pub trait Downloader {
    fn download(&self, name: &str, blob: &[u8]) -> Result<PathBuf, SubmitError>;
}

/// Saves downloads into a directory, creating it when missing. An
/// existing file with the same name is replaced.
#[derive(Debug, Clone)]
pub struct DirDownloader {
    dir: PathBuf,
}

impl DirDownloader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        DirDownloader { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }
}

impl Downloader for DirDownloader {
    fn download(&self, name: &str, blob: &[u8]) -> Result<PathBuf, SubmitError> {
        std::fs::create_dir_all(&self.dir).map_err(SubmitError::Save)?;
        let path = self.dir.join(name);
        std::fs::write(&path, blob).map_err(SubmitError::Save)?;
        Ok(path)
    }
}

/// Result of one submission attempt.
#[derive(Debug)]
pub enum Outcome {
    /// Validation failed; nothing was sent.
    Alert(ValidationError),
    /// The blob was saved at this path.
    Downloaded(PathBuf),
    /// The request or the save failed. The text is also in the status.
    Failed(SubmitError),
}

pub struct UploadController<B, D> {
    backend: B,
    downloader: D,
    routes: RouteSet,
    mode: BatchMode,
    status: String,
}

impl<B: Backend, D: Downloader> UploadController<B, D> {
    /// Starts in zip mode, as the page does before the selector is
    /// touched.
    pub fn new(backend: B, downloader: D, routes: RouteSet) -> Self {
        UploadController {
            backend,
            downloader,
            routes,
            mode: BatchMode::Zip,
            status: String::new(),
        }
    }

    /// Switch between single-image and zip submission. Changes which
    /// route a submission goes to and which files the picker accepts.
    pub fn configure(&mut self, mode: BatchMode) {
        debug!(%mode, "batch mode changed");
        self.mode = mode;
    }

    pub fn mode(&self) -> BatchMode {
        self.mode
    }

    pub fn accepted_extensions(&self) -> &'static [&'static str] {
        self.mode.accepted_extensions()
    }

    /// Whether `path` matches the current file filter.
    pub fn accepts(&self, path: &Path) -> bool {
        let name = path.to_string_lossy().to_ascii_lowercase();
        self.accepted_extensions()
            .iter()
            .any(|ext| name.ends_with(ext))
    }

    /// Text of the status line. Empty until a submission fails.
    pub fn status(&self) -> &str {
        &self.status
    }

    pub fn submit_detect(&mut self, form: &DetectForm) -> Outcome {
        self.status.clear();
        let path = match form.validate(self.mode) {
            Ok(p) => p,
            Err(e) => return self.alert(e),
        };
        let route = self.routes.route(Workflow::Detect, self.mode).to_string();
        let result = SelectedFile::read(path)
            .map(|file| DetectPayload::new(form, &file))
            .and_then(|payload| self.send(&route, &payload));
        self.finish(result)
    }

    pub fn submit_resize(&mut self, form: &ResizeForm) -> Outcome {
        self.status.clear();
        let path = match form.validate(self.mode) {
            Ok(p) => p,
            Err(e) => return self.alert(e),
        };
        let route = self.routes.route(Workflow::Resize, self.mode).to_string();
        let result = SelectedFile::read(path)
            .map(|file| ResizePayload::new(form, &file))
            .and_then(|payload| self.send(&route, &payload));
        self.finish(result)
    }

    fn alert(&self, err: ValidationError) -> Outcome {
        debug!(error = %err, "submission blocked");
        Outcome::Alert(err)
    }

    fn send<P: Serialize>(&self, route: &str, payload: &P) -> Result<PathBuf, SubmitError> {
        let body = serde_json::to_string(payload)?;
        info!(route, mode = %self.mode, bytes = body.len(), "submitting");
        let blob = self.backend.post_json(route, body)?;
        self.downloader.download(DOWNLOAD_NAME, &blob)
    }

    fn finish(&mut self, result: Result<PathBuf, SubmitError>) -> Outcome {
        match result {
            Ok(path) => {
                info!(path = %path.display(), "download saved");
                Outcome::Downloaded(path)
            }
            Err(e) => {
                warn!(error = %e, "submission failed");
                self.status = e.to_string();
                Outcome::Failed(e)
            }
        }
    }
}
