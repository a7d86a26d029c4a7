// Request bodies sent to the backend, plus the form values they are
// built from. A payload is built fresh for every submission.

use crate::error::{SubmitError, ValidationError};
use crate::routes::BatchMode;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// What the backend does with each detected face.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Operation {
    /// Draw a box around each face, no cropping.
    #[serde(rename = "box")]
    Box,
    #[serde(rename = "crop")]
    Crop,
    #[serde(rename = "plain resize")]
    PlainResize,
    #[default]
    #[serde(rename = "pad resize")]
    PadResize,
}

impl Operation {
    pub const ALL: [Operation; 4] = [
        Operation::Box,
        Operation::Crop,
        Operation::PlainResize,
        Operation::PadResize,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Box => "box",
            Operation::Crop => "crop",
            Operation::PlainResize => "plain resize",
            Operation::PadResize => "pad resize",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Operation {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Operation::ALL
            .into_iter()
            .find(|op| op.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownOperation(s.to_string()))
    }
}

/// Multiple of the 190x237 output photo size used by the resize
/// operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Multiplier(u8);

impl Multiplier {
    pub const MAX: u8 = 4;

    pub fn get(self) -> u8 {
        self.0
    }
}

impl Default for Multiplier {
    fn default() -> Self {
        Multiplier(1)
    }
}

impl TryFrom<u8> for Multiplier {
    type Error = ValidationError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=Self::MAX).contains(&value) {
            Ok(Multiplier(value))
        } else {
            Err(ValidationError::InvalidMultiplier(value))
        }
    }
}

/// Minimum face box size, entered as `WIDTHxHEIGHT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MinBoxSize {
    pub width: u32,
    pub height: u32,
}

impl Default for MinBoxSize {
    fn default() -> Self {
        MinBoxSize {
            width: 200,
            height: 400,
        }
    }
}

impl MinBoxSize {
    pub fn parse(s: &str) -> Result<Self, ValidationError> {
        let invalid = || ValidationError::InvalidMinSize(s.to_string());
        let (w, h) = s.trim().split_once('x').ok_or_else(invalid)?;
        let width = w.trim().parse().map_err(|_| invalid())?;
        let height = h.trim().parse().map_err(|_| invalid())?;
        Ok(MinBoxSize { width, height })
    }
}

impl fmt::Display for MinBoxSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Values of the detect form.
#[derive(Debug, Clone)]
pub struct DetectForm {
    pub file: Option<PathBuf>,
    pub max_faces: u32,
    pub min_size: MinBoxSize,
    pub operation: Operation,
    pub multiplier: Multiplier,
}

impl Default for DetectForm {
    fn default() -> Self {
        DetectForm {
            file: None,
            max_faces: 5,
            min_size: MinBoxSize::default(),
            operation: Operation::default(),
            multiplier: Multiplier::default(),
        }
    }
}

impl DetectForm {
    pub fn validate(&self, mode: BatchMode) -> Result<&Path, ValidationError> {
        selected_path(self.file.as_deref(), mode)
    }
}

/// Values of the resize form. A zero dimension lets the backend keep
/// the aspect ratio from the other one.
#[derive(Debug, Clone, Default)]
pub struct ResizeForm {
    pub file: Option<PathBuf>,
    pub new_width: u32,
    pub new_height: u32,
}

impl ResizeForm {
    pub fn validate(&self, mode: BatchMode) -> Result<&Path, ValidationError> {
        let path = selected_path(self.file.as_deref(), mode)?;
        if self.new_width == 0 && self.new_height == 0 {
            return Err(ValidationError::ZeroDimensions);
        }
        Ok(path)
    }
}

fn selected_path(file: Option<&Path>, mode: BatchMode) -> Result<&Path, ValidationError> {
    match file {
        Some(p) if !p.as_os_str().is_empty() => Ok(p),
        _ => Err(match mode {
            BatchMode::File => ValidationError::NoImageSelected,
            BatchMode::Zip => ValidationError::NoZipSelected,
        }),
    }
}

/// A file read from disk, ready to be attached to a payload.
#[derive(Debug, Clone)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl SelectedFile {
    pub fn read(path: &Path) -> Result<Self, SubmitError> {
        let data = std::fs::read(path).map_err(|source| SubmitError::Read {
            path: path.display().to_string(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Ok(SelectedFile {
            mime_type: mime_type_for(path).to_string(),
            name,
            data,
        })
    }

    pub fn encoded(&self) -> String {
        STANDARD.encode(&self.data)
    }
}

/// MIME type guessed from the extension. Empty when unknown, like the
/// `type` of a browser `File`.
pub fn mime_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .map(|e| e.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "tif" | "tiff" => "image/tiff",
        "zip" => "application/zip",
        _ => "",
    }
}

/// Body for the detect routes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct DetectPayload {
    pub imagedata: String,
    pub maxfaces: u32,
    pub minheight: u32,
    pub minwidth: u32,
    pub operation: Operation,
    pub multiplier: Multiplier,
    pub mimetype: String,
    pub filename: String,
}

impl DetectPayload {
    pub fn new(form: &DetectForm, file: &SelectedFile) -> Self {
        DetectPayload {
            imagedata: file.encoded(),
            maxfaces: form.max_faces,
            minheight: form.min_size.height,
            minwidth: form.min_size.width,
            operation: form.operation,
            multiplier: form.multiplier,
            mimetype: file.mime_type.clone(),
            filename: file.name.clone(),
        }
    }
}

/// Body for the shrink routes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct ResizePayload {
    pub imagedata: String,
    pub newheight: u32,
    pub newwidth: u32,
    pub mimetype: String,
    pub filename: String,
}

impl ResizePayload {
    pub fn new(form: &ResizeForm, file: &SelectedFile) -> Self {
        ResizePayload {
            imagedata: file.encoded(),
            newheight: form.new_height,
            newwidth: form.new_width,
            mimetype: file.mime_type.clone(),
            filename: file.name.clone(),
        }
    }
}
