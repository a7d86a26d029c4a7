// Backend route table. Two deployments of the backend exist with
// different paths for the detect endpoints, so the set in use is picked
// from configuration rather than baked into the controller.

use std::fmt;
use std::str::FromStr;

/// Which processing the backend should run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    Detect,
    Resize,
}

/// Single image or zip archive of images.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BatchMode {
    File,
    #[default]
    Zip,
}

impl BatchMode {
    /// Map the batch selector value. Only `file` selects single-image
    /// mode; every other value means zip.
    pub fn from_selector(value: &str) -> Self {
        if value == "file" {
            BatchMode::File
        } else {
            BatchMode::Zip
        }
    }

    /// Extensions offered by the file picker for this mode.
    pub fn accepted_extensions(self) -> &'static [&'static str] {
        match self {
            BatchMode::File => &[".png", ".jpg", ".jpeg", ".tiff"],
            BatchMode::Zip => &[".zip"],
        }
    }
}

impl fmt::Display for BatchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatchMode::File => write!(f, "file"),
            BatchMode::Zip => write!(f, "zip"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteSet {
    pub detect_one: String,
    pub detect_zip: String,
    pub shrink_one: String,
    pub shrink_zip: String,
}

impl RouteSet {
    /// `/detect` and `/detectall`.
    pub fn plain() -> Self {
        RouteSet {
            detect_one: "/detect".into(),
            detect_zip: "/detectall".into(),
            shrink_one: "/do-shrink".into(),
            shrink_zip: "/do-shrinkall".into(),
        }
    }

    /// `/do-detect` and `/do-detectall`.
    pub fn prefixed() -> Self {
        RouteSet {
            detect_one: "/do-detect".into(),
            detect_zip: "/do-detectall".into(),
            ..RouteSet::plain()
        }
    }

    pub fn route(&self, workflow: Workflow, mode: BatchMode) -> &str {
        match (workflow, mode) {
            (Workflow::Detect, BatchMode::File) => &self.detect_one,
            (Workflow::Detect, BatchMode::Zip) => &self.detect_zip,
            (Workflow::Resize, BatchMode::File) => &self.shrink_one,
            (Workflow::Resize, BatchMode::Zip) => &self.shrink_zip,
        }
    }
}

impl Default for RouteSet {
    fn default() -> Self {
        RouteSet::plain()
    }
}

impl FromStr for RouteSet {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "plain" => Ok(RouteSet::plain()),
            "prefixed" => Ok(RouteSet::prefixed()),
            other => anyhow::bail!("unknown route set '{}', expected 'plain' or 'prefixed'", other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selector_only_file_is_single() {
        assert_eq!(BatchMode::from_selector("file"), BatchMode::File);
        assert_eq!(BatchMode::from_selector("zip"), BatchMode::Zip);
        assert_eq!(BatchMode::from_selector("folder"), BatchMode::Zip);
        assert_eq!(BatchMode::from_selector(""), BatchMode::Zip);
    }

    #[test]
    fn plain_routes() {
        let routes = RouteSet::plain();
        assert_eq!(routes.route(Workflow::Detect, BatchMode::File), "/detect");
        assert_eq!(routes.route(Workflow::Detect, BatchMode::Zip), "/detectall");
        assert_eq!(routes.route(Workflow::Resize, BatchMode::File), "/do-shrink");
        assert_eq!(routes.route(Workflow::Resize, BatchMode::Zip), "/do-shrinkall");
    }

    #[test]
    fn prefixed_routes_only_change_detect() {
        let routes = RouteSet::prefixed();
        assert_eq!(routes.route(Workflow::Detect, BatchMode::File), "/do-detect");
        assert_eq!(routes.route(Workflow::Detect, BatchMode::Zip), "/do-detectall");
        assert_eq!(routes.shrink_one, RouteSet::plain().shrink_one);
    }

    #[test]
    fn parse_route_set_names() {
        assert_eq!("plain".parse::<RouteSet>().unwrap(), RouteSet::plain());
        assert_eq!(" Prefixed ".parse::<RouteSet>().unwrap(), RouteSet::prefixed());
        assert!("other".parse::<RouteSet>().is_err());
    }
}
