//! Package registry documents (the PyPI JSON API shape).
//!
//! Only the fields the README and release views read are modelled; everything
//! else in the response is ignored. Fetching the document is the caller's job.

use std::collections::BTreeMap;
use std::io::Read;

use serde::Deserialize;

use crate::{Options, Readme, Result, render::render_raw};

/// Top-level registry response for one package.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PackageDocument {
    /// Metadata of the latest release.
    pub info: Info,
    /// Uploaded files keyed by version string.
    #[serde(default)]
    pub releases: BTreeMap<String, Vec<ReleaseFile>>,
}

/// The `info` object of a registry response.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Info {
    pub name: String,
    pub version: String,
    pub summary: Option<String>,
    pub description: Option<String>,
    pub description_content_type: Option<String>,
    pub author: Option<String>,
    pub requires_python: Option<String>,
}

/// One uploaded distribution file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ReleaseFile {
    pub filename: String,
    pub size: u64,
    /// ISO-8601 timestamp, e.g. `2024-03-01T12:30:00`.
    pub upload_time: String,
    pub packagetype: Option<String>,
}

impl ReleaseFile {
    /// Whether this is a source distribution.
    pub fn is_sdist(&self) -> bool {
        self.packagetype.as_deref() == Some("sdist")
    }
}

/// How a description should be displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentType {
    /// Markdown, possibly with embedded HTML. The default when unspecified.
    Markdown,
    /// reStructuredText, shown raw.
    ReStructuredText,
    /// Plain text, shown raw.
    Plain,
}

impl ContentType {
    /// Classify a `description_content_type` value.
    ///
    /// Parameters such as `; charset=UTF-8` are ignored.
    pub fn from_mime(mime: Option<&str>) -> Self {
        let essence = mime
            .and_then(|m| m.split(';').next())
            .map(str::trim)
            .unwrap_or_default();
        if essence.eq_ignore_ascii_case("text/x-rst") {
            ContentType::ReStructuredText
        } else if essence.eq_ignore_ascii_case("text/plain") {
            ContentType::Plain
        } else {
            ContentType::Markdown
        }
    }
}

/// A point on the release history timeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseEntry<'a> {
    pub version: &'a str,
    /// Upload time of the release's first file.
    pub upload_time: &'a str,
    /// Total size of all files in the release, in bytes.
    pub size: u64,
}

/// One version in the release listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseView<'a> {
    pub version: &'a str,
    /// Upload time of the version's first file, `None` when it has no files.
    pub upload_time: Option<&'a str>,
    /// Files with the source distribution first.
    pub files: Vec<&'a ReleaseFile>,
}

impl ReleaseView<'_> {
    /// Upload date as `Mar 1, 2024`, or `N/A` for a version with no files.
    pub fn date_label(&self) -> String {
        self.upload_time
            .map_or_else(|| "N/A".to_string(), format_date)
    }
}

impl PackageDocument {
    /// Parse a registry document from JSON text.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Parse a registry document from a reader.
    pub fn from_reader(reader: impl Read) -> Result<Self> {
        Ok(serde_json::from_reader(reader)?)
    }

    /// Content type of the description.
    pub fn content_type(&self) -> ContentType {
        ContentType::from_mime(self.info.description_content_type.as_deref())
    }

    /// The description, if present and non-empty.
    pub fn description(&self) -> Option<&str> {
        self.info.description.as_deref().filter(|d| !d.is_empty())
    }

    /// Render the README as HTML, routed by content type.
    ///
    /// Returns `None` when the package has no description.
    pub fn readme_html(&self, options: &Options) -> Option<String> {
        let description = self.description()?;
        let content_type = self.content_type();
        log::debug!("rendering {} description as {:?}", self.info.name, content_type);
        Some(match content_type {
            ContentType::Markdown => Readme::new(description).to_html(options),
            ContentType::ReStructuredText | ContentType::Plain => render_raw(description),
        })
    }

    /// Releases with at least one file, oldest first.
    pub fn release_timeline(&self) -> Vec<ReleaseEntry<'_>> {
        let mut timeline: Vec<ReleaseEntry<'_>> = self
            .releases
            .iter()
            .filter_map(|(version, files)| {
                let first = files.first()?;
                Some(ReleaseEntry {
                    version,
                    upload_time: &first.upload_time,
                    size: files.iter().map(|f| f.size).sum(),
                })
            })
            .collect();
        timeline.sort_by(|a, b| a.upload_time.cmp(b.upload_time));
        timeline
    }

    /// Every version, newest upload first; versions with no files go last.
    pub fn releases_newest_first(&self) -> Vec<ReleaseView<'_>> {
        let mut views: Vec<ReleaseView<'_>> = self
            .releases
            .iter()
            .map(|(version, files)| ReleaseView {
                version,
                upload_time: files.first().map(|f| f.upload_time.as_str()),
                files: sdist_first(files),
            })
            .collect();
        views.sort_by(|a, b| b.upload_time.cmp(&a.upload_time));
        views
    }

    /// The description when it goes through the Markdown path.
    ///
    /// reStructuredText and plain-text descriptions are shown raw and never
    /// normalized or segmented.
    pub fn markdown_description(&self) -> Option<&str> {
        self.description()
            .filter(|_| self.content_type() == ContentType::Markdown)
    }

    /// Files of the current version.
    pub fn current_files(&self) -> &[ReleaseFile] {
        self.releases
            .get(&self.info.version)
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// The shell command that installs this package.
    pub fn install_command(&self) -> String {
        format!("pip install {}", self.info.name)
    }
}

/// Order `files` with source distributions first, keeping the order within
/// each group.
pub fn sdist_first(files: &[ReleaseFile]) -> Vec<&ReleaseFile> {
    let mut sorted: Vec<&ReleaseFile> = files.iter().collect();
    sorted.sort_by_key(|f| !f.is_sdist());
    sorted
}

const MONTHS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// Format the date part of an ISO-8601 timestamp as `Mar 1, 2024`.
///
/// Timestamps that don't start with `YYYY-MM-DD` are returned unchanged.
pub fn format_date(timestamp: &str) -> String {
    let parts = timestamp
        .get(..10)
        .filter(|date| date.as_bytes()[4] == b'-' && date.as_bytes()[7] == b'-')
        .and_then(|date| {
            let year: u32 = date[..4].parse().ok()?;
            let month: usize = date[5..7].parse().ok()?;
            let day: u32 = date[8..10].parse().ok()?;
            let name = MONTHS.get(month.checked_sub(1)?)?;
            Some((year, name, day))
        });
    match parts {
        Some((year, month, day)) => format!("{month} {day}, {year}"),
        None => timestamp.to_string(),
    }
}

const SIZE_UNITS: [&str; 5] = ["Bytes", "KB", "MB", "GB", "TB"];

/// Human-readable byte size with up to `decimals` fractional digits.
///
/// Ties round away from zero: 2560 bytes at 0 decimals is `3 KB`.
///
/// # Example
/// ```
/// use lensmark::registry::format_bytes;
///
/// assert_eq!(format_bytes(0, 2), "0 Bytes");
/// assert_eq!(format_bytes(1536, 2), "1.5 KB");
/// assert_eq!(format_bytes(1_048_576, 2), "1 MB");
/// ```
pub fn format_bytes(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return "0 Bytes".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < SIZE_UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let decimals = decimals.min(20);
    let scale = 10f64.powi(decimals as i32);
    let rounded = (value * scale).round() / scale;
    let fixed = format!("{rounded:.decimals$}");
    let number = if fixed.contains('.') {
        fixed.trim_end_matches('0').trim_end_matches('.')
    } else {
        &fixed
    };
    format!("{number} {}", SIZE_UNITS[unit])
}
