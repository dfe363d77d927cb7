use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Published engine releases and their dates. Dates are ISO formatted so
/// plain string comparison orders them correctly.
pub const RELEASES: &[(&str, &str)] = &[
    ("16.0", "2023-06-30"),
    ("15.1", "2022-12-04"),
    ("15.0", "2022-04-18"),
    ("14.1", "2021-10-28"),
    ("14.0", "2021-07-02"),
    ("13.0", "2021-02-19"),
    ("12.0", "2020-09-02"),
    ("11.0", "2020-01-18"),
    ("10.0", "2018-11-29"),
];

/// Version info self-reported by the engine on its `id name` line.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EngineVersion {
    pub major: u32,
    pub minor: u32,
    pub patch: String,
    pub sha: String,
    pub is_dev_build: bool,
    /// The release-form version text, e.g. "15.1". For development builds
    /// this is the resolved release, not the raw token.
    pub text: String,
}

impl EngineVersion {
    /// Full numeric version, e.g. 15.1 for major 15 minor 1.
    pub fn full(&self) -> f64 {
        self.major as f64 + self.minor as f64 / 10.0
    }
}

/// Parses the version token from the engine's identifier. Three shapes are
/// accepted: a `dev-YYYYMMDD-sha` tag, a bare 6-digit `DDMMYY` development
/// build, and a plain `major.minor` release string. Development builds are
/// mapped to the most recent published release at or before the build date.
pub fn parse_version(token: &str) -> Result<EngineVersion> {
    let mut version = EngineVersion {
        text: token.to_string(),
        ..EngineVersion::default()
    };

    if let Some(rest) = token.strip_prefix("dev-") {
        let mut parts = rest.splitn(2, '-');
        let build_date = parts.next().unwrap_or("");
        let sha = parts.next().unwrap_or("");
        if build_date.len() != 8 || !build_date.bytes().all(|b| b.is_ascii_digit()) {
            return Err(EngineError::Protocol(format!(
                "unrecognized engine version '{}'",
                token
            )));
        }
        version.is_dev_build = true;
        version.patch = build_date.to_string();
        version.sha = sha.to_string();
        let date = format!(
            "{}-{}-{}",
            &build_date[0..4],
            &build_date[4..6],
            &build_date[6..8]
        );
        version.text = release_for_date(&date)?.to_string();
    } else if token.len() == 6 && token.bytes().all(|b| b.is_ascii_digit()) {
        // Older development builds report a bare DDMMYY date.
        version.is_dev_build = true;
        version.patch = token.to_string();
        let date = format!("20{}-{}-{}", &token[4..6], &token[2..4], &token[0..2]);
        version.text = release_for_date(&date)?.to_string();
    }

    let mut fields = version.text.split('.');
    version.major = fields
        .next()
        .and_then(|s| s.parse().ok())
        .ok_or_else(|| EngineError::Protocol(format!("unrecognized engine version '{}'", token)))?;
    version.minor = fields.next().and_then(|s| s.parse().ok()).unwrap_or(0);
    Ok(version)
}

/// Latest release published at or before `date` (ISO formatted).
fn release_for_date(date: &str) -> Result<&'static str> {
    let mut best: Option<(&str, &str)> = None;
    for &(release, released) in RELEASES {
        if released <= date && best.map_or(true, |(_, d)| released > d) {
            best = Some((release, released));
        }
    }
    best.map(|(release, _)| release)
        .ok_or_else(|| EngineError::VersionResolution(date.to_string()))
}
