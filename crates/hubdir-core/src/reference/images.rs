use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Registry host used in pull URLs.
pub const REGISTRY_HOST: &str = "hub.opensource.dev";

/// Platform-wide figures that are not derived from the store.
pub const STAT_PROJECTS: u64 = 1756;
pub const STAT_VERSIONS: u64 = 105_204;
pub const STAT_BUILDS: u64 = 308_074_969;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: String,
    pub name: String,
    pub icon: String,
}

/// The fixed category set, in display order.
pub fn categories() -> Vec<Category> {
    [
        ("featured", "Featured", "⭐"),
        ("starter", "Starter", "🚀"),
        ("ai", "AI", "🤖"),
        ("application", "Application", "📦"),
        ("base", "Base", "🏗️"),
        ("fips", "FIPS", "🔒"),
    ]
    .into_iter()
    .map(|(id, name, icon)| Category {
        id: id.into(),
        name: name.into(),
        icon: icon.into(),
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageVersion {
    pub tag: String,
    pub pull_url: String,
    pub compressed_size: String,
    pub architectures: Vec<String>,
    pub last_changed: String,
    pub is_free: bool,
    pub end_of_life: Option<String>,
    /// `default`, `dev` or `slim`.
    pub variant: String,
}

pub fn versions(image: &str) -> Vec<ImageVersion> {
    [
        ("latest", "56.41 MB", "3 days ago", true, "default"),
        ("latest-dev", "263.24 MB", "2 days ago", true, "dev"),
        ("24.10.0", "56.41 MB", "1 week ago", false, "default"),
        ("24.10.0-slim", "53.68 MB", "1 week ago", false, "slim"),
    ]
    .into_iter()
    .map(|(tag, size, last_changed, is_free, variant)| ImageVersion {
        tag: tag.into(),
        pull_url: format!("{REGISTRY_HOST}/{image}:{tag}"),
        compressed_size: size.into(),
        architectures: vec!["x86_64".into(), "arm64".into()],
        last_changed: last_changed.into(),
        is_free,
        end_of_life: None,
        variant: variant.into(),
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Vulnerability {
    pub cve_id: String,
    pub severity: String,
    pub package: String,
    pub installed_version: String,
    pub fixed_version: Option<String>,
    pub cvss_score: f32,
    pub description: String,
}

pub fn vulnerabilities(_image: &str) -> Vec<Vulnerability> {
    [
        (
            "CVE-2024-1234",
            "Critical",
            "openssl",
            "1.1.1q",
            "1.1.1w",
            9.8,
            "Remote code execution vulnerability in OpenSSL",
        ),
        (
            "CVE-2024-5678",
            "High",
            "curl",
            "7.68.0",
            "7.88.1",
            7.5,
            "Buffer overflow in curl HTTP/2 handling",
        ),
        (
            "CVE-2024-9012",
            "Medium",
            "libxml2",
            "2.9.10",
            "2.9.14",
            5.3,
            "XML external entity injection vulnerability",
        ),
    ]
    .into_iter()
    .map(
        |(cve_id, severity, package, installed, fixed, cvss_score, description)| Vulnerability {
            cve_id: cve_id.into(),
            severity: severity.into(),
            package: package.into(),
            installed_version: installed.into(),
            fixed_version: Some(fixed.into()),
            cvss_score,
            description: description.into(),
        },
    )
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SbomPackage {
    pub name: String,
    pub version: String,
    pub license: String,
    /// `library` or `binary`.
    pub package_type: String,
    pub source: Option<String>,
}

pub fn sbom(_image: &str) -> Vec<SbomPackage> {
    [
        ("openssl", "1.1.1w", "Apache-2.0", "https://github.com/openssl/openssl"),
        ("curl", "7.88.1", "MIT", "https://github.com/curl/curl"),
        ("zlib", "1.2.13", "Zlib", "https://github.com/madler/zlib"),
        ("glibc", "2.35", "LGPL-2.1", "https://www.gnu.org/software/libc/"),
    ]
    .into_iter()
    .map(|(name, version, license, source)| SbomPackage {
        name: name.into(),
        version: version.into(),
        license: license.into(),
        package_type: "library".into(),
        source: Some(source.into()),
    })
    .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ProvenanceInfo {
    pub built_at: DateTime<Utc>,
    pub builder: String,
    pub source_repo: String,
    pub commit_sha: String,
    pub build_platform: String,
}

pub fn provenance(image: &str, now: DateTime<Utc>) -> ProvenanceInfo {
    ProvenanceInfo {
        built_at: now,
        builder: "GitHub Actions".into(),
        source_repo: format!("https://github.com/opensource-hub/{image}"),
        commit_sha: "a1b2c3d4e5f6g7h8i9j0".into(),
        build_platform: "linux/amd64,linux/arm64".into(),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AdvisoryInfo {
    pub advisory_id: String,
    pub title: String,
    pub severity: String,
    pub published_date: DateTime<Utc>,
    pub affected_versions: Vec<String>,
    pub description: String,
    pub mitigation: String,
}

pub fn advisories(_image: &str, now: DateTime<Utc>) -> Vec<AdvisoryInfo> {
    vec![AdvisoryInfo {
        advisory_id: "GHSA-xxxx-yyyy-zzzz".into(),
        title: "Critical vulnerability in dependencies".into(),
        severity: "Critical".into(),
        published_date: now,
        affected_versions: vec!["24.9.0".into(), "24.9.1".into()],
        description: "A critical vulnerability was discovered in a core dependency".into(),
        mitigation: "Update to version 24.10.0 or later".into(),
    }]
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ImageSpecifications {
    pub base_image: String,
    pub layers: u32,
    pub total_size: String,
    pub created: DateTime<Utc>,
    pub author: String,
    pub entrypoint: Option<Vec<String>>,
    pub cmd: Option<Vec<String>>,
    pub env_vars: Option<BTreeMap<String, String>>,
    pub exposed_ports: Option<Vec<String>>,
    pub volumes: Option<Vec<String>>,
}

pub fn specifications(_image: &str, now: DateTime<Utc>) -> ImageSpecifications {
    let env_vars = BTreeMap::from([
        ("NODE_VERSION".to_owned(), "24.10.0".to_owned()),
        ("PATH".to_owned(), "/usr/local/bin:$PATH".to_owned()),
    ]);
    ImageSpecifications {
        base_image: "alpine:3.19".into(),
        layers: 12,
        total_size: "180 MB".into(),
        created: now,
        author: "OpenSource Hub Team".into(),
        entrypoint: Some(vec!["/usr/local/bin/docker-entrypoint.sh".into()]),
        cmd: Some(vec!["node".into()]),
        env_vars: Some(env_vars),
        exposed_ports: Some(vec!["3000/tcp".into()]),
        volumes: Some(vec!["/app".into(), "/data".into()]),
    }
}
