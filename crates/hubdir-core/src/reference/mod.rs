//! Fixed reference payloads served next to the catalog: categories,
//! platform stats, per-image security and build details, Helm charts.
//!
//! None of this is read from the store.

pub mod helm;
pub mod images;

pub use helm::HelmChart;
pub use images::{
    AdvisoryInfo, Category, ImageSpecifications, ImageVersion, ProvenanceInfo, SbomPackage,
    Vulnerability,
};

#[cfg(test)]
mod test {
    use super::*;
    use chrono::Utc;

    #[test]
    fn category_ids_are_unique_and_ordered() {
        let ids: Vec<_> = images::categories().into_iter().map(|c| c.id).collect();
        assert_eq!(ids, ["featured", "starter", "ai", "application", "base", "fips"]);
    }

    #[test]
    fn versions_interpolate_the_image_name() {
        let versions = images::versions("node");
        assert_eq!(versions.len(), 4);
        assert_eq!(versions[0].pull_url, "hub.opensource.dev/node:latest");
        assert!(versions.iter().all(|v| v.architectures == ["x86_64", "arm64"]));
    }

    #[test]
    fn per_image_payloads_are_fixed() {
        let now = Utc::now();
        assert_eq!(images::vulnerabilities("x").len(), 3);
        assert_eq!(images::sbom("x").len(), 4);
        assert_eq!(images::advisories("x", now)[0].published_date, now);
        assert_eq!(
            images::provenance("redis", now).source_repo,
            "https://github.com/opensource-hub/redis"
        );
        assert_eq!(images::specifications("x", now).layers, 12);
    }

    #[test]
    fn chart_stub_uses_name_as_keyword() {
        let stub = helm::chart_stub("traefik");
        assert_eq!(stub.description, "Helm chart for traefik");
        assert_eq!(stub.keywords, ["traefik", "kubernetes", "helm"]);
        assert_eq!(helm::charts().len(), 4);
    }
}
