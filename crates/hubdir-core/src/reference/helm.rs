use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

const MAINTAINER: &str = "OpenSource Hub Team";
const DEVICON: &str = "https://cdn.jsdelivr.net/gh/devicons/devicon/icons";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HelmChart {
    pub name: String,
    pub version: String,
    pub app_version: String,
    pub description: String,
    pub icon: String,
    pub maintainers: Vec<String>,
    pub keywords: Vec<String>,
}

fn chart(
    name: &str,
    version: &str,
    app_version: &str,
    description: &str,
    icon: &str,
    keywords: &[&str],
) -> HelmChart {
    HelmChart {
        name: name.into(),
        version: version.into(),
        app_version: app_version.into(),
        description: description.into(),
        icon: format!("{DEVICON}/{icon}"),
        maintainers: vec![MAINTAINER.into()],
        keywords: keywords.iter().map(|k| (*k).to_owned()).collect(),
    }
}

pub fn charts() -> Vec<HelmChart> {
    vec![
        chart(
            "nginx",
            "15.1.0",
            "1.25.3",
            "NGINX Open Source is a web server that can be also used as a reverse proxy, load balancer, and HTTP cache",
            "nginx/nginx-original.svg",
            &["nginx", "http", "web", "www", "reverse proxy"],
        ),
        chart(
            "postgresql",
            "13.2.1",
            "16.1.0",
            "PostgreSQL is an advanced object-relational database management system",
            "postgresql/postgresql-original.svg",
            &["postgresql", "postgres", "database", "sql"],
        ),
        chart(
            "mongodb",
            "14.3.0",
            "7.0.4",
            "MongoDB is a cross-platform document-oriented database",
            "mongodb/mongodb-original.svg",
            &["mongodb", "database", "nosql"],
        ),
        chart(
            "redis",
            "18.4.0",
            "7.2.3",
            "Redis is an in-memory database that persists on disk",
            "redis/redis-original.svg",
            &["redis", "cache", "database"],
        ),
    ]
}

/// Generic chart description for any chart name.
pub fn chart_stub(name: &str) -> HelmChart {
    chart(
        name,
        "1.0.0",
        "latest",
        &format!("Helm chart for {name}"),
        "kubernetes/kubernetes-plain.svg",
        &[name, "kubernetes", "helm"],
    )
}
