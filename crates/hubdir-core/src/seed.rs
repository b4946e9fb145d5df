//! Canonical seed data for a fresh catalog.

use crate::catalog::{Badge, NewCatalogEntry};

/// A seed candidate plus the `last_changed` marker it is stored with.
#[derive(Debug, Clone, PartialEq)]
pub struct SeedEntry {
    pub entry: NewCatalogEntry,
    pub last_changed: &'static str,
}

#[allow(clippy::too_many_arguments)]
fn seed(
    name: &str,
    logo: &str,
    description: &str,
    category: &str,
    latest_tag: &str,
    downloads: u64,
    size: &str,
    is_free: bool,
    fips: bool,
    badge: Badge,
    last_changed: &'static str,
) -> SeedEntry {
    SeedEntry {
        entry: NewCatalogEntry {
            name: name.into(),
            logo: logo.into(),
            description: description.into(),
            category: category.into(),
            latest_tag: latest_tag.into(),
            downloads,
            size: size.into(),
            is_free,
            fips,
            badge,
        },
        last_changed,
    }
}

/// The images a fresh directory starts with, in display order.
pub fn default_images() -> Vec<SeedEntry> {
    vec![
        seed(
            "node",
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/nodejs/nodejs-original.svg",
            "Node.js JavaScript runtime built on Chrome's V8 JavaScript engine",
            "featured",
            "24.10.0",
            1_250_000,
            "45MB",
            true,
            false,
            Badge::Official,
            "11 hours ago",
        ),
        seed(
            "nginx",
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/nginx/nginx-original.svg",
            "High-performance HTTP server and reverse proxy",
            "featured",
            "mainline",
            2_340_000,
            "25MB",
            true,
            false,
            Badge::Community,
            "21 hours ago",
        ),
        seed(
            "postgres",
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/postgresql/postgresql-original.svg",
            "Powerful, open source object-relational database system",
            "featured",
            "18.0",
            1_890_000,
            "120MB",
            true,
            false,
            Badge::Verified,
            "18 hours ago",
        ),
        seed(
            "python",
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/python/python-original.svg",
            "Python is a programming language that lets you work quickly",
            "starter",
            "3.13.1",
            3_450_000,
            "50MB",
            true,
            false,
            Badge::Official,
            "15 hours ago",
        ),
        seed(
            "redis",
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/redis/redis-original.svg",
            "In-memory data structure store, used as database, cache",
            "featured",
            "7.4.2",
            1_670_000,
            "35MB",
            false,
            true,
            Badge::Verified,
            "12 hours ago",
        ),
        seed(
            "go",
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/go/go-original.svg",
            "Go is an open source programming language",
            "starter",
            "1.25.2",
            890_000,
            "340MB",
            true,
            false,
            Badge::Community,
            "18 hours ago",
        ),
        seed(
            "php",
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/php/php-original.svg",
            "Popular general-purpose scripting language",
            "application",
            "8.4.13",
            1_230_000,
            "78MB",
            true,
            false,
            Badge::Official,
            "23 hours ago",
        ),
        seed(
            "mysql",
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/mysql/mysql-original.svg",
            "MySQL is an open-source relational database",
            "base",
            "9.1.0",
            2_120_000,
            "145MB",
            false,
            false,
            Badge::Community,
            "16 hours ago",
        ),
        seed(
            "mongodb",
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/mongodb/mongodb-original.svg",
            "MongoDB is a source-available cross-platform document-oriented database",
            "base",
            "8.0.4",
            1_780_000,
            "420MB",
            false,
            true,
            Badge::Verified,
            "14 hours ago",
        ),
        seed(
            "tensorflow",
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/tensorflow/tensorflow-original.svg",
            "An end-to-end open source platform for machine learning",
            "ai",
            "2.18.0",
            560_000,
            "1.2GB",
            false,
            false,
            Badge::Verified,
            "20 hours ago",
        ),
        seed(
            "pytorch",
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/pytorch/pytorch-original.svg",
            "An open source machine learning framework",
            "ai",
            "2.6.1",
            480_000,
            "1.8GB",
            false,
            false,
            Badge::Verified,
            "22 hours ago",
        ),
        seed(
            "jenkins",
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/jenkins/jenkins-original.svg",
            "Open source automation server",
            "application",
            "2.485",
            1_340_000,
            "450MB",
            true,
            false,
            Badge::Community,
            "19 hours ago",
        ),
        seed(
            "elasticsearch",
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/elasticsearch/elasticsearch-original.svg",
            "Distributed, RESTful search and analytics engine",
            "application",
            "8.17.1",
            910_000,
            "620MB",
            false,
            false,
            Badge::Verified,
            "17 hours ago",
        ),
        seed(
            "kafka",
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/apachekafka/apachekafka-original.svg",
            "Distributed event streaming platform",
            "application",
            "3.9.0",
            720_000,
            "380MB",
            false,
            false,
            Badge::Community,
            "13 hours ago",
        ),
        seed(
            "docker",
            "https://cdn.jsdelivr.net/gh/devicons/devicon/icons/docker/docker-original.svg",
            "Docker container runtime",
            "base",
            "28.0.0",
            5_670_000,
            "95MB",
            true,
            false,
            Badge::Official,
            "9 hours ago",
        ),
    ]
}
