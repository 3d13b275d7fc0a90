//! Maven repository metadata: turns `maven-metadata.xml` into the candidate
//! lists the version engine ranks.

pub mod metadata;
