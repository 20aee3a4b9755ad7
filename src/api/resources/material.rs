//
//  gocd-client
//  api/resources/material.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! # Pipeline Materials
//!
//! A material is an input that triggers or feeds a pipeline. On the wire it
//! is a discriminated object:
//!
//! ```json
//! {"type": "git", "attributes": {"url": "https://github.com/gocd/gocd", "branch": "master"}}
//! ```
//!
//! [`MaterialAttributes`] is the closed set of variants. Every variant can be
//! projected to and ingested from a generic JSON map, which is also what
//! goes over the wire. Ingestion keeps only the keys a variant knows and
//! silently drops everything else.
//!
//! ## Example
//!
//! ```rust
//! use gocd_client::api::resources::{Material, MaterialType};
//!
//! let material: Material = serde_json::from_str(
//!     r#"{"type": "git", "attributes": {"url": "https://github.com/gocd/gocd", "foo": 1}}"#,
//! )?;
//! assert_eq!(material.material_type(), MaterialType::Git);
//! assert!(material.attributes.has_filter());
//! # Ok::<(), serde_json::Error>(())
//! ```

use std::fmt;
use std::str::FromStr;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

use super::ResourceError;

/// The `type` discriminator of a material.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MaterialType {
    Git,
    Svn,
    Hg,
    P4,
    Tfs,
    Dependency,
    Package,
    Plugin,
}

impl MaterialType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Git => "git",
            Self::Svn => "svn",
            Self::Hg => "hg",
            Self::P4 => "p4",
            Self::Tfs => "tfs",
            Self::Dependency => "dependency",
            Self::Package => "package",
            Self::Plugin => "plugin",
        }
    }
}

impl FromStr for MaterialType {
    type Err = ResourceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "git" => Ok(Self::Git),
            "svn" => Ok(Self::Svn),
            "hg" => Ok(Self::Hg),
            "p4" => Ok(Self::P4),
            "tfs" => Ok(Self::Tfs),
            "dependency" => Ok(Self::Dependency),
            "package" => Ok(Self::Package),
            "plugin" => Ok(Self::Plugin),
            "" => Err(ResourceError::MissingMaterialType),
            other => Err(ResourceError::UnknownMaterialType(other.to_string())),
        }
    }
}

impl fmt::Display for MaterialType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Paths whose changes should not trigger the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialFilter {
    #[serde(default)]
    pub ignore: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GitMaterial {
    pub name: String,
    pub url: String,
    pub branch: String,
    pub submodule_folder: String,
    pub shallow_clone: bool,
    pub destination: String,
    pub filter: Option<MaterialFilter>,
    pub invert_filter: bool,
    pub auto_update: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SvnMaterial {
    pub name: String,
    pub url: String,
    pub username: String,
    pub password: String,
    pub encrypted_password: String,
    pub check_externals: bool,
    pub destination: String,
    pub filter: Option<MaterialFilter>,
    pub invert_filter: bool,
    pub auto_update: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HgMaterial {
    pub name: String,
    pub url: String,
    pub destination: String,
    pub filter: Option<MaterialFilter>,
    pub invert_filter: bool,
    pub auto_update: bool,
}

/// Perforce.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct P4Material {
    pub name: String,
    pub port: String,
    pub use_tickets: bool,
    pub view: String,
    pub username: String,
    pub password: String,
    pub encrypted_password: String,
    pub destination: String,
    pub filter: Option<MaterialFilter>,
    pub invert_filter: bool,
    pub auto_update: bool,
}

/// Team Foundation Server.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TfsMaterial {
    pub name: String,
    pub url: String,
    pub project_path: String,
    pub domain: String,
    pub username: String,
    pub password: String,
    pub encrypted_password: String,
    pub destination: String,
    pub filter: Option<MaterialFilter>,
    pub invert_filter: bool,
    pub auto_update: bool,
}

/// An upstream pipeline stage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyMaterial {
    pub name: String,
    pub pipeline: String,
    pub stage: String,
    pub auto_update: bool,
}

/// A package repository material, referenced by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageMaterial {
    pub reference: String,
}

/// An SCM provided by a plugin, referenced by id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PluginMaterial {
    pub reference: String,
    pub destination: String,
    pub filter: Option<MaterialFilter>,
    pub invert_filter: bool,
}

/// Variant-specific material attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MaterialAttributes {
    Git(GitMaterial),
    Svn(SvnMaterial),
    Hg(HgMaterial),
    P4(P4Material),
    Tfs(TfsMaterial),
    Dependency(DependencyMaterial),
    Package(PackageMaterial),
    Plugin(PluginMaterial),
}

/// Typed reads out of a generic map. Missing or mistyped keys read as empty.
struct GenericReader<'a>(&'a Map<String, Value>);

impl GenericReader<'_> {
    fn string(&self, key: &str) -> String {
        self.0
            .get(key)
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string()
    }

    fn boolean(&self, key: &str) -> bool {
        self.0.get(key).and_then(Value::as_bool).unwrap_or(false)
    }

    fn filter(&self) -> Option<MaterialFilter> {
        let ignore = self.0.get("filter")?.get("ignore")?.as_array()?;
        Some(MaterialFilter {
            ignore: ignore
                .iter()
                .filter_map(|v| v.as_str().map(str::to_string))
                .collect(),
        })
    }
}

/// Builds a generic map: non-empty strings, every boolean, non-empty filters.
#[derive(Default)]
struct GenericWriter(Map<String, Value>);

impl GenericWriter {
    fn string(mut self, key: &str, value: &str) -> Self {
        if !value.is_empty() {
            self.0.insert(key.to_string(), Value::String(value.to_string()));
        }
        self
    }

    fn boolean(mut self, key: &str, value: bool) -> Self {
        self.0.insert(key.to_string(), Value::Bool(value));
        self
    }

    fn filter(mut self, filter: Option<&MaterialFilter>) -> Self {
        if let Some(filter) = filter.filter(|f| !f.ignore.is_empty()) {
            let ignore = filter.ignore.iter().cloned().map(Value::String).collect();
            let mut inner = Map::new();
            inner.insert("ignore".to_string(), Value::Array(ignore));
            self.0.insert("filter".to_string(), Value::Object(inner));
        }
        self
    }

    fn finish(self) -> Map<String, Value> {
        self.0
    }
}

impl MaterialAttributes {
    /// The default attributes for a variant.
    pub fn empty(kind: MaterialType) -> Self {
        Self::from_generic(kind, &Map::new())
    }

    pub fn material_type(&self) -> MaterialType {
        match self {
            Self::Git(_) => MaterialType::Git,
            Self::Svn(_) => MaterialType::Svn,
            Self::Hg(_) => MaterialType::Hg,
            Self::P4(_) => MaterialType::P4,
            Self::Tfs(_) => MaterialType::Tfs,
            Self::Dependency(_) => MaterialType::Dependency,
            Self::Package(_) => MaterialType::Package,
            Self::Plugin(_) => MaterialType::Plugin,
        }
    }

    /// Whether the variant supports an ignore filter at all.
    pub fn has_filter(&self) -> bool {
        !matches!(self, Self::Dependency(_) | Self::Package(_))
    }

    /// The filter, when the variant supports one and it is set.
    pub fn filter(&self) -> Option<&MaterialFilter> {
        match self {
            Self::Git(m) => m.filter.as_ref(),
            Self::Svn(m) => m.filter.as_ref(),
            Self::Hg(m) => m.filter.as_ref(),
            Self::P4(m) => m.filter.as_ref(),
            Self::Tfs(m) => m.filter.as_ref(),
            Self::Plugin(m) => m.filter.as_ref(),
            Self::Dependency(_) | Self::Package(_) => None,
        }
    }

    /// Ingests a generic map into the variant for `kind`.
    ///
    /// Unknown keys and keys holding the wrong JSON type are ignored.
    pub fn from_generic(kind: MaterialType, map: &Map<String, Value>) -> Self {
        let r = GenericReader(map);
        match kind {
            MaterialType::Git => Self::Git(GitMaterial {
                name: r.string("name"),
                url: r.string("url"),
                branch: r.string("branch"),
                submodule_folder: r.string("submodule_folder"),
                shallow_clone: r.boolean("shallow_clone"),
                destination: r.string("destination"),
                filter: r.filter(),
                invert_filter: r.boolean("invert_filter"),
                auto_update: r.boolean("auto_update"),
            }),
            MaterialType::Svn => Self::Svn(SvnMaterial {
                name: r.string("name"),
                url: r.string("url"),
                username: r.string("username"),
                password: r.string("password"),
                encrypted_password: r.string("encrypted_password"),
                check_externals: r.boolean("check_externals"),
                destination: r.string("destination"),
                filter: r.filter(),
                invert_filter: r.boolean("invert_filter"),
                auto_update: r.boolean("auto_update"),
            }),
            MaterialType::Hg => Self::Hg(HgMaterial {
                name: r.string("name"),
                url: r.string("url"),
                destination: r.string("destination"),
                filter: r.filter(),
                invert_filter: r.boolean("invert_filter"),
                auto_update: r.boolean("auto_update"),
            }),
            MaterialType::P4 => Self::P4(P4Material {
                name: r.string("name"),
                port: r.string("port"),
                use_tickets: r.boolean("use_tickets"),
                view: r.string("view"),
                username: r.string("username"),
                password: r.string("password"),
                encrypted_password: r.string("encrypted_password"),
                destination: r.string("destination"),
                filter: r.filter(),
                invert_filter: r.boolean("invert_filter"),
                auto_update: r.boolean("auto_update"),
            }),
            MaterialType::Tfs => Self::Tfs(TfsMaterial {
                name: r.string("name"),
                url: r.string("url"),
                project_path: r.string("project_path"),
                domain: r.string("domain"),
                username: r.string("username"),
                password: r.string("password"),
                encrypted_password: r.string("encrypted_password"),
                destination: r.string("destination"),
                filter: r.filter(),
                invert_filter: r.boolean("invert_filter"),
                auto_update: r.boolean("auto_update"),
            }),
            MaterialType::Dependency => Self::Dependency(DependencyMaterial {
                name: r.string("name"),
                pipeline: r.string("pipeline"),
                stage: r.string("stage"),
                auto_update: r.boolean("auto_update"),
            }),
            MaterialType::Package => Self::Package(PackageMaterial {
                reference: r.string("ref"),
            }),
            MaterialType::Plugin => Self::Plugin(PluginMaterial {
                reference: r.string("ref"),
                destination: r.string("destination"),
                filter: r.filter(),
                invert_filter: r.boolean("invert_filter"),
            }),
        }
    }

    /// Projects the variant onto a generic map, the inverse of
    /// [`MaterialAttributes::from_generic`].
    pub fn generate_generic(&self) -> Map<String, Value> {
        let w = GenericWriter::default();
        match self {
            Self::Git(m) => w
                .string("name", &m.name)
                .string("url", &m.url)
                .boolean("auto_update", m.auto_update)
                .string("branch", &m.branch)
                .string("submodule_folder", &m.submodule_folder)
                .string("destination", &m.destination)
                .boolean("shallow_clone", m.shallow_clone)
                .filter(m.filter.as_ref())
                .boolean("invert_filter", m.invert_filter),
            Self::Svn(m) => w
                .string("name", &m.name)
                .string("url", &m.url)
                .boolean("auto_update", m.auto_update)
                .string("username", &m.username)
                .string("password", &m.password)
                .string("encrypted_password", &m.encrypted_password)
                .boolean("check_externals", m.check_externals)
                .string("destination", &m.destination)
                .filter(m.filter.as_ref())
                .boolean("invert_filter", m.invert_filter),
            Self::Hg(m) => w
                .string("name", &m.name)
                .string("url", &m.url)
                .boolean("auto_update", m.auto_update)
                .string("destination", &m.destination)
                .filter(m.filter.as_ref())
                .boolean("invert_filter", m.invert_filter),
            Self::P4(m) => w
                .string("name", &m.name)
                .string("port", &m.port)
                .boolean("use_tickets", m.use_tickets)
                .string("view", &m.view)
                .string("username", &m.username)
                .string("password", &m.password)
                .string("encrypted_password", &m.encrypted_password)
                .string("destination", &m.destination)
                .filter(m.filter.as_ref())
                .boolean("invert_filter", m.invert_filter)
                .boolean("auto_update", m.auto_update),
            Self::Tfs(m) => w
                .string("name", &m.name)
                .string("url", &m.url)
                .string("project_path", &m.project_path)
                .string("domain", &m.domain)
                .string("username", &m.username)
                .string("password", &m.password)
                .string("encrypted_password", &m.encrypted_password)
                .string("destination", &m.destination)
                .filter(m.filter.as_ref())
                .boolean("invert_filter", m.invert_filter)
                .boolean("auto_update", m.auto_update),
            Self::Dependency(m) => w
                .string("name", &m.name)
                .string("pipeline", &m.pipeline)
                .string("stage", &m.stage)
                .boolean("auto_update", m.auto_update),
            Self::Package(m) => w.string("ref", &m.reference),
            Self::Plugin(m) => w
                .string("ref", &m.reference)
                .string("destination", &m.destination)
                .filter(m.filter.as_ref())
                .boolean("invert_filter", m.invert_filter),
        }
        .finish()
    }

    /// Compares the identity fields of two same-variant materials.
    ///
    /// An empty git branch means `master`. Names are not part of a
    /// material's identity.
    ///
    /// # Errors
    ///
    /// [`ResourceError::MaterialTypeMismatch`] when the variants differ.
    pub fn equal(&self, other: &MaterialAttributes) -> Result<bool, ResourceError> {
        let same = match (self, other) {
            (Self::Git(a), Self::Git(b)) => {
                a.url == b.url && git_branch(&a.branch) == git_branch(&b.branch)
            }
            (Self::Svn(a), Self::Svn(b)) => a.url == b.url,
            (Self::Hg(a), Self::Hg(b)) => a.url == b.url,
            (Self::P4(a), Self::P4(b)) => a.port == b.port && a.view == b.view,
            (Self::Tfs(a), Self::Tfs(b)) => a.url == b.url && a.project_path == b.project_path,
            (Self::Dependency(a), Self::Dependency(b)) => {
                a.pipeline == b.pipeline && a.stage == b.stage
            }
            (Self::Package(a), Self::Package(b)) => a.reference == b.reference,
            (Self::Plugin(a), Self::Plugin(b)) => a.reference == b.reference,
            _ => return Err(ResourceError::MaterialTypeMismatch),
        };
        Ok(same)
    }
}

const DEFAULT_GIT_BRANCH: &str = "master";

fn git_branch(branch: &str) -> &str {
    if branch.is_empty() {
        DEFAULT_GIT_BRANCH
    } else {
        branch
    }
}

/// A pipeline material: the discriminator plus its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub attributes: MaterialAttributes,
}

impl Material {
    pub fn new(attributes: MaterialAttributes) -> Self {
        Self { attributes }
    }

    pub fn material_type(&self) -> MaterialType {
        self.attributes.material_type()
    }

    pub fn equal(&self, other: &Material) -> Result<bool, ResourceError> {
        self.attributes.equal(&other.attributes)
    }
}

impl From<GitMaterial> for Material {
    fn from(m: GitMaterial) -> Self {
        Self::new(MaterialAttributes::Git(m))
    }
}

impl From<DependencyMaterial> for Material {
    fn from(m: DependencyMaterial) -> Self {
        Self::new(MaterialAttributes::Dependency(m))
    }
}

#[derive(Serialize)]
struct MaterialOut<'a> {
    #[serde(rename = "type")]
    kind: &'a str,
    attributes: Map<String, Value>,
}

#[derive(Deserialize)]
struct MaterialIn {
    #[serde(rename = "type", default)]
    kind: String,
    #[serde(default)]
    attributes: Option<Map<String, Value>>,
}

impl Serialize for Material {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        MaterialOut {
            kind: self.material_type().as_str(),
            attributes: self.attributes.generate_generic(),
        }
        .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Material {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = MaterialIn::deserialize(deserializer)?;
        let kind = raw.kind.parse::<MaterialType>().map_err(D::Error::custom)?;
        let attributes = raw.attributes.unwrap_or_default();
        Ok(Self::new(MaterialAttributes::from_generic(kind, &attributes)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn map(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(m) => m,
            _ => panic!("expected an object"),
        }
    }

    fn git(url: &str, branch: &str) -> MaterialAttributes {
        MaterialAttributes::Git(GitMaterial {
            url: url.into(),
            branch: branch.into(),
            ..Default::default()
        })
    }

    #[test]
    fn test_unmarshal_each_type() {
        for kind in [
            MaterialType::Git,
            MaterialType::Svn,
            MaterialType::Hg,
            MaterialType::P4,
            MaterialType::Tfs,
            MaterialType::Dependency,
            MaterialType::Package,
            MaterialType::Plugin,
        ] {
            let source = format!(r#"{{"type": "{kind}"}}"#);
            let material: Material = serde_json::from_str(&source).unwrap();
            assert_eq!(material.material_type(), kind);
            assert_eq!(material.attributes, MaterialAttributes::empty(kind));
        }
    }

    #[test]
    fn test_unmarshal_unknown_type() {
        let err = serde_json::from_str::<Material>(r#"{"type": "cvs"}"#).unwrap_err();
        assert!(err.to_string().contains("unexpected material type 'cvs'"));

        let err = serde_json::from_str::<Material>(r#"{"attributes": {}}"#).unwrap_err();
        assert!(err.to_string().contains("missing material type"));
    }

    #[test]
    fn test_ingest_git_ignores_unknown_keys() {
        let attributes = MaterialAttributes::from_generic(
            MaterialType::Git,
            &map(json!({
                "name": "test-name",
                "url": "test-url",
                "auto_update": true,
                "branch": "test-branch",
                "submodule_folder": "test-submodule_folder",
                "destination": "test-destination",
                "shallow_clone": true,
                "invert_filter": true,
                "filter": {"ignore": ["one", "two"]},
                "foo": null
            })),
        );

        assert_eq!(
            attributes,
            MaterialAttributes::Git(GitMaterial {
                name: "test-name".into(),
                url: "test-url".into(),
                branch: "test-branch".into(),
                submodule_folder: "test-submodule_folder".into(),
                shallow_clone: true,
                destination: "test-destination".into(),
                filter: Some(MaterialFilter {
                    ignore: vec!["one".into(), "two".into()]
                }),
                invert_filter: true,
                auto_update: true,
            })
        );
    }

    #[test]
    fn test_ingest_each_variant() {
        let p4 = MaterialAttributes::from_generic(
            MaterialType::P4,
            &map(json!({
                "name": "p4", "port": "localhost:1666", "use_tickets": true, "view": "//depot/...",
                "username": "u", "password": "p", "encrypted_password": "e",
                "destination": "d", "filter": {"ignore": ["x"]}, "invert_filter": true, "auto_update": true
            })),
        );
        let MaterialAttributes::P4(p4) = p4 else { panic!("expected p4") };
        assert_eq!(p4.port, "localhost:1666");
        assert!(p4.use_tickets);
        assert_eq!(p4.encrypted_password, "e");

        let tfs = MaterialAttributes::from_generic(
            MaterialType::Tfs,
            &map(json!({"url": "https://tfs.example.com", "project_path": "$/proj", "domain": "corp"})),
        );
        let MaterialAttributes::Tfs(tfs) = tfs else { panic!("expected tfs") };
        assert_eq!(tfs.project_path, "$/proj");
        assert_eq!(tfs.domain, "corp");

        let dep = MaterialAttributes::from_generic(
            MaterialType::Dependency,
            &map(json!({"name": "up", "pipeline": "upstream", "stage": "build", "auto_update": true, "foo": "bar"})),
        );
        assert_eq!(
            dep,
            MaterialAttributes::Dependency(DependencyMaterial {
                name: "up".into(),
                pipeline: "upstream".into(),
                stage: "build".into(),
                auto_update: true,
            })
        );

        let pkg = MaterialAttributes::from_generic(MaterialType::Package, &map(json!({"ref": "pkg-id"})));
        assert_eq!(
            pkg,
            MaterialAttributes::Package(PackageMaterial {
                reference: "pkg-id".into()
            })
        );

        let plugin = MaterialAttributes::from_generic(
            MaterialType::Plugin,
            &map(json!({"ref": "scm-id", "destination": "d", "filter": {"ignore": ["a"]}, "invert_filter": true})),
        );
        let MaterialAttributes::Plugin(plugin) = plugin else { panic!("expected plugin") };
        assert_eq!(plugin.reference, "scm-id");
        assert_eq!(plugin.filter.unwrap().ignore, vec!["a".to_string()]);
    }

    #[test]
    fn test_ingest_mistyped_keys() {
        let attributes = MaterialAttributes::from_generic(
            MaterialType::Hg,
            &map(json!({"url": 42, "auto_update": "yes", "filter": "nope"})),
        );
        assert_eq!(attributes, MaterialAttributes::empty(MaterialType::Hg));
    }

    #[test]
    fn test_generate_generic_git() {
        let attributes = MaterialAttributes::Git(GitMaterial {
            name: "mock-name".into(),
            url: "mock-url".into(),
            auto_update: true,
            branch: "mock-branch".into(),
            submodule_folder: "mock-folder".into(),
            destination: "mock-destination".into(),
            shallow_clone: true,
            invert_filter: true,
            filter: None,
        });

        assert_eq!(
            Value::Object(attributes.generate_generic()),
            json!({
                "name": "mock-name",
                "url": "mock-url",
                "auto_update": true,
                "branch": "mock-branch",
                "submodule_folder": "mock-folder",
                "destination": "mock-destination",
                "shallow_clone": true,
                "invert_filter": true
            })
        );
    }

    #[test]
    fn test_generate_generic_svn_with_filter() {
        let attributes = MaterialAttributes::Svn(SvnMaterial {
            name: "mock-name".into(),
            url: "mock-url".into(),
            auto_update: true,
            username: "mock-username".into(),
            password: "mock-password".into(),
            encrypted_password: "mock-encrypted-password".into(),
            check_externals: true,
            destination: "mock-destination".into(),
            filter: Some(MaterialFilter {
                ignore: vec!["mock-ignore".into()],
            }),
            invert_filter: true,
        });

        assert_eq!(
            Value::Object(attributes.generate_generic()),
            json!({
                "name": "mock-name",
                "url": "mock-url",
                "auto_update": true,
                "username": "mock-username",
                "password": "mock-password",
                "encrypted_password": "mock-encrypted-password",
                "check_externals": true,
                "destination": "mock-destination",
                "filter": {"ignore": ["mock-ignore"]},
                "invert_filter": true
            })
        );
    }

    fn populated() -> Vec<MaterialAttributes> {
        let filter = || {
            Some(MaterialFilter {
                ignore: vec!["docs/**".into(), "*.md".into()],
            })
        };
        vec![
            MaterialAttributes::Git(GitMaterial {
                name: "source".into(),
                url: "https://github.com/gocd/gocd".into(),
                branch: "release-19.1".into(),
                submodule_folder: "vendor".into(),
                shallow_clone: true,
                destination: "src".into(),
                filter: filter(),
                invert_filter: true,
                auto_update: true,
            }),
            MaterialAttributes::Svn(SvnMaterial {
                name: "svn".into(),
                url: "svn://svn.example.com/trunk".into(),
                username: "builder".into(),
                password: "secret".into(),
                encrypted_password: "AES:abc".into(),
                check_externals: true,
                destination: "svn".into(),
                filter: filter(),
                invert_filter: true,
                auto_update: true,
            }),
            MaterialAttributes::Hg(HgMaterial {
                name: "mock-name".into(),
                url: "mock-url".into(),
                destination: "mock-destination".into(),
                filter: filter(),
                invert_filter: true,
                auto_update: true,
            }),
            MaterialAttributes::P4(P4Material {
                name: "p4".into(),
                port: "p4.example.com:1666".into(),
                use_tickets: true,
                view: "//depot/... //ws/...".into(),
                username: "builder".into(),
                password: "secret".into(),
                encrypted_password: "AES:def".into(),
                destination: "p4".into(),
                filter: filter(),
                invert_filter: true,
                auto_update: true,
            }),
            MaterialAttributes::Tfs(TfsMaterial {
                name: "tfs".into(),
                url: "https://tfs.example.com/tfs".into(),
                project_path: "$/project".into(),
                domain: "CORP".into(),
                username: "builder".into(),
                password: "secret".into(),
                encrypted_password: "AES:ghi".into(),
                destination: "tfs".into(),
                filter: filter(),
                invert_filter: true,
                auto_update: true,
            }),
            MaterialAttributes::Dependency(DependencyMaterial {
                name: "upstream".into(),
                pipeline: "build".into(),
                stage: "package".into(),
                auto_update: true,
            }),
            MaterialAttributes::Package(PackageMaterial {
                reference: "e289f497-057b-46bc-bb69-8043454f5c1b".into(),
            }),
            MaterialAttributes::Plugin(PluginMaterial {
                reference: "scm-plugin-id".into(),
                destination: "scm".into(),
                filter: filter(),
                invert_filter: true,
            }),
        ]
    }

    #[test]
    fn test_generic_round_trip_every_variant() {
        let materials = populated();
        assert_eq!(materials.len(), 8);

        for attributes in materials {
            let kind = attributes.material_type();
            let mut generic = attributes.generate_generic();
            generic.insert("unexpected_key".into(), json!("ignored"));
            generic.insert("another".into(), json!({"nested": [1, 2]}));

            assert_eq!(
                MaterialAttributes::from_generic(kind, &generic),
                attributes,
                "{kind}"
            );
        }
    }

    #[test]
    fn test_empty_filter_is_omitted() {
        let attributes = MaterialAttributes::Git(GitMaterial {
            filter: Some(MaterialFilter::default()),
            ..Default::default()
        });
        assert!(!attributes.generate_generic().contains_key("filter"));
    }

    #[test]
    fn test_has_filter() {
        for (kind, filterable) in [
            (MaterialType::Git, true),
            (MaterialType::Svn, true),
            (MaterialType::Hg, true),
            (MaterialType::P4, true),
            (MaterialType::Tfs, true),
            (MaterialType::Dependency, false),
            (MaterialType::Package, false),
            (MaterialType::Plugin, true),
        ] {
            let attributes = MaterialAttributes::empty(kind);
            assert_eq!(attributes.has_filter(), filterable, "{kind}");
            if !filterable {
                assert!(attributes.filter().is_none());
            }
        }
    }

    #[test]
    fn test_equality_ignores_name() {
        let a = Material::from(GitMaterial {
            url: "https://github.com/gocd/gocd".into(),
            ..Default::default()
        });
        let b = Material::from(GitMaterial {
            name: "gocd-src".into(),
            url: "https://github.com/gocd/gocd".into(),
            ..Default::default()
        });
        assert_eq!(a.equal(&b), Ok(true));
    }

    #[test]
    fn test_equality_same_variant() {
        for kind in [
            MaterialType::Git,
            MaterialType::Svn,
            MaterialType::Hg,
            MaterialType::P4,
            MaterialType::Tfs,
            MaterialType::Dependency,
            MaterialType::Package,
            MaterialType::Plugin,
        ] {
            let a = MaterialAttributes::empty(kind);
            assert_eq!(a.equal(&a.clone()), Ok(true), "{kind}");
        }
        assert_eq!(git("", "master").equal(&git("", "master")), Ok(true));
    }

    #[test]
    fn test_inequality() {
        let mismatched = [
            (MaterialType::Git, MaterialType::P4),
            (MaterialType::Svn, MaterialType::Git),
            (MaterialType::Hg, MaterialType::Git),
            (MaterialType::P4, MaterialType::Git),
            (MaterialType::Tfs, MaterialType::Git),
            (MaterialType::Dependency, MaterialType::Git),
            (MaterialType::Package, MaterialType::Git),
            (MaterialType::Plugin, MaterialType::Git),
        ];
        for (a, b) in mismatched {
            let err = MaterialAttributes::empty(a)
                .equal(&MaterialAttributes::empty(b))
                .unwrap_err();
            assert_eq!(err.to_string(), "can only compare with same material type");
        }

        let url = "https://github.com/gocd/gocd";
        assert_eq!(git("", "").equal(&git(url, "")), Ok(false));
        assert_eq!(git(url, "").equal(&git(url, "feature/branch")), Ok(false));
        assert_eq!(git(url, "").equal(&git(url, "master")), Ok(true));
        assert_eq!(git(url, "master").equal(&git(url, "")), Ok(true));
        assert_eq!(git(url, "feature/branch").equal(&git(url, "")), Ok(false));
    }

    #[test]
    fn test_serialize_wire_shape() {
        let material = Material::from(DependencyMaterial {
            name: "upstream".into(),
            pipeline: "build".into(),
            stage: "package".into(),
            auto_update: false,
        });
        assert_eq!(
            serde_json::to_value(&material).unwrap(),
            json!({
                "type": "dependency",
                "attributes": {"name": "upstream", "pipeline": "build", "stage": "package", "auto_update": false}
            })
        );
    }
}
