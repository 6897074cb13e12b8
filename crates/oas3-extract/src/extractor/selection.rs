use indexmap::{IndexMap, map::Entry};
use serde::Deserialize;
use serde_json::{Map, Value};
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

/// HTTP methods that can key an operation inside an OpenAPI path item.
///
/// Declaration order is the canonical order used when a path is selected
/// without naming its methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Deserialize)]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
#[serde(try_from = "String")]
pub enum HttpMethod {
  Get,
  Put,
  Post,
  Delete,
  Options,
  Head,
  Patch,
  Trace,
}

impl HttpMethod {
  /// The key under which the operation is stored in a path item.
  pub fn key(self) -> &'static str {
    match self {
      Self::Get => "get",
      Self::Put => "put",
      Self::Post => "post",
      Self::Delete => "delete",
      Self::Options => "options",
      Self::Head => "head",
      Self::Patch => "patch",
      Self::Trace => "trace",
    }
  }

  pub fn upper(self) -> String {
    self.key().to_ascii_uppercase()
  }

  /// Methods defined on `path_item`, in canonical order.
  pub fn defined_on(path_item: &Map<String, Value>) -> Vec<Self> {
    Self::iter().filter(|method| path_item.contains_key(method.key())).collect()
  }
}

impl TryFrom<String> for HttpMethod {
  type Error = String;

  fn try_from(value: String) -> Result<Self, Self::Error> {
    value
      .parse()
      .map_err(|_| format!("unknown HTTP method '{value}'"))
  }
}

/// Which methods of a selected path should be reported.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MethodSelection {
  /// Every method the path defines.
  All,
  Listed(Vec<HttpMethod>),
}

impl MethodSelection {
  /// The concrete methods to report for `path_item`. Listed methods are
  /// returned as given, including ones the path does not define.
  pub fn resolve(&self, path_item: &Map<String, Value>) -> Vec<HttpMethod> {
    match self {
      Self::All => HttpMethod::defined_on(path_item),
      Self::Listed(methods) => methods.clone(),
    }
  }

  fn from_methods(methods: Vec<HttpMethod>) -> Self {
    if methods.is_empty() {
      Self::All
    } else {
      let mut listed = Vec::with_capacity(methods.len());
      for method in methods {
        if !listed.contains(&method) {
          listed.push(method);
        }
      }
      Self::Listed(listed)
    }
  }

  fn merge(&mut self, other: Self) {
    match other {
      Self::All => *self = Self::All,
      Self::Listed(added) => {
        if let Self::Listed(existing) = self {
          for method in added {
            if !existing.contains(&method) {
              existing.push(method);
            }
          }
        }
      }
    }
  }
}

/// The caller's choice of paths, methods and seed schemas for one report.
///
/// Paths keep insertion order; that order is the order of the rendered
/// operations section.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Selection {
  paths: IndexMap<String, MethodSelection>,
  seed_schemas: Vec<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct SelectionFile {
  #[serde(default)]
  paths: IndexMap<String, Vec<HttpMethod>>,
  #[serde(default)]
  schemas: Vec<String>,
}

impl Selection {
  pub fn new() -> Self {
    Self::default()
  }

  /// Parses a JSON selection file of the form
  /// `{"paths": {"/pets": ["get"]}, "schemas": ["Error"]}`.
  pub fn from_json_slice(bytes: &[u8]) -> anyhow::Result<Self> {
    let deserializer = &mut serde_json::Deserializer::from_slice(bytes);
    let file: SelectionFile = serde_path_to_error::deserialize(deserializer)
      .map_err(|e| anyhow::anyhow!("Invalid selection at '{}': {}", e.path(), e.inner()))?;

    let mut selection = Self::new();
    for (path, methods) in file.paths {
      selection.add_path(path, methods);
    }
    for schema in file.schemas {
      selection.add_schema(schema);
    }
    Ok(selection)
  }

  /// Parses a command-line path entry, `PATH` or `PATH=get,post`.
  ///
  /// Only the last `=` can start a method list, and only when what follows
  /// it reads as one: every name is an HTTP method, or the names are comma
  /// separated. Otherwise the `=` belongs to the path, so `/a=b` selects the
  /// path `/a=b`.
  pub fn parse_path_entry(entry: &str) -> anyhow::Result<(String, Vec<HttpMethod>)> {
    let (path, methods) = match entry.rsplit_once('=') {
      Some((path, methods)) if methods.contains(',') || parse_methods(methods).is_ok() => (path, methods),
      _ => (entry, ""),
    };

    if path.is_empty() {
      anyhow::bail!("Invalid path entry '{entry}': expected PATH or PATH=METHOD[,METHOD...]");
    }

    let methods = parse_methods(methods)
      .map_err(|method| anyhow::anyhow!("Invalid path entry '{entry}': unknown HTTP method '{method}'"))?;

    Ok((path.to_string(), methods))
  }

  /// Adds a path to the selection. An empty method list selects every
  /// method the path defines. Selecting a path again merges the methods.
  pub fn add_path(&mut self, path: impl Into<String>, methods: impl IntoIterator<Item = HttpMethod>) {
    let methods = MethodSelection::from_methods(methods.into_iter().collect());
    self.insert_methods(path.into(), methods);
  }

  fn insert_methods(&mut self, path: String, methods: MethodSelection) {
    match self.paths.entry(path) {
      Entry::Occupied(mut entry) => entry.get_mut().merge(methods),
      Entry::Vacant(entry) => {
        entry.insert(methods);
      }
    }
  }

  pub fn add_schema(&mut self, name: impl Into<String>) {
    let name = name.into();
    if !self.seed_schemas.contains(&name) {
      self.seed_schemas.push(name);
    }
  }

  pub fn extend(&mut self, other: Self) {
    for (path, methods) in other.paths {
      self.insert_methods(path, methods);
    }
    for schema in other.seed_schemas {
      self.add_schema(schema);
    }
  }

  pub fn paths(&self) -> impl Iterator<Item = (&str, &MethodSelection)> {
    self.paths.iter().map(|(path, methods)| (path.as_str(), methods))
  }

  pub fn seed_schemas(&self) -> &[String] {
    &self.seed_schemas
  }

  pub fn path_count(&self) -> usize {
    self.paths.len()
  }

  pub fn has_paths(&self) -> bool {
    !self.paths.is_empty()
  }

  pub fn is_empty(&self) -> bool {
    self.paths.is_empty() && self.seed_schemas.is_empty()
  }
}

/// Parses a comma-separated method list. Blank names are skipped; the
/// first unknown name is returned as the error.
fn parse_methods(list: &str) -> Result<Vec<HttpMethod>, &str> {
  list
    .split(',')
    .map(str::trim)
    .filter(|method| !method.is_empty())
    .map(|method| method.parse::<HttpMethod>().map_err(|_| method))
    .collect()
}
