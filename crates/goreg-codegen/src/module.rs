//! Go module metadata: the `go.mod` module path, import paths of directories
//! inside the module, and the shared module download cache.

use std::env;
use std::ffi::OsString;
use std::fs;
use std::path::{Component, Path, PathBuf};

use tracing::debug;

use crate::error::{Error, Result};

/// Name of the module declaration file at the module root.
pub const GO_MOD: &str = "go.mod";

/// The module being scanned: where it lives on disk and its import-path prefix.
///
/// Created once per run and passed explicitly to every resolver and extractor call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleDescriptor {
    root: PathBuf,
    module: String,
}

impl ModuleDescriptor {
    pub fn new(root: impl Into<PathBuf>, module: impl Into<String>) -> Self {
        Self {
            root: root.into(),
            module: module.into(),
        }
    }

    /// Read `root/go.mod` and extract the module path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// # fn main() -> goreg_codegen::Result<()> {
    /// use goreg_codegen::ModuleDescriptor;
    ///
    /// let descriptor = ModuleDescriptor::load("/src/app")?;
    /// println!("{}", descriptor.module());
    /// # Ok(())
    /// # }
    /// ```
    pub fn load(root: impl AsRef<Path>) -> Result<Self> {
        let root = root.as_ref();
        let path = root.join(GO_MOD);
        let contents = fs::read_to_string(&path)
            .map_err(|err| Error::configuration(&path, format!("cannot read {GO_MOD}: {err}")))?;

        let descriptor = Self::parse(root, &contents)?;
        debug!(module = %descriptor.module, root = %root.display(), "loaded module descriptor");
        Ok(descriptor)
    }

    /// Build a descriptor from the text of a `go.mod` file.
    pub fn parse(root: impl Into<PathBuf>, contents: &str) -> Result<Self> {
        let root = root.into();
        match module_path(contents) {
            Some(module) if !module.is_empty() => Ok(Self::new(root, module)),
            Some(_) => Err(Error::configuration(
                root.join(GO_MOD),
                "malformed module path",
            )),
            None => Err(Error::configuration(
                root.join(GO_MOD),
                "no `module` directive found",
            )),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The module path, e.g. `example.com/app`.
    pub fn module(&self) -> &str {
        &self.module
    }

    /// If `import_path` belongs to this module, return the part after the
    /// module prefix without its leading `/` (empty for the module itself).
    ///
    /// The prefix must end on a path segment: `example.com/application` is
    /// not inside `example.com/app`.
    pub fn relative_import<'a>(&self, import_path: &'a str) -> Option<&'a str> {
        let rest = import_path.strip_prefix(self.module.as_str())?;
        if rest.is_empty() {
            Some(rest)
        } else {
            rest.strip_prefix('/')
        }
    }

    /// Directory on disk for a `/`-separated path relative to the module root.
    pub fn dir_for_relative(&self, relative: &str) -> PathBuf {
        relative
            .split('/')
            .filter(|segment| !segment.is_empty())
            .fold(self.root.clone(), |dir, segment| dir.join(segment))
    }

    /// Import path of a directory inside the module.
    ///
    /// Returns `None` when `dir` is not under the module root.
    pub fn import_path_for_dir(&self, dir: &Path) -> Option<String> {
        let relative = dir.strip_prefix(&self.root).ok()?;

        let mut import_path = self.module.clone();
        for component in relative.components() {
            match component {
                Component::Normal(segment) => {
                    import_path.push('/');
                    import_path.push_str(&segment.to_string_lossy());
                }
                Component::CurDir => {}
                _ => return None,
            }
        }
        Some(import_path)
    }

    /// Import path of the package a source file belongs to (its directory).
    pub fn import_path_for_file(&self, file: &Path) -> Option<String> {
        self.import_path_for_dir(file.parent()?)
    }
}

/// Extract the module path from the text of a `go.mod` file.
///
/// Follows the lenient line scan Go itself uses for this: the first
/// `module <path>` line wins, `//` comments are ignored, and a quoted path is
/// unquoted. Returns `None` if there is no module line, and `Some("")` if the
/// quoted path is malformed.
pub fn module_path(contents: &str) -> Option<String> {
    for line in contents.lines() {
        let line = match line.find("//") {
            Some(index) => &line[..index],
            None => line,
        };
        let Some(rest) = line.trim().strip_prefix("module") else {
            continue;
        };
        let path = rest.trim();
        // `modulefoo` is not a directive, and `module` alone has no path.
        if path.len() == rest.len() || path.is_empty() {
            continue;
        }

        if path.starts_with('"') || path.starts_with('`') {
            return Some(unquote(path).unwrap_or_default());
        }
        return Some(path.to_string());
    }
    None
}

fn unquote(quoted: &str) -> Option<String> {
    let quote = quoted.chars().next()?;
    let inner = quoted.strip_prefix(quote)?.strip_suffix(quote)?;
    if inner.contains(quote) || (quote == '"' && inner.contains('\\')) {
        return None;
    }
    Some(inner.to_string())
}

/// On-disk directory of `module@version` in the shared module cache.
///
/// The cache is `$GOMODCACHE`, or `$GOPATH/pkg/mod` (first `GOPATH` entry),
/// or `$HOME/go/pkg/mod` when neither is set.
pub fn module_cache_path(module: &str, version: &str) -> Result<PathBuf> {
    module_cache_path_with(module, version, |key| env::var_os(key))
}

/// Like [`module_cache_path`], with the environment supplied by `lookup`.
pub fn module_cache_path_with(
    module: &str,
    version: &str,
    lookup: impl Fn(&str) -> Option<OsString>,
) -> Result<PathBuf> {
    let cache = module_cache_dir(&lookup)?;
    let escaped_path = escape_path(module)?;
    let escaped_version = escape_version(version)
        .map_err(|message| Error::configuration(module, message.to_string()))?;

    let mut segments: Vec<&str> = escaped_path.split('/').collect();
    let last = segments.pop().unwrap_or_default();

    let mut dir = cache;
    for segment in segments {
        dir.push(segment);
    }
    dir.push(format!("{last}@{escaped_version}"));
    Ok(dir)
}

fn module_cache_dir(lookup: &impl Fn(&str) -> Option<OsString>) -> Result<PathBuf> {
    if let Some(cache) = lookup("GOMODCACHE").filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(cache));
    }

    if let Some(gopath) = lookup("GOPATH").filter(|value| !value.is_empty())
        && let Some(first) = env::split_paths(&gopath).next()
    {
        return Ok(first.join("pkg").join("mod"));
    }

    let home = lookup("HOME")
        .or_else(|| lookup("USERPROFILE"))
        .filter(|value| !value.is_empty())
        .ok_or_else(|| {
            Error::configuration(
                "GOMODCACHE",
                "neither GOMODCACHE, GOPATH nor HOME is set",
            )
        })?;
    Ok(PathBuf::from(home).join("go").join("pkg").join("mod"))
}

/// Escape a module path for use as a file system path: every upper-case
/// letter becomes `!` followed by its lower-case form.
pub fn escape_path(path: &str) -> Result<String> {
    if path.is_empty() {
        return Err(Error::configuration(path, "empty module path"));
    }
    if path
        .split('/')
        .any(|segment| segment.is_empty() || segment == "." || segment == "..")
    {
        return Err(Error::configuration(path, "malformed module path"));
    }
    escape(path).map_err(|message| Error::configuration(path, message.to_string()))
}

/// Escape a module version the same way as [`escape_path`].
pub fn escape_version(version: &str) -> std::result::Result<String, &'static str> {
    if version.is_empty() {
        return Err("empty module version");
    }
    if version.contains('/') {
        return Err("module version must not contain `/`");
    }
    escape(version)
}

fn escape(value: &str) -> std::result::Result<String, &'static str> {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        if c == '!' {
            return Err("`!` is not allowed in module paths or versions");
        }
        if c.is_ascii_uppercase() {
            escaped.push('!');
            escaped.push(c.to_ascii_lowercase());
        } else {
            escaped.push(c);
        }
    }
    Ok(escaped)
}
