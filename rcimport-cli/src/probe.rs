// Bundle inspection behind the rcimport subcommands

use rcimport::vfs::{self, path as bundle_path, EntryKind};
use rcimport::{Classification, Importer};
use serde::Serialize;
use std::collections::BTreeSet;
use std::io;

/// What the importer makes of one name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LocateReport {
    pub name: String,
    pub classification: Classification,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pathname: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

pub fn locate(importer: &Importer, names: &[String]) -> Vec<LocateReport> {
    names
        .iter()
        .map(|name| {
            let resolution = importer.classify(name);
            LocateReport {
                name: name.clone(),
                classification: resolution.classification(),
                pathname: resolution.pathname().map(str::to_string),
                filename: resolution.filename().map(str::to_string),
            }
        })
        .collect()
}

/// A unit the bundle layout defines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Unit {
    /// Dotted name the layout gives it
    pub name: String,
    pub kind: Classification,
    /// Base path (module path without extension, or the directory)
    pub pathname: String,
    pub depth: usize,
    /// Whether importing `name` through the importer reaches this unit
    pub reachable: bool,
}

/// List every module, package and namespace directory under the root.
///
/// Files that are not code files, and entries with a dot anywhere in their
/// path below the root (`odd.name.pyc`, `foo.bar/`), cannot be named and
/// are skipped.
pub fn units(importer: &Importer) -> io::Result<Vec<Unit>> {
    let options = importer.options();
    let suffix = format!(".{}", options.extension);
    let mut units = Vec::new();

    for entry in vfs::walk(importer.tree(), importer.root())? {
        let (pathname, kind) = match entry.kind {
            EntryKind::Dir => {
                let kind = if importer.tree().is_file(&options.package_file(&entry.path)) {
                    Classification::Package
                } else {
                    Classification::Namespace
                };
                (entry.path, kind)
            }
            EntryKind::File => match entry.path.strip_suffix(suffix.as_str()) {
                Some(base) => {
                    if bundle_path::file_name(base) == options.package_marker {
                        continue;
                    }
                    (base.to_string(), Classification::Module)
                }
                None => continue,
            },
        };

        let Some(relative) = pathname.strip_prefix(importer.root()) else {
            continue;
        };
        // A dot inside any path component can't be expressed in a module name
        if relative.contains('.') {
            continue;
        }
        let name = relative.replace(bundle_path::SEPARATOR, ".");

        let resolution = importer.classify(&name);
        let reachable =
            resolution.classification() == kind && resolution.pathname() == Some(pathname.as_str());

        units.push(Unit {
            name,
            kind,
            pathname,
            depth: entry.depth,
            reachable,
        });
    }

    Ok(units)
}

/// A module file hiding a same-named directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Shadow {
    /// The module file that wins
    pub module: String,
    /// The directory it hides
    pub hidden: String,
    pub hidden_kind: Classification,
}

pub fn shadows(importer: &Importer) -> io::Result<Vec<Shadow>> {
    let units = units(importer)?;
    let modules: BTreeSet<&str> = units
        .iter()
        .filter(|unit| unit.kind == Classification::Module)
        .map(|unit| unit.pathname.as_str())
        .collect();

    let extension = &importer.options().extension;
    Ok(units
        .iter()
        .filter(|unit| unit.kind != Classification::Module)
        .filter(|unit| modules.contains(unit.pathname.as_str()))
        .map(|unit| Shadow {
            module: format!("{}.{}", unit.pathname, extension),
            hidden: unit.pathname.clone(),
            hidden_kind: unit.kind,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rcimport::vfs::MemoryTree;
    use std::sync::Arc;

    fn importer() -> Importer {
        let mut tree = MemoryTree::new();
        for path in [
            "/bundle/app.pyc",
            "/bundle/pkg/__init__.pyc",
            "/bundle/pkg/sub.pyc",
            "/bundle/dual.pyc",
            "/bundle/dual/__init__.pyc",
            "/bundle/data.json",
            "/bundle/odd.name.pyc",
            "/bundle/foo.bar/__init__.pyc",
            "/bundle/foo.bar/inner.pyc",
        ] {
            tree.insert_file(path, b"code".to_vec()).expect("insert file");
        }
        tree.insert_dir("/bundle/ns").expect("insert dir");
        tree.insert_dir("/bundle/app").expect("insert dir");
        tree.insert_dir("/bundle/dotted.ns").expect("insert dir");

        Importer::new(Arc::new(tree), "/bundle").expect("root")
    }

    #[test]
    fn test_locate_reports() {
        let names = vec!["pkg".to_string(), "missing".to_string()];
        let reports = locate(&importer(), &names);

        assert_eq!(reports.len(), 2);
        assert_eq!(reports[0].classification, Classification::Package);
        assert_eq!(reports[0].pathname.as_deref(), Some("/bundle/pkg"));
        assert_eq!(
            reports[0].filename.as_deref(),
            Some("/bundle/pkg/__init__.pyc")
        );
        assert_eq!(reports[1].classification, Classification::NotFound);
        assert_eq!(reports[1].pathname, None);
    }

    #[test]
    fn test_locate_json_omits_missing_paths() {
        let reports = locate(&importer(), &["missing".to_string()]);
        let json = serde_json::to_value(&reports).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!([{ "name": "missing", "classification": "not_found" }])
        );
    }

    #[test]
    fn test_units_follow_layout() {
        let units = units(&importer()).expect("walk");
        let listed: Vec<(&str, Classification)> =
            units.iter().map(|u| (u.name.as_str(), u.kind)).collect();

        assert_eq!(
            listed,
            vec![
                ("app", Classification::Namespace),
                ("app", Classification::Module),
                ("dual", Classification::Package),
                ("dual", Classification::Module),
                ("ns", Classification::Namespace),
                ("pkg", Classification::Package),
                ("pkg.sub", Classification::Module),
            ]
        );
    }

    #[test]
    fn test_dotted_paths_are_not_units() {
        let units = units(&importer()).expect("walk");
        for unit in &units {
            assert!(
                !unit.pathname.contains("foo.bar") && !unit.pathname.contains("dotted.ns"),
                "{:?}",
                unit
            );
            assert!(!unit.name.starts_with("odd"), "{:?}", unit);
        }
    }

    #[test]
    fn test_nested_units_are_not_reachable_by_name() {
        let units = units(&importer()).expect("walk");
        let reachable = |name: &str, kind: Classification| {
            units
                .iter()
                .find(|u| u.name == name && u.kind == kind)
                .map(|u| u.reachable)
        };

        assert_eq!(reachable("pkg", Classification::Package), Some(true));
        assert_eq!(reachable("ns", Classification::Namespace), Some(true));
        // Looked up as /bundle/sub, which does not exist
        assert_eq!(reachable("pkg.sub", Classification::Module), Some(false));
        // Hidden behind the module file
        assert_eq!(reachable("dual", Classification::Package), Some(false));
    }

    #[test]
    fn test_shadows() {
        let found = shadows(&importer()).expect("walk");
        assert_eq!(
            found,
            vec![
                Shadow {
                    module: "/bundle/app.pyc".to_string(),
                    hidden: "/bundle/app".to_string(),
                    hidden_kind: Classification::Namespace,
                },
                Shadow {
                    module: "/bundle/dual.pyc".to_string(),
                    hidden: "/bundle/dual".to_string(),
                    hidden_kind: Classification::Package,
                },
            ]
        );
    }
}
