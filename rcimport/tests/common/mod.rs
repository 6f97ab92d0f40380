// Scripted host runtime for integration tests
//
// "Precompiled code" is a JSON script of operations, so tests can observe
// what a module saw while it executed.

#![allow(dead_code)]

use rcimport::vfs::{MemoryTree, ResourceTree};
use rcimport::{HostRuntime, ImportContext, ImportError, Importer, LegacyHost, Located};
use serde::Deserialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    /// Bind a string attribute
    Set { name: String, value: String },
    /// Copy the current `__path__` into another attribute
    CapturePath { into: String },
    /// Raise an exception
    Raise { message: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Script {
    pub ops: Vec<Op>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    Str(String),
    List(Vec<String>),
    /// `__loader__`, identified by the importer's root
    Loader(String),
    Unset,
}

#[derive(Debug, Default, Clone)]
pub struct ModuleRecord {
    pub attrs: BTreeMap<String, Value>,
    pub exec_count: usize,
}

impl ModuleRecord {
    pub fn attr(&self, name: &str) -> Option<&Value> {
        self.attrs.get(name)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FoundLoader {
    /// Another bundle importer took the name
    Bundle(String),
    /// A statically linked unit
    Static(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelegateHandle(pub usize);

#[derive(Debug)]
pub enum HostError {
    Import(ImportError),
    Unmarshal(String),
    Raised { module: String, message: String },
    Delegate(String),
}

impl From<ImportError> for HostError {
    fn from(err: ImportError) -> Self {
        HostError::Import(err)
    }
}

/// Minimal runtime: a module table, a list of path hooks for its generic
/// finder, and a table of statically linked units.
#[derive(Debug, Default)]
pub struct ScriptHost {
    pub modules: BTreeMap<String, ModuleRecord>,
    pub hooks: Vec<Importer>,
    pub statics: BTreeSet<String>,
    pub delegate_resolutions: usize,
    pub delegate_calls: Vec<String>,
    pub fail_delegate: bool,
}

impl ScriptHost {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_static(mut self, name: &str) -> Self {
        self.statics.insert(name.to_string());
        self
    }

    pub fn module(&self, name: &str) -> &ModuleRecord {
        self.modules.get(name).expect("module registered")
    }
}

impl HostRuntime for ScriptHost {
    type Code = Script;
    type Module = String;
    type Loader = FoundLoader;
    type Delegate = DelegateHandle;
    type Error = HostError;

    fn unmarshal_code(&mut self, data: &[u8]) -> Result<Script, HostError> {
        serde_json::from_slice(data).map_err(|e| HostError::Unmarshal(e.to_string()))
    }

    fn add_module(&mut self, fqmn: &str) -> Result<String, HostError> {
        let record = self.modules.entry(fqmn.to_string()).or_default();
        record
            .attrs
            .insert("__name__".to_string(), Value::Str(fqmn.to_string()));
        Ok(fqmn.to_string())
    }

    fn set_loader(&mut self, module: &String, importer: &Importer) -> Result<(), HostError> {
        self.modules
            .entry(module.clone())
            .or_default()
            .attrs
            .insert(
                "__loader__".to_string(),
                Value::Loader(importer.root().to_string()),
            );
        Ok(())
    }

    fn set_search_path(&mut self, module: &String, search_path: Vec<String>) -> Result<(), HostError> {
        self.modules
            .entry(module.clone())
            .or_default()
            .attrs
            .insert("__path__".to_string(), Value::List(search_path));
        Ok(())
    }

    fn exec_code_module(
        &mut self,
        fqmn: &str,
        code: Script,
        filename: &str,
    ) -> Result<String, HostError> {
        let record = self.modules.entry(fqmn.to_string()).or_default();
        record
            .attrs
            .insert("__file__".to_string(), Value::Str(filename.to_string()));
        record.exec_count += 1;

        for op in code.ops {
            match op {
                Op::Set { name, value } => {
                    record.attrs.insert(name, Value::Str(value));
                }
                Op::CapturePath { into } => {
                    let seen = record.attrs.get("__path__").cloned().unwrap_or(Value::Unset);
                    record.attrs.insert(into, seen);
                }
                Op::Raise { message } => {
                    return Err(HostError::Raised {
                        module: fqmn.to_string(),
                        message,
                    });
                }
            }
        }

        Ok(fqmn.to_string())
    }

    fn resolve_delegate(&mut self) -> Result<DelegateHandle, HostError> {
        self.delegate_resolutions += 1;
        Ok(DelegateHandle(self.delegate_resolutions))
    }

    fn call_delegate(
        &mut self,
        _delegate: &DelegateHandle,
        ctx: &mut ImportContext<Self>,
        fqmn: &str,
    ) -> Result<Option<FoundLoader>, HostError> {
        self.delegate_calls.push(fqmn.to_string());

        if self.fail_delegate {
            return Err(HostError::Delegate(format!("finder failed for {}", fqmn)));
        }

        // The generic finder walks every path hook, this importer included
        for hook in self.hooks.clone() {
            match hook.locate(self, ctx, fqmn)? {
                Located::Handled => return Ok(Some(FoundLoader::Bundle(hook.root().to_string()))),
                Located::Delegated(loader) => return Ok(Some(loader)),
                Located::Namespace { .. } | Located::NotHandled => {}
            }
        }

        if self.statics.contains(fqmn) {
            return Ok(Some(FoundLoader::Static(fqmn.to_string())));
        }

        Ok(None)
    }
}

impl LegacyHost for ScriptHost {
    fn is_builtin(&self, fqmn: &str) -> bool {
        self.statics.contains(fqmn)
    }

    fn init_builtin(&mut self, fqmn: &str) -> Result<Option<String>, HostError> {
        if !self.statics.contains(fqmn) {
            return Ok(None);
        }

        let record = self.modules.entry(fqmn.to_string()).or_default();
        record
            .attrs
            .insert("__builtin__".to_string(), Value::Str("yes".to_string()));
        Ok(Some(fqmn.to_string()))
    }
}

/// Encode a script as code-file bytes.
pub fn script(ops: serde_json::Value) -> Vec<u8> {
    serde_json::to_vec(&serde_json::json!({ "ops": ops })).expect("serializable script")
}

/// A script that just records that it ran.
pub fn marker(name: &str) -> Vec<u8> {
    script(serde_json::json!([{ "op": "set", "name": "marker", "value": name }]))
}

/// Build an in-memory bundle.
pub fn bundle(files: &[(&str, Vec<u8>)], dirs: &[&str]) -> Arc<dyn ResourceTree> {
    let mut tree = MemoryTree::new();
    for (path, data) in files {
        tree.insert_file(path, data.clone()).expect("insert file");
    }
    for dir in dirs {
        tree.insert_dir(dir).expect("insert dir");
    }
    Arc::new(tree)
}
