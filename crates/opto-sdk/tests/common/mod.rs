//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use opto_sdk::{Group, Opto, OutputHandler, Value};
use std::sync::{Arc, Mutex};

/// Output handler recording `name=value` lines
pub struct Recorder {
    lines: Arc<Mutex<Vec<String>>>,
}

impl Recorder {
    pub fn new() -> Self {
        Self {
            lines: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn handler(&self) -> OutputHandler {
        let lines = self.lines.clone();
        Arc::new(move |name: &str, _argument: &Value, value: &Value| {
            lines.lock().unwrap().push(format!("{}={}", name, value));
        })
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().unwrap().clone()
    }
}

/// Load inline YAML that must describe a group
pub fn load_group(opto: &Opto, yaml: &str) -> Group {
    let built = opto.load(yaml.trim());
    assert!(built.is_ok(), "Failed to load group: {:?}", built.as_ref().err());
    built.unwrap().into_group().unwrap()
}
