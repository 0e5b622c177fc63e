//! Shared helpers for integration tests.

use anyhow::{bail, Result};
use focus_core::motion::PropertyState;
use focus_core::property::{NumberProperty, PropertyTransport, SwitchProperty};
use std::collections::HashMap;

/// Transport double that records the client-visible surface.
#[derive(Default)]
pub struct RecordingTransport {
    /// Currently defined property names.
    pub defined: Vec<String>,
    /// Last published state per property name.
    pub states: HashMap<String, PropertyState>,
    /// Last published first-member value per number property.
    pub values: HashMap<String, f64>,
    /// When set, every define/delete fails.
    pub fail: bool,
}

impl RecordingTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_defined(&self, name: &str) -> bool {
        self.defined.iter().any(|n| n == name)
    }

    pub fn state_of(&self, name: &str) -> Option<PropertyState> {
        self.states.get(name).copied()
    }
}

impl PropertyTransport for RecordingTransport {
    fn define_number(&mut self, property: &NumberProperty) -> Result<()> {
        if self.fail {
            bail!("transport unavailable");
        }
        self.defined.push(property.name.clone());
        self.states.insert(property.name.clone(), property.state);
        self.values
            .insert(property.name.clone(), property.first_value());
        Ok(())
    }

    fn define_switch(&mut self, property: &SwitchProperty) -> Result<()> {
        if self.fail {
            bail!("transport unavailable");
        }
        self.defined.push(property.name.clone());
        self.states.insert(property.name.clone(), property.state);
        Ok(())
    }

    fn update_number(&mut self, property: &NumberProperty) -> Result<()> {
        self.states.insert(property.name.clone(), property.state);
        self.values
            .insert(property.name.clone(), property.first_value());
        Ok(())
    }

    fn update_switch(&mut self, property: &SwitchProperty) -> Result<()> {
        self.states.insert(property.name.clone(), property.state);
        Ok(())
    }

    fn delete_property(&mut self, _device: &str, name: &str) -> Result<()> {
        if self.fail {
            bail!("transport unavailable");
        }
        self.defined.retain(|n| n != name);
        Ok(())
    }
}
