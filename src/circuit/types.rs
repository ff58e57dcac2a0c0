//! Core types for circuit representation.

use std::fmt;

use crate::error::{InloopError, Result};

/// A 1-based identifier for an electrical node.
/// Zero and negative values denote the ground reference, which is excluded
/// from the stamped system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub i32);

impl NodeId {
    /// The ground node.
    pub const GROUND: NodeId = NodeId(0);

    /// Check if this is the ground reference.
    pub fn is_ground(&self) -> bool {
        self.0 <= 0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_ground() {
            write!(f, "GND")
        } else {
            write!(f, "N{}", self.0)
        }
    }
}

/// Index for the auxiliary branch-current unknown of a voltage-type element,
/// assigned in element-list encounter order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BranchId(pub usize);

impl fmt::Display for BranchId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "I{}", self.0)
    }
}

/// The closed set of element kinds the stamper handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Conductive two-terminal element
    Resistor,
    /// Independent voltage source
    Voltage,
    /// Ideal short, stamped as a zero-volt source
    Wire,
}

impl ElementKind {
    /// Parse the kind tag used by the control-plane netlist format.
    /// Anything outside the closed set is rejected, so a bad netlist never
    /// reaches the stamp dispatch.
    pub fn parse(kind: &str) -> Result<Self> {
        match kind {
            "Resistor" => Ok(ElementKind::Resistor),
            "Voltage" => Ok(ElementKind::Voltage),
            "Wire" => Ok(ElementKind::Wire),
            other => Err(InloopError::unsupported_kind(other)),
        }
    }

    /// The netlist tag for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            ElementKind::Resistor => "Resistor",
            ElementKind::Voltage => "Voltage",
            ElementKind::Wire => "Wire",
        }
    }

    /// Voltage-type elements carry an auxiliary branch-current unknown.
    pub fn is_voltage_type(&self) -> bool {
        matches!(self, ElementKind::Voltage | ElementKind::Wire)
    }
}

impl fmt::Display for ElementKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
