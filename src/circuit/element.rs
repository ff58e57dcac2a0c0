//! Circuit elements and their netlist wire form.
//!
//! The control plane ships element lists as JSON objects of the form
//! `{"type": "Resistor", "value": 100.0, "node": {"1": 1, "2": 2}}`.
//! [`ElementDef`] is that raw form; [`CircuitElement`] is the typed element
//! the stamper consumes.

use serde::{Deserialize, Serialize};

use super::types::{BranchId, ElementKind, NodeId};
use crate::error::Result;

/// The two terminals of an element, keyed "1" and "2" on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct NodePair {
    #[serde(rename = "1")]
    pub n1: i32,
    #[serde(rename = "2")]
    pub n2: i32,
}

/// Raw netlist entry as received from the control plane.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ElementDef {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: f64,
    pub node: NodePair,
}

/// A typed circuit element ready for stamping.
///
/// `branch` is `None` until the element is registered into a
/// [`CircuitSystem`](super::CircuitSystem); voltage-type elements then
/// receive their auxiliary branch index in encounter order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircuitElement {
    pub kind: ElementKind,
    pub value: f64,
    pub nodes: [NodeId; 2],
    pub branch: Option<BranchId>,
}

impl CircuitElement {
    /// Create an element between two 1-based nodes (0 or negative = ground).
    pub fn new(kind: ElementKind, value: f64, n1: i32, n2: i32) -> Self {
        Self {
            kind,
            value,
            nodes: [NodeId(n1), NodeId(n2)],
            branch: None,
        }
    }

    /// Convert a raw netlist entry, rejecting kinds outside the closed set.
    pub fn from_def(def: &ElementDef) -> Result<Self> {
        let kind = ElementKind::parse(&def.kind)?;
        Ok(Self::new(kind, def.value, def.node.n1, def.node.n2))
    }

    /// Convert a whole netlist; the first bad entry aborts the conversion.
    pub fn from_defs(defs: &[ElementDef]) -> Result<Vec<Self>> {
        defs.iter().map(Self::from_def).collect()
    }

    /// The value this element drives onto its branch equation.
    /// A wire is an ideal short, stamped as a zero-volt source.
    pub fn source_value(&self) -> f64 {
        match self.kind {
            ElementKind::Wire => 0.0,
            _ => self.value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_def_typed() {
        let def = ElementDef {
            kind: "Voltage".to_string(),
            value: 10.0,
            node: NodePair { n1: 1, n2: 0 },
        };
        let element = CircuitElement::from_def(&def).unwrap();
        assert_eq!(element.kind, ElementKind::Voltage);
        assert_eq!(element.nodes, [NodeId(1), NodeId(0)]);
        assert_eq!(element.branch, None);
    }

    #[test]
    fn test_from_defs_aborts_on_unknown_kind() {
        let defs = vec![
            ElementDef {
                kind: "Resistor".to_string(),
                value: 100.0,
                node: NodePair { n1: 1, n2: 2 },
            },
            ElementDef {
                kind: "Inductor".to_string(),
                value: 0.1,
                node: NodePair { n1: 2, n2: 0 },
            },
        ];
        assert!(CircuitElement::from_defs(&defs).is_err());
    }

    #[test]
    fn test_netlist_json_shape() {
        let json = r#"[{"type": "Wire", "value": 0.0, "node": {"1": 2, "2": 0}}]"#;
        let defs: Vec<ElementDef> = serde_json::from_str(json).unwrap();
        assert_eq!(defs.len(), 1);
        assert_eq!(defs[0].node.n1, 2);
        assert_eq!(defs[0].node.n2, 0);
        let element = CircuitElement::from_def(&defs[0]).unwrap();
        assert_eq!(element.kind, ElementKind::Wire);
        assert_eq!(element.source_value(), 0.0);
    }

    #[test]
    fn test_wire_source_value_forced_zero() {
        let wire = CircuitElement::new(ElementKind::Wire, 42.0, 1, 2);
        assert_eq!(wire.source_value(), 0.0);
        let source = CircuitElement::new(ElementKind::Voltage, 42.0, 1, 2);
        assert_eq!(source.source_value(), 42.0);
    }
}
