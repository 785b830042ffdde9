//! Component kinds and their fixed port cardinality.

use core::fmt;
use core::str::FromStr;

use crate::error::LfError;

/// The closed set of component kinds a circuit can contain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "UPPERCASE"))]
pub enum ComponentKind {
    /// Externally driven source; its single output is toggled by the user.
    Input,
    /// Display sink; mirrors its single input.
    Output,
    And,
    Or,
    Not,
    Nand,
    Nor,
    Xor,
    Xnor,
}

impl ComponentKind {
    /// Every kind, in declaration order.
    pub const ALL: [ComponentKind; 9] = [
        ComponentKind::Input,
        ComponentKind::Output,
        ComponentKind::And,
        ComponentKind::Or,
        ComponentKind::Not,
        ComponentKind::Nand,
        ComponentKind::Nor,
        ComponentKind::Xor,
        ComponentKind::Xnor,
    ];

    /// Kinds whose output is computed from their inputs.
    pub const GATES: [ComponentKind; 7] = [
        ComponentKind::And,
        ComponentKind::Or,
        ComponentKind::Not,
        ComponentKind::Nand,
        ComponentKind::Nor,
        ComponentKind::Xor,
        ComponentKind::Xnor,
    ];

    /// Number of input ports created for this kind.
    pub fn input_count(self) -> usize {
        match self {
            ComponentKind::Input => 0,
            ComponentKind::Output | ComponentKind::Not => 1,
            _ => 2,
        }
    }

    /// Number of output ports created for this kind.
    pub fn output_count(self) -> usize {
        match self {
            ComponentKind::Output => 0,
            _ => 1,
        }
    }

    /// True for kinds evaluated as boolean functions.
    pub fn is_gate(self) -> bool {
        !matches!(self, ComponentKind::Input | ComponentKind::Output)
    }

    /// Canonical upper-case name (`"AND"`, `"INPUT"`, ...).
    pub fn name(self) -> &'static str {
        match self {
            ComponentKind::Input => "INPUT",
            ComponentKind::Output => "OUTPUT",
            ComponentKind::And => "AND",
            ComponentKind::Or => "OR",
            ComponentKind::Not => "NOT",
            ComponentKind::Nand => "NAND",
            ComponentKind::Nor => "NOR",
            ComponentKind::Xor => "XOR",
            ComponentKind::Xnor => "XNOR",
        }
    }
}

impl fmt::Display for ComponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ComponentKind {
    type Err = LfError;

    /// Case-insensitive parse of the canonical names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ComponentKind::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| LfError::UnknownKind { name: s.to_string() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cardinality_matches_kind() {
        assert_eq!(ComponentKind::Input.input_count(), 0);
        assert_eq!(ComponentKind::Input.output_count(), 1);
        assert_eq!(ComponentKind::Output.input_count(), 1);
        assert_eq!(ComponentKind::Output.output_count(), 0);
        assert_eq!(ComponentKind::Not.input_count(), 1);
        assert_eq!(ComponentKind::Not.output_count(), 1);
        for kind in [
            ComponentKind::And,
            ComponentKind::Or,
            ComponentKind::Nand,
            ComponentKind::Nor,
            ComponentKind::Xor,
            ComponentKind::Xnor,
        ] {
            assert_eq!(kind.input_count(), 2, "{kind}");
            assert_eq!(kind.output_count(), 1, "{kind}");
        }
    }

    #[test]
    fn gates_exclude_io() {
        assert!(!ComponentKind::Input.is_gate());
        assert!(!ComponentKind::Output.is_gate());
        assert!(ComponentKind::GATES.iter().all(|k| k.is_gate()));
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("xnor".parse::<ComponentKind>(), Ok(ComponentKind::Xnor));
        assert_eq!(" Input ".parse::<ComponentKind>(), Ok(ComponentKind::Input));
        assert!(matches!(
            "MUX".parse::<ComponentKind>(),
            Err(LfError::UnknownKind { .. })
        ));
    }

    #[test]
    fn display_round_trips() {
        for kind in ComponentKind::ALL {
            assert_eq!(kind.to_string().parse::<ComponentKind>(), Ok(kind));
        }
    }
}
