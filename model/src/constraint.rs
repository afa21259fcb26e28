use crate::error::LabError;
use crate::payload::ConstraintPayload;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{Display, EnumIter, EnumString};

/// Whether a construct must appear in the learner's code or must not.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum ConstraintKind {
    Required,
    Forbidden,
}

/// The fixed vocabulary of code constructs a constraint can point at.
///
/// Closed on purpose: the authoring form historically sent free-form strings
/// here, and every misspelling became a constraint that silently never
/// matched. Unknown names are rejected at the wire boundary instead.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, EnumIter,
)]
pub enum CodeConstruct {
    ForLoop,
    WhileLoop,
    Recursion,
    IfElse,
    ArrayOrList,
    GlobalVariable,
    CustomFunction,
    BuiltInSort,
    LoopAny,
}

impl CodeConstruct {
    /// Loops and conditionals are the only constructs where nesting depth
    /// means anything.
    pub fn supports_nesting(&self) -> bool {
        matches!(
            self,
            CodeConstruct::ForLoop
                | CodeConstruct::WhileLoop
                | CodeConstruct::LoopAny
                | CodeConstruct::IfElse
        )
    }
}

/// A single required/forbidden-construct rule attached to a task.
///
/// Pure value object: construct it, compare it, read it. Depth bounds use
/// `0` as "unconstrained" on that side. A `Forbidden` constraint never
/// carries depth bounds — forbidding the construct makes nesting moot, so
/// whatever the caller supplied is normalized away.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CodeConstraint {
    kind: ConstraintKind,
    construct: CodeConstruct,
    min_nesting_depth: u32,
    max_nesting_depth: u32,
}

impl CodeConstraint {
    pub fn new(
        kind: ConstraintKind,
        construct: CodeConstruct,
        min_nesting_depth: u32,
        max_nesting_depth: u32,
    ) -> Result<Self, LabError> {
        if kind == ConstraintKind::Forbidden {
            return Ok(Self {
                kind,
                construct,
                min_nesting_depth: 0,
                max_nesting_depth: 0,
            });
        }

        if min_nesting_depth > 0 && max_nesting_depth > 0 && min_nesting_depth > max_nesting_depth {
            return Err(LabError::InvalidConstraint(format!(
                "minimum nesting depth {} exceeds maximum {}",
                min_nesting_depth, max_nesting_depth
            )));
        }

        Ok(Self {
            kind,
            construct,
            min_nesting_depth,
            max_nesting_depth,
        })
    }

    /// Shorthand for a required construct without depth bounds.
    pub fn required(construct: CodeConstruct) -> Self {
        Self {
            kind: ConstraintKind::Required,
            construct,
            min_nesting_depth: 0,
            max_nesting_depth: 0,
        }
    }

    /// Shorthand for a forbidden construct.
    pub fn forbidden(construct: CodeConstruct) -> Self {
        Self {
            kind: ConstraintKind::Forbidden,
            construct,
            min_nesting_depth: 0,
            max_nesting_depth: 0,
        }
    }

    pub fn kind(&self) -> ConstraintKind {
        self.kind
    }

    pub fn construct(&self) -> CodeConstruct {
        self.construct
    }

    pub fn min_nesting_depth(&self) -> u32 {
        self.min_nesting_depth
    }

    pub fn max_nesting_depth(&self) -> u32 {
        self.max_nesting_depth
    }

    /// Parse the wire shape, turning its open strings into the closed
    /// vocabularies. Unknown names come back as [`LabError::InvalidConstraint`].
    pub fn from_payload(payload: &ConstraintPayload) -> Result<Self, LabError> {
        let construct = CodeConstruct::from_str(&payload.construct).map_err(|_| {
            LabError::InvalidConstraint(format!("unknown construct \"{}\"", payload.construct))
        })?;
        let kind = ConstraintKind::from_str(&payload.kind).map_err(|_| {
            LabError::InvalidConstraint(format!("unknown constraint type \"{}\"", payload.kind))
        })?;
        Self::new(
            kind,
            construct,
            payload.specifics.min_depth,
            payload.specifics.max_depth,
        )
    }

    pub fn to_payload(&self) -> ConstraintPayload {
        ConstraintPayload {
            construct: self.construct.to_string(),
            kind: self.kind.to_string(),
            specifics: crate::payload::DepthBounds {
                min_depth: self.min_nesting_depth,
                max_depth: self.max_nesting_depth,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::DepthBounds;

    #[test]
    fn test_inverted_depth_bounds_rejected() {
        let err = CodeConstraint::new(ConstraintKind::Required, CodeConstruct::ForLoop, 3, 2)
            .unwrap_err();
        assert!(matches!(err, LabError::InvalidConstraint(_)));
    }

    #[test]
    fn test_zero_bound_means_unconstrained() {
        // min 3 with max 0 is fine: the upper bound is simply absent.
        let c = CodeConstraint::new(ConstraintKind::Required, CodeConstruct::WhileLoop, 3, 0)
            .unwrap();
        assert_eq!(c.min_nesting_depth(), 3);
        assert_eq!(c.max_nesting_depth(), 0);
    }

    #[test]
    fn test_forbidden_ignores_depth_bounds() {
        // Whatever depths the caller supplies, a forbidden constraint ends
        // up identical to one built with no depths at all.
        let with_depths =
            CodeConstraint::new(ConstraintKind::Forbidden, CodeConstruct::Recursion, 2, 5)
                .unwrap();
        let inverted =
            CodeConstraint::new(ConstraintKind::Forbidden, CodeConstruct::Recursion, 9, 1)
                .unwrap();
        assert_eq!(with_depths, CodeConstraint::forbidden(CodeConstruct::Recursion));
        assert_eq!(inverted, CodeConstraint::forbidden(CodeConstruct::Recursion));
        assert_eq!(with_depths.min_nesting_depth(), 0);
        assert_eq!(with_depths.max_nesting_depth(), 0);
    }

    #[test]
    fn test_unknown_construct_name_rejected() {
        let payload = ConstraintPayload {
            construct: "GotoStatement".into(),
            kind: "Required".into(),
            specifics: DepthBounds::default(),
        };
        let err = CodeConstraint::from_payload(&payload).unwrap_err();
        assert_eq!(
            err,
            LabError::InvalidConstraint("unknown construct \"GotoStatement\"".into())
        );
    }

    #[test]
    fn test_unknown_kind_rejected() {
        let payload = ConstraintPayload {
            construct: "ForLoop".into(),
            kind: "Suggested".into(),
            specifics: DepthBounds::default(),
        };
        assert!(CodeConstraint::from_payload(&payload).is_err());
    }

    #[test]
    fn test_payload_round_trip() {
        let c = CodeConstraint::new(ConstraintKind::Required, CodeConstruct::IfElse, 1, 4)
            .unwrap();
        let back = CodeConstraint::from_payload(&c.to_payload()).unwrap();
        assert_eq!(c, back);
    }

    #[test]
    fn test_nesting_support() {
        assert!(CodeConstruct::LoopAny.supports_nesting());
        assert!(CodeConstruct::IfElse.supports_nesting());
        assert!(!CodeConstruct::Recursion.supports_nesting());
        assert!(!CodeConstruct::BuiltInSort.supports_nesting());
    }
}
