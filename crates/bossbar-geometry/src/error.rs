use bossbar_types::GroupDimension;

/// Errors from geometry construction.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    #[error("invalid parameter `{parameter}` = {value}: {reason}")]
    InvalidParameter {
        parameter: &'static str,
        value: f64,
        reason: String,
    },

    #[error("invalid name for `{field}`: must not be blank")]
    InvalidName { field: &'static str },

    #[error("physical group tag {tag} is used twice among {dimension:?} groups")]
    DuplicateTag { tag: i32, dimension: GroupDimension },

    /// A computed loop broke closure, simplicity or planarity. Valid input
    /// never produces this; it points at a builder defect.
    #[error("topology violation in {context}: {reason}")]
    TopologyViolation { context: String, reason: String },
}

impl GeometryError {
    /// True for every rejection of caller input, scalar or not.
    pub fn is_invalid_parameter(&self) -> bool {
        !matches!(self, GeometryError::TopologyViolation { .. })
    }

    pub(crate) fn invalid(parameter: &'static str, value: f64, reason: impl Into<String>) -> Self {
        GeometryError::InvalidParameter {
            parameter,
            value,
            reason: reason.into(),
        }
    }

    pub(crate) fn topology(context: &str, reason: impl Into<String>) -> Self {
        GeometryError::TopologyViolation {
            context: context.to_string(),
            reason: reason.into(),
        }
    }
}
