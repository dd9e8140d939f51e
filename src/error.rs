use thiserror::Error;

/// Errors raised by the geometry engine.
///
/// Every failure is local to the call that produced it; no partial output is
/// returned alongside an error.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeomError {
    /// A numeric parameter is outside the range the operation accepts.
    #[error("invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    /// The homogeneous denominator evaluated to zero for this point.
    #[error("degenerate transform: homogeneous denominator is zero at ({x}, {y})")]
    DegenerateTransform { x: f32, y: f32 },
    /// A session operation was called while the stepper is idle.
    #[error("stepper is not running")]
    NotRunning,
}

pub type Result<T> = std::result::Result<T, GeomError>;

impl GeomError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> GeomError {
        GeomError::InvalidParameter {
            name,
            reason: reason.into(),
        }
    }
}

/// Turns a host-supplied depth or count into an unsigned value, rejecting
/// negatives and anything above `max`.
pub(crate) fn checked_depth(name: &'static str, value: i32, max: u32) -> Result<u32> {
    if value < 0 {
        return Err(GeomError::invalid(name, format!("must be >= 0, got {value}")));
    }
    let value = value as u32;
    if value > max {
        return Err(GeomError::invalid(name, format!("must be <= {max}, got {value}")));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_depth_is_rejected() {
        let err = checked_depth("depth", -1, 10).unwrap_err();
        assert!(matches!(err, GeomError::InvalidParameter { name: "depth", .. }));
    }

    #[test]
    fn depth_above_cap_is_rejected() {
        assert!(checked_depth("depth", 11, 10).is_err());
        assert_eq!(checked_depth("depth", 10, 10).unwrap(), 10);
        assert_eq!(checked_depth("depth", 0, 10).unwrap(), 0);
    }

    #[test]
    fn messages_name_the_parameter() {
        let err = checked_depth("count", -3, 5).unwrap_err();
        assert_eq!(err.to_string(), "invalid parameter `count`: must be >= 0, got -3");
    }
}
