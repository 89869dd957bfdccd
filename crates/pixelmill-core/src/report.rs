//! Run reports: what a completed pipeline run did and how long it took.

use serde::{Deserialize, Serialize};

use crate::spec::SpecKind;

/// Summary of a successful pipeline run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunReport {
    /// Input buffer width in pixels
    pub input_width: u32,

    /// Input buffer height in pixels
    pub input_height: u32,

    /// Output buffer width in pixels
    pub output_width: u32,

    /// Output buffer height in pixels
    pub output_height: u32,

    /// Total run time in milliseconds
    pub total_ms: f64,

    /// Per-step breakdown, in application order
    pub steps: Vec<StepReport>,
}

/// One applied step.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StepReport {
    /// Zero-based position in the spec sequence
    pub index: usize,

    /// Which operation ran
    pub kind: SpecKind,

    /// Step time in milliseconds
    pub elapsed_ms: f64,

    /// Buffer width after the step
    pub width: u32,

    /// Buffer height after the step
    pub height: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_serializes_kinds_as_wire_tags() {
        let report = RunReport {
            input_width: 8,
            input_height: 8,
            output_width: 4,
            output_height: 8,
            total_ms: 1.25,
            steps: vec![StepReport {
                index: 0,
                kind: SpecKind::Resize,
                elapsed_ms: 1.25,
                width: 4,
                height: 8,
            }],
        };
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"kind\":\"resize\""));
        assert!(json.contains("\"output_width\":4"));

        let parsed: RunReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.steps.len(), 1);
        assert_eq!(parsed.steps[0].index, 0);
    }
}
