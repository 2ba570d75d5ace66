use crate::registry::FieldDescriptor;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Eligibility {
    Included,
    Excluded(ExclusionReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExclusionReason {
    Computed,
    ReadOnly,
}

impl ExclusionReason {
    pub fn as_str(self) -> &'static str {
        match self {
            ExclusionReason::Computed => "computed",
            ExclusionReason::ReadOnly => "read-only",
        }
    }
}

/// Whether a field takes part in the derived input types. The answer is the
/// same for every input mode.
pub fn eligibility(field: &FieldDescriptor) -> Eligibility {
    if field.is_read_only() {
        Eligibility::Excluded(ExclusionReason::ReadOnly)
    } else if field.is_computed() {
        Eligibility::Excluded(ExclusionReason::Computed)
    } else {
        Eligibility::Included
    }
}
