use fetcherr_model::UnitStatus;

/// Classifies a backend status code.
///
/// Missing codes mean the backend never tracked the unit. Codes outside the
/// known range also classify as [`UnitStatus::Unknown`]: the backend may
/// grow new codes and rendering must not fail on them.
pub fn classify(code: Option<i64>) -> UnitStatus {
    code.and_then(UnitStatus::from_code)
        .unwrap_or(UnitStatus::Unknown)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_codes_map_to_their_state() {
        assert_eq!(classify(Some(1)), UnitStatus::Unknown);
        assert_eq!(classify(Some(2)), UnitStatus::PendingRequest);
        assert_eq!(classify(Some(3)), UnitStatus::Processing);
        assert_eq!(classify(Some(4)), UnitStatus::PartiallyAvailable);
        assert_eq!(classify(Some(5)), UnitStatus::Available);
    }

    #[test]
    fn absent_code_is_unknown() {
        assert_eq!(classify(None), UnitStatus::Unknown);
    }

    #[test]
    fn unmapped_codes_are_unknown() {
        for code in [0, 6, 7, -1, 42, i64::MIN, i64::MAX] {
            assert_eq!(classify(Some(code)), UnitStatus::Unknown, "code {code}");
        }
    }
}
