//! Measurement domain rules shared by the service and the report renderer.

/// Trim a free-text note; blank input becomes `None`.
///
/// The `measurements.notes` column never stores an empty or whitespace-only
/// string.
pub fn normalize_note(note: Option<&str>) -> Option<String> {
    let trimmed = note?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Body-mass index: weight (kg) divided by height (m) squared.
///
/// Returns `None` when either input is missing or the height is zero.
pub fn body_mass_index(weight_kg: Option<f64>, height_cm: Option<f64>) -> Option<f64> {
    let weight = weight_kg?;
    let height = height_cm?;
    if height == 0.0 {
        return None;
    }
    let height_m = height / 100.0;
    Some(weight / (height_m * height_m))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_notes_become_none() {
        assert_eq!(normalize_note(None), None);
        assert_eq!(normalize_note(Some("")), None);
        assert_eq!(normalize_note(Some("  \t\n")), None);
        assert_eq!(
            normalize_note(Some("  left knee sore ")),
            Some("left knee sore".to_string())
        );
    }

    #[test]
    fn bmi_uses_height_in_meters() {
        let bmi = body_mass_index(Some(80.0), Some(200.0)).unwrap();
        assert!((bmi - 20.0).abs() < 1e-9);

        let bmi = body_mass_index(Some(70.0), Some(175.0)).unwrap();
        assert!((bmi - 22.857_142_857).abs() < 1e-6);
    }

    #[test]
    fn bmi_is_absent_without_inputs_or_with_zero_height() {
        assert_eq!(body_mass_index(None, Some(170.0)), None);
        assert_eq!(body_mass_index(Some(70.0), None), None);
        assert_eq!(body_mass_index(Some(70.0), Some(0.0)), None);
    }
}
