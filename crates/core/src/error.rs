use serde::Serialize;

use crate::types::DbId;

/// A single failing field from request validation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: DbId },

    #[error("Validation failed: {0}")]
    Validation(String),

    /// Every failing field of a request, aggregated into one error.
    #[error("Validation failed for {} field(s)", .0.len())]
    FieldValidation(Vec<FieldError>),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<FieldError> = errors
            .field_errors()
            .into_iter()
            .flat_map(|(field, errs)| {
                errs.iter().map(move |e| FieldError {
                    field: field.to_string(),
                    message: e
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        // HashMap iteration order is unstable; keep responses deterministic.
        fields.sort_by(|a, b| a.field.cmp(&b.field));
        CoreError::FieldValidation(fields)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use validator::Validate;

    use super::*;

    #[derive(Validate)]
    struct MeasurementForm {
        #[validate(required(message = "weight_kg is required"))]
        weight_kg: Option<f64>,
        #[validate(required(message = "height_cm is required"))]
        height_cm: Option<f64>,
        #[validate(required)]
        client_id: Option<DbId>,
    }

    #[test]
    fn validation_errors_are_aggregated_and_sorted() {
        let form = MeasurementForm {
            weight_kg: None,
            height_cm: None,
            client_id: Some(1),
        };
        let err: CoreError = form.validate().unwrap_err().into();

        assert_matches!(err, CoreError::FieldValidation(ref fields) if fields.len() == 2);
        if let CoreError::FieldValidation(fields) = err {
            assert_eq!(fields[0].field, "height_cm");
            assert_eq!(fields[0].message, "height_cm is required");
            assert_eq!(fields[1].field, "weight_kg");
        }
    }

    #[test]
    fn missing_message_falls_back_to_code() {
        let form = MeasurementForm {
            weight_kg: Some(70.0),
            height_cm: Some(170.0),
            client_id: None,
        };
        let err: CoreError = form.validate().unwrap_err().into();
        let CoreError::FieldValidation(fields) = err else {
            panic!("expected field validation error");
        };
        assert_eq!(fields.len(), 1);
        assert_eq!(fields[0].field, "client_id");
        assert_eq!(fields[0].message, "required");
    }

    #[test]
    fn display_not_found() {
        let err = CoreError::NotFound {
            entity: "measurement",
            id: 7,
        };
        assert_eq!(err.to_string(), "Entity not found: measurement with id 7");
    }
}
