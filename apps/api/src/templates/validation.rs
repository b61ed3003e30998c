use crate::errors::AppError;
use crate::models::template::{CreateTemplateRequest, UpdateTemplateRequest};

/// Layouts the front end knows how to render.
pub const TEMPLATE_TYPES: &[&str] = &["double-column", "elegant", "modern", "standard"];

const MAX_NAME_CHARS: usize = 100;

fn validate_name(name: &str) -> Result<(), AppError> {
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::Validation("Template name cannot be empty".into()));
    }
    if name.chars().count() > MAX_NAME_CHARS {
        return Err(AppError::Validation(format!(
            "Template name cannot exceed {MAX_NAME_CHARS} characters"
        )));
    }
    Ok(())
}

fn validate_template_type(template_type: &str) -> Result<(), AppError> {
    if TEMPLATE_TYPES.contains(&template_type) {
        Ok(())
    } else {
        Err(AppError::Validation(format!(
            "Unknown template type {template_type:?}, expected one of: {}",
            TEMPLATE_TYPES.join(", ")
        )))
    }
}

fn validate_display_order(order: Option<i32>) -> Result<(), AppError> {
    match order {
        Some(n) if n < 0 => Err(AppError::Validation(
            "display_order cannot be negative".into(),
        )),
        _ => Ok(()),
    }
}

pub fn validate_create(req: &CreateTemplateRequest) -> Result<(), AppError> {
    validate_name(&req.name)?;
    validate_template_type(&req.template_type)?;
    validate_display_order(req.display_order)
}

pub fn validate_update(req: &UpdateTemplateRequest) -> Result<(), AppError> {
    if let Some(name) = &req.name {
        validate_name(name)?;
    }
    if let Some(template_type) = &req.template_type {
        validate_template_type(template_type)?;
    }
    validate_display_order(req.display_order)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create(name: &str, template_type: &str) -> CreateTemplateRequest {
        CreateTemplateRequest {
            name: name.to_string(),
            template_type: template_type.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_valid_create() {
        for template_type in TEMPLATE_TYPES {
            assert!(validate_create(&create("Classique", template_type)).is_ok());
        }
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(matches!(
            validate_create(&create("   ", "modern")),
            Err(AppError::Validation(_))
        ));
        assert!(validate_create(&create(&"x".repeat(101), "modern")).is_err());
    }

    #[test]
    fn test_unknown_type_rejected() {
        let err = validate_create(&create("Classique", "Modern")).unwrap_err();
        assert!(err.to_string().contains("double-column, elegant, modern, standard"));
    }

    #[test]
    fn test_negative_display_order_rejected() {
        let req = CreateTemplateRequest {
            display_order: Some(-1),
            ..create("Classique", "standard")
        };
        assert!(validate_create(&req).is_err());
    }

    #[test]
    fn test_update_validates_only_present_fields() {
        assert!(validate_update(&UpdateTemplateRequest::default()).is_ok());

        let req = UpdateTemplateRequest {
            template_type: Some("fancy".into()),
            ..Default::default()
        };
        assert!(validate_update(&req).is_err());

        let req = UpdateTemplateRequest {
            name: Some(String::new()),
            ..Default::default()
        };
        assert!(validate_update(&req).is_err());
    }
}
