use crate::utils::error::{CategorizeError, Result};

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_path(field_name: &str, path: &str) -> Result<()> {
    if path.is_empty() {
        return Err(CategorizeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path cannot be empty".to_string(),
        });
    }

    if path.contains('\0') {
        return Err(CategorizeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: path.to_string(),
            reason: "Path contains null bytes".to_string(),
        });
    }

    Ok(())
}

pub fn validate_file_extension(
    field_name: &str,
    file: &str,
    allowed_extensions: &[&str],
) -> Result<()> {
    match std::path::Path::new(file)
        .extension()
        .and_then(|ext| ext.to_str())
    {
        Some(extension)
            if allowed_extensions.contains(&extension.to_ascii_lowercase().as_str()) =>
        {
            Ok(())
        }
        Some(extension) => Err(CategorizeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: format!(
                "Unsupported file extension: {}. Allowed extensions: {}",
                extension,
                allowed_extensions.join(", ")
            ),
        }),
        None => Err(CategorizeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: file.to_string(),
            reason: "File has no extension or invalid filename".to_string(),
        }),
    }
}

pub fn validate_required_field<'a, T>(
    field_name: &str,
    value: &'a Option<T>,
) -> Result<&'a T> {
    value.as_ref().ok_or_else(|| CategorizeError::MissingConfigError {
        field: field_name.to_string(),
    })
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(CategorizeError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_path() {
        assert!(validate_path("output.path", "out/categorized.csv").is_ok());
        assert!(validate_path("output.path", "").is_err());
        assert!(validate_path("output.path", "bad\0path").is_err());
    }

    #[test]
    fn test_validate_file_extension() {
        assert!(validate_file_extension("input.transactions", "stmt.csv", &["csv"]).is_ok());
        assert!(validate_file_extension("input.transactions", "STMT.CSV", &["csv"]).is_ok());
        assert!(validate_file_extension("rules.path", "rules.yaml", &["json"]).is_err());
        assert!(validate_file_extension("rules.path", "rules", &["json"]).is_err());
    }

    #[test]
    fn test_validate_required_field() {
        let missing: Option<String> = None;
        let err = validate_required_field("input.transactions", &missing).unwrap_err();
        assert!(matches!(err, CategorizeError::MissingConfigError { .. }));

        let present = Some("stmt.csv".to_string());
        assert_eq!(validate_required_field("input.transactions", &present).unwrap(), "stmt.csv");
    }

    #[test]
    fn test_validate_non_empty_string() {
        assert!(validate_non_empty_string("output.preview", "Food").is_ok());
        assert!(validate_non_empty_string("output.preview", "   ").is_err());
    }
}
