use serde::{Deserialize, Serialize};

/// The four fields of the campaign form, filled in on step 4.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CampaignInput {
    pub headline: String,
    pub usp: String,
    pub cta: String,
    pub visual_description: String,
}

/// A per-field validation failure, surfaced inline next to the field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl CampaignInput {
    /// Required-field check. Every empty (after trimming) field produces its
    /// own error so the form can mark all offenders at once.
    pub fn validate(&self) -> Result<(), Vec<FieldError>> {
        let mut errors = Vec::new();
        if self.headline.trim().is_empty() {
            errors.push(FieldError::new("headline", "Headline is required"));
        }
        if self.usp.trim().is_empty() {
            errors.push(FieldError::new("usp", "USP is required"));
        }
        if self.cta.trim().is_empty() {
            errors.push(FieldError::new("cta", "CTA is required"));
        }
        if self.visual_description.trim().is_empty() {
            errors.push(FieldError::new(
                "visual_description",
                "Visual description is required",
            ));
        }
        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }

    /// True when every field is non-empty after trimming.
    /// Drives the completeness bonus in fallback scoring.
    pub fn is_complete(&self) -> bool {
        self.validate().is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled() -> CampaignInput {
        CampaignInput {
            headline: "Summer Drop".into(),
            usp: "Limited-run fabrics".into(),
            cta: "Shop now".into(),
            visual_description: "Sunlit rooftop, pastel palette".into(),
        }
    }

    #[test]
    fn complete_input_validates() {
        assert!(filled().validate().is_ok());
        assert!(filled().is_complete());
    }

    #[test]
    fn empty_usp_yields_usp_error_only() {
        let mut input = filled();
        input.usp = "   ".into();
        let errors = input.validate().unwrap_err();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].field, "usp");
        assert_eq!(errors[0].message, "USP is required");
    }

    #[test]
    fn all_fields_missing_reports_all_four() {
        let errors = CampaignInput::default().validate().unwrap_err();
        let fields: Vec<&str> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["headline", "usp", "cta", "visual_description"]);
    }

    #[test]
    fn whitespace_only_is_not_complete() {
        let mut input = filled();
        input.cta = "\t \n".into();
        assert!(!input.is_complete());
    }
}
