// src/application/commands/comments/form.rs
use crate::application::error::FieldErrors;
use crate::domain::comment::{CommentContent, CommentId};

/// Raw comment form as submitted by the client.
#[derive(Debug, Clone, Default)]
pub struct CommentForm {
    pub content: String,
    pub parent: Option<String>,
}

/// A form that passed validation.
#[derive(Debug, Clone)]
pub struct ValidatedComment {
    pub content: CommentContent,
    /// Parent reference as typed by the client. `None` when the field was
    /// blank or not a valid id; such submissions become root comments.
    pub parent: Option<CommentId>,
}

/// Validate `form` without touching storage.
pub fn validate_comment_form(
    form: &CommentForm,
    max_length: usize,
) -> Result<ValidatedComment, FieldErrors> {
    let mut errors: Vec<(&'static str, String)> = Vec::new();

    let trimmed = form.content.trim();
    let length = trimmed.chars().count();
    let content = match CommentContent::new(trimmed) {
        Ok(_) if length > max_length => {
            errors.push((
                "content",
                format!("Ensure this value has at most {max_length} characters (it has {length})."),
            ));
            None
        }
        Ok(content) => Some(content),
        Err(_) => {
            errors.push(("content", "This field is required.".to_string()));
            None
        }
    };

    match content {
        Some(content) if errors.is_empty() => Ok(ValidatedComment {
            content,
            parent: parse_parent(form.parent.as_deref()),
        }),
        _ => Err(collect(errors)),
    }
}

fn parse_parent(raw: Option<&str>) -> Option<CommentId> {
    raw.map(str::trim)
        .filter(|value| !value.is_empty())
        .and_then(|value| value.parse::<CommentId>().ok())
}

fn collect(pairs: Vec<(&'static str, String)>) -> FieldErrors {
    let mut errors = FieldErrors::new();
    for (field, message) in pairs {
        errors.entry(field.to_string()).or_default().push(message);
    }
    errors
}
