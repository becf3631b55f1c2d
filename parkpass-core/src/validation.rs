use garde::Validate;
use serde::{Deserialize, Serialize};

use crate::{CoreError, CoreResult, Patch};

/// A single field-level schema violation, reported with HTTP 422.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Runs the `garde` rules of a request payload and flattens the report.
pub fn validate<T>(payload: &T) -> CoreResult<()>
where
    T: Validate,
    T::Context: Default,
{
    payload.validate().map_err(|report| {
        CoreError::Validation(
            report
                .iter()
                .map(|(path, error)| FieldError::new(path.to_string(), error.message()))
                .collect(),
        )
    })
}

fn char_length(value: &str, min: usize, max: usize) -> garde::Result {
    let len = value.chars().count();
    if len < min {
        return Err(garde::Error::new(format!("length is lower than {min}")));
    }
    if len > max {
        return Err(garde::Error::new(format!("length is greater than {max}")));
    }
    Ok(())
}

pub(crate) fn not_null<T>(value: &Patch<T>, _ctx: &()) -> garde::Result {
    match value {
        Patch::Null => Err(garde::Error::new("may not be null")),
        _ => Ok(()),
    }
}

pub(crate) fn required_label(value: &Patch<String>, ctx: &()) -> garde::Result {
    not_null(value, ctx)?;
    value.as_value().map_or(Ok(()), |v| char_length(v, 1, 100))
}

pub(crate) fn optional_description(value: &Patch<String>, _ctx: &()) -> garde::Result {
    value.as_value().map_or(Ok(()), |v| char_length(v, 0, 500))
}

pub(crate) fn optional_park_area(value: &Patch<String>, _ctx: &()) -> garde::Result {
    value.as_value().map_or(Ok(()), |v| char_length(v, 0, 50))
}

pub(crate) fn positive_height(value: &Option<f64>, _ctx: &()) -> garde::Result {
    match value {
        Some(h) if !(h.is_finite() && *h > 0.0) => {
            Err(garde::Error::new("must be a positive number"))
        }
        _ => Ok(()),
    }
}

pub(crate) fn positive_height_patch(value: &Patch<f64>, ctx: &()) -> garde::Result {
    positive_height(&value.as_value().copied(), ctx)
}

pub(crate) fn non_negative_patch(value: &Patch<i32>, ctx: &()) -> garde::Result {
    not_null(value, ctx)?;
    match value.as_value() {
        Some(v) if *v < 0 => Err(garde::Error::new("lower than 0")),
        _ => Ok(()),
    }
}
