use super::ToolError;

pub const MAX_TITLE_CHARS: usize = 500;
pub const MAX_DESCRIPTION_CHARS: usize = 50_000;
pub const MAX_ID_LIST: usize = 20;

pub fn positive(field: &str, value: u64) -> Result<(), ToolError> {
    if value == 0 {
        return Err(ToolError::invalid(format!("{field} must be a positive integer")));
    }
    Ok(())
}

pub fn positive_opt(field: &str, value: Option<u64>) -> Result<(), ToolError> {
    value.map_or(Ok(()), |v| positive(field, v))
}

pub fn in_range(field: &str, value: usize, min: usize, max: usize) -> Result<(), ToolError> {
    if value < min || value > max {
        return Err(ToolError::invalid(format!(
            "{field} must be between {min} and {max}"
        )));
    }
    Ok(())
}

/// Length in characters, not bytes.
pub fn text_len(field: &str, value: &str, min: usize, max: usize) -> Result<(), ToolError> {
    let len = value.chars().count();
    if len < min {
        return Err(ToolError::invalid(format!(
            "{field} must be at least {min} characters"
        )));
    }
    if len > max {
        return Err(ToolError::invalid(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

pub fn id_list(field: &str, ids: &[u64], min: usize, max: usize) -> Result<(), ToolError> {
    if ids.len() < min {
        return Err(ToolError::invalid(format!(
            "{field} must contain at least {min} id(s)"
        )));
    }
    if ids.len() > max {
        return Err(ToolError::invalid(format!(
            "{field} must contain at most {max} ids"
        )));
    }
    if ids.contains(&0) {
        return Err(ToolError::invalid(format!(
            "{field} must contain only positive integers"
        )));
    }
    Ok(())
}
