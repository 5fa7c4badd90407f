use super::ApiError;

pub fn validate_opportunity_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::NotFound(format!(
            "Invalid opportunity ID: {}",
            id
        )));
    }
    Ok(id)
}
