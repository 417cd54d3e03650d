use sea_orm::DbErr;

use crate::server::error::AppError;

/// Parses a Discord snowflake supplied by a client.
///
/// # Arguments
/// - `value` - The string to parse
/// - `field` - Field name used in the error message
///
/// # Returns
/// - `Ok(u64)` - Parsed snowflake
/// - `Err(AppError::BadRequest)` - The value is not a valid unsigned integer
pub fn parse_snowflake(value: &str, field: &str) -> Result<u64, AppError> {
    value
        .trim()
        .parse::<u64>()
        .map_err(|_| AppError::BadRequest(format!("Invalid {}: '{}'", field, value)))
}

/// Parses a Discord snowflake read back from the database.
///
/// Stored ids are written by the application, so a failure here indicates corrupt data.
///
/// # Returns
/// - `Ok(u64)` - Parsed snowflake
/// - `Err(DbErr::Custom)` - The stored value is not a valid unsigned integer
pub fn parse_stored_snowflake(value: &str, field: &str) -> Result<u64, DbErr> {
    value
        .parse::<u64>()
        .map_err(|e| DbErr::Custom(format!("Failed to parse {}: {}", field, e)))
}
