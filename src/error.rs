use thiserror::Error;

use crate::permission::PermissionId;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Permission `{0}` is already registered")]
    PermissionConflict(PermissionId),

    #[error("Invalid permission id `{0}`: expected `namespace:name` without `:` or whitespace in either part")]
    InvalidPermissionId(String),
}

pub type Result<T> = std::result::Result<T, Error>;
