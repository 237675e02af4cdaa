use crate::error::ListError;

pub type ListResult<T> = Result<T, ListError>;
