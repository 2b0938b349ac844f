use crate::common::error::OctoError;

/// Result alias used across the crate.
///
/// # Examples
///
/// ```
/// use octo::common::result::OctoResult;
/// use octo::common::error::OctoError;
///
/// fn example_function() -> OctoResult<String> {
///     Ok("success".to_string())
/// }
///
/// fn example_with_error() -> OctoResult<()> {
///     Err(OctoError::unknown_workspace("w9"))
/// }
/// ```
pub type OctoResult<T> = Result<T, OctoError>;

/// Conversions from `Option` into [`OctoResult`].
pub trait OptionExt<T> {
    /// Converts `None` into the supplied error.
    ///
    /// # Examples
    ///
    /// ```
    /// use octo::common::result::{OctoResult, OptionExt};
    /// use octo::common::error::OctoError;
    ///
    /// let none_value: Option<String> = None;
    /// let result: OctoResult<String> =
    ///     none_value.ok_or_octo(OctoError::unknown_workspace("w1"));
    /// assert!(result.is_err());
    /// ```
    fn ok_or_octo(self, error: OctoError) -> OctoResult<T>;
}

impl<T> OptionExt<T> for Option<T> {
    fn ok_or_octo(self, error: OctoError) -> OctoResult<T> {
        self.ok_or(error)
    }
}

/// Conversions from foreign `Result`s into [`OctoResult`].
pub trait ResultExt<T, E> {
    /// Wraps an I/O failure as a file system error carrying the offending path.
    ///
    /// # Examples
    ///
    /// ```
    /// use octo::common::result::{OctoResult, ResultExt};
    ///
    /// let result: Result<String, std::io::Error> = Err(std::io::Error::new(
    ///     std::io::ErrorKind::NotFound, "file not found"
    /// ));
    /// let octo_result: OctoResult<String> = result.with_filesystem_error("read failed", None);
    /// assert!(octo_result.is_err());
    /// ```
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> OctoResult<T>
    where
        E: Into<std::io::Error>;
}

impl<T, E> ResultExt<T, E> for Result<T, E> {
    fn with_filesystem_error(
        self,
        message: impl Into<String>,
        path: Option<std::path::PathBuf>,
    ) -> OctoResult<T>
    where
        E: Into<std::io::Error>,
    {
        self.map_err(|e| {
            let io_error = e.into();
            OctoError::filesystem_error_with_source(message, path, io_error)
        })
    }
}
