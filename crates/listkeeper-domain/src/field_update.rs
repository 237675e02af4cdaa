/// Three-state partial update for optional fields.
///
/// - `NoChange`: field keeps its existing value
/// - `Set(value)`: field is updated to the provided value
/// - `Clear`: field is cleared (set to None)
///
/// # Example
///
/// ```
/// use listkeeper_domain::FieldUpdate;
///
/// let emoji_update = FieldUpdate::Set("🛒".to_string());
/// let price_update: FieldUpdate<f64> = FieldUpdate::Clear;
/// let unit_update: FieldUpdate<String> = FieldUpdate::NoChange;
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldUpdate<T> {
    NoChange,
    Set(T),
    Clear,
}

impl<T> Default for FieldUpdate<T> {
    fn default() -> Self {
        FieldUpdate::NoChange
    }
}

impl<T> FieldUpdate<T> {
    /// Apply this update to an optional field.
    ///
    /// ```
    /// use listkeeper_domain::FieldUpdate;
    ///
    /// let mut field = Some("kg".to_string());
    /// FieldUpdate::Set("g".to_string()).apply_to(&mut field);
    /// assert_eq!(field, Some("g".to_string()));
    ///
    /// FieldUpdate::Clear.apply_to(&mut field);
    /// assert_eq!(field, None);
    /// ```
    pub fn apply_to(self, field: &mut Option<T>) {
        match self {
            FieldUpdate::NoChange => {}
            FieldUpdate::Set(value) => *field = Some(value),
            FieldUpdate::Clear => *field = None,
        }
    }

    pub fn is_change(&self) -> bool {
        !matches!(self, FieldUpdate::NoChange)
    }

    /// Downgrade a `Set` whose value fails `accept` to `NoChange`.
    pub fn filter(self, accept: impl FnOnce(&T) -> bool) -> Self {
        match self {
            FieldUpdate::Set(value) if !accept(&value) => FieldUpdate::NoChange,
            other => other,
        }
    }
}

impl<T> From<Option<T>> for FieldUpdate<T> {
    /// `Some(value)` becomes `Set(value)`, `None` becomes `Clear`.
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(value) => FieldUpdate::Set(value),
            None => FieldUpdate::Clear,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_change_keeps_value() {
        let mut field = Some(3);
        FieldUpdate::NoChange.apply_to(&mut field);
        assert_eq!(field, Some(3));
        assert!(!FieldUpdate::<i32>::NoChange.is_change());
    }

    #[test]
    fn test_filter_rejects_set() {
        let update = FieldUpdate::Set(-1.0_f64).filter(|p| *p >= 0.0);
        assert_eq!(update, FieldUpdate::NoChange);

        let update = FieldUpdate::Set(2.5_f64).filter(|p| *p >= 0.0);
        assert_eq!(update, FieldUpdate::Set(2.5));

        let update: FieldUpdate<f64> = FieldUpdate::Clear.filter(|p| *p >= 0.0);
        assert_eq!(update, FieldUpdate::Clear);
    }

    #[test]
    fn test_from_option() {
        assert_eq!(FieldUpdate::from(Some(1)), FieldUpdate::Set(1));
        assert_eq!(FieldUpdate::<i32>::from(None), FieldUpdate::Clear);
    }
}
