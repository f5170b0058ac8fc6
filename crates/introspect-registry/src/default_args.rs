//! Default values for trailing parameters.

use introspect_core::{Dynamic, RegistrationError};

use crate::signature::Signature;

/// Default argument values, aligned to the last parameters of a callable.
///
/// With `P` parameters and `D` defaults, parameter `j >= P - D` falls back to
/// `values[j - (P - D)]` when the caller supplies fewer than `j + 1`
/// arguments.
///
/// ```
/// use introspect_registry::DefaultArgs;
///
/// let defaults = DefaultArgs::new().with(10).with("x");
/// assert_eq!(defaults.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DefaultArgs {
    values: Vec<Dynamic>,
}

impl DefaultArgs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the default for the next trailing parameter.
    pub fn with(mut self, value: impl Into<Dynamic>) -> Self {
        self.values.push(value.into());
        self
    }

    /// Build from values for the trailing parameters, in declaration order.
    pub fn from_values<I, V>(values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<Dynamic>,
    {
        Self {
            values: values.into_iter().map(Into::into).collect(),
        }
    }

    /// Build from one optional default per parameter.
    ///
    /// Every parameter after the first one with a default must have a
    /// default too.
    pub fn from_per_param(defaults: Vec<Option<Dynamic>>) -> Result<Self, RegistrationError> {
        let start = defaults
            .iter()
            .position(Option::is_some)
            .unwrap_or(defaults.len());
        let mut values = Vec::with_capacity(defaults.len() - start);
        for (offset, default) in defaults.into_iter().skip(start).enumerate() {
            match default {
                Some(value) => values.push(value),
                None => {
                    // Report the last parameter that had a default.
                    return Err(RegistrationError::NonTrailingDefault {
                        index: start + offset - 1,
                    });
                }
            }
        }
        Ok(Self { values })
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn values(&self) -> &[Dynamic] {
        &self.values
    }

    /// Check the defaults against the parameters they fill.
    pub fn validate(&self, signature: &Signature) -> Result<(), RegistrationError> {
        let params = signature.params();
        if self.values.len() > params.len() {
            return Err(RegistrationError::TooManyDefaults {
                params: params.len(),
                defaults: self.values.len(),
            });
        }
        let first = params.len() - self.values.len();
        for (offset, value) in self.values.iter().enumerate() {
            let index = first + offset;
            params[index]
                .accepts(value)
                .map_err(|source| RegistrationError::DefaultTypeMismatch { index, source })?;
        }
        Ok(())
    }
}
