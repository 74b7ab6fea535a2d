//! variable bindings
//!
//! build the `variables` object of a request one binding at a time.

use crate::error::{Error, Result};
use serde::Serialize;
use serde_json::Value;

/// variables object sent with a request
pub type Variables = serde_json::Map<String, Value>;

/// a single named variable binding
///
/// create with [`variable`] and pass any number of them to
/// [`crate::Client::execute`]. bindings are applied in order, so a later
/// binding for the same name replaces an earlier one.
#[derive(Debug)]
pub struct Variable {
    name: String,
    value: serde_json::Result<Value>,
}

/// bind `value` to the variable `name`
///
/// the value is serialized right away; a value that cannot be represented
/// as json fails the request it is passed to with [`Error::Encode`].
///
/// ```
/// use graphql_lite::variable;
///
/// let bindings = [variable("id", "0x01"), variable("first", 10)];
/// assert_eq!(bindings[1].name(), "first");
/// ```
pub fn variable(name: impl Into<String>, value: impl Serialize) -> Variable {
    Variable {
        name: name.into(),
        value: serde_json::to_value(value),
    }
}

impl Variable {
    /// variable name
    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn apply(self, variables: &mut Variables) -> Result<()> {
        let value = self.value.map_err(Error::Encode)?;
        variables.insert(self.name, value);
        Ok(())
    }
}

/// fold bindings into a variables object, `None` when there are none
pub(crate) fn collect_variables<I>(bindings: I) -> Result<Option<Variables>>
where
    I: IntoIterator<Item = Variable>,
{
    let mut bindings = bindings.into_iter().peekable();
    if bindings.peek().is_none() {
        return Ok(None);
    }

    let mut variables = Variables::new();
    for binding in bindings {
        binding.apply(&mut variables)?;
    }
    Ok(Some(variables))
}
