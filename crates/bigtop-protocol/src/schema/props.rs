//! Typed reads of validated message properties.
//!
//! Commands call these from `execute`, after `validate` has accepted the
//! properties; they still report a [`MessageError`] rather than panic when a
//! property is absent or mistyped.

use serde_json::Value;

use crate::error::MessageError;
use crate::message::Properties;

pub(crate) fn required_str<'a>(props: &'a Properties, name: &str) -> Result<&'a str, MessageError> {
    optional_str(props, name)?.ok_or_else(|| MessageError::missing(name))
}

pub(crate) fn optional_str<'a>(
    props: &'a Properties,
    name: &str,
) -> Result<Option<&'a str>, MessageError> {
    match props.get(name) {
        None => Ok(None),
        Some(Value::String(text)) => Ok(Some(text.as_str())),
        Some(_) => Err(MessageError::invalid(name, "a string")),
    }
}

pub(crate) fn flag(props: &Properties, name: &str) -> Result<bool, MessageError> {
    match props.get(name) {
        None => Ok(false),
        Some(Value::Bool(value)) => Ok(*value),
        Some(_) => Err(MessageError::invalid(name, "a boolean")),
    }
}

pub(crate) fn optional_u32(props: &Properties, name: &str) -> Result<Option<u32>, MessageError> {
    props
        .get(name)
        .map(|value| {
            value
                .as_u64()
                .and_then(|number| u32::try_from(number).ok())
                .ok_or_else(|| MessageError::invalid(name, "a process id"))
        })
        .transpose()
}

pub(crate) fn optional_string_list(
    props: &Properties,
    name: &str,
) -> Result<Option<Vec<String>>, MessageError> {
    props
        .get(name)
        .map(|value| {
            value
                .as_array()
                .and_then(|items| {
                    items
                        .iter()
                        .map(|item| item.as_str().map(str::to_owned))
                        .collect::<Option<Vec<_>>>()
                })
                .ok_or_else(|| MessageError::invalid(name, "a list of strings"))
        })
        .transpose()
}

pub(crate) fn optional_object(props: &Properties, name: &str) -> Result<Properties, MessageError> {
    match props.get(name) {
        None => Ok(Properties::new()),
        Some(Value::Object(entries)) => Ok(entries.clone()),
        Some(_) => Err(MessageError::invalid(name, "an object")),
    }
}
