//! Concrete control commands.

mod add;
mod counts;
mod lifecycle;
mod list;
mod numshows;
mod rm;
mod signal;

use serde_json::Value;

use crate::error::ArgumentError;
use crate::message::Properties;

pub use self::add::AddWatcher;
pub use self::counts::{NumProcesses, NumWatchers};
pub use self::lifecycle::{Start, Stop};
pub use self::list::List;
pub use self::numshows::NumShows;
pub use self::rm::Rm;
pub use self::signal::SignalCommand;

/// Builds a property mapping from `(name, value)` pairs.
fn properties<I>(pairs: I) -> Properties
where
    I: IntoIterator<Item = (&'static str, Value)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.to_owned(), value))
        .collect()
}

/// Returns the optional watcher name of commands taking `[<name>]`.
fn optional_name<'a>(
    command: &'static str,
    args: &'a [String],
) -> Result<Option<&'a str>, ArgumentError> {
    match args {
        [] => Ok(None),
        [name] => Ok(Some(name.as_str())),
        _ => Err(ArgumentError::InvalidArgumentCount {
            command,
            expected: "0 or 1",
            given: args.len(),
        }),
    }
}

/// Properties for an optional watcher name.
fn name_properties(name: Option<&str>) -> Properties {
    properties(name.map(|watcher| ("name", Value::from(watcher))))
}
