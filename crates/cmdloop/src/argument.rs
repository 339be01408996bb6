use std::fmt;
use std::rc::Rc;

use crate::flags::ArgFlags;

/// A user callback, invoked with the supplied data (or `""`).
pub type Callback = Rc<dyn Fn(&str) -> anyhow::Result<()>>;

/// What happens when an argument is dispatched.
#[derive(Clone, Default)]
pub enum Action {
    /// Nothing is bound.
    #[default]
    None,
    /// Run a user callback.
    Run(Callback),
    /// Built-in `help [<name>]`.
    Help,
    /// Built-in `exit [<code>]`.
    Exit,
}

impl fmt::Debug for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => f.write_str("None"),
            Self::Run(_) => f.write_str("Run(..)"),
            Self::Help => f.write_str("Help"),
            Self::Exit => f.write_str("Exit"),
        }
    }
}

/// Stable handle to an argument held by a [`Registry`](crate::Registry).
///
/// Handles are never reused, so one that outlives its argument simply stops
/// resolving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ArgumentId(pub(crate) u64);

/// A registrable argument: up to three identifying forms, display strings,
/// an action and a flag set.
#[derive(Debug, Clone, Default)]
pub struct Argument {
    pub short: String,
    pub long: String,
    pub command: String,
    /// Label for the expected data value (`prog [-t|--test=|test <data_info>]`).
    pub data_info: String,
    pub description: String,
    pub long_description: String,
    pub example: String,
    pub action: Action,
    pub flags: ArgFlags,
}

impl Argument {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn short(mut self, short: impl Into<String>) -> Self {
        self.short = short.into();
        self
    }

    pub fn long(mut self, long: impl Into<String>) -> Self {
        self.long = long.into();
        self
    }

    pub fn command(mut self, command: impl Into<String>) -> Self {
        self.command = command.into();
        self
    }

    pub fn data_info(mut self, data_info: impl Into<String>) -> Self {
        self.data_info = data_info.into();
        self
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn long_description(mut self, long_description: impl Into<String>) -> Self {
        self.long_description = long_description.into();
        self
    }

    pub fn example(mut self, example: impl Into<String>) -> Self {
        self.example = example.into();
        self
    }

    pub fn flags(mut self, flags: ArgFlags) -> Self {
        self.flags = flags.normalized();
        self
    }

    pub fn optional(mut self) -> Self {
        self.flags |= ArgFlags::OPTIONAL;
        self
    }

    pub fn loop_only(mut self) -> Self {
        self.flags |= ArgFlags::LOOP_ONLY;
        self
    }

    /// Accept an optional data token.
    pub fn accepts_data(mut self) -> Self {
        self.flags |= ArgFlags::USER_DATA_ALLOWED;
        self.flags.remove(ArgFlags::USER_DATA_REQUIRED);
        self
    }

    /// Require a data token.
    pub fn requires_data(mut self) -> Self {
        self.flags |= ArgFlags::USER_DATA_ALLOWED | ArgFlags::USER_DATA_REQUIRED;
        self
    }

    pub fn callback<F>(mut self, f: F) -> Self
    where
        F: Fn(&str) -> anyhow::Result<()> + 'static,
    {
        self.action = Action::Run(Rc::new(f));
        self
    }

    pub(crate) fn with_action(mut self, action: Action) -> Self {
        self.action = action;
        self
    }

    /// Recompute the identity bits from the current forms.
    pub(crate) fn normalize(&mut self) {
        self.flags = self
            .flags
            .with_identity(&self.short, &self.long, &self.command);
    }

    /// The most meaningful form: command, then long, then short.
    pub fn display_name(&self) -> &str {
        if !self.command.is_empty() {
            &self.command
        } else if !self.long.is_empty() {
            &self.long
        } else {
            &self.short
        }
    }

    /// Non-empty identifying forms in short, long, command order.
    pub fn forms(&self) -> impl Iterator<Item = &str> {
        [self.short.as_str(), self.long.as_str(), self.command.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
    }
}

/// A matched argument and the data supplied with it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedEntry {
    pub id: ArgumentId,
    pub data: String,
}
