use crate::argument::{Action, Argument, ArgumentId};
use crate::error::{Error, Result};
use crate::flags::ArgFlags;
use crate::matcher::{matches_identifier, matches_token, structurally_equal};
use crate::metadata::ArgumentMeta;

#[derive(Debug, Clone)]
struct Slot {
    id: ArgumentId,
    arg: Argument,
}

#[derive(Debug, Clone, Copy)]
struct Builtins {
    help: ArgumentId,
    exit: ArgumentId,
    close: ArgumentId,
}

/// Append-ordered collection of arguments.
///
/// A new registry already holds `help` (`-h`, `--help`), `exit` and `close`
/// (an alias of `exit`).
#[derive(Debug, Clone)]
pub struct Registry {
    slots: Vec<Slot>,
    next_id: u64,
    builtins: Builtins,
}

impl Default for Registry {
    fn default() -> Self {
        Self::new("")
    }
}

impl Registry {
    pub fn new(exec_name: &str) -> Self {
        let placeholder = ArgumentId(u64::MAX);
        let mut registry = Self {
            slots: Vec::new(),
            next_id: 0,
            builtins: Builtins {
                help: placeholder,
                exit: placeholder,
                close: placeholder,
            },
        };

        let help = registry.add(
            Argument::new()
                .short("-h")
                .long("--help")
                .command("help")
                .data_info("command")
                .description("Shows information for registered commands")
                .optional()
                .accepts_data()
                .with_action(Action::Help),
        );

        let exit = Argument::new()
            .command("exit")
            .data_info("exit_code")
            .description("Exits this application")
            .optional()
            .accepts_data()
            .with_action(Action::Exit);
        let exit_id = registry.add(exit.clone());

        let close_id = registry.push_alias(&exit, Argument::new().command("close"));

        registry.builtins = Builtins {
            help,
            exit: exit_id,
            close: close_id,
        };
        registry.set_exec_name(exec_name);
        registry
    }

    /// Refresh the examples of the built-in arguments for a new program name.
    pub fn set_exec_name(&mut self, exec_name: &str) {
        let Builtins { help, exit, close } = self.builtins;
        if let Some(arg) = self.get_mut(help) {
            arg.example = format!("{exec_name} {}", arg.command).trim_start().to_string();
        }
        // `close` copies the example of `exit`, as any alias does.
        let exit_example = format!("{exec_name} > exit").trim_start().to_string();
        for id in [exit, close] {
            if let Some(arg) = self.get_mut(id) {
                arg.example = exit_example.clone();
            }
        }
    }

    /// Append an argument after recomputing its identity flags.
    pub fn add(&mut self, mut arg: Argument) -> ArgumentId {
        arg.normalize();
        let id = ArgumentId(self.next_id);
        self.next_id += 1;
        tracing::debug!(argument = arg.display_name(), flags = ?arg.flags, "registered argument");
        self.slots.push(Slot { id, arg });
        id
    }

    /// Append several arguments, renormalizing every argument already held.
    pub fn add_all(&mut self, args: impl IntoIterator<Item = Argument>) -> Vec<ArgumentId> {
        let ids = args.into_iter().map(|arg| self.add(arg)).collect();
        for slot in &mut self.slots {
            slot.arg.normalize();
        }
        ids
    }

    /// Remove every argument matching `identifier`. Returns how many were removed.
    pub fn remove(&mut self, identifier: &str) -> usize {
        let before = self.slots.len();
        self.slots.retain(|slot| !matches_identifier(&slot.arg, identifier));
        let removed = before - self.slots.len();
        tracing::debug!(identifier, removed, "removed arguments");
        removed
    }

    /// Remove every argument structurally equal to `arg`.
    pub fn remove_argument(&mut self, arg: &Argument) -> usize {
        let before = self.slots.len();
        self.slots.retain(|slot| !structurally_equal(&slot.arg, arg));
        before - self.slots.len()
    }

    /// Pairwise removal: walking the registry in order, an argument is removed
    /// when it equals the next pending target, which then advances.
    pub fn remove_all(&mut self, targets: &[Argument]) -> usize {
        let before = self.slots.len();
        let mut pending = targets.iter().peekable();
        self.slots.retain(|slot| match pending.peek() {
            Some(target) if structurally_equal(&slot.arg, target) => {
                pending.next();
                false
            }
            _ => true,
        });
        before - self.slots.len()
    }

    /// First argument matching `identifier` by form, description or example.
    pub fn get_argument(&self, identifier: &str) -> Result<&Argument> {
        self.slots
            .iter()
            .find(|slot| matches_identifier(&slot.arg, identifier))
            .map(|slot| &slot.arg)
            .ok_or_else(|| Error::ArgumentNotFound(identifier.to_string()))
    }

    pub fn get_argument_mut(&mut self, identifier: &str) -> Result<&mut Argument> {
        self.slots
            .iter_mut()
            .find(|slot| matches_identifier(&slot.arg, identifier))
            .map(|slot| &mut slot.arg)
            .ok_or_else(|| Error::ArgumentNotFound(identifier.to_string()))
    }

    /// First argument whose command, long or short form equals `token`.
    pub fn find_token(&self, token: &str) -> Option<(ArgumentId, &Argument)> {
        self.slots
            .iter()
            .find(|slot| matches_token(&slot.arg, token))
            .map(|slot| (slot.id, &slot.arg))
    }

    pub fn get(&self, id: ArgumentId) -> Option<&Argument> {
        self.slots
            .iter()
            .find(|slot| slot.id == id)
            .map(|slot| &slot.arg)
    }

    fn get_mut(&mut self, id: ArgumentId) -> Option<&mut Argument> {
        self.slots
            .iter_mut()
            .find(|slot| slot.id == id)
            .map(|slot| &mut slot.arg)
    }

    /// Register `alias` as an alias of the argument matching `source`.
    pub fn set_alias(&mut self, source: &str, alias: Argument) -> Result<ArgumentId> {
        let source = self
            .get_argument(source)
            .map_err(|_| Error::Alias(source.to_string()))?
            .clone();
        Ok(self.push_alias(&source, alias))
    }

    /// Register `alias` as an alias of a registered argument equal to `source`.
    pub fn set_alias_of(&mut self, source: &Argument, alias: Argument) -> Result<ArgumentId> {
        let source = self
            .slots
            .iter()
            .find(|slot| structurally_equal(&slot.arg, source))
            .map(|slot| slot.arg.clone())
            .ok_or_else(|| Error::Alias(source.display_name().to_string()))?;
        Ok(self.push_alias(&source, alias))
    }

    fn push_alias(&mut self, source: &Argument, mut alias: Argument) -> ArgumentId {
        alias.flags = source.flags.difference(ArgFlags::IDENTITY);
        alias.action = source.action.clone();
        alias.example = source.example.clone();
        alias.data_info = source.data_info.clone();

        let target = source.display_name();
        if alias.description.is_empty() {
            alias.description = format!("This is an alias for {target}");
        }
        if alias.long_description.is_empty() {
            alias.long_description = format!(
                "This is an alias for {target}. See the help for {target} for more information."
            );
        }

        tracing::debug!(alias = alias.display_name(), target, "registering alias");
        self.add(alias)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Argument> {
        self.slots.iter().map(|slot| &slot.arg)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// Serializable description of every registered argument.
    pub fn metadata(&self) -> Vec<ArgumentMeta> {
        self.iter().map(ArgumentMeta::from).collect()
    }

    /// [`Registry::metadata`] as pretty-printed JSON.
    pub fn metadata_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.metadata())
    }
}
