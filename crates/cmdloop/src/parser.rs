use crate::argument::{Action, Argument, ArgumentId, ParsedEntry};
use crate::console::{Console, StdConsole};
use crate::error::{Error, Result};
use crate::help;
use crate::matcher::{matches_identifier, matches_token, structurally_equal};
use crate::registry::Registry;

/// Separator between commands on one interactive line.
pub const SEPARATOR: &str = "&&";

const TOO_MANY_ARGUMENTS_HINT: &str =
    "ERROR: Please specify multiple arguments as following: arg1 && arg2\n";

/// What the caller should do after a dispatch pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    /// `exit`/`close` was run with this code.
    Exit(i32),
}

/// Final segment of a program path, splitting on both `\` and `/`.
pub fn program_name(path: &str) -> &str {
    path.rsplit(['\\', '/']).next().unwrap_or(path)
}

fn exit_code(data: &str) -> Result<i32> {
    let data = data.trim();
    if data.is_empty() {
        return Ok(0);
    }
    data.parse()
        .map_err(|_| Error::InvalidExitCode(data.to_string()))
}

/// Resolves argv and interactive lines against a [`Registry`] and dispatches
/// the matched arguments.
pub struct Parser<C = StdConsole> {
    registry: Registry,
    console: C,
    exec_path: String,
    exec_name: String,
    parsed: Vec<ParsedEntry>,
}

impl Parser<StdConsole> {
    /// Parser over stdin/stdout. `program` may be a path or a bare name, or
    /// empty to take it from `argv[0]` on the first parse.
    pub fn new(program: &str) -> Self {
        Self::with_console(program, StdConsole)
    }
}

impl<C: Console> Parser<C> {
    pub fn with_console(program: &str, console: C) -> Self {
        let exec_name = program_name(program).to_string();
        Self {
            registry: Registry::new(&exec_name),
            console,
            exec_path: program.to_string(),
            exec_name,
            parsed: Vec::new(),
        }
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    pub fn registry_mut(&mut self) -> &mut Registry {
        &mut self.registry
    }

    pub fn console(&self) -> &C {
        &self.console
    }

    pub fn console_mut(&mut self) -> &mut C {
        &mut self.console
    }

    pub fn exec_name(&self) -> &str {
        &self.exec_name
    }

    pub fn exec_path(&self) -> &str {
        &self.exec_path
    }

    /// Entries recorded by the most recent [`Parser::parse`].
    pub fn parsed(&self) -> &[ParsedEntry] {
        &self.parsed
    }

    fn save_exec_name(&mut self, program: &str) {
        if self.exec_path.is_empty() {
            self.exec_path = program.to_string();
        }
        if self.exec_name.is_empty() {
            self.exec_name = program_name(&self.exec_path).to_string();
            self.registry.set_exec_name(&self.exec_name);
        }
    }

    /// One pass over program arguments. `tokens[0]` is the program path.
    ///
    /// A data-accepting argument takes the next token, whatever it is. Unknown
    /// tokens are skipped. Callbacks run as their argument is matched when
    /// `execute_callbacks` is set; an `exit` ends the pass.
    pub fn parse<S: AsRef<str>>(&mut self, tokens: &[S], execute_callbacks: bool) -> Result<Flow> {
        self.parsed.clear();
        let Some(program) = tokens.first() else {
            return Ok(Flow::Continue);
        };
        self.save_exec_name(program.as_ref());

        let mut i = 1;
        while i < tokens.len() {
            let token: &str = tokens[i].as_ref();
            i += 1;

            let Some((id, arg)) = self.registry.find_token(token) else {
                tracing::trace!(token, "skipping unknown token");
                continue;
            };
            let flags = arg.flags;

            let mut data = String::new();
            if flags.is_user_data_allowed() {
                match tokens.get(i) {
                    Some(next) => {
                        data = next.as_ref().to_string();
                        i += 1;
                    }
                    None if flags.is_user_data_required() => {
                        return Err(Error::MissingRequiredData(arg.display_name().to_string()));
                    }
                    None => {}
                }
            }

            self.parsed.push(ParsedEntry {
                id,
                data: data.clone(),
            });

            if execute_callbacks {
                if let Flow::Exit(code) = self.dispatch(id, &data)? {
                    return Ok(Flow::Exit(code));
                }
            }
        }

        Ok(Flow::Continue)
    }

    /// Resolve and run one interactive line.
    ///
    /// Commands on the same line must be separated by `&&`. A data-accepting
    /// command takes the following token unless that token names the command
    /// itself, which is a syntax error. Each command runs as soon as it is
    /// resolved, so a later error leaves earlier callbacks done. An `exit`
    /// takes effect at the next `&&` or the end of the line.
    pub fn parse_and_run(&mut self, line: &str) -> Result<Flow> {
        let tokens: Vec<&str> = line.split_whitespace().collect();
        let mut chained = false;
        let mut exit = None;

        let mut i = 0;
        while i < tokens.len() {
            let token = tokens[i];
            i += 1;

            if token == SEPARATOR {
                if let Some(code) = exit {
                    return Ok(Flow::Exit(code));
                }
                chained = false;
                continue;
            }
            let Some((id, arg)) = self.registry.find_token(token) else {
                tracing::trace!(token, "skipping unknown token");
                continue;
            };
            if chained {
                return Err(Error::TooManyArguments);
            }

            let mut data = String::new();
            if arg.flags.is_user_data_allowed() {
                match tokens.get(i) {
                    Some(&next) if next != SEPARATOR => {
                        if matches_identifier(arg, next) {
                            return Err(Error::TooManyArguments);
                        }
                        data = next.to_string();
                        i += 1;
                    }
                    _ if arg.flags.is_user_data_required() => {
                        return Err(Error::MissingRequiredData(arg.display_name().to_string()));
                    }
                    _ => {}
                }
            }

            chained = true;
            if let Flow::Exit(code) = self.dispatch(id, &data)? {
                exit = Some(code);
            }
        }
        Ok(exit.map_or(Flow::Continue, Flow::Exit))
    }

    fn dispatch(&mut self, id: ArgumentId, data: &str) -> Result<Flow> {
        let Some(arg) = self.registry.get(id) else {
            return Err(Error::ArgumentNotFound(format!("{id:?}")));
        };
        let name = arg.display_name().to_string();
        tracing::debug!(argument = %name, data, "dispatching");

        match arg.action.clone() {
            Action::None => Ok(Flow::Continue),
            Action::Run(callback) => {
                callback(data).map_err(|source| Error::Callback {
                    name,
                    source: source.into(),
                })?;
                Ok(Flow::Continue)
            }
            Action::Help => {
                let text = if data.is_empty() {
                    help::full(&self.registry, &self.exec_name)
                } else {
                    help::extended(&self.registry, data)?
                };
                self.console.write(&text)?;
                Ok(Flow::Continue)
            }
            Action::Exit => Ok(Flow::Exit(exit_code(data)?)),
        }
    }

    /// Parse `tokens`, then prompt for and run lines until `exit`/`close` or
    /// end of input. Returns the exit code.
    ///
    /// With `catch_errors`, parse and callback failures are reported on the
    /// console and the loop continues. Console failures always propagate.
    pub fn run_loop<S: AsRef<str>>(&mut self, tokens: &[S], catch_errors: bool) -> Result<i32> {
        match self.parse(tokens, true) {
            Ok(Flow::Exit(code)) => return Ok(code),
            Ok(Flow::Continue) => {}
            Err(err) if catch_errors && !matches!(err, Error::Io(_)) => self.report(&err)?,
            Err(err) => return Err(err),
        }

        let prompt = format!("{} > ", self.exec_name).trim_start().to_string();
        loop {
            self.console.write(&prompt)?;
            let Some(line) = self.console.read_line()? else {
                tracing::debug!("end of input, leaving loop");
                return Ok(0);
            };

            match self.parse_and_run(&line) {
                Ok(Flow::Continue) => {}
                Ok(Flow::Exit(code)) => return Ok(code),
                Err(err) if catch_errors && !matches!(err, Error::Io(_)) => self.report(&err)?,
                Err(err) => return Err(err),
            }
        }
    }

    fn report(&mut self, err: &Error) -> Result<()> {
        tracing::debug!(error = %err, "command failed");
        if err.is_too_many_arguments() {
            self.console.write(TOO_MANY_ARGUMENTS_HINT)?;
        } else {
            self.console.write(&format!("ERROR: {err}\n"))?;
        }
        Ok(())
    }

    /// Data recorded for the argument whose command, long or short form is
    /// `identifier` during the last [`Parser::parse`].
    pub fn user_data(&self, identifier: &str) -> Result<&str> {
        self.find_parsed(|arg| matches_token(arg, identifier))
            .ok_or_else(|| Error::NoUserData(identifier.to_string()))
    }

    /// Data recorded for an argument equal to `arg`.
    pub fn user_data_of(&self, arg: &Argument) -> Result<&str> {
        self.find_parsed(|candidate| structurally_equal(candidate, arg))
            .ok_or_else(|| Error::NoUserData(arg.display_name().to_string()))
    }

    fn find_parsed(&self, pred: impl Fn(&Argument) -> bool) -> Option<&str> {
        self.parsed.iter().find_map(|entry| {
            let arg = self.registry.get(entry.id)?;
            pred(arg).then_some(entry.data.as_str())
        })
    }
}
