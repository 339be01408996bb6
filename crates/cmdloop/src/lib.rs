//! One argument table for both one-shot `argv` parsing and an interactive
//! command loop.
//!
//! Arguments are registered in a [`Registry`] with a short form (`-h`), a long
//! form (`--help`) and/or a bare command (`help`). A [`Parser`] resolves
//! program arguments with [`Parser::parse`], then keeps reading lines with
//! [`Parser::run_loop`], where several commands may share a line when joined
//! by `&&`. Help text is rendered from the same table.
//!
//! ```no_run
//! use cmdloop::{Argument, Parser};
//!
//! let mut parser = Parser::new("");
//! parser.registry_mut().add(
//!     Argument::new()
//!         .short("-g")
//!         .command("greet")
//!         .data_info("name")
//!         .description("Greets someone")
//!         .accepts_data()
//!         .callback(|name| {
//!             println!("Hello, {name}!");
//!             Ok(())
//!         }),
//! );
//!
//! let argv: Vec<String> = std::env::args().collect();
//! let code = parser.run_loop(&argv, true)?;
//! std::process::exit(code);
//! # Ok::<(), cmdloop::Error>(())
//! ```

mod argument;
mod console;
mod error;
mod flags;
pub mod help;
pub mod matcher;
mod metadata;
mod parser;
mod registry;

pub use argument::{Action, Argument, ArgumentId, Callback, ParsedEntry};
pub use console::{BufferConsole, Console, StdConsole};
pub use error::{Error, Result};
pub use flags::ArgFlags;
pub use metadata::ArgumentMeta;
pub use parser::{Flow, Parser, SEPARATOR, program_name};
pub use registry::Registry;
