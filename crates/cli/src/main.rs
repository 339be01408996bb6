use std::cell::{Cell, RefCell};
use std::rc::Rc;

use anyhow::{Context, Result};
use cmdloop::{Argument, Parser, StdConsole};
use tracing_subscriber::{EnvFilter, fmt};

fn main() -> Result<()> {
    init_tracing();

    let argv: Vec<String> = std::env::args().collect();
    let program = argv.first().map_or("cmdloop", String::as_str);
    let mut parser = Parser::new(program);
    register(&mut parser)?;

    let code = parser
        .run_loop(&argv, true)
        .context("command loop failed")?;
    tracing::debug!(code, "exiting");
    std::process::exit(code);
}

fn register(parser: &mut Parser<StdConsole>) -> Result<()> {
    let registry = parser.registry_mut();

    registry.add(
        Argument::new()
            .short("-g")
            .long("--greet")
            .command("greet")
            .data_info("name")
            .description("Greets someone")
            .long_description("Prints a greeting for <name>, or for the world when no name is given.")
            .example("cmdloop greet ferris")
            .optional()
            .accepts_data()
            .callback(|name| {
                let name = if name.is_empty() { "world" } else { name };
                println!("Hello, {name}!");
                Ok(())
            }),
    );
    registry
        .set_alias("greet", Argument::new().command("hi"))
        .context("failed to alias greet")?;

    registry.add(
        Argument::new()
            .command("echo")
            .data_info("text")
            .description("Prints its argument")
            .example("cmdloop > echo hello && echo again")
            .optional()
            .loop_only()
            .requires_data()
            .callback(|text| {
                println!("{text}");
                Ok(())
            }),
    );

    let counter = Rc::new(Cell::new(0u32));
    registry.add(
        Argument::new()
            .command("count")
            .description("Increments and prints a counter")
            .optional()
            .loop_only()
            .callback(move |_| {
                counter.set(counter.get() + 1);
                println!("count = {}", counter.get());
                Ok(())
            }),
    );

    // Filled once registration is complete, so the dump includes itself.
    let metadata = Rc::new(RefCell::new(String::new()));
    let dump = metadata.clone();
    registry.add(
        Argument::new()
            .long("--metadata")
            .description("Prints the argument table as JSON")
            .optional()
            .callback(move |_| {
                println!("{}", dump.borrow());
                Ok(())
            }),
    );

    *metadata.borrow_mut() = registry
        .metadata_json()
        .context("failed to encode argument metadata")?;
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}
