//! Help text rendered from a [`Registry`].
//!
//! Full help is four blocks in a fixed order: the usage line, required
//! arguments, optional arguments and examples.

use crate::argument::Argument;
use crate::error::Result;
use crate::registry::Registry;

/// Column the description of a row starts at.
const DESCRIPTION_COLUMN: usize = 40;
const INDENT: &str = "      ";

fn forms(arg: &Argument, separator: &str) -> String {
    let mut names: Vec<String> = Vec::new();
    if arg.flags.has_short() {
        names.push(arg.short.clone());
    }
    if arg.flags.has_long() {
        if arg.flags.is_user_data_allowed() {
            names.push(format!("{}=", arg.long));
        } else {
            names.push(arg.long.clone());
        }
    }
    if arg.flags.has_command() {
        names.push(arg.command.clone());
    }
    names.join(separator)
}

fn data_suffix(arg: &Argument) -> String {
    if arg.data_info.is_empty() {
        String::new()
    } else {
        format!(" <{}>", arg.data_info)
    }
}

/// `exec [-h|--help=|help <command>] [exit <exit_code>] ...`
///
/// Loop-only arguments are left out.
pub fn usage(registry: &Registry, exec_name: &str) -> String {
    let mut parts: Vec<String> = Vec::new();
    if !exec_name.is_empty() {
        parts.push(exec_name.to_string());
    }
    for arg in registry.iter().filter(|a| !a.flags.is_loop_only()) {
        let names = forms(arg, "|");
        if names.is_empty() {
            continue;
        }
        parts.push(format!("[{names}{}]", data_suffix(arg)));
    }
    parts.join(" ")
}

fn block<'a>(title: &str, args: impl Iterator<Item = &'a Argument>) -> String {
    let mut out = format!("    {title}:\n");
    for arg in args {
        let left = format!("{INDENT}{}{}", forms(arg, ", "), data_suffix(arg));
        if arg.description.is_empty() {
            out.push_str(&left);
        } else {
            out.push_str(&format!(
                "{:width$}  {}",
                left,
                arg.description,
                width = DESCRIPTION_COLUMN
            ));
        }
        out.push('\n');
    }
    out.push('\n');
    out
}

pub fn required(registry: &Registry) -> String {
    block(
        "Required",
        registry.iter().filter(|a| !a.flags.is_optional()),
    )
}

pub fn optional(registry: &Registry) -> String {
    block("Optional", registry.iter().filter(|a| a.flags.is_optional()))
}

pub fn examples(registry: &Registry) -> String {
    let mut out = String::from("    Examples:\n");
    for example in registry.iter().map(|a| a.example.as_str()) {
        if example.trim().is_empty() {
            continue;
        }
        out.push_str(&format!("{INDENT}{}\n", example.trim_end()));
    }
    out
}

/// All four blocks joined in order.
pub fn full(registry: &Registry, exec_name: &str) -> String {
    format!(
        "Help:\n\n{}\n\n{}{}{}",
        usage(registry, exec_name),
        required(registry),
        optional(registry),
        examples(registry)
    )
}

/// Extended help for the argument matching `identifier`.
pub fn extended(registry: &Registry, identifier: &str) -> Result<String> {
    let arg = registry.get_argument(identifier)?;
    let data = |prefix: &str| {
        if arg.data_info.is_empty() {
            String::new()
        } else {
            format!("{prefix}<{}>", arg.data_info)
        }
    };

    let mut out = String::from("Extended help:\n\n    Arguments/Command:\n");
    if arg.flags.has_short() {
        out.push_str(&format!("{INDENT}Short argument: {}{}\n", arg.short, data(" ")));
    }
    if arg.flags.has_long() {
        out.push_str(&format!("{INDENT}Long argument: {}{}\n", arg.long, data("=")));
    }
    if arg.flags.has_command() {
        out.push_str(&format!("{INDENT}Command: {}{}\n", arg.command, data(" ")));
    }

    out.push_str("\n    Full description:\n");
    if !arg.long_description.is_empty() {
        out.push_str(&format!("{INDENT}{}\n", arg.long_description));
    } else if !arg.description.is_empty() {
        out.push_str(&format!("{INDENT}{}\n", arg.description));
    }

    let flags = arg.flags;
    out.push_str("\n    Flags:\n");
    for (label, value) in [
        ("Has short arg", flags.has_short()),
        ("Has long arg", flags.has_long()),
        ("Has command", flags.has_command()),
        ("Is optional", flags.is_optional()),
        ("Is loop only", flags.is_loop_only()),
        ("Is user data allowed", flags.is_user_data_allowed()),
        ("Is user data required", flags.is_user_data_required()),
    ] {
        out.push_str(&format!("{INDENT}{label}: {value}\n"));
    }
    out.push('\n');
    Ok(out)
}
