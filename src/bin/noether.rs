use noether::Evaluator;

use std::io::{self, Write};

#[cfg(feature = "repl")]
use std::io::BufRead;

#[cfg(feature = "repl")]
use noether::cli::{should_show_banner, split_commands, Cli, ExecutionMode};
#[cfg(feature = "repl")]
use std::fs;

#[cfg(feature = "repl")]
use clap::Parser;

#[cfg(feature = "repl")]
use crossterm::{
    style::{Color, Print, ResetColor, SetForegroundColor},
    tty::IsTty,
    ExecutableCommand,
};

fn main() -> io::Result<()> {
    #[cfg(feature = "repl")]
    {
        // Parse command-line arguments
        let cli = Cli::parse();

        // Create an evaluation session with the requested configuration
        let config = cli.to_config();
        let mut evaluator = Evaluator::new();
        evaluator.set_use_degrees(config.use_degrees);

        // Determine execution mode
        match cli.execution_mode() {
            ExecutionMode::Execute => {
                let commands = cli.execute.unwrap_or_default();
                run_execute_mode(&mut evaluator, &commands, cli.no_color)
            }
            ExecutionMode::Script => {
                let path = cli.script.unwrap_or_default();
                run_script_mode(&mut evaluator, &path, cli.no_color)
            }
            ExecutionMode::Interactive => {
                // Check if stdin is a terminal (interactive mode) or a pipe
                if io::stdin().is_tty() {
                    run_interactive(&mut evaluator, cli.quiet)
                } else {
                    run_batch(&mut evaluator, cli.no_color)
                }
            }
        }
    }

    #[cfg(not(feature = "repl"))]
    {
        let mut evaluator = Evaluator::new();
        run_interactive(&mut evaluator, false)
    }
}

fn run_interactive(evaluator: &mut Evaluator, quiet: bool) -> io::Result<()> {
    // Only show the banner when stdout is worth decorating
    #[cfg(feature = "repl")]
    if !quiet && should_show_banner(ExecutionMode::Interactive) && io::stdin().is_tty() {
        println!("Noether: an expression evaluator");
        println!("Empty line to quit\n");
    }

    #[cfg(not(feature = "repl"))]
    if !quiet {
        println!("Noether: an expression evaluator");
        println!("Empty line to quit\n");
    }

    #[cfg(feature = "repl")]
    let use_color = io::stdout().is_tty();
    #[cfg(not(feature = "repl"))]
    let use_color = false;

    loop {
        print!("> ");
        io::stdout().flush()?;

        let mut buffer = String::new();
        let read = io::stdin().read_line(&mut buffer)?;
        let input = buffer.trim();

        // An empty line (or the end of the stream) ends the session
        if read == 0 || input.is_empty() {
            println!("done.");
            return Ok(());
        }

        execute_and_print(evaluator, input, use_color)?;
    }
}

#[cfg(feature = "repl")]
fn run_batch(evaluator: &mut Evaluator, no_color: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let reader = stdin.lock();

    let use_color = io::stdout().is_tty() && !no_color;

    for line in reader.lines() {
        let line = line?;

        if line.trim().is_empty() {
            continue;
        }

        execute_and_print(evaluator, line.trim(), use_color)?;
    }

    Ok(())
}

#[cfg(feature = "repl")]
fn run_execute_mode(evaluator: &mut Evaluator, commands: &str, no_color: bool) -> io::Result<()> {
    let use_color = io::stdout().is_tty() && !no_color;

    // Split by semicolons and evaluate each expression in turn
    for command in split_commands(commands) {
        execute_and_print(evaluator, command, use_color)?;
    }

    Ok(())
}

#[cfg(feature = "repl")]
fn run_script_mode(evaluator: &mut Evaluator, path: &str, no_color: bool) -> io::Result<()> {
    let contents = fs::read_to_string(path)?;

    let use_color = io::stdout().is_tty() && !no_color;

    for line in contents.lines() {
        let line = line.trim();

        if line.is_empty() {
            continue;
        }

        execute_and_print(evaluator, line, use_color)?;
    }

    Ok(())
}

/// Variables the REPL resolves on its own; everything else is undefined.
fn resolve_builtin_variable(name: &str) -> Option<f64> {
    if name.eq_ignore_ascii_case("TIME") {
        let now = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_secs_f64())
            .unwrap_or(0.0);
        Some(now)
    } else {
        None
    }
}

#[cfg(feature = "repl")]
fn execute_and_print(evaluator: &mut Evaluator, input: &str, use_color: bool) -> io::Result<()> {
    match evaluator.evaluate_with(input, resolve_builtin_variable) {
        Ok(value) => {
            if use_color {
                let mut stdout = io::stdout();
                stdout.execute(SetForegroundColor(Color::Green))?;
                stdout.execute(Print("● "))?;
                stdout.execute(ResetColor)?;
            }
            println!(
                "[SUCCESS] result = {} (0x{:016X})",
                format_g(value),
                value as i64
            );
        }
        Err(err) => {
            if use_color {
                let mut stdout = io::stdout();
                stdout.execute(SetForegroundColor(Color::Red))?;
                stdout.execute(Print("● "))?;
                stdout.execute(ResetColor)?;
                println!("{err} ({})", err.code_name());
            } else {
                eprintln!("ERROR: {err} ({})", err.code_name());
            }
        }
    }

    Ok(())
}

#[cfg(not(feature = "repl"))]
fn execute_and_print(evaluator: &mut Evaluator, input: &str, _use_color: bool) -> io::Result<()> {
    match evaluator.evaluate_with(input, resolve_builtin_variable) {
        Ok(value) => println!(
            "[SUCCESS] result = {} (0x{:016X})",
            format_g(value),
            value as i64
        ),
        Err(err) => eprintln!("ERROR: {err} ({})", err.code_name()),
    }

    Ok(())
}

/// Formats a value the way C's `%g` does: six significant digits, trailing
/// zeros trimmed, scientific notation for very large or very small
/// magnitudes.
fn format_g(value: f64) -> String {
    if value.is_nan() {
        return "nan".to_string();
    }
    if value.is_infinite() {
        return if value < 0.0 { "-inf" } else { "inf" }.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let exponent = value.abs().log10().floor() as i32;
    if exponent < -4 || exponent >= 6 {
        let rendered = format!("{value:.5e}");
        match rendered.split_once('e') {
            Some((digits, exp)) => {
                let digits = digits.trim_end_matches('0').trim_end_matches('.');
                let exp: i32 = exp.parse().unwrap_or(0);
                format!(
                    "{}e{}{:02}",
                    digits,
                    if exp < 0 { '-' } else { '+' },
                    exp.abs()
                )
            }
            None => rendered,
        }
    } else {
        let decimals = (5 - exponent).max(0) as usize;
        let fixed = format!("{value:.decimals$}");
        if fixed.contains('.') {
            fixed
                .trim_end_matches('0')
                .trim_end_matches('.')
                .to_string()
        } else {
            fixed
        }
    }
}
