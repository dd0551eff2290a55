extern crate ansi_term;
extern crate ctrlc;
extern crate linefeed;

use crate::lang;
use crate::mach::Runtime;
use ansi_term::Style;
use linefeed::{Interface, ReadResult};
use std::io::BufRead;
use std::sync::atomic::Ordering;

pub fn main() {
    let mut filename: Option<String> = None;
    let mut debug = false;
    let mut minify = false;
    let mut interactive = false;
    let mut program_args: Vec<String> = Vec::new();
    for arg in std::env::args().skip(1) {
        if filename.is_none() && arg.starts_with('-') && arg.len() > 1 {
            match arg.as_str() {
                "-h" | "--help" => {
                    usage();
                    return;
                }
                "-d" | "--debug" => debug = true,
                "-m" | "--minify" => minify = true,
                "-i" | "--interactive" => interactive = true,
                _ => {
                    barf(&format!("Unknown argument `{}'", arg));
                    std::process::exit(1);
                }
            }
        } else if filename.is_none() {
            filename = Some(arg);
        } else {
            // everything after the file name belongs to the program
            program_args.push(arg);
        }
    }

    if interactive {
        if let Err(error) = repl(debug) {
            eprintln!("{}", error);
        }
        return;
    }

    let code = match read_program(&filename) {
        Ok(code) => code,
        Err(error) => {
            barf(&format!(
                "Could not read {}: {}",
                filename.as_deref().unwrap_or("STDIN"),
                error
            ));
            std::process::exit(1);
        }
    };

    if minify {
        match lang::tokenize(&code) {
            Ok(tokens) => println!("{}", lang::minify(&tokens)),
            Err(error) => {
                barf(&error.to_string());
                std::process::exit(1);
            }
        }
        return;
    }

    run_program(&code, debug, &program_args);
}

fn usage() {
    println!("Usage: snowman [OPTION]... [FILENAME] [ARGS]...");
    println!("Options:");
    println!("    -h, --help: display this message");
    println!("    -i, --interactive: start a REPL");
    println!("    -d, --debug: trace each token and the machine state");
    println!("    -m, --minify: print minified source and exit");
    println!("Snowman will read from STDIN (until EOF or a line reading __END__)");
    println!("if you do not specify a file name or the -h or -i options.");
}

fn barf(message: &str) {
    eprintln!("{}", Style::new().bold().paint(message));
}

fn read_program(filename: &Option<String>) -> std::io::Result<String> {
    match filename {
        Some(name) => std::fs::read_to_string(name),
        None => {
            let stdin = std::io::stdin();
            let mut code = String::new();
            for line in stdin.lock().lines() {
                let line = line?;
                if line == "__END__" {
                    break;
                }
                code.push_str(&line);
                code.push('\n');
            }
            Ok(code)
        }
    }
}

fn run_program(code: &str, debug: bool, program_args: &[String]) {
    let mut runtime = Runtime::new();
    runtime.trace = debug;
    for arg in program_args {
        runtime.add_arg(arg);
    }
    let interrupted = runtime.interrupt_handle();
    ctrlc::set_handler(move || {
        interrupted.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    let result = runtime.run(code);
    for error in runtime.take_errors() {
        barf(&format!("{}; non-fatal error, continuing", error));
    }
    if let Err(error) = result {
        barf(&format!("{}; fatal error, aborting", error));
        std::process::exit(1);
    }
}

fn repl(debug: bool) -> std::io::Result<()> {
    let interface = Interface::new("snowman")?;
    interface.set_prompt("~ ")?;
    let mut runtime = Runtime::new();
    runtime.trace = debug;
    let interrupted = runtime.interrupt_handle();
    ctrlc::set_handler(move || {
        interrupted.store(true, Ordering::SeqCst);
    })
    .expect("Error setting Ctrl-C handler");

    println!("Snowman {}", env!("CARGO_PKG_VERSION"));
    loop {
        match interface.read_line()? {
            ReadResult::Input(line) => {
                let result = runtime.run(&line);
                for error in runtime.take_errors() {
                    barf(&format!("{}; non-fatal error, continuing", error));
                }
                if let Err(error) = result {
                    // a fatal error ends the program, not the session
                    barf(&format!("{}; fatal error, aborting", error));
                }
                print!("{}", runtime.debug());
                interface.add_history_unique(line);
            }
            ReadResult::Signal(_) | ReadResult::Eof => break,
        }
    }
    Ok(())
}
