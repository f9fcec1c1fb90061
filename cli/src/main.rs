use atty::Stream;
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use reedline::{DefaultPrompt, DefaultPromptSegment, Reedline, Signal};
use settle::calc::Calc;
use settle::loader::{self, LoadMode, Loaded};
use settle::{
    Engine, EngineOptions, Environment, Resolution, ResolveOptions, render_failures, splitter,
};
use std::io::Read;
use std::path::PathBuf;
use tracing::debug;

/// Settle - resolve loosely-ordered definition documents to a fixpoint
#[derive(Parser, Debug)]
#[command(name = "settle")]
#[command(about = "Resolve definition documents", long_about = None)]
struct Args {
    /// Evaluate the input as a single statement instead of a section
    #[arg(long)]
    expression: bool,

    /// Report the statements still failing at the fixpoint instead of values
    #[arg(long)]
    errors: bool,

    /// Keep exported bindings' internal names in the result
    #[arg(long)]
    keep_internal: bool,

    /// Abort if no fixpoint is reached within this many passes
    #[arg(long)]
    max_passes: Option<usize>,

    /// Print the split statements and exit (for debugging)
    #[arg(long)]
    debug_split: bool,

    /// File to load (if not provided, reads from stdin)
    file: Option<PathBuf>,
}

impl Args {
    fn resolve_options(&self) -> ResolveOptions {
        ResolveOptions {
            return_errors: self.errors,
            export_only_shared: !self.keep_internal,
            max_passes: self.max_passes,
            ..ResolveOptions::default()
        }
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let args = Args::parse();
    let engine = Engine::new(Calc, EngineOptions::default());
    let options = args.resolve_options();

    match &args.file {
        Some(path) => {
            let text = std::fs::read_to_string(path).into_diagnostic()?;
            run_text(&engine, &options, &args, &text)
        }
        None if atty::is(Stream::Stdin) && !args.expression && !args.debug_split => {
            repl(&engine, &options)
        }
        None => {
            let mut text = String::new();
            std::io::stdin()
                .read_to_string(&mut text)
                .into_diagnostic()?;
            run_text(&engine, &options, &args, &text)
        }
    }
}

fn run_text(
    engine: &Engine<Calc>,
    options: &ResolveOptions,
    args: &Args,
    text: &str,
) -> Result<()> {
    if args.debug_split {
        let normalized = loader::normalize_line_endings(text);
        for statement in splitter::split_section(normalized.as_ref()) {
            println!("{}", statement);
        }
        return Ok(());
    }

    let mode = if args.expression {
        LoadMode::Expression
    } else {
        LoadMode::Section
    };

    match loader::load_str_with_options(engine, text, Environment::new(), mode, options)? {
        Loaded::Environment(env) => {
            debug!(bindings = env.len(), "section resolved");
            for (name, value) in env.iter() {
                println!("{} = {}", name, value);
            }
            Ok(())
        }
        Loaded::Value(bindings) => {
            for (name, value) in &bindings {
                println!("{} = {}", name, value);
            }
            Ok(())
        }
        Loaded::Failures(failures) => {
            if failures.is_empty() {
                eprintln!("all statements resolved");
                return Ok(());
            }
            render_failures(text, &failures);
            std::process::exit(1);
        }
    }
}

fn repl(engine: &Engine<Calc>, options: &ResolveOptions) -> Result<()> {
    println!("settle - statements accumulate; :resolve runs the fixpoint");
    println!("commands: :resolve :errors :list :clear :quit");

    let mut line_editor = Reedline::create();
    let prompt = DefaultPrompt::new(
        DefaultPromptSegment::Basic("settle".to_string()),
        DefaultPromptSegment::Empty,
    );

    let mut statements: Vec<String> = Vec::new();
    loop {
        match line_editor.read_line(&prompt).into_diagnostic()? {
            Signal::Success(line) => {
                let line = line.trim();
                match line {
                    "" => {}
                    ":quit" | ":q" => break,
                    ":clear" => {
                        statements.clear();
                        println!("cleared");
                    }
                    ":list" => {
                        for statement in &statements {
                            println!("{}", statement);
                        }
                    }
                    ":resolve" => resolve_accumulated(engine, options, &statements, false)?,
                    ":errors" => resolve_accumulated(engine, options, &statements, true)?,
                    _ => statements.push(line.to_string()),
                }
            }
            Signal::CtrlC => continue,
            Signal::CtrlD => break,
        }
    }
    Ok(())
}

fn resolve_accumulated(
    engine: &Engine<Calc>,
    options: &ResolveOptions,
    statements: &[String],
    return_errors: bool,
) -> Result<()> {
    let options = ResolveOptions {
        return_errors,
        ..options.clone()
    };
    let batch: Vec<&str> = statements.iter().map(String::as_str).collect();

    let resolution = engine
        .resolve_statements_with_options(&batch, Environment::new(), &options)
        .into_diagnostic()?;

    match resolution {
        Resolution::Values(env) => {
            for (name, value) in env.iter() {
                println!("{} = {}", name, value);
            }
        }
        Resolution::Failures(failures) => {
            if failures.is_empty() {
                println!("all statements resolved");
            }
            for failure in failures {
                println!("{}: {}", failure.statement, failure.error);
            }
        }
    }
    Ok(())
}
