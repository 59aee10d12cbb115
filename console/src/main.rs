mod helper;

use dataconsole::Namespace;
use helper::ConsoleHelper;
use std::path::PathBuf;

#[derive(clap::Parser)]
#[command(name = "dataconsole", version, about = "Interactive console with chain-aware tab completion")]
struct Cli {
    /// Describe an expression and exit
    #[arg(short, long)]
    eval: Option<String>,

    /// JSON file describing the objects available at the prompt
    #[arg(short, long)]
    namespace: Option<PathBuf>,

    /// History file (defaults to ~/.dataconsole_history)
    #[arg(long)]
    history: Option<PathBuf>,
}

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    // Initialize logger (controlled by RUST_LOG)
    env_logger::init();

    let cli = <Cli as clap::Parser>::parse();

    let namespace = match cli.namespace {
        Some(ref path) => match Namespace::load(path) {
            Ok(namespace) => namespace,
            Err(e) => {
                eprintln!("Error loading namespace {}: {e}", path.display());
                std::process::exit(1);
            }
        },
        None => Namespace::builtin(),
    };

    if let Some(expr) = cli.eval {
        match namespace.describe(&expr) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                eprintln!("{e}");
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    let history_path = cli
        .history
        .or_else(|| std::env::var("HOME").ok().map(|h| PathBuf::from(h).join(".dataconsole_history")));
    run_console(namespace, history_path)
}

#[allow(clippy::println_empty_string)]
fn run_console(namespace: Namespace, history_path: Option<PathBuf>) -> Result<(), Box<dyn std::error::Error + Send + Sync + 'static>> {
    use rustyline::Editor;
    use rustyline::error::ReadlineError;

    let ver = clap::crate_version!();
    println!("Data console v{ver}. Press Tab to complete, type 'exit' or Ctrl-D to quit.");

    let mut rl = Editor::<ConsoleHelper, rustyline::history::FileHistory>::new()?;
    rl.set_helper(Some(ConsoleHelper::new(namespace)));

    if let Some(ref p) = history_path
        && let Err(e) = rl.load_history(p)
    {
        log::debug!("no history loaded from {}: {e}", p.display());
    }

    loop {
        match rl.readline("console> ") {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed == "exit" || trimmed == ".exit" {
                    break;
                }
                if trimmed.is_empty() {
                    continue;
                }

                rl.add_history_entry(trimmed)?;

                let Some(helper) = rl.helper() else {
                    break;
                };
                match helper.namespace().describe(trimmed) {
                    Ok(text) => println!("{text}"),
                    Err(e) => eprintln!("{e}"),
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("");
                continue;
            }
            Err(ReadlineError::Eof) => {
                println!("Goodbye");
                break;
            }
            Err(err) => {
                eprintln!("Readline error: {err}");
                break;
            }
        }
    }

    if let Some(ref p) = history_path {
        rl.save_history(p)?;
    }
    Ok(())
}
