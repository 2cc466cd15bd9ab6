use bfcalc_lang::{DEFAULT_TAPE_LEN, Engine, EofPolicy, MachineOptions, Outcome};
use clap::{Parser, Subcommand};
use itertools::Itertools;
use miette::IntoDiagnostic;
use miette::miette;
use std::fs::{self, File};
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug, Default)]
#[command(name = "bfcalc")]
#[command(author = env!("CARGO_PKG_AUTHORS"))]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(after_help = "# Examples:\n\n\
    ## To run a program read from stdin:\n\
    bfcalc < program.bf\n\n\
    ## To encode a labeled expression and run it:\n\
    echo 'answer=6*7' | bfcalc encode | bfcalc\n\n\
    ## To feed bytes to `,` from a file:\n\
    bfcalc run program.bf --input data.bin\n\n\
    ## To evaluate an expression:\n\
    bfcalc eval '2+3*4'")]
#[command(
    about = "bfcalc runs tape programs and evaluates the `label=expression` lines they print.",
    long_about = None
)]
pub struct Cli {
    #[clap(subcommand)]
    commands: Option<Commands>,

    #[clap(flatten)]
    run: RunArgs,

    #[clap(flatten)]
    output: OutputArgs,

    /// Increase logging verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    /// Only log errors
    #[arg(short, long, global = true, default_value_t = false)]
    quiet: bool,
}

/// What `,` does when the input runs out.
#[derive(Clone, Copy, Debug, Default, PartialEq, clap::ValueEnum)]
enum Eof {
    /// Stop with an error
    #[default]
    Error,
    /// Leave the cell as it is
    Unchanged,
    /// Store 0 in the cell
    Zero,
}

impl From<Eof> for EofPolicy {
    fn from(eof: Eof) -> Self {
        match eof {
            Eof::Error => EofPolicy::Error,
            Eof::Unchanged => EofPolicy::Unchanged,
            Eof::Zero => EofPolicy::Zero,
        }
    }
}

#[derive(Clone, Debug, clap::Args)]
struct RunArgs {
    /// Program file; the program is read from stdin when omitted
    #[arg(value_name = "PROGRAM")]
    program: Option<PathBuf>,

    /// Read the bytes for `,` from the file instead of stdin
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Number of cells on the tape
    #[arg(long, default_value_t = DEFAULT_TAPE_LEN)]
    tape_len: usize,

    /// Set what `,` does when the input runs out
    #[arg(long, value_enum, default_value_t)]
    eof: Eof,

    /// Print the output as is, without evaluating `label=expression`
    #[arg(long, default_value_t = false)]
    raw: bool,

    /// Print the pointer and the non-zero cells to stderr once the program halts
    #[arg(long, default_value_t = false)]
    dump: bool,
}

impl Default for RunArgs {
    fn default() -> Self {
        Self {
            program: None,
            input: None,
            tape_len: DEFAULT_TAPE_LEN,
            eof: Eof::default(),
            raw: false,
            dump: false,
        }
    }
}

impl RunArgs {
    fn machine_options(&self) -> MachineOptions {
        MachineOptions {
            tape_len: self.tape_len,
            eof: self.eof.into(),
        }
    }
}

#[derive(Clone, Debug, clap::Args, Default)]
struct OutputArgs {
    /// Output to the specified file
    #[clap(short = 'o', long = "output", value_name = "FILE", global = true)]
    output_file: Option<PathBuf>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Run a program (the default when no subcommand is given)
    Run(RunArgs),
    /// Encode text into a program that prints it
    Encode {
        /// Text file; the text is read from stdin when omitted
        file: Option<PathBuf>,
        /// Encode the input bytes verbatim, without trimming or requiring `=`
        #[arg(long, default_value_t = false)]
        bytes: bool,
    },
    /// Evaluate an arithmetic expression
    Eval {
        #[arg(allow_hyphen_values = true)]
        expression: String,
    },
}

impl Cli {
    pub fn init_tracing(&self) {
        let level = if self.quiet {
            "error"
        } else {
            match self.verbose {
                0 => "warn",
                1 => "info",
                2 => "debug",
                _ => "trace",
            }
        };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

        // A subscriber may already be installed when embedded.
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .with_target(false)
            .try_init();
    }

    pub fn run(&self) -> miette::Result<()> {
        match &self.commands {
            Some(Commands::Run(args)) => self.execute(args),
            None => self.execute(&self.run),
            Some(Commands::Encode { file, bytes }) => {
                let content = read_source(file.as_ref())?;
                let engine = Engine::default();

                let program = if *bytes {
                    engine.encode_bytes(&content)
                } else {
                    let text = String::from_utf8(content).into_diagnostic()?;
                    engine.encode(&text).map_err(|e| *e)?
                };

                self.write_output(&program)
            }
            Some(Commands::Eval { expression }) => {
                let value = Engine::default().evaluate(expression).map_err(|e| *e)?;
                self.write_output(&format!("{}\n", value))
            }
        }
    }

    fn execute(&self, args: &RunArgs) -> miette::Result<()> {
        let source = read_source(args.program.as_ref())?;
        let mut engine = Engine::new(args.machine_options());
        engine.set_format(!args.raw);

        let input: Box<dyn Read> = match (&args.input, &args.program) {
            (Some(path), _) => {
                if !path.exists() {
                    return Err(miette!("File not found: {}", path.display()));
                }
                Box::new(File::open(path).into_diagnostic()?)
            }
            (None, Some(_)) => Box::new(io::stdin()),
            // stdin already carried the program
            (None, None) => Box::new(io::empty()),
        };

        let outcome = engine.run(&source, input).map_err(|e| *e)?;
        tracing::info!(steps = outcome.steps, bytes = outcome.output.len(), "program finished");

        if args.dump {
            eprintln!("{}", dump(&outcome));
        }

        self.write_output(&format!("{}\n", outcome.text))
    }

    fn write_output(&self, content: &str) -> miette::Result<()> {
        let mut handle: Box<dyn Write> = match &self.output.output_file {
            Some(path) => Box::new(BufWriter::new(File::create(path).into_diagnostic()?)),
            None => Box::new(BufWriter::new(io::stdout().lock())),
        };

        handle.write_all(content.as_bytes()).into_diagnostic()?;
        handle.flush().into_diagnostic()
    }
}

fn read_source(file: Option<&PathBuf>) -> miette::Result<Vec<u8>> {
    match file {
        Some(file) => {
            if !file.exists() {
                return Err(miette!("File not found: {}", file.display()));
            }
            fs::read(file).into_diagnostic()
        }
        None => {
            let mut buf = Vec::new();
            io::stdin().read_to_end(&mut buf).into_diagnostic()?;
            Ok(buf)
        }
    }
}

fn dump(outcome: &Outcome) -> String {
    format!(
        "pointer: {}\nsteps: {}\ncells: {}",
        outcome.tape.pointer(),
        outcome.steps,
        outcome
            .tape
            .non_zero_cells()
            .map(|(index, value)| format!("[{}]={}", index, value))
            .join(" ")
    )
}

#[cfg(test)]
mod tests {
    use bfcalc_test::create_file;
    use rstest::rstest;
    use scopeguard::defer;

    use super::*;

    #[test]
    fn test_cli_run_program_file() {
        let (_, program_path) = create_file("bfcalc_cli_run.bf", b"++++++++[>++++++<-]>+.");
        let (_, output_path) = create_file("bfcalc_cli_run.out", b"");
        let program_path_clone = program_path.clone();
        let output_path_clone = output_path.clone();

        defer! {
            if program_path_clone.exists() {
                std::fs::remove_file(&program_path_clone).expect("Failed to delete temp file");
            }
            if output_path_clone.exists() {
                std::fs::remove_file(&output_path_clone).expect("Failed to delete temp file");
            }
        }

        let cli = Cli {
            run: RunArgs {
                program: Some(program_path),
                input: Some(PathBuf::from("/dev/null")),
                ..Default::default()
            },
            output: OutputArgs {
                output_file: Some(output_path.clone()),
            },
            ..Cli::default()
        };

        assert!(cli.run().is_ok());
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "1\n");
    }

    #[test]
    fn test_cli_run_with_input_file() {
        let (_, program_path) = create_file("bfcalc_cli_echo.bf", b",.,.");
        let (_, input_path) = create_file("bfcalc_cli_echo.in", b"ok");
        let (_, output_path) = create_file("bfcalc_cli_echo.out", b"");
        let paths = vec![program_path.clone(), input_path.clone(), output_path.clone()];

        defer! {
            for path in &paths {
                if path.exists() {
                    std::fs::remove_file(path).expect("Failed to delete temp file");
                }
            }
        }

        let cli = Cli {
            commands: Some(Commands::Run(RunArgs {
                program: Some(program_path),
                input: Some(input_path),
                ..Default::default()
            })),
            output: OutputArgs {
                output_file: Some(output_path.clone()),
            },
            ..Cli::default()
        };

        assert!(cli.run().is_ok());
        assert_eq!(fs::read_to_string(&output_path).unwrap(), "ok\n");
    }

    #[rstest]
    #[case::unbalanced("bfcalc_cli_unbalanced.bf", b"+]".as_slice(), RunArgs::default())]
    #[case::pointer_out_of_bounds("bfcalc_cli_oob.bf", b"<".as_slice(), RunArgs::default())]
    #[case::input_exhausted("bfcalc_cli_eof.bf", b",".as_slice(), RunArgs::default())]
    #[case::zero_tape("bfcalc_cli_zero_tape.bf", b"+".as_slice(), RunArgs { tape_len: 0, ..Default::default() })]
    fn test_cli_run_errors(#[case] name: &str, #[case] program: &[u8], #[case] args: RunArgs) {
        let (_, program_path) = create_file(name, program);
        let program_path_clone = program_path.clone();

        defer! {
            if program_path_clone.exists() {
                std::fs::remove_file(&program_path_clone).expect("Failed to delete temp file");
            }
        }

        let cli = Cli {
            run: RunArgs {
                program: Some(program_path),
                input: Some(PathBuf::from("/dev/null")),
                ..args
            },
            ..Cli::default()
        };

        assert!(cli.run().is_err());
    }

    #[test]
    fn test_cli_run_missing_program() {
        let cli = Cli {
            run: RunArgs {
                program: Some(PathBuf::from("/nonexistent/bfcalc_program.bf")),
                ..Default::default()
            },
            ..Cli::default()
        };

        assert!(cli.run().is_err());
    }

    #[test]
    fn test_cli_encode_file() {
        let (_, text_path) = create_file("bfcalc_cli_encode.txt", b"x=1+2\n");
        let (_, output_path) = create_file("bfcalc_cli_encode.bf", b"");
        let paths = vec![text_path.clone(), output_path.clone()];

        defer! {
            for path in &paths {
                if path.exists() {
                    std::fs::remove_file(path).expect("Failed to delete temp file");
                }
            }
        }

        let cli = Cli {
            commands: Some(Commands::Encode {
                file: Some(text_path),
                bytes: false,
            }),
            output: OutputArgs {
                output_file: Some(output_path.clone()),
            },
            ..Cli::default()
        };

        assert!(cli.run().is_ok());
        assert_eq!(
            fs::read_to_string(&output_path).unwrap(),
            bfcalc_lang::encode(b"x=1+2")
        );
    }

    #[test]
    fn test_cli_encode_requires_separator() {
        let (_, text_path) = create_file("bfcalc_cli_encode_plain.txt", b"plain");
        let text_path_clone = text_path.clone();

        defer! {
            if text_path_clone.exists() {
                std::fs::remove_file(&text_path_clone).expect("Failed to delete temp file");
            }
        }

        let encode = |bytes| Cli {
            commands: Some(Commands::Encode {
                file: Some(text_path.clone()),
                bytes,
            }),
            output: OutputArgs {
                output_file: Some(std::env::temp_dir().join("bfcalc_cli_encode_plain.bf")),
            },
            ..Cli::default()
        };

        assert!(encode(false).run().is_err());
        assert!(encode(true).run().is_ok());
        std::fs::remove_file(std::env::temp_dir().join("bfcalc_cli_encode_plain.bf")).ok();
    }

    #[rstest]
    #[case::precedence("2+3*4", Some("14\n"))]
    #[case::division_by_zero("5/0", Some("0\n"))]
    #[case::malformed("1+", None)]
    fn test_cli_eval(#[case] expression: &str, #[case] expected: Option<&str>) {
        let output_path = std::env::temp_dir().join(format!(
            "bfcalc_cli_eval_{}.out",
            expression.replace(['+', '*', '/'], "_")
        ));
        let output_path_clone = output_path.clone();

        defer! {
            if output_path_clone.exists() {
                std::fs::remove_file(&output_path_clone).expect("Failed to delete temp file");
            }
        }

        let cli = Cli {
            commands: Some(Commands::Eval {
                expression: expression.to_string(),
            }),
            output: OutputArgs {
                output_file: Some(output_path.clone()),
            },
            ..Cli::default()
        };

        match expected {
            Some(expected) => {
                assert!(cli.run().is_ok());
                assert_eq!(fs::read_to_string(&output_path).unwrap(), expected);
            }
            None => assert!(cli.run().is_err()),
        }
    }

    #[test]
    fn test_dump() {
        let outcome = Engine::default().run(b"++>+++", io::empty()).unwrap();
        assert_eq!(dump(&outcome), "pointer: 1\nsteps: 6\ncells: [0]=2 [1]=3");
    }

    #[test]
    fn test_parse_default_run() {
        let cli = Cli::parse_from(["bfcalc", "--tape-len", "10", "--eof", "zero", "prog.bf"]);

        assert!(cli.commands.is_none());
        assert_eq!(cli.run.tape_len, 10);
        assert_eq!(cli.run.eof, Eof::Zero);
        assert_eq!(cli.run.program, Some(PathBuf::from("prog.bf")));
    }

    #[test]
    fn test_parse_eval_negative_looking_expression() {
        let cli = Cli::parse_from(["bfcalc", "eval", "-5"]);

        assert!(matches!(
            cli.commands,
            Some(Commands::Eval { ref expression }) if expression == "-5"
        ));
    }
}
