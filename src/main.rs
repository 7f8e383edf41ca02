use anyhow::{bail, Context};
use jam::Program;
use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

const USAGE: &str = "usage: jam [--types] [FILE]";

#[derive(Default, Debug)]
struct Options {
    show_types: bool,
    path: Option<PathBuf>,
}

impl Options {
    fn parse(args: impl IntoIterator<Item = String>) -> anyhow::Result<Self> {
        let mut options = Self::default();
        for arg in args {
            match arg.as_str() {
                "--types" | "-t" => options.show_types = true,
                s if s.starts_with('-') && s != "-" => bail!("unknown option '{s}'\n{USAGE}"),
                _ if options.path.is_some() => bail!("more than one input file given\n{USAGE}"),
                "-" => {}
                _ => options.path = Some(PathBuf::from(&arg)),
            }
        }
        Ok(options)
    }

    fn read_source(&self) -> anyhow::Result<String> {
        match &self.path {
            Some(path) => std::fs::read_to_string(path).with_context(|| format!("could not read '{}'", path.display())),
            None => {
                let mut source = String::new();
                std::io::stdin()
                    .read_to_string(&mut source)
                    .context("could not read standard input")?;
                Ok(source)
            }
        }
    }
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    let options = Options::parse(std::env::args().skip(1))?;
    log::debug!("{options:?}");
    let program = Program::new(options.read_source()?);
    let mut failed = false;
    for result in program.run() {
        match result {
            Ok(outcome) if options.show_types => println!("{} : {}", outcome.value, outcome.ty()),
            Ok(outcome) => println!("{}", outcome.value),
            Err(e) => {
                failed = true;
                println!("error: {e}");
            }
        }
    }
    Ok(if failed { ExitCode::FAILURE } else { ExitCode::SUCCESS })
}
