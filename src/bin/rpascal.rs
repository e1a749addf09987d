use std::env;
use std::error;
use std::fs;
use std::result;

use program::perror;

extern crate rpascal;
use rpascal::core::{Environment, Interpreter, Parser, Scanner};

type Error = Box<dyn error::Error>;
type Result<T> = result::Result<T, Error>;

fn run(source: String) -> Result<Environment> {
    let parser = Parser::new(Scanner::new(source))?;
    let program = parser.parse()?;

    let mut environment = Environment::new();
    Interpreter::new(&mut environment).interpret(&program)?;

    Ok(environment)
}

fn run_file(path: &str) -> Result<()> {
    let source = fs::read_to_string(path)?;
    let environment = run(source)?;

    // the language has no output statements; the final store is the result
    let mut bindings: Vec<_> = environment.iter().collect();
    bindings.sort_by(|a, b| a.0.cmp(b.0));
    for (name, value) in bindings {
        println!("{} = {}", name, value);
    }

    Ok(())
}

fn fail_if_err(r: Result<()>) {
    if let Err(e) = r {
        perror(e)
    }
}

fn main() {
    let args: Vec<String> = env::args().collect();
    match args.get(1) {
        Some(path) if args.len() == 2 => fail_if_err(run_file(path)),
        _ => perror("usage: rpascal <script>".to_owned()),
    }
}
