// binfp: software IEEE 754 arithmetic
//
// main.rs
//
// CLI entry point: parse argv, decode operands, dispatch into a
// rounding context, print the result, map any parse failure to the
// fixed exit code.

use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use binfp::cli::Args;
use binfp::error::ERROR_ARGUMENTS_INVALID;
use binfp::{text, Context, Number};

fn main() -> ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(std::io::stderr)
        .init();

    let argv: Vec<String> = std::env::args().skip(1).collect();
    match run(&argv) {
        Ok(text) => {
            println!("{text}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("{err}");
            ExitCode::from(ERROR_ARGUMENTS_INVALID as u8)
        }
    }
}

fn run(argv: &[String]) -> Result<String, binfp::error::CliError> {
    let args = Args::parse(argv)?;
    let ctx = Context::new(args.format, args.mode);

    let a = Number::decode(args.bits_a, args.format);
    tracing::debug!(sign = a.sign, exp = a.exp, mant = a.mant, normalized = a.normalized, "decoded left operand");

    let result = match args.op {
        None => a,
        Some((op, bits_b)) => {
            let b = Number::decode(bits_b, args.format);
            tracing::debug!(sign = b.sign, exp = b.exp, mant = b.mant, normalized = b.normalized, "decoded right operand");
            match op {
                '+' => ctx.add(&a, &b),
                '-' => ctx.sub(&a, &b),
                '*' => ctx.mul(&a, &b),
                '/' => ctx.div(&a, &b),
                _ => unreachable!("Args::parse only accepts +-*/"),
            }
        }
    };
    tracing::debug!(sign = result.sign, exp = result.exp, mant = result.mant, "settled result");

    Ok(text::format_text(&result))
}
