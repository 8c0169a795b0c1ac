//! Prints the C-style rendering of Objective-C type encodings.
//!
//! Encodings come from the command line or, when none are given, one per line from stdin.
//! Set `RUST_LOG=debug` to see where lenient decoding gave up on part of an encoding.

use std::io::{self, BufRead};
use std::process::ExitCode;

use clap::Parser;
use objc_encoding::objc::types::{DecodeOptions, Decoder};
use objc_encoding::objc::MethodSignature;

#[derive(Parser, Debug)]
#[command(name = "objc_type_decode")]
#[command(about = "Decode Objective-C type encodings", long_about = None)]
struct Args {
    /// Indentation unit for nested struct and union bodies
    #[arg(long, default_value = "    ")]
    indent: String,

    /// Also print the canonical re-encoding
    #[arg(long)]
    encode: bool,

    /// Treat each input as a method type string such as `v24@0:8@16`
    #[arg(long)]
    signature: bool,

    /// Fail on any damaged sub-encoding instead of degrading
    #[arg(long)]
    strict: bool,

    /// Encodings to decode (if not provided, reads from stdin)
    encodings: Vec<String>,
}

fn main() -> ExitCode {
    let args = Args::parse();

    use tracing_subscriber::{EnvFilter, fmt};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    let options = if args.strict {
        DecodeOptions::strict()
    } else {
        DecodeOptions::default()
    };
    let decoder = Decoder::new(options);

    let inputs: Vec<String> = if args.encodings.is_empty() {
        io::stdin()
            .lock()
            .lines()
            .map_while(Result::ok)
            .filter(|line| !line.trim().is_empty())
            .collect()
    } else {
        args.encodings.clone()
    };

    let mut failed = false;
    for input in &inputs {
        let input = input.trim();
        match render(&decoder, &args, input) {
            Ok(output) => println!("{output}"),
            Err(message) => {
                eprintln!("{input}: {message}");
                failed = true;
            }
        }
    }

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn render(decoder: &Decoder, args: &Args, input: &str) -> Result<String, String> {
    if args.signature {
        let signature = MethodSignature::parse_with(decoder, input).map_err(|err| err.to_string())?;
        let mut output = signature.to_string();
        if args.encode {
            output.push_str(&format!("\n  => {}", signature.encoded_types()));
        }
        return Ok(output);
    }

    let node = if args.strict {
        decoder.try_decode(input).map_err(|err| err.to_string())?
    } else {
        decoder
            .decode(input)
            .ok_or_else(|| "not a type encoding".to_owned())?
    };
    let mut output = node.decoded(&args.indent);
    if args.encode {
        output.push_str(&format!("\n  => {}", node.encoded()));
    }
    Ok(output)
}
