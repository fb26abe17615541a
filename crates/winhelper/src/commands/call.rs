use std::process::ExitCode;

use serde_json::Value;

use super::Session;

/// Runs one operation through the host dispatch table and prints the reply
/// as JSON.
pub fn execute(session: &Session, operation: &str, args: &[String]) -> ExitCode {
    let args: Vec<Value> = args.iter().map(|a| parse_arg(a)).collect();

    match session.controller.call(operation, &args) {
        Ok(reply) => {
            println!("{reply}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Reads an argument as a JSON literal, falling back to a plain string so
/// window titles and device keys need no quoting.
fn parse_arg(arg: &str) -> Value {
    serde_json::from_str(arg).unwrap_or_else(|_| Value::String(arg.to_string()))
}
