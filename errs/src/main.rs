#![allow(clippy::must_use_candidate, clippy::missing_errors_doc)]

mod args;

use std::io::Write;

use args::{Args, Command, Explain};
use clap::Parser;
use errs_config::Config;
use errs_core::{Arg, Cause, Code, Failure, Kind, Parameter, build};
use errs_http::{BufferedResponse, Translator};
use strum::IntoEnumIterator;

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = match args.config {
        Some(ref path) => Config::load(path)?,
        None => Config::default(),
    };

    errs_telemetry::init(config.telemetry.as_ref(), args.log.as_deref())?;

    if Translator::from(&config.response).install().is_err() {
        tracing::warn!("translator already installed, keeping the existing one");
    }

    let mut out = std::io::stdout().lock();
    match args.command {
        Command::Kinds => print_kinds(&mut out)?,
        Command::Explain(explain) => print_response(&mut out, &build_error(explain))?,
    }

    Ok(())
}

fn print_kinds(out: &mut impl Write) -> anyhow::Result<()> {
    for kind in Kind::iter() {
        let name: &'static str = kind.into();
        let status = kind.status_code();
        writeln!(out, "{name:<16} {} {}", status.as_u16(), status.canonical_reason().unwrap_or(""))?;
    }
    Ok(())
}

fn build_error(explain: Explain) -> Failure {
    let mut args = vec![Arg::from(explain.kind)];
    if let Some(code) = explain.code {
        args.push(Code::new(code).into());
    }
    if let Some(param) = explain.param {
        args.push(Parameter::new(param).into());
    }
    if let Some(message) = explain.message {
        args.push(Cause::message(message).into());
    }

    match explain.status {
        Some(status) => {
            args.insert(0, status.into());
            build::re(args)
        }
        None => build::e(args),
    }
}

fn print_response(out: &mut impl Write, failure: &Failure) -> anyhow::Result<()> {
    let mut w = BufferedResponse::default();
    Translator::global().write(&mut w, Some(failure));

    let status = w.status();
    writeln!(out, "HTTP/1.1 {} {}", status.as_u16(), status.canonical_reason().unwrap_or(""))?;
    for (name, value) in w.headers() {
        writeln!(out, "{name}: {}", value.to_str()?)?;
    }
    writeln!(out)?;
    out.write_all(w.body())?;
    Ok(())
}
