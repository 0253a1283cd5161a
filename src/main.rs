use clap::Parser;
use httpconsole::console::config::{Args, Options, Target};
use httpconsole::console::render::Renderer;
use httpconsole::console::repl::{EditorReader, Repl};
use httpconsole::console::session::Session;
use httpconsole::socket::proxy::ProxySettings;
use std::process::ExitCode;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::EnvFilter;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    colored::control::set_override(args.colors);

    let target = match Target::parse(&args.target, args.ssl) {
        Ok(target) => target,
        Err(e) => {
            eprintln!("httpconsole: {}", e);
            return ExitCode::from(255);
        }
    };
    let options = Options::from_args(&args);

    let session = match Session::open(
        target,
        options,
        ProxySettings::from_env(),
        Renderer::stdio(options.color),
    )
    .await
    {
        Ok(session) => session,
        Err(e) => {
            eprintln!("httpconsole: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let reader = match EditorReader::new() {
        Ok(reader) => reader,
        Err(e) => {
            eprintln!("httpconsole: could not open the terminal: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut repl = Repl::new(session, reader);
    match repl.run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("httpconsole: {}", e);
            ExitCode::FAILURE
        }
    }
}
