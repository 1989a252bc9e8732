use bluez_probe::{Adapter, Session, Target};
use clap::Parser;

/// Prints the system bus connection and a BlueZ adapter object.
#[derive(Debug, Parser)]
#[command(name = "bluez-probe", version)]
struct Args {
    /// Adapter name (eg. hci1) or object path [default: /org/bluez/hci0]
    adapter: Option<String>,
}

impl Args {
    fn target(&self) -> bluez_probe::Result<Target> {
        match &self.adapter {
            Some(arg) => Target::parse(arg),
            None => Ok(Target::default()),
        }
    }
}

#[pollster::main]
async fn main() -> bluez_probe::Result<()> {
    let args = Args::parse();

    env_logger::Builder::new()
        .filter_module(env!("CARGO_CRATE_NAME"), log::LevelFilter::Debug)
        .parse_default_env()
        .init();

    let target = args.target()?;
    let session = Session::new().await?;
    let adapter = Adapter::get(&session, &target).await?;
    println!("{}", session);
    println!("{}", adapter);

    match adapter.info().await {
        Ok(info) => println!("{}", info),
        Err(e) => eprintln!("warning: could not read adapter properties: {}", e),
    }

    Ok(())
}
