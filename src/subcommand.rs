use {super::*, clap::ValueEnum};

pub mod build;
pub mod decode;
pub mod policy;

#[derive(Debug, Parser)]
pub(crate) enum Subcommand {
  #[command(about = "Draft a transaction spending wallet UTXOs")]
  Build(build::Build),
  #[command(about = "Decode a serialized transaction")]
  Decode(decode::Decode),
  #[command(about = "Print the effective fee policy")]
  Policy,
}

impl Subcommand {
  pub(crate) fn run(self, settings: Settings) -> SubcommandResult {
    match self {
      Self::Build(build) => build.run(settings),
      Self::Decode(decode) => decode.run(settings.network()),
      Self::Policy => policy::run(settings),
    }
  }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, ValueEnum)]
pub enum OutputFormat {
  #[default]
  Json,
  Yaml,
  Minify,
}

pub trait Output {
  fn print(&self, format: OutputFormat);
}

impl<T> Output for T
where
  T: Serialize,
{
  fn print(&self, format: OutputFormat) {
    match format {
      OutputFormat::Json => serde_json::to_writer_pretty(io::stdout(), self).ok(),
      OutputFormat::Yaml => serde_yaml::to_writer(io::stdout(), self).ok(),
      OutputFormat::Minify => serde_json::to_writer(io::stdout(), self).ok(),
    };
    println!();
  }
}

pub(crate) type SubcommandResult = SnafuResult<Option<Box<dyn Output>>>;
