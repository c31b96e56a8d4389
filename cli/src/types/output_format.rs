use clap::ValueEnum;

#[derive(Debug, PartialEq, Eq, Clone, Copy, Default, ValueEnum)]
#[clap(rename_all = "lower")]
pub enum OutputFormat {
  #[default]
  Json,
  Toml,
}
